//! Request/response façade over the projection. This is what an outer layer
//! (HTTP handler, CLI) talks to: it takes raw numbers or DMS strings, runs the
//! projection in the requested direction and hands back every representation
//! of the result.

use std::fmt::Display;

use tracing::{debug, warn};

use crate::{
    coords::{dms::Dms, grid::GridCoord, latlon::LatLon},
    projections::{Projection, TransverseMercator},
    utility::check_latitude_domain,
    Error,
};

/// Which way a conversion goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum Direction {
    GridToGeo,
    GeoToGrid,
}

/// Geographic input, either as decimal degrees or as DMS strings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(untagged))]
pub enum GeographicInput {
    Dms {
        latitude_dms: String,
        longitude_dms: String,
    },
    Decimal {
        latitude: f64,
        longitude: f64,
    },
}

/// A single conversion request.
///
/// With the `serde` feature this reads the same JSON the web front end sends:
/// `{"type": "grid_to_geo", "easting": .., "northing": ..}` with feet, or
/// `{"type": "geo_to_grid", "latitude": .., "longitude": ..}`, or
/// `{"type": "geo_to_grid", "latitude_dms": "..", "longitude_dms": ".."}`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum ConversionRequest {
    GridToGeo {
        easting: f64,
        northing: f64,
    },
    GeoToGrid {
        #[cfg_attr(feature = "serde", serde(flatten))]
        input: GeographicInput,
    },
}

impl ConversionRequest {
    pub fn direction(&self) -> Direction {
        match self {
            ConversionRequest::GridToGeo { .. } => Direction::GridToGeo,
            ConversionRequest::GeoToGrid { .. } => Direction::GeoToGrid,
        }
    }
}

/// Result of a conversion in either direction: the grid point in feet and
/// meters, and the geographic point in decimal degrees and DMS.
///
/// With the `serde` feature this is written flat, the way the web front end
/// reads it: `direction`, `easting_ft`, `northing_ft`, `easting_m`,
/// `northing_m`, `latitude`, `longitude`, and `latitude_dms`/`longitude_dms`
/// as rendered `D° M' S.SS" H` text.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConversionResult {
    pub direction: Direction,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub grid: GridCoord,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub geographic: LatLon,
    #[cfg_attr(feature = "serde", serde(with = "dms_text"))]
    pub latitude_dms: Dms,
    #[cfg_attr(feature = "serde", serde(with = "dms_text"))]
    pub longitude_dms: Dms,
}

#[cfg(feature = "serde")]
mod dms_text {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    use crate::coords::dms::Dms;

    pub(super) fn serialize<S: Serializer>(value: &Dms, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Dms, D::Error> {
        let text = String::deserialize(deserializer)?;
        Dms::parse_str(&text).map_err(D::Error::custom)
    }
}

impl Display for ConversionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "easting:   {:.3} ft ({:.3} m)", self.grid.easting_ft(), self.grid.easting_m())?;
        writeln!(f, "northing:  {:.3} ft ({:.3} m)", self.grid.northing_ft(), self.grid.northing_m())?;
        writeln!(f, "latitude:  {:.8} ({})", self.geographic.latitude(), self.latitude_dms)?;
        write!(f, "longitude: {:.8} ({})", self.geographic.longitude(), self.longitude_dms)
    }
}

/// Runs conversions with one projection strategy, chosen when the converter is
/// built.
///
/// # Usage
///
/// ```
/// use ghana_grid::{ConversionRequest, Converter, GeographicInput};
///
/// let converter = Converter::ghana();
///
/// let request = ConversionRequest::GeoToGrid {
///     input: GeographicInput::Dms {
///         latitude_dms: "5° 36' 13.38\" N".to_string(),
///         longitude_dms: "0° 11' 13.07\" W".to_string(),
///     },
/// };
/// let result = converter.convert(&request).unwrap();
///
/// let back = converter.grid_to_geo(result.grid.easting_ft(), result.grid.northing_ft()).unwrap();
/// assert_eq!(back.latitude_dms.to_string(), "5° 36' 13.38\" N");
/// assert_eq!(back.longitude_dms.to_string(), "0° 11' 13.07\" W");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Converter<P: Projection = TransverseMercator> {
    projection: P,
}

impl Converter<TransverseMercator> {
    /// Converter for the Ghana National Grid.
    pub fn ghana() -> Self {
        Self::new(TransverseMercator::ghana())
    }
}

impl Default for Converter<TransverseMercator> {
    fn default() -> Self {
        Self::ghana()
    }
}

impl<P: Projection> Converter<P> {
    pub fn new(projection: P) -> Self {
        Self { projection }
    }

    pub fn projection(&self) -> &P {
        &self.projection
    }

    /// Dispatches a request to [`Converter::grid_to_geo`],
    /// [`Converter::geo_to_grid`] or [`Converter::geo_to_grid_dms`].
    ///
    /// # Errors
    ///
    /// Whatever the selected conversion returns.
    pub fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, Error> {
        match request {
            ConversionRequest::GridToGeo { easting, northing } => self.grid_to_geo(*easting, *northing),
            ConversionRequest::GeoToGrid { input: GeographicInput::Decimal { latitude, longitude } } => {
                self.geo_to_grid(*latitude, *longitude)
            }
            ConversionRequest::GeoToGrid { input: GeographicInput::Dms { latitude_dms, longitude_dms } } => {
                self.geo_to_grid_dms(latitude_dms, longitude_dms)
            }
        }
    }

    /// Converts grid easting/northing in feet to latitude/longitude.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCoord`] for non-finite input, [`Error::NonFinite`] if
    /// the inverse projection breaks down.
    ///
    /// # Usage
    ///
    /// ```
    /// use ghana_grid::{Converter, Direction};
    ///
    /// let result = Converter::ghana().grid_to_geo(899_891.076_115_485_6, 0.0).unwrap();
    ///
    /// assert_eq!(result.direction, Direction::GridToGeo);
    /// assert!((result.geographic.latitude() - 4.669382).abs() < 1e-9);
    /// assert_eq!(result.longitude_dms.to_string(), "1° 0' 0.00\" W");
    /// ```
    pub fn grid_to_geo(&self, easting_ft: f64, northing_ft: f64) -> Result<ConversionResult, Error> {
        debug!(easting_ft, northing_ft, "converting grid to geographic");

        let grid = GridCoord::from_feet(easting_ft, northing_ft)?;
        let geographic = grid.to_latlon_with(&self.projection)?;
        check_envelope(&geographic);

        Ok(ConversionResult {
            direction: Direction::GridToGeo,
            grid,
            latitude_dms: geographic.latitude_dms()?,
            longitude_dms: geographic.longitude_dms()?,
            geographic,
        })
    }

    /// Converts latitude/longitude in decimal degrees to grid coordinates.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfDomain`] unless `|latitude| < 90`, the same as
    /// [`project_forward`](crate::project_forward); [`Error::InvalidCoord`] if
    /// longitude is outside `[-180, 180]`; [`Error::NonFinite`] if the
    /// projection overflows.
    ///
    /// # Usage
    ///
    /// ```
    /// use ghana_grid::Converter;
    ///
    /// let result = Converter::ghana().geo_to_grid(4.669382, -1.0).unwrap();
    ///
    /// assert_eq!(result.grid.easting_m(), 274_286.8);
    /// assert_eq!(result.grid.northing_m(), 0.0);
    /// assert_eq!(result.latitude_dms.to_string(), "4° 40' 9.78\" N");
    /// ```
    pub fn geo_to_grid(&self, latitude: f64, longitude: f64) -> Result<ConversionResult, Error> {
        debug!(latitude, longitude, "converting geographic to grid");

        check_latitude_domain(latitude)?;
        let geographic = LatLon::create(latitude, longitude)?;
        self.project(geographic, geographic.latitude_dms()?, geographic.longitude_dms()?)
    }

    /// Converts latitude/longitude given as DMS strings to grid coordinates.
    /// The parsed angles are echoed back in the result.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDms`] if either string does not parse, or the latitude
    /// is not `N`/`S` or the longitude not `E`/`W`; otherwise as
    /// [`Converter::geo_to_grid`].
    pub fn geo_to_grid_dms(&self, latitude_dms: &str, longitude_dms: &str) -> Result<ConversionResult, Error> {
        debug!(latitude_dms, longitude_dms, "converting geographic (DMS) to grid");

        let lat = Dms::parse_str(latitude_dms)?;
        let lon = Dms::parse_str(longitude_dms)?;
        let geographic = LatLon::from_dms(&lat, &lon)?;

        self.project(geographic, lat, lon)
    }

    fn project(&self, geographic: LatLon, latitude_dms: Dms, longitude_dms: Dms) -> Result<ConversionResult, Error> {
        check_envelope(&geographic);
        let grid = GridCoord::from_latlon_with(&self.projection, &geographic)?;

        Ok(ConversionResult {
            direction: Direction::GeoToGrid,
            grid,
            geographic,
            latitude_dms,
            longitude_dms,
        })
    }
}

fn check_envelope(value: &LatLon) {
    if !value.is_within_ghana() {
        warn!(
            latitude = value.latitude(),
            longitude = value.longitude(),
            "point lies outside the Ghana envelope"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use approx::assert_abs_diff_eq;
    use tracing_subscriber::{
        layer::{Context, SubscriberExt},
        Layer,
    };

    use super::*;
    use crate::Hemisphere;

    #[test]
    fn request_direction() {
        let request = ConversionRequest::GridToGeo { easting: 0.0, northing: 0.0 };
        assert_eq!(request.direction(), Direction::GridToGeo);

        let request = ConversionRequest::GeoToGrid {
            input: GeographicInput::Decimal { latitude: 5.0, longitude: -1.0 },
        };
        assert_eq!(request.direction(), Direction::GeoToGrid);
    }

    #[test]
    fn geo_to_grid_fills_every_representation() {
        let result = Converter::ghana().geo_to_grid(5.5, -0.2).unwrap();

        assert_eq!(result.direction, Direction::GeoToGrid);
        assert_eq!(result.geographic, LatLon::create(5.5, -0.2).unwrap());
        assert_abs_diff_eq!(result.grid.easting_ft(), result.grid.easting_m() / 0.3048, epsilon = 1e-9);
        assert_abs_diff_eq!(result.grid.northing_ft(), result.grid.northing_m() / 0.3048, epsilon = 1e-9);
        assert_eq!(result.latitude_dms.to_string(), "5° 30' 0.00\" N");
        assert_eq!(result.longitude_dms.to_string(), "0° 12' 0.00\" W");
    }

    #[test]
    fn dms_input_matches_decimal_input() {
        let converter = Converter::ghana();
        let from_dms = converter.geo_to_grid_dms("5 30 0 N", "W 0 12 0").unwrap();
        let from_decimal = converter.geo_to_grid(5.5, -0.2).unwrap();

        assert_abs_diff_eq!(from_dms.grid.easting_ft(), from_decimal.grid.easting_ft(), epsilon = 1e-6);
        assert_abs_diff_eq!(from_dms.grid.northing_ft(), from_decimal.grid.northing_ft(), epsilon = 1e-6);
        assert_eq!(from_dms.longitude_dms.hemisphere(), Hemisphere::W);
    }

    #[test]
    fn convert_dispatches_on_request() {
        let converter = Converter::ghana();
        let forward = converter
            .convert(&ConversionRequest::GeoToGrid {
                input: GeographicInput::Decimal { latitude: 7.0, longitude: -2.0 },
            })
            .unwrap();
        let inverse = converter
            .convert(&ConversionRequest::GridToGeo {
                easting: forward.grid.easting_ft(),
                northing: forward.grid.northing_ft(),
            })
            .unwrap();

        assert_eq!(inverse.direction, Direction::GridToGeo);
        assert_abs_diff_eq!(inverse.geographic.latitude(), 7.0, epsilon = 1e-7);
        assert_abs_diff_eq!(inverse.geographic.longitude(), -2.0, epsilon = 1e-7);
    }

    #[test]
    fn surfaces_typed_errors() {
        let converter = Converter::ghana();
        assert!(matches!(converter.geo_to_grid(90.0, 0.0), Err(Error::OutOfDomain(_))));
        assert!(matches!(converter.geo_to_grid(-95.0, 0.0), Err(Error::OutOfDomain(_))));
        assert!(matches!(converter.geo_to_grid(f64::NAN, 0.0), Err(Error::OutOfDomain(_))));
        assert!(matches!(converter.geo_to_grid(5.0, 180.5), Err(Error::InvalidCoord(_))));
        assert!(matches!(converter.geo_to_grid_dms("5 35 18.09", "0 12 0 W"), Err(Error::InvalidDms(_))));
        assert!(matches!(converter.geo_to_grid_dms("0 12 0 W", "5 30 0 N"), Err(Error::InvalidDms(_))));
        assert!(matches!(converter.grid_to_geo(f64::INFINITY, 0.0), Err(Error::InvalidCoord(_))));
    }

    #[test]
    fn custom_definition_shifts_false_origin() {
        use crate::datum::{GridDefinition, ProjectionOrigin};

        let definition = GridDefinition {
            origin: ProjectionOrigin { x0: 0.0, y0: 1_000.0, ..ProjectionOrigin::GHANA },
            ..GridDefinition::GHANA
        };
        let shifted = Converter::new(TransverseMercator::new(definition));
        assert_eq!(shifted.projection().definition(), &definition);

        let base = Converter::ghana().geo_to_grid(6.0, -1.5).unwrap();
        let moved = shifted.geo_to_grid(6.0, -1.5).unwrap();
        assert_abs_diff_eq!(base.grid.easting_m() - moved.grid.easting_m(), 274_286.8, epsilon = 1e-6);
        assert_abs_diff_eq!(moved.grid.northing_m() - base.grid.northing_m(), 1_000.0, epsilon = 1e-6);

        let back = shifted.grid_to_geo(moved.grid.easting_ft(), moved.grid.northing_ft()).unwrap();
        assert_abs_diff_eq!(back.geographic.latitude(), 6.0, epsilon = 1e-7);
        assert_abs_diff_eq!(back.geographic.longitude(), -1.5, epsilon = 1e-7);
    }

    #[test]
    fn outside_envelope_still_converts() {
        let result = Converter::ghana().geo_to_grid(14.0, 3.0).unwrap();
        assert!(!result.geographic.is_within_ghana());
        assert!(result.grid.easting_m() > 274_286.8);
    }

    // Counts WARN events seen by the thread-local subscriber
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn count_warnings(f: impl FnOnce()) -> usize {
        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(Arc::clone(&warnings)));
        tracing::subscriber::with_default(subscriber, f);
        warnings.load(Ordering::SeqCst)
    }

    #[test]
    fn warns_only_outside_envelope() {
        let converter = Converter::ghana();

        assert_eq!(count_warnings(|| { converter.geo_to_grid(14.0, 3.0).unwrap(); }), 1);
        assert_eq!(count_warnings(|| { converter.geo_to_grid(5.5, -0.2).unwrap(); }), 0);
        assert_eq!(count_warnings(|| { converter.grid_to_geo(0.0, 5_000_000.0).unwrap(); }), 1);
        assert_eq!(count_warnings(|| { converter.grid_to_geo(1_093_845.5, 301_440.2).unwrap(); }), 0);
    }
}
