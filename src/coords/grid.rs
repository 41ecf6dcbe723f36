use std::{fmt::Display, str::FromStr};

use crate::{
    coords::latlon::LatLon,
    projections::Projection,
    units::{feet_to_meters, meters_to_feet},
    Error, ParseCoord, GHANA_GRID,
};

/// A Ghana National Grid point. Easting and northing are held in both feet
/// (the unit grid sheets are drawn in) and meters (the unit the projection
/// works in).
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(try_from = "GridFeet"))]
pub struct GridCoord {
    pub(crate) easting_ft: f64,
    pub(crate) northing_ft: f64,
    pub(crate) easting_m: f64,
    pub(crate) northing_m: f64,
}

impl GridCoord {
    /// Tries to create a grid point from easting/northing in feet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoord`] if either value is not finite.
    ///
    /// # Usage
    ///
    /// ```
    /// use ghana_grid::GridCoord;
    ///
    /// let coord = GridCoord::from_feet(1000.0, 2000.0).unwrap();
    ///
    /// assert_eq!(coord.easting_ft(), 1000.0);
    /// assert_eq!(coord.easting_m(), 304.8);
    /// assert_eq!(coord.northing_m(), 609.6);
    ///
    /// assert!(GridCoord::from_feet(f64::NAN, 0.0).is_err());
    /// ```
    pub fn from_feet(easting_ft: f64, northing_ft: f64) -> Result<GridCoord, Error> {
        check_finite(easting_ft, northing_ft, "ft")?;

        Ok(GridCoord {
            easting_ft,
            northing_ft,
            easting_m: feet_to_meters(easting_ft),
            northing_m: feet_to_meters(northing_ft),
        })
    }

    /// Tries to create a grid point from easting/northing in meters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoord`] if either value is not finite.
    ///
    /// # Usage
    ///
    /// ```
    /// use ghana_grid::GridCoord;
    ///
    /// let coord = GridCoord::from_meters(274_286.8, 0.0).unwrap();
    ///
    /// assert!((coord.easting_ft() - 899_891.076_115).abs() < 1e-6);
    /// assert_eq!(coord.northing_ft(), 0.0);
    /// ```
    pub fn from_meters(easting_m: f64, northing_m: f64) -> Result<GridCoord, Error> {
        check_finite(easting_m, northing_m, "m")?;

        Ok(GridCoord {
            easting_ft: meters_to_feet(easting_m),
            northing_ft: meters_to_feet(northing_m),
            easting_m,
            northing_m,
        })
    }

    #[inline]
    pub fn easting_ft(&self) -> f64 {
        self.easting_ft
    }

    #[inline]
    pub fn northing_ft(&self) -> f64 {
        self.northing_ft
    }

    #[inline]
    pub fn easting_m(&self) -> f64 {
        self.easting_m
    }

    #[inline]
    pub fn northing_m(&self) -> f64 {
        self.northing_m
    }

    /// Projects a [`LatLon`] onto the Ghana National Grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfDomain`] at the poles and [`Error::NonFinite`]
    /// if the projection overflows.
    ///
    /// # Usage
    ///
    /// ```
    /// use ghana_grid::{GridCoord, LatLon};
    ///
    /// let origin = LatLon::create(4.669382, -1.0).unwrap();
    /// let coord = GridCoord::from_latlon(&origin).unwrap();
    ///
    /// assert_eq!(coord.easting_m(), 274_286.8);
    /// assert_eq!(coord.northing_m(), 0.0);
    /// ```
    pub fn from_latlon(value: &LatLon) -> Result<GridCoord, Error> {
        Self::from_latlon_with(&*GHANA_GRID, value)
    }

    /// Same as [`GridCoord::from_latlon`] with an explicit projection.
    ///
    /// # Errors
    ///
    /// Whatever the projection's forward transform returns.
    pub fn from_latlon_with<P: Projection + ?Sized>(projection: &P, value: &LatLon) -> Result<GridCoord, Error> {
        let (x, y) = projection.forward(value.latitude, value.longitude)?;
        Self::from_meters(x, y)
    }

    /// Converts the grid point back to latitude/longitude.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFinite`] if the inverse projection does not produce
    /// finite values.
    ///
    /// # Usage
    ///
    /// ```
    /// use ghana_grid::{GridCoord, LatLon};
    ///
    /// let coord = LatLon::create(5.55, -0.2).unwrap();
    /// let converted = coord.to_grid().unwrap().to_latlon().unwrap();
    ///
    /// assert!((converted.latitude() - coord.latitude()).abs() < 1e-7);
    /// assert!((converted.longitude() - coord.longitude()).abs() < 1e-7);
    /// ```
    pub fn to_latlon(&self) -> Result<LatLon, Error> {
        self.to_latlon_with(&*GHANA_GRID)
    }

    /// Same as [`GridCoord::to_latlon`] with an explicit projection.
    ///
    /// # Errors
    ///
    /// Whatever the projection's inverse transform returns.
    pub fn to_latlon_with<P: Projection + ?Sized>(&self, projection: &P) -> Result<LatLon, Error> {
        let (lat, lon) = projection.inverse(self.easting_m, self.northing_m)?;
        Ok(LatLon::new(lat, lon))
    }

    /// Parses `"<easting> <northing>"` in feet, separated by whitespace and/or
    /// a comma.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the string is not two numbers and
    /// [`Error::InvalidCoord`] if they are not finite.
    ///
    /// # Usage
    ///
    /// ```
    /// use ghana_grid::GridCoord;
    ///
    /// let coord = GridCoord::parse_str("1093845.5, 301440.2").unwrap();
    /// assert_eq!(coord.easting_ft(), 1_093_845.5);
    /// assert_eq!(coord.northing_ft(), 301_440.2);
    /// ```
    pub fn parse_str(grid_str: &str) -> Result<GridCoord, Error> {
        Self::from_str(grid_str)
    }
}

fn check_finite(easting: f64, northing: f64, unit: &str) -> Result<(), Error> {
    if !easting.is_finite() {
        Err(Error::InvalidCoord(format!("Easting {easting}{unit} is not a finite number.")))
    } else if !northing.is_finite() {
        Err(Error::InvalidCoord(format!("Northing {northing}{unit} is not a finite number.")))
    } else {
        Ok(())
    }
}

// Feet are authoritative on the wire; meters are always derived from them
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridFeet {
    easting_ft: f64,
    northing_ft: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<GridFeet> for GridCoord {
    type Error = Error;

    fn try_from(value: GridFeet) -> Result<Self, Self::Error> {
        GridCoord::from_feet(value.easting_ft, value.northing_ft)
    }
}

impl TryFrom<LatLon> for GridCoord {
    type Error = Error;

    fn try_from(value: LatLon) -> Result<Self, Self::Error> {
        GridCoord::from_latlon(&value)
    }
}

impl FromStr for GridCoord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (easting, northing) = crate::split_pair(s)?;
        let parse = |field: &str, name: &str| {
            field
                .parse::<f64>()
                .map_err(|_| Error::InvalidInput(format!("{name} {field:?} is not a number")))
        };

        GridCoord::from_feet(parse(easting, "Easting")?, parse(northing, "Northing")?)
    }
}

impl ParseCoord for GridCoord {
    fn parse_coord(value: &str) -> Result<Self, Error> {
        Self::from_str(value)
    }
}

impl Display for GridCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.3}ftE {:.3}ftN ({:.3}mE {:.3}mN)",
            self.easting_ft,
            self.northing_ft,
            self.easting_m,
            self.northing_m,
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn units_stay_in_step() {
        let coord = GridCoord::from_feet(1_093_845.5, 301_440.2).unwrap();
        assert_eq!(coord.easting_m(), feet_to_meters(1_093_845.5));
        assert_eq!(coord.northing_m(), feet_to_meters(301_440.2));

        let coord = GridCoord::from_meters(333_404.1, 91_880.2).unwrap();
        assert_eq!(coord.easting_ft(), meters_to_feet(333_404.1));
        assert_eq!(coord.northing_ft(), meters_to_feet(91_880.2));
    }

    #[test]
    fn rejects_non_finite() {
        assert!(matches!(GridCoord::from_feet(0.0, f64::INFINITY), Err(Error::InvalidCoord(_))));
        assert!(matches!(GridCoord::from_meters(f64::NAN, 0.0), Err(Error::InvalidCoord(_))));
    }

    #[test]
    fn grid_then_geographic_then_grid() {
        for easting in (600_000..=1_400_000).step_by(100_000) {
            for northing in (100_000..=2_600_000).step_by(250_000) {
                let coord = GridCoord::from_feet(f64::from(easting), f64::from(northing)).unwrap();
                let back = coord.to_latlon().unwrap().to_grid().unwrap();
                assert_abs_diff_eq!(back.easting_ft(), coord.easting_ft(), epsilon = 1e-3);
                assert_abs_diff_eq!(back.northing_ft(), coord.northing_ft(), epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn parses_pairs() {
        let coord = GridCoord::parse_str("  900000 12000.5 ").unwrap();
        assert_eq!(coord.easting_ft(), 900_000.0);
        assert_eq!(coord.northing_ft(), 12_000.5);

        assert!(matches!(GridCoord::parse_str("900000"), Err(Error::InvalidInput(_))));
        assert!(matches!(GridCoord::parse_str("900000 abc"), Err(Error::InvalidInput(_))));
        assert!(matches!(GridCoord::parse_str("1 2 3"), Err(Error::InvalidInput(_))));
        assert!(matches!(GridCoord::parse_str("inf 2"), Err(Error::InvalidCoord(_))));
    }
}
