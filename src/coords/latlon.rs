use std::{fmt::Display, str::FromStr};

use crate::{
    constants::{GHANA_LAT_RANGE, GHANA_LON_RANGE},
    coords::{dms::{Axis, Dms}, grid::GridCoord},
    utility::dms,
    Error, ParseCoord,
};

/// Representation of a latitude/longitude point on the Clarke 1880 ellipsoid,
/// in decimal degrees. Can be converted to/from [`GridCoord`] and [`Dms`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLon {
    #[cfg_attr(feature = "serde", serde(alias = "lat"))]
    pub(crate) latitude: f64,
    #[cfg_attr(feature = "serde", serde(alias = "lon"))]
    pub(crate) longitude: f64,
}

impl LatLon {
    /// Internal-only constructor that doesn't check the bounds of lat/lon
    pub(crate) fn new(lat: f64, lon: f64) -> LatLon {
        Self {
            latitude: lat,
            longitude: lon,
        }
    }

    /// Tries to create a latitude/longitude point from a lat/lon pair. First checks if the
    /// values are valid:
    /// * Latitude must be in range [-90,90]
    /// * Longitude must be in range [-180,180]
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoord`] if either latitude or longitude are invalid.
    ///
    /// # Usage
    ///
    /// ```
    /// use ghana_grid::LatLon;
    ///
    /// let coord = LatLon::create(5.603717, -0.186964);
    ///
    /// assert!(coord.is_ok());
    ///
    /// let coord = coord.unwrap();
    ///
    /// assert_eq!(coord.latitude(), 5.603717);
    /// assert_eq!(coord.longitude(), -0.186964);
    ///
    /// let invalid_coord_lat = LatLon::create(100.0, 0.0);
    /// assert!(invalid_coord_lat.is_err());
    ///
    /// let invalid_coord_lon = LatLon::create(0.0, -200.0);
    /// assert!(invalid_coord_lon.is_err());
    /// ```
    pub fn create(lat: f64, lon: f64) -> Result<LatLon, Error> {
        let lat_limit = f64::from(dms::QD);
        let lon_limit = f64::from(dms::HD);

        if !(-lat_limit..=lat_limit).contains(&lat) {
            Err(Error::InvalidCoord(format!("Latitude {lat} outside of valid range [-90, 90].")))
        } else if !(-lon_limit..=lon_limit).contains(&lon) {
            Err(Error::InvalidCoord(format!("Longitude {lon} outside of valid range [-180, 180].")))
        } else {
            Ok(LatLon::new(lat, lon))
        }
    }

    /// Tries to create a point from two DMS angles, latitude first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDms`] if the first angle is not `N`/`S` or the
    /// second is not `E`/`W`.
    ///
    /// # Usage
    ///
    /// ```
    /// use ghana_grid::{Dms, LatLon};
    ///
    /// let lat = Dms::parse_str("5 36 13.38 N").unwrap();
    /// let lon = Dms::parse_str("0 11 13.07 W").unwrap();
    /// let coord = LatLon::from_dms(&lat, &lon).unwrap();
    ///
    /// assert!((coord.latitude() - 5.603717).abs() < 1e-6);
    /// assert!((coord.longitude() + 0.186964).abs() < 1e-6);
    ///
    /// assert!(LatLon::from_dms(&lon, &lat).is_err());
    /// ```
    pub fn from_dms(lat: &Dms, lon: &Dms) -> Result<LatLon, Error> {
        if lat.axis() != Axis::Latitude {
            return Err(Error::InvalidDms(format!("Latitude {lat} must be N or S")));
        }
        if lon.axis() != Axis::Longitude {
            return Err(Error::InvalidDms(format!("Longitude {lon} must be E or W")));
        }

        LatLon::create(lat.to_decimal(), lon.to_decimal())
    }

    /// Returns the latitude value.
    ///
    /// # Example
    /// ```
    /// use ghana_grid::LatLon;
    ///
    /// let coord = LatLon::create(5.603717, -0.186964).unwrap();
    /// assert_eq!(coord.latitude(), 5.603717);
    /// ```
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude value.
    ///
    /// # Example
    /// ```
    /// use ghana_grid::LatLon;
    ///
    /// let coord = LatLon::create(5.603717, -0.186964).unwrap();
    /// assert_eq!(coord.longitude(), -0.186964);
    /// ```
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns whether the point is in the northern hemisphere. The equator
    /// counts as north.
    ///
    /// # Example
    /// ```
    /// use ghana_grid::LatLon;
    ///
    /// assert!(LatLon::create(5.603717, -0.186964).unwrap().is_north());
    /// assert!(LatLon::create(0.0, 0.0).unwrap().is_north());
    /// assert!(!LatLon::create(-0.5, 0.0).unwrap().is_north());
    /// ```
    pub fn is_north(&self) -> bool {
        self.latitude >= 0.0
    }

    /// Whether the point falls inside the rough Ghana envelope
    /// (latitude `[4.0, 11.5]`, longitude `[-3.5, 1.5]`). Points outside still
    /// convert; this is only a sanity check for callers.
    ///
    /// # Example
    /// ```
    /// use ghana_grid::LatLon;
    ///
    /// assert!(LatLon::create(5.603717, -0.186964).unwrap().is_within_ghana());
    /// assert!(!LatLon::create(51.5, -0.12).unwrap().is_within_ghana());
    /// ```
    pub fn is_within_ghana(&self) -> bool {
        GHANA_LAT_RANGE.contains(&self.latitude) && GHANA_LON_RANGE.contains(&self.longitude)
    }

    /// Latitude as degrees/minutes/seconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoord`] or [`Error::NonFinite`] for values that
    /// could only come from the unchecked inverse projection.
    pub fn latitude_dms(&self) -> Result<Dms, Error> {
        Dms::from_decimal(self.latitude, Axis::Latitude)
    }

    /// Longitude as degrees/minutes/seconds.
    ///
    /// # Errors
    ///
    /// Same as [`LatLon::latitude_dms`].
    pub fn longitude_dms(&self) -> Result<Dms, Error> {
        Dms::from_decimal(self.longitude, Axis::Longitude)
    }

    /// Converts from [`GridCoord`] to [`LatLon`]
    ///
    /// # Errors
    ///
    /// See [`GridCoord::to_latlon`].
    pub fn from_grid(value: &GridCoord) -> Result<LatLon, Error> {
        value.to_latlon()
    }

    /// Converts from [`LatLon`] to [`GridCoord`]
    ///
    /// # Errors
    ///
    /// See [`GridCoord::from_latlon`].
    ///
    /// # Usage
    ///
    /// ```
    /// use ghana_grid::LatLon;
    ///
    /// let coord = LatLon::create(5.5, -0.2).unwrap();
    /// let grid = coord.to_grid().unwrap();
    ///
    /// assert!((grid.easting_m() - 362_917.411).abs() < 1e-2);
    /// assert!((grid.northing_m() - 91_880.236).abs() < 1e-2);
    /// ```
    pub fn to_grid(&self) -> Result<GridCoord, Error> {
        GridCoord::from_latlon(self)
    }

    /// Parses `"<lat>, <lon>"`, each either decimal degrees or a DMS string.
    /// Decimal pairs may also be separated by whitespace alone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`], [`Error::InvalidDms`] or
    /// [`Error::InvalidCoord`] depending on what is wrong with the input.
    ///
    /// # Usage
    ///
    /// ```
    /// use ghana_grid::LatLon;
    ///
    /// let decimal = LatLon::parse_str("5.5 -0.2").unwrap();
    /// assert_eq!(decimal.latitude(), 5.5);
    ///
    /// let dms = LatLon::parse_str("5° 30' 0\" N, 0° 12' 0\" W").unwrap();
    /// assert!((dms.latitude() - 5.5).abs() < 1e-12);
    /// assert!((dms.longitude() + 0.2).abs() < 1e-12);
    /// ```
    pub fn parse_str(latlon_str: &str) -> Result<LatLon, Error> {
        Self::from_str(latlon_str)
    }
}

impl TryFrom<GridCoord> for LatLon {
    type Error = Error;

    fn try_from(value: GridCoord) -> Result<Self, Self::Error> {
        value.to_latlon()
    }
}

impl FromStr for LatLon {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = crate::split_pair(s)?;

        match (lat.parse::<f64>(), lon.parse::<f64>()) {
            (Ok(lat), Ok(lon)) => LatLon::create(lat, lon),
            _ => LatLon::from_dms(&Dms::parse_str(lat)?, &Dms::parse_str(lon)?),
        }
    }
}

impl ParseCoord for LatLon {
    fn parse_coord(value: &str) -> Result<Self, Error> {
        Self::from_str(value)
    }
}

impl Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let lat = buf.format(self.latitude);
        let mut buf = ryu::Buffer::new();
        let lon = buf.format(self.longitude);
        write!(
            f,
            "{lat} {lon}",
        )
    }
}
