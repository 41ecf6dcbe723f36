//! Conversion between the Ghana National Grid (Transverse Mercator on the
//! Clarke 1880 ellipsoid, in international feet) and geographic
//! latitude/longitude in decimal degrees or degrees/minutes/seconds.
//!
//! ```
//! use ghana_grid::{project_forward, project_inverse};
//!
//! let grid = project_forward(5.603717, -0.186964).unwrap();
//! let back = project_inverse(grid.easting_ft(), grid.northing_ft()).unwrap();
//!
//! assert!((back.latitude() - 5.603717).abs() < 1e-7);
//! assert!((back.longitude() + 0.186964).abs() < 1e-7);
//! ```

#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

use lazy_static::lazy_static;
use thiserror::Error;

pub mod converter;
pub mod coords;
pub mod datum;
pub mod projections;
pub mod units;

pub(crate) mod constants;
pub(crate) mod utility;

pub use constants::{GHANA_LAT_RANGE, GHANA_LON_RANGE};
pub use converter::{ConversionRequest, ConversionResult, Converter, Direction, GeographicInput};
pub use coords::{
    dms::{decimal_to_dms, dms_to_decimal, Axis, Dms, Hemisphere},
    grid::GridCoord,
    latlon::LatLon,
};
pub use datum::{Ellipsoid, GridDefinition, ProjectionOrigin};
pub use projections::{Projection, TransverseMercator};
pub use units::{feet_to_meters, meters_to_feet};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Coordinate outside of the projection domain: {0}")]
    OutOfDomain(String),
    #[error("DMS string is invalid: {0}")]
    InvalidDms(String),
    #[error("Computation produced a non-finite value: {0}")]
    NonFinite(String),
    #[error("Ellipsoid parameters are not valid: {0}")]
    InvalidEllipsoid(String),
    #[error("Coordinate parameters are not valid: {0}")]
    InvalidCoord(String),
    #[error("Conversion input is invalid: {0}")]
    InvalidInput(String),
}

lazy_static! {
    /// The Ghana National Grid projection, built on first use.
    pub(crate) static ref GHANA_GRID: TransverseMercator = TransverseMercator::ghana();
}

/// Projects latitude/longitude in decimal degrees onto the Ghana National
/// Grid. The result carries easting/northing in both meters and feet.
///
/// # Errors
///
/// Returns [`Error::OutOfDomain`] unless `|lat| < 90` and [`Error::NonFinite`]
/// if the result is not finite.
///
/// # Usage
///
/// ```
/// use ghana_grid::project_forward;
///
/// let grid = project_forward(4.669382, -1.0).unwrap();
/// assert_eq!(grid.easting_m(), 274_286.8);
/// assert_eq!(grid.northing_m(), 0.0);
///
/// assert!(project_forward(90.0, 0.0).is_err());
/// ```
pub fn project_forward(lat: f64, lon: f64) -> Result<GridCoord, Error> {
    GridCoord::from_latlon(&LatLon::new(lat, lon))
}

/// Converts Ghana National Grid easting/northing in feet to latitude/longitude
/// in decimal degrees.
///
/// # Errors
///
/// Returns [`Error::InvalidCoord`] for non-finite input and
/// [`Error::NonFinite`] if the inverse projection breaks down.
///
/// # Usage
///
/// ```
/// use ghana_grid::project_inverse;
///
/// let coord = project_inverse(899_891.076_115_485_6, 0.0).unwrap();
/// assert!((coord.latitude() - 4.669382).abs() < 1e-9);
/// assert!((coord.longitude() + 1.0).abs() < 1e-9);
/// ```
pub fn project_inverse(easting_ft: f64, northing_ft: f64) -> Result<LatLon, Error> {
    GridCoord::from_feet(easting_ft, northing_ft)?.to_latlon()
}

pub trait ParseCoord {
    /// # Errors
    ///
    /// Returns an [`Error`] describing why `value` could not be parsed.
    fn parse_coord(value: &str) -> Result<Self, Error>
    where Self: Sized;
}

/// Parses any coordinate type implementing [`ParseCoord`].
///
/// # Errors
///
/// Whatever the target type's parser returns.
///
/// # Usage
///
/// ```
/// use ghana_grid::{from_str, Dms, GridCoord};
///
/// let angle: Dms = from_str("5 35 18.09 N").unwrap();
/// let grid: GridCoord = from_str("899891.08 0").unwrap();
///
/// assert_eq!(angle.minutes(), 35);
/// assert_eq!(grid.northing_ft(), 0.0);
/// ```
pub fn from_str<S, T>(value: S) -> Result<T, Error>
where
    S: AsRef<str>,
    T: ParseCoord
{
    T::parse_coord(value.as_ref())
}

// Splits "a, b" or "a b" into its two trimmed halves
pub(crate) fn split_pair(value: &str) -> Result<(&str, &str), Error> {
    let fields: Vec<&str> = if value.contains(',') {
        value.split(',').map(str::trim).collect()
    } else {
        value.split_whitespace().collect()
    };

    match fields.as_slice() {
        [first, second] if !first.is_empty() && !second.is_empty() => Ok((*first, *second)),
        _ => Err(Error::InvalidInput(format!("Expected two values, got {value:?}"))),
    }
}

trait ThisOrThat {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T;
}

impl ThisOrThat for bool {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T {
        if *self { r#true } else { r#false }
    }
}
