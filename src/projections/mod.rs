pub mod transverse_mercator;

use crate::{datum::GridDefinition, Error};

pub use transverse_mercator::TransverseMercator;

/// A map projection between geographic degrees and grid meters.
///
/// Strategies are picked once, when a [`Converter`](crate::Converter) is built.
pub trait Projection: Send + Sync {
    /// Forward: (latitude, longitude) in degrees -> (easting, northing) in meters
    ///
    /// # Errors
    ///
    /// [`Error::OutOfDomain`] for latitudes the projection cannot represent,
    /// [`Error::NonFinite`] when the result would not be finite.
    fn forward(&self, lat: f64, lon: f64) -> Result<(f64, f64), Error>;

    /// Inverse: (easting, northing) in meters -> (latitude, longitude) in degrees
    ///
    /// # Errors
    ///
    /// [`Error::NonFinite`] when the result would not be finite.
    fn inverse(&self, easting: f64, northing: f64) -> Result<(f64, f64), Error>;

    fn definition(&self) -> &GridDefinition;
}
