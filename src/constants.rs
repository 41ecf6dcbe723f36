// Clarke 1880 semi-major axis a (meters)
#[allow(clippy::unreadable_literal)]
pub(crate) const CLARKE_1880_A: f64 = 6378249.145;
// Clarke 1880 semi-minor axis b (meters)
#[allow(clippy::unreadable_literal)]
pub(crate) const CLARKE_1880_B: f64 = 6356514.966;

// Ghana National Grid origin
#[allow(clippy::unreadable_literal)]
pub(crate) const GHANA_LAT0: f64 = 4.669382;
pub(crate) const GHANA_LON0: f64 = -1.0;
pub(crate) const GHANA_K0: f64 = 0.99975;
pub(crate) const GHANA_X0: f64 = 274_286.8;
pub(crate) const GHANA_Y0: f64 = 0.0;

// International foot
pub(crate) const METERS_PER_FOOT: f64 = 0.3048;

/// Latitudes (degrees) expected for points inside Ghana. Advisory only.
pub const GHANA_LAT_RANGE: std::ops::RangeInclusive<f64> = 4.0..=11.5;
/// Longitudes (degrees) expected for points inside Ghana. Advisory only.
pub const GHANA_LON_RANGE: std::ops::RangeInclusive<f64> = -3.5..=1.5;
