//! Foot/meter conversion. Ghana grid sheets are drawn in international feet
//! while the projection math works in meters.

use crate::constants::METERS_PER_FOOT;

/// Converts a distance in feet to meters.
///
/// # Usage
///
/// ```
/// use ghana_grid::units::feet_to_meters;
///
/// assert_eq!(feet_to_meters(1000.0), 304.8);
/// ```
#[inline]
pub fn feet_to_meters(feet: f64) -> f64 {
    feet * METERS_PER_FOOT
}

/// Converts a distance in meters to feet.
///
/// # Usage
///
/// ```
/// use ghana_grid::units::meters_to_feet;
///
/// assert_eq!(meters_to_feet(0.3048), 1.0);
/// ```
#[inline]
pub fn meters_to_feet(meters: f64) -> f64 {
    meters / METERS_PER_FOOT
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn feet_meters_round_trip() {
        for value in [0.0, -0.0, 1.0, -1.0, 0.3048, 123_456.789, -987_654.321, 1e-12, 1e12, 899_999.999] {
            assert_relative_eq!(meters_to_feet(feet_to_meters(value)), value, max_relative = 4.0 * f64::EPSILON);
            assert_relative_eq!(feet_to_meters(meters_to_feet(value)), value, max_relative = 4.0 * f64::EPSILON);
        }
    }

    #[test]
    fn false_easting_in_feet() {
        assert_relative_eq!(meters_to_feet(274_286.8), 899_891.076_115_485_6, epsilon = 1e-6);
    }

    #[test]
    fn zero_stays_zero() {
        assert_eq!(feet_to_meters(0.0), 0.0);
        assert_eq!(meters_to_feet(0.0), 0.0);
    }
}
