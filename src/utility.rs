use crate::Error;

pub(crate) mod dms {
    /// Degrees per quarter turn
    pub const QD: u32 = 90;
    /// Minutes per degree
    pub const DM: u32 = 60;
    /// Seconds per minute
    pub const MS: u32 = 60;
    /// Degrees per half turn
    pub const HD: u32 = 2 * QD;
    /// Seconds per degree
    pub const DS: u32 = DM * MS;
}

/// Evaluate a polynomial, highest order coefficient first
pub(crate) fn polyval(p: &[f64], x: f64) -> f64 {
    p
        .iter()
        .fold(0_f64, |acc, val| acc*x + val)
}

/// Latitudes the forward projection accepts: `|lat| < 90`, NaN excluded
pub(crate) fn check_latitude_domain(lat: f64) -> Result<(), Error> {
    if lat.is_nan() || lat.abs() >= f64::from(dms::QD) {
        Err(Error::OutOfDomain(format!("Latitude {lat} outside of projection domain (-90, 90).")))
    } else {
        Ok(())
    }
}

pub(crate) trait GeoMath: Sized {
    fn ensure_finite(self, what: &str) -> Result<Self, Error>;
}

impl GeoMath for f64 {
    fn ensure_finite(self, what: &str) -> Result<f64, Error> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(Error::NonFinite(format!("{what} evaluated to {self}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyval_horner_order() {
        // 2x^2 + 3x + 4 at x = 2
        assert_eq!(polyval(&[2.0, 3.0, 4.0], 2.0), 18.0);
        assert_eq!(polyval(&[], 2.0), 0.0);
    }

    #[test]
    fn latitude_domain_is_open() {
        assert!(check_latitude_domain(89.999_999).is_ok());
        assert!(check_latitude_domain(-89.999_999).is_ok());
        for lat in [90.0, -90.0, -95.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(check_latitude_domain(lat), Err(Error::OutOfDomain(_))), "{lat}");
        }
    }

    #[test]
    fn ensure_finite_rejects_nan_and_inf() {
        assert_eq!(1.5_f64.ensure_finite("x").ok(), Some(1.5));
        assert!(matches!(f64::NAN.ensure_finite("x"), Err(Error::NonFinite(_))));
        assert!(matches!(f64::NEG_INFINITY.ensure_finite("x"), Err(Error::NonFinite(_))));
    }
}
