//! Reference ellipsoid and projection origin making up a grid definition.

use crate::{
    constants::{CLARKE_1880_A, CLARKE_1880_B, GHANA_K0, GHANA_LAT0, GHANA_LON0, GHANA_X0, GHANA_Y0},
    Error,
};

/// A biaxial reference ellipsoid given by its semi-axes in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ellipsoid {
    a: f64,
    b: f64,
}

impl Ellipsoid {
    /// Clarke 1880, as used by the Ghana National Grid.
    pub const CLARKE_1880: Ellipsoid = Ellipsoid {
        a: CLARKE_1880_A,
        b: CLARKE_1880_B,
    };

    /// Tries to create an ellipsoid from its semi-major and semi-minor axes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEllipsoid`] unless `0 < b < a` and both are finite.
    ///
    /// # Usage
    ///
    /// ```
    /// use ghana_grid::datum::Ellipsoid;
    ///
    /// assert!(Ellipsoid::create(6_378_249.145, 6_356_514.966).is_ok());
    /// assert!(Ellipsoid::create(6_356_514.966, 6_378_249.145).is_err());
    /// assert!(Ellipsoid::create(6_378_249.145, -1.0).is_err());
    /// ```
    pub fn create(a: f64, b: f64) -> Result<Ellipsoid, Error> {
        if !a.is_finite() || !b.is_finite() {
            Err(Error::InvalidEllipsoid(format!("Axes must be finite, got a={a}, b={b}")))
        } else if b <= 0.0 {
            Err(Error::InvalidEllipsoid(format!("Semi-minor axis {b} must be positive")))
        } else if a <= b {
            Err(Error::InvalidEllipsoid(format!("Semi-major axis {a} must exceed semi-minor axis {b}")))
        } else {
            Ok(Ellipsoid { a, b })
        }
    }

    /// Semi-major axis in meters.
    #[inline]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Semi-minor axis in meters.
    #[inline]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// First eccentricity squared, `(a² - b²) / a²`.
    pub fn e2(&self) -> f64 {
        (self.a.powi(2) - self.b.powi(2)) / self.a.powi(2)
    }
}

/// Origin and scaling of a Transverse Mercator grid.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectionOrigin {
    /// Latitude of origin (degrees)
    pub lat0: f64,
    /// Central meridian (degrees)
    pub lon0: f64,
    /// Scale factor on the central meridian
    pub k0: f64,
    /// False easting (meters)
    pub x0: f64,
    /// False northing (meters)
    pub y0: f64,
}

impl ProjectionOrigin {
    pub const GHANA: ProjectionOrigin = ProjectionOrigin {
        lat0: GHANA_LAT0,
        lon0: GHANA_LON0,
        k0: GHANA_K0,
        x0: GHANA_X0,
        y0: GHANA_Y0,
    };
}

/// Everything a projection needs to know about a national grid.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDefinition {
    pub ellipsoid: Ellipsoid,
    pub origin: ProjectionOrigin,
}

impl GridDefinition {
    /// Ghana National Grid: Transverse Mercator on Clarke 1880.
    pub const GHANA: GridDefinition = GridDefinition {
        ellipsoid: Ellipsoid::CLARKE_1880,
        origin: ProjectionOrigin::GHANA,
    };
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn clarke_1880_eccentricity() {
        let e2 = Ellipsoid::CLARKE_1880.e2();
        assert!(e2 > 0.0 && e2 < 1.0);
        assert_relative_eq!(e2, 0.006_803_481_142_4, epsilon = 1e-12);
    }

    #[test]
    fn ghana_definition_constants() {
        let def = GridDefinition::GHANA;
        assert_eq!(def.ellipsoid.a(), 6_378_249.145);
        assert_eq!(def.ellipsoid.b(), 6_356_514.966);
        assert_eq!(def.origin.lat0, 4.669_382);
        assert_eq!(def.origin.lon0, -1.0);
        assert_eq!(def.origin.k0, 0.999_75);
        assert_eq!(def.origin.x0, 274_286.8);
        assert_eq!(def.origin.y0, 0.0);
    }

    #[test]
    fn rejects_invalid_axes() {
        assert!(matches!(Ellipsoid::create(1.0, 1.0), Err(Error::InvalidEllipsoid(_))));
        assert!(matches!(Ellipsoid::create(1.0, 0.0), Err(Error::InvalidEllipsoid(_))));
        assert!(matches!(Ellipsoid::create(-1.0, -2.0), Err(Error::InvalidEllipsoid(_))));
        assert!(matches!(Ellipsoid::create(f64::INFINITY, 1.0), Err(Error::InvalidEllipsoid(_))));
        assert!(matches!(Ellipsoid::create(f64::NAN, 1.0), Err(Error::InvalidEllipsoid(_))));
    }
}
