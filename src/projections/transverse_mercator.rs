//! Ellipsoidal Transverse Mercator, closed-form series after USGS Professional
//! Paper 1395 (Snyder, 1987), equations 3-21 and 8-9 through 8-25.

use crate::{
    datum::GridDefinition,
    projections::Projection,
    utility::{check_latitude_domain, polyval, GeoMath},
    Error,
};

// ================================
// Transverse Mercator Constants
// ================================

// Meridional arc, each row a polynomial in e^2 (highest order first):
//   M = a * (c0*phi - c2*sin(2phi) + c4*sin(4phi) - c6*sin(6phi))
const ARC_COEFF: [[f64; 4]; 4] = [
    // c0
    [-5. / 256., -3. / 64., -1. / 4., 1.],
    // c2
    [45. / 1024., 3. / 32., 3. / 8., 0.],
    // c4
    [45. / 1024., 15. / 256., 0., 0.],
    // c6
    [35. / 3072., 0., 0., 0.],
];

// Footpoint latitude, each row a polynomial in e1 (highest order first):
//   phi1 = mu + f2*sin(2mu) + f4*sin(4mu) + f6*sin(6mu) + f8*sin(8mu)
const FOOTPOINT_COEFF: [[f64; 5]; 4] = [
    // f2
    [0., -27. / 32., 0., 3. / 2., 0.],
    // f4
    [-55. / 32., 0., 21. / 16., 0., 0.],
    // f6
    [0., 151. / 96., 0., 0., 0.],
    // f8
    [1097. / 512., 0., 0., 0., 0.],
];

/// Transverse Mercator bound to one [`GridDefinition`]. Everything that only
/// depends on the definition is computed once in [`TransverseMercator::new`].
#[derive(Clone, Copy, Debug)]
pub struct TransverseMercator {
    definition: GridDefinition,
    a: f64,
    e2: f64,
    // Second eccentricity squared
    ep2: f64,
    k0: f64,
    x0: f64,
    y0: f64,
    lon0: f64,
    arc: [f64; 4],
    footpoint: [f64; 4],
    // Meridional arc from the equator to the latitude of origin
    m0: f64,
}

impl TransverseMercator {
    /// Builds the projection for a grid definition.
    ///
    /// # Usage
    ///
    /// ```
    /// use ghana_grid::{datum::GridDefinition, projections::{Projection, TransverseMercator}};
    ///
    /// let tm = TransverseMercator::new(GridDefinition::GHANA);
    /// let (x, y) = tm.forward(4.669382, -1.0).unwrap();
    ///
    /// assert_eq!(x, 274_286.8);
    /// assert_eq!(y, 0.0);
    /// ```
    pub fn new(definition: GridDefinition) -> TransverseMercator {
        let a = definition.ellipsoid.a();
        let e2 = definition.ellipsoid.e2();
        let ep2 = e2 / (1. - e2);

        let arc = ARC_COEFF.map(|row| polyval(&row, e2));

        let root = (1. - e2).sqrt();
        let e1 = (1. - root) / (1. + root);
        let footpoint = FOOTPOINT_COEFF.map(|row| polyval(&row, e1));

        let origin = definition.origin;
        let m0 = meridional_arc(a, &arc, origin.lat0.to_radians());

        Self {
            definition,
            a,
            e2,
            ep2,
            k0: origin.k0,
            x0: origin.x0,
            y0: origin.y0,
            lon0: origin.lon0.to_radians(),
            arc,
            footpoint,
            m0,
        }
    }

    /// The Ghana National Grid projection.
    pub fn ghana() -> TransverseMercator {
        Self::new(GridDefinition::GHANA)
    }

    // Radius of curvature in the prime vertical
    fn prime_vertical(&self, sin_phi: f64) -> f64 {
        self.a / (1. - self.e2 * sin_phi.powi(2)).sqrt()
    }
}

fn meridional_arc(a: f64, arc: &[f64; 4], phi: f64) -> f64 {
    a * (
        arc[0] * phi
        - arc[1] * (2. * phi).sin()
        + arc[2] * (4. * phi).sin()
        - arc[3] * (6. * phi).sin()
    )
}

impl Projection for TransverseMercator {
    #[allow(clippy::many_single_char_names)]
    fn forward(&self, lat: f64, lon: f64) -> Result<(f64, f64), Error> {
        check_latitude_domain(lat)?;

        let phi = lat.to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();
        let tan_phi = phi.tan();

        let n = self.prime_vertical(sin_phi);
        let t = tan_phi.powi(2);
        let c = self.ep2 * cos_phi.powi(2);
        let a = (lon.to_radians() - self.lon0) * cos_phi;
        let m = meridional_arc(self.a, &self.arc, phi);

        let x = self.x0 + self.k0 * n * (
            a
            + (1. - t + c) * a.powi(3) / 6.
            + (5. - 18. * t + t.powi(2) + 72. * c - 58. * self.ep2) * a.powi(5) / 120.
        );
        let y = self.y0 + self.k0 * (
            m - self.m0
            + n * tan_phi * (
                a.powi(2) / 2.
                + (5. - t + 9. * c + 4. * c.powi(2)) * a.powi(4) / 24.
                + (61. - 58. * t + t.powi(2) + 600. * c - 330. * self.ep2) * a.powi(6) / 720.
            )
        );

        Ok((x.ensure_finite("Easting")?, y.ensure_finite("Northing")?))
    }

    #[allow(clippy::many_single_char_names)]
    fn inverse(&self, easting: f64, northing: f64) -> Result<(f64, f64), Error> {
        let m = self.m0 + (northing - self.y0) / self.k0;
        let mu = m / (self.a * self.arc[0]);

        let phi1 = mu
            + self.footpoint[0] * (2. * mu).sin()
            + self.footpoint[1] * (4. * mu).sin()
            + self.footpoint[2] * (6. * mu).sin()
            + self.footpoint[3] * (8. * mu).sin();

        let (sin_phi1, cos_phi1) = phi1.sin_cos();
        let tan_phi1 = phi1.tan();

        let n1 = self.prime_vertical(sin_phi1);
        let t1 = tan_phi1.powi(2);
        let c1 = self.ep2 * cos_phi1.powi(2);
        let r1 = self.a * (1. - self.e2) / (1. - self.e2 * sin_phi1.powi(2)).powf(1.5);
        let d = (easting - self.x0) / (n1 * self.k0);

        let phi = phi1 - (n1 * tan_phi1 / r1) * (
            d.powi(2) / 2.
            - (5. + 3. * t1 + 10. * c1 - 4. * c1.powi(2) - 9. * self.ep2) * d.powi(4) / 24.
            + (61. + 90. * t1 + 298. * c1 + 45. * t1.powi(2) - 252. * self.ep2 - 3. * c1.powi(2)) * d.powi(6) / 720.
        );
        let lambda = self.lon0 + (
            d
            - (1. + 2. * t1 + c1) * d.powi(3) / 6.
            + (5. - 2. * c1 + 28. * t1 - 3. * c1.powi(2) + 8. * self.ep2 + 24. * t1.powi(2)) * d.powi(5) / 120.
        ) / cos_phi1;

        Ok((
            phi.to_degrees().ensure_finite("Latitude")?,
            lambda.to_degrees().ensure_finite("Longitude")?,
        ))
    }

    fn definition(&self) -> &GridDefinition {
        &self.definition
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    #[test]
    fn origin_maps_to_false_origin() {
        let tm = TransverseMercator::ghana();
        let (x, y) = tm.forward(4.669_382, -1.0).unwrap();
        assert_eq!(x, 274_286.8);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn false_origin_maps_to_origin() {
        let tm = TransverseMercator::ghana();
        let (lat, lon) = tm.inverse(274_286.8, 0.0).unwrap();
        assert_abs_diff_eq!(lat, 4.669_382, epsilon = 1e-9);
        assert_abs_diff_eq!(lon, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn symmetric_about_central_meridian() {
        let tm = TransverseMercator::ghana();
        for lat in [4.5, 6.0, 8.25, 11.0] {
            let (xw, yw) = tm.forward(lat, -2.5).unwrap();
            let (xe, ye) = tm.forward(lat, 0.5).unwrap();
            assert_relative_eq!(xw - 274_286.8, 274_286.8 - xe, epsilon = 1e-6);
            assert_relative_eq!(yw, ye, epsilon = 1e-6);
        }
    }

    #[test]
    fn northing_grows_with_latitude() {
        let tm = TransverseMercator::ghana();
        let (_, y_south) = tm.forward(5.0, -1.0).unwrap();
        let (_, y_north) = tm.forward(10.0, -1.0).unwrap();
        assert!(y_south > 0.0);
        assert!(y_north > y_south);
        // Roughly 110.56 km per degree of latitude this close to the equator
        assert_relative_eq!((y_north - y_south) / 5.0, 110_556.0, max_relative = 1e-4);
    }

    #[test]
    fn forward_then_inverse() {
        let tm = TransverseMercator::ghana();
        for i in 0..=30 {
            for j in 0..=20 {
                let lat = 4.0 + f64::from(i) * 0.25;
                let lon = -3.5 + f64::from(j) * 0.25;
                let (x, y) = tm.forward(lat, lon).unwrap();
                let (lat2, lon2) = tm.inverse(x, y).unwrap();
                assert_abs_diff_eq!(lat2, lat, epsilon = 1e-7);
                assert_abs_diff_eq!(lon2, lon, epsilon = 1e-7);
            }
        }
    }

    #[test]
    fn rejects_poles_and_beyond() {
        let tm = TransverseMercator::ghana();
        for lat in [90.0, -90.0, 95.0, -95.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(tm.forward(lat, 0.0), Err(Error::OutOfDomain(_))), "{lat}");
        }
    }

    #[test]
    fn non_finite_results_are_errors() {
        let tm = TransverseMercator::ghana();
        assert!(matches!(tm.forward(5.0, f64::NAN), Err(Error::NonFinite(_))));
        assert!(matches!(tm.forward(5.0, f64::INFINITY), Err(Error::NonFinite(_))));
        assert!(matches!(tm.inverse(f64::NAN, 0.0), Err(Error::NonFinite(_))));
        assert!(matches!(tm.inverse(0.0, f64::INFINITY), Err(Error::NonFinite(_))));
    }
}
