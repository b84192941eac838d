//! Orbital geometry consumed by the light-curve and radial-velocity models
//!
//! Solving Kepler's equation is left to the caller: models receive an [OrbitGeometry]
//! implementation through [crate::ModelInput] and only combine its output with the flux kernels.

use crate::float_trait::Float;

use ndarray::{Array1, ArrayView1};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Keplerian orbit of a planet or a stellar companion
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OrbitElements<T> {
    /// Time of inferior conjunction of the companion, i.e. mid-transit
    pub t_0: T,
    /// Orbital period
    pub p: T,
    /// Sine of the orbital inclination
    pub sini: T,
    /// Eccentricity
    pub ecc: T,
    /// Longitude of periastron, degrees
    pub omega: T,
}

impl<T> OrbitElements<T>
where
    T: Float,
{
    /// Orbit parametrised by $f_c = \sqrt{e}\cos\omega$ and $f_s = \sqrt{e}\sin\omega$
    pub fn from_f_c_f_s(t_0: T, p: T, sini: T, f_c: T, f_s: T) -> Self {
        Self {
            t_0,
            p,
            sini,
            ecc: f_c.powi(2) + f_s.powi(2),
            omega: f_s.atan2(f_c).to_degrees(),
        }
    }
}

/// Sky-projected star-planet separation
#[derive(Clone, Debug, PartialEq)]
pub struct SkySeparation<T> {
    /// Separation in units of the stellar radius
    pub z: Array1<T>,
    /// `true` where the planet is further from the observer than the star
    pub behind_star: Array1<bool>,
}

/// Planet position relative to the star in units of the semi-major axis
///
/// `z` axis points towards the observer.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetPosition<T> {
    pub x: Array1<T>,
    pub y: Array1<T>,
    pub z: Array1<T>,
}

/// Orbital mechanics used by the models
pub trait OrbitGeometry<T: Float> {
    /// Star-planet separation for `r_star` $= R_\star / a$
    fn sky_separation(
        &self,
        t: ArrayView1<T>,
        orbit: &OrbitElements<T>,
        r_star: T,
    ) -> SkySeparation<T>;

    fn planet_position(&self, t: ArrayView1<T>, orbit: &OrbitElements<T>) -> PlanetPosition<T>;

    /// Radial velocity with semi-amplitude `k` of the primary star or, if `primary` is `false`,
    /// of its companion
    fn radial_velocity(
        &self,
        t: ArrayView1<T>,
        orbit: &OrbitElements<T>,
        k: T,
        primary: bool,
    ) -> Array1<T>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn circular_orbit_from_f_c_f_s() {
        let orbit = OrbitElements::from_f_c_f_s(1.0, 3.0, 0.9, 0.0, 0.0);
        assert_eq!(orbit.ecc, 0.0);
        assert_eq!(orbit.omega, 0.0);
    }

    #[test]
    fn eccentric_orbit_from_f_c_f_s() {
        let orbit = OrbitElements::from_f_c_f_s(0.0, 1.0, 1.0, 0.3, 0.3);
        assert_abs_diff_eq!(orbit.ecc, 0.18, epsilon = 1e-15);
        assert_abs_diff_eq!(orbit.omega, 45.0, epsilon = 1e-12);

        let orbit = OrbitElements::from_f_c_f_s(0.0, 1.0, 1.0, 0.0, -0.5);
        assert_abs_diff_eq!(orbit.ecc, 0.25, epsilon = 1e-15);
        assert_abs_diff_eq!(orbit.omega, -90.0, epsilon = 1e-12);
    }

    #[test]
    fn serde_json_round_trip() {
        let orbit = OrbitElements::from_f_c_f_s(0.5, 2.0, 0.99, 0.1, -0.2);
        let json = serde_json::to_string(&orbit).unwrap();
        let orbit_serde: OrbitElements<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(orbit, orbit_serde);
    }
}
