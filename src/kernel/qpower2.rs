use crate::float_trait::Float;

use ndarray::{Array1, ArrayView1};

/// Fast transit light curve for the power-2 limb-darkening law
///
/// The power-2 law is $I(\mu) = 1 - c (1 - \mu^\alpha)$. The light curve is computed with the
/// qpower2 approximation of Maxted & Gill (2019), accurate to better than 100 ppm for radius ratio
/// $k < 0.1$. It is untested for $k > 0.2$.
///
/// - `z`: star-planet separation on the sky in units of the stellar radius
/// - `k`: planet-star radius ratio, $0 < k < 1$
/// - `c`: power-2 limb-darkening coefficient
/// - `a`: power-2 limb-darkening exponent
///
/// Returns the observed flux, unity out of transit. Parameters are not validated, the caller is
/// responsible for a physically meaningful `(k, c, a)` combination.
pub fn qpower2<'a, T>(z: impl Into<ArrayView1<'a, T>>, k: T, c: T, a: T) -> Array1<T>
where
    T: Float,
{
    let z = z.into();
    let kernel = Power2Kernel::new(k, c, a);
    z.mapv(|zi| kernel.flux(zi.abs()))
}

#[derive(Clone, Copy)]
struct Power2Kernel<T> {
    k: T,
    c: T,
    a: T,
    g: T,
    i_0: T,
    // Distance from the fourth contact point within which the expansion loses precision
    egress_eps: T,
    // Flux deficit at `1 + k - egress_eps`
    egress_deficit: T,
}

impl<T> Power2Kernel<T>
where
    T: Float,
{
    fn new(k: T, c: T, a: T) -> Self {
        let mut kernel = Self {
            k,
            c,
            a,
            g: T::half() * a,
            i_0: (a + T::two()) / (T::PI() * (a - c * a + T::two())),
            egress_eps: T::epsilon().sqrt().sqrt().min(k),
            egress_deficit: T::zero(),
        };
        kernel.egress_deficit =
            T::one() - kernel.partial_overlap(T::one() + k - kernel.egress_eps);
        kernel
    }

    #[inline]
    fn flux(&self, zt: T) -> T {
        if zt <= T::one() - self.k {
            self.full_overlap(zt)
        } else if (zt - T::one()).abs() < self.k {
            let eps = T::one() + self.k - zt;
            if eps < self.egress_eps {
                self.near_fourth_contact(eps)
            } else {
                self.partial_overlap(zt)
            }
        } else {
            T::one()
        }
    }

    /// Overlap area of the discs grows as $\epsilon^{3/2}$ with the distance $\epsilon$ from the
    /// fourth contact point, intensity at the limb is nearly constant
    fn near_fourth_contact(&self, eps: T) -> T {
        T::one() - self.egress_deficit * (eps / self.egress_eps).powf(T::three() * T::half())
    }

    fn full_overlap(&self, zt: T) -> T {
        let Self { k, c, a, g, i_0, .. } = *self;
        let k2 = k * k;
        let s = T::one() - zt * zt;
        let c0 = T::one() - c + c * s.powf(g);
        let c2 =
            T::half() * a * c * s.powf(g - T::two()) * ((a - T::one()) * zt * zt - T::one());
        let c4 = T::half().powi(3) * a * c * s.powf(g - T::one());
        T::one() - i_0 * T::PI() * k2 * (c0 + T::half().powi(2) * k2 * c2 - k2 * c4)
    }

    fn partial_overlap(&self, zt: T) -> T {
        let Self { k, c, a, g, i_0, .. } = *self;
        let k2 = k * k;
        let quarter = T::half().powi(2);
        let two_thirds = T::two() / T::three();

        let d = (zt * zt - k2 + T::one()) / (T::two() * zt);
        let ra = T::half() * (zt - k + d);
        let rb = T::half() * (T::one() + d);
        let sa = T::one() - ra * ra;
        let sb = T::one() - rb * rb;
        let q = ((zt - d) / k).max(-T::one()).min(T::one());
        let w2 = k2 - (d - zt).powi(2);
        let w = w2.max(T::zero()).sqrt();

        // Taylor expansion of the limb-darkened intensity about the chord mid-point
        let b0 = T::one() - c + c * sa.powf(g);
        let b1 = -a * c * ra * sa.powf(g - T::one());
        let b2 =
            T::half() * a * c * sa.powf(g - T::two()) * ((a - T::one()) * ra * ra - T::one());
        let a0 = b0 + b1 * (zt - ra) + b2 * (zt - ra).powi(2);
        let a1 = b1 + T::two() * b2 * (zt - ra);
        let aq = q.acos();

        let j1 = (a0 * (d - zt) - two_thirds * a1 * w2
            + quarter * b2 * (d - zt) * (T::two() * (d - zt).powi(2) - k2))
            * w
            + (a0 * k2 + quarter * b2 * k2 * k2) * aq;
        let j2 = a * c * sa.powf(g - T::one()) * k2 * k2
            * (T::half().powi(3) * aq
                + q * (q * q - T::two() - T::half()) * (T::one() - q * q).max(T::zero()).sqrt()
                    / (T::three() * T::four()));

        // Correction at the stellar limb
        let d0 = T::one() - c + c * sb.powf(g);
        let d1 = -a * c * rb * sb.powf(g - T::one());
        let k1 = (d0 - rb * d1) * d.acos()
            + ((rb * d + two_thirds * (T::one() - d * d)) * d1 - d * d0)
                * (T::one() - d * d).max(T::zero()).sqrt();
        let k2_term = c * a * sb.powf(g + T::half()) * (T::one() - d) / T::three();

        T::one() - i_0 * (j1 - j2 + k1 - k2_term)
    }
}

#[cfg(test)]
#[allow(clippy::unreadable_literal)]
#[allow(clippy::excessive_precision)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn golden_seven_points() {
        let z = Array1::linspace(0.0, 1.5, 7);
        let desired = [
            0.9885206914893617,
            0.9886498855077369,
            0.9890756421145502,
            0.9899855194891598,
            0.9960628623646565,
            1.0,
            1.0,
        ];
        let actual = qpower2(&z, 0.1, 0.5, 0.7);
        assert_abs_diff_eq!(actual.as_slice().unwrap(), &desired[..], epsilon = 1e-9);
    }

    #[test]
    fn ingress_egress() {
        let z = [0.9, 0.95, 1.0, 1.05, 1.1];
        let desired = [
            0.9911544963050904,
            0.9932715122613323,
            0.9960628623646565,
            0.9985770084125791,
            1.0,
        ];
        let actual = qpower2(&z, 0.1, 0.5, 0.7);
        assert_abs_diff_eq!(actual.as_slice().unwrap(), &desired[..], epsilon = 1e-9);
    }

    #[test]
    fn out_of_transit_is_exactly_unity() {
        for &(k, c, a) in LD_SAMPLES {
            let z = [1.0 + k + 1e-12, 1.5, 3.0, -2.0, f64::hidden_separation()];
            let flux = qpower2(&z, k, c, a);
            assert!(flux.iter().all(|&f| f == 1.0), "{flux:?}");
        }
    }

    #[test]
    fn depends_on_absolute_separation() {
        let z = Array1::linspace(-1.3, 1.3, 101);
        let minus_z = z.mapv(|x| -x);
        for &(k, c, a) in LD_SAMPLES {
            assert_eq!(qpower2(&z, k, c, a), qpower2(&minus_z, k, c, a));
        }
    }

    #[test]
    fn continuous_at_contact_points() {
        const EPS: f64 = 1e-10;
        for &(k, c, a) in LD_SAMPLES {
            for boundary in [1.0 - k, 1.0 + k] {
                let flux = qpower2(&[boundary - EPS, boundary + EPS], k, c, a);
                assert_abs_diff_eq!(flux[0], flux[1], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn finite_close_to_fourth_contact() {
        for &(k, c, a) in LD_SAMPLES {
            let z = Array1::linspace(0.0, 1e-9, 1001).mapv(|eps| 1.0 + k - eps);
            let flux = qpower2(&z, k, c, a);
            for (&zi, &f) in z.iter().zip(flux.iter()) {
                assert!(f.is_finite() && f <= 1.0, "k = {k}, z = {zi}, flux = {f}");
                assert_abs_diff_eq!(f, 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn egress_is_monotonic() {
        for &(k, c, a) in LD_SAMPLES {
            let z = Array1::linspace(0.0, 1e-3, 1001).mapv(|eps| 1.0 + k - eps);
            let flux = qpower2(&z, k, c, a);
            assert_eq!(flux[0], 1.0);
            for (i, w) in flux.windows(2).into_iter().enumerate() {
                assert!(w[1] <= w[0], "k = {k}, z = {}: {} > {}", z[i + 1], w[1], w[0]);
            }
        }
    }

    #[test]
    fn transit_is_a_dip() {
        let z = Array1::linspace(0.0, 1.05, 106);
        let flux = qpower2(&z, 0.1, 0.5, 0.7);
        assert!(flux.iter().all(|&f| f <= 1.0 && f > 0.98));
        // Limb darkening makes the centre of the transit the deepest point
        let min = flux.iter().copied().fold(f64::INFINITY, f64::min);
        assert_eq!(min, flux[0]);
    }

    #[test]
    fn empty_input() {
        let z: [f64; 0] = [];
        assert!(qpower2(&z, 0.1, 0.5, 0.7).is_empty());
    }

    #[test]
    fn f32_matches_f64() {
        let z64 = Array1::linspace(0.0, 0.85, 18);
        let z32 = z64.mapv(|x| x as f32);
        let f64_flux = qpower2(&z64, 0.1, 0.5, 0.7);
        let f32_flux = qpower2(&z32, 0.1_f32, 0.5, 0.7);
        for (&x, &y) in f64_flux.iter().zip(f32_flux.iter()) {
            assert_abs_diff_eq!(x, y as f64, epsilon = 1e-5);
        }
    }
}
