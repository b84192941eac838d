use crate::float_trait::Float;
use crate::scale::sigma::Sigma;

use ndarray::{ArrayView1, Zip};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Result of [scaled_transit_fit]
///
/// All fields are NaN if the data carry no information about the scaling factor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScaledTransitFit<T> {
    /// Depth scaling factor
    pub s: T,
    /// Error scaling factor: true errors are `b` times the nominal ones
    pub b: T,
    pub sigma_s: T,
    pub sigma_b: T,
}

impl<T> ScaledTransitFit<T>
where
    T: Float,
{
    pub fn nan() -> Self {
        Self {
            s: T::nan(),
            b: T::nan(),
            sigma_s: T::nan(),
            sigma_b: T::nan(),
        }
    }

    /// Is it the NaN sentinel for uninformative data?
    pub fn is_nan(&self) -> bool {
        self.s.is_nan() || self.b.is_nan() || self.sigma_s.is_nan() || self.sigma_b.is_nan()
    }

    pub fn into_tuple(self) -> (T, T, T, T) {
        (self.s, self.b, self.sigma_s, self.sigma_b)
    }
}

/// Optimum scaled transit depth for data with scaled errors
///
/// Finds the scaling factor $s$ of the model $1 + s \times (\mathrm{model} - 1)$ that fits the
/// normalised `flux` best in the weighted least-squares sense. True standard errors are assumed
/// to be $b$ times the nominal `sigma`; $b$ is estimated from the $\chi^2$ of the fit:
///
/// $$
/// s = \frac{\sum_i w_i (m_i - 1) (f_i - 1)}{\sum_i w_i (m_i - 1)^2},\quad
/// b = \sqrt{\chi^2 / N},\quad w_i = \sigma_i^{-2}.
/// $$
///
/// Standard errors $\sigma_s$ and $\sigma_b$ are derived from the curvature of the $\chi^2$
/// surface. [ScaledTransitFit::nan] is returned for fewer than three observations, for a flat
/// model and when the curvature with respect to $b$ is not positive.
///
/// # Panics
///
/// Panics if `flux`, `model` and array-like `sigma` have different lengths
pub fn scaled_transit_fit<'f, 's, 'm, T>(
    flux: impl Into<ArrayView1<'f, T>>,
    sigma: impl Into<Sigma<'s, T>>,
    model: impl Into<ArrayView1<'m, T>>,
) -> ScaledTransitFit<T>
where
    T: Float,
{
    let flux = flux.into();
    let model = model.into();
    assert_eq!(
        flux.len(),
        model.len(),
        "flux and model should have the same size"
    );
    let sigma = sigma.into().broadcast(flux.len());

    let n = flux.len();
    if n < 3 {
        return ScaledTransitFit::nan();
    }
    let n = T::from_count(n);

    let w = sigma.mapv(|x| x.powi(-2));
    let sum_m2 = Zip::from(&w)
        .and(&model)
        .fold(T::zero(), |acc, &wi, &m| acc + wi * (m - T::one()) * (m - T::one()));
    if sum_m2.is_zero() {
        return ScaledTransitFit::nan();
    }
    let sum_mf = Zip::from(&w)
        .and(&model)
        .and(&flux)
        .fold(T::zero(), |acc, &wi, &m, &f| {
            acc + wi * (m - T::one()) * (f - T::one())
        });
    let s = sum_mf / sum_m2;

    let chi2 = Zip::from(&w)
        .and(&model)
        .and(&flux)
        .fold(T::zero(), |acc, &wi, &m, &f| {
            acc + wi * ((f - T::one()) - s * (m - T::one())).powi(2)
        });
    if chi2.is_zero() {
        // Perfect fit, the limit of b / sqrt(2N) for b -> 0
        return ScaledTransitFit {
            s,
            b: T::zero(),
            sigma_s: T::zero(),
            sigma_b: T::zero(),
        };
    }
    let b = (chi2 / n).sqrt();
    let sigma_s = b / sum_m2.sqrt();
    let curvature = T::three() * chi2 / b.powi(4) - n / b.powi(2);
    if curvature > T::zero() {
        ScaledTransitFit {
            s,
            b,
            sigma_s,
            sigma_b: curvature.sqrt().recip(),
        }
    } else {
        ScaledTransitFit::nan()
    }
}

#[cfg(test)]
#[allow(clippy::unreadable_literal)]
#[allow(clippy::excessive_precision)]
mod tests {
    use super::*;
    use crate::tests::*;

    use light_curve_transit_test_util::box_transit;

    const FLUX: [f64; 5] = [1.0002, 0.9981, 0.9969, 0.9987, 0.9998];
    const MODEL: [f64; 5] = [1.0, 0.998, 0.997, 0.998, 1.0];
    const SIGMA: [f64; 5] = [0.001, 0.001, 0.002, 0.001, 0.001];

    #[test]
    fn normal_equation_solution() {
        let (numerator, denominator) = FLUX.iter().zip(MODEL.iter()).zip(SIGMA.iter()).fold(
            (0.0, 0.0),
            |(num, den), ((&f, &m), &sigma)| {
                let w = sigma.powi(-2);
                (num + w * (m - 1.0) * (f - 1.0), den + w * (m - 1.0).powi(2))
            },
        );
        let fit = scaled_transit_fit(&FLUX, &SIGMA, &MODEL);
        assert_relative_eq!(fit.s, numerator / denominator, max_relative = 1e-12);
    }

    #[test]
    fn five_points_array_sigma() {
        let fit = scaled_transit_fit(&FLUX, &SIGMA, &MODEL);
        assert_relative_eq!(fit.s, 0.8512195121951168, max_relative = 1e-10);
        assert_relative_eq!(fit.b, 0.26668699109539334, max_relative = 1e-10);
        assert_relative_eq!(fit.sigma_s, 0.08329902129224147, max_relative = 1e-10);
        assert_relative_eq!(fit.sigma_b, 0.08433383141984861, max_relative = 1e-10);
    }

    #[test]
    fn five_points_scalar_sigma() {
        let fit = scaled_transit_fit(&FLUX, 0.001, &MODEL);
        let desired = [
            0.9235294117647014,
            0.31323736536183894,
            0.07597122019276774,
            0.09905435228137437,
        ];
        let (s, b, sigma_s, sigma_b) = fit.into_tuple();
        assert_relative_eq!(&[s, b, sigma_s, sigma_b][..], &desired[..], max_relative = 1e-10);
    }

    #[test]
    fn sigma_b_is_b_over_sqrt_2n() {
        let fit = scaled_transit_fit(&FLUX, &SIGMA, &MODEL);
        assert_relative_eq!(fit.sigma_b, fit.b / 10.0_f64.sqrt(), max_relative = 1e-10);
    }

    #[test]
    fn exact_model() {
        let model = [1.0, 0.999, 0.99, 0.98, 0.99, 0.999, 1.0];
        let fit = scaled_transit_fit(&model, 1e-3, &model);
        assert_eq!(fit.s, 1.0);
        assert_eq!(fit.b, 0.0);
        assert!(!fit.is_nan());
    }

    #[test]
    fn scaled_model() {
        let model = Array1::linspace(0.99, 1.0, 11);
        let flux = model.mapv(|m| 1.0 + 0.5 * (m - 1.0));
        let fit = scaled_transit_fit(&flux, 1e-3, &model);
        assert_abs_diff_eq!(fit.s, 0.5, epsilon = 1e-10);
        assert_abs_diff_eq!(fit.b, 0.0, epsilon = 1e-8);
    }

    #[test]
    fn recovers_scaling_and_noise_factors() {
        const N: usize = 2000;
        const SIGMA: f64 = 1e-3;
        const S_TRUE: f64 = 0.7;
        const B_TRUE: f64 = 1.5;
        let mut rng = StdRng::seed_from_u64(0);
        let t = Array1::linspace(-0.2, 0.2, N);
        let model = box_transit(t.view(), 0.0, 0.1, 5e-3);
        let flux = model.mapv(|m| {
            let x: f64 = rng.sample(StandardNormal);
            1.0 + S_TRUE * (m - 1.0) + B_TRUE * SIGMA * x
        });
        let fit = scaled_transit_fit(&flux, SIGMA, &model);
        assert!((fit.s - S_TRUE).abs() < 5.0 * fit.sigma_s, "{fit:?}");
        assert!((fit.b - B_TRUE).abs() < 5.0 * fit.sigma_b, "{fit:?}");
        assert_relative_eq!(fit.sigma_b, fit.b / (2.0 * N as f64).sqrt(), max_relative = 0.1);
    }

    #[test]
    fn too_short() {
        for n in 0..3 {
            let fit = scaled_transit_fit(&FLUX[..n], 1e-3, &MODEL[..n]);
            assert!(fit.s.is_nan());
            assert!(fit.b.is_nan());
            assert!(fit.sigma_s.is_nan());
            assert!(fit.sigma_b.is_nan());
        }
    }

    #[test]
    fn flat_model() {
        let fit = scaled_transit_fit(&FLUX, &SIGMA, &[1.0; 5]);
        assert!(fit.is_nan());
    }

    #[test]
    fn non_finite_flux() {
        let mut flux = FLUX;
        flux[2] = f64::INFINITY;
        let fit = scaled_transit_fit(&flux, &SIGMA, &MODEL);
        assert!(fit.is_nan());
    }

    #[test]
    fn f32_input() {
        let flux = FLUX.map(|x| x as f32);
        let model = MODEL.map(|x| x as f32);
        let fit = scaled_transit_fit(&flux, 0.001_f32, &model);
        assert_relative_eq!(fit.s, 0.9235294, max_relative = 1e-3);
    }

    #[test]
    #[should_panic(expected = "flux and model should have the same size")]
    fn length_mismatch() {
        let _ = scaled_transit_fit(&FLUX, 1e-3, &MODEL[..4]);
    }
}
