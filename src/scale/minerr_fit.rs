use crate::error::FitError;
use crate::float_trait::Float;
use crate::optimize::{Bracket, BrentMinimizer, BrentRootFinder};
use crate::scale::sigma::Sigma;
use crate::types::CowArray1;

use ndarray::{ArrayView1, Zip};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Result of [minerr_transit_fit]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MinerrTransitFit<T> {
    /// Depth scaling factor
    pub s: T,
    /// Distance from `s` to the upper one-sigma bound of the likelihood
    pub sigma_s: T,
}

impl<T> MinerrTransitFit<T>
where
    T: Float,
{
    pub fn nan() -> Self {
        Self {
            s: T::nan(),
            sigma_s: T::nan(),
        }
    }

    /// No significant transit signal
    pub fn zero() -> Self {
        Self {
            s: T::zero(),
            sigma_s: T::zero(),
        }
    }

    pub fn into_tuple(self) -> (T, T) {
        (self.s, self.sigma_s)
    }
}

/// Likelihood of scaled model for errors known only as lower bounds
struct LowerBoundLikelihood<'a, T> {
    flux: ArrayView1<'a, T>,
    sigma: CowArray1<'a, T>,
    model: ArrayView1<'a, T>,
}

impl<T> LowerBoundLikelihood<'_, T>
where
    T: Float,
{
    /// Negative logarithm of the likelihood marginalised over true errors
    fn neg_ln_like(&self, s: T) -> T {
        Zip::from(&self.flux)
            .and(&self.sigma)
            .and(&self.model)
            .fold(T::zero(), |acc, &f, &sigma, &m| {
                let r2 = ((T::one() + s * (m - T::one()) - f) / sigma).powi(2);
                let ln_like = if r2 > T::epsilon() {
                    (-(-T::half() * r2).exp_m1() / r2).ln()
                } else {
                    T::half().ln()
                };
                acc - ln_like
            })
    }
}

/// Power of two below which the scaling factor is considered insignificant
const MIN_SCALE_POWER: i32 = 16;

/// Optimum scaled transit depth for data with lower bounds on errors
///
/// Finds the scaling factor $s$ of the model $1 + s \times (\mathrm{model} - 1)$ that fits the
/// normalised `flux` best, assuming that nominal `sigma` values are lower bounds on the true
/// standard errors, distributed as $P(\sigma_\mathrm{true}|\sigma) = \sigma/\sigma_\mathrm{true}^2$
/// (Sivia & Skilling, Data Analysis: A Bayesian Tutorial, section 8.3.1). Marginalising over the
/// true errors gives the likelihood of a residual $R = (1 + s (m - 1) - f) / \sigma$:
///
/// $$
/// \mathcal{L}(R) \propto \frac{1 - e^{-R^2/2}}{R^2}.
/// $$
///
/// The minimum of $-\ln\mathcal{L}$ is bracketed by doubling (or halving) a trial scaling factor
/// starting from $s = 1$, and refined with Brent's method. `sigma_s` is the distance to the point
/// above the optimum where $\ln\mathcal{L}$ has dropped by one half.
///
/// [MinerrTransitFit::nan] is returned for fewer than three observations, [MinerrTransitFit::zero]
/// is returned for a flat model or when no positive scaling factor improves on $s = 0$.
///
/// # Errors
///
/// [FitError] if the likelihood cannot be bracketed with finite values of $s$ or the search of the
/// confidence bound fails
///
/// # Panics
///
/// Panics if `flux`, `model` and array-like `sigma` have different lengths
pub fn minerr_transit_fit<'a, T>(
    flux: impl Into<ArrayView1<'a, T>>,
    sigma: impl Into<Sigma<'a, T>>,
    model: impl Into<ArrayView1<'a, T>>,
) -> Result<MinerrTransitFit<T>, FitError>
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

    if flux.len() < 3 {
        return Ok(MinerrTransitFit::nan());
    }
    let model_min = model.fold(T::infinity(), |acc, &m| acc.min(m));
    if model_min == T::one() {
        return Ok(MinerrTransitFit::zero());
    }

    let likelihood = LowerBoundLikelihood {
        flux,
        sigma,
        model,
    };
    let neg_ln_like = |s: T| likelihood.neg_ln_like(s);

    let s_min = T::zero();
    let fa = neg_ln_like(s_min);
    let mut s_mid = T::one();
    let mut fb = neg_ln_like(s_mid);
    let s_max = if fb < fa {
        let mut s_max = T::two();
        while neg_ln_like(s_max) < fb {
            s_max = T::two() * s_max;
            if !s_max.is_finite() {
                return Err(FitError::BracketOverflow {
                    what: "minimum",
                    bound: s_max.to_f64_lossy(),
                });
            }
        }
        s_max
    } else {
        let s_max = s_mid;
        s_mid = T::half();
        fb = neg_ln_like(s_mid);
        let s_floor = T::half().powi(MIN_SCALE_POWER);
        while fb > fa {
            if s_mid < s_floor {
                log::trace!("no improvement over zero scaling down to s = {s_mid:e}");
                return Ok(MinerrTransitFit::zero());
            }
            s_mid = T::half() * s_mid;
            fb = neg_ln_like(s_mid);
        }
        s_max
    };
    log::trace!("likelihood minimum bracketed by ({s_min}, {s_mid}, {s_max})");

    let minimum = BrentMinimizer::default().minimize(
        neg_ln_like,
        Bracket {
            a: s_min,
            b: s_mid,
            c: s_max,
            fb,
        },
    );
    let s_opt = minimum.x;

    let ln_like_0 = -minimum.fx - T::half();
    let ln_like_diff = |s: T| ln_like_0 + neg_ln_like(s);
    let mut s_hi = s_max;
    while ln_like_diff(s_hi) < T::zero() {
        s_hi = T::two() * s_hi;
        if !s_hi.is_finite() {
            return Err(FitError::BracketOverflow {
                what: "confidence bound",
                bound: s_hi.to_f64_lossy(),
            });
        }
    }
    log::trace!("upper confidence bound of s = {s_opt} is below {s_hi}");

    let s_bound = BrentRootFinder::default().find_root(ln_like_diff, s_opt, s_hi)?;
    Ok(MinerrTransitFit {
        s: s_opt,
        sigma_s: s_bound - s_opt,
    })
}
