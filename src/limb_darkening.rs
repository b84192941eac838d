//! Limb-darkening laws and re-parametrisations of the power-2 law
//!
//! The power-2 law $I(\mu) = 1 - c (1 - \mu^\alpha)$ is what [crate::qpower2] integrates. Its
//! coefficients are strongly correlated, so fits use either $h_1 = I(1/2)$ and
//! $h_2 = I(1/2) - I(0)$ (Maxted 2018), or $q_1 = (1 - h_2)^2$ and
//! $q_2 = (h_1 - h_2) / (1 - h_2)$ which are uniformly distributed over the physical region
//! (Short et al. 2019).

use crate::float_trait::Float;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Power-2 limb-darkening law
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Power2Law<T> {
    pub c: T,
    pub alpha: T,
}

impl<T> Power2Law<T>
where
    T: Float,
{
    pub fn new(c: T, alpha: T) -> Self {
        Self { c, alpha }
    }

    /// Specific intensity relative to the disc centre, `mu` is the cosine of the angle between
    /// the surface normal and the line of sight
    pub fn intensity(&self, mu: T) -> T {
        T::one() - self.c * (T::one() - mu.powf(self.alpha))
    }

    pub fn to_h1h2(&self) -> H1H2<T> {
        let half_alpha = T::half().powf(self.alpha);
        H1H2 {
            h_1: T::one() - self.c * (T::one() - half_alpha),
            h_2: self.c * half_alpha,
        }
    }
}

/// Power-2 law parametrised by the intensity at $\mu = 1/2$ and its difference from the limb
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct H1H2<T> {
    pub h_1: T,
    pub h_2: T,
}

impl<T> H1H2<T>
where
    T: Float,
{
    pub fn new(h_1: T, h_2: T) -> Self {
        Self { h_1, h_2 }
    }

    /// Is it a physically meaningful law: positive, monotonic, and darker at the limb?
    pub fn is_valid(&self) -> bool {
        self.h_1 > T::zero() && self.h_2 > T::zero() && self.h_2 <= self.h_1 && self.h_1 < T::one()
    }

    pub fn to_power2(&self) -> Power2Law<T> {
        let c = T::one() - self.h_1 + self.h_2;
        Power2Law {
            c,
            alpha: (c / self.h_2).log2(),
        }
    }

    pub fn to_q1q2(&self) -> Q1Q2<T> {
        Q1Q2 {
            q_1: (T::one() - self.h_2).powi(2),
            q_2: (self.h_1 - self.h_2) / (T::one() - self.h_2),
        }
    }
}

/// Power-2 law in the uninformative parametrisation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Q1Q2<T> {
    pub q_1: T,
    pub q_2: T,
}

impl<T> Q1Q2<T>
where
    T: Float,
{
    pub fn new(q_1: T, q_2: T) -> Self {
        Self { q_1, q_2 }
    }

    pub fn to_h1h2(&self) -> H1H2<T> {
        let sqrt_q_1 = self.q_1.sqrt();
        H1H2 {
            h_1: T::one() - sqrt_q_1 + self.q_2 * sqrt_q_1,
            h_2: T::one() - sqrt_q_1,
        }
    }
}

/// Claret four-parameter law, $I(\mu) = 1 - \sum_{i=1}^4 a_i (1 - \mu^{i/2})$
pub fn claret_intensity<T>(mu: T, a: [T; 4]) -> T
where
    T: Float,
{
    let sqrt_mu = mu.sqrt();
    a.iter()
        .enumerate()
        .fold(T::one(), |acc, (i, &a_i)| {
            acc - a_i * (T::one() - sqrt_mu.powi(i as i32 + 1))
        })
}
