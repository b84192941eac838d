use conv::prelude::*;
use ndarray::NdFloat;
use num_traits::FloatConst;
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::{Debug, Display, LowerExp};
use std::iter::Sum;

/// Floating point number used by all light-curve models and estimators
///
/// Implemented for `f32` and `f64`
pub trait Float:
    'static
    + NdFloat
    + FloatConst
    + Sum
    + Debug
    + Display
    + LowerExp
    + ValueFrom<usize>
    + ValueInto<f64>
    + ApproxFrom<f64>
    + Serialize
    + DeserializeOwned
    + JsonSchema
{
    fn half() -> Self;
    fn two() -> Self;
    fn three() -> Self;
    fn four() -> Self;

    /// Sky-separation value used to mark samples where the occulted body is hidden
    fn hidden_separation() -> Self;

    /// Lossy conversion from a `f64` literal, used for tabulated constants
    fn from_f64_literal(x: f64) -> Self {
        x.approx_as::<Self>().unwrap_or_else(|_| Self::nan())
    }

    /// Number of observations as a float
    fn from_count(n: usize) -> Self {
        n.value_as::<Self>()
            .unwrap_or_else(|_| Self::from_f64_literal(n as f64))
    }

    fn to_f64_lossy(self) -> f64 {
        self.value_into().unwrap_or(f64::NAN)
    }
}

macro_rules! float_impl {
    ($t: ty) => {
        impl Float for $t {
            #[inline]
            fn half() -> Self {
                0.5
            }

            #[inline]
            fn two() -> Self {
                2.0
            }

            #[inline]
            fn three() -> Self {
                3.0
            }

            #[inline]
            fn four() -> Self {
                4.0
            }

            #[inline]
            fn hidden_separation() -> Self {
                9999.0
            }
        }
    };
}

float_impl!(f32);
float_impl!(f64);
