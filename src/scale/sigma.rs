use crate::float_trait::Float;
use crate::types::CowArray1;

use ndarray::{Array1, ArrayView1};

/// Nominal flux errors: either one value for all observations or one value per observation
#[derive(Clone, Debug)]
pub enum Sigma<'a, T> {
    Scalar(T),
    Array(ArrayView1<'a, T>),
}

impl<'a, T> Sigma<'a, T>
where
    T: Float,
{
    /// Per-observation errors for a light curve of length `len`
    ///
    /// # Panics
    ///
    /// Panics if an array of errors has a length different from `len`
    pub fn broadcast(&self, len: usize) -> CowArray1<'a, T> {
        match self {
            Self::Scalar(sigma) => Array1::from_elem(len, *sigma).into(),
            Self::Array(sigma) => {
                assert_eq!(
                    sigma.len(),
                    len,
                    "sigma and flux should have the same size"
                );
                sigma.clone().into()
            }
        }
    }
}

macro_rules! sigma_from_scalar {
    ($t: ty) => {
        impl<'a> From<$t> for Sigma<'a, $t> {
            fn from(sigma: $t) -> Self {
                Self::Scalar(sigma)
            }
        }
    };
}

sigma_from_scalar!(f32);
sigma_from_scalar!(f64);

impl<'a, T> From<ArrayView1<'a, T>> for Sigma<'a, T> {
    fn from(sigma: ArrayView1<'a, T>) -> Self {
        Self::Array(sigma)
    }
}

impl<'a, T> From<&'a Array1<T>> for Sigma<'a, T> {
    fn from(sigma: &'a Array1<T>) -> Self {
        Self::Array(sigma.view())
    }
}

impl<'a, T> From<&'a [T]> for Sigma<'a, T> {
    fn from(sigma: &'a [T]) -> Self {
        Self::Array(ArrayView1::from(sigma))
    }
}

impl<'a, T> From<&'a Vec<T>> for Sigma<'a, T> {
    fn from(sigma: &'a Vec<T>) -> Self {
        Self::Array(ArrayView1::from(sigma))
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for Sigma<'a, T> {
    fn from(sigma: &'a [T; N]) -> Self {
        Self::Array(ArrayView1::from(sigma))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_is_broadcast() {
        let sigma: Sigma<f64> = 0.5.into();
        assert_eq!(sigma.broadcast(3).to_vec(), vec![0.5; 3]);
    }

    #[test]
    fn array_is_borrowed() {
        let v = vec![1.0, 2.0, 3.0];
        let sigma: Sigma<f64> = (&v).into();
        let broadcast = sigma.broadcast(3);
        assert!(broadcast.is_view());
        assert_eq!(broadcast.to_vec(), v);
    }

    #[test]
    #[should_panic(expected = "sigma and flux should have the same size")]
    fn wrong_length() {
        let sigma: Sigma<f64> = (&[1.0, 2.0]).into();
        let _ = sigma.broadcast(3);
    }
}
