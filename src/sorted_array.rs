use crate::float_trait::Float;

use ndarray::{Array1, ArrayView1};
use std::cmp::Ordering;
use std::ops::Deref;

// Underlying array is guaranteed to be sorted and contiguous
#[derive(Clone, Debug, PartialEq)]
pub struct SortedArray<T>(Array1<T>);

impl<T> SortedArray<T>
where
    T: Float,
{
    /// Median of the values, `None` for an empty array
    pub fn median(&self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let i = (self.len() - 1) / 2;
        if self.len() % 2 == 0 {
            Some(T::half() * (self[i] + self[i + 1]))
        } else {
            Some(self[i])
        }
    }
}

impl<T> From<Vec<T>> for SortedArray<T>
where
    T: Float,
{
    fn from(mut v: Vec<T>) -> Self {
        // NaN values end up at unspecified positions
        v[..].sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        Self(Array1::from_vec(v))
    }
}

impl<T> From<ArrayView1<'_, T>> for SortedArray<T>
where
    T: Float,
{
    fn from(v: ArrayView1<'_, T>) -> Self {
        v.to_vec().into()
    }
}

impl<T> Deref for SortedArray<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.0
            .as_slice()
            .unwrap_or_else(|| unreachable!("SortedArray is built from Vec and is contiguous"))
    }
}

#[allow(clippy::float_cmp)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn median_odd_length() {
        let a: SortedArray<f64> = vec![3.0, 1.0, 2.0].into();
        assert_eq!(a.median(), Some(2.0));
    }

    #[test]
    fn median_even_length() {
        let a: SortedArray<f64> = vec![4.0, 1.0, 3.0, 2.0].into();
        assert_eq!(a.median(), Some(2.5));
    }

    #[test]
    fn median_of_empty() {
        let a: SortedArray<f32> = vec![].into();
        assert_eq!(a.median(), None);
    }

    #[test]
    fn is_sorted() {
        let mut rng = StdRng::seed_from_u64(0);
        let v: Vec<f64> = (0..101).map(|_| rng.random()).collect();
        let a: SortedArray<f64> = v.into();
        assert!(a.is_sorted());
    }
}
