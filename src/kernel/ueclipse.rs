use crate::error::KernelError;
use crate::float_trait::Float;

use ndarray::{Array1, ArrayView1};

/// Eclipse light curve of a uniformly bright planet occulted by its star
///
/// - `z`: star-planet separation on the sky in units of the stellar radius
/// - `k`: planet-star radius ratio, $0 \le k \le 1$
///
/// Returns the fraction of the planet's disc that is visible: unity out of eclipse and zero
/// during the total phase.
///
/// # Errors
///
/// [KernelError::InvalidRadiusRatio] if `k > 1`, `k < 0` or `k` is NaN. The check happens before
/// any element of `z` is read.
pub fn ueclipse<'a, T>(z: impl Into<ArrayView1<'a, T>>, k: T) -> Result<Array1<T>, KernelError>
where
    T: Float,
{
    if !(T::zero()..=T::one()).contains(&k) {
        return Err(KernelError::InvalidRadiusRatio(k.to_f64_lossy()));
    }
    let z = z.into();
    Ok(z.mapv(|zi| visible_fraction(zi.abs(), k)))
}

#[inline]
fn visible_fraction<T>(zt: T, k: T) -> T
where
    T: Float,
{
    if zt <= T::one() - k {
        return T::zero();
    }
    if (zt - T::one()).abs() >= k {
        return T::one();
    }
    let clamp = |x: T| x.max(-T::one()).min(T::one());
    let k2 = k * k;
    let t1 = clamp((zt * zt + k2 - T::one()) / (T::two() * zt * k)).acos();
    let t2 = clamp((zt * zt + T::one() - k2) / (T::two() * zt)).acos();
    let heron = (T::one() + k - zt) * (zt + k - T::one()) * (zt - k + T::one()) * (zt + k + T::one());
    let t3 = T::half() * heron.max(T::zero()).sqrt();
    T::one() - (k2 * t1 + t2 - t3) / (T::PI() * k2)
}
