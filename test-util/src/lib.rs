//! Synthetic normalised light curves

use ndarray::{Array1, ArrayView1};
use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal};

/// Box-shaped transit of total `width` and `depth` centred on `t_0`
pub fn box_transit(t: ArrayView1<f64>, t_0: f64, width: f64, depth: f64) -> Array1<f64> {
    t.mapv(|t| {
        if (t - t_0).abs() < 0.5 * width {
            1.0 - depth
        } else {
            1.0
        }
    })
}

/// Gaussian noise with standard deviation `sigma`
pub fn gaussian_noise<R: Rng>(rng: &mut R, sigma: f64, n: usize) -> Array1<f64> {
    let normal = Normal::new(0.0, sigma).unwrap();
    normal.sample_iter(rng).take(n).collect()
}

/// Noise whose true standard deviation is only bounded from below by `sigma`
///
/// The true standard deviation of every sample is $\sigma / u$ with $u$ uniform in $(0, 1]$,
/// so its distribution is $\sigma / \sigma_\mathrm{true}^2$.
pub fn lower_bound_noise<R: Rng>(rng: &mut R, sigma: f64, n: usize) -> Array1<f64> {
    (0..n)
        .map(|_| {
            let u = 1.0 - rng.random::<f64>();
            let x: f64 = rng.sample(StandardNormal);
            sigma / u * x
        })
        .collect()
}
