//! Flux of an occulted stellar or planetary disc as a function of the sky-projected separation
//!
//! Both kernels are evaluated element-wise and depend on the absolute value of the separation
//! only. Three regimes are distinguished for every sample: the occulting body is fully inside
//! the occulted disc ($|z| \le 1 - k$), partially overlapping it ($||z| - 1| < k$), or not
//! overlapping at all. The last case always gives exactly unity, so large sentinel separations
//! can be used to mark samples where the occulting body is on the far side of its companion.

mod qpower2;
pub use qpower2::qpower2;

mod ueclipse;
pub use ueclipse::ueclipse;
