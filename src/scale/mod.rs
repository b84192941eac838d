//! Estimators of the depth scaling factor of a transit template
//!
//! Both estimators fit normalised flux with $1 + s \times (\mathrm{model} - 1)$ and differ in the
//! assumed noise model: [scaled_transit_fit] treats nominal errors as known up to a common factor,
//! [minerr_transit_fit] treats them as lower bounds.

mod minerr_fit;
pub use minerr_fit::{MinerrTransitFit, minerr_transit_fit};

mod scaled_fit;
pub use scaled_fit::{ScaledTransitFit, scaled_transit_fit};

mod sigma;
pub use sigma::Sigma;
