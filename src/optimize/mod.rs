//! One-dimensional minimisation and root finding used by the depth-scaling estimators

mod minimize;
pub use minimize::{Bracket, BrentMinimizer, Minimum};

mod root;
pub use root::BrentRootFinder;
