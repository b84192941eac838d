#![doc = include_str!("../README.md")]


mod error;
pub use error::{FitError, KernelError, ModelError};

mod float_trait;
pub use float_trait::Float;

mod kernel;
pub use kernel::{qpower2, ueclipse};

mod limb_darkening;
pub use limb_darkening::{H1H2, Power2Law, Q1Q2, claret_intensity};

pub mod models;
pub use models::*;

pub mod optimize;

mod orbit;
pub use orbit::{OrbitElements, OrbitGeometry, PlanetPosition, SkySeparation};

mod scale;
pub use scale::{
    MinerrTransitFit, ScaledTransitFit, Sigma, minerr_transit_fit, scaled_transit_fit,
};

mod sorted_array;

mod types;

pub use ndarray;
