//! Light-curve and radial-velocity models
//!
//! Every model is a plain struct of its parameters implementing [ModelTrait], so it can be
//! evaluated directly or wrapped into the [Model] enum to be stored, serialized or combined with
//! other models by an external fitter.

mod model;
pub use model::{Model, ModelInput, ModelPropsTrait, ModelTrait, ParamHint};

mod eclipse;
pub use eclipse::EclipseModel;

mod factor;
pub use factor::FactorModel;

mod reflection;
pub use reflection::ReflectionModel;

mod rv;
pub use rv::RvModel;

mod thermal_phase;
pub use thermal_phase::ThermalPhaseModel;

mod transit;
pub use transit::TransitModel;
