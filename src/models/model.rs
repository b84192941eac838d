pub(super) use crate::error::ModelError;
pub(super) use crate::float_trait::Float;
pub(super) use crate::orbit::{OrbitElements, OrbitGeometry};

use enum_dispatch::enum_dispatch;
pub(super) use macro_const::macro_const;
pub(super) use ndarray::{Array1, ArrayView1};
pub(super) use schemars::JsonSchema;
pub(super) use serde::de::DeserializeOwned;
pub(super) use serde::{Deserialize, Serialize};
pub(super) use std::fmt::Debug;

#[enum_dispatch]
pub trait ModelPropsTrait {
    /// Short name of the model
    fn name(&self) -> &'static str;

    /// Names of the free parameters, in the order of [ModelTrait::params]
    fn names(&self) -> Vec<&'static str>;

    /// Descriptions of the free parameters
    fn descriptions(&self) -> Vec<&'static str>;

    /// Names of the parameters derived from the free ones, in the order of [ModelTrait::derived]
    fn derived_names(&self) -> Vec<&'static str>;
}

#[enum_dispatch]
pub trait ModelTrait<T: Float>:
    ModelPropsTrait + Clone + Debug + Serialize + DeserializeOwned + JsonSchema
{
    /// Evaluate the model at the times of `input`
    fn eval(&self, input: &ModelInput<'_, T>) -> Result<Array1<T>, ModelError>;

    /// Values of the free parameters
    fn params(&self) -> Vec<T>;

    /// Initial values, bounds and vary flags of the free parameters
    fn param_hints(&self) -> Vec<ParamHint<T>>;

    /// Values of the derived parameters, NaN where they are undefined
    fn derived(&self) -> Vec<T>;
}

#[enum_dispatch(ModelTrait<T>, ModelPropsTrait)]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(bound = "T: Float")]
#[non_exhaustive]
pub enum Model<T: Float> {
    Transit(super::transit::TransitModel<T>),
    Eclipse(super::eclipse::EclipseModel<T>),
    Factor(super::factor::FactorModel<T>),
    ThermalPhase(super::thermal_phase::ThermalPhaseModel<T>),
    Reflection(super::reflection::ReflectionModel<T>),
    Rv(super::rv::RvModel<T>),
}

/// Initial value, bounds and vary flag of a model parameter for an external fitter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ParamHint<T> {
    pub name: String,
    pub value: Option<T>,
    pub min: Option<T>,
    pub max: Option<T>,
    pub vary: bool,
}

impl<T> ParamHint<T>
where
    T: Float,
{
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            value: None,
            min: None,
            max: None,
            vary: true,
        }
    }

    pub fn value(self, value: f64) -> Self {
        Self {
            value: Some(T::from_f64_literal(value)),
            ..self
        }
    }

    pub fn min(self, min: f64) -> Self {
        Self {
            min: Some(T::from_f64_literal(min)),
            ..self
        }
    }

    pub fn max(self, max: f64) -> Self {
        Self {
            max: Some(T::from_f64_literal(max)),
            ..self
        }
    }

    pub fn fixed(self) -> Self {
        Self {
            vary: false,
            ..self
        }
    }
}

/// Independent variables of a model evaluation
///
/// Holds the observation times and, for the models which need them, the orbital geometry and
/// the decorrelation series sampled at the same times.
#[derive(Clone, Copy)]
pub struct ModelInput<'a, T: Float> {
    t: ArrayView1<'a, T>,
    geometry: Option<&'a dyn OrbitGeometry<T>>,
    dx: Option<ArrayView1<'a, T>>,
    dy: Option<ArrayView1<'a, T>>,
    sinphi: Option<ArrayView1<'a, T>>,
    cosphi: Option<ArrayView1<'a, T>>,
}

impl<'a, T> ModelInput<'a, T>
where
    T: Float,
{
    pub fn new(t: impl Into<ArrayView1<'a, T>>) -> Self {
        Self {
            t: t.into(),
            geometry: None,
            dx: None,
            dy: None,
            sinphi: None,
            cosphi: None,
        }
    }

    pub fn with_geometry(self, geometry: &'a dyn OrbitGeometry<T>) -> Self {
        Self {
            geometry: Some(geometry),
            ..self
        }
    }

    /// Offset of the target from its mean position along the `x` axis
    pub fn with_dx(self, dx: impl Into<ArrayView1<'a, T>>) -> Self {
        Self {
            dx: Some(dx.into()),
            ..self
        }
    }

    /// Offset of the target from its mean position along the `y` axis
    pub fn with_dy(self, dy: impl Into<ArrayView1<'a, T>>) -> Self {
        Self {
            dy: Some(dy.into()),
            ..self
        }
    }

    /// Sine and cosine of the spacecraft roll angle
    pub fn with_roll_angle(
        self,
        sinphi: impl Into<ArrayView1<'a, T>>,
        cosphi: impl Into<ArrayView1<'a, T>>,
    ) -> Self {
        Self {
            sinphi: Some(sinphi.into()),
            cosphi: Some(cosphi.into()),
            ..self
        }
    }

    pub fn t(&self) -> ArrayView1<'a, T> {
        self.t
    }

    pub(super) fn geometry(
        &self,
        model: &'static str,
    ) -> Result<&'a dyn OrbitGeometry<T>, ModelError> {
        self.geometry
            .ok_or(ModelError::MissingGeometry { model })
    }

    pub(super) fn dx(&self, model: &'static str) -> Result<ArrayView1<'a, T>, ModelError> {
        self.series(self.dx, "dx", model)
    }

    pub(super) fn dy(&self, model: &'static str) -> Result<ArrayView1<'a, T>, ModelError> {
        self.series(self.dy, "dy", model)
    }

    pub(super) fn sinphi(&self, model: &'static str) -> Result<ArrayView1<'a, T>, ModelError> {
        self.series(self.sinphi, "sinphi", model)
    }

    pub(super) fn cosphi(&self, model: &'static str) -> Result<ArrayView1<'a, T>, ModelError> {
        self.series(self.cosphi, "cosphi", model)
    }

    fn series(
        &self,
        series: Option<ArrayView1<'a, T>>,
        name: &'static str,
        model: &'static str,
    ) -> Result<ArrayView1<'a, T>, ModelError> {
        let series = series.ok_or(ModelError::MissingSeries {
            model,
            series: name,
        })?;
        if series.len() != self.t.len() {
            return Err(ModelError::LengthMismatch {
                series: name,
                actual: series.len(),
                expected: self.t.len(),
            });
        }
        Ok(series)
    }
}

/// Sky-plane geometry of a transit parametrised by its depth, width and shape
///
/// `None` is returned for combinations of $D$, $W$ and $S$ which correspond to no physical
/// configuration, or for radius ratio $k > 1/2$.
#[derive(Clone, Copy, Debug)]
pub(super) struct TransitShape<T> {
    pub k: T,
    pub r_star: T,
    pub sini: T,
}

impl<T> TransitShape<T>
where
    T: Float,
{
    // Negated comparisons reject NaN
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn from_dws(d: T, w: T, s: T) -> Option<Self> {
        let k = d.sqrt();
        if !(d > T::zero() && k <= T::half() && s < T::one()) {
            return None;
        }
        let b2 = impact_parameter_squared(k, s);
        if !(b2 >= T::zero()) {
            return None;
        }
        let chord2 = (T::one() + k).powi(2) - b2;
        if !(chord2 > T::zero()) {
            return None;
        }
        let r_star = T::PI() * w / chord2.sqrt();
        let sini2 = T::one() - b2 * r_star.powi(2);
        if !(sini2 > T::zero()) {
            return None;
        }
        Some(Self {
            k,
            r_star,
            sini: sini2.sqrt(),
        })
    }
}

/// $b^2 = ((1 - k)^2 - S (1 + k)^2) / (1 - S)$
pub(super) fn impact_parameter_squared<T: Float>(k: T, s: T) -> T {
    ((T::one() - k).powi(2) - s * (T::one() + k).powi(2)) / (T::one() - s)
}

/// Mean stellar density in solar units for $M_\mathrm{planet} \ll M_\star$ and period in days
pub(super) fn stellar_density<T: Float>(a_r: T, p: T) -> T {
    T::from_f64_literal(0.013418) * a_r.powi(3) / p.powi(2)
}
