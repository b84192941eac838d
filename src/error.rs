/// Error returned from the flux kernels for an impossible geometry
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum KernelError {
    #[error("radius ratio k = {0} is outside of [0, 1]")]
    InvalidRadiusRatio(f64),
}

/// Error returned from [crate::minerr_transit_fit] when the one-dimensional searches break down
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FitError {
    #[error("could not bracket the likelihood {what}: search bound overflowed at s = {bound}")]
    BracketOverflow { what: &'static str, bound: f64 },

    #[error("f(a) and f(b) must have different signs, f({a}) = {fa}, f({b}) = {fb}")]
    NoSignChange { a: f64, b: f64, fa: f64, fb: f64 },

    #[error("{method} failed to converge after {iterations} iterations")]
    NotConverged {
        method: &'static str,
        iterations: usize,
    },
}

/// Error returned from [crate::ModelTrait::eval]
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ModelError {
    #[error("model {model} requires an orbit geometry implementation")]
    MissingGeometry { model: &'static str },

    #[error("model {model} requires the {series} time series to be set")]
    MissingSeries {
        model: &'static str,
        series: &'static str,
    },

    #[error("{series} has length {actual}, but time has length {expected}")]
    LengthMismatch {
        series: &'static str,
        actual: usize,
        expected: usize,
    },

    #[error("time series must not be empty")]
    EmptyTimeSeries,

    #[error(transparent)]
    Kernel(#[from] KernelError),
}
