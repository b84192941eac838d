use crate::models::model::*;

macro_const! {
    const DOC: &str = r#"
Thermal phase curve of a tidally locked planet

$$
f = a_\mathrm{th} \frac{1 - \cos\phi}{2} + b_\mathrm{th} \frac{1 + \sin\phi}{2} + c_\mathrm{th},
\quad \phi = 2\pi \frac{t - T_0}{P},
$$

where $T_0$ is the time of inferior conjunction (mid-transit).

Derived parameters: peak-to-trough amplitude $A = \sqrt{a_\mathrm{th}^2 + b_\mathrm{th}^2}$,
maximum and minimum flux $F_\mathrm{max} = c_\mathrm{th} + (a_\mathrm{th} + b_\mathrm{th} + A)/2$
and $F_\mathrm{min} = F_\mathrm{max} - A$, and the phase of the maximum
$\mathrm{atan2}(b_\mathrm{th}, -a_\mathrm{th}) / 2\pi$.
"#;
}

#[doc = DOC!()]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ThermalPhaseModel<T> {
    pub t_0: T,
    pub p: T,
    pub a_th: T,
    pub b_th: T,
    pub c_th: T,
}

impl<T> ThermalPhaseModel<T>
where
    T: Float,
{
    pub fn new(t_0: T, p: T, a_th: T, b_th: T, c_th: T) -> Self {
        Self {
            t_0,
            p,
            a_th,
            b_th,
            c_th,
        }
    }

    pub const fn doc() -> &'static str {
        DOC
    }

    fn amplitude(&self) -> T {
        self.a_th.hypot(self.b_th)
    }
}

impl<T> Default for ThermalPhaseModel<T>
where
    T: Float,
{
    fn default() -> Self {
        Self::new(T::zero(), T::one(), T::zero(), T::zero(), T::zero())
    }
}

impl<T> ModelPropsTrait for ThermalPhaseModel<T>
where
    T: Float,
{
    fn name(&self) -> &'static str {
        "thermal_phase"
    }

    fn names(&self) -> Vec<&'static str> {
        vec!["T_0", "P", "a_th", "b_th", "c_th"]
    }

    fn descriptions(&self) -> Vec<&'static str> {
        vec![
            "time of inferior conjunction",
            "orbital period",
            "coefficient of the cosine-like term",
            "coefficient of the sine-like term",
            "constant term",
        ]
    }

    fn derived_names(&self) -> Vec<&'static str> {
        vec!["A", "Fmax", "Fmin", "ph_max"]
    }
}

impl<T> ModelTrait<T> for ThermalPhaseModel<T>
where
    T: Float,
{
    fn eval(&self, input: &ModelInput<'_, T>) -> Result<Array1<T>, ModelError> {
        Ok(input.t().mapv(|t| {
            let (sin, cos) = (T::TAU() * (t - self.t_0) / self.p).sin_cos();
            self.a_th * (T::one() - cos) * T::half()
                + self.b_th * (T::one() + sin) * T::half()
                + self.c_th
        }))
    }

    fn params(&self) -> Vec<T> {
        vec![self.t_0, self.p, self.a_th, self.b_th, self.c_th]
    }

    fn param_hints(&self) -> Vec<ParamHint<T>> {
        vec![
            ParamHint::new("T_0"),
            ParamHint::new("P").min(1e-15),
            ParamHint::new("a_th").value(0.0),
            ParamHint::new("b_th").value(0.0),
            ParamHint::new("c_th").value(0.0).min(0.0),
        ]
    }

    fn derived(&self) -> Vec<T> {
        let amplitude = self.amplitude();
        let f_max = self.c_th + T::half() * (self.a_th + self.b_th + amplitude);
        vec![
            amplitude,
            f_max,
            f_max - amplitude,
            self.b_th.atan2(-self.a_th) / T::TAU(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    check_model!(ThermalPhaseModel<f64>);

    #[test]
    fn values_at_quadratures() {
        let model = ThermalPhaseModel::new(1.0, 4.0, 3e-4, 4e-4, 1e-4);
        let t = [1.0, 2.0, 3.0, 4.0];
        let flux = model.eval(&ModelInput::new(&t)).unwrap();
        let desired = [3e-4, 6.5e-4, 6e-4, 2.5e-4];
        assert_abs_diff_eq!(flux.as_slice().unwrap(), &desired[..], epsilon = 1e-15);
    }

    #[test]
    fn derived_match_phase_curve() {
        let model = ThermalPhaseModel::new(1.0, 4.0, 3e-4, 4e-4, 1e-4);
        let derived = model.derived();
        assert_abs_diff_eq!(derived[0], 5e-4, epsilon = 1e-15);
        assert_abs_diff_eq!(derived[1], 7e-4, epsilon = 1e-15);
        assert_abs_diff_eq!(derived[2], 2e-4, epsilon = 1e-15);

        let t = Array1::linspace(1.0, 5.0, 4001);
        let flux = model.eval(&ModelInput::new(&t)).unwrap();
        let (i_max, &f_max) = flux
            .iter()
            .enumerate()
            .max_by(|a: &(usize, &f64), b| a.1.total_cmp(b.1))
            .unwrap();
        let f_min = flux.iter().copied().fold(f64::INFINITY, f64::min);
        assert_abs_diff_eq!(f_max, derived[1], epsilon = 1e-9);
        assert_abs_diff_eq!(f_min, derived[2], epsilon = 1e-9);
        let phase_max = (t[i_max] - 1.0) / 4.0;
        assert_abs_diff_eq!(phase_max, derived[3], epsilon = 1e-3);
    }
}
