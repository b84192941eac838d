use crate::models::model::*;
use crate::sorted_array::SortedArray;

macro_const! {
    const DOC: &str = r#"
Flux scaling and instrumental trend

$$
f = c \times \left(1 + \frac{df}{dt} \Delta t + \frac{d^2f}{dt^2} \Delta t^2
  + \frac{df}{dx} \delta x + \frac{d^2f}{dx^2} \delta x^2
  + \frac{df}{dy} \delta y + \frac{d^2f}{dy^2} \delta y^2
  + \frac{d^2f}{dx\,dy} \delta x \delta y
  + \frac{df}{d\sin\phi} \sin\phi + \frac{df}{d\cos\phi} \cos\phi
  + \frac{df}{d\sin 2\phi} \sin 2\phi + \frac{df}{d\cos 2\phi} \cos 2\phi\right),
$$

where $\Delta t = t - \mathrm{median}(t)$, $\delta x$ and $\delta y$ are offsets of the target
position and $\phi$ is the roll angle of the spacecraft. All coefficients but $c$ are zero by
default, position offsets and the roll angle are required only if a coefficient depending on
them is non-zero.

$\cos 2\phi = \cos^2\phi - \sin^2\phi$. Codes which use $\sin^2\phi - \cos^2\phi$ for this
term fit `dfdcos2phi` with the opposite sign.
"#;
}

#[doc = DOC!()]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FactorModel<T> {
    pub c: T,
    pub dfdt: T,
    pub d2fdt2: T,
    pub dfdx: T,
    pub d2fdx2: T,
    pub dfdy: T,
    pub d2fdy2: T,
    pub d2fdxdy: T,
    pub dfdsinphi: T,
    pub dfdcosphi: T,
    pub dfdsin2phi: T,
    pub dfdcos2phi: T,
}

impl<T> FactorModel<T>
where
    T: Float,
{
    pub fn new(c: T) -> Self {
        Self {
            c,
            dfdt: T::zero(),
            d2fdt2: T::zero(),
            dfdx: T::zero(),
            d2fdx2: T::zero(),
            dfdy: T::zero(),
            d2fdy2: T::zero(),
            d2fdxdy: T::zero(),
            dfdsinphi: T::zero(),
            dfdcosphi: T::zero(),
            dfdsin2phi: T::zero(),
            dfdcos2phi: T::zero(),
        }
    }

    /// Initial model for normalised `flux`: its median as the scale, no trends
    pub fn guess<'a>(flux: impl Into<ArrayView1<'a, T>>) -> Result<Self, ModelError> {
        let median = SortedArray::from(flux.into())
            .median()
            .ok_or(ModelError::EmptyTimeSeries)?;
        Ok(Self::new(median))
    }

    pub const fn doc() -> &'static str {
        DOC
    }
}

impl<T> Default for FactorModel<T>
where
    T: Float,
{
    fn default() -> Self {
        Self::new(T::one())
    }
}

impl<T> ModelPropsTrait for FactorModel<T>
where
    T: Float,
{
    fn name(&self) -> &'static str {
        "factor"
    }

    fn names(&self) -> Vec<&'static str> {
        vec![
            "c",
            "dfdt",
            "d2fdt2",
            "dfdx",
            "d2fdx2",
            "dfdy",
            "d2fdy2",
            "d2fdxdy",
            "dfdsinphi",
            "dfdcosphi",
            "dfdsin2phi",
            "dfdcos2phi",
        ]
    }

    fn descriptions(&self) -> Vec<&'static str> {
        vec![
            "flux scaling factor",
            "linear trend with time",
            "quadratic trend with time",
            "linear trend with x offset",
            "quadratic trend with x offset",
            "linear trend with y offset",
            "quadratic trend with y offset",
            "trend with the product of x and y offsets",
            "trend with sine of the roll angle",
            "trend with cosine of the roll angle",
            "trend with sine of twice the roll angle",
            "trend with cosine of twice the roll angle",
        ]
    }

    fn derived_names(&self) -> Vec<&'static str> {
        vec![]
    }
}

impl<T> ModelTrait<T> for FactorModel<T>
where
    T: Float,
{
    fn eval(&self, input: &ModelInput<'_, T>) -> Result<Array1<T>, ModelError> {
        let name = self.name();
        let t = input.t();
        let t_median = SortedArray::from(t)
            .median()
            .ok_or(ModelError::EmptyTimeSeries)?;

        let mut trend = t.mapv(|t| {
            let dt = t - t_median;
            T::one() + self.dfdt * dt + self.d2fdt2 * dt * dt
        });
        if !self.dfdx.is_zero() || !self.d2fdx2.is_zero() {
            let dx = input.dx(name)?;
            trend.zip_mut_with(&dx, |f, &dx| *f += self.dfdx * dx + self.d2fdx2 * dx * dx);
        }
        if !self.dfdy.is_zero() || !self.d2fdy2.is_zero() {
            let dy = input.dy(name)?;
            trend.zip_mut_with(&dy, |f, &dy| *f += self.dfdy * dy + self.d2fdy2 * dy * dy);
        }
        if !self.d2fdxdy.is_zero() {
            let dxdy = &input.dx(name)? * &input.dy(name)?;
            trend.scaled_add(self.d2fdxdy, &dxdy);
        }
        if !self.dfdsinphi.is_zero() {
            trend.scaled_add(self.dfdsinphi, &input.sinphi(name)?);
        }
        if !self.dfdcosphi.is_zero() {
            trend.scaled_add(self.dfdcosphi, &input.cosphi(name)?);
        }
        if !self.dfdsin2phi.is_zero() || !self.dfdcos2phi.is_zero() {
            let (sinphi, cosphi) = (input.sinphi(name)?, input.cosphi(name)?);
            ndarray::Zip::from(&mut trend)
                .and(&sinphi)
                .and(&cosphi)
                .for_each(|f, &sin, &cos| {
                    let sin2phi = T::two() * sin * cos;
                    let cos2phi = cos * cos - sin * sin;
                    *f += self.dfdsin2phi * sin2phi + self.dfdcos2phi * cos2phi;
                });
        }
        Ok(trend * self.c)
    }

    fn params(&self) -> Vec<T> {
        vec![
            self.c,
            self.dfdt,
            self.d2fdt2,
            self.dfdx,
            self.d2fdx2,
            self.dfdy,
            self.d2fdy2,
            self.d2fdxdy,
            self.dfdsinphi,
            self.dfdcosphi,
            self.dfdsin2phi,
            self.dfdcos2phi,
        ]
    }

    fn param_hints(&self) -> Vec<ParamHint<T>> {
        std::iter::once(ParamHint::new("c").min(0.0))
            .chain(
                self.names()
                    .into_iter()
                    .skip(1)
                    .map(|name| ParamHint::new(name).value(0.0).fixed()),
            )
            .collect()
    }

    fn derived(&self) -> Vec<T> {
        vec![]
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::tests::*;

    check_model!(FactorModel<f64>);

    #[test]
    fn constant_scale() {
        let t = [3.0, 1.0, 2.0];
        let flux = FactorModel::new(1.5).eval(&ModelInput::new(&t)).unwrap();
        assert_eq!(flux, Array1::from_elem(3, 1.5));
    }

    #[test]
    fn time_trend_around_median() {
        let t = [0.0, 1.0, 2.0, 10.0];
        let model = FactorModel {
            dfdt: 0.1,
            d2fdt2: 0.01,
            ..FactorModel::new(2.0)
        };
        let flux = model.eval(&ModelInput::new(&t)).unwrap();
        // median is 1.5
        let desired = t.map(|t: f64| 2.0 * (1.0 + 0.1 * (t - 1.5) + 0.01 * (t - 1.5).powi(2)));
        assert_abs_diff_eq!(flux.as_slice().unwrap(), &desired[..], epsilon = 1e-14);
    }

    #[test]
    fn position_and_roll_angle_trends() {
        let t = [0.0, 1.0, 2.0];
        let dx = [0.1, -0.2, 0.3];
        let dy = [0.5, 0.0, -0.5];
        let phi = [0.0_f64, 1.0, 2.0];
        let (sinphi, cosphi) = (phi.map(f64::sin), phi.map(f64::cos));
        let model = FactorModel {
            dfdx: 0.01,
            d2fdx2: 0.02,
            dfdy: 0.03,
            d2fdy2: 0.04,
            d2fdxdy: 0.05,
            dfdsinphi: 0.06,
            dfdcosphi: 0.07,
            dfdsin2phi: 0.08,
            dfdcos2phi: 0.09,
            ..FactorModel::default()
        };
        let input = ModelInput::new(&t)
            .with_dx(&dx)
            .with_dy(&dy)
            .with_roll_angle(&sinphi, &cosphi);
        let flux = model.eval(&input).unwrap();
        for i in 0..3 {
            let desired = 1.0
                + 0.01 * dx[i]
                + 0.02 * dx[i].powi(2)
                + 0.03 * dy[i]
                + 0.04 * dy[i].powi(2)
                + 0.05 * dx[i] * dy[i]
                + 0.06 * phi[i].sin()
                + 0.07 * phi[i].cos()
                + 0.08 * (2.0 * phi[i]).sin()
                + 0.09 * (2.0 * phi[i]).cos();
            assert_abs_diff_eq!(flux[i], desired, epsilon = 1e-14);
        }
    }

    #[test]
    fn cos_2phi_is_one_at_zero_roll_angle() {
        let t = [0.0, 1.0];
        let (sinphi, cosphi) = ([0.0, 1.0], [1.0, 0.0]);
        let model = FactorModel {
            dfdcos2phi: 0.01,
            ..FactorModel::default()
        };
        let flux = model
            .eval(&ModelInput::new(&t).with_roll_angle(&sinphi, &cosphi))
            .unwrap();
        assert_abs_diff_eq!(flux[0], 1.01, epsilon = 1e-15);
        assert_abs_diff_eq!(flux[1], 0.99, epsilon = 1e-15);
        assert!(FactorModel::<f64>::doc().contains("\\cos^2\\phi - \\sin^2\\phi"));
    }

    #[test]
    fn series_required_only_for_non_zero_coefficients() {
        let t = [0.0, 1.0, 2.0];
        let model = FactorModel {
            dfdy: 0.1,
            ..FactorModel::default()
        };
        assert_eq!(
            model.eval(&ModelInput::new(&t)),
            Err(ModelError::MissingSeries {
                model: "factor",
                series: "dy"
            })
        );
        let dy = [0.0, 0.1, 0.2];
        assert!(model.eval(&ModelInput::new(&t).with_dy(&dy)).is_ok());
    }

    #[test]
    fn empty_time() {
        let t: [f64; 0] = [];
        assert_eq!(
            FactorModel::default().eval(&ModelInput::new(&t)),
            Err(ModelError::EmptyTimeSeries)
        );
    }

    #[test]
    fn guess_is_median() {
        let flux = [1.02, 0.99, 1.01, 1.0];
        let model = FactorModel::guess(&flux).unwrap();
        assert_abs_diff_eq!(model.c, 1.005, epsilon = 1e-15);
        assert_eq!(model.params()[1..], [0.0; 11]);
        let empty: [f64; 0] = [];
        assert_eq!(FactorModel::guess(&empty), Err(ModelError::EmptyTimeSeries));
    }

    #[test]
    fn only_scale_varies() {
        let hints = FactorModel::<f64>::default().param_hints();
        assert!(hints[0].vary);
        assert!(hints[1..].iter().all(|hint| !hint.vary && hint.value == Some(0.0)));
    }
}
