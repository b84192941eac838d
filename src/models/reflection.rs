use crate::models::model::*;

use ndarray::Zip;

macro_const! {
    const DOC: &str = r#"
Stellar light reflected from a planet with a Lambertian phase function

The fraction of stellar flux reflected by a planet of radius $R_p$ at distance $r$ from the
star, observed at phase angle $\beta$, is

$$
A_g \left(\frac{R_p}{r}\right)^2 \frac{\sin\beta + (\pi - \beta)\cos\beta}{\pi},
$$

where $A_g$ is the geometric albedo, $r_p = R_p / a$ and both $r$ and the planet position are
in units of the semi-major axis $a$.

Requires orbit geometry.
"#;
}

#[doc = DOC!()]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ReflectionModel<T> {
    pub t_0: T,
    pub p: T,
    pub a_g: T,
    pub r_p: T,
    pub f_c: T,
    pub f_s: T,
    pub sini: T,
}

impl<T> ReflectionModel<T>
where
    T: Float,
{
    pub const fn doc() -> &'static str {
        DOC
    }
}

impl<T> Default for ReflectionModel<T>
where
    T: Float,
{
    fn default() -> Self {
        Self {
            t_0: T::zero(),
            p: T::one(),
            a_g: T::half(),
            r_p: T::from_f64_literal(0.01),
            f_c: T::zero(),
            f_s: T::zero(),
            sini: T::one(),
        }
    }
}

impl<T> ModelPropsTrait for ReflectionModel<T>
where
    T: Float,
{
    fn name(&self) -> &'static str {
        "reflection"
    }

    fn names(&self) -> Vec<&'static str> {
        vec!["T_0", "P", "A_g", "r_p", "f_c", "f_s", "sini"]
    }

    fn descriptions(&self) -> Vec<&'static str> {
        vec![
            "time of inferior conjunction",
            "orbital period",
            "geometric albedo",
            "planet radius in units of the semi-major axis",
            "square root of eccentricity times cosine of the longitude of periastron",
            "square root of eccentricity times sine of the longitude of periastron",
            "sine of the orbital inclination",
        ]
    }

    fn derived_names(&self) -> Vec<&'static str> {
        vec![]
    }
}

impl<T> ModelTrait<T> for ReflectionModel<T>
where
    T: Float,
{
    fn eval(&self, input: &ModelInput<'_, T>) -> Result<Array1<T>, ModelError> {
        let geometry = input.geometry(self.name())?;
        let orbit = OrbitElements::from_f_c_f_s(self.t_0, self.p, self.sini, self.f_c, self.f_s);
        let pos = geometry.planet_position(input.t(), &orbit);
        Ok(Zip::from(&pos.x)
            .and(&pos.y)
            .and(&pos.z)
            .map_collect(|&x, &y, &z| {
                let r = (x * x + y * y + z * z).sqrt();
                let beta = (-z / r).max(-T::one()).min(T::one()).acos();
                let phase_function = (beta.sin() + (T::PI() - beta) * beta.cos()) / T::PI();
                self.a_g * (self.r_p / r).powi(2) * phase_function
            }))
    }

    fn params(&self) -> Vec<T> {
        vec![
            self.t_0, self.p, self.a_g, self.r_p, self.f_c, self.f_s, self.sini,
        ]
    }

    fn param_hints(&self) -> Vec<ParamHint<T>> {
        vec![
            ParamHint::new("T_0"),
            ParamHint::new("P").min(1e-15),
            ParamHint::new("A_g").value(0.5).min(0.0).max(1.0),
            ParamHint::new("r_p").min(0.0).max(1.0),
            ParamHint::new("f_c").value(0.0).min(-1.0).max(1.0).fixed(),
            ParamHint::new("f_s").value(0.0).min(-1.0).max(1.0).fixed(),
            ParamHint::new("sini").value(1.0).min(0.0).max(1.0).fixed(),
        ]
    }

    fn derived(&self) -> Vec<T> {
        vec![]
    }
}
