use crate::kernel::ueclipse;
use crate::models::model::*;

use ndarray::Zip;

macro_const! {
    const DOC: &str = r#"
Eclipse of a uniformly bright spherical planet by its star

Geometry is parametrised by $D$, $W$ and $S$ exactly as for the transit model. Flux out of
eclipse is unity and $1 - L$ during the total eclipse. The apparent time of mid-eclipse
includes the light travel time correction $a_c$ (in units of time), for a circular orbit it is
$T_0 + P/2 + a_c$.

Derived parameters: $k$, planet-star surface brightness ratio $J = L / D$, $a / R_\star$,
mean stellar density $\rho$ in solar units and impact parameter $b$.

$J = L / D$ grows with the planet's brightness. Codes which report $D / L$ under the same name
give its reciprocal.

Requires orbit geometry.
"#;
}

#[doc = DOC!()]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EclipseModel<T> {
    pub t_0: T,
    pub p: T,
    pub d: T,
    pub w: T,
    pub s: T,
    pub l: T,
    pub f_c: T,
    pub f_s: T,
    pub a_c: T,
}

impl<T> EclipseModel<T>
where
    T: Float,
{
    pub const fn doc() -> &'static str {
        DOC
    }
}

impl<T> Default for EclipseModel<T>
where
    T: Float,
{
    fn default() -> Self {
        Self {
            t_0: T::zero(),
            p: T::one(),
            d: T::from_f64_literal(0.01),
            w: T::from_f64_literal(0.1),
            s: T::half(),
            l: T::from_f64_literal(1e-4),
            f_c: T::zero(),
            f_s: T::zero(),
            a_c: T::zero(),
        }
    }
}

impl<T> ModelPropsTrait for EclipseModel<T>
where
    T: Float,
{
    fn name(&self) -> &'static str {
        "eclipse"
    }

    fn names(&self) -> Vec<&'static str> {
        vec!["T_0", "P", "D", "W", "S", "L", "f_c", "f_s", "a_c"]
    }

    fn descriptions(&self) -> Vec<&'static str> {
        vec![
            "time of mid-transit",
            "orbital period",
            "squared planet-star radius ratio",
            "transit width in units of the orbital period",
            "transit shape parameter",
            "eclipse depth",
            "square root of eccentricity times cosine of the longitude of periastron",
            "square root of eccentricity times sine of the longitude of periastron",
            "light travel time across the orbit",
        ]
    }

    fn derived_names(&self) -> Vec<&'static str> {
        vec!["k", "J", "aR", "rho", "b"]
    }
}

impl<T> ModelTrait<T> for EclipseModel<T>
where
    T: Float,
{
    fn eval(&self, input: &ModelInput<'_, T>) -> Result<Array1<T>, ModelError> {
        let geometry = input.geometry(self.name())?;
        let t = input.t();

        let Some(shape) = TransitShape::from_dws(self.d, self.w, self.s) else {
            log::debug!("eclipse parameters {self:?} are unphysical, the model is flat");
            return Ok(Array1::ones(t.len()));
        };

        let orbit = OrbitElements::from_f_c_f_s(self.t_0, self.p, shape.sini, self.f_c, self.f_s);
        let t_delayed = t.mapv(|t| t - self.a_c);
        let mut sep = geometry.sky_separation(t_delayed.view(), &orbit, shape.r_star);
        Zip::from(&mut sep.z)
            .and(&sep.behind_star)
            .for_each(|z, &behind_star| {
                if !behind_star {
                    *z = T::hidden_separation();
                }
            });
        let visible = ueclipse(&sep.z, shape.k)?;
        Ok(visible.mapv(|v| T::one() + self.l * (v - T::one())))
    }

    fn params(&self) -> Vec<T> {
        vec![
            self.t_0, self.p, self.d, self.w, self.s, self.l, self.f_c, self.f_s, self.a_c,
        ]
    }

    fn param_hints(&self) -> Vec<ParamHint<T>> {
        vec![
            ParamHint::new("T_0"),
            ParamHint::new("P").min(1e-15),
            ParamHint::new("D").min(0.0).max(1.0),
            ParamHint::new("W").min(0.0).max(0.3),
            ParamHint::new("S").min(0.0).max(1.0),
            ParamHint::new("L").min(0.0).max(1.0),
            ParamHint::new("f_c").value(0.0).min(-1.0).max(1.0).fixed(),
            ParamHint::new("f_s").value(0.0).min(-1.0).max(1.0).fixed(),
            ParamHint::new("a_c").value(0.0).min(0.0).fixed(),
        ]
    }

    fn derived(&self) -> Vec<T> {
        let k = self.d.sqrt();
        let a_r = T::two() / (T::PI() * self.w * ((T::one() - self.s) / k).sqrt());
        vec![
            k,
            self.l / self.d,
            a_r,
            stellar_density(a_r, self.p),
            impact_parameter_squared(k, self.s).sqrt(),
        ]
    }
}
