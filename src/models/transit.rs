use crate::kernel::qpower2;
use crate::limb_darkening::H1H2;
use crate::models::model::*;

use ndarray::Zip;

macro_const! {
    const DOC: &str = r#"
Transit of a limb-darkened star by an opaque spherical planet

Limb darkening follows the power-2 law $I(\mu) = 1 - c (1 - \mu^\alpha)$, the light curve is
computed with the qpower2 approximation, which is accurate for radius ratio $k \lesssim 0.3$.
Depth, width and shape of the transit are parametrised as

- $D = k^2$,
- $W = \frac{R_\star}{a} \frac{\sqrt{(1 + k)^2 - b^2}}{\pi}$, transit duration in units of the
  period,
- $S = \frac{(1 - k)^2 - b^2}{(1 + k)^2 - b^2}$, approximately the squared ratio of the
  durations of the flat part and of the whole transit,

where $b = a \cos i / R_\star$ is the impact parameter. Eccentricity and longitude of
periastron are parametrised by $f_c = \sqrt{e} \cos\omega$ and $f_s = \sqrt{e} \sin\omega$,
limb darkening by $h_1 = I(1/2)$ and $h_2 = I(1/2) - I(0)$.

Flux out of transit is unity. The model is unity everywhere if the parameters correspond to
no physical configuration or $k > 1/2$.

Derived parameters: $k$, $b$, $a / R_\star$ and mean stellar density in solar units
$\rho = 0.013418 (a / R_\star)^3 / P^2$ for period in days.

Requires orbit geometry.
"#;
}

#[doc = DOC!()]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TransitModel<T> {
    pub t_0: T,
    pub p: T,
    pub d: T,
    pub w: T,
    pub s: T,
    pub f_c: T,
    pub f_s: T,
    pub h_1: T,
    pub h_2: T,
}

impl<T> TransitModel<T>
where
    T: Float,
{
    pub const fn doc() -> &'static str {
        DOC
    }

    fn radius_ratio(&self) -> T {
        self.d.sqrt()
    }

    fn impact_parameter(&self) -> T {
        impact_parameter_squared(self.radius_ratio(), self.s).sqrt()
    }

    fn scaled_semi_major_axis(&self) -> T {
        let k = self.radius_ratio();
        ((T::one() + k).powi(2) - self.impact_parameter().powi(2)).sqrt() / (self.w * T::PI())
    }
}

impl<T> Default for TransitModel<T>
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
            f_c: T::zero(),
            f_s: T::zero(),
            h_1: T::from_f64_literal(0.7),
            h_2: T::from_f64_literal(0.3),
        }
    }
}

impl<T> ModelPropsTrait for TransitModel<T>
where
    T: Float,
{
    fn name(&self) -> &'static str {
        "transit"
    }

    fn names(&self) -> Vec<&'static str> {
        vec!["T_0", "P", "D", "W", "S", "f_c", "f_s", "h_1", "h_2"]
    }

    fn descriptions(&self) -> Vec<&'static str> {
        vec![
            "time of mid-transit",
            "orbital period",
            "transit depth, squared planet-star radius ratio",
            "transit width in units of the orbital period",
            "transit shape parameter",
            "square root of eccentricity times cosine of the longitude of periastron",
            "square root of eccentricity times sine of the longitude of periastron",
            "stellar intensity at mu = 1/2",
            "difference of stellar intensities at mu = 1/2 and mu = 0",
        ]
    }

    fn derived_names(&self) -> Vec<&'static str> {
        vec!["k", "b", "aR", "rho"]
    }
}

impl<T> ModelTrait<T> for TransitModel<T>
where
    T: Float,
{
    fn eval(&self, input: &ModelInput<'_, T>) -> Result<Array1<T>, ModelError> {
        let geometry = input.geometry(self.name())?;
        let t = input.t();

        let ld = H1H2::new(self.h_1, self.h_2);
        let shape = match TransitShape::from_dws(self.d, self.w, self.s) {
            Some(shape) if ld.is_valid() => shape,
            _ => {
                log::debug!("transit parameters {self:?} are unphysical, the model is flat");
                return Ok(Array1::ones(t.len()));
            }
        };

        let orbit = OrbitElements::from_f_c_f_s(self.t_0, self.p, shape.sini, self.f_c, self.f_s);
        let mut sep = geometry.sky_separation(t, &orbit, shape.r_star);
        Zip::from(&mut sep.z)
            .and(&sep.behind_star)
            .for_each(|z, &behind_star| {
                if behind_star {
                    *z = T::hidden_separation();
                }
            });
        let law = ld.to_power2();
        Ok(qpower2(&sep.z, shape.k, law.c, law.alpha))
    }

    fn params(&self) -> Vec<T> {
        vec![
            self.t_0, self.p, self.d, self.w, self.s, self.f_c, self.f_s, self.h_1, self.h_2,
        ]
    }

    fn param_hints(&self) -> Vec<ParamHint<T>> {
        vec![
            ParamHint::new("T_0"),
            ParamHint::new("P").min(1e-15),
            ParamHint::new("D").min(0.0).max(1.0),
            ParamHint::new("W").min(0.0).max(0.3),
            ParamHint::new("S").min(0.0).max(1.0),
            ParamHint::new("f_c").value(0.0).min(-1.0).max(1.0),
            ParamHint::new("f_s").value(0.0).min(-1.0).max(1.0),
            ParamHint::new("h_1").min(0.0).max(1.0),
            ParamHint::new("h_2").min(0.0).max(1.0),
        ]
    }

    fn derived(&self) -> Vec<T> {
        let a_r = self.scaled_semi_major_axis();
        vec![
            self.radius_ratio(),
            self.impact_parameter(),
            a_r,
            stellar_density(a_r, self.p),
        ]
    }
}
