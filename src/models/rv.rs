use crate::models::model::*;

macro_const! {
    const DOC: &str = r#"
Radial velocity in a Keplerian orbit

$V_0$ is the radial velocity of the centre of mass and $K$ the semi-amplitude of the
spectroscopic orbit. By default the velocity of the primary star is modelled, set
`primary = false` to model its companion. $T_0$ is the time of inferior conjunction of the
companion, i.e. mid-transit for a transiting planet.

Derived parameters: eccentricity $e = f_c^2 + f_s^2$ and longitude of periastron
$\omega = \mathrm{atan2}(f_s, f_c)$ in degrees.

Requires orbit geometry.
"#;
}

fn default_primary() -> bool {
    true
}

#[doc = DOC!()]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RvModel<T> {
    pub t_0: T,
    pub p: T,
    pub v_0: T,
    pub k: T,
    pub f_c: T,
    pub f_s: T,
    pub sini: T,
    #[serde(default = "default_primary")]
    pub primary: bool,
}

impl<T> RvModel<T>
where
    T: Float,
{
    /// Radial velocity of the companion rather than of the primary star
    pub fn companion(self) -> Self {
        Self {
            primary: false,
            ..self
        }
    }

    pub const fn doc() -> &'static str {
        DOC
    }

    fn orbit(&self) -> OrbitElements<T> {
        OrbitElements::from_f_c_f_s(self.t_0, self.p, self.sini, self.f_c, self.f_s)
    }
}

impl<T> Default for RvModel<T>
where
    T: Float,
{
    fn default() -> Self {
        Self {
            t_0: T::zero(),
            p: T::one(),
            v_0: T::zero(),
            k: T::one(),
            f_c: T::zero(),
            f_s: T::zero(),
            sini: T::one(),
            primary: default_primary(),
        }
    }
}

impl<T> ModelPropsTrait for RvModel<T>
where
    T: Float,
{
    fn name(&self) -> &'static str {
        if self.primary { "rv" } else { "rv_companion" }
    }

    fn names(&self) -> Vec<&'static str> {
        vec!["T_0", "P", "V_0", "K", "f_c", "f_s", "sini"]
    }

    fn descriptions(&self) -> Vec<&'static str> {
        vec![
            "time of inferior conjunction of the companion",
            "orbital period",
            "radial velocity of the centre of mass",
            "semi-amplitude of the spectroscopic orbit",
            "square root of eccentricity times cosine of the longitude of periastron",
            "square root of eccentricity times sine of the longitude of periastron",
            "sine of the orbital inclination",
        ]
    }

    fn derived_names(&self) -> Vec<&'static str> {
        vec!["e", "omega"]
    }
}

impl<T> ModelTrait<T> for RvModel<T>
where
    T: Float,
{
    fn eval(&self, input: &ModelInput<'_, T>) -> Result<Array1<T>, ModelError> {
        let geometry = input.geometry(self.name())?;
        let rv = geometry.radial_velocity(input.t(), &self.orbit(), self.k, self.primary);
        Ok(rv + self.v_0)
    }

    fn params(&self) -> Vec<T> {
        vec![
            self.t_0, self.p, self.v_0, self.k, self.f_c, self.f_s, self.sini,
        ]
    }

    fn param_hints(&self) -> Vec<ParamHint<T>> {
        vec![
            ParamHint::new("T_0"),
            ParamHint::new("P").min(1e-15),
            ParamHint::new("V_0"),
            ParamHint::new("K").min(1e-15),
            ParamHint::new("f_c").value(0.0).min(-1.0).max(1.0).fixed(),
            ParamHint::new("f_s").value(0.0).min(-1.0).max(1.0).fixed(),
            ParamHint::new("sini").value(1.0).min(0.0).max(1.0).fixed(),
        ]
    }

    fn derived(&self) -> Vec<T> {
        let orbit = self.orbit();
        vec![orbit.ecc, orbit.omega]
    }
}
