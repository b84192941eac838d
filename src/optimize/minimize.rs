use crate::float_trait::Float;

/// Three points `a < b < c` (or `a > b > c`) with `f(b)` not larger than `f(a)` and `f(c)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bracket<T> {
    pub a: T,
    pub b: T,
    pub c: T,
    pub fb: T,
}

/// Location and value of a minimum
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Minimum<T> {
    pub x: T,
    pub fx: T,
    pub iterations: usize,
}

/// Brent's derivative-free minimiser
///
/// Combines golden-section steps with parabolic interpolation and requires a [Bracket] of the
/// minimum. `tol` is the relative tolerance on the position of the minimum.
#[derive(Clone, Copy, Debug)]
pub struct BrentMinimizer<T> {
    pub tol: T,
    pub max_iterations: usize,
}

impl<T> Default for BrentMinimizer<T>
where
    T: Float,
{
    fn default() -> Self {
        let tol = T::from_f64_literal(1.48e-8);
        Self {
            // Double-precision tolerance is below the resolution of f32
            tol: if tol > T::epsilon() {
                tol
            } else {
                T::epsilon().sqrt()
            },
            max_iterations: 500,
        }
    }
}

impl<T> BrentMinimizer<T>
where
    T: Float,
{
    fn min_tol() -> T {
        T::from_f64_literal(1e-11)
    }

    fn golden() -> T {
        T::from_f64_literal(0.381_966_0)
    }

    pub fn minimize<F>(&self, mut func: F, bracket: Bracket<T>) -> Minimum<T>
    where
        F: FnMut(T) -> T,
    {
        let (mut a, mut b) = if bracket.a < bracket.c {
            (bracket.a, bracket.c)
        } else {
            (bracket.c, bracket.a)
        };
        let (mut x, mut w, mut v) = (bracket.b, bracket.b, bracket.b);
        let (mut fx, mut fw, mut fv) = (bracket.fb, bracket.fb, bracket.fb);

        let mut delta_x = T::zero();
        let mut rat = T::zero();
        let mut iterations = 0;
        while iterations < self.max_iterations {
            let tol1 = self.tol * x.abs() + Self::min_tol();
            let tol2 = T::two() * tol1;
            let x_mid = T::half() * (a + b);
            if (x - x_mid).abs() < tol2 - T::half() * (b - a) {
                break;
            }

            if delta_x.abs() <= tol1 {
                delta_x = if x >= x_mid { a - x } else { b - x };
                rat = Self::golden() * delta_x;
            } else {
                let tmp1 = (x - w) * (fx - fv);
                let tmp2 = (x - v) * (fx - fw);
                let mut p = (x - v) * tmp2 - (x - w) * tmp1;
                let mut denom = T::two() * (tmp2 - tmp1);
                if denom > T::zero() {
                    p = -p;
                }
                denom = denom.abs();
                let previous_delta_x = delta_x;
                delta_x = rat;
                if p > denom * (a - x)
                    && p < denom * (b - x)
                    && p.abs() < (T::half() * denom * previous_delta_x).abs()
                {
                    rat = p / denom;
                    let u = x + rat;
                    if (u - a) < tol2 || (b - u) < tol2 {
                        rat = if x_mid - x >= T::zero() { tol1 } else { -tol1 };
                    }
                } else {
                    delta_x = if x >= x_mid { a - x } else { b - x };
                    rat = Self::golden() * delta_x;
                }
            }

            let u = if rat.abs() < tol1 {
                if rat >= T::zero() { x + tol1 } else { x - tol1 }
            } else {
                x + rat
            };
            let fu = func(u);

            if fu > fx {
                if u < x {
                    a = u;
                } else {
                    b = u;
                }
                if fu <= fw || w == x {
                    v = w;
                    w = u;
                    fv = fw;
                    fw = fu;
                } else if fu <= fv || v == x || v == w {
                    v = u;
                    fv = fu;
                }
            } else {
                if u >= x {
                    a = x;
                } else {
                    b = x;
                }
                v = w;
                w = x;
                x = u;
                fv = fw;
                fw = fx;
                fx = fu;
            }
            iterations += 1;
        }
        if iterations == self.max_iterations {
            log::warn!(
                "Brent minimisation stopped after {} iterations at x = {x}",
                self.max_iterations
            );
        }

        Minimum { x, fx, iterations }
    }
}
