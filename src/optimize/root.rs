use crate::error::FitError;
use crate::float_trait::Float;

/// Brent's bracketed root finder
///
/// Finds a zero of `f` on `[a, b]` where `f(a)` and `f(b)` have different signs, combining
/// bisection, secant and inverse quadratic extrapolation steps. The solution is accurate to
/// `xtol + rtol * |x|`.
#[derive(Clone, Copy, Debug)]
pub struct BrentRootFinder<T> {
    pub xtol: T,
    pub rtol: T,
    pub max_iterations: usize,
}

impl<T> Default for BrentRootFinder<T>
where
    T: Float,
{
    fn default() -> Self {
        Self {
            xtol: T::from_f64_literal(2e-12),
            rtol: T::four() * T::epsilon(),
            max_iterations: 100,
        }
    }
}

impl<T> BrentRootFinder<T>
where
    T: Float,
{
    pub fn find_root<F>(&self, mut func: F, a: T, b: T) -> Result<T, FitError>
    where
        F: FnMut(T) -> T,
    {
        let mut x_pre = a;
        let mut x_cur = b;
        let mut f_pre = func(x_pre);
        let mut f_cur = func(x_cur);
        if f_pre.is_zero() {
            return Ok(x_pre);
        }
        if f_cur.is_zero() {
            return Ok(x_cur);
        }
        if f_pre.is_sign_negative() == f_cur.is_sign_negative() {
            return Err(FitError::NoSignChange {
                a: a.to_f64_lossy(),
                b: b.to_f64_lossy(),
                fa: f_pre.to_f64_lossy(),
                fb: f_cur.to_f64_lossy(),
            });
        }

        // "blk" is the contrapoint: f(x_blk) has the sign opposite to f(x_cur)
        let mut x_blk = T::zero();
        let mut f_blk = T::zero();
        let mut s_pre = T::zero();
        let mut s_cur = T::zero();
        for _ in 0..self.max_iterations {
            if !f_pre.is_zero()
                && !f_cur.is_zero()
                && f_pre.is_sign_negative() != f_cur.is_sign_negative()
            {
                x_blk = x_pre;
                f_blk = f_pre;
                s_pre = x_cur - x_pre;
                s_cur = s_pre;
            }
            if f_blk.abs() < f_cur.abs() {
                x_pre = x_cur;
                x_cur = x_blk;
                x_blk = x_pre;

                f_pre = f_cur;
                f_cur = f_blk;
                f_blk = f_pre;
            }

            let delta = T::half() * (self.xtol + self.rtol * x_cur.abs());
            let s_bis = T::half() * (x_blk - x_cur);
            if f_cur.is_zero() || s_bis.abs() < delta {
                return Ok(x_cur);
            }

            if s_pre.abs() > delta && f_cur.abs() < f_pre.abs() {
                let s_try = if x_pre == x_blk {
                    // secant
                    -f_cur * (x_cur - x_pre) / (f_cur - f_pre)
                } else {
                    // inverse quadratic extrapolation
                    let d_pre = (f_pre - f_cur) / (x_pre - x_cur);
                    let d_blk = (f_blk - f_cur) / (x_blk - x_cur);
                    -f_cur * (f_blk * d_blk - f_pre * d_pre) / (d_blk * d_pre * (f_blk - f_pre))
                };
                if T::two() * s_try.abs() < s_pre.abs().min(T::three() * s_bis.abs() - delta) {
                    s_pre = s_cur;
                    s_cur = s_try;
                } else {
                    s_pre = s_bis;
                    s_cur = s_bis;
                }
            } else {
                s_pre = s_bis;
                s_cur = s_bis;
            }

            x_pre = x_cur;
            f_pre = f_cur;
            if s_cur.abs() > delta {
                x_cur += s_cur;
            } else if s_bis > T::zero() {
                x_cur += delta;
            } else {
                x_cur -= delta;
            }
            f_cur = func(x_cur);
        }

        Err(FitError::NotConverged {
            method: "Brent root finding",
            iterations: self.max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn square_root_of_two() {
        let root = BrentRootFinder::default()
            .find_root(|x: f64| x * x - 2.0, 0.0, 2.0)
            .unwrap();
        assert_abs_diff_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-11);
    }

    #[test]
    fn decreasing_function() {
        let root = BrentRootFinder::default()
            .find_root(|x: f64| (-x).exp() - 0.5, 0.0, 10.0)
            .unwrap();
        assert_abs_diff_eq!(root, std::f64::consts::LN_2, epsilon = 1e-11);
    }

    #[test]
    fn root_at_the_end_point() {
        let finder = BrentRootFinder::default();
        assert_eq!(finder.find_root(|x: f64| x - 1.0, 1.0, 3.0), Ok(1.0));
        assert_eq!(finder.find_root(|x: f64| x - 3.0, 1.0, 3.0), Ok(3.0));
    }

    #[test]
    fn no_sign_change() {
        let result = BrentRootFinder::default().find_root(|x: f64| x * x + 1.0, -1.0, 1.0);
        assert!(matches!(result, Err(FitError::NoSignChange { .. })));
    }

    #[test]
    fn iteration_limit() {
        let finder = BrentRootFinder {
            xtol: 0.0,
            rtol: 0.0,
            max_iterations: 3,
        };
        let result = finder.find_root(|x: f64| x.powi(3) - 0.3, 0.0, 1.0);
        assert_eq!(
            result,
            Err(FitError::NotConverged {
                method: "Brent root finding",
                iterations: 3
            })
        );
    }
}
