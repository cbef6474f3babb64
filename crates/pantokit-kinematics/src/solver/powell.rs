//! Powell direction-set minimization.

use super::{SolveOutcome, Solver};

const GOLD: f64 = 1.618033988749895;
const INV_GOLD: f64 = 0.618033988749895;
const BRACKET_STEPS: usize = 50;
const SECTION_STEPS: usize = 80;

/// Powell's conjugate direction method over two variables.
///
/// Each outer iteration line-minimizes along every direction in the
/// current set, then replaces the direction of largest decrease with the
/// overall displacement and minimizes along it. Line minimization is a
/// golden-section search on a bracketed interval, so no derivatives are
/// required.
#[derive(Debug, Clone, Copy)]
pub struct Powell {
    /// Maximum number of outer iterations.
    pub max_iterations: usize,
}

impl Default for Powell {
    fn default() -> Self {
        Self {
            max_iterations: 200,
        }
    }
}

impl Solver for Powell {
    fn name(&self) -> &'static str {
        "powell"
    }

    fn minimize(
        &self,
        objective: &mut dyn FnMut([f64; 2]) -> f64,
        x0: [f64; 2],
        tol: f64,
    ) -> SolveOutcome {
        let mut evaluations = 0usize;
        let mut eval = |x: [f64; 2], count: &mut usize| {
            *count += 1;
            objective(x)
        };

        let mut x = x0;
        let mut fx = eval(x, &mut evaluations);
        let mut directions: [[f64; 2]; 2] = [[1.0, 0.0], [0.0, 1.0]];
        let mut converged = false;

        for _ in 0..self.max_iterations {
            let x_start = x;
            let f_start = fx;
            let mut biggest_drop = 0.0f64;
            let mut biggest_index = 0usize;

            for (i, dir) in directions.iter().enumerate() {
                let f_before = fx;
                let (next, f_next) =
                    line_minimize(&mut eval, &mut evaluations, x, *dir, tol);
                // Accept only descent; the line search can land badly on
                // non-unimodal slices through infeasible regions.
                if f_next < fx {
                    x = next;
                    fx = f_next;
                }
                if f_before - fx > biggest_drop {
                    biggest_drop = f_before - fx;
                    biggest_index = i;
                }
            }

            if 2.0 * (f_start - fx) <= tol * (f_start.abs() + fx.abs()) + f64::EPSILON {
                converged = true;
                break;
            }

            // Replace the direction of largest decrease with the overall
            // displacement of this iteration and minimize along it.
            let displacement = [x[0] - x_start[0], x[1] - x_start[1]];
            let norm = (displacement[0].powi(2) + displacement[1].powi(2)).sqrt();
            if norm > 0.0 {
                let new_dir = [displacement[0] / norm, displacement[1] / norm];
                directions[biggest_index] = directions[1];
                directions[1] = new_dir;
                let (next, f_next) =
                    line_minimize(&mut eval, &mut evaluations, x, new_dir, tol);
                if f_next < fx {
                    x = next;
                    fx = f_next;
                }
            }
        }

        SolveOutcome {
            x,
            value: fx,
            evaluations,
            converged,
        }
    }
}

/// Minimize along `x + t * dir` for scalar `t`.
fn line_minimize(
    eval: &mut impl FnMut([f64; 2], &mut usize) -> f64,
    evaluations: &mut usize,
    x: [f64; 2],
    dir: [f64; 2],
    tol: f64,
) -> ([f64; 2], f64) {
    let mut f1d = |t: f64, count: &mut usize| {
        eval([x[0] + t * dir[0], x[1] + t * dir[1]], count)
    };

    let (a, c) = bracket(&mut f1d, evaluations);
    let (t, ft) = golden_section(&mut f1d, evaluations, a, c, tol);
    ([x[0] + t * dir[0], x[1] + t * dir[1]], ft)
}

/// Expand downhill from t = 0 until the objective rises again, yielding
/// an interval that contains a minimizer.
fn bracket(
    f: &mut impl FnMut(f64, &mut usize) -> f64,
    evaluations: &mut usize,
) -> (f64, f64) {
    let mut a = 0.0;
    let mut b = 1.0;
    let mut fa = f(a, evaluations);
    let mut fb = f(b, evaluations);

    if fb > fa {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }

    let mut c = b + GOLD * (b - a);
    let mut fc = f(c, evaluations);
    let mut steps = 0;
    while fc < fb && steps < BRACKET_STEPS {
        let d = c + GOLD * (c - b);
        let fd = f(d, evaluations);
        a = b;
        b = c;
        fb = fc;
        c = d;
        fc = fd;
        steps += 1;
    }

    if a <= c {
        (a, c)
    } else {
        (c, a)
    }
}

/// Golden-section search over `[a, b]`.
fn golden_section(
    f: &mut impl FnMut(f64, &mut usize) -> f64,
    evaluations: &mut usize,
    mut a: f64,
    mut b: f64,
    tol: f64,
) -> (f64, f64) {
    let mut c = b - INV_GOLD * (b - a);
    let mut d = a + INV_GOLD * (b - a);
    let mut fc = f(c, evaluations);
    let mut fd = f(d, evaluations);

    for _ in 0..SECTION_STEPS {
        if (b - a).abs() <= tol * (a.abs() + b.abs()).max(1.0) * 1e-2 {
            break;
        }
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INV_GOLD * (b - a);
            fc = f(c, evaluations);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INV_GOLD * (b - a);
            fd = f(d, evaluations);
        }
    }

    if fc < fd {
        (c, fc)
    } else {
        (d, fd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_on_offset_quadratic() {
        let solver = Powell::default();
        let mut f = |x: [f64; 2]| (x[0] + 4.0).powi(2) + 3.0 * (x[1] - 7.0).powi(2);
        let outcome = solver.minimize(&mut f, [0.0, 0.0], 1e-6);
        assert!(outcome.converged);
        assert!((outcome.x[0] + 4.0).abs() < 1e-3);
        assert!((outcome.x[1] - 7.0).abs() < 1e-3);
    }

    #[test]
    fn converges_on_coupled_quadratic() {
        // Cross term forces the direction-set update to do real work.
        let solver = Powell::default();
        let mut f =
            |x: [f64; 2]| x[0].powi(2) + 2.0 * x[1].powi(2) + x[0] * x[1] - 4.0 * x[0] - 6.0 * x[1];
        let outcome = solver.minimize(&mut f, [5.0, 5.0], 1e-8);
        assert!(outcome.converged);
        // Minimum at (10/7, 8/7).
        assert!((outcome.x[0] - 10.0 / 7.0).abs() < 1e-3);
        assert!((outcome.x[1] - 8.0 / 7.0).abs() < 1e-3);
    }
}
