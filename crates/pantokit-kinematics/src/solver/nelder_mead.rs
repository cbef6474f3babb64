//! Nelder-Mead downhill simplex minimization.

use super::{SolveOutcome, Solver};

// Standard simplex coefficients.
const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

// Relative and absolute perturbations for the initial simplex.
const NONZERO_DELTA: f64 = 0.05;
const ZERO_DELTA: f64 = 0.00025;

/// Nelder-Mead downhill simplex over two variables.
///
/// Terminates when the simplex has collapsed below the tolerance in
/// both coordinates and objective values, or when the evaluation cap is
/// reached. The cap only bounds divergent searches; convergent inputs
/// finish well under it.
#[derive(Debug, Clone, Copy)]
pub struct NelderMead {
    /// Maximum number of objective evaluations.
    pub max_evaluations: usize,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            max_evaluations: 400,
        }
    }
}

impl Solver for NelderMead {
    fn name(&self) -> &'static str {
        "nelder-mead"
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

        // Initial simplex: x0 plus one perturbed vertex per coordinate.
        let mut simplex: Vec<([f64; 2], f64)> = Vec::with_capacity(3);
        let f0 = eval(x0, &mut evaluations);
        simplex.push((x0, f0));
        for i in 0..2 {
            let mut v = x0;
            if v[i] != 0.0 {
                v[i] *= 1.0 + NONZERO_DELTA;
            } else {
                v[i] = ZERO_DELTA;
            }
            let fv = eval(v, &mut evaluations);
            simplex.push((v, fv));
        }

        let mut converged = false;
        while evaluations < self.max_evaluations {
            simplex.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
            let (best, worst) = (simplex[0], simplex[2]);

            let x_spread = simplex[1..]
                .iter()
                .map(|(v, _)| (v[0] - best.0[0]).abs().max((v[1] - best.0[1]).abs()))
                .fold(0.0f64, f64::max);
            let f_spread = (simplex[1].1 - best.1).abs().max((worst.1 - best.1).abs());
            if x_spread <= tol && f_spread <= tol {
                converged = true;
                break;
            }

            // Centroid of all vertices but the worst.
            let centroid = [
                (simplex[0].0[0] + simplex[1].0[0]) / 2.0,
                (simplex[0].0[1] + simplex[1].0[1]) / 2.0,
            ];

            let along = |coef: f64| {
                [
                    centroid[0] + coef * (centroid[0] - worst.0[0]),
                    centroid[1] + coef * (centroid[1] - worst.0[1]),
                ]
            };

            let reflected = along(REFLECT);
            let f_reflected = eval(reflected, &mut evaluations);

            if f_reflected < best.1 {
                let expanded = along(EXPAND);
                let f_expanded = eval(expanded, &mut evaluations);
                simplex[2] = if f_expanded < f_reflected {
                    (expanded, f_expanded)
                } else {
                    (reflected, f_reflected)
                };
            } else if f_reflected < simplex[1].1 {
                simplex[2] = (reflected, f_reflected);
            } else {
                // Contract toward the better of worst and reflected.
                let (contracted, f_contracted) = if f_reflected < worst.1 {
                    let outside = along(CONTRACT);
                    let f = eval(outside, &mut evaluations);
                    (outside, f)
                } else {
                    let inside = along(-CONTRACT);
                    let f = eval(inside, &mut evaluations);
                    (inside, f)
                };

                if f_contracted < worst.1.min(f_reflected) {
                    simplex[2] = (contracted, f_contracted);
                } else {
                    // Shrink everything toward the best vertex.
                    for i in 1..3 {
                        let v = [
                            best.0[0] + SHRINK * (simplex[i].0[0] - best.0[0]),
                            best.0[1] + SHRINK * (simplex[i].0[1] - best.0[1]),
                        ];
                        let fv = eval(v, &mut evaluations);
                        simplex[i] = (v, fv);
                    }
                }
            }
        }

        simplex.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        SolveOutcome {
            x: simplex[0].0,
            value: simplex[0].1,
            evaluations,
            converged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_on_offset_quadratic() {
        let solver = NelderMead::default();
        let mut f = |x: [f64; 2]| (x[0] - 1.5).powi(2) + 2.0 * (x[1] - 0.5).powi(2);
        let outcome = solver.minimize(&mut f, [10.0, -10.0], 1e-6);
        assert!(outcome.converged);
        assert!((outcome.x[0] - 1.5).abs() < 1e-3);
        assert!((outcome.x[1] - 0.5).abs() < 1e-3);
        assert!(outcome.value < 1e-6);
    }

    #[test]
    fn handles_valley_objective() {
        // A mildly ill-conditioned valley, much tamer than Rosenbrock
        // but enough to exercise contraction and shrink steps.
        let solver = NelderMead::default();
        let mut f = |x: [f64; 2]| 100.0 * (x[1] - x[0]).powi(2) + (1.0 - x[0]).powi(2);
        let outcome = solver.minimize(&mut f, [-1.0, 1.0], 1e-6);
        assert!(outcome.converged);
        assert!((outcome.x[0] - 1.0).abs() < 1e-2);
        assert!((outcome.x[1] - 1.0).abs() < 1e-2);
    }

    #[test]
    fn evaluation_cap_reports_failure() {
        let solver = NelderMead {
            max_evaluations: 10,
        };
        let mut f = |x: [f64; 2]| (x[0] - 1000.0).powi(2) + (x[1] - 1000.0).powi(2);
        let outcome = solver.minimize(&mut f, [0.0, 0.0], 1e-6);
        assert!(!outcome.converged);
        assert!(outcome.evaluations <= 12);
    }
}
