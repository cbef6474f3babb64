//! Forward and inverse kinematics of the two-arm pantograph
//!
//! Motor angles are measured in degrees from a perpendicular reference
//! line on the robot body. The right motor uses a mirrored convention:
//! its effective angle is `180 - right_deg`. Each close arm pivots at
//! its motor, offset outward by half the motor spacing; the pen tip sits
//! where the two far-arm circles intersect, on the drawing side of the
//! pivots (y >= 0).

use crate::solver::strategies;
use pantokit_core::{
    intersect_circles, AnglePair, ConvergenceError, GeometryError, MechanismConfig, Point, Result,
};
use tracing::debug;

/// Initial guess for the inverse-kinematics search, a typical pen-down
/// arm configuration.
pub const INITIAL_GUESS: [f64; 2] = [45.0, 135.0];

/// Convergence tolerance on the squared-distance objective.
pub const TOLERANCE: f64 = 1e-6;

/// Objective score for angle pairs with no physical realization. The
/// optimizer probes infeasible regions while searching; those probes
/// must score poorly rather than abort the search.
const INFEASIBLE_SCORE: f64 = 1e12;

/// Computes the pen position for a pair of motor angles.
///
/// # Errors
///
/// Propagates [`GeometryError::NoIntersection`] when the far arms cannot
/// meet, and returns [`GeometryError::NoValidTarget`] when neither
/// intersection candidate lies on the drawing side of the pivots.
pub fn forward(angles: AnglePair, config: &MechanismConfig) -> std::result::Result<Point, GeometryError> {
    forward_f64(angles.left_deg as f64, angles.right_deg as f64, config)
}

fn forward_f64(
    left_deg: f64,
    right_deg: f64,
    config: &MechanismConfig,
) -> std::result::Result<Point, GeometryError> {
    let left_rad = left_deg.to_radians();
    let right_rad = (180.0 - right_deg).to_radians();

    let left_pivot = Point::new(
        -config.motor_space / 2.0 - left_rad.cos() * config.left_close_arm,
        left_rad.sin() * config.left_close_arm,
    );
    let right_pivot = Point::new(
        config.motor_space / 2.0 + right_rad.cos() * config.right_close_arm,
        right_rad.sin() * config.right_close_arm,
    );

    let (first, second) = intersect_circles(
        left_pivot,
        config.left_far_arm,
        right_pivot,
        config.right_far_arm,
    )?;

    // First candidate with y >= 0 wins; candidate order comes from the
    // intersection primitive and is part of the mechanism's behavior.
    if first.y >= 0.0 {
        Ok(first)
    } else if second.y >= 0.0 {
        Ok(second)
    } else {
        Err(GeometryError::NoValidTarget)
    }
}

/// Recovers the motor angles that place the pen at `target`.
///
/// Minimizes the squared distance between `forward` of a candidate pair
/// and the target, starting from [`INITIAL_GUESS`], trying each solver
/// strategy in order until one converges.
///
/// # Errors
///
/// Returns a [`ConvergenceError`] carrying the target and the attempted
/// strategy names when every strategy fails to meet the tolerance.
pub fn inverse(target: Point, config: &MechanismConfig) -> Result<AnglePair> {
    let mut objective = |angles: [f64; 2]| match forward_f64(angles[0], angles[1], config) {
        Ok(p) => (p.x - target.x).powi(2) + (p.y - target.y).powi(2),
        Err(_) => INFEASIBLE_SCORE,
    };

    let mut attempted = Vec::new();
    for solver in strategies() {
        attempted.push(solver.name());
        let outcome = solver.minimize(&mut objective, INITIAL_GUESS, TOLERANCE);
        debug!(
            strategy = solver.name(),
            converged = outcome.converged,
            value = outcome.value,
            evaluations = outcome.evaluations,
            "inverse kinematics attempt"
        );
        if outcome.converged && outcome.value < INFEASIBLE_SCORE {
            return Ok(AnglePair::new(outcome.x[0] as f32, outcome.x[1] as f32));
        }
    }

    Err(ConvergenceError {
        x: target.x,
        y: target.y,
        strategies: attempted,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config() -> MechanismConfig {
        MechanismConfig::default()
    }

    #[test]
    fn forward_symmetric_pose_lands_on_center_line() {
        // (45, 135) is mirror-symmetric, so the pen sits on x = 0.
        let p = forward(AnglePair::new(45.0, 135.0), &config()).unwrap();
        assert!(p.x.abs() < 1e-9);
        assert!(p.y > 0.0);
    }

    #[test]
    fn forward_is_deterministic() {
        let angles = AnglePair::new(43.12949752807617, 89.9292221069336);
        let a = forward(angles, &config()).unwrap();
        let b = forward(angles, &config()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn forward_rejects_unreachable_pose() {
        // Arms folded far enough apart that the far circles cannot meet.
        let narrow = MechanismConfig {
            left_far_arm: 1.0,
            right_far_arm: 1.0,
            ..config()
        };
        let err = forward(AnglePair::new(45.0, 135.0), &narrow).unwrap_err();
        assert!(matches!(err, GeometryError::NoIntersection { .. }));
    }

    #[test]
    fn forward_rejects_target_above_pivots() {
        // Close arms angled upward put both intersection candidates at
        // y < 0 (above the motors).
        let err = forward(AnglePair::new(-60.0, 240.0), &config()).unwrap_err();
        assert!(matches!(err, GeometryError::NoValidTarget));
    }

    #[test]
    fn inverse_recovers_initial_guess_pose() {
        let original = AnglePair::new(45.0, 135.0);
        let target = forward(original, &config()).unwrap();
        let recovered = inverse(target, &config()).unwrap();
        assert!((recovered.left_deg - 45.0).abs() < 0.01);
        assert!((recovered.right_deg - 135.0).abs() < 0.01);
    }

    #[test]
    fn inverse_recovers_reference_pose() {
        // Values observed in the reference device's self test.
        let original = AnglePair::new(43.12949752807617, 89.9292221069336);
        let target = forward(original, &config()).unwrap();
        let recovered = inverse(target, &config()).unwrap();
        assert!((recovered.left_deg - original.left_deg).abs() < 0.01);
        assert!((recovered.right_deg - original.right_deg).abs() < 0.01);
    }

    #[test]
    fn inverse_fails_for_unreachable_target() {
        // Far outside the workspace of 22 cm arms.
        let err = inverse(Point::new(500.0, 500.0), &config()).unwrap_err();
        assert!(err.is_convergence_error());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn angle_round_trip_within_workspace(
            left in 35.0f32..55.0,
            right in 125.0f32..145.0,
        ) {
            let original = AnglePair::new(left, right);
            let target = forward(original, &config()).unwrap();
            let recovered = inverse(target, &config()).unwrap();
            prop_assert!((recovered.left_deg - left).abs() < 0.01);
            prop_assert!((recovered.right_deg - right).abs() < 0.01);
        }
    }
}
