//! Circle–circle intersection primitive
//!
//! Pure 2D geometry with no knowledge of the pantograph: the kinematics
//! model builds on this to locate the pen tip where the two far-arm
//! circles meet.

use crate::error::GeometryError;
use crate::types::Point;

/// Computes the up-to-two intersection points of two circles.
///
/// Uses the standard construction: the foot of the perpendicular
/// bisector on the line joining the centers, offset along the
/// perpendicular by the half-chord length.
///
/// The candidates are returned in a fixed order: first the point offset
/// in the `(-dy, dx)` perpendicular direction, then its mirror. Callers
/// that prefer one side of the center line rely on this order.
///
/// When the circles are tangent (`d == r1 + r2` or `d == |r1 - r2|`) the
/// two returned points coincide; that is a valid result, not an error.
///
/// # Errors
///
/// Returns [`GeometryError::NoIntersection`] when the circles are too
/// far apart (`d > r1 + r2`) or one contains the other (`d < |r1 - r2|`).
pub fn intersect_circles(
    c1: Point,
    r1: f64,
    c2: Point,
    r2: f64,
) -> Result<(Point, Point), GeometryError> {
    let dx = c2.x - c1.x;
    let dy = c2.y - c1.y;
    let d = (dx * dx + dy * dy).sqrt();

    if d > r1 + r2 || d < (r1 - r2).abs() {
        return Err(GeometryError::NoIntersection {
            distance: d,
            r1,
            r2,
        });
    }

    // Distance from c1 to the chord midpoint along the center line.
    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    // Half-chord length; clamp guards tiny negative values at tangency.
    let h = (r1 * r1 - a * a).max(0.0).sqrt();

    let mid = Point::new(c1.x + dx * a / d, c1.y + dy * a / d);

    let perp_x = -dy * (h / d);
    let perp_y = dx * (h / d);

    Ok((
        Point::new(mid.x + perp_x, mid.y + perp_y),
        Point::new(mid.x - perp_x, mid.y - perp_y),
    ))
}
