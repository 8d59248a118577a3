//! Additional math helpers layered on top of `glam`.

use glam::Vec2;

/// Closest point to `point` on the segment `a`-`b`.
///
/// A zero-length segment collapses to `a`.
pub fn closest_point_on_segment(point: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let length_sq = ab.length_squared();
    if length_sq <= f32::EPSILON * f32::EPSILON {
        return a;
    }
    let t = ((point - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Clamps each component of `point` into `[0, extent]`. The lower edge is
/// applied first, so a negative extent pins the component to `extent`.
pub fn clamp_to_rect(point: Vec2, extent: Vec2) -> Vec2 {
    Vec2::new(point.x.max(0.0).min(extent.x), point.y.max(0.0).min(extent.y))
}
