//! Pointer picking: resolve a camera ray to a point index.
//!
//! The cloud is rendered as raw points, so there is no mesh surface to
//! intersect. A point counts as hit when it sits within a small world-space
//! radius of the ray; of all hits, the one nearest along the ray (smallest
//! ray parameter, i.e. first in depth order) wins.

use glam::Vec3;

/// World-space hit radius around the ray, matched to the rendered star
/// sprite size.
pub const PICK_RADIUS: f32 = 1.5;

/// Find the point nearest along the ray within `radius`.
///
/// Points behind the ray origin never hit. Returns `None` when nothing is
/// within range — the caller is expected to leave its selection untouched
/// in that case.
pub fn pick_nearest(
    origin: Vec3,
    direction: Vec3,
    world_points: &[Vec3],
    radius: f32,
) -> Option<usize> {
    let direction = direction.normalize_or_zero();
    if direction == Vec3::ZERO {
        return None;
    }

    let mut best: Option<(f32, usize)> = None;
    for (index, &point) in world_points.iter().enumerate() {
        let to_point = point - origin;
        let t = to_point.dot(direction);
        if t <= 0.0 {
            continue;
        }
        let closest_on_ray = origin + direction * t;
        if closest_on_ray.distance(point) > radius {
            continue;
        }
        // Strict comparison keeps the earliest index on exact ties.
        if best.is_none_or(|(best_t, _)| t < best_t) {
            best = Some((t, index));
        }
    }

    best.map(|(_, index)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_along_ray_wins() {
        // Two points on the same ray; the closer one is the hit.
        let points = vec![Vec3::new(0.0, 0.0, -50.0), Vec3::new(0.0, 0.0, -10.0)];
        let hit = pick_nearest(Vec3::ZERO, Vec3::NEG_Z, &points, PICK_RADIUS);
        assert_eq!(hit, Some(1));
    }

    #[test]
    fn test_off_axis_point_within_radius() {
        let points = vec![Vec3::new(1.0, 0.0, -20.0)];
        assert_eq!(pick_nearest(Vec3::ZERO, Vec3::NEG_Z, &points, 1.5), Some(0));
        assert_eq!(pick_nearest(Vec3::ZERO, Vec3::NEG_Z, &points, 0.5), None);
    }

    #[test]
    fn test_miss_returns_none() {
        let points = vec![Vec3::new(100.0, 100.0, -100.0)];
        assert_eq!(
            pick_nearest(Vec3::ZERO, Vec3::NEG_Z, &points, PICK_RADIUS),
            None
        );
    }

    #[test]
    fn test_points_behind_origin_ignored() {
        let points = vec![Vec3::new(0.0, 0.0, 10.0)];
        assert_eq!(
            pick_nearest(Vec3::ZERO, Vec3::NEG_Z, &points, PICK_RADIUS),
            None
        );
    }

    #[test]
    fn test_empty_cloud() {
        assert_eq!(pick_nearest(Vec3::ZERO, Vec3::NEG_Z, &[], PICK_RADIUS), None);
    }

    #[test]
    fn test_zero_direction_is_a_miss() {
        let points = vec![Vec3::ZERO];
        assert_eq!(pick_nearest(Vec3::ONE, Vec3::ZERO, &points, 10.0), None);
    }
}
