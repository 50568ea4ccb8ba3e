//! Unit-to-world scaling and camera auto-framing.
//!
//! The dataset positions live in unit space; one shared scale factor
//! converts them to world units. Every subsystem that touches positions
//! (scene building, picking, the highlight marker, trajectory lines,
//! camera targets) goes through the same constant so they agree on world
//! space.

use glam::Vec3;

/// Unit-space to world-space scale factor.
pub const WORLD_SCALE: f32 = 100.0;

/// Far plane as a multiple of the bounding diagonal.
const FAR_FACTOR: f32 = 2.0;

/// Camera standoff along +Z as a multiple of the bounding diagonal.
const EYE_FACTOR: f32 = 0.4;

/// Camera placement derived from the point cloud's bounding volume.
///
/// Computed once at bootstrap and never again: the dataset is static for
/// the session, so there is no live re-centering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    /// Centroid of the cloud's axis-aligned bounding box ("galaxy center").
    pub center: Vec3,
    /// Length of the bounding box diagonal.
    pub diagonal: f32,
    /// Initial camera position: `center + (0, 0, 0.4 × diagonal)`.
    pub eye: Vec3,
    /// Camera far plane: `2 × diagonal`.
    pub far: f32,
}

impl Default for Framing {
    /// Fallback framing for an empty cloud: the pre-framing bootstrap
    /// values, an eye at `(0, 0, 100)` with a 2000-unit far plane.
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            diagonal: 0.0,
            eye: Vec3::new(0.0, 0.0, 100.0),
            far: 2000.0,
        }
    }
}

impl Framing {
    /// Frame a cloud of world-space points.
    ///
    /// The whole cloud ends up inside the frustum regardless of dataset
    /// scale: the eye stands off the center by a fraction of the bounding
    /// diagonal while the far plane extends to twice the diagonal.
    pub fn compute(world_points: &[Vec3]) -> Self {
        let Some(&first) = world_points.first() else {
            return Self::default();
        };

        let mut min = first;
        let mut max = first;
        for &p in &world_points[1..] {
            min = min.min(p);
            max = max.max(p);
        }

        let center = (min + max) * 0.5;
        let diagonal = (max - min).length();
        if diagonal <= f32::EPSILON {
            // Degenerate cloud (one point, or all coincident): keep the
            // fallback standoff so the camera is not placed on the point.
            let fallback = Self::default();
            return Self {
                center,
                diagonal: 0.0,
                eye: center + Vec3::new(0.0, 0.0, fallback.eye.z),
                far: fallback.far,
            };
        }

        Self {
            center,
            diagonal,
            eye: center + Vec3::new(0.0, 0.0, EYE_FACTOR * diagonal),
            far: FAR_FACTOR * diagonal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_point_cloud_fits_in_far_plane() {
        // Two unit-space points at (-1,0,0) and (1,0,0), scaled to world.
        let points = vec![
            Vec3::new(-1.0, 0.0, 0.0) * WORLD_SCALE,
            Vec3::new(1.0, 0.0, 0.0) * WORLD_SCALE,
        ];
        let framing = Framing::compute(&points);

        assert_eq!(framing.center, Vec3::ZERO);
        assert!((framing.diagonal - 200.0).abs() < 1e-3);
        assert!((framing.far - 400.0).abs() < 1e-3);
        assert_eq!(framing.eye, Vec3::new(0.0, 0.0, 80.0));

        // Both points must be within the far plane of the derived eye.
        for p in &points {
            assert!(framing.eye.distance(*p) < framing.far);
        }
    }

    #[test]
    fn test_empty_cloud_uses_fallback() {
        let framing = Framing::compute(&[]);
        assert_eq!(framing, Framing::default());
        assert_eq!(framing.eye, Vec3::new(0.0, 0.0, 100.0));
        assert_eq!(framing.far, 2000.0);
    }

    #[test]
    fn test_single_point_keeps_standoff() {
        let framing = Framing::compute(&[Vec3::new(30.0, -10.0, 5.0)]);
        assert_eq!(framing.center, Vec3::new(30.0, -10.0, 5.0));
        assert!(framing.eye.distance(framing.center) >= 100.0);
    }

    #[test]
    fn test_center_is_box_center_not_mean() {
        // Three points skewed toward the origin; the box center ignores
        // the distribution and uses the extremes only.
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
        ];
        let framing = Framing::compute(&points);
        assert_eq!(framing.center, Vec3::new(5.0, 0.0, 0.0));
    }
}
