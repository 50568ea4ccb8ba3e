//! Orbit camera controls and the fly-to animation.
//!
//! The controller keeps a spherical orbit around a focus point with
//! velocity damping, so drags and scrolls coast to a stop. A fly-to
//! request animates the camera position toward a standoff point near the
//! target while the orbit controller keeps the camera aimed at its focus.

use bevy::ecs::message::MessageReader;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

/// Fraction of residual velocity removed each frame.
const DAMPING_FACTOR: f32 = 0.05;
/// Radians of orbit per pixel of drag.
const ROTATE_SENSITIVITY: f32 = 0.005;
/// Fractional radius change per scroll line.
const ZOOM_SENSITIVITY: f32 = 0.1;
/// Closest the orbit radius may get to the focus.
const MIN_RADIUS: f32 = 1.0;
/// Pitch limit keeping the camera off the poles.
const MAX_PITCH: f32 = 1.54;

/// Duration of the fly-to animation.
pub const FLY_DURATION_SECS: f32 = 0.8;
/// Standoff distance along +Z from the fly-to target.
pub const APPROACH_OFFSET: f32 = 20.0;

/// Plugin for camera navigation.
pub struct CameraControllerPlugin;

impl Plugin for CameraControllerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FlyTo>()
            .add_systems(Update, (orbit_input, advance_fly_to, orbit_update).chain());
    }
}

/// Orbit state for the main camera.
#[derive(Component)]
pub struct OrbitCamera {
    /// Point the camera orbits and looks at.
    pub focus: Vec3,
    yaw_velocity: f32,
    pitch_velocity: f32,
    zoom_velocity: f32,
}

impl OrbitCamera {
    pub fn new(focus: Vec3) -> Self {
        Self {
            focus,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_velocity: 0.0,
        }
    }
}

/// An in-flight camera animation toward a selected paper.
struct FlyToAnimation {
    start: Vec3,
    target: Vec3,
    elapsed: f32,
}

/// Pending or in-flight fly-to request. A new request replaces any
/// animation already in flight.
#[derive(Resource, Default)]
pub struct FlyTo {
    active: Option<FlyToAnimation>,
}

impl FlyTo {
    /// Start animating from `from` toward a standoff point near `point`.
    pub fn request(&mut self, from: Vec3, point: Vec3) {
        self.active = Some(FlyToAnimation {
            start: from,
            target: point + Vec3::new(0.0, 0.0, APPROACH_OFFSET),
            elapsed: 0.0,
        });
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Turn mouse input into orbit velocities.
fn orbit_input(
    mut contexts: EguiContexts,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: MessageReader<MouseMotion>,
    mut wheel: MessageReader<MouseWheel>,
    mut camera: Query<&mut OrbitCamera>,
) {
    let mut drag = Vec2::ZERO;
    for event in motion.read() {
        drag += event.delta;
    }
    let mut scroll = 0.0;
    for event in wheel.read() {
        scroll += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / 120.0,
        };
    }

    // Input over the side panel belongs to egui.
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.is_pointer_over_area() {
            return;
        }
    }

    let Ok(mut orbit) = camera.single_mut() else {
        return;
    };

    if buttons.pressed(MouseButton::Left) && drag != Vec2::ZERO {
        orbit.yaw_velocity -= drag.x * ROTATE_SENSITIVITY;
        orbit.pitch_velocity += drag.y * ROTATE_SENSITIVITY;
    }
    if scroll != 0.0 {
        orbit.zoom_velocity -= scroll * ZOOM_SENSITIVITY;
    }
}

/// Advance any active fly-to animation, moving the camera position.
fn advance_fly_to(
    time: Res<Time>,
    mut fly_to: ResMut<FlyTo>,
    mut camera: Query<&mut Transform, With<OrbitCamera>>,
) {
    let Some(animation) = fly_to.active.as_mut() else {
        return;
    };
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };

    animation.elapsed += time.delta_secs();
    let t = (animation.elapsed / FLY_DURATION_SECS).min(1.0);
    transform.translation = animation.start.lerp(animation.target, ease_out_cubic(t));

    if t >= 1.0 {
        fly_to.active = None;
    }
}

/// Apply orbit velocities to the camera and keep it aimed at the focus.
fn orbit_update(mut camera: Query<(&mut Transform, &mut OrbitCamera)>) {
    let Ok((mut transform, mut orbit)) = camera.single_mut() else {
        return;
    };

    let moving = orbit.yaw_velocity.abs() > 1e-5
        || orbit.pitch_velocity.abs() > 1e-5
        || orbit.zoom_velocity.abs() > 1e-5;

    if moving {
        let offset = transform.translation - orbit.focus;
        let radius = offset.length().max(MIN_RADIUS);
        let yaw = offset.x.atan2(offset.z) + orbit.yaw_velocity;
        let pitch = (offset.y / radius)
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-MAX_PITCH, MAX_PITCH);
        let pitch = (pitch + orbit.pitch_velocity).clamp(-MAX_PITCH, MAX_PITCH);
        let radius = (radius * (1.0 + orbit.zoom_velocity)).max(MIN_RADIUS);

        transform.translation = orbit.focus
            + Vec3::new(
                radius * pitch.cos() * yaw.sin(),
                radius * pitch.sin(),
                radius * pitch.cos() * yaw.cos(),
            );

        orbit.yaw_velocity *= 1.0 - DAMPING_FACTOR;
        orbit.pitch_velocity *= 1.0 - DAMPING_FACTOR;
        orbit.zoom_velocity *= 1.0 - DAMPING_FACTOR;
    }

    // The fly-to animation only moves the position; the look target stays
    // under the orbit controller, matching the drift-free handoff when an
    // animation ends mid-drag.
    let focus = orbit.focus;
    if (transform.translation - focus).length_squared() > 1e-6 {
        transform.look_at(focus, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert!(ease_out_cubic(0.0).abs() < 1e-6);
        assert!((ease_out_cubic(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ease_out_cubic_monotonic() {
        let mut previous = 0.0;
        for step in 1..=20 {
            let value = ease_out_cubic(step as f32 / 20.0);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn test_fly_to_request_replaces_active_animation() {
        let mut fly_to = FlyTo::default();
        fly_to.request(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));
        if let Some(animation) = fly_to.active.as_mut() {
            animation.elapsed = 0.5;
        }

        fly_to.request(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 50.0, 0.0));

        let animation = fly_to.active.as_ref().unwrap();
        assert_eq!(animation.elapsed, 0.0);
        assert_eq!(animation.start, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(
            animation.target,
            Vec3::new(0.0, 50.0, APPROACH_OFFSET)
        );
    }

    #[test]
    fn test_fly_to_target_has_standoff_offset() {
        let mut fly_to = FlyTo::default();
        let point = Vec3::new(4.0, 5.0, 6.0);
        fly_to.request(Vec3::ZERO, point);

        let animation = fly_to.active.as_ref().unwrap();
        assert_eq!(animation.target - point, Vec3::new(0.0, 0.0, APPROACH_OFFSET));
    }
}
