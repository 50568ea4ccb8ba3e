//! Pointer picking: clicks on the star field become selection messages.
//!
//! A press records the cursor position; if the matching release has moved
//! less than a few pixels it counts as a click rather than an orbit drag.
//! The click is unprojected into a world-space ray and tested against the
//! point cloud; a miss changes nothing.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use starlit::{PICK_RADIUS, pick_nearest};

use crate::scene::Galaxy;
use crate::selection::SelectPaper;

/// Press-to-release cursor travel beyond which a click is a drag.
const CLICK_SLOP_PX: f32 = 4.0;

/// Plugin that translates pointer clicks into `SelectPaper` messages.
pub struct PointerPickingPlugin;

impl Plugin for PointerPickingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerPressState>()
            .add_systems(Update, pointer_pick.run_if(resource_exists::<Galaxy>));
    }
}

/// Cursor position at the most recent left press, if it began on the scene.
#[derive(Resource, Default)]
struct PointerPressState {
    press_position: Option<Vec2>,
}

fn pointer_pick(
    mut contexts: EguiContexts,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    galaxy: Res<Galaxy>,
    mut press_state: ResMut<PointerPressState>,
    mut selections: MessageWriter<SelectPaper>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let cursor = window.cursor_position();

    if buttons.just_pressed(MouseButton::Left) {
        let over_ui = contexts
            .ctx_mut()
            .is_ok_and(|ctx| ctx.is_pointer_over_area());
        press_state.press_position = if over_ui { None } else { cursor };
        return;
    }

    if !buttons.just_released(MouseButton::Left) {
        return;
    }
    let Some(pressed_at) = press_state.press_position.take() else {
        return;
    };
    let Some(released_at) = cursor else {
        return;
    };
    if pressed_at.distance(released_at) > CLICK_SLOP_PX {
        return;
    }

    let Ok((camera, camera_transform)) = camera.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, released_at) else {
        return;
    };

    if let Some(index) = pick_nearest(
        ray.origin,
        ray.direction.as_vec3(),
        &galaxy.positions,
        PICK_RADIUS,
    ) {
        selections.write(SelectPaper { index });
    }
}
