//! Single-paper selection and the highlight marker.
//!
//! Every selection source (click pick, search, neighbor links) funnels
//! through one `SelectPaper` message. Applying a selection swaps the
//! highlight marker, starts the camera fly-to, and clears stale citation
//! results; only one paper is ever selected at a time.

use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;

use crate::camera::{FlyTo, OrbitCamera};
use crate::citations::CitationState;
use crate::scene::Galaxy;

/// Marker sphere radius in world units.
const MARKER_RADIUS: f32 = 2.5;

/// Request to select the paper at a catalog index.
#[derive(Message)]
pub struct SelectPaper {
    pub index: usize,
}

/// Currently selected paper, if any. Selection never clears back to
/// empty; it only moves from paper to paper.
#[derive(Resource, Default)]
pub struct Selection {
    pub index: Option<usize>,
}

/// Marker component for the highlight sphere.
#[derive(Component)]
pub struct HighlightMarker;

/// Plugin wiring selection messages to scene and camera state.
pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SelectPaper>()
            .init_resource::<Selection>()
            .add_systems(Update, apply_selection.run_if(resource_exists::<Galaxy>));
    }
}

/// Apply the most recent selection request.
#[allow(clippy::needless_pass_by_value)]
pub fn apply_selection(
    mut commands: Commands,
    mut messages: MessageReader<SelectPaper>,
    galaxy: Res<Galaxy>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    markers: Query<Entity, With<HighlightMarker>>,
    camera: Query<&Transform, With<OrbitCamera>>,
    mut fly_to: ResMut<FlyTo>,
    mut citations: ResMut<CitationState>,
    mut selection: ResMut<Selection>,
) {
    // Multiple requests in one frame collapse to the newest.
    let Some(request) = messages.read().last() else {
        return;
    };

    let Some(position) = galaxy.catalog.world_position(request.index) else {
        tracing::warn!("Ignoring selection of out-of-range paper {}", request.index);
        return;
    };

    for entity in &markers {
        commands.entity(entity).despawn();
    }

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(MARKER_RADIUS).mesh().uv(16, 16))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.8, 0.0),
            unlit: true,
            ..default()
        })),
        Transform::from_translation(position),
        HighlightMarker,
    ));

    if let Ok(camera) = camera.single() {
        fly_to.request(camera.translation, position);
    }

    citations.clear();
    selection.index = Some(request.index);
}
