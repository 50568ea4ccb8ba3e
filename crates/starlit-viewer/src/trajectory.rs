//! Per-author trajectory lines for the selected paper.
//!
//! Lines exist only for the current selection. Whenever the selection or
//! the visibility toggle changes, every trajectory line is despawned and
//! the selected paper's tracks are rebuilt from scratch, one line strip
//! per author with at least two samples.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;
use starlit::WORLD_SCALE;

use crate::scene::Galaxy;
use crate::selection::Selection;

/// Plugin for trajectory line lifecycle.
pub struct TrajectoryPlugin;

impl Plugin for TrajectoryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrajectorySettings>().add_systems(
            Update,
            rebuild_trajectories
                .after(crate::selection::apply_selection)
                .run_if(resource_exists::<Galaxy>),
        );
    }
}

/// Whether trajectory lines are shown for the selected paper.
#[derive(Resource)]
pub struct TrajectorySettings {
    pub show: bool,
}

impl Default for TrajectorySettings {
    fn default() -> Self {
        Self { show: true }
    }
}

/// Marker component for a spawned trajectory line.
#[derive(Component)]
pub struct TrajectoryLine;

/// Despawn and respawn trajectory lines when selection or settings move.
#[allow(clippy::needless_pass_by_value)]
pub fn rebuild_trajectories(
    mut commands: Commands,
    selection: Res<Selection>,
    settings: Res<TrajectorySettings>,
    galaxy: Res<Galaxy>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    lines: Query<Entity, With<TrajectoryLine>>,
) {
    if !selection.is_changed() && !settings.is_changed() {
        return;
    }

    for entity in &lines {
        commands.entity(entity).despawn();
    }

    if !settings.show {
        return;
    }
    let Some(index) = selection.index else {
        return;
    };
    let Some(record) = galaxy.catalog.get(index) else {
        return;
    };
    let Some(trajectory) = record.author_trajectory.as_ref() else {
        return;
    };

    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.4, 0.7, 1.0),
        unlit: true,
        ..default()
    });

    for (_author, samples) in trajectory.polylines() {
        let vertices: Vec<[f32; 3]> = samples
            .iter()
            .map(|&sample| (sample.position() * WORLD_SCALE).to_array())
            .collect();

        let mut mesh = Mesh::new(PrimitiveTopology::LineStrip, RenderAssetUsages::default());
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);

        commands.spawn((
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(material.clone()),
            Transform::IDENTITY,
            TrajectoryLine,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starlit::Catalog;

    // Alice has a drawable track; Bob's single sample is skipped.
    const TRACKED_PAPER: &str = r#"[
        {
            "id": "W1", "title": "Alpha", "x": 0.0, "y": 0.0, "z": 0.0,
            "author_trajectory": {
                "Alice": [
                    {"x": 0.0, "y": 0.0, "z": 0.0},
                    {"x": 0.1, "y": 0.0, "z": 0.0},
                    {"x": 0.2, "y": 0.1, "z": 0.0}
                ],
                "Bob": [{"x": 1.0, "y": 1.0, "z": 1.0}]
            }
        }
    ]"#;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .init_resource::<Selection>()
            .init_resource::<TrajectorySettings>()
            .add_systems(Update, rebuild_trajectories);

        let catalog = Catalog::from_json_slice(TRACKED_PAPER.as_bytes()).unwrap();
        app.insert_resource(Galaxy::new(catalog));
        app
    }

    fn line_entities(app: &mut App) -> Vec<Entity> {
        app.world_mut()
            .query_filtered::<Entity, With<TrajectoryLine>>()
            .iter(app.world())
            .collect()
    }

    fn line_vertex_count(app: &mut App, entity: Entity) -> usize {
        let handle = app.world().get::<Mesh3d>(entity).unwrap().0.clone();
        let meshes = app.world().resource::<Assets<Mesh>>();
        meshes
            .get(&handle)
            .and_then(|mesh| mesh.attribute(Mesh::ATTRIBUTE_POSITION))
            .map_or(0, bevy::mesh::VertexAttributeValues::len)
    }

    #[test]
    fn test_selection_spawns_one_line_per_drawable_track() {
        let mut app = test_app();
        app.update();
        app.world_mut().resource_mut::<Selection>().index = Some(0);
        app.update();

        let lines = line_entities(&mut app);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_vertex_count(&mut app, lines[0]), 3);
    }

    #[test]
    fn test_toggle_round_trip_restores_lines() {
        let mut app = test_app();
        app.update();
        app.world_mut().resource_mut::<Selection>().index = Some(0);
        app.update();

        app.world_mut().resource_mut::<TrajectorySettings>().show = false;
        app.update();
        assert!(line_entities(&mut app).is_empty());

        app.world_mut().resource_mut::<TrajectorySettings>().show = true;
        app.update();
        let lines = line_entities(&mut app);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_vertex_count(&mut app, lines[0]), 3);
    }

    #[test]
    fn test_steady_state_does_not_duplicate_lines() {
        let mut app = test_app();
        app.update();
        app.world_mut().resource_mut::<Selection>().index = Some(0);
        app.update();
        app.update();
        app.update();
        assert_eq!(line_entities(&mut app).len(), 1);
    }
}
