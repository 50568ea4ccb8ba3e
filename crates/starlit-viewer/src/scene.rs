//! Scene bootstrap: the star-field renderable and the framed camera.
//!
//! The camera spawns immediately with the fallback framing so the app has
//! a live render loop from the first frame; the point cloud and the real
//! framing arrive once the catalog load resolves (see `loader`).

use bevy::asset::RenderAssetUsages;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;
use starlit::{Catalog, Framing, TitleIndex};

use crate::camera::OrbitCamera;

/// Plugin for the base scene and camera.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera);
    }
}

/// The loaded paper catalog plus derived world-space positions.
///
/// Absent until the catalog load resolves; systems that need the galaxy
/// gate on this resource, which is how bootstrap defers event wiring.
#[derive(Resource)]
pub struct Galaxy {
    pub catalog: Catalog,
    /// World-space point positions, in catalog order.
    pub positions: Vec<Vec3>,
}

impl Galaxy {
    pub fn new(catalog: Catalog) -> Self {
        let positions = catalog.world_positions();
        Self { catalog, positions }
    }
}

/// Fuzzy title index over the loaded catalog.
#[derive(Resource, Default)]
pub struct SearchIndex(pub TitleIndex);

/// Marker component for the star-field point cloud.
#[derive(Component)]
pub struct GalaxyPointCloud;

/// Spawn the camera with the fallback framing, looking at the origin.
fn spawn_camera(mut commands: Commands) {
    let framing = Framing::default();

    commands.spawn((
        Camera3d::default(),
        Camera {
            clear_color: bevy::camera::ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        Transform::from_translation(framing.eye).looking_at(framing.center, Vec3::Y),
        Projection::Perspective(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            near: 0.1,
            far: framing.far,
            ..Default::default()
        }),
        // Unlit star material; tonemapping would only dim it.
        Tonemapping::None,
        OrbitCamera::new(framing.center),
    ));
}

/// Spawn the star-field renderable for a loaded galaxy.
pub fn spawn_galaxy(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    galaxy: &Galaxy,
) {
    if galaxy.positions.is_empty() {
        return;
    }

    commands.spawn((
        Mesh3d(meshes.add(build_point_mesh(&galaxy.positions))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::IDENTITY,
        GalaxyPointCloud,
    ));
}

/// One `PointList` mesh with a vertex per paper.
fn build_point_mesh(positions: &[Vec3]) -> Mesh {
    let vertices: Vec<[f32; 3]> = positions.iter().map(|p| p.to_array()).collect();

    let mut mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh
}

/// Apply a framing to the camera: position, look target, and far plane.
///
/// Called once when the catalog arrives; the dataset is static for the
/// session so framing is never recomputed afterwards.
pub fn reframe_camera(
    framing: &Framing,
    transform: &mut Transform,
    projection: &mut Projection,
    orbit: &mut OrbitCamera,
) {
    *transform = Transform::from_translation(framing.eye).looking_at(framing.center, Vec3::Y);
    if let Projection::Perspective(perspective) = projection {
        perspective.far = framing.far;
    }
    orbit.focus = framing.center;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_mesh_has_one_vertex_per_paper() {
        let positions = vec![Vec3::ZERO, Vec3::ONE, Vec3::NEG_ONE];
        let mesh = build_point_mesh(&positions);
        assert_eq!(
            mesh.attribute(Mesh::ATTRIBUTE_POSITION).map(|a| a.len()),
            Some(3)
        );
    }

    #[test]
    fn test_reframe_updates_far_plane_and_focus() {
        let framing = Framing::compute(&[Vec3::new(-100.0, 0.0, 0.0), Vec3::new(100.0, 0.0, 0.0)]);
        let mut transform = Transform::IDENTITY;
        let mut projection = Projection::Perspective(PerspectiveProjection::default());
        let mut orbit = OrbitCamera::new(Vec3::ZERO);

        reframe_camera(&framing, &mut transform, &mut projection, &mut orbit);

        assert_eq!(transform.translation, framing.eye);
        assert_eq!(orbit.focus, framing.center);
        match projection {
            Projection::Perspective(p) => assert!((p.far - framing.far).abs() < 1e-3),
            _ => panic!("expected perspective projection"),
        }
    }
}
