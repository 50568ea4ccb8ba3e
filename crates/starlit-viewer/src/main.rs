//! 3D explorer for a galaxy of academic papers using Bevy.
//!
//! Renders a precomputed paper embedding as a navigable star field with
//! orbit navigation, click and fuzzy-search selection, a fly-to camera,
//! per-author trajectory lines, and an info panel with neighbor links
//! and on-demand citation lookup.

mod async_runtime;
mod camera;
mod citations;
mod launch_params;
mod loader;
mod picking;
mod scene;
mod selection;
mod trajectory;
mod ui;

use async_runtime::AsyncRuntimePlugin;
use bevy::prelude::*;
use camera::CameraControllerPlugin;
use citations::CitationPlugin;
use launch_params::LaunchParams;
use loader::CatalogLoaderPlugin;
use picking::PointerPickingPlugin;
use scene::ScenePlugin;
use selection::SelectionPlugin;
use trajectory::TrajectoryPlugin;
use ui::ExplorerUiPlugin;

/// Plugin for the main application.
pub struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            ScenePlugin,
            CatalogLoaderPlugin,
            CameraControllerPlugin,
            PointerPickingPlugin,
            SelectionPlugin,
            TrajectoryPlugin,
            CitationPlugin,
            ExplorerUiPlugin,
        ));
    }
}

fn main() {
    // Initialize tracing for native platforms.
    #[cfg(not(target_family = "wasm"))]
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    // Initialize tracing for WASM (logs to browser console).
    #[cfg(target_family = "wasm")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    let mut app = App::new();

    #[allow(unused_mut)]
    let mut window = Window {
        title: "starlit".to_string(),
        resolution: (1280, 720).into(),
        ..Default::default()
    };

    // WASM: Fit canvas to parent element and prevent browser event handling.
    #[cfg(target_family = "wasm")]
    {
        window.fit_canvas_to_parent = true;
        window.prevent_default_event_handling = true;
    }

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(window),
        ..Default::default()
    }));

    // Add async runtime (Tokio on native, no-op on WASM).
    app.add_plugins(AsyncRuntimePlugin);

    app.insert_resource(LaunchParams::from_environment());

    app.add_plugins(AppPlugin).run();
}
