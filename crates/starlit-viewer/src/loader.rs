//! Background catalog loading.
//!
//! The dataset is read off the main thread (file read on native, HTTP
//! fetch on WASM) and delivered over a channel. An `Update` system polls
//! the channel each frame until the result arrives, then spawns the
//! star field, reframes the camera, and inserts the `Galaxy` and
//! `SearchIndex` resources. A failed load degrades to an empty galaxy so
//! the app still comes up with the fallback framing.

use bevy::prelude::*;
use starlit::{Catalog, Framing, TitleIndex};

use crate::async_runtime::TaskSpawner;
use crate::camera::OrbitCamera;
use crate::launch_params::LaunchParams;
use crate::scene::{Galaxy, SearchIndex, reframe_camera, spawn_galaxy};

/// Plugin that loads the paper catalog at startup.
pub struct CatalogLoaderPlugin;

impl Plugin for CatalogLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoaderChannels>()
            .add_systems(Startup, start_catalog_load)
            .add_systems(Update, poll_catalog);
    }
}

/// Channel pair carrying the load result back to the ECS.
#[derive(Resource)]
struct LoaderChannels {
    tx: async_channel::Sender<starlit::Result<Catalog>>,
    rx: async_channel::Receiver<starlit::Result<Catalog>>,
}

impl Default for LoaderChannels {
    fn default() -> Self {
        let (tx, rx) = async_channel::bounded(1);
        Self { tx, rx }
    }
}

/// Kick off the background load of the configured dataset.
fn start_catalog_load(
    params: Res<LaunchParams>,
    channels: Res<LoaderChannels>,
    spawner: TaskSpawner,
) {
    let source = params.dataset.clone();
    let tx = channels.tx.clone();

    tracing::info!("Loading catalog from {source}");

    spawner.spawn(async move {
        let result = load_catalog(&source).await;
        // Receiver dropping means the app shut down; nothing to do.
        let _ = tx.send(result).await;
    });
}

/// Read and parse the catalog from a file path.
#[cfg(not(target_family = "wasm"))]
async fn load_catalog(source: &str) -> starlit::Result<Catalog> {
    Catalog::load_from_path(std::path::Path::new(source))
}

/// Fetch and parse the catalog from a URL relative to the hosting page.
#[cfg(target_family = "wasm")]
async fn load_catalog(source: &str) -> starlit::Result<Catalog> {
    // reqwest rejects relative URLs outright, so resolve against the page
    // location before handing the source over.
    let url = match page_href() {
        Some(href) => resolve_dataset_url(source, &href),
        None => source.to_owned(),
    };
    let io_error = |message: String| starlit::Error::Io {
        source_name: url.clone(),
        message,
    };

    let response = reqwest::get(&url)
        .await
        .map_err(|e| io_error(e.to_string()))?;
    let response = response
        .error_for_status()
        .map_err(|e| io_error(e.to_string()))?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| io_error(e.to_string()))?;

    Catalog::from_json_slice(&bytes)
}

/// The current page URL, read off the global `location` object.
#[cfg(target_family = "wasm")]
fn page_href() -> Option<String> {
    use wasm_bindgen::JsValue;

    let location = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("location")).ok()?;
    js_sys::Reflect::get(&location, &JsValue::from_str("href"))
        .ok()?
        .as_string()
}

/// Resolve a possibly relative dataset location against a page URL.
///
/// Relative sources resolve against the page's directory, root-relative
/// sources against its origin; already absolute sources pass through.
#[cfg(any(target_family = "wasm", test))]
fn resolve_dataset_url(source: &str, page_href: &str) -> String {
    if source.contains("://") {
        return source.to_owned();
    }

    let page = page_href.split(['?', '#']).next().unwrap_or(page_href);
    let path_start = page.find("://").map_or(0, |i| i + 3);
    let origin_end = page[path_start..]
        .find('/')
        .map_or(page.len(), |i| path_start + i);

    if let Some(path) = source.strip_prefix('/') {
        return format!("{}/{path}", &page[..origin_end]);
    }

    match page[origin_end..].rfind('/') {
        Some(i) => format!("{}{source}", &page[..=origin_end + i]),
        None => format!("{}/{source}", &page[..origin_end]),
    }
}

/// Poll for the load result and finish scene bootstrap when it lands.
#[allow(clippy::needless_pass_by_value)]
fn poll_catalog(
    mut commands: Commands,
    channels: Res<LoaderChannels>,
    galaxy: Option<Res<Galaxy>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut camera: Query<(&mut Transform, &mut Projection, &mut OrbitCamera), With<Camera3d>>,
) {
    if galaxy.is_some() {
        return;
    }
    let Ok(result) = channels.rx.try_recv() else {
        return;
    };

    let catalog = match result {
        Ok(catalog) => {
            tracing::info!("Loaded {} papers", catalog.len());
            catalog
        }
        Err(error) => {
            tracing::warn!("Catalog load failed ({error}), starting with an empty galaxy");
            Catalog::empty()
        }
    };

    let galaxy = Galaxy::new(catalog);

    spawn_galaxy(&mut commands, &mut meshes, &mut materials, &galaxy);

    let framing = Framing::compute(&galaxy.positions);
    if let Ok((mut transform, mut projection, mut orbit)) = camera.single_mut() {
        reframe_camera(&framing, &mut transform, &mut projection, &mut orbit);
    }

    commands.insert_resource(SearchIndex(TitleIndex::new(galaxy.catalog.titles())));
    commands.insert_resource(galaxy);
}

#[cfg(test)]
mod tests {
    use super::resolve_dataset_url;

    #[test]
    fn test_relative_source_resolves_against_page_directory() {
        assert_eq!(
            resolve_dataset_url("data/papers.json", "https://example.org/app/index.html"),
            "https://example.org/app/data/papers.json"
        );
    }

    #[test]
    fn test_bare_origin_gains_a_separator() {
        assert_eq!(
            resolve_dataset_url("data/papers.json", "https://example.org"),
            "https://example.org/data/papers.json"
        );
    }

    #[test]
    fn test_root_relative_source_resolves_against_origin() {
        assert_eq!(
            resolve_dataset_url("/data/papers.json", "https://example.org/app/index.html"),
            "https://example.org/data/papers.json"
        );
    }

    #[test]
    fn test_absolute_source_passes_through() {
        assert_eq!(
            resolve_dataset_url("https://cdn.example.org/papers.json", "https://example.org/"),
            "https://cdn.example.org/papers.json"
        );
    }

    #[test]
    fn test_query_and_fragment_are_not_part_of_the_base() {
        assert_eq!(
            resolve_dataset_url("data/papers.json", "https://example.org/app/?tab=1#top"),
            "https://example.org/app/data/papers.json"
        );
    }
}
