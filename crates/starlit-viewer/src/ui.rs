//! The explorer side panel: search, trajectory toggle, and paper details.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};

use crate::async_runtime::TaskSpawner;
use crate::citations::{CitationState, HttpClient};
use crate::scene::{Galaxy, SearchIndex};
use crate::selection::{SelectPaper, Selection};
use crate::trajectory::TrajectorySettings;

/// Characters of abstract shown in the details panel.
const ABSTRACT_PREVIEW_CHARS: usize = 200;

/// Plugin for the explorer UI.
pub struct ExplorerUiPlugin;

impl Plugin for ExplorerUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .init_resource::<SearchInput>()
            .add_systems(EguiPrimaryContextPass, explorer_panel);
    }
}

/// Text in the search box.
#[derive(Resource, Default)]
struct SearchInput {
    text: String,
}

#[allow(clippy::too_many_arguments, clippy::needless_pass_by_value)]
fn explorer_panel(
    mut contexts: EguiContexts,
    galaxy: Option<Res<Galaxy>>,
    index: Option<Res<SearchIndex>>,
    selection: Res<Selection>,
    mut search: ResMut<SearchInput>,
    mut trajectory_settings: ResMut<TrajectorySettings>,
    mut citations: ResMut<CitationState>,
    mut http: ResMut<HttpClient>,
    spawner: TaskSpawner,
    mut selections: MessageWriter<SelectPaper>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::SidePanel::left("explorer-panel")
        .default_width(320.0)
        .show(ctx, |ui| {
            ui.heading("starlit");
            ui.separator();

            let Some(galaxy) = galaxy.as_deref() else {
                ui.label("Loading catalog...");
                return;
            };

            let mut submitted = false;
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut search.text).hint_text("Search titles"),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submitted = true;
                }
                if ui.button("Search").clicked() {
                    submitted = true;
                }
            });
            if submitted {
                if let Some(index) = index.as_deref() {
                    match index.0.query(&search.text) {
                        Some(found) => {
                            selections.write(SelectPaper { index: found });
                        }
                        None => tracing::info!("No title matched '{}'", search.text),
                    }
                }
            }

            // Compare before writing back so the resource is only marked
            // changed when the checkbox actually flips.
            let mut show = trajectory_settings.show;
            ui.checkbox(&mut show, "Show author trajectories");
            if show != trajectory_settings.show {
                trajectory_settings.show = show;
            }

            ui.separator();

            let Some(record) = selection.index.and_then(|i| galaxy.catalog.get(i)) else {
                ui.label(format!("{} papers. Click a star to begin.", galaxy.catalog.len()));
                return;
            };

            ui.heading(&record.title);
            let preview = record.abstract_preview(ABSTRACT_PREVIEW_CHARS);
            if !preview.is_empty() {
                ui.label(preview);
            }

            if !record.neighbors.is_empty() {
                ui.separator();
                ui.label("Related");
                for &neighbor in &record.neighbors {
                    let Some(other) = galaxy.catalog.get(neighbor) else {
                        continue;
                    };
                    if ui.link(&other.title).clicked() {
                        selections.write(SelectPaper { index: neighbor });
                    }
                }
            }

            ui.separator();
            ui.label("Citations");
            if citations.is_loading {
                ui.label("Loading...");
            } else if let Some(error) = &citations.error {
                ui.colored_label(egui::Color32::RED, error);
            } else if citations.titles.is_empty() {
                if ui.button("Load citing works").clicked() {
                    citations.start_request(&record.id, &mut http, &spawner);
                }
            } else {
                for title in &citations.titles {
                    ui.label(format!("• {title}"));
                }
            }
        });

    Ok(())
}
