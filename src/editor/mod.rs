//! Editor panel: lifecycle, catalog loading and the fade/park state machine.
//!
//! ## Module Structure
//!
//! - [`controller`] - [`EditorPanel`] resource with the host lifecycle hooks
//! - [`visibility`] - Pointer-driven fade and rest state machine
//! - [`kind`] - Level vs world editor selection
//! - [`cues`] - Applies controller side effects (sounds, cursor, status text)
//!
//! The catalog is built on the IO task pool and installed in one step, so the
//! panel can never be shown half-populated.

mod controller;
mod cues;
mod kind;
mod visibility;


pub use controller::{EditorCue, EditorPanel, PanelLayout};
pub use cues::{EditorStatus, TimedText};
pub use kind::EditorKind;
pub use visibility::{PanelVisibility, VisibilityPhase};

use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task};
use futures_lite::future;

use crate::catalog::{Catalog, ScanReport, build_catalog};
use crate::config::{AppConfig, ConfigLoaded, SetEditorKindRequest};
use crate::error::LoadError;

/// Message to rebuild the catalog from disk
#[derive(Message)]
pub struct ReloadCatalogRequest;

/// In-flight catalog build
#[derive(Component)]
pub struct CatalogLoadTask {
    kind: EditorKind,
    task: Task<Result<(Catalog, ScanReport), LoadError>>,
}

/// Progress and outcome of the last catalog build, for the UI.
#[derive(Resource, Default)]
pub struct CatalogLoadState {
    pub loading: bool,
    pub last_error: Option<String>,
    /// Number of graphics skipped because of broken settings files
    pub skipped_assets: usize,
}

/// Run condition: a catalog is installed.
pub fn editor_loaded(panel: Res<EditorPanel>) -> bool {
    panel.is_loaded()
}

/// Startup system applying the config to the panel and requesting the first load
fn configure_editor_panel(
    config: Res<AppConfig>,
    mut panel: ResMut<EditorPanel>,
    mut reload_events: MessageWriter<ReloadCatalogRequest>,
) {
    panel.set_kind(config.data.editor_kind);
    panel.set_layout(config.data.panel_layout());
    reload_events.write(ReloadCatalogRequest);
}

/// Starts an async catalog build (menu parsing and directory scan)
fn start_catalog_load(
    mut commands: Commands,
    mut events: MessageReader<ReloadCatalogRequest>,
    config: Res<AppConfig>,
    mut panel: ResMut<EditorPanel>,
    mut load_state: ResMut<CatalogLoadState>,
    pending: Query<Entity, With<CatalogLoadTask>>,
) {
    // Several requests in one frame collapse into a single reload
    if events.read().count() == 0 {
        return;
    }

    // Dropping a task cancels it
    for entity in pending.iter() {
        commands.entity(entity).despawn();
    }

    panel.unload();
    let kind = panel.kind();
    let source = config.data.catalog_source(kind);
    info!(
        "Loading {} from {:?} (graphics in {:?})",
        kind.display_name(),
        source.menu_file,
        source.pixmaps_dir
    );

    load_state.loading = true;
    load_state.last_error = None;
    load_state.skipped_assets = 0;

    let task = IoTaskPool::get().spawn(async move { build_catalog(&source) });
    commands.spawn(CatalogLoadTask { kind, task });
}

/// Polls catalog builds and installs the result
fn poll_catalog_load(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut CatalogLoadTask)>,
    mut panel: ResMut<EditorPanel>,
    mut load_state: ResMut<CatalogLoadState>,
) {
    for (entity, mut load) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut load.task)) else {
            continue;
        };
        commands.entity(entity).despawn();
        load_state.loading = false;

        if load.kind != panel.kind() {
            debug!("Discarding catalog for {}", load.kind.display_name());
            continue;
        }

        match result {
            Ok((catalog, report)) => {
                for (path, e) in &report.failures {
                    warn!("Not catalogued {:?}: {}", path, e);
                }
                load_state.skipped_assets = report.failures.len();
                panel.install(catalog);
            }
            Err(e) => {
                error!("Failed to load {}: {}", panel.kind().display_name(), e);
                load_state.last_error = Some(e.to_string());
            }
        }
    }
}

/// F8 toggles the panel, F5 reloads the catalog, F9 switches level/world editor
fn handle_editor_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut panel: ResMut<EditorPanel>,
    mut reload_events: MessageWriter<ReloadCatalogRequest>,
    mut kind_events: MessageWriter<SetEditorKindRequest>,
) {
    if keyboard.just_pressed(KeyCode::F8) {
        panel.toggle();
    }

    if keyboard.just_pressed(KeyCode::F9) {
        let kind = panel.kind().other();
        info!("Switching to {}", kind.display_name());
        panel.set_kind(kind);
        kind_events.write(SetEditorKindRequest { kind });
        reload_events.write(ReloadCatalogRequest);
    } else if keyboard.just_pressed(KeyCode::F5) {
        reload_events.write(ReloadCatalogRequest);
    }
}

/// Offer raw keyboard input to the panel while it is shown
fn forward_keyboard_input(mut events: MessageReader<KeyboardInput>, mut panel: ResMut<EditorPanel>) {
    for event in events.read() {
        if panel.visibility().is_enabled() && panel.handle_input(event) {
            trace!("Editor panel consumed {:?}", event.key_code);
        }
    }
}

/// Per-frame visibility tick, scaled so 1.0 equals one frame at the configured rate
fn update_editor_panel(time: Res<Time>, mut panel: ResMut<EditorPanel>) {
    let frame_speed = time.delta_secs() * panel.layout().frames_per_second;
    panel.update(frame_speed);
}

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditorPanel>()
            .init_resource::<EditorStatus>()
            .init_resource::<CatalogLoadState>()
            .add_message::<ReloadCatalogRequest>()
            .add_systems(Startup, configure_editor_panel.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    start_catalog_load.run_if(on_message::<ReloadCatalogRequest>),
                    poll_catalog_load,
                    handle_editor_shortcuts,
                    forward_keyboard_input,
                    update_editor_panel.run_if(editor_loaded),
                    cues::apply_editor_cues,
                    cues::tick_editor_status,
                )
                    .chain(),
            );
    }
}
