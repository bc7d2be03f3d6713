//! egui front end for the editor panel.
//!
//! ## Module Structure
//!
//! - [`editor_panel`] - The category menu and item column
//! - [`thumbnails`] - Decodes catalog graphics into egui textures
//! - [`status`] - Status text, load state and config reset overlays

mod editor_panel;
mod status;
mod thumbnails;

pub use thumbnails::ThumbnailCache;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

/// egui needs a camera to render into
fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ThumbnailCache>()
            .add_systems(
                Startup,
                (spawn_camera, thumbnails::setup_placeholder_texture),
            )
            // Load thumbnails before egui pass
            .add_systems(Update, thumbnails::load_and_register_thumbnails)
            .add_systems(
                EguiPrimaryContextPass,
                (
                    editor_panel::editor_panel_ui,
                    // Overlays after the panel so they draw on top
                    status::editor_status_ui,
                    status::catalog_load_state_ui,
                    status::config_reset_notification_ui,
                )
                    .chain(),
            );
    }
}
