//! Status overlays: transient editor text, catalog load state, config reset notice.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::config::{AppConfig, ConfigResetNotification, SaveConfigRequest};
use crate::editor::{CatalogLoadState, EditorPanel, EditorStatus, ReloadCatalogRequest};

/// Large centered status text and the small HUD line
pub fn editor_status_ui(mut contexts: EguiContexts, status: Res<EditorStatus>) -> Result {
    if status.status.is_none() && status.hud.is_none() {
        return Ok(());
    }
    let ctx = contexts.ctx_mut()?;

    if let Some(text) = &status.status {
        egui::Area::new(egui::Id::new("editor_status"))
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(text.text.as_str())
                        .size(32.0)
                        .color(egui::Color32::from_rgb(255, 200, 40)),
                );
            });
    }

    if let Some(text) = &status.hud {
        egui::Area::new(egui::Id::new("editor_hud"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -12.0])
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(text.text.as_str()).monospace());
            });
    }

    Ok(())
}

/// Loading indicator, or the reason the editor is unavailable
pub fn catalog_load_state_ui(
    mut contexts: EguiContexts,
    load_state: Res<CatalogLoadState>,
    panel: Res<EditorPanel>,
    mut reload_events: MessageWriter<ReloadCatalogRequest>,
) -> Result {
    if load_state.loading {
        egui::Area::new(egui::Id::new("catalog_loading"))
            .anchor(egui::Align2::LEFT_BOTTOM, [12.0, -12.0])
            .interactable(false)
            .show(contexts.ctx_mut()?, |ui| {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(format!(
                        "Scanning graphics for the {}...",
                        panel.kind().display_name()
                    ));
                });
            });
        return Ok(());
    }

    if let Some(error) = &load_state.last_error {
        egui::Window::new("Editor unavailable")
            .collapsible(true)
            .resizable(true)
            .anchor(egui::Align2::LEFT_BOTTOM, [12.0, -12.0])
            .show(contexts.ctx_mut()?, |ui| {
                egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                    ui.colored_label(egui::Color32::RED, error);
                });
                ui.add_space(8.0);
                ui.label("Fix the file and press F5, or retry now.");
                if ui.button("Retry").clicked() {
                    reload_events.write(ReloadCatalogRequest);
                }
            });
    }

    Ok(())
}

/// Tells the user their configuration was reset to defaults
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
    mut save_events: MessageWriter<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Configuration Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your configuration could not be loaded and was reset to defaults.");
            if let Some(reason) = &notification.reason {
                ui.add_space(4.0);
                ui.colored_label(egui::Color32::from_rgb(255, 180, 80), reason);
            }
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Save Defaults").clicked() {
                    config.dirty = true;
                    save_events.write(SaveConfigRequest);
                    notification.show = false;
                }
                if ui.button("Dismiss").clicked() {
                    notification.show = false;
                }
            });
        });

    Ok(())
}
