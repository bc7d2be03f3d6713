//! Editor panel rendering.
//!
//! The panel is an egui area hugging the left window edge. Its horizontal
//! position and opacity come straight from [`PanelVisibility`]; hover changes
//! are reported back so the fade and park timers can run.
//!
//! [`PanelVisibility`]: crate::editor::PanelVisibility

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{EguiContexts, egui};

use crate::catalog::CategoryPanel;
use crate::constants::{ITEM_IMAGE_SIZE, ITEM_LABEL_HEIGHT, PANEL_WIDTH_FRACTION};
use crate::editor::{CatalogLoadState, EditorPanel};

use super::thumbnails::ThumbnailCache;

/// Height of the category list above the item column
const MENU_HEIGHT_FRACTION: f32 = 0.35;

/// Renders the editor panel while it is enabled
pub fn editor_panel_ui(
    mut contexts: EguiContexts,
    mut panel: ResMut<EditorPanel>,
    thumbnails: Res<ThumbnailCache>,
    load_state: Res<CatalogLoadState>,
    window: Query<&Window, With<PrimaryWindow>>,
) -> Result {
    panel.draw();
    if !panel.visibility().is_enabled() {
        return Ok(());
    }
    let Ok(window) = window.single() else {
        return Ok(());
    };

    let width = window.width();
    let height = window.height();
    let x = panel.visibility().x_offset() * width;
    let alpha = panel.visibility().alpha();

    let mut clicked: Option<String> = None;
    let area = panel_area(x).show(contexts.ctx_mut()?, |ui| {
        ui.set_opacity(alpha);
        egui::Frame::window(ui.style()).show(ui, |ui| {
            ui.set_width(width * PANEL_WIDTH_FRACTION);
            ui.set_height(height - 16.0);

            ui.heading(panel.kind().display_name());
            if load_state.skipped_assets > 0 {
                ui.small(format!(
                    "{} graphics skipped, see log",
                    load_state.skipped_assets
                ));
            }
            ui.separator();

            egui::ScrollArea::vertical()
                .id_salt("editor_menu")
                .max_height(height * MENU_HEIGHT_FRACTION)
                .show(ui, |ui| {
                    clicked = render_menu(ui, &panel);
                });
            ui.separator();

            if let Some((_, items)) = panel.selected_panel() {
                egui::ScrollArea::vertical()
                    .id_salt("editor_items")
                    .show(ui, |ui| render_items(ui, items, &thumbnails));
            }
        });
    });

    if let Some(name) = clicked {
        if let Err(e) = panel.select_category(&name) {
            warn!("{}", e);
        }
    }

    sync_hover(&mut panel, area.response.contains_pointer());

    Ok(())
}

/// The panel's egui area at horizontal position `x`.
///
/// Not constrained to the screen: the parked position lies mostly past the
/// left edge.
fn panel_area(x: f32) -> egui::Area {
    egui::Area::new(egui::Id::new("editor_panel"))
        .fixed_pos(egui::pos2(x, 0.0))
        .order(egui::Order::Middle)
        .constrain(false)
}

/// Report hover changes to the controller.
fn sync_hover(panel: &mut EditorPanel, hovered: bool) {
    if hovered == panel.visibility().pointer_inside() {
        return;
    }
    if hovered {
        panel.on_pointer_enter();
    } else {
        panel.on_pointer_leave();
    }
}

/// Category list. Returns the name of a clicked category.
fn render_menu(ui: &mut egui::Ui, panel: &EditorPanel) -> Option<String> {
    let catalog = panel.catalog()?;
    let mut clicked = None;

    for (index, descriptor) in catalog.descriptors().iter().enumerate() {
        let text = egui::RichText::new(&descriptor.name).color(descriptor.color.to_egui());
        if descriptor.is_header {
            ui.add_space(4.0);
            ui.label(text.strong());
            continue;
        }

        let selected = panel.selected().is_some_and(|id| id.index() == index);
        let count = catalog.panels().get(index).map_or(0, CategoryPanel::len);
        if ui
            .selectable_label(selected, text)
            .on_hover_text(format!("{} items", count))
            .clicked()
        {
            clicked = Some(descriptor.name.clone());
        }
    }

    clicked
}

/// Items of one category at their stored offsets: label on top, image below.
fn render_items(ui: &mut egui::Ui, items: &CategoryPanel, thumbnails: &ThumbnailCache) {
    if items.is_empty() {
        ui.weak("No graphics in this category");
        return;
    }

    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), items.content_height()),
        egui::Sense::hover(),
    );
    let image_size = egui::vec2(ITEM_IMAGE_SIZE, ITEM_IMAGE_SIZE);

    for item in items.items() {
        let label_rect = egui::Rect::from_min_size(
            rect.min + egui::vec2(0.0, item.y_offset),
            egui::vec2(rect.width(), ITEM_LABEL_HEIGHT),
        );
        ui.put(label_rect, egui::Label::new(item.label.as_str()).truncate())
            .on_hover_text(item.image_path.as_str());

        let image_rect = egui::Rect::from_min_size(
            egui::pos2(rect.center().x - ITEM_IMAGE_SIZE / 2.0, rect.min.y + item.image_y()),
            image_size,
        );
        let texture = thumbnails.texture_id(&item.image_id).or_else(|| {
            thumbnails
                .has_failed(&item.image_id)
                .then(|| thumbnails.placeholder())
                .flatten()
        });
        match texture {
            Some(texture_id) => {
                ui.put(
                    image_rect,
                    egui::Image::new(egui::load::SizedTexture::new(texture_id, image_size))
                        .fit_to_exact_size(image_size)
                        .corner_radius(2.0),
                );
            }
            None => {
                ui.painter()
                    .rect_filled(image_rect, 2.0, egui::Color32::from_gray(60));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::constants::DEFAULT_PANEL_REST_X;
    use crate::editor::{EditorKind, PanelLayout, VisibilityPhase};
    use crate::menu::{CategoryDescriptor, Rgba, TagSet};

    const WIDTH: f32 = 1280.0;
    const HEIGHT: f32 = 720.0;
    const FPS: f32 = 32.0;

    fn enabled_panel() -> EditorPanel {
        let mut panel = EditorPanel::new(
            EditorKind::Level,
            PanelLayout {
                home_x: 0.0,
                rest_x: DEFAULT_PANEL_REST_X,
                frames_per_second: FPS,
            },
        );
        panel.install(Catalog::new(vec![CategoryDescriptor::new(
            "Ground",
            Rgba::WHITE,
            TagSet::parse("ground"),
        )]));
        panel.enable();
        panel
    }

    fn frame_input(pointer: egui::Pos2) -> egui::RawInput {
        egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(WIDTH, HEIGHT),
            )),
            events: vec![egui::Event::PointerMoved(pointer)],
            ..Default::default()
        }
    }

    /// Lay the panel out for a few frames with the pointer at `pointer`,
    /// feeding hover back like the egui pass does. Returns the last panel rect.
    fn run_frames(
        ctx: &egui::Context,
        panel: &mut EditorPanel,
        pointer: egui::Pos2,
    ) -> egui::Rect {
        let mut rect = egui::Rect::NOTHING;
        for _ in 0..4 {
            let _ = ctx.run(frame_input(pointer), |ctx| {
                let x = panel.visibility().x_offset() * WIDTH;
                let response = panel_area(x)
                    .show(ctx, |ui| {
                        egui::Frame::window(ui.style()).show(ui, |ui| {
                            ui.set_width(WIDTH * PANEL_WIDTH_FRACTION);
                            ui.set_height(HEIGHT - 16.0);
                        });
                    })
                    .response;
                rect = response.rect;
                sync_hover(panel, response.contains_pointer());
            });
        }
        rect
    }

    #[test]
    fn test_resting_panel_is_drawn_past_left_edge() {
        let ctx = egui::Context::default();
        let mut panel = enabled_panel();
        panel.update(FPS * 2.0);
        assert_eq!(panel.phase(), VisibilityPhase::Resting);

        let far_away = egui::pos2(WIDTH - 10.0, HEIGHT - 10.0);
        let rect = run_frames(&ctx, &mut panel, far_away);
        assert!(rect.min.x < 0.0, "resting panel drawn at {:?}", rect);
        assert!((rect.min.x - DEFAULT_PANEL_REST_X * WIDTH).abs() < 1.0);
        assert_eq!(panel.phase(), VisibilityPhase::Resting);
    }

    #[test]
    fn test_active_panel_is_drawn_at_home() {
        let ctx = egui::Context::default();
        let mut panel = enabled_panel();
        let rect = run_frames(&ctx, &mut panel, egui::pos2(WIDTH - 10.0, HEIGHT - 10.0));
        assert_eq!(rect.min.x, 0.0);
    }

    #[test]
    fn test_hover_round_trip_drives_visibility() {
        let ctx = egui::Context::default();
        let mut panel = enabled_panel();
        assert_eq!(panel.phase(), VisibilityPhase::FadingOut);

        run_frames(&ctx, &mut panel, egui::pos2(50.0, 100.0));
        assert!(panel.visibility().pointer_inside());
        assert_eq!(panel.phase(), VisibilityPhase::Active);

        run_frames(&ctx, &mut panel, egui::pos2(WIDTH - 10.0, HEIGHT - 10.0));
        assert!(!panel.visibility().pointer_inside());
        assert_eq!(panel.phase(), VisibilityPhase::FadingOut);
    }

    #[test]
    fn test_sync_hover_ignores_unchanged_state() {
        let mut panel = enabled_panel();
        panel.update(FPS);
        let alpha = panel.visibility().alpha();

        sync_hover(&mut panel, false);
        assert_eq!(panel.visibility().alpha(), alpha);

        sync_hover(&mut panel, true);
        assert_eq!(panel.visibility().alpha(), 1.0);
        assert_eq!(panel.phase(), VisibilityPhase::Active);
    }
}
