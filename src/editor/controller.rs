//! Editor panel controller.
//!
//! Owns the loaded catalog and the visibility state, and exposes the host
//! lifecycle hooks. Side effects that belong to other subsystems (sounds,
//! cursor, status text) are queued as [`EditorCue`]s for the host to apply.

use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;

use crate::catalog::{Catalog, CatalogSource, CategoryPanel, ScanReport, build_catalog};
use crate::constants::{
    DEFAULT_FRAMES_PER_SECOND, DEFAULT_PANEL_HOME_X, DEFAULT_PANEL_REST_X, ENTER_SOUND,
    LEAVE_SOUND,
};
use crate::error::{EditorResult, LookupError};
use crate::menu::{CategoryDescriptor, CategoryId};

use super::kind::EditorKind;
use super::visibility::{PanelVisibility, VisibilityPhase};

/// Requests from the controller to the rest of the application.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCue {
    /// Transient centered status text
    ShowStatus(String),
    /// Short message for the debug HUD line
    HudText(String),
    PlaySound(&'static str),
    /// Stop sounds the editor started
    StopSounds,
    /// Switch the editor pointer cursor on or off
    CursorActive(bool),
    ResetCursor,
    /// Stop running animations so the level is edited in a still state
    ClearAnimations,
}

/// Placement and pacing of the panel, usually taken from the app config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    /// X position while visible, as a fraction of the host width
    pub home_x: f32,
    /// X position while parked
    pub rest_x: f32,
    /// Frame rate at which the frame speed factor is 1.0
    pub frames_per_second: f32,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            home_x: DEFAULT_PANEL_HOME_X,
            rest_x: DEFAULT_PANEL_REST_X,
            frames_per_second: DEFAULT_FRAMES_PER_SECOND,
        }
    }
}

#[derive(Resource)]
pub struct EditorPanel {
    kind: EditorKind,
    layout: PanelLayout,
    catalog: Option<Catalog>,
    visibility: PanelVisibility,
    selected: Option<CategoryId>,
    cues: Vec<EditorCue>,
}

impl Default for EditorPanel {
    fn default() -> Self {
        Self::new(EditorKind::default(), PanelLayout::default())
    }
}

impl EditorPanel {
    pub fn new(kind: EditorKind, layout: PanelLayout) -> Self {
        Self {
            kind,
            layout,
            catalog: None,
            visibility: PanelVisibility::new(layout.home_x, layout.rest_x),
            selected: None,
            cues: Vec::new(),
        }
    }

    pub fn kind(&self) -> EditorKind {
        self.kind
    }

    /// Change which editor this panel serves. Unloads the current catalog.
    pub fn set_kind(&mut self, kind: EditorKind) {
        if kind != self.kind {
            self.unload();
            self.kind = kind;
        }
    }

    pub fn layout(&self) -> PanelLayout {
        self.layout
    }

    /// Apply a new layout; the panel is unloaded when the positions change.
    pub fn set_layout(&mut self, layout: PanelLayout) {
        if layout == self.layout {
            return;
        }
        if layout.home_x != self.layout.home_x || layout.rest_x != self.layout.rest_x {
            self.unload();
            self.visibility = PanelVisibility::new(layout.home_x, layout.rest_x);
        }
        self.layout = layout;
    }

    /// Build the catalog synchronously and install it.
    ///
    /// On failure the panel is left unloaded and the toggle stays inert.
    pub fn init(&mut self, source: &CatalogSource) -> EditorResult<ScanReport> {
        self.unload();
        let (catalog, report) = build_catalog(source)?;
        self.install(catalog);
        Ok(report)
    }

    /// Install a catalog built elsewhere (e.g. on the IO task pool).
    pub fn install(&mut self, catalog: Catalog) {
        self.unload();
        self.selected = catalog
            .descriptors()
            .iter()
            .position(|d| !d.is_header)
            .map(CategoryId);
        info!(
            "{} loaded: {} categories, {} items",
            self.kind.display_name(),
            catalog.len(),
            catalog.item_count()
        );
        self.catalog = Some(catalog);
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    /// Drop the catalog. Safe to call at any time, any number of times.
    pub fn unload(&mut self) {
        if self.visibility.is_enabled() {
            self.disable();
        }
        if self.catalog.take().is_some() {
            debug!("{} unloaded", self.kind.display_name());
        }
        self.selected = None;
    }

    pub fn toggle(&mut self) {
        if !self.is_loaded() {
            warn!("{} is not loaded; ignoring toggle", self.kind.display_name());
            return;
        }
        if self.visibility.is_enabled() {
            self.disable();
        } else {
            self.enable();
        }
    }

    /// Show the panel.
    ///
    /// # Panics
    ///
    /// Panics if no catalog has been installed.
    pub fn enable(&mut self) {
        assert!(
            self.is_loaded(),
            "EditorPanel::enable called before the catalog was loaded"
        );
        if self.visibility.is_enabled() {
            return;
        }

        self.cues.extend([
            EditorCue::ShowStatus("Loading".to_string()),
            EditorCue::PlaySound(ENTER_SOUND),
            EditorCue::HudText("Editor enabled".to_string()),
            EditorCue::CursorActive(true),
            EditorCue::ClearAnimations,
        ]);
        self.visibility.enable();
    }

    pub fn disable(&mut self) {
        if !self.visibility.is_enabled() {
            return;
        }

        self.cues.extend([
            EditorCue::StopSounds,
            EditorCue::PlaySound(LEAVE_SOUND),
            EditorCue::ResetCursor,
            EditorCue::CursorActive(false),
        ]);
        self.visibility.disable();
    }

    /// Per-frame tick. `frame_speed` is 1.0 at the configured frame rate.
    ///
    /// # Panics
    ///
    /// Panics if no catalog has been installed.
    pub fn update(&mut self, frame_speed: f32) {
        assert!(
            self.is_loaded(),
            "EditorPanel::update called before the catalog was loaded"
        );
        self.visibility
            .tick(frame_speed, self.layout.frames_per_second);
    }

    /// Rendering happens in the egui pass; nothing to draw here.
    pub fn draw(&self) {}

    /// Input is handled by other editor tools; the panel never consumes events.
    pub fn handle_input(&mut self, _event: &KeyboardInput) -> bool {
        false
    }

    pub fn on_pointer_enter(&mut self) {
        self.visibility.on_pointer_enter();
    }

    pub fn on_pointer_leave(&mut self) {
        self.visibility.on_pointer_leave();
    }

    pub fn visibility(&self) -> &PanelVisibility {
        &self.visibility
    }

    pub fn phase(&self) -> VisibilityPhase {
        self.visibility.phase()
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    fn lookup(&self, name: &str) -> Result<(&Catalog, CategoryId), LookupError> {
        let catalog = self.catalog.as_ref().ok_or_else(|| LookupError {
            name: name.to_string(),
        })?;
        let id = catalog.lookup(name)?;
        Ok((catalog, id))
    }

    /// Panel of the category called `name`.
    pub fn category(&self, name: &str) -> Result<&CategoryPanel, LookupError> {
        let (catalog, id) = self.lookup(name)?;
        catalog.panel(id).ok_or_else(|| LookupError {
            name: name.to_string(),
        })
    }

    pub fn descriptor(&self, name: &str) -> Result<&CategoryDescriptor, LookupError> {
        let (catalog, id) = self.lookup(name)?;
        catalog.descriptor(id).ok_or_else(|| LookupError {
            name: name.to_string(),
        })
    }

    /// Show the items of the category called `name`.
    pub fn select_category(&mut self, name: &str) -> Result<(), LookupError> {
        let (_, id) = self.lookup(name)?;
        self.selected = Some(id);
        Ok(())
    }

    pub fn selected(&self) -> Option<CategoryId> {
        self.selected
    }

    pub fn selected_panel(&self) -> Option<(&CategoryDescriptor, &CategoryPanel)> {
        let catalog = self.catalog.as_ref()?;
        let id = self.selected?;
        Some((catalog.descriptor(id)?, catalog.panel(id)?))
    }

    /// Take all queued cues, oldest first.
    pub fn take_cues(&mut self) -> Vec<EditorCue> {
        std::mem::take(&mut self.cues)
    }
}
