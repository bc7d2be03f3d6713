//! Editor catalog: category panels filled with tagged graphics.
//!
//! ## Module Structure
//!
//! - [`settings`] - `.settings` sidecar parsing
//! - [`panel`] - Per-category item stacks and layout offsets
//! - [`scanner`] - Directory enumeration and tag-driven population
//!
//! A [`Catalog`] owns the menu descriptors and one panel per descriptor, both
//! indexed by [`CategoryId`]. It is built off the main thread by
//! [`build_catalog`] and handed to the editor controller in one piece.

mod panel;
mod scanner;
mod settings;


pub use panel::{CategoryPanel, ITEM_STRIDE, PlacedItem, sanitize_image_id};
pub use scanner::{ScanReport, enumerate_images, relative_pixmap_path, scan};
pub use settings::{AssetSettings, SETTINGS_EXTENSION, settings_path_for};

use bevy::prelude::*;
use std::path::PathBuf;

use crate::error::{LoadError, LookupError};
use crate::menu::{CategoryDescriptor, CategoryId, parse_menu_file};

/// Everything needed to build a catalog for one editor.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSource {
    pub menu_file: PathBuf,
    pub pixmaps_dir: PathBuf,
    /// Tag a graphic must carry to show up in this editor (`level` or `world`)
    pub master_tag: String,
}

/// Menu descriptors and their panels, in menu file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    descriptors: Vec<CategoryDescriptor>,
    panels: Vec<CategoryPanel>,
}

impl Catalog {
    /// Create one empty panel per descriptor.
    pub fn new(descriptors: Vec<CategoryDescriptor>) -> Self {
        let panels = (0..descriptors.len())
            .map(|i| CategoryPanel::new(CategoryId(i)))
            .collect();
        Self {
            descriptors,
            panels,
        }
    }

    pub fn descriptors(&self) -> &[CategoryDescriptor] {
        &self.descriptors
    }

    pub fn panels(&self) -> &[CategoryPanel] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn descriptor(&self, id: CategoryId) -> Option<&CategoryDescriptor> {
        self.descriptors.get(id.index())
    }

    pub fn panel(&self, id: CategoryId) -> Option<&CategoryPanel> {
        self.panels.get(id.index())
    }

    /// Find a category by its menu name.
    pub fn lookup(&self, name: &str) -> Result<CategoryId, LookupError> {
        self.descriptors
            .iter()
            .position(|d| d.name == name)
            .map(CategoryId)
            .ok_or_else(|| LookupError {
                name: name.to_string(),
            })
    }

    /// Place a graphic into a category's panel. Headers and unknown ids are refused.
    pub fn place(&mut self, id: CategoryId, label: &str, image_path: &str) -> bool {
        let Some(descriptor) = self.descriptors.get(id.index()) else {
            warn!("Ignoring placement into unknown category {:?}", id);
            return false;
        };
        if descriptor.is_header {
            warn!(
                "Ignoring placement of '{}' into header '{}'",
                image_path, descriptor.name
            );
            return false;
        }
        self.panels[id.index()].place(label, image_path)
    }

    /// Total number of placed items across all panels.
    pub fn item_count(&self) -> usize {
        self.panels.iter().map(CategoryPanel::len).sum()
    }
}

/// Parse the menu file and scan the pixmaps directory.
///
/// Menu and directory failures are fatal; broken settings files are only reported.
pub fn build_catalog(source: &CatalogSource) -> Result<(Catalog, ScanReport), LoadError> {
    let descriptors = parse_menu_file(&source.menu_file)?;
    let mut catalog = Catalog::new(descriptors);

    let images = enumerate_images(&source.pixmaps_dir)?;
    let report = scan(
        &mut catalog,
        &source.pixmaps_dir,
        images,
        &source.master_tag,
    );
    Ok((catalog, report))
}
