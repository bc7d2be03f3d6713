//! Asset scanner: walks the pixmaps directory and sorts graphics into panels.

use bevy::prelude::*;
use std::path::{Path, PathBuf};

use crate::error::{LoadError, SettingsParseError};
use crate::menu::find_categories;

use super::Catalog;
use super::settings::{AssetSettings, settings_path_for};

/// Extension of graphics considered for the catalog.
pub const IMAGE_EXTENSION: &str = "png";

/// Outcome of one scan pass.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Image files looked at
    pub scanned: usize,
    /// Graphics that passed the master tag check
    pub catalogued: usize,
    /// Items placed, counting each category separately
    pub placements: usize,
    /// Images without a `.settings` sidecar
    pub without_settings: usize,
    /// Graphics tagged for a different editor
    pub foreign: usize,
    /// Settings files that could not be parsed
    pub failures: Vec<(PathBuf, SettingsParseError)>,
}

/// Collect every `.png` below `root`, sorted so scans are reproducible.
pub fn enumerate_images(root: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let entries = std::fs::read_dir(root).map_err(|source| LoadError::AssetDirectory {
        path: root.to_path_buf(),
        source,
    })?;

    let mut images = Vec::new();
    let mut pending: Vec<PathBuf> = Vec::new();
    collect_entries(entries, &mut images, &mut pending);

    while let Some(dir) = pending.pop() {
        match std::fs::read_dir(&dir) {
            Ok(entries) => collect_entries(entries, &mut images, &mut pending),
            Err(e) => warn!("Failed to read directory {:?}: {}", dir, e),
        }
    }

    images.sort();
    Ok(images)
}

fn collect_entries(entries: std::fs::ReadDir, images: &mut Vec<PathBuf>, dirs: &mut Vec<PathBuf>) {
    for entry in entries.flatten() {
        let path = entry.path();
        // Symlinked directories are not followed; a link cycle would never end
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            dirs.push(path);
        } else if is_image_file(&path) {
            images.push(path);
        }
    }
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(IMAGE_EXTENSION))
        .unwrap_or(false)
}

/// Pixmap path relative to `root` with `/` separators, as used for labels and texture ids.
pub fn relative_pixmap_path(root: &Path, image_path: &Path) -> String {
    let relative = image_path.strip_prefix(root).unwrap_or(image_path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// What happened to a single graphic during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddOutcome {
    NoSettings,
    Foreign,
    Placed(usize),
}

/// Try to add one graphic to the catalog.
fn try_add_editor_item(
    catalog: &mut Catalog,
    pixmaps_root: &Path,
    image_path: &Path,
    master_tag: &str,
) -> Result<AddOutcome, SettingsParseError> {
    // Most raw graphics have no settings file and are not meant for the editor
    let settings_file = settings_path_for(image_path);
    if !settings_file.exists() {
        return Ok(AddOutcome::NoSettings);
    }

    let settings = AssetSettings::load(&settings_file)?;
    if !settings.has_master_tag(master_tag) {
        return Ok(AddOutcome::Foreign);
    }

    let pixmap = relative_pixmap_path(pixmaps_root, image_path);
    let mut placed = 0;
    for id in find_categories(settings.tags(), catalog.descriptors()) {
        if catalog.place(id, &settings.display_name, &pixmap) {
            placed += 1;
        }
    }
    Ok(AddOutcome::Placed(placed))
}

/// Place every graphic from `image_paths` into the categories its tags select.
///
/// A broken settings file is logged and skipped; it never stops the scan.
pub fn scan<I>(catalog: &mut Catalog, pixmaps_root: &Path, image_paths: I, master_tag: &str) -> ScanReport
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut report = ScanReport::default();

    for image_path in image_paths {
        report.scanned += 1;

        match try_add_editor_item(catalog, pixmaps_root, &image_path, master_tag) {
            Ok(AddOutcome::NoSettings) => report.without_settings += 1,
            Ok(AddOutcome::Foreign) => report.foreign += 1,
            Ok(AddOutcome::Placed(placed)) => {
                report.catalogued += 1;
                report.placements += placed;
            }
            Err(e) => {
                warn!("Skipping {:?}: {}", image_path, e);
                report.failures.push((image_path, e));
            }
        }
    }

    info!(
        "Scanned {} images for '{}': {} catalogued, {} placements, {} failed",
        report.scanned,
        master_tag,
        report.catalogued,
        report.placements,
        report.failures.len()
    );
    report
}
