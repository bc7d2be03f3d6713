//! Per-graphic `.settings` sidecar files.
//!
//! The format is one `key value` pair per line; the first run of whitespace
//! separates the key from the value. Only `name` and `editor_tags` matter to
//! the editor catalog, other keys (`width`, `type`, `ground_type`, ...) are
//! accepted and ignored.

use std::path::{Path, PathBuf};

use crate::error::SettingsParseError;
use crate::menu::TagSet;

/// Extension of the sidecar file that sits next to every catalogued graphic.
pub const SETTINGS_EXTENSION: &str = "settings";

/// The parts of a graphic's settings that the editor catalog uses.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetSettings {
    pub display_name: String,
    /// Raw `;`-delimited tag string as written in the file
    pub editor_tags: String,
    tags: TagSet,
}

impl AssetSettings {
    pub fn new(display_name: impl Into<String>, editor_tags: impl Into<String>) -> Self {
        let editor_tags = editor_tags.into();
        let tags = TagSet::parse(&editor_tags);
        Self {
            display_name: display_name.into(),
            editor_tags,
            tags,
        }
    }

    pub fn load(path: &Path) -> Result<Self, SettingsParseError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, SettingsParseError> {
        let mut name = None;
        let mut editor_tags = None;

        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = match line.split_once(char::is_whitespace) {
                Some((key, value)) => (key, value.trim()),
                None => (line, ""),
            };

            let slot = match key {
                "name" => &mut name,
                "editor_tags" => &mut editor_tags,
                _ => continue,
            };
            if value.is_empty() {
                return Err(SettingsParseError::MissingValue {
                    line: number + 1,
                    key: key.to_string(),
                });
            }
            *slot = Some(value.to_string());
        }

        let name = name.ok_or(SettingsParseError::MissingName)?;
        Ok(Self::new(name, editor_tags.unwrap_or_default()))
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Whether the graphic belongs to the editor identified by `master_tag`.
    pub fn has_master_tag(&self, master_tag: &str) -> bool {
        self.tags.contains(master_tag)
    }
}

/// Sidecar settings path for an image: same path, `.settings` extension.
pub fn settings_path_for(image_path: &Path) -> PathBuf {
    image_path.with_extension(SETTINGS_EXTENSION)
}
