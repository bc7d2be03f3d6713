//! Error types for the editor catalog.
//!
//! Menu file failures abort catalog loading, settings failures only drop the
//! affected asset, and lookups of unknown categories are reported to the caller.

use std::path::PathBuf;

/// Errors that make the menu definition unusable. Fatal to editor initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Menu file missing or unreadable
    #[error("Failed to read menu file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Menu file is not well-formed XML of the expected shape
    #[error("Malformed menu file {origin}: {source}")]
    Xml {
        origin: String,
        #[source]
        source: quick_xml::de::DeError,
    },

    /// An `<item>` lacks a required attribute
    #[error("Menu item #{index} in {origin} is missing the '{attribute}' attribute")]
    MissingAttribute {
        origin: String,
        index: usize,
        attribute: &'static str,
    },

    /// A color attribute that is not an 8-digit hex value
    #[error("Menu item '{name}' has invalid color '{value}' (expected RRGGBBAA)")]
    InvalidColor { name: String, value: String },

    /// A non-header item whose tag list is empty
    #[error("Menu item '{name}' declares no tags")]
    EmptyTags { name: String },

    /// Two items share a name
    #[error("Menu item '{name}' is declared more than once")]
    DuplicateName { name: String },

    /// The image directory could not be listed
    #[error("Failed to enumerate images in {path:?}: {source}")]
    AssetDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors for a single asset's `.settings` file. The asset is left out of the catalog.
#[derive(Debug, thiserror::Error)]
pub enum SettingsParseError {
    #[error("Failed to read settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A recognised key without a value
    #[error("Line {line}: '{key}' has no value")]
    MissingValue { line: usize, key: String },

    /// No `name` entry in the file
    #[error("Settings file has no 'name' entry")]
    MissingName,
}

/// A category name that is not part of the loaded menu.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Category '{name}' is not in the editor menu")]
pub struct LookupError {
    pub name: String,
}

/// Errors returned by the editor panel controller.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Result type alias for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
