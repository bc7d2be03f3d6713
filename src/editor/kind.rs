use serde::{Deserialize, Serialize};

/// Which editor instance the panel serves. Each one catalogues only graphics
/// tagged with its master tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EditorKind {
    #[default]
    Level,
    World,
}

impl EditorKind {
    pub fn master_tag(&self) -> &'static str {
        match self {
            EditorKind::Level => "level",
            EditorKind::World => "world",
        }
    }

    pub fn menu_file_name(&self) -> &'static str {
        match self {
            EditorKind::Level => "level_items.xml",
            EditorKind::World => "world_items.xml",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EditorKind::Level => "Level Editor",
            EditorKind::World => "World Editor",
        }
    }

    pub fn other(&self) -> EditorKind {
        match self {
            EditorKind::Level => EditorKind::World,
            EditorKind::World => EditorKind::Level,
        }
    }
}
