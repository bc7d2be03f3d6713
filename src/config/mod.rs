use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::CatalogSource;
use crate::constants::{DEFAULT_FRAMES_PER_SECOND, DEFAULT_PANEL_HOME_X, DEFAULT_PANEL_REST_X};
use crate::editor::{EditorKind, PanelLayout};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Root of the game graphics; `None` uses the platform default
    #[serde(default)]
    pub pixmaps_dir: Option<PathBuf>,

    /// Directory holding `level_items.xml` and `world_items.xml`
    #[serde(default)]
    pub editor_data_dir: Option<PathBuf>,

    /// Editor opened on startup
    #[serde(default)]
    pub editor_kind: EditorKind,

    /// Game speed at which one frame advances the fade timer by 1.0
    #[serde(default = "default_frames_per_second")]
    pub frames_per_second: f32,

    /// Panel x position while visible, fraction of window width
    #[serde(default = "default_panel_home_x")]
    pub panel_home_x: f32,

    /// Panel x position while parked, fraction of window width
    #[serde(default = "default_panel_rest_x")]
    pub panel_rest_x: f32,
}

fn default_frames_per_second() -> f32 {
    DEFAULT_FRAMES_PER_SECOND
}

fn default_panel_home_x() -> f32 {
    DEFAULT_PANEL_HOME_X
}

fn default_panel_rest_x() -> f32 {
    DEFAULT_PANEL_REST_X
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            pixmaps_dir: None,
            editor_data_dir: None,
            editor_kind: EditorKind::default(),
            frames_per_second: DEFAULT_FRAMES_PER_SECOND,
            panel_home_x: DEFAULT_PANEL_HOME_X,
            panel_rest_x: DEFAULT_PANEL_REST_X,
        }
    }
}

impl AppConfigData {
    pub fn pixmaps_dir(&self) -> PathBuf {
        self.pixmaps_dir
            .clone()
            .unwrap_or_else(crate::paths::default_pixmaps_dir)
    }

    pub fn editor_data_dir(&self) -> PathBuf {
        self.editor_data_dir
            .clone()
            .unwrap_or_else(crate::paths::default_editor_data_dir)
    }

    /// Where to find the menu, the graphics and which master tag to filter by.
    pub fn catalog_source(&self, kind: EditorKind) -> CatalogSource {
        CatalogSource {
            menu_file: self.editor_data_dir().join(kind.menu_file_name()),
            pixmaps_dir: self.pixmaps_dir(),
            master_tag: kind.master_tag().to_string(),
        }
    }

    /// Panel layout, with non-positive frame rates replaced by the default.
    pub fn panel_layout(&self) -> PanelLayout {
        let frames_per_second = if self.frames_per_second > 0.0 {
            self.frames_per_second
        } else {
            warn!(
                "Ignoring invalid frames_per_second {} in config",
                self.frames_per_second
            );
            DEFAULT_FRAMES_PER_SECOND
        };
        PanelLayout {
            home_x: self.panel_home_x,
            rest_x: self.panel_rest_x,
            frames_per_second,
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to remember the active editor kind
#[derive(Message)]
pub struct SetEditorKindRequest {
    pub kind: EditorKind,
}

/// Parse config JSON. Returns defaults and a user-facing reason on failure.
fn parse_config(json: &str) -> (AppConfigData, Option<String>) {
    match serde_json::from_str(json) {
        Ok(data) => (data, None),
        Err(e) => {
            warn!("Failed to parse config file: {}", e);
            (
                AppConfigData::default(),
                Some(format!("Configuration file was corrupted: {}", e)),
            )
        }
    }
}

/// Load configuration from disk
fn load_config(config_path: PathBuf) -> (AppConfig, Option<String>) {
    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => {
                let result = parse_config(&json);
                if result.1.is_none() {
                    info!("Loaded config from {:?}", config_path);
                }
                result
            }
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    (
        AppConfig {
            data,
            config_path,
            dirty: false,
        },
        reset_reason,
    )
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    if let Err(e) = crate::paths::ensure_directories() {
        warn!("Failed to create application directories: {}", e);
    }

    let (loaded, reset_reason) = load_config(crate::paths::config_file());
    *config = loaded;

    // Set notification if config was reset due to an error
    if let Some(reason) = reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to persist the editor kind
fn set_editor_kind_system(
    mut events: MessageReader<SetEditorKindRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.editor_kind == event.kind {
            continue;
        }
        config.data.editor_kind = event.kind;
        config.dirty = true;
        save_events.write(SaveConfigRequest);
        info!("Default editor set to {}", event.kind.display_name());
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<SetEditorKindRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    set_editor_kind_system.run_if(on_message::<SetEditorKindRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_data_default() {
        let data = AppConfigData::default();
        assert!(data.pixmaps_dir.is_none());
        assert!(data.editor_data_dir.is_none());
        assert_eq!(data.editor_kind, EditorKind::Level);
        assert_eq!(data.frames_per_second, DEFAULT_FRAMES_PER_SECOND);
    }

    #[test]
    fn test_app_config_data_serialization() {
        let data = AppConfigData {
            pixmaps_dir: Some(PathBuf::from("/games/tsc/pixmaps")),
            editor_data_dir: Some(PathBuf::from("/games/tsc/editor")),
            editor_kind: EditorKind::World,
            frames_per_second: 60.0,
            panel_home_x: 0.01,
            panel_rest_x: -0.2,
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed: AppConfigData = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.pixmaps_dir, data.pixmaps_dir);
        assert_eq!(parsed.editor_data_dir, data.editor_data_dir);
        assert_eq!(parsed.editor_kind, EditorKind::World);
        assert_eq!(parsed.frames_per_second, 60.0);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let (data, reason) = parse_config(r#"{ "editor_kind": "world" }"#);
        assert!(reason.is_none());
        assert_eq!(data.editor_kind, EditorKind::World);
        assert_eq!(data.panel_rest_x, DEFAULT_PANEL_REST_X);
        assert_eq!(data.frames_per_second, DEFAULT_FRAMES_PER_SECOND);
    }

    #[test]
    fn test_corrupt_config_resets() {
        let (data, reason) = parse_config("{ not json");
        assert!(reason.is_some());
        assert_eq!(data.editor_kind, EditorKind::Level);
    }

    #[test]
    fn test_catalog_source_per_kind() {
        let data = AppConfigData {
            pixmaps_dir: Some(PathBuf::from("pix")),
            editor_data_dir: Some(PathBuf::from("editor")),
            ..Default::default()
        };
        let source = data.catalog_source(EditorKind::World);
        assert_eq!(source.menu_file, PathBuf::from("editor/world_items.xml"));
        assert_eq!(source.pixmaps_dir, PathBuf::from("pix"));
        assert_eq!(source.master_tag, "world");
    }

    #[test]
    fn test_invalid_frame_rate_falls_back() {
        let data = AppConfigData {
            frames_per_second: 0.0,
            ..Default::default()
        };
        assert_eq!(data.panel_layout().frames_per_second, DEFAULT_FRAMES_PER_SECOND);
    }

    #[test]
    fn test_load_config_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "frames_per_second": 50.0 }"#).unwrap();

        let (config, reason) = load_config(path.clone());
        assert!(reason.is_none());
        assert_eq!(config.config_path, path);
        assert_eq!(config.data.frames_per_second, 50.0);
        assert!(!config.dirty);
    }
}
