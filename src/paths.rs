//! Centralized path resolution for platform-appropriate user data directories.
//!
//! In development mode (cargo run), paths resolve to local directories.
//! In installed mode, paths resolve to platform-specific locations:
//! - Windows: `%APPDATA%\Levelforge\`
//! - macOS: `~/Library/Application Support/Levelforge/`
//! - Linux: `~/.config/levelforge/` (config), `~/.local/share/levelforge/` (data)

use std::path::PathBuf;

/// Returns true when running in development mode (cargo run).
///
/// Detection methods:
/// - `CARGO` env var is set (cargo run sets this)
/// - Debug assertions enabled (debug builds)
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// Platform-appropriate config directory.
///
/// - Dev mode: current directory
/// - Linux: `~/.config/levelforge/`
/// - Windows/macOS: same as data_dir
pub fn config_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    #[cfg(target_os = "linux")]
    {
        dirs::config_dir().map(|p| p.join("levelforge"))
    }

    #[cfg(not(target_os = "linux"))]
    {
        data_dir()
    }
}

/// Platform-appropriate data directory.
///
/// - Dev mode: current directory
/// - Windows: `%APPDATA%\Levelforge\`
/// - macOS: `~/Library/Application Support/Levelforge/`
/// - Linux: `~/.local/share/levelforge/`
pub fn data_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    dirs::data_dir().map(|p| p.join("levelforge"))
}

/// Path to the config file.
///
/// - Dev mode: `./config.json`
/// - Installed: `{config_dir}/config.json`
pub fn config_file() -> PathBuf {
    config_dir()
        .map(|p| p.join("config.json"))
        .unwrap_or_else(|| PathBuf::from("config.json"))
}

/// Root of the game graphics.
///
/// - Dev mode: `./assets/pixmaps/`
/// - Installed: `{data_dir}/pixmaps/`
pub fn default_pixmaps_dir() -> PathBuf {
    if is_dev_mode() {
        return PathBuf::from("assets/pixmaps");
    }

    data_dir()
        .map(|p| p.join("pixmaps"))
        .unwrap_or_else(|| PathBuf::from("assets/pixmaps"))
}

/// Directory with the editor menu definitions.
///
/// - Dev mode: `./assets/editor/`
/// - Installed: `{data_dir}/editor/`
pub fn default_editor_data_dir() -> PathBuf {
    if is_dev_mode() {
        return PathBuf::from("assets/editor");
    }

    data_dir()
        .map(|p| p.join("editor"))
        .unwrap_or_else(|| PathBuf::from("assets/editor"))
}

/// Path to the logs directory.
///
/// - Dev mode: `./logs/`
/// - Installed: `{data_dir}/logs/`
pub fn logs_dir() -> PathBuf {
    data_dir()
        .map(|p| p.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Ensure all required directories exist.
///
/// Called early in startup to create config and data directories.
pub fn ensure_directories() -> std::io::Result<()> {
    if is_dev_mode() {
        // In dev mode, directories are local and typically exist
        return Ok(());
    }

    if let Some(config) = config_dir() {
        std::fs::create_dir_all(&config)?;
    }
    if let Some(data) = data_dir() {
        std::fs::create_dir_all(&data)?;
        std::fs::create_dir_all(data.join("logs"))?;
    }
    Ok(())
}
