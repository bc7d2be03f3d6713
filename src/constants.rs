//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 720.0;

/// Height of the name label above each catalog image
pub const ITEM_LABEL_HEIGHT: f32 = 24.0;

/// Edge length of the square catalog image
pub const ITEM_IMAGE_SIZE: f32 = 48.0;

/// Vertical gap between two catalog items
pub const ITEM_GAP: f32 = 24.0;

/// Seconds of pointer absence before the panel parks at the screen edge
pub const REST_TIMEOUT_SECONDS: f32 = 2.0;

/// Game speed the frame speed factor is normalised to (1.0 at this rate)
pub const DEFAULT_FRAMES_PER_SECOND: f32 = 32.0;

/// Panel x position while visible, as a fraction of the window width
pub const DEFAULT_PANEL_HOME_X: f32 = 0.0;

/// Panel x position while parked; mostly off the left edge
pub const DEFAULT_PANEL_REST_X: f32 = -0.19;

/// Panel width as a fraction of the window width
pub const PANEL_WIDTH_FRACTION: f32 = 0.2;

/// Maximum number of thumbnails to decode per frame.
/// Higher values load faster but may cause frame drops.
pub const MAX_THUMBNAILS_PER_FRAME: usize = 3;

/// How long transient status text stays on screen, in seconds
pub const STATUS_TEXT_SECONDS: f32 = 1.5;

/// Sound played when the editor opens
pub const ENTER_SOUND: &str = "sounds/editor/enter.ogg";

/// Sound played when the editor closes
pub const LEAVE_SOUND: &str = "sounds/editor/leave.ogg";
