//! Fade-and-park behaviour of the editor panel.
//!
//! While the pointer is away the panel fades out over two seconds of game
//! time. Once the timeout is reached it is moved mostly off the left edge and
//! made fully opaque again, so only a sliver stays visible until the pointer
//! comes back.

use crate::constants::REST_TIMEOUT_SECONDS;

/// Observable phase of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityPhase {
    Disabled,
    /// Pointer inside; fully visible at the home position
    Active,
    /// Pointer left; counting toward the rest timeout
    FadingOut,
    /// Parked at the rest position
    Resting,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelVisibility {
    enabled: bool,
    pointer_inside: bool,
    rested: bool,
    /// Accumulated frame speed since the pointer left
    elapsed_since_leave: f32,
    alpha: f32,
    x_offset: f32,
    home_x: f32,
    rest_x: f32,
}

impl PanelVisibility {
    pub fn new(home_x: f32, rest_x: f32) -> Self {
        Self {
            enabled: false,
            pointer_inside: false,
            rested: false,
            elapsed_since_leave: 0.0,
            alpha: 1.0,
            x_offset: home_x,
            home_x,
            rest_x,
        }
    }

    pub fn phase(&self) -> VisibilityPhase {
        if !self.enabled {
            VisibilityPhase::Disabled
        } else if self.pointer_inside {
            VisibilityPhase::Active
        } else if self.rested {
            VisibilityPhase::Resting
        } else {
            VisibilityPhase::FadingOut
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    pub fn is_rested(&self) -> bool {
        self.rested
    }

    pub fn elapsed_since_leave(&self) -> f32 {
        self.elapsed_since_leave
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn x_offset(&self) -> f32 {
        self.x_offset
    }

    /// Show the panel at its home position, fully opaque and not yet fading.
    pub fn enable(&mut self) {
        self.enabled = true;
        self.rested = false;
        self.elapsed_since_leave = 0.0;
        self.alpha = 1.0;
        self.x_offset = self.home_x;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
        self.pointer_inside = false;
    }

    pub fn on_pointer_enter(&mut self) {
        if !self.enabled {
            return;
        }
        self.pointer_inside = true;
        self.elapsed_since_leave = 0.0;
        self.rested = false;
        self.alpha = 1.0;
        self.x_offset = self.home_x;
    }

    pub fn on_pointer_leave(&mut self) {
        if !self.enabled {
            return;
        }
        self.pointer_inside = false;
    }

    /// Advance the fade by one frame.
    ///
    /// `frame_speed` is 1.0 when the game runs at `frames_per_second`. The
    /// timeout is reached on the tick where the accumulated speed first meets
    /// `frames_per_second * 2`.
    pub fn tick(&mut self, frame_speed: f32, frames_per_second: f32) {
        if self.phase() != VisibilityPhase::FadingOut {
            return;
        }

        let timeout = frames_per_second * REST_TIMEOUT_SECONDS;
        self.elapsed_since_leave += frame_speed.max(0.0);

        if self.elapsed_since_leave >= timeout {
            // Parked panels stay opaque; they are hidden by position, not alpha
            self.x_offset = self.rest_x;
            self.alpha = 1.0;
            self.rested = true;
            self.elapsed_since_leave = 0.0;
        } else {
            self.alpha = 1.0 - self.elapsed_since_leave / timeout;
        }
    }
}
