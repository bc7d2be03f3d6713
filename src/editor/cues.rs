//! Applies controller cues to Bevy: sounds, cursor icon and status text.

use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};

use crate::constants::STATUS_TEXT_SECONDS;

use super::controller::{EditorCue, EditorPanel};

/// Marker for sounds started by the editor panel.
#[derive(Component)]
pub struct EditorSound;

/// A message shown for a limited time.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedText {
    pub text: String,
    pub remaining: f32,
}

/// Transient texts requested by the editor, rendered by the UI.
#[derive(Resource, Default)]
pub struct EditorStatus {
    /// Large centered text (e.g. "Loading")
    pub status: Option<TimedText>,
    /// Small HUD line
    pub hud: Option<TimedText>,
}

impl EditorStatus {
    pub fn tick(&mut self, delta: f32) {
        for slot in [&mut self.status, &mut self.hud] {
            let expired = match slot.as_mut() {
                Some(text) => {
                    text.remaining -= delta;
                    text.remaining <= 0.0
                }
                None => false,
            };
            if expired {
                *slot = None;
            }
        }
    }
}

fn timed(text: String) -> Option<TimedText> {
    Some(TimedText {
        text,
        remaining: STATUS_TEXT_SECONDS,
    })
}

/// Drain queued cues from the panel and act on them.
pub fn apply_editor_cues(
    mut commands: Commands,
    mut panel: ResMut<EditorPanel>,
    mut status: ResMut<EditorStatus>,
    asset_server: Res<AssetServer>,
    sounds: Query<Entity, With<EditorSound>>,
    window_query: Query<Entity, With<PrimaryWindow>>,
) {
    for cue in panel.take_cues() {
        match cue {
            EditorCue::ShowStatus(text) => status.status = timed(text),
            EditorCue::HudText(text) => status.hud = timed(text),
            EditorCue::PlaySound(path) => {
                commands.spawn((
                    AudioPlayer::new(asset_server.load(path)),
                    PlaybackSettings::DESPAWN,
                    EditorSound,
                ));
            }
            EditorCue::StopSounds => {
                for entity in sounds.iter() {
                    commands.entity(entity).despawn();
                }
            }
            EditorCue::CursorActive(active) => {
                let icon = if active {
                    SystemCursorIcon::Crosshair
                } else {
                    SystemCursorIcon::Default
                };
                if let Ok(window) = window_query.single() {
                    commands.entity(window).insert(CursorIcon::System(icon));
                }
            }
            EditorCue::ResetCursor => {
                if let Ok(window) = window_query.single() {
                    commands
                        .entity(window)
                        .insert(CursorIcon::System(SystemCursorIcon::Default));
                }
            }
            EditorCue::ClearAnimations => {
                // Nothing in this host animates level objects yet
                debug!("Editor requested clearing active animations");
            }
        }
    }
}

/// Count down transient texts.
pub fn tick_editor_status(time: Res<Time>, mut status: ResMut<EditorStatus>) {
    status.tick(time.delta_secs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_expires() {
        let mut status = EditorStatus {
            status: timed("Loading".to_string()),
            hud: None,
        };
        status.tick(STATUS_TEXT_SECONDS / 2.0);
        assert!(status.status.is_some());
        status.tick(STATUS_TEXT_SECONDS);
        assert!(status.status.is_none());
    }
}
