//! Keyboard bindings and the player control state they drive.

use tracing::debug;

use crate::domain::TranscriptCue;
use crate::ports::PlaybackSurface;

pub const SKIP_SECONDS: f64 = 10.0;
pub const VOLUME_STEP: f64 = 0.1;
pub const RATE_STEP: f64 = 0.25;
pub const MIN_RATE: f64 = 0.5;
pub const MAX_RATE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    TogglePlay,
    Skip(f64),
    VolumeUp,
    VolumeDown,
    ToggleMute,
    ToggleFullscreen,
    ToggleCaptions,
    FasterRate,
    SlowerRate,
    /// Digit keys. Bound but inert until percentage seeking is wired up.
    PercentSeek(u8),
}

impl KeyAction {
    pub fn from_key(key: Key) -> Option<Self> {
        let action = match key {
            Key::Left => KeyAction::Skip(-SKIP_SECONDS),
            Key::Right => KeyAction::Skip(SKIP_SECONDS),
            Key::Up => KeyAction::VolumeUp,
            Key::Down => KeyAction::VolumeDown,
            Key::Char(' ' | 'k') => KeyAction::TogglePlay,
            Key::Char('m') => KeyAction::ToggleMute,
            Key::Char('f') => KeyAction::ToggleFullscreen,
            Key::Char('c') => KeyAction::ToggleCaptions,
            Key::Char('>' | '.') => KeyAction::FasterRate,
            Key::Char('<' | ',') => KeyAction::SlowerRate,
            Key::Char(digit @ '0'..='9') => KeyAction::PercentSeek(digit as u8 - b'0'),
            Key::Char(_) => return None,
        };
        Some(action)
    }
}

/// What the caller still has to do after a key was applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlOutcome {
    Applied,
    /// Relative seek; routed through the navigator so the clock stays in step.
    Skip(f64),
    Ignored,
}

/// Transport and presentation state of the player.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    playing: bool,
    volume: f64,
    muted: bool,
    playback_rate: f64,
    fullscreen: bool,
    captions_on: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            playing: false,
            volume: 1.0,
            muted: false,
            playback_rate: 1.0,
            fullscreen: false,
            captions_on: false,
        }
    }
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Volume as heard: zero while muted.
    pub fn effective_volume(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn captions_on(&self) -> bool {
        self.captions_on
    }

    /// Caption line for the active cue, when captions are on.
    pub fn caption<'a>(&self, cue: Option<&'a TranscriptCue>) -> Option<&'a str> {
        if !self.captions_on {
            return None;
        }
        cue.map(|cue| cue.text.as_str())
    }

    pub fn handle_key(&mut self, key: Key, surface: &mut dyn PlaybackSurface) -> ControlOutcome {
        match KeyAction::from_key(key) {
            Some(action) => self.apply(action, surface),
            None => ControlOutcome::Ignored,
        }
    }

    pub fn apply(&mut self, action: KeyAction, surface: &mut dyn PlaybackSurface) -> ControlOutcome {
        match action {
            KeyAction::TogglePlay => self.toggle_play(surface),
            KeyAction::Skip(delta) => return ControlOutcome::Skip(delta),
            KeyAction::VolumeUp => self.set_volume(self.volume + VOLUME_STEP, surface),
            KeyAction::VolumeDown => self.set_volume(self.volume - VOLUME_STEP, surface),
            KeyAction::ToggleMute => {
                self.muted = !self.muted;
                surface.set_muted(self.muted);
            }
            KeyAction::ToggleFullscreen => {
                if self.fullscreen {
                    surface.exit_fullscreen();
                } else {
                    surface.request_fullscreen();
                }
                self.fullscreen = !self.fullscreen;
            }
            KeyAction::ToggleCaptions => self.captions_on = !self.captions_on,
            KeyAction::FasterRate | KeyAction::SlowerRate if !self.playing => {
                debug!("Playback rate only changes while playing.");
                return ControlOutcome::Ignored;
            }
            KeyAction::FasterRate => self.set_rate(self.playback_rate + RATE_STEP, surface),
            KeyAction::SlowerRate => self.set_rate(self.playback_rate - RATE_STEP, surface),
            KeyAction::PercentSeek(_) => return ControlOutcome::Ignored,
        }
        ControlOutcome::Applied
    }

    pub fn toggle_play(&mut self, surface: &mut dyn PlaybackSurface) {
        if self.playing {
            surface.pause();
        } else {
            surface.play();
        }
        self.playing = !self.playing;
    }

    pub fn set_volume(&mut self, volume: f64, surface: &mut dyn PlaybackSurface) {
        self.volume = round_hundredths(volume.clamp(0.0, 1.0));
        surface.set_volume(self.volume);
    }

    pub fn set_rate(&mut self, rate: f64, surface: &mut dyn PlaybackSurface) {
        self.playback_rate = round_hundredths(rate.clamp(MIN_RATE, MAX_RATE));
        surface.set_playback_rate(self.playback_rate);
    }

    /// New media starts paused at normal speed. Volume, mute, captions and
    /// fullscreen carry over.
    pub fn on_media_loaded(&mut self, surface: &mut dyn PlaybackSurface) {
        self.playing = false;
        self.playback_rate = 1.0;
        surface.set_playback_rate(self.playback_rate);
        surface.set_volume(self.volume);
        surface.set_muted(self.muted);
    }

    /// The surface stopped on its own (end of media).
    pub fn on_stopped(&mut self) {
        self.playing = false;
    }
}

// Keeps repeated 0.1 / 0.25 steps from drifting off the grid.
fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
