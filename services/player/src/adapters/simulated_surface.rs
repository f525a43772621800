//! services/player/src/adapters/simulated_surface.rs
//!
//! A playback surface without any media behind it. It keeps a virtual clock that
//! the session advances on every tick, and queues the same time/ended events a
//! real player would emit.

use std::collections::VecDeque;
use std::time::Duration;

use course_player_core::ports::{PlaybackSurface, SurfaceEvent};
use course_player_core::Lesson;
use tracing::debug;

use crate::session::PolledSurface;

#[derive(Debug)]
pub struct SimulatedSurface {
    media: Option<String>,
    duration: f64,
    position: f64,
    playing: bool,
    volume: f64,
    muted: bool,
    playback_rate: f64,
    fullscreen: bool,
    pending: VecDeque<SurfaceEvent>,
}

impl Default for SimulatedSurface {
    fn default() -> Self {
        Self {
            media: None,
            duration: 0.0,
            position: 0.0,
            playing: false,
            volume: 1.0,
            muted: false,
            playback_rate: 1.0,
            fullscreen: false,
            pending: VecDeque::new(),
        }
    }
}

impl SimulatedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn media(&self) -> Option<&str> {
        self.media.as_deref()
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f64 {
        self.volume
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
}

impl PlaybackSurface for SimulatedSurface {
    fn load(&mut self, lesson: &Lesson) {
        debug!("Loading media {}.", lesson.url);
        self.media = Some(lesson.url.clone());
        self.duration = f64::from(lesson.duration_sec);
        self.position = 0.0;
        self.playing = false;
        self.pending.clear();
        self.pending
            .push_back(SurfaceEvent::LoadedDuration(self.duration));
    }

    fn play(&mut self) {
        if self.media.is_none() {
            return;
        }
        // Playing from the very end starts over, as browsers do.
        if self.position >= self.duration {
            self.position = 0.0;
            self.pending.push_back(SurfaceEvent::TimeUpdate(0.0));
        }
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds.clamp(0.0, self.duration);
        self.pending.push_back(SurfaceEvent::TimeUpdate(self.position));
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.playback_rate = rate;
    }

    fn request_fullscreen(&mut self) {
        self.fullscreen = true;
    }

    fn exit_fullscreen(&mut self) {
        self.fullscreen = false;
    }
}

impl PolledSurface for SimulatedSurface {
    /// Moves the clock forward by `elapsed` wall time, scaled by the playback rate.
    fn advance(&mut self, elapsed: Duration) {
        if !self.playing {
            return;
        }
        self.position += elapsed.as_secs_f64() * self.playback_rate;
        if self.position >= self.duration {
            self.position = self.duration;
            self.playing = false;
            self.pending.push_back(SurfaceEvent::TimeUpdate(self.position));
            self.pending.push_back(SurfaceEvent::Ended);
        } else {
            self.pending.push_back(SurfaceEvent::TimeUpdate(self.position));
        }
    }

    fn drain_events(&mut self) -> Vec<SurfaceEvent> {
        self.pending.drain(..).collect()
    }
}
