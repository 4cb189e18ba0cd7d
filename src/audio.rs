//! Audio collaborator interface.
//!
//! The simulation only issues fire-and-forget cues keyed to state changes;
//! it never reads anything back except "is this already playing".

use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    Walk,
    Run,
    Shoot,
}

pub trait AudioSink {
    fn play(&mut self, sound: Sound);
    fn stop(&mut self, sound: Sound);
    fn is_playing(&self, sound: Sound) -> bool;
}

/// Discards every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _sound: Sound) {}
    fn stop(&mut self, _sound: Sound) {}
    fn is_playing(&self, _sound: Sound) -> bool {
        false
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Play(Sound),
    Stop(Sound),
}

/// Tracks which loops are playing and records every cue that changed
/// something. Redundant play/stop commands are ignored.
#[derive(Debug, Default)]
pub struct CueLog {
    playing: HashSet<Sound>,
    cues: Vec<Cue>,
}

impl CueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Take the recorded cues, leaving the playing set untouched.
    pub fn drain(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }
}

impl AudioSink for CueLog {
    fn play(&mut self, sound: Sound) {
        if self.playing.insert(sound) {
            self.cues.push(Cue::Play(sound));
        }
    }

    fn stop(&mut self, sound: Sound) {
        if self.playing.remove(&sound) {
            self.cues.push(Cue::Stop(sound));
        }
    }

    fn is_playing(&self, sound: Sound) -> bool {
        self.playing.contains(&sound)
    }
}
