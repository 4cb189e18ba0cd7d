//! Frame-based sprite animation.
//!
//! The simulation never touches pixels. Each animation state maps to a
//! [`Clip`]: a handle into an externally owned frame atlas plus a frame count
//! and a per-frame delay in ticks. An [`Animator`] is the per-entity cursor
//! that walks a clip.

use serde::{Deserialize, Serialize};

/// Identifies one sprite strip in the renderer's atlas registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AtlasId(pub u16);

/// A single drawable frame: which strip, which cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRef {
    pub atlas: AtlasId,
    pub index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip {
    pub atlas: AtlasId,
    /// Number of frames in the strip. Zero means "nothing to draw".
    pub frames: usize,
    /// Ticks each frame stays on screen.
    pub delay: u32,
}

impl Clip {
    pub const fn new(atlas: u16, frames: usize, delay: u32) -> Self {
        Self {
            atlas: AtlasId(atlas),
            frames,
            delay,
        }
    }

    /// Index of the final frame, or `None` for an empty clip.
    pub fn last_frame(&self) -> Option<usize> {
        self.frames.checked_sub(1)
    }
}

/// Frame cursor for one entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Animator {
    pub frame: usize,
    pub counter: u32,
}

impl Animator {
    pub fn reset(&mut self) {
        self.frame = 0;
        self.counter = 0;
    }

    /// Advance one tick, wrapping back to the first frame after the last.
    /// Empty clips leave the cursor untouched.
    pub fn advance(&mut self, clip: &Clip) {
        if clip.frames == 0 {
            return;
        }
        self.counter = self.counter.saturating_add(1);
        if self.counter >= clip.delay {
            self.frame = (self.frame + 1) % clip.frames;
            self.counter = 0;
        }
    }

    /// Advance one tick, stopping on the last frame.
    pub fn advance_once(&mut self, clip: &Clip) {
        if clip.frames == 0 {
            return;
        }
        self.counter = self.counter.saturating_add(1);
        if self.counter >= clip.delay {
            if self.frame + 1 < clip.frames {
                self.frame += 1;
            }
            self.counter = 0;
        }
    }

    /// The frame to draw, if the cursor is inside the clip.
    pub fn frame(&self, clip: &Clip) -> Option<FrameRef> {
        (self.frame < clip.frames).then_some(FrameRef {
            atlas: clip.atlas,
            index: self.frame,
        })
    }

    /// True once the cursor sits on the clip's final frame. Empty clips are
    /// always finished.
    pub fn is_on_last_frame(&self, clip: &Clip) -> bool {
        clip.last_frame().map_or(true, |last| self.frame == last)
    }
}

// ── Clip tables ──────────────────────────────────────────────────────────────

/// One clip per player animation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerClips {
    pub idle: Clip,
    pub walking: Clip,
    pub running: Clip,
    pub shooting: Clip,
    pub sitting: Clip,
    pub sitting_shooting: Clip,
    pub jumping: Clip,
    pub resting: Clip,
    pub sleeping: Clip,
    pub dying: Clip,
}

impl Default for PlayerClips {
    fn default() -> Self {
        Self {
            idle: Clip::new(0, 6, 300),
            walking: Clip::new(1, 5, 300),
            running: Clip::new(2, 5, 300),
            shooting: Clip::new(3, 8, 300),
            sitting: Clip::new(4, 3, 300),
            sitting_shooting: Clip::new(5, 3, 300),
            jumping: Clip::new(6, 5, 500),
            resting: Clip::new(7, 4, 5000),
            sleeping: Clip::new(8, 5, 5000),
            dying: Clip::new(9, 4, 10000),
        }
    }
}

impl PlayerClips {
    pub fn all(&self) -> [&Clip; 10] {
        [
            &self.idle,
            &self.walking,
            &self.running,
            &self.shooting,
            &self.sitting,
            &self.sitting_shooting,
            &self.jumping,
            &self.resting,
            &self.sleeping,
            &self.dying,
        ]
    }
}

/// One clip per zombie state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZombieClips {
    pub idle: Clip,
    pub walking: Clip,
    pub attacking: Clip,
    pub dead: Clip,
}

impl Default for ZombieClips {
    fn default() -> Self {
        Self {
            idle: Clip::new(10, 4, 800),
            walking: Clip::new(11, 6, 400),
            attacking: Clip::new(12, 4, 300),
            dead: Clip::new(13, 5, 600),
        }
    }
}

impl ZombieClips {
    pub fn all(&self) -> [&Clip; 4] {
        [&self.idle, &self.walking, &self.attacking, &self.dead]
    }
}
