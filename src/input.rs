//! Control state handed to the simulation each tick.
//!
//! Front ends poll whatever device they like and reduce it to two bitsets:
//! which controls are held right now (`down`) and which went down this tick
//! (`pressed`).

/// Held and freshly-pressed controls for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub down: u8,
    pub pressed: u8,
}

impl InputState {
    pub const LEFT: u8 = 1 << 0;
    pub const RIGHT: u8 = 1 << 1;
    pub const CROUCH: u8 = 1 << 2;
    pub const RUN: u8 = 1 << 3;
    pub const FIRE: u8 = 1 << 4;
    pub const JUMP: u8 = 1 << 5;
    /// Consume the held item.
    pub const USE: u8 = 1 << 6;

    pub const fn new() -> Self {
        Self {
            down: 0,
            pressed: 0,
        }
    }

    /// Controls held since an earlier tick (no fresh edges).
    pub const fn held(down: u8) -> Self {
        Self { down, pressed: 0 }
    }

    /// Add controls that went down this tick. A press is also a hold.
    pub const fn with_pressed(self, bits: u8) -> Self {
        Self {
            down: self.down | bits,
            pressed: self.pressed | bits,
        }
    }

    #[inline]
    pub const fn is_down(&self, control: u8) -> bool {
        self.down & control != 0
    }

    #[inline]
    pub const fn was_pressed(&self, control: u8) -> bool {
        self.pressed & control != 0
    }
}

/// Derives press edges from successive "held" snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputTracker {
    previous: u8,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, down: u8) -> InputState {
        let pressed = down & !self.previous;
        self.previous = down;
        InputState { down, pressed }
    }
}
