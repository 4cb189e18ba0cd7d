//! Zombie behaviour and lifecycle.

use glam::Vec2;
use tracing::{debug, info};

use super::Facing;
use crate::animation::{Animator, Clip, FrameRef, ZombieClips};
use crate::config::{WorldBounds, ZombieConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZombieState {
    /// Player out of detection range.
    Idle,
    /// Walking toward the player.
    Chasing,
    /// In reach, striking on a cooldown.
    Attacking,
    /// Terminal. The death clip plays once, then the world evicts the zombie.
    Dead,
}

impl ZombieState {
    pub fn clip(self, clips: &ZombieClips) -> &Clip {
        match self {
            ZombieState::Idle => &clips.idle,
            ZombieState::Chasing => &clips.walking,
            ZombieState::Attacking => &clips.attacking,
            ZombieState::Dead => &clips.dead,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Zombie {
    /// Centre of the body; also the centre of the hit circle.
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub health: f32,
    pub facing: Facing,
    alive: bool,
    state: ZombieState,
    animator: Animator,
    attack_timer: u32,
    stats: ZombieConfig,
    clips: ZombieClips,
}

impl Zombie {
    pub fn new(position: Vec2, stats: ZombieConfig, clips: ZombieClips) -> Self {
        Self {
            position,
            width: stats.width,
            height: stats.height,
            health: stats.max_health,
            facing: Facing::Left,
            alive: true,
            state: ZombieState::Idle,
            animator: Animator::default(),
            attack_timer: 0,
            stats,
            clips,
        }
    }

    /// Place a zombie standing on the ground at horizontal position `x`.
    pub fn spawn(x: f32, bounds: &WorldBounds, stats: ZombieConfig, clips: ZombieClips) -> Self {
        let y = bounds.height - stats.height / 2.0;
        Self::new(Vec2::new(x, y), stats, clips)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn state(&self) -> ZombieState {
        self.state
    }

    pub fn current_frame(&self) -> usize {
        self.animator.frame
    }

    pub fn clips(&self) -> &ZombieClips {
        &self.clips
    }

    /// Frame to draw this tick, if the active clip has one.
    pub fn frame(&self) -> Option<FrameRef> {
        self.animator.frame(self.state.clip(&self.clips))
    }

    fn set_state(&mut self, state: ZombieState) {
        if self.state != state {
            self.state = state;
            self.animator.reset();
        }
    }

    /// Advance one tick toward `player_position`.
    ///
    /// Returns the damage dealt to the player this tick, if the zombie struck.
    pub fn update(&mut self, bounds: &WorldBounds, player_position: Vec2) -> Option<f32> {
        if !self.alive {
            self.animator.advance_once(&self.clips.dead);
            return None;
        }

        self.attack_timer = self.attack_timer.saturating_sub(1);

        let dx = player_position.x - self.position.x;
        let distance = dx.abs();
        let next = if distance <= self.stats.attack_range {
            ZombieState::Attacking
        } else if distance <= self.stats.detection_range {
            ZombieState::Chasing
        } else {
            ZombieState::Idle
        };
        self.set_state(next);

        if dx > 0.0 {
            self.facing = Facing::Right;
        } else if dx < 0.0 {
            self.facing = Facing::Left;
        }

        let mut strike = None;
        match self.state {
            ZombieState::Chasing => {
                let step = self.stats.speed.min(distance);
                let half = self.width / 2.0;
                self.position.x = (self.position.x + step * dx.signum()).clamp(half, bounds.width - half);
            }
            ZombieState::Attacking if self.attack_timer == 0 => {
                self.attack_timer = self.stats.attack_cooldown_ticks;
                debug!(x = self.position.x, "zombie strikes");
                strike = Some(self.stats.attack_damage);
            }
            _ => {}
        }

        self.animator.advance(self.state.clip(&self.clips));
        strike
    }

    /// Subtract `amount` from health. Reaching zero kills the zombie and
    /// starts its death clip from the first frame.
    pub fn take_damage(&mut self, amount: f32) {
        if !self.alive {
            return;
        }
        self.health -= amount;
        if self.health <= 0.0 {
            self.alive = false;
            self.set_state(ZombieState::Dead);
            info!(x = self.position.x, "zombie killed");
        }
    }

    /// Dead, in the Dead state, and showing the last death frame.
    pub fn is_removable(&self) -> bool {
        !self.alive
            && self.state == ZombieState::Dead
            && self.animator.is_on_last_frame(&self.clips.dead)
    }
}
