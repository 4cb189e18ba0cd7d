//! The controlled character: input-driven state machine, jump physics,
//! shooting and animation.

use glam::Vec2;
use tracing::{debug, info};

use super::bullet::{self, Bullet};
use super::inventory::{Inventory, Item, ItemKind};
use super::zombie::Zombie;
use super::Facing;
use crate::animation::{Animator, Clip, FrameRef, PlayerClips};
use crate::audio::{AudioSink, Sound};
use crate::config::{BulletConfig, GameConfig, GravityProfile, PlayerConfig, WorldBounds};
use crate::input::InputState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Walking,
    Running,
    Shooting,
    Sitting,
    SittingShooting,
    Jumping,
    Resting,
    Sleeping,
    Dying,
}

impl PlayerState {
    pub fn clip(self, clips: &PlayerClips) -> &Clip {
        match self {
            PlayerState::Idle => &clips.idle,
            PlayerState::Walking => &clips.walking,
            PlayerState::Running => &clips.running,
            PlayerState::Shooting => &clips.shooting,
            PlayerState::Sitting => &clips.sitting,
            PlayerState::SittingShooting => &clips.sitting_shooting,
            PlayerState::Jumping => &clips.jumping,
            PlayerState::Resting => &clips.resting,
            PlayerState::Sleeping => &clips.sleeping,
            PlayerState::Dying => &clips.dying,
        }
    }

    pub fn is_crouched(self) -> bool {
        matches!(self, PlayerState::Sitting | PlayerState::SittingShooting)
    }

    /// Resting and sleeping survive a tick with no input.
    pub fn is_dozing(self) -> bool {
        matches!(self, PlayerState::Resting | PlayerState::Sleeping)
    }
}

// ── Transition rules ─────────────────────────────────────────────────────────

/// What the winning transition rule asks the player to do this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    Crouch { firing: bool },
    Jump,
    Shoot,
    Move { facing: Facing, running: bool },
    Idle,
}

/// Everything a rule may look at.
#[derive(Clone, Copy, Debug)]
pub struct RuleContext<'a> {
    pub input: &'a InputState,
    /// State before this tick's transition.
    pub state: PlayerState,
    pub on_ground: bool,
}

impl RuleContext<'_> {
    fn free_to_move(&self) -> bool {
        self.state != PlayerState::Shooting && !self.state.is_crouched()
    }

    fn movement(&self, dir: u8, facing: Facing, running: bool) -> Option<Action> {
        let run_ok = !running || self.input.is_down(InputState::RUN);
        (self.input.is_down(dir) && run_ok && self.free_to_move())
            .then_some(Action::Move { facing, running })
    }
}

pub struct TransitionRule {
    pub name: &'static str,
    pub select: fn(&RuleContext) -> Option<Action>,
}

/// Evaluated top to bottom once per tick; the first rule that fires wins.
pub const TRANSITION_RULES: [TransitionRule; 8] = [
    TransitionRule {
        name: "crouch",
        select: |ctx| {
            ctx.input.is_down(InputState::CROUCH).then_some(Action::Crouch {
                firing: ctx.input.is_down(InputState::FIRE),
            })
        },
    },
    TransitionRule {
        name: "jump",
        select: |ctx| (ctx.input.was_pressed(InputState::JUMP) && ctx.on_ground).then_some(Action::Jump),
    },
    TransitionRule {
        name: "shoot",
        select: |ctx| {
            (ctx.input.is_down(InputState::FIRE) && !ctx.state.is_crouched()).then_some(Action::Shoot)
        },
    },
    TransitionRule {
        name: "run right",
        select: |ctx| ctx.movement(InputState::RIGHT, Facing::Right, true),
    },
    TransitionRule {
        name: "walk right",
        select: |ctx| ctx.movement(InputState::RIGHT, Facing::Right, false),
    },
    TransitionRule {
        name: "run left",
        select: |ctx| ctx.movement(InputState::LEFT, Facing::Left, true),
    },
    TransitionRule {
        name: "walk left",
        select: |ctx| ctx.movement(InputState::LEFT, Facing::Left, false),
    },
    TransitionRule {
        name: "idle",
        select: |ctx| (ctx.on_ground && !ctx.state.is_dozing()).then_some(Action::Idle),
    },
];

/// Run the rule table. `None` means no rule fired and the state carries over.
pub fn select_action(ctx: &RuleContext) -> Option<Action> {
    TRANSITION_RULES.iter().find_map(|rule| (rule.select)(ctx))
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    /// Top-left corner of the player's box.
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
    pub health: f32,
    pub max_health: f32,
    state: PlayerState,
    animator: Animator,
    /// Ticks spent idle since entering Idle.
    idle_timer: Option<u32>,
    /// Ticks spent resting since entering Resting.
    rest_timer: Option<u32>,
    /// Set once a jump passes its apex.
    switch_down: bool,
    bullets: Vec<Bullet>,
    inventory: Inventory,
    held_item: Option<Item>,
    tuning: PlayerConfig,
    gun: BulletConfig,
    clips: PlayerClips,
}

impl Player {
    /// A fresh player standing on the ground with full health.
    pub fn new(config: &GameConfig) -> Self {
        let tuning = config.player.clone();
        let mut inventory = Inventory::new(tuning.inventory_capacity);
        for item in &tuning.starting_items {
            inventory.add_item(item.clone());
        }

        let mut player = Self {
            position: Vec2::new(tuning.spawn_x, config.world.height - tuning.height),
            velocity: Vec2::ZERO,
            acceleration: Vec2::new(0.0, tuning.gravity),
            width: tuning.width,
            height: tuning.height,
            facing: Facing::Right,
            health: tuning.max_health,
            max_health: tuning.max_health,
            state: PlayerState::Idle,
            animator: Animator::default(),
            idle_timer: Some(0),
            rest_timer: None,
            switch_down: false,
            bullets: Vec::new(),
            inventory,
            held_item: None,
            tuning,
            gun: config.bullet,
            clips: config.player_clips,
        };
        player.update_held_item();
        player
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn current_frame(&self) -> usize {
        self.animator.frame
    }

    pub fn frame_counter(&self) -> u32 {
        self.animator.counter
    }

    pub fn idle_timer(&self) -> Option<u32> {
        self.idle_timer
    }

    pub fn rest_timer(&self) -> Option<u32> {
        self.rest_timer
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn held_item(&self) -> Option<&Item> {
        self.held_item.as_ref()
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::new(self.width, self.height) / 2.0
    }

    /// Frame to draw this tick, if the active clip has one.
    pub fn frame(&self) -> Option<FrameRef> {
        self.animator.frame(self.state.clip(&self.clips))
    }

    pub fn is_game_over(&self) -> bool {
        self.health <= 0.0
    }

    pub fn on_ground(&self, bounds: &WorldBounds) -> bool {
        self.position.y >= self.ground_line(bounds)
    }

    fn ground_line(&self, bounds: &WorldBounds) -> f32 {
        bounds.height - self.height
    }

    /// Switch state, restarting the animation on an actual change.
    pub fn set_state(&mut self, state: PlayerState) {
        if self.state == state {
            return;
        }
        debug!(from = ?self.state, to = ?state, "player state");
        self.state = state;
        self.animator.reset();
        match state {
            PlayerState::Idle => {
                self.idle_timer = Some(0);
                self.rest_timer = None;
            }
            PlayerState::Resting => self.rest_timer = Some(0),
            _ => {
                self.idle_timer = None;
                self.rest_timer = None;
            }
        }
    }

    // ── Per-tick update ──────────────────────────────────────────────────────

    /// Advance one tick: bullets and their hits, vertical physics, the
    /// transition rules, horizontal movement and animation.
    pub fn update(
        &mut self,
        bounds: &WorldBounds,
        zombies: &mut [Zombie],
        input: &InputState,
        audio: &mut impl AudioSink,
    ) {
        for bullet in &mut self.bullets {
            bullet.update(bounds);
        }
        bullet::resolve_hits(&mut self.bullets, zombies, self.gun.damage);

        let on_ground = self.on_ground(bounds);
        if !on_ground || self.state == PlayerState::Jumping {
            self.apply_gravity(self.tuning.airborne);
        }
        self.land_if_grounded(bounds);

        if self.state == PlayerState::Dying {
            self.velocity.x = 0.0;
        } else {
            let ctx = RuleContext {
                input,
                state: self.state,
                on_ground,
            };
            if let Some(action) = select_action(&ctx) {
                self.apply(action, bounds, audio);
            }
            if !input.is_down(InputState::FIRE) {
                audio.stop(Sound::Shoot);
            }
            self.escalate_rest();
        }

        let max_x = (bounds.width - self.width).max(0.0);
        self.position.x = (self.position.x + self.velocity.x).clamp(0.0, max_x);
        if self.position.y >= bounds.height {
            self.position.y = bounds.height;
            self.velocity.y = 0.0;
        }

        self.tick_timers();
        self.animator.advance(self.state.clip(&self.clips));
    }

    fn apply(&mut self, action: Action, bounds: &WorldBounds, audio: &mut impl AudioSink) {
        match action {
            Action::Crouch { firing } => {
                if firing {
                    self.set_state(PlayerState::SittingShooting);
                    if !audio.is_playing(Sound::Shoot) {
                        audio.play(Sound::Shoot);
                    }
                } else {
                    self.set_state(PlayerState::Sitting);
                }
                self.velocity.x = 0.0;
                audio.stop(Sound::Walk);
            }
            Action::Jump => {
                self.set_state(PlayerState::Jumping);
                self.velocity.y = self.tuning.launch_velocity;
                self.apply_gravity(self.tuning.launch);
                self.land_if_grounded(bounds);
            }
            Action::Shoot => {
                self.set_state(PlayerState::Shooting);
                self.velocity.x = 0.0;
                if !audio.is_playing(Sound::Shoot) {
                    audio.play(Sound::Shoot);
                }
                audio.stop(Sound::Walk);
                audio.stop(Sound::Run);
            }
            Action::Move { facing, running } => {
                self.facing = facing;
                let (state, speed, sound, other) = if running {
                    (PlayerState::Running, self.tuning.run_speed, Sound::Run, Sound::Walk)
                } else {
                    (PlayerState::Walking, self.tuning.walk_speed, Sound::Walk, Sound::Run)
                };
                self.set_state(state);
                self.velocity.x = speed * facing.sign();
                if !audio.is_playing(sound) {
                    audio.play(sound);
                }
                audio.stop(other);
            }
            Action::Idle => {
                self.set_state(PlayerState::Idle);
                self.velocity.x = 0.0;
                audio.stop(Sound::Walk);
                audio.stop(Sound::Run);
                audio.stop(Sound::Shoot);
            }
        }
    }

    /// One step of vertical integration. Rising uses the gentler multiplier
    /// until velocity passes the apex threshold; after that the jump falls.
    fn apply_gravity(&mut self, profile: GravityProfile) {
        if self.velocity.y < 0.0 && !self.switch_down {
            if self.velocity.y >= profile.apex_threshold {
                self.switch_down = true;
            }
            self.velocity.y += self.acceleration.y * profile.ascend_scale;
        } else {
            self.velocity.y += self.acceleration.y * profile.descend_scale;
        }
        self.position.y += self.velocity.y;
    }

    fn land_if_grounded(&mut self, bounds: &WorldBounds) {
        let ground = self.ground_line(bounds);
        if self.position.y >= ground {
            self.position.y = ground;
            self.velocity.y = 0.0;
            self.switch_down = false;
            if self.state == PlayerState::Jumping {
                self.set_state(PlayerState::Idle);
            }
        }
    }

    fn escalate_rest(&mut self) {
        let reached = |timer: Option<u32>, limit: Option<u32>| match (timer, limit) {
            (Some(timer), Some(limit)) => timer >= limit,
            _ => false,
        };
        match self.state {
            PlayerState::Idle if reached(self.idle_timer, self.tuning.idle_to_rest_ticks) => {
                self.set_state(PlayerState::Resting);
            }
            PlayerState::Resting if reached(self.rest_timer, self.tuning.rest_to_sleep_ticks) => {
                self.set_state(PlayerState::Sleeping);
            }
            _ => {}
        }
    }

    fn tick_timers(&mut self) {
        if let Some(t) = self.idle_timer.as_mut() {
            *t = t.saturating_add(1);
        }
        if let Some(t) = self.rest_timer.as_mut() {
            *t = t.saturating_add(1);
        }
    }

    // ── Actions outside the state machine ────────────────────────────────────

    /// Fire one bullet on a fresh fire press. Holding the button does not
    /// repeat. Returns whether a bullet was spawned.
    pub fn shoot(&mut self, input: &InputState, audio: &mut impl AudioSink) -> bool {
        if self.is_game_over() || !input.was_pressed(InputState::FIRE) {
            return false;
        }
        let muzzle = self.center();
        self.bullets.push(Bullet::new(muzzle, self.gun.speed, self.facing));
        if !audio.is_playing(Sound::Shoot) {
            audio.play(Sound::Shoot);
        }
        true
    }

    /// Lose `amount` health, never dropping below zero. Reaching zero starts
    /// the Dying state.
    pub fn take_damage(&mut self, amount: f32) {
        if self.state == PlayerState::Dying {
            return;
        }
        self.health = (self.health - amount).max(0.0);
        if self.is_game_over() {
            info!("player died");
            self.velocity.x = 0.0;
            self.set_state(PlayerState::Dying);
        }
    }

    /// Refresh the held item from the selected inventory slot.
    pub fn update_held_item(&mut self) {
        self.held_item = self.inventory.selected_item().cloned();
    }

    pub fn select_slot(&mut self, index: usize) {
        self.inventory.select(index);
        self.update_held_item();
    }

    /// Consume a held health pack. Weapons stay in hand. Returns whether
    /// anything was consumed.
    pub fn use_held_item(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        let healing = matches!(
            self.inventory.selected_item(),
            Some(item) if item.kind == ItemKind::HealthPack
        );
        if !healing {
            return false;
        }
        if let Some(item) = self.inventory.take_selected() {
            self.health = (self.health + self.tuning.health_pack_heal).min(self.max_health);
            info!(item = %item.name, health = self.health, "used item");
        }
        self.update_held_item();
        true
    }
}
