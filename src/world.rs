//! Session orchestration: one `World` is one play-through.
//!
//! Tick order is fixed: player (bullets, physics, rules), player shot,
//! zombies in collection order, eviction of finished corpses, camera.

use rand::Rng;
use tracing::{debug, info};

use crate::audio::AudioSink;
use crate::camera::Camera;
use crate::config::{GameConfig, WorldBounds};
use crate::entities::{Player, Zombie};
use crate::error::ConfigError;
use crate::input::InputState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

#[derive(Clone, Debug)]
pub struct World {
    config: GameConfig,
    player: Player,
    zombies: Vec<Zombie>,
    camera: Camera,
    ticks: u64,
}

impl World {
    /// Start a session with `config.zombie.count` zombies scattered along
    /// the ground. All randomness comes through `rng`. Fails if `config`
    /// does not validate.
    pub fn new(config: GameConfig, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        config.validate()?;
        let margin = config.zombie.spawn_margin;
        let (low, high) = (margin, (config.world.width - margin).max(margin + 1.0));
        let zombies = (0..config.zombie.count)
            .map(|_| {
                let x = rng.gen_range(low..high);
                Zombie::spawn(x, &config.world, config.zombie, config.zombie_clips)
            })
            .collect();
        Self::with_zombies(config, zombies)
    }

    /// Start a session with an explicit zombie line-up.
    pub fn with_zombies(config: GameConfig, zombies: Vec<Zombie>) -> Result<Self, ConfigError> {
        config.validate()?;
        let player = Player::new(&config);
        let camera = Camera::new(player.position, config.screen, config.dead_zone_width);
        info!(zombies = zombies.len(), "world created");
        let mut world = Self {
            config,
            player,
            zombies,
            camera,
            ticks: 0,
        };
        world.camera.follow(world.player.position.x, &world.config.world);
        Ok(world)
    }

    pub fn spawn_zombie(&mut self, x: f32) {
        let zombie = Zombie::spawn(x, &self.config.world, self.config.zombie, self.config.zombie_clips);
        self.zombies.push(zombie);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.config.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn zombies(&self) -> &[Zombie] {
        &self.zombies
    }

    pub fn zombies_mut(&mut self) -> &mut [Zombie] {
        &mut self.zombies
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn status(&self) -> GameStatus {
        if self.player.is_game_over() {
            GameStatus::GameOver
        } else {
            GameStatus::Playing
        }
    }

    /// Advance the whole session by one tick.
    pub fn tick(&mut self, input: &InputState, audio: &mut impl AudioSink) {
        self.ticks += 1;
        let bounds = self.config.world;

        self.player.update(&bounds, &mut self.zombies, input, audio);
        if self.player.shoot(input, audio) {
            debug!(bullets = self.player.bullets().len(), "shot fired");
        }
        if input.was_pressed(InputState::USE) {
            self.player.use_held_item();
        }

        let target = self.player.center();
        for zombie in &mut self.zombies {
            if let Some(damage) = zombie.update(&bounds, target) {
                self.player.take_damage(damage);
            }
        }

        self.evict_finished_zombies();
        self.camera.follow(self.player.position.x, &bounds);
    }

    /// Drop zombies whose death clip has finished, keeping the order of the rest.
    fn evict_finished_zombies(&mut self) {
        let evict: Vec<bool> = self.zombies.iter().map(Zombie::is_removable).collect();
        if !evict.contains(&true) {
            return;
        }
        let mut flags = evict.into_iter();
        self.zombies.retain(|_| !flags.next().unwrap_or(false));
        debug!(remaining = self.zombies.len(), "evicted zombies");
    }
}
