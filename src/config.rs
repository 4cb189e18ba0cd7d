//! Tunable constants, loadable from a RON file.
//!
//! Every number the simulation consumes lives here. `GameConfig::default()`
//! is the built-in tuning; a RON file only needs to name the fields it
//! overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::animation::{PlayerClips, ZombieClips};
use crate::entities::inventory::{Item, ItemKind};
use crate::error::ConfigError;

/// Size of the playable world in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            width: 5000.0,
            height: 1200.0,
        }
    }
}

/// Size of the visible window in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 450.0,
        }
    }
}

/// Vertical integration parameters for one phase of a jump.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GravityProfile {
    /// Gravity multiplier while rising.
    pub ascend_scale: f32,
    /// Gravity multiplier while falling.
    pub descend_scale: f32,
    /// Once vertical velocity rises above this (still negative) value the
    /// jump switches to its descending phase.
    pub apex_threshold: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub spawn_x: f32,
    pub max_health: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Initial vertical velocity of a jump (negative is up).
    pub launch_velocity: f32,
    pub gravity: f32,
    /// Applied every airborne tick.
    pub airborne: GravityProfile,
    /// Applied once, on the tick the jump starts.
    pub launch: GravityProfile,
    /// Ticks of uninterrupted idling before the player sits down to rest.
    pub idle_to_rest_ticks: Option<u32>,
    /// Ticks of resting before the player falls asleep.
    pub rest_to_sleep_ticks: Option<u32>,
    pub health_pack_heal: f32,
    pub inventory_capacity: usize,
    pub starting_items: Vec<Item>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 113.0,
            height: 113.0,
            spawn_x: 100.0,
            max_health: 100.0,
            walk_speed: 0.05,
            run_speed: 0.2,
            launch_velocity: -0.5,
            gravity: 0.5,
            airborne: GravityProfile {
                ascend_scale: 0.001,
                descend_scale: 0.005,
                apex_threshold: -0.1,
            },
            launch: GravityProfile {
                ascend_scale: 0.001,
                descend_scale: 0.1,
                apex_threshold: -0.1,
            },
            idle_to_rest_ticks: Some(30_000),
            rest_to_sleep_ticks: Some(60_000),
            health_pack_heal: 25.0,
            inventory_capacity: 10,
            starting_items: vec![
                Item::new(ItemKind::Weapon, "Pistol"),
                Item::new(ItemKind::HealthPack, "Medkit"),
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZombieConfig {
    pub count: usize,
    pub width: f32,
    pub height: f32,
    pub max_health: f32,
    pub speed: f32,
    /// Horizontal distance at which an idle zombie starts chasing.
    pub detection_range: f32,
    /// Horizontal distance at which a zombie stops and strikes.
    pub attack_range: f32,
    pub attack_damage: f32,
    pub attack_cooldown_ticks: u32,
    /// Keep spawns this far from either world edge.
    pub spawn_margin: f32,
}

impl Default for ZombieConfig {
    fn default() -> Self {
        Self {
            count: 5,
            width: 100.0,
            height: 100.0,
            max_health: 100.0,
            speed: 0.02,
            detection_range: 1500.0,
            attack_range: 60.0,
            attack_damage: 10.0,
            attack_cooldown_ticks: 3000,
            spawn_margin: 50.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub speed: f32,
    pub damage: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            speed: 0.8,
            damage: 20.0,
        }
    }
}

/// Complete simulation tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldBounds,
    pub screen: Viewport,
    /// Distance from each screen edge inside which the player drags the camera.
    pub dead_zone_width: f32,
    pub player: PlayerConfig,
    pub zombie: ZombieConfig,
    pub bullet: BulletConfig,
    pub player_clips: PlayerClips,
    pub zombie_clips: ZombieClips,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldBounds::default(),
            screen: Viewport::default(),
            dead_zone_width: 200.0,
            player: PlayerConfig::default(),
            zombie: ZombieConfig::default(),
            bullet: BulletConfig::default(),
            player_clips: PlayerClips::default(),
            zombie_clips: ZombieClips::default(),
        }
    }
}

impl GameConfig {
    /// Read, parse and validate a RON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&contents, path)?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Parse and validate RON text.
    pub fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        Self::parse(contents, Path::new("<inline>"))
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the simulation assumes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.world.width <= 0.0 || self.world.height <= 0.0 {
            return invalid(format!(
                "world must be positive, got {}x{}",
                self.world.width, self.world.height
            ));
        }
        if self.screen.width <= 0.0 || self.screen.height <= 0.0 {
            return invalid(format!(
                "screen must be positive, got {}x{}",
                self.screen.width, self.screen.height
            ));
        }
        if self.screen.width > self.world.width || self.screen.height > self.world.height {
            return invalid("screen is larger than the world".to_string());
        }
        if self.player.width <= 0.0
            || self.player.height <= 0.0
            || self.player.width > self.world.width
            || self.player.height > self.world.height
        {
            return invalid(format!(
                "player box {}x{} does not fit the world",
                self.player.width, self.player.height
            ));
        }
        if self.dead_zone_width < 0.0 || self.dead_zone_width > self.screen.width / 2.0 {
            return invalid(format!(
                "dead zone width {} must lie in [0, {}]",
                self.dead_zone_width,
                self.screen.width / 2.0
            ));
        }
        if self.player.inventory_capacity == 0 {
            return invalid("inventory capacity must be at least 1".to_string());
        }
        if self.zombie.width <= 0.0 || self.zombie.width > self.world.width {
            return invalid(format!("zombie width {} is out of range", self.zombie.width));
        }
        if self.zombie.height <= 0.0 || self.zombie.height > self.world.height {
            return invalid(format!("zombie height {} is out of range", self.zombie.height));
        }
        if !(self.zombie.speed >= 0.0) || !self.zombie.speed.is_finite() {
            return invalid(format!("zombie speed {} must be finite and non-negative", self.zombie.speed));
        }
        if self.zombie.spawn_margin < 0.0 || self.zombie.spawn_margin * 2.0 >= self.world.width {
            return invalid(format!(
                "zombie spawn margin {} must lie in [0, {})",
                self.zombie.spawn_margin,
                self.world.width / 2.0
            ));
        }
        let zero_delay = self
            .player_clips
            .all()
            .into_iter()
            .chain(self.zombie_clips.all())
            .any(|clip| clip.delay == 0);
        if zero_delay {
            return invalid("animation delays must be at least one tick".to_string());
        }
        Ok(())
    }
}
