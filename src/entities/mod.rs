//! Simulated entities: the player, zombies, bullets and the player's items.

pub mod bullet;
pub mod inventory;
pub mod player;
pub mod zombie;

pub use bullet::Bullet;
pub use inventory::{Inventory, Item, ItemKind};
pub use player::{Action, Player, PlayerState, RuleContext, TransitionRule, TRANSITION_RULES};
pub use zombie::{Zombie, ZombieState};

/// Horizontal facing, shared by everything that can turn around.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// `-1.0` for left, `1.0` for right.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn is_right(self) -> bool {
        self == Facing::Right
    }
}
