//! Player projectiles and their collision pass.

use glam::Vec2;

use super::zombie::Zombie;
use super::Facing;
use crate::config::WorldBounds;

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub position: Vec2,
    pub velocity_x: f32,
    pub facing: Facing,
    pub active: bool,
}

impl Bullet {
    pub fn new(position: Vec2, speed: f32, facing: Facing) -> Self {
        Self {
            position,
            velocity_x: speed.abs() * facing.sign(),
            facing,
            active: true,
        }
    }

    /// Move one tick; leaving the world deactivates the bullet.
    pub fn update(&mut self, bounds: &WorldBounds) {
        if !self.active {
            return;
        }
        self.position.x += self.velocity_x;
        if self.position.x < 0.0 || self.position.x > bounds.width {
            self.active = false;
        }
    }

    /// Point-in-circle test against a living zombie, radius = half its width.
    pub fn hits(&self, zombie: &Zombie) -> bool {
        let radius = zombie.width / 2.0;
        zombie.is_alive() && self.position.distance_squared(zombie.position) <= radius * radius
    }
}

/// Resolve bullet hits for one tick and drop spent bullets.
///
/// Each active bullet damages at most one zombie (the first in collection
/// order that it overlaps) and is then deactivated. A zombie may still be hit
/// by several different bullets in the same tick. Returns the number of hits.
pub fn resolve_hits(bullets: &mut Vec<Bullet>, zombies: &mut [Zombie], damage: f32) -> usize {
    let mut hits = 0;
    for bullet in bullets.iter_mut().filter(|b| b.active) {
        if let Some(zombie) = zombies.iter_mut().find(|z| bullet.hits(z)) {
            zombie.take_damage(damage);
            bullet.active = false;
            hits += 1;
        }
    }
    bullets.retain(|b| b.active);
    hits
}
