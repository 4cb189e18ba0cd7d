//! Side-scrolling camera with a horizontal dead zone.

use glam::Vec2;

use crate::config::{Viewport, WorldBounds};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// World point shown at `offset` on screen.
    pub target: Vec2,
    /// Screen point the target maps to (the screen centre).
    pub offset: Vec2,
    pub zoom: f32,
    screen: Viewport,
    dead_zone_width: f32,
}

impl Camera {
    pub fn new(target: Vec2, screen: Viewport, dead_zone_width: f32) -> Self {
        Self {
            target,
            offset: Vec2::new(screen.width / 2.0, screen.height / 2.0),
            zoom: 1.0,
            screen,
            dead_zone_width,
        }
    }

    /// Range of player x positions that leave the camera where it is.
    pub fn band(&self) -> (f32, f32) {
        let reach = self.screen.width / 2.0 - self.dead_zone_width;
        (self.target.x - reach, self.target.x + reach)
    }

    /// Drag the camera only when `player_x` leaves the band, then keep the
    /// whole viewport inside the world on both axes. A world smaller than
    /// the viewport on an axis is centred on that axis.
    pub fn follow(&mut self, player_x: f32, bounds: &WorldBounds) {
        let half_w = self.screen.width / 2.0;
        let half_h = self.screen.height / 2.0;
        let reach = half_w - self.dead_zone_width;

        if player_x > self.target.x + reach {
            self.target.x = player_x - reach;
        } else if player_x < self.target.x - reach {
            self.target.x = player_x + reach;
        }

        self.target.x = clamp_to_extent(self.target.x, half_w, bounds.width);
        self.target.y = clamp_to_extent(self.target.y, half_h, bounds.height);
    }

    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        (point - self.target) * self.zoom + self.offset
    }

    /// Top-left corner and size of the visible world region.
    pub fn visible_rect(&self) -> (Vec2, Vec2) {
        let size = Vec2::new(self.screen.width, self.screen.height) / self.zoom;
        (self.target - size / 2.0, size)
    }

    /// Outline of the current view on a mini-map of size `map` covering the
    /// whole world. Returns top-left and size in map units. The box is drawn
    /// at 80% scale and kept inside the map.
    pub fn minimap_view(&self, bounds: &WorldBounds, map: Vec2) -> (Vec2, Vec2) {
        let scale = minimap_scale(bounds, map);
        let screen = Vec2::new(self.screen.width, self.screen.height);
        let size = screen * scale * 0.8;
        let corner = (self.target - screen / 2.0) * scale;
        let max = (map - size).max(Vec2::ZERO);
        (corner.clamp(Vec2::ZERO, max), size)
    }
}

fn clamp_to_extent(value: f32, half_view: f32, extent: f32) -> f32 {
    if extent < half_view * 2.0 {
        extent / 2.0
    } else {
        value.clamp(half_view, extent - half_view)
    }
}

/// World point to mini-map point.
pub fn minimap_point(bounds: &WorldBounds, map: Vec2, point: Vec2) -> Vec2 {
    point * minimap_scale(bounds, map)
}

fn minimap_scale(bounds: &WorldBounds, map: Vec2) -> Vec2 {
    map / Vec2::new(bounds.width, bounds.height)
}
