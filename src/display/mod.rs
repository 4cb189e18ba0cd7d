//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! world. No game logic is performed; this module only translates state
//! into terminal commands. The 800×450 logical screen the camera works in
//! is squeezed into whatever cell grid the terminal offers.

pub mod atlas;

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use glam::Vec2;

use zombie_platformer::camera::{self, Camera};
use zombie_platformer::config::Viewport;
use zombie_platformer::entities::{Facing, ItemKind, Player, PlayerState, Zombie};
use zombie_platformer::world::{GameStatus, World};

use atlas::{mirror, GlyphAtlas};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_GROUND: Color = Color::DarkGreen;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_STATE: Color = Color::Yellow;
const C_HUD_ITEM: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_PLAYER_DYING: Color = Color::Red;
const C_ZOMBIE: Color = Color::Green;
const C_ZOMBIE_DEAD: Color = Color::DarkGrey;
const C_BULLET: Color = Color::Cyan;
const C_MINIMAP: Color = Color::DarkGrey;
const C_MINIMAP_VIEW: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

const MINIMAP_COLS: u16 = 30;
const MINIMAP_ROWS: u16 = 6;

// ── Layout ────────────────────────────────────────────────────────────────────

/// Terminal grid: HUD on row 0, border on row 1, play field, ground on
/// row h-2, controls hint on row h-1.
struct Grid {
    width: u16,
    height: u16,
    screen: Viewport,
}

impl Grid {
    fn ground_row(&self) -> u16 {
        self.height.saturating_sub(2)
    }

    fn inner_cols(&self) -> f32 {
        self.width.saturating_sub(2) as f32
    }

    fn inner_rows(&self) -> f32 {
        self.ground_row().saturating_sub(2) as f32
    }

    /// Cell for a world point, or `None` when it is off screen. A point on
    /// the bottom edge lands on the ground row.
    fn cell(&self, camera: &Camera, point: Vec2) -> Option<(u16, u16)> {
        let s = camera.world_to_screen(point);
        let on_screen = (0.0..self.screen.width).contains(&s.x) && (0.0..=self.screen.height).contains(&s.y);
        if !on_screen {
            return None;
        }
        let col = 1 + (s.x / self.screen.width * self.inner_cols()) as u16;
        let row = 2 + (s.y / self.screen.height * self.inner_rows()) as u16;
        Some((col, row.min(self.ground_row())))
    }

    /// Draw `glyph` standing on `feet`, centred horizontally.
    fn sprite_origin(&self, camera: &Camera, feet: Vec2, glyph: &str) -> Option<(u16, u16)> {
        let (col, row) = self.cell(camera, feet)?;
        let half = glyph.chars().count() as u16 / 2;
        let col = col.saturating_sub(half).max(1);
        let row = row.saturating_sub(1).max(2);
        Some((col, row))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, world: &World, atlas: &GlyphAtlas) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let grid = Grid {
        width,
        height,
        screen: world.config().screen,
    };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &grid)?;
    draw_hud(out, &grid, world)?;

    for zombie in world.zombies() {
        draw_zombie(out, &grid, world.camera(), zombie, atlas)?;
    }
    draw_player(out, &grid, world.camera(), world.player(), atlas)?;
    draw_bullets(out, &grid, world)?;

    draw_minimap(out, &grid, world)?;
    draw_controls_hint(out, &grid)?;

    if world.player().inventory().is_open {
        draw_inventory(out, &grid, world.player())?;
    }
    if world.status() == GameStatus::GameOver {
        draw_game_over(out, &grid, world)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border and ground ─────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    let w = grid.width as usize;
    let ground = grid.ground_row();

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..ground {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(grid.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    // Bottom bar doubles as the ground line
    out.queue(cursor::MoveTo(0, ground))?;
    out.queue(Print("└"))?;
    out.queue(style::SetForegroundColor(C_GROUND))?;
    out.queue(Print("▀".repeat(w.saturating_sub(2))))?;
    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(Print("┘"))?;

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, grid: &Grid, world: &World) -> std::io::Result<()> {
    let player = world.player();

    // Health bar: left
    const BAR: usize = 10;
    let ratio = (player.health / player.max_health).clamp(0.0, 1.0);
    let filled = (ratio * BAR as f32).ceil() as usize;
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(format!(
        "HP [{}{}] {:>3}/{}",
        "█".repeat(filled),
        "░".repeat(BAR - filled),
        player.health.ceil() as i32,
        player.max_health as i32,
    )))?;

    // Player state: centre
    let state_str = format!("[ {} ]", state_label(player.state()));
    let sx = (grid.width / 2).saturating_sub(state_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_STATE))?;
    out.queue(Print(&state_str))?;

    // Held item and zombie count: right
    let held = player.held_item().map_or("-", |item| item.name.as_str());
    let alive = world.zombies().iter().filter(|z| z.is_alive()).count();
    let right_str = format!("Hand: {}  Zombies: {}", held, alive);
    let rx = grid
        .width
        .saturating_sub(right_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_ITEM))?;
    out.queue(Print(&right_str))?;

    Ok(())
}

fn state_label(state: PlayerState) -> &'static str {
    match state {
        PlayerState::Idle => "IDLE",
        PlayerState::Walking => "WALKING",
        PlayerState::Running => "RUNNING",
        PlayerState::Shooting => "SHOOTING",
        PlayerState::Sitting => "CROUCHING",
        PlayerState::SittingShooting => "CROUCH FIRE",
        PlayerState::Jumping => "JUMPING",
        PlayerState::Resting => "RESTING",
        PlayerState::Sleeping => "SLEEPING",
        PlayerState::Dying => "DYING",
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn facing_glyph(glyph: &str, facing: Facing) -> String {
    if facing.is_right() {
        glyph.to_string()
    } else {
        mirror(glyph)
    }
}

fn draw_player<W: Write>(
    out: &mut W,
    grid: &Grid,
    camera: &Camera,
    player: &Player,
    atlas: &GlyphAtlas,
) -> std::io::Result<()> {
    let glyph = facing_glyph(atlas.glyph(player.frame()), player.facing);
    let feet = Vec2::new(player.center().x, player.position.y + player.height);
    let Some((col, row)) = grid.sprite_origin(camera, feet, &glyph) else {
        return Ok(());
    };
    let color = if player.state() == PlayerState::Dying {
        C_PLAYER_DYING
    } else {
        C_PLAYER
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_zombie<W: Write>(
    out: &mut W,
    grid: &Grid,
    camera: &Camera,
    zombie: &Zombie,
    atlas: &GlyphAtlas,
) -> std::io::Result<()> {
    let glyph = facing_glyph(atlas.glyph(zombie.frame()), zombie.facing);
    let feet = zombie.position + Vec2::new(0.0, zombie.height / 2.0);
    let Some((col, row)) = grid.sprite_origin(camera, feet, &glyph) else {
        return Ok(());
    };
    let color = if zombie.is_alive() { C_ZOMBIE } else { C_ZOMBIE_DEAD };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_bullets<W: Write>(out: &mut W, grid: &Grid, world: &World) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_BULLET))?;
    for bullet in world.player().bullets().iter().filter(|b| b.active) {
        if let Some((col, row)) = grid.cell(world.camera(), bullet.position) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("-"))?;
        }
    }
    Ok(())
}

// ── Mini-map (top-right of the play field) ────────────────────────────────────

fn draw_minimap<W: Write>(out: &mut W, grid: &Grid, world: &World) -> std::io::Result<()> {
    if grid.width < MINIMAP_COLS + 4 || grid.ground_row() < MINIMAP_ROWS + 3 {
        return Ok(());
    }
    let left = grid.width - MINIMAP_COLS - 2;
    let top = 2;
    let map = Vec2::new(MINIMAP_COLS as f32, MINIMAP_ROWS as f32);
    let bounds = world.bounds();
    let to_cell = |p: Vec2| {
        let m = p.clamp(Vec2::ZERO, map - Vec2::ONE);
        (left + m.x as u16, top + m.y as u16)
    };

    // World backdrop
    out.queue(style::SetForegroundColor(C_MINIMAP))?;
    for row in 0..MINIMAP_ROWS {
        out.queue(cursor::MoveTo(left, top + row))?;
        out.queue(Print("·".repeat(MINIMAP_COLS as usize)))?;
    }

    // Camera view box
    let (corner, size) = world.camera().minimap_view(bounds, map);
    let (l, t) = to_cell(corner);
    let (r, b) = to_cell(corner + size);
    out.queue(style::SetForegroundColor(C_MINIMAP_VIEW))?;
    for row in t..=b {
        out.queue(cursor::MoveTo(l, row))?;
        out.queue(Print("["))?;
        out.queue(cursor::MoveTo(r, row))?;
        out.queue(Print("]"))?;
    }

    for zombie in world.zombies().iter().filter(|z| z.is_alive()) {
        let (col, row) = to_cell(camera::minimap_point(bounds, map, zombie.position));
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_ZOMBIE))?;
        out.queue(Print("z"))?;
    }

    let (col, row) = to_cell(camera::minimap_point(bounds, map, world.player().center()));
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(Print("@"))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, grid.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "←→ Move  A/D Run  ↑ Jump  ↓ Crouch  SPACE Shoot  E Use  I Inventory  Q Quit",
    ))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_inventory<W: Write>(out: &mut W, grid: &Grid, player: &Player) -> std::io::Result<()> {
    let inventory = player.inventory();
    let inner = 24usize;
    let cx = grid.width / 2;
    let start_row = (grid.height / 2).saturating_sub(inventory.capacity() as u16 / 2 + 1);
    let col = cx.saturating_sub(inner as u16 / 2 + 1);

    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(cursor::MoveTo(col, start_row))?;
    out.queue(Print(format!("╔{:═^inner$}╗", " INVENTORY ")))?;

    for (i, item) in inventory.slots().iter().enumerate() {
        let key = (i + 1) % 10;
        let marker = if i == inventory.selected() { '>' } else { ' ' };
        let (name, color) = match item.kind {
            ItemKind::Empty => ("-", Color::DarkGrey),
            ItemKind::Weapon => (item.name.as_str(), Color::Yellow),
            ItemKind::HealthPack => (item.name.as_str(), Color::Red),
        };
        let line = format!("{} {} {}", marker, key, name);
        out.queue(cursor::MoveTo(col, start_row + 1 + i as u16))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print("║"))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(format!("{:<inner$}", line)))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print("║"))?;
    }

    let bottom = start_row + 1 + inventory.capacity() as u16;
    out.queue(cursor::MoveTo(col, bottom))?;
    out.queue(Print(format!("╚{}╝", "═".repeat(inner))))?;
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, grid: &Grid, world: &World) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let alive = world.zombies().iter().filter(|z| z.is_alive()).count();
    let zombies_line = format!("Zombies left: {}", alive);
    let hint = "R - Title Screen  Q - Quit";

    let cx = grid.width / 2;
    let total_rows = lines.len() + 2; // 3 box lines + zombies + hint
    let start_row = (grid.height / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let zombies_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(zombies_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, zombies_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&zombies_line))?;

    let hint_row = zombies_row + 1;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
