mod display;

use std::collections::HashMap;
use std::io::{self, stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use zombie_platformer::audio::CueLog;
use zombie_platformer::config::GameConfig;
use zombie_platformer::input::{InputState, InputTracker};
use zombie_platformer::world::{GameStatus, World};

use display::atlas::GlyphAtlas;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Simulation ticks run per rendered frame. The tuning in `GameConfig` is
/// expressed per tick, so this sets the game speed.
const TICKS_PER_FRAME: u32 = 100;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that never report key releases: OS
/// key-repeat refreshes the entry well before it expires.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Key bindings ──────────────────────────────────────────────────────────────

/// Reduce the live keys to the simulation's control bits.
///
/// Terminals report Shift+letter as the upper-case letter, so `A`/`D`
/// double as the run modifier.
fn control_bits(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> u8 {
    let held = |keys: &[KeyCode]| keys.iter().any(|k| is_held(key_frame, k, frame));
    let bindings: [(u8, &[KeyCode]); 7] = [
        (InputState::LEFT, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
        (InputState::RIGHT, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        (InputState::RUN, &[KeyCode::Char('A'), KeyCode::Char('D')]),
        (InputState::CROUCH, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
        (InputState::JUMP, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
        (InputState::FIRE, &[KeyCode::Char(' ')]),
        (InputState::USE, &[KeyCode::Char('e'), KeyCode::Char('E')]),
    ];
    bindings
        .iter()
        .filter(|(_, keys)| held(keys))
        .fold(0, |bits, (bit, _)| bits | bit)
}

// ── Title screen ──────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "☠  ZOMBIE  PLATFORMER  ☠";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Green))?;
    out.queue(Print(title))?;

    let controls: &[(&str, &str)] = &[
        ("← → / a d", "Walk"),
        ("A D (shift)", "Run"),
        ("↑ / w", "Jump"),
        ("↓ / s", "Crouch"),
        ("SPACE", "Shoot"),
        ("1-9, 0", "Select slot"),
        ("e", "Use held item"),
        ("i", "Inventory"),
    ];
    for (i, (keys, action)) in controls.iter().enumerate() {
        let row = cy.saturating_sub(4) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(14), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("{:<14}", keys)))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(*action))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 5))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print("ENTER : Start      Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) => match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            },
            Ok(_) => {}
            // Reader thread gone: nothing more will arrive.
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program, `false` → back to the title screen.
///
/// Input model: `key_frame` records the frame of the last press/repeat event
/// for every key. Each frame the still-fresh keys are reduced to control
/// bits; `InputTracker` turns those into press edges for the first tick of
/// the frame, and the remaining ticks see the same keys as merely held.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut World,
    atlas: &GlyphAtlas,
    rx: &mpsc::Receiver<Event>,
) -> io::Result<bool> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut tracker = InputTracker::new();
    let mut audio = CueLog::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if world.status() == GameStatus::GameOver =>
                        {
                            return Ok(false);
                        }
                        KeyCode::Char('i') | KeyCode::Char('I') | KeyCode::Tab => {
                            let inventory = world.player_mut().inventory_mut();
                            inventory.is_open = !inventory.is_open;
                        }
                        KeyCode::Char(c @ '0'..='9') => {
                            // 1..9 then 0 for the tenth slot
                            let digit = c.to_digit(10).unwrap_or(1) as usize;
                            let slot = (digit + 9) % 10;
                            world.player_mut().select_slot(slot);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Simulate ──────────────────────────────────────────────────────────
        let down = control_bits(&key_frame, frame);
        let first = tracker.next(down);
        world.tick(&first, &mut audio);
        let held = InputState::held(down);
        for _ in 1..TICKS_PER_FRAME {
            world.tick(&held, &mut audio);
        }
        for cue in audio.drain() {
            debug!(?cue, "audio");
        }

        display::render(out, world, atlas)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn load_config() -> io::Result<GameConfig> {
    match std::env::args().nth(1) {
        Some(path) => GameConfig::load(&path)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
        None => Ok(GameConfig::default()),
    }
}

fn main() -> io::Result<()> {
    // Logs go to stderr; redirect it (`2>game.log`) to keep the screen clean.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = load_config()?;
    info!("Starting zombie platformer");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: &GameConfig) -> io::Result<()> {
    let atlas = GlyphAtlas::standard(&config.player_clips, &config.zombie_clips);

    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let mut world = World::new(config.clone(), &mut thread_rng())
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                let quit = game_loop(out, &mut world, &atlas, rx)?;
                info!(ticks = world.ticks(), "session ended");
                if quit {
                    break;
                }
            }
        }
    }
    Ok(())
}
