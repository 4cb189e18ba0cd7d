use zombie_platformer::audio::{AudioSink, Cue, CueLog, Silent, Sound};
use zombie_platformer::config::{GameConfig, WorldBounds};
use zombie_platformer::entities::player::select_action;
use zombie_platformer::entities::*;
use zombie_platformer::input::InputState;

fn make_player() -> Player {
    Player::new(&GameConfig::default())
}

fn bounds() -> WorldBounds {
    WorldBounds::default()
}

fn step(player: &mut Player, input: InputState) {
    player.update(&bounds(), &mut [], &input, &mut Silent);
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

const GROUND_Y: f32 = 1200.0 - 113.0;

// ── spawn ─────────────────────────────────────────────────────────────────────

#[test]
fn spawns_idle_on_the_ground() {
    let p = make_player();
    assert_eq!(p.position.x, 100.0);
    assert_eq!(p.position.y, GROUND_Y);
    assert!(p.on_ground(&bounds()));
    assert_eq!(p.state(), PlayerState::Idle);
    assert_eq!(p.health, 100.0);
    assert_eq!(p.facing, Facing::Right);
    assert_eq!(p.idle_timer(), Some(0));
}

#[test]
fn spawns_holding_first_starting_item() {
    let p = make_player();
    assert_eq!(p.inventory().occupied(), 2);
    assert_eq!(p.held_item().map(|i| i.name.as_str()), Some("Pistol"));
}

// ── horizontal movement ───────────────────────────────────────────────────────

#[test]
fn walk_right_moves_by_walk_speed() {
    let mut p = make_player();
    step(&mut p, InputState::held(InputState::RIGHT));
    assert_eq!(p.state(), PlayerState::Walking);
    assert!(approx(p.position.x, 100.05));
    assert_eq!(p.facing, Facing::Right);
}

#[test]
fn run_left_moves_by_run_speed_and_turns() {
    let mut p = make_player();
    step(&mut p, InputState::held(InputState::LEFT | InputState::RUN));
    assert_eq!(p.state(), PlayerState::Running);
    assert!(approx(p.position.x, 99.8));
    assert_eq!(p.facing, Facing::Left);
}

#[test]
fn run_clamps_at_right_world_edge() {
    let mut p = make_player();
    p.position.x = 4950.0;
    step(&mut p, InputState::held(InputState::RIGHT | InputState::RUN));
    assert_eq!(p.position.x, 5000.0 - 113.0);
}

#[test]
fn world_narrower_than_player_pins_to_left_edge() {
    let mut p = make_player();
    let narrow = WorldBounds {
        width: 50.0,
        height: 1200.0,
    };
    p.update(&narrow, &mut [], &InputState::held(InputState::RIGHT), &mut Silent);
    assert_eq!(p.position.x, 0.0);
}

#[test]
fn run_clamps_at_left_world_edge() {
    let mut p = make_player();
    p.position.x = 0.1;
    step(&mut p, InputState::held(InputState::LEFT | InputState::RUN));
    assert_eq!(p.position.x, 0.0);
}

#[test]
fn releasing_keys_returns_to_idle_and_stops() {
    let mut p = make_player();
    step(&mut p, InputState::held(InputState::RIGHT));
    step(&mut p, InputState::new());
    assert_eq!(p.state(), PlayerState::Idle);
    assert_eq!(p.velocity.x, 0.0);
}

// ── rule precedence ───────────────────────────────────────────────────────────

#[test]
fn rule_table_order() {
    let names: Vec<&str> = TRANSITION_RULES.iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        ["crouch", "jump", "shoot", "run right", "walk right", "run left", "walk left", "idle"]
    );
}

#[test]
fn crouch_beats_jump_fire_and_movement() {
    let input = InputState::held(InputState::CROUCH | InputState::RIGHT).with_pressed(InputState::JUMP);
    let ctx = RuleContext {
        input: &input,
        state: PlayerState::Idle,
        on_ground: true,
    };
    assert_eq!(select_action(&ctx), Some(Action::Crouch { firing: false }));
}

#[test]
fn jump_needs_ground() {
    let input = InputState::new().with_pressed(InputState::JUMP);
    let airborne = RuleContext {
        input: &input,
        state: PlayerState::Jumping,
        on_ground: false,
    };
    assert_eq!(select_action(&airborne), None);

    let grounded = RuleContext {
        on_ground: true,
        state: PlayerState::Idle,
        ..airborne
    };
    assert_eq!(select_action(&grounded), Some(Action::Jump));
}

#[test]
fn run_requires_run_modifier() {
    let input = InputState::held(InputState::RIGHT);
    let ctx = RuleContext {
        input: &input,
        state: PlayerState::Idle,
        on_ground: true,
    };
    assert_eq!(
        select_action(&ctx),
        Some(Action::Move { facing: Facing::Right, running: false })
    );
}

#[test]
fn crouch_with_fire_is_sitting_shooting() {
    let mut p = make_player();
    step(&mut p, InputState::held(InputState::CROUCH | InputState::FIRE));
    assert_eq!(p.state(), PlayerState::SittingShooting);
    step(&mut p, InputState::held(InputState::CROUCH));
    assert_eq!(p.state(), PlayerState::Sitting);
    assert_eq!(p.velocity.x, 0.0);
}

#[test]
fn crouched_player_cannot_walk() {
    let mut p = make_player();
    step(&mut p, InputState::held(InputState::CROUCH));
    // Crouch released while walking: first tick only gets back to Idle
    step(&mut p, InputState::held(InputState::RIGHT));
    assert_eq!(p.state(), PlayerState::Idle);
    assert_eq!(p.position.x, 100.0);
    step(&mut p, InputState::held(InputState::RIGHT));
    assert_eq!(p.state(), PlayerState::Walking);
}

#[test]
fn shooting_stops_movement() {
    let mut p = make_player();
    step(&mut p, InputState::held(InputState::RIGHT));
    step(&mut p, InputState::held(InputState::RIGHT | InputState::FIRE));
    assert_eq!(p.state(), PlayerState::Shooting);
    assert_eq!(p.velocity.x, 0.0);
}

// ── jumping and gravity ───────────────────────────────────────────────────────

#[test]
fn jump_rises_then_lands_in_idle() {
    let mut p = make_player();
    step(&mut p, InputState::new().with_pressed(InputState::JUMP));
    assert_eq!(p.state(), PlayerState::Jumping);
    assert!(p.position.y < GROUND_Y);

    let mut highest = p.position.y;
    let mut ticks = 0;
    while p.state() == PlayerState::Jumping && ticks < 10_000 {
        step(&mut p, InputState::new());
        highest = highest.min(p.position.y);
        ticks += 1;
    }
    assert_eq!(p.state(), PlayerState::Idle);
    assert_eq!(p.position.y, GROUND_Y);
    assert_eq!(p.velocity.y, 0.0);
    assert!(highest < GROUND_Y - 100.0, "jump apex too low: {}", highest);
}

#[test]
fn held_jump_does_not_rejump_after_landing() {
    let mut p = make_player();
    step(&mut p, InputState::new().with_pressed(InputState::JUMP));
    for _ in 0..10_000 {
        step(&mut p, InputState::held(InputState::JUMP));
    }
    assert_eq!(p.state(), PlayerState::Idle);
    assert_eq!(p.position.y, GROUND_Y);
}

#[test]
fn falling_player_never_goes_below_world() {
    let mut p = make_player();
    p.position.y = 0.0;
    for _ in 0..3_000 {
        step(&mut p, InputState::new());
        assert!(p.position.y <= 1200.0);
    }
    assert_eq!(p.position.y, GROUND_Y);
    assert!(p.on_ground(&bounds()));
}

#[test]
fn can_steer_in_the_air() {
    let mut p = make_player();
    step(&mut p, InputState::new().with_pressed(InputState::JUMP));
    step(&mut p, InputState::held(InputState::RIGHT));
    assert_eq!(p.state(), PlayerState::Walking);
    assert!(p.position.x > 100.0);
    assert!(!p.on_ground(&bounds()));
}

// ── firing ────────────────────────────────────────────────────────────────────

#[test]
fn shoot_fires_once_per_press() {
    let mut p = make_player();
    let pressed = InputState::new().with_pressed(InputState::FIRE);
    assert!(p.shoot(&pressed, &mut Silent));
    assert!(!p.shoot(&InputState::held(InputState::FIRE), &mut Silent));
    assert_eq!(p.bullets().len(), 1);
}

#[test]
fn bullet_leaves_from_player_centre_in_facing_direction() {
    let mut p = make_player();
    step(&mut p, InputState::held(InputState::LEFT));
    p.shoot(&InputState::new().with_pressed(InputState::FIRE), &mut Silent);
    let bullet = &p.bullets()[0];
    assert_eq!(bullet.position, p.center());
    assert_eq!(bullet.facing, Facing::Left);
    assert!(bullet.velocity_x < 0.0);
}

#[test]
fn bullets_advance_during_update() {
    let mut p = make_player();
    p.shoot(&InputState::new().with_pressed(InputState::FIRE), &mut Silent);
    let start = p.bullets()[0].position.x;
    step(&mut p, InputState::new());
    assert!(approx(p.bullets()[0].position.x, start + 0.8));
}

// ── idle escalation ───────────────────────────────────────────────────────────

fn drowsy_player() -> Player {
    let mut config = GameConfig::default();
    config.player.idle_to_rest_ticks = Some(5);
    config.player.rest_to_sleep_ticks = Some(5);
    Player::new(&config)
}

#[test]
fn idle_escalates_to_resting_then_sleeping() {
    let mut p = drowsy_player();
    for _ in 0..5 {
        step(&mut p, InputState::new());
    }
    assert_eq!(p.state(), PlayerState::Idle);

    step(&mut p, InputState::new());
    assert_eq!(p.state(), PlayerState::Resting);

    for _ in 0..4 {
        step(&mut p, InputState::new());
    }
    assert_eq!(p.state(), PlayerState::Resting);

    step(&mut p, InputState::new());
    assert_eq!(p.state(), PlayerState::Sleeping);
    assert_eq!(p.idle_timer(), None);
    assert_eq!(p.rest_timer(), None);

    // Stays asleep with no input
    for _ in 0..50 {
        step(&mut p, InputState::new());
    }
    assert_eq!(p.state(), PlayerState::Sleeping);
}

#[test]
fn movement_wakes_a_sleeping_player() {
    let mut p = drowsy_player();
    for _ in 0..20 {
        step(&mut p, InputState::new());
    }
    assert_eq!(p.state(), PlayerState::Sleeping);
    step(&mut p, InputState::held(InputState::RIGHT));
    assert_eq!(p.state(), PlayerState::Walking);
}

#[test]
fn activity_resets_idle_timer() {
    let mut p = drowsy_player();
    for _ in 0..4 {
        step(&mut p, InputState::new());
    }
    step(&mut p, InputState::held(InputState::RIGHT));
    assert_eq!(p.idle_timer(), None);
    step(&mut p, InputState::new());
    assert_eq!(p.state(), PlayerState::Idle);
    assert_eq!(p.idle_timer(), Some(1));
}

#[test]
fn escalation_can_be_disabled() {
    let mut config = GameConfig::default();
    config.player.idle_to_rest_ticks = None;
    let mut p = Player::new(&config);
    for _ in 0..200 {
        step(&mut p, InputState::new());
    }
    assert_eq!(p.state(), PlayerState::Idle);
}

// ── animation ─────────────────────────────────────────────────────────────────

#[test]
fn idle_animation_advances_on_delay() {
    let mut p = make_player();
    for _ in 0..299 {
        step(&mut p, InputState::new());
    }
    assert_eq!(p.current_frame(), 0);
    assert_eq!(p.frame_counter(), 299);
    step(&mut p, InputState::new());
    assert_eq!(p.current_frame(), 1);
    assert_eq!(p.frame_counter(), 0);
}

#[test]
fn idle_animation_wraps() {
    let mut p = make_player();
    for _ in 0..(6 * 300) {
        step(&mut p, InputState::new());
    }
    assert_eq!(p.current_frame(), 0);
}

#[test]
fn state_change_restarts_animation() {
    let mut p = make_player();
    for _ in 0..300 {
        step(&mut p, InputState::new());
    }
    assert_eq!(p.current_frame(), 1);
    step(&mut p, InputState::held(InputState::RIGHT));
    assert_eq!(p.current_frame(), 0);
    assert_eq!(p.frame_counter(), 1);
    let frame = p.frame().map(|f| f.atlas);
    assert_eq!(frame, Some(GameConfig::default().player_clips.walking.atlas));
}

// ── damage and dying ──────────────────────────────────────────────────────────

#[test]
fn damage_floors_at_zero_and_starts_dying() {
    let mut p = make_player();
    p.take_damage(30.0);
    assert_eq!(p.health, 70.0);
    assert!(!p.is_game_over());
    p.take_damage(150.0);
    assert_eq!(p.health, 0.0);
    assert!(p.is_game_over());
    assert_eq!(p.state(), PlayerState::Dying);
}

#[test]
fn dying_player_ignores_input() {
    let mut p = make_player();
    p.take_damage(100.0);
    step(&mut p, InputState::held(InputState::RIGHT | InputState::RUN));
    assert_eq!(p.state(), PlayerState::Dying);
    assert_eq!(p.position.x, 100.0);
    assert!(!p.shoot(&InputState::new().with_pressed(InputState::FIRE), &mut Silent));
}

// ── items ─────────────────────────────────────────────────────────────────────

#[test]
fn health_pack_heals_and_is_consumed() {
    let mut p = make_player();
    p.take_damage(50.0);
    p.select_slot(1);
    assert_eq!(p.held_item().map(|i| i.kind), Some(ItemKind::HealthPack));
    assert!(p.use_held_item());
    assert_eq!(p.health, 75.0);
    assert!(p.held_item().is_none());
    assert!(p.inventory().slots()[1].is_empty());
}

#[test]
fn healing_caps_at_max_health() {
    let mut p = make_player();
    p.take_damage(10.0);
    p.select_slot(1);
    p.use_held_item();
    assert_eq!(p.health, 100.0);
}

#[test]
fn weapons_are_not_consumed() {
    let mut p = make_player();
    assert!(!p.use_held_item());
    assert_eq!(p.held_item().map(|i| i.name.as_str()), Some("Pistol"));
}

// ── audio cues ────────────────────────────────────────────────────────────────

#[test]
fn movement_cues_start_and_stop_loops() {
    let mut p = make_player();
    let mut audio = CueLog::new();
    let b = bounds();
    p.update(&b, &mut [], &InputState::held(InputState::RIGHT), &mut audio);
    p.update(&b, &mut [], &InputState::held(InputState::RIGHT | InputState::RUN), &mut audio);
    p.update(&b, &mut [], &InputState::new(), &mut audio);
    assert_eq!(
        audio.cues(),
        &[
            Cue::Play(Sound::Walk),
            Cue::Play(Sound::Run),
            Cue::Stop(Sound::Walk),
            Cue::Stop(Sound::Run),
        ]
    );
}

#[test]
fn shoot_sound_stops_when_fire_released() {
    let mut p = make_player();
    let mut audio = CueLog::new();
    let b = bounds();
    p.update(&b, &mut [], &InputState::held(InputState::FIRE), &mut audio);
    assert!(audio.is_playing(Sound::Shoot));
    p.update(&b, &mut [], &InputState::new(), &mut audio);
    assert!(!audio.is_playing(Sound::Shoot));
}
