use zombie_platformer::camera::{minimap_point, Camera};
use zombie_platformer::config::{Viewport, WorldBounds};
use zombie_platformer::Vec2;

fn make_camera(x: f32) -> Camera {
    Camera::new(Vec2::new(x, 600.0), Viewport::default(), 200.0)
}

fn bounds() -> WorldBounds {
    WorldBounds::default()
}

fn approx(a: Vec2, b: Vec2) -> bool {
    (a - b).abs().max_element() < 1e-3
}

// ── dead zone ─────────────────────────────────────────────────────────────────

#[test]
fn band_is_screen_half_minus_dead_zone() {
    assert_eq!(make_camera(1000.0).band(), (800.0, 1200.0));
}

#[test]
fn movement_inside_band_leaves_camera() {
    let mut cam = make_camera(1000.0);
    for x in [800.0, 950.0, 1100.0, 1200.0, 1000.0] {
        cam.follow(x, &bounds());
        assert_eq!(cam.target.x, 1000.0);
    }
}

#[test]
fn crossing_right_edge_drags_camera() {
    let mut cam = make_camera(1000.0);
    cam.follow(1250.0, &bounds());
    assert_eq!(cam.target.x, 1050.0);
    // Stepping back inside the new band does not move it again
    cam.follow(1240.0, &bounds());
    assert_eq!(cam.target.x, 1050.0);
}

#[test]
fn crossing_left_edge_drags_camera() {
    let mut cam = make_camera(1000.0);
    cam.follow(700.0, &bounds());
    assert_eq!(cam.target.x, 900.0);
}

#[test]
fn follow_is_idempotent() {
    let mut cam = make_camera(1000.0);
    cam.follow(1500.0, &bounds());
    let once = cam;
    cam.follow(1500.0, &bounds());
    assert_eq!(cam, once);
}

// ── world clamp ───────────────────────────────────────────────────────────────

#[test]
fn target_clamped_to_world_edges() {
    let mut cam = make_camera(1000.0);
    cam.follow(50.0, &bounds());
    assert_eq!(cam.target.x, 400.0);

    let mut cam = make_camera(4000.0);
    cam.follow(4950.0, &bounds());
    assert_eq!(cam.target.x, 4600.0);
}

#[test]
fn vertical_target_clamped() {
    let mut cam = Camera::new(Vec2::new(1000.0, 1150.0), Viewport::default(), 200.0);
    cam.follow(1000.0, &bounds());
    assert_eq!(cam.target.y, 975.0);

    let mut cam = Camera::new(Vec2::new(1000.0, 10.0), Viewport::default(), 200.0);
    cam.follow(1000.0, &bounds());
    assert_eq!(cam.target.y, 225.0);
}

#[test]
fn world_smaller_than_screen_is_centred() {
    let small = WorldBounds {
        width: 600.0,
        height: 300.0,
    };
    let mut cam = make_camera(1000.0);
    cam.follow(2000.0, &small);
    assert_eq!(cam.target, Vec2::new(300.0, 150.0));
}

// ── projection ────────────────────────────────────────────────────────────────

#[test]
fn target_maps_to_screen_centre() {
    let cam = make_camera(1000.0);
    assert_eq!(cam.offset, Vec2::new(400.0, 225.0));
    assert_eq!(cam.zoom, 1.0);
    assert_eq!(cam.world_to_screen(cam.target), cam.offset);
    assert_eq!(cam.world_to_screen(Vec2::new(600.0, 375.0)), Vec2::ZERO);
}

#[test]
fn visible_rect_centres_on_target() {
    let (corner, size) = make_camera(1000.0).visible_rect();
    assert_eq!(corner, Vec2::new(600.0, 375.0));
    assert_eq!(size, Vec2::new(800.0, 450.0));
}

// ── mini-map ──────────────────────────────────────────────────────────────────

#[test]
fn minimap_point_scales_world() {
    let map = Vec2::new(200.0, 150.0);
    let p = minimap_point(&bounds(), map, Vec2::new(2500.0, 600.0));
    assert!(approx(p, Vec2::new(100.0, 75.0)));
}

#[test]
fn minimap_view_box_is_shrunk_projection() {
    let mut cam = Camera::new(Vec2::new(400.0, 975.0), Viewport::default(), 200.0);
    cam.follow(100.0, &bounds());
    let (corner, size) = cam.minimap_view(&bounds(), Vec2::new(200.0, 150.0));
    assert!(approx(corner, Vec2::new(0.0, 93.75)));
    assert!(approx(size, Vec2::new(25.6, 45.0)));
}

#[test]
fn minimap_view_box_stays_inside_map() {
    let mut cam = make_camera(1000.0);
    cam.target.x = 4900.0;
    let map = Vec2::new(200.0, 150.0);
    let (corner, size) = cam.minimap_view(&bounds(), map);
    assert!(corner.x + size.x <= map.x + 1e-3);
    assert!((corner.x - 174.4).abs() < 1e-3);
}
