//! Side-scrolling zombie shooter: the fixed-step entity simulation.
//!
//! The library owns every gameplay rule (player state machine and physics,
//! zombie behaviour, projectile collisions, camera follow). Rendering, sound
//! playback and key polling are collaborators supplied by the caller; the
//! terminal front end in `main.rs` is one such caller.

pub mod animation;
pub mod audio;
pub mod camera;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod world;

pub use glam::Vec2;
