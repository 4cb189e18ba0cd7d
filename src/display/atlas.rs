//! Terminal stand-in for the sprite atlas.
//!
//! Every animation clip names an `AtlasId`; here each id maps to a strip of
//! short glyph strings, one per frame. Sprites face right and are mirrored
//! on the fly when the entity faces left.

use std::collections::HashMap;

use zombie_platformer::animation::{AtlasId, Clip, FrameRef, PlayerClips, ZombieClips};

pub struct GlyphAtlas {
    strips: HashMap<AtlasId, &'static [&'static str]>,
}

// ── Glyph strips ──────────────────────────────────────────────────────────────

const PLAYER_IDLE: &[&str] = &["(•_•)", "(•_•)", "(•_•)", "(-_-)", "(•_•)", "(•_•)"];
const PLAYER_WALK: &[&str] = &["(•_•)/", "(•_•)|", "(•_•)\\", "(•_•)|", "(•_•)/"];
const PLAYER_RUN: &[&str] = &["(•o•)>", "(•o•)»", "(•o•)>", "(•o•)»", "(•o•)>"];
const PLAYER_SHOOT: &[&str] = &[
    "(•_•)═", "(•_•)╾", "(•_•)═", "(•_•)╾", "(•_•)═", "(•_•)╾", "(•_•)═", "(•_•)╾",
];
const PLAYER_SIT: &[&str] = &["(._.)", "(._.)", "(._.)"];
const PLAYER_SIT_SHOOT: &[&str] = &["(._.)═", "(._.)╾", "(._.)═"];
const PLAYER_JUMP: &[&str] = &["\\(•_•)/", "\\(•o•)/", "\\(°o°)/", "\\(•o•)/", "\\(•_•)/"];
const PLAYER_REST: &[&str] = &["(-_-)", "(-_-)", "(-.-)", "(-_-)"];
const PLAYER_SLEEP: &[&str] = &["(-_-)z", "(-_-)zZ", "(-_-)zZz", "(-_-)zZ", "(-_-)z"];
const PLAYER_DYING: &[&str] = &["(x_x)", "(x_x)", "(x.x)", "_x_x_"];

const ZOMBIE_IDLE: &[&str] = &["[0_0]", "[0_0]", "[0.0]", "[0_0]"];
const ZOMBIE_WALK: &[&str] = &["[0_0]/", "[0_0]-", "[0_0]\\", "[0_0]-", "[0_0]/", "[0_0]-"];
const ZOMBIE_ATTACK: &[&str] = &["[0▃0]=", "[0▃0]==", "[0▃0]===", "[0▃0]=="];
const ZOMBIE_DEAD: &[&str] = &["[x_x]", "[x_x]", "[x.x]", "_x_x_", "_..._"];

const MISSING: &str = "?";

impl GlyphAtlas {
    /// Register the built-in strips under the ids the clip tables use.
    pub fn standard(player: &PlayerClips, zombie: &ZombieClips) -> Self {
        let mut atlas = Self {
            strips: HashMap::new(),
        };
        let player_strips = [
            PLAYER_IDLE,
            PLAYER_WALK,
            PLAYER_RUN,
            PLAYER_SHOOT,
            PLAYER_SIT,
            PLAYER_SIT_SHOOT,
            PLAYER_JUMP,
            PLAYER_REST,
            PLAYER_SLEEP,
            PLAYER_DYING,
        ];
        for (clip, strip) in player.all().into_iter().zip(player_strips) {
            atlas.register(clip, strip);
        }
        let zombie_strips = [ZOMBIE_IDLE, ZOMBIE_WALK, ZOMBIE_ATTACK, ZOMBIE_DEAD];
        for (clip, strip) in zombie.all().into_iter().zip(zombie_strips) {
            atlas.register(clip, strip);
        }
        atlas
    }

    fn register(&mut self, clip: &Clip, strip: &'static [&'static str]) {
        self.strips.insert(clip.atlas, strip);
    }

    /// Glyph for `frame`. Clips longer than their strip wrap around it.
    pub fn glyph(&self, frame: Option<FrameRef>) -> &'static str {
        frame
            .and_then(|f| {
                let strip = self.strips.get(&f.atlas)?;
                strip.get(f.index % strip.len().max(1)).copied()
            })
            .unwrap_or(MISSING)
    }
}

/// Mirror a right-facing glyph so it faces left.
pub fn mirror(glyph: &str) -> String {
    glyph
        .chars()
        .rev()
        .map(|c| match c {
            '(' => ')',
            ')' => '(',
            '[' => ']',
            ']' => '[',
            '/' => '\\',
            '\\' => '/',
            '>' => '<',
            '<' => '>',
            '»' => '«',
            '«' => '»',
            '╾' => '╼',
            other => other,
        })
        .collect()
}
