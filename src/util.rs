use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use eframe::egui::{Vec2, vec2};

pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

/// Keeps a margin of a tenth of the frame on every side.
pub fn seed_position(id: &str, frame: Vec2) -> Vec2 {
    let (jx, jy) = stable_pair(id);
    let center = frame * 0.5;
    center + vec2(jx * frame.x * 0.4, jy * frame.y * 0.4)
}
