use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};
use rand::Rng;

pub(super) const COINCIDENT_DISTANCE: f32 = 0.0001;
const MIN_FORCE_DISTANCE: f32 = 0.01;

#[derive(Clone, Copy, Debug)]
pub(super) struct ForceParams {
    pub(super) k: f32,
    pub(super) ideal_length: f32,
    pub(super) repulsion_strength: f32,
    pub(super) spring_strength: f32,
    pub(super) min_separation: f32,
    pub(super) collision_strength: f32,
}

/// Magnitude pushing two nodes apart: `k³ / d²` plus an overlap push when
/// they sit closer than the minimum separation.
pub(super) fn repulsion(distance: f32, params: ForceParams) -> f32 {
    let distance = distance.max(MIN_FORCE_DISTANCE);
    let mut force = params.repulsion_strength * params.k.powi(3) / (distance * distance);

    if distance < params.min_separation {
        force += (params.min_separation - distance) * params.collision_strength;
    }

    force
}

/// Negative when the edge is shorter than its ideal length.
pub(super) fn attraction(distance: f32, params: ForceParams) -> f32 {
    (distance - params.ideal_length) * params.spring_strength
}

pub(super) fn center_pull(position: Vec2, center: Vec2, strength: f32) -> Vec2 {
    (center - position) * strength
}

pub(super) fn jitter_direction(rng: &mut impl Rng) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    vec2(angle.cos(), angle.sin())
}

pub(super) fn clamp_to_frame(position: Vec2, frame: Vec2) -> Vec2 {
    vec2(position.x.clamp(0.0, frame.x), position.y.clamp(0.0, frame.y))
}
