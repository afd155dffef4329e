//! Reaction-diffusion (Gray–Scott) configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Gray–Scott rate coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coefficients {
    /// Feed rate of U
    pub f: f32,

    /// Removal rate of V
    pub k: f32,

    /// Diffusion rate of U
    pub diffuse_u: f32,

    /// Diffusion rate of V
    pub diffuse_v: f32,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            f: 0.028,
            k: 0.084,
            diffuse_u: 0.095,
            diffuse_v: 0.03,
        }
    }
}

/// Reaction-diffusion simulation and coupling settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionParameters {
    /// Couple the field into hyperbolic and sphere heights
    pub enabled: bool,

    /// Grid columns
    pub width: usize,

    /// Grid rows
    pub height: usize,

    pub coefficients: Coefficients,

    /// Simulation steps per rendered frame
    pub steps_per_frame: usize,

    /// Height contributed by a fully reacted cell, per 10 units of V
    pub amount: f32,

    /// Feed at wandering creature positions instead of the centre
    pub creatures: bool,

    pub creature_count: usize,

    /// Feed rectangle placed at each creature (columns, rows)
    pub creature_feed: (usize, usize),

    /// Feed rectangle placed at the centre when creatures are off
    pub centre_feed: (usize, usize),

    /// Optional image whose dark pixels seed the field at setup
    pub seed_image: Option<PathBuf>,
}

impl Default for ReactionParameters {
    fn default() -> Self {
        Self {
            enabled: false,
            width: 128,
            height: 128,
            coefficients: Coefficients::default(),
            steps_per_frame: 10,
            amount: 0.0,
            creatures: false,
            creature_count: 200,
            creature_feed: (4, 4),
            centre_feed: (3, 3),
            seed_image: None,
        }
    }
}

impl ReactionParameters {
    /// `f` for feed preset `n` in `1..=9`
    pub fn feed_preset(n: u8) -> f32 {
        0.02 + n.saturating_sub(1) as f32 * 0.001
    }
}
