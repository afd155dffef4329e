//! Noise field used as the sole randomness source for animation.
//!
//! Wraps OpenSimplex noise in 2D, 3D and 4D. Animation samples it through the
//! looping pattern: the last two input dimensions walk a circle whose angle is
//! derived from `tick mod num_frames`, so frame `0` and frame `num_frames`
//! land on the same point of noise space.

use std::f32::consts::TAU;

use noise::{NoiseFn, OpenSimplex};

/// Deterministic continuous noise field
#[derive(Clone)]
pub struct NoiseField {
    simplex: OpenSimplex,
    seed: u32,
}

impl NoiseField {
    /// Create new noise field with seed
    pub fn new(seed: u32) -> Self {
        Self {
            simplex: OpenSimplex::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Sample 2D noise, in range [-1, 1]
    pub fn eval2(&self, x: f32, y: f32) -> f32 {
        clamp_unit(self.simplex.get([x as f64, y as f64]))
    }

    /// Sample 3D noise, in range [-1, 1]
    pub fn eval3(&self, x: f32, y: f32, z: f32) -> f32 {
        clamp_unit(self.simplex.get([x as f64, y as f64, z as f64]))
    }

    /// Sample 4D noise, in range [-1, 1]
    pub fn eval4(&self, x: f32, y: f32, z: f32, w: f32) -> f32 {
        clamp_unit(self.simplex.get([x as f64, y as f64, z as f64, w as f64]))
    }

    /// Sample the looping pattern at spatial position `(x, y)`.
    ///
    /// The caller applies the spatial scale; `radius` sets the size of the
    /// circle walked through the last two dimensions (bigger radius, faster change).
    pub fn looping(&self, x: f32, y: f32, phase: LoopPhase, radius: f32) -> f32 {
        let (sin, cos) = phase.angle().sin_cos();
        self.eval4(x, y, radius * sin, radius * cos)
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}

fn clamp_unit(value: f64) -> f32 {
    (value as f32).clamp(-1.0, 1.0)
}

/// Position of a tick inside the animation loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopPhase {
    frame: u64,
    num_frames: u32,
}

impl LoopPhase {
    /// Phase of `tick` in a loop of `num_frames` frames.
    ///
    /// A loop of zero frames is a single static frame.
    pub fn new(tick: u64, num_frames: u32) -> Self {
        let frame = if num_frames == 0 {
            0
        } else {
            tick % num_frames as u64
        };
        Self { frame, num_frames }
    }

    /// Frame index inside the loop, `0..num_frames`
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn num_frames(&self) -> u32 {
        self.num_frames
    }

    /// Normalised loop time in `[0, 1)`
    pub fn fraction(&self) -> f32 {
        if self.num_frames == 0 {
            0.0
        } else {
            self.frame as f32 / self.num_frames as f32
        }
    }

    /// Loop angle in radians, `2π·t`
    pub fn angle(&self) -> f32 {
        TAU * self.fraction()
    }
}
