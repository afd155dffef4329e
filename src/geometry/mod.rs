//! Procedural base geometry.
//!
//! Each shape descriptor implements [`GeometryGenerator`], producing an ordered
//! vertex sequence plus the [`Topology`] used to draw it. [`Shape`] dispatches
//! to the selected descriptor.

mod fern;
mod flower;
mod grid;
mod raster;
mod model;

pub use fern::FernMap;
pub use raster::{brightness, extrude_image, load_image};
pub use model::{load_obj, parse_obj, MeshNode};

use glam::Vec3;
use log::warn;

use crate::easing::ease;
use crate::error::Result;
use crate::noise::{LoopPhase, NoiseField};
use crate::params::{AnimationParameters, ReactionParameters, Shape};
use crate::reaction::ReactionField;

/// How a vertex sequence is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Every vertex as a point
    Points,

    /// Regular grid: vertex `(i, j)` lives at index `i * rows + j`; one
    /// triangle strip per adjacent column pair
    Grid { columns: usize, rows: usize },

    /// Stacked rings of `samples` vertices; one strip pairing each vertex
    /// with the matching vertex on the next ring
    Rings { samples: usize },

    /// Consecutive vertex triples
    Triangles,
}

/// Output of a generator
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub topology: Topology,
}

impl Geometry {
    pub fn new(positions: Vec<Vec3>, topology: Topology) -> Self {
        Self {
            positions,
            topology,
        }
    }

    pub fn empty(topology: Topology) -> Self {
        Self::new(Vec::new(), topology)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Everything a generator may read while building its vertices
#[derive(Clone, Copy)]
pub struct GenerateContext<'a> {
    pub noise: &'a NoiseField,
    pub animation: &'a AnimationParameters,

    /// Loop phase of the tick being built
    pub phase: LoopPhase,

    /// Effective noise scale and radius for this tick
    pub noise_scale: f32,
    pub noise_radius: f32,

    /// Looping noise sample driving shape-level animation, when animated
    pub shape_signal: Option<f32>,

    /// Reaction-diffusion field coupled into heights
    pub reaction: Option<&'a dyn ReactionField>,

    /// Height contributed per 10 units of reaction field value
    pub reaction_amount: f32,
}

impl<'a> GenerateContext<'a> {
    /// Context for a still frame at tick 0 with no coupling
    pub fn still(noise: &'a NoiseField, animation: &'a AnimationParameters) -> Self {
        Self {
            noise,
            animation,
            phase: LoopPhase::new(0, animation.num_frames),
            noise_scale: animation.scale,
            noise_radius: animation.radius,
            shape_signal: None,
            reaction: None,
            reaction_amount: 0.0,
        }
    }

    /// Ease a shape parameter into `range` when shape animation is active
    pub fn animate(&self, value: f32, range: (f32, f32)) -> f32 {
        match self.shape_signal {
            Some(ns) => ease(ns, -1.0, 1.0, range.0, range.1, self.animation.easing),
            None => value,
        }
    }

    /// Height offset read from the coupled field at grid cell `(i, j)`
    fn reaction_height(&self, i: usize, j: usize) -> f32 {
        match self.reaction {
            Some(field) => field.sample(i, j) / 10.0 * self.reaction_amount,
            None => 0.0,
        }
    }
}

/// Builds base vertex positions from a descriptor
pub trait GeometryGenerator {
    /// Produce the base vertex sequence
    ///
    /// Degenerate sizes yield an empty geometry; missing or malformed
    /// external resources are a configuration error.
    fn generate(&self, ctx: &GenerateContext) -> Result<Geometry>;

    /// Step to the next frame of a file sequence, called once after each render
    fn advance(&mut self) {}
}

/// Frame cursor for file sequences, cycling `first..count`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameCounter {
    step: usize,
}

impl FrameCounter {
    /// Current frame number
    pub fn current(&self, first: usize, count: usize) -> usize {
        let span = count.saturating_sub(first);
        if span == 0 {
            first
        } else {
            first + self.step % span
        }
    }

    /// Move to the next frame, wrapping back to `first` before reaching `count`
    pub fn advance(&mut self, first: usize, count: usize) {
        let span = count.saturating_sub(first);
        self.step = if span == 0 { 0 } else { (self.step + 1) % span };
    }
}

impl Shape {
    /// Whether the shape must be rebuilt every frame
    pub fn is_dynamic(&self, animation: &AnimationParameters, reaction: &ReactionParameters) -> bool {
        match self {
            Shape::Hyperbolic(_) => animation.animated || reaction.enabled,
            Shape::Sphere(_) => reaction.enabled,
            Shape::Flower(_) | Shape::Tongue(_) => animation.animated,
            Shape::ModelSequence(_) | Shape::ImageSequence(_) | Shape::GreyScottPlane(_) => true,
            _ => false,
        }
    }

    /// Whether the shape reads the reaction-diffusion field
    pub fn uses_reaction(&self, reaction: &ReactionParameters) -> bool {
        match self {
            Shape::GreyScottPlane(_) => true,
            Shape::Hyperbolic(_) | Shape::Sphere(_) => reaction.enabled,
            _ => false,
        }
    }

    fn generator(&self) -> &dyn GeometryGenerator {
        match self {
            Shape::Plane(d) => d,
            Shape::Hyperbolic(d) => d,
            Shape::Sphere(d) => d,
            Shape::Cube(d) => d,
            Shape::Fern(d) => d,
            Shape::Flower(d) => d,
            Shape::Tongue(d) => d,
            Shape::Model(d) => d,
            Shape::ModelSequence(d) => d,
            Shape::Image(d) => d,
            Shape::ImageSequence(d) => d,
            Shape::GreyScottPlane(d) => d,
        }
    }
}

impl GeometryGenerator for Shape {
    fn generate(&self, ctx: &GenerateContext) -> Result<Geometry> {
        let geometry = self.generator().generate(ctx)?;
        if geometry.is_empty() {
            warn!("{} generator produced no vertices", self.kind());
        }
        Ok(geometry)
    }

    fn advance(&mut self) {
        match self {
            Shape::ModelSequence(d) => d.advance(),
            Shape::ImageSequence(d) => d.advance(),
            _ => {}
        }
    }
}
