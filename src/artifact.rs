//! The animated artifact: vertices, transform and the per-frame state machine.
//!
//! A frame runs `setup` (only when the geometry is stale or the shape is
//! dynamic), then `update`, then `render`. Everything time-dependent is
//! derived from the tick through [`LoopPhase`], so the artifact carries no
//! animation state between frames apart from the accumulated rotation.

use glam::{Mat4, Vec3};
use log::debug;

use crate::animator::{DisplacementContext, Vertex, VertexAnimator};
use crate::easing::ease;
use crate::error::Result;
use crate::geometry::{GenerateContext, GeometryGenerator, Topology};
use crate::noise::{LoopPhase, NoiseField};
use crate::params::{AnimationParameters, DisplacementStrategy, Modulation, Parameters, Shape};
use crate::reaction::ReactionField;
use crate::render::{self, Renderer};

/// Position, rotation (radians per axis) and scale of the artifact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Model matrix: translate, rotate about x, y then z, scale
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_scale(self.scale)
    }

    pub fn reset_rotation(&mut self) {
        self.rotation = Vec3::ZERO;
    }

    pub fn reset_scale(&mut self) {
        self.scale = Vec3::ONE;
    }
}

/// Noise inputs for one tick after animation-mode modulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modulated {
    pub scale: f32,
    pub radius: f32,

    /// Looping sample that drives shape-level animation, when animated
    pub shape_signal: Option<f32>,
}

/// Effective noise scale and radius for `phase`
///
/// Outside animation mode the slider values pass through untouched. In
/// animation mode one looping sample at `origin` drives both the shape
/// parameters and, depending on `modulation`, the scale and radius.
pub fn modulate(
    params: &AnimationParameters,
    noise: &NoiseField,
    phase: LoopPhase,
    origin: Vec3,
) -> Modulated {
    let mut out = Modulated {
        scale: params.scale,
        radius: params.radius,
        shape_signal: None,
    };
    if !params.animated {
        return out;
    }

    let ns = noise.looping(params.scale * origin.x, params.scale * origin.y, phase, params.radius);
    out.shape_signal = Some(ns);

    let signal = match params.modulation {
        Modulation::None => return out,
        Modulation::Noise => ns,
        Modulation::SineOfNoise => ns.sin(),
        Modulation::Sine => phase.angle().sin(),
    };
    let (scale_lo, scale_hi) = params.scale_range;
    let (radius_lo, radius_hi) = params.radius_range;
    out.scale = ease(signal, -1.0, 1.0, scale_lo, scale_hi, params.easing);
    out.radius = ease(signal, -1.0, 1.0, radius_lo, radius_hi, params.easing);
    out
}

/// Everything a frame reads besides the artifact itself
#[derive(Clone, Copy)]
pub struct FrameInputs<'a> {
    pub params: &'a Parameters,
    pub noise: &'a NoiseField,
    pub tick: u64,
    pub reaction: Option<&'a dyn ReactionField>,
}

impl<'a> FrameInputs<'a> {
    pub fn new(params: &'a Parameters, noise: &'a NoiseField, tick: u64) -> Self {
        Self {
            params,
            noise,
            tick,
            reaction: None,
        }
    }

    pub fn phase(&self) -> LoopPhase {
        LoopPhase::new(self.tick, self.params.animation.num_frames)
    }
}

/// The single active artifact
#[derive(Debug, Clone)]
pub struct Artifact {
    shape: Shape,
    vertices: Vec<Vertex>,
    topology: Topology,
    transform: Transform,
    animator: VertexAnimator,
    stale: bool,
}

impl Artifact {
    /// Artifact with no vertices yet; the first frame builds them
    pub fn new(shape: Shape, strategy: DisplacementStrategy) -> Self {
        Self {
            shape,
            vertices: Vec::new(),
            topology: Topology::Points,
            transform: Transform::default(),
            animator: VertexAnimator::new(strategy),
            stale: true,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Swap in a new shape; geometry is rebuilt on the next frame
    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
        self.stale = true;
    }

    pub fn set_strategy(&mut self, strategy: DisplacementStrategy) {
        self.animator = VertexAnimator::new(strategy);
    }

    pub fn strategy(&self) -> DisplacementStrategy {
        self.animator.strategy()
    }

    /// Force a rebuild on the next frame
    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Current (displaced) positions in vertex order
    pub fn positions(&self) -> Vec<Vec3> {
        self.vertices.iter().map(Vertex::current).collect()
    }

    /// Rebuild the vertex collection from the shape
    ///
    /// On error the previous vertices are kept and the artifact stays stale.
    pub fn setup(&mut self, frame: &FrameInputs) -> Result<()> {
        let animation = &frame.params.animation;
        let phase = frame.phase();
        let modulated = modulate(animation, frame.noise, phase, self.transform.position);

        let ctx = GenerateContext {
            noise: frame.noise,
            animation,
            phase,
            noise_scale: modulated.scale,
            noise_radius: modulated.radius,
            shape_signal: modulated.shape_signal,
            reaction: frame.reaction,
            reaction_amount: frame.params.reaction.amount,
        };

        let geometry = self.shape.generate(&ctx)?;
        self.vertices = geometry.positions.into_iter().map(Vertex::new).collect();
        self.topology = geometry.topology;
        self.stale = false;
        debug!(
            "Built {} with {} vertices ({:?})",
            self.shape.kind(),
            self.vertices.len(),
            self.topology
        );
        Ok(())
    }

    /// Apply transform deltas and displace every vertex for `frame.tick`
    pub fn update(&mut self, frame: &FrameInputs) {
        let params = frame.params;
        self.transform.rotation += Vec3::from_array(params.transform.rotation_speed);
        self.transform.scale = Vec3::splat(params.transform.scale);

        let animation = &params.animation;
        let phase = frame.phase();
        let modulated = modulate(animation, frame.noise, phase, self.transform.position);
        let ctx = DisplacementContext {
            noise: frame.noise,
            params: animation,
            phase,
            scale: modulated.scale,
            radius: modulated.radius,
        };
        self.animator.update(&mut self.vertices, &ctx);
    }

    /// Setup when needed, then update
    pub fn prepare(&mut self, frame: &FrameInputs) -> Result<()> {
        let dynamic = self
            .shape
            .is_dynamic(&frame.params.animation, &frame.params.reaction);
        if self.stale || dynamic {
            self.setup(frame)?;
        }
        self.update(frame);
        Ok(())
    }

    /// Emit the current positions on `renderer`
    pub fn render(&self, renderer: &mut dyn Renderer) -> Result<()> {
        render::draw(renderer, self.transform.matrix(), &self.positions(), self.topology)
    }

    /// Step file-sequence shapes to their next frame
    pub fn advance(&mut self) {
        self.shape.advance();
    }
}
