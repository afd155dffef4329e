//! Per-vertex noise animation.
//!
//! Every vertex keeps the position its generator gave it. Each tick the
//! current position is rebuilt as `initial + displacement(initial, tick)`,
//! never accumulated, so any tick can be reproduced from its index alone and
//! tick `num_frames` lands exactly on tick `0`.

mod strategies;

pub use strategies::{guarded_div, DisplacementFn};

use glam::Vec3;

use crate::noise::{LoopPhase, NoiseField};
use crate::params::{AnimationParameters, DisplacementStrategy};

/// Animated vertex: immutable base position plus the latest displaced one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    initial: Vec3,
    current: Vec3,
}

impl Vertex {
    pub fn new(initial: Vec3) -> Self {
        Self {
            initial,
            current: initial,
        }
    }

    /// Position set when the geometry was built
    pub fn initial(&self) -> Vec3 {
        self.initial
    }

    /// Position after the most recent update
    pub fn current(&self) -> Vec3 {
        self.current
    }
}

/// Per-tick inputs shared by every vertex
#[derive(Debug, Clone, Copy)]
pub struct DisplacementContext<'a> {
    pub noise: &'a NoiseField,
    pub params: &'a AnimationParameters,
    pub phase: LoopPhase,

    /// Effective spatial noise scale (after modulation)
    pub scale: f32,

    /// Effective radius of the noise-time circle (after modulation)
    pub radius: f32,
}

impl<'a> DisplacementContext<'a> {
    /// Context using the slider scale and radius unmodulated
    pub fn new(noise: &'a NoiseField, params: &'a AnimationParameters, tick: u64) -> Self {
        Self {
            noise,
            params,
            phase: LoopPhase::new(tick, params.num_frames),
            scale: params.scale,
            radius: params.radius,
        }
    }

    /// Looping noise sample at the (x, y) of `p`
    pub fn looping(&self, p: Vec3) -> f32 {
        self.noise
            .looping(self.scale * p.x, self.scale * p.y, self.phase, self.radius)
    }
}

/// Applies the active displacement strategy to vertices
#[derive(Debug, Clone, Copy)]
pub struct VertexAnimator {
    strategy: DisplacementStrategy,
    displace: DisplacementFn,
}

impl VertexAnimator {
    pub fn new(strategy: DisplacementStrategy) -> Self {
        Self {
            strategy,
            displace: strategy.displacement_fn(),
        }
    }

    pub fn strategy(&self) -> DisplacementStrategy {
        self.strategy
    }

    /// Offset for a vertex whose base position is `initial`
    pub fn displacement(&self, initial: Vec3, ctx: &DisplacementContext) -> Vec3 {
        (self.displace)(initial, ctx)
    }

    /// Displaced position of `vertex` for this tick
    pub fn animate(&self, vertex: &Vertex, ctx: &DisplacementContext) -> Vec3 {
        vertex.initial + self.displacement(vertex.initial, ctx)
    }

    /// Recompute every vertex's current position
    pub fn update(&self, vertices: &mut [Vertex], ctx: &DisplacementContext) {
        for vertex in vertices.iter_mut() {
            vertex.current = self.animate(vertex, ctx);
        }
    }
}

impl Default for VertexAnimator {
    fn default() -> Self {
        Self::new(DisplacementStrategy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::AxisExtrusion;

    const EPS: f32 = 1e-5;

    fn sample_points() -> Vec<Vec3> {
        (0..25)
            .map(|k| {
                let (i, j) = ((k % 5) as f32, (k / 5) as f32);
                Vec3::new(i * 7.0 - 14.0, j * 5.0 - 10.0, (i - j) * 2.0)
            })
            .collect()
    }

    fn extruding(animated: bool) -> AnimationParameters {
        let axis = AxisExtrusion {
            enabled: true,
            amount: 20.0,
            min: -15.0,
            max: 25.0,
        };
        AnimationParameters {
            animated,
            x: axis,
            y: axis,
            z: axis,
            brownian: crate::params::BrownianParameters {
                frequency: 0.05,
                ..Default::default()
            },
            ..AnimationParameters::default()
        }
    }

    #[test]
    fn test_every_strategy_loops() {
        let noise = NoiseField::new(11);
        for animated in [false, true] {
            let params = extruding(animated);
            for strategy in DisplacementStrategy::ALL {
                let animator = VertexAnimator::new(strategy);
                let start = DisplacementContext::new(&noise, &params, 0);
                let end = DisplacementContext::new(&noise, &params, params.num_frames as u64);
                for p in sample_points() {
                    let vertex = Vertex::new(p);
                    let a = animator.animate(&vertex, &start);
                    let b = animator.animate(&vertex, &end);
                    assert!(
                        (a - b).length() < EPS,
                        "{} does not loop at {:?}: {:?} vs {:?}",
                        strategy,
                        p,
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn test_displacement_is_finite() {
        let noise = NoiseField::new(2);
        for animated in [false, true] {
            let params = extruding(animated);
            for strategy in DisplacementStrategy::ALL {
                let animator = VertexAnimator::new(strategy);
                for tick in [0, 13, 80] {
                    let ctx = DisplacementContext::new(&noise, &params, tick);
                    // The origin hits every vanishing distance denominator
                    for p in [Vec3::ZERO, Vec3::new(3.0, -4.0, 1.0)] {
                        let d = animator.displacement(p, &ctx);
                        assert!(d.is_finite(), "{} gave {:?} at {:?}", strategy, d, p);
                    }
                }
            }
        }
    }

    #[test]
    fn test_update_is_stateless() {
        let noise = NoiseField::new(4);
        let params = extruding(true);
        let animator = VertexAnimator::new(DisplacementStrategy::Ripple);
        let ctx = DisplacementContext::new(&noise, &params, 37);

        let mut vertices: Vec<Vertex> = sample_points().into_iter().map(Vertex::new).collect();
        animator.update(&mut vertices, &ctx);
        let first: Vec<Vec3> = vertices.iter().map(Vertex::current).collect();

        // A second pass at another tick and back must not drift
        animator.update(&mut vertices, &DisplacementContext::new(&noise, &params, 90));
        animator.update(&mut vertices, &ctx);
        let second: Vec<Vec3> = vertices.iter().map(Vertex::current).collect();

        assert_eq!(first, second);
        assert!(vertices.iter().zip(sample_points()).all(|(v, p)| v.initial() == p));
    }

    #[test]
    fn test_zero_sliders_leave_vertices_in_place() {
        let noise = NoiseField::new(9);
        for animated in [false, true] {
            let params = AnimationParameters {
                animated,
                ..AnimationParameters::default()
            };
            for strategy in DisplacementStrategy::ALL {
                let animator = VertexAnimator::new(strategy);
                let ctx = DisplacementContext::new(&noise, &params, 21);
                // The floor strategy always lifts by its base offset
                let expected = if strategy == DisplacementStrategy::Floor {
                    Vec3::new(0.0, 50.0, 0.0)
                } else {
                    Vec3::ZERO
                };
                for p in sample_points() {
                    assert_eq!(animator.displacement(p, &ctx), expected, "{}", strategy);
                }
            }
        }
    }

    #[test]
    fn test_disabled_axis_is_untouched() {
        let noise = NoiseField::new(1);
        let mut params = extruding(false);
        params.x.enabled = false;
        params.z.enabled = false;
        for strategy in DisplacementStrategy::ALL {
            let animator = VertexAnimator::new(strategy);
            let ctx = DisplacementContext::new(&noise, &params, 5);
            for p in sample_points() {
                let d = animator.displacement(p, &ctx);
                assert_eq!(d.x, 0.0, "{}", strategy);
                assert_eq!(d.z, 0.0, "{}", strategy);
            }
        }
    }

    #[test]
    fn test_simplex_still_mode_stays_in_bounds() {
        let noise = NoiseField::new(6);
        let params = extruding(false);
        let animator = VertexAnimator::default();
        for tick in 0..40 {
            let ctx = DisplacementContext::new(&noise, &params, tick);
            for p in sample_points() {
                let d = animator.displacement(p, &ctx);
                assert!(d.abs().max_element() <= 20.0 + EPS);
                // One noise sample drives all three axes
                assert_eq!(d.x, d.y);
                assert_eq!(d.y, d.z);
            }
        }
    }
}
