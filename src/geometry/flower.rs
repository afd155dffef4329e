//! Stacks of noise-deformed circles: the flower and its wandering variant,
//! the tongue.

use std::f32::consts::TAU;

use glam::Vec3;

use super::{GenerateContext, Geometry, GeometryGenerator, Topology};
use crate::easing::ease;
use crate::error::Result;
use crate::noise::{LoopPhase, NoiseField};
use crate::params::{FlowerDescriptor, TongueDescriptor};

/// Below this radius a tongue closes its tip
const TONGUE_TIP_RADIUS: f32 = 3.0;

/// Flower shape values after animation
#[derive(Debug, Clone, Copy)]
struct Petals {
    frequency: f32,
    magnitude: f32,
    independence: f32,
}

impl Petals {
    fn animated(flower: &FlowerDescriptor, ctx: &GenerateContext) -> Self {
        Self {
            frequency: ctx.animate(flower.frequency, flower.frequency_range),
            magnitude: ctx.animate(flower.magnitude, flower.magnitude_range),
            independence: ctx.animate(flower.independence, flower.independence_range),
        }
    }

    /// Starting radius, shrunk so the deformed outline keeps roughly the same size
    fn base_radius(&self, radius: f32) -> f32 {
        let divisor = self.magnitude + 1.0;
        if divisor == 0.0 {
            radius
        } else {
            radius / divisor
        }
    }
}

/// Append one deformed circle of `samples` vertices around `centre`
fn push_circle(
    positions: &mut Vec<Vec3>,
    noise: &NoiseField,
    centre: Vec3,
    radius: f32,
    petals: Petals,
    seed: f32,
    samples: usize,
) {
    for k in 0..samples {
        let angle = TAU * k as f32 / samples as f32;
        let x = radius * angle.sin();
        let y = radius * angle.cos();

        let deformation = noise.eval3(x * petals.frequency, y * petals.frequency, seed) + 1.0;
        let rad = radius * (1.0 + petals.magnitude * deformation);

        positions.push(Vec3::new(centre.x + rad * x, centre.y + rad * y, centre.z + rad * rad));
    }
}

impl GeometryGenerator for FlowerDescriptor {
    fn generate(&self, ctx: &GenerateContext) -> Result<Geometry> {
        let petals = Petals::animated(self, ctx);
        let mut radius = petals.base_radius(self.radius);
        let mut centre = Vec3::ZERO;

        let mut positions = Vec::with_capacity(self.count * self.samples);
        for i in 0..self.count {
            let seed = i as f32 * petals.independence;
            push_circle(&mut positions, ctx.noise, centre, radius, petals, seed, self.samples);

            radius *= 1.0 - self.spacing;
            centre.z += self.z_step;
        }
        Ok(Geometry::new(
            positions,
            Topology::Rings {
                samples: self.samples,
            },
        ))
    }
}

impl GeometryGenerator for TongueDescriptor {
    fn generate(&self, ctx: &GenerateContext) -> Result<Geometry> {
        let flower = &self.flower;
        let petals = Petals::animated(flower, ctx);
        let mut radius = petals.base_radius(flower.radius);
        let mut centre = Vec3::ZERO;

        // A still tongue holds the pose of the first loop frame
        let phase = if ctx.animation.animated {
            ctx.phase
        } else {
            LoopPhase::new(0, ctx.phase.num_frames())
        };
        let (mod1, mod2) = (ctx.animation.mod1, ctx.animation.mod2);

        let mut positions = Vec::with_capacity(flower.count * flower.samples);
        for i in 0..flower.count {
            let seed = i as f32 * petals.independence;
            push_circle(&mut positions, ctx.noise, centre, radius, petals, seed, flower.samples);

            let step = i as f32 * ctx.noise_scale;
            let nx = ctx.noise.looping(step * mod1, step * mod1, phase, ctx.noise_radius);
            let ny = ctx.noise.looping(step * mod2, step * mod2, phase, ctx.noise_radius);
            centre.x += ease(nx, -1.0, 1.0, -self.amount, self.amount, ctx.animation.easing);
            centre.y += ease(ny, -1.0, 1.0, -self.amount, self.amount, ctx.animation.easing);

            radius *= 1.0 - flower.spacing;
            if radius <= TONGUE_TIP_RADIUS {
                radius = 0.0;
            }
            centre.z += flower.z_step;
        }
        Ok(Geometry::new(
            positions,
            Topology::Rings {
                samples: flower.samples,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::AnimationParameters;

    #[test]
    fn test_flower_ring_counts() {
        let noise = NoiseField::new(0);
        let animation = AnimationParameters::default();
        let ctx = GenerateContext::still(&noise, &animation);

        let flower = FlowerDescriptor {
            count: 12,
            samples: 20,
            ..FlowerDescriptor::default()
        };
        let geometry = flower.generate(&ctx).unwrap();
        assert_eq!(geometry.len(), 240);
        assert_eq!(geometry.topology, Topology::Rings { samples: 20 });

        // Circles descend along z
        assert!(geometry.positions[20].z < geometry.positions[0].z);
    }

    #[test]
    fn test_undeformed_flower_is_round() {
        let noise = NoiseField::new(0);
        let animation = AnimationParameters::default();
        let ctx = GenerateContext::still(&noise, &animation);

        let flower = FlowerDescriptor {
            radius: 4.0,
            magnitude: 0.0,
            count: 1,
            samples: 16,
            ..FlowerDescriptor::default()
        };
        let geometry = flower.generate(&ctx).unwrap();
        // rad = r, so each vertex sits r² from the centre at height r²
        for p in &geometry.positions {
            assert!((p.truncate().length() - 16.0).abs() < 1e-3);
            assert!((p.z - 16.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_animated_flower_uses_ranges() {
        let noise = NoiseField::new(0);
        let animation = AnimationParameters::default();
        let flower = FlowerDescriptor {
            frequency_range: (0.5, 0.5),
            magnitude_range: (0.0, 0.0),
            independence_range: (2.0, 2.0),
            ..FlowerDescriptor::default()
        };
        let mut ctx = GenerateContext::still(&noise, &animation);
        ctx.shape_signal = Some(0.3);

        let petals = Petals::animated(&flower, &ctx);
        assert_eq!(petals.frequency, 0.5);
        assert_eq!(petals.independence, 2.0);
    }

    #[test]
    fn test_tongue_closes_its_tip() {
        let noise = NoiseField::new(3);
        let animation = AnimationParameters::default();
        let ctx = GenerateContext::still(&noise, &animation);

        let mut tongue = TongueDescriptor::default();
        tongue.flower.count = 12;
        let geometry = tongue.generate(&ctx).unwrap();
        assert_eq!(geometry.len(), 12 * 39);

        // Radius 9 shrinks by 10% per circle: 3.14 on the eleventh, then collapses
        let last_ring = &geometry.positions[11 * 39..];
        let first = last_ring[0];
        assert!(last_ring.iter().all(|p| *p == first));
    }

    #[test]
    fn test_still_tongue_ignores_tick() {
        let noise = NoiseField::new(3);
        let animation = AnimationParameters::default();
        let still = GenerateContext::still(&noise, &animation);
        let later = GenerateContext {
            phase: LoopPhase::new(40, animation.num_frames),
            ..still
        };

        let tongue = TongueDescriptor::default();
        assert_eq!(tongue.generate(&still).unwrap(), tongue.generate(&later).unwrap());
    }

    #[test]
    fn test_animated_tongue_loops() {
        let noise = NoiseField::new(3);
        let animation = AnimationParameters {
            animated: true,
            ..AnimationParameters::default()
        };
        let at = |tick| GenerateContext {
            phase: LoopPhase::new(tick, animation.num_frames),
            ..GenerateContext::still(&noise, &animation)
        };

        let tongue = TongueDescriptor::default();
        let start = tongue.generate(&at(0)).unwrap();
        assert_eq!(start, tongue.generate(&at(161)).unwrap());
        assert_ne!(start, tongue.generate(&at(40)).unwrap());
    }
}
