//! Barnsley fern iterated function system.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{GenerateContext, Geometry, GeometryGenerator, Topology};
use crate::error::Result;
use crate::params::FernDescriptor;

/// Placement of the fern in world space
const ORIGIN_X: f32 = 300.0;
const ORIGIN_Y: f32 = 800.0;
const SPREAD: f32 = 108.0;
const VERTICAL_SQUASH: f32 = 0.7;

/// The four affine maps of the fern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FernMap {
    Stem,
    LeftLeaflet,
    RightLeaflet,
    Successive,
}

impl FernMap {
    /// Map chosen by a uniform draw in `[0, 100)`
    pub fn select(draw: f32) -> Self {
        if draw <= 1.0 {
            FernMap::Stem
        } else if draw <= 7.0 {
            FernMap::LeftLeaflet
        } else if draw <= 15.0 {
            FernMap::RightLeaflet
        } else {
            FernMap::Successive
        }
    }

    pub fn apply(&self, p: Vec2) -> Vec2 {
        match self {
            FernMap::Stem => Vec2::new(0.0, 0.16 * p.y),
            FernMap::LeftLeaflet => {
                Vec2::new(0.2 * p.x - 0.26 * p.y, 0.23 * p.x + 0.22 * p.y + 1.6)
            }
            FernMap::RightLeaflet => {
                Vec2::new(-0.15 * p.x + 0.28 * p.y, 0.26 * p.x + 0.24 * p.y + 0.44)
            }
            FernMap::Successive => {
                Vec2::new(0.85 * p.x + 0.04 * p.y, -0.04 * p.x + 0.85 * p.y + 1.6)
            }
        }
    }
}

impl GeometryGenerator for FernDescriptor {
    fn generate(&self, _ctx: &GenerateContext) -> Result<Geometry> {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        let mut p = Vec2::ZERO;

        let mut positions = Vec::with_capacity(self.iterations);
        for _ in 0..self.iterations {
            p = FernMap::select(rng.gen_range(0.0..100.0)).apply(p);
            positions.push(Vec3::new(
                ORIGIN_X + p.x * SPREAD,
                ORIGIN_Y - p.y * SPREAD * VERTICAL_SQUASH,
                0.0,
            ));
        }
        Ok(Geometry::new(positions, Topology::Points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseField;
    use crate::params::AnimationParameters;

    #[test]
    fn test_map_selection_distribution() {
        let mut rng = Pcg32::seed_from_u64(42);
        let draws = 200_000;
        let mut counts = [0usize; 4];
        for _ in 0..draws {
            let index = match FernMap::select(rng.gen_range(0.0..100.0)) {
                FernMap::Stem => 0,
                FernMap::LeftLeaflet => 1,
                FernMap::RightLeaflet => 2,
                FernMap::Successive => 3,
            };
            counts[index] += 1;
        }

        let expected = [0.01, 0.06, 0.08, 0.85];
        for (count, want) in counts.iter().zip(expected) {
            let got = *count as f64 / draws as f64;
            assert!((got - want).abs() < 0.005, "got {}, want {}", got, want);
        }
    }

    #[test]
    fn test_fern_is_deterministic_per_seed() {
        let noise = NoiseField::new(0);
        let animation = AnimationParameters::default();
        let ctx = GenerateContext::still(&noise, &animation);

        let fern = FernDescriptor {
            iterations: 500,
            seed: 7,
        };
        let a = fern.generate(&ctx).unwrap();
        let b = fern.generate(&ctx).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 500);

        let other = FernDescriptor { seed: 8, ..fern };
        assert_ne!(other.generate(&ctx).unwrap(), a);
    }

    #[test]
    fn test_fern_stays_in_its_bounds() {
        let noise = NoiseField::new(0);
        let animation = AnimationParameters::default();
        let geometry = FernDescriptor::default()
            .generate(&GenerateContext::still(&noise, &animation))
            .unwrap();

        // The attractor lives in x ∈ [-2.2, 2.7], y ∈ [0, 10]
        for p in &geometry.positions {
            assert!((ORIGIN_X - 2.2 * SPREAD - 1.0..=ORIGIN_X + 2.7 * SPREAD + 1.0).contains(&p.x));
            assert!((ORIGIN_Y - 10.0 * SPREAD * VERTICAL_SQUASH - 1.0..=ORIGIN_Y + 1.0).contains(&p.y));
        }
    }

    #[test]
    fn test_stem_collapses_x() {
        let p = FernMap::Stem.apply(Vec2::new(2.0, 5.0));
        assert_eq!(p.x, 0.0);
        assert!((p.y - 0.8).abs() < 1e-6);
    }
}
