//! Grid-based generators: plane, hyperbolic paraboloid, sphere, hollow cube,
//! and the reaction-diffusion plane.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::{GenerateContext, Geometry, GeometryGenerator, Topology};
use crate::easing::map_range;
use crate::error::Result;
use crate::params::{
    CubeDescriptor, GreyScottPlaneDescriptor, HyperbolicDescriptor, PlaneDescriptor,
    SphereDescriptor,
};

/// Keeps sphere rings off the exact poles and seam
///
/// Large enough that `cos(POLE_EPSILON)` stays below 1 in `f32`.
const POLE_EPSILON: f32 = 0.001;

/// Centred grid coordinate of column/row `index` out of `count`
fn centred(index: usize, count: usize, spacing: f32) -> f32 {
    index as f32 * spacing - count as f32 * spacing / 2.0
}

impl GeometryGenerator for PlaneDescriptor {
    fn generate(&self, _ctx: &GenerateContext) -> Result<Geometry> {
        let mut positions = Vec::with_capacity(self.width * self.height);
        for i in 0..self.width {
            for j in 0..self.height {
                positions.push(Vec3::new(
                    centred(i, self.width, self.resolution),
                    centred(j, self.height, self.resolution),
                    0.0,
                ));
            }
        }
        Ok(Geometry::new(
            positions,
            Topology::Grid {
                columns: self.width,
                rows: self.height,
            },
        ))
    }
}

impl GeometryGenerator for HyperbolicDescriptor {
    fn generate(&self, ctx: &GenerateContext) -> Result<Geometry> {
        let amplify = ctx.animate(self.amplify, self.amplify_range);
        let wave = ctx.animate(self.wave, self.wave_range);
        let freq_x = ctx.animate(self.fx, self.fx_range);
        let freq_y = ctx.animate(self.fy, self.fy_range);

        let window = TAU * wave * wave;
        let (w, h) = (self.width, self.height);

        let mut positions = Vec::with_capacity(w * h);
        for i in 0..w {
            for j in 0..h {
                let x = centred(i, w, self.resolution);
                let y = centred(j, h, self.resolution);

                let fx = map_range(x, 0.0, w as f32, 0.0, freq_x);
                let fy = map_range(y, 0.0, h as f32, 0.0, freq_y);

                // A zero-width window flattens the bulge entirely
                let gaussian = if window > 0.0 {
                    (-(fx * fx + fy * fy) / window).exp()
                } else {
                    0.0
                };
                let radial = (i as f32 - fx).hypot(j as f32 - fy);
                let z = gaussian * radial * amplify - ctx.reaction_height(i, j);

                positions.push(Vec3::new(x, y, z));
            }
        }
        Ok(Geometry::new(positions, Topology::Grid { columns: w, rows: h }))
    }
}

impl GeometryGenerator for SphereDescriptor {
    fn generate(&self, ctx: &GenerateContext) -> Result<Geometry> {
        let rings = self.resolution_w + 1;
        let per_ring = self.resolution_h + 1;
        let r = self.radius - 1.0;

        let mut positions = Vec::with_capacity(rings * per_ring);
        for i in 0..rings {
            let lon = map_range(
                i as f32,
                0.0,
                self.resolution_w as f32,
                POLE_EPSILON,
                PI - POLE_EPSILON,
            );
            for j in 0..per_ring {
                let lat = map_range(
                    j as f32,
                    0.0,
                    self.resolution_h as f32,
                    POLE_EPSILON,
                    TAU - POLE_EPSILON,
                );
                let z = r * lon.cos() - ctx.reaction_height(i, j);
                positions.push(Vec3::new(
                    r * lon.sin() * lat.cos(),
                    r * lon.sin() * lat.sin(),
                    z,
                ));
            }
        }
        Ok(Geometry::new(
            positions,
            Topology::Grid {
                columns: rings,
                rows: per_ring,
            },
        ))
    }
}

impl CubeDescriptor {
    /// Vertices on the hollow shell: `w·h·d - (w-2)(h-2)(d-2)`
    pub fn shell_count(&self) -> usize {
        let (w, h, d) = (self.width, self.height, self.depth);
        if w == 0 || h == 0 || d == 0 {
            return 0;
        }
        w * h * d - w.saturating_sub(2) * h.saturating_sub(2) * d.saturating_sub(2)
    }
}

impl GeometryGenerator for CubeDescriptor {
    fn generate(&self, _ctx: &GenerateContext) -> Result<Geometry> {
        let (w, h, d) = (self.width, self.height, self.depth);
        let s = self.spacing;

        let mut positions = Vec::with_capacity(self.shell_count());
        for k in 0..d {
            for i in 0..w {
                for j in 0..h {
                    let edge = k == 0
                        || k == d - 1
                        || i == 0
                        || i == w - 1
                        || j == 0
                        || j == h - 1;
                    if edge {
                        positions.push(Vec3::new(centred(i, w, s), centred(j, h, s), centred(k, d, s)));
                    }
                }
            }
        }
        Ok(Geometry::new(positions, Topology::Points))
    }
}

impl GeometryGenerator for GreyScottPlaneDescriptor {
    fn generate(&self, ctx: &GenerateContext) -> Result<Geometry> {
        let Some(field) = ctx.reaction else {
            return Ok(Geometry::empty(Topology::Points));
        };
        let (w, h) = (field.width(), field.height());

        let mut positions = Vec::with_capacity(w * h);
        for i in 0..w {
            for j in 0..h {
                positions.push(Vec3::new(
                    centred(i, w, self.spacing),
                    centred(j, h, self.spacing),
                    ctx.reaction_height(i, j),
                ));
            }
        }
        Ok(Geometry::new(positions, Topology::Grid { columns: w, rows: h }))
    }
}
