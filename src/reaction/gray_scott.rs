//! Gray–Scott reaction-diffusion on a wrapping grid.

use log::debug;

use super::ReactionField;
use crate::params::{Coefficients, ReactionParameters};

/// U/V concentrations written into a feed rectangle
const FEED_U: f32 = 0.5;
const FEED_V: f32 = 0.25;

/// Gray–Scott simulator with periodic boundaries
#[derive(Debug, Clone)]
pub struct GrayScott {
    width: usize,
    height: usize,
    u: Vec<f32>,
    v: Vec<f32>,
    next_u: Vec<f32>,
    next_v: Vec<f32>,
    coefficients: Coefficients,
}

impl GrayScott {
    /// Create a simulator in its rest state (U = 1, V = 0 everywhere)
    pub fn new(width: usize, height: usize, coefficients: Coefficients) -> Self {
        let cells = width * height;
        Self {
            width,
            height,
            u: vec![1.0; cells],
            v: vec![0.0; cells],
            next_u: vec![1.0; cells],
            next_v: vec![0.0; cells],
            coefficients,
        }
    }

    pub fn from_params(params: &ReactionParameters) -> Self {
        Self::new(params.width, params.height, params.coefficients)
    }

    pub fn coefficients(&self) -> Coefficients {
        self.coefficients
    }

    pub fn set_coefficients(&mut self, coefficients: Coefficients) {
        self.coefficients = coefficients;
    }

    pub fn set_f(&mut self, f: f32) {
        self.coefficients.f = f;
    }

    pub fn set_k(&mut self, k: f32) {
        self.coefficients.k = k;
    }

    /// Return every cell to the rest state
    pub fn reset(&mut self) {
        self.u.fill(1.0);
        self.v.fill(0.0);
        debug!("Gray-Scott field reset ({}x{})", self.width, self.height);
    }

    /// Advance the simulation by `dt` (clamped to `[0, 1]`)
    pub fn update(&mut self, dt: f32) {
        if self.u.is_empty() {
            return;
        }
        let dt = dt.clamp(0.0, 1.0);
        let c = self.coefficients;

        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let u = self.u[idx];
                let v = self.v[idx];

                let reaction = u * v * v;
                let du_dt = c.diffuse_u * laplacian(&self.u, self.width, self.height, x, y)
                    - reaction
                    + c.f * (1.0 - u);
                let dv_dt =
                    c.diffuse_v * laplacian(&self.v, self.width, self.height, x, y) + reaction
                        - c.k * v;

                self.next_u[idx] = (u + dt * du_dt).clamp(0.0, 1.0);
                self.next_v[idx] = (v + dt * dv_dt).clamp(0.0, 1.0);
            }
        }
        std::mem::swap(&mut self.u, &mut self.next_u);
        std::mem::swap(&mut self.v, &mut self.next_v);
    }

    /// Feed a `w`×`h` rectangle centred on `(x, y)`, clipped to the grid
    pub fn set_rect(&mut self, x: i64, y: i64, w: usize, h: usize) {
        let half_w = (w / 2) as i64;
        let half_h = (h / 2) as i64;
        let min_x = (x - half_w).clamp(0, self.width as i64) as usize;
        let max_x = (x + half_w).clamp(0, self.width as i64) as usize;
        let min_y = (y - half_h).clamp(0, self.height as i64) as usize;
        let max_y = (y + half_h).clamp(0, self.height as i64) as usize;

        for yy in min_y..max_y {
            for xx in min_x..max_x {
                let idx = yy * self.width + xx;
                self.u[idx] = FEED_U;
                self.v[idx] = FEED_V;
            }
        }
    }

    /// Seed every cell whose brightness is below half, image centred on the grid
    ///
    /// # Arguments
    /// * `image_width`, `image_height` - Size of the brightness raster
    /// * `brightness` - Brightness (0-255) at pixel `(x, y)`
    pub fn seed_image<F>(&mut self, image_width: usize, image_height: usize, brightness: F)
    where
        F: Fn(usize, usize) -> u8,
    {
        let offset_x = self.width.saturating_sub(image_width) / 2;
        let offset_y = self.height.saturating_sub(image_height) / 2;
        let w = image_width.min(self.width);
        let h = image_height.min(self.height);

        let mut seeded = 0;
        for y in 0..h {
            for x in 0..w {
                if brightness(x, y) < 128 {
                    let idx = (offset_y + y) * self.width + offset_x + x;
                    self.u[idx] = FEED_U;
                    self.v[idx] = FEED_V;
                    seeded += 1;
                }
            }
        }
        debug!("Seeded {} reaction cells from image", seeded);
    }

    /// U concentration at cell `(x, y)`
    pub fn u_at(&self, x: usize, y: usize) -> f32 {
        self.u[y * self.width + x]
    }
}

impl ReactionField for GrayScott {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn value(&self, x: usize, y: usize) -> f32 {
        self.v[y * self.width + x]
    }
}

/// Five-point Laplacian with periodic boundaries
fn laplacian(field: &[f32], width: usize, height: usize, x: usize, y: usize) -> f32 {
    let center = field[y * width + x];

    let mut sum = -4.0 * center;
    sum += field[((y + height - 1) % height) * width + x]; // Top
    sum += field[((y + 1) % height) * width + x]; // Bottom
    sum += field[y * width + (x + width - 1) % width]; // Left
    sum += field[y * width + (x + 1) % width]; // Right

    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_state_is_stable() {
        let mut sim = GrayScott::new(16, 16, Coefficients::default());
        for _ in 0..20 {
            sim.update(1.0);
        }
        for y in 0..16 {
            for x in 0..16 {
                assert!((sim.u_at(x, y) - 1.0).abs() < 1e-6);
                assert_eq!(sim.value(x, y), 0.0);
            }
        }
    }

    #[test]
    fn test_set_rect_is_centred_and_clipped() {
        let mut sim = GrayScott::new(8, 8, Coefficients::default());
        sim.set_rect(4, 4, 4, 4);
        assert_eq!(sim.value(2, 2), FEED_V);
        assert_eq!(sim.value(5, 5), FEED_V);
        assert_eq!(sim.value(6, 6), 0.0);
        assert_eq!(sim.u_at(3, 4), FEED_U);

        // Near the corner only the in-grid part is written
        sim.set_rect(0, 0, 4, 4);
        assert_eq!(sim.value(0, 0), FEED_V);
        assert_eq!(sim.value(1, 1), FEED_V);
    }

    #[test]
    fn test_feed_spreads_and_stays_bounded() {
        let mut sim = GrayScott::new(32, 32, Coefficients::default());
        sim.set_rect(16, 16, 4, 4);
        for _ in 0..50 {
            sim.update(1.0);
        }
        let mut touched = 0;
        for y in 0..32 {
            for x in 0..32 {
                let v = sim.value(x, y);
                assert!((0.0..=1.0).contains(&v));
                assert!((0.0..=1.0).contains(&sim.u_at(x, y)));
                if v > 0.0 {
                    touched += 1;
                }
            }
        }
        assert!(touched > 16, "reaction should diffuse past the seed");
    }

    #[test]
    fn test_laplacian_wraps_edges() {
        let mut field = vec![0.0; 9];
        field[2] = 1.0; // (2, 0) neighbours (0, 0) through the wrap
        assert_eq!(laplacian(&field, 3, 3, 0, 0), 1.0);
    }

    #[test]
    fn test_reset_clears_feed() {
        let mut sim = GrayScott::new(8, 8, Coefficients::default());
        sim.set_rect(4, 4, 2, 2);
        sim.reset();
        assert_eq!(sim.value(4, 4), 0.0);
    }

    #[test]
    fn test_seed_image_marks_dark_pixels() {
        let mut sim = GrayScott::new(8, 8, Coefficients::default());
        // 4x4 raster, dark on the left half
        sim.seed_image(4, 4, |x, _| if x < 2 { 0 } else { 255 });
        assert_eq!(sim.value(2, 2), FEED_V);
        assert_eq!(sim.value(3, 5), FEED_V);
        assert_eq!(sim.value(4, 2), 0.0);
        assert_eq!(sim.value(0, 0), 0.0);
    }

    #[test]
    fn test_empty_grid_is_noop() {
        let mut sim = GrayScott::new(0, 0, Coefficients::default());
        sim.update(1.0);
        sim.set_rect(0, 0, 3, 3);
    }
}
