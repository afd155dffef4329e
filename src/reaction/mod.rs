//! Reaction-diffusion field and the feed driver that keeps it alive.

mod gray_scott;

pub use gray_scott::GrayScott;

use crate::easing::map_range;
use crate::noise::{LoopPhase, NoiseField};
use crate::params::ReactionParameters;

/// Radius of the loop walked by each creature through noise time
const CREATURE_WALK_RADIUS: f32 = 0.65;

/// Read-only scalar field sampled by the geometry generators
pub trait ReactionField {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Scalar at cell `(x, y)`
    fn value(&self, x: usize, y: usize) -> f32;

    /// Scalar for vertex-grid coordinate `(i, j)`, wrapping at the field edges
    ///
    /// Column `i` of a vertex grid reads field row `i`, row `j` reads field
    /// column `j`. An empty field reads as zero.
    fn sample(&self, i: usize, j: usize) -> f32 {
        let (w, h) = (self.width(), self.height());
        if w == 0 || h == 0 {
            return 0.0;
        }
        self.value(j % w, i % h)
    }
}

/// Cell position of creature `index` at `phase`
///
/// Each creature walks its own closed loop through noise space, so creature
/// paths repeat with the animation loop.
pub fn creature_cell(
    noise: &NoiseField,
    index: usize,
    phase: LoopPhase,
    width: usize,
    height: usize,
) -> (i64, i64) {
    let i = index as f32;
    let nx = noise.looping(i * 0.4, i * 1.0, phase, CREATURE_WALK_RADIUS);
    let ny = noise.looping(i * 0.8 + 50.0, i * 1.5, phase, CREATURE_WALK_RADIUS);
    let x = map_range(nx, -1.0, 1.0, 0.0, width as f32) as i64;
    let y = map_range(ny, -1.0, 1.0, 0.0, height as f32) as i64;
    (x, y)
}

/// Advance the simulation one rendered frame: integrate, then feed
///
/// Feed goes to every creature position when creatures are enabled, or to
/// a small rectangle at the centre otherwise.
pub fn step(sim: &mut GrayScott, params: &ReactionParameters, noise: &NoiseField, phase: LoopPhase) {
    for _ in 0..params.steps_per_frame {
        sim.update(1.0);
    }

    let (width, height) = (sim.width(), sim.height());
    if params.creatures {
        let (feed_w, feed_h) = params.creature_feed;
        for index in 0..params.creature_count {
            let (x, y) = creature_cell(noise, index, phase, width, height);
            sim.set_rect(x, y, feed_w, feed_h);
        }
    } else {
        let (feed_w, feed_h) = params.centre_feed;
        sim.set_rect((width / 2) as i64, (height / 2) as i64, feed_w, feed_h);
    }
}
