//! The displacement strategy bank.
//!
//! Each strategy turns a looping noise sample (or a distance field driven by
//! one) into a signal with a known source interval. [`extrude`] then maps that
//! signal per axis: through the animated `min`/`max` bounds with the easing
//! curve when animation mode is on, or linearly onto the still-mode `amount`
//! otherwise. Disabled axes stay at zero.

use glam::{Vec2, Vec3};

use super::DisplacementContext;
use crate::easing::{ease, map_range};
use crate::params::{AxisExtrusion, DisplacementStrategy};

/// Displacement function: base position and tick inputs to offset
pub type DisplacementFn = fn(Vec3, &DisplacementContext) -> Vec3;

/// Starting octave size for turbulence
const TURBULENCE_SIZE: f32 = 12.0;

/// Still-mode target interval as fractions of `amount`, plus the factor on
/// the animated bounds
#[derive(Debug, Clone, Copy)]
struct Extent {
    still_lo: f32,
    still_hi: f32,
    animated_scale: f32,

    /// Still mode eases onto the interval instead of mapping linearly
    still_eased: bool,
}

const SYMMETRIC: Extent = Extent {
    still_lo: -1.0,
    still_hi: 1.0,
    animated_scale: 1.0,
    still_eased: false,
};

const POSITIVE: Extent = Extent {
    still_lo: 0.0,
    still_hi: 1.0,
    animated_scale: 1.0,
    still_eased: false,
};

const INVERTED: Extent = Extent {
    still_lo: 1.0,
    still_hi: 0.0,
    animated_scale: 1.0,
    still_eased: false,
};

const QUARTER: Extent = Extent {
    still_lo: -0.25,
    still_hi: 0.25,
    animated_scale: 1.0,
    still_eased: false,
};

const FAINT: Extent = Extent {
    animated_scale: 1.0 / 20.0,
    ..SYMMETRIC
};

const POSITIVE_EASED: Extent = Extent {
    still_eased: true,
    ..POSITIVE
};

const SYMMETRIC_EASED: Extent = Extent {
    still_eased: true,
    ..SYMMETRIC
};

/// `n / d`, or zero when `d` vanishes or the quotient overflows
pub fn guarded_div(n: f32, d: f32) -> f32 {
    if d.abs() < f32::EPSILON {
        return 0.0;
    }
    let q = n / d;
    if q.is_finite() {
        q
    } else {
        0.0
    }
}

/// Length of `(x, y)`, zero on overflow
fn distance(x: f32, y: f32) -> f32 {
    let d = x.hypot(y);
    if d.is_finite() {
        d
    } else {
        0.0
    }
}

fn extrude_axis(
    axis: &AxisExtrusion,
    signal: f32,
    src: (f32, f32),
    extent: Extent,
    ctx: &DisplacementContext,
) -> f32 {
    if !axis.enabled {
        return 0.0;
    }
    if ctx.params.animated {
        let s = extent.animated_scale;
        ease(signal, src.0, src.1, axis.min * s, axis.max * s, ctx.params.easing)
    } else {
        let lo = axis.amount * extent.still_lo;
        let hi = axis.amount * extent.still_hi;
        if extent.still_eased {
            ease(signal, src.0, src.1, lo, hi, ctx.params.easing)
        } else {
            map_range(signal, src.0, src.1, lo, hi)
        }
    }
}

/// Map a per-axis signal onto the extrusion bounds
fn extrude(signal: Vec3, src: (f32, f32), extent: Extent, ctx: &DisplacementContext) -> Vec3 {
    let p = ctx.params;
    Vec3::new(
        extrude_axis(&p.x, signal.x, src, extent, ctx),
        extrude_axis(&p.y, signal.y, src, extent, ctx),
        extrude_axis(&p.z, signal.z, src, extent, ctx),
    )
}

/// Same signal on all three axes
fn extrude_uniform(signal: f32, src: (f32, f32), extent: Extent, ctx: &DisplacementContext) -> Vec3 {
    extrude(Vec3::splat(signal), src, extent, ctx)
}

impl DisplacementStrategy {
    /// Function implementing this strategy
    pub fn displacement_fn(self) -> DisplacementFn {
        match self {
            DisplacementStrategy::Simplex => simplex,
            DisplacementStrategy::Ripple => ripple,
            DisplacementStrategy::Turbulence => turbulence,
            DisplacementStrategy::Squidge => squidge,
            DisplacementStrategy::Sink => sink,
            DisplacementStrategy::Brownian => brownian,
            DisplacementStrategy::BrownianRidged => brownian_ridged,
            DisplacementStrategy::Sheets => sheets,
            DisplacementStrategy::Floor => floor,
            DisplacementStrategy::Head => head,
            DisplacementStrategy::Sour => sour,
            DisplacementStrategy::Bulge => bulge,
            DisplacementStrategy::Depressing => depressing,
        }
    }
}

fn simplex(p: Vec3, ctx: &DisplacementContext) -> Vec3 {
    extrude_uniform(ctx.looping(p), (-1.0, 1.0), SYMMETRIC, ctx)
}

/// Concentric sine rings whose spacing breathes with the noise
fn ripple(p: Vec3, ctx: &DisplacementContext) -> Vec3 {
    let ns = ctx.looping(p);
    let (mod1, mod2) = (ctx.params.mod1, ctx.params.mod2);

    let rippler = map_range(ns, -1.0, 1.0, 0.0, mod2);
    let span = map_range(ns, -1.0, 1.0, 0.0, mod1);
    let dist = distance(guarded_div(p.x, span), guarded_div(p.y, span));

    extrude_uniform((rippler + dist).sin(), (-1.0, 1.0), POSITIVE_EASED, ctx)
}

/// Octaves of noise at halving size
fn turbulence(p: Vec3, ctx: &DisplacementContext) -> Vec3 {
    let (mod1, mod2) = (ctx.params.mod1, ctx.params.mod2);
    let (sin, cos) = ctx.phase.angle().sin_cos();
    let depth = guarded_div(p.z, mod1 / 10.0) + mod2 / 10.0 * sin;

    let mut value = 0.0;
    let mut size = TURBULENCE_SIZE;
    while size > 1.0 {
        value += ctx
            .noise
            .eval4(p.x * ctx.scale, p.y * ctx.scale, depth, ctx.radius * cos)
            * size;
        size /= 2.0;
    }

    let result = mod2 / 10.0 * value / TURBULENCE_SIZE;
    extrude_uniform(result, (-1.0, 1.0), SYMMETRIC, ctx)
}

fn squidge(p: Vec3, ctx: &DisplacementContext) -> Vec3 {
    let ns = ctx.looping(p);
    let (mod1, mod2) = (ctx.params.mod1, ctx.params.mod2);

    let rippler = map_range(ns, -1.0, 1.0, 0.0, mod2);
    let x_span = mod1 / 5.0 * ns;
    let y_span = mod2 / 5.0 * ns;
    let dist = distance(guarded_div(p.x, x_span), guarded_div(p.y, y_span));

    extrude_uniform(guarded_div(100.0, rippler + dist), (-1.0, 1.0), QUARTER, ctx)
}

/// A dent orbiting the origin once per loop
fn sink(p: Vec3, ctx: &DisplacementContext) -> Vec3 {
    let (mod1, mod2) = (ctx.params.mod1, ctx.params.mod2);
    let (sin, cos) = ctx.phase.angle().sin_cos();

    let spiro = distance(p.x - mod2 * sin, p.y + mod2 * cos);
    extrude_uniform(guarded_div(100.0, mod1 + spiro), (0.0, 25.0), SYMMETRIC, ctx)
}

/// Octave sums of `noise(a·freq, b·freq)` for each axis pair
///
/// Returns the sums normalised by the total amplitude.
fn octaves(ctx: &DisplacementContext, pairs: [Vec2; 3]) -> Vec3 {
    let b = ctx.params.brownian;
    let mut amp = b.amplitude;
    let mut freq = b.frequency;
    let mut max_amp = 0.0;
    let mut sum = Vec3::ZERO;

    for _ in 0..b.iterations {
        let sample = |pair: Vec2| {
            ctx.noise
                .looping(pair.x * freq, pair.y * freq, ctx.phase, ctx.radius)
                * amp
        };
        sum += Vec3::new(sample(pairs[0]), sample(pairs[1]), sample(pairs[2]));
        max_amp += amp;
        amp *= b.persistence;
        freq *= 2.0;
    }

    Vec3::new(
        guarded_div(sum.x, max_amp),
        guarded_div(sum.y, max_amp),
        guarded_div(sum.z, max_amp),
    )
}

fn brownian(p: Vec3, ctx: &DisplacementContext) -> Vec3 {
    let xy = Vec2::new(p.x, p.y);
    let signal = octaves(ctx, [xy, xy, xy]);
    extrude(signal, (-1.0, 1.0), POSITIVE, ctx)
}

/// Brownian with a distinct axis pair per output axis, folded to positive
fn brownian_ridged(p: Vec3, ctx: &DisplacementContext) -> Vec3 {
    let signal = octaves(
        ctx,
        [
            Vec2::new(p.x, p.z),
            Vec2::new(p.y, p.z),
            Vec2::new(p.x, p.y),
        ],
    );
    extrude(signal, (-1.0, 1.0), POSITIVE, ctx).abs()
}

fn sheets(p: Vec3, ctx: &DisplacementContext) -> Vec3 {
    let ns = ctx.looping(p);
    let params = ctx.params;

    let rippler = params.mod2 * ns;
    let x_span = map_range(ns, -1.0, 1.0, 0.0, params.x.amount);
    let y_span = map_range(ns, -1.0, 1.0, 0.0, params.y.amount);
    let dist = distance(guarded_div(p.x, x_span), guarded_div(p.y, y_span));

    let result = guarded_div(params.mod1 * 10.0, rippler + dist);
    extrude_uniform(result, (-1.0, 1.0), POSITIVE, ctx)
}

/// Base offset lifting the floor
const FLOOR_BASE: Vec3 = Vec3::new(0.0, 50.0, 0.0);

/// A raised floor with a slow orbiting swell
fn floor(p: Vec3, ctx: &DisplacementContext) -> Vec3 {
    let (sin, cos) = ctx.phase.angle().sin_cos();

    let rad = ctx.params.mod1 * sin;
    let rippler = 127.5 - 42.5 * sin;
    let spiro = distance(
        FLOOR_BASE.x - (p.x + rad * sin),
        FLOOR_BASE.y - (p.y - rad * cos),
    );

    let result = guarded_div(100.0, rippler + spiro);
    FLOOR_BASE + extrude_uniform(result, (-1.0, 1.0), INVERTED, ctx)
}

fn head(p: Vec3, ctx: &DisplacementContext) -> Vec3 {
    let ns = ctx.looping(p);

    let rippler = 10.0 * ns;
    let half = ns * ns.sin() / 2.0;
    let dist = distance(guarded_div(p.x, half), guarded_div(p.y, -half));

    extrude_uniform(guarded_div(300.0, rippler + dist), (-1.0, 1.0), SYMMETRIC, ctx)
}

fn sour(p: Vec3, ctx: &DisplacementContext) -> Vec3 {
    let ns = ctx.looping(p);
    let dist = distance(p.x + ns, p.y + ns);
    extrude_uniform(guarded_div(128.0 * ns, dist), (0.8, 2.0), FAINT, ctx)
}

fn bulge(p: Vec3, ctx: &DisplacementContext) -> Vec3 {
    let ns = ctx.looping(p);
    let (mod1, mod2) = (ctx.params.mod1, ctx.params.mod2);

    let poker = map_range(ns.sin(), -1.0, 1.0, 0.0, mod2);
    let centre = distance(p.x + mod1 * ns, p.y + mod1 * ns);

    extrude_uniform(guarded_div(100.0, poker + centre), (0.0, 3.0), SYMMETRIC, ctx)
}

fn depressing(p: Vec3, ctx: &DisplacementContext) -> Vec3 {
    let ns = ctx.looping(p);
    let (mod1, mod2) = (ctx.params.mod1, ctx.params.mod2);

    let rippler = map_range(ns, -1.0, 1.0, 0.0, mod1);
    let rad = mod2 * ns;
    let dist = distance(p.x - rad * ns.sin(), p.y - rad * ns.cos());

    extrude_uniform(guarded_div(100.0, rippler + dist), (-1.0, 1.0), SYMMETRIC_EASED, ctx)
}
