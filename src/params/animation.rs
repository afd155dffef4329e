//! Animation parameters: noise sampling, loop length, extrusion bounds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::easing::EasingCurve;

/// Per-axis extrusion limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisExtrusion {
    /// Axis takes part in displacement at all
    pub enabled: bool,

    /// Still-mode bound (world units): displacement spans `[-amount, amount]`
    pub amount: f32,

    /// Animated-mode lower bound
    pub min: f32,

    /// Animated-mode upper bound
    pub max: f32,
}

impl Default for AxisExtrusion {
    fn default() -> Self {
        Self {
            enabled: true,
            amount: 0.0,
            min: 0.0,
            max: 0.0,
        }
    }
}

impl AxisExtrusion {
    /// Zero the amount and both animated bounds, keeping the toggle
    pub fn reset(&mut self) {
        self.amount = 0.0;
        self.min = 0.0;
        self.max = 0.0;
    }
}

/// Layered (Brownian) noise settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrownianParameters {
    /// Number of octaves summed
    pub iterations: u32,

    /// Amplitude of the first octave
    pub amplitude: f32,

    /// Spatial frequency of the first octave (doubles every octave)
    pub frequency: f32,

    /// Amplitude multiplier between octaves
    pub persistence: f32,
}

impl Default for BrownianParameters {
    fn default() -> Self {
        Self {
            iterations: 4,
            amplitude: 1.0,
            frequency: 0.0,
            persistence: 0.5,
        }
    }
}

/// How noise scale and radius vary over the loop in animation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modulation {
    /// Scale and radius stay at their slider values
    #[default]
    None,

    /// Driven directly by a looping noise sample
    Noise,

    /// Driven by the sine of a looping noise sample
    SineOfNoise,

    /// Driven by a sine of the loop angle
    Sine,
}

impl Modulation {
    /// Notification shown when the modulation is selected
    pub fn label(&self) -> &'static str {
        match self {
            Modulation::None => "NOISE MODULATION OFF.",
            Modulation::Noise => "ANIMATED NOISE SELECTED.",
            Modulation::SineOfNoise => "SINE NOISE SELECTED.",
            Modulation::Sine => "SINE WAVE SELECTED.",
        }
    }
}

impl FromStr for Modulation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "none" | "off" => Ok(Modulation::None),
            "noise" => Ok(Modulation::Noise),
            "sine_of_noise" | "sine_noise" => Ok(Modulation::SineOfNoise),
            "sine" => Ok(Modulation::Sine),
            other => Err(format!("unknown modulation '{}'", other)),
        }
    }
}

/// Displacement strategy applied to every vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplacementStrategy {
    /// Plain looping simplex displacement
    #[default]
    Simplex,
    Ripple,
    Turbulence,
    Squidge,
    Sink,
    Brownian,
    BrownianRidged,
    Sheets,
    Floor,
    Head,
    Sour,
    Bulge,
    Depressing,
}

impl DisplacementStrategy {
    pub const ALL: [DisplacementStrategy; 13] = [
        DisplacementStrategy::Simplex,
        DisplacementStrategy::Ripple,
        DisplacementStrategy::Turbulence,
        DisplacementStrategy::Squidge,
        DisplacementStrategy::Sink,
        DisplacementStrategy::Brownian,
        DisplacementStrategy::BrownianRidged,
        DisplacementStrategy::Sheets,
        DisplacementStrategy::Floor,
        DisplacementStrategy::Head,
        DisplacementStrategy::Sour,
        DisplacementStrategy::Bulge,
        DisplacementStrategy::Depressing,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DisplacementStrategy::Simplex => "simplex",
            DisplacementStrategy::Ripple => "ripple",
            DisplacementStrategy::Turbulence => "turbulence",
            DisplacementStrategy::Squidge => "squidge",
            DisplacementStrategy::Sink => "sink",
            DisplacementStrategy::Brownian => "brownian",
            DisplacementStrategy::BrownianRidged => "brownian_ridged",
            DisplacementStrategy::Sheets => "sheets",
            DisplacementStrategy::Floor => "floor",
            DisplacementStrategy::Head => "head",
            DisplacementStrategy::Sour => "sour",
            DisplacementStrategy::Bulge => "bulge",
            DisplacementStrategy::Depressing => "depressing",
        }
    }
}

impl fmt::Display for DisplacementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DisplacementStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.name() == wanted)
            .ok_or_else(|| format!("unknown displacement strategy '{}'", s))
    }
}

/// Global animation parameters, read once per tick from the committed snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationParameters {
    /// Spatial noise scale (size of the noise area sampled)
    pub scale: f32,

    /// Radius of the circle walked in noise time (bigger is faster change)
    pub radius: f32,

    /// Loop length in frames; `tick mod num_frames` sets the phase
    pub num_frames: u32,

    /// Sequence export writes `num_frames * frame_multiplier` frames
    pub frame_multiplier: u32,

    /// Free modifiers used by the distance-field strategies
    pub mod1: f32,
    pub mod2: f32,

    pub x: AxisExtrusion,
    pub y: AxisExtrusion,
    pub z: AxisExtrusion,

    /// Animation mode: extrusion uses the min/max bounds and parameters are modulated
    pub animated: bool,

    pub modulation: Modulation,

    /// Bounds for modulated scale
    pub scale_range: (f32, f32),

    /// Bounds for modulated radius
    pub radius_range: (f32, f32),

    pub brownian: BrownianParameters,

    pub strategy: DisplacementStrategy,

    /// Curve used wherever animated values are eased
    pub easing: EasingCurve,
}

impl Default for AnimationParameters {
    fn default() -> Self {
        Self {
            scale: 0.1,
            radius: 0.5,
            num_frames: 161,
            frame_multiplier: 1,
            mod1: 0.1,
            mod2: 4.0,
            x: AxisExtrusion::default(),
            y: AxisExtrusion::default(),
            z: AxisExtrusion::default(),
            animated: false,
            modulation: Modulation::None,
            scale_range: (0.0, 0.0),
            radius_range: (0.0, 0.0),
            brownian: BrownianParameters::default(),
            strategy: DisplacementStrategy::Simplex,
            easing: EasingCurve::QuadraticInOut,
        }
    }
}

impl AnimationParameters {
    /// Frames written by a sequence export
    pub fn sequence_length(&self) -> usize {
        self.num_frames as usize * self.frame_multiplier.max(1) as usize
    }

    /// Zero every extrusion amount and bound
    pub fn reset_extrusion(&mut self) {
        self.x.reset();
        self.y.reset();
        self.z.reset();
    }
}
