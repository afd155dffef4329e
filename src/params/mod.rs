//! Parameter definitions with documented semantics.
//!
//! Every knob of the sketch lives in [`Parameters`], a serde tree whose
//! structs all carry `#[serde(default)]`, so settings files may omit keys.

mod animation;
mod camera;
mod reaction;
mod render;
mod shapes;
mod store;

use serde::{Deserialize, Serialize};

// Re-export all types
pub use animation::{
    AnimationParameters, AxisExtrusion, BrownianParameters, DisplacementStrategy, Modulation,
};
pub use camera::CameraParameters;
pub use reaction::{Coefficients, ReactionParameters};
pub use render::{ExportConfig, TransformParameters};
pub use shapes::{
    CubeDescriptor, FernDescriptor, FlowerDescriptor, GreyScottPlaneDescriptor,
    HyperbolicDescriptor, ImageDescriptor, ImageSequenceDescriptor, ModelDescriptor,
    ModelSequenceDescriptor, PlaneDescriptor, Shape, SphereDescriptor, TongueDescriptor,
};
pub use store::{ParameterChanges, ParameterStore};

/// Full named-parameter set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub animation: AnimationParameters,
    pub shape: Shape,
    pub transform: TransformParameters,
    pub reaction: ReactionParameters,
    pub camera: CameraParameters,
    pub export: ExportConfig,

    /// Rebuild geometry whenever a parameter changes
    pub auto_update: bool,

    /// Seed of the noise field
    pub noise_seed: u32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            animation: AnimationParameters::default(),
            shape: Shape::default(),
            transform: TransformParameters::default(),
            reaction: ReactionParameters::default(),
            camera: CameraParameters::default(),
            export: ExportConfig::default(),
            auto_update: true,
            noise_seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_keep_defaults() {
        let params: Parameters =
            serde_json::from_str(r#"{"animation":{"scale":0.2},"auto_update":false}"#).unwrap();
        assert_eq!(params.animation.scale, 0.2);
        assert_eq!(params.animation.num_frames, 161);
        assert!(!params.auto_update);
        assert_eq!(params.shape, Shape::default());
        assert_eq!(params.reaction, ReactionParameters::default());
    }

    #[test]
    fn test_serialisation_is_stable() {
        let params = Parameters::default();
        let first = serde_json::to_string_pretty(&params).unwrap();
        let reparsed: Parameters = serde_json::from_str(&first).unwrap();
        let second = serde_json::to_string_pretty(&reparsed).unwrap();
        assert_eq!(first, second);
    }
}
