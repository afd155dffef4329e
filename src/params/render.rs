//! Transform and export configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// User-controlled artifact transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParameters {
    /// Rotation added every frame (radians per frame, per axis)
    pub rotation_speed: [f32; 3],

    /// Uniform scale
    pub scale: f32,
}

impl Default for TransformParameters {
    fn default() -> Self {
        Self {
            rotation_speed: [0.0; 3],
            scale: 1.0,
        }
    }
}

/// Mesh export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output directory for exported meshes
    pub directory: PathBuf,

    /// File stem of a single-frame export
    pub frame_name: String,

    /// Prefix of sequence frames, followed by the zero-padded index
    pub sequence_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("export"),
            frame_name: "static".to_string(),
            sequence_prefix: "seq".to_string(),
        }
    }
}

impl ExportConfig {
    /// Path of the single-frame export
    pub fn frame_path(&self) -> PathBuf {
        self.directory.join(format!("{}.obj", self.frame_name))
    }
}
