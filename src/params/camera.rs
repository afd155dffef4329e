//! Orbit camera configuration.

use serde::{Deserialize, Serialize};

/// Orbit camera parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParameters {
    /// Starting distance from the orbit target (world units)
    pub distance: f32,

    /// Closest allowed zoom
    pub min_distance: f32,

    /// Furthest allowed zoom
    pub max_distance: f32,

    /// Wheel sensitivity (turned down for trackpads)
    pub wheel_scale: f32,

    /// Orbit sensitivity (radians per pixel dragged)
    pub drag_scale: f32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    pub near_plane: f32,
    pub far_plane: f32,

    /// Viewport size (pixels), used for the projection aspect ratio
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for CameraParameters {
    fn default() -> Self {
        Self {
            distance: 200.0,
            min_distance: 0.0001,
            max_distance: 10000.0,
            wheel_scale: 0.05,
            drag_scale: 0.01,
            fov_degrees: 60.0,
            near_plane: 0.1,
            far_plane: 20000.0, // Past max zoom plus the largest default shape
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

impl CameraParameters {
    pub fn aspect_ratio(&self) -> f32 {
        self.viewport_width as f32 / self.viewport_height.max(1) as f32
    }
}
