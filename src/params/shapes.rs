//! Shape descriptors: per-shape static configuration consumed at setup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::geometry::FrameCounter;

/// Flat regular grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneDescriptor {
    /// Columns
    pub width: usize,

    /// Rows
    pub height: usize,

    /// Spacing between neighbouring vertices (world units)
    pub resolution: f32,
}

impl Default for PlaneDescriptor {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            resolution: 2.0,
        }
    }
}

/// Grid with a Gaussian-windowed radial bulge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HyperbolicDescriptor {
    pub width: usize,
    pub height: usize,
    pub resolution: f32,

    /// Gaussian window width (squared and scaled by 2π)
    pub wave: f32,
    pub wave_range: (f32, f32),

    /// Falloff frequency along x
    pub fx: f32,
    pub fx_range: (f32, f32),

    /// Falloff frequency along y
    pub fy: f32,
    pub fy_range: (f32, f32),

    /// Height multiplier
    pub amplify: f32,
    pub amplify_range: (f32, f32),
}

impl Default for HyperbolicDescriptor {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            resolution: 2.0,
            wave: 0.5,
            wave_range: (0.0, 0.0),
            fx: 3.0,
            fx_range: (0.3, 0.3),
            fy: 3.0,
            fy_range: (0.3, 0.3),
            amplify: 1.0,
            amplify_range: (0.0, 0.0),
        }
    }
}

/// Spherical parametrisation avoiding the exact poles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereDescriptor {
    pub radius: f32,

    /// Longitude steps (vertex rings = steps + 1)
    pub resolution_w: usize,

    /// Latitude steps (vertices per ring = steps + 1)
    pub resolution_h: usize,
}

impl Default for SphereDescriptor {
    fn default() -> Self {
        Self {
            radius: 64.0,
            resolution_w: 64,
            resolution_h: 64,
        }
    }
}

/// Hollow box of points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeDescriptor {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub spacing: f32,
}

impl Default for CubeDescriptor {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            depth: 64,
            spacing: 5.0,
        }
    }
}

/// Barnsley fern iterated function system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FernDescriptor {
    pub iterations: usize,

    /// Seed for the map-selection draws
    pub seed: u64,
}

impl Default for FernDescriptor {
    fn default() -> Self {
        Self {
            iterations: 20_000,
            seed: 0,
        }
    }
}

/// Stack of noise-deformed circles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowerDescriptor {
    pub radius: f32,
    pub frequency: f32,
    pub magnitude: f32,

    /// Seed offset between circles (0 = every circle deforms alike)
    pub independence: f32,

    /// Fractional shrink from one circle to the next
    pub spacing: f32,

    /// Number of circles
    pub count: usize,

    /// Advance along z per circle
    pub z_step: f32,

    /// Vertices per circle
    pub samples: usize,

    pub frequency_range: (f32, f32),
    pub magnitude_range: (f32, f32),
    pub independence_range: (f32, f32),
}

impl Default for FlowerDescriptor {
    fn default() -> Self {
        Self {
            radius: 10.0,
            frequency: 0.1,
            magnitude: 0.1,
            independence: 0.1,
            spacing: 0.01,
            count: 100,
            z_step: -0.5,
            samples: 50,
            frequency_range: (0.0, 0.1),
            magnitude_range: (0.0, 0.0),
            independence_range: (0.0, 0.1),
        }
    }
}

/// Flower whose circle centres wander under looping noise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TongueDescriptor {
    pub flower: FlowerDescriptor,

    /// Largest lateral step of the centre walk per circle
    pub amount: f32,
}

impl Default for TongueDescriptor {
    fn default() -> Self {
        Self {
            flower: FlowerDescriptor {
                radius: 9.0,
                frequency: 0.0,
                magnitude: 0.0,
                independence: 0.0,
                spacing: 0.1,
                count: 11,
                z_step: -10.0,
                samples: 39,
                ..FlowerDescriptor::default()
            },
            amount: 5.0,
        }
    }
}

/// Imported OBJ model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelDescriptor {
    pub path: PathBuf,
}

impl Default for ModelDescriptor {
    fn default() -> Self {
        Self {
            path: PathBuf::from("myFace.obj"),
        }
    }
}

/// Numbered OBJ files `<directory>/<n>.obj`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSequenceDescriptor {
    pub directory: PathBuf,

    /// First file number in the loop
    pub first_frame: usize,

    /// Loop end (exclusive)
    pub frame_count: usize,

    #[serde(skip)]
    pub counter: FrameCounter,
}

impl Default for ModelSequenceDescriptor {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("simpleWalk"),
            first_frame: 1,
            frame_count: 51,
            counter: FrameCounter::default(),
        }
    }
}

/// Raster image extruded by brightness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageDescriptor {
    pub path: PathBuf,

    /// Spacing between pixel vertices
    pub spacing: f32,
}

impl Default for ImageDescriptor {
    fn default() -> Self {
        Self {
            path: PathBuf::from("simulacra.png"),
            spacing: 2.0,
        }
    }
}

/// Numbered PNG files `<directory>/<n>.png`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSequenceDescriptor {
    pub directory: PathBuf,
    pub first_frame: usize,
    pub frame_count: usize,
    pub spacing: f32,

    #[serde(skip)]
    pub counter: FrameCounter,
}

impl Default for ImageSequenceDescriptor {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("eyes"),
            first_frame: 0,
            frame_count: 235,
            spacing: 2.0,
            counter: FrameCounter::default(),
        }
    }
}

/// Grid whose heights follow the reaction-diffusion field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreyScottPlaneDescriptor {
    pub spacing: f32,
}

impl Default for GreyScottPlaneDescriptor {
    fn default() -> Self {
        Self { spacing: 2.0 }
    }
}

/// Shape selection with its descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Plane(PlaneDescriptor),
    Hyperbolic(HyperbolicDescriptor),
    Sphere(SphereDescriptor),
    Cube(CubeDescriptor),
    Fern(FernDescriptor),
    Flower(FlowerDescriptor),
    Tongue(TongueDescriptor),
    Model(ModelDescriptor),
    ModelSequence(ModelSequenceDescriptor),
    Image(ImageDescriptor),
    ImageSequence(ImageSequenceDescriptor),
    GreyScottPlane(GreyScottPlaneDescriptor),
}

impl Default for Shape {
    fn default() -> Self {
        Shape::Hyperbolic(HyperbolicDescriptor::default())
    }
}

impl Shape {
    pub const KINDS: [&'static str; 12] = [
        "plane",
        "hyperbolic",
        "sphere",
        "cube",
        "fern",
        "flower",
        "tongue",
        "model",
        "model_sequence",
        "image",
        "image_sequence",
        "grey_scott_plane",
    ];

    /// Shape of the given kind with default descriptor
    pub fn from_kind(kind: &str) -> Option<Shape> {
        let shape = match kind.to_lowercase().replace('-', "_").as_str() {
            "plane" => Shape::Plane(PlaneDescriptor::default()),
            "hyperbolic" => Shape::Hyperbolic(HyperbolicDescriptor::default()),
            "sphere" => Shape::Sphere(SphereDescriptor::default()),
            "cube" => Shape::Cube(CubeDescriptor::default()),
            "fern" | "barnsley" => Shape::Fern(FernDescriptor::default()),
            "flower" => Shape::Flower(FlowerDescriptor::default()),
            "tongue" => Shape::Tongue(TongueDescriptor::default()),
            "model" => Shape::Model(ModelDescriptor::default()),
            "model_sequence" => Shape::ModelSequence(ModelSequenceDescriptor::default()),
            "image" => Shape::Image(ImageDescriptor::default()),
            "image_sequence" => Shape::ImageSequence(ImageSequenceDescriptor::default()),
            "grey_scott_plane" | "gray_scott_plane" => {
                Shape::GreyScottPlane(GreyScottPlaneDescriptor::default())
            }
            _ => return None,
        };
        Some(shape)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Plane(_) => "plane",
            Shape::Hyperbolic(_) => "hyperbolic",
            Shape::Sphere(_) => "sphere",
            Shape::Cube(_) => "cube",
            Shape::Fern(_) => "fern",
            Shape::Flower(_) => "flower",
            Shape::Tongue(_) => "tongue",
            Shape::Model(_) => "model",
            Shape::ModelSequence(_) => "model_sequence",
            Shape::Image(_) => "image",
            Shape::ImageSequence(_) => "image_sequence",
            Shape::GreyScottPlane(_) => "grey_scott_plane",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_resolves() {
        for kind in Shape::KINDS {
            let shape = Shape::from_kind(kind).unwrap();
            assert_eq!(shape.kind(), kind);
        }
        assert!(Shape::from_kind("torus").is_none());
    }

    #[test]
    fn test_shape_json_is_tagged() {
        let json = serde_json::to_string(&Shape::Cube(CubeDescriptor::default())).unwrap();
        assert!(json.contains("\"kind\":\"cube\""));

        let parsed: Shape = serde_json::from_str(r#"{"kind":"sphere","radius":10.0}"#).unwrap();
        match parsed {
            Shape::Sphere(sphere) => {
                assert_eq!(sphere.radius, 10.0);
                assert_eq!(sphere.resolution_w, 64);
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_tongue_keeps_its_own_defaults() {
        let parsed: Shape = serde_json::from_str(r#"{"kind":"tongue","amount":2.5}"#).unwrap();
        match parsed {
            Shape::Tongue(tongue) => {
                assert_eq!(tongue.amount, 2.5);
                assert_eq!(tongue.flower.count, 11);
                assert_eq!(tongue.flower.samples, 39);
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }
}
