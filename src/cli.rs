//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use log::info;

use crate::error::Result;
use crate::params::{DisplacementStrategy, Parameters, Shape};

fn parse_shape(kind: &str) -> std::result::Result<Shape, String> {
    Shape::from_kind(kind).ok_or_else(|| {
        format!(
            "unknown shape '{}' (expected one of: {})",
            kind,
            Shape::KINDS.join(", ")
        )
    })
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "simulacra")]
#[command(about = "Looping procedural geometry animator with OBJ export", long_about = None)]
pub struct Args {
    /// Settings file loaded at start (if present) and used by save/load commands
    #[arg(long, value_name = "PATH", default_value = "settings.json")]
    pub params: PathBuf,

    /// Shape to build, overriding the settings file
    #[arg(long, value_name = "KIND", value_parser = parse_shape)]
    pub shape: Option<Shape>,

    /// Displacement strategy, overriding the settings file
    #[arg(long, value_name = "NAME")]
    pub strategy: Option<DisplacementStrategy>,

    /// Frames to run before exporting (defaults to one loop)
    #[arg(long, value_name = "N")]
    pub frames: Option<usize>,

    /// Noise seed, overriding the settings file
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u32>,

    /// Export directory, overriding the settings file
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Write the final frame to `<output>/<frame_name>.obj`
    #[arg(long)]
    pub export_frame: bool,

    /// Write one full loop as numbered OBJ frames
    #[arg(long)]
    pub export_sequence: bool,

    /// Save the effective parameters to this file and continue
    #[arg(long, value_name = "PATH")]
    pub save_params: Option<PathBuf>,

    /// Read control commands from stdin, one per line
    #[arg(long)]
    pub interactive: bool,
}

impl Args {
    /// Parameters from the settings file (or defaults) with overrides applied
    pub fn parameters(&self) -> Result<Parameters> {
        let mut params = if self.params.is_file() {
            Parameters::load(&self.params)?
        } else {
            info!(
                "No settings at {}, using defaults",
                self.params.display()
            );
            Parameters::default()
        };

        if let Some(shape) = &self.shape {
            params.shape = shape.clone();
        }
        if let Some(strategy) = self.strategy {
            params.animation.strategy = strategy;
        }
        if let Some(seed) = self.seed {
            params.noise_seed = seed;
        }
        if let Some(output) = &self.output {
            params.export.directory = output.clone();
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.json");
        let args = Args::parse_from([
            "simulacra",
            "--params",
            missing.to_str().unwrap(),
            "--shape",
            "fern",
            "--strategy",
            "turbulence",
            "--seed",
            "9",
            "--output",
            "out",
        ]);

        let params = args.parameters().unwrap();
        assert_eq!(params.shape.kind(), "fern");
        assert_eq!(params.animation.strategy, DisplacementStrategy::Turbulence);
        assert_eq!(params.noise_seed, 9);
        assert_eq!(params.export.directory, PathBuf::from("out"));
    }

    #[test]
    fn test_settings_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"animation":{"num_frames":24}}"#).unwrap();

        let args = Args::parse_from(["simulacra", "--params", path.to_str().unwrap()]);
        let params = args.parameters().unwrap();
        assert_eq!(params.animation.num_frames, 24);
        assert_eq!(params.shape, Shape::default());
    }

    #[test]
    fn test_unknown_shape_is_rejected() {
        assert!(Args::try_parse_from(["simulacra", "--shape", "teapot"]).is_err());
        assert!(Args::try_parse_from(["simulacra", "--strategy", "wobble"]).is_err());
    }
}
