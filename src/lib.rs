//! Simulacra library - looping procedural geometry animation

pub mod animator;
pub mod artifact;
pub mod camera;
pub mod cli;
pub mod control;
pub mod easing;
pub mod error;
pub mod export;
pub mod geometry;
pub mod noise;
pub mod params;
pub mod reaction;
pub mod render;
pub mod session;

pub use error::{Error, Result};
