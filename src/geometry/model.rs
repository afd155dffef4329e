//! Wavefront OBJ import.
//!
//! A model loads into a small node tree: the root names the file, one child
//! per `o`/`g` group, and one leaf per face holding its fan-triangulated
//! vertices. Flattening walks the tree depth-first in pre-order, so the
//! resulting triangle list follows file order.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use log::{debug, warn};

use super::{GenerateContext, Geometry, GeometryGenerator, Topology};
use crate::error::{Error, Result};
use crate::params::{ModelDescriptor, ModelSequenceDescriptor};

/// Group used for faces that appear before any `o`/`g` line
const DEFAULT_GROUP: &str = "default";

/// Node of an imported model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshNode {
    pub name: String,

    /// Triangle vertices held by a leaf
    pub vertices: Vec<Vec3>,

    pub children: Vec<MeshNode>,
}

impl MeshNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Every leaf's vertices in depth-first pre-order
    pub fn flatten(&self) -> Vec<Vec3> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.extend_from_slice(&node.vertices);
            // Reversed so the first child is visited first
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Number of leaves in the tree
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(MeshNode::leaf_count).sum()
        }
    }
}

/// Parse OBJ source text into a node tree named `name`
///
/// `path` is only used to label errors.
pub fn parse_obj(source: &str, name: &str, path: &Path) -> Result<MeshNode> {
    let mut root = MeshNode::new(name);
    let mut positions: Vec<Vec3> = Vec::new();

    for (number, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "v" => {
                if parts.len() < 4 {
                    return Err(line_error(path, number, "vertex needs three coordinates"));
                }
                let mut coords = [0.0f32; 3];
                for (slot, token) in coords.iter_mut().zip(&parts[1..4]) {
                    *slot = token.parse().map_err(|_| {
                        line_error(path, number, &format!("bad coordinate '{}'", token))
                    })?;
                }
                positions.push(Vec3::from_array(coords));
            }
            "o" | "g" => {
                let group = if parts.len() > 1 {
                    parts[1..].join(" ")
                } else {
                    DEFAULT_GROUP.to_string()
                };
                root.children.push(MeshNode::new(group));
            }
            "f" => {
                if parts.len() < 4 {
                    return Err(line_error(path, number, "face needs at least three vertices"));
                }
                let corners = parts[1..]
                    .iter()
                    .map(|token| resolve_index(token, positions.len(), path, number))
                    .collect::<Result<Vec<usize>>>()?;

                let mut face = MeshNode::new(format!("f{}", number + 1));
                for k in 1..corners.len() - 1 {
                    face.vertices.push(positions[corners[0]]);
                    face.vertices.push(positions[corners[k]]);
                    face.vertices.push(positions[corners[k + 1]]);
                }

                if root.children.is_empty() {
                    root.children.push(MeshNode::new(DEFAULT_GROUP));
                }
                if let Some(group) = root.children.last_mut() {
                    group.children.push(face);
                }
            }
            // Normals, texture coordinates and materials do not shape the mesh
            _ => {}
        }
    }

    debug!(
        "Parsed model '{}': {} positions, {} faces",
        name,
        positions.len(),
        root.leaf_count()
    );
    Ok(root)
}

/// Read and parse an OBJ file, naming the root after the file stem
pub fn load_obj(path: &Path) -> Result<MeshNode> {
    let source = fs::read_to_string(path)
        .map_err(|err| Error::configuration(path, format!("cannot read model: {}", err)))?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());
    parse_obj(&source, &name, path)
}

/// Zero-based position index of a face corner like `7`, `7/2`, `7//3` or `-1`
fn resolve_index(token: &str, count: usize, path: &Path, number: usize) -> Result<usize> {
    let raw = token.split('/').next().unwrap_or(token);
    let index: i64 = raw
        .parse()
        .map_err(|_| line_error(path, number, &format!("bad face index '{}'", token)))?;

    let resolved = match index {
        0 => None,
        i if i > 0 => Some(i - 1),
        i => Some(count as i64 + i),
    };
    match resolved {
        Some(i) if i >= 0 && (i as usize) < count => Ok(i as usize),
        _ => Err(line_error(
            path,
            number,
            &format!("face index {} out of range for {} vertices", index, count),
        )),
    }
}

fn line_error(path: &Path, number: usize, reason: &str) -> Error {
    Error::configuration(path, format!("line {}: {}", number + 1, reason))
}

fn triangles(model: &MeshNode) -> Geometry {
    let mut positions = model.flatten();
    if positions.len() % 3 != 0 {
        warn!("Model '{}' has a partial triangle; dropping it", model.name);
        positions.truncate(positions.len() / 3 * 3);
    }
    Geometry::new(positions, Topology::Triangles)
}

impl GeometryGenerator for ModelDescriptor {
    fn generate(&self, _ctx: &GenerateContext) -> Result<Geometry> {
        Ok(triangles(&load_obj(&self.path)?))
    }
}

impl ModelSequenceDescriptor {
    /// Path of the frame the sequence currently shows
    pub fn current_path(&self) -> PathBuf {
        let frame = self.counter.current(self.first_frame, self.frame_count);
        self.directory.join(format!("{}.obj", frame))
    }
}

impl GeometryGenerator for ModelSequenceDescriptor {
    fn generate(&self, _ctx: &GenerateContext) -> Result<Geometry> {
        Ok(triangles(&load_obj(&self.current_path())?))
    }

    fn advance(&mut self) {
        self.counter.advance(self.first_frame, self.frame_count);
    }
}
