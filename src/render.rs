//! Renderer seam and topology emission.
//!
//! The artifact never talks to a graphics API directly. It hands its vertex
//! sequence, topology and model matrix to [`draw`], which breaks the
//! sequence into point lists, triangle strips or triangle lists on a
//! [`Renderer`]. [`FrameRecorder`] is the headless renderer used by the
//! binary and the tests; the OBJ exporter is another.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::error::Result;
use crate::geometry::Topology;

/// Sink for one frame of geometry
pub trait Renderer {
    /// Start a frame drawn under `transform`
    fn begin_frame(&mut self, transform: Mat4) -> Result<()>;

    fn points(&mut self, points: &[Vec3]) -> Result<()>;

    /// One connected triangle strip
    fn strip(&mut self, strip: &[Vec3]) -> Result<()>;

    /// Independent triangles, three vertices each
    fn triangles(&mut self, triangles: &[Vec3]) -> Result<()>;

    fn end_frame(&mut self) -> Result<()>;
}

/// Emit `positions` on `renderer` according to `topology`
///
/// Degenerate layouts (fewer than two grid columns or rows, a single ring)
/// emit nothing.
pub fn draw(
    renderer: &mut dyn Renderer,
    transform: Mat4,
    positions: &[Vec3],
    topology: Topology,
) -> Result<()> {
    renderer.begin_frame(transform)?;

    match topology {
        Topology::Points => {
            if !positions.is_empty() {
                renderer.points(positions)?;
            }
        }
        Topology::Grid { columns, rows } => {
            if columns >= 2 && rows >= 2 {
                let mut strip = Vec::with_capacity(rows * 2);
                for i in 0..columns - 1 {
                    strip.clear();
                    for j in 0..rows {
                        let a = i * rows + j;
                        let b = (i + 1) * rows + j;
                        if b >= positions.len() {
                            break;
                        }
                        strip.push(positions[a]);
                        strip.push(positions[b]);
                    }
                    if strip.len() >= 3 {
                        renderer.strip(&strip)?;
                    }
                }
            }
        }
        Topology::Rings { samples } => {
            if samples > 0 && positions.len() > samples {
                let strip: Vec<Vec3> = (0..positions.len() - samples)
                    .flat_map(|j| [positions[j], positions[j + samples]])
                    .collect();
                renderer.strip(&strip)?;
            }
        }
        Topology::Triangles => {
            let whole = positions.len() / 3 * 3;
            if whole > 0 {
                renderer.triangles(&positions[..whole])?;
            }
        }
    }

    renderer.end_frame()
}

/// Vertex as uploaded to a GPU buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RenderVertex {
    pub position: [f32; 3],
}

impl From<Vec3> for RenderVertex {
    fn from(v: Vec3) -> Self {
        Self {
            position: v.to_array(),
        }
    }
}

/// Per-frame uniforms (model matrix)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    pub model: [[f32; 4]; 4],
}

/// Primitive counts for one recorded frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub points: usize,
    pub strips: usize,
    pub triangles: usize,
}

/// Headless renderer: keeps the last frame in GPU-ready form
#[derive(Debug, Default)]
pub struct FrameRecorder {
    uniforms: Option<FrameUniforms>,
    vertices: Vec<RenderVertex>,
    stats: FrameStats,
    frames: u64,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts of the last completed frame
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Frames completed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Recorded vertices in draw order
    pub fn vertices(&self) -> &[RenderVertex] {
        &self.vertices
    }

    /// Vertex data as a raw byte buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Model matrix of the last frame as raw bytes
    pub fn uniform_bytes(&self) -> &[u8] {
        match &self.uniforms {
            Some(uniforms) => bytemuck::bytes_of(uniforms),
            None => &[],
        }
    }

    fn record(&mut self, vertices: &[Vec3]) {
        self.vertices
            .extend(vertices.iter().copied().map(RenderVertex::from));
    }
}

impl Renderer for FrameRecorder {
    fn begin_frame(&mut self, transform: Mat4) -> Result<()> {
        self.uniforms = Some(FrameUniforms {
            model: transform.to_cols_array_2d(),
        });
        self.vertices.clear();
        self.stats = FrameStats::default();
        Ok(())
    }

    fn points(&mut self, points: &[Vec3]) -> Result<()> {
        self.record(points);
        self.stats.points += points.len();
        Ok(())
    }

    fn strip(&mut self, strip: &[Vec3]) -> Result<()> {
        self.record(strip);
        self.stats.strips += 1;
        self.stats.triangles += strip.len().saturating_sub(2);
        Ok(())
    }

    fn triangles(&mut self, triangles: &[Vec3]) -> Result<()> {
        self.record(triangles);
        self.stats.triangles += triangles.len() / 3;
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.frames += 1;
        Ok(())
    }
}
