//! Wavefront OBJ export of rendered frames.
//!
//! [`ObjWriter`] is a [`Renderer`] that writes world-space vertices instead of
//! drawing them: points become `p` elements, strips and triangle lists
//! become `f` faces. Sequence export drives one frame at a time and stops at
//! the first failure, leaving the frames already written on disk.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use glam::{Mat4, Vec3};
use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::render::Renderer;

/// Renderer writing OBJ text to `W`
pub struct ObjWriter<W: Write> {
    out: W,
    transform: Mat4,

    /// Vertices written so far (OBJ indices are 1-based and file-global)
    written: usize,
    faces: usize,
}

impl<W: Write> ObjWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            transform: Mat4::IDENTITY,
            written: 0,
            faces: 0,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.written
    }

    pub fn face_count(&self) -> usize {
        self.faces
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write `v` records and return the OBJ index of the first one
    fn write_vertices(&mut self, positions: &[Vec3]) -> Result<usize> {
        let first = self.written + 1;
        for p in positions {
            let world = self.transform.transform_point3(*p);
            writeln!(self.out, "v {} {} {}", world.x, world.y, world.z)?;
        }
        self.written += positions.len();
        Ok(first)
    }

    fn write_face(&mut self, a: usize, b: usize, c: usize) -> Result<()> {
        writeln!(self.out, "f {} {} {}", a, b, c)?;
        self.faces += 1;
        Ok(())
    }
}

impl<W: Write> Renderer for ObjWriter<W> {
    fn begin_frame(&mut self, transform: Mat4) -> Result<()> {
        self.transform = transform;
        writeln!(self.out, "# simulacra")?;
        Ok(())
    }

    fn points(&mut self, points: &[Vec3]) -> Result<()> {
        let first = self.write_vertices(points)?;
        for index in first..first + points.len() {
            writeln!(self.out, "p {}", index)?;
        }
        Ok(())
    }

    fn strip(&mut self, strip: &[Vec3]) -> Result<()> {
        let first = self.write_vertices(strip)?;
        for k in 0..strip.len().saturating_sub(2) {
            let (a, b, c) = (first + k, first + k + 1, first + k + 2);
            // Odd strip triangles flip to keep one winding
            if k % 2 == 0 {
                self.write_face(a, b, c)?;
            } else {
                self.write_face(b, a, c)?;
            }
        }
        Ok(())
    }

    fn triangles(&mut self, triangles: &[Vec3]) -> Result<()> {
        let first = self.write_vertices(triangles)?;
        for t in 0..triangles.len() / 3 {
            let a = first + t * 3;
            self.write_face(a, a + 1, a + 2)?;
        }
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Path of sequence frame `index`: `<directory>/<prefix><index:04>.obj`
pub fn sequence_frame_path(directory: &Path, prefix: &str, index: usize) -> PathBuf {
    directory.join(format!("{}{:04}.obj", prefix, index))
}

/// Create `path` and let `draw` render one frame into it
///
/// # Returns
/// Number of vertices written
pub fn write_frame<F>(path: &Path, draw: F) -> Result<usize>
where
    F: FnOnce(&mut dyn Renderer) -> Result<()>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    let mut writer = ObjWriter::new(BufWriter::new(file));
    draw(&mut writer)?;
    let vertices = writer.vertex_count();
    writer.into_inner().flush()?;
    debug!("Wrote {} ({} vertices)", path.display(), vertices);
    Ok(vertices)
}

/// Outcome of a sequence export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceReport {
    pub directory: PathBuf,
    pub frames_written: usize,
    pub aborted: bool,
}

/// Export `count` frames, calling `frame(k, renderer)` for each in order
///
/// `abort` is checked between frames. A failed frame stops the export with
/// [`Error::Export`]; the frames before it stay on disk.
pub fn export_sequence<F>(
    directory: &Path,
    prefix: &str,
    count: usize,
    abort: &AtomicBool,
    mut frame: F,
) -> Result<SequenceReport>
where
    F: FnMut(usize, &mut dyn Renderer) -> Result<()>,
{
    fs::create_dir_all(directory)?;
    let mut report = SequenceReport {
        directory: directory.to_path_buf(),
        frames_written: 0,
        aborted: false,
    };

    for k in 0..count {
        if abort.load(Ordering::Relaxed) {
            warn!("Sequence export aborted after {} frames", k);
            report.aborted = true;
            return Ok(report);
        }
        let path = sequence_frame_path(directory, prefix, k);
        write_frame(&path, |renderer| frame(k, renderer)).map_err(|source| Error::Export {
            frame: k,
            source: Box::new(source),
        })?;
        report.frames_written += 1;
    }

    info!(
        "Exported {} frames to {}",
        report.frames_written,
        directory.display()
    );
    Ok(report)
}
