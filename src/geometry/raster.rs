//! Raster images extruded into height fields.

use std::path::Path;

use ::image::{Rgba, RgbaImage};
use glam::Vec3;
use log::debug;

use super::{GenerateContext, Geometry, GeometryGenerator, Topology};
use crate::easing::map_range;
use crate::error::{Error, Result};
use crate::params::{ImageDescriptor, ImageSequenceDescriptor};

/// HSB brightness of a pixel: its largest colour channel
pub fn brightness(pixel: &Rgba<u8>) -> u8 {
    let [r, g, b, _] = pixel.0;
    r.max(g).max(b)
}

/// Decode an image file to RGBA
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    if !path.is_file() {
        return Err(Error::configuration(path, "image file not found"));
    }
    let image = ::image::open(path)
        .map_err(|err| Error::configuration(path, err.to_string()))?
        .to_rgba8();
    debug!(
        "Loaded image {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// One vertex per pixel, dark pixels pushed furthest along z
///
/// White maps to 0 and black to `depth`.
pub fn extrude_image(image: &RgbaImage, spacing: f32, depth: f32) -> Geometry {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let half_w = w as f32 * spacing / 2.0;
    let half_h = h as f32 * spacing / 2.0;

    let mut positions = Vec::with_capacity(w * h);
    for i in 0..w {
        for j in 0..h {
            let b = brightness(image.get_pixel(i as u32, j as u32)) as f32;
            positions.push(Vec3::new(
                i as f32 * spacing - half_w,
                j as f32 * spacing - half_h,
                map_range(b, 255.0, 0.0, 0.0, depth),
            ));
        }
    }
    Geometry::new(positions, Topology::Grid { columns: w, rows: h })
}

impl GeometryGenerator for ImageDescriptor {
    fn generate(&self, ctx: &GenerateContext) -> Result<Geometry> {
        let image = load_image(&self.path)?;
        Ok(extrude_image(&image, self.spacing, ctx.animation.z.amount))
    }
}

impl ImageSequenceDescriptor {
    /// Path of the frame the sequence currently shows
    pub fn current_path(&self) -> std::path::PathBuf {
        let frame = self.counter.current(self.first_frame, self.frame_count);
        self.directory.join(format!("{}.png", frame))
    }
}

impl GeometryGenerator for ImageSequenceDescriptor {
    fn generate(&self, ctx: &GenerateContext) -> Result<Geometry> {
        let image = load_image(&self.current_path())?;
        Ok(extrude_image(&image, self.spacing, ctx.animation.z.amount))
    }

    fn advance(&mut self) {
        self.counter.advance(self.first_frame, self.frame_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseField;
    use crate::params::AnimationParameters;

    #[test]
    fn test_brightness_is_max_channel() {
        assert_eq!(brightness(&Rgba([10, 200, 30, 0])), 200);
        assert_eq!(brightness(&Rgba([0, 0, 0, 255])), 0);
    }

    #[test]
    fn test_extrude_maps_black_to_depth() {
        // Left column black, right column white
        let image = RgbaImage::from_fn(2, 3, |x, _| {
            if x == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let geometry = extrude_image(&image, 2.0, 30.0);
        assert_eq!(geometry.len(), 6);
        assert_eq!(geometry.topology, Topology::Grid { columns: 2, rows: 3 });

        assert_eq!(geometry.positions[0], Vec3::new(-2.0, -3.0, 30.0));
        assert_eq!(geometry.positions[3 + 2], Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_missing_image_is_configuration_error() {
        let noise = NoiseField::new(0);
        let animation = AnimationParameters::default();
        let descriptor = ImageDescriptor {
            path: "definitely/not/here.png".into(),
            spacing: 1.0,
        };
        let err = descriptor
            .generate(&GenerateContext::still(&noise, &animation))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_image_sequence_reads_numbered_frames() {
        let dir = tempfile::tempdir().unwrap();
        for (n, shade) in [(0u8, 0u8), (1, 255)] {
            RgbaImage::from_pixel(2, 2, Rgba([shade, shade, shade, 255]))
                .save(dir.path().join(format!("{}.png", n)))
                .unwrap();
        }

        let noise = NoiseField::new(0);
        let mut animation = AnimationParameters::default();
        animation.z.amount = 10.0;
        let ctx = GenerateContext::still(&noise, &animation);

        let mut sequence = ImageSequenceDescriptor {
            directory: dir.path().to_path_buf(),
            first_frame: 0,
            frame_count: 2,
            spacing: 1.0,
            ..ImageSequenceDescriptor::default()
        };
        assert_eq!(sequence.generate(&ctx).unwrap().positions[0].z, 10.0);
        sequence.advance();
        assert_eq!(sequence.generate(&ctx).unwrap().positions[0].z, 0.0);
        sequence.advance();
        assert_eq!(sequence.current_path(), dir.path().join("0.png"));
    }
}
