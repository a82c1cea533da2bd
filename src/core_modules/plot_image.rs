// THEORY:
// The `PlotImage` module is the bridge between the outside world (a file on disk in
// some raster format) and the tracer's stages, which only ever need two things from
// an image: its bounding box and a random-access, read-only pixel lookup.
//
// Decoding is delegated to the `image` crate. The file is read fully into memory
// and the handle released before any processing starts; the decoded frame is then
// widened to 16-bit RGBA so every source format lands on the same channel scale.

use crate::core_modules::pixel::pixel::Pixel;
use crate::error::{Result, TraceError};
use image::{ImageBuffer, Rgba, RgbaImage};
use std::ops::Range;
use std::path::Path;

/// A decoded plot with 16-bit RGBA samples.
pub type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// The pixel rectangle an image covers. `max_x` and `max_y` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Bounds {
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            min_x: 0,
            min_y: 0,
            max_x: width,
            max_y: height,
        }
    }

    pub fn width(&self) -> u32 {
        self.max_x.saturating_sub(self.min_x)
    }

    pub fn height(&self) -> u32 {
        self.max_y.saturating_sub(self.min_y)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Column indices, left to right.
    pub fn columns(&self) -> Range<u32> {
        self.min_x..self.max_x
    }

    /// Row indices, top to bottom.
    pub fn rows(&self) -> Range<u32> {
        self.min_y..self.max_y
    }

    /// Index of the last row, or `None` for an image with no rows.
    pub fn bottom_row(&self) -> Option<u32> {
        (self.height() > 0).then(|| self.max_y - 1)
    }
}

/// Read-only two-dimensional sample grid the tracer scans.
pub trait PlotImage {
    fn bounds(&self) -> Bounds;

    /// The color at `(x, y)`. Callers stay within `bounds()`.
    fn pixel_at(&self, x: u32, y: u32) -> Pixel;
}

impl PlotImage for Rgba16Image {
    fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width(), self.height())
    }

    fn pixel_at(&self, x: u32, y: u32) -> Pixel {
        Pixel::from(*self.get_pixel(x, y))
    }
}

impl PlotImage for RgbaImage {
    fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width(), self.height())
    }

    fn pixel_at(&self, x: u32, y: u32) -> Pixel {
        Pixel::from(*self.get_pixel(x, y))
    }
}

/// Decodes an in-memory image, guessing the format from its contents.
pub fn decode_plot(bytes: &[u8]) -> Result<Rgba16Image> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(decoded.to_rgba16())
}

/// Reads and decodes the image at `path`.
pub fn load_plot(path: &Path) -> Result<Rgba16Image> {
    let bytes = std::fs::read(path).map_err(|source| TraceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read plot image");

    let plot = decode_plot(&bytes)?;
    tracing::debug!(width = plot.width(), height = plot.height(), "decoded plot image");
    Ok(plot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_png(img: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("Error encoding png.");
        bytes
    }

    #[test]
    fn bounds_expose_columns_and_bottom_row() {
        let bounds = Bounds::from_size(4, 3);
        assert_eq!(bounds.columns(), 0..4);
        assert_eq!(bounds.rows(), 0..3);
        assert_eq!(bounds.bottom_row(), Some(2));
        assert!(!bounds.is_empty());
        assert_eq!(Bounds::from_size(4, 0).bottom_row(), None);
        assert!(Bounds::from_size(0, 4).is_empty());
    }

    #[test]
    fn decoded_png_is_widened_to_sixteen_bits() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([0x12, 0x34, 0x56, 0xff]));

        let plot = decode_plot(&encode_png(&img)).unwrap();
        assert_eq!(plot.bounds(), Bounds::from_size(2, 2));
        assert_eq!(plot.pixel_at(1, 0), Pixel::from_bytes(0x12, 0x34, 0x56, 0xff));
        assert_eq!(plot.pixel_at(0, 0), img.pixel_at(0, 0));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode_plot(b"definitely not an image").unwrap_err();
        assert!(matches!(err, TraceError::Decode(_)));
        assert!(err.to_string().starts_with("failed to read image format"));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.png");
        let err = load_plot(&path).unwrap_err();
        assert!(matches!(err, TraceError::Open { .. }));
        assert!(err.to_string().contains("nope.png"));
    }
}
