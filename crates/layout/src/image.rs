use crate::LayoutError;
use folio_types::Size;
use std::path::Path;

/// Decoded raster image, ready to be written as a PDF image XObject.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width_px: u32,
    pub height_px: u32,
    /// 8-bit RGB samples, row major.
    pub rgb: Vec<u8>,
    /// 8-bit alpha samples, present only when the source has transparency.
    pub alpha: Option<Vec<u8>>,
}

impl DecodedImage {
    /// Decodes PNG, JPEG or GIF bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LayoutError> {
        let image =
            image::load_from_memory(bytes).map_err(|e| LayoutError::Image(e.to_string()))?;
        let (width_px, height_px) = (image.width(), image.height());

        let alpha = if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            let alpha: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
            // Fully opaque images don't need a soft mask.
            (!alpha.iter().all(|a| *a == u8::MAX)).then_some(alpha)
        } else {
            None
        };

        Ok(Self {
            width_px,
            height_px,
            rgb: image.to_rgb8().into_raw(),
            alpha,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, LayoutError> {
        let bytes = std::fs::read(path)
            .map_err(|e| LayoutError::Image(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(&bytes)
    }

    /// Natural size in points, one pixel per point.
    pub fn natural_size(&self) -> Size {
        Size::new(self.width_px as f32, self.height_px as f32)
    }

    /// Display size for a requested width, keeping the aspect ratio.
    /// Without a width the natural size is used, capped to `max_width`.
    pub fn display_size(&self, width: Option<f32>, max_width: f32) -> Size {
        let natural = self.natural_size();
        match width {
            Some(w) => natural.scale_to_width(w),
            None if natural.width > max_width => natural.scale_to_width(max_width),
            None => natural,
        }
    }
}

#[cfg(test)]
pub(crate) fn tiny_png(width: u32, height: u32) -> Vec<u8> {
    use image::{ImageBuffer, ImageFormat, Rgb};
    use std::io::Cursor;

    let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(width, height, |x, y| Rgb([(x * 40) as u8, (y * 40) as u8, 128]));
    let mut out = Cursor::new(Vec::new());
    buffer
        .write_to(&mut out, ImageFormat::Png)
        .expect("encode test png");
    out.into_inner()
}
