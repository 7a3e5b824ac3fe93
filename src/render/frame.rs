use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{WrappedError, WrappedResult};

/// A rendered frame as RGBA8 pixels.
///
/// Frames leaving [`crate::FrameRenderer`] are opaque, so `premultiplied` only matters for
/// intermediate buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn to_image(&self) -> WrappedResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(|| {
            WrappedError::render(format!(
                "frame buffer has {} bytes, expected {}x{}x4",
                self.data.len(),
                self.width,
                self.height
            ))
        })
    }

    /// Write the frame as PNG, creating parent directories.
    pub fn save_png(&self, path: &Path) -> WrappedResult<()> {
        crate::encode::ffmpeg::ensure_parent_dir(path)?;
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}
