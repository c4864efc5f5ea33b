//! [`PixelBuffer`]: a fixed-size 8-bit raster, either RGBA or single-channel.

use serde::{Deserialize, Serialize};

/// Channel layout of a [`PixelBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    /// Four channels, straight (non-premultiplied) alpha. Used for albedo.
    Rgba,
    /// One intensity channel. Used for bump/height maps.
    Gray,
}

impl PixelFormat {
    /// Bytes per pixel.
    pub const fn channels(self) -> usize {
        match self {
            PixelFormat::Rgba => 4,
            PixelFormat::Gray => 1,
        }
    }
}

/// A color with straight alpha in `[0.0, 1.0]`, as used by every drawing call.
///
/// Gray buffers take the mean of the three color channels as intensity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub rgb: [u8; 3],
    pub alpha: f32,
}

impl Paint {
    /// Fully opaque color.
    pub const fn opaque(rgb: [u8; 3]) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    /// Fully opaque gray level.
    pub const fn gray(level: u8) -> Self {
        Self::opaque([level, level, level])
    }

    /// Color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self {
            rgb: [r, g, b],
            alpha,
        }
    }

    /// Intensity this paint writes into a gray buffer.
    pub fn luma(&self) -> f32 {
        (self.rgb[0] as f32 + self.rgb[1] as f32 + self.rgb[2] as f32) / 3.0
    }
}

/// A `width * height` raster whose channels are stored as `u8`.
///
/// Every write goes through [`to_channel`], so values are clamped to `[0, 255]`
/// no matter what a compositing step computed. Dimensions never change after
/// construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

/// Round and clamp a computed channel value into a byte.
pub(crate) fn to_channel(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

impl PixelBuffer {
    /// Create a zero-filled buffer (transparent black / intensity 0).
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        let len = width as usize * height as usize * format.channels();
        Self {
            width,
            height,
            format,
            data: vec![0; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// `true` when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw channel bytes, row-major, top row first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning the raw bytes for upload.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * self.format.channels())
    }

    /// Channels of the pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        let start = self.offset(x, y)?;
        Some(&self.data[start..start + self.format.channels()])
    }

    /// The pixel expanded to RGBA. Gray pixels become opaque gray.
    pub fn rgba_at(&self, x: u32, y: u32) -> [u8; 4] {
        match self.pixel(x, y) {
            Some([r, g, b, a]) => [*r, *g, *b, *a],
            Some([v]) => [*v, *v, *v, 255],
            _ => [0, 0, 0, 0],
        }
    }

    /// Overwrite one pixel without blending. Out-of-bounds writes are ignored.
    pub fn put(&mut self, x: u32, y: u32, rgb: [f32; 3], alpha: f32) {
        let Some(start) = self.offset(x, y) else {
            return;
        };
        match self.format {
            PixelFormat::Rgba => {
                self.data[start] = to_channel(rgb[0]);
                self.data[start + 1] = to_channel(rgb[1]);
                self.data[start + 2] = to_channel(rgb[2]);
                self.data[start + 3] = to_channel(alpha * 255.0);
            }
            PixelFormat::Gray => {
                self.data[start] = to_channel((rgb[0] + rgb[1] + rgb[2]) / 3.0);
            }
        }
    }

    /// Source-over composite `paint` onto one pixel. Out-of-bounds is ignored.
    pub fn blend(&mut self, x: u32, y: u32, paint: Paint) {
        let Some(start) = self.offset(x, y) else {
            return;
        };
        let a = paint.alpha.clamp(0.0, 1.0);
        match self.format {
            PixelFormat::Rgba => {
                let dst = &mut self.data[start..start + 4];
                let da = dst[3] as f32 / 255.0;
                let out_a = a + da * (1.0 - a);
                if out_a <= 0.0 {
                    dst.copy_from_slice(&[0, 0, 0, 0]);
                    return;
                }
                for c in 0..3 {
                    let blended =
                        (paint.rgb[c] as f32 * a + dst[c] as f32 * da * (1.0 - a)) / out_a;
                    dst[c] = to_channel(blended);
                }
                dst[3] = to_channel(out_a * 255.0);
            }
            PixelFormat::Gray => {
                let dst = self.data[start] as f32;
                self.data[start] = to_channel(paint.luma() * a + dst * (1.0 - a));
            }
        }
    }

    /// Convert to an [`image::RgbaImage`] for encoding or upload.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(self.rgba_at(x, y))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_sizes() {
        assert_eq!(PixelBuffer::new(4, 3, PixelFormat::Rgba).as_bytes().len(), 48);
        assert_eq!(PixelBuffer::new(4, 3, PixelFormat::Gray).as_bytes().len(), 12);
        assert!(PixelBuffer::new(0, 16, PixelFormat::Rgba).is_empty());
    }

    #[test]
    fn test_channel_clamps() {
        assert_eq!(to_channel(-20.0), 0);
        assert_eq!(to_channel(300.0), 255);
        assert_eq!(to_channel(127.6), 128);
        assert_eq!(to_channel(f32::NAN), 0);
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut buf = PixelBuffer::new(2, 2, PixelFormat::Gray);
        buf.put(5, 0, [255.0; 3], 1.0);
        buf.blend(0, 9, Paint::gray(255));
        assert!(buf.as_bytes().iter().all(|&v| v == 0));
        assert!(buf.pixel(2, 0).is_none());
    }

    #[test]
    fn test_blend_over_opaque_keeps_opacity() {
        let mut buf = PixelBuffer::new(1, 1, PixelFormat::Rgba);
        buf.put(0, 0, [100.0, 100.0, 100.0], 1.0);
        buf.blend(0, 0, Paint::rgba(200, 0, 100, 0.5));
        assert_eq!(buf.pixel(0, 0), Some(&[150, 50, 100, 255][..]));
    }

    #[test]
    fn test_blend_onto_transparent_takes_source() {
        let mut buf = PixelBuffer::new(1, 1, PixelFormat::Rgba);
        buf.blend(0, 0, Paint::rgba(10, 20, 30, 0.2));
        assert_eq!(buf.pixel(0, 0), Some(&[10, 20, 30, 51][..]));
    }

    #[test]
    fn test_gray_blend_uses_luma() {
        let mut buf = PixelBuffer::new(1, 1, PixelFormat::Gray);
        buf.put(0, 0, [200.0; 3], 1.0);
        buf.blend(0, 0, Paint::rgba(0, 30, 60, 0.5));
        assert_eq!(buf.pixel(0, 0), Some(&[115][..]));
    }

    #[test]
    fn test_gray_expands_to_opaque_rgba() {
        let mut buf = PixelBuffer::new(2, 1, PixelFormat::Gray);
        buf.put(1, 0, [90.0; 3], 1.0);
        let img = buf.to_rgba_image();
        assert_eq!(img.get_pixel(1, 0).0, [90, 90, 90, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }
}
