//! Contracts for the collaborators the compositor drives but does not own:
//! the physical display and the texture store.
//!
//! Bus setup, panel init sequences and file decoding all live behind these
//! traits on the host side.

use crate::api::types::{clip_span, Dimensions, Point};
use crate::renderer::pixel_buffer::PixelBuffer;

/// Native pixel format reported by a display driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 16 bits per pixel, 5-6-5. The only format the compositor renders.
    Rgb565,
    /// 18 bits per pixel packed into three bytes.
    Rgb666,
    /// 24 bits per pixel.
    Rgb888,
    /// 1 bit per pixel.
    Monochrome,
}

/// A physical display.
///
/// # Example Implementation
///
/// ```ignore
/// struct St7789 {
///     spi: Spi,
///     dc: Pin,
/// }
///
/// impl DisplayDriver for St7789 {
///     fn dimensions(&self) -> Dimensions { Dimensions::new(240, 135) }
///     fn pixel_format(&self) -> PixelFormat { PixelFormat::Rgb565 }
///
///     fn draw_pixel(&mut self, x: usize, y: usize, packed: u16) {
///         // set window to (x, y) and write two bytes...
///     }
///
///     fn present(&mut self, frame: &PixelBuffer) {
///         // set full window, stream frame.as_bytes()...
///     }
/// }
/// ```
pub trait DisplayDriver {
    /// Physical size in pixels.
    fn dimensions(&self) -> Dimensions;

    fn pixel_format(&self) -> PixelFormat;

    /// Write a single packed pixel straight to the panel.
    fn draw_pixel(&mut self, x: usize, y: usize, packed: u16);

    /// Fill a rectangle straight on the panel. The region is clipped to the
    /// display. Drivers with a hardware fill should override this.
    fn fill_region(&mut self, origin: Point, size: Dimensions, packed: u16) {
        let dims = self.dimensions();
        let xs = clip_span(origin.x, size.width, dims.width);
        for y in clip_span(origin.y, size.height, dims.height) {
            for x in xs.clone() {
                self.draw_pixel(x, y, packed);
            }
        }
    }

    /// Show a complete frame. `frame` always has the display's dimensions.
    fn present(&mut self, frame: &PixelBuffer);
}

/// Read access to decoded textures, keyed by name.
///
/// Lookups are synchronous; an implementation may load on first miss.
pub trait TextureSource {
    /// Resolve a texture, or `None` when it cannot be provided.
    fn texture(&mut self, name: &str) -> Option<&PixelBuffer>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        dims: Dimensions,
        writes: Vec<(usize, usize, u16)>,
    }

    impl DisplayDriver for Recorder {
        fn dimensions(&self) -> Dimensions {
            self.dims
        }

        fn pixel_format(&self) -> PixelFormat {
            PixelFormat::Rgb565
        }

        fn draw_pixel(&mut self, x: usize, y: usize, packed: u16) {
            self.writes.push((x, y, packed));
        }

        fn present(&mut self, _frame: &PixelBuffer) {}
    }

    #[test]
    fn default_fill_region_clips_to_display() {
        let mut display = Recorder {
            dims: Dimensions::new(3, 3),
            writes: Vec::new(),
        };
        display.fill_region(Point::new(-1, 2), Dimensions::new(3, 3), 5);
        assert_eq!(display.writes, vec![(0, 2, 5), (1, 2, 5)]);
    }

    #[test]
    fn default_fill_region_far_off_writes_nothing() {
        let mut display = Recorder {
            dims: Dimensions::new(4, 4),
            writes: Vec::new(),
        };
        display.fill_region(Point::new(i32::MAX - 1, 0), Dimensions::new(4, 1), 5);
        display.fill_region(Point::new(0, i32::MAX), Dimensions::new(1, usize::MAX), 5);
        assert!(display.writes.is_empty());

        display.fill_region(Point::new(i32::MIN, 3), Dimensions::new(usize::MAX, 1), 5);
        assert_eq!(display.writes.len(), 4);
    }
}
