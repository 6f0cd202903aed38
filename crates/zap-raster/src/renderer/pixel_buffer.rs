//! Packed 16-bit pixel storage.

use crate::api::types::{clip_span, Dimensions, Point};
use crate::error::RasterError;

/// Rectangular RGB565 pixel store, row-major, `width * height` pixels.
///
/// The dimensions are fixed at construction. Pixels in a row are contiguous,
/// so a row of `w` pixels is a single `w * 2` byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    dimensions: Dimensions,
    pixels: Vec<u16>,
}

impl PixelBuffer {
    /// Create a zero-filled (black) buffer.
    pub fn new(dimensions: Dimensions) -> Self {
        Self::filled(dimensions, 0)
    }

    /// Create a buffer with every pixel set to `packed`.
    pub fn filled(dimensions: Dimensions, packed: u16) -> Self {
        Self {
            dimensions,
            pixels: vec![packed; dimensions.area()],
        }
    }

    /// Wrap already packed pixels.
    pub fn from_pixels(dimensions: Dimensions, pixels: Vec<u16>) -> Result<Self, RasterError> {
        if pixels.len() != dimensions.area() {
            return Err(RasterError::BufferSize {
                dimensions,
                actual: pixels.len(),
            });
        }
        Ok(Self { dimensions, pixels })
    }

    /// Decode little-endian RGB565 bytes, as produced by texture converters.
    pub fn from_le_bytes(dimensions: Dimensions, bytes: &[u8]) -> Result<Self, RasterError> {
        if bytes.len() != dimensions.area() * 2 {
            return Err(RasterError::BufferSize {
                dimensions,
                actual: bytes.len() / 2,
            });
        }
        let pixels = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Ok(Self { dimensions, pixels })
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dimensions.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dimensions.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.dimensions.width + x
    }

    /// Packed pixel at `point`, or `None` outside the buffer.
    pub fn pixel(&self, point: Point) -> Option<u16> {
        if !self.contains(point) {
            return None;
        }
        Some(self.pixels[self.index(point.x as usize, point.y as usize)])
    }

    /// Write a pixel. Points outside the buffer are ignored.
    pub fn set_pixel(&mut self, point: Point, packed: u16) {
        if self.contains(point) {
            let idx = self.index(point.x as usize, point.y as usize);
            self.pixels[idx] = packed;
        }
    }

    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.dimensions.width
            && (point.y as usize) < self.dimensions.height
    }

    /// Fill the whole buffer.
    pub fn fill(&mut self, packed: u16) {
        self.pixels.fill(packed);
    }

    /// Fill a rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, origin: Point, size: Dimensions, packed: u16) {
        let xs = clip_span(origin.x, size.width, self.width());
        let ys = clip_span(origin.y, size.height, self.height());
        if xs.is_empty() {
            return;
        }
        for y in ys {
            self.row_mut(y)[xs.clone()].fill(packed);
        }
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[u16] {
        let start = y * self.dimensions.width;
        &self.pixels[start..start + self.dimensions.width]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [u16] {
        let start = y * self.dimensions.width;
        let width = self.dimensions.width;
        &mut self.pixels[start..start + width]
    }

    #[inline]
    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u16] {
        &mut self.pixels
    }

    /// Raw native-endian bytes, `width * height * 2` long. Display drivers
    /// stream this straight to the panel.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(&mut self.pixels)
    }

    /// Byte stride of one row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.dimensions.width * 2
    }
}
