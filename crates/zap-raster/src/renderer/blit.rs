//! Rectangular pixel copies between two buffers.
//!
//! Opaque copies move whole rows as byte ranges. Keyed copies compare every
//! source pixel against the packed transparency color and skip matches, so
//! whatever the target already held at those spots survives.

use crate::api::types::{Dimensions, Point};
use crate::error::RasterError;
use crate::renderer::pixel_buffer::PixelBuffer;

/// How strictly blit preconditions are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlitMode {
    /// Rectangles are trusted. A violation panics on slice indexing
    /// (debug builds catch it earlier with an assertion).
    #[default]
    Fast,
    /// Both rectangles are validated and reported as `OutOfBounds`.
    Checked,
}

impl BlitMode {
    pub fn from_safe_mode(safe_mode: bool) -> Self {
        if safe_mode {
            Self::Checked
        } else {
            Self::Fast
        }
    }

    /// Dispatch to `blit` or `blit_checked`.
    #[inline]
    pub fn blit(
        self,
        source: &PixelBuffer,
        source_origin: Point,
        target: &mut PixelBuffer,
        target_origin: Point,
        size: Dimensions,
        transparency: Option<u16>,
    ) -> Result<(), RasterError> {
        match self {
            Self::Fast => {
                blit(
                    source,
                    source_origin,
                    target,
                    target_origin,
                    size,
                    transparency,
                );
                Ok(())
            }
            Self::Checked => blit_checked(
                source,
                source_origin,
                target,
                target_origin,
                size,
                transparency,
            ),
        }
    }
}

/// Copy `size` pixels from `source` at `source_origin` into `target` at
/// `target_origin`.
///
/// With `transparency` set, source pixels equal to the key are not copied.
///
/// Both rectangles must lie inside their buffers. This is not checked outside
/// debug builds; use `blit_checked` when the caller cannot guarantee it.
pub fn blit(
    source: &PixelBuffer,
    source_origin: Point,
    target: &mut PixelBuffer,
    target_origin: Point,
    size: Dimensions,
    transparency: Option<u16>,
) {
    debug_assert!(
        source.dimensions().contains_region(source_origin, size),
        "blit source region out of bounds"
    );
    debug_assert!(
        target.dimensions().contains_region(target_origin, size),
        "blit target region out of bounds"
    );
    if size.is_empty() {
        return;
    }

    let sx = source_origin.x as usize;
    let sy = source_origin.y as usize;
    let tx = target_origin.x as usize;
    let ty = target_origin.y as usize;

    match transparency {
        None => copy_rows(source, (sx, sy), target, (tx, ty), size),
        Some(key) => {
            for row in 0..size.height {
                let src = &source.row(sy + row)[sx..sx + size.width];
                let dst = &mut target.row_mut(ty + row)[tx..tx + size.width];
                for (d, &s) in dst.iter_mut().zip(src) {
                    if s != key {
                        *d = s;
                    }
                }
            }
        }
    }
}

/// Row-by-row contiguous byte copy, `size.width * 2` bytes per row.
fn copy_rows(
    source: &PixelBuffer,
    (sx, sy): (usize, usize),
    target: &mut PixelBuffer,
    (tx, ty): (usize, usize),
    size: Dimensions,
) {
    let src_stride = source.stride();
    let dst_stride = target.stride();
    let row_bytes = size.width * 2;
    let src_bytes = source.as_bytes();
    let dst_bytes = target.as_bytes_mut();

    for row in 0..size.height {
        let src_start = (sy + row) * src_stride + sx * 2;
        let dst_start = (ty + row) * dst_stride + tx * 2;
        dst_bytes[dst_start..dst_start + row_bytes]
            .copy_from_slice(&src_bytes[src_start..src_start + row_bytes]);
    }
}

/// Bounds-checked `blit`. Nothing is written when either rectangle falls
/// outside its buffer.
pub fn blit_checked(
    source: &PixelBuffer,
    source_origin: Point,
    target: &mut PixelBuffer,
    target_origin: Point,
    size: Dimensions,
    transparency: Option<u16>,
) -> Result<(), RasterError> {
    for (buffer, origin) in [
        (source.dimensions(), source_origin),
        (target.dimensions(), target_origin),
    ] {
        if !buffer.contains_region(origin, size) {
            return Err(RasterError::OutOfBounds {
                origin,
                size,
                buffer,
            });
        }
    }
    blit(
        source,
        source_origin,
        target,
        target_origin,
        size,
        transparency,
    );
    Ok(())
}
