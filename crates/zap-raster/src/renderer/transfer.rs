//! Buffer transfer: maps the internally rendered buffer onto the physical
//! display buffer under a fixed rotation and integer nearest-neighbor upscale.
//!
//! Every rotation goes through the same row builder. Only the first row of
//! each `scale x scale` block is computed pixel by pixel; the remaining
//! `scale - 1` rows of the block are plain copies of it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::types::Dimensions;
use crate::error::RasterError;
use crate::renderer::pixel_buffer::PixelBuffer;

/// Clockwise display rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const fn degrees(self) -> u32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Whether this rotation exchanges the x and y axes.
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }

    /// Dimensions of `dims` after rotation.
    pub const fn rotate_dimensions(self, dims: Dimensions) -> Dimensions {
        if self.swaps_axes() {
            dims.swapped()
        } else {
            dims
        }
    }

    /// For the pixel at column `tc`, row `tr` of the rotated (unscaled) image,
    /// return the `(x, y)` it comes from in a `source` sized image.
    #[inline]
    pub fn source_coordinate(self, tc: usize, tr: usize, source: Dimensions) -> (usize, usize) {
        match self {
            Self::Deg0 => (tc, tr),
            Self::Deg90 => (tr, source.height - 1 - tc),
            Self::Deg180 => (source.width - 1 - tc, source.height - 1 - tr),
            Self::Deg270 => (source.width - 1 - tr, tc),
        }
    }
}

impl TryFrom<u32> for Rotation {
    type Error = RasterError;

    fn try_from(degrees: u32) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            other => Err(RasterError::UnsupportedRotation(other)),
        }
    }
}

impl From<Rotation> for u32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Rotation and scale strategy, chosen once when the display is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferTransfer {
    rotation: Rotation,
    scale: u32,
}

impl BufferTransfer {
    pub fn new(rotation: Rotation, scale: u32) -> Result<Self, RasterError> {
        if scale == 0 {
            return Err(RasterError::InvalidScale(scale));
        }
        Ok(Self { rotation, scale })
    }

    /// Build a transfer and verify up front that `source` maps exactly onto
    /// `target`.
    pub fn for_buffers(
        rotation: Rotation,
        scale: u32,
        source: Dimensions,
        target: Dimensions,
    ) -> Result<Self, RasterError> {
        let transfer = Self::new(rotation, scale)?;
        transfer.validate(source, target)?;
        Ok(transfer)
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Target size a `source` sized buffer transfers onto.
    pub fn required_target(&self, source: Dimensions) -> Dimensions {
        let rotated = self.rotation.rotate_dimensions(source);
        let scale = self.scale as usize;
        Dimensions::new(rotated.width * scale, rotated.height * scale)
    }

    pub fn validate(&self, source: Dimensions, target: Dimensions) -> Result<(), RasterError> {
        let expected = self.required_target(source);
        if expected != target {
            return Err(RasterError::IncompatibleDimensions {
                rotation: self.rotation,
                scale: self.scale,
                input: source,
                expected,
                actual: target,
            });
        }
        Ok(())
    }

    /// Copy `source` into `target`, rotating and upscaling.
    ///
    /// Dimensions are validated before the first pixel is written.
    pub fn transfer(
        &self,
        source: &PixelBuffer,
        target: &mut PixelBuffer,
    ) -> Result<(), RasterError> {
        self.validate(source.dimensions(), target.dimensions())?;
        if target.pixels().is_empty() {
            return Ok(());
        }

        if self.scale == 1 && self.rotation == Rotation::Deg0 {
            target.pixels_mut().copy_from_slice(source.pixels());
            return Ok(());
        }

        let scale = self.scale as usize;
        let src_dims = source.dimensions();
        let src = source.pixels();
        let row_len = target.width();
        let rotated_width = row_len / scale;
        let rotation = self.rotation;

        let blocks = target.pixels_mut().chunks_exact_mut(row_len * scale);
        for (tr, block) in blocks.enumerate() {
            let (first, rest) = block.split_at_mut(row_len);
            let row = (0..rotated_width).map(|tc| {
                let (sx, sy) = rotation.source_coordinate(tc, tr, src_dims);
                src[sy * src_dims.width + sx]
            });
            replicate_row(row, first, scale);
            for copy in rest.chunks_exact_mut(row_len) {
                copy.copy_from_slice(first);
            }
        }
        Ok(())
    }
}

/// Write each pixel of `row` `scale` times in a row into `out`.
#[inline]
fn replicate_row(row: impl Iterator<Item = u16>, out: &mut [u16], scale: usize) {
    if scale == 1 {
        for (dst, px) in out.iter_mut().zip(row) {
            *dst = px;
        }
        return;
    }
    for (block, px) in out.chunks_exact_mut(scale).zip(row) {
        block.fill(px);
    }
}
