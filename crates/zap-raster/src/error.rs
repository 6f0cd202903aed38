use thiserror::Error;

use crate::api::types::{Dimensions, LayerId, Point};
use crate::renderer::traits::PixelFormat;
use crate::renderer::transfer::Rotation;

/// Errors raised by the compositor core.
///
/// Everything except `OutOfBounds` and `TextureLoad` is a configuration error:
/// it is raised synchronously by the call that caused it and is never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    #[error("display pixel format {0:?} is not supported, only RGB565 is")]
    UnsupportedColorFormat(PixelFormat),

    #[error("z-index 0 is reserved for the sprite layer")]
    InvalidZIndex,

    #[error("layer {0:?} is not tracked by this registry")]
    UnknownLayer(LayerId),

    #[error(
        "{rotation} transfer at scale {scale} from {input} requires a {expected} target, got {actual}"
    )]
    IncompatibleDimensions {
        rotation: Rotation,
        scale: u32,
        input: Dimensions,
        expected: Dimensions,
        actual: Dimensions,
    },

    #[error("rotation of {0} degrees is not supported (use 0, 90, 180 or 270)")]
    UnsupportedRotation(u32),

    #[error("scale factor {0} is invalid, it must be at least 1")]
    InvalidScale(u32),

    #[error("region {size} at {origin} does not fit the {buffer} buffer")]
    OutOfBounds {
        origin: Point,
        size: Dimensions,
        buffer: Dimensions,
    },

    #[error("{actual} pixels cannot fill a {dimensions} buffer")]
    BufferSize {
        dimensions: Dimensions,
        actual: usize,
    },

    #[error("failed to load texture '{name}': {reason}")]
    TextureLoad { name: String, reason: String },
}
