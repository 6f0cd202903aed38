use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Pixel coordinate. Signed so that sprites and texture regions can hang
/// partially off the top/left edge before clipping.
pub type Point = glam::IVec2;

/// Size of a rectangular pixel region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered.
    pub const fn area(self) -> usize {
        self.width * self.height
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width and height exchanged (used for 90°/270° rotations).
    pub const fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Whether `origin + size` lies entirely inside `self`.
    pub fn contains_region(self, origin: Point, size: Dimensions) -> bool {
        let fits = |start: i32, len: usize, limit: usize| {
            usize::try_from(start)
                .ok()
                .and_then(|start| start.checked_add(len))
                .is_some_and(|end| end <= limit)
        };
        fits(origin.x, size.width, self.width) && fits(origin.y, size.height, self.height)
    }
}

/// Clip `[start, start + len)` to `[0, limit)`. The range is empty when
/// nothing is left. Never overflows, however far off `start` is.
pub fn clip_span(start: i32, len: usize, limit: usize) -> Range<usize> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let start = i64::from(start);
    let end = start.saturating_add(i64::try_from(len).unwrap_or(i64::MAX));
    let lo = start.clamp(0, limit);
    let hi = end.clamp(lo, limit);
    lo as usize..hi as usize
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Identifies a layer tracked by a `LayerRegistry`.
/// Ids are handed out in insertion order and double as the z-index tiebreaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u32);

/// Identifies a sprite inside a `SpriteScene`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);
