use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::{Dimensions, Point, SpriteId};

/// A rectangular region of a named texture atlas.
///
/// Frames say where to read source pixels from, not what the pixels are.
/// They are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frame {
    texture: String,
    x: i32,
    y: i32,
    width: usize,
    height: usize,
}

impl Frame {
    pub fn new(texture: impl Into<String>, x: i32, y: i32, width: usize, height: usize) -> Self {
        Self {
            texture: texture.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// Name of the texture atlas this frame reads from.
    pub fn texture(&self) -> &str {
        &self.texture
    }

    /// Top-left corner inside the texture.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// Screen-space bounding box of a drawn sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub origin: Point,
    pub size: Dimensions,
}

/// A movable, frame-animated image.
///
/// The compositor only reads sprites. Creating, destroying and ordering them
/// is up to the scene that owns them.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub id: SpriteId,
    /// Top-left position in pixels. Fractional parts are dropped when drawn.
    pub position: Vec2,
    /// Pixels per second, applied by `step`.
    pub velocity: Vec2,
    /// Current frame. Sprites without one draw nothing.
    pub frame: Option<Frame>,
    /// Lower values are drawn first.
    pub draw_order: f32,
    /// Destroyed sprites are skipped and swept by the scene.
    pub destroyed: bool,
}

impl Sprite {
    pub fn new(id: SpriteId) -> Self {
        Self {
            id,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            frame: None,
            draw_order: 0.0,
            destroyed: false,
        }
    }

    // -- Builder pattern --

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = Some(frame);
        self
    }

    pub fn with_draw_order(mut self, draw_order: f32) -> Self {
        self.draw_order = draw_order;
        self
    }

    /// Integrate velocity over `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    /// Whole-pixel position the sprite is drawn at.
    pub fn pixel_position(&self) -> Point {
        self.position.floor().as_ivec2()
    }

    /// Screen bounds, `None` when the sprite has no frame.
    pub fn bounds(&self) -> Option<Bounds> {
        self.frame.as_ref().map(|frame| Bounds {
            origin: self.pixel_position(),
            size: frame.size(),
        })
    }

    /// Whether the compositor has anything to draw for this sprite.
    pub fn is_visible(&self) -> bool {
        !self.destroyed && self.frame.is_some()
    }
}
