use serde::{Deserialize, Serialize};

use crate::api::types::Dimensions;
use crate::components::color::Color;
use crate::error::RasterError;
use crate::renderer::transfer::{BufferTransfer, Rotation};

/// Configuration for the compositor, provided by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Integer upscale from the internal buffer to the display (default: 1).
    pub scale: u32,
    /// Clockwise display rotation, in degrees on the wire (default: 0).
    pub rotation: Rotation,
    /// Color every frame starts from (default: black).
    pub background_color: Color,
    /// Color key for sprites (default: magenta).
    pub transparency_color: Color,
    /// Draw the frame rate in the top-left corner (default: false).
    pub show_fps: bool,
    /// Use `BlitMode::Checked` for layer compositing (default: false).
    /// The compositor clips every rectangle before blitting, so this only
    /// guards against clipping bugs. Hosts that call `blit` directly should
    /// pick their mode with `BlitMode::from_safe_mode`. Sprite and texture
    /// draws always clip and are not affected.
    pub safe_mode: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 1,
            rotation: Rotation::Deg0,
            background_color: Color::BLACK,
            transparency_color: Color::MAGENTA,
            show_fps: false,
            safe_mode: false,
        }
    }
}

impl RenderConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_transparency_color(mut self, color: Color) -> Self {
        self.transparency_color = color;
        self
    }

    pub fn with_show_fps(mut self, show_fps: bool) -> Self {
        self.show_fps = show_fps;
        self
    }

    pub fn with_safe_mode(mut self, safe_mode: bool) -> Self {
        self.safe_mode = safe_mode;
        self
    }

    pub fn validate(&self) -> Result<(), RasterError> {
        if self.scale == 0 {
            return Err(RasterError::InvalidScale(self.scale));
        }
        Ok(())
    }

    /// Size of the buffer frames are composed in for a `display` sized panel:
    /// the display divided by the scale, with axes swapped for 90°/270°.
    pub fn internal_dimensions(&self, display: Dimensions) -> Result<Dimensions, RasterError> {
        self.validate()?;
        let scale = self.scale as usize;
        let scaled = Dimensions::new(display.width / scale, display.height / scale);
        let internal = self.rotation.rotate_dimensions(scaled);
        // Rejects displays that are not a whole multiple of the scale.
        BufferTransfer::for_buffers(self.rotation, self.scale, internal, display)?;
        Ok(internal)
    }
}
