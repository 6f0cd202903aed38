use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Frame manifest describing the named regions of a game's texture atlases.
/// Loaded from a JSON file by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameManifest {
    /// Named frame lookup: name → atlas texture + pixel rectangle.
    #[serde(default)]
    pub frames: HashMap<String, FrameDescriptor>,
}

/// Describes a single frame within a texture atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameDescriptor {
    /// Texture atlas name, as understood by the texture cache.
    pub texture: String,
    /// Left edge in pixels.
    #[serde(default)]
    pub x: i32,
    /// Top edge in pixels.
    #[serde(default)]
    pub y: i32,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl FrameManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
