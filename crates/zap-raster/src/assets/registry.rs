use std::collections::HashMap;
use crate::assets::manifest::FrameManifest;
use crate::components::sprite::Frame;

/// Registry of named frames, built from a FrameManifest.
/// Provides convenient name-based frame lookup for game code.
pub struct FrameRegistry {
    frames: HashMap<String, Frame>,
}

impl FrameRegistry {
    pub fn new() -> Self {
        Self {
            frames: HashMap::new(),
        }
    }

    /// Build a registry from a parsed FrameManifest.
    pub fn from_manifest(manifest: &FrameManifest) -> Self {
        let mut frames = HashMap::with_capacity(manifest.frames.len());
        for (name, desc) in &manifest.frames {
            let frame = Frame::new(
                desc.texture.clone(),
                desc.x,
                desc.y,
                desc.width,
                desc.height,
            );
            frames.insert(name.clone(), frame);
        }
        Self { frames }
    }

    /// Register or replace a frame under `name`.
    pub fn insert(&mut self, name: impl Into<String>, frame: Frame) {
        self.frames.insert(name.into(), frame);
    }

    /// Look up a frame by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<&Frame> {
        self.frames.get(name)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl Default for FrameRegistry {
    fn default() -> Self {
        Self::new()
    }
}
