//! Name-keyed texture cache.
//!
//! Textures are decoded once by a `TextureLoader` on first use and kept for
//! the life of the cache. There is no eviction.

use std::collections::{HashMap, HashSet};

use crate::error::RasterError;
use crate::renderer::pixel_buffer::PixelBuffer;
use crate::renderer::traits::TextureSource;

/// Decodes a texture by name. File formats and storage are the host's concern.
pub trait TextureLoader {
    fn load(&mut self, name: &str) -> Result<PixelBuffer, RasterError>;
}

impl<F> TextureLoader for F
where
    F: FnMut(&str) -> Result<PixelBuffer, RasterError>,
{
    fn load(&mut self, name: &str) -> Result<PixelBuffer, RasterError> {
        self(name)
    }
}

pub struct TextureCache<L: TextureLoader> {
    loader: L,
    textures: HashMap<String, PixelBuffer>,
    /// Names whose load already failed; the render path does not retry them.
    failed: HashSet<String>,
}

impl<L: TextureLoader> TextureCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            textures: HashMap::new(),
            failed: HashSet::new(),
        }
    }

    /// Return the texture, loading it on the first request.
    pub fn get(&mut self, name: &str) -> Result<&PixelBuffer, RasterError> {
        if !self.textures.contains_key(name) {
            let texture = self.loader.load(name)?;
            log::debug!("texture '{}' loaded ({})", name, texture.dimensions());
            self.failed.remove(name);
            self.textures.insert(name.to_owned(), texture);
        }
        Ok(&self.textures[name])
    }

    /// Put an already decoded texture in the cache, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, texture: PixelBuffer) {
        let name = name.into();
        self.failed.remove(&name);
        self.textures.insert(name, texture);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    /// Number of loaded textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl<L: TextureLoader> TextureSource for TextureCache<L> {
    fn texture(&mut self, name: &str) -> Option<&PixelBuffer> {
        if self.failed.contains(name) {
            return None;
        }
        if let Err(err) = self.get(name).map(|_| ()) {
            log::warn!("{}", err);
            self.failed.insert(name.to_owned());
            return None;
        }
        self.textures.get(name)
    }
}
