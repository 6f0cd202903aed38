//! Z-ordered layer registry.
//!
//! Negative z-indexes draw behind the sprites, positive ones in front.
//! Zero belongs to the implicit sprite layer and cannot be registered.

use std::collections::{BTreeSet, HashMap};

use crate::api::types::LayerId;
use crate::components::layer::Layer;
use crate::error::RasterError;

/// Owns the non-sprite layers and keeps them ordered by `(z_index, id)`.
///
/// The id half of the key keeps layers that share a z-index apart; they draw
/// in insertion order.
pub struct LayerRegistry {
    layers: HashMap<LayerId, (Layer, i32)>,
    order: BTreeSet<(i32, LayerId)>,
    next_id: u32,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self {
            layers: HashMap::new(),
            order: BTreeSet::new(),
            next_id: 1,
        }
    }

    /// Start tracking `layer` at `z_index`.
    pub fn add(&mut self, layer: Layer, z_index: i32) -> Result<LayerId, RasterError> {
        if z_index == 0 {
            return Err(RasterError::InvalidZIndex);
        }
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.insert(id, (layer, z_index));
        self.order.insert((z_index, id));
        log::debug!("layer {:?} added at z-index {}", id, z_index);
        Ok(id)
    }

    /// Move a tracked layer to `z_index`. The old entry is replaced, never
    /// duplicated.
    pub fn set_z_index(&mut self, id: LayerId, z_index: i32) -> Result<(), RasterError> {
        if z_index == 0 {
            return Err(RasterError::InvalidZIndex);
        }
        let (_, current) = self
            .layers
            .get_mut(&id)
            .ok_or(RasterError::UnknownLayer(id))?;
        self.order.remove(&(*current, id));
        *current = z_index;
        self.order.insert((z_index, id));
        log::debug!("layer {:?} moved to z-index {}", id, z_index);
        Ok(())
    }

    /// Stop tracking a layer and hand it back. Untracked ids are a no-op.
    pub fn remove(&mut self, id: LayerId) -> Option<Layer> {
        let (layer, z_index) = self.layers.remove(&id)?;
        self.order.remove(&(z_index, id));
        log::debug!("layer {:?} removed from z-index {}", id, z_index);
        Some(layer)
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id).map(|(layer, _)| layer)
    }

    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(&id).map(|(layer, _)| layer)
    }

    pub fn z_index(&self, id: LayerId) -> Option<i32> {
        self.layers.get(&id).map(|&(_, z)| z)
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.layers.contains_key(&id)
    }

    /// Layers behind the sprites (z < 0), back to front.
    pub fn background_ordered(&self) -> impl Iterator<Item = &Layer> {
        self.order
            .range(..(0, LayerId(0)))
            .map(move |(_, id)| &self.layers[id].0)
    }

    /// Layers in front of the sprites (z > 0), back to front.
    pub fn foreground_ordered(&self) -> impl Iterator<Item = &Layer> {
        self.order
            .range((1, LayerId(0))..)
            .map(move |(_, id)| &self.layers[id].0)
    }

    /// All `(z_index, id)` pairs in draw order.
    pub fn entries(&self) -> impl Iterator<Item = (i32, LayerId)> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
