use crate::api::types::SpriteId;
use crate::components::sprite::Sprite;

/// Sprite storage with a double-buffered hand-off to the renderer.
///
/// Game logic mutates the live list during update, then calls `publish()`.
/// Rendering only ever reads the published snapshot, so update code can keep
/// spawning and destroying sprites without disturbing a frame in flight.
pub struct SpriteScene {
    live: Vec<Sprite>,
    published: Vec<Sprite>,
    next_id: u32,
}

impl SpriteScene {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Create a scene with a specific sprite capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            live: Vec::with_capacity(capacity),
            published: Vec::with_capacity(capacity),
            next_id: 1,
        }
    }

    /// Generate the next unique sprite ID.
    pub fn next_id(&mut self) -> SpriteId {
        let id = SpriteId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a sprite to the live list.
    pub fn spawn(&mut self, sprite: Sprite) {
        self.live.push(sprite);
    }

    /// Remove a sprite by ID. Returns the removed sprite if found.
    pub fn despawn(&mut self, id: SpriteId) -> Option<Sprite> {
        let idx = self.live.iter().position(|s| s.id == id)?;
        Some(self.live.remove(idx))
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.live.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.live.iter_mut().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sprite> {
        self.live.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Sprite> {
        self.live.iter_mut()
    }

    /// Drop every sprite flagged as destroyed. Returns how many went.
    pub fn sweep_destroyed(&mut self) -> usize {
        let before = self.live.len();
        self.live.retain(|s| !s.destroyed);
        before - self.live.len()
    }

    /// Copy the live, non-destroyed sprites into the render snapshot, sorted
    /// by draw order. Sprites with equal draw order keep their spawn order.
    pub fn publish(&mut self) {
        self.published.clear();
        self.published
            .extend(self.live.iter().filter(|s| !s.destroyed).cloned());
        self.published
            .sort_by(|a, b| a.draw_order.total_cmp(&b.draw_order));
    }

    /// The sprites as of the last `publish()`.
    pub fn snapshot(&self) -> &[Sprite] {
        &self.published
    }

    /// Number of live sprites.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Clear all sprites, live and published.
    pub fn clear(&mut self) {
        self.live.clear();
        self.published.clear();
    }
}

impl Default for SpriteScene {
    fn default() -> Self {
        Self::new()
    }
}
