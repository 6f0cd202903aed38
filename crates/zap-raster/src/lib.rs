//! Software compositor for small RGB565 displays.
//!
//! Frames are composed at an internal resolution from z-ordered layers and a
//! sprite list, then rotated and upscaled onto the device buffer and handed
//! to a `DisplayDriver`.

pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod error;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::RenderConfig;
pub use api::types::{Dimensions, LayerId, Point, SpriteId};
pub use assets::manifest::{FrameDescriptor, FrameManifest};
pub use assets::registry::FrameRegistry;
pub use assets::texture::{TextureCache, TextureLoader};
pub use components::color::Color;
pub use components::layer::Layer;
pub use components::sprite::{Bounds, Frame, Sprite};
pub use crate::core::layers::LayerRegistry;
pub use crate::core::scene::SpriteScene;
pub use crate::core::time::FpsCounter;
pub use error::RasterError;
pub use renderer::blit::{blit, blit_checked, BlitMode};
pub use renderer::compositor::{Compositor, FrameData, FramePhase};
pub use renderer::pixel_buffer::PixelBuffer;
pub use renderer::traits::{DisplayDriver, PixelFormat, TextureSource};
pub use renderer::transfer::{BufferTransfer, Rotation};
pub use systems::text::draw_text;
