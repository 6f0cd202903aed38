pub mod blit;
pub mod compositor;
pub mod pixel_buffer;
pub mod traits;
pub mod transfer;

// Re-export key types for convenient access
pub use blit::BlitMode;
pub use compositor::{Compositor, FrameData, FramePhase};
pub use pixel_buffer::PixelBuffer;
pub use traits::{DisplayDriver, PixelFormat, TextureSource};
pub use transfer::{BufferTransfer, Rotation};
