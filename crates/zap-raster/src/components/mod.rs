pub mod color;
pub mod layer;
pub mod sprite;
