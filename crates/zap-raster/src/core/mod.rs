pub mod layers;
pub mod scene;
pub mod time;
