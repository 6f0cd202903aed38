//! Per-frame composition: background layers, sprites, foreground layers,
//! then rotation/upscale onto the device buffer and out to the display.

use crate::api::config::RenderConfig;
use crate::api::types::{Dimensions, Point};
use crate::components::color::Color;
use crate::components::layer::Layer;
use crate::components::sprite::Sprite;
use crate::core::layers::LayerRegistry;
use crate::core::time::FpsCounter;
use crate::error::RasterError;
use crate::renderer::blit::BlitMode;
use crate::renderer::pixel_buffer::PixelBuffer;
use crate::renderer::traits::{DisplayDriver, PixelFormat, TextureSource};
use crate::renderer::transfer::BufferTransfer;
use crate::systems::text;

/// Where the compositor is inside a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FramePhase {
    #[default]
    Idle,
    Reset,
    DrawBackground,
    DrawSprites,
    DrawForeground,
    Transfer,
}

/// Everything one frame is composed from.
pub struct FrameData<'a> {
    /// Background (z < 0) and foreground (z > 0) layers.
    pub layers: &'a LayerRegistry,
    /// Sprites in draw order, usually `SpriteScene::snapshot()`.
    pub sprites: &'a [Sprite],
    /// Seconds since the previous frame, for the FPS overlay.
    pub frame_dt: f32,
}

pub struct Compositor {
    config: RenderConfig,
    /// Mode for layer compositing. Every rectangle is clipped before the
    /// blit, so `Checked` only re-validates it.
    blit_mode: BlitMode,
    transfer_engine: BufferTransfer,
    /// Internal-resolution buffer every frame is composed into.
    working: PixelBuffer,
    /// The implicit layer at z-index 0, keyed with the transparency color.
    sprite_layer: Layer,
    /// Display-resolution buffer handed to `DisplayDriver::present`.
    device: PixelBuffer,
    fps: FpsCounter,
    phase: FramePhase,
}

impl Compositor {
    /// Set up buffers for `display` and blank it with the background color.
    ///
    /// Fails with `UnsupportedColorFormat` unless the display is RGB565, and
    /// with `IncompatibleDimensions` when the display is not a whole multiple
    /// of the scale.
    pub fn new<D>(config: RenderConfig, display: &mut D) -> Result<Self, RasterError>
    where
        D: DisplayDriver + ?Sized,
    {
        let format = display.pixel_format();
        if format != PixelFormat::Rgb565 {
            return Err(RasterError::UnsupportedColorFormat(format));
        }

        let display_dims = display.dimensions();
        let internal = config.internal_dimensions(display_dims)?;
        let transfer_engine = BufferTransfer::new(config.rotation, config.scale)?;
        let background = config.background_color.to_rgb565();
        let key = config.transparency_color;

        display.fill_region(Point::ZERO, display_dims, background);

        log::info!(
            "compositor ready: display {}, internal {}, rotation {}, scale {}, safe mode {}",
            display_dims,
            internal,
            config.rotation,
            config.scale,
            config.safe_mode
        );

        Ok(Self {
            blit_mode: BlitMode::from_safe_mode(config.safe_mode),
            transfer_engine,
            working: PixelBuffer::filled(internal, background),
            sprite_layer: Layer::new(internal)
                .with_transparent_color(key)
                .with_background_color(key)
                .with_transparency(true),
            device: PixelBuffer::filled(display_dims, background),
            fps: FpsCounter::default(),
            phase: FramePhase::Idle,
            config,
        })
    }

    /// Compose and present one frame.
    pub fn render_frame<T, D>(
        &mut self,
        frame: &FrameData<'_>,
        textures: &mut T,
        display: &mut D,
    ) -> Result<(), RasterError>
    where
        T: TextureSource + ?Sized,
        D: DisplayDriver + ?Sized,
    {
        self.reset();
        self.draw_background(frame.layers)?;
        self.draw_sprites(frame.sprites, textures)?;
        self.draw_foreground(frame.layers)?;

        self.fps.record(frame.frame_dt);
        if self.config.show_fps {
            self.draw_overlay();
        }

        self.transfer(display)
    }

    fn enter(&mut self, phase: FramePhase) {
        log::trace!("frame phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Fill the working buffer with the background color and clear the
    /// sprite layer.
    pub fn reset(&mut self) {
        self.enter(FramePhase::Reset);
        self.working.fill(self.config.background_color.to_rgb565());
        self.sprite_layer.clear();
    }

    /// Composite layers with a negative z-index, lowest first.
    pub fn draw_background(&mut self, layers: &LayerRegistry) -> Result<(), RasterError> {
        self.enter(FramePhase::DrawBackground);
        for layer in layers.background_ordered() {
            layer.composite_onto(&mut self.working, self.blit_mode)?;
        }
        Ok(())
    }

    /// Draw every visible sprite into the sprite layer, then composite it.
    ///
    /// Sprites without a frame are skipped. A sprite whose texture cannot be
    /// resolved is skipped with a warning; the rest of the frame still renders.
    pub fn draw_sprites<T>(
        &mut self,
        sprites: &[Sprite],
        textures: &mut T,
    ) -> Result<(), RasterError>
    where
        T: TextureSource + ?Sized,
    {
        self.enter(FramePhase::DrawSprites);
        for sprite in sprites {
            if !sprite.is_visible() {
                continue;
            }
            let Some(frame) = sprite.frame.as_ref() else {
                continue;
            };
            let Some(texture) = textures.texture(frame.texture()) else {
                log::warn!(
                    "sprite {:?}: texture '{}' unavailable, skipped",
                    sprite.id,
                    frame.texture()
                );
                continue;
            };
            self.sprite_layer.draw_texture(
                texture,
                frame.origin(),
                sprite.pixel_position(),
                frame.size(),
                false,
            );
        }
        self.sprite_layer.composite_onto(&mut self.working, self.blit_mode)
    }

    /// Composite layers with a positive z-index, lowest first. These cover
    /// the sprites.
    pub fn draw_foreground(&mut self, layers: &LayerRegistry) -> Result<(), RasterError> {
        self.enter(FramePhase::DrawForeground);
        for layer in layers.foreground_ordered() {
            layer.composite_onto(&mut self.working, self.blit_mode)?;
        }
        Ok(())
    }

    /// Frame-rate text in the top-left corner of the working buffer.
    fn draw_overlay(&mut self) {
        let label = text::fps_label(self.fps.fps());
        text::draw_text(
            &mut self.working,
            &label,
            Point::new(1, 1),
            Color::WHITE.to_rgb565(),
        );
    }

    /// Rotate and upscale the working buffer onto the device buffer and
    /// present it. The compositor is idle again afterwards.
    pub fn transfer<D>(&mut self, display: &mut D) -> Result<(), RasterError>
    where
        D: DisplayDriver + ?Sized,
    {
        self.enter(FramePhase::Transfer);
        self.transfer_engine.transfer(&self.working, &mut self.device)?;
        display.present(&self.device);
        self.enter(FramePhase::Idle);
        Ok(())
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Blit mode picked from `RenderConfig::safe_mode`.
    pub fn blit_mode(&self) -> BlitMode {
        self.blit_mode
    }

    /// Size of the working buffer (and of full-screen layers).
    pub fn internal_dimensions(&self) -> Dimensions {
        self.working.dimensions()
    }

    pub fn working_buffer(&self) -> &PixelBuffer {
        &self.working
    }

    pub fn device_buffer(&self) -> &PixelBuffer {
        &self.device
    }

    /// Frame rate measured over the last complete window.
    pub fn fps(&self) -> f32 {
        self.fps.fps()
    }
}
