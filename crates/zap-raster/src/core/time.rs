/// Frame-rate meter for the on-screen performance overlay.
/// Averages over windows of `window` seconds so the digits stay readable.
pub struct FpsCounter {
    /// Length of one averaging window in seconds.
    window: f32,
    /// Time accumulated in the current window.
    elapsed: f32,
    /// Frames counted in the current window.
    frames: u32,
    /// Rate measured over the last complete window.
    fps: f32,
}

impl FpsCounter {
    pub fn new(window: f32) -> Self {
        Self {
            window,
            elapsed: 0.0,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Record one rendered frame that took `frame_dt` seconds.
    pub fn record(&mut self, frame_dt: f32) {
        self.elapsed += frame_dt.max(0.0);
        self.frames += 1;
        if self.elapsed >= self.window {
            self.fps = self.frames as f32 / self.elapsed;
            self.elapsed = 0.0;
            self.frames = 0;
        }
    }

    /// Frames per second over the last complete window (0 before the first).
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(1.0)
    }
}
