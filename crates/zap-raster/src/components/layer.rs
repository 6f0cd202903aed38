//! Independent pixel layer: an owned buffer plus the state needed to draw it
//! onto the frame (camera offset, background color, color key, rotation).
//!
//! Scrolling is toroidal and logical: `shift` only moves the camera offset,
//! and every read or write goes through the view-to-buffer mapping. Content
//! pushed off one edge reappears at the opposite edge with no seam.

use crate::api::types::{Dimensions, Point};
use crate::components::color::Color;
use crate::error::RasterError;
use crate::renderer::blit::{blit, BlitMode};
use crate::renderer::pixel_buffer::PixelBuffer;
use crate::renderer::transfer::Rotation;

/// Map a destination coordinate into the rotated layer space.
///
/// Results outside `[0, width) x [0, height)` are meant to be discarded.
pub fn rotate_coordinate(x: i32, y: i32, width: i32, height: i32, rotation: Rotation) -> Point {
    match rotation {
        Rotation::Deg0 => Point::new(x, y),
        Rotation::Deg90 => Point::new(width.saturating_sub(y), x),
        Rotation::Deg180 => Point::new(width.saturating_sub(x), height.saturating_sub(y)),
        Rotation::Deg270 => Point::new(y, width.saturating_sub(x)),
    }
}

/// `base + n`, saturated to the `i32` range.
fn offset_by(base: i32, n: usize) -> i32 {
    let n = i64::try_from(n).unwrap_or(i64::MAX);
    i64::from(base)
        .saturating_add(n)
        .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// One contiguous run of a view-space range and where it lives in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    view: usize,
    physical: usize,
    len: usize,
}

/// Split the view range `[start, start + len)` at the wrap seam.
/// `offset < size` and `start + len <= size`.
fn wrapped_spans(start: usize, len: usize, offset: usize, size: usize) -> [Option<Span>; 2] {
    if len == 0 {
        return [None, None];
    }
    let physical = (start + size - offset) % size;
    let first = len.min(size - physical);
    let head = Span {
        view: start,
        physical,
        len: first,
    };
    let tail = (first < len).then_some(Span {
        view: start + first,
        physical: 0,
        len: len - first,
    });
    [Some(head), tail]
}

/// Clip one axis of a copy. `src + [0, len)` must stay within `src_limit`, and
/// `dst + [0, len)` within `dst_limit` when given. Returns the adjusted
/// `(src, dst, len)`, or `None` when nothing is left.
fn clip_axis(
    src: i32,
    dst: i32,
    len: usize,
    src_limit: usize,
    dst_limit: Option<usize>,
) -> Option<(i32, i32, usize)> {
    let (src, dst) = (i64::from(src), i64::from(dst));
    let mut lo = (-src).max(0);
    let mut hi = (len as i64).min(src_limit as i64 - src);
    if let Some(limit) = dst_limit {
        lo = lo.max(-dst);
        hi = hi.min(limit as i64 - dst);
    }
    if lo >= hi {
        return None;
    }
    Some(((src + lo) as i32, (dst + lo) as i32, (hi - lo) as usize))
}

#[derive(Debug, Clone)]
pub struct Layer {
    buffer: PixelBuffer,
    /// Always within `[0, width) x [0, height)`.
    camera_offset: Point,
    background_color: Color,
    transparent_color: Color,
    draw_with_transparency: bool,
    rotation: Rotation,
}

impl Layer {
    /// Create a layer filled with its (black) background.
    pub fn new(dimensions: Dimensions) -> Self {
        let background_color = Color::BLACK;
        Self {
            buffer: PixelBuffer::filled(dimensions, background_color.to_rgb565()),
            camera_offset: Point::ZERO,
            background_color,
            transparent_color: Color::MAGENTA,
            draw_with_transparency: false,
            rotation: Rotation::Deg0,
        }
    }

    // -- Builder pattern --

    /// Set the background color and repaint the layer with it.
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self.clear();
        self
    }

    pub fn with_transparent_color(mut self, color: Color) -> Self {
        self.transparent_color = color;
        self
    }

    pub fn with_transparency(mut self, enabled: bool) -> Self {
        self.draw_with_transparency = enabled;
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    // -- Accessors --

    pub fn dimensions(&self) -> Dimensions {
        self.buffer.dimensions()
    }

    /// Backing store in buffer space (camera offset not applied).
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn camera_offset(&self) -> Point {
        self.camera_offset
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    /// Change the color `clear()` fills with. Unlike `with_background_color`,
    /// the current pixels are kept until the next `clear()`.
    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    pub fn transparent_color(&self) -> Color {
        self.transparent_color
    }

    pub fn set_transparent_color(&mut self, color: Color) {
        self.transparent_color = color;
    }

    pub fn draws_with_transparency(&self) -> bool {
        self.draw_with_transparency
    }

    pub fn set_draw_with_transparency(&mut self, enabled: bool) {
        self.draw_with_transparency = enabled;
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    // -- Pixel operations --

    /// Fill the whole layer with the background color.
    pub fn clear(&mut self) {
        self.buffer.fill(self.background_color.to_rgb565());
    }

    /// Buffer-space position of a view-space point, or `None` outside the layer.
    fn to_physical(&self, point: Point) -> Option<Point> {
        let dims = self.dimensions();
        if point.x < 0
            || point.y < 0
            || point.x as usize >= dims.width
            || point.y as usize >= dims.height
        {
            return None;
        }
        let (w, h) = (dims.width as i32, dims.height as i32);
        Some(Point::new(
            (point.x - self.camera_offset.x).rem_euclid(w),
            (point.y - self.camera_offset.y).rem_euclid(h),
        ))
    }

    /// Packed pixel visible at `point`, after scrolling.
    pub fn pixel(&self, point: Point) -> Option<u16> {
        self.to_physical(point).and_then(|p| self.buffer.pixel(p))
    }

    /// Fill a view-space rectangle, clipped to the layer.
    pub fn fill_rect(&mut self, origin: Point, size: Dimensions, color: Color) {
        let dims = self.dimensions();
        let Some((_, x, w)) = clip_axis(0, origin.x, size.width, size.width, Some(dims.width))
        else {
            return;
        };
        let Some((_, y, h)) = clip_axis(0, origin.y, size.height, size.height, Some(dims.height))
        else {
            return;
        };
        let packed = color.to_rgb565();
        let off = self.camera_offset;
        let y_spans = wrapped_spans(y as usize, h, off.y as usize, dims.height);
        let x_spans = wrapped_spans(x as usize, w, off.x as usize, dims.width);
        for ys in y_spans.into_iter().flatten() {
            for xs in x_spans.into_iter().flatten() {
                self.buffer.fill_rect(
                    Point::new(xs.physical as i32, ys.physical as i32),
                    Dimensions::new(xs.len, ys.len),
                    packed,
                );
            }
        }
    }

    /// Copy a `size` region of `texture` at `src_top_left` onto the layer at
    /// view position `dst_top_left`.
    ///
    /// Unless `ignore_transparency` is set, texture pixels equal to the layer's
    /// transparent color are skipped and the layer keeps what it had there.
    /// The source region is clipped to the texture; destination pixels that
    /// fall outside the layer (after rotation, if any) are dropped.
    pub fn draw_texture(
        &mut self,
        texture: &PixelBuffer,
        src_top_left: Point,
        dst_top_left: Point,
        size: Dimensions,
        ignore_transparency: bool,
    ) {
        let key = (!ignore_transparency).then(|| self.transparent_color.to_rgb565());
        let tex = texture.dimensions();
        let dims = self.dimensions();
        // Rotated draws clip the destination per pixel, after the transform.
        let clip_dst = self.rotation == Rotation::Deg0;

        let Some((sx, dx, w)) = clip_axis(
            src_top_left.x,
            dst_top_left.x,
            size.width,
            tex.width,
            clip_dst.then_some(dims.width),
        ) else {
            return;
        };
        let Some((sy, dy, h)) = clip_axis(
            src_top_left.y,
            dst_top_left.y,
            size.height,
            tex.height,
            clip_dst.then_some(dims.height),
        ) else {
            return;
        };

        let src = Point::new(sx, sy);
        let dst = Point::new(dx, dy);
        let size = Dimensions::new(w, h);
        if clip_dst {
            self.blit_unrotated(texture, src, dst, size, key);
        } else {
            self.blit_rotated(texture, src, dst, size, key);
        }
    }

    /// Region already clipped to both buffers.
    fn blit_unrotated(
        &mut self,
        texture: &PixelBuffer,
        src: Point,
        dst: Point,
        size: Dimensions,
        key: Option<u16>,
    ) {
        let dims = self.dimensions();
        let off = self.camera_offset;
        let y_spans = wrapped_spans(dst.y as usize, size.height, off.y as usize, dims.height);
        let x_spans = wrapped_spans(dst.x as usize, size.width, off.x as usize, dims.width);
        for ys in y_spans.into_iter().flatten() {
            for xs in x_spans.into_iter().flatten() {
                let from = Point::new(
                    src.x + (xs.view as i32 - dst.x),
                    src.y + (ys.view as i32 - dst.y),
                );
                blit(
                    texture,
                    from,
                    &mut self.buffer,
                    Point::new(xs.physical as i32, ys.physical as i32),
                    Dimensions::new(xs.len, ys.len),
                    key,
                );
            }
        }
    }

    /// Per-pixel draw through `rotate_coordinate`. Source region already
    /// clipped; the destination may lie anywhere.
    fn blit_rotated(
        &mut self,
        texture: &PixelBuffer,
        src: Point,
        dst: Point,
        size: Dimensions,
        key: Option<u16>,
    ) {
        let dims = self.dimensions();
        let w = i32::try_from(dims.width).unwrap_or(i32::MAX);
        let h = i32::try_from(dims.height).unwrap_or(i32::MAX);
        let (sx, sy) = (src.x as usize, src.y as usize);
        for j in 0..size.height {
            let y = offset_by(dst.y, j);
            let row = &texture.row(sy + j)[sx..sx + size.width];
            for (i, &px) in row.iter().enumerate() {
                if key == Some(px) {
                    continue;
                }
                let view = rotate_coordinate(offset_by(dst.x, i), y, w, h, self.rotation);
                if let Some(physical) = self.to_physical(view) {
                    self.buffer.set_pixel(physical, px);
                }
            }
        }
    }

    /// Scroll the layer content by `delta`, wrapping around the edges.
    /// Shifting by the full width (or height) is the identity.
    pub fn shift(&mut self, delta: Point) {
        let dims = self.dimensions();
        if dims.is_empty() {
            return;
        }
        let (w, h) = (dims.width as i32, dims.height as i32);
        self.camera_offset = Point::new(
            (self.camera_offset.x + delta.x.rem_euclid(w)) % w,
            (self.camera_offset.y + delta.y.rem_euclid(h)) % h,
        );
    }

    /// Draw the visible (scrolled) layer onto `target` at its origin, clipped
    /// to the smaller of the two. Honors the layer's transparency flag.
    pub fn composite_onto(
        &self,
        target: &mut PixelBuffer,
        mode: BlitMode,
    ) -> Result<(), RasterError> {
        let dims = self.dimensions();
        let w = dims.width.min(target.width());
        let h = dims.height.min(target.height());
        let key = self
            .draw_with_transparency
            .then(|| self.transparent_color.to_rgb565());
        let off = self.camera_offset;
        let y_spans = wrapped_spans(0, h, off.y as usize, dims.height);
        let x_spans = wrapped_spans(0, w, off.x as usize, dims.width);

        for ys in y_spans.into_iter().flatten() {
            for xs in x_spans.into_iter().flatten() {
                mode.blit(
                    &self.buffer,
                    Point::new(xs.physical as i32, ys.physical as i32),
                    target,
                    Point::new(xs.view as i32, ys.view as i32),
                    Dimensions::new(xs.len, ys.len),
                    key,
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MAGENTA: u16 = Color::MAGENTA.to_rgb565();

    fn numbered(dims: Dimensions) -> PixelBuffer {
        let pixels = (0..dims.area()).map(|i| i as u16 + 1).collect();
        PixelBuffer::from_pixels(dims, pixels).unwrap()
    }

    fn magenta_layer(dims: Dimensions) -> Layer {
        Layer::new(dims).with_background_color(Color::MAGENTA)
    }

    /// Draw all of `texture` at `dst`, key pixels included.
    fn stamp(layer: &mut Layer, texture: &PixelBuffer, dst: Point) {
        layer.draw_texture(texture, Point::ZERO, dst, texture.dimensions(), true);
    }

    /// Draw all of `texture` at `dst`, skipping key pixels.
    fn stamp_keyed(layer: &mut Layer, texture: &PixelBuffer, dst: Point) {
        layer.draw_texture(texture, Point::ZERO, dst, texture.dimensions(), false);
    }

    fn view(layer: &Layer) -> Vec<u16> {
        let dims = layer.dimensions();
        let mut out = Vec::with_capacity(dims.area());
        for y in 0..dims.height as i32 {
            for x in 0..dims.width as i32 {
                out.push(layer.pixel(Point::new(x, y)).unwrap());
            }
        }
        out
    }

    fn span(view: usize, physical: usize, len: usize) -> Span {
        Span {
            view,
            physical,
            len,
        }
    }

    #[test]
    fn opaque_texture_lands_in_destination_square() {
        let texture = numbered(Dimensions::new(16, 16));
        let mut layer = magenta_layer(Dimensions::new(32, 32));
        stamp(&mut layer, &texture, Point::new(8, 8));

        for y in 0..32 {
            for x in 0..32 {
                let got = layer.pixel(Point::new(x, y)).unwrap();
                if (8..24).contains(&x) && (8..24).contains(&y) {
                    let expected = texture.pixel(Point::new(x - 8, y - 8)).unwrap();
                    assert_eq!(got, expected, "pixel ({x}, {y})");
                } else {
                    assert_eq!(got, MAGENTA, "pixel ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn keyed_draw_keeps_prior_content() {
        let mut texture = PixelBuffer::filled(Dimensions::new(2, 2), 0x1234);
        texture.set_pixel(Point::new(1, 1), MAGENTA);
        let mut layer = Layer::new(Dimensions::new(4, 4)).with_background_color(Color::BLUE);
        stamp_keyed(&mut layer, &texture, Point::ZERO);

        assert_eq!(layer.pixel(Point::new(0, 0)), Some(0x1234));
        assert_eq!(layer.pixel(Point::new(1, 1)), Some(Color::BLUE.to_rgb565()));
    }

    #[test]
    fn ignoring_transparency_copies_key_pixels() {
        let texture = PixelBuffer::filled(Dimensions::new(2, 2), MAGENTA);
        let mut layer = Layer::new(Dimensions::new(2, 2));
        stamp(&mut layer, &texture, Point::ZERO);
        assert!(view(&layer).iter().all(|&p| p == MAGENTA));
    }

    #[test]
    fn destination_is_clipped_to_layer() {
        let texture = numbered(Dimensions::new(4, 4));
        let mut layer = magenta_layer(Dimensions::new(4, 4));
        stamp(&mut layer, &texture, Point::new(-2, 2));

        #[rustfmt::skip]
        let expected = vec![
            MAGENTA, MAGENTA, MAGENTA, MAGENTA,
            MAGENTA, MAGENTA, MAGENTA, MAGENTA,
            3,       4,       MAGENTA, MAGENTA,
            7,       8,       MAGENTA, MAGENTA,
        ];
        assert_eq!(view(&layer), expected);
    }

    #[test]
    fn source_is_clipped_to_texture() {
        let texture = numbered(Dimensions::new(3, 3));
        let mut layer = magenta_layer(Dimensions::new(4, 4));
        let size = Dimensions::new(4, 4);
        layer.draw_texture(&texture, Point::new(2, 2), Point::ZERO, size, true);
        assert_eq!(layer.pixel(Point::ZERO), Some(9));
        assert_eq!(layer.pixel(Point::new(1, 0)), Some(MAGENTA));
        assert_eq!(layer.pixel(Point::new(0, 1)), Some(MAGENTA));
    }

    #[test]
    fn far_off_destination_draws_nothing() {
        let texture = numbered(Dimensions::new(4, 1));
        let far = [
            Point::new(i32::MAX - 1, 0),
            Point::new(0, i32::MAX),
            Point::new(i32::MIN, i32::MIN),
        ];
        let rotations = [
            Rotation::Deg0,
            Rotation::Deg90,
            Rotation::Deg180,
            Rotation::Deg270,
        ];
        for rotation in rotations {
            let mut layer = magenta_layer(Dimensions::new(4, 4));
            layer.set_rotation(rotation);
            for dst in far {
                stamp(&mut layer, &texture, dst);
            }
            assert!(view(&layer).iter().all(|&p| p == MAGENTA), "{rotation}");
        }
    }

    #[test]
    fn full_period_shift_is_identity() {
        let texture = numbered(Dimensions::new(5, 3));
        let mut layer = Layer::new(Dimensions::new(5, 3));
        stamp(&mut layer, &texture, Point::ZERO);
        let before = view(&layer);

        layer.shift(Point::new(5, 0));
        assert_eq!(view(&layer), before);
        layer.shift(Point::new(0, 3));
        assert_eq!(view(&layer), before);
        layer.shift(Point::new(2, 1));
        assert_ne!(view(&layer), before);
        layer.shift(Point::new(-2, -1));
        assert_eq!(view(&layer), before);
    }

    #[test]
    fn shift_wraps_without_seam() {
        let texture = numbered(Dimensions::new(4, 1));
        let mut layer = Layer::new(Dimensions::new(4, 1));
        stamp(&mut layer, &texture, Point::ZERO);
        layer.shift(Point::new(1, 0));
        assert_eq!(view(&layer), vec![4, 1, 2, 3]);
        layer.shift(Point::new(-3, 0));
        assert_eq!(view(&layer), vec![3, 4, 1, 2]);
    }

    #[test]
    fn draw_after_shift_uses_view_coordinates() {
        let texture = numbered(Dimensions::new(2, 2));
        let mut layer = magenta_layer(Dimensions::new(4, 4));
        layer.shift(Point::new(1, 1));
        // Straddles the wrap seam in buffer space.
        stamp(&mut layer, &texture, Point::ZERO);
        assert_eq!(layer.pixel(Point::new(0, 0)), Some(1));
        assert_eq!(layer.pixel(Point::new(1, 0)), Some(2));
        assert_eq!(layer.pixel(Point::new(0, 1)), Some(3));
        assert_eq!(layer.pixel(Point::new(1, 1)), Some(4));
        assert_eq!(layer.pixel(Point::new(2, 2)), Some(MAGENTA));
    }

    #[test]
    fn rotate_coordinate_cases() {
        let rotate = |rotation| rotate_coordinate(1, 2, 8, 6, rotation);
        assert_eq!(rotate(Rotation::Deg0), Point::new(1, 2));
        assert_eq!(rotate(Rotation::Deg90), Point::new(6, 1));
        assert_eq!(rotate(Rotation::Deg180), Point::new(7, 4));
        assert_eq!(rotate(Rotation::Deg270), Point::new(2, 7));
    }

    #[test]
    fn rotate_coordinate_saturates() {
        let far = rotate_coordinate(0, i32::MIN, 8, 6, Rotation::Deg90);
        assert_eq!(far, Point::new(i32::MAX, 0));
    }

    #[test]
    fn rotated_draw_discards_out_of_range_pixels() {
        let texture = numbered(Dimensions::new(2, 1));
        let mut layer = magenta_layer(Dimensions::new(4, 4)).with_rotation(Rotation::Deg180);
        // (0,0) maps to (4,4): outside, dropped. (1,0) maps to (3,4): outside too.
        stamp(&mut layer, &texture, Point::ZERO);
        assert!(view(&layer).iter().all(|&p| p == MAGENTA));

        stamp(&mut layer, &texture, Point::new(1, 1));
        assert_eq!(layer.pixel(Point::new(3, 3)), Some(1));
        assert_eq!(layer.pixel(Point::new(2, 3)), Some(2));
    }

    #[test]
    fn rotated_draw_honors_color_key() {
        let mut texture = PixelBuffer::filled(Dimensions::new(1, 1), MAGENTA);
        let mut layer = Layer::new(Dimensions::new(4, 4)).with_rotation(Rotation::Deg90);
        let before = view(&layer);
        stamp_keyed(&mut layer, &texture, Point::new(1, 1));
        assert_eq!(view(&layer), before);

        texture.fill(0x0F0F);
        stamp_keyed(&mut layer, &texture, Point::new(1, 1));
        assert_eq!(layer.pixel(Point::new(3, 1)), Some(0x0F0F));
    }

    #[test]
    fn set_background_color_applies_on_clear() {
        let mut layer = Layer::new(Dimensions::new(2, 2));
        layer.set_background_color(Color::BLUE);
        assert_eq!(layer.background_color(), Color::BLUE);
        assert!(view(&layer).iter().all(|&p| p == 0));

        layer.clear();
        assert!(view(&layer).iter().all(|&p| p == Color::BLUE.to_rgb565()));
    }

    #[test]
    fn with_background_color_repaints() {
        let layer = Layer::new(Dimensions::new(2, 2)).with_background_color(Color::RED);
        assert!(view(&layer).iter().all(|&p| p == Color::RED.to_rgb565()));
    }

    #[test]
    fn composite_reads_scrolled_view() {
        let texture = numbered(Dimensions::new(3, 2));
        let mut layer = Layer::new(Dimensions::new(3, 2));
        stamp(&mut layer, &texture, Point::ZERO);
        layer.shift(Point::new(1, 1));

        let mut target = PixelBuffer::new(Dimensions::new(3, 2));
        layer.composite_onto(&mut target, BlitMode::Checked).unwrap();
        assert_eq!(target.pixels(), &view(&layer)[..]);
        assert_eq!(target.row(0), &[6, 4, 5]);
    }

    #[test]
    fn composite_with_transparency_skips_key() {
        let mut layer = Layer::new(Dimensions::new(2, 1))
            .with_background_color(Color::MAGENTA)
            .with_transparency(true);
        layer.fill_rect(Point::ZERO, Dimensions::new(1, 1), Color::GREEN);

        let mut target = PixelBuffer::filled(Dimensions::new(2, 1), 0x0001);
        layer.composite_onto(&mut target, BlitMode::Fast).unwrap();
        assert_eq!(target.pixels(), &[Color::GREEN.to_rgb565(), 0x0001]);
    }

    #[test]
    fn composite_clips_to_smaller_target() {
        let layer = Layer::new(Dimensions::new(8, 8)).with_background_color(Color::WHITE);
        let mut target = PixelBuffer::new(Dimensions::new(4, 2));
        layer.composite_onto(&mut target, BlitMode::Checked).unwrap();
        assert!(target.pixels().iter().all(|&p| p == 0xFFFF));
    }

    #[test]
    fn spans_split_at_seam() {
        assert_eq!(
            wrapped_spans(0, 4, 1, 4),
            [Some(span(0, 3, 1)), Some(span(1, 0, 3))]
        );
        assert_eq!(wrapped_spans(1, 2, 0, 4), [Some(span(1, 1, 2)), None]);
    }
}
