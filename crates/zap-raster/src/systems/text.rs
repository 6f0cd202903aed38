//! Tiny built-in bitmap font for diagnostics text such as the frame-rate
//! overlay. Drawn straight into a pixel buffer, no texture needed.
//!
//! Glyphs are 3x5 pixels; each row is a 3-bit mask, most significant bit on
//! the left. Only the characters the overlay needs are defined.

use crate::api::types::Point;
use crate::renderer::pixel_buffer::PixelBuffer;

pub const GLYPH_WIDTH: i32 = 3;
pub const GLYPH_HEIGHT: i32 = 5;
/// Horizontal advance per character, glyph plus one pixel of spacing.
pub const ADVANCE: i32 = GLYPH_WIDTH + 1;

/// Row masks for a character, or `None` if the font does not have it.
pub fn glyph(c: char) -> Option<[u8; 5]> {
    let rows = match c.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ' ' => [0; 5],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        _ => return None,
    };
    Some(rows)
}

/// Draw `text` with its top-left corner at `origin`. Pixels outside the
/// buffer are clipped. Unknown characters leave a gap.
///
/// Returns the x coordinate just past the last character.
pub fn draw_text(target: &mut PixelBuffer, text: &str, origin: Point, packed: u16) -> i32 {
    let mut cursor_x = origin.x;

    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (dy, mask) in rows.iter().enumerate() {
                for dx in 0..GLYPH_WIDTH {
                    if mask & (0b100 >> dx) != 0 {
                        let x = cursor_x.saturating_add(dx);
                        let y = origin.y.saturating_add(dy as i32);
                        target.set_pixel(Point::new(x, y), packed);
                    }
                }
            }
        }
        // Unknown characters still take up a cell.
        cursor_x = cursor_x.saturating_add(ADVANCE);
    }

    cursor_x
}

/// Overlay label for a frame rate, e.g. `"30 FPS"`.
pub fn fps_label(fps: f32) -> String {
    format!("{} FPS", fps.round().max(0.0) as u32)
}
