//! Embedded 5x7 bitmap font for legend captions.
//!
//! Covers digits, signs, the letters used by captions, and a few punctuation
//! marks. Unknown characters render as a hollow box.

use image::{Rgb, RgbImage};

/// Glyph width in font units.
pub const GLYPH_WIDTH: u32 = 5;

/// Glyph height in font units.
pub const GLYPH_HEIGHT: u32 = 7;

/// Horizontal advance per character in font units (glyph + one column gap).
pub const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Rows of a glyph, top to bottom. Bit 4 is the leftmost column.
type Glyph = [u8; GLYPH_HEIGHT as usize];

const UNKNOWN: Glyph = [
    0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111,
];

fn glyph(c: char) -> Glyph {
    match c {
        ' ' => [0; 7],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'a' => [0b00000, 0b00000, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111],
        'b' => [0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b11110],
        'e' => [0b00000, 0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110],
        'l' => [0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'r' => [0b00000, 0b00000, 0b10110, 0b11001, 0b10000, 0b10000, 0b10000],
        'y' => [0b00000, 0b00000, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '_' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111],
        _ => UNKNOWN,
    }
}

/// Pixel width of `text` at the given scale.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let chars = text.chars().count() as u32;
    (chars * GLYPH_ADVANCE).saturating_sub(1) * scale
}

/// Draw `text` with its top-left corner at `(left, top)`.
///
/// Each font unit becomes a `scale`×`scale` block. Pixels outside the canvas
/// are dropped.
pub fn draw_text(canvas: &mut RgbImage, text: &str, left: i64, top: i64, scale: u32, color: Rgb<u8>) {
    let scale = i64::from(scale.max(1));
    let (width, height) = (i64::from(canvas.width()), i64::from(canvas.height()));

    for (i, c) in text.chars().enumerate() {
        let origin_x = left + i as i64 * i64::from(GLYPH_ADVANCE) * scale;
        if origin_x >= width {
            break;
        }
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let x0 = origin_x + i64::from(col) * scale;
                let y0 = top + row as i64 * scale;
                for y in y0..y0 + scale {
                    for x in x0..x0 + scale {
                        if (0..width).contains(&x) && (0..height).contains(&y) {
                            canvas.put_pixel(x as u32, y as u32, color);
                        }
                    }
                }
            }
        }
    }
}
