use super::pixel::write_pixel_rgba_clipped;
use crate::app::{Anchor, Rgba};

pub(crate) const GLYPH_WIDTH: i32 = 3;
pub(crate) const GLYPH_HEIGHT: i32 = 5;
const GLYPH_SPACING: i32 = 1;
const LINE_SPACING: i32 = 2;
const FIRST_GLYPH: u32 = 0x20;
const LAST_GLYPH: u32 = 0x7e;

/// 3x5 bitmap font covering printable ASCII, one row per entry, MSB is the leftmost column.
const GLYPHS: [[u8; GLYPH_HEIGHT as usize]; (LAST_GLYPH - FIRST_GLYPH + 1) as usize] = [
    [0b000, 0b000, 0b000, 0b000, 0b000],
    [0b010, 0b010, 0b010, 0b000, 0b010],
    [0b101, 0b101, 0b000, 0b000, 0b000],
    [0b101, 0b111, 0b101, 0b111, 0b101],
    [0b111, 0b110, 0b111, 0b011, 0b111],
    [0b101, 0b001, 0b010, 0b100, 0b101],
    [0b010, 0b101, 0b010, 0b101, 0b011],
    [0b010, 0b010, 0b000, 0b000, 0b000],
    [0b001, 0b010, 0b010, 0b010, 0b001],
    [0b100, 0b010, 0b010, 0b010, 0b100],
    [0b000, 0b101, 0b010, 0b101, 0b000],
    [0b000, 0b010, 0b111, 0b010, 0b000],
    [0b000, 0b000, 0b000, 0b010, 0b100],
    [0b000, 0b000, 0b111, 0b000, 0b000],
    [0b000, 0b000, 0b000, 0b000, 0b010],
    [0b001, 0b001, 0b010, 0b100, 0b100],
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b010, 0b010, 0b010],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
    [0b000, 0b010, 0b000, 0b010, 0b000],
    [0b000, 0b010, 0b000, 0b010, 0b100],
    [0b001, 0b010, 0b100, 0b010, 0b001],
    [0b000, 0b111, 0b000, 0b111, 0b000],
    [0b100, 0b010, 0b001, 0b010, 0b100],
    [0b111, 0b001, 0b011, 0b000, 0b010],
    [0b111, 0b101, 0b111, 0b100, 0b111],
    [0b010, 0b101, 0b111, 0b101, 0b101],
    [0b110, 0b101, 0b110, 0b101, 0b110],
    [0b111, 0b100, 0b100, 0b100, 0b111],
    [0b110, 0b101, 0b101, 0b101, 0b110],
    [0b111, 0b100, 0b110, 0b100, 0b111],
    [0b111, 0b100, 0b110, 0b100, 0b100],
    [0b111, 0b100, 0b101, 0b101, 0b111],
    [0b101, 0b101, 0b111, 0b101, 0b101],
    [0b111, 0b010, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b001, 0b101, 0b111],
    [0b101, 0b101, 0b110, 0b101, 0b101],
    [0b100, 0b100, 0b100, 0b100, 0b111],
    [0b101, 0b111, 0b111, 0b101, 0b101],
    [0b101, 0b111, 0b111, 0b111, 0b101],
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b110, 0b101, 0b110, 0b100, 0b100],
    [0b111, 0b101, 0b101, 0b111, 0b001],
    [0b110, 0b101, 0b110, 0b101, 0b101],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b010, 0b010, 0b010, 0b010],
    [0b101, 0b101, 0b101, 0b101, 0b111],
    [0b101, 0b101, 0b101, 0b101, 0b010],
    [0b101, 0b101, 0b111, 0b111, 0b101],
    [0b101, 0b101, 0b010, 0b101, 0b101],
    [0b101, 0b101, 0b010, 0b010, 0b010],
    [0b111, 0b001, 0b010, 0b100, 0b111],
    [0b110, 0b100, 0b100, 0b100, 0b110],
    [0b100, 0b100, 0b010, 0b001, 0b001],
    [0b011, 0b001, 0b001, 0b001, 0b011],
    [0b010, 0b101, 0b000, 0b000, 0b000],
    [0b000, 0b000, 0b000, 0b000, 0b111],
    [0b100, 0b010, 0b000, 0b000, 0b000],
    [0b000, 0b111, 0b001, 0b111, 0b111],
    [0b100, 0b100, 0b110, 0b101, 0b110],
    [0b000, 0b111, 0b100, 0b100, 0b111],
    [0b001, 0b001, 0b111, 0b101, 0b111],
    [0b000, 0b111, 0b110, 0b100, 0b111],
    [0b011, 0b100, 0b110, 0b100, 0b100],
    [0b000, 0b111, 0b101, 0b111, 0b001],
    [0b100, 0b100, 0b110, 0b101, 0b101],
    [0b010, 0b000, 0b010, 0b010, 0b010],
    [0b001, 0b000, 0b001, 0b101, 0b010],
    [0b100, 0b101, 0b110, 0b101, 0b101],
    [0b100, 0b100, 0b100, 0b100, 0b111],
    [0b000, 0b110, 0b111, 0b101, 0b101],
    [0b000, 0b110, 0b101, 0b101, 0b101],
    [0b000, 0b111, 0b101, 0b101, 0b111],
    [0b000, 0b110, 0b101, 0b110, 0b100],
    [0b000, 0b111, 0b101, 0b111, 0b001],
    [0b000, 0b110, 0b101, 0b100, 0b100],
    [0b000, 0b111, 0b110, 0b001, 0b111],
    [0b010, 0b111, 0b010, 0b010, 0b011],
    [0b000, 0b101, 0b101, 0b101, 0b111],
    [0b000, 0b101, 0b101, 0b101, 0b010],
    [0b000, 0b101, 0b101, 0b111, 0b010],
    [0b000, 0b101, 0b010, 0b010, 0b101],
    [0b000, 0b101, 0b101, 0b111, 0b001],
    [0b000, 0b111, 0b001, 0b010, 0b111],
    [0b011, 0b010, 0b110, 0b010, 0b011],
    [0b010, 0b010, 0b010, 0b010, 0b010],
    [0b110, 0b010, 0b011, 0b010, 0b110],
    [0b000, 0b011, 0b110, 0b000, 0b000],
];

const SPACE_GLYPH: [u8; GLYPH_HEIGHT as usize] = GLYPHS[0];

pub(crate) fn glyph_for(ch: char) -> Option<[u8; GLYPH_HEIGHT as usize]> {
    let code = ch as u32;
    if (FIRST_GLYPH..=LAST_GLYPH).contains(&code) {
        Some(GLYPHS[(code - FIRST_GLYPH) as usize])
    } else {
        None
    }
}

/// Pixel scale for a requested text size, where size is the rendered cap height.
pub(crate) fn text_scale_for_size(size: f32) -> i32 {
    if !size.is_finite() {
        return 1;
    }
    ((size / GLYPH_HEIGHT as f32).round() as i32).max(1)
}

fn glyph_advance(scale: i32) -> i32 {
    (GLYPH_WIDTH + GLYPH_SPACING) * scale
}

fn line_advance(scale: i32) -> i32 {
    (GLYPH_HEIGHT + LINE_SPACING) * scale
}

fn line_width(line: &str, scale: i32) -> i32 {
    let chars = line.chars().count() as i32;
    if chars == 0 {
        return 0;
    }
    chars * glyph_advance(scale) - GLYPH_SPACING * scale
}

pub(crate) fn measure_text(text: &str, scale: i32) -> (i32, i32) {
    if text.is_empty() {
        return (0, 0);
    }
    let width = text
        .lines()
        .map(|line| line_width(line, scale))
        .max()
        .unwrap_or(0);
    let line_count = text.lines().count().max(1) as i32;
    let height = line_count * line_advance(scale) - LINE_SPACING * scale;
    (width, height)
}

/// Draws a multi-line block whose anchor point sits at `(x, y)`.
/// Lines are aligned horizontally inside the block according to the anchor.
#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_text_block(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    anchor: Anchor,
    text: &str,
    scale: i32,
    color: Rgba,
) {
    if text.is_empty() || width == 0 || height == 0 {
        return;
    }
    let (block_width, block_height) = measure_text(text, scale);
    let (fx, fy) = anchor.fraction();
    let left = x - (block_width as f32 * fx).round() as i32;
    let top = y - (block_height as f32 * fy).round() as i32;

    for (line_index, line) in text.lines().enumerate() {
        let line_left = left + ((block_width - line_width(line, scale)) as f32 * fx).round() as i32;
        let line_top = top + line_index as i32 * line_advance(scale);
        let mut pen_x = line_left;
        for ch in line.chars() {
            let glyph = glyph_for(ch).unwrap_or(SPACE_GLYPH);
            draw_glyph(frame, width, height, pen_x, line_top, glyph, scale, color);
            pen_x += glyph_advance(scale);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_glyph(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    glyph: [u8; GLYPH_HEIGHT as usize],
    scale: i32,
    color: Rgba,
) {
    for (row_index, row_bits) in glyph.iter().enumerate() {
        let glyph_y = y + row_index as i32 * scale;
        for col in 0..GLYPH_WIDTH {
            if (row_bits & (1 << (GLYPH_WIDTH - 1 - col))) == 0 {
                continue;
            }
            let glyph_x = x + col * scale;
            for sy in 0..scale {
                for sx in 0..scale {
                    write_pixel_rgba_clipped(frame, width, height, glyph_x + sx, glyph_y + sy, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_lookup_covers_ascii_printable_range() {
        for code in 32u8..=126u8 {
            let ch = char::from(code);
            assert!(glyph_for(ch).is_some(), "missing glyph for '{ch}'");
        }
        assert!(glyph_for('\u{7f}').is_none());
        assert!(glyph_for('é').is_none());
    }

    #[test]
    fn sixteen_point_text_uses_triple_scale() {
        assert_eq!(text_scale_for_size(16.0), 3);
        assert_eq!(text_scale_for_size(1.0), 1);
        assert_eq!(text_scale_for_size(f32::NAN), 1);
    }

    #[test]
    fn measure_uses_longest_line_and_line_count() {
        let (w, h) = measure_text("ab\nabcd", 1);
        assert_eq!(w, 4 * 4 - 1);
        assert_eq!(h, 2 * 7 - 2);
        assert_eq!(measure_text("", 2), (0, 0));
    }

    #[test]
    fn centered_block_straddles_anchor_point() {
        let mut frame = vec![0u8; 32 * 16 * 4];
        draw_text_block(&mut frame, 32, 16, 16, 8, Anchor::Center, "I", 1, [255; 4]);
        let lit: Vec<(usize, usize)> = frame
            .chunks_exact(4)
            .enumerate()
            .filter(|(_, px)| px[0] == 255)
            .map(|(index, _)| (index % 32, index / 32))
            .collect();
        assert!(!lit.is_empty());
        assert!(lit.iter().all(|(x, _)| (14..=16).contains(x)));
        assert!(lit.iter().all(|(_, y)| (5..=9).contains(y)));
    }

    #[test]
    fn unknown_character_draws_like_space() {
        let mut frame = vec![0u8; 16 * 16 * 4];
        draw_text_block(&mut frame, 16, 16, 0, 0, Anchor::TopLeft, "\u{1f642}", 1, [255; 4]);
        assert!(frame.iter().all(|byte| *byte == 0));
    }
}
