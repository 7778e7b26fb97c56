use crate::app::Rgba;

/// Screen-space rectangle in pixels, `right`/`bottom` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScreenRectPx {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ScreenRectPx {
    pub(crate) fn from_origin_size(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            right: left + width.max(0),
            bottom: top + height.max(0),
        }
    }

    pub(crate) fn width(&self) -> i32 {
        self.right - self.left
    }

    pub(crate) fn height(&self) -> i32 {
        self.bottom - self.top
    }

    fn inset(&self, amount: i32) -> Self {
        Self {
            left: self.left + amount,
            top: self.top + amount,
            right: self.right - amount,
            bottom: self.bottom - amount,
        }
    }
}

pub(crate) fn write_pixel_rgba_clipped(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    color: Rgba,
) {
    if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
        return;
    }
    let Some(pixel_offset) = (y as usize)
        .checked_mul(width as usize)
        .and_then(|row| row.checked_add(x as usize))
    else {
        return;
    };
    let Some(byte_offset) = pixel_offset.checked_mul(4) else {
        return;
    };
    let Some(end) = byte_offset.checked_add(4) else {
        return;
    };
    if end > frame.len() {
        return;
    }

    let dst = &mut frame[byte_offset..end];
    match color[3] {
        0 => {}
        255 => dst.copy_from_slice(&color),
        alpha => {
            let a = alpha as u16;
            let inv = 255 - a;
            for channel in 0..3 {
                dst[channel] = ((color[channel] as u16 * a + dst[channel] as u16 * inv) / 255) as u8;
            }
            dst[3] = 255;
        }
    }
}

pub(crate) fn fill_rect(frame: &mut [u8], width: u32, height: u32, rect: ScreenRectPx, color: Rgba) {
    let left = rect.left.max(0);
    let top = rect.top.max(0);
    let right = rect.right.min(width as i32);
    let bottom = rect.bottom.min(height as i32);
    for y in top..bottom {
        for x in left..right {
            write_pixel_rgba_clipped(frame, width, height, x, y, color);
        }
    }
}

/// Fills `rect` with its corners cut along a circle of `radius`.
pub(crate) fn fill_rounded_rect(
    frame: &mut [u8],
    width: u32,
    height: u32,
    rect: ScreenRectPx,
    radius: i32,
    color: Rgba,
) {
    let radius = radius.min(rect.width() / 2).min(rect.height() / 2).max(0);
    if radius == 0 {
        fill_rect(frame, width, height, rect, color);
        return;
    }
    let top = rect.top.max(0);
    let bottom = rect.bottom.min(height as i32);
    for y in top..bottom {
        let inset = corner_inset(y - rect.top, rect.height(), radius);
        let left = (rect.left + inset).max(0);
        let right = (rect.right - inset).min(width as i32);
        for x in left..right {
            write_pixel_rgba_clipped(frame, width, height, x, y, color);
        }
    }
}

pub(crate) fn stroke_rect(
    frame: &mut [u8],
    width: u32,
    height: u32,
    rect: ScreenRectPx,
    thickness: i32,
    color: Rgba,
) {
    for ring in 0..thickness.max(0) {
        let edge = rect.inset(ring);
        if edge.width() <= 0 || edge.height() <= 0 {
            return;
        }
        for x in edge.left..edge.right {
            write_pixel_rgba_clipped(frame, width, height, x, edge.top, color);
            write_pixel_rgba_clipped(frame, width, height, x, edge.bottom - 1, color);
        }
        for y in edge.top..edge.bottom {
            write_pixel_rgba_clipped(frame, width, height, edge.left, y, color);
            write_pixel_rgba_clipped(frame, width, height, edge.right - 1, y, color);
        }
    }
}

fn corner_inset(row: i32, rect_height: i32, radius: i32) -> i32 {
    let distance_from_edge = row.min(rect_height - 1 - row);
    if distance_from_edge >= radius {
        return 0;
    }
    let dy = (radius - distance_from_edge) as f32 - 0.5;
    let r = radius as f32;
    let dx = (r * r - dy * dy).max(0.0).sqrt();
    (r - dx).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(frame: &[u8], width: u32, x: usize, y: usize) -> [u8; 4] {
        let offset = (y * width as usize + x) * 4;
        [
            frame[offset],
            frame[offset + 1],
            frame[offset + 2],
            frame[offset + 3],
        ]
    }

    #[test]
    fn clipped_writes_outside_frame_are_ignored() {
        let mut frame = vec![0u8; 4 * 4 * 4];
        write_pixel_rgba_clipped(&mut frame, 4, 4, -1, 0, [255; 4]);
        write_pixel_rgba_clipped(&mut frame, 4, 4, 4, 0, [255; 4]);
        write_pixel_rgba_clipped(&mut frame, 4, 4, 0, 4, [255; 4]);
        assert!(frame.iter().all(|byte| *byte == 0));
    }

    #[test]
    fn translucent_color_blends_over_existing_pixel() {
        let mut frame = vec![0u8; 4];
        write_pixel_rgba_clipped(&mut frame, 1, 1, 0, 0, [200, 100, 0, 255]);
        write_pixel_rgba_clipped(&mut frame, 1, 1, 0, 0, [0, 0, 0, 0]);
        assert_eq!(pixel(&frame, 1, 0, 0), [200, 100, 0, 255]);

        write_pixel_rgba_clipped(&mut frame, 1, 1, 0, 0, [0, 0, 0, 255 / 2 + 1]);
        let blended = pixel(&frame, 1, 0, 0);
        assert!(blended[0] < 200 && blended[0] > 80);
    }

    #[test]
    fn stroke_draws_border_only() {
        let mut frame = vec![0u8; 5 * 5 * 4];
        stroke_rect(
            &mut frame,
            5,
            5,
            ScreenRectPx::from_origin_size(0, 0, 5, 5),
            1,
            [9, 9, 9, 255],
        );
        assert_eq!(pixel(&frame, 5, 0, 0), [9, 9, 9, 255]);
        assert_eq!(pixel(&frame, 5, 4, 4), [9, 9, 9, 255]);
        assert_eq!(pixel(&frame, 5, 2, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn rounded_rect_leaves_corners_empty() {
        let mut frame = vec![0u8; 10 * 10 * 4];
        fill_rounded_rect(
            &mut frame,
            10,
            10,
            ScreenRectPx::from_origin_size(0, 0, 10, 10),
            4,
            [1, 2, 3, 255],
        );
        assert_eq!(pixel(&frame, 10, 0, 0), [0, 0, 0, 0]);
        assert_eq!(pixel(&frame, 10, 5, 5), [1, 2, 3, 255]);
        assert_eq!(pixel(&frame, 10, 5, 0), [1, 2, 3, 255]);
    }
}
