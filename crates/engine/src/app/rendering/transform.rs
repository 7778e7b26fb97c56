use crate::app::{Anchor, Vec2};

use super::pixel::ScreenRectPx;

/// Logical framebuffer size. Scene coordinates map 1:1 onto it, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Screen rectangle for bounds of `size` whose anchor point sits at `position`.
pub(crate) fn anchored_screen_rect(position: Vec2, size: Vec2, anchor: Anchor) -> ScreenRectPx {
    let (fx, fy) = anchor.fraction();
    let width = size.x.max(0.0).round() as i32;
    let height = size.y.max(0.0).round() as i32;
    let left = (position.x - size.x.max(0.0) * fx).round() as i32;
    let top = (position.y - size.y.max(0.0) * fy).round() as i32;
    ScreenRectPx::from_origin_size(left, top, width, height)
}
