use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageReader;
use pixels::{Error, Pixels, SurfaceTexture, TextureError};
use tracing::warn;
use winit::window::Window;

use crate::app::{Node, RenderableKind, Rgba, SceneWorld, Vec2};
use crate::sprite_keys::sprite_image_path;

use super::font::{draw_text_block, text_scale_for_size};
use super::pixel::{fill_rect, fill_rounded_rect, stroke_rect, write_pixel_rgba_clipped, ScreenRectPx};
use super::transform::anchored_screen_rect;
use super::{Viewport, PLACEHOLDER_COLOR};

struct LoadedSprite {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

/// Sprite lookup state shared across frames: decoded images plus keys already reported missing.
#[derive(Default)]
struct SpriteCache {
    asset_root: PathBuf,
    sprites: HashMap<String, Option<LoadedSprite>>,
    warned_missing_keys: HashSet<String>,
}

impl SpriteCache {
    fn new(asset_root: PathBuf) -> Self {
        Self {
            asset_root,
            ..Self::default()
        }
    }

    fn resolve(&mut self, key: &str) -> Option<&LoadedSprite> {
        if !self.sprites.contains_key(key) {
            let loaded = match resolve_sprite_image_path(&self.asset_root, key) {
                Ok(path) => match load_sprite_rgba(&path) {
                    Ok(sprite) => Some(sprite),
                    Err(reason) => {
                        warn_sprite_load_once(&mut self.warned_missing_keys, key, Some(&path), &reason);
                        None
                    }
                },
                Err(reason) => {
                    warn_sprite_load_once(&mut self.warned_missing_keys, key, None, &reason);
                    None
                }
            };
            self.sprites.insert(key.to_string(), loaded);
        }
        self.sprites.get(key).and_then(Option::as_ref)
    }
}

pub struct Renderer {
    pixels: Pixels<'static>,
    viewport: Viewport,
    background: Rgba,
    sprites: SpriteCache,
    draw_order: Vec<usize>,
}

impl Renderer {
    /// The framebuffer keeps the logical `viewport` size; the surface follows the window
    /// and the image is letterboxed into it.
    pub fn new(
        window: Arc<Window>,
        viewport: Viewport,
        background: Rgba,
        asset_root: PathBuf,
    ) -> Result<Self, Error> {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width.max(1), size.height.max(1), window);
        let pixels = Pixels::new(viewport.width, viewport.height, surface)?;
        Ok(Self {
            pixels,
            viewport,
            background,
            sprites: SpriteCache::new(asset_root),
            draw_order: Vec::new(),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), TextureError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(width, height)
    }

    pub(crate) fn render_world(&mut self, world: &SceneWorld) -> Result<(), Error> {
        draw_world(
            self.pixels.frame_mut(),
            self.viewport,
            self.background,
            world,
            &mut self.sprites,
            &mut self.draw_order,
        );
        self.pixels.render()
    }
}

fn draw_world(
    frame: &mut [u8],
    viewport: Viewport,
    background: Rgba,
    world: &SceneWorld,
    sprites: &mut SpriteCache,
    draw_order: &mut Vec<usize>,
) {
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&background);
    }
    if viewport.width == 0 || viewport.height == 0 {
        return;
    }

    collect_sorted_draw_indices(world.nodes(), draw_order);
    for index in draw_order.iter().copied() {
        let node = &world.nodes()[index];
        let Some(transform) = world.world_transform(node.id) else {
            continue;
        };
        draw_node(frame, viewport, node, transform.position, transform.scale, sprites);
    }
}

/// Back to front: layer, then z, then spawn order.
fn collect_sorted_draw_indices(nodes: &[Node], out: &mut Vec<usize>) {
    out.clear();
    out.extend(
        nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !matches!(node.renderable, RenderableKind::Empty))
            .map(|(index, _)| index),
    );
    out.sort_by_key(|index| {
        let node = &nodes[*index];
        (node.layer, node.z, node.spawn_order())
    });
}

fn draw_node(
    frame: &mut [u8],
    viewport: Viewport,
    node: &Node,
    position: Vec2,
    scale: Vec2,
    sprites: &mut SpriteCache,
) {
    let (width, height) = (viewport.width, viewport.height);
    match &node.renderable {
        RenderableKind::Empty => {}
        RenderableKind::Rect {
            size,
            color,
            outline,
            corner_radius,
        } => {
            let rect = anchored_screen_rect(position, size.component_mul(scale), node.anchor);
            let radius = (*corner_radius as f32 * scale.x.min(scale.y)).round() as i32;
            fill_rounded_rect(frame, width, height, rect, radius, *color);
            if let Some(outline) = outline {
                stroke_rect(frame, width, height, rect, outline.width as i32, outline.color);
            }
        }
        RenderableKind::Sprite {
            key,
            placeholder_size,
        } => match sprites.resolve(key) {
            Some(sprite) => {
                let native = Vec2::new(sprite.width as f32, sprite.height as f32);
                let rect = anchored_screen_rect(position, native.component_mul(scale), node.anchor);
                draw_sprite_scaled(frame, width, height, rect, sprite);
            }
            None => {
                let rect =
                    anchored_screen_rect(position, placeholder_size.component_mul(scale), node.anchor);
                fill_rect(frame, width, height, rect, PLACEHOLDER_COLOR);
            }
        },
        RenderableKind::Text { text, size, color } => {
            let text_scale = text_scale_for_size(size * scale.y);
            draw_text_block(
                frame,
                width,
                height,
                position.x.round() as i32,
                position.y.round() as i32,
                node.anchor,
                text,
                text_scale,
                *color,
            );
        }
    }
}

/// Nearest-neighbour blit of `sprite` stretched over `rect`.
fn draw_sprite_scaled(frame: &mut [u8], width: u32, height: u32, rect: ScreenRectPx, sprite: &LoadedSprite) {
    if sprite.width == 0 || sprite.height == 0 || rect.width() <= 0 || rect.height() <= 0 {
        return;
    }
    let expected_rgba_len = sprite.width as usize * sprite.height as usize * 4;
    if sprite.rgba.len() < expected_rgba_len {
        return;
    }

    let draw_left = rect.left.max(0);
    let draw_top = rect.top.max(0);
    let draw_right = rect.right.min(width as i32);
    let draw_bottom = rect.bottom.min(height as i32);
    for out_y in draw_top..draw_bottom {
        let src_y = (((out_y - rect.top) as i64 * sprite.height as i64) / rect.height() as i64)
            .min(sprite.height as i64 - 1) as usize;
        for out_x in draw_left..draw_right {
            let src_x = (((out_x - rect.left) as i64 * sprite.width as i64) / rect.width() as i64)
                .min(sprite.width as i64 - 1) as usize;
            let offset = (src_y * sprite.width as usize + src_x) * 4;
            let color = [
                sprite.rgba[offset],
                sprite.rgba[offset + 1],
                sprite.rgba[offset + 2],
                sprite.rgba[offset + 3],
            ];
            write_pixel_rgba_clipped(frame, width, height, out_x, out_y, color);
        }
    }
}

fn resolve_sprite_image_path(asset_root: &Path, key: &str) -> Result<PathBuf, String> {
    sprite_image_path(asset_root, key).map_err(|error| format!("invalid_key:{error}"))
}

fn load_sprite_rgba(path: &Path) -> Result<LoadedSprite, String> {
    let reader = ImageReader::open(path).map_err(|error| format!("file_open_failed:{error}"))?;
    let decoded = reader
        .decode()
        .map_err(|error| format!("decode_failed:{error}"))?;
    let image = decoded.to_rgba8();
    Ok(LoadedSprite {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

fn warn_sprite_load_once(
    warned_keys: &mut HashSet<String>,
    key: &str,
    resolved_path: Option<&Path>,
    reason: &str,
) {
    if !warned_keys.insert(key.to_string()) {
        return;
    }
    let path_display = resolved_path
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<unresolved>".to_string());
    warn!(
        sprite_key = key,
        path = %path_display,
        reason = reason,
        "renderer_sprite_load_failed_using_placeholder"
    );
}
