mod font;
mod pixel;
mod renderer;
mod transform;

pub use renderer::Renderer;
pub use transform::Viewport;

pub const PLACEHOLDER_COLOR: [u8; 4] = [220, 220, 240, 255];
