mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;
mod tween;

pub use input::InputAction;
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{Renderer, Viewport, PLACEHOLDER_COLOR};
pub use scene::{
    Anchor, Area, EntityId, InputSnapshot, Layer, Node, NodeDesc, OverlapEvent, Outline,
    RenderableKind, Rgba, Scene, SceneCommand, SceneWorld, Vec2, WorldTransform, BLACK, WHITE,
};
