use engine::{EntityId, Layer, NodeDesc, Outline, RenderableKind, Rgba, SceneWorld, Vec2};
use tracing::warn;

pub(crate) const UI_BAND_HEIGHT: f32 = 140.0;
const ROOM_MARGIN: f32 = 24.0;
const WALL_DEPTH: f32 = 126.0;
const WALL_COLOR: Rgba = [236, 222, 196, 255];
const FLOOR_COLOR: Rgba = [201, 160, 118, 255];
const TRIM_COLOR: Rgba = [120, 86, 60, 255];
const UI_BAND_COLOR: Rgba = [255, 255, 255, 235];
const UI_BAND_OUTLINE: Rgba = [196, 196, 196, 255];
/// Minimum depth a body must sink into a zone to count as touching it.
const REACH_OVERLAP: f32 = 8.0;

/// Region the player's center is kept inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RoomBounds {
    pub(crate) min: Vec2,
    pub(crate) max: Vec2,
}

impl RoomBounds {
    pub(crate) fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.min.x, self.max.x.max(self.min.x)),
            point.y.clamp(self.min.y, self.max.y.max(self.min.y)),
        )
    }

    /// Moves a zone center just far enough that a body of `body_half` kept
    /// inside these bounds can still overlap a zone of `zone_half`.
    pub(crate) fn pull_into_reach(&self, center: Vec2, zone_half: Vec2, body_half: Vec2) -> Vec2 {
        let reach_x = (zone_half.x + body_half.x - REACH_OVERLAP).max(0.0);
        let reach_y = (zone_half.y + body_half.y - REACH_OVERLAP).max(0.0);
        let max_x = self.max.x.max(self.min.x);
        let max_y = self.max.y.max(self.min.y);
        Vec2::new(
            center.x.clamp(self.min.x - reach_x, max_x + reach_x),
            center.y.clamp(self.min.y - reach_y, max_y + reach_y),
        )
    }
}

/// Anchor containers returned by the environment builder.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Environment {
    /// Gameplay objects: items and the player.
    pub(crate) top: EntityId,
    /// UI text band along the bottom edge.
    pub(crate) bottom: EntityId,
    pub(crate) floor_bounds: RoomBounds,
}

/// Maps a point given as a fraction of the canvas into pixels.
pub(crate) fn layout_point(canvas: Vec2, fraction_x: f32, fraction_y: f32) -> Vec2 {
    Vec2::new(canvas.x * fraction_x, canvas.y * fraction_y)
}

pub(crate) fn build_environment(world: &mut SceneWorld, canvas: Vec2) -> Environment {
    let room_bottom = (canvas.y - UI_BAND_HEIGHT - 8.0).max(ROOM_MARGIN);
    let room_width = (canvas.x - ROOM_MARGIN * 2.0).max(0.0);
    let wall_bottom = (ROOM_MARGIN + WALL_DEPTH).min(room_bottom);

    world.spawn(
        NodeDesc::new("wall")
            .on_layer(Layer::Background)
            .at(Vec2::splat(ROOM_MARGIN))
            .with_renderable(RenderableKind::Rect {
                size: Vec2::new(room_width, wall_bottom - ROOM_MARGIN),
                color: WALL_COLOR,
                outline: None,
                corner_radius: 0,
            }),
    );
    world.spawn(
        NodeDesc::new("floor")
            .on_layer(Layer::Background)
            .at(Vec2::new(ROOM_MARGIN, wall_bottom))
            .with_z(1)
            .with_renderable(RenderableKind::Rect {
                size: Vec2::new(room_width, room_bottom - wall_bottom),
                color: FLOOR_COLOR,
                outline: Some(Outline {
                    width: 3,
                    color: TRIM_COLOR,
                }),
                corner_radius: 0,
            }),
    );

    let top = world.spawn(NodeDesc::new("top").with_z(4));
    let bottom = world.spawn(
        NodeDesc::new("bottom")
            .on_layer(Layer::Ui)
            .at(Vec2::new(0.0, canvas.y - UI_BAND_HEIGHT)),
    );
    spawn_under(
        world,
        bottom,
        NodeDesc::new("text_band")
            .at(Vec2::new(ROOM_MARGIN, 0.0))
            .with_renderable(RenderableKind::Rect {
                size: Vec2::new(room_width, UI_BAND_HEIGHT - ROOM_MARGIN / 2.0),
                color: UI_BAND_COLOR,
                outline: Some(Outline {
                    width: 2,
                    color: UI_BAND_OUTLINE,
                }),
                corner_radius: 8,
            }),
    );

    Environment {
        top,
        bottom,
        floor_bounds: RoomBounds {
            min: Vec2::new(ROOM_MARGIN * 2.0, wall_bottom),
            max: Vec2::new(canvas.x - ROOM_MARGIN * 2.0, room_bottom - 32.0),
        },
    }
}

/// Spawns `desc` under `parent`, or at the root if the parent has already gone.
pub(crate) fn spawn_under(world: &mut SceneWorld, parent: EntityId, desc: NodeDesc) -> EntityId {
    match world.spawn_child(parent, desc.clone()) {
        Some(id) => id,
        None => {
            warn!(parent = parent.0, node = desc.debug_name, "parent_missing_spawning_at_root");
            world.spawn(desc)
        }
    }
}
