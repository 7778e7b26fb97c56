use engine::{
    Anchor, Area, EntityId, InputAction, InputSnapshot, Layer, NodeDesc, OverlapEvent, SceneWorld,
    Vec2,
};
use tracing::debug;

use super::environment::{spawn_under, RoomBounds};
use super::items::{ItemRegistry, WorldItem};
use super::sprites::SpriteName;

pub(crate) const PLAYER_SPEED_PX_PER_SECOND: f32 = 300.0;
pub(crate) const PLAYER_HALF_EXTENTS: Vec2 = Vec2::new(24.0, 32.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProximityEvent {
    Entered(WorldItem),
    Exited(WorldItem),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    fn sprite(self) -> SpriteName {
        match self {
            Facing::Up => SpriteName::PlayerUp,
            Facing::Down => SpriteName::PlayerDown,
            Facing::Left => SpriteName::PlayerLeft,
            Facing::Right => SpriteName::PlayerRight,
        }
    }

    /// Horizontal movement wins on diagonals.
    fn from_direction(direction: Vec2) -> Option<Self> {
        if direction.x < 0.0 {
            Some(Facing::Left)
        } else if direction.x > 0.0 {
            Some(Facing::Right)
        } else if direction.y < 0.0 {
            Some(Facing::Up)
        } else if direction.y > 0.0 {
            Some(Facing::Down)
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub(crate) struct PlayerController {
    id: EntityId,
    bounds: RoomBounds,
    facing: Facing,
}

impl PlayerController {
    pub(crate) fn spawn(
        world: &mut SceneWorld,
        parent: EntityId,
        spawn_at: Vec2,
        bounds: RoomBounds,
    ) -> Self {
        let facing = Facing::Down;
        let id = spawn_under(
            world,
            parent,
            NodeDesc::new("player")
                .at(bounds.clamp(spawn_at))
                .with_anchor(Anchor::Center)
                .with_z(10)
                .with_renderable(facing.sprite().renderable())
                .with_area(Area::centered(PLAYER_HALF_EXTENTS)),
        );
        Self { id, bounds, facing }
    }

    pub(crate) fn id(&self) -> EntityId {
        self.id
    }

    /// Moves the avatar, then reports zone transitions for known items.
    pub(crate) fn update(
        &mut self,
        fixed_dt_seconds: f32,
        input: &InputSnapshot,
        world: &mut SceneWorld,
        items: &ItemRegistry,
    ) -> Vec<ProximityEvent> {
        if !world.is_layer_paused(Layer::Gameplay) {
            self.apply_movement(fixed_dt_seconds, input, world);
        }

        world
            .update_overlaps(self.id)
            .into_iter()
            .filter_map(|event| match event {
                OverlapEvent::Entered(entity) => items.item_for(entity).map(ProximityEvent::Entered),
                OverlapEvent::Exited(entity) => items.item_for(entity).map(ProximityEvent::Exited),
            })
            .inspect(|event| debug!(event = ?event, "proximity_event"))
            .collect()
    }

    fn apply_movement(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot, world: &mut SceneWorld) {
        let direction = movement_direction(input);
        let Some(facing) = Facing::from_direction(direction) else {
            return;
        };
        if facing != self.facing {
            self.facing = facing;
            world.set_sprite_key(self.id, facing.sprite().key());
        }

        let Some(current) = world.find_node(self.id).map(|node| node.local_position) else {
            return;
        };
        let step = direction * (PLAYER_SPEED_PX_PER_SECOND * fixed_dt_seconds);
        world.set_local_position(self.id, self.bounds.clamp(current + step));
    }
}

/// Unit-length direction from the held movement keys, or zero.
fn movement_direction(input: &InputSnapshot) -> Vec2 {
    let mut direction = Vec2::ZERO;
    if input.is_down(InputAction::MoveUp) {
        direction.y -= 1.0;
    }
    if input.is_down(InputAction::MoveDown) {
        direction.y += 1.0;
    }
    if input.is_down(InputAction::MoveLeft) {
        direction.x -= 1.0;
    }
    if input.is_down(InputAction::MoveRight) {
        direction.x += 1.0;
    }

    let length = direction.length();
    if length <= f32::EPSILON {
        return Vec2::ZERO;
    }
    direction * (1.0 / length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::gameplay::items::ItemId;
    use engine::RenderableKind;

    fn open_bounds() -> RoomBounds {
        RoomBounds {
            min: Vec2::new(0.0, 0.0),
            max: Vec2::new(1000.0, 1000.0),
        }
    }

    fn sprite_key(world: &SceneWorld, id: EntityId) -> String {
        match &world.find_node(id).expect("player").renderable {
            RenderableKind::Sprite { key, .. } => key.clone(),
            other => panic!("unexpected renderable {other:?}"),
        }
    }

    #[test]
    fn diagonal_movement_is_normalized() {
        let input = InputSnapshot::empty()
            .with_action_down(InputAction::MoveRight, true)
            .with_action_down(InputAction::MoveDown, true);
        let direction = movement_direction(&input);
        assert!((direction.length() - 1.0).abs() < 0.0001);
    }

    #[test]
    fn opposite_keys_cancel_out() {
        let input = InputSnapshot::empty()
            .with_action_down(InputAction::MoveLeft, true)
            .with_action_down(InputAction::MoveRight, true);
        assert_eq!(movement_direction(&input), Vec2::ZERO);
    }

    #[test]
    fn movement_is_clamped_to_bounds_and_turns_sprite() {
        let mut world = SceneWorld::default();
        let parent = world.spawn(NodeDesc::new("top"));
        let bounds = RoomBounds {
            min: Vec2::new(10.0, 10.0),
            max: Vec2::new(20.0, 20.0),
        };
        let mut player = PlayerController::spawn(&mut world, parent, Vec2::new(15.0, 15.0), bounds);
        let input = InputSnapshot::empty().with_action_down(InputAction::MoveLeft, true);

        player.update(1.0, &input, &mut world, &ItemRegistry::default());

        assert_eq!(world.world_position(player.id()), Some(Vec2::new(10.0, 15.0)));
        assert_eq!(sprite_key(&world, player.id()), SpriteName::PlayerLeft.key());
    }

    #[test]
    fn paused_gameplay_freezes_movement() {
        let mut world = SceneWorld::default();
        let parent = world.spawn(NodeDesc::new("top"));
        let mut player =
            PlayerController::spawn(&mut world, parent, Vec2::new(100.0, 100.0), open_bounds());
        world.set_layer_paused(Layer::Gameplay, true);
        let input = InputSnapshot::empty().with_action_down(InputAction::MoveUp, true);

        player.update(0.5, &input, &mut world, &ItemRegistry::default());

        assert_eq!(world.world_position(player.id()), Some(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn walking_into_and_out_of_a_zone_emits_events() {
        let mut world = SceneWorld::default();
        let parent = world.spawn(NodeDesc::new("top"));
        let items = ItemRegistry::spawn_all(&mut world, parent, Vec2::new(960.0, 540.0), open_bounds());
        let clock_entity = items
            .entity_for(ItemId::Clock)
            .expect("clock");
        let clock_at = world.world_position(clock_entity).expect("clock position");
        let mut player = PlayerController::spawn(
            &mut world,
            parent,
            clock_at + Vec2::new(0.0, 200.0),
            open_bounds(),
        );
        let up = InputSnapshot::empty().with_action_down(InputAction::MoveUp, true);

        let entered = player.update(0.5, &up, &mut world, &items);
        assert_eq!(entered.len(), 1);
        assert!(matches!(entered[0], ProximityEvent::Entered(item) if item.text == "Clock"));

        let down = InputSnapshot::empty().with_action_down(InputAction::MoveDown, true);
        let exited = player.update(0.5, &down, &mut world, &items);
        assert!(matches!(exited.as_slice(), [ProximityEvent::Exited(item)] if item.text == "Clock"));
    }
}
