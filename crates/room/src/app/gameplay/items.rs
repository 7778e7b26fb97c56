use std::collections::HashMap;
use std::fmt;

use engine::{Anchor, Area, EntityId, NodeDesc, SceneWorld, Vec2};
use tracing::debug;

use super::environment::{layout_point, spawn_under, RoomBounds};
use super::player::PLAYER_HALF_EXTENTS;
use super::sprites::SpriteName;

/// Stable identifiers of the room's interactive objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ItemId {
    Clock,
    Bed,
    Photo,
    Plant,
    Computer,
    Bookshelf,
}

impl ItemId {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            ItemId::Clock => "CLOCK",
            ItemId::Bed => "BED",
            ItemId::Photo => "PHOTO",
            ItemId::Plant => "PLANT",
            ItemId::Computer => "COMPUTER",
            ItemId::Bookshelf => "BOOKSHELF",
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WorldItem {
    pub(crate) unique_id: ItemId,
    /// Label shown while the item has focus.
    pub(crate) text: &'static str,
    /// True when interacting shows in-scene text instead of invoking the action handler.
    pub(crate) is_text: bool,
}

struct ItemSpec {
    item: WorldItem,
    sprite: SpriteName,
    /// Position as a fraction of the canvas.
    at: (f32, f32),
    zone_half_extents: Vec2,
}

const ITEM_TABLE: [ItemSpec; 6] = [
    ItemSpec {
        item: WorldItem {
            unique_id: ItemId::Photo,
            text: "Photo",
            is_text: true,
        },
        sprite: SpriteName::Photo,
        at: (0.2, 0.17),
        zone_half_extents: Vec2::new(60.0, 60.0),
    },
    ItemSpec {
        item: WorldItem {
            unique_id: ItemId::Clock,
            text: "Clock",
            is_text: true,
        },
        sprite: SpriteName::Clock,
        at: (0.5, 0.15),
        zone_half_extents: Vec2::new(60.0, 60.0),
    },
    ItemSpec {
        item: WorldItem {
            unique_id: ItemId::Bookshelf,
            text: "Bookshelf",
            is_text: false,
        },
        sprite: SpriteName::Bookshelf,
        at: (0.68, 0.24),
        zone_half_extents: Vec2::new(70.0, 70.0),
    },
    ItemSpec {
        item: WorldItem {
            unique_id: ItemId::Computer,
            text: "Computer",
            is_text: false,
        },
        sprite: SpriteName::Computer,
        at: (0.28, 0.52),
        zone_half_extents: Vec2::new(80.0, 70.0),
    },
    ItemSpec {
        item: WorldItem {
            unique_id: ItemId::Bed,
            text: "Bed",
            is_text: true,
        },
        sprite: SpriteName::Bed,
        at: (0.82, 0.55),
        zone_half_extents: Vec2::new(110.0, 80.0),
    },
    ItemSpec {
        item: WorldItem {
            unique_id: ItemId::Plant,
            text: "Plant",
            is_text: true,
        },
        sprite: SpriteName::Plant,
        at: (0.08, 0.66),
        zone_half_extents: Vec2::new(50.0, 50.0),
    },
];

/// Maps spawned item nodes back to their items.
#[derive(Debug, Default)]
pub(crate) struct ItemRegistry {
    by_entity: HashMap<EntityId, WorldItem>,
}

impl ItemRegistry {
    /// Spawns the item table, keeping every zone within reach of a player
    /// confined to `walkable`.
    pub(crate) fn spawn_all(
        world: &mut SceneWorld,
        parent: EntityId,
        canvas: Vec2,
        walkable: RoomBounds,
    ) -> Self {
        let mut registry = Self::default();
        for spec in &ITEM_TABLE {
            let position = walkable.pull_into_reach(
                layout_point(canvas, spec.at.0, spec.at.1),
                spec.zone_half_extents,
                PLAYER_HALF_EXTENTS,
            );
            let entity = spawn_under(
                world,
                parent,
                NodeDesc::new(spec.item.unique_id.as_str())
                    .at(position)
                    .with_anchor(Anchor::Center)
                    .with_renderable(spec.sprite.renderable())
                    .with_area(Area::centered(spec.zone_half_extents)),
            );
            debug!(
                item = %spec.item.unique_id,
                entity = entity.0,
                x = position.x,
                y = position.y,
                "item_spawned"
            );
            registry.by_entity.insert(entity, spec.item);
        }
        registry
    }

    pub(crate) fn item_for(&self, entity: EntityId) -> Option<WorldItem> {
        self.by_entity.get(&entity).copied()
    }

    #[cfg(test)]
    pub(crate) fn entity_for(&self, item: ItemId) -> Option<EntityId> {
        self.by_entity
            .iter()
            .find(|(_, registered)| registered.unique_id == item)
            .map(|(entity, _)| *entity)
    }

    pub(crate) fn len(&self) -> usize {
        self.by_entity.len()
    }
}
