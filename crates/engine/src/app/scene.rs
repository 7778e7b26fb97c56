use std::collections::HashMap;
use std::ops::{Add, AddAssign, Mul, Sub};

use super::input::{ActionStates, InputAction};
use super::tween::ScaleTween;

pub type Rgba = [u8; 4];

pub const WHITE: Rgba = [255, 255, 255, 255];
pub const BLACK: Rgba = [0, 0, 0, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Quit,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    actions: ActionStates,
    interact_pressed: bool,
    dismiss_pressed: bool,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        quit_requested: bool,
        actions: ActionStates,
        interact_pressed: bool,
        dismiss_pressed: bool,
    ) -> Self {
        Self {
            quit_requested,
            actions,
            interact_pressed,
            dismiss_pressed,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    /// True only on the tick the interact key went down.
    pub fn interact_pressed(&self) -> bool {
        self.interact_pressed
    }

    pub fn dismiss_pressed(&self) -> bool {
        self.dismiss_pressed
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_interact_pressed(mut self, interact_pressed: bool) -> Self {
        self.interact_pressed = interact_pressed;
        self
    }

    pub fn with_dismiss_pressed(mut self, dismiss_pressed: bool) -> Self {
        self.dismiss_pressed = dismiss_pressed;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn splat(value: f32) -> Self {
        Self { x: value, y: value }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn lerp(self, other: Vec2, t: f32) -> Vec2 {
        Vec2 {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    pub fn component_mul(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x * other.x,
            y: self.y * other.y,
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Draw layers, back to front. Each layer has its own pause flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    Background,
    #[default]
    Gameplay,
    Ui,
}

impl Layer {
    const COUNT: usize = 3;

    const fn index(self) -> usize {
        match self {
            Layer::Background => 0,
            Layer::Gameplay => 1,
            Layer::Ui => 2,
        }
    }
}

/// Which point of a node's bounds sits on its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Anchor {
    #[default]
    TopLeft,
    Top,
    Center,
    Bottom,
}

impl Anchor {
    /// Fraction of the bounds (x, y) that lies left of / above the anchor point.
    pub fn fraction(self) -> (f32, f32) {
        match self {
            Anchor::TopLeft => (0.0, 0.0),
            Anchor::Top => (0.5, 0.0),
            Anchor::Center => (0.5, 0.5),
            Anchor::Bottom => (0.5, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outline {
    pub width: u32,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderableKind {
    /// Pure container, draws nothing.
    Empty,
    Rect {
        size: Vec2,
        color: Rgba,
        outline: Option<Outline>,
        corner_radius: u32,
    },
    /// Drawn at native size; `placeholder_size` is used while the asset is missing.
    Sprite { key: String, placeholder_size: Vec2 },
    Text { text: String, size: f32, color: Rgba },
}

/// Axis-aligned proximity area centered on the node's world position plus `offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Area {
    pub half_extents: Vec2,
    pub offset: Vec2,
}

impl Area {
    pub fn centered(half_extents: Vec2) -> Self {
        Self {
            half_extents,
            offset: Vec2::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeDesc {
    pub debug_name: &'static str,
    pub position: Vec2,
    pub anchor: Anchor,
    pub z: i32,
    pub layer: Layer,
    pub renderable: RenderableKind,
    pub area: Option<Area>,
}

impl NodeDesc {
    pub fn new(debug_name: &'static str) -> Self {
        Self {
            debug_name,
            position: Vec2::ZERO,
            anchor: Anchor::TopLeft,
            z: 0,
            layer: Layer::Gameplay,
            renderable: RenderableKind::Empty,
            area: None,
        }
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    /// Only honoured for root nodes; children always share their parent's layer.
    pub fn on_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_renderable(mut self, renderable: RenderableKind) -> Self {
        self.renderable = renderable;
        self
    }

    pub fn with_area(mut self, area: Area) -> Self {
        self.area = Some(area);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: EntityId,
    pub parent: Option<EntityId>,
    pub debug_name: &'static str,
    pub layer: Layer,
    pub local_position: Vec2,
    pub anchor: Anchor,
    pub z: i32,
    pub scale: Vec2,
    pub renderable: RenderableKind,
    pub area: Option<Area>,
    spawn_order: u64,
}

impl Node {
    pub fn spawn_order(&self) -> u64 {
        self.spawn_order
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTransform {
    pub position: Vec2,
    pub scale: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapEvent {
    Entered(EntityId),
    Exited(EntityId),
}

#[derive(Debug, Default)]
pub(crate) struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    pub(crate) fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

#[derive(Debug, Default)]
pub struct SceneWorld {
    allocator: EntityIdAllocator,
    nodes: Vec<Node>,
    next_spawn_order: u64,
    paused_layers: [bool; Layer::COUNT],
    tweens: Vec<ScaleTween>,
    overlaps_by_actor: HashMap<EntityId, Vec<EntityId>>,
    logical_size: (u32, u32),
}

impl SceneWorld {
    pub fn with_logical_size(width: u32, height: u32) -> Self {
        Self {
            logical_size: (width, height),
            ..Self::default()
        }
    }

    pub fn logical_size(&self) -> (u32, u32) {
        self.logical_size
    }

    pub fn spawn(&mut self, desc: NodeDesc) -> EntityId {
        let layer = desc.layer;
        self.spawn_internal(None, layer, desc)
    }

    /// Returns `None` when the parent no longer exists.
    pub fn spawn_child(&mut self, parent: EntityId, desc: NodeDesc) -> Option<EntityId> {
        let layer = self.find_node(parent)?.layer;
        Some(self.spawn_internal(Some(parent), layer, desc))
    }

    fn spawn_internal(&mut self, parent: Option<EntityId>, layer: Layer, desc: NodeDesc) -> EntityId {
        let id = self.allocator.allocate();
        let spawn_order = self.next_spawn_order;
        self.next_spawn_order = self.next_spawn_order.saturating_add(1);
        self.nodes.push(Node {
            id,
            parent,
            debug_name: desc.debug_name,
            layer,
            local_position: desc.position,
            anchor: desc.anchor,
            z: desc.z,
            scale: Vec2::ONE,
            renderable: desc.renderable,
            area: desc.area,
            spawn_order,
        });
        id
    }

    /// Removes the node and its whole subtree. Returns false if it was already gone.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        if !self.exists(id) {
            return false;
        }

        let mut doomed = vec![id];
        let mut cursor = 0;
        while cursor < doomed.len() {
            let current = doomed[cursor];
            doomed.extend(
                self.nodes
                    .iter()
                    .filter(|node| node.parent == Some(current))
                    .map(|node| node.id),
            );
            cursor += 1;
        }

        self.nodes.retain(|node| !doomed.contains(&node.id));
        self.tweens.retain(|tween| !doomed.contains(&tween.target));
        for removed in &doomed {
            self.overlaps_by_actor.remove(removed);
        }
        for overlapping in self.overlaps_by_actor.values_mut() {
            overlapping.retain(|other| !doomed.contains(other));
        }
        true
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.tweens.clear();
        self.overlaps_by_actor.clear();
        self.paused_layers = [false; Layer::COUNT];
        self.next_spawn_order = 0;
    }

    pub fn exists(&self, id: EntityId) -> bool {
        self.nodes.iter().any(|node| node.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn find_node(&self, id: EntityId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn find_node_mut(&mut self, id: EntityId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    pub fn is_descendant_of(&self, id: EntityId, ancestor: EntityId) -> bool {
        let mut current = self.find_node(id).and_then(|node| node.parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.find_node(parent).and_then(|node| node.parent);
        }
        false
    }

    /// Position and accumulated scale after walking the parent chain.
    pub fn world_transform(&self, id: EntityId) -> Option<WorldTransform> {
        let node = self.find_node(id)?;
        let Some(parent_id) = node.parent else {
            return Some(WorldTransform {
                position: node.local_position,
                scale: node.scale,
            });
        };
        let parent = self.world_transform(parent_id)?;
        Some(WorldTransform {
            position: parent.position + node.local_position.component_mul(parent.scale),
            scale: parent.scale.component_mul(node.scale),
        })
    }

    pub fn world_position(&self, id: EntityId) -> Option<Vec2> {
        self.world_transform(id).map(|transform| transform.position)
    }

    pub fn set_local_position(&mut self, id: EntityId, position: Vec2) -> bool {
        match self.find_node_mut(id) {
            Some(node) => {
                node.local_position = position;
                true
            }
            None => false,
        }
    }

    /// Replaces the string of a text node. Non-text nodes are left untouched.
    pub fn set_text(&mut self, id: EntityId, value: &str) -> bool {
        let Some(node) = self.find_node_mut(id) else {
            return false;
        };
        match &mut node.renderable {
            RenderableKind::Text { text, .. } => {
                if text != value {
                    text.clear();
                    text.push_str(value);
                }
                true
            }
            _ => false,
        }
    }

    pub fn text(&self, id: EntityId) -> Option<&str> {
        match &self.find_node(id)?.renderable {
            RenderableKind::Text { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn set_sprite_key(&mut self, id: EntityId, sprite_key: &str) -> bool {
        let Some(node) = self.find_node_mut(id) else {
            return false;
        };
        match &mut node.renderable {
            RenderableKind::Sprite { key, .. } => {
                if key != sprite_key {
                    *key = sprite_key.to_string();
                }
                true
            }
            _ => false,
        }
    }

    pub fn is_layer_paused(&self, layer: Layer) -> bool {
        self.paused_layers[layer.index()]
    }

    pub fn set_layer_paused(&mut self, layer: Layer, paused: bool) {
        self.paused_layers[layer.index()] = paused;
    }

    /// Starts a scale animation, replacing any animation already running on `id`.
    pub fn animate_scale(&mut self, id: EntityId, keyframes: Vec<Vec2>, duration_seconds: f32) -> bool {
        let Some(first) = keyframes.first().copied() else {
            return false;
        };
        let Some(node) = self.find_node_mut(id) else {
            return false;
        };
        node.scale = first;
        self.tweens.retain(|tween| tween.target != id);
        self.tweens
            .push(ScaleTween::new(id, keyframes, duration_seconds));
        true
    }

    pub fn is_animating(&self, id: EntityId) -> bool {
        self.tweens.iter().any(|tween| tween.target == id)
    }

    /// Advances animations on every unpaused layer.
    pub fn tick(&mut self, dt_seconds: f32) {
        let mut tweens = std::mem::take(&mut self.tweens);
        tweens.retain_mut(|tween| {
            let Some(layer) = self.find_node(tween.target).map(|node| node.layer) else {
                return false;
            };
            if self.is_layer_paused(layer) {
                return true;
            }
            let (scale, finished) = tween.advance(dt_seconds);
            if let Some(node) = self.find_node_mut(tween.target) {
                node.scale = scale;
            }
            !finished
        });
        self.tweens = tweens;
    }

    /// Recomputes which areas the actor's area overlaps and reports transitions since
    /// the previous call. Exits are reported before enters, in stable order.
    pub fn update_overlaps(&mut self, actor: EntityId) -> Vec<OverlapEvent> {
        let Some(actor_bounds) = self.area_bounds(actor) else {
            let previous = self.overlaps_by_actor.remove(&actor).unwrap_or_default();
            return previous.into_iter().map(OverlapEvent::Exited).collect();
        };

        let mut current: Vec<(u64, EntityId)> = self
            .nodes
            .iter()
            .filter(|node| node.id != actor && node.area.is_some())
            .filter(|node| !self.is_descendant_of(node.id, actor))
            .filter_map(|node| {
                let bounds = self.area_bounds(node.id)?;
                actor_bounds
                    .intersects(&bounds)
                    .then_some((node.spawn_order, node.id))
            })
            .collect();
        current.sort_by_key(|(order, _)| *order);
        let current: Vec<EntityId> = current.into_iter().map(|(_, id)| id).collect();

        let previous = self.overlaps_by_actor.remove(&actor).unwrap_or_default();
        let mut events: Vec<OverlapEvent> = previous
            .iter()
            .filter(|id| !current.contains(id))
            .map(|id| OverlapEvent::Exited(*id))
            .collect();
        events.extend(
            current
                .iter()
                .filter(|id| !previous.contains(id))
                .map(|id| OverlapEvent::Entered(*id)),
        );
        self.overlaps_by_actor.insert(actor, current);
        events
    }

    #[cfg(test)]
    pub(crate) fn overlapping(&self, actor: EntityId) -> &[EntityId] {
        self.overlaps_by_actor
            .get(&actor)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn area_bounds(&self, id: EntityId) -> Option<AreaBounds> {
        let area = self.find_node(id)?.area?;
        let center = self.world_position(id)? + area.offset;
        Some(AreaBounds {
            min: center - area.half_extents,
            max: center + area.half_extents,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct AreaBounds {
    min: Vec2,
    max: Vec2,
}

impl AreaBounds {
    fn intersects(&self, other: &AreaBounds) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

pub trait Scene {
    fn load(&mut self, world: &mut SceneWorld);
    fn update(
        &mut self,
        fixed_dt_seconds: f32,
        input: &InputSnapshot,
        world: &mut SceneWorld,
    ) -> SceneCommand;
    fn unload(&mut self, world: &mut SceneWorld);
    fn debug_title(&self, _world: &SceneWorld) -> Option<String> {
        None
    }
}

pub(crate) struct SceneHost {
    scene: Box<dyn Scene>,
    world: SceneWorld,
    is_loaded: bool,
}

impl SceneHost {
    pub(crate) fn new(scene: Box<dyn Scene>, logical_size: (u32, u32)) -> Self {
        Self {
            scene,
            world: SceneWorld::with_logical_size(logical_size.0, logical_size.1),
            is_loaded: false,
        }
    }

    pub(crate) fn load(&mut self) {
        if self.is_loaded {
            return;
        }
        self.scene.load(&mut self.world);
        self.is_loaded = true;
    }

    /// One fixed tick: scene logic first, then engine-owned animation.
    pub(crate) fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
        if !self.is_loaded {
            return SceneCommand::None;
        }
        let command = self.scene.update(fixed_dt_seconds, input, &mut self.world);
        self.world.tick(fixed_dt_seconds);
        command
    }

    pub(crate) fn world(&self) -> &SceneWorld {
        &self.world
    }

    pub(crate) fn debug_title(&self) -> Option<String> {
        self.scene.debug_title(&self.world)
    }

    pub(crate) fn shutdown(&mut self) {
        if !self.is_loaded {
            return;
        }
        self.scene.unload(&mut self.world);
        self.world.clear();
        self.is_loaded = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_desc(name: &'static str, position: Vec2) -> NodeDesc {
        NodeDesc::new(name).at(position).with_renderable(RenderableKind::Rect {
            size: Vec2::new(10.0, 10.0),
            color: WHITE,
            outline: None,
            corner_radius: 0,
        })
    }

    fn zone_desc(name: &'static str, position: Vec2, half: f32) -> NodeDesc {
        NodeDesc::new(name)
            .at(position)
            .with_area(Area::centered(Vec2::splat(half)))
    }

    #[test]
    fn allocator_never_reuses_ids() {
        let mut allocator = EntityIdAllocator::default();
        let first = allocator.allocate();
        let second = allocator.allocate();
        assert_ne!(first, second);
        assert_eq!(second.0, first.0 + 1);
    }

    #[test]
    fn despawn_removes_whole_subtree_and_is_idempotent() {
        let mut world = SceneWorld::default();
        let root = world.spawn(NodeDesc::new("root"));
        let child = world.spawn_child(root, NodeDesc::new("child")).expect("child");
        let grandchild = world
            .spawn_child(child, NodeDesc::new("grandchild"))
            .expect("grandchild");
        let sibling = world.spawn(NodeDesc::new("sibling"));

        assert!(world.despawn(child));
        assert!(!world.exists(child));
        assert!(!world.exists(grandchild));
        assert!(world.exists(root));
        assert!(world.exists(sibling));
        assert!(!world.despawn(child));
    }

    #[test]
    fn spawn_child_of_missing_parent_is_rejected() {
        let mut world = SceneWorld::default();
        assert!(world.spawn_child(EntityId(42), NodeDesc::new("orphan")).is_none());
        assert_eq!(world.node_count(), 0);
    }

    #[test]
    fn children_inherit_parent_layer() {
        let mut world = SceneWorld::default();
        let ui_root = world.spawn(NodeDesc::new("ui").on_layer(Layer::Ui));
        let child = world
            .spawn_child(ui_root, NodeDesc::new("child").on_layer(Layer::Background))
            .expect("child");
        assert_eq!(world.find_node(child).expect("child").layer, Layer::Ui);
    }

    #[test]
    fn world_transform_accumulates_position_and_scale() {
        let mut world = SceneWorld::default();
        let parent = world.spawn(NodeDesc::new("parent").at(Vec2::new(100.0, 50.0)));
        let child = world
            .spawn_child(parent, NodeDesc::new("child").at(Vec2::new(0.0, -130.0)))
            .expect("child");
        world.find_node_mut(parent).expect("parent").scale = Vec2::splat(0.5);

        let transform = world.world_transform(child).expect("transform");
        assert_eq!(transform.position, Vec2::new(100.0, -15.0));
        assert_eq!(transform.scale, Vec2::splat(0.5));
    }

    #[test]
    fn set_text_only_applies_to_text_nodes() {
        let mut world = SceneWorld::default();
        let label = world.spawn(NodeDesc::new("label").with_renderable(RenderableKind::Text {
            text: String::new(),
            size: 16.0,
            color: BLACK,
        }));
        let rect = world.spawn(rect_desc("rect", Vec2::ZERO));

        assert!(world.set_text(label, "Clock"));
        assert_eq!(world.text(label), Some("Clock"));
        assert!(!world.set_text(rect, "nope"));
        assert_eq!(world.text(rect), None);
    }

    #[test]
    fn scale_animation_runs_only_while_layer_unpaused() {
        let mut world = SceneWorld::default();
        let node = world.spawn(rect_desc("prompt", Vec2::ZERO));
        assert!(world.animate_scale(
            node,
            vec![Vec2::splat(1.0), Vec2::splat(0.8), Vec2::splat(1.0)],
            0.5
        ));

        world.set_layer_paused(Layer::Gameplay, true);
        world.tick(0.25);
        assert_eq!(world.find_node(node).expect("node").scale, Vec2::splat(1.0));
        assert!(world.is_animating(node));

        world.set_layer_paused(Layer::Gameplay, false);
        world.tick(0.25);
        let scale = world.find_node(node).expect("node").scale;
        assert!((scale.x - 0.8).abs() < 0.0001);

        world.tick(0.25);
        assert_eq!(world.find_node(node).expect("node").scale, Vec2::splat(1.0));
        assert!(!world.is_animating(node));
    }

    #[test]
    fn despawn_drops_running_animation() {
        let mut world = SceneWorld::default();
        let node = world.spawn(rect_desc("prompt", Vec2::ZERO));
        world.animate_scale(node, vec![Vec2::ONE, Vec2::splat(0.8)], 1.0);
        world.despawn(node);
        assert!(!world.is_animating(node));
        world.tick(0.1);
    }

    #[test]
    fn overlap_transitions_are_reported_once() {
        let mut world = SceneWorld::default();
        let actor = world.spawn(zone_desc("player", Vec2::new(0.0, 0.0), 10.0));
        let near = world.spawn(zone_desc("clock", Vec2::new(15.0, 0.0), 10.0));
        let far = world.spawn(zone_desc("bed", Vec2::new(100.0, 0.0), 10.0));

        assert_eq!(world.update_overlaps(actor), vec![OverlapEvent::Entered(near)]);
        assert!(world.update_overlaps(actor).is_empty());
        assert_eq!(world.overlapping(actor), &[near]);

        world.set_local_position(actor, Vec2::new(90.0, 0.0));
        assert_eq!(
            world.update_overlaps(actor),
            vec![OverlapEvent::Exited(near), OverlapEvent::Entered(far)]
        );
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let mut world = SceneWorld::default();
        let actor = world.spawn(zone_desc("player", Vec2::ZERO, 10.0));
        world.spawn(zone_desc("wall", Vec2::new(20.0, 0.0), 10.0));
        assert!(world.update_overlaps(actor).is_empty());
    }

    #[test]
    fn actor_children_are_not_overlap_candidates() {
        let mut world = SceneWorld::default();
        let actor = world.spawn(zone_desc("player", Vec2::ZERO, 10.0));
        world
            .spawn_child(actor, zone_desc("held", Vec2::ZERO, 5.0))
            .expect("child");
        assert!(world.update_overlaps(actor).is_empty());
    }

    #[test]
    fn despawned_overlap_is_forgotten_without_exit_event() {
        let mut world = SceneWorld::default();
        let actor = world.spawn(zone_desc("player", Vec2::ZERO, 10.0));
        let item = world.spawn(zone_desc("photo", Vec2::new(5.0, 0.0), 10.0));
        world.update_overlaps(actor);

        world.despawn(item);
        assert!(world.overlapping(actor).is_empty());
        assert!(world.update_overlaps(actor).is_empty());
    }

    #[test]
    fn clear_resets_pause_flags_and_nodes() {
        let mut world = SceneWorld::with_logical_size(640, 360);
        world.spawn(NodeDesc::new("root"));
        world.set_layer_paused(Layer::Gameplay, true);
        world.clear();
        assert_eq!(world.node_count(), 0);
        assert!(!world.is_layer_paused(Layer::Gameplay));
        assert_eq!(world.logical_size(), (640, 360));
    }

    struct RootOnlyScene;

    impl Scene for RootOnlyScene {
        fn load(&mut self, world: &mut SceneWorld) {
            world.spawn(NodeDesc::new("root"));
        }

        fn update(
            &mut self,
            _fixed_dt_seconds: f32,
            input: &InputSnapshot,
            _world: &mut SceneWorld,
        ) -> SceneCommand {
            if input.quit_requested() {
                SceneCommand::Quit
            } else {
                SceneCommand::None
            }
        }

        fn unload(&mut self, _world: &mut SceneWorld) {}
    }

    #[test]
    fn host_loads_once_and_clears_world_on_shutdown() {
        let mut host = SceneHost::new(Box::new(RootOnlyScene), (320, 180));
        assert_eq!(host.update(0.016, &InputSnapshot::empty()), SceneCommand::None);

        host.load();
        host.load();
        assert_eq!(host.world().node_count(), 1);
        assert_eq!(host.world().logical_size(), (320, 180));

        let quit = InputSnapshot::new(true, ActionStates::default(), false, false);
        assert_eq!(host.update(0.016, &quit), SceneCommand::Quit);

        host.shutdown();
        assert_eq!(host.world().node_count(), 0);
        host.shutdown();
    }
}
