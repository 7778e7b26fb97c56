use chrono::Timelike;
use engine::{
    Anchor, EntityId, Layer, NodeDesc, Outline, RenderableKind, Rgba, SceneWorld, Vec2, BLACK,
    WHITE,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::interaction::{bed_response, format_clock, Interaction};
use super::items::{ItemId, WorldItem};
use super::player::ProximityEvent;
use super::text::{TextRegions, GREETING_SUFFIX};
use crate::app::services::{is_truthy, KeyValueStore, WallClock};

pub(crate) const VISIT_KEY: &str = "visit";
const AFFORDANCE_OFFSET: Vec2 = Vec2::new(0.0, -130.0);
const AFFORDANCE_SIZE: Vec2 = Vec2::new(70.0, 30.0);
const AFFORDANCE_OUTLINE: Rgba = [196, 196, 196, 255];
const AFFORDANCE_TEXT: &str = "SPACE";
const AFFORDANCE_TEXT_SIZE: f32 = 16.0;
const AFFORDANCE_PULSE_SECONDS: f32 = 0.5;

/// Receives interactions with items that are not answered in the scene itself.
pub(crate) trait ActionHandler {
    fn handle_action(&mut self, item: ItemId, world: &mut SceneWorld);

    /// True while the handler's UI owns the interact and dismiss keys.
    fn is_open(&self) -> bool {
        false
    }

    /// Closes the handler's UI. Returns false when nothing was open.
    fn dismiss(&mut self, _world: &mut SceneWorld) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FocusPhase {
    NoFocus,
    /// The head of the focus list changed this frame.
    FocusEntering,
    FocusSteady,
}

/// Owns the focus list and derives label, description and the "SPACE" prompt from it.
#[derive(Debug)]
pub(crate) struct SceneOrchestrator {
    text: TextRegions,
    player: EntityId,
    /// Most recently entered first, unique by id.
    active_items: Vec<WorldItem>,
    latest_item: Option<ItemId>,
    affordance: Option<EntityId>,
}

impl SceneOrchestrator {
    pub(crate) fn new(text: TextRegions, player: EntityId) -> Self {
        Self {
            text,
            player,
            active_items: Vec::new(),
            latest_item: None,
            affordance: None,
        }
    }

    pub(crate) fn text(&self) -> &TextRegions {
        &self.text
    }

    #[cfg(test)]
    pub(crate) fn active_items(&self) -> &[WorldItem] {
        &self.active_items
    }

    pub(crate) fn focus(&self) -> Option<&WorldItem> {
        self.active_items.first()
    }

    #[cfg(test)]
    pub(crate) fn affordance(&self) -> Option<EntityId> {
        self.affordance
    }

    pub(crate) fn show_greeting(&self, world: &mut SceneWorld, store: &mut dyn KeyValueStore) {
        let greeting = startup_greeting(store);
        self.text.set_greeting(world, &greeting);
    }

    pub(crate) fn on_proximity_event(&mut self, world: &mut SceneWorld, event: ProximityEvent) {
        match event {
            ProximityEvent::Entered(item) => self.on_item_entered(item),
            ProximityEvent::Exited(item) => self.on_item_exited(world, item),
        }
    }

    /// Moves `item` to the front of the focus list.
    pub(crate) fn on_item_entered(&mut self, item: WorldItem) {
        self.active_items
            .retain(|active| active.unique_id != item.unique_id);
        self.active_items.insert(0, item);
    }

    /// Drops every entry with the item's id; the description is cleared even if none matched.
    pub(crate) fn on_item_exited(&mut self, world: &mut SceneWorld, item: WorldItem) {
        self.active_items
            .retain(|active| active.unique_id != item.unique_id);
        self.text.set_description(world, "");
    }

    /// Resolves the focused item. Returns `None` when nothing has focus.
    pub(crate) fn on_interact_key(
        &mut self,
        world: &mut SceneWorld,
        clock: &dyn WallClock,
        handler: &mut dyn ActionHandler,
    ) -> Option<Interaction> {
        let item = *self.active_items.first()?;
        let interaction = Interaction::for_item(&item);
        info!(item = %item.unique_id, interaction = interaction.name(), "item_interaction");

        match interaction {
            Interaction::ExternalAction => {
                handler.handle_action(item.unique_id, world);
                world.set_layer_paused(Layer::Gameplay, true);
                info!(item = %item.unique_id, "gameplay_paused");
            }
            Interaction::TimeDisplay => {
                self.text.set_description(world, &format_clock(clock.now()));
            }
            Interaction::HourBands => {
                self.text
                    .set_description(world, bed_response(clock.now().hour()));
            }
            Interaction::FixedText(text) => self.text.set_description(world, text),
            Interaction::Unrecognized => {}
        }
        Some(interaction)
    }

    pub(crate) fn on_frame_update(&mut self, world: &mut SceneWorld) -> FocusPhase {
        let Some(head) = self.active_items.first().copied() else {
            self.text.set_label(world, "");
            self.text.set_description(world, "");
            self.latest_item = None;
            if let Some(affordance) = self.affordance.take() {
                if world.despawn(affordance) {
                    debug!(entity = affordance.0, "affordance_destroyed");
                }
            }
            return FocusPhase::NoFocus;
        };

        self.text.set_greeting(world, "");
        if self.latest_item == Some(head.unique_id) {
            return FocusPhase::FocusSteady;
        }

        self.text.set_label(world, head.text);
        self.text.set_description(world, "");
        self.latest_item = Some(head.unique_id);
        if !self.affordance.is_some_and(|id| world.exists(id)) {
            self.affordance = self.spawn_affordance(world);
        }
        debug!(item = %head.unique_id, "focus_changed");
        FocusPhase::FocusEntering
    }

    fn spawn_affordance(&self, world: &mut SceneWorld) -> Option<EntityId> {
        let prompt = world.spawn_child(
            self.player,
            NodeDesc::new("space_prompt")
                .at(AFFORDANCE_OFFSET)
                .with_anchor(Anchor::Center)
                .with_z(20)
                .with_renderable(RenderableKind::Rect {
                    size: AFFORDANCE_SIZE,
                    color: WHITE,
                    outline: Some(Outline {
                        width: 2,
                        color: AFFORDANCE_OUTLINE,
                    }),
                    corner_radius: 4,
                }),
        )?;
        world.spawn_child(
            prompt,
            NodeDesc::new("space_prompt_text")
                .with_anchor(Anchor::Center)
                .with_z(21)
                .with_renderable(RenderableKind::Text {
                    text: AFFORDANCE_TEXT.to_string(),
                    size: AFFORDANCE_TEXT_SIZE,
                    color: BLACK,
                }),
        );
        world.animate_scale(
            prompt,
            vec![Vec2::ONE, Vec2::splat(0.8), Vec2::ONE],
            AFFORDANCE_PULSE_SECONDS,
        );
        debug!(entity = prompt.0, "affordance_spawned");
        Some(prompt)
    }
}

/// Reads the visit flag, setting it on a first visit, and builds the greeting.
pub(crate) fn startup_greeting(store: &mut dyn KeyValueStore) -> String {
    let returning = match store.get(VISIT_KEY) {
        Ok(value) => value.as_ref().is_some_and(is_truthy),
        Err(error) => {
            warn!(error = %error, "visit_flag_read_failed");
            false
        }
    };

    let opening = if returning {
        "Welcome back!"
    } else {
        if let Err(error) = store.set(VISIT_KEY, Value::Bool(true)) {
            warn!(error = %error, "visit_flag_write_failed");
        }
        "Welcome to my house!"
    };
    info!(returning, "visitor_greeted");
    format!("{opening}{GREETING_SUFFIX}")
}
