mod dialog;
mod environment;
mod interaction;
mod items;
mod orchestrator;
mod player;
mod sprites;
mod text;

use engine::{
    Anchor, EntityId, InputSnapshot, Layer, NodeDesc, RenderableKind, Scene, SceneCommand,
    SceneWorld, Vec2, BLACK,
};
use tracing::{debug, info};

pub(crate) use dialog::DialogShell;
pub(crate) use orchestrator::ActionHandler;

use environment::{build_environment, layout_point};
use items::ItemRegistry;
use orchestrator::{FocusPhase, SceneOrchestrator};
use player::PlayerController;
use text::TextRegions;

use crate::app::services::{KeyValueStore, WallClock};

const PLAYER_SPAWN: (f32, f32) = (0.5, 0.62);
const LOADING_TEXT: &str = "loading...";

/// Everything the room needs from outside the engine.
pub(crate) struct RoomSetup {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) store: Box<dyn KeyValueStore>,
    pub(crate) clock: Box<dyn WallClock>,
    pub(crate) action_handler: Box<dyn ActionHandler>,
}

struct LoadedRoom {
    player: PlayerController,
    items: ItemRegistry,
    orchestrator: SceneOrchestrator,
    loading_text: Option<EntityId>,
    last_phase: FocusPhase,
}

pub(crate) struct RoomScene {
    setup: RoomSetup,
    room: Option<LoadedRoom>,
}

impl RoomScene {
    pub(crate) fn new(setup: RoomSetup) -> Self {
        Self { setup, room: None }
    }

    fn canvas(&self) -> Vec2 {
        Vec2::new(self.setup.width as f32, self.setup.height as f32)
    }
}

pub(crate) fn build_room_scene(setup: RoomSetup) -> Box<dyn Scene> {
    Box::new(RoomScene::new(setup))
}

impl Scene for RoomScene {
    fn load(&mut self, world: &mut SceneWorld) {
        let canvas = self.canvas();
        let loading_text = world.spawn(
            NodeDesc::new("loading")
                .on_layer(Layer::Ui)
                .at(canvas * 0.5)
                .with_anchor(Anchor::Center)
                .with_z(100)
                .with_renderable(RenderableKind::Text {
                    text: LOADING_TEXT.to_string(),
                    size: 24.0,
                    color: BLACK,
                }),
        );

        let environment = build_environment(world, canvas);
        let items =
            ItemRegistry::spawn_all(world, environment.top, canvas, environment.floor_bounds);
        let player = PlayerController::spawn(
            world,
            environment.top,
            layout_point(canvas, PLAYER_SPAWN.0, PLAYER_SPAWN.1),
            environment.floor_bounds,
        );
        let text = TextRegions::spawn(world, environment.bottom, canvas.x);
        let orchestrator = SceneOrchestrator::new(text, player.id());
        orchestrator.show_greeting(world, self.setup.store.as_mut());

        info!(
            item_count = items.len(),
            node_count = world.node_count(),
            width = self.setup.width,
            height = self.setup.height,
            "room_loaded"
        );
        self.room = Some(LoadedRoom {
            player,
            items,
            orchestrator,
            loading_text: Some(loading_text),
            last_phase: FocusPhase::NoFocus,
        });
    }

    fn update(
        &mut self,
        fixed_dt_seconds: f32,
        input: &InputSnapshot,
        world: &mut SceneWorld,
    ) -> SceneCommand {
        let Some(room) = self.room.as_mut() else {
            return SceneCommand::None;
        };

        if let Some(loading_text) = room.loading_text.take() {
            world.despawn(loading_text);
            info!("room_ready");
        }

        let events = room
            .player
            .update(fixed_dt_seconds, input, world, &room.items);
        for event in events {
            room.orchestrator.on_proximity_event(world, event);
        }

        let handler = self.setup.action_handler.as_mut();
        if handler.is_open() {
            if input.dismiss_pressed() || input.interact_pressed() {
                handler.dismiss(world);
            }
        } else if input.interact_pressed() {
            room.orchestrator
                .on_interact_key(world, self.setup.clock.as_ref(), handler);
        }

        let phase = room.orchestrator.on_frame_update(world);
        if phase != room.last_phase {
            debug!(from = ?room.last_phase, to = ?phase, "focus_phase_changed");
            room.last_phase = phase;
        }

        if input.quit_requested() {
            return SceneCommand::Quit;
        }
        SceneCommand::None
    }

    fn unload(&mut self, world: &mut SceneWorld) {
        self.setup.action_handler.dismiss(world);
        self.room = None;
        info!("room_unloaded");
    }

    fn debug_title(&self, world: &SceneWorld) -> Option<String> {
        let room = self.room.as_ref()?;
        let focus = room
            .orchestrator
            .focus()
            .map(|item| item.text)
            .unwrap_or("-");
        let description = room.orchestrator.text().description(world);
        Some(format!("Room | focus: {focus} | {description}"))
    }
}
