use engine::{
    Anchor, EntityId, Layer, NodeDesc, Outline, RenderableKind, Rgba, SceneWorld, Vec2, BLACK,
    WHITE,
};
use tracing::info;

use super::environment::spawn_under;
use super::items::ItemId;
use super::orchestrator::ActionHandler;
use super::sprites::SpriteName;

const BACKDROP_COLOR: Rgba = [0, 0, 0, 120];
const PANEL_SIZE: Vec2 = Vec2::new(560.0, 320.0);
const PANEL_OUTLINE: Rgba = [196, 196, 196, 255];
const HINT_COLOR: Rgba = [110, 110, 110, 255];
const DISMISS_HINT: &str = "<press enter or space to close>";

struct DialogContent {
    title: &'static str,
    body: &'static str,
    picture: Option<SpriteName>,
}

fn content_for(item: ItemId) -> DialogContent {
    match item {
        ItemId::Computer => DialogContent {
            title: "Profile",
            body: "Hi, I live here.\nI build things for the web\nand tinker with everything else.\nThanks for dropping by!",
            picture: Some(SpriteName::ProfilePicture),
        },
        ItemId::Bookshelf => DialogContent {
            title: "Projects",
            body: "Every book on this shelf\nis something I have built.\nTake one down sometime.",
            picture: None,
        },
        _ => DialogContent {
            title: item.as_str(),
            body: "Nothing here yet.",
            picture: None,
        },
    }
}

/// Modal panel opened for action items; closing it resumes gameplay.
#[derive(Debug)]
pub(crate) struct DialogShell {
    canvas: Vec2,
    backdrop: Option<EntityId>,
    open_item: Option<ItemId>,
}

impl DialogShell {
    pub(crate) fn new(canvas: Vec2) -> Self {
        Self {
            canvas,
            backdrop: None,
            open_item: None,
        }
    }

    fn spawn_panel(&self, world: &mut SceneWorld, item: ItemId) -> EntityId {
        let content = content_for(item);
        let backdrop = world.spawn(
            NodeDesc::new("dialog_backdrop")
                .on_layer(Layer::Ui)
                .with_z(50)
                .with_renderable(RenderableKind::Rect {
                    size: self.canvas,
                    color: BACKDROP_COLOR,
                    outline: None,
                    corner_radius: 0,
                }),
        );
        let panel = spawn_under(
            world,
            backdrop,
            NodeDesc::new("dialog_panel")
                .at(self.canvas * 0.5)
                .with_anchor(Anchor::Center)
                .with_z(51)
                .with_renderable(RenderableKind::Rect {
                    size: PANEL_SIZE,
                    color: WHITE,
                    outline: Some(Outline {
                        width: 2,
                        color: PANEL_OUTLINE,
                    }),
                    corner_radius: 8,
                }),
        );

        let half = PANEL_SIZE * 0.5;
        spawn_under(
            world,
            panel,
            panel_text("dialog_title", content.title, 26.0, BLACK)
                .at(Vec2::new(0.0, -half.y + 20.0))
                .with_anchor(Anchor::Top),
        );
        let body_left = match content.picture {
            Some(picture) => {
                spawn_under(
                    world,
                    panel,
                    NodeDesc::new("dialog_picture")
                        .at(Vec2::new(-half.x + 100.0, 10.0))
                        .with_anchor(Anchor::Center)
                        .with_z(52)
                        .with_renderable(picture.renderable()),
                );
                -half.x + 190.0
            }
            None => -half.x + 32.0,
        };
        spawn_under(
            world,
            panel,
            panel_text("dialog_body", content.body, 16.0, BLACK).at(Vec2::new(body_left, -half.y + 80.0)),
        );
        spawn_under(
            world,
            panel,
            panel_text("dialog_hint", DISMISS_HINT, 12.0, HINT_COLOR)
                .at(Vec2::new(0.0, half.y - 16.0))
                .with_anchor(Anchor::Bottom),
        );
        backdrop
    }
}

impl ActionHandler for DialogShell {
    fn handle_action(&mut self, item: ItemId, world: &mut SceneWorld) {
        if let Some(previous) = self.backdrop.take() {
            world.despawn(previous);
        }
        self.backdrop = Some(self.spawn_panel(world, item));
        self.open_item = Some(item);
        info!(item = %item, "dialog_opened");
    }

    fn is_open(&self) -> bool {
        self.backdrop.is_some()
    }

    fn dismiss(&mut self, world: &mut SceneWorld) -> bool {
        let Some(backdrop) = self.backdrop.take() else {
            return false;
        };
        world.despawn(backdrop);
        world.set_layer_paused(Layer::Gameplay, false);
        let item = self.open_item.take();
        info!(item = ?item, "dialog_closed");
        info!("gameplay_resumed");
        true
    }
}

fn panel_text(name: &'static str, text: &str, size: f32, color: Rgba) -> NodeDesc {
    NodeDesc::new(name).with_z(52).with_renderable(RenderableKind::Text {
        text: text.to_string(),
        size,
        color,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(world: &SceneWorld) -> Vec<String> {
        world
            .nodes()
            .iter()
            .filter_map(|node| match &node.renderable {
                RenderableKind::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn opening_spawns_a_ui_panel_with_title_and_hint() {
        let mut world = SceneWorld::default();
        let mut shell = DialogShell::new(Vec2::new(960.0, 540.0));

        shell.handle_action(ItemId::Computer, &mut world);

        assert!(shell.is_open());
        let texts = texts(&world);
        assert!(texts.iter().any(|text| text == "Profile"));
        assert!(texts.iter().any(|text| text == DISMISS_HINT));
        assert!(world.nodes().iter().all(|node| node.layer == Layer::Ui));
    }

    #[test]
    fn dismiss_removes_panel_and_resumes_gameplay() {
        let mut world = SceneWorld::default();
        let mut shell = DialogShell::new(Vec2::new(960.0, 540.0));
        shell.handle_action(ItemId::Bookshelf, &mut world);
        world.set_layer_paused(Layer::Gameplay, true);

        assert!(shell.dismiss(&mut world));

        assert!(!shell.is_open());
        assert_eq!(world.node_count(), 0);
        assert!(!world.is_layer_paused(Layer::Gameplay));
        assert!(!shell.dismiss(&mut world));
    }

    #[test]
    fn reopening_replaces_the_previous_panel() {
        let mut world = SceneWorld::default();
        let mut shell = DialogShell::new(Vec2::new(960.0, 540.0));
        shell.handle_action(ItemId::Bookshelf, &mut world);
        let first_count = world.node_count();

        shell.handle_action(ItemId::Bookshelf, &mut world);

        assert_eq!(world.node_count(), first_count);
    }
}
