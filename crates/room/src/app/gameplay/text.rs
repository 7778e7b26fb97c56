use engine::{Anchor, EntityId, NodeDesc, RenderableKind, SceneWorld, Vec2, BLACK};

use super::environment::spawn_under;

pub(crate) const GREETING_SUFFIX: &str =
    "\nPlease make yourself comfortable.\n<use arrow keys to move>";

const TEXT_INSET: f32 = 48.0;
const LABEL_SIZE: f32 = 26.0;
const BODY_SIZE: f32 = 16.0;

/// The three text nodes of the bottom band.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextRegions {
    greeting: EntityId,
    label: EntityId,
    description: EntityId,
}

impl TextRegions {
    pub(crate) fn spawn(world: &mut SceneWorld, bottom: EntityId, canvas_width: f32) -> Self {
        let greeting = spawn_under(
            world,
            bottom,
            text_desc("greeting", BODY_SIZE)
                .at(Vec2::new(canvas_width / 2.0, 24.0))
                .with_anchor(Anchor::Top),
        );
        let label = spawn_under(
            world,
            bottom,
            text_desc("label", LABEL_SIZE).at(Vec2::new(TEXT_INSET, 20.0)),
        );
        let description = spawn_under(
            world,
            bottom,
            text_desc("description", BODY_SIZE).at(Vec2::new(TEXT_INSET, 64.0)),
        );
        Self {
            greeting,
            label,
            description,
        }
    }

    pub(crate) fn set_greeting(&self, world: &mut SceneWorld, text: &str) {
        world.set_text(self.greeting, text);
    }

    pub(crate) fn set_label(&self, world: &mut SceneWorld, text: &str) {
        world.set_text(self.label, text);
    }

    pub(crate) fn set_description(&self, world: &mut SceneWorld, text: &str) {
        world.set_text(self.description, text);
    }

    #[cfg(test)]
    pub(crate) fn greeting<'w>(&self, world: &'w SceneWorld) -> &'w str {
        world.text(self.greeting).unwrap_or_default()
    }

    #[cfg(test)]
    pub(crate) fn label<'w>(&self, world: &'w SceneWorld) -> &'w str {
        world.text(self.label).unwrap_or_default()
    }

    pub(crate) fn description<'w>(&self, world: &'w SceneWorld) -> &'w str {
        world.text(self.description).unwrap_or_default()
    }
}

fn text_desc(name: &'static str, size: f32) -> NodeDesc {
    NodeDesc::new(name).with_z(1).with_renderable(RenderableKind::Text {
        text: String::new(),
        size,
        color: BLACK,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Layer;

    #[test]
    fn regions_start_empty_on_ui_layer() {
        let mut world = SceneWorld::default();
        let bottom = world.spawn(NodeDesc::new("bottom").on_layer(Layer::Ui));
        let regions = TextRegions::spawn(&mut world, bottom, 960.0);

        assert_eq!(regions.greeting(&world), "");
        assert_eq!(regions.label(&world), "");
        assert_eq!(regions.description(&world), "");
        let label = world.find_node(regions.label).expect("label");
        assert_eq!(label.layer, Layer::Ui);
    }

    #[test]
    fn setters_touch_only_their_region() {
        let mut world = SceneWorld::default();
        let bottom = world.spawn(NodeDesc::new("bottom"));
        let regions = TextRegions::spawn(&mut world, bottom, 960.0);

        regions.set_label(&mut world, "Clock");
        regions.set_description(&mut world, "02:05:09 PM");
        assert_eq!(regions.label(&world), "Clock");
        assert_eq!(regions.description(&world), "02:05:09 PM");
        assert_eq!(regions.greeting(&world), "");
    }
}
