use engine::{RenderableKind, Vec2};

/// Logical sprite names used by the room, mapped to asset keys under `assets/sprites/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum SpriteName {
    PlayerUp,
    PlayerDown,
    PlayerLeft,
    PlayerRight,
    Clock,
    Bed,
    Photo,
    Plant,
    Computer,
    Bookshelf,
    ProfilePicture,
}

impl SpriteName {
    #[cfg(test)]
    pub(crate) const ALL: [SpriteName; 11] = [
        SpriteName::PlayerUp,
        SpriteName::PlayerDown,
        SpriteName::PlayerLeft,
        SpriteName::PlayerRight,
        SpriteName::Clock,
        SpriteName::Bed,
        SpriteName::Photo,
        SpriteName::Plant,
        SpriteName::Computer,
        SpriteName::Bookshelf,
        SpriteName::ProfilePicture,
    ];

    pub(crate) const fn key(self) -> &'static str {
        match self {
            SpriteName::PlayerUp => "player/up",
            SpriteName::PlayerDown => "player/down",
            SpriteName::PlayerLeft => "player/left",
            SpriteName::PlayerRight => "player/right",
            SpriteName::Clock => "furniture/clock",
            SpriteName::Bed => "furniture/bed",
            SpriteName::Photo => "furniture/photo",
            SpriteName::Plant => "furniture/plant",
            SpriteName::Computer => "furniture/computer",
            SpriteName::Bookshelf => "furniture/bookshelf",
            SpriteName::ProfilePicture => "profile/picture",
        }
    }

    /// Footprint drawn while the PNG is missing.
    pub(crate) const fn placeholder_size(self) -> Vec2 {
        match self {
            SpriteName::PlayerUp
            | SpriteName::PlayerDown
            | SpriteName::PlayerLeft
            | SpriteName::PlayerRight => Vec2::new(48.0, 64.0),
            SpriteName::Clock => Vec2::new(48.0, 48.0),
            SpriteName::Bed => Vec2::new(160.0, 100.0),
            SpriteName::Photo => Vec2::new(56.0, 44.0),
            SpriteName::Plant => Vec2::new(44.0, 72.0),
            SpriteName::Computer => Vec2::new(120.0, 80.0),
            SpriteName::Bookshelf => Vec2::new(96.0, 120.0),
            SpriteName::ProfilePicture => Vec2::new(120.0, 120.0),
        }
    }

    pub(crate) fn renderable(self) -> RenderableKind {
        RenderableKind::Sprite {
            key: self.key().to_string(),
            placeholder_size: self.placeholder_size(),
        }
    }
}
