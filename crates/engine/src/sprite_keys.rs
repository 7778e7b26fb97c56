use std::path::{Path, PathBuf};

use thiserror::Error;

pub const SPRITES_DIR: &str = "sprites";
pub const SPRITE_EXTENSION: &str = "png";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpriteKeyError {
    #[error("sprite key must not be empty")]
    Empty,
    #[error("sprite key must not start or end with '/'")]
    DanglingSlash,
    #[error("sprite key must not contain '..'")]
    ParentTraversal,
    #[error("sprite key contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

/// Keys are lowercase relative paths like `furniture/bed`, resolved under `<assets>/sprites/`.
pub fn sprite_image_path(asset_root: &Path, key: &str) -> Result<PathBuf, SpriteKeyError> {
    validate_sprite_key(key)?;
    let mut path = asset_root.join(SPRITES_DIR);
    for segment in key.split('/') {
        path.push(segment);
    }
    path.set_extension(SPRITE_EXTENSION);
    Ok(path)
}

fn validate_sprite_key(key: &str) -> Result<(), SpriteKeyError> {
    if key.is_empty() {
        return Err(SpriteKeyError::Empty);
    }
    if key.starts_with('/') || key.ends_with('/') {
        return Err(SpriteKeyError::DanglingSlash);
    }
    if key.contains("..") {
        return Err(SpriteKeyError::ParentTraversal);
    }
    if let Some(character) = key
        .chars()
        .find(|ch| !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '/' | '-')))
    {
        return Err(SpriteKeyError::InvalidCharacter { character });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn furniture_keys_resolve_under_sprites_dir() {
        let path = sprite_image_path(Path::new("assets"), "furniture/bed").expect("valid key");
        assert_eq!(path, Path::new("assets").join("sprites").join("furniture").join("bed.png"));
    }

    #[test]
    fn rejects_keys_that_escape_or_are_malformed() {
        for key in ["", "/clock", "clock/", "..", "a/../b", r"a\b", "Clock", "photo.png"] {
            assert!(sprite_image_path(Path::new("assets"), key).is_err(), "key={key}");
        }
    }

    #[test]
    fn reports_offending_character() {
        assert_eq!(
            sprite_image_path(Path::new("assets"), "bed rest"),
            Err(SpriteKeyError::InvalidCharacter { character: ' ' })
        );
    }
}
