use engine::{resolve_app_paths, LoopConfig, Scene, StartupError, Vec2};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::gameplay::{build_room_scene, DialogShell, RoomSetup};
use super::services::{LocalStore, LocalWallClock};

const WIDTH_ENV_VAR: &str = "ROOM_WIDTH";
const HEIGHT_ENV_VAR: &str = "ROOM_HEIGHT";
const MAX_FPS_ENV_VAR: &str = "ROOM_MAX_FPS";

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) fn build_app() -> Result<AppWiring, StartupError> {
    init_tracing();
    info!("=== Room Startup ===");

    let paths = resolve_app_paths()?;
    info!(
        root = %paths.root.display(),
        assets = %paths.assets_dir.display(),
        data = %paths.data_dir.display(),
        "app_paths_resolved"
    );

    let defaults = LoopConfig::default();
    let width = env_positive_u32(WIDTH_ENV_VAR).unwrap_or(defaults.width);
    let height = env_positive_u32(HEIGHT_ENV_VAR).unwrap_or(defaults.height);
    let config = LoopConfig {
        width,
        height,
        asset_root: paths.assets_dir.clone(),
        max_render_fps: env_positive_u32(MAX_FPS_ENV_VAR).or(defaults.max_render_fps),
        ..defaults
    };

    let store = LocalStore::in_dir(&paths.data_dir);
    info!(path = %store.path().display(), "local_store_opened");
    let scene = build_room_scene(RoomSetup {
        width,
        height,
        store: Box::new(store),
        clock: Box::new(LocalWallClock),
        action_handler: Box::new(DialogShell::new(Vec2::new(width as f32, height as f32))),
    });

    Ok(AppWiring { config, scene })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn env_positive_u32(var: &'static str) -> Option<u32> {
    let raw = std::env::var(var).ok()?;
    match parse_positive_u32(&raw) {
        Some(value) => Some(value),
        None => {
            warn!(var, value = %raw, "invalid_env_override_ignored");
            None
        }
    }
}

fn parse_positive_u32(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|value| *value > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_integers_are_accepted() {
        assert_eq!(parse_positive_u32("960"), Some(960));
        assert_eq!(parse_positive_u32(" 30 "), Some(30));
    }

    #[test]
    fn zero_negative_and_garbage_are_rejected() {
        for raw in ["0", "-5", "wide", "", "1.5"] {
            assert_eq!(parse_positive_u32(raw), None, "raw={raw}");
        }
    }
}
