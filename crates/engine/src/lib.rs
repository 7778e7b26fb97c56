use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod app;
mod sprite_keys;

pub use app::{
    run_app, Anchor, AppError, Area, EntityId, InputAction, InputSnapshot, Layer, LoopConfig,
    LoopMetricsSnapshot, Node, NodeDesc, OverlapEvent, Outline, RenderableKind, Renderer, Rgba,
    Scene, SceneCommand, SceneWorld, Vec2, Viewport, WorldTransform, BLACK, PLACEHOLDER_COLOR,
    WHITE,
};
pub use sprite_keys::{sprite_image_path, SpriteKeyError};

pub const ROOT_ENV_VAR: &str = "ROOM_ROOT";

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub root: PathBuf,
    pub assets_dir: PathBuf,
    pub data_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to resolve current executable path: {0}")]
    CurrentExe(#[source] std::io::Error),
    #[error("current executable path has no parent directory: {0}")]
    ExeHasNoParent(PathBuf),
    #[error("failed to create data directory at {path}: {source}")]
    CreateDataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "{env_var} is set but does not point to a valid project root: {path}\n\
A valid root must contain Cargo.toml and either crates/ or assets/."
    )]
    InvalidEnvRoot { path: PathBuf, env_var: &'static str },
    #[error(
        "Could not detect project root by walking upward from executable directory: {start_dir}\n\
Expected a directory containing Cargo.toml and either crates/ or assets/.\n\
Set {env_var} explicitly, for example:\n\
Bash/zsh: export {env_var}=\"/path/to/room\""
    )]
    RootNotFound {
        start_dir: PathBuf,
        env_var: &'static str,
    },
}

/// Resolves the project root and makes sure `<root>/data` exists.
pub fn resolve_app_paths() -> Result<AppPaths, StartupError> {
    let root = resolve_root()?;
    app_paths_for_root(root)
}

pub fn app_paths_for_root(root: PathBuf) -> Result<AppPaths, StartupError> {
    let assets_dir = root.join("assets");
    let data_dir = root.join("data");

    fs::create_dir_all(&data_dir).map_err(|source| StartupError::CreateDataDir {
        path: data_dir.clone(),
        source,
    })?;

    Ok(AppPaths {
        root,
        assets_dir,
        data_dir,
    })
}

fn resolve_root() -> Result<PathBuf, StartupError> {
    match env::var(ROOT_ENV_VAR) {
        Ok(value) => {
            let normalized = normalize_path(Path::new(&value));
            if is_repo_marker(&normalized) {
                Ok(normalized)
            } else {
                Err(StartupError::InvalidEnvRoot {
                    path: normalized,
                    env_var: ROOT_ENV_VAR,
                })
            }
        }
        Err(env::VarError::NotPresent) => {
            let exe = env::current_exe().map_err(StartupError::CurrentExe)?;
            let exe_dir = exe
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| StartupError::ExeHasNoParent(exe.clone()))?;
            find_root_above(&exe_dir).ok_or_else(|| StartupError::RootNotFound {
                start_dir: normalize_path(&exe_dir),
                env_var: ROOT_ENV_VAR,
            })
        }
        Err(source) => Err(StartupError::EnvVar {
            var: ROOT_ENV_VAR,
            source,
        }),
    }
}

fn find_root_above(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .find(|candidate| is_repo_marker(candidate))
        .map(normalize_path)
}

fn is_repo_marker(path: &Path) -> bool {
    let cargo_toml = path.join("Cargo.toml").is_file();
    let has_crates = path.join("crates").is_dir();
    let has_assets = path.join("assets").is_dir();

    cargo_toml && (has_crates || has_assets)
}

fn normalize_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn repo_marker_requires_cargo_toml() {
        let temp = TempDir::new().expect("temp dir");
        fs::create_dir_all(temp.path().join("assets")).expect("assets dir");
        assert!(!is_repo_marker(temp.path()));

        fs::write(temp.path().join("Cargo.toml"), "[workspace]\n").expect("cargo toml");
        assert!(is_repo_marker(temp.path()));
    }

    #[test]
    fn root_is_found_from_nested_build_dir() {
        let temp = TempDir::new().expect("temp dir");
        fs::write(temp.path().join("Cargo.toml"), "[workspace]\n").expect("cargo toml");
        fs::create_dir_all(temp.path().join("crates")).expect("crates dir");
        let nested = temp.path().join("target").join("debug");
        fs::create_dir_all(&nested).expect("nested dir");

        let found = find_root_above(&nested).expect("root should be detected");
        assert_eq!(found, normalize_path(temp.path()));
    }

    #[test]
    fn app_paths_create_data_dir() {
        let temp = TempDir::new().expect("temp dir");
        let paths = app_paths_for_root(temp.path().to_path_buf()).expect("paths");
        assert!(paths.data_dir.is_dir());
        assert_eq!(paths.assets_dir, temp.path().join("assets"));
    }
}
