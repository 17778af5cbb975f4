use crate::events::AppEvent;
use async_channel::{Receiver, Sender};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use orbit::IndicatorOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "whirl", "whirl").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Reads the config file (if any) overlaid with `WHIRL_*` environment variables.
/// Values are not validated here; that happens when the animator is configured.
pub fn load_options() -> Result<IndicatorOptions, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("WHIRL"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> IndicatorOptions {
    match load_options() {
        Ok(options) => options,
        Err(e) => {
            log::warn!("Failed to load config, using defaults: {}", e);
            IndicatorOptions::default()
        }
    }
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

type WatchResult = notify::Result<notify::Event>;

/// Starts watching the directory holding `config_path`. The watcher stops
/// when the returned handle is dropped.
fn watch_config_dir(
    config_path: &Path,
) -> Result<(RecommendedWatcher, Receiver<WatchResult>), ConfigError> {
    let dir = config_path.parent().ok_or(ConfigError::ConfigDirNotFound)?;
    fs_err::create_dir_all(dir)?;

    let (events_tx, events_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res: WatchResult| {
            let _ = events_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok((watcher, events_rx))
}

/// Whether `event` means the file at `config_path` changed on disk.
fn touches_config(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Sends `ConfigReload` whenever the config file changes, until the app
/// side of the channel goes away.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let watched = get_config_path()
        .and_then(|path| watch_config_dir(&path).map(|(watcher, rx)| (path, watcher, rx)));
    let (config_path, _watcher, events) = match watched {
        Ok(watched) => watched,
        Err(e) => {
            log::error!("Config hot reload disabled: {}", e);
            return;
        }
    };
    log::debug!("Watching {}", config_path.display());

    while let Ok(res) = events.recv().await {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                log::warn!("Config watcher reported an error: {}", e);
                continue;
            }
        };
        if touches_config(&event, &config_path) {
            log::debug!("Config file changed ({:?})", event.kind);
            if tx.send(AppEvent::ConfigReload).await.is_err() {
                break;
            }
        }
    }
}
