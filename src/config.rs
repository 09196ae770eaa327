//! Game settings loaded from JSON.

use crate::world::{DEFAULT_CLOUD_SPEED, DEFAULT_OBSTACLE_SPEED};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Scroll speed of ground and obstacles, world units per tick.
    pub obstacle_speed: f64,
    pub cloud_speed: f64,
    /// Target time between frames.
    pub frame_interval_ms: u64,
    /// How long a terminal key press counts as held.
    pub key_hold_ms: u64,
    /// Fixed random seed; fresh entropy when absent.
    pub seed: Option<u64>,
    /// Log destination for the interactive game. Logging is off without it.
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            obstacle_speed: DEFAULT_OBSTACLE_SPEED,
            cloud_speed: DEFAULT_CLOUD_SPEED,
            frame_interval_ms: 33,
            key_hold_ms: 120,
            seed: None,
            log_file: None,
        }
    }
}

impl GameConfig {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> io::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> io::Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        config.validate()?;
        Ok(config)
    }

    /// `<config dir>/dino-dash/config.json` for this platform.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "dino-dash").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Write as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }

    pub fn validate(&self) -> io::Result<()> {
        let invalid = |msg: String| Err(io::Error::new(io::ErrorKind::InvalidData, msg));

        for (name, speed) in [
            ("obstacle_speed", self.obstacle_speed),
            ("cloud_speed", self.cloud_speed),
        ] {
            if !speed.is_finite() || speed <= 0.0 {
                return invalid(format!("{name} must be a positive number, got {speed}"));
            }
        }
        if self.frame_interval_ms == 0 {
            return invalid("frame_interval_ms must be at least 1".to_string());
        }
        if self.key_hold_ms == 0 {
            return invalid("key_hold_ms must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn key_hold(&self) -> Duration {
        Duration::from_millis(self.key_hold_ms)
    }
}
