use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;
use whirl::Physics;

/// Where segment 0 starts on screen. Angles grow clockwise from here.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    #[default]
    #[strum(to_string = "north", serialize = "n", serialize = "up", serialize = "top")]
    North,
    #[strum(to_string = "east", serialize = "e", serialize = "right")]
    East,
    #[strum(to_string = "south", serialize = "s", serialize = "down", serialize = "bottom")]
    South,
    #[strum(to_string = "west", serialize = "w", serialize = "left")]
    West,
}

impl Anchor {
    /// Screen angle of the anchor in degrees, clockwise from the positive x axis (y points down).
    pub fn screen_degrees(self) -> f64 {
        match self {
            Self::North => -90.0,
            Self::East => 0.0,
            Self::South => 90.0,
            Self::West => 180.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Appearance {
    pub anchor: Anchor,
    pub font: String,
    /// `{name}` is replaced with the winning option.
    pub result_template: String,
    pub width: i32,
    pub height: i32,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            anchor: Anchor::default(),
            font: "Sans".to_string(),
            result_template: "Tonight: {name}".to_string(),
            width: 400,
            height: 400,
        }
    }
}

impl Appearance {
    pub fn result_text(&self, name: &str) -> String {
        self.result_template.replace("{name}", name)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Relative paths resolve against the working directory.
    pub options_path: PathBuf,
    pub physics: Physics,
    pub appearance: Appearance,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            options_path: PathBuf::from("options.csv"),
            physics: Physics::default(),
            appearance: Appearance::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "whirl", "tonight").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn builder() -> config::ConfigBuilder<config::builder::DefaultState> {
    config::Config::builder().add_source(config::File::from_str(
        DEFAULT_CONFIG,
        config::FileFormat::Toml,
    ))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = builder()
        .add_source(config::File::from(config_path).required(false))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads the user config, falling back to the defaults when it is missing or broken.
pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    }
}

/// Writes the commented default config to the user config path unless a file is already there.
pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    write_default_config_to(&path)?;
    Ok(path)
}

fn write_default_config_to(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(())
}
