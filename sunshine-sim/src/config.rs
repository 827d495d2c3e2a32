//! Simulator configuration
//!
//! `face.toml` holds the face palette and layouts, `scenario.toml` the
//! scripted lifecycle events and companion pushes. A missing file is not
//! an error; the face runs with defaults and an empty script.

use std::fs;
use std::io;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use sunshine_core::config::FaceConfig;
use sunshine_core::state::{FaceEvent, TapKind};

/// Configuration loading errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// File exists but could not be read
    Io(io::ErrorKind),
    /// TOML parsing failed
    TomlParse,
    /// A value is out of range
    Invalid(&'static str),
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e.kind())
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::Io(kind) => write!(f, "I/O error: {}", kind),
            ConfigError::TomlParse => write!(f, "invalid TOML"),
            ConfigError::Invalid(what) => write!(f, "invalid value: {}", what),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Read a file, mapping "not found" to `None`
fn read_optional(path: &Path) -> Result<Option<String>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse<T: for<'de> Deserialize<'de>>(path: &Path, text: &str) -> Result<T, ConfigError> {
    toml::from_str(text).map_err(|e| {
        warn!("{}: {}", path.display(), e);
        ConfigError::TomlParse
    })
}

/// Load the face configuration
pub fn load_face_config(path: &Path) -> Result<FaceConfig, ConfigError> {
    let Some(text) = read_optional(path)? else {
        info!("{} not found, using default face", path.display());
        return Ok(FaceConfig::default());
    };

    let config: FaceConfig = parse(path, &text)?;
    for layout in [&config.round, &config.square] {
        if layout.separator_half_width == 0 {
            return Err(ConfigError::Invalid("separator_half_width"));
        }
    }
    Ok(config)
}

/// Simulated screen
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
    /// Round screens get insets on start
    pub round: bool,
    /// Display loses color depth in ambient
    pub low_bit_ambient: bool,
    /// Write each frame as a PPM image here
    pub frame_dump: Option<String>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 240,
            height: 240,
            round: false,
            low_bit_ambient: false,
            frame_dump: None,
        }
    }
}

/// Scripted run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Node id the companion pushes from
    pub node: String,
    /// Directory icon references resolve against
    pub asset_dir: String,
    pub screen: ScreenConfig,
    #[serde(rename = "step")]
    pub steps: Vec<Step>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            node: String::from("companion"),
            asset_dir: String::from("assets"),
            screen: ScreenConfig::default(),
            steps: Vec::new(),
        }
    }
}

/// One scripted action at a fixed offset from start
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: Action,
}

/// Scripted action
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Action {
    Visible,
    Hidden,
    Ambient,
    Interactive,
    Tap,
    /// Ambient once-per-minute tick
    TimeTick,
    /// Switch the simulated time zone
    TimeZone { offset_s: i32 },
    /// Companion pushes a weather item
    Weather {
        high: Option<String>,
        low: Option<String>,
        icon: Option<String>,
    },
    /// Companion pushes an item on another path
    Other { path: String },
    Destroy,
}

impl Action {
    /// Platform event for lifecycle actions
    pub fn face_event(&self) -> Option<FaceEvent> {
        match self {
            Action::Visible => Some(FaceEvent::VisibilityChanged(true)),
            Action::Hidden => Some(FaceEvent::VisibilityChanged(false)),
            Action::Ambient => Some(FaceEvent::AmbientChanged(true)),
            Action::Interactive => Some(FaceEvent::AmbientChanged(false)),
            Action::Tap => Some(FaceEvent::Tap(TapKind::Tap)),
            Action::TimeTick => Some(FaceEvent::TimeTick),
            Action::TimeZone { .. } => Some(FaceEvent::TimeZoneChanged),
            Action::Destroy => Some(FaceEvent::Destroy),
            Action::Weather { .. } | Action::Other { .. } => None,
        }
    }
}

/// Load the scenario, sorted by time
pub fn load_scenario(path: &Path) -> Result<Scenario, ConfigError> {
    let Some(text) = read_optional(path)? else {
        info!("{} not found, running without a script", path.display());
        return Ok(Scenario::default());
    };

    let mut scenario: Scenario = parse(path, &text)?;
    if scenario.node.is_empty() {
        return Err(ConfigError::Invalid("node"));
    }
    if scenario.screen.width == 0 || scenario.screen.height == 0 {
        return Err(ConfigError::Invalid("screen"));
    }
    scenario.steps.sort_by_key(|step| step.at_ms);
    Ok(scenario)
}
