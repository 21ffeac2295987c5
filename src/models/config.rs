use crate::assets::{AssetLoader, EVENTS_FILE};
use crate::error::RenderError;
use crate::models::DisplaySpec;
use chrono::{FixedOffset, Offset, Utc};
use mono_dither::{DitherConfig, DEFAULT_CUTOFF};
use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Panel geometry
    #[serde(default)]
    pub display: DisplayConfig,

    /// Dithering parameters
    #[serde(default)]
    pub dither: DitherSettings,

    /// Events file (relative to the assets directory)
    #[serde(default = "default_events_file")]
    pub events_file: PathBuf,

    /// Optional background photo for the left half (relative to the assets directory)
    #[serde(default)]
    pub photo: Option<PathBuf>,

    /// Horizontal offset of the photo in pixels
    #[serde(default = "default_photo_offset")]
    pub photo_offset_x: i32,

    /// Offset from UTC for the date banner, in hours
    #[serde(default = "default_utc_offset")]
    pub utc_offset_hours: i32,

    /// How long a rendered frame is reused, in seconds (0 disables the cache)
    #[serde(default = "default_cache_seconds")]
    pub cache_seconds: u64,
}

/// Panel resolution
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

/// Dithering parameters
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct DitherSettings {
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
    #[serde(default)]
    pub split_column: Option<u32>,
}

fn default_events_file() -> PathBuf {
    PathBuf::from(EVENTS_FILE)
}

fn default_photo_offset() -> i32 {
    -100
}

fn default_utc_offset() -> i32 {
    2
}

fn default_cache_seconds() -> u64 {
    60
}

fn default_width() -> u32 {
    DisplaySpec::PANEL_7IN5.width
}

fn default_height() -> u32 {
    DisplaySpec::PANEL_7IN5.height
}

fn default_cutoff() -> f64 {
    DEFAULT_CUTOFF
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for DitherSettings {
    fn default() -> Self {
        Self {
            cutoff: default_cutoff(),
            split_column: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            dither: DitherSettings::default(),
            events_file: default_events_file(),
            photo: None,
            photo_offset_x: default_photo_offset(),
            utc_offset_hours: default_utc_offset(),
            cache_seconds: default_cache_seconds(),
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (external file or embedded)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        width = config.display.width,
                        height = config.display.height,
                        cutoff = config.dither.cutoff,
                        split_column = ?config.dither.split_column,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit; treat it as all defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Validated panel geometry
    pub fn display_spec(&self) -> Result<DisplaySpec, RenderError> {
        DisplaySpec::new(self.display.width, self.display.height)
    }

    /// Dithering configuration for the core
    pub fn dither_config(&self) -> DitherConfig {
        DitherConfig::new()
            .cutoff(self.dither.cutoff)
            .split_column(self.dither.split_column)
    }

    /// How long a rendered frame stays fresh
    pub fn cache_max_age(&self) -> chrono::Duration {
        i64::try_from(self.cache_seconds)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }

    /// UTC offset for displayed dates, clamped to a valid range
    pub fn utc_offset(&self) -> FixedOffset {
        let hours = self.utc_offset_hours.clamp(-23, 23);
        FixedOffset::east_opt(hours * 3600).unwrap_or_else(|| Utc.fix())
    }
}
