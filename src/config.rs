use std::{fs, path::Path, path::PathBuf};

use serde::Deserialize;

pub const DEFAULT_MOVE_THRESHOLD_PX: i32 = 40;
pub const DEFAULT_EDGE_MARGIN_PX: i32 = 32;
pub const DEFAULT_TAP_MIN_DURATION_MS: u64 = 0;
pub const DEFAULT_TAP_MAX_DURATION_MS: u64 = 300;
pub const DEFAULT_DOUBLE_TAP_INTERVAL_MS: u64 = 300;
pub const DEFAULT_DOUBLE_TAP_MAX_DISTANCE_PX: i32 = 60;
pub const DEFAULT_LONG_PRESS_DURATION_MS: u64 = 800;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid gesture config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TapConfig {
    pub min_duration_ms: u64,
    pub max_duration_ms: u64,
    /// Hold a finished tap until the double-tap window closes.
    pub defer_for_double_tap: bool,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: DEFAULT_TAP_MIN_DURATION_MS,
            max_duration_ms: DEFAULT_TAP_MAX_DURATION_MS,
            defer_for_double_tap: true,
        }
    }
}

impl TapConfig {
    pub fn accepts_duration(&self, duration_ms: u64) -> bool {
        (self.min_duration_ms..=self.max_duration_ms).contains(&duration_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DoubleTapConfig {
    /// Maximum gap between the first release and the second press.
    pub interval_ms: u64,
    /// Maximum distance between the first release and the second press.
    pub max_distance_px: i32,
}

impl Default for DoubleTapConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_DOUBLE_TAP_INTERVAL_MS,
            max_distance_px: DEFAULT_DOUBLE_TAP_MAX_DISTANCE_PX,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LongPressConfig {
    pub duration_ms: u64,
}

impl Default for LongPressConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_LONG_PRESS_DURATION_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecognizerSelection {
    pub tap: bool,
    pub pan: bool,
    pub pinch: bool,
    pub pinch3f: bool,
    pub double_tap: bool,
    pub long_press: bool,
}

impl Default for RecognizerSelection {
    fn default() -> Self {
        Self {
            tap: true,
            pan: true,
            pinch: true,
            pinch3f: true,
            double_tap: true,
            long_press: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    pub move_threshold_px: i32,
    pub edge_margin_px: i32,
    pub tap: TapConfig,
    pub double_tap: DoubleTapConfig,
    pub long_press: LongPressConfig,
    pub recognizers: RecognizerSelection,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            move_threshold_px: DEFAULT_MOVE_THRESHOLD_PX,
            edge_margin_px: DEFAULT_EDGE_MARGIN_PX,
            tap: TapConfig::default(),
            double_tap: DoubleTapConfig::default(),
            long_press: LongPressConfig::default(),
            recognizers: RecognizerSelection::default(),
        }
    }
}

impl GestureConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        log::debug!("loaded gesture config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.move_threshold_px < 0 {
            return Err(invalid("move_threshold_px", "must be >= 0"));
        }
        if self.edge_margin_px < 0 {
            return Err(invalid("edge_margin_px", "must be >= 0"));
        }
        if self.tap.min_duration_ms > self.tap.max_duration_ms {
            return Err(invalid(
                "tap.min_duration_ms",
                format!("must be <= tap.max_duration_ms ({})", self.tap.max_duration_ms),
            ));
        }
        if self.tap.max_duration_ms >= self.long_press.duration_ms {
            return Err(invalid(
                "tap.max_duration_ms",
                format!(
                    "must be < long_press.duration_ms ({})",
                    self.long_press.duration_ms
                ),
            ));
        }
        if self.double_tap.interval_ms == 0 {
            return Err(invalid("double_tap.interval_ms", "must be > 0"));
        }
        if self.double_tap.max_distance_px < 0 {
            return Err(invalid("double_tap.max_distance_px", "must be >= 0"));
        }
        Ok(())
    }

    pub fn settings(&self) -> GestureSettings {
        GestureSettings {
            move_threshold_px: self.move_threshold_px,
            edge_margin_px: self.edge_margin_px,
            edge_bounds: None,
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Rectangle whose edges classify where a pan started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl EdgeBounds {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }
}

/// Settings shared by every registered recognizer, owned by the manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureSettings {
    pub move_threshold_px: i32,
    pub edge_margin_px: i32,
    pub edge_bounds: Option<EdgeBounds>,
}

impl Default for GestureSettings {
    fn default() -> Self {
        GestureConfig::default().settings()
    }
}
