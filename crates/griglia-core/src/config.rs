//! Engine configuration.
//!
//! Loaded from `~/.config/griglia/config.toml`. Missing sections fall
//! back to defaults thanks to `#[serde(default)]`, and loaded values
//! are clamped to safe ranges via [`Config::validate`]. Known-app
//! patterns live in their own `patterns.toml` next to the config.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;
use crate::patterns::{AppPattern, default_patterns};
use crate::{Error, Result};

/// Top-level configuration for Griglia.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Arrangement and manipulation tuning.
    pub arrange: ArrangeConfig,
    /// File logging settings.
    pub log: LogConfig,
}

/// How title collisions are resolved during identity resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// First match in candidate order.
    First,
    /// Match closest to the window's last known origin.
    Closest,
}

/// Tunable constants for layout and manipulation.
///
/// The delays are deliberate settling pauses, not timeouts: backends
/// need time to apply a command before verification reads anything
/// meaningful.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrangeConfig {
    /// Units of center drift a window may show and still count as
    /// occupying its slot.
    pub tolerance: f64,
    /// Radius in units for position-proximity identity resolution.
    pub proximity: f64,
    /// Title-collision resolution strategy.
    pub tie_break: TieBreak,
    /// Padding between the usable area edge and the grid, in units.
    pub padding: f64,
    /// Spacing between grid cells, in units.
    pub spacing: f64,
    /// Round computed rectangles to whole pixels.
    pub pixel_snap: bool,
    /// Number of interpolation steps for gradual movement.
    pub gradual_steps: u32,
    /// Pause between gradual movement steps, in milliseconds.
    pub gradual_step_delay_ms: u64,
    /// Primary attempts for the retry method.
    pub retry_attempts: u32,
    /// Base inter-attempt delay for the retry method; attempt `n`
    /// waits `n` times this long.
    pub retry_base_delay_ms: u64,
    /// Pause after restore and similar state changes before the next
    /// command, in milliseconds.
    pub settle_delay_ms: u64,
    /// Pause between consecutive commands to the same application
    /// during a full arrangement, in milliseconds.
    pub pacing_delay_ms: u64,
    /// Distance from a display edge under which a stuck window is
    /// classified as boundary-locked, in units.
    pub boundary_threshold: f64,
    /// Fraction of the usable area a stacked window occupies.
    pub stack_fill: f64,
    /// Horizontal cascade offset per window.
    pub cascade_dx: f64,
    /// Vertical cascade offset per window (negative steps downward).
    pub cascade_dy: f64,
}

impl Default for ArrangeConfig {
    fn default() -> Self {
        Self {
            tolerance: 5.0,
            proximity: 10.0,
            tie_break: TieBreak::First,
            padding: 10.0,
            spacing: 5.0,
            pixel_snap: true,
            gradual_steps: 10,
            gradual_step_delay_ms: 50,
            retry_attempts: 3,
            retry_base_delay_ms: 100,
            settle_delay_ms: 150,
            pacing_delay_ms: 80,
            boundary_threshold: 50.0,
            stack_fill: 0.8,
            cascade_dx: 30.0,
            cascade_dy: -30.0,
        }
    }
}

impl Config {
    /// Clamps values to safe ranges.
    ///
    /// Prevents zero-step gradual movement, negative paddings, and
    /// pauses long enough to make an arrangement appear hung.
    pub fn validate(&mut self) {
        let a = &mut self.arrange;
        a.tolerance = a.tolerance.clamp(0.5, 100.0);
        a.proximity = a.proximity.clamp(0.0, 200.0);
        a.padding = a.padding.clamp(0.0, 200.0);
        a.spacing = a.spacing.clamp(0.0, 200.0);
        a.gradual_steps = a.gradual_steps.clamp(1, 100);
        a.gradual_step_delay_ms = a.gradual_step_delay_ms.min(1_000);
        a.retry_attempts = a.retry_attempts.clamp(1, 10);
        a.retry_base_delay_ms = a.retry_base_delay_ms.min(2_000);
        a.settle_delay_ms = a.settle_delay_ms.min(2_000);
        a.pacing_delay_ms = a.pacing_delay_ms.min(1_000);
        a.boundary_threshold = a.boundary_threshold.clamp(1.0, 500.0);
        a.stack_fill = a.stack_fill.clamp(0.1, 1.0);
    }
}

/// Returns the config directory: `~/.config/griglia/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("griglia"))
}

/// Returns the config file path: `~/.config/griglia/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Returns the patterns file path: `~/.config/griglia/patterns.toml`.
pub fn patterns_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("patterns.toml"))
}

/// Tries to load and parse `config.toml`.
pub fn try_load() -> Result<Config> {
    let path = config_path().ok_or(Error::NoConfigDir)?;
    let content = std::fs::read_to_string(&path)?;
    let mut config: Config = toml::from_str(&content)?;
    config.validate();
    Ok(config)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// A missing file silently returns defaults; other errors are
/// reported on stderr and also fall back.
pub fn load() -> Config {
    load_or_default(try_load, Config::default)
}

/// On-disk shape of `patterns.toml`: a list of `[[pattern]]` tables.
#[derive(Debug, Serialize, Deserialize)]
struct PatternsFile {
    #[serde(default)]
    pattern: Vec<AppPattern>,
}

/// Tries to load and parse `patterns.toml`.
pub fn try_load_patterns() -> Result<Vec<AppPattern>> {
    let path = patterns_path().ok_or(Error::NoConfigDir)?;
    let content = std::fs::read_to_string(&path)?;
    let file: PatternsFile = toml::from_str(&content)?;
    Ok(file.pattern)
}

/// Loads known-app patterns, falling back to the built-in table.
pub fn load_patterns() -> Vec<AppPattern> {
    load_or_default(try_load_patterns, default_patterns)
}

/// Writes the default config to disk, creating the directory.
///
/// Returns the path written. Refuses to overwrite an existing file.
pub fn write_default() -> Result<PathBuf> {
    let path = config_path().ok_or(Error::NoConfigDir)?;
    if path.exists() {
        return Ok(path);
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    std::fs::write(&path, text)?;
    Ok(path)
}

/// Loads a value from disk, falling back to defaults.
///
/// Non-existent files silently return defaults; other errors are
/// reported once on stderr.
fn load_or_default<T>(try_load: impl FnOnce() -> Result<T>, default: impl Fn() -> T) -> T {
    match try_load() {
        Ok(val) => val,
        Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.arrange.tolerance, 5.0);
        assert_eq!(config.arrange.gradual_steps, 10);
        assert_eq!(config.arrange.tie_break, TieBreak::First);
        assert!(!config.log.enabled);
    }

    #[test]
    fn validate_clamps_out_of_range_values() {
        // Arrange
        let mut config = Config::default();
        config.arrange.tolerance = -3.0;
        config.arrange.gradual_steps = 0;
        config.arrange.stack_fill = 7.5;
        config.arrange.retry_attempts = 99;

        // Act
        config.validate();

        // Assert
        assert_eq!(config.arrange.tolerance, 0.5);
        assert_eq!(config.arrange.gradual_steps, 1);
        assert_eq!(config.arrange.stack_fill, 1.0);
        assert_eq!(config.arrange.retry_attempts, 10);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        // Arrange — only one key set; everything else defaults.
        let text = "[arrange]\ntolerance = 12.0\n";

        // Act
        let config: Config = toml::from_str(text).unwrap();

        // Assert
        assert_eq!(config.arrange.tolerance, 12.0);
        assert_eq!(config.arrange.gradual_steps, 10);
        assert_eq!(config.arrange.spacing, 5.0);
    }

    #[test]
    fn tie_break_parses_from_snake_case() {
        let text = "[arrange]\ntie_break = \"closest\"\n";
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(config.arrange.tie_break, TieBreak::Closest);
    }

    #[test]
    fn patterns_file_parses_pattern_tables() {
        let text = r#"
            [[pattern]]
            app = "Citrix Viewer"
            category = "application_locked"
            method = "scripting_fallback"
            note = "remote frames"
        "#;
        let file: PatternsFile = toml::from_str(text).unwrap();
        assert_eq!(file.pattern.len(), 1);
        assert_eq!(
            file.pattern[0].category,
            crate::ResistanceCategory::ApplicationLocked
        );
    }
}
