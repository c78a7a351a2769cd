//! Configuration types for trace assembly, playback and styling.
//!
//! All types implement [`serde::Deserialize`] and fall back to defaults for
//! every missing field, so a configuration file only needs to name what it
//! changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`PlaybackConfig`] - Initial algorithm, reference language and speed.
//! - [`LayoutConfig`] - Canvas origin and spacing used by the layout engine.
//! - [`StyleConfig`] - Colors assigned to each [`DisplayRole`].
//!
//! # Example
//!
//! ```
//! # use mergeviz::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.playback().speed(), 1.0);
//! assert!(config.style().color_for(mergeviz_core::element::DisplayRole::Current).is_ok());
//! ```

use serde::Deserialize;

use mergeviz_core::{color::Color, element::DisplayRole, frame::ReferenceLanguage, geometry::Point};

use crate::{playback::DEFAULT_SPEED, trace::Algorithm};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    playback: PlaybackConfig,

    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(playback: PlaybackConfig, layout: LayoutConfig, style: StyleConfig) -> Self {
        Self {
            playback,
            layout,
            style,
        }
    }

    pub fn playback(&self) -> &PlaybackConfig {
        &self.playback
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Replaces the playback section, keeping layout and style.
    pub fn with_playback(mut self, playback: PlaybackConfig) -> Self {
        self.playback = playback;
        self
    }
}

/// Initial selections of a session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    algorithm: Algorithm,
    language: ReferenceLanguage,
    speed: f64,
}

impl PlaybackConfig {
    pub fn new(algorithm: Algorithm, language: ReferenceLanguage, speed: f64) -> Self {
        Self {
            algorithm,
            language,
            speed,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn language(&self) -> ReferenceLanguage {
        self.language
    }

    /// Returns the configured speed multiplier.
    ///
    /// Non-positive or non-finite values read as [`DEFAULT_SPEED`].
    pub fn speed(&self) -> f64 {
        if self.speed.is_finite() && self.speed > 0.0 {
            self.speed
        } else {
            DEFAULT_SPEED
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            language: ReferenceLanguage::default(),
            speed: DEFAULT_SPEED,
        }
    }
}

/// Canvas geometry used by the layout engine.
///
/// Input value `n` of sequence `m` sits at
/// `(origin_x + n * node_spacing, origin_y + m * row_spacing)`. Result values
/// start at `result_origin_x` and are `result_spacing` apart; the final
/// result row is at `result_row_y` and the row of a nested merge at depth `d`
/// is at `merge_row_y + d * merge_depth_step`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    origin_x: f32,
    origin_y: f32,
    node_spacing: f32,
    row_spacing: f32,
    result_origin_x: f32,
    result_spacing: f32,
    result_row_y: f32,
    merge_row_y: f32,
    merge_depth_step: f32,
}

impl LayoutConfig {
    /// Position of the first value of the first input sequence.
    pub fn origin(&self) -> Point {
        Point::new(self.origin_x, self.origin_y)
    }

    pub fn node_spacing(&self) -> f32 {
        self.node_spacing
    }

    pub fn row_spacing(&self) -> f32 {
        self.row_spacing
    }

    pub fn result_origin_x(&self) -> f32 {
        self.result_origin_x
    }

    pub fn result_spacing(&self) -> f32 {
        self.result_spacing
    }

    pub fn result_row_y(&self) -> f32 {
        self.result_row_y
    }

    pub fn merge_row_y(&self) -> f32 {
        self.merge_row_y
    }

    pub fn merge_depth_step(&self) -> f32 {
        self.merge_depth_step
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 100.0,
            origin_y: 80.0,
            node_spacing: 80.0,
            row_spacing: 100.0,
            result_origin_x: 100.0,
            result_spacing: 70.0,
            result_row_y: 400.0,
            merge_row_y: 350.0,
            merge_depth_step: 50.0,
        }
    }
}

/// Colors per display role, as color strings.
///
/// Roles without a configured color use the built-in palette.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    current: Option<String>,
    #[serde(default)]
    merge_left: Option<String>,
    #[serde(default)]
    merge_right: Option<String>,
    #[serde(default)]
    highlighted: Option<String>,
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    processed: Option<String>,
    #[serde(default)]
    pending: Option<String>,
    #[serde(default)]
    plain: Option<String>,
    #[serde(default)]
    edge: Option<String>,
}

impl StyleConfig {
    /// Returns the [`Color`] used to draw elements with the given role.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn color_for(&self, role: DisplayRole) -> Result<Color, String> {
        let (configured, fallback) = match role {
            DisplayRole::Current => (&self.current, "#E74C3C"),
            DisplayRole::MergeLeft => (&self.merge_left, "#9B59B6"),
            DisplayRole::MergeRight => (&self.merge_right, "#3498DB"),
            DisplayRole::Highlighted => (&self.highlighted, "#E67E22"),
            DisplayRole::Result => (&self.result, "#2ECC71"),
            DisplayRole::Processed => (&self.processed, "#27AE60"),
            DisplayRole::Pending => (&self.pending, "#A0AEC0"),
            DisplayRole::Default => (&self.plain, "#4A90A4"),
        };
        Self::parse(configured.as_deref().unwrap_or(fallback), role_key(role))
    }

    /// Returns the [`Color`] of links between elements.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn edge_color(&self) -> Result<Color, String> {
        Self::parse(self.edge.as_deref().unwrap_or("#718096"), "edge")
    }

    fn parse(color: &str, key: &str) -> Result<Color, String> {
        Color::new(color).map_err(|err| format!("Invalid `{key}` color in config: {err}"))
    }
}

fn role_key(role: DisplayRole) -> &'static str {
    match role {
        DisplayRole::Current => "current",
        DisplayRole::MergeLeft => "merge_left",
        DisplayRole::MergeRight => "merge_right",
        DisplayRole::Highlighted => "highlighted",
        DisplayRole::Result => "result",
        DisplayRole::Processed => "processed",
        DisplayRole::Pending => "pending",
        DisplayRole::Default => "plain",
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [playback]
            algorithm = "priority-queue"
            speed = 1.5

            [layout]
            node_spacing = 60.0
            "#,
        )
        .unwrap();

        assert_eq!(config.playback().algorithm(), Algorithm::PriorityQueue);
        assert_eq!(config.playback().language(), ReferenceLanguage::Java);
        assert_approx_eq!(f64, config.playback().speed(), 1.5);
        assert_approx_eq!(f32, config.layout().node_spacing(), 60.0);
        assert_approx_eq!(f32, config.layout().row_spacing(), 100.0);
    }

    #[test]
    fn test_invalid_speed_reads_as_default() {
        let config = PlaybackConfig::new(Algorithm::Sequential, ReferenceLanguage::Python, -2.0);
        assert_approx_eq!(f64, config.speed(), DEFAULT_SPEED);

        let config = PlaybackConfig::new(Algorithm::Sequential, ReferenceLanguage::Python, f64::NAN);
        assert_approx_eq!(f64, config.speed(), DEFAULT_SPEED);
    }

    #[test]
    fn test_default_palette_parses() {
        let style = StyleConfig::default();
        let roles = [
            DisplayRole::Current,
            DisplayRole::MergeLeft,
            DisplayRole::MergeRight,
            DisplayRole::Highlighted,
            DisplayRole::Result,
            DisplayRole::Processed,
            DisplayRole::Pending,
            DisplayRole::Default,
        ];
        for role in roles {
            assert!(style.color_for(role).is_ok(), "{role:?}");
        }
        assert!(style.edge_color().is_ok());
    }

    #[test]
    fn test_invalid_color_names_key() {
        let style: StyleConfig = toml::from_str(r#"pending = "not-a-color""#).unwrap();

        let err = style.color_for(DisplayRole::Pending).unwrap_err();
        assert!(err.contains("`pending`"), "{err}");
        assert!(style.color_for(DisplayRole::Current).is_ok());
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[playback]\nalgorithm = \"bogo\"");
        assert!(result.is_err());
    }
}
