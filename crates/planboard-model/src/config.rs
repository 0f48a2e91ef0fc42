//! Engine configuration
//!
//! All spacing and sizing constants live here so the presentation layer can
//! tune them from a TOML file. Every section deserializes with defaults, so
//! a partial file only overrides what it names.
//!
//! ```toml
//! [layout]
//! row_gap = 120.0
//!
//! [portal]
//! max_attempts = 64
//! ```

use crate::error::ConfigError;
use crate::geometry::Size;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hierarchical (tidy tree) spacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical distance between consecutive leaves
    pub row_gap: f32,
    /// Horizontal distance between depths
    pub column_gap: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_gap: 140.0,
            column_gap: 280.0,
        }
    }
}

/// Story-lane spacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneConfig {
    /// Horizontal distance between lanes and between chained story beats
    pub lane_x_gap: f32,
    /// Row on which lanes start
    pub lane_y: f32,
    /// Horizontal indent of a branch relative to its parent
    pub branch_x_gap: f32,
    /// Vertical distance between fanned-out branches
    pub branch_y_gap: f32,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            lane_x_gap: 320.0,
            lane_y: 0.0,
            branch_x_gap: 48.0,
            branch_y_gap: 180.0,
        }
    }
}

/// Node size negotiation bounds and defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
    /// Default width of a story node outside lane mode
    pub story_width: f32,
    /// Default height of a collapsed-reading story node
    pub story_height: f32,
    /// Default width of a lane beat
    pub lane_beat_width: f32,
    /// Default height while a node is expanded for reading
    pub expanded_height: f32,
    /// Box used for nodes without inline body text
    pub fallback_width: f32,
    pub fallback_height: f32,
}

impl SizingConfig {
    /// Fallback box as a size
    #[inline]
    #[must_use]
    pub const fn fallback(&self) -> Size {
        Size::new(self.fallback_width, self.fallback_height)
    }
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            min_width: 160.0,
            max_width: 640.0,
            min_height: 72.0,
            max_height: 640.0,
            story_width: 240.0,
            story_height: 120.0,
            lane_beat_width: 300.0,
            expanded_height: 280.0,
            fallback_width: 200.0,
            fallback_height: 64.0,
        }
    }
}

/// Portal marker placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Side length of the square marker
    pub portal_size: f32,
    /// Gap between the anchor and the marker stack, and between stacked markers
    pub stack_vertical_gap: f32,
    /// Maximum absolute horizontal jitter
    pub jitter_range: f32,
    /// Distance moved per collision-scan step
    pub scan_step: f32,
    /// Column offsets tried per scan row
    pub scan_columns: u32,
    /// Hard cap on collision-scan attempts per marker
    pub max_attempts: u32,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            portal_size: 28.0,
            stack_vertical_gap: 10.0,
            jitter_range: 12.0,
            scan_step: 34.0,
            scan_columns: 5,
            max_attempts: 40,
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub layout: LayoutConfig,
    pub lane: LaneConfig,
    pub sizing: SizingConfig,
    pub portal: PortalConfig,
}

impl BoardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With hierarchical gaps
    #[inline]
    #[must_use]
    pub fn with_gaps(mut self, row_gap: f32, column_gap: f32) -> Self {
        self.layout.row_gap = row_gap;
        self.layout.column_gap = column_gap;
        self
    }

    /// With lane spacing
    #[inline]
    #[must_use]
    pub fn with_lane(mut self, lane: LaneConfig) -> Self {
        self.lane = lane;
        self
    }

    /// With sizing bounds
    #[inline]
    #[must_use]
    pub fn with_sizing(mut self, sizing: SizingConfig) -> Self {
        self.sizing = sizing;
        self
    }

    /// With portal placement settings
    #[inline]
    #[must_use]
    pub fn with_portal(mut self, portal: PortalConfig) -> Self {
        self.portal = portal;
        self
    }

    /// Parse from TOML text. Missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on malformed TOML or mistyped values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, or
    /// [`ConfigError::Parse`] when it is not valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Replace values the engine cannot work with by usable fallbacks.
    ///
    /// Inverted clamp ranges are left alone: the clamp itself treats them as
    /// identity. A degenerate fallback box becomes at least 1×1, and the
    /// scan is never allowed fewer than one attempt or column.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let sizing = &mut self.sizing;
        if sizing.fallback().is_degenerate() {
            tracing::warn!(
                width = sizing.fallback_width,
                height = sizing.fallback_height,
                "degenerate fallback box, using 1x1 minimum"
            );
            sizing.fallback_width = positive_or_one(sizing.fallback_width);
            sizing.fallback_height = positive_or_one(sizing.fallback_height);
        }

        let portal = &mut self.portal;
        if portal.portal_size.is_nan() || portal.portal_size <= 0.0 {
            tracing::warn!(size = portal.portal_size, "non-positive portal size, using 1");
            portal.portal_size = 1.0;
        }
        if portal.max_attempts == 0 {
            tracing::warn!("max_attempts of zero, scanning the candidate only");
            portal.max_attempts = 1;
        }
        portal.scan_columns = portal.scan_columns.max(1);
        if !portal.jitter_range.is_finite() || portal.jitter_range < 0.0 {
            portal.jitter_range = 0.0;
        }
        self
    }
}

fn positive_or_one(v: f32) -> f32 {
    if v >= 1.0 {
        v
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = BoardConfig::from_toml_str(
            r#"
            [layout]
            row_gap = 100.0

            [portal]
            max_attempts = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.layout.row_gap, 100.0);
        assert_eq!(config.layout.column_gap, 280.0);
        assert_eq!(config.portal.max_attempts, 8);
        assert_eq!(config.lane, LaneConfig::default());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(BoardConfig::from_toml_str("").unwrap(), BoardConfig::default());
    }

    #[test]
    fn mistyped_value_is_parse_error() {
        let err = BoardConfig::from_toml_str("[layout]\nrow_gap = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.toml");
        std::fs::write(&path, "[lane]\nlane_x_gap = 400.0\n").unwrap();
        let config = BoardConfig::load(&path).unwrap();
        assert_eq!(config.lane.lane_x_gap, 400.0);
        assert_eq!(config.lane.branch_y_gap, 180.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = BoardConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn sanitize_fixes_degenerate_values() {
        let mut config = BoardConfig::default();
        config.sizing.fallback_width = 0.0;
        config.sizing.fallback_height = -3.0;
        config.portal.max_attempts = 0;
        config.portal.scan_columns = 0;
        config.portal.jitter_range = -1.0;

        let fixed = config.sanitized();
        assert_eq!(fixed.sizing.fallback(), Size::new(1.0, 1.0));
        assert_eq!(fixed.portal.max_attempts, 1);
        assert_eq!(fixed.portal.scan_columns, 1);
        assert_eq!(fixed.portal.jitter_range, 0.0);
    }

    #[test]
    fn sanitize_leaves_inverted_ranges() {
        let mut config = BoardConfig::default();
        config.sizing.min_width = 900.0;
        let fixed = config.sanitized();
        assert_eq!(fixed.sizing.min_width, 900.0);
    }
}
