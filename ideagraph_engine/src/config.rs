// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.
//!
//! Every field has a default, so a config file only needs the values it changes:
//!
//! ```toml
//! [placement]
//! gap = 32.0
//!
//! [viewport]
//! max_zoom = 3.0
//! ```

use std::time::Duration;

use ideagraph_geometry::{DEFAULT_GAP, PlacementParams};
use ideagraph_store::{StoreParams, SuggestionLayout};
use kurbo::Size;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Ring-search placement settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Margin kept between ideas, in world units.
    pub gap: f64,
    /// Distance between candidate offsets, in world units.
    pub step: f64,
    /// Largest ring radius searched.
    pub max_rings: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            step: 20.0,
            max_rings: 40,
        }
    }
}

/// Sizes and offsets of new ideas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of ideas created from a concept.
    pub idea_width: f64,
    /// Height of ideas created from a concept.
    pub idea_height: f64,
    /// Horizontal space between a source idea and a concept branched from it.
    pub branch_gap: f64,
    /// Height of the toolbar band above the active idea.
    pub toolbar_height: f64,
    /// World distance mapped to one unit of the semantic plane.
    pub semantic_scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            idea_width: 320.0,
            idea_height: 220.0,
            branch_gap: 60.0,
            toolbar_height: 40.0,
            semantic_scale: 1000.0,
        }
    }
}

/// Suggestion column settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Most suggestions shown for one idea.
    pub max: usize,
    /// Width of a suggestion.
    pub width: f64,
    /// Height of a suggestion.
    pub height: f64,
    /// Vertical space between suggestions.
    pub spacing: f64,
    /// Horizontal space between the source idea and the column.
    pub gap: f64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        let layout = SuggestionLayout::default();
        Self {
            max: 3,
            width: layout.width,
            height: layout.height,
            spacing: layout.spacing,
            gap: layout.gap,
        }
    }
}

/// Viewport settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Smallest zoom factor.
    pub min_zoom: f64,
    /// Largest zoom factor.
    pub max_zoom: f64,
    /// Length of the eased auto-pan window after centering, in milliseconds.
    pub auto_pan_ms: u64,
    /// Initial screen width.
    pub screen_width: f64,
    /// Initial screen height.
    pub screen_height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.3,
            max_zoom: 2.0,
            auto_pan_ms: 500,
            screen_width: 1280.0,
            screen_height: 800.0,
        }
    }
}

impl ViewportConfig {
    /// Auto-pan window length.
    pub fn auto_pan(&self) -> Duration {
        Duration::from_millis(self.auto_pan_ms)
    }

    /// Initial screen size.
    pub fn screen_size(&self) -> Size {
        Size::new(self.screen_width, self.screen_height)
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Placement search.
    pub placement: PlacementConfig,
    /// New idea geometry.
    pub layout: LayoutConfig,
    /// Suggestion column.
    pub suggestions: SuggestionConfig,
    /// Pan and zoom.
    pub viewport: ViewportConfig,
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, v: f64) -> Result<(), ConfigError> {
            if v > 0.0 && v.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {v}"),
                })
            }
        }

        if !(self.placement.gap >= 0.0 && self.placement.gap.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "placement.gap",
                reason: format!("must be non-negative, got {}", self.placement.gap),
            });
        }
        positive("placement.step", self.placement.step)?;
        positive("layout.idea_width", self.layout.idea_width)?;
        positive("layout.idea_height", self.layout.idea_height)?;
        positive("layout.semantic_scale", self.layout.semantic_scale)?;
        positive("suggestions.width", self.suggestions.width)?;
        positive("suggestions.height", self.suggestions.height)?;
        positive("viewport.min_zoom", self.viewport.min_zoom)?;
        positive("viewport.max_zoom", self.viewport.max_zoom)?;
        positive("viewport.screen_width", self.viewport.screen_width)?;
        positive("viewport.screen_height", self.viewport.screen_height)?;
        if self.viewport.max_zoom < self.viewport.min_zoom {
            return Err(ConfigError::Invalid {
                field: "viewport.max_zoom",
                reason: format!(
                    "must be at least min_zoom ({}), got {}",
                    self.viewport.min_zoom, self.viewport.max_zoom
                ),
            });
        }
        Ok(())
    }

    /// Size of ideas created from a concept.
    pub fn idea_size(&self) -> Size {
        Size::new(self.layout.idea_width, self.layout.idea_height)
    }

    /// Parameters for the idea store.
    pub fn store_params(&self) -> StoreParams {
        StoreParams {
            placement: PlacementParams {
                gap: self.placement.gap,
                step: self.placement.step,
                max_rings: self.placement.max_rings,
            },
            toolbar_height: self.layout.toolbar_height,
            suggestions: SuggestionLayout {
                width: self.suggestions.width,
                height: self.suggestions.height,
                spacing: self.suggestions.spacing,
                gap: self.suggestions.gap,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_store_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.store_params(), StoreParams::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [placement]
            gap = 32.0

            [viewport]
            max_zoom = 3.0
            "#,
        )
        .unwrap();
        assert_eq!(config.placement.gap, 32.0);
        assert_eq!(config.placement.step, 20.0);
        assert_eq!(config.viewport.max_zoom, 3.0);
        assert_eq!(config.viewport.min_zoom, 0.3);
        assert_eq!(config.suggestions.max, 3);
    }

    #[test]
    fn inverted_zoom_range_is_rejected() {
        let err = EngineConfig::from_toml_str("[viewport]\nmin_zoom = 1.5\nmax_zoom = 1.0\n")
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid { field: "viewport.max_zoom", .. }),
            "{err}"
        );
    }

    #[test]
    fn nan_zoom_bound_is_rejected() {
        let err = EngineConfig::from_toml_str("[viewport]\nmax_zoom = nan\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid { field: "viewport.max_zoom", .. }),
            "{err}"
        );
        let err = EngineConfig::from_toml_str("[viewport]\nmin_zoom = nan\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "viewport.min_zoom", .. }));
    }

    #[test]
    fn zero_step_is_rejected() {
        let err = EngineConfig::from_toml_str("[placement]\nstep = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "placement.step", .. }));
    }

    #[test]
    fn syntax_errors_surface_as_parse() {
        let err = EngineConfig::from_toml_str("[placement\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
