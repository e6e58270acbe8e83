//! Configuration for read-status indicators, loaded from TOML.
//!
//! Every field is optional; omitted fields fall back to the defaults of
//! [`ReadStatusStyle`], [`DEFAULT_LAYOUT_CACHE_CAPACITY`] and
//! [`DEFAULT_ANIMATION_DURATION`].
//!
//! ```toml
//! text_color = "#7a7a7a"
//! layout_cache_capacity = 512
//! animation_duration_ms = 330
//!
//! [font]
//! family = "regular"
//! glyph_width = 1
//! line_height = 1
//!
//! [insets]
//! left = 1
//! right = 1
//! ```

use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;

use crate::layout::CellTextMeasurer;
use crate::layout::DEFAULT_LAYOUT_CACHE_CAPACITY;
use crate::layout::ReadStatusLayoutEngine;
use crate::style::Font;
use crate::style::Insets;
use crate::style::ReadStatusStyle;

pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(330);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("invalid text_color `{0}`")]
    InvalidColor(String),

    #[error("font glyph_width and line_height must be greater than zero")]
    ZeroFontMetric,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FontToml {
    pub family: Option<String>,
    pub glyph_width: Option<u16>,
    pub line_height: Option<u16>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct InsetsToml {
    pub top: Option<u16>,
    pub left: Option<u16>,
    pub bottom: Option<u16>,
    pub right: Option<u16>,
}

/// On-disk shape of the configuration.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ReadStatusConfigToml {
    pub font: Option<FontToml>,
    pub text_color: Option<String>,
    pub insets: Option<InsetsToml>,
    /// `0` disables eviction.
    pub layout_cache_capacity: Option<usize>,
    pub animation_duration_ms: Option<u64>,
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadStatusConfig {
    pub style: Arc<ReadStatusStyle>,
    pub layout_cache_capacity: usize,
    pub animation_duration: Duration,
}

impl Default for ReadStatusConfig {
    fn default() -> Self {
        Self {
            style: Arc::new(ReadStatusStyle::default()),
            layout_cache_capacity: DEFAULT_LAYOUT_CACHE_CAPACITY,
            animation_duration: DEFAULT_ANIMATION_DURATION,
        }
    }
}

impl ReadStatusConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let toml: ReadStatusConfigToml =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml(toml)
    }

    pub fn from_toml(toml: ReadStatusConfigToml) -> Result<Self, ConfigError> {
        let defaults = ReadStatusStyle::default();

        let font = match toml.font {
            Some(font) => {
                let resolved = Font::new(
                    font.family.unwrap_or(defaults.font.family),
                    font.glyph_width.unwrap_or(defaults.font.glyph_width),
                    font.line_height.unwrap_or(defaults.font.line_height),
                );
                if resolved.glyph_width == 0 || resolved.line_height == 0 {
                    return Err(ConfigError::ZeroFontMetric);
                }
                resolved
            }
            None => defaults.font,
        };

        let text_color = match toml.text_color {
            Some(value) => {
                Color::from_str(&value).map_err(|_| ConfigError::InvalidColor(value.clone()))?
            }
            None => defaults.text_color,
        };

        let insets = toml.insets.map_or(defaults.insets, |insets| {
            Insets::new(
                insets.top.unwrap_or_default(),
                insets.left.unwrap_or_default(),
                insets.bottom.unwrap_or_default(),
                insets.right.unwrap_or_default(),
            )
        });

        Ok(Self {
            style: Arc::new(ReadStatusStyle {
                font,
                text_color,
                insets,
            }),
            layout_cache_capacity: toml
                .layout_cache_capacity
                .unwrap_or(DEFAULT_LAYOUT_CACHE_CAPACITY),
            animation_duration: toml
                .animation_duration_ms
                .map_or(DEFAULT_ANIMATION_DURATION, Duration::from_millis),
        })
    }

    /// Engine using the default cell measurer and the configured cache bound.
    pub fn layout_engine(&self) -> Arc<ReadStatusLayoutEngine> {
        Arc::new(ReadStatusLayoutEngine::new(
            Arc::new(CellTextMeasurer),
            self.layout_cache_capacity,
        ))
    }
}

impl FromStr for ReadStatusConfig {
    type Err = ConfigError;

    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        Self::from_toml(toml::from_str(contents)?)
    }
}
