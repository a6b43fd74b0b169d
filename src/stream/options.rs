use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path};

use super::annotation::ColorKey;
use crate::{Error, Result};

/// Tags that get a color band even without an explicit mapping.
const SPECIAL_TAG_COLORS: &[(&str, &str)] = &[
    ("EXT-X-DISCONTINUITY", "rgba(255, 166, 0, 0.25)"),
    ("EXT-X-GAP", "rgba(255, 64, 64, 0.25)"),
];

/// Display options for segment annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub show_segment_numbers: bool,
    pub show_durations: bool,
    pub show_timestamps: bool,

    /// Joins the label components.
    pub separator: String,

    /// Explicit tag name to color mappings.
    pub tag_colors: HashMap<String, String>,

    pub odd_color: String,
    pub even_color: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_segment_numbers: true,
            show_durations: true,
            show_timestamps: true,
            separator: " | ".to_string(),
            tag_colors: HashMap::new(),
            odd_color: "rgba(128, 128, 128, 0.08)".to_string(),
            even_color: "rgba(128, 128, 128, 0.16)".to_string(),
        }
    }
}

impl DisplayOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidRequest(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Internal(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn with_tag_color(mut self, tag: &str, color: &str) -> Self {
        self.tag_colors.insert(tag.to_string(), color.to_string());
        self
    }
}

/// Color table derived from [`DisplayOptions`]; rebuilt whenever they change.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    explicit: HashMap<String, String>,
    special: HashMap<String, String>,
    odd: String,
    even: String,
}

impl ColorPalette {
    pub fn from_options(options: &DisplayOptions) -> Self {
        Self {
            explicit: options.tag_colors.clone(),
            special: SPECIAL_TAG_COLORS
                .iter()
                .map(|(tag, color)| (tag.to_string(), color.to_string()))
                .collect(),
            odd: options.odd_color.clone(),
            even: options.even_color.clone(),
        }
    }

    /// Pick the color band for a segment.
    ///
    /// The first tag (in first-seen order) with an explicit mapping wins,
    /// then the first built-in special tag, then odd/even by ordinal.
    pub fn color_key(&self, tags_seen: &[String], ordinal: u64) -> ColorKey {
        let matched = tags_seen
            .iter()
            .find(|tag| self.explicit.contains_key(tag.as_str()))
            .or_else(|| {
                tags_seen
                    .iter()
                    .find(|tag| self.special.contains_key(tag.as_str()))
            });

        match matched {
            Some(tag) => ColorKey::Tag(tag.clone()),
            None if ordinal % 2 == 1 => ColorKey::Odd,
            None => ColorKey::Even,
        }
    }

    pub fn color(&self, key: &ColorKey) -> &str {
        match key {
            ColorKey::Tag(tag) => self
                .explicit
                .get(tag)
                .or_else(|| self.special.get(tag))
                .map(String::as_str)
                .unwrap_or(self.odd.as_str()),
            ColorKey::Odd => self.odd.as_str(),
            ColorKey::Even => self.even.as_str(),
        }
    }
}
