use serde::Deserialize;

use crate::stream::DisplayOptions;

/// Query parameters for `GET /analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    /// URL of the playlist to fetch.
    pub url: String,

    /// Base64url-encoded JSON headers for the fetch.
    #[serde(default)]
    pub h: Option<String>,

    /// HMAC-SHA256 signature of the URL (hex encoded).
    /// Required when HLSLENS_SIGNING_KEY is set.
    #[serde(default)]
    pub sig: Option<String>,

    #[serde(default)]
    pub numbers: Option<bool>,
    #[serde(default)]
    pub durations: Option<bool>,
    #[serde(default)]
    pub timestamps: Option<bool>,
}

impl AnalyzeParams {
    pub fn apply(&self, options: &DisplayOptions) -> DisplayOptions {
        apply_toggles(options, self.numbers, self.durations, self.timestamps)
    }
}

/// Query parameters for `POST /analyze`; the playlist is the request body.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeTextParams {
    /// URI the body was loaded from, used for link resolution.
    #[serde(default)]
    pub base: Option<String>,

    #[serde(default)]
    pub numbers: Option<bool>,
    #[serde(default)]
    pub durations: Option<bool>,
    #[serde(default)]
    pub timestamps: Option<bool>,
}

impl AnalyzeTextParams {
    pub fn apply(&self, options: &DisplayOptions) -> DisplayOptions {
        apply_toggles(options, self.numbers, self.durations, self.timestamps)
    }
}

/// Query parameters for `GET /hover`.
#[derive(Debug, Deserialize)]
pub struct HoverParams {
    pub url: String,

    /// Zero-based line index.
    pub line: usize,

    #[serde(default)]
    pub h: Option<String>,

    #[serde(default)]
    pub sig: Option<String>,
}

/// Query parameters for `GET /resolve`.
#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    pub uri: String,
    pub base: String,
}

/// Query parameters for `GET /scte35`.
#[derive(Debug, Deserialize)]
pub struct Scte35Params {
    pub payload: String,

    /// `base64` (default) or `hex`.
    #[serde(default)]
    pub encoding: Option<String>,
}

fn apply_toggles(
    options: &DisplayOptions,
    numbers: Option<bool>,
    durations: Option<bool>,
    timestamps: Option<bool>,
) -> DisplayOptions {
    DisplayOptions {
        show_segment_numbers: numbers.unwrap_or(options.show_segment_numbers),
        show_durations: durations.unwrap_or(options.show_durations),
        show_timestamps: timestamps.unwrap_or(options.show_timestamps),
        ..options.clone()
    }
}
