use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static TAG_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#((?:EXT-)?(?:X-)?[A-Z0-9-]+)(?::|$)").expect("valid tag name pattern")
});

static DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#EXTINF:([0-9.]+)").expect("valid duration pattern"));

static PROGRAM_DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#EXT-X-PROGRAM-DATE-TIME:(.+)").expect("valid program date time pattern")
});

/// Structural kind of a playlist line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Blank,
    Comment,
    Tag,
    Uri,
}

/// One physical line of playlist text with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedLine {
    pub line_index: usize,
    pub kind: LineKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    pub raw_text: String,
}

impl ClassifiedLine {
    pub fn tag(&self) -> Option<&str> {
        self.tag_name.as_deref()
    }

    /// Seconds from an `#EXTINF` line, if this is one.
    pub fn duration(&self) -> Option<f64> {
        if self.tag() != Some("EXTINF") {
            return None;
        }
        LineClassifier::duration(&self.raw_text)
    }

    /// Raw timestamp text from an `#EXT-X-PROGRAM-DATE-TIME` line.
    pub fn program_date_time(&self) -> Option<&str> {
        if self.tag() != Some("EXT-X-PROGRAM-DATE-TIME") {
            return None;
        }
        LineClassifier::program_date_time(&self.raw_text)
    }
}

/// Classifier for playlist lines.
pub struct LineClassifier;

impl LineClassifier {
    /// Classify a single line. Never fails.
    pub fn classify(line_index: usize, raw_text: &str) -> ClassifiedLine {
        let kind = Self::kind(raw_text);
        let tag_name = match kind {
            LineKind::Tag => Self::tag_name(raw_text).map(str::to_string),
            _ => None,
        };

        ClassifiedLine {
            line_index,
            kind,
            tag_name,
            raw_text: raw_text.to_string(),
        }
    }

    /// Classify every line of a document in order.
    pub fn classify_document(text: &str) -> Vec<ClassifiedLine> {
        text.lines()
            .enumerate()
            .map(|(i, line)| Self::classify(i, line))
            .collect()
    }

    pub fn kind(raw_text: &str) -> LineKind {
        let trimmed = raw_text.trim();

        if trimmed.is_empty() {
            LineKind::Blank
        } else if raw_text.starts_with("# ") {
            LineKind::Comment
        } else if trimmed.starts_with('#') {
            LineKind::Tag
        } else {
            LineKind::Uri
        }
    }

    /// Canonical tag identifier (`EXTINF`, `EXT-X-KEY`, ...) of a tag line.
    pub fn tag_name(raw_text: &str) -> Option<&str> {
        TAG_NAME
            .captures(raw_text.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    pub fn duration(raw_text: &str) -> Option<f64> {
        DURATION
            .captures(raw_text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    pub fn program_date_time(raw_text: &str) -> Option<&str> {
        PROGRAM_DATE_TIME
            .captures(raw_text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
    }
}
