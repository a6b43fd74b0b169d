use serde::{Serialize, Serializer};

use super::options::DisplayOptions;
use crate::hls::{
    timestamp::{format_duration, format_timestamp},
    ProgramDateTime,
};

/// Color band a finalized segment belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColorKey {
    /// Selected by a tag present in the segment.
    Tag(String),
    Odd,
    Even,
}

impl ColorKey {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Tag(tag) => tag,
            Self::Odd => "odd",
            Self::Even => "even",
        }
    }
}

impl Serialize for ColorKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A finalized segment, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentAnnotation {
    pub ordinal: u64,

    /// First and last line of the segment, inclusive.
    pub line_range: (usize, usize),

    pub color_key: ColorKey,
    pub color: String,
    pub inline_label: String,

    pub tags_seen: Vec<String>,
    pub duration_seconds: f64,

    /// Total duration of all segments before this one.
    pub elapsed_seconds: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_date_time: Option<ProgramDateTime>,

    /// False when the segment was closed without a URI line.
    pub has_uri: bool,
}

impl SegmentAnnotation {
    pub fn contains_line(&self, line_index: usize) -> bool {
        (self.line_range.0..=self.line_range.1).contains(&line_index)
    }
}

/// A collapsible line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FoldingRange {
    pub start: usize,
    pub end: usize,
}

/// Compose the inline label for a segment from the enabled components.
pub fn format_label(
    options: &DisplayOptions,
    ordinal: u64,
    elapsed_seconds: f64,
    program_date_time: Option<&ProgramDateTime>,
) -> String {
    let mut parts = Vec::with_capacity(3);

    if options.show_segment_numbers {
        parts.push(format!("#{}", ordinal));
    }
    if options.show_durations
        && let Some(elapsed) = format_duration(elapsed_seconds)
    {
        parts.push(elapsed);
    }
    if options.show_timestamps
        && let Some(ts) = program_date_time
    {
        parts.push(format_timestamp(ts));
    }

    parts.join(&options.separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hls::timestamp::parse_program_date_time;

    #[test]
    fn test_label_all_components() {
        let ts = parse_program_date_time("2024-03-01T12:00:00Z").unwrap();
        let label = format_label(&DisplayOptions::default(), 3, 12.5, Some(&ts));
        assert_eq!(label, "#3 | 00:00:12.500 | 2024-03-01 12:00:00.000");
    }

    #[test]
    fn test_label_omits_missing_timestamp() {
        let label = format_label(&DisplayOptions::default(), 1, 0.0, None);
        assert_eq!(label, "#1 | 00:00:00.000");
    }

    #[test]
    fn test_label_skips_unrepresentable_duration() {
        let label = format_label(&DisplayOptions::default(), 2, 1e20, None);
        assert_eq!(label, "#2");
    }

    #[test]
    fn test_label_toggles() {
        let options = DisplayOptions {
            show_segment_numbers: false,
            show_durations: false,
            separator: " / ".into(),
            ..DisplayOptions::default()
        };
        let ts = parse_program_date_time("2024-03-01T12:00:00Z").unwrap();
        assert_eq!(
            format_label(&options, 7, 30.0, Some(&ts)),
            "2024-03-01 12:00:00.000"
        );

        let none = DisplayOptions {
            show_timestamps: false,
            ..options
        };
        assert_eq!(format_label(&none, 7, 30.0, Some(&ts)), "");
    }

    #[test]
    fn test_color_key_serializes_as_string() {
        assert_eq!(serde_json::to_string(&ColorKey::Odd).unwrap(), r#""odd""#);
        assert_eq!(
            serde_json::to_string(&ColorKey::Tag("EXT-X-GAP".into())).unwrap(),
            r#""EXT-X-GAP""#
        );
    }
}
