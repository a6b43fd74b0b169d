//! Inspection data for a single playlist line.

use serde::Serialize;

use crate::{
    hls::Scte35Cue,
    resolve::{resolve, tag_uri},
    stream::{DocumentAnalysis, LineClassifier, LineKind, PlaylistAnalyzer, SegmentAnnotation},
    tags::TagDefinition,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagInfo {
    pub name: String,
    /// `None` for tags unknown to the registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<TagDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverInfo {
    pub line_index: usize,
    pub kind: LineKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<TagInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<SegmentAnnotation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_uri: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scte35: Option<Scte35Cue>,

    /// Set when the line carries a cue that could not be decoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scte35_error: Option<String>,
}

impl HoverInfo {
    /// Build hover data for `line_index` of `text`.
    ///
    /// Returns `None` when the line does not exist.
    pub fn for_line(
        analyzer: &PlaylistAnalyzer,
        text: &str,
        line_index: usize,
        base: Option<&str>,
    ) -> Option<Self> {
        let analysis = analyzer.analyze(text);
        let raw = text.lines().nth(line_index)?;
        Some(Self::from_analysis(analyzer, &analysis, raw, line_index, base))
    }

    /// Build hover data from an analysis that has already been computed.
    pub fn from_analysis(
        analyzer: &PlaylistAnalyzer,
        analysis: &DocumentAnalysis,
        raw: &str,
        line_index: usize,
        base: Option<&str>,
    ) -> Self {
        let line = LineClassifier::classify(line_index, raw);
        let registry = analyzer.registry();

        let mut info = Self {
            line_index,
            kind: line.kind,
            tag: None,
            segment: analysis.segment_at(line_index).cloned(),
            resolved_uri: None,
            scte35: None,
            scte35_error: None,
        };

        let uri = match line.kind {
            LineKind::Uri => Some(raw.trim()),
            LineKind::Tag => tag_uri(raw),
            LineKind::Blank | LineKind::Comment => None,
        };
        if let (Some(uri), Some(base)) = (uri, base) {
            info.resolved_uri = Some(resolve(uri, base));
        }

        if let Some(name) = line.tag() {
            let definition = registry.get(name).cloned();

            if let Some(encoding) = definition.as_ref().and_then(|d| d.scte35_encoding) {
                match Scte35Cue::from_tag_line(raw, encoding) {
                    Ok(cue) => info.scte35 = cue,
                    Err(e) => info.scte35_error = Some(e.to_string()),
                }
            }

            info.tag = Some(TagInfo {
                name: name.to_string(),
                definition,
            });
        }

        info
    }
}
