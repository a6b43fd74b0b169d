use serde::Serialize;
use std::sync::Arc;

use super::{
    accumulator::SegmentAccumulator,
    annotation::{FoldingRange, SegmentAnnotation},
    classifier::{ClassifiedLine, LineClassifier, LineKind},
    folding::folding_ranges,
    options::{ColorPalette, DisplayOptions},
};
use crate::tags::TagRegistry;

/// A classified line together with the segment that owns it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedLine {
    pub line_index: usize,
    pub kind: LineKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<u64>,
}

/// Result of one full pass over a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentAnalysis {
    pub annotations: Vec<SegmentAnnotation>,
    pub folding_ranges: Vec<FoldingRange>,
    pub lines: Vec<AnnotatedLine>,
}

impl DocumentAnalysis {
    /// Segment annotation covering a line, if any.
    pub fn segment_at(&self, line_index: usize) -> Option<&SegmentAnnotation> {
        let ordinal = self.lines.get(line_index)?.segment?;
        self.annotations.iter().find(|a| a.ordinal == ordinal)
    }
}

/// Owns the registry and display configuration; analyses are pure
/// functions of the text snapshot passed in.
#[derive(Debug, Clone)]
pub struct PlaylistAnalyzer {
    registry: Arc<TagRegistry>,
    options: DisplayOptions,
    palette: ColorPalette,
}

impl PlaylistAnalyzer {
    pub fn new(registry: Arc<TagRegistry>, options: DisplayOptions) -> Self {
        let palette = ColorPalette::from_options(&options);
        Self {
            registry,
            options,
            palette,
        }
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    /// Replace the display options and rebuild the derived color table.
    pub fn reconfigure(&mut self, options: DisplayOptions) {
        self.palette = ColorPalette::from_options(&options);
        self.options = options;
    }

    /// Same registry, different display options.
    pub fn with_options(&self, options: DisplayOptions) -> Self {
        Self::new(Arc::clone(&self.registry), options)
    }

    /// Run a complete pass over the document text.
    pub fn analyze(&self, text: &str) -> DocumentAnalysis {
        let classified = LineClassifier::classify_document(text);
        self.analyze_lines(&classified)
    }

    pub fn analyze_lines(&self, classified: &[ClassifiedLine]) -> DocumentAnalysis {
        let annotations =
            SegmentAccumulator::run(classified, &self.registry, &self.options, &self.palette);
        let folding_ranges = folding_ranges(classified, &self.registry);

        let mut owners = annotations.iter().peekable();
        let lines = classified
            .iter()
            .map(|line| {
                while owners
                    .peek()
                    .is_some_and(|a| a.line_range.1 < line.line_index)
                {
                    owners.next();
                }
                let segment = owners
                    .peek()
                    .filter(|a| a.contains_line(line.line_index))
                    .map(|a| a.ordinal);

                AnnotatedLine {
                    line_index: line.line_index,
                    kind: line.kind,
                    tag_name: line.tag_name.clone(),
                    segment,
                }
            })
            .collect();

        tracing::debug!(
            "Analyzed {} lines: {} segments, {} folding ranges",
            classified.len(),
            annotations.len(),
            folding_ranges.len()
        );

        DocumentAnalysis {
            annotations,
            folding_ranges,
            lines,
        }
    }
}

impl Default for PlaylistAnalyzer {
    fn default() -> Self {
        Self::new(Arc::new(TagRegistry::builtin()), DisplayOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYLIST: &str = "\
#EXTM3U
#EXT-X-TARGETDURATION:6
#EXTINF:6,
a.ts

#EXT-X-KEY:METHOD=NONE
#EXTINF:6,
b.ts
#EXT-X-ENDLIST";

    #[test]
    fn test_lines_know_their_segment() {
        let analysis = PlaylistAnalyzer::default().analyze(PLAYLIST);
        let owners: Vec<_> = analysis.lines.iter().map(|l| l.segment).collect();
        assert_eq!(
            owners,
            vec![None, None, Some(1), Some(1), None, Some(2), Some(2), Some(2), None]
        );
        assert_eq!(analysis.segment_at(6).map(|a| a.ordinal), Some(2));
        assert!(analysis.segment_at(0).is_none());
    }

    #[test]
    fn test_annotation_count_matches_opened_segments() {
        let analysis = PlaylistAnalyzer::default().analyze(PLAYLIST);
        assert_eq!(analysis.annotations.len(), 2);
        assert_eq!(analysis.folding_ranges.len(), 2);
    }

    #[test]
    fn test_reconfigure_changes_labels_and_colors() {
        let mut analyzer = PlaylistAnalyzer::default();
        analyzer.reconfigure(
            DisplayOptions {
                show_durations: false,
                ..DisplayOptions::default()
            }
            .with_tag_color("EXT-X-KEY", "purple"),
        );

        let analysis = analyzer.analyze(PLAYLIST);
        assert_eq!(analysis.annotations[0].inline_label, "#1");
        assert_eq!(analysis.annotations[1].color, "purple");
    }

    #[test]
    fn test_repeated_analysis_is_identical() {
        let analyzer = PlaylistAnalyzer::default();
        let first = serde_json::to_string(&analyzer.analyze(PLAYLIST)).unwrap();
        let second = serde_json::to_string(&analyzer.analyze(PLAYLIST)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_document() {
        let analysis = PlaylistAnalyzer::default().analyze("");
        assert!(analysis.annotations.is_empty());
        assert!(analysis.folding_ranges.is_empty());
        assert!(analysis.lines.is_empty());
    }
}
