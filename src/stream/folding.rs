use super::{
    annotation::FoldingRange,
    classifier::{ClassifiedLine, LineKind},
};
use crate::tags::TagRegistry;

/// Derive collapsible ranges, one per segment spanning at least two lines.
///
/// Uses the same open/close rules as the segment accumulator but ignores
/// timing and tags. A range closed by a header or multivariant tag ends on
/// the line before it; a range closed by a URI ends on the URI. Ranges still
/// open at the end of the document are dropped.
pub fn folding_ranges(lines: &[ClassifiedLine], registry: &TagRegistry) -> Vec<FoldingRange> {
    let mut ranges = Vec::new();
    let mut open_since: Option<usize> = None;

    let mut close = |start: usize, end: usize| {
        if start < end {
            ranges.push(FoldingRange { start, end });
        }
    };

    for line in lines {
        let i = line.line_index;
        match line.kind {
            LineKind::Blank | LineKind::Comment => {}
            LineKind::Tag => {
                let Some(tag) = line.tag() else {
                    continue;
                };

                if registry.is_header_or_multivariant_tag(tag) {
                    if let Some(start) = open_since.take() {
                        close(start, i.saturating_sub(1));
                    }
                } else if registry.is_segment_tag(tag) && open_since.is_none() {
                    open_since = Some(i);
                }
            }
            LineKind::Uri => {
                if let Some(start) = open_since.take() {
                    close(start, i);
                }
            }
        }
    }

    ranges
}
