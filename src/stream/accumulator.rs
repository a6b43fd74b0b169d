use super::{
    annotation::{format_label, SegmentAnnotation},
    classifier::{ClassifiedLine, LineKind},
    options::{ColorPalette, DisplayOptions},
    state::{RunningClock, SegmentState},
};
use crate::{
    hls::{timestamp::parse_program_date_time, ProgramDateTime},
    tags::TagRegistry,
};

/// Walks classified lines in document order and groups them into segments.
///
/// The accumulator never fails: malformed input is skipped and an open
/// segment is always finalized by [`SegmentAccumulator::finish`].
pub struct SegmentAccumulator<'a> {
    registry: &'a TagRegistry,
    options: &'a DisplayOptions,
    palette: &'a ColorPalette,
    clock: RunningClock,
    current: Option<SegmentState>,
    last_ordinal: u64,
    annotations: Vec<SegmentAnnotation>,
}

impl<'a> SegmentAccumulator<'a> {
    pub fn new(
        registry: &'a TagRegistry,
        options: &'a DisplayOptions,
        palette: &'a ColorPalette,
    ) -> Self {
        Self {
            registry,
            options,
            palette,
            clock: RunningClock::new(),
            current: None,
            last_ordinal: 0,
            annotations: Vec::new(),
        }
    }

    /// Run a whole document through a fresh accumulator.
    pub fn run(
        lines: &[ClassifiedLine],
        registry: &'a TagRegistry,
        options: &'a DisplayOptions,
        palette: &'a ColorPalette,
    ) -> Vec<SegmentAnnotation> {
        let mut accumulator = Self::new(registry, options, palette);
        for line in lines {
            accumulator.process_line(line);
        }
        accumulator.finish()
    }

    /// Feed the next line.
    pub fn process_line(&mut self, line: &ClassifiedLine) {
        match line.kind {
            LineKind::Blank | LineKind::Comment => {}
            LineKind::Tag => {
                if let Some(tag) = line.tag() {
                    self.process_tag(tag, line);
                }
            }
            LineKind::Uri => self.process_uri(line),
        }
    }

    /// Finalize any open segment and return all annotations in order.
    pub fn finish(mut self) -> Vec<SegmentAnnotation> {
        if let Some(segment) = self.current.take() {
            self.finalize_unterminated(segment);
        }
        self.annotations
    }

    fn process_tag(&mut self, tag: &str, line: &ClassifiedLine) {
        if self.registry.is_header_or_multivariant_tag(tag) {
            if let Some(segment) = self.current.take() {
                self.finalize_unterminated(segment);
            }
            return;
        }

        if !self.registry.is_segment_tag(tag) {
            return;
        }

        let last_ordinal = &mut self.last_ordinal;
        let segment = self.current.get_or_insert_with(|| {
            *last_ordinal += 1;
            SegmentState::new(*last_ordinal)
        });

        segment.record_tag(tag);
        segment.record_line(line.line_index);

        if let Some(duration) = line.duration() {
            segment.duration_seconds = duration;
        }

        if let Some(ts) = line.program_date_time().and_then(parse_program_date_time) {
            segment.explicit_program_date_time = Some(ts);
        }
    }

    fn process_uri(&mut self, line: &ClassifiedLine) {
        let Some(mut segment) = self.current.take() else {
            tracing::trace!("URI without open segment at line {}", line.line_index);
            return;
        };

        segment.record_line(line.line_index);

        let program_date_time = self
            .clock
            .settle_timestamp(segment.explicit_program_date_time);
        let elapsed = self.clock.accumulate(segment.duration_seconds);

        self.finalize(segment, elapsed, program_date_time, true);
    }

    /// Close a segment that never reached its URI line.
    ///
    /// The running clock is left untouched; only an explicit time is shown.
    fn finalize_unterminated(&mut self, segment: SegmentState) {
        let elapsed = self.clock.cumulative_duration;
        let program_date_time = segment.explicit_program_date_time;
        self.finalize(segment, elapsed, program_date_time, false);
    }

    fn finalize(
        &mut self,
        segment: SegmentState,
        elapsed_seconds: f64,
        program_date_time: Option<ProgramDateTime>,
        has_uri: bool,
    ) {
        let Some(line_range) = segment.line_range() else {
            return;
        };

        let color_key = self.palette.color_key(&segment.tags_seen, segment.ordinal);
        let color = self.palette.color(&color_key).to_string();
        let inline_label = format_label(
            self.options,
            segment.ordinal,
            elapsed_seconds,
            program_date_time.as_ref(),
        );

        self.annotations.push(SegmentAnnotation {
            ordinal: segment.ordinal,
            line_range,
            color_key,
            color,
            inline_label,
            tags_seen: segment.tags_seen,
            duration_seconds: segment.duration_seconds,
            elapsed_seconds,
            program_date_time,
            has_uri,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{annotation::ColorKey, classifier::LineClassifier};

    fn run_with(text: &str, registry: &TagRegistry, options: &DisplayOptions) -> Vec<SegmentAnnotation> {
        let lines = LineClassifier::classify_document(text);
        let palette = ColorPalette::from_options(options);
        SegmentAccumulator::run(&lines, registry, options, &palette)
    }

    fn run(text: &str) -> Vec<SegmentAnnotation> {
        run_with(text, &TagRegistry::builtin(), &DisplayOptions::default())
    }

    const MEDIA_PLAYLIST: &str = "\
#EXTM3U
#EXT-X-VERSION:3
#EXT-X-TARGETDURATION:6
#EXT-X-PROGRAM-DATE-TIME:2024-03-01T12:00:00.000Z
#EXTINF:4.0,
seg1.ts
#EXTINF:6.0,
seg2.ts
# operator note
#EXT-X-DISCONTINUITY
#EXTINF:5.5,
seg3.ts
#EXT-X-ENDLIST";

    #[test]
    fn test_single_segment() {
        let annotations = run("#EXT-X-DISCONTINUITY\n#EXTINF:5.0,\nseg1.ts");
        assert_eq!(annotations.len(), 1);

        let seg = &annotations[0];
        assert_eq!(seg.ordinal, 1);
        assert_eq!(seg.line_range, (0, 2));
        assert_eq!(seg.tags_seen, vec!["EXT-X-DISCONTINUITY", "EXTINF"]);
        assert_eq!(seg.duration_seconds, 5.0);
        assert!(seg.has_uri);
    }

    #[test]
    fn test_media_playlist_fixture() {
        let annotations = run(MEDIA_PLAYLIST);
        assert_eq!(annotations.len(), 3);

        let ordinals: Vec<_> = annotations.iter().map(|a| a.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3]);

        assert_eq!(annotations[0].line_range, (3, 5));
        assert_eq!(annotations[1].line_range, (6, 7));
        assert_eq!(annotations[2].line_range, (9, 11));

        // Displayed running total excludes the segment's own duration
        assert_eq!(annotations[0].elapsed_seconds, 0.0);
        assert_eq!(annotations[1].elapsed_seconds, 4.0);
        assert_eq!(annotations[2].elapsed_seconds, 10.0);

        assert_eq!(
            annotations[0].inline_label,
            "#1 | 00:00:00.000 | 2024-03-01 12:00:00.000"
        );
        assert_eq!(
            annotations[1].inline_label,
            "#2 | 00:00:04.000 | 2024-03-01 12:00:04.000"
        );
        assert_eq!(
            annotations[2].inline_label,
            "#3 | 00:00:10.000 | 2024-03-01 12:00:10.000"
        );
    }

    #[test]
    fn test_colors_alternate_and_discontinuity_is_special() {
        let annotations = run(MEDIA_PLAYLIST);
        assert_eq!(annotations[0].color_key, ColorKey::Odd);
        assert_eq!(annotations[1].color_key, ColorKey::Even);
        assert_eq!(
            annotations[2].color_key,
            ColorKey::Tag("EXT-X-DISCONTINUITY".into())
        );
    }

    #[test]
    fn test_explicit_timestamp_reanchors_clock() {
        let text = "\
#EXT-X-PROGRAM-DATE-TIME:2024-03-01T12:00:00Z
#EXTINF:4,
a.ts
#EXT-X-PROGRAM-DATE-TIME:2024-03-01T13:00:00Z
#EXTINF:4,
b.ts
#EXTINF:4,
c.ts";
        let annotations = run(text);
        let times: Vec<_> = annotations
            .iter()
            .map(|a| a.program_date_time.unwrap().to_rfc3339())
            .collect();
        assert_eq!(
            times,
            vec![
                "2024-03-01T12:00:00+00:00",
                "2024-03-01T13:00:00+00:00",
                "2024-03-01T13:00:04+00:00"
            ]
        );
    }

    #[test]
    fn test_no_timestamp_without_anchor() {
        let annotations = run("#EXTINF:4,\na.ts\n#EXTINF:4,\nb.ts");
        assert!(annotations.iter().all(|a| a.program_date_time.is_none()));
        assert_eq!(annotations[1].inline_label, "#2 | 00:00:04.000");
    }

    #[test]
    fn test_multivariant_entries_are_not_segments() {
        let text = "\
#EXTM3U
#EXT-X-STREAM-INF:BANDWIDTH=1280000,RESOLUTION=640x360
low/index.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=2560000,RESOLUTION=1280x720
mid/index.m3u8";
        assert!(run(text).is_empty());
    }

    #[test]
    fn test_uri_without_segment_is_ignored() {
        let annotations = run("#EXTM3U\norphan.ts\n#EXTINF:2,\na.ts");
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].line_range, (2, 3));
    }

    #[test]
    fn test_unterminated_trailing_segment_is_finalized() {
        let annotations = run("#EXTINF:2,\na.ts\n#EXT-X-DISCONTINUITY\n#EXTINF:3,");
        assert_eq!(annotations.len(), 2);

        let last = &annotations[1];
        assert_eq!(last.ordinal, 2);
        assert_eq!(last.line_range, (2, 3));
        assert_eq!(last.duration_seconds, 3.0);
        assert_eq!(last.elapsed_seconds, 2.0);
        assert!(!last.has_uri);
    }

    #[test]
    fn test_header_tag_closes_open_segment() {
        let text = "#EXTINF:2,\n#EXT-X-TARGETDURATION:6\n#EXTINF:3,\nb.ts";
        let annotations = run(text);
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].line_range, (0, 0));
        assert!(!annotations[0].has_uri);
        assert_eq!(annotations[1].ordinal, 2);
        assert_eq!(annotations[1].line_range, (2, 3));
        assert_eq!(annotations[1].elapsed_seconds, 0.0);
    }

    #[test]
    fn test_footer_tag_inside_open_segment() {
        let annotations = run("#EXTINF:2,\n#EXT-X-ENDLIST\na.ts");
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].line_range, (0, 2));
        assert_eq!(annotations[0].tags_seen, vec!["EXTINF"]);
        assert!(annotations[0].has_uri);
    }

    #[test]
    fn test_huge_duration_drops_elapsed_component() {
        let annotations = run("#EXTINF:99999999999999999999,\na.ts\n#EXTINF:1,\nb.ts");
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[1].inline_label, "#2");
    }

    #[test]
    fn test_unknown_tags_open_segments() {
        let annotations = run("#EXT-X-ACME-AD:id=1\n#EXTINF:2,\na.ts");
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].tags_seen, vec!["EXT-X-ACME-AD", "EXTINF"]);
    }

    #[test]
    fn test_unrecognized_tag_syntax_does_not_open_segment() {
        let annotations = run("#not a tag\nloose.ts");
        assert!(annotations.is_empty());
    }

    #[test]
    fn test_repeated_duration_last_wins() {
        let annotations = run("#EXTINF:2,\n#EXTINF:7,\na.ts");
        assert_eq!(annotations[0].duration_seconds, 7.0);
        assert_eq!(annotations[0].tags_seen, vec!["EXTINF"]);
    }

    #[test]
    fn test_explicit_color_mapping_wins_over_discontinuity() {
        let options = DisplayOptions::default().with_tag_color("EXT-X-CUE-OUT", "green");
        let text = "#EXT-X-DISCONTINUITY\n#EXT-X-CUE-OUT:30\n#EXTINF:2,\na.ts";
        let annotations = run_with(text, &TagRegistry::builtin(), &options);
        assert_eq!(annotations[0].color_key, ColorKey::Tag("EXT-X-CUE-OUT".into()));
        assert_eq!(annotations[0].color, "green");
    }

    #[test]
    fn test_empty_registry_treats_everything_as_segment() {
        let annotations = run_with(
            "#EXTM3U\n#EXTINF:2,\na.ts",
            &TagRegistry::empty(),
            &DisplayOptions::default(),
        );
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].tags_seen, vec!["EXTM3U", "EXTINF"]);
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(run(MEDIA_PLAYLIST), run(MEDIA_PLAYLIST));
    }
}
