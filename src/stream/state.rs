use crate::hls::{timestamp, ProgramDateTime};

/// A segment that has been opened but not yet finalized.
#[derive(Debug, Clone)]
pub struct SegmentState {
    /// 1-based, assigned when the segment opens.
    pub ordinal: u64,

    /// Tag names in first-seen order, without duplicates.
    pub tags_seen: Vec<String>,

    pub duration_seconds: f64,

    pub explicit_program_date_time: Option<ProgramDateTime>,

    /// Indices of the lines recorded for this segment, in document order.
    pub lines: Vec<usize>,
}

impl SegmentState {
    pub fn new(ordinal: u64) -> Self {
        Self {
            ordinal,
            tags_seen: Vec::new(),
            duration_seconds: 0.0,
            explicit_program_date_time: None,
            lines: Vec::new(),
        }
    }

    pub fn record_tag(&mut self, tag: &str) {
        if !self.has_tag(tag) {
            self.tags_seen.push(tag.to_string());
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags_seen.iter().any(|t| t == tag)
    }

    pub fn record_line(&mut self, line_index: usize) {
        self.lines.push(line_index);
    }

    /// First and last recorded line.
    pub fn line_range(&self) -> Option<(usize, usize)> {
        Some((*self.lines.first()?, *self.lines.last()?))
    }
}

/// Timing carried across segments for a whole document.
#[derive(Debug, Clone, Default)]
pub struct RunningClock {
    pub cumulative_duration: f64,
    pub last_known_program_date_time: Option<ProgramDateTime>,
    pub last_segment_duration: f64,
}

impl RunningClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settle the wall-clock time of a segment that is being closed by a URI.
    ///
    /// An explicit time re-anchors the clock. Otherwise the last known time
    /// advances by the previous segment's duration.
    pub fn settle_timestamp(
        &mut self,
        explicit: Option<ProgramDateTime>,
    ) -> Option<ProgramDateTime> {
        let settled = match explicit {
            Some(ts) => Some(ts),
            None => self
                .last_known_program_date_time
                .map(|last| timestamp::advance(last, self.last_segment_duration)),
        };

        if settled.is_some() {
            self.last_known_program_date_time = settled;
        }
        settled
    }

    /// Add a finished segment's duration. Returns the total elapsed before it.
    pub fn accumulate(&mut self, duration_seconds: f64) -> f64 {
        let before = self.cumulative_duration;
        self.cumulative_duration += duration_seconds;
        self.last_segment_duration = duration_seconds;
        before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hls::timestamp::{format_timestamp, parse_program_date_time};

    #[test]
    fn test_tags_seen_is_a_set() {
        let mut state = SegmentState::new(1);
        state.record_tag("EXT-X-DISCONTINUITY");
        state.record_tag("EXTINF");
        state.record_tag("EXT-X-DISCONTINUITY");
        assert_eq!(state.tags_seen, vec!["EXT-X-DISCONTINUITY", "EXTINF"]);
    }

    #[test]
    fn test_line_range() {
        let mut state = SegmentState::new(1);
        assert_eq!(state.line_range(), None);
        state.record_line(4);
        state.record_line(6);
        assert_eq!(state.line_range(), Some((4, 6)));
    }

    #[test]
    fn test_clock_advances_by_previous_duration() {
        let mut clock = RunningClock::new();
        let anchor = parse_program_date_time("2024-03-01T12:00:00Z").unwrap();

        assert_eq!(clock.settle_timestamp(Some(anchor)), Some(anchor));
        assert_eq!(clock.accumulate(4.0), 0.0);

        let second = clock.settle_timestamp(None).unwrap();
        assert_eq!(format_timestamp(&second), "2024-03-01 12:00:04.000");
        assert_eq!(clock.accumulate(6.0), 4.0);

        let third = clock.settle_timestamp(None).unwrap();
        assert_eq!(format_timestamp(&third), "2024-03-01 12:00:10.000");
    }

    #[test]
    fn test_clock_without_anchor() {
        let mut clock = RunningClock::new();
        assert_eq!(clock.settle_timestamp(None), None);
        clock.accumulate(4.0);
        assert_eq!(clock.settle_timestamp(None), None);
        assert_eq!(clock.cumulative_duration, 4.0);
    }
}
