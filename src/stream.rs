pub mod accumulator;
pub mod analyzer;
pub mod annotation;
pub mod classifier;
pub mod folding;
pub mod options;
pub mod state;

pub use accumulator::SegmentAccumulator;
pub use analyzer::{AnnotatedLine, DocumentAnalysis, PlaylistAnalyzer};
pub use annotation::{ColorKey, FoldingRange, SegmentAnnotation};
pub use classifier::{ClassifiedLine, LineClassifier, LineKind};
pub use folding::folding_ranges;
pub use options::{ColorPalette, DisplayOptions};
pub use state::{RunningClock, SegmentState};
