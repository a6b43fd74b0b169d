pub mod attributes;
pub mod scte35;
pub mod timestamp;

pub use scte35::{Scte35Cue, SpliceCommandType, SpliceInfoSection};
pub use timestamp::ProgramDateTime;
