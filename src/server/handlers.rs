pub mod analyze;
pub mod inspect;

pub use analyze::{handle_analyze, handle_analyze_text};
pub use inspect::{handle_hover, handle_resolve, handle_scte35, handle_tag};
