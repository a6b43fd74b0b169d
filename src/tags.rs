pub mod builtin;
pub mod definition;
pub mod registry;

pub use definition::{Scte35Encoding, TagContext, TagDefinition};
pub use registry::TagRegistry;
