pub mod config;
pub mod error;
pub mod hls;
pub mod hover;
pub mod proxy;
pub mod resolve;
pub mod server;
pub mod stream;
pub mod tags;

pub use error::Error;
pub use resolve::resolve;
pub use stream::{DocumentAnalysis, PlaylistAnalyzer};
pub use tags::TagRegistry;

pub type Result<T> = std::result::Result<T, Error>;
