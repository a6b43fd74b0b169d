pub mod client;
pub mod headers;

pub use client::{PlaylistClient, DEFAULT_MAX_PLAYLIST_BYTES};
pub use headers::HeaderCodec;
