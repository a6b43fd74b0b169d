use serde::Serialize;
use url::Url;

use crate::{
    hls::attributes::{parse_attributes, tag_value},
    stream::{ClassifiedLine, LineKind},
};

/// A navigable reference found in a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentLink {
    pub line_index: usize,
    /// The reference as written.
    pub uri: String,
    pub target: String,
}

/// Resolve a media URI as it appears in a playlist against the playlist URI.
///
/// Absolute URIs are returned unchanged. Everything else follows RFC 3986
/// reference resolution, so root-relative paths replace the whole path of
/// `base`. Any parse failure, or a base that cannot carry a path, yields
/// `candidate` as given.
pub fn resolve(candidate: &str, base: &str) -> String {
    try_resolve(candidate, base).unwrap_or_else(|| candidate.to_string())
}

fn try_resolve(candidate: &str, base: &str) -> Option<String> {
    let candidate = candidate.trim();

    if Url::parse(candidate).is_ok() {
        return Some(candidate.to_string());
    }

    let base = Url::parse(base.trim()).ok()?;
    base.join(candidate).ok().map(String::from)
}

/// URI attribute of a tag line (`EXT-X-KEY`, `EXT-X-MAP`, `EXT-X-MEDIA`, ...).
pub fn tag_uri(line: &str) -> Option<&str> {
    let value = tag_value(line)?;
    parse_attributes(value)
        .into_iter()
        .find(|(key, _)| key == "URI")
        .map(|(_, uri)| uri)
        .filter(|uri| !uri.is_empty())
}

/// Collect every URI line and tag `URI` attribute, resolved against `base`.
pub fn document_links(lines: &[ClassifiedLine], base: &str) -> Vec<DocumentLink> {
    lines
        .iter()
        .filter_map(|line| {
            let uri = match line.kind {
                LineKind::Uri => line.raw_text.trim(),
                LineKind::Tag => tag_uri(&line.raw_text)?,
                LineKind::Blank | LineKind::Comment => return None,
            };
            Some(DocumentLink {
                line_index: line.line_index,
                uri: uri.to_string(),
                target: resolve(uri, base),
            })
        })
        .collect()
}
