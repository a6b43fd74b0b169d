use serde::{Deserialize, Serialize};

/// Where a tag may legally appear in a playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TagContext {
    Header,
    Multivariant,
    Segment,
    Footer,
}

impl TagContext {
    /// Parse a context name. Unknown names fall back to [`TagContext::Segment`].
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "header" => Self::Header,
            "multivariant" | "master" => Self::Multivariant,
            "segment" | "media" => Self::Segment,
            "footer" => Self::Footer,
            other => {
                tracing::warn!("Unknown tag context '{}', treating as segment", other);
                Self::Segment
            }
        }
    }
}

impl From<String> for TagContext {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

/// Encoding of an SCTE-35 splice_info_section carried by a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scte35Encoding {
    Base64,
    Hex,
}

impl Scte35Encoding {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "base64" => Some(Self::Base64),
            "hex" => Some(Self::Hex),
            _ => None,
        }
    }
}

/// Static metadata about a single HLS tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDefinition {
    pub context: TagContext,

    /// Icon identifier used by renderers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, rename = "scte35", skip_serializing_if = "Option::is_none")]
    pub scte35_encoding: Option<Scte35Encoding>,

    /// Short human-readable description shown on hover.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl TagDefinition {
    pub fn new(context: TagContext) -> Self {
        Self {
            context,
            icon: None,
            scte35_encoding: None,
            summary: None,
        }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn with_scte35(mut self, encoding: Scte35Encoding) -> Self {
        self.scte35_encoding = Some(encoding);
        self
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_parse() {
        assert_eq!(TagContext::parse("header"), TagContext::Header);
        assert_eq!(TagContext::parse("Multivariant"), TagContext::Multivariant);
        assert_eq!(TagContext::parse("footer"), TagContext::Footer);
        assert_eq!(TagContext::parse("bogus"), TagContext::Segment);
    }

    #[test]
    fn test_deserialize_definition() {
        let json = r#"{"context":"segment","icon":"scissors","scte35":"hex"}"#;
        let def: TagDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.context, TagContext::Segment);
        assert_eq!(def.icon.as_deref(), Some("scissors"));
        assert_eq!(def.scte35_encoding, Some(Scte35Encoding::Hex));
        assert_eq!(def.summary, None);
    }

    #[test]
    fn test_deserialize_unknown_context_defaults_to_segment() {
        let def: TagDefinition = serde_json::from_str(r#"{"context":"playlist"}"#).unwrap();
        assert_eq!(def.context, TagContext::Segment);
    }
}
