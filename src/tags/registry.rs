use std::{collections::HashMap, path::Path};

use super::{builtin, TagContext, TagDefinition};
use crate::{Error, Result};

/// Read-only lookup table from tag name to [`TagDefinition`].
///
/// Names are case-sensitive and stored in the same form produced by the
/// line classifier (`EXTINF`, `EXT-X-KEY`, ...).
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: HashMap<String, TagDefinition>,
}

impl TagRegistry {
    /// Create an empty registry. Every tag is then treated as a segment tag.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry populated with the standard HLS tags.
    pub fn builtin() -> Self {
        let tags = builtin::definitions()
            .map(|(name, def)| (name.to_string(), def))
            .collect();
        Self { tags }
    }

    /// Parse a registry from a JSON object of `name -> definition`.
    pub fn from_json(json: &str) -> Result<Self> {
        let tags: HashMap<String, TagDefinition> =
            serde_json::from_str(json).map_err(|e| Error::RegistryLoad(e.to_string()))?;
        Ok(Self { tags })
    }

    /// Load a JSON registry from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::RegistryLoad(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Overlay `other` on top of this registry; entries in `other` win.
    pub fn merge(mut self, other: TagRegistry) -> Self {
        self.tags.extend(other.tags);
        self
    }

    pub fn get(&self, tag: &str) -> Option<&TagDefinition> {
        self.tags.get(tag)
    }

    pub fn context(&self, tag: &str) -> Option<TagContext> {
        self.get(tag).map(|def| def.context)
    }

    /// True for segment-context tags and for any tag absent from the registry.
    pub fn is_segment_tag(&self, tag: &str) -> bool {
        match self.context(tag) {
            Some(ctx) => ctx == TagContext::Segment,
            None => true,
        }
    }

    /// True only for tags registered as header or multivariant.
    pub fn is_header_or_multivariant_tag(&self, tag: &str) -> bool {
        matches!(
            self.context(tag),
            Some(TagContext::Header | TagContext::Multivariant)
        )
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tag_is_segment_scoped() {
        let registry = TagRegistry::builtin();
        assert!(registry.is_segment_tag("EXT-X-MY-CUSTOM"));
        assert!(!registry.is_header_or_multivariant_tag("EXT-X-MY-CUSTOM"));
    }

    #[test]
    fn test_builtin_contexts() {
        let registry = TagRegistry::builtin();
        assert!(registry.is_segment_tag("EXTINF"));
        assert!(registry.is_header_or_multivariant_tag("EXT-X-STREAM-INF"));
        assert!(registry.is_header_or_multivariant_tag("EXT-X-TARGETDURATION"));

        // Footer tags are neither
        assert!(!registry.is_segment_tag("EXT-X-ENDLIST"));
        assert!(!registry.is_header_or_multivariant_tag("EXT-X-ENDLIST"));
    }

    #[test]
    fn test_merge_overrides_builtin() {
        let custom =
            TagRegistry::from_json(r#"{"EXT-X-GAP":{"context":"footer"},"X-ACME":{"context":"header"}}"#)
                .unwrap();
        let registry = TagRegistry::builtin().merge(custom);

        assert_eq!(registry.context("EXT-X-GAP"), Some(TagContext::Footer));
        assert!(registry.is_header_or_multivariant_tag("X-ACME"));
        assert!(registry.is_segment_tag("EXTINF"));
    }

    #[test]
    fn test_invalid_json() {
        let err = TagRegistry::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::RegistryLoad(_)));
    }
}
