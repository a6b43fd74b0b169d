//! Built-in definitions for the standard HLS tags and common ad-marker tags.

use super::{Scte35Encoding, TagContext, TagDefinition};

use super::TagContext::{Footer, Header, Multivariant, Segment};

struct Builtin {
    name: &'static str,
    context: TagContext,
    icon: Option<&'static str>,
    scte35: Option<Scte35Encoding>,
    summary: &'static str,
}

const fn tag(name: &'static str, context: TagContext, summary: &'static str) -> Builtin {
    Builtin {
        name,
        context,
        icon: None,
        scte35: None,
        summary,
    }
}

const fn icon(mut b: Builtin, icon: &'static str) -> Builtin {
    b.icon = Some(icon);
    b
}

const fn cue(mut b: Builtin, encoding: Scte35Encoding) -> Builtin {
    b.scte35 = Some(encoding);
    b
}

const BUILTINS: &[Builtin] = &[
    // Basic and header tags
    tag("EXTM3U", Header, "Playlist header; must be the first line."),
    tag("EXT-X-VERSION", Header, "Compatibility version of the playlist."),
    tag("EXT-X-TARGETDURATION", Header, "Maximum media segment duration in seconds."),
    tag("EXT-X-MEDIA-SEQUENCE", Header, "Media sequence number of the first segment."),
    tag(
        "EXT-X-DISCONTINUITY-SEQUENCE",
        Header,
        "Discontinuity sequence number of the first segment.",
    ),
    tag("EXT-X-PLAYLIST-TYPE", Header, "EVENT or VOD playlist type."),
    tag("EXT-X-I-FRAMES-ONLY", Header, "Each segment describes a single I-frame."),
    tag("EXT-X-INDEPENDENT-SEGMENTS", Header, "Segments can be decoded independently."),
    tag("EXT-X-START", Header, "Preferred point at which to start playback."),
    tag("EXT-X-DEFINE", Header, "Variable definition for substitution."),
    tag("EXT-X-SERVER-CONTROL", Header, "Server support for delivery directives."),
    tag("EXT-X-PART-INF", Header, "Partial segment information."),
    tag("EXT-X-SKIP", Header, "Segments skipped by a playlist delta update."),
    // Multivariant tags
    icon(
        tag("EXT-X-STREAM-INF", Multivariant, "Variant stream; the next URI is its playlist."),
        "layers",
    ),
    icon(
        tag("EXT-X-I-FRAME-STREAM-INF", Multivariant, "I-frame-only variant stream."),
        "layers",
    ),
    tag("EXT-X-MEDIA", Multivariant, "Alternative rendition of the content."),
    tag("EXT-X-SESSION-DATA", Multivariant, "Arbitrary session data."),
    tag("EXT-X-SESSION-KEY", Multivariant, "Encryption key preloaded for the session."),
    tag("EXT-X-CONTENT-STEERING", Multivariant, "Content steering server."),
    // Media segment tags
    icon(tag("EXTINF", Segment, "Duration and title of the media segment."), "clock"),
    tag("EXT-X-BYTERANGE", Segment, "Sub-range of the resource identified by the URI."),
    icon(
        tag("EXT-X-DISCONTINUITY", Segment, "Encoding discontinuity before this segment."),
        "split",
    ),
    icon(tag("EXT-X-KEY", Segment, "How to decrypt media segments."), "key"),
    tag("EXT-X-MAP", Segment, "Media initialization section."),
    icon(
        tag("EXT-X-PROGRAM-DATE-TIME", Segment, "Absolute date and time of the first sample."),
        "calendar",
    ),
    cue(
        tag("EXT-X-DATERANGE", Segment, "Date range with attributes, may carry SCTE-35."),
        Scte35Encoding::Hex,
    ),
    tag("EXT-X-GAP", Segment, "Segment is missing and must not be loaded."),
    tag("EXT-X-BITRATE", Segment, "Approximate segment bit rate."),
    tag("EXT-X-PART", Segment, "Partial segment."),
    tag("EXT-X-PRELOAD-HINT", Segment, "Resource required by an upcoming partial segment."),
    tag("EXT-X-CUE-IN", Segment, "End of an ad break."),
    cue(
        icon(tag("EXT-X-CUE-OUT", Segment, "Start of an ad break."), "scissors"),
        Scte35Encoding::Base64,
    ),
    cue(
        tag("EXT-X-CUE-OUT-CONT", Segment, "Continuation of an ad break."),
        Scte35Encoding::Base64,
    ),
    cue(
        icon(tag("EXT-X-SCTE35", Segment, "SCTE-35 cue."), "scissors"),
        Scte35Encoding::Base64,
    ),
    cue(
        tag("EXT-OATCLS-SCTE35", Segment, "Base64 SCTE-35 cue."),
        Scte35Encoding::Base64,
    ),
    cue(
        tag("EXT-X-SPLICEPOINT-SCTE35", Segment, "Hex SCTE-35 splice point."),
        Scte35Encoding::Hex,
    ),
    // Footer tags
    tag("EXT-X-ENDLIST", Footer, "No more segments will be added."),
    tag("EXT-X-RENDITION-REPORT", Footer, "Information about an associated rendition."),
];

/// Iterate over the built-in tag definitions.
pub fn definitions() -> impl Iterator<Item = (&'static str, TagDefinition)> {
    BUILTINS.iter().map(|b| {
        let mut def = TagDefinition::new(b.context).with_summary(b.summary);
        if let Some(icon) = b.icon {
            def = def.with_icon(icon);
        }
        if let Some(encoding) = b.scte35 {
            def = def.with_scte35(encoding);
        }
        (b.name, def)
    })
}
