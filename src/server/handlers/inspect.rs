use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use crate::{
    hls::Scte35Cue,
    hover::HoverInfo,
    proxy::HeaderCodec,
    resolve::resolve,
    server::{
        params::{HoverParams, ResolveParams, Scte35Params},
        state::AppState,
    },
    tags::{Scte35Encoding, TagDefinition},
    Error, Result,
};

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub uri: String,
    pub base: String,
    pub resolved: String,
}

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub name: String,
    #[serde(flatten)]
    pub definition: TagDefinition,
}

/// Handle GET /resolve.
pub async fn handle_resolve(Query(params): Query<ResolveParams>) -> Json<ResolveResponse> {
    let resolved = resolve(&params.uri, &params.base);
    Json(ResolveResponse {
        uri: params.uri,
        base: params.base,
        resolved,
    })
}

/// Handle GET /hover: inspect one line of a remote playlist.
pub async fn handle_hover(
    State(state): State<AppState>,
    Query(params): Query<HoverParams>,
) -> Result<Json<HoverInfo>> {
    tracing::info!("Hover request: {} line {}", params.url, params.line);

    let url = url::Url::parse(&params.url)?;
    state
        .signing_key
        .require(&params.url, params.sig.as_deref())?;

    let headers = HeaderCodec::decode_optional(params.h.as_deref())?;
    let content = state.client.fetch_text(url.as_str(), headers).await?;

    HoverInfo::for_line(&state.analyzer, &content, params.line, Some(url.as_str()))
        .map(Json)
        .ok_or_else(|| Error::InvalidRequest(format!("line {} out of range", params.line)))
}

/// Handle GET /scte35: decode a cue payload.
pub async fn handle_scte35(Query(params): Query<Scte35Params>) -> Result<Json<Scte35Cue>> {
    let encoding = match params.encoding.as_deref() {
        None => Scte35Encoding::Base64,
        Some(s) => Scte35Encoding::parse(s)
            .ok_or_else(|| Error::InvalidRequest(format!("unknown encoding: {}", s)))?,
    };

    Ok(Json(Scte35Cue::decode(&params.payload, encoding)?))
}

/// Handle GET /tags/{name}: registry lookup for documentation popups.
pub async fn handle_tag(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<TagResponse>> {
    let definition = state
        .analyzer
        .registry()
        .get(&name)
        .cloned()
        .ok_or_else(|| Error::UnknownTag(name.clone()))?;

    Ok(Json(TagResponse { name, definition }))
}
