use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::{
    proxy::HeaderCodec,
    resolve::{document_links, DocumentLink},
    server::{
        params::{AnalyzeParams, AnalyzeTextParams},
        state::AppState,
    },
    stream::{DocumentAnalysis, LineClassifier, PlaylistAnalyzer},
    Result,
};

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(flatten)]
    pub analysis: DocumentAnalysis,
    pub links: Vec<DocumentLink>,
}

fn analyze(analyzer: &PlaylistAnalyzer, content: &str, base: Option<String>) -> AnalyzeResponse {
    let lines = LineClassifier::classify_document(content);
    let analysis = analyzer.analyze_lines(&lines);
    let links = base
        .as_deref()
        .map(|base| document_links(&lines, base))
        .unwrap_or_default();

    AnalyzeResponse {
        base,
        analysis,
        links,
    }
}

/// Handle GET /analyze: fetch a remote playlist and annotate it.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Json<AnalyzeResponse>> {
    tracing::info!("Analyze request: {}", params.url);

    let url = url::Url::parse(&params.url)?;
    state
        .signing_key
        .require(&params.url, params.sig.as_deref())?;

    let headers = HeaderCodec::decode_optional(params.h.as_deref())?;
    let content = state.client.fetch_text(url.as_str(), headers).await?;

    let analyzer = state.analyzer.with_options(params.apply(state.analyzer.options()));
    Ok(Json(analyze(&analyzer, &content, Some(url.to_string()))))
}

/// Handle POST /analyze: annotate the playlist text in the request body.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeTextParams>,
    body: String,
) -> Result<Json<AnalyzeResponse>> {
    tracing::info!("Analyze request: {} bytes inline", body.len());

    let analyzer = state.analyzer.with_options(params.apply(state.analyzer.options()));
    Ok(Json(analyze(&analyzer, &body, params.base.clone())))
}
