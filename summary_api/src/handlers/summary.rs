use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use types::{SummaryQuery, SummaryResponse};

use crate::context::AppContext;
use crate::error::ApiError;
use crate::summarizer::{self, SummaryGenerator, TranscriptSource};

/// `GET /summary?video_id=...`
///
/// The query is validated before anything else, so a request without
/// `video_id` never reaches the transcript provider.
pub async fn handler<T, G>(
    State(ctx): State<Arc<AppContext<T, G>>>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Result<Json<SummaryResponse>, ApiError>
where
    T: TranscriptSource + Send + Sync,
    G: SummaryGenerator + Send + Sync,
{
    let Query(SummaryQuery { video_id }) = query.map_err(|rejection| {
        tracing::warn!("rejected summary request: {rejection}");
        ApiError::InvalidQuery(rejection.body_text())
    })?;

    tracing::info!(video_id = %video_id, "summarizing video");

    let summary =
        summarizer::summarize(&ctx.transcripts, &ctx.generator, &video_id)
            .await?;

    Ok(Json(SummaryResponse { summary }))
}
