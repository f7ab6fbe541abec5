use std::any::Any;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer,
    trace::TraceLayer,
};
use tldw_axum::CorsError;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::handlers;
use crate::summarizer::{SummaryGenerator, TranscriptSource};

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| (*s).to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());

    tracing::error!("request handler panicked: {message}");

    ApiError::Unexpected(message).into_response()
}

/// Builds the service router. Fails only when the configured CORS origins
/// are rejected by [`tldw_axum::cors_layer`].
pub fn app<T, G>(context: AppContext<T, G>) -> Result<Router, CorsError>
where
    T: TranscriptSource + Send + Sync + 'static,
    G: SummaryGenerator + Send + Sync + 'static,
{
    let trace_layer = TraceLayer::new_for_http().on_request(
        |request: &Request<Body>, _: &tracing::Span| {
            tracing::info!(
                "received request: {method} {uri}",
                method = request.method(),
                uri = request.uri()
            );
        },
    );

    let cors_layer =
        tldw_axum::cors_layer(&context.config.cors_allowed_origins)?;

    let compression_layer = CompressionLayer::new().gzip(true).deflate(true);

    Ok(Router::new()
        .route("/", get(handlers::root::handler))
        .route("/favicon.ico", get(handlers::favicon::handler))
        .route("/summary", get(handlers::summary::handler::<T, G>))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer)
        .layer(trace_layer)
        .layer(compression_layer)
        .with_state(Arc::new(context)))
}
