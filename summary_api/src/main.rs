use tldw_transcript::TranscriptClient;

mod config;
mod context;
mod error;
#[cfg(test)]
mod fakes;
mod gemini;
mod handlers;
mod routes;
mod summarizer;

use config::Config;
use context::AppContext;
use gemini::GeminiClient;

#[tokio::main]
async fn main() {
    let app_context = tldw_app::create_app_context::<
        AppContext<TranscriptClient, GeminiClient>,
        Config,
    >()
    .await
    .expect("failed to load configuration");

    let addr = app_context.config.addr();

    let app = routes::app(app_context).expect("invalid CORS_ALLOWED_ORIGINS");

    tldw_axum::run_app(app, addr)
        .await
        .expect("server exited with an error");
}
