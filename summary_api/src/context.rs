use tldw_transcript::TranscriptClient;

use crate::config::Config;
use crate::gemini::GeminiClient;

/// Everything a request needs, built once at startup and shared read-only.
#[derive(Debug)]
pub struct AppContext<T, G> {
    pub config: Config,
    pub transcripts: T,
    pub generator: G,
}

impl tldw_app::ContextProvider<Config>
    for AppContext<TranscriptClient, GeminiClient>
{
    async fn new(config: Config) -> Self {
        let http = reqwest::Client::new();

        if config
            .google_api_key
            .as_ref()
            .is_none_or(|key| key.expose_secret().is_empty())
        {
            tracing::warn!(
                "GOOGLE_API_KEY is not set, summary requests will fail"
            );
        }

        let transcripts = TranscriptClient::new(http.clone())
            .with_base_url(&config.youtube_base_url)
            .with_languages(config.transcript_languages());

        let generator = GeminiClient::new(
            http,
            config.google_api_key.clone(),
            &config.gemini_model,
        )
        .with_base_url(&config.gemini_base_url);

        Self {
            config,
            transcripts,
            generator,
        }
    }
}
