use std::fmt::Display;

use tldw_transcript::TranscriptClient;
use types::TranscriptSegment;

use crate::error::ApiError;
use crate::gemini::GeminiClient;

pub const SUMMARY_PROMPT: &str = "
You are a YouTube video summarizer. Please summarize the transcript text in a structured format with the following sections:
1. Overview: A brief introduction to the topic.
2. Implementation: Key steps or methods used.
3. Challenges and Solutions: Challenges faced and how they were resolved.

Use bullet points for the details under each section. Use HTML tags to bold section headings.
";

pub trait TranscriptSource {
    type Error: Display;

    fn fetch_transcript(
        &self,
        video_id: &str,
    ) -> impl Future<Output = Result<Vec<TranscriptSegment>, Self::Error>> + Send;
}

pub trait SummaryGenerator {
    type Error: Display;

    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

impl TranscriptSource for TranscriptClient {
    type Error = tldw_transcript::TranscriptError;

    async fn fetch_transcript(
        &self,
        video_id: &str,
    ) -> Result<Vec<TranscriptSegment>, Self::Error> {
        self.fetch(video_id).await
    }
}

impl SummaryGenerator for GeminiClient {
    type Error = crate::gemini::GeminiError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.generate_content(prompt).await
    }
}

/// Joins segment texts with single spaces in the order given.
pub fn transcript_text(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|segment| segment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fetches the transcript of `video_id` and asks the generator to summarize
/// it. Each stage's failure is wrapped with a message naming the stage; the
/// generator is not called when the transcript cannot be fetched.
pub async fn summarize<T, G>(
    transcripts: &T,
    generator: &G,
    video_id: &str,
) -> Result<String, ApiError>
where
    T: TranscriptSource + Sync,
    G: SummaryGenerator + Sync,
{
    let segments =
        transcripts.fetch_transcript(video_id).await.map_err(|e| {
            tracing::error!(error = %e, "failed to extract transcript");
            ApiError::Transcript(e.to_string())
        })?;

    let text = transcript_text(&segments);

    tracing::debug!(
        segments = segments.len(),
        characters = text.len(),
        "requesting summary"
    );

    let generated = generator
        .generate(&format!("{SUMMARY_PROMPT}{text}"))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to generate summary");
            ApiError::Generation(e.to_string())
        })?;

    Ok(generated.trim().to_string())
}
