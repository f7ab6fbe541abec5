use std::sync::{Arc, Mutex};

use types::TranscriptSegment;

use crate::summarizer::{SummaryGenerator, TranscriptSource};

pub fn segments(texts: &[&str]) -> Vec<TranscriptSegment> {
    texts
        .iter()
        .zip(0_u32..)
        .map(|(text, i)| TranscriptSegment {
            text: (*text).to_string(),
            start: f64::from(i),
            duration: 1.0,
        })
        .collect()
}

#[derive(Clone)]
pub struct FakeTranscripts {
    pub segments: Vec<TranscriptSegment>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl FakeTranscripts {
    pub fn new(texts: &[&str]) -> Self {
        Self {
            segments: segments(texts),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            segments: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl TranscriptSource for FakeTranscripts {
    type Error = String;

    async fn fetch_transcript(
        &self,
        video_id: &str,
    ) -> Result<Vec<TranscriptSegment>, Self::Error> {
        self.calls.lock().unwrap().push(video_id.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(msg.clone());
        }
        Ok(self.segments.clone())
    }
}

#[derive(Clone)]
pub enum Reply {
    Text(String),
    Fail(String),
    Panic(String),
}

#[derive(Clone)]
pub struct FakeGenerator {
    pub reply: Reply,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl FakeGenerator {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn new(summary: &str) -> Self {
        Self::with_reply(Reply::Text(summary.to_string()))
    }

    pub fn failing(msg: &str) -> Self {
        Self::with_reply(Reply::Fail(msg.to_string()))
    }

    pub fn panicking(msg: &str) -> Self {
        Self::with_reply(Reply::Panic(msg.to_string()))
    }
}

impl SummaryGenerator for FakeGenerator {
    type Error = String;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail(msg) => Err(msg.clone()),
            Reply::Panic(msg) => panic!("{msg}"),
        }
    }
}
