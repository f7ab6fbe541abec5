use redact::Secret;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Read once at startup. Missing is not fatal here, the Gemini call
    /// fails instead.
    #[serde(default)]
    pub google_api_key: Option<Secret<String>>,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,

    #[serde(default = "default_youtube_base_url")]
    pub youtube_base_url: String,

    /// Comma separated language codes, most preferred first.
    #[serde(default = "default_transcript_languages")]
    pub transcript_languages: String,

    /// Comma separated list of origins allowed by CORS.
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: String,

    #[serde(default = "default_host")]
    pub host: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_gemini_model() -> String {
    "gemini-pro".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_youtube_base_url() -> String {
    tldw_transcript::TranscriptClient::DEFAULT_BASE_URL.to_string()
}

fn default_transcript_languages() -> String {
    "en".to_string()
}

fn default_cors_allowed_origins() -> String {
    "http://localhost:3000".to_string()
}

const fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

const fn default_port() -> u16 {
    8000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_api_key: None,
            gemini_model: default_gemini_model(),
            gemini_base_url: default_gemini_base_url(),
            youtube_base_url: default_youtube_base_url(),
            transcript_languages: default_transcript_languages(),
            cors_allowed_origins: default_cors_allowed_origins(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    pub const fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn transcript_languages(&self) -> Vec<String> {
        self.transcript_languages
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}
