//! This crate fetches the transcript of a YouTube video.
//!
//! The flow mirrors what a browser does: load the watch page, read the
//! innertube API key from it, ask the innertube player endpoint for the
//! caption tracks, then download the chosen track as timed-text XML.
use reqwest::StatusCode;
use reqwest::header::{ACCEPT_LANGUAGE, COOKIE};
use serde_json::json;
use types::TranscriptSegment;

mod error;
mod player;
mod timedtext;
mod watch;

pub use error::TranscriptError;

const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";

#[derive(Debug, Clone)]
pub struct TranscriptClient {
    http: reqwest::Client,
    base_url: String,
    languages: Vec<String>,
}

impl TranscriptClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://www.youtube.com";

    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            languages: vec!["en".to_string()],
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Language codes in order of preference.
    #[must_use]
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    /// Fetches the transcript segments of `video_id` in the order YouTube
    /// returns them.
    ///
    /// # Errors
    ///
    /// Returns a `TranscriptError` describing why no transcript could be
    /// retrieved: the id looks like a url, the video is unavailable or
    /// restricted, subtitles are disabled, none of the preferred languages
    /// has a track, YouTube blocked the request, the caption data was not a
    /// transcript, or the HTTP exchange failed.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(
        &self,
        video_id: &str,
    ) -> Result<Vec<TranscriptSegment>, TranscriptError> {
        if video_id.starts_with("http://") || video_id.starts_with("https://")
        {
            return Err(TranscriptError::InvalidVideoId(video_id.to_string()));
        }

        let (html, cookie) = self.fetch_watch_html(video_id).await?;

        let api_key = match watch::innertube_api_key(&html) {
            Some(key) => key.to_string(),
            None if watch::is_captcha_page(&html) => {
                return Err(TranscriptError::IpBlocked);
            }
            None => {
                return Err(TranscriptError::YouTubeDataUnparsable(
                    video_id.to_string(),
                ));
            }
        };

        let player = self
            .fetch_player_response(video_id, &api_key, cookie.as_deref())
            .await?;

        player.check_playability(video_id)?;

        let tracks = player.caption_tracks(video_id)?;

        let Some(track) = player::select_track(&tracks, &self.languages)
        else {
            return Err(TranscriptError::NoTranscriptFound {
                video_id: video_id.to_string(),
                requested: self.languages.join(", "),
                available: player::describe_tracks(&tracks),
            });
        };

        if track.requires_po_token() {
            return Err(TranscriptError::PoTokenRequired(video_id.to_string()));
        }

        tracing::debug!(
            language = %track.language_code,
            generated = track.is_generated(),
            "downloading caption track"
        );

        let xml = self.get_text(&track.timedtext_url()).await?;

        let segments = timedtext::parse(video_id, &xml)?;

        tracing::info!(segments = segments.len(), "fetched transcript");

        Ok(segments)
    }

    /// Loads the watch page, accepting the consent interstitial once if
    /// YouTube shows it. Returns the page and the consent cookie, if one was
    /// needed.
    async fn fetch_watch_html(
        &self,
        video_id: &str,
    ) -> Result<(String, Option<String>), TranscriptError> {
        let html = self.get_watch_page(video_id, None).await?;

        if !watch::is_consent_page(&html) {
            return Ok((html, None));
        }

        tracing::debug!("accepting YouTube consent page");

        let cookie = watch::consent_cookie(&html).ok_or_else(|| {
            TranscriptError::FailedToCreateConsentCookie(video_id.to_string())
        })?;

        let html = self.get_watch_page(video_id, Some(&cookie)).await?;

        if watch::is_consent_page(&html) {
            return Err(TranscriptError::FailedToCreateConsentCookie(
                video_id.to_string(),
            ));
        }

        Ok((html, Some(cookie)))
    }

    async fn get_watch_page(
        &self,
        video_id: &str,
        cookie: Option<&str>,
    ) -> Result<String, TranscriptError> {
        let mut request = self
            .http
            .get(format!("{}/watch", self.base_url))
            .query(&[("v", video_id)])
            .header(ACCEPT_LANGUAGE, "en-US");

        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await.inspect_err(
            |e| tracing::error!(error = %e, "failed to load watch page"),
        )?;

        Self::check_status(&response)?;

        Ok(response.text().await?)
    }

    async fn fetch_player_response(
        &self,
        video_id: &str,
        api_key: &str,
        cookie: Option<&str>,
    ) -> Result<player::PlayerResponse, TranscriptError> {
        let body = json!({
            "context": {
                "client": {
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION,
                }
            },
            "videoId": video_id,
        });

        let mut request = self
            .http
            .post(format!("{}/youtubei/v1/player", self.base_url))
            .query(&[("key", api_key)])
            .header(ACCEPT_LANGUAGE, "en-US")
            .json(&body);

        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await.inspect_err(
            |e| tracing::error!(error = %e, "failed to call innertube player"),
        )?;

        Self::check_status(&response)?;

        Ok(response.json::<player::PlayerResponse>().await?)
    }

    async fn get_text(&self, url: &str) -> Result<String, TranscriptError> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT_LANGUAGE, "en-US")
            .send()
            .await
            .inspect_err(
                |e| tracing::error!(error = %e, "failed to download captions"),
            )?;

        Self::check_status(&response)?;

        Ok(response.text().await?)
    }

    fn check_status(
        response: &reqwest::Response,
    ) -> Result<(), TranscriptError> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptError::IpBlocked);
        }

        if !status.is_success() {
            return Err(TranscriptError::YouTubeRequestFailed {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        Ok(())
    }
}
