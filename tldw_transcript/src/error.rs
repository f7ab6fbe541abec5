use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error(
        "invalid video id {0}: pass the video id itself, not the video url"
    )]
    InvalidVideoId(String),
    #[error(
        "YouTube is blocking requests from your IP, too many requests were made or the IP belongs to a cloud provider"
    )]
    IpBlocked,
    #[error("YouTube refused the request for video {0} with a bot check")]
    RequestBlocked(String),
    #[error("video {0} is age restricted and requires authentication")]
    AgeRestricted(String),
    #[error("the video {0} is no longer available")]
    VideoUnavailable(String),
    #[error("the video {video_id} is unplayable: {reason}")]
    VideoUnplayable { video_id: String, reason: String },
    #[error("subtitles are disabled for video {0}")]
    TranscriptsDisabled(String),
    #[error(
        "no transcript found for video {video_id} in any of the requested languages [{requested}], available: [{available}]"
    )]
    NoTranscriptFound {
        video_id: String,
        requested: String,
        available: String,
    },
    #[error("the transcript of video {0} requires a PO token")]
    PoTokenRequired(String),
    #[error("failed to accept the YouTube consent page for video {0}")]
    FailedToCreateConsentCookie(String),
    #[error("the data YouTube returned for video {0} could not be parsed")]
    YouTubeDataUnparsable(String),
    #[error("the transcript of video {0} could not be parsed")]
    TranscriptUnparsable(String),
    #[error("request to YouTube failed with status {status}: {url}")]
    YouTubeRequestFailed { status: u16, url: String },
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
}
