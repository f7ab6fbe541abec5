//! The subset of the innertube player response that carries playability and
//! caption track information.

use serde::Deserialize;

use crate::TranscriptError;

const BOT_DETECTED_MARKER: &str = "not a bot";
const AGE_RESTRICTED_MARKER: &str = "inappropriate";
const VIDEO_UNAVAILABLE_REASON: &str = "This video is unavailable";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    #[serde(default)]
    pub playability_status: Option<PlayabilityStatus>,
    #[serde(default)]
    pub captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
pub struct PlayabilityStatus {
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    #[serde(default)]
    pub tracklist: Option<CaptionTracklist>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTracklist {
    #[serde(default)]
    pub caption_tracks: Option<Vec<CaptionTrack>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    #[serde(default)]
    pub kind: Option<String>,
}

impl CaptionTrack {
    /// Auto-generated (speech recognition) tracks are marked with kind `asr`.
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }

    /// The URL to download the timed text from, in the default XML format.
    pub fn timedtext_url(&self) -> String {
        self.base_url.replace("&fmt=srv3", "")
    }

    pub fn requires_po_token(&self) -> bool {
        self.base_url.contains("&exp=xpe")
    }
}

impl PlayerResponse {
    /// Turns a non-playable status into the matching error.
    pub fn check_playability(
        &self,
        video_id: &str,
    ) -> Result<(), TranscriptError> {
        let Some(playability) = &self.playability_status else {
            return Ok(());
        };

        let reason = playability.reason.clone().unwrap_or_default();

        match playability.status.as_str() {
            "OK" => Ok(()),
            "LOGIN_REQUIRED" if reason.contains(BOT_DETECTED_MARKER) => {
                Err(TranscriptError::RequestBlocked(video_id.to_string()))
            }
            "LOGIN_REQUIRED" if reason.contains(AGE_RESTRICTED_MARKER) => {
                Err(TranscriptError::AgeRestricted(video_id.to_string()))
            }
            "ERROR" if reason == VIDEO_UNAVAILABLE_REASON => {
                Err(TranscriptError::VideoUnavailable(video_id.to_string()))
            }
            _ => Err(TranscriptError::VideoUnplayable {
                video_id: video_id.to_string(),
                reason,
            }),
        }
    }

    /// Returns the caption tracks, or `TranscriptsDisabled` if the video
    /// has none.
    pub fn caption_tracks(
        self,
        video_id: &str,
    ) -> Result<Vec<CaptionTrack>, TranscriptError> {
        self.captions
            .and_then(|c| c.tracklist)
            .and_then(|t| t.caption_tracks)
            .ok_or_else(|| {
                TranscriptError::TranscriptsDisabled(video_id.to_string())
            })
    }
}

/// Picks a track for the first language in `languages` that has one.
/// Within a language, a manually created track wins over a generated one.
pub fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    languages: &[String],
) -> Option<&'a CaptionTrack> {
    languages.iter().find_map(|language| {
        let mut for_language =
            tracks.iter().filter(|t| &t.language_code == language);

        let manual = for_language.clone().find(|t| !t.is_generated());
        manual.or_else(|| for_language.next())
    })
}

pub fn describe_tracks(tracks: &[CaptionTrack]) -> String {
    tracks
        .iter()
        .map(|t| {
            if t.is_generated() {
                format!("{} (generated)", t.language_code)
            } else {
                t.language_code.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn track(language_code: &str, generated: bool) -> CaptionTrack {
        CaptionTrack {
            base_url: format!("https://example.invalid/{language_code}"),
            language_code: language_code.to_string(),
            kind: generated.then(|| "asr".to_string()),
        }
    }

    fn languages(codes: &[&str]) -> Vec<String> {
        codes.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_manual_track_preferred_over_generated() {
        let tracks = vec![track("en", true), track("en", false)];

        let selected = select_track(&tracks, &languages(&["en"])).unwrap();
        assert!(!selected.is_generated());
    }

    #[test]
    fn test_generated_track_used_when_no_manual_one() {
        let tracks = vec![track("de", false), track("en", true)];

        let selected = select_track(&tracks, &languages(&["en"])).unwrap();
        assert_eq!(selected.language_code, "en");
        assert!(selected.is_generated());
    }

    #[test]
    fn test_language_order_is_respected() {
        let tracks = vec![track("en", false), track("de", true)];

        let selected =
            select_track(&tracks, &languages(&["de", "en"])).unwrap();
        assert_eq!(selected.language_code, "de");

        assert!(select_track(&tracks, &languages(&["fr"])).is_none());
    }

    #[test]
    fn test_timedtext_url_strips_srv3() {
        let track = CaptionTrack {
            base_url: "https://www.youtube.com/api/timedtext?v=abc&fmt=srv3&lang=en"
                .to_string(),
            language_code: "en".to_string(),
            kind: None,
        };

        assert_eq!(
            track.timedtext_url(),
            "https://www.youtube.com/api/timedtext?v=abc&lang=en"
        );
        assert!(!track.requires_po_token());
    }

    #[test]
    fn test_experimental_track_requires_po_token() {
        let track = CaptionTrack {
            base_url: "https://www.youtube.com/api/timedtext?v=abc&exp=xpe&lang=en"
                .to_string(),
            language_code: "en".to_string(),
            kind: None,
        };

        assert!(track.requires_po_token());
    }

    #[test]
    fn test_describe_tracks() {
        let tracks = vec![track("en", true), track("de", false)];
        assert_eq!(describe_tracks(&tracks), "en (generated), de");
    }

    #[test]
    fn test_playability_errors() {
        let response = |status: &str, reason: &str| -> PlayerResponse {
            serde_json::from_value(json!({
                "playabilityStatus": { "status": status, "reason": reason }
            }))
            .unwrap()
        };

        assert!(response("OK", "").check_playability("abc").is_ok());
        assert!(matches!(
            response("LOGIN_REQUIRED", "Sign in to confirm you’re not a bot")
                .check_playability("abc"),
            Err(TranscriptError::RequestBlocked(_))
        ));
        assert!(matches!(
            response(
                "LOGIN_REQUIRED",
                "This video may be inappropriate for some users."
            )
            .check_playability("abc"),
            Err(TranscriptError::AgeRestricted(_))
        ));
        assert!(matches!(
            response("ERROR", "This video is unavailable")
                .check_playability("abc"),
            Err(TranscriptError::VideoUnavailable(_))
        ));
        assert!(matches!(
            response("UNPLAYABLE", "Members only")
                .check_playability("abc"),
            Err(TranscriptError::VideoUnplayable { reason, .. }) if reason == "Members only"
        ));
    }

    #[test]
    fn test_missing_captions_means_disabled() {
        let response: PlayerResponse = serde_json::from_value(json!({
            "playabilityStatus": { "status": "OK" }
        }))
        .unwrap();

        assert!(matches!(
            response.caption_tracks("abc"),
            Err(TranscriptError::TranscriptsDisabled(id)) if id == "abc"
        ));

        let response: PlayerResponse = serde_json::from_value(json!({
            "captions": { "playerCaptionsTracklistRenderer": {} }
        }))
        .unwrap();

        assert!(response.caption_tracks("abc").is_err());
    }
}
