//! Scraping of the pieces the transcript flow needs out of a watch page.

use std::sync::LazyLock;

use regex::Regex;

static INNERTUBE_API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).unwrap()
});

static CONSENT_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"name="v" value="(.*?)""#).unwrap());

const CONSENT_FORM_ACTION: &str = r#"action="https://consent.youtube.com/s""#;
const RECAPTCHA_MARKER: &str = r#"class="g-recaptcha""#;

pub fn innertube_api_key(html: &str) -> Option<&str> {
    INNERTUBE_API_KEY_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

pub fn is_consent_page(html: &str) -> bool {
    html.contains(CONSENT_FORM_ACTION)
}

/// Value for the `CONSENT` cookie that skips the interstitial, if the page
/// carries the consent token.
pub fn consent_cookie(html: &str) -> Option<String> {
    CONSENT_VALUE_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| format!("CONSENT=YES+{}", m.as_str()))
}

pub fn is_captcha_page(html: &str) -> bool {
    html.contains(RECAPTCHA_MARKER)
}
