//! Parsing of the timed-text XML YouTube serves caption tracks in.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use types::TranscriptSegment;

use crate::error::TranscriptError;

static TRANSCRIPT_ROOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<transcript\b").unwrap());

static SELF_CLOSING_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<text\b[^>]*/>").unwrap());

static TEXT_ELEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<text\b([^>]*)>(.*?)</text>").unwrap()
});

static START_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bstart="([^"]*)""#).unwrap());

static DUR_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bdur="([^"]*)""#).unwrap());

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap()
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Parses every non-empty `<text>` element into a segment, in document order.
///
/// Element content is entity-decoded twice, once for the XML layer and once
/// for the HTML YouTube embeds inside it, and any markup left afterwards is
/// removed. Numeric references, the Latin-1 named entities and a few
/// typographic ones are decoded; other named entities are kept verbatim.
///
/// # Errors
///
/// Returns `TranscriptUnparsable` when the body has no `<transcript>` root,
/// such as an empty body or an HTML error page.
pub fn parse(
    video_id: &str,
    xml: &str,
) -> Result<Vec<TranscriptSegment>, TranscriptError> {
    if !TRANSCRIPT_ROOT_RE.is_match(xml) {
        return Err(TranscriptError::TranscriptUnparsable(
            video_id.to_string(),
        ));
    }

    let xml = SELF_CLOSING_TEXT_RE.replace_all(xml, "");

    let segments = TEXT_ELEMENT_RE
        .captures_iter(&xml)
        .filter_map(|element| {
            let attributes = element.get(1).map_or("", |m| m.as_str());
            let raw = element.get(2).map_or("", |m| m.as_str());

            if raw.is_empty() {
                return None;
            }

            let text = unescape(&unescape(raw));
            let text = TAG_RE.replace_all(&text, "").into_owned();

            Some(TranscriptSegment {
                text,
                start: attribute(&START_ATTR_RE, attributes),
                duration: attribute(&DUR_ATTR_RE, attributes),
            })
        })
        .collect();

    Ok(segments)
}

fn attribute(re: &Regex, attributes: &str) -> f64 {
    re.captures(attributes)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

// Names of U+00A0 through U+00FF, in code point order.
const LATIN1_ENTITIES: [&str; 96] = [
    "nbsp", "iexcl", "cent", "pound", "curren", "yen", "brvbar", "sect",
    "uml", "copy", "ordf", "laquo", "not", "shy", "reg", "macr", "deg",
    "plusmn", "sup2", "sup3", "acute", "micro", "para", "middot", "cedil",
    "sup1", "ordm", "raquo", "frac14", "frac12", "frac34", "iquest", "Agrave",
    "Aacute", "Acirc", "Atilde", "Auml", "Aring", "AElig", "Ccedil", "Egrave",
    "Eacute", "Ecirc", "Euml", "Igrave", "Iacute", "Icirc", "Iuml", "ETH",
    "Ntilde", "Ograve", "Oacute", "Ocirc", "Otilde", "Ouml", "times",
    "Oslash", "Ugrave", "Uacute", "Ucirc", "Uuml", "Yacute", "THORN", "szlig",
    "agrave", "aacute", "acirc", "atilde", "auml", "aring", "aelig", "ccedil",
    "egrave", "eacute", "ecirc", "euml", "igrave", "iacute", "icirc", "iuml",
    "eth", "ntilde", "ograve", "oacute", "ocirc", "otilde", "ouml", "divide",
    "oslash", "ugrave", "uacute", "ucirc", "uuml", "yacute", "thorn", "yuml",
];

fn unescape(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            decode_entity(entity).map_or_else(
                || caps[0].to_string(),
                |c| c.to_string(),
            )
        })
        .into_owned()
}

fn decode_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }

    if let Some(decimal) = entity.strip_prefix('#') {
        return decimal.parse().ok().and_then(char::from_u32);
    }

    if let Some(offset) =
        LATIN1_ENTITIES.iter().position(|name| *name == entity)
    {
        return u32::try_from(offset)
            .ok()
            .and_then(|offset| char::from_u32(0xa0 + offset));
    }

    let c = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "hellip" => '\u{2026}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "euro" => '\u{20ac}',
        _ => return None,
    };

    Some(c)
}
