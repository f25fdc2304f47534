//! Profile serialization: storage JSON, export JSON, share links and file names.

use std::sync::LazyLock;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use regex::Regex;
use serde_json::{Map, Value};
use url::Url;

use crate::errors::AppError;
use crate::models::Profile;

/// Query parameter carrying the encoded profile in a share link.
pub const SHARE_PARAM: &str = "data";

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Compact JSON, as written to the store.
pub fn to_json(profile: &Profile) -> Result<String, AppError> {
    Ok(serde_json::to_string(profile)?)
}

/// Pretty JSON, as offered for download.
pub fn to_json_pretty(profile: &Profile) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(profile)?)
}

pub fn from_json(text: &str) -> Result<Profile, AppError> {
    serde_json::from_str(text).map_err(|e| AppError::Decode(format!("profile JSON: {e}")))
}

/// Parses import text into a JSON object for a shallow merge.
pub fn parse_import(text: &str) -> Result<Map<String, Value>, AppError> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(AppError::Import(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(AppError::Import(format!("malformed JSON: {e}"))),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Share links
// ────────────────────────────────────────────────────────────────────────────

/// Base64 of the UTF-8 JSON, without any URL wrapping.
pub fn encode_share_param(profile: &Profile) -> Result<String, AppError> {
    Ok(BASE64.encode(to_json(profile)?.as_bytes()))
}

/// Reverses [`encode_share_param`].
///
/// Form decoding turns `+` into a space, so spaces are read back as `+`.
pub fn decode_share_param(param: &str) -> Result<Profile, AppError> {
    let cleaned: String = param
        .trim()
        .chars()
        .map(|c| if c == ' ' { '+' } else { c })
        .collect();
    let bytes = BASE64
        .decode(cleaned.as_bytes())
        .map_err(|e| AppError::Decode(format!("share link base64: {e}")))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| AppError::Decode(format!("share link UTF-8: {e}")))?;
    from_json(&text)
}

/// Builds `base_url?data=<encoded>`, dropping any query already on `base_url`.
pub fn share_link(base_url: &str, profile: &Profile) -> Result<String, AppError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| AppError::Validation(format!("share base URL '{base_url}': {e}")))?;
    let encoded = encode_share_param(profile)?;
    url.set_fragment(None);
    url.query_pairs_mut()
        .clear()
        .append_pair(SHARE_PARAM, &encoded);
    Ok(url.into())
}

/// Extracts the share parameter from a page location, if there is one.
pub fn share_param_from_location(location: &str) -> Option<String> {
    let url = match Url::parse(location) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Ignoring unparsable location '{location}': {e}");
            return None;
        }
    };
    url.query_pairs()
        .find(|(key, _)| key == SHARE_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Download file names
// ────────────────────────────────────────────────────────────────────────────

/// `cv-data-<name lowercased, whitespace runs as '-'>.json`, `user` when unnamed.
pub fn export_filename(name: &str) -> String {
    let base = if name.is_empty() { "user" } else { name };
    format!(
        "cv-data-{}.json",
        WHITESPACE_RUN.replace_all(&base.to_lowercase(), "-")
    )
}

/// `<name with whitespace runs as '_'>.pdf`, `CV.pdf` when unnamed.
pub fn pdf_filename(name: &str) -> String {
    let base = if name.is_empty() { "CV" } else { name };
    format!("{}.pdf", WHITESPACE_RUN.replace_all(base, "_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sections::{Experience, Language};
    use crate::models::LanguageLevel;

    fn rich_profile() -> Profile {
        let mut p = Profile {
            name: "Zoë Ñandú 李雷".to_string(),
            summary: "Línea uno.\n\nСтрока два — ✓ 🚀".to_string(),
            skills: vec!["Rust".to_string(), "日本語".to_string()],
            show_qr: true,
            qr_custom: "https://zoë.dev/?a=1&b=2".to_string(),
            ..Default::default()
        };
        p.experience.push(Experience {
            role: "Ingeniera".to_string(),
            company: "Acmé & Co".to_string(),
            start: "2020".to_string(),
            end: "2023".to_string(),
            desc: "Built X\nShipped Y".to_string(),
        });
        p.languages.push(Language {
            name: "Español".to_string(),
            level: LanguageLevel::Lancar,
        });
        p.extra
            .insert("futureKey".to_string(), serde_json::json!({ "v": 2 }));
        p
    }

    #[test]
    fn test_json_round_trip() {
        let p = rich_profile();
        let back = from_json(&to_json(&p).unwrap()).unwrap();
        assert_eq!(back, p);
        let back_pretty = from_json(&to_json_pretty(&p).unwrap()).unwrap();
        assert_eq!(back_pretty, p);
    }

    #[test]
    fn test_share_param_round_trip_multibyte() {
        let p = rich_profile();
        let param = encode_share_param(&p).unwrap();
        assert!(param.is_ascii());
        assert_eq!(decode_share_param(&param).unwrap(), p);
    }

    #[test]
    fn test_share_link_round_trip_through_url() {
        let p = rich_profile();
        let link = share_link("https://cv.example/app/index.html?old=1#top", &p).unwrap();
        assert!(link.starts_with("https://cv.example/app/index.html?data="));
        assert!(!link.contains("old=1"));
        let param = share_param_from_location(&link).unwrap();
        assert_eq!(decode_share_param(&param).unwrap(), p);
    }

    #[test]
    fn test_decode_accepts_plus_read_as_space() {
        let p = rich_profile();
        let param = encode_share_param(&p).unwrap();
        let mangled = param.replace('+', " ");
        assert_eq!(decode_share_param(&mangled).unwrap(), p);
    }

    #[test]
    fn test_decode_garbage_is_decode_error() {
        assert!(matches!(
            decode_share_param("%%%not-base64"),
            Err(AppError::Decode(_))
        ));
        let not_json = BASE64.encode("hello");
        assert!(matches!(
            decode_share_param(&not_json),
            Err(AppError::Decode(_))
        ));
    }

    #[test]
    fn test_location_without_param() {
        assert_eq!(share_param_from_location("https://cv.example/index.html"), None);
        assert_eq!(share_param_from_location("https://cv.example/?data="), None);
        assert_eq!(share_param_from_location("not a url"), None);
    }

    #[test]
    fn test_parse_import_requires_object() {
        assert!(parse_import(r#"{"name":"x"}"#).is_ok());
        assert!(matches!(parse_import("[1,2]"), Err(AppError::Import(_))));
        assert!(matches!(parse_import("{name:"), Err(AppError::Import(_))));
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("Alex  Doe"), "cv-data-alex-doe.json");
        assert_eq!(export_filename(""), "cv-data-user.json");
    }

    #[test]
    fn test_pdf_filename() {
        assert_eq!(pdf_filename("Alex Doe"), "Alex_Doe.pdf");
        assert_eq!(pdf_filename(""), "CV.pdf");
    }
}
