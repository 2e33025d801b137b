//! Locating the structured payload inside free-form model output.

use regex::Regex;

use crate::error::ParseError;

/// How a candidate was recovered from the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseRoute {
    Json,
    LabeledFields,
}

/// Parsed but not yet validated model output.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<T> {
    pub value: T,
    pub route: ParseRoute,
}

impl<T> Candidate<T> {
    pub fn json(value: T) -> Self {
        Self {
            value,
            route: ParseRoute::Json,
        }
    }

    pub fn labeled(value: T) -> Self {
        Self {
            value,
            route: ParseRoute::LabeledFields,
        }
    }
}

/// Removes markdown code fence markers, keeping the fenced content.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```JSON", "").replace("```", "")
}

/// Returns the slice from the first `open` to the last `close`, inclusive.
pub fn enclosed(text: &str, open: char, close: char) -> Result<&str, ParseError> {
    let start = text.find(open).ok_or(ParseError::NoStructuredDataFound)?;
    let end = text.rfind(close).ok_or(ParseError::NoStructuredDataFound)?;
    if end < start {
        return Err(ParseError::NoStructuredDataFound);
    }
    Ok(&text[start..=end])
}

/// Strips fences, then parses the outermost `open`/`close` span as JSON.
pub fn extract_json(raw: &str, open: char, close: char) -> Result<serde_json::Value, ParseError> {
    let cleaned = strip_code_fences(raw);
    let payload = enclosed(&cleaned, open, close)?;
    serde_json::from_str(payload).map_err(|e| ParseError::ParseFailure(e.to_string()))
}

/// Reads a JSON value as a non-negative number.
///
/// Numbers pass through; strings contribute their leading numeric part
/// ("20g" reads as 20). Everything else, including negatives and NaN, is 0.
pub fn coerce_number(value: Option<&serde_json::Value>) -> f64 {
    let number = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => leading_number(s).unwrap_or(0.0),
        _ => 0.0,
    };
    if number.is_finite() && number > 0.0 {
        number
    } else {
        0.0
    }
}

/// Text after the first `start` match, up to the next `stop` match or the
/// end of `text`.
pub fn section<'a>(text: &'a str, start: &Regex, stop: &Regex) -> Option<&'a str> {
    let begin = start.find(text)?.end();
    let rest = &text[begin..];
    let end = stop.find(rest).map(|m| m.start()).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// First capture group of `pattern` in `text`, read as a number.
pub fn captured_number(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Parses the numeric prefix of `raw`, skipping leading whitespace.
pub fn leading_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || (*i == 0 && *c == '-')))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
