use serde_json::Value;
use thiserror::Error;

/// Failure modes when recovering a structured value from model output.
/// Both are non-fatal: callers fall back to a neutral default judgment
/// instead of aborting the run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no structured value found in model output")]
    NoStructuredValueFound,
    #[error("structured value has unbalanced delimiters")]
    UnbalancedDelimiters,
}

/// Recover the single JSON object or array embedded in an arbitrary block of
/// model output.
///
/// Model output is unreliable: the value may be surrounded by narration,
/// wrapped in markdown code fences, or preceded by partial text. The returned
/// slice is the exact span of the balanced value, suitable for a strict
/// `serde_json` parse by the caller.
pub fn extract_structured_value(text: &str) -> Result<&str, ExtractError> {
    let trimmed = text.trim_start_matches('\u{feff}').trim();

    // Fast path: the whole block is already a well-formed value
    if parses_as_value(trimmed) {
        return Ok(trimmed);
    }

    // A fenced block with no surrounding prose
    if let Some(inner) = strip_code_fence(trimmed) {
        if parses_as_value(inner) {
            return Ok(inner);
        }
    }

    balanced_span(trimmed)
}

fn parses_as_value(text: &str) -> bool {
    matches!(
        serde_json::from_str::<Value>(text),
        Ok(Value::Object(_)) | Ok(Value::Array(_))
    )
}

/// Strip a leading/trailing markdown code fence (``` or ```json) if present
fn strip_code_fence(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("```")?;
    // Drop the info string on the opening fence line
    let body_start = rest.find('\n')? + 1;
    let body = &rest[body_start..];
    let body = body.strip_suffix("```").unwrap_or(body);
    Some(body.trim())
}

/// Scan forward from the first opening brace or bracket, tracking nesting
/// depth and string-literal state, and return the span that closes at depth
/// zero. Delimiters inside string literals (including escaped quotes) do not
/// affect depth.
fn balanced_span(text: &str) -> Result<&str, ExtractError> {
    let start = text
        .find(['{', '['])
        .ok_or(ExtractError::NoStructuredValueFound)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(ExtractError::UnbalancedDelimiters)?;
                if depth == 0 {
                    return Ok(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    Err(ExtractError::UnbalancedDelimiters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_object_fast_path() {
        let text = r#"{"positive": 0.6, "neutral": 0.3, "negative": 0.1}"#;
        assert_eq!(extract_structured_value(text).unwrap(), text);
    }

    #[test]
    fn test_bare_array() {
        let text = r#"["Kubernetes", "Terraform"]"#;
        assert_eq!(extract_structured_value(text).unwrap(), text);
    }

    #[test]
    fn test_surrounding_whitespace_and_bom() {
        let value = r#"{"overallScore": 7}"#;
        let text = format!("\u{feff}  \n{}\n  ", value);
        assert_eq!(extract_structured_value(&text).unwrap(), value);
    }

    #[test]
    fn test_fenced_block() {
        let value = r#"{"positive": 0.5}"#;
        let text = format!("```json\n{}\n```", value);
        assert_eq!(extract_structured_value(&text).unwrap(), value);
    }

    #[test]
    fn test_prose_then_fenced_value() {
        let value = r#"{"positive": 0.7, "rationale": "upbeat"}"#;
        let text = format!(
            "Here is my assessment of the exchange:\n\n```json\n{}\n```\n\nLet me know if you need more detail.",
            value
        );
        assert_eq!(extract_structured_value(&text).unwrap(), value);
    }

    #[test]
    fn test_braces_inside_string_literals() {
        let value = r#"{"rationale": "the answer covered {scaling} and [sharding]"}"#;
        let text = format!("Analysis follows. {}", value);
        assert_eq!(extract_structured_value(&text).unwrap(), value);
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let value = r#"{"rationale": "said \"great question\" twice"}"#;
        let text = format!("Output: {}", value);
        assert_eq!(extract_structured_value(&text).unwrap(), value);
    }

    #[test]
    fn test_nested_value_returns_outermost_span() {
        let value = r#"{"scores": {"positive": 0.4}, "tags": ["Java"]}"#;
        let text = format!("Sure! {}", value);
        assert_eq!(extract_structured_value(&text).unwrap(), value);
    }

    #[test]
    fn test_no_opener_fails() {
        let result = extract_structured_value("The candidate seemed engaged throughout.");
        assert_eq!(result.unwrap_err(), ExtractError::NoStructuredValueFound);
    }

    #[test]
    fn test_empty_input_fails() {
        let result = extract_structured_value("   ");
        assert_eq!(result.unwrap_err(), ExtractError::NoStructuredValueFound);
    }

    #[test]
    fn test_unclosed_object_fails() {
        let result = extract_structured_value(r#"Partial output: {"positive": 0.6, "neu"#);
        assert_eq!(result.unwrap_err(), ExtractError::UnbalancedDelimiters);
    }

    #[test]
    fn test_unclosed_never_returns_truncated_span() {
        // A nested closer must not satisfy the outer opener
        let result = extract_structured_value(r#"{"inner": {"a": 1}"#);
        assert_eq!(result.unwrap_err(), ExtractError::UnbalancedDelimiters);
    }

    #[test]
    fn test_stray_closer_before_opener_is_ignored() {
        let value = r#"{"ok": true}"#;
        let text = format!("weird prefix }} then {}", value);
        assert_eq!(extract_structured_value(&text).unwrap(), value);
    }
}
