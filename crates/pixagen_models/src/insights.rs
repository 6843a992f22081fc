//! Lenient parsing of JSON the model was asked to return as text.

use serde_json::{Value, json};
use tracing::debug;

/// Parses `text` as JSON; anything unparseable comes back as `{"raw": text}`.
///
/// Empty text is treated as `{}`.
///
/// ```
/// use pixagen_models::parse_insights;
/// use serde_json::json;
///
/// assert_eq!(parse_insights(r#"{"category":"shoe"}"#), json!({ "category": "shoe" }));
/// assert_eq!(parse_insights("not json"), json!({ "raw": "not json" }));
/// ```
pub fn parse_insights(text: &str) -> Value {
    let text = if text.is_empty() { "{}" } else { text };
    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "Insights were not JSON; wrapping raw text");
            json!({ "raw": text })
        }
    }
}
