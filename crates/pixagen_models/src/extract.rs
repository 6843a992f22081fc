//! Pulling the first usable payload out of a provider response.

use crate::{GenerateContentResponse, Part};
use pixagen_core::{DEFAULT_MIME_TYPE, DataUri};
use serde_json::Value;
use tracing::{debug, warn};

/// Which inline parts count as usable media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaFilter {
    /// Any inline data (image jobs)
    Any,
    /// Inline data whose MIME type starts with `video/`
    Video,
}

impl MediaFilter {
    fn accepts(self, part: &Part) -> bool {
        match (self, &part.inline_data) {
            (_, None) => false,
            (MediaFilter::Any, Some(_)) => true,
            (MediaFilter::Video, Some(inline)) => inline
                .mime_type
                .as_deref()
                .is_some_and(|mime| mime.starts_with("video/")),
        }
    }
}

/// Result of searching one response for media.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaExtraction {
    /// The first matching part
    Found(DataUri),
    /// Nothing usable; `raw` is the candidate list (`null` when absent)
    NotFound {
        /// Candidates as returned, for inspection
        raw: Value,
    },
}

impl MediaExtraction {
    /// The media, if found.
    pub fn found(self) -> Option<DataUri> {
        match self {
            MediaExtraction::Found(media) => Some(media),
            MediaExtraction::NotFound { .. } => None,
        }
    }
}

/// Searches the first candidate's parts for the first part `filter` accepts.
///
/// Missing candidates, content or parts, a matching part without a payload,
/// and a payload that is not base64 all yield [`MediaExtraction::NotFound`].
pub fn extract_media(response: &GenerateContentResponse, filter: MediaFilter) -> MediaExtraction {
    let part = response
        .candidates
        .as_ref()
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.as_ref())
        .and_then(|parts| parts.iter().find(|part| filter.accepts(part)));

    let inline = part.and_then(|part| part.inline_data.as_ref());
    let payload = inline.and_then(|inline| inline.data.as_deref());

    if let (Some(inline), Some(payload)) = (inline, payload) {
        let mime = inline.mime_type.as_deref().unwrap_or(DEFAULT_MIME_TYPE);
        match DataUri::from_base64(mime, payload) {
            Ok(media) => {
                debug!(mime = %mime, bytes = media.bytes().len(), "Extracted media");
                return MediaExtraction::Found(media);
            }
            Err(reason) => warn!(mime = %mime, %reason, "Discarding undecodable media part"),
        }
    }

    let raw = response
        .candidates
        .as_ref()
        .and_then(|candidates| serde_json::to_value(candidates).ok())
        .unwrap_or(Value::Null);
    MediaExtraction::NotFound { raw }
}

/// Concatenated text parts of the first candidate; empty when there are none.
pub fn extract_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .as_ref()
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.as_ref())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect::<String>()
        })
        .unwrap_or_default()
}
