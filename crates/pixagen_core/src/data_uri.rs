//! `data:<mime>;base64,<payload>` values exchanged at the HTTP boundary.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// MIME type reported when the provider omits one.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Decoded media with its declared MIME type.
///
/// # Examples
///
/// ```
/// use pixagen_core::DataUri;
///
/// let uri = DataUri::parse("data:image/png;base64,aGVsbG8=").unwrap();
/// assert_eq!(uri.mime_type(), "image/png");
/// assert_eq!(uri.bytes(), b"hello");
/// assert_eq!(uri.to_string(), "data:image/png;base64,aGVsbG8=");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataUri {
    mime_type: String,
    bytes: Vec<u8>,
}

impl DataUri {
    /// Wraps raw bytes.
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Decodes a base64 payload as delivered by the provider.
    pub fn from_base64(mime_type: impl Into<String>, payload: &str) -> Result<Self, String> {
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| format!("payload is not valid base64: {}", e))?;
        Ok(Self::new(mime_type, bytes))
    }

    /// Parses `data:<mime>;base64,<payload>`.
    ///
    /// The error string describes what was malformed and is suitable for a
    /// client-facing message.
    pub fn parse(input: &str) -> Result<Self, String> {
        let (header, payload) = input
            .split_once(',')
            .ok_or_else(|| "expected data:<mime>;base64,<payload>".to_string())?;
        let mime_type = header
            .strip_prefix("data:")
            .and_then(|rest| rest.strip_suffix(";base64"))
            .ok_or_else(|| "expected data:<mime>;base64 header".to_string())?;
        if mime_type.is_empty() {
            return Err("missing MIME type".to_string());
        }
        Self::from_base64(mime_type, payload)
    }

    /// Declared MIME type.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Decoded payload.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload re-encoded as standard base64.
    pub fn base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

impl std::fmt::Display for DataUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.base64())
    }
}

impl std::str::FromStr for DataUri {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DataUri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DataUri {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
