//! Media payload and option types.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

/// One file buffered fully in memory for the duration of an upload call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPayload {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

impl MediaPayload {
    pub fn new(bytes: Vec<u8>, content_type: &str, file_name: &str) -> Self {
        Self {
            bytes,
            content_type: content_type.to_string(),
            file_name: file_name.to_string(),
        }
    }

    /// Encode as a `data:` URI, the format the media host's upload API takes
    /// for in-memory files.
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            BASE64.encode(&self.bytes)
        )
    }
}

/// Options forwarded to the media host alongside the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadOptions {
    pub resource_type: String,
}

impl UploadOptions {
    /// Let the host detect the resource type itself.
    pub fn auto() -> Self {
        Self {
            resource_type: "auto".to_string(),
        }
    }
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self::auto()
    }
}

/// The media host's result object, passed through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UploadOutcome(pub serde_json::Value);

impl UploadOutcome {
    /// Convenience accessor for the host's delivery URL, when present.
    pub fn secure_url(&self) -> Option<&str> {
        self.0.get("secure_url").and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_format() {
        let payload = MediaPayload::new(vec![0x89, 0x50, 0x4e, 0x47], "image/png", "logo.png");
        let uri = payload.data_uri();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(uri, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_upload_outcome_is_transparent_json() {
        let raw = serde_json::json!({
            "public_id": "shop/abc",
            "secure_url": "https://res.example.com/shop/abc.png",
            "bytes": 4
        });
        let outcome: UploadOutcome = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&outcome).unwrap(), raw);
        assert_eq!(
            outcome.secure_url(),
            Some("https://res.example.com/shop/abc.png")
        );
    }
}
