use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Binary payload embedded directly in a request, paired with its MIME type.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InlineData {
    /// MIME type of the payload (for example `image/jpeg`).
    pub mime_type: String,
    /// Base64-encoded payload bytes.
    pub data: String,
}

impl InlineData {
    /// Encodes raw bytes into an inline payload.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: BASE64.encode(bytes),
        }
    }
}

/// Input content sent to a model run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[non_exhaustive]
pub enum InputPart {
    /// Plain text input.
    Text(String),
    /// Structured JSON input, sent to the model as serialized text.
    Json(serde_json::Value),
    /// Inline binary media (images, captured video frames).
    InlineData(InlineData),
}

/// Output content produced by a model run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[non_exhaustive]
pub enum OutputPart {
    /// Plain text output. JSON-mode responses arrive here as JSON text.
    Text(String),
}

/// Final aggregated output for a completed content run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize, Default)]
pub struct RunOutput {
    /// Output parts in the order they were produced.
    pub parts: Vec<OutputPart>,
    /// Vendor-specific finish reason when available (for example `STOP`).
    pub finish_reason: Option<String>,
}

impl RunOutput {
    /// Concatenates all text parts in order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            let OutputPart::Text(text) = part;
            out.push_str(text);
        }
        out
    }
}

/// One image returned by an image-generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Decoded image bytes.
    pub bytes: Vec<u8>,
    /// MIME type reported by the provider, if any.
    pub mime_type: Option<String>,
}

impl GeneratedImage {
    /// Renders the image as a `data:` URI, falling back to `default_mime`
    /// when the provider did not report a MIME type.
    pub fn to_data_uri(&self, default_mime: &str) -> String {
        let mime = self.mime_type.as_deref().unwrap_or(default_mime);
        format!("data:{mime};base64,{}", BASE64.encode(&self.bytes))
    }
}
