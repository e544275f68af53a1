use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

/// `data:<mime>;base64,<payload>` image string, directly usable as a display
/// source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageDataUri(String);

impl ImageDataUri {
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{mime_type};base64,{}", BASE64.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn mime_type(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .map(|(mime, _)| mime)
            .unwrap_or_default()
    }

    /// Decodes the payload back into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        let payload = self
            .0
            .split_once(";base64,")
            .map(|(_, payload)| payload)
            .unwrap_or_default();
        BASE64.decode(payload)
    }
}

impl fmt::Display for ImageDataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of one generation request. The variant is fixed by the task's
/// family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationResult {
    /// Markdown-ish text from an analysis task.
    Text(String),
    /// Single image from the image creation task.
    Image(ImageDataUri),
    /// Ordered storyboard frames, scene 1 first.
    Storyboard(Vec<ImageDataUri>),
}

impl GenerationResult {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// All images in display order (empty for text results).
    pub fn images(&self) -> &[ImageDataUri] {
        match self {
            Self::Text(_) => &[],
            Self::Image(image) => std::slice::from_ref(image),
            Self::Storyboard(images) => images,
        }
    }
}
