//! Gemini provider integration.
//!
//! Text and multimodal runs go to `generateContent`; image runs go to the
//! Imagen `predict` endpoint of the same API.
mod adapter;
mod config;
pub(crate) mod wire;

pub use adapter::{GEMINI_PROVIDER, GeminiProvider};
pub use config::{DEFAULT_GEMINI_BASE_URL, GeminiClientConfig};
