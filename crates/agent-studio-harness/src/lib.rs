//! Standalone generative AI harness with a builder-first async API.
//!
//! Vendor-specific APIs are namespaced under `vendors::*`.
//!
//! # Builder-first usage (Gemini)
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use agent_studio_harness::prelude::*;
//! use agent_studio_harness::vendors::gemini::{GEMINI_PROVIDER, GeminiProvider};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), HarnessError> {
//! let harness = Harness::builder()
//!     .register_provider(Arc::new(GeminiProvider::from_env()?))
//!     .build()?;
//!
//! let text = harness
//!     .session(SessionConfig::named("demo"))
//!     .run(ModelRef::new(GEMINI_PROVIDER, "gemini-2.5-flash"))
//!     .system_prompt("Answer briefly.")
//!     .user_text("Say hello")
//!     .temperature(0.5)
//!     .collect_text()
//!     .await?;
//!
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

/// Input/output content types and generated images.
pub mod content;
/// Public error types used by the harness API.
pub mod errors;
/// Harness entry point and builder.
pub mod harness;
/// Model and provider identifiers plus generation options.
pub mod model;
/// Common imports for typical usage.
pub mod prelude;
/// Provider adapter contracts used by vendor integrations.
pub mod provider;
/// Content and image run builders.
pub mod run;
/// Session configuration and session handle.
pub mod session;
/// Vendor-specific integrations.
pub mod vendors;

pub use content::{GeneratedImage, InlineData, InputPart, OutputPart, RunOutput};
pub use errors::{HarnessError, ProviderError};
pub use harness::{Harness, HarnessBuilder};
pub use model::{AspectRatio, GenerationConfig, ImageOptions, ModelRef, ProviderId};
pub use provider::{
    ProviderAdapter, ProviderImageRequest, ProviderImageResponse, ProviderRequest,
    ProviderResponse, ProviderResponseMeta,
};
pub use run::{ImageRunBuilder, RunBuilder};
pub use session::{Session, SessionConfig};
