use crate::content::{GeneratedImage, InputPart, RunOutput};
use crate::errors::ProviderError;
use crate::model::{GenerationConfig, ImageOptions, ModelRef, ProviderId};

/// Normalized content request handed to a provider adapter.
#[derive(Clone, Debug)]
pub struct ProviderRequest {
    pub run_id: uuid::Uuid,
    pub session_id: uuid::Uuid,
    pub model: ModelRef,
    pub system_prompt: Option<String>,
    pub input_parts: Vec<InputPart>,
    pub generation: GenerationConfig,
}

/// Normalized image-generation request handed to a provider adapter.
#[derive(Clone, Debug)]
pub struct ProviderImageRequest {
    pub run_id: uuid::Uuid,
    pub session_id: uuid::Uuid,
    pub model: ModelRef,
    pub prompt: String,
    pub image: ImageOptions,
}

/// Provider-reported metadata that is not part of the output itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProviderResponseMeta {
    /// Reason the provider refused the prompt, if it did.
    pub block_reason: Option<String>,
}

/// Completed content response.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProviderResponse {
    pub output: RunOutput,
    pub metadata: ProviderResponseMeta,
}

/// Completed image-generation response. `images` may be empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProviderImageResponse {
    pub images: Vec<GeneratedImage>,
    pub metadata: ProviderResponseMeta,
}

/// Contract implemented by every vendor integration.
///
/// Adapters make exactly one upstream call per method invocation; retry
/// policy, if any, belongs to the caller.
#[async_trait::async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Provider id that runs address through `ModelRef::provider`.
    fn id(&self) -> ProviderId;

    /// Runs a text/multimodal completion.
    async fn generate_content(&self, req: ProviderRequest)
    -> Result<ProviderResponse, ProviderError>;

    /// Generates images from a text prompt.
    async fn generate_images(
        &self,
        req: ProviderImageRequest,
    ) -> Result<ProviderImageResponse, ProviderError>;
}
