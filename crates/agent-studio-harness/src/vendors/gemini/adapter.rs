use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::ProviderId;
use crate::errors::{HarnessError, ProviderError};
use crate::provider::{
    ProviderAdapter, ProviderImageRequest, ProviderImageResponse, ProviderRequest,
    ProviderResponse,
};

use super::config::GeminiClientConfig;
use super::wire::{
    GenerateContentResponse, PredictResponse, build_generate_content_request,
    build_predict_request, into_provider_image_response, into_provider_response,
};

/// Provider id under which `GeminiProvider` registers.
pub const GEMINI_PROVIDER: &str = "gemini";

/// Provider adapter for the Generative Language API: Gemini models through
/// `generateContent`, Imagen models through `predict`.
pub struct GeminiProvider {
    client: reqwest::Client,
    config: GeminiClientConfig,
}

impl GeminiProvider {
    /// Creates a provider from explicit client configuration.
    pub fn new(config: GeminiClientConfig) -> Result<Self, HarnessError> {
        if config.api_key.trim().is_empty() {
            return Err(HarnessError::Config(
                "Gemini client config api_key must not be empty".into(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| HarnessError::Config(format!("failed to build Gemini client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Creates a provider using `API_KEY` / `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self, HarnessError> {
        Self::new(GeminiClientConfig::from_env()?)
    }

    async fn post_json<B, R>(&self, url: String, body: &B, what: &str) -> Result<R, ProviderError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let provider_id = ProviderId::new(GEMINI_PROVIDER);
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                ProviderError::transport(provider_id.clone(), format!("{what} request failed: {e}"))
            })?;
        let status = response.status();
        let text = response.text().await.map_err(|e| {
            ProviderError::transport(
                provider_id.clone(),
                format!("{what} response read failed: {e}"),
            )
        })?;
        if !status.is_success() {
            return Err(ProviderError::provider(
                provider_id,
                format!(
                    "{what} request failed with status {status}: {}",
                    error_message(&text)
                ),
                Some(status.as_u16()),
            ));
        }
        serde_json::from_str(&text).map_err(|e| {
            ProviderError::protocol(provider_id, format!("invalid {what} response JSON: {e}"))
        })
    }
}

#[async_trait::async_trait]
impl ProviderAdapter for GeminiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::new(GEMINI_PROVIDER)
    }

    async fn generate_content(
        &self,
        req: ProviderRequest,
    ) -> Result<ProviderResponse, ProviderError> {
        let body = build_generate_content_request(&req).map_err(|e| {
            ProviderError::protocol(
                GEMINI_PROVIDER,
                format!("failed to serialize input parts: {e}"),
            )
        })?;
        debug!(
            run_id = %req.run_id,
            session_id = %req.session_id,
            model = %req.model.model,
            "sending Gemini generateContent"
        );
        let response: GenerateContentResponse = self
            .post_json(
                self.config.generate_content_url(&req.model.model),
                &body,
                "generateContent",
            )
            .await?;
        Ok(into_provider_response(response))
    }

    async fn generate_images(
        &self,
        req: ProviderImageRequest,
    ) -> Result<ProviderImageResponse, ProviderError> {
        let body = build_predict_request(&req);
        debug!(
            run_id = %req.run_id,
            session_id = %req.session_id,
            model = %req.model.model,
            "sending Imagen predict"
        );
        let response: PredictResponse = self
            .post_json(self.config.predict_url(&req.model.model), &body, "predict")
            .await?;
        into_provider_image_response(&ProviderId::new(GEMINI_PROVIDER), response)
    }
}

/// Pulls `error.message` out of a Google API error body, falling back to the
/// raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(ToOwned::to_owned)
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "<empty body>".to_string()
            } else {
                trimmed.to_string()
            }
        })
}
