use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::content::{GeneratedImage, InlineData, InputPart, RunOutput};
use crate::errors::HarnessError;
use crate::harness::HarnessInner;
use crate::model::{AspectRatio, GenerationConfig, ImageOptions, ModelRef};
use crate::provider::{ProviderAdapter, ProviderImageRequest, ProviderRequest};

fn resolve_provider(
    harness: &HarnessInner,
    model: &ModelRef,
) -> Result<Arc<dyn ProviderAdapter>, HarnessError> {
    harness
        .provider(&model.provider)
        .ok_or_else(|| HarnessError::ProviderNotFound {
            provider: model.provider.clone(),
        })
}

fn validate_model(model: &ModelRef) -> Result<(), HarnessError> {
    if model.provider.as_str().trim().is_empty() {
        return Err(HarnessError::Validation(
            "model provider must not be empty".into(),
        ));
    }
    if model.model.trim().is_empty() {
        return Err(HarnessError::Validation("model must not be empty".into()));
    }
    Ok(())
}

/// Builder for configuring and running a single content (completion) call.
///
/// This is the main user-facing API for providing prompts, inputs, and
/// sampling options before collecting the result.
pub struct RunBuilder {
    harness: Arc<HarnessInner>,
    session_id: uuid::Uuid,
    session_name: String,
    model: ModelRef,
    system_prompt: Option<String>,
    input_parts: Vec<InputPart>,
    generation: GenerationConfig,
}

impl RunBuilder {
    pub(crate) fn new(
        harness: Arc<HarnessInner>,
        session_id: uuid::Uuid,
        session_name: String,
        model: ModelRef,
    ) -> Self {
        Self {
            harness,
            session_id,
            session_name,
            model,
            system_prompt: None,
            input_parts: Vec::new(),
            generation: GenerationConfig::default(),
        }
    }

    /// Sets the system instruction for the run.
    pub fn system_prompt(mut self, text: impl Into<String>) -> Self {
        self.system_prompt = Some(text.into());
        self
    }

    /// Appends a plain text user input part.
    pub fn user_text(mut self, text: impl Into<String>) -> Self {
        self.input_parts.push(InputPart::Text(text.into()));
        self
    }

    /// Appends a JSON user input part.
    pub fn user_json(mut self, value: serde_json::Value) -> Result<Self, HarnessError> {
        self.input_parts.push(InputPart::Json(value));
        Ok(self)
    }

    /// Appends an inline media part.
    pub fn inline_data(mut self, data: InlineData) -> Self {
        self.input_parts.push(InputPart::InlineData(data));
        self
    }

    pub fn temperature(mut self, value: f32) -> Self {
        self.generation.temperature = Some(value);
        self
    }

    pub fn top_p(mut self, value: f32) -> Self {
        self.generation.top_p = Some(value);
        self
    }

    pub fn top_k(mut self, value: u32) -> Self {
        self.generation.top_k = Some(value);
        self
    }

    /// Requests structured JSON output constrained by `schema`.
    pub fn json_schema(mut self, schema: serde_json::Value) -> Self {
        self.generation.response_mime_type = Some("application/json".to_string());
        self.generation.response_schema = Some(schema);
        self
    }

    /// Validates the builder state and performs the provider call once.
    pub async fn collect_output(self) -> Result<RunOutput, HarnessError> {
        let provider = resolve_provider(&self.harness, &self.model)?;
        let session_name = self.session_name.clone();
        let request = self.validate_and_build_request()?;
        let run_id = request.run_id;
        debug!(
            event = "ai.content_started",
            domain = "ai",
            run_id = %run_id,
            session_id = %request.session_id,
            session = session_name.as_str(),
            provider = %request.model.provider,
            model = request.model.model.as_str(),
            parts = request.input_parts.len() as u64,
            structured = request.generation.response_schema.is_some()
        );
        let started = Instant::now();
        let response = provider.generate_content(request).await.map_err(|err| {
            debug!(
                event = "ai.content_failed",
                domain = "ai",
                run_id = %run_id,
                provider_status = ?err.status_code(),
                error = %err
            );
            HarnessError::Provider(err)
        })?;
        debug!(
            event = "ai.content_completed",
            domain = "ai",
            run_id = %run_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            output_parts = response.output.parts.len() as u64,
            finish_reason = ?response.output.finish_reason,
            block_reason = ?response.metadata.block_reason
        );
        if response.output.parts.is_empty()
            && let Some(reason) = response.metadata.block_reason
        {
            return Err(HarnessError::empty_output(format!(
                "prompt was blocked by the provider ({reason})"
            )));
        }
        Ok(response.output)
    }

    /// Runs to completion and returns concatenated text output.
    ///
    /// An empty or whitespace-only response is reported as
    /// `HarnessError::EmptyOutput`.
    pub async fn collect_text(self) -> Result<String, HarnessError> {
        let text = self.collect_output().await?.text();
        if text.trim().is_empty() {
            return Err(HarnessError::empty_output(
                "received an empty response from the model",
            ));
        }
        Ok(text)
    }

    fn validate_and_build_request(self) -> Result<ProviderRequest, HarnessError> {
        validate_model(&self.model)?;
        if self.input_parts.is_empty() {
            return Err(HarnessError::Validation(
                "at least one input part is required".into(),
            ));
        }
        for part in &self.input_parts {
            match part {
                InputPart::Text(text) if text.trim().is_empty() => {
                    return Err(HarnessError::Validation(
                        "text input must not be empty".into(),
                    ));
                }
                InputPart::InlineData(data)
                    if data.data.is_empty() || data.mime_type.trim().is_empty() =>
                {
                    return Err(HarnessError::Validation(
                        "inline data requires a payload and a MIME type".into(),
                    ));
                }
                _ => {}
            }
        }
        if self.generation.response_schema.is_some()
            && self.generation.response_mime_type.as_deref() != Some("application/json")
        {
            return Err(HarnessError::Validation(
                "response schema requires application/json output".into(),
            ));
        }

        Ok(ProviderRequest {
            run_id: uuid::Uuid::new_v4(),
            session_id: self.session_id,
            model: self.model,
            system_prompt: self.system_prompt.filter(|s| !s.trim().is_empty()),
            input_parts: self.input_parts,
            generation: self.generation,
        })
    }
}

/// Builder for a single image-generation call.
pub struct ImageRunBuilder {
    harness: Arc<HarnessInner>,
    session_id: uuid::Uuid,
    session_name: String,
    model: ModelRef,
    prompt: Option<String>,
    image: ImageOptions,
}

impl ImageRunBuilder {
    pub(crate) fn new(
        harness: Arc<HarnessInner>,
        session_id: uuid::Uuid,
        session_name: String,
        model: ModelRef,
    ) -> Self {
        Self {
            harness,
            session_id,
            session_name,
            model,
            prompt: None,
            image: ImageOptions::default(),
        }
    }

    /// Sets the text prompt describing the image.
    pub fn prompt(mut self, text: impl Into<String>) -> Self {
        self.prompt = Some(text.into());
        self
    }

    pub fn number_of_images(mut self, count: u32) -> Self {
        self.image.number_of_images = count;
        self
    }

    pub fn aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.image.aspect_ratio = ratio;
        self
    }

    pub fn output_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.image.output_mime_type = mime.into();
        self
    }

    /// Performs the provider call once and returns every image it produced.
    ///
    /// The returned list may be empty; use `generate_one` when at least one
    /// image is required.
    pub async fn generate(self) -> Result<Vec<GeneratedImage>, HarnessError> {
        let provider = resolve_provider(&self.harness, &self.model)?;
        let session_name = self.session_name.clone();
        let request = self.validate_and_build_request()?;
        let run_id = request.run_id;
        debug!(
            event = "ai.images_started",
            domain = "ai",
            run_id = %run_id,
            session_id = %request.session_id,
            session = session_name.as_str(),
            provider = %request.model.provider,
            model = request.model.model.as_str(),
            aspect_ratio = request.image.aspect_ratio.as_str(),
            requested = request.image.number_of_images,
            prompt_len = request.prompt.len() as u64
        );
        let started = Instant::now();
        let response = provider.generate_images(request).await.map_err(|err| {
            debug!(
                event = "ai.images_failed",
                domain = "ai",
                run_id = %run_id,
                provider_status = ?err.status_code(),
                error = %err
            );
            HarnessError::Provider(err)
        })?;
        debug!(
            event = "ai.images_completed",
            domain = "ai",
            run_id = %run_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            images = response.images.len() as u64,
            block_reason = ?response.metadata.block_reason
        );
        Ok(response.images)
    }

    /// Like `generate`, but fails with `HarnessError::EmptyOutput` when the
    /// provider returned no images, and returns the first one otherwise.
    pub async fn generate_one(self) -> Result<GeneratedImage, HarnessError> {
        self.generate()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| HarnessError::empty_output("received no image from the model"))
    }

    fn validate_and_build_request(self) -> Result<ProviderImageRequest, HarnessError> {
        validate_model(&self.model)?;
        let prompt = self
            .prompt
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| HarnessError::Validation("image prompt must not be empty".into()))?;
        if self.image.number_of_images == 0 {
            return Err(HarnessError::Validation(
                "number_of_images must be greater than 0".into(),
            ));
        }
        if self.image.output_mime_type.trim().is_empty() {
            return Err(HarnessError::Validation(
                "output MIME type must not be empty".into(),
            ));
        }
        Ok(ProviderImageRequest {
            run_id: uuid::Uuid::new_v4(),
            session_id: self.session_id,
            model: self.model,
            prompt,
            image: self.image,
        })
    }
}
