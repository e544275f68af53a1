//! Request and response payloads for the Generative Language REST API.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::content::{GeneratedImage, InputPart, OutputPart, RunOutput};
use crate::errors::ProviderError;
use crate::model::ProviderId;
use crate::provider::{
    ProviderImageRequest, ProviderImageResponse, ProviderRequest, ProviderResponse,
    ProviderResponseMeta,
};

/// Content container used in requests.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

/// Untagged union of text and inline media request parts.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub(crate) enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationConfig {
    fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.top_p.is_none()
            && self.top_k.is_none()
            && self.response_mime_type.is_none()
            && self.response_schema.is_none()
    }
}

/// `models/{model}:generateContent` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Response parts are decoded leniently: thought and tool-call parts carry
/// no `text` and are skipped.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub thought: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// `models/{model}:generateContent` response envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PredictInstance {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OutputOptions {
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PredictParameters {
    pub sample_count: u32,
    pub aspect_ratio: String,
    pub output_options: OutputOptions,
}

/// `models/{model}:predict` request body used for Imagen models.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PredictRequest {
    pub instances: Vec<PredictInstance>,
    pub parameters: PredictParameters,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Prediction {
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub rai_filtered_reason: Option<String>,
}

/// `models/{model}:predict` response. A missing `predictions` key means the
/// model produced no images.
#[derive(Debug, Deserialize)]
pub(crate) struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

pub(crate) fn build_generate_content_request(
    req: &ProviderRequest,
) -> Result<GenerateContentRequest, serde_json::Error> {
    let mut parts = Vec::with_capacity(req.input_parts.len());
    for part in &req.input_parts {
        match part {
            InputPart::Text(text) => parts.push(Part::Text { text: text.clone() }),
            InputPart::Json(value) => parts.push(Part::Text {
                text: serde_json::to_string(value)?,
            }),
            InputPart::InlineData(data) => parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: data.mime_type.clone(),
                    data: data.data.clone(),
                },
            }),
        }
    }

    let system_instruction = req.system_prompt.as_ref().map(|text| Content {
        role: None,
        parts: vec![Part::Text { text: text.clone() }],
    });

    let generation = GenerationConfig {
        temperature: req.generation.temperature,
        top_p: req.generation.top_p,
        top_k: req.generation.top_k,
        response_mime_type: req.generation.response_mime_type.clone(),
        response_schema: req.generation.response_schema.clone(),
    };

    Ok(GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
        system_instruction,
        generation_config: (!generation.is_empty()).then_some(generation),
    })
}

pub(crate) fn into_provider_response(response: GenerateContentResponse) -> ProviderResponse {
    let block_reason = response.prompt_feedback.and_then(|f| f.block_reason);
    let Some(candidate) = response.candidates.into_iter().next() else {
        return ProviderResponse {
            output: RunOutput::default(),
            metadata: ProviderResponseMeta { block_reason },
        };
    };

    let parts = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|part| part.thought != Some(true))
        .filter_map(|part| part.text)
        .map(OutputPart::Text)
        .collect();

    ProviderResponse {
        output: RunOutput {
            parts,
            finish_reason: candidate.finish_reason,
        },
        metadata: ProviderResponseMeta { block_reason },
    }
}

pub(crate) fn build_predict_request(req: &ProviderImageRequest) -> PredictRequest {
    PredictRequest {
        instances: vec![PredictInstance {
            prompt: req.prompt.clone(),
        }],
        parameters: PredictParameters {
            sample_count: req.image.number_of_images,
            aspect_ratio: req.image.aspect_ratio.as_str().to_string(),
            output_options: OutputOptions {
                mime_type: req.image.output_mime_type.clone(),
            },
        },
    }
}

pub(crate) fn into_provider_image_response(
    provider: &ProviderId,
    response: PredictResponse,
) -> Result<ProviderImageResponse, ProviderError> {
    let mut images = Vec::new();
    let mut filtered = None;
    for prediction in response.predictions {
        let Some(encoded) = prediction.bytes_base64_encoded else {
            if prediction.rai_filtered_reason.is_some() {
                filtered = prediction.rai_filtered_reason;
            }
            continue;
        };
        let bytes = BASE64.decode(encoded.as_bytes()).map_err(|e| {
            ProviderError::protocol(provider.clone(), format!("invalid image base64: {e}"))
        })?;
        images.push(GeneratedImage {
            bytes,
            mime_type: prediction.mime_type,
        });
    }
    Ok(ProviderImageResponse {
        images,
        metadata: ProviderResponseMeta {
            block_reason: filtered,
        },
    })
}
