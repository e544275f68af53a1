use std::time::Instant;

use agent_studio_harness::vendors::gemini::{GEMINI_PROVIDER, GeminiClientConfig};
use agent_studio_harness::{
    AspectRatio, Harness, HarnessError, ModelRef, RunOutput, Session, SessionConfig,
};
use futures::future::try_join_all;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::catalog::TaskFamily;
use crate::config::{DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, MAX_STORYBOARD_SCENES, StudioConfig};
use crate::error::GenerationError;
use crate::media::MediaEncoder;
use crate::prompts::{
    DEFAULT_STORYBOARD_SCENES, storyboard_director_instruction, storyboard_schema,
    system_instruction,
};
use crate::request::GenerationRequest;
use crate::result::{GenerationResult, ImageDataUri};

/// Prompt sent alongside an uploaded file when the user typed nothing.
pub const DEFAULT_MEDIA_PROMPT: &str = "Analyze what you see in the media and describe it.";

/// Output format requested from the image model.
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

const TEXT_TEMPERATURE: f32 = 0.5;
const TEXT_TOP_P: f32 = 0.95;
const TEXT_TOP_K: u32 = 64;

/// Anything that turns a validated request into a result.
///
/// `Orchestrator` is the production implementation; the workbench depends
/// only on this trait.
#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError>;
}

/// Models and storyboard size used by the orchestrator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrchestratorSettings {
    pub text_model: String,
    pub image_model: String,
    pub storyboard_scenes: usize,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            storyboard_scenes: DEFAULT_STORYBOARD_SCENES,
        }
    }
}

impl From<&StudioConfig> for OrchestratorSettings {
    fn from(config: &StudioConfig) -> Self {
        Self {
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            storyboard_scenes: config.storyboard_scenes.clamp(1, MAX_STORYBOARD_SCENES),
        }
    }
}

/// Routes each request to the text, image or storyboard flow and calls the
/// model through the harness.
///
/// Without a harness (no credential) every call fails with
/// `GenerationError::NotConfigured` before any network traffic.
#[derive(Clone)]
pub struct Orchestrator {
    harness: Option<Harness>,
    settings: OrchestratorSettings,
    media: MediaEncoder,
}

#[derive(Debug, Deserialize)]
struct SceneList {
    #[serde(default)]
    scenes: Vec<String>,
}

impl Orchestrator {
    /// Orchestrator calling the models registered on `harness`.
    pub fn new(harness: Harness, settings: OrchestratorSettings, media: MediaEncoder) -> Self {
        Self {
            harness: Some(harness),
            settings,
            media,
        }
    }

    /// Orchestrator that rejects every request with `NotConfigured`.
    pub fn unconfigured(settings: OrchestratorSettings, media: MediaEncoder) -> Self {
        Self {
            harness: None,
            settings,
            media,
        }
    }

    /// Builds the production orchestrator: a Gemini provider when a
    /// credential is present and FFmpeg-backed video frames.
    pub fn from_config(config: &StudioConfig) -> Result<Self, HarnessError> {
        let settings = OrchestratorSettings::from(config);
        let media = MediaEncoder::with_ffmpeg(config.frame_timeout);
        let Some(api_key) = config.api_key.as_deref() else {
            return Ok(Self::unconfigured(settings, media));
        };
        let harness = Harness::gemini(
            GeminiClientConfig::new(api_key)
                .base_url(config.base_url.clone())
                .timeout(config.request_timeout),
        )?;
        Ok(Self::new(harness, settings, media))
    }

    pub fn is_configured(&self) -> bool {
        self.harness.is_some()
    }

    fn text_model(&self) -> ModelRef {
        ModelRef::new(GEMINI_PROVIDER, self.settings.text_model.clone())
    }

    fn image_model(&self) -> ModelRef {
        ModelRef::new(GEMINI_PROVIDER, self.settings.image_model.clone())
    }

    async fn generate_text(
        &self,
        session: &Session,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let accepts = request.task.task().accepts;
        let mut run = session
            .run(self.text_model())
            .system_prompt(system_instruction(request.task))
            .temperature(TEXT_TEMPERATURE)
            .top_p(TEXT_TOP_P)
            .top_k(TEXT_TOP_K);
        run = match &request.file {
            Some(file) if accepts.takes_file() => {
                let media = self.media.encode(file, accepts).await?;
                let prompt = if request.text.trim().is_empty() {
                    DEFAULT_MEDIA_PROMPT
                } else {
                    request.text.as_str()
                };
                run.inline_data(media.to_inline_data()).user_text(prompt)
            }
            _ => run.user_text(request.text.clone()),
        };
        Ok(GenerationResult::Text(run.collect_text().await?))
    }

    async fn generate_image(
        &self,
        session: &Session,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let image = self
            .render(session, request.text.clone(), AspectRatio::Square)
            .await?;
        Ok(GenerationResult::Image(image))
    }

    async fn generate_storyboard(
        &self,
        session: &Session,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let count = self.settings.storyboard_scenes;
        let output = session
            .run(self.text_model())
            .system_prompt(storyboard_director_instruction(count))
            .user_text(request.text.clone())
            .json_schema(storyboard_schema())
            .collect_output()
            .await?;
        let mut scenes = parse_scenes(&output)?;
        if scenes.len() > count {
            debug!(
                event = "storyboard.scenes_truncated",
                domain = "studio",
                returned = scenes.len() as u64,
                kept = count as u64
            );
            scenes.truncate(count);
        }
        if let Some(index) = scenes.iter().position(|scene| scene.is_empty()) {
            return Err(GenerationError::Parse(format!(
                "scene {} of the scene list is blank",
                index + 1
            )));
        }
        info!(
            event = "storyboard.scenes_planned",
            domain = "studio",
            session_id = %session.id(),
            scenes = scenes.len() as u64
        );

        let frames = scenes
            .into_iter()
            .map(|scene| self.render(session, scene, AspectRatio::Widescreen));
        let images = try_join_all(frames).await?;
        Ok(GenerationResult::Storyboard(images))
    }

    async fn render(
        &self,
        session: &Session,
        prompt: String,
        aspect_ratio: AspectRatio,
    ) -> Result<ImageDataUri, GenerationError> {
        let image = session
            .images(self.image_model())
            .prompt(prompt)
            .number_of_images(1)
            .aspect_ratio(aspect_ratio)
            .output_mime_type(IMAGE_MIME_TYPE)
            .generate_one()
            .await?;
        Ok(ImageDataUri::from_bytes(IMAGE_MIME_TYPE, &image.bytes))
    }
}

#[async_trait::async_trait]
impl Generator for Orchestrator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let task = request.task;
        let Some(harness) = self.harness.as_ref() else {
            warn!(
                event = "generation.not_configured",
                domain = "studio",
                task = task.slug()
            );
            return Err(GenerationError::NotConfigured);
        };

        let session = harness.session(SessionConfig::named(task.slug()));
        let family = task.family();
        info!(
            event = "generation.started",
            domain = "studio",
            task = task.slug(),
            family = ?family,
            session_id = %session.id(),
            has_file = request.file.is_some(),
            text_len = request.text.len() as u64
        );
        let started = Instant::now();
        let result = match family {
            TaskFamily::Text => self.generate_text(&session, request).await,
            TaskFamily::ImageCreate => self.generate_image(&session, request).await,
            TaskFamily::Storyboard => self.generate_storyboard(&session, request).await,
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(output) => info!(
                event = "generation.completed",
                domain = "studio",
                task = task.slug(),
                session_id = %session.id(),
                elapsed_ms = elapsed_ms,
                images = output.images().len() as u64
            ),
            Err(err) => warn!(
                event = "generation.failed",
                domain = "studio",
                task = task.slug(),
                session_id = %session.id(),
                code = err.code(),
                elapsed_ms = elapsed_ms,
                error = %err
            ),
        }
        result
    }
}

/// Reads the trimmed scene prompts, in order, from the JSON text of a
/// structured response. Blank entries are kept so callers can reject them.
fn parse_scenes(output: &RunOutput) -> Result<Vec<String>, GenerationError> {
    let raw = output.text();
    if raw.trim().is_empty() {
        return Err(GenerationError::EmptyResult(
            "received an empty scene list from the model".into(),
        ));
    }
    let list: SceneList =
        serde_json::from_str(raw.trim()).map_err(|e| GenerationError::Parse(e.to_string()))?;
    if list.scenes.is_empty() {
        return Err(GenerationError::EmptyResult(
            "the model did not return any storyboard scenes".into(),
        ));
    }
    Ok(list
        .scenes
        .into_iter()
        .map(|scene| scene.trim().to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use agent_studio_harness::{
        GeneratedImage, InputPart, OutputPart, ProviderAdapter, ProviderError, ProviderId,
        ProviderImageRequest, ProviderImageResponse, ProviderRequest, ProviderResponse,
    };

    use crate::catalog::TaskId;
    use crate::media::{FrameSource, MediaError, UploadedFile};

    #[derive(Default)]
    struct FakeGemini {
        content_calls: AtomicUsize,
        image_calls: AtomicUsize,
        content_reply: Mutex<Option<Result<RunOutput, ProviderError>>>,
        content_requests: Mutex<Vec<ProviderRequest>>,
        image_requests: Mutex<Vec<ProviderImageRequest>>,
        image_delays: HashMap<String, Duration>,
        empty_prompts: Vec<String>,
        completion_order: Mutex<Vec<String>>,
    }

    impl FakeGemini {
        fn replying_text(text: &str) -> Self {
            Self::replying(Ok(RunOutput {
                parts: vec![OutputPart::Text(text.to_string())],
                finish_reason: Some("STOP".into()),
            }))
        }

        fn replying(reply: Result<RunOutput, ProviderError>) -> Self {
            Self {
                content_reply: Mutex::new(Some(reply)),
                ..Self::default()
            }
        }
    }

    #[async_trait::async_trait]
    impl ProviderAdapter for FakeGemini {
        fn id(&self) -> ProviderId {
            ProviderId::new(GEMINI_PROVIDER)
        }

        async fn generate_content(
            &self,
            req: ProviderRequest,
        ) -> Result<ProviderResponse, ProviderError> {
            self.content_calls.fetch_add(1, Ordering::SeqCst);
            self.content_requests.lock().expect("lock").push(req);
            let reply = self
                .content_reply
                .lock()
                .expect("lock")
                .clone()
                .expect("content reply configured");
            reply.map(|output| ProviderResponse {
                output,
                ..ProviderResponse::default()
            })
        }

        async fn generate_images(
            &self,
            req: ProviderImageRequest,
        ) -> Result<ProviderImageResponse, ProviderError> {
            self.image_calls.fetch_add(1, Ordering::SeqCst);
            let prompt = req.prompt.clone();
            self.image_requests.lock().expect("lock").push(req);
            if let Some(delay) = self.image_delays.get(&prompt) {
                tokio::time::sleep(*delay).await;
            }
            self.completion_order
                .lock()
                .expect("lock")
                .push(prompt.clone());
            if self.empty_prompts.contains(&prompt) {
                return Ok(ProviderImageResponse::default());
            }
            Ok(ProviderImageResponse {
                images: vec![GeneratedImage {
                    bytes: prompt.into_bytes(),
                    mime_type: Some("image/jpeg".into()),
                }],
                ..ProviderImageResponse::default()
            })
        }
    }

    struct FixedFrames;

    #[async_trait::async_trait]
    impl FrameSource for FixedFrames {
        async fn duration(&self, _path: &Path) -> Result<Option<f64>, MediaError> {
            Ok(Some(8.0))
        }

        async fn capture_jpeg(&self, _path: &Path, _at: f64) -> Result<Vec<u8>, MediaError> {
            Ok(vec![0xff, 0xd8, 0xff, 0xd9])
        }
    }

    fn media() -> MediaEncoder {
        MediaEncoder::new(Arc::new(FixedFrames), Duration::from_secs(5))
    }

    fn orchestrator(provider: Arc<FakeGemini>) -> Orchestrator {
        let harness = Harness::builder()
            .register_provider(provider)
            .build()
            .expect("harness");
        Orchestrator::new(harness, OrchestratorSettings::default(), media())
    }

    fn scenes_reply(scenes: &[&str]) -> Result<RunOutput, ProviderError> {
        Ok(RunOutput {
            parts: vec![OutputPart::Text(
                serde_json::json!({ "scenes": scenes }).to_string(),
            )],
            finish_reason: Some("STOP".into()),
        })
    }

    fn decoded(images: &[ImageDataUri]) -> Vec<String> {
        images
            .iter()
            .map(|image| image.decode().expect("base64"))
            .map(|bytes| String::from_utf8(bytes).expect("utf8"))
            .collect()
    }

    #[tokio::test]
    async fn text_task_uses_task_instruction_and_sampling() {
        let fake = Arc::new(FakeGemini::replying_text("## Strengths\n- brand"));
        let orch = orchestrator(fake.clone());

        let result = orch
            .generate(&GenerationRequest::new(TaskId::Swot).text("Acme sells anvils"))
            .await
            .expect("generate");

        assert_eq!(result.as_text(), Some("## Strengths\n- brand"));
        let requests = fake.content_requests.lock().expect("lock");
        let req = &requests[0];
        assert_eq!(req.model.model, DEFAULT_TEXT_MODEL);
        assert_eq!(
            req.system_prompt.as_deref(),
            Some(system_instruction(TaskId::Swot))
        );
        assert_eq!(req.generation.temperature, Some(0.5));
        assert_eq!(req.generation.top_p, Some(0.95));
        assert_eq!(req.generation.top_k, Some(64));
        assert_eq!(
            req.input_parts,
            vec![InputPart::Text("Acme sells anvils".into())]
        );
    }

    #[tokio::test]
    async fn image_analysis_sends_media_before_default_prompt() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cat.png");
        std::fs::write(&path, [1u8, 2, 3]).expect("write");
        let fake = Arc::new(FakeGemini::replying_text("A cat."));
        let orch = orchestrator(fake.clone());

        orch.generate(
            &GenerationRequest::new(TaskId::ImageAnalysis)
                .text("   ")
                .file(UploadedFile::new(&path, "image/png")),
        )
        .await
        .expect("generate");

        let requests = fake.content_requests.lock().expect("lock");
        let parts = &requests[0].input_parts;
        assert_eq!(parts.len(), 2);
        assert!(matches!(
            &parts[0],
            InputPart::InlineData(data) if data.mime_type == "image/png" && data.data == "AQID"
        ));
        assert_eq!(parts[1], InputPart::Text(DEFAULT_MEDIA_PROMPT.into()));
    }

    #[tokio::test]
    async fn video_analysis_sends_a_jpeg_frame() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, b"not really a video").expect("write");
        let fake = Arc::new(FakeGemini::replying_text("A beach."));
        let orch = orchestrator(fake.clone());

        orch.generate(
            &GenerationRequest::new(TaskId::VideoAnalysis)
                .text("Where is this?")
                .file(UploadedFile::new(&path, "video/mp4")),
        )
        .await
        .expect("generate");

        let requests = fake.content_requests.lock().expect("lock");
        let parts = &requests[0].input_parts;
        assert!(matches!(
            &parts[0],
            InputPart::InlineData(data) if data.mime_type == "image/jpeg"
        ));
        assert_eq!(parts[1], InputPart::Text("Where is this?".into()));
    }

    #[tokio::test]
    async fn media_failure_skips_the_model_call() {
        let fake = Arc::new(FakeGemini::replying_text("unused"));
        let orch = orchestrator(fake.clone());

        let err = orch
            .generate(
                &GenerationRequest::new(TaskId::ImageAnalysis)
                    .file(UploadedFile::new("/definitely/missing.png", "image/png")),
            )
            .await
            .expect_err("missing file");

        assert!(matches!(err, GenerationError::Media(MediaError::Read { .. })));
        assert_eq!(fake.content_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_model_text_is_an_empty_result() {
        let fake = Arc::new(FakeGemini::replying_text("  "));
        let err = orchestrator(fake)
            .generate(&GenerationRequest::new(TaskId::KeyInsights).text("reviews"))
            .await
            .expect_err("empty");
        assert!(matches!(err, GenerationError::EmptyResult(_)));
    }

    #[tokio::test]
    async fn transport_failure_is_reported_once_without_retry() {
        let fake = Arc::new(FakeGemini::replying(Err(ProviderError::transport(
            GEMINI_PROVIDER,
            "connection reset",
        ))));
        let err = orchestrator(fake.clone())
            .generate(&GenerationRequest::new(TaskId::CodeGenerator).text("fizzbuzz"))
            .await
            .expect_err("transport");

        assert!(matches!(err, GenerationError::Service(_)));
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(fake.content_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn image_create_makes_one_square_jpeg_call() {
        let fake = Arc::new(FakeGemini::default());
        let result = orchestrator(fake.clone())
            .generate(&GenerationRequest::new(TaskId::ImageCreate).text("a red fox"))
            .await
            .expect("generate");

        let GenerationResult::Image(image) = result else {
            panic!("expected an image result");
        };
        assert!(image.as_str().starts_with("data:image/jpeg;base64,"));
        assert_eq!(fake.image_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fake.content_calls.load(Ordering::SeqCst), 0);
        let requests = fake.image_requests.lock().expect("lock");
        assert_eq!(requests[0].model.model, DEFAULT_IMAGE_MODEL);
        assert_eq!(requests[0].image.aspect_ratio, AspectRatio::Square);
        assert_eq!(requests[0].image.number_of_images, 1);
        assert_eq!(requests[0].image.output_mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn image_create_with_zero_images_fails() {
        let fake = Arc::new(FakeGemini {
            empty_prompts: vec!["a red fox".into()],
            ..FakeGemini::default()
        });
        let err = orchestrator(fake)
            .generate(&GenerationRequest::new(TaskId::ImageCreate).text("a red fox"))
            .await
            .expect_err("no image");
        assert!(matches!(err, GenerationError::EmptyResult(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn storyboard_keeps_scene_order_when_calls_finish_out_of_order() {
        let fake = Arc::new(FakeGemini {
            content_reply: Mutex::new(Some(scenes_reply(&["dawn", "noon", "dusk"]))),
            image_delays: HashMap::from([
                ("dawn".to_string(), Duration::from_millis(300)),
                ("noon".to_string(), Duration::from_millis(200)),
                ("dusk".to_string(), Duration::from_millis(100)),
            ]),
            ..FakeGemini::default()
        });
        let result = orchestrator(fake.clone())
            .generate(&GenerationRequest::new(TaskId::StoryboardCreator).text("a day at sea"))
            .await
            .expect("storyboard");

        let GenerationResult::Storyboard(images) = result else {
            panic!("expected a storyboard");
        };
        assert_eq!(decoded(&images), vec!["dawn", "noon", "dusk"]);
        assert_eq!(
            *fake.completion_order.lock().expect("lock"),
            vec!["dusk", "noon", "dawn"]
        );
        assert_eq!(fake.image_calls.load(Ordering::SeqCst), 3);
        assert!(
            fake.image_requests
                .lock()
                .expect("lock")
                .iter()
                .all(|req| req.image.aspect_ratio == AspectRatio::Widescreen)
        );

        let content = fake.content_requests.lock().expect("lock");
        assert_eq!(
            content[0].generation.response_mime_type.as_deref(),
            Some("application/json")
        );
        assert_eq!(content[0].generation.response_schema, Some(storyboard_schema()));
        assert_eq!(
            content[0].system_prompt,
            Some(storyboard_director_instruction(3))
        );
    }

    #[tokio::test]
    async fn storyboard_fails_whole_when_one_scene_has_no_image() {
        let fake = Arc::new(FakeGemini {
            content_reply: Mutex::new(Some(scenes_reply(&["dawn", "noon", "dusk"]))),
            empty_prompts: vec!["noon".into()],
            ..FakeGemini::default()
        });
        let err = orchestrator(fake)
            .generate(&GenerationRequest::new(TaskId::StoryboardCreator).text("a day at sea"))
            .await
            .expect_err("partial storyboard");
        assert!(matches!(err, GenerationError::EmptyResult(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn storyboard_fails_as_soon_as_one_scene_fails() {
        let fake = Arc::new(FakeGemini {
            content_reply: Mutex::new(Some(scenes_reply(&["dawn", "noon"]))),
            image_delays: HashMap::from([
                ("dawn".to_string(), Duration::from_secs(10)),
                ("noon".to_string(), Duration::from_millis(100)),
            ]),
            empty_prompts: vec!["noon".into()],
            ..FakeGemini::default()
        });
        let started = tokio::time::Instant::now();
        let result = orchestrator(fake.clone())
            .generate(&GenerationRequest::new(TaskId::StoryboardCreator).text("a day at sea"))
            .await;

        assert!(matches!(result, Err(GenerationError::EmptyResult(_))));
        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(fake.image_calls.load(Ordering::SeqCst), 2);
        assert_eq!(*fake.completion_order.lock().expect("lock"), vec!["noon"]);
    }

    #[tokio::test]
    async fn storyboard_rejects_a_blank_scene_instead_of_shifting() {
        let fake = Arc::new(FakeGemini::replying(scenes_reply(&["dawn", "   ", "dusk"])));
        let err = orchestrator(fake.clone())
            .generate(&GenerationRequest::new(TaskId::StoryboardCreator).text("a day at sea"))
            .await
            .expect_err("blank scene");

        assert!(matches!(err, GenerationError::Parse(message) if message.contains("scene 2")));
        assert_eq!(fake.image_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn storyboard_drops_scenes_beyond_the_configured_count() {
        let fake = Arc::new(FakeGemini {
            content_reply: Mutex::new(Some(scenes_reply(&["a", "b", "c", "d", " "]))),
            ..FakeGemini::default()
        });
        let result = orchestrator(fake.clone())
            .generate(&GenerationRequest::new(TaskId::StoryboardCreator).text("alphabet"))
            .await
            .expect("storyboard");
        assert_eq!(decoded(result.images()), vec!["a", "b", "c"]);
        assert_eq!(fake.image_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn storyboard_rejects_unparseable_or_empty_scene_lists() {
        let fake = Arc::new(FakeGemini::replying_text("not json"));
        let err = orchestrator(fake.clone())
            .generate(&GenerationRequest::new(TaskId::StoryboardCreator).text("x"))
            .await
            .expect_err("parse");
        assert!(matches!(err, GenerationError::Parse(_)));
        assert_eq!(fake.image_calls.load(Ordering::SeqCst), 0);

        let fake = Arc::new(FakeGemini::replying(scenes_reply(&[])));
        let err = orchestrator(fake)
            .generate(&GenerationRequest::new(TaskId::StoryboardCreator).text("x"))
            .await
            .expect_err("empty");
        assert!(matches!(err, GenerationError::EmptyResult(_)));
    }

    #[tokio::test]
    async fn unconfigured_orchestrator_rejects_every_task() {
        let orch = Orchestrator::unconfigured(OrchestratorSettings::default(), media());
        assert!(!orch.is_configured());
        for task in TaskId::ALL {
            let err = orch
                .generate(&GenerationRequest::new(task).text("anything"))
                .await
                .expect_err("not configured");
            assert_eq!(err, GenerationError::NotConfigured);
        }
    }

    #[test]
    fn from_config_without_key_is_unconfigured() {
        let orch = Orchestrator::from_config(&StudioConfig::default()).expect("build");
        assert!(!orch.is_configured());
        let orch = Orchestrator::from_config(&StudioConfig::default().api_key("k")).expect("build");
        assert!(orch.is_configured());
    }

    #[test]
    fn settings_clamp_the_scene_count() {
        let config = StudioConfig {
            storyboard_scenes: 500,
            ..StudioConfig::default()
        };
        assert_eq!(
            OrchestratorSettings::from(&config).storyboard_scenes,
            MAX_STORYBOARD_SCENES
        );
    }
}
