use std::str::FromStr;
use std::time::Duration;

use agent_studio_harness::vendors::gemini::DEFAULT_GEMINI_BASE_URL;
use tracing::warn;

use crate::prompts::DEFAULT_STORYBOARD_SCENES;

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-3.0-generate-002";

/// Upper bound on storyboard scenes; each scene is one image request.
pub const MAX_STORYBOARD_SCENES: usize = 8;

/// Runtime settings for the orchestrator.
///
/// Environment variables (read by `from_env`):
/// - `API_KEY` (or `GEMINI_API_KEY`): credential; when absent every generation fails fast.
/// - `STUDIO_API_BASE`: API base URL.
/// - `STUDIO_TEXT_MODEL` / `STUDIO_IMAGE_MODEL`: model names.
/// - `STUDIO_REQUEST_TIMEOUT_MS`: HTTP timeout.
/// - `STUDIO_FRAME_TIMEOUT_MS`: video frame extraction timeout.
/// - `STUDIO_STORYBOARD_SCENES`: storyboard scene count, 1 to `MAX_STORYBOARD_SCENES`.
#[derive(Clone, Debug, PartialEq)]
pub struct StudioConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub request_timeout: Duration,
    pub frame_timeout: Duration,
    pub storyboard_scenes: usize,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            request_timeout: Duration::from_millis(120_000),
            frame_timeout: Duration::from_millis(30_000),
            storyboard_scenes: DEFAULT_STORYBOARD_SCENES,
        }
    }
}

impl StudioConfig {
    /// Builds the config from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = non_empty("API_KEY").or_else(|| non_empty("GEMINI_API_KEY"));
        if api_key.is_none() {
            warn!(
                event = "config.api_key_missing",
                domain = "config",
                "API_KEY environment variable not found; generation requests will fail"
            );
        }

        let storyboard_scenes = parse_or(
            "STUDIO_STORYBOARD_SCENES",
            non_empty("STUDIO_STORYBOARD_SCENES"),
            defaults.storyboard_scenes,
        );

        Self {
            api_key,
            base_url: non_empty("STUDIO_API_BASE").unwrap_or(defaults.base_url),
            text_model: non_empty("STUDIO_TEXT_MODEL").unwrap_or(defaults.text_model),
            image_model: non_empty("STUDIO_IMAGE_MODEL").unwrap_or(defaults.image_model),
            request_timeout: Duration::from_millis(parse_or(
                "STUDIO_REQUEST_TIMEOUT_MS",
                non_empty("STUDIO_REQUEST_TIMEOUT_MS"),
                defaults.request_timeout.as_millis() as u64,
            )),
            frame_timeout: Duration::from_millis(parse_or(
                "STUDIO_FRAME_TIMEOUT_MS",
                non_empty("STUDIO_FRAME_TIMEOUT_MS"),
                defaults.frame_timeout.as_millis() as u64,
            )),
            storyboard_scenes: checked_scene_count(storyboard_scenes, defaults.storyboard_scenes),
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    pub fn image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn frame_timeout(mut self, timeout: Duration) -> Self {
        self.frame_timeout = timeout;
        self
    }

    /// Sets the scene count, clamped to `1..=MAX_STORYBOARD_SCENES`.
    pub fn storyboard_scenes(mut self, count: usize) -> Self {
        self.storyboard_scenes = count.clamp(1, MAX_STORYBOARD_SCENES);
        self
    }
}

fn checked_scene_count(count: usize, default: usize) -> usize {
    if count == 0 {
        warn!(
            event = "config.invalid_value",
            domain = "config",
            key = "STUDIO_STORYBOARD_SCENES",
            "scene count must be at least 1; using default"
        );
        return default;
    }
    if count > MAX_STORYBOARD_SCENES {
        warn!(
            event = "config.invalid_value",
            domain = "config",
            key = "STUDIO_STORYBOARD_SCENES",
            requested = count as u64,
            max = MAX_STORYBOARD_SCENES as u64,
            "scene count above maximum; clamping"
        );
        return MAX_STORYBOARD_SCENES;
    }
    count
}

fn parse_or<T: FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(
                event = "config.invalid_value",
                domain = "config",
                key = key,
                value = raw.as_str(),
                "could not parse value; using default"
            );
            default
        }),
    }
}
