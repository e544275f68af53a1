use std::sync::Arc;

use crate::harness::HarnessInner;
use crate::model::ModelRef;
use crate::run::{ImageRunBuilder, RunBuilder};

/// Configuration used to create a `Session`.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Human-readable session name, carried into logs.
    pub name: String,
}

impl SessionConfig {
    /// Creates a named session config.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Logical grouping for runs that belong to one user action, such as the
/// scene-list call and the image calls of a storyboard.
///
/// Sessions are in-memory only and keep no history.
#[derive(Clone)]
pub struct Session {
    pub(crate) harness: Arc<HarnessInner>,
    pub(crate) session_id: uuid::Uuid,
    pub(crate) config: SessionConfig,
}

impl Session {
    pub(crate) fn new(harness: Arc<HarnessInner>, config: SessionConfig) -> Self {
        Self {
            harness,
            session_id: uuid::Uuid::new_v4(),
            config,
        }
    }

    /// Session id shared by every run started from this session.
    pub fn id(&self) -> uuid::Uuid {
        self.session_id
    }

    /// Starts building a content run for the given model.
    pub fn run(&self, model: ModelRef) -> RunBuilder {
        RunBuilder::new(
            self.harness.clone(),
            self.session_id,
            self.config.name.clone(),
            model,
        )
    }

    /// Starts building an image-generation run for the given model.
    pub fn images(&self, model: ModelRef) -> ImageRunBuilder {
        ImageRunBuilder::new(
            self.harness.clone(),
            self.session_id,
            self.config.name.clone(),
            model,
        )
    }
}
