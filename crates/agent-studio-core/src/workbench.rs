//! Interactive session state: selected task, inputs, last output and error
//! banner. Presentation layers drive a `Workbench` and render its fields.

use tracing::debug;

use crate::catalog::{Task, TaskId};
use crate::media::UploadedFile;
use crate::orchestrator::Generator;
use crate::request::GenerationRequest;
use crate::result::GenerationResult;

/// Lifecycle of the most recent submission.
///
/// `Idle -> Validating -> Dispatched -> Succeeded | Failed`; a validation
/// failure goes straight from `Validating` to `Failed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestPhase {
    #[default]
    Idle,
    Validating,
    Dispatched,
    Succeeded,
    Failed,
}

#[derive(Clone, Debug)]
pub struct Workbench {
    task: TaskId,
    text: String,
    file: Option<UploadedFile>,
    output: Option<GenerationResult>,
    error: Option<String>,
    loading: bool,
    phase: RequestPhase,
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new(TaskId::KeyInsights)
    }
}

impl Workbench {
    pub fn new(task: TaskId) -> Self {
        Self {
            task,
            text: String::new(),
            file: None,
            output: None,
            error: None,
            loading: false,
            phase: RequestPhase::Idle,
        }
    }

    /// Switches task and clears inputs, output and error.
    pub fn select_task(&mut self, task: TaskId) {
        self.task = task;
        self.text.clear();
        self.file = None;
        self.output = None;
        self.error = None;
        self.phase = RequestPhase::Idle;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_file(&mut self, file: Option<UploadedFile>) {
        self.file = file;
    }

    pub fn task(&self) -> &'static Task {
        self.task.task()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    pub fn output(&self) -> Option<&GenerationResult> {
        self.output.as_ref()
    }

    /// Error banner text, if the last submission failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    /// Validates the current inputs and, if they pass, runs one generation.
    ///
    /// Taking `&mut self` keeps a workbench to one request in flight.
    pub async fn submit(&mut self, generator: &dyn Generator) -> RequestPhase {
        self.phase = RequestPhase::Validating;
        let mut request = GenerationRequest::new(self.task).text(self.text.clone());
        request.file = self.file.clone();
        if let Err(err) = request.validate() {
            debug!(
                event = "workbench.validation_failed",
                domain = "studio",
                task = self.task.slug(),
                error = %err
            );
            self.error = Some(err.to_string());
            self.phase = RequestPhase::Failed;
            return self.phase;
        }

        self.loading = true;
        self.output = None;
        self.error = None;
        self.phase = RequestPhase::Dispatched;
        let result = generator.generate(&request).await;
        self.loading = false;
        match result {
            Ok(output) => {
                self.output = Some(output);
                self.phase = RequestPhase::Succeeded;
            }
            Err(err) => {
                self.error = Some(format!("An error occurred: {err}"));
                self.phase = RequestPhase::Failed;
            }
        }
        self.phase
    }
}
