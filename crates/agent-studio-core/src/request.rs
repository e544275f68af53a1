use crate::catalog::{InputKind, TaskId};
use crate::media::UploadedFile;

/// Input rejected before dispatch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please upload a file for this task.")]
    MissingFile,
    #[error("Input text cannot be empty.")]
    EmptyText,
}

/// One user action: a task plus whatever text and file were supplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub task: TaskId,
    pub text: String,
    pub file: Option<UploadedFile>,
}

impl GenerationRequest {
    pub fn new(task: TaskId) -> Self {
        Self {
            task,
            text: String::new(),
            file: None,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn file(mut self, file: UploadedFile) -> Self {
        self.file = Some(file);
        self
    }

    /// Checks the input against the task's accepted kind: file tasks need a
    /// file, text tasks need non-blank text.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.task.task().accepts {
            InputKind::Image | InputKind::Video if self.file.is_none() => {
                Err(ValidationError::MissingFile)
            }
            InputKind::Text if self.text.trim().is_empty() => Err(ValidationError::EmptyText),
            _ => Ok(()),
        }
    }
}
