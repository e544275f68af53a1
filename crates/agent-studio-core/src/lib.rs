//! Agent Studio core: the task catalog, per-task system instructions, media
//! preparation and the generation orchestrator.
//!
//! ```no_run
//! use agent_studio_core::{Orchestrator, StudioConfig, TaskId, Workbench};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = Orchestrator::from_config(&StudioConfig::from_env())?;
//! let mut bench = Workbench::new(TaskId::Swot);
//! bench.set_text("A bakery opening a second location downtown.");
//! bench.submit(&orchestrator).await;
//! if let Some(text) = bench.output().and_then(|out| out.as_text()) {
//!     println!("{text}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod media;
pub mod observability;
pub mod orchestrator;
pub mod prompts;
pub mod request;
pub mod result;
pub mod workbench;

pub use catalog::{InputKind, TASKS, Task, TaskFamily, TaskId, UnknownTask};
pub use config::StudioConfig;
pub use error::GenerationError;
pub use media::{MediaEncoder, MediaError, MediaPart, UploadedFile};
pub use orchestrator::{Generator, Orchestrator, OrchestratorSettings};
pub use request::{GenerationRequest, ValidationError};
pub use result::{GenerationResult, ImageDataUri};
pub use workbench::{RequestPhase, Workbench};
