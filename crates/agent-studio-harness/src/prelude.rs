//! Common imports for typical harness usage.
//!
//! This module intentionally exports the most frequently used builder/runtime
//! types so application code needs fewer import lines.
pub use crate::{
    AspectRatio, GeneratedImage, Harness, HarnessBuilder, HarnessError, ImageRunBuilder,
    InlineData, InputPart, ModelRef, OutputPart, ProviderId, RunBuilder, RunOutput, Session,
    SessionConfig,
};
