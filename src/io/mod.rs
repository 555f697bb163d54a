//! Output handling for the CLI.
//!
//! - Text and JSON rendering of find results
//! - Exit codes mapped from error kinds

pub mod exit_code;
pub mod format;

pub use exit_code::ExitCode;
pub use format::{ErrorDetails, JsonResponse, OutputFormat, ResponseMeta, render_text};
