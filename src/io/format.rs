//! Format definitions for CLI output.
//!
//! Text output lists each requested type followed by its methods, one per
//! line and tab-indented. JSON output wraps the [`FindReport`] in a
//! [`JsonResponse`] envelope so success and failure share one structure.

use std::fmt::Write as _;

use crate::error::FindError;
use crate::finder::FindReport;
use crate::io::exit_code::ExitCode;
use chrono::Utc;
use serde::Serialize;

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text (default)
    Text,
    /// JSON for tool integration
    Json,
}

impl OutputFormat {
    /// Create format from JSON flag.
    #[must_use]
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Standard JSON response format.
#[derive(Debug, Serialize)]
pub struct JsonResponse<T = serde_json::Value>
where
    T: Serialize,
{
    /// Status: "success" or "error"
    pub status: String,

    /// Result code (e.g., "OK", "PARSE_ERROR")
    pub code: String,

    pub message: String,

    /// Actual data payload (only for success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Per-package failures (only for errors)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorDetails>,

    /// Exit code for shell scripts
    pub exit_code: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

/// One failure with its recovery suggestions.
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ResponseMeta {
    pub fn now(execution_time_ms: u64) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Some(format_utc_timestamp()),
            execution_time_ms: Some(execution_time_ms),
        }
    }
}

impl<T> JsonResponse<T>
where
    T: Serialize,
{
    /// Create a success response with data.
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            code: "OK".to_string(),
            message: "Operation completed successfully".to_string(),
            data: Some(data),
            errors: Vec::new(),
            exit_code: ExitCode::Success as u8,
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: ResponseMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

impl JsonResponse<serde_json::Value> {
    /// Create an error response from a failed find.
    pub fn from_error(error: &FindError) -> Self {
        let errors = match error {
            FindError::Discovery(failures) => failures
                .iter()
                .map(|e| ErrorDetails {
                    code: e.status_code(),
                    message: e.to_string(),
                    suggestions: e.recovery_suggestions().iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
            FindError::InvalidRoot { .. } => vec![ErrorDetails {
                code: error.status_code(),
                message: error.to_string(),
                suggestions: vec!["Pass the directory that contains the package sources".to_string()],
            }],
        };

        Self {
            status: "error".to_string(),
            code: error.status_code(),
            message: error.to_string(),
            data: None,
            errors,
            exit_code: ExitCode::from_find_error(error) as u8,
            meta: None,
        }
    }
}

/// Render a report as text: each type name, then its methods tab-indented.
pub fn render_text(report: &FindReport) -> String {
    let mut out = String::new();
    for entry in &report.types {
        let _ = writeln!(out, "{}", entry.name);
        for method in &entry.methods {
            let _ = writeln!(out, "\t{}", method.name);
        }
    }
    out
}

/// Format current time as "YYYY-MM-DD HH:MM:SS UTC".
pub fn format_utc_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
