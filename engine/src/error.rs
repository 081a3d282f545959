//! Structured error types for the Folio report generator.
//!
//! Input-shape problems are the form layer's job and are not re-validated
//! here. What remains are the real failure sources: parsing input, loading
//! configuration and images, and serializing the PDF.

use thiserror::Error;

/// The unified error type returned by all public Folio API functions.
#[derive(Debug, Error)]
pub enum FolioError {
    /// JSON input failed to parse as a report of the requested kind.
    #[error("Failed to parse report data: {source}{}", format_hint(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },
    /// A layout configuration file could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),
    /// An image asset could not be loaded or decoded.
    #[error("Image error: {0}")]
    Image(String),
    /// Reading an input file failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// PDF generation failed.
    #[error("Render error: {0}")]
    Render(String),
}

fn format_hint(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the report schema. Check field names (camelCase) and types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        FolioError::Parse { source: e, hint }
    }
}
