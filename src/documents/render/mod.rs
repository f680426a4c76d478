//! Rendering backends turning composed document parts into PDF bytes.
//!
//! - `markup` - HTML handed to an external headless print engine
//! - `direct` - drawn in-process through the layout manager
//!
//! Both implement [`RenderBackend`] and are chosen by configuration.

pub mod direct;
pub mod markup;

pub use direct::DirectDrawBackend;
pub use markup::{MarkupBackend, PrintCommand};

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use super::model::DocumentPart;

/// Errors raised by a rendering backend.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write markup source: {0}")]
    WriteMarkup(#[source] std::io::Error),
    #[error("failed to start print engine `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("print engine execution failed: {0}")]
    Wait(#[source] std::io::Error),
    #[error("print engine exited with status {code}: {stderr}")]
    Exit { code: i32, stderr: String },
    #[error("print engine timed out after {0:?}")]
    Timeout(Duration),
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
    #[error("renderer produced no valid PDF output")]
    InvalidOutput,
    #[error("failed to build PDF: {0}")]
    Pdf(String),
    #[error("render worker failed: {0}")]
    Worker(String),
}

/// Renders one or more document parts into a single PDF.
///
/// Several parts end up in one file, each starting on a new page with its
/// own footer and page numbering.
#[async_trait]
pub trait RenderBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn render(&self, parts: &[DocumentPart]) -> Result<Vec<u8>, RenderError>;
}

/// Reject anything that is not a PDF.
pub fn ensure_pdf(bytes: Vec<u8>) -> Result<Vec<u8>, RenderError> {
    if bytes.len() >= 4 && bytes.starts_with(b"%PDF") {
        Ok(bytes)
    } else {
        Err(RenderError::InvalidOutput)
    }
}

/// Keep only the tail of a long stderr capture.
pub(crate) fn stderr_tail(stderr: &[u8]) -> String {
    const MAX_CHARS: usize = 500;
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    let count = trimmed.chars().count();
    if count <= MAX_CHARS {
        return trimmed.to_string();
    }
    trimmed.chars().skip(count - MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_pdf() {
        assert!(ensure_pdf(b"%PDF-1.7\n".to_vec()).is_ok());
        assert!(matches!(ensure_pdf(b"<html>".to_vec()), Err(RenderError::InvalidOutput)));
        assert!(matches!(ensure_pdf(Vec::new()), Err(RenderError::InvalidOutput)));
    }

    #[test]
    fn test_stderr_tail_truncates() {
        let long = "a".repeat(600) + "END";
        let tail = stderr_tail(long.as_bytes());
        assert_eq!(tail.chars().count(), 500);
        assert!(tail.ends_with("END"));
    }
}
