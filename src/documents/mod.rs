//! Documents module - the rental contract generation engine.
//!
//! Turns a flat contract record, a contract type and a set of purchased
//! add-ons into one or more paginated PDF documents:
//! - `format` - value formatter with placeholder fallback
//! - `template` / `templates` - declarative clause templates and composer
//! - `layout` - cursor based page layout for the direct-draw backend
//! - `render` - markup/print and direct-draw backends
//! - `bundle` - combined or separate output, base64 transport in `transport`

pub mod addons;
pub mod bundle;
pub mod contract_type;
pub mod format;
pub mod layout;
pub mod model;
pub mod record;
pub mod render;
pub mod template;
pub mod templates;
pub mod transport;

pub use addons::{Addon, AddonSelection};
pub use bundle::{Bundle, DocumentBundler, OutputMode};
pub use contract_type::{ContractType, LeaseTerm, ObjectKind};
pub use layout::{LayoutManager, PageProfile};
pub use model::{ComposedDocument, DocumentPart, DocumentRole};
pub use record::{ContractRecord, FieldValue};
pub use render::{DirectDrawBackend, MarkupBackend, PrintCommand, RenderBackend, RenderError};
pub use template::compose_document;
pub use transport::{BundlePayload, DocumentPayload};

use thiserror::Error;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Errors that can occur during document generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("unknown contract type: {0}")]
    UnknownContractType(String),
    #[error("unknown output mode: {0}")]
    UnknownOutputMode(String),
    #[error("failed to render {document}: {source}")]
    Render {
        document: String,
        #[source]
        source: RenderError,
    },
}

impl GeneratorError {
    /// True when the caller supplied bad input rather than the backend failing.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::UnknownContractType(_) | Self::UnknownOutputMode(_)
        )
    }
}

/// Result of a successful document generation.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub role: DocumentRole,
    /// Logical name, e.g. "Übergabeprotokoll".
    pub name: String,
    pub filename: String,
    pub pdf: Vec<u8>,
    pub content_type: &'static str,
}
