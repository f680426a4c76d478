//! Document bundler: one combined PDF or one PDF per document.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use utoipa::ToSchema;

use super::addons::AddonSelection;
use super::contract_type::ContractType;
use super::model::{DocumentPart, DocumentRole};
use super::record::ContractRecord;
use super::render::RenderBackend;
use super::template::compose_document;
use super::transport::BundlePayload;
use super::{GeneratedDocument, GeneratorError, PDF_CONTENT_TYPE};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Main contract and all addenda in one PDF.
    #[default]
    Combined,
    /// One PDF per document, main contract first.
    Separate,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Combined => f.write_str("combined"),
            Self::Separate => f.write_str("separate"),
        }
    }
}

impl FromStr for OutputMode {
    type Err = GeneratorError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "combined" => Ok(Self::Combined),
            "separate" => Ok(Self::Separate),
            _ => Err(GeneratorError::UnknownOutputMode(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Bundle {
    Combined(GeneratedDocument),
    Separate(Vec<GeneratedDocument>),
}

impl Bundle {
    pub fn documents(&self) -> &[GeneratedDocument] {
        match self {
            Self::Combined(document) => std::slice::from_ref(document),
            Self::Separate(documents) => documents,
        }
    }

    pub fn len(&self) -> usize {
        self.documents().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents().is_empty()
    }

    /// Base64 transport form.
    pub fn into_payload(self) -> BundlePayload {
        BundlePayload::from_documents(self.documents())
    }
}

/// `{contract_type}_{timestamp}.pdf` for the combined document,
/// `{contract_type}_{role}_{timestamp}.pdf` for a single document.
pub fn document_filename(
    contract_type: ContractType,
    role: Option<DocumentRole>,
    generated_at: NaiveDateTime,
) -> String {
    let timestamp = generated_at.format("%Y%m%d_%H%M%S");
    match role {
        Some(role) => format!("{}_{}_{}.pdf", contract_type.id(), role.key(), timestamp),
        None => format!("{}_{}.pdf", contract_type.id(), timestamp),
    }
}

/// Composes and renders bundles with one configured backend.
///
/// Holds no per-render state, so one instance serves concurrent requests.
#[derive(Clone)]
pub struct DocumentBundler {
    backend: Arc<dyn RenderBackend>,
}

impl DocumentBundler {
    pub fn new(backend: Arc<dyn RenderBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub async fn bundle(
        &self,
        contract_type: &str,
        record: &ContractRecord,
        addon_keys: &[String],
        mode: OutputMode,
    ) -> Result<Bundle, GeneratorError> {
        self.bundle_at(contract_type, record, addon_keys, mode, Local::now().naive_local())
            .await
    }

    /// Same as [`Self::bundle`] with an explicit generation timestamp.
    ///
    /// Documents render one after another; the first failure discards
    /// everything rendered so far.
    pub async fn bundle_at(
        &self,
        contract_type: &str,
        record: &ContractRecord,
        addon_keys: &[String],
        mode: OutputMode,
        generated_at: NaiveDateTime,
    ) -> Result<Bundle, GeneratorError> {
        let contract_type: ContractType = contract_type.parse()?;
        let selection = AddonSelection::from_keys(addon_keys);
        if !selection.ignored().is_empty() {
            log::warn!(
                "Ignoring unrecognized add-on keys for {}: {:?}",
                contract_type,
                selection.ignored()
            );
        }

        let composed = compose_document(contract_type, record, &selection);
        log::info!(
            "Generating {} bundle for {} with {} addenda using {} backend",
            mode,
            contract_type,
            composed.addenda.len(),
            self.backend.name()
        );

        let bundle = match mode {
            OutputMode::Combined => {
                let name = composed.main.name.clone();
                let parts = composed.into_parts();
                let pdf = self.render(&name, &parts).await?;
                Bundle::Combined(GeneratedDocument {
                    role: DocumentRole::Contract,
                    name,
                    filename: document_filename(contract_type, None, generated_at),
                    pdf,
                    content_type: PDF_CONTENT_TYPE,
                })
            }
            OutputMode::Separate => {
                let parts = composed.into_parts();
                let mut documents = Vec::with_capacity(parts.len());
                for part in parts {
                    let pdf = self.render(&part.name, std::slice::from_ref(&part)).await?;
                    documents.push(GeneratedDocument {
                        role: part.role,
                        filename: document_filename(contract_type, Some(part.role), generated_at),
                        name: part.name,
                        pdf,
                        content_type: PDF_CONTENT_TYPE,
                    });
                }
                Bundle::Separate(documents)
            }
        };

        log::info!(
            "Generated {} document(s) for {}",
            bundle.len(),
            contract_type
        );
        Ok(bundle)
    }

    async fn render(&self, name: &str, parts: &[DocumentPart]) -> Result<Vec<u8>, GeneratorError> {
        match self.backend.render(parts).await {
            Ok(pdf) => {
                log::debug!(
                    "Rendered {} with {} backend ({} bytes)",
                    name,
                    self.backend.name(),
                    pdf.len()
                );
                Ok(pdf)
            }
            Err(source) => {
                log::error!("Failed to render {}: {}", name, source);
                Err(GeneratorError::Render {
                    document: name.to_string(),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 1)
            .unwrap()
            .and_hms_opt(12, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_document_filename() {
        assert_eq!(
            document_filename(ContractType::RoomSublease, None, timestamp()),
            "room-sublease_20250901_123005.pdf"
        );
        assert_eq!(
            document_filename(ContractType::GarageLease, Some(DocumentRole::Protocol), timestamp()),
            "garage-lease_protocol_20250901_123005.pdf"
        );
    }

    #[test]
    fn test_output_mode_parse() {
        assert_eq!("Separate".parse::<OutputMode>().unwrap(), OutputMode::Separate);
        assert_eq!(OutputMode::default(), OutputMode::Combined);
        assert!(matches!(
            "zip".parse::<OutputMode>(),
            Err(GeneratorError::UnknownOutputMode(_))
        ));
    }
}
