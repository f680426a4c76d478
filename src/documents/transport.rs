//! Transport shapes for documents crossing a network boundary as JSON.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::GeneratedDocument;

/// One generated PDF with base64-encoded content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPayload {
    /// Document role: `contract`, `explanations` or `protocol`
    #[serde(rename = "type")]
    pub kind: String,
    /// Logical document name
    pub name: String,
    pub filename: String,
    /// Base64-encoded PDF data
    pub data: String,
}

impl DocumentPayload {
    pub fn from_document(document: &GeneratedDocument) -> Self {
        Self {
            kind: document.role.key().to_string(),
            name: document.name.clone(),
            filename: document.filename.clone(),
            data: BASE64.encode(&document.pdf),
        }
    }

    /// Decode base64 data back to bytes.
    pub fn decode_data(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64.decode(&self.data)
    }
}

/// Separate-mode response body, main contract first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BundlePayload {
    pub document_count: usize,
    pub documents: Vec<DocumentPayload>,
}

impl BundlePayload {
    pub fn from_documents(documents: &[GeneratedDocument]) -> Self {
        let documents: Vec<DocumentPayload> =
            documents.iter().map(DocumentPayload::from_document).collect();
        Self {
            document_count: documents.len(),
            documents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::model::DocumentRole;
    use crate::documents::PDF_CONTENT_TYPE;

    #[test]
    fn test_payload_shape() {
        let document = GeneratedDocument {
            role: DocumentRole::Protocol,
            name: "Übergabeprotokoll".to_string(),
            filename: "room-sublease_protocol_20250901_120000.pdf".to_string(),
            pdf: b"%PDF-1.3 test".to_vec(),
            content_type: PDF_CONTENT_TYPE,
        };
        let payload = BundlePayload::from_documents(&[document]);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["documentCount"], 1);
        assert_eq!(json["documents"][0]["type"], "protocol");
        assert_eq!(json["documents"][0]["name"], "Übergabeprotokoll");
        assert_eq!(payload.documents[0].decode_data().unwrap(), b"%PDF-1.3 test");
    }
}
