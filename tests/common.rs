#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use mietvertrag_server::documents::model::DocumentPart;
use mietvertrag_server::documents::{ContractRecord, RenderBackend, RenderError};

/// Fixed generation time so filenames are predictable.
pub fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 9, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

pub fn room_record() -> ContractRecord {
    ContractRecord::from_pairs(&[
        ("landlord_name", "Max Muster"),
        ("tenant_name", "Erika Muster"),
        ("rent_amount", "450"),
        ("start_date", "2025-09-01"),
    ])
}

/// Backend that "renders" plain text behind a PDF magic number and records
/// every call. Fails on the call with index `fail_on`, when set.
pub struct StubBackend {
    calls: Arc<tokio::sync::Mutex<Vec<Vec<String>>>>,
    fail_on: Option<usize>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(tokio::sync::Mutex::new(Vec::new())),
            fail_on: None,
        }
    }

    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on: Some(call),
            ..Self::new()
        }
    }

    /// Document names passed to each render call.
    pub async fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl RenderBackend for StubBackend {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn render(&self, parts: &[DocumentPart]) -> Result<Vec<u8>, RenderError> {
        let mut calls = self.calls.lock().await;
        let index = calls.len();
        calls.push(parts.iter().map(|part| part.name.clone()).collect());
        if self.fail_on == Some(index) {
            return Err(RenderError::Exit {
                code: 1,
                stderr: "stub failure".to_string(),
            });
        }

        let mut pdf = b"%PDF-1.4 stub\n".to_vec();
        for part in parts {
            pdf.extend_from_slice(part.plain_text().as_bytes());
        }
        Ok(pdf)
    }
}
