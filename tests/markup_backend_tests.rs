#![cfg(unix)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use mietvertrag_server::documents::{
    compose_document, AddonSelection, ContractRecord, ContractType, DocumentBundler,
    GeneratorError, MarkupBackend, OutputMode, PageProfile, PrintCommand, RenderBackend,
    RenderError,
};
use mietvertrag_server::documents::model::DocumentPart;

fn parts() -> Vec<DocumentPart> {
    compose_document(
        ContractType::RoomSublease,
        &ContractRecord::from_pairs(&[("landlord_name", "Max Muster")]),
        &AddonSelection::from_keys(["protocol"]),
    )
    .into_parts()
}

/// `sh -c <script>` with the markup path as `$1` and the PDF path as `$2`.
fn shell(script: &str, timeout: Duration) -> MarkupBackend {
    let args = vec![
        "-c".to_string(),
        script.to_string(),
        "sh".to_string(),
        "{input}".to_string(),
        "{output}".to_string(),
    ];
    MarkupBackend::new(PageProfile::a4(), PrintCommand::new("sh", args, timeout))
}

#[tokio::test]
async fn test_print_engine_output_is_returned() {
    let backend = shell(
        "grep -q 'Übergabeprotokoll' \"$1\" && grep -q 'Max Muster' \"$1\" && printf '%%PDF-1.7 printed' > \"$2\"",
        Duration::from_secs(10),
    );

    let pdf = backend.render(&parts()).await.unwrap();
    assert_eq!(pdf, b"%PDF-1.7 printed".to_vec());
}

#[tokio::test]
async fn test_print_engine_timeout_is_enforced() {
    let backend = shell("sleep 10", Duration::from_millis(200));

    let started = Instant::now();
    let err = backend.render(&parts()).await.unwrap_err();

    assert!(matches!(err, RenderError::Timeout(timeout) if timeout == Duration::from_millis(200)));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_non_zero_exit_reports_stderr() {
    let backend = shell("echo 'no display available' >&2; exit 3", Duration::from_secs(10));

    match backend.render(&parts()).await.unwrap_err() {
        RenderError::Exit { code, stderr } => {
            assert_eq!(code, 3);
            assert!(stderr.contains("no display available"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_output_file_is_an_error() {
    let backend = shell("exit 0", Duration::from_secs(10));

    let err = backend.render(&parts()).await.unwrap_err();
    assert!(matches!(err, RenderError::ReadPdf(_)));
}

#[tokio::test]
async fn test_non_pdf_output_is_rejected() {
    // copies the markup itself to the output path
    let backend = shell("cp \"$1\" \"$2\"", Duration::from_secs(10));

    let err = backend.render(&parts()).await.unwrap_err();
    assert!(matches!(err, RenderError::InvalidOutput));
}

#[tokio::test]
async fn test_missing_print_engine_fails_to_spawn() {
    let backend = MarkupBackend::new(
        PageProfile::a4(),
        PrintCommand::new("mietvertrag-no-such-print-engine", PrintCommand::default_args(), Duration::from_secs(5)),
    );

    match backend.render(&parts()).await.unwrap_err() {
        RenderError::Spawn { program, .. } => assert_eq!(program, "mietvertrag-no-such-print-engine"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_print_failure_surfaces_through_bundler() {
    let bundler = DocumentBundler::new(Arc::new(shell("exit 1", Duration::from_secs(10))));
    assert_eq!(bundler.backend_name(), "markup");

    let err = bundler
        .bundle("room-sublease", &ContractRecord::default(), &[], OutputMode::Combined)
        .await
        .unwrap_err();

    match err {
        GeneratorError::Render { document, source } => {
            assert_eq!(document, "Untermietvertrag");
            assert!(matches!(source, RenderError::Exit { code: 1, .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_each_render_gets_its_own_work_directory() {
    let backend = Arc::new(shell(
        "test ! -e \"$2\" && printf '%%PDF-1.7' > \"$2\"",
        Duration::from_secs(10),
    ));

    let (first_parts, second_parts) = (parts(), parts());
    let (first, second) = tokio::join!(backend.render(&first_parts), backend.render(&second_parts));
    assert!(first.unwrap().starts_with(b"%PDF"));
    assert!(second.unwrap().starts_with(b"%PDF"));
}
