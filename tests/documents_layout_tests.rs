use mietvertrag_server::documents::layout::{
    DrawOp, LayoutManager, PageProfile, RecordingSurface, SignatureLabel, TableCell, wrap_text,
};
use mietvertrag_server::documents::render::direct::lay_out_parts;
use mietvertrag_server::documents::{compose_document, AddonSelection, ContractRecord, ContractType};

const EPSILON: f32 = 0.01;

fn manager(profile: PageProfile) -> LayoutManager<RecordingSurface> {
    LayoutManager::new(profile, RecordingSurface::default())
}

/// Lowest point an op reaches on its page.
fn op_bottom(op: &DrawOp) -> f32 {
    match op {
        DrawOp::Text { y, .. } => *y,
        DrawOp::Line { from, to, .. } => from.1.max(to.1),
        DrawOp::Rect { y, height, .. } => y + height,
    }
}

fn assert_within_content_area(profile: &PageProfile, surface: &RecordingSurface) {
    let footer_rule = profile.height_mm - profile.margin_bottom / 2.0 - 4.0;
    for op in &surface.ops {
        let bottom = op_bottom(op);
        assert!(
            bottom <= profile.bottom_limit() + EPSILON || bottom >= footer_rule - EPSILON,
            "{op:?} crosses the bottom margin"
        );
    }
}

fn long_text(words: usize) -> String {
    (0..words)
        .map(|index| format!("Vertragswort{index}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_cursor_never_passes_bottom_margin() {
    let profile = PageProfile::a4();
    let mut layout = manager(profile);
    let body = profile.body_style();
    let options: Vec<(String, bool)> = (0..7).map(|index| (format!("Option {index}"), index % 2 == 0)).collect();
    let rows: Vec<Vec<TableCell>> = (0..6)
        .map(|index| {
            vec![
                TableCell::Text(format!("Zeile {index}")),
                TableCell::Input,
                TableCell::Checkbox(index % 3 == 0),
            ]
        })
        .collect();
    let signers = vec![
        SignatureLabel {
            role: "Vermieter".to_string(),
            name: "Max Muster".to_string(),
        },
        SignatureLabel {
            role: "Mieter".to_string(),
            name: "Erika Muster".to_string(),
        },
    ];

    layout.begin_document("Testdokument");
    for round in 0..12 {
        layout.add_section(&format!("§ {round} Abschnitt"), profile.heading_style());
        assert!(layout.cursor().y <= profile.bottom_limit() + EPSILON);
        layout.add_text(&long_text(40 + round * 7), body);
        assert!(layout.cursor().y <= profile.bottom_limit() + EPSILON);
        layout.add_checkbox("Die Erlaubnis liegt vor.", round % 2 == 0, body);
        assert!(layout.cursor().y <= profile.bottom_limit() + EPSILON);
        layout.add_checkbox_group("Mitbenutzung:", &options, body);
        assert!(layout.cursor().y <= profile.bottom_limit() + EPSILON);
        layout.add_table(
            &["Bereich".to_string(), "Wert".to_string(), "OK".to_string()],
            &rows,
            Some(&[2.0, 2.0, 1.0]),
            body,
        );
        assert!(layout.cursor().y <= profile.bottom_limit() + EPSILON);
        layout.add_input_lines("Bemerkungen:", 3, body);
        assert!(layout.cursor().y <= profile.bottom_limit() + EPSILON);
        layout.add_spacing(round as f32 * 2.5);
        assert!(layout.cursor().y <= profile.bottom_limit() + EPSILON);
    }
    layout.add_signature_section("Berlin, den 01.09.2025", &signers, body);
    assert!(layout.cursor().y <= profile.bottom_limit() + EPSILON);
    assert!(layout.page_count() > 1);

    let surface = layout.finish();
    assert_within_content_area(&profile, &surface);
}

#[test]
fn test_composed_documents_stay_inside_margins() {
    let record = ContractRecord::from_pairs(&[
        ("landlord_name", "Max Muster"),
        ("tenant_name", "Erika Muster"),
        ("rent_amount", "450"),
        ("deposit_amount", "900"),
        ("special_agreements", &long_text(120)),
    ]);
    let addons = AddonSelection::from_keys(["explanations", "protocol"]);

    for profile in [PageProfile::a4(), PageProfile::letter(), PageProfile::a4().with_margins(35.0)] {
        for contract_type in ContractType::ALL {
            let parts = compose_document(contract_type, &record, &addons).into_parts();
            let mut layout = manager(profile);
            lay_out_parts(&mut layout, &parts);
            let surface = layout.finish();
            assert_within_content_area(&profile, &surface);
        }
    }
}

#[test]
fn test_every_document_starts_on_a_new_page() {
    let profile = PageProfile::a4();
    let parts = compose_document(
        ContractType::RoomSublease,
        &ContractRecord::default(),
        &AddonSelection::from_keys(["explanations", "protocol"]),
    )
    .into_parts();

    let mut layout = manager(profile);
    lay_out_parts(&mut layout, &parts);
    let surface = layout.finish();

    let title_pages: Vec<usize> = parts
        .iter()
        .map(|part| {
            surface
                .ops
                .iter()
                .find_map(|op| match op {
                    DrawOp::Text { page, text, .. } if *text == part.title => Some(*page),
                    _ => None,
                })
                .unwrap()
        })
        .collect();
    assert_eq!(title_pages[0], 0);
    // page numbering restarts for each document
    assert_eq!(surface.texts().filter(|text| text.starts_with("Seite 1 von ")).count(), 3);
    assert!(title_pages.windows(2).all(|pair| pair[0] < pair[1]));
    for page in &title_pages[1..] {
        let previous = surface.texts_on_page(page - 1);
        assert!(previous.iter().any(|text| text.starts_with("Seite ")));
    }
}

#[test]
fn test_checkbox_group_wraps_into_rows() {
    let profile = PageProfile::a4();
    let mut layout = manager(profile);
    let options: Vec<(String, bool)> = (0..8).map(|index| (format!("Raum {index}"), index == 0)).collect();
    layout.add_checkbox_group("", &options, profile.body_style());
    let surface = layout.finish();

    let rect_rows: Vec<f32> = surface
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Rect { y, .. } => Some(*y),
            _ => None,
        })
        .collect();
    assert_eq!(rect_rows.len(), 8);
    let mut distinct = rect_rows.clone();
    distinct.dedup_by(|a, b| (*a - *b).abs() < EPSILON);
    // 170 mm of content width fits three options per row
    assert_eq!(distinct.len(), 3);

    // one checked option draws a cross of two lines
    let lines = surface.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. })).count();
    assert_eq!(lines, 2);
}

#[test]
fn test_table_uses_relative_column_widths() {
    let profile = PageProfile::a4();
    let mut layout = manager(profile);
    layout.add_table(
        &["Gegenstand".to_string(), "Anzahl".to_string()],
        &[vec![TableCell::Text("Schlüssel".to_string()), TableCell::Text("2".to_string())]],
        Some(&[2.0, 1.0]),
        profile.body_style(),
    );
    let surface = layout.finish();

    let x_of = |needle: &str| {
        surface
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { x, text, .. } if text == needle => Some(*x),
                _ => None,
            })
            .unwrap()
    };
    let second_column = profile.margin_left + profile.content_width() * 2.0 / 3.0;
    assert!((x_of("Anzahl") - x_of("Gegenstand") - (second_column - profile.margin_left)).abs() < EPSILON);
    assert!((x_of("2") - x_of("Anzahl")).abs() < EPSILON);
}

#[test]
fn test_signature_section_is_kept_together() {
    let profile = PageProfile::a4();
    let mut layout = manager(profile);
    layout.add_text("Einleitung", profile.body_style());
    let line_height = profile.line_height(profile.body_style());
    // leave room for roughly two lines only
    while layout.cursor().y + line_height * 3.0 < profile.bottom_limit() {
        layout.add_text("Füllzeile", profile.body_style());
    }
    assert_eq!(layout.cursor().page, 0);

    layout.add_signature_section(
        "Ort, Datum",
        &[SignatureLabel {
            role: "Untervermieter".to_string(),
            name: "Max Muster".to_string(),
        }],
        profile.body_style(),
    );
    let surface = layout.finish();

    let page_one = surface.texts_on_page(1);
    assert!(page_one.contains(&"Ort, Datum"));
    assert!(page_one.contains(&"Untervermieter"));
    assert!(page_one.contains(&"Max Muster"));
}

#[test]
fn test_long_place_moves_signature_section_to_next_page() {
    let profile = PageProfile::a4();
    let body = profile.body_style();
    let line_height = profile.line_height(body);
    let place = format!("{}, den 01.09.2025", "Musterstadt ".repeat(40).trim_end());
    assert!(wrap_text(&place, profile.content_width(), body).len() > 2);

    let mut layout = manager(profile);
    layout.begin_document("Vertrag");
    // stop where five lines plus the gap still fit, but the wrapped place does not
    while layout.cursor().y + line_height <= profile.bottom_limit() - (5.0 * line_height + 14.0) {
        layout.add_text("Füllzeile", body);
    }
    assert_eq!(layout.cursor().page, 0);

    layout.add_signature_section(
        &place,
        &[
            SignatureLabel {
                role: "Untervermieter".to_string(),
                name: "Max Muster".to_string(),
            },
            SignatureLabel {
                role: "Untermieter".to_string(),
                name: "Erika Muster".to_string(),
            },
        ],
        body,
    );
    assert!(layout.cursor().y <= profile.bottom_limit() + EPSILON);
    assert_eq!(layout.cursor().page, 1);
    let surface = layout.finish();

    assert_within_content_area(&profile, &surface);
    assert!(!surface.texts_on_page(0).iter().any(|text| text.starts_with("Musterstadt")));
    let page_one = surface.texts_on_page(1);
    assert!(page_one.iter().any(|text| text.starts_with("Musterstadt")));
    assert!(page_one.contains(&"Untermieter"));
    assert!(page_one.contains(&"Erika Muster"));
}

#[test]
fn test_with_margins_keeps_room_for_footer() {
    let profile = PageProfile::a4().with_margins(30.0);
    assert_eq!(profile.margin_left, 30.0);
    assert_eq!(profile.margin_bottom, 35.0);
    assert!((profile.content_width() - 150.0).abs() < EPSILON);
    assert!((profile.bottom_limit() - 262.0).abs() < EPSILON);
}
