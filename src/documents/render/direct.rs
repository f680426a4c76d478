//! Direct-draw backend.
//!
//! Lays out each document part with [`LayoutManager`] straight onto a
//! `printpdf` document. No external process is involved; drawing happens on
//! a blocking worker thread because the PDF document handle is not `Send`.

use actix_web::web;
use async_trait::async_trait;
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex,
    PdfPageIndex, Point,
};

use super::{ensure_pdf, RenderBackend, RenderError};
use crate::documents::layout::{
    DrawSurface, LayoutManager, PageProfile, RecordingSurface, SignatureLabel, TableCell,
    TextStyle, PT_TO_MM,
};
use crate::documents::model::{spans_to_string, Block, Cell, DocumentPart, Span};

pub struct DirectDrawBackend {
    profile: PageProfile,
}

impl DirectDrawBackend {
    pub fn new(profile: PageProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &PageProfile {
        &self.profile
    }

    /// Number of pages the parts occupy, without producing a PDF.
    pub fn paginate(&self, parts: &[DocumentPart]) -> usize {
        let mut layout = LayoutManager::new(self.profile, RecordingSurface::default());
        lay_out_parts(&mut layout, parts);
        layout.finish().pages
    }
}

#[async_trait]
impl RenderBackend for DirectDrawBackend {
    fn name(&self) -> &'static str {
        "direct"
    }

    async fn render(&self, parts: &[DocumentPart]) -> Result<Vec<u8>, RenderError> {
        let profile = self.profile;
        let parts = parts.to_vec();
        let pdf = web::block(move || draw_pdf(profile, &parts))
            .await
            .map_err(|err| RenderError::Worker(err.to_string()))??;
        ensure_pdf(pdf)
    }
}

fn draw_pdf(profile: PageProfile, parts: &[DocumentPart]) -> Result<Vec<u8>, RenderError> {
    let title = parts
        .first()
        .map(|part| part.title.clone())
        .unwrap_or_else(|| "Dokument".to_string());
    let surface = PdfSurface::new(&title, &profile)?;
    let mut layout = LayoutManager::new(profile, surface);
    lay_out_parts(&mut layout, parts);
    let surface = layout.finish();
    log::debug!("Drew {} page(s) for {}", surface.pages.len(), title);
    surface.into_bytes()
}

/// Draw every part as its own logical document.
pub fn lay_out_parts<S: DrawSurface>(layout: &mut LayoutManager<S>, parts: &[DocumentPart]) {
    for part in parts {
        lay_out_part(layout, part);
    }
}

fn lay_out_part<S: DrawSurface>(layout: &mut LayoutManager<S>, part: &DocumentPart) {
    let profile = *layout.profile();
    let body = profile.body_style();
    let paragraph_gap = profile.line_height(body) * 0.4;

    layout.begin_document(&part.footer);
    layout.add_centered_text(&part.title, profile.title_style());
    if let Some(subtitle) = &part.subtitle {
        layout.add_centered_text(subtitle, profile.subtitle_style());
    }
    layout.add_spacing(profile.line_height(body));

    for block in &part.preamble {
        lay_out_block(layout, block, body);
        layout.add_spacing(paragraph_gap);
    }

    for clause in &part.clauses {
        layout.add_section(&clause.heading(), profile.heading_style());
        for block in &clause.blocks {
            lay_out_block(layout, block, body);
            layout.add_spacing(paragraph_gap);
        }
    }

    let signers: Vec<SignatureLabel> = part
        .signature
        .signers
        .iter()
        .map(|signer| SignatureLabel {
            role: signer.role.clone(),
            name: signer.name.as_str().to_string(),
        })
        .collect();
    layout.add_signature_section(&spans_to_string(&part.signature.place_and_date), &signers, body);
}

fn lay_out_block<S: DrawSurface>(layout: &mut LayoutManager<S>, block: &Block, style: TextStyle) {
    match block {
        Block::Paragraph(spans) => {
            layout.add_marked_text(&spans_to_string(spans), &blanks(spans), style, 0.0)
        }
        Block::List(items) => {
            for item in items {
                let text = format!("- {}", spans_to_string(item));
                layout.add_marked_text(&text, &blanks(item), style, 4.0);
            }
        }
        Block::Checkbox { label, checked } => layout.add_checkbox(label, *checked, style),
        Block::CheckboxGroup { label, options } => layout.add_checkbox_group(label, options, style),
        Block::Table {
            headers,
            rows,
            widths,
        } => {
            let rows: Vec<Vec<TableCell>> = rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| match cell {
                            Cell::Text(text) => TableCell::Text(text.clone()),
                            Cell::Input => TableCell::Input,
                            Cell::Checkbox(checked) => TableCell::Checkbox(*checked),
                        })
                        .collect()
                })
                .collect();
            layout.add_table(headers, &rows, widths.as_deref(), style);
        }
        Block::InputLines { label, lines } => layout.add_input_lines(label, *lines, style),
    }
}

/// Placeholders left for missing values, underlined when drawn.
fn blanks(spans: &[Span]) -> Vec<&str> {
    spans
        .iter()
        .filter_map(|span| match span {
            Span::Blank(placeholder) => Some(placeholder.as_str()),
            _ => None,
        })
        .collect()
}

/// `printpdf` document behind the [`DrawSurface`] interface.
struct PdfSurface {
    doc: PdfDocumentReference,
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
    current: usize,
    /// The document is created with one page which the first `begin_page` reuses.
    initial_page_used: bool,
    height_mm: f32,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PdfSurface {
    fn new(title: &str, profile: &PageProfile) -> Result<Self, RenderError> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm(profile.width_mm),
            Mm(profile.height_mm),
            "Inhalt",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|err| RenderError::Pdf(err.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|err| RenderError::Pdf(err.to_string()))?;

        Ok(Self {
            doc,
            pages: vec![(page, layer)],
            current: 0,
            initial_page_used: false,
            height_mm: profile.height_mm,
            regular,
            bold,
        })
    }

    fn layer(&self) -> printpdf::PdfLayerReference {
        let (page, layer) = self.pages[self.current.min(self.pages.len() - 1)];
        self.doc.get_page(page).get_layer(layer)
    }

    /// Top-down millimetres to PDF user space.
    fn point(&self, x: f32, y: f32) -> Point {
        Point::new(Mm(x), Mm(self.height_mm - y))
    }

    fn into_bytes(self) -> Result<Vec<u8>, RenderError> {
        self.doc
            .save_to_bytes()
            .map_err(|err| RenderError::Pdf(err.to_string()))
    }
}

impl DrawSurface for PdfSurface {
    fn begin_page(&mut self, width_mm: f32, height_mm: f32) {
        if !self.initial_page_used {
            self.initial_page_used = true;
            self.current = 0;
            return;
        }
        let (page, layer) = self.doc.add_page(Mm(width_mm), Mm(height_mm), "Inhalt");
        self.pages.push((page, layer));
        self.current = self.pages.len() - 1;
    }

    fn select_page(&mut self, index: usize) {
        if index < self.pages.len() {
            self.current = index;
        }
    }

    fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle) {
        let font = if style.bold { &self.bold } else { &self.regular };
        self.layer()
            .use_text(text, style.size, Mm(x), Mm(self.height_mm - y), font);
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), thickness: f32) {
        let layer = self.layer();
        layer.set_outline_thickness(thickness / PT_TO_MM);
        layer.add_line(Line {
            points: vec![
                (self.point(from.0, from.1), false),
                (self.point(to.0, to.1), false),
            ],
            is_closed: false,
        });
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, thickness: f32) {
        let layer = self.layer();
        layer.set_outline_thickness(thickness / PT_TO_MM);
        layer.add_line(Line {
            points: vec![
                (self.point(x, y), false),
                (self.point(x + width, y), false),
                (self.point(x + width, y + height), false),
                (self.point(x, y + height), false),
            ],
            is_closed: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::addons::AddonSelection;
    use crate::documents::contract_type::ContractType;
    use crate::documents::layout::DrawOp;
    use crate::documents::record::ContractRecord;
    use crate::documents::template::compose_document;

    #[test]
    fn test_paginate_adds_pages_for_addenda() {
        let backend = DirectDrawBackend::new(PageProfile::a4());
        let record = ContractRecord::default();
        let main_only = compose_document(ContractType::FullSublease, &record, &AddonSelection::default());
        let with_addenda = compose_document(
            ContractType::FullSublease,
            &record,
            &AddonSelection::from_keys(["explanations", "protocol"]),
        );

        let base = backend.paginate(&main_only.into_parts());
        let extended = backend.paginate(&with_addenda.into_parts());
        assert!(base >= 1);
        assert!(extended >= base + 2);
    }

    #[test]
    fn test_blank_values_are_underlined() {
        let profile = PageProfile::a4();
        let body = profile.body_style();
        let underlines = |spans: Vec<Span>| {
            let mut layout = LayoutManager::new(profile, RecordingSurface::default());
            lay_out_block(&mut layout, &Block::Paragraph(spans), body);
            let surface = layout.finish();
            surface
                .ops
                .iter()
                .filter(|op| matches!(op, DrawOp::Line { .. }))
                .count()
        };

        let filled = underlines(vec![
            Span::text("Beginn am "),
            Span::Value("01.09.2025".to_string()),
        ]);
        let blank = underlines(vec![
            Span::text("Beginn am "),
            Span::Blank("[DATUM]".to_string()),
        ]);
        assert_eq!(blank, filled + 1);
    }

    #[tokio::test]
    async fn test_render_produces_pdf() {
        let backend = DirectDrawBackend::new(PageProfile::a4());
        let composed = compose_document(
            ContractType::GarageLease,
            &ContractRecord::from_pairs(&[("garage_type", "garage"), ("rent_amount", "80")]),
            &AddonSelection::default(),
        );
        let pdf = backend.render(&composed.into_parts()).await.unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }
}
