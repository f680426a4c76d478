//! Cursor based page layout for the direct-draw backend.
//!
//! [`LayoutManager`] owns a single [`LayoutCursor`] and draws onto any
//! [`DrawSurface`]. Every primitive asks [`LayoutManager::check_page_break`]
//! for its worst-case height before drawing, so the cursor never moves past
//! the bottom margin without a page break in between. Coordinates are in
//! millimetres, measured from the top-left corner of the page.

/// Points to millimetres.
pub const PT_TO_MM: f32 = 0.352_778;

const BOX_SIZE: f32 = 3.5;
const BOX_GAP: f32 = 2.0;
const CHECKBOX_PITCH: f32 = 45.0;
const CELL_PADDING: f32 = 1.5;
const SIGNATURE_GAP: f32 = 14.0;
const SIGNATURE_COLUMN_GAP: f32 = 10.0;
const FOOTER_SIZE: f32 = 8.0;

/// Page size, margins and base font of one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageProfile {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Body font size in points.
    pub font_size: f32,
    pub line_height_factor: f32,
}

impl PageProfile {
    pub fn a4() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_top: 20.0,
            margin_bottom: 25.0,
            margin_left: 20.0,
            margin_right: 20.0,
            font_size: 10.5,
            line_height_factor: 1.35,
        }
    }

    pub fn letter() -> Self {
        Self {
            width_mm: 215.9,
            height_mm: 279.4,
            ..Self::a4()
        }
    }

    /// Same margin on all sides; the bottom keeps extra room for the footer.
    pub fn with_margins(mut self, margin_mm: f32) -> Self {
        self.margin_top = margin_mm;
        self.margin_left = margin_mm;
        self.margin_right = margin_mm;
        self.margin_bottom = margin_mm + 5.0;
        self
    }

    pub fn content_width(&self) -> f32 {
        self.width_mm - self.margin_left - self.margin_right
    }

    /// Lowest y the cursor may reach.
    pub fn bottom_limit(&self) -> f32 {
        self.height_mm - self.margin_bottom
    }

    pub fn line_height(&self, style: TextStyle) -> f32 {
        style.size * PT_TO_MM * self.line_height_factor
    }

    pub fn body_style(&self) -> TextStyle {
        TextStyle::regular(self.font_size)
    }

    pub fn heading_style(&self) -> TextStyle {
        TextStyle::bold(self.font_size + 1.0)
    }

    pub fn title_style(&self) -> TextStyle {
        TextStyle::bold(self.font_size + 7.0)
    }

    pub fn subtitle_style(&self) -> TextStyle {
        TextStyle::regular(self.font_size + 2.0)
    }
}

impl Default for PageProfile {
    fn default() -> Self {
        Self::a4()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points.
    pub size: f32,
    pub bold: bool,
}

impl TextStyle {
    pub fn regular(size: f32) -> Self {
        Self { size, bold: false }
    }

    pub fn bold(size: f32) -> Self {
        Self { size, bold: true }
    }
}

/// Anything the layout manager can draw on.
pub trait DrawSurface {
    /// Append a new page and make it current.
    fn begin_page(&mut self, width_mm: f32, height_mm: f32);
    /// Make an existing page current again, used for footers.
    fn select_page(&mut self, index: usize);
    /// Draw text with its baseline at `y`.
    fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle);
    fn line(&mut self, from: (f32, f32), to: (f32, f32), thickness: f32);
    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, thickness: f32);
}

/// Current writing position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub y: f32,
    /// Zero-based index of the current page.
    pub page: usize,
}

#[derive(Debug, Clone)]
struct DocumentPages {
    footer: String,
    first_page: usize,
}

pub struct LayoutManager<S: DrawSurface> {
    profile: PageProfile,
    surface: S,
    cursor: LayoutCursor,
    page_count: usize,
    documents: Vec<DocumentPages>,
}

impl<S: DrawSurface> LayoutManager<S> {
    /// Start a layout with one empty page.
    pub fn new(profile: PageProfile, mut surface: S) -> Self {
        surface.begin_page(profile.width_mm, profile.height_mm);
        Self {
            profile,
            surface,
            cursor: LayoutCursor {
                y: profile.margin_top,
                page: 0,
            },
            page_count: 1,
            documents: Vec::new(),
        }
    }

    pub fn profile(&self) -> &PageProfile {
        &self.profile
    }

    pub fn cursor(&self) -> LayoutCursor {
        self.cursor
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_is_empty(&self) -> bool {
        self.cursor.y <= self.profile.margin_top
    }

    /// Break to a new page when `needed` millimetres no longer fit.
    ///
    /// An empty page never breaks again; primitives keep their requests
    /// below the printable height.
    pub fn check_page_break(&mut self, needed: f32) -> bool {
        if self.cursor.y + needed <= self.profile.bottom_limit() || self.page_is_empty() {
            return false;
        }
        self.add_page_break();
        true
    }

    pub fn add_page_break(&mut self) {
        self.surface
            .begin_page(self.profile.width_mm, self.profile.height_mm);
        self.page_count += 1;
        self.cursor = LayoutCursor {
            y: self.profile.margin_top,
            page: self.page_count - 1,
        };
    }

    /// Move down; breaks instead of crossing the bottom margin.
    pub fn advance(&mut self, dy: f32) {
        if self.cursor.y + dy > self.profile.bottom_limit() {
            self.add_page_break();
        } else {
            self.cursor.y += dy;
        }
    }

    /// Start a logical document on a fresh page with its own footer.
    pub fn begin_document(&mut self, footer: &str) {
        if !self.page_is_empty() {
            self.add_page_break();
        }
        self.documents.push(DocumentPages {
            footer: footer.to_string(),
            first_page: self.cursor.page,
        });
    }

    fn baseline_offset(&self, style: TextStyle) -> f32 {
        style.size * PT_TO_MM * 0.85
    }

    fn baseline(&self, style: TextStyle) -> f32 {
        self.cursor.y + self.baseline_offset(style)
    }

    fn draw_line_of_text(&mut self, x: f32, text: &str, style: TextStyle) {
        let line_height = self.profile.line_height(style);
        self.check_page_break(line_height);
        let baseline = self.baseline(style);
        self.surface.text(x, baseline, text, style);
        self.cursor.y += line_height;
    }

    /// Word-wrapped paragraph.
    pub fn add_text(&mut self, text: &str, style: TextStyle) {
        self.add_indented_text(text, style, 0.0);
    }

    pub fn add_indented_text(&mut self, text: &str, style: TextStyle, indent: f32) {
        self.add_marked_text(text, &[], style, indent);
    }

    /// Word-wrapped paragraph with every occurrence of a `marked` token
    /// underlined. Unfilled placeholders are drawn this way.
    pub fn add_marked_text(&mut self, text: &str, marked: &[&str], style: TextStyle, indent: f32) {
        let x = self.profile.margin_left + indent;
        let width = self.profile.content_width() - indent;
        for line in wrap_text(text, width, style) {
            self.draw_line_of_text(x, &line, style);
            let underline_y = self.cursor.y - self.profile.line_height(style) + self.baseline_offset(style) + 0.6;
            for token in marked.iter().filter(|token| !token.is_empty()) {
                for (start, _) in line.match_indices(token) {
                    let from = x + text_width_mm(&line[..start], style);
                    let to = from + text_width_mm(token, style);
                    self.surface.line((from, underline_y), (to, underline_y), 0.2);
                }
            }
        }
    }

    /// Centered text, used for document titles.
    pub fn add_centered_text(&mut self, text: &str, style: TextStyle) {
        let content_width = self.profile.content_width();
        for line in wrap_text(text, content_width, style) {
            let offset = ((content_width - text_width_mm(&line, style)) / 2.0).max(0.0);
            self.draw_line_of_text(self.profile.margin_left + offset, &line, style);
        }
    }

    pub fn add_spacing(&mut self, dy: f32) {
        if !self.page_is_empty() {
            self.advance(dy);
        }
    }

    /// Heading kept together with at least one following body line.
    pub fn add_section(&mut self, title: &str, style: TextStyle) {
        let spacing = self.profile.line_height(style) * 0.6;
        let lines = wrap_text(title, self.profile.content_width(), style).len().max(1);
        let needed = spacing
            + lines as f32 * self.profile.line_height(style)
            + self.profile.line_height(self.profile.body_style());
        self.check_page_break(needed);
        self.add_spacing(spacing);
        self.add_text(title, style);
    }

    pub fn add_checkbox(&mut self, label: &str, checked: bool, style: TextStyle) {
        let line_height = self.profile.line_height(style);
        let text_x = self.profile.margin_left + BOX_SIZE + BOX_GAP;
        let lines = wrap_text(label, self.profile.content_width() - BOX_SIZE - BOX_GAP, style);
        self.check_page_break(line_height.max(BOX_SIZE));

        self.draw_box(self.profile.margin_left, checked, line_height);
        if lines.is_empty() {
            self.advance(line_height.max(BOX_SIZE));
        }
        for line in lines {
            self.draw_line_of_text(text_x, &line, style);
        }
    }

    /// Options laid out horizontally at a fixed pitch, wrapping into rows.
    pub fn add_checkbox_group(&mut self, label: &str, options: &[(String, bool)], style: TextStyle) {
        if !label.trim().is_empty() {
            self.add_text(label, style);
        }
        let line_height = self.profile.line_height(style);
        let per_row = ((self.profile.content_width() / CHECKBOX_PITCH).floor() as usize).max(1);
        let label_width = CHECKBOX_PITCH - BOX_SIZE - BOX_GAP * 2.0;

        for row in options.chunks(per_row) {
            let wrapped: Vec<Vec<String>> = row
                .iter()
                .map(|(option, _)| wrap_text(option, label_width, style))
                .collect();
            let row_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
            self.check_page_break(row_lines as f32 * line_height);

            let top = self.cursor.y;
            for (index, ((_, checked), lines)) in row.iter().zip(&wrapped).enumerate() {
                let x = self.profile.margin_left + index as f32 * CHECKBOX_PITCH;
                self.cursor.y = top;
                self.draw_box(x, *checked, line_height);
                for (line_index, line) in lines.iter().enumerate() {
                    let baseline = top + line_index as f32 * line_height + style.size * PT_TO_MM * 0.85;
                    self.surface.text(x + BOX_SIZE + BOX_GAP, baseline, line, style);
                }
            }
            self.cursor.y = top + row_lines as f32 * line_height;
        }
    }

    fn draw_box(&mut self, x: f32, checked: bool, line_height: f32) {
        let top = self.cursor.y + ((line_height - BOX_SIZE) / 2.0).max(0.0);
        self.surface.rect(x, top, BOX_SIZE, BOX_SIZE, 0.3);
        if checked {
            self.surface
                .line((x + 0.6, top + 0.6), (x + BOX_SIZE - 0.6, top + BOX_SIZE - 0.6), 0.4);
            self.surface
                .line((x + 0.6, top + BOX_SIZE - 0.6), (x + BOX_SIZE - 0.6, top + 0.6), 0.4);
        }
    }

    /// Table with a bold header row and a separator rule. Rows are drawn
    /// line by line so tall rows may continue on the next page.
    pub fn add_table(
        &mut self,
        headers: &[String],
        rows: &[Vec<TableCell>],
        widths: Option<&[f32]>,
        style: TextStyle,
    ) {
        let columns = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(headers.len()))
            .max()
            .unwrap_or(0);
        if columns == 0 {
            return;
        }
        let column_widths = column_widths(self.profile.content_width(), columns, widths);
        let line_height = self.profile.line_height(style);
        let header_style = TextStyle::bold(style.size);

        let header_lines: Vec<Vec<String>> = (0..columns)
            .map(|column| {
                let text = headers.get(column).map(String::as_str).unwrap_or("");
                wrap_text(text, column_widths[column] - CELL_PADDING * 2.0, header_style)
            })
            .collect();
        let header_height = header_lines.iter().map(Vec::len).max().unwrap_or(1).max(1) as f32
            * line_height
            + CELL_PADDING * 2.0;
        self.check_page_break(header_height + line_height + CELL_PADDING * 2.0);

        if !headers.is_empty() {
            self.advance(CELL_PADDING);
            self.draw_row_lines(&column_widths, &header_lines, header_style);
            self.advance(CELL_PADDING);
            let y = self.cursor.y;
            let (left, right) = (self.profile.margin_left, self.profile.width_mm - self.profile.margin_right);
            self.surface.line((left, y), (right, y), 0.4);
        }

        for row in rows {
            self.advance(CELL_PADDING);
            let cell_lines: Vec<Vec<String>> = (0..columns)
                .map(|column| match row.get(column) {
                    Some(TableCell::Text(text)) => {
                        wrap_text(text, column_widths[column] - CELL_PADDING * 2.0, style)
                    }
                    _ => Vec::new(),
                })
                .collect();

            self.check_page_break(line_height);
            let first_line_top = self.cursor.y;
            let mut x = self.profile.margin_left;
            for (column, width) in column_widths.iter().enumerate() {
                match row.get(column) {
                    Some(TableCell::Input) => {
                        let y = first_line_top + line_height - 0.5;
                        self.surface
                            .line((x + CELL_PADDING, y), (x + width - CELL_PADDING, y), 0.2);
                    }
                    Some(TableCell::Checkbox(checked)) => {
                        self.draw_box(x + CELL_PADDING, *checked, line_height);
                    }
                    _ => {}
                }
                x += width;
            }
            self.draw_row_lines(&column_widths, &cell_lines, style);
            if cell_lines.iter().all(Vec::is_empty) {
                self.cursor.y += line_height;
            }

            self.advance(CELL_PADDING);
            let y = self.cursor.y;
            let (left, right) = (self.profile.margin_left, self.profile.width_mm - self.profile.margin_right);
            self.surface.line((left, y), (right, y), 0.1);
        }
    }

    fn draw_row_lines(&mut self, column_widths: &[f32], cell_lines: &[Vec<String>], style: TextStyle) {
        let line_height = self.profile.line_height(style);
        let row_lines = cell_lines.iter().map(Vec::len).max().unwrap_or(0);
        for line_index in 0..row_lines {
            self.check_page_break(line_height);
            let baseline = self.baseline(style);
            let mut x = self.profile.margin_left;
            for (column, width) in column_widths.iter().enumerate() {
                if let Some(line) = cell_lines.get(column).and_then(|lines| lines.get(line_index)) {
                    self.surface.text(x + CELL_PADDING, baseline, line, style);
                }
                x += width;
            }
            self.cursor.y += line_height;
        }
    }

    /// Label followed by `count` blank lines to write on.
    pub fn add_input_lines(&mut self, label: &str, count: usize, style: TextStyle) {
        if !label.trim().is_empty() {
            self.add_text(label, style);
        }
        let line_height = self.profile.line_height(style) * 1.8;
        let (left, right) = (self.profile.margin_left, self.profile.width_mm - self.profile.margin_right);
        for _ in 0..count {
            self.check_page_break(line_height);
            self.cursor.y += line_height;
            let y = self.cursor.y - 1.0;
            self.surface.line((left, y), (right, y), 0.2);
        }
    }

    /// Place/date line and N equally wide signature lines with labels
    /// beneath. The whole block stays on one page.
    pub fn add_signature_section(&mut self, place_and_date: &str, signers: &[SignatureLabel], style: TextStyle) {
        let line_height = self.profile.line_height(style);
        let place_lines = wrap_text(place_and_date, self.profile.content_width(), style).len();
        let signature_rows = if signers.is_empty() { 0.0 } else { line_height * 2.5 };
        let needed = line_height * (1 + place_lines) as f32 + SIGNATURE_GAP + signature_rows;
        self.check_page_break(needed);

        self.add_spacing(line_height);
        self.add_text(place_and_date, style);
        // a place spilling over a page break still keeps gap and lines together
        self.check_page_break(SIGNATURE_GAP + signature_rows);
        self.advance(SIGNATURE_GAP);

        if !signers.is_empty() {
            let column_width = self.profile.content_width() / signers.len() as f32;
            let line_y = self.cursor.y;
            for (index, signer) in signers.iter().enumerate() {
                let x = self.profile.margin_left + index as f32 * column_width;
                let line_end = x + column_width - SIGNATURE_COLUMN_GAP;
                self.surface.line((x, line_y), (line_end.max(x + 10.0), line_y), 0.3);
                let role_baseline = line_y + line_height;
                self.surface.text(x, role_baseline, &signer.role, TextStyle::bold(style.size));
                self.surface.text(x, role_baseline + line_height, &signer.name, style);
            }
            self.advance(signature_rows);
        }
    }

    /// Draw the footer of every document on each of its pages and hand back
    /// the surface.
    pub fn finish(mut self) -> S {
        let total_pages = self.page_count;
        let documents = std::mem::take(&mut self.documents);
        let footer_style = TextStyle::regular(FOOTER_SIZE);
        let footer_y = self.profile.height_mm - self.profile.margin_bottom / 2.0;
        let left = self.profile.margin_left;
        let right = self.profile.width_mm - self.profile.margin_right;

        for (index, document) in documents.iter().enumerate() {
            let end = documents
                .get(index + 1)
                .map(|next| next.first_page)
                .unwrap_or(total_pages);
            let pages_in_document = end.saturating_sub(document.first_page);
            for (offset, page) in (document.first_page..end).enumerate() {
                self.surface.select_page(page);
                self.surface
                    .line((left, footer_y - 4.0), (right, footer_y - 4.0), 0.2);
                self.surface.text(left, footer_y, &document.footer, footer_style);
                let page_label = format!("Seite {} von {}", offset + 1, pages_in_document);
                let label_x = right - text_width_mm(&page_label, footer_style);
                self.surface.text(label_x, footer_y, &page_label, footer_style);
            }
        }
        self.surface
    }
}

/// Table cell as the layout manager draws it.
#[derive(Debug, Clone, PartialEq)]
pub enum TableCell {
    Text(String),
    Input,
    Checkbox(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignatureLabel {
    pub role: String,
    pub name: String,
}

/// Equal widths, or the given relative widths scaled to `total`.
fn column_widths(total: f32, columns: usize, relative: Option<&[f32]>) -> Vec<f32> {
    match relative {
        Some(weights) if weights.len() == columns && weights.iter().all(|weight| *weight > 0.0) => {
            let sum: f32 = weights.iter().sum();
            weights.iter().map(|weight| total * weight / sum).collect()
        }
        _ => vec![total / columns as f32; columns],
    }
}

/// Approximate Helvetica advance width of a character in em units.
fn char_width_em(ch: char) -> f32 {
    match ch {
        ' ' | 'i' | 'j' | 'l' | '.' | ',' | ';' | ':' | '\'' | '|' | '!' | 'I' => 0.278,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' => 0.333,
        'm' | 'M' | 'W' | '€' => 0.833,
        'w' => 0.722,
        '_' | '0'..='9' => 0.556,
        ch if ch.is_uppercase() => 0.667,
        _ => 0.556,
    }
}

pub fn text_width_mm(text: &str, style: TextStyle) -> f32 {
    let factor = if style.bold { 1.06 } else { 1.0 };
    text.chars().map(char_width_em).sum::<f32>() * style.size * PT_TO_MM * factor
}

/// Greedy word wrap. Words longer than a line are split by character.
pub fn wrap_text(text: &str, max_width: f32, style: TextStyle) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if text_width_mm(&candidate, style) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if text_width_mm(word, style) <= max_width {
                current = word.to_string();
            } else {
                for ch in word.chars() {
                    current.push(ch);
                    if text_width_mm(&current, style) > max_width && current.chars().count() > 1 {
                        current.pop();
                        lines.push(std::mem::take(&mut current));
                        current.push(ch);
                    }
                }
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// A draw call captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        page: usize,
        x: f32,
        y: f32,
        text: String,
        style: TextStyle,
    },
    Line {
        page: usize,
        from: (f32, f32),
        to: (f32, f32),
    },
    Rect {
        page: usize,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// Surface that only records draw calls; used for dry-run pagination.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub pages: usize,
    current: usize,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn texts_on_page(&self, index: usize) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { page, text, .. } if *page == index => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn begin_page(&mut self, _width_mm: f32, _height_mm: f32) {
        self.pages += 1;
        self.current = self.pages - 1;
    }

    fn select_page(&mut self, index: usize) {
        self.current = index;
    }

    fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle) {
        self.ops.push(DrawOp::Text {
            page: self.current,
            x,
            y,
            text: text.to_string(),
            style,
        });
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), _thickness: f32) {
        self.ops.push(DrawOp::Line {
            page: self.current,
            from,
            to,
        });
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, _thickness: f32) {
        self.ops.push(DrawOp::Rect {
            page: self.current,
            x,
            y,
            width,
            height,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> LayoutManager<RecordingSurface> {
        LayoutManager::new(PageProfile::a4(), RecordingSurface::default())
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let style = TextStyle::regular(10.0);
        let text = "Das Untermietverhältnis beginnt am 01.09.2025 und läuft auf unbestimmte Zeit.";
        let lines = wrap_text(text, 40.0, style);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| text_width_mm(line, style) <= 40.0));
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_text_splits_long_words() {
        let style = TextStyle::regular(10.0);
        let lines = wrap_text(&"x".repeat(200), 30.0, style);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat().len(), 200);
    }

    #[test]
    fn test_column_widths() {
        assert_eq!(column_widths(90.0, 3, None), vec![30.0, 30.0, 30.0]);
        assert_eq!(column_widths(90.0, 2, Some(&[2.0, 1.0])), vec![60.0, 30.0]);
        // mismatched weights fall back to equal widths
        assert_eq!(column_widths(90.0, 3, Some(&[1.0])), vec![30.0, 30.0, 30.0]);
    }

    #[test]
    fn test_check_page_break_resets_cursor() {
        let mut layout = manager();
        layout.advance(200.0);
        assert!(!layout.check_page_break(10.0));
        assert!(layout.check_page_break(100.0));
        assert_eq!(layout.cursor().y, PageProfile::a4().margin_top);
        assert_eq!(layout.cursor().page, 1);
        assert_eq!(layout.page_count(), 2);
    }

    #[test]
    fn test_empty_page_does_not_break() {
        let mut layout = manager();
        assert!(!layout.check_page_break(1000.0));
        assert_eq!(layout.page_count(), 1);
    }

    #[test]
    fn test_unlabelled_checkbox_still_takes_a_line() {
        let mut layout = manager();
        let style = TextStyle::regular(10.0);
        let start = layout.cursor().y;
        layout.add_checkbox("", true, style);
        let after_box = layout.cursor().y;
        layout.add_text("danach", style);
        let surface = layout.finish();

        assert!(after_box >= start + BOX_SIZE);
        let box_bottom = surface
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Rect { y, height, .. } => Some(y + height),
                _ => None,
            })
            .unwrap();
        assert!(box_bottom <= after_box);
    }

    #[test]
    fn test_footer_counts_pages_per_document() {
        let mut layout = manager();
        layout.begin_document("Vertrag");
        layout.add_text("erste Seite", TextStyle::regular(10.0));
        layout.add_page_break();
        layout.add_text("zweite Seite", TextStyle::regular(10.0));
        layout.begin_document("Anlage");
        layout.add_text("Anlage", TextStyle::regular(10.0));
        let surface = layout.finish();

        assert_eq!(surface.pages, 3);
        assert!(surface.texts_on_page(1).contains(&"Seite 2 von 2"));
        assert!(surface.texts_on_page(2).contains(&"Seite 1 von 1"));
    }
}
