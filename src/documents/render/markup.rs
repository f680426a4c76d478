//! Markup/print backend.
//!
//! Serializes document parts into one styled HTML file and lets an external
//! headless print engine paginate it. The engine runs in a fresh temporary
//! directory per render and is killed when the render ends, whichever way
//! it ends.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tempfile::tempdir;
use tokio::process::Command;

use super::{ensure_pdf, stderr_tail, RenderBackend, RenderError};
use crate::documents::format::escape_html;
use crate::documents::layout::PageProfile;
use crate::documents::model::{Block, Cell, DocumentPart, SignatureBlock, Span};

pub const DEFAULT_PRINT_PROGRAM: &str = "chromium";
pub const DEFAULT_PRINT_TIMEOUT: Duration = Duration::from_secs(30);

const INPUT_FILE: &str = "document.html";
const OUTPUT_FILE: &str = "document.pdf";

/// External print engine invocation. `{input}` and `{output}` in the
/// arguments are replaced with the HTML and PDF paths.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintCommand {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl PrintCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub fn default_args() -> Vec<String> {
        [
            "--headless",
            "--disable-gpu",
            "--no-sandbox",
            "--no-pdf-header-footer",
            "--print-to-pdf={output}",
            "{input}",
        ]
        .iter()
        .map(|arg| arg.to_string())
        .collect()
    }

    fn expand_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();
        self.args
            .iter()
            .map(|arg| arg.replace("{input}", &input).replace("{output}", &output))
            .collect()
    }
}

impl Default for PrintCommand {
    fn default() -> Self {
        Self::new(DEFAULT_PRINT_PROGRAM, Self::default_args(), DEFAULT_PRINT_TIMEOUT)
    }
}

pub struct MarkupBackend {
    profile: PageProfile,
    command: PrintCommand,
}

impl MarkupBackend {
    pub fn new(profile: PageProfile, command: PrintCommand) -> Self {
        Self { profile, command }
    }

    pub fn command(&self) -> &PrintCommand {
        &self.command
    }

    /// Full HTML document; every part after the first starts on a new page.
    pub fn to_html(&self, parts: &[DocumentPart]) -> String {
        let title = parts
            .first()
            .map(|part| part.title.as_str())
            .unwrap_or("Dokument");

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"de\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
        html.push_str("<style>\n");
        html.push_str(&stylesheet(&self.profile));
        html.push_str("</style>\n</head>\n<body>\n");

        for (index, part) in parts.iter().enumerate() {
            let mut classes = format!("document document-{}", part.role.key());
            if index > 0 {
                classes.push_str(" addendum");
            }
            html.push_str(&format!("<section class=\"{classes}\">\n"));
            write_part(&mut html, part);
            html.push_str("</section>\n");
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    async fn print(&self, html: String) -> Result<Vec<u8>, RenderError> {
        // Removed with everything in it when this function returns.
        let temp_dir = tempdir().map_err(RenderError::TempDir)?;
        let input_path = temp_dir.path().join(INPUT_FILE);
        let output_path = temp_dir.path().join(OUTPUT_FILE);

        tokio::fs::write(&input_path, html)
            .await
            .map_err(RenderError::WriteMarkup)?;

        let child = Command::new(&self.command.program)
            .args(self.command.expand_args(&input_path, &output_path))
            .current_dir(temp_dir.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RenderError::Spawn {
                program: self.command.program.clone(),
                source,
            })?;

        // Dropping the pending wait on timeout kills the child.
        let output = tokio::time::timeout(self.command.timeout, child.wait_with_output())
            .await
            .map_err(|_| RenderError::Timeout(self.command.timeout))?
            .map_err(RenderError::Wait)?;

        if !output.status.success() {
            return Err(RenderError::Exit {
                code: output.status.code().unwrap_or(-1),
                stderr: stderr_tail(&output.stderr),
            });
        }

        let pdf = tokio::fs::read(&output_path)
            .await
            .map_err(RenderError::ReadPdf)?;
        ensure_pdf(pdf)
    }
}

#[async_trait]
impl RenderBackend for MarkupBackend {
    fn name(&self) -> &'static str {
        "markup"
    }

    async fn render(&self, parts: &[DocumentPart]) -> Result<Vec<u8>, RenderError> {
        let html = self.to_html(parts);
        log::debug!(
            "Printing {} document part(s) with `{}` ({} bytes of markup)",
            parts.len(),
            self.command.program,
            html.len()
        );
        self.print(html).await
    }
}

fn stylesheet(profile: &PageProfile) -> String {
    format!(
        "@page {{ size: {width}mm {height}mm; margin: {top}mm {right}mm {bottom}mm {left}mm; }}
body {{ font-family: Helvetica, Arial, sans-serif; font-size: {font}pt; line-height: {line}; color: #000; }}
.document.addendum {{ break-before: page; page-break-before: always; }}
.document-header {{ text-align: center; margin-bottom: 8mm; }}
.document-header h1 {{ font-size: {title}pt; margin: 0; }}
.document-header .subtitle {{ font-size: {subtitle}pt; margin: 1mm 0 0; }}
.clause {{ margin-top: 4mm; }}
.clause-title {{ font-size: {heading}pt; margin: 0 0 1.5mm; break-after: avoid; page-break-after: avoid; }}
.clause-label {{ margin-right: 2mm; }}
p {{ margin: 0 0 2mm; text-align: justify; }}
.value {{ font-weight: 600; }}
.blank {{ color: #555; letter-spacing: 0.5pt; }}
.checkbox, .checkbox-group {{ margin: 1mm 0 2mm; }}
.checkbox-group .option {{ display: inline-block; min-width: 40mm; }}
.box {{ display: inline-block; width: 3.5mm; height: 3.5mm; border: 0.3mm solid #000; margin-right: 2mm; text-align: center; line-height: 3.5mm; vertical-align: middle; font-size: 8pt; }}
table {{ width: 100%; border-collapse: collapse; margin: 2mm 0 3mm; break-inside: auto; }}
th {{ text-align: left; border-bottom: 0.4mm solid #000; padding: 1.5mm; }}
td {{ border-bottom: 0.1mm solid #999; padding: 1.5mm; vertical-align: top; }}
tr {{ break-inside: avoid; page-break-inside: avoid; }}
.input-line {{ display: block; border-bottom: 0.2mm solid #000; height: 6mm; }}
td .input-line {{ height: 4mm; }}
.signature {{ margin-top: 10mm; break-inside: avoid; page-break-inside: avoid; }}
.signers {{ display: flex; gap: 10mm; margin-top: 14mm; }}
.signer {{ flex: 1; }}
.signature-line {{ border-top: 0.3mm solid #000; margin-bottom: 1mm; }}
.signer-role {{ font-weight: bold; }}
.document-footer {{ margin-top: 8mm; border-top: 0.2mm solid #999; padding-top: 1mm; font-size: 8pt; color: #333; }}
",
        width = profile.width_mm,
        height = profile.height_mm,
        top = profile.margin_top,
        right = profile.margin_right,
        bottom = profile.margin_bottom,
        left = profile.margin_left,
        font = profile.font_size,
        line = profile.line_height_factor,
        title = profile.title_style().size,
        subtitle = profile.subtitle_style().size,
        heading = profile.heading_style().size,
    )
}

fn write_part(html: &mut String, part: &DocumentPart) {
    html.push_str("<header class=\"document-header\">\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape_html(&part.title)));
    if let Some(subtitle) = &part.subtitle {
        html.push_str(&format!("<p class=\"subtitle\">{}</p>\n", escape_html(subtitle)));
    }
    html.push_str("</header>\n");

    if !part.preamble.is_empty() {
        html.push_str("<div class=\"preamble\">\n");
        for block in &part.preamble {
            write_block(html, block);
        }
        html.push_str("</div>\n");
    }

    for clause in &part.clauses {
        html.push_str("<section class=\"clause\">\n<h2 class=\"clause-title\">");
        if let Some(label) = &clause.label {
            html.push_str(&format!("<span class=\"clause-label\">{}</span>", escape_html(label)));
        }
        html.push_str(&escape_html(&clause.title));
        html.push_str("</h2>\n");
        for block in &clause.blocks {
            write_block(html, block);
        }
        html.push_str("</section>\n");
    }

    write_signature(html, &part.signature);
    html.push_str(&format!(
        "<footer class=\"document-footer\">{}</footer>\n",
        escape_html(&part.footer)
    ));
}

fn write_spans(html: &mut String, spans: &[Span]) {
    for span in spans {
        write_span(html, span);
    }
}

fn write_span(html: &mut String, span: &Span) {
    match span {
        Span::Text(text) => html.push_str(&escape_html(text)),
        Span::Value(value) => {
            html.push_str(&format!("<span class=\"value\">{}</span>", escape_html(value)))
        }
        Span::Blank(placeholder) => {
            html.push_str(&format!("<span class=\"blank\">{}</span>", escape_html(placeholder)))
        }
    }
}

fn checkbox_glyph(checked: bool) -> &'static str {
    if checked {
        "<span class=\"box checked\">X</span>"
    } else {
        "<span class=\"box\"></span>"
    }
}

fn write_block(html: &mut String, block: &Block) {
    match block {
        Block::Paragraph(spans) => {
            html.push_str("<p>");
            write_spans(html, spans);
            html.push_str("</p>\n");
        }
        Block::List(items) => {
            html.push_str("<ul>\n");
            for item in items {
                html.push_str("<li>");
                write_spans(html, item);
                html.push_str("</li>\n");
            }
            html.push_str("</ul>\n");
        }
        Block::Checkbox { label, checked } => {
            html.push_str(&format!(
                "<div class=\"checkbox\">{}{}</div>\n",
                checkbox_glyph(*checked),
                escape_html(label)
            ));
        }
        Block::CheckboxGroup { label, options } => {
            html.push_str("<div class=\"checkbox-group\">");
            html.push_str(&format!("<p class=\"group-label\">{}</p>", escape_html(label)));
            for (option, checked) in options {
                html.push_str(&format!(
                    "<span class=\"option\">{}{}</span>",
                    checkbox_glyph(*checked),
                    escape_html(option)
                ));
            }
            html.push_str("</div>\n");
        }
        Block::Table {
            headers,
            rows,
            widths,
        } => write_table(html, headers, rows, widths.as_deref()),
        Block::InputLines { label, lines } => {
            html.push_str("<div class=\"input-lines\">");
            html.push_str(&format!("<p>{}</p>", escape_html(label)));
            for _ in 0..*lines {
                html.push_str("<span class=\"input-line\"></span>");
            }
            html.push_str("</div>\n");
        }
    }
}

fn write_table(html: &mut String, headers: &[String], rows: &[Vec<Cell>], widths: Option<&[f32]>) {
    html.push_str("<table>\n");
    if let Some(widths) = widths {
        let total: f32 = widths.iter().sum();
        if total > 0.0 {
            html.push_str("<colgroup>");
            for width in widths {
                html.push_str(&format!("<col style=\"width: {:.1}%\">", width / total * 100.0));
            }
            html.push_str("</colgroup>\n");
        }
    }
    if !headers.is_empty() {
        html.push_str("<thead><tr>");
        for header in headers {
            html.push_str(&format!("<th>{}</th>", escape_html(header)));
        }
        html.push_str("</tr></thead>\n");
    }
    html.push_str("<tbody>\n");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str("<td>");
            match cell {
                Cell::Text(text) => html.push_str(&escape_html(text)),
                Cell::Input => html.push_str("<span class=\"input-line\"></span>"),
                Cell::Checkbox(checked) => html.push_str(checkbox_glyph(*checked)),
            }
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
}

fn write_signature(html: &mut String, signature: &SignatureBlock) {
    html.push_str("<div class=\"signature\">\n<p class=\"place-date\">");
    write_spans(html, &signature.place_and_date);
    html.push_str("</p>\n<div class=\"signers\">\n");
    for signer in &signature.signers {
        html.push_str("<div class=\"signer\"><div class=\"signature-line\"></div>");
        html.push_str(&format!(
            "<div class=\"signer-role\">{}</div><div class=\"signer-name\">",
            escape_html(&signer.role)
        ));
        write_span(html, &signer.name);
        html.push_str("</div></div>\n");
    }
    html.push_str("</div>\n</div>\n");
}
