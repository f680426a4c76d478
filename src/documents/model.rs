//! Ordered document model produced by the clause composer and consumed by
//! both rendering backends.

use serde::Serialize;

use super::contract_type::ContractType;

/// A run of inline text. Values and blanks are kept apart so renderers can
/// style placeholders differently from filled-in data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Value(String),
    Blank(String),
}

impl Span {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(value) | Self::Value(value) | Self::Blank(value) => value,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Text(value) | Self::Value(value) | Self::Blank(value) => value,
        }
    }
}

/// Join spans into the plain text they render to.
pub fn spans_to_string(spans: &[Span]) -> String {
    spans.iter().map(Span::as_str).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    /// Empty line to be filled in by hand.
    Input,
    Checkbox(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Vec<Span>),
    List(Vec<Vec<Span>>),
    Checkbox {
        label: String,
        checked: bool,
    },
    CheckboxGroup {
        label: String,
        options: Vec<(String, bool)>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<Cell>>,
        /// Relative column widths; equal widths when `None`.
        widths: Option<Vec<f32>>,
    },
    /// Labelled fill-in lines.
    InputLines {
        label: String,
        lines: usize,
    },
}

impl Block {
    fn write_plain_text(&self, out: &mut String) {
        match self {
            Self::Paragraph(spans) => {
                out.push_str(&spans_to_string(spans));
                out.push('\n');
            }
            Self::List(items) => {
                for item in items {
                    out.push_str("- ");
                    out.push_str(&spans_to_string(item));
                    out.push('\n');
                }
            }
            Self::Checkbox { label, checked } => {
                out.push_str(if *checked { "[x] " } else { "[ ] " });
                out.push_str(label);
                out.push('\n');
            }
            Self::CheckboxGroup { label, options } => {
                out.push_str(label);
                for (option, checked) in options {
                    out.push_str(if *checked { " [x] " } else { " [ ] " });
                    out.push_str(option);
                }
                out.push('\n');
            }
            Self::Table { headers, rows, .. } => {
                out.push_str(&headers.join(" | "));
                out.push('\n');
                for row in rows {
                    let cells: Vec<&str> = row
                        .iter()
                        .map(|cell| match cell {
                            Cell::Text(value) => value.as_str(),
                            Cell::Input => "____",
                            Cell::Checkbox(true) => "[x]",
                            Cell::Checkbox(false) => "[ ]",
                        })
                        .collect();
                    out.push_str(&cells.join(" | "));
                    out.push('\n');
                }
            }
            Self::InputLines { label, lines } => {
                out.push_str(label);
                out.push('\n');
                for _ in 0..*lines {
                    out.push_str("____\n");
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    /// Numbering label such as "§ 3" or "2.", absent for unnumbered blocks.
    pub label: Option<String>,
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Clause {
    pub fn heading(&self) -> String {
        match &self.label {
            Some(label) => format!("{} {}", label, self.title),
            None => self.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Signer {
    pub role: String,
    pub name: Span,
}

/// Closing block printed at the end of every document.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureBlock {
    pub place_and_date: Vec<Span>,
    pub signers: Vec<Signer>,
}

/// What a document is within a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentRole {
    Contract,
    Explanations,
    Protocol,
}

impl DocumentRole {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Contract => "contract",
            Self::Explanations => "explanations",
            Self::Protocol => "protocol",
        }
    }
}

/// One logical document: the main contract or a single addendum.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPart {
    pub role: DocumentRole,
    /// Logical name shown to the user, e.g. "Übergabeprotokoll".
    pub name: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub preamble: Vec<Block>,
    pub clauses: Vec<Clause>,
    pub signature: SignatureBlock,
    /// Fixed footer text printed on every page of this document.
    pub footer: String,
}

impl DocumentPart {
    pub fn clause_headings(&self) -> Vec<String> {
        self.clauses.iter().map(Clause::heading).collect()
    }

    /// Flatten the document into plain text, in render order.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        if let Some(subtitle) = &self.subtitle {
            out.push_str(subtitle);
            out.push('\n');
        }
        for block in &self.preamble {
            block.write_plain_text(&mut out);
        }
        for clause in &self.clauses {
            out.push_str(&clause.heading());
            out.push('\n');
            for block in &clause.blocks {
                block.write_plain_text(&mut out);
            }
        }
        out.push_str(&spans_to_string(&self.signature.place_and_date));
        out.push('\n');
        for signer in &self.signature.signers {
            out.push_str(&signer.role);
            out.push_str(": ");
            out.push_str(signer.name.as_str());
            out.push('\n');
        }
        out.push_str(&self.footer);
        out.push('\n');
        out
    }
}

/// Result of composition: the main contract followed by its addenda.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedDocument {
    pub contract_type: ContractType,
    pub main: DocumentPart,
    pub addenda: Vec<DocumentPart>,
}

impl ComposedDocument {
    pub fn parts(&self) -> impl Iterator<Item = &DocumentPart> {
        std::iter::once(&self.main).chain(self.addenda.iter())
    }

    pub fn into_parts(self) -> Vec<DocumentPart> {
        let mut parts = Vec::with_capacity(1 + self.addenda.len());
        parts.push(self.main);
        parts.extend(self.addenda);
        parts
    }

    pub fn plain_text(&self) -> String {
        self.parts().map(DocumentPart::plain_text).collect()
    }
}
