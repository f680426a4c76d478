//! Declarative clause templates and the generic clause composer.
//!
//! Every contract type and every addendum is described by a
//! [`ClauseTemplate`]: an ordered list of clause definitions, each pairing an
//! inclusion [`Predicate`] with a body function. Composition evaluates the
//! predicates against the record and add-on selection and numbers the
//! included clauses. It is pure: the same inputs always yield the same text.

use super::addons::{Addon, AddonSelection};
use super::contract_type::{ContractType, LeaseTerm, ObjectKind};
use super::format::{
    address_span, field_span, format_long_german_date, parse_date, FieldKind, DATE_PLACEHOLDER,
};
use super::model::{Block, Clause, ComposedDocument, DocumentPart, DocumentRole, SignatureBlock, Span};
use super::record::ContractRecord;
use super::templates;

/// Inclusion condition of a clause.
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    Always,
    /// Field is present and non-blank.
    Present(&'static str),
    /// At least one of the fields is present.
    AnyPresent(&'static [&'static str]),
    Term(LeaseTerm),
    Addon(Addon),
    ContractTypes(&'static [ContractType]),
}

impl Predicate {
    pub fn holds(&self, ctx: &ClauseContext<'_>) -> bool {
        match self {
            Self::Always => true,
            Self::Present(field) => ctx.record.is_present(field),
            Self::AnyPresent(fields) => fields.iter().any(|field| ctx.record.is_present(field)),
            Self::Term(term) => ctx.lease_term == *term,
            Self::Addon(addon) => ctx.addons.contains(*addon),
            Self::ContractTypes(types) => types.contains(&ctx.contract_type),
        }
    }
}

pub type BodyFn = fn(&ClauseContext<'_>) -> Vec<Block>;
pub type TextFn = fn(&ClauseContext<'_>) -> String;

/// Template text that is either literal or derived from the record.
#[derive(Clone, Copy)]
pub enum Text {
    Fixed(&'static str),
    Computed(TextFn),
}

impl Text {
    pub fn resolve(&self, ctx: &ClauseContext<'_>) -> String {
        match self {
            Self::Fixed(text) => (*text).to_string(),
            Self::Computed(compute) => compute(ctx),
        }
    }
}

#[derive(Clone, Copy)]
pub struct ClauseDef {
    pub title: Text,
    pub include: Predicate,
    pub body: BodyFn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numbering {
    /// "§ 1", "§ 2", ... as used in contracts.
    Paragraph,
    /// "1.", "2.", ... as used in addenda.
    Decimal,
}

impl Numbering {
    fn label(&self, index: usize) -> String {
        match self {
            Self::Paragraph => format!("§ {index}"),
            Self::Decimal => format!("{index}."),
        }
    }
}

#[derive(Clone, Copy)]
pub struct ClauseTemplate {
    pub role: DocumentRole,
    pub name: Text,
    pub title: Text,
    pub subtitle: Option<Text>,
    pub preamble: Option<BodyFn>,
    pub numbering: Numbering,
    pub clauses: &'static [ClauseDef],
    pub signature: fn(&ClauseContext<'_>) -> SignatureBlock,
    pub footer: Text,
}

impl ClauseTemplate {
    pub fn compose(&self, ctx: &ClauseContext<'_>) -> DocumentPart {
        let clauses = self
            .clauses
            .iter()
            .filter(|def| def.include.holds(ctx))
            .enumerate()
            .map(|(index, def)| Clause {
                label: Some(self.numbering.label(index + 1)),
                title: def.title.resolve(ctx),
                blocks: (def.body)(ctx),
            })
            .collect();

        DocumentPart {
            role: self.role,
            name: self.name.resolve(ctx),
            title: self.title.resolve(ctx),
            subtitle: self.subtitle.map(|subtitle| subtitle.resolve(ctx)),
            preamble: self.preamble.map(|preamble| preamble(ctx)).unwrap_or_default(),
            clauses,
            signature: (self.signature)(ctx),
            footer: self.footer.resolve(ctx),
        }
    }
}

/// Read-only view handed to predicates and clause bodies.
#[derive(Debug, Clone, Copy)]
pub struct ClauseContext<'a> {
    pub contract_type: ContractType,
    pub record: &'a ContractRecord,
    pub addons: &'a AddonSelection,
    pub lease_term: LeaseTerm,
    pub object: ObjectKind,
}

impl<'a> ClauseContext<'a> {
    pub fn new(
        contract_type: ContractType,
        record: &'a ContractRecord,
        addons: &'a AddonSelection,
    ) -> Self {
        Self {
            contract_type,
            record,
            addons,
            lease_term: LeaseTerm::from_record(record),
            object: ObjectKind::from_record(record),
        }
    }

    pub fn text(&self, field: &str) -> Span {
        field_span(self.record, field, FieldKind::Text)
    }

    pub fn date(&self, field: &str) -> Span {
        field_span(self.record, field, FieldKind::Date)
    }

    /// Long German date such as "1. September 2025", for explanatory prose.
    pub fn long_date(&self, field: &str) -> Span {
        match self.record.text(field).and_then(|raw| parse_date(&raw)) {
            Some(date) => Span::Value(format_long_german_date(date)),
            None => Span::Blank(DATE_PLACEHOLDER.to_string()),
        }
    }

    pub fn amount(&self, field: &str) -> Span {
        field_span(self.record, field, FieldKind::Amount)
    }

    pub fn number(&self, field: &str) -> Span {
        field_span(self.record, field, FieldKind::Number)
    }

    pub fn address(&self, prefix: &str) -> Span {
        address_span(self.record, prefix)
    }

    pub fn has(&self, field: &str) -> bool {
        self.record.is_present(field)
    }

    pub fn flag(&self, field: &str) -> Option<bool> {
        self.record.flag(field)
    }
}

/// Compose the main contract and the addenda for all recognized add-ons.
pub fn compose_document(
    contract_type: ContractType,
    record: &ContractRecord,
    addons: &AddonSelection,
) -> ComposedDocument {
    let ctx = ClauseContext::new(contract_type, record, addons);
    let main = templates::contract_template(contract_type).compose(&ctx);
    let addenda = addons
        .recognized_for(contract_type)
        .into_iter()
        .map(|addon| templates::addendum_template(addon).compose(&ctx))
        .collect();

    ComposedDocument {
        contract_type,
        main,
        addenda,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        let record = ContractRecord::from_pairs(&[("deposit_amount", "900"), ("lease_type", "fixed")]);
        let addons = AddonSelection::from_keys(["protocol"]);
        let ctx = ClauseContext::new(ContractType::RoomSublease, &record, &addons);

        assert!(Predicate::Always.holds(&ctx));
        assert!(Predicate::Present("deposit_amount").holds(&ctx));
        assert!(!Predicate::Present("special_agreements").holds(&ctx));
        assert!(Predicate::AnyPresent(&["pets_allowed", "deposit_amount"]).holds(&ctx));
        assert!(Predicate::Term(LeaseTerm::Fixed).holds(&ctx));
        assert!(Predicate::Addon(Addon::Protocol).holds(&ctx));
        assert!(!Predicate::Addon(Addon::Explanations).holds(&ctx));
        assert!(Predicate::ContractTypes(&[ContractType::RoomSublease]).holds(&ctx));
        assert!(!Predicate::ContractTypes(&[ContractType::GarageLease]).holds(&ctx));
    }

    #[test]
    fn test_included_clauses_are_numbered_consecutively() {
        let composed = compose_document(
            ContractType::FullSublease,
            &ContractRecord::default(),
            &AddonSelection::default(),
        );
        for (index, clause) in composed.main.clauses.iter().enumerate() {
            assert_eq!(clause.label.as_deref(), Some(format!("§ {}", index + 1).as_str()));
        }
    }
}
