//! Mietvertrag über eine Garage oder einen Stellplatz.
//!
//! All object wording goes through [`ObjectKind`] so a parking space contract
//! never mentions a garage and vice versa.

use super::{
    deposit, final_provisions, handover_reference, lease_term, no_tacit_extension,
    parties_preamble, party_signatures, paragraph, payment_terms, sentence,
    special_agreements, t, termination, total_amount, value_cell,
};
use crate::documents::addons::Addon;
use crate::documents::contract_type::{LeaseTerm, ObjectKind};
use crate::documents::model::{Block, Cell, DocumentRole};
use crate::documents::template::{ClauseContext, ClauseDef, ClauseTemplate, Numbering, Predicate, Text};

pub static TEMPLATE: ClauseTemplate = ClauseTemplate {
    role: DocumentRole::Contract,
    name: Text::Fixed("Mietvertrag"),
    title: Text::Fixed("Mietvertrag"),
    subtitle: Some(Text::Computed(subtitle)),
    preamble: Some(parties_preamble),
    numbering: Numbering::Paragraph,
    clauses: &CLAUSES,
    signature: party_signatures,
    footer: Text::Computed(footer),
};

static CLAUSES: [ClauseDef; 12] = [
    ClauseDef {
        title: Text::Fixed("Mietgegenstand"),
        include: Predicate::Always,
        body: rental_object,
    },
    ClauseDef {
        title: Text::Fixed("Nutzung"),
        include: Predicate::Always,
        body: usage,
    },
    ClauseDef {
        title: Text::Fixed("Mietzeit"),
        include: Predicate::Always,
        body: lease_term,
    },
    ClauseDef {
        title: Text::Fixed("Keine stillschweigende Verlängerung"),
        include: Predicate::Term(LeaseTerm::Fixed),
        body: no_tacit_extension,
    },
    ClauseDef {
        title: Text::Fixed("Miete"),
        include: Predicate::Always,
        body: rent,
    },
    ClauseDef {
        title: Text::Fixed("Mietsicherheit"),
        include: Predicate::Present("deposit_amount"),
        body: deposit,
    },
    ClauseDef {
        title: Text::Fixed("Schlüssel und Handsender"),
        include: Predicate::AnyPresent(&["key_count", "remote_count"]),
        body: keys,
    },
    ClauseDef {
        title: Text::Fixed("Kündigung"),
        include: Predicate::Always,
        body: termination,
    },
    ClauseDef {
        title: Text::Fixed("Haftung"),
        include: Predicate::Always,
        body: liability,
    },
    ClauseDef {
        title: Text::Fixed("Übergabe"),
        include: Predicate::Addon(Addon::Protocol),
        body: handover_reference,
    },
    ClauseDef {
        title: Text::Fixed("Sonstige Vereinbarungen"),
        include: Predicate::Present("special_agreements"),
        body: special_agreements,
    },
    ClauseDef {
        title: Text::Fixed("Schlussbestimmungen"),
        include: Predicate::Always,
        body: final_provisions,
    },
];

fn subtitle(ctx: &ClauseContext<'_>) -> String {
    format!("über {}", ctx.object.indefinite())
}

fn footer(ctx: &ClauseContext<'_>) -> String {
    format!("Mietvertrag über {}", ctx.object.indefinite())
}

fn capitalized(phrase: &str) -> String {
    let mut chars = phrase.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn rental_object(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let object = ctx.object;
    let mut blocks = vec![paragraph(vec![
        t(&format!("Der Vermieter vermietet dem Mieter {} in ", object.accusative())),
        ctx.address("garage"),
        t("."),
    ])];
    if ctx.has("garage_number") {
        blocks.push(paragraph(vec![
            t(&format!("Die Nummer {} lautet: ", object.genitive())),
            ctx.text("garage_number"),
            t("."),
        ]));
    }
    blocks.push(sentence(&format!(
        "{} wird in dem Zustand vermietet, in dem {} sich bei Übergabe befindet.",
        capitalized(object.nominative()),
        pronoun(object),
    )));
    blocks
}

fn pronoun(object: ObjectKind) -> &'static str {
    match object {
        ObjectKind::Garage => "sie",
        ObjectKind::ParkingSpace => "er",
        ObjectKind::Unspecified => "es",
    }
}

fn usage(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let object = ctx.object;
    let mut blocks = Vec::new();
    if ctx.has("usage_purpose") {
        blocks.push(paragraph(vec![
            t(&format!("{} dient ausschließlich folgendem Zweck: ", capitalized(object.nominative()))),
            ctx.text("usage_purpose"),
            t("."),
        ]));
    } else {
        blocks.push(sentence(&format!(
            "{} darf ausschließlich zum Abstellen eines Kraftfahrzeugs genutzt werden.",
            capitalized(object.nominative())
        )));
    }
    blocks.push(sentence(&format!(
        "Die Lagerung von brennbaren Flüssigkeiten und sonstigen Gegenständen {} ist \
         nicht gestattet. Eine Untervermietung bedarf der Zustimmung des Vermieters.",
        object.locative()
    )));
    blocks
}

fn rent(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let mut blocks = vec![paragraph(vec![
        t(&format!("Die monatliche Miete für {} beträgt ", ctx.object.accusative())),
        ctx.amount("rent_amount"),
        t("."),
    ])];
    if ctx.has("utilities_amount") {
        blocks.push(paragraph(vec![
            t("Zusätzlich ist eine monatliche Nebenkostenpauschale von "),
            ctx.amount("utilities_amount"),
            t(" zu zahlen."),
        ]));
    }
    blocks.push(paragraph(vec![
        t(&format!(
            "Die monatliche Gesamtmiete für {} beträgt somit ",
            ctx.object.accusative()
        )),
        if ctx.has("utilities_amount") {
            total_amount(ctx, "rent_amount", "utilities_amount")
        } else {
            ctx.amount("rent_amount")
        },
        t("."),
    ]));
    blocks.extend(payment_terms(ctx));
    blocks
}

fn keys(ctx: &ClauseContext<'_>) -> Vec<Block> {
    vec![
        sentence("Dem Mieter werden bei Übergabe ausgehändigt:"),
        Block::Table {
            headers: vec!["Gegenstand".to_string(), "Anzahl".to_string()],
            rows: vec![
                vec![Cell::Text("Schlüssel".to_string()), value_cell(ctx, "key_count")],
                vec![Cell::Text("Handsender".to_string()), value_cell(ctx, "remote_count")],
            ],
            widths: Some(vec![2.0, 1.0]),
        },
        sentence(
            "Der Verlust eines Schlüssels oder Handsenders ist dem Vermieter unverzüglich \
             anzuzeigen. Die Kosten für Ersatz trägt der Mieter.",
        ),
    ]
}

fn liability(ctx: &ClauseContext<'_>) -> Vec<Block> {
    vec![sentence(&format!(
        "Der Vermieter haftet nicht für Schäden an den {} abgestellten Fahrzeugen und \
         Gegenständen, es sei denn, sie beruhen auf Vorsatz oder grober Fahrlässigkeit.",
        ctx.object.locative()
    ))]
}
