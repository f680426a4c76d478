//! Clause templates for each contract type and addendum.
//!
//! - `full_sublease` - Untermietvertrag über die gesamte Wohnung
//! - `room_sublease` - Untermietvertrag über ein WG-Zimmer
//! - `garage_lease` - Mietvertrag über Garage oder Stellplatz
//! - `explanations` / `protocol` - addenda for purchased add-ons
//!
//! Clause bodies shared between contract types live in this module so the
//! wording only exists once.

pub mod explanations;
pub mod full_sublease;
pub mod garage_lease;
pub mod protocol;
pub mod room_sublease;

use super::addons::Addon;
use super::contract_type::{ContractType, LeaseTerm};
use super::format::{format_cents, parse_cents, AMOUNT_PLACEHOLDER};
use super::model::{Block, Cell, Signer, SignatureBlock, Span};
use super::template::{ClauseContext, ClauseTemplate};

pub fn contract_template(contract_type: ContractType) -> &'static ClauseTemplate {
    match contract_type {
        ContractType::FullSublease => &full_sublease::TEMPLATE,
        ContractType::RoomSublease => &room_sublease::TEMPLATE,
        ContractType::GarageLease => &garage_lease::TEMPLATE,
    }
}

pub fn addendum_template(addon: Addon) -> &'static ClauseTemplate {
    match addon {
        Addon::Explanations => &explanations::TEMPLATE,
        Addon::Protocol => &protocol::TEMPLATE,
    }
}

pub(crate) fn t(text: &str) -> Span {
    Span::text(text)
}

pub(crate) fn paragraph(spans: Vec<Span>) -> Block {
    Block::Paragraph(spans)
}

pub(crate) fn sentence(text: &str) -> Block {
    Block::Paragraph(vec![t(text)])
}

/// Role names of the two contracting parties.
pub(crate) fn party_roles(contract_type: ContractType) -> (&'static str, &'static str) {
    if contract_type.is_sublease() {
        ("Untervermieter", "Untermieter")
    } else {
        ("Vermieter", "Mieter")
    }
}

pub(crate) fn contract_noun(contract_type: ContractType) -> &'static str {
    if contract_type.is_sublease() {
        "Untermietverhältnis"
    } else {
        "Mietverhältnis"
    }
}

/// Table cell holding a field value, or an input line when absent.
pub(crate) fn value_cell(ctx: &ClauseContext<'_>, field: &str) -> Cell {
    match ctx.record.text(field) {
        Some(value) => Cell::Text(value),
        None => Cell::Input,
    }
}

pub(crate) fn parties_preamble(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let (landlord_role, tenant_role) = party_roles(ctx.contract_type);
    let landlord_note = if ctx.contract_type.is_sublease() {
        format!("– nachfolgend „{landlord_role}“ (Hauptmieter) genannt –")
    } else {
        format!("– nachfolgend „{landlord_role}“ genannt –")
    };

    vec![
        sentence("Zwischen"),
        paragraph(vec![
            ctx.text("landlord_name"),
            t(", wohnhaft in "),
            ctx.address("landlord"),
        ]),
        sentence(&landlord_note),
        sentence("und"),
        paragraph(vec![
            ctx.text("tenant_name"),
            t(", wohnhaft in "),
            ctx.address("tenant"),
        ]),
        sentence(&format!("– nachfolgend „{tenant_role}“ genannt –")),
        sentence("wird folgender Vertrag geschlossen:"),
    ]
}

pub(crate) fn main_landlord_consent(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let consent = ctx.flag("landlord_consent") == Some(true);
    let mut blocks = vec![paragraph(vec![
        t("Hauptvermieter der Wohnung ist "),
        ctx.text("main_landlord_name"),
        t("."),
    ])];

    if consent {
        blocks.push(sentence(
            "Die Erlaubnis des Hauptvermieters zur Untervermietung liegt vor.",
        ));
    } else {
        blocks.push(sentence(
            "Der Untervermieter versichert, die Erlaubnis des Hauptvermieters zur \
             Untervermietung einzuholen. Wird die Erlaubnis versagt oder widerrufen, \
             sind beide Parteien zur außerordentlichen Kündigung berechtigt.",
        ));
    }
    blocks.push(Block::Checkbox {
        label: "Die Erlaubnis des Hauptvermieters liegt schriftlich vor.".to_string(),
        checked: consent,
    });
    blocks
}

/// Start/end wording, branching on fixed-term vs indefinite lease.
pub(crate) fn lease_term(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let noun = contract_noun(ctx.contract_type);
    let mut blocks = Vec::new();

    match ctx.lease_term {
        LeaseTerm::Fixed => {
            blocks.push(paragraph(vec![
                t(&format!("Das {noun} beginnt am ")),
                ctx.date("start_date"),
                t(" und endet am "),
                ctx.date("end_date"),
                t(", ohne dass es einer Kündigung bedarf."),
            ]));
            if ctx.has("fixed_term_reason") {
                blocks.push(paragraph(vec![
                    t("Die Befristung erfolgt aus folgendem Grund: "),
                    ctx.text("fixed_term_reason"),
                    t("."),
                ]));
            }
        }
        LeaseTerm::Indefinite => {
            blocks.push(paragraph(vec![
                t(&format!("Das {noun} beginnt am ")),
                ctx.date("start_date"),
                t(" und läuft auf unbestimmte Zeit."),
            ]));
        }
    }

    if ctx.contract_type.is_sublease() {
        blocks.push(sentence(
            "Das Untermietverhältnis endet spätestens mit der Beendigung des \
             Hauptmietverhältnisses.",
        ));
    }
    blocks
}

pub(crate) fn no_tacit_extension(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let (_, tenant_role) = party_roles(ctx.contract_type);
    vec![sentence(&format!(
        "Setzt der {tenant_role} den Gebrauch nach Ablauf der vereinbarten Mietzeit fort, \
         verlängert sich das Mietverhältnis nicht auf unbestimmte Zeit. \
         § 545 BGB findet keine Anwendung."
    ))]
}

/// Sum of two amount fields, when both parse.
pub(crate) fn total_amount(ctx: &ClauseContext<'_>, first: &str, second: &str) -> Span {
    let first = ctx.record.get(first).and_then(parse_cents);
    let second = ctx.record.get(second).and_then(parse_cents);
    match (first, second) {
        (Some(first), Some(second)) => match first.checked_add(second) {
            Some(total) => Span::Value(format_cents(total)),
            None => Span::Blank(AMOUNT_PLACEHOLDER.to_string()),
        },
        _ => Span::Blank(AMOUNT_PLACEHOLDER.to_string()),
    }
}

/// Payment date sentence and bank account table.
pub(crate) fn payment_terms(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let (landlord_role, _) = party_roles(ctx.contract_type);
    vec![
        paragraph(vec![
            t("Die Miete ist monatlich im Voraus, spätestens bis zum "),
            ctx.number("payment_day"),
            t(&format!(". Werktag eines Monats, auf folgendes Konto des {landlord_role}s zu zahlen:")),
        ]),
        Block::Table {
            headers: vec![
                "Kontoinhaber".to_string(),
                "IBAN".to_string(),
                "Kreditinstitut".to_string(),
            ],
            rows: vec![vec![
                value_cell(ctx, "account_holder"),
                value_cell(ctx, "iban"),
                value_cell(ctx, "bank_name"),
            ]],
            widths: Some(vec![1.0, 1.4, 1.0]),
        },
    ]
}

pub(crate) fn deposit(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let (landlord_role, tenant_role) = party_roles(ctx.contract_type);
    vec![
        paragraph(vec![
            t(&format!("Der {tenant_role} leistet eine Mietsicherheit (Kaution) in Höhe von ")),
            ctx.amount("deposit_amount"),
            t(". Die Kaution darf höchstens drei Monatsmieten betragen und kann in drei \
               gleichen monatlichen Teilzahlungen erbracht werden."),
        ]),
        sentence(&format!(
            "Der {landlord_role} hat die Kaution nach Beendigung des Mietverhältnisses und \
             Abrechnung etwaiger Ansprüche zurückzuzahlen."
        )),
    ]
}

/// Notice wording, branching on lease term.
pub(crate) fn termination(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let noun = contract_noun(ctx.contract_type);
    let mut blocks = Vec::new();

    match ctx.lease_term {
        LeaseTerm::Fixed => blocks.push(sentence(&format!(
            "Während der vereinbarten Mietzeit ist die ordentliche Kündigung des {noun}ses \
             ausgeschlossen. Das Recht zur außerordentlichen Kündigung aus wichtigem Grund \
             bleibt unberührt."
        ))),
        LeaseTerm::Indefinite => {
            if ctx.has("notice_period_months") {
                blocks.push(paragraph(vec![
                    t(&format!("Das {noun} kann von beiden Seiten mit einer Frist von ")),
                    ctx.number("notice_period_months"),
                    t(" Monaten zum Monatsende gekündigt werden."),
                ]));
            } else if ctx.contract_type == ContractType::GarageLease {
                blocks.push(sentence(
                    "Das Mietverhältnis kann von beiden Seiten spätestens am dritten Werktag \
                     eines Kalendermonats zum Ablauf des übernächsten Monats gekündigt werden \
                     (§ 580a Abs. 1 Nr. 3 BGB).",
                ));
            } else {
                blocks.push(sentence(&format!(
                    "Das {noun} kann von beiden Seiten unter Einhaltung der gesetzlichen \
                     Fristen gekündigt werden."
                )));
            }
        }
    }

    blocks.push(sentence("Die Kündigung bedarf der Schriftform."));
    blocks
}

pub(crate) fn handover_reference(_ctx: &ClauseContext<'_>) -> Vec<Block> {
    vec![sentence(
        "Über den Zustand bei Übergabe wird ein Übergabeprotokoll erstellt, das diesem \
         Vertrag als Anlage beigefügt ist und von beiden Parteien unterzeichnet wird.",
    )]
}

pub(crate) fn special_agreements(ctx: &ClauseContext<'_>) -> Vec<Block> {
    vec![paragraph(vec![ctx.text("special_agreements")])]
}

pub(crate) fn final_provisions(_ctx: &ClauseContext<'_>) -> Vec<Block> {
    vec![
        sentence(
            "Änderungen und Ergänzungen dieses Vertrages bedürfen der Schriftform. \
             Mündliche Nebenabreden bestehen nicht.",
        ),
        sentence(
            "Sollte eine Bestimmung dieses Vertrages unwirksam sein, bleibt die Wirksamkeit \
             der übrigen Bestimmungen unberührt. An die Stelle der unwirksamen Bestimmung \
             tritt die gesetzliche Regelung.",
        ),
        sentence("Jede Partei erhält eine Ausfertigung dieses Vertrages."),
    ]
}

/// Place/date line and both parties' signatures.
pub(crate) fn party_signatures(ctx: &ClauseContext<'_>) -> SignatureBlock {
    let (landlord_role, tenant_role) = party_roles(ctx.contract_type);
    SignatureBlock {
        place_and_date: vec![ctx.text("contract_place"), t(", den "), ctx.date("contract_date")],
        signers: vec![
            Signer {
                role: landlord_role.to_string(),
                name: ctx.text("landlord_name"),
            },
            Signer {
                role: tenant_role.to_string(),
                name: ctx.text("tenant_name"),
            },
        ],
    }
}
