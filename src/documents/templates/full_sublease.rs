//! Untermietvertrag über die gesamte Wohnung.

use super::{
    deposit, final_provisions, handover_reference, lease_term, main_landlord_consent,
    no_tacit_extension, parties_preamble, party_signatures, paragraph, payment_terms,
    sentence, special_agreements, t, termination, total_amount,
};
use crate::documents::addons::Addon;
use crate::documents::contract_type::LeaseTerm;
use crate::documents::format::flag_phrase;
use crate::documents::model::{Block, DocumentRole};
use crate::documents::template::{ClauseContext, ClauseDef, ClauseTemplate, Numbering, Predicate, Text};

pub static TEMPLATE: ClauseTemplate = ClauseTemplate {
    role: DocumentRole::Contract,
    name: Text::Fixed("Untermietvertrag"),
    title: Text::Fixed("Untermietvertrag"),
    subtitle: Some(Text::Fixed("über die gesamte Wohnung")),
    preamble: Some(parties_preamble),
    numbering: Numbering::Paragraph,
    clauses: &CLAUSES,
    signature: party_signatures,
    footer: Text::Fixed("Untermietvertrag über die gesamte Wohnung"),
};

static CLAUSES: [ClauseDef; 13] = [
    ClauseDef {
        title: Text::Fixed("Mietobjekt"),
        include: Predicate::Always,
        body: rental_object,
    },
    ClauseDef {
        title: Text::Fixed("Mitvermietetes Inventar"),
        include: Predicate::Present("inventory"),
        body: inventory,
    },
    ClauseDef {
        title: Text::Fixed("Erlaubnis des Hauptvermieters"),
        include: Predicate::Always,
        body: main_landlord_consent,
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
        title: Text::Fixed("Miete und Nebenkosten"),
        include: Predicate::Always,
        body: rent,
    },
    ClauseDef {
        title: Text::Fixed("Mietsicherheit"),
        include: Predicate::Present("deposit_amount"),
        body: deposit,
    },
    ClauseDef {
        title: Text::Fixed("Kündigung"),
        include: Predicate::Always,
        body: termination,
    },
    ClauseDef {
        title: Text::Fixed("Tierhaltung und Rauchen"),
        include: Predicate::AnyPresent(&["pets_allowed", "smoking_allowed"]),
        body: house_use,
    },
    ClauseDef {
        title: Text::Fixed("Rückgabe der Wohnung"),
        include: Predicate::Always,
        body: return_of_premises,
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

fn rental_object(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let mut location = vec![
        t("Der Untervermieter ist Mieter der Wohnung in "),
        ctx.address("property"),
    ];
    if ctx.has("property_floor") {
        location.push(t(", Lage: "));
        location.push(ctx.text("property_floor"));
    }
    location.push(t("."));

    vec![
        paragraph(location),
        paragraph(vec![
            t("Er vermietet dem Untermieter die gesamte Wohnung, bestehend aus "),
            ctx.number("room_count"),
            t(" Zimmern mit einer Wohnfläche von ca. "),
            ctx.number("apartment_size"),
            t(" m², zur alleinigen Nutzung zu Wohnzwecken."),
        ]),
        Block::CheckboxGroup {
            label: "Die Wohnung wird vermietet:".to_string(),
            options: vec![
                ("möbliert".to_string(), ctx.flag("furnished") == Some(true)),
                ("unmöbliert".to_string(), ctx.flag("furnished") == Some(false)),
            ],
        },
    ]
}

fn inventory(ctx: &ClauseContext<'_>) -> Vec<Block> {
    vec![
        sentence("Mitvermietet werden die folgenden Einrichtungsgegenstände:"),
        paragraph(vec![ctx.text("inventory")]),
        sentence("Der Untermieter hat das Inventar pfleglich zu behandeln."),
    ]
}

fn rent(ctx: &ClauseContext<'_>) -> Vec<Block> {
    vec![
        paragraph(vec![
            t("Die monatliche Miete (Kaltmiete) beträgt "),
            ctx.amount("rent_amount"),
            t("."),
        ]),
        paragraph(vec![
            t("Zusätzlich ist eine monatliche Vorauszahlung auf die Betriebs- und Heizkosten von "),
            ctx.amount("utilities_amount"),
            t(" zu leisten, über die jährlich abgerechnet wird."),
        ]),
        paragraph(vec![
            t("Die monatliche Gesamtmiete beträgt somit "),
            total_amount(ctx, "rent_amount", "utilities_amount"),
            t("."),
        ]),
    ]
    .into_iter()
    .chain(payment_terms(ctx))
    .collect()
}

fn house_use(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let pets = flag_phrase(
        ctx.record,
        "pets_allowed",
        "Die Haltung von Haustieren ist gestattet.",
        "Die Haltung von Haustieren, ausgenommen Kleintiere, ist nicht gestattet.",
        "",
    );
    let smoking = flag_phrase(
        ctx.record,
        "smoking_allowed",
        "Das Rauchen in der Wohnung ist gestattet.",
        "Das Rauchen in der Wohnung ist nicht gestattet.",
        "",
    );
    [pets, smoking]
        .into_iter()
        .filter(|phrase| !phrase.is_empty())
        .map(sentence)
        .collect()
}

fn return_of_premises(_ctx: &ClauseContext<'_>) -> Vec<Block> {
    vec![
        sentence(
            "Bei Beendigung des Untermietverhältnisses ist die Wohnung geräumt, besenrein \
             und mit allen Schlüsseln zurückzugeben.",
        ),
        sentence(
            "Schäden, die über die vertragsgemäße Abnutzung hinausgehen, hat der Untermieter \
             zu ersetzen.",
        ),
    ]
}
