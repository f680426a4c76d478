//! Untermietvertrag über ein Zimmer in einer Wohngemeinschaft.

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

const SHARED_AREAS: [(&str, &[&str]); 4] = [
    ("Küche", &["küche", "kitchen"]),
    ("Bad", &["bad", "badezimmer", "bathroom"]),
    ("Wohnzimmer", &["wohnzimmer", "living"]),
    ("Balkon", &["balkon", "balcony", "terrasse"]),
];

pub static TEMPLATE: ClauseTemplate = ClauseTemplate {
    role: DocumentRole::Contract,
    name: Text::Fixed("Untermietvertrag"),
    title: Text::Fixed("Untermietvertrag"),
    subtitle: Some(Text::Fixed("über ein Zimmer in einer Wohngemeinschaft")),
    preamble: Some(parties_preamble),
    numbering: Numbering::Paragraph,
    clauses: &CLAUSES,
    signature: party_signatures,
    footer: Text::Fixed("Untermietvertrag über ein WG-Zimmer"),
};

static CLAUSES: [ClauseDef; 13] = [
    ClauseDef {
        title: Text::Fixed("Mietobjekt"),
        include: Predicate::Always,
        body: rental_object,
    },
    ClauseDef {
        title: Text::Fixed("Gemeinschaftlich genutzte Räume"),
        include: Predicate::Always,
        body: shared_areas,
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
        title: Text::Fixed("Zusammenleben und Hausordnung"),
        include: Predicate::Always,
        body: house_rules,
    },
    ClauseDef {
        title: Text::Fixed("Besuch"),
        include: Predicate::Present("overnight_guests"),
        body: guests,
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
    let mut blocks = vec![paragraph(vec![
        t("Der Untervermieter ist Mieter der Wohnung in "),
        ctx.address("property"),
        t(". Er vermietet dem Untermieter darin ein Zimmer mit einer Größe von ca. "),
        ctx.number("room_size"),
        t(" m² zur alleinigen Nutzung zu Wohnzwecken."),
    ])];
    if ctx.has("room_description") {
        blocks.push(paragraph(vec![
            t("Beschreibung des Zimmers: "),
            ctx.text("room_description"),
        ]));
    }
    blocks.push(Block::CheckboxGroup {
        label: "Das Zimmer wird vermietet:".to_string(),
        options: vec![
            ("möbliert".to_string(), ctx.flag("furnished") == Some(true)),
            ("unmöbliert".to_string(), ctx.flag("furnished") == Some(false)),
        ],
    });
    blocks
}

fn shared_areas(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let listed = ctx
        .record
        .text("shared_areas")
        .map(|value| value.to_lowercase())
        .unwrap_or_default();
    let options = SHARED_AREAS
        .iter()
        .map(|(label, keywords)| {
            let checked = keywords.iter().any(|keyword| listed.contains(keyword));
            (label.to_string(), checked)
        })
        .collect();

    vec![
        Block::CheckboxGroup {
            label: "Der Untermieter ist zur Mitbenutzung folgender Räume berechtigt:".to_string(),
            options,
        },
        sentence(
            "Gemeinschaftsräume sind von allen Bewohnern gleichermaßen sauber zu halten.",
        ),
    ]
}

fn rent(ctx: &ClauseContext<'_>) -> Vec<Block> {
    vec![
        paragraph(vec![
            t("Die monatliche Miete für das Zimmer beträgt "),
            ctx.amount("rent_amount"),
            t("."),
        ]),
        paragraph(vec![
            t("Für Nebenkosten (Heizung, Wasser, Strom, Internet) wird eine monatliche Pauschale von "),
            ctx.amount("utilities_amount"),
            t(" vereinbart. Eine gesonderte Abrechnung erfolgt nicht."),
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

fn house_rules(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let mut blocks = vec![sentence(
        "Der Untermieter verpflichtet sich zur gegenseitigen Rücksichtnahme und zur \
         Einhaltung der Hausordnung.",
    )];
    let pets = flag_phrase(
        ctx.record,
        "pets_allowed",
        "Die Haltung von Haustieren ist gestattet.",
        "Die Haltung von Haustieren ist nicht gestattet.",
        "",
    );
    let smoking = flag_phrase(
        ctx.record,
        "smoking_allowed",
        "Das Rauchen im Zimmer ist gestattet.",
        "Das Rauchen ist im Zimmer und in den Gemeinschaftsräumen nicht gestattet.",
        "",
    );
    blocks.extend(
        [pets, smoking]
            .into_iter()
            .filter(|phrase| !phrase.is_empty())
            .map(sentence),
    );
    blocks
}

fn guests(ctx: &ClauseContext<'_>) -> Vec<Block> {
    vec![paragraph(vec![
        t("Übernachtungsbesuch ist wie folgt gestattet: "),
        ctx.text("overnight_guests"),
        t("."),
    ])]
}
