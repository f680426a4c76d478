//! Erläuterungen zum Vertrag: plain-language notes on the main clauses.

use super::{contract_noun, paragraph, party_roles, party_signatures, sentence, t};
use crate::documents::contract_type::{ContractType, LeaseTerm};
use crate::documents::model::{Block, DocumentRole, Span};
use crate::documents::template::{ClauseContext, ClauseDef, ClauseTemplate, Numbering, Predicate, Text};

const SUBLEASES: &[ContractType] = &[ContractType::FullSublease, ContractType::RoomSublease];

pub static TEMPLATE: ClauseTemplate = ClauseTemplate {
    role: DocumentRole::Explanations,
    name: Text::Fixed("Erläuterungen zum Vertrag"),
    title: Text::Fixed("Erläuterungen zum Vertrag"),
    subtitle: Some(Text::Computed(subtitle)),
    preamble: Some(introduction),
    numbering: Numbering::Decimal,
    clauses: &CLAUSES,
    signature: party_signatures,
    footer: Text::Fixed("Erläuterungen zum Vertrag"),
};

static CLAUSES: [ClauseDef; 8] = [
    ClauseDef {
        title: Text::Fixed("Befristete Mietzeit"),
        include: Predicate::Term(LeaseTerm::Fixed),
        body: fixed_term,
    },
    ClauseDef {
        title: Text::Fixed("Unbefristete Mietzeit"),
        include: Predicate::Term(LeaseTerm::Indefinite),
        body: indefinite_term,
    },
    ClauseDef {
        title: Text::Fixed("Miete und Nebenkosten"),
        include: Predicate::Always,
        body: rent,
    },
    ClauseDef {
        title: Text::Fixed("Kaution"),
        include: Predicate::Present("deposit_amount"),
        body: deposit,
    },
    ClauseDef {
        title: Text::Fixed("Kündigungsfristen"),
        include: Predicate::Always,
        body: notice,
    },
    ClauseDef {
        title: Text::Fixed("Erlaubnis des Hauptvermieters"),
        include: Predicate::ContractTypes(SUBLEASES),
        body: consent,
    },
    ClauseDef {
        title: Text::Fixed("Nutzung des Mietgegenstands"),
        include: Predicate::ContractTypes(&[ContractType::GarageLease]),
        body: object_use,
    },
    ClauseDef {
        title: Text::Fixed("Hinweis"),
        include: Predicate::Always,
        body: disclaimer,
    },
];

fn subtitle(ctx: &ClauseContext<'_>) -> String {
    match ctx.contract_type {
        ContractType::GarageLease => format!("zum Mietvertrag über {}", ctx.object.indefinite()),
        other => format!("zum {}", other.display_name()),
    }
}

fn introduction(_ctx: &ClauseContext<'_>) -> Vec<Block> {
    vec![sentence(
        "Die folgenden Erläuterungen fassen die wichtigsten Regelungen des Vertrages in \
         verständlicher Sprache zusammen. Sie sind nicht Bestandteil des Vertrages.",
    )]
}

fn fixed_term(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let noun = contract_noun(ctx.contract_type);
    vec![
        paragraph(vec![
            t(&format!("Das {noun} endet automatisch am ")),
            ctx.long_date("end_date"),
            t(". Eine Kündigung ist dafür nicht erforderlich."),
        ]),
        sentence(
            "Während der Laufzeit kann der Vertrag nur aus wichtigem Grund vorzeitig beendet \
             werden. Wird die Nutzung nach Ablauf fortgesetzt, verlängert sich der Vertrag \
             nicht automatisch.",
        ),
    ]
}

fn indefinite_term(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let noun = contract_noun(ctx.contract_type);
    vec![paragraph(vec![
        t(&format!("Das {noun} beginnt am ")),
        ctx.long_date("start_date"),
        t(" und läuft so lange, bis eine der Parteien es unter Einhaltung der \
           Kündigungsfrist beendet."),
    ])]
}

fn rent(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let (landlord_role, _) = party_roles(ctx.contract_type);
    let mut blocks = vec![paragraph(vec![
        t("Die vereinbarte Miete beträgt "),
        ctx.amount("rent_amount"),
        t(&format!(" monatlich und ist im Voraus auf das Konto des {landlord_role}s zu zahlen.")),
    ])];
    let utilities_note = match ctx.contract_type {
        ContractType::FullSublease => {
            "Die Nebenkosten werden als Vorauszahlung geleistet und einmal jährlich abgerechnet. \
             Dabei kann es zu Nachzahlungen oder Erstattungen kommen."
        }
        ContractType::RoomSublease => {
            "Die Nebenkosten sind als Pauschale vereinbart. Eine Nachzahlung fällt nicht an."
        }
        ContractType::GarageLease => {
            "Eine etwaige Nebenkostenpauschale wird zusammen mit der Miete gezahlt."
        }
    };
    blocks.push(sentence(utilities_note));
    blocks
}

fn deposit(ctx: &ClauseContext<'_>) -> Vec<Block> {
    vec![
        paragraph(vec![
            t("Die Kaution von "),
            ctx.amount("deposit_amount"),
            t(" sichert Ansprüche aus dem Vertrag ab, etwa für Schäden oder offene Zahlungen."),
        ]),
        sentence(
            "Nach dem Auszug wird die Kaution zurückgezahlt, sobald feststeht, dass keine \
             Ansprüche mehr bestehen. Dies kann einige Monate dauern.",
        ),
    ]
}

fn notice(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let text = match (ctx.lease_term, ctx.contract_type) {
        (LeaseTerm::Fixed, _) => {
            "Bei einem befristeten Vertrag ist eine ordentliche Kündigung ausgeschlossen."
                .to_string()
        }
        (LeaseTerm::Indefinite, ContractType::GarageLease) if !ctx.has("notice_period_months") => {
            "Ohne abweichende Vereinbarung kann spätestens am dritten Werktag eines Monats \
             zum Ende des übernächsten Monats gekündigt werden."
                .to_string()
        }
        (LeaseTerm::Indefinite, _) if ctx.has("notice_period_months") => {
            let months = ctx.number("notice_period_months");
            return vec![
                paragraph(vec![
                    t("Beide Parteien können mit einer Frist von "),
                    months,
                    t(" Monaten zum Monatsende kündigen."),
                ]),
                sentence("Die Kündigung muss schriftlich erfolgen."),
            ];
        }
        (LeaseTerm::Indefinite, _) => {
            "Es gelten die gesetzlichen Kündigungsfristen. Für den Mieter beträgt die Frist \
             in der Regel drei Monate."
                .to_string()
        }
    };
    vec![sentence(&text), sentence("Die Kündigung muss schriftlich erfolgen.")]
}

fn consent(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let status = if ctx.flag("landlord_consent") == Some(true) {
        "Nach Angaben des Untervermieters liegt die Erlaubnis bereits vor."
    } else {
        "Der Untervermieter muss die Erlaubnis noch einholen."
    };
    vec![
        sentence(
            "Eine Untervermietung ist nur mit Erlaubnis des Hauptvermieters zulässig. Fehlt \
             sie, kann der Hauptvermieter das Hauptmietverhältnis kündigen.",
        ),
        sentence(status),
        sentence(
            "Endet das Hauptmietverhältnis, endet auch das Untermietverhältnis.",
        ),
    ]
}

fn object_use(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let object = ctx.object;
    vec![paragraph(vec![
        t(&format!("Nutzen Sie {} nur für den vereinbarten Zweck. ", object.accusative())),
        Span::text(format!(
            "Brennbare Stoffe und Gerümpel dürfen {} nicht gelagert werden.",
            object.locative()
        )),
    ])]
}

fn disclaimer(_ctx: &ClauseContext<'_>) -> Vec<Block> {
    vec![sentence(
        "Diese Erläuterungen ersetzen keine Rechtsberatung. Maßgeblich ist allein der \
         Wortlaut des Vertrages.",
    )]
}
