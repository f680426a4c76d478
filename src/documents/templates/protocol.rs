//! Übergabeprotokoll: handover record filled in by hand at move-in.

use super::{party_signatures, paragraph, sentence, t, value_cell};
use crate::documents::contract_type::ContractType;
use crate::documents::model::{Block, Cell, DocumentRole};
use crate::documents::template::{ClauseContext, ClauseDef, ClauseTemplate, Numbering, Predicate, Text};

const APARTMENT_ROOMS: [&str; 6] = ["Flur", "Küche", "Bad", "Wohnzimmer", "Schlafzimmer", "Balkon"];
const ROOM_AREAS: [&str; 4] = ["Zimmer", "Küche (Mitbenutzung)", "Bad (Mitbenutzung)", "Flur"];
const OBJECT_AREAS: [&str; 4] = ["Tor / Zufahrt", "Boden", "Wände / Decke", "Beleuchtung"];
const METERS: [&str; 4] = ["Strom", "Gas", "Wasser (kalt)", "Wasser (warm)"];

pub static TEMPLATE: ClauseTemplate = ClauseTemplate {
    role: DocumentRole::Protocol,
    name: Text::Fixed("Übergabeprotokoll"),
    title: Text::Fixed("Übergabeprotokoll"),
    subtitle: Some(Text::Computed(subtitle)),
    preamble: None,
    numbering: Numbering::Decimal,
    clauses: &CLAUSES,
    signature: party_signatures,
    footer: Text::Fixed("Übergabeprotokoll"),
};

static CLAUSES: [ClauseDef; 5] = [
    ClauseDef {
        title: Text::Fixed("Angaben zur Übergabe"),
        include: Predicate::Always,
        body: handover_details,
    },
    ClauseDef {
        title: Text::Fixed("Zählerstände"),
        include: Predicate::ContractTypes(&[ContractType::FullSublease, ContractType::RoomSublease]),
        body: meter_readings,
    },
    ClauseDef {
        title: Text::Computed(condition_title),
        include: Predicate::Always,
        body: condition,
    },
    ClauseDef {
        title: Text::Fixed("Übergebene Schlüssel"),
        include: Predicate::Always,
        body: keys,
    },
    ClauseDef {
        title: Text::Fixed("Festgestellte Mängel"),
        include: Predicate::Always,
        body: defects,
    },
];

fn subtitle(ctx: &ClauseContext<'_>) -> String {
    match ctx.contract_type {
        ContractType::GarageLease => format!("zum Mietvertrag über {}", ctx.object.indefinite()),
        other => format!("zum {}", other.display_name()),
    }
}

fn condition_title(ctx: &ClauseContext<'_>) -> String {
    match ctx.contract_type {
        ContractType::GarageLease => format!("Zustand {}", ctx.object.genitive()),
        _ => "Zustand der Räume".to_string(),
    }
}

fn handover_details(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let address_prefix = match ctx.contract_type {
        ContractType::GarageLease => "garage",
        _ => "property",
    };
    vec![
        paragraph(vec![t("Anschrift des Mietobjekts: "), ctx.address(address_prefix)]),
        paragraph(vec![t("Tag der Übergabe: "), ctx.date("start_date")]),
        Block::InputLines {
            label: "Anwesende Personen:".to_string(),
            lines: 1,
        },
    ]
}

fn meter_readings(_ctx: &ClauseContext<'_>) -> Vec<Block> {
    let rows = METERS
        .iter()
        .map(|meter| vec![Cell::Text(meter.to_string()), Cell::Input, Cell::Input])
        .collect();
    vec![Block::Table {
        headers: vec![
            "Zähler".to_string(),
            "Zählernummer".to_string(),
            "Stand".to_string(),
        ],
        rows,
        widths: Some(vec![1.2, 1.4, 1.0]),
    }]
}

fn condition(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let areas: &[&str] = match ctx.contract_type {
        ContractType::FullSublease => &APARTMENT_ROOMS,
        ContractType::RoomSublease => &ROOM_AREAS,
        ContractType::GarageLease => &OBJECT_AREAS,
    };
    let rows = areas
        .iter()
        .map(|area| {
            vec![
                Cell::Text(area.to_string()),
                Cell::Checkbox(false),
                Cell::Checkbox(false),
                Cell::Input,
            ]
        })
        .collect();
    vec![Block::Table {
        headers: vec![
            "Bereich".to_string(),
            "in Ordnung".to_string(),
            "Mängel".to_string(),
            "Bemerkung".to_string(),
        ],
        rows,
        widths: Some(vec![1.4, 0.8, 0.8, 2.0]),
    }]
}

fn keys(ctx: &ClauseContext<'_>) -> Vec<Block> {
    let mut rows = vec![vec![
        Cell::Text("Schlüssel".to_string()),
        value_cell(ctx, "key_count"),
        Cell::Input,
    ]];
    if ctx.contract_type == ContractType::GarageLease {
        rows.push(vec![
            Cell::Text("Handsender".to_string()),
            value_cell(ctx, "remote_count"),
            Cell::Input,
        ]);
    }
    vec![Block::Table {
        headers: vec![
            "Art".to_string(),
            "Anzahl".to_string(),
            "Bemerkung".to_string(),
        ],
        rows,
        widths: Some(vec![1.4, 0.8, 2.0]),
    }]
}

fn defects(_ctx: &ClauseContext<'_>) -> Vec<Block> {
    vec![
        Block::InputLines {
            label: "Bei der Übergabe wurden folgende Mängel festgestellt:".to_string(),
            lines: 4,
        },
        sentence(
            "Die Parteien bestätigen mit ihrer Unterschrift, dass der Zustand wie oben \
             beschrieben übergeben wurde.",
        ),
    ]
}
