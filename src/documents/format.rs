//! Value formatter.
//!
//! Maps raw record fields to display strings. Absent, blank or unparsable
//! values never fail; they degrade to a bracketed placeholder so the generated
//! document always shows a fillable blank.

use chrono::{Datelike, NaiveDate};

use super::model::Span;
use super::record::{ContractRecord, FieldValue};

pub const TEXT_PLACEHOLDER: &str = "[___________]";
pub const DATE_PLACEHOLDER: &str = "[DATUM]";
pub const AMOUNT_PLACEHOLDER: &str = "[BETRAG]";
pub const NUMBER_PLACEHOLDER: &str = "[___]";

const GERMAN_MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// How a field should be interpreted and which placeholder it falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Amount,
    Number,
}

impl FieldKind {
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Text => TEXT_PLACEHOLDER,
            Self::Date => DATE_PLACEHOLDER,
            Self::Amount => AMOUNT_PLACEHOLDER,
            Self::Number => NUMBER_PLACEHOLDER,
        }
    }
}

/// Resolve a field to either its formatted value or a placeholder span.
pub fn field_span(record: &ContractRecord, field: &str, kind: FieldKind) -> Span {
    let formatted = match kind {
        FieldKind::Text | FieldKind::Number => record.text(field),
        FieldKind::Date => record
            .text(field)
            .and_then(|raw| parse_date(&raw))
            .map(format_date_value),
        FieldKind::Amount => record.get(field).and_then(parse_cents).map(format_cents),
    };

    match formatted {
        Some(value) => Span::Value(value),
        None => Span::Blank(kind.placeholder().to_string()),
    }
}

/// Trimmed text of a field, or the given placeholder (default `[___________]`).
pub fn format_field(record: &ContractRecord, field: &str, placeholder: Option<&str>) -> String {
    record
        .text(field)
        .unwrap_or_else(|| placeholder.unwrap_or(TEXT_PLACEHOLDER).to_string())
}

/// German day/month/year form (`01.09.2025`), or `[DATUM]`.
pub fn format_date(record: &ContractRecord, field: &str) -> String {
    field_span(record, field, FieldKind::Date).into_string()
}

/// German currency form (`1.234,56 €`), or `[BETRAG]`.
pub fn format_currency(record: &ContractRecord, field: &str) -> String {
    field_span(record, field, FieldKind::Amount).into_string()
}

/// Compose `{prefix}_street`, `{prefix}_zip` and `{prefix}_city` into one line.
pub fn address_span(record: &ContractRecord, prefix: &str) -> Span {
    let street = record.text(&format!("{prefix}_street"));
    let zip = record.text(&format!("{prefix}_zip"));
    let city = record.text(&format!("{prefix}_city"));

    let locality = match (zip, city) {
        (Some(zip), Some(city)) => Some(format!("{zip} {city}")),
        (Some(single), None) | (None, Some(single)) => Some(single),
        (None, None) => None,
    };

    match (street, locality) {
        (Some(street), Some(locality)) => Span::Value(format!("{street}, {locality}")),
        (Some(single), None) | (None, Some(single)) => Span::Value(single),
        (None, None) => Span::Blank(TEXT_PLACEHOLDER.to_string()),
    }
}

pub fn format_address(record: &ContractRecord, prefix: &str) -> String {
    address_span(record, prefix).into_string()
}

/// Pick a phrase from a yes/no field; `unknown` when absent or unparsable.
pub fn flag_phrase<'a>(
    record: &ContractRecord,
    field: &str,
    yes: &'a str,
    no: &'a str,
    unknown: &'a str,
) -> &'a str {
    match record.flag(field) {
        Some(true) => yes,
        Some(false) => no,
        None => unknown,
    }
}

/// Accepts ISO dates (`2025-09-01`, optionally with a time part) and German
/// dates (`01.09.2025`).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = match trimmed.find('T') {
        Some(10) => &trimmed[..10],
        _ => trimmed,
    };

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%d.%m.%Y"))
        .ok()
}

pub fn format_date_value(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Long German form (e.g. "1. September 2025").
pub fn format_long_german_date(date: NaiveDate) -> String {
    let month = GERMAN_MONTHS[(date.month0() as usize).min(GERMAN_MONTHS.len() - 1)];
    format!("{}. {} {}", date.day(), month, date.year())
}

/// Parse a non-negative money amount into cents.
pub fn parse_cents(value: &FieldValue) -> Option<i64> {
    match value {
        FieldValue::Integer(amount) if *amount >= 0 => amount.checked_mul(100),
        FieldValue::Float(amount) if amount.is_finite() && *amount >= 0.0 => {
            Some((amount * 100.0).round() as i64)
        }
        FieldValue::Text(raw) => parse_amount_text(raw),
        _ => None,
    }
}

fn parse_amount_text(raw: &str) -> Option<i64> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches("EUR")
        .trim_end_matches('€')
        .trim_start_matches('€')
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let last_comma = cleaned.rfind(',');
    let last_dot = cleaned.rfind('.');
    let decimal_separator = match (last_comma, last_dot) {
        (Some(comma), Some(dot)) => Some(if comma > dot { ',' } else { '.' }),
        (Some(position), None) | (None, Some(position)) => {
            let separator = cleaned.as_bytes()[position] as char;
            let digits_after = cleaned.len() - position - 1;
            let single_use = cleaned.matches(separator).count() == 1;
            if single_use && digits_after != 3 {
                Some(separator)
            } else {
                None
            }
        }
        (None, None) => None,
    };

    let (integer_part, fraction_part) = match decimal_separator {
        Some(separator) => {
            let position = cleaned.rfind(separator)?;
            (&cleaned[..position], &cleaned[position + 1..])
        }
        None => (cleaned.as_str(), ""),
    };

    let groups: Vec<&str> = integer_part.split(['.', ',']).collect();
    if groups.len() > 1 {
        let first_ok = (1..=3).contains(&groups[0].len());
        if !first_ok || groups[1..].iter().any(|group| group.len() != 3) {
            return None;
        }
    }
    let integer_digits = groups.concat();
    if integer_digits.is_empty() && fraction_part.is_empty() {
        return None;
    }
    if !integer_digits.chars().all(|ch| ch.is_ascii_digit())
        || !fraction_part.chars().all(|ch| ch.is_ascii_digit())
        || fraction_part.len() > 2
    {
        return None;
    }

    let units: i64 = if integer_digits.is_empty() {
        0
    } else {
        integer_digits.parse().ok()?
    };
    let cents: i64 = match fraction_part.len() {
        0 => 0,
        1 => fraction_part.parse::<i64>().ok()? * 10,
        _ => fraction_part.parse().ok()?,
    };

    units.checked_mul(100)?.checked_add(cents)
}

/// `123456` -> `1.234,56 €`.
pub fn format_cents(cents: i64) -> String {
    let units = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::new();
    for (index, digit) in units.chars().enumerate() {
        if index > 0 && (units.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{grouped},{fraction:02} €")
}

/// Escape text for inclusion in HTML markup.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> ContractRecord {
        ContractRecord::from_pairs(pairs)
    }

    #[test]
    fn test_format_field_placeholder() {
        let empty = ContractRecord::default();
        assert_eq!(format_field(&empty, "tenant_name", None), TEXT_PLACEHOLDER);
        assert_eq!(format_field(&empty, "tenant_name", Some("[NAME]")), "[NAME]");
        assert_eq!(
            format_field(&record(&[("tenant_name", "  Erika  ")]), "tenant_name", None),
            "Erika"
        );
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&record(&[("start_date", "2025-09-01")]), "start_date"), "01.09.2025");
        assert_eq!(format_date(&record(&[("start_date", "1.9.2025")]), "start_date"), "01.09.2025");
        assert_eq!(
            format_date(&record(&[("start_date", "2025-09-01T00:00:00Z")]), "start_date"),
            "01.09.2025"
        );
        assert_eq!(format_date(&record(&[("start_date", "2025-02-30")]), "start_date"), DATE_PLACEHOLDER);
        assert_eq!(format_date(&record(&[("start_date", "bald")]), "start_date"), DATE_PLACEHOLDER);
        assert_eq!(format_date(&ContractRecord::default(), "start_date"), DATE_PLACEHOLDER);
    }

    #[test]
    fn test_format_currency_inputs() {
        let cases = [
            ("450", "450,00 €"),
            ("450.5", "450,50 €"),
            ("450,50", "450,50 €"),
            ("1.234,56", "1.234,56 €"),
            ("1,234.56", "1.234,56 €"),
            ("1.200", "1.200,00 €"),
            ("€ 75", "75,00 €"),
            ("99 EUR", "99,00 €"),
        ];
        for (input, expected) in cases {
            assert_eq!(format_currency(&record(&[("rent_amount", input)]), "rent_amount"), expected, "{input}");
        }
    }

    #[test]
    fn test_format_currency_invalid_falls_back() {
        for input in ["viel", "-5", "1,2,3,4", "12.345.6", "4.50.1"] {
            assert_eq!(
                format_currency(&record(&[("rent_amount", input)]), "rent_amount"),
                AMOUNT_PLACEHOLDER,
                "{input}"
            );
        }
    }

    #[test]
    fn test_format_currency_numeric_values() {
        let numeric = ContractRecord::new([
            ("rent_amount", FieldValue::Integer(1500)),
            ("utilities_amount", FieldValue::Float(120.456)),
        ]);
        assert_eq!(format_currency(&numeric, "rent_amount"), "1.500,00 €");
        assert_eq!(format_currency(&numeric, "utilities_amount"), "120,46 €");
    }

    #[test]
    fn test_format_address() {
        let full = record(&[
            ("property_street", "Hauptstraße 1"),
            ("property_zip", "10115"),
            ("property_city", "Berlin"),
        ]);
        assert_eq!(format_address(&full, "property"), "Hauptstraße 1, 10115 Berlin");
        assert_eq!(format_address(&record(&[("property_city", "Berlin")]), "property"), "Berlin");
        assert_eq!(format_address(&ContractRecord::default(), "property"), TEXT_PLACEHOLDER);
    }

    #[test]
    fn test_flag_phrase() {
        let furnished = record(&[("furnished", "ja")]);
        assert_eq!(flag_phrase(&furnished, "furnished", "möbliert", "unmöbliert", "?"), "möbliert");
        assert_eq!(flag_phrase(&ContractRecord::default(), "furnished", "a", "b", "?"), "?");
    }

    #[test]
    fn test_long_german_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(format_long_german_date(date), "7. März 2025");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<b>"A&B"</b>"#), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
    }
}
