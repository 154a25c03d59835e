use chrono::{DateTime, Duration, Utc};
use convert_case::{Case, Casing};

/// Formats a date as a Liquibase changelog identifier (`YYYYMMDDHHmmss`, UTC),
/// shifted by `increment` seconds so that entities declared one after the
/// other get strictly increasing identifiers.
#[must_use]
pub fn format_date_for_liquibase(date: DateTime<Utc>, increment: i64) -> String {
    (date + Duration::seconds(increment))
        .format("%Y%m%d%H%M%S")
        .to_string()
}

/// Turns a JDL comment into javadoc text.
///
/// A single line not starting with `*` is kept as is. Otherwise every line is
/// trimmed and stripped of its leading stars, and the lines are joined with a
/// literal `\n` so that the javadoc survives the JSON round trip.
#[must_use]
pub fn format_comment(comment: Option<&str>) -> Option<String> {
    let comment = comment?.trim();
    if comment.is_empty() {
        return None;
    }
    let lines: Vec<&str> = comment.split('\n').collect();
    if lines.len() == 1 && !lines[0].starts_with('*') {
        return Some(lines[0].to_string());
    }
    let formatted = lines
        .iter()
        .map(|line| line.trim().trim_start_matches('*').trim_start())
        .fold(String::new(), |mut acc, line| {
            if !acc.is_empty() {
                acc.push_str("\\n");
            }
            acc.push_str(line);
            acc
        });
    Some(formatted)
}

/// `InvoiceItem` -> `invoice_item`.
#[must_use]
pub fn table_name_from_entity_name(entity_name: &str) -> String {
    entity_name.to_case(Case::Snake)
}

/// `InvoiceItem` -> `invoiceItem`.
#[must_use]
pub fn camel_case(value: &str) -> String {
    value.to_case(Case::Camel)
}

#[must_use]
pub fn lower_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Splits an injected field such as `customer(name)` into the relationship
/// name and the displayed field of the other entity.
#[must_use]
pub fn extract_field(injected_field: Option<&str>) -> (Option<&str>, Option<&str>) {
    let Some(injected_field) = injected_field.map(str::trim).filter(|f| !f.is_empty()) else {
        return (None, None);
    };
    match injected_field.split_once('(') {
        Some((name, rest)) => {
            let display = rest.trim_end_matches(')').trim();
            (
                Some(name.trim()),
                (!display.is_empty()).then_some(display),
            )
        }
        None => (Some(injected_field), None),
    }
}
