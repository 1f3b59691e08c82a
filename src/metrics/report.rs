//! Rendering of a `MetricSet` as a text table, CSV or JSON

use super::{MetricKind, MetricSet};
use std::io::Write;

/// Presentation settings for currency amounts
#[derive(Debug, Clone, PartialEq)]
pub struct ReportStyle {
    /// Unit appended to every amount
    pub currency_unit: String,
    /// Decimal places kept on amounts
    pub amount_decimals: usize,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            currency_unit: "KRW".to_string(),
            amount_decimals: 0,
        }
    }
}

/// Amount with thousands separators and the currency unit: `1,224,428 KRW`
pub fn format_amount(value: f64, style: &ReportStyle) -> String {
    format!("{} {}", group_thousands(value, style.amount_decimals), style.currency_unit)
}

/// Percentage with four decimals: `6.0412%`
pub fn format_percentage(value: f64) -> String {
    format!("{:.4}%", value)
}

pub fn format_value(value: f64, kind: MetricKind, style: &ReportStyle) -> String {
    match kind {
        MetricKind::Amount => format_amount(value, style),
        MetricKind::Percentage => format_percentage(value),
    }
}

/// Human-readable report with right-aligned values
pub fn render_table(set: &MetricSet, style: &ReportStyle) -> String {
    let rows: Vec<(&str, String)> = set
        .iter()
        .map(|m| (m.name(), format_value(m.value(), m.kind(), style)))
        .collect();
    let name_width = rows.iter().map(|(n, _)| n.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("--- {} ---\n", set.product()));
    for (name, value) in &rows {
        out.push_str(&format!("{:<nw$}  {:>vw$}\n", name, value, nw = name_width, vw = value_width));
    }
    for diagnostic in set.diagnostics() {
        out.push_str(&format!("warning: {}\n", diagnostic));
    }
    out
}

/// CSV with columns `name,kind,value`; values are unformatted
pub fn write_csv<W: Write>(set: &MetricSet, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["name", "kind", "value"])?;
    for metric in set {
        let kind = match metric.kind() {
            MetricKind::Amount => "amount",
            MetricKind::Percentage => "percentage",
        };
        let value = metric.value().to_string();
        wtr.write_record([metric.name(), kind, value.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_json(set: &MetricSet) -> serde_json::Result<String> {
    serde_json::to_string_pretty(set)
}

fn group_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    // "-0" is not worth printing
    let rounds_to_zero = !formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    if value < 0.0 && !rounds_to_zero {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}
