//! Rendering of pipeline output for humans and spreadsheets.

use csv::WriterBuilder;

use stmx_core::extract::rules::{format_amount, format_date};
use stmx_core::models::config::ExportConfig;
use stmx_core::models::record::{OutputRecord, SummaryCounters};

/// Column headers of the exported sheet, in output order.
pub const EXPORT_HEADERS: [&str; 8] = [
    "Дата",
    "ВД",
    "ВП",
    "ІПН",
    "Ідентифікатор",
    "ПІБ",
    "Призначення платежу",
    "Зараховано",
];

/// Write records as delimited text.
pub fn records_to_csv(records: &[OutputRecord], config: &ExportConfig) -> anyhow::Result<String> {
    if !config.delimiter.is_ascii() {
        anyhow::bail!("Delimiter must be a single ASCII character, got {:?}", config.delimiter);
    }

    let mut wtr = WriterBuilder::new()
        .delimiter(config.delimiter as u8)
        .from_writer(vec![]);

    wtr.write_record(EXPORT_HEADERS)?;

    for record in records {
        wtr.write_record([
            record.date.map(format_date).unwrap_or_default(),
            record.vd.clone().unwrap_or_default(),
            record.vp.clone().unwrap_or_default(),
            record.ipn.clone().unwrap_or_default(),
            record.case_id.clone().unwrap_or_default(),
            record.name.clone().unwrap_or_default(),
            record.narrative.clone(),
            format_amount(record.credit_amount, config.decimal_comma),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// Plain text rendering of the run counters.
pub fn summary_text(summary: &SummaryCounters) -> String {
    let mut output = String::new();

    output.push_str(&format!("Rows read:        {}\n", summary.total_rows));
    output.push_str(&format!("Footer rows:      {}\n", summary.footer_rows));
    output.push_str(&format!("Credited rows:    {}\n", summary.credit_positive));
    output.push('\n');

    output.push_str("Identifiers (found / missing):\n");
    for (label, count) in [
        ("VD", &summary.vd),
        ("VP", &summary.vp),
        ("IPN", &summary.ipn),
        ("Case ID", &summary.case_id),
        ("Name", &summary.name),
    ] {
        output.push_str(&format!("  {:<8} {} / {}\n", label, count.found, count.missing));
    }
    output.push_str(&format!("\nRows without identifiers: {}\n", summary.no_identifiers));

    output
}
