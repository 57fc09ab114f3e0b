//! Statement rows, extraction results and pipeline output.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A batch of raw rows as handed over by the ingestion collaborator.
///
/// Every row is positional against `headers`: `rows[i].values[j]` is the cell
/// of column `headers[j]`. Short rows are treated as having absent trailing
/// cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Header names exactly as they appeared in the input.
    pub headers: Vec<String>,
    /// Data rows.
    pub rows: Vec<RawRow>,
}

/// One raw row of text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    /// Cell values, `None` where the cell was absent or empty.
    pub values: Vec<Option<String>>,
}

impl RawRow {
    pub fn new(values: Vec<Option<String>>) -> Self {
        Self { values }
    }

    /// Cell at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|v| v.as_deref())
    }

    /// All present cells joined by a single space.
    pub fn joined_text(&self) -> String {
        self.values
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { headers, rows }
    }

    /// Build a table from name/value records, collecting headers in order of
    /// first appearance.
    pub fn from_records<'a, R>(records: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let records: Vec<Vec<(&str, &str)>> =
            records.into_iter().map(|r| r.into_iter().collect()).collect();

        let mut headers: Vec<String> = Vec::new();
        for record in &records {
            for (name, _) in record {
                if !headers.iter().any(|h| h.as_str() == *name) {
                    headers.push((*name).to_string());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                let values = headers
                    .iter()
                    .map(|h| {
                        record
                            .iter()
                            .find(|(name, _)| *name == h.as_str())
                            .map(|(_, value)| (*value).to_string())
                    })
                    .collect();
                RawRow::new(values)
            })
            .collect();

        Self { headers, rows }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Identifiers pulled out of a single narrative string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Court order / writ number.
    pub vd: Option<String>,
    /// Enforcement proceeding number.
    pub vp: Option<String>,
    /// Taxpayer identification number (RNOKPP), checksum-valid.
    pub ipn: Option<String>,
    /// Six-digit identification reference.
    pub case_id: Option<String>,
    /// Debtor full name.
    pub name: Option<String>,
}

/// One output row. Field order is the export column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Operation date, `None` when the source date did not parse.
    pub date: Option<NaiveDate>,
    pub vd: Option<String>,
    pub vp: Option<String>,
    pub ipn: Option<String>,
    pub case_id: Option<String>,
    pub name: Option<String>,
    /// Narrative text as it appeared in the input.
    pub narrative: String,
    /// Credit amount, always strictly positive.
    pub credit_amount: Decimal,
}

impl OutputRecord {
    pub fn new(
        date: Option<NaiveDate>,
        narrative: String,
        credit_amount: Decimal,
        ids: ExtractionResult,
    ) -> Self {
        Self {
            date,
            vd: ids.vd,
            vp: ids.vp,
            ipn: ids.ipn,
            case_id: ids.case_id,
            name: ids.name,
            narrative,
            credit_amount,
        }
    }
}

/// Found / not-found tally for one identifier class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundCount {
    pub found: usize,
    pub missing: usize,
}

impl FoundCount {
    fn record(&mut self, value: &Option<String>) {
        if value.is_some() {
            self.found += 1;
        } else {
            self.missing += 1;
        }
    }
}

/// Counters for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCounters {
    /// Rows handed to the pipeline.
    pub total_rows: usize,
    /// Rows dropped as report footers.
    pub footer_rows: usize,
    /// Rows with a strictly positive credit amount.
    pub credit_positive: usize,
    pub vd: FoundCount,
    pub vp: FoundCount,
    pub ipn: FoundCount,
    pub case_id: FoundCount,
    pub name: FoundCount,
    /// Rows with none of VD, VP, IPN or CaseID.
    pub no_identifiers: usize,
}

impl SummaryCounters {
    /// Reduce the surviving records into counters.
    pub fn from_records(total_rows: usize, footer_rows: usize, records: &[OutputRecord]) -> Self {
        records.iter().fold(
            Self {
                total_rows,
                footer_rows,
                credit_positive: records.len(),
                ..Self::default()
            },
            |mut acc, r| {
                acc.vd.record(&r.vd);
                acc.vp.record(&r.vp);
                acc.ipn.record(&r.ipn);
                acc.case_id.record(&r.case_id);
                acc.name.record(&r.name);
                if r.vd.is_none() && r.vp.is_none() && r.ipn.is_none() && r.case_id.is_none() {
                    acc.no_identifiers += 1;
                }
                acc
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_records_unions_headers() {
        let table = RawTable::from_records(vec![
            vec![("Дата", "01.02.2023"), ("Зараховано", "10")],
            vec![("Зараховано", "20"), ("Призначення платежу", "x")],
        ]);

        assert_eq!(table.headers, vec!["Дата", "Зараховано", "Призначення платежу"]);
        assert_eq!(table.rows[0].get(2), None);
        assert_eq!(table.rows[1].get(0), None);
        assert_eq!(table.rows[1].get(1), Some("20"));
    }

    #[test]
    fn test_joined_text_skips_absent_cells() {
        let row = RawRow::new(vec![Some("Разом".into()), None, Some("обороти".into())]);
        assert_eq!(row.joined_text(), "Разом обороти");
    }

    #[test]
    fn test_counters_reduce() {
        let with_vp = OutputRecord::new(
            None,
            "a".into(),
            Decimal::ONE,
            ExtractionResult {
                vp: Some("123456".into()),
                ..Default::default()
            },
        );
        let empty = OutputRecord::new(None, "b".into(), Decimal::ONE, ExtractionResult::default());

        let counters = SummaryCounters::from_records(5, 1, &[with_vp, empty]);
        assert_eq!(counters.total_rows, 5);
        assert_eq!(counters.footer_rows, 1);
        assert_eq!(counters.credit_positive, 2);
        assert_eq!(counters.vp, FoundCount { found: 1, missing: 1 });
        assert_eq!(counters.vd, FoundCount { found: 0, missing: 2 });
        assert_eq!(counters.no_identifiers, 1);
    }
}
