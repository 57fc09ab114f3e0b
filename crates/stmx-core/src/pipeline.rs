//! Statement extraction pipeline.
//!
//! Stages, in order: normalize headers, resolve required columns, drop report
//! footers, filter on a strictly positive credit amount, extract identifiers
//! per row, reduce counters.

use std::time::Instant;

use rayon::prelude::*;
use regex::{RegexSet, RegexSetBuilder};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Result, StmxError};
use crate::extract::rules::{is_positive_credit, normalize_amount, normalize_date};
use crate::extract::{IdentifierExtractor, NarrativeExtractor};
use crate::models::config::StmxConfig;
use crate::models::record::{OutputRecord, RawRow, RawTable, SummaryCounters};
use crate::table::{normalize_header, ColumnResolver, ResolvedColumns};

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineOutput {
    /// One record per surviving row, in input order.
    pub records: Vec<OutputRecord>,
    /// Counters over the run.
    pub summary: SummaryCounters,
    /// Normalized headers of the input.
    pub headers: Vec<String>,
    /// Where the required columns were found.
    pub columns: ResolvedColumns,
}

/// Extraction pipeline over a materialized row batch.
pub struct ExtractionPipeline {
    resolver: ColumnResolver,
    footer: RegexSet,
    extractor: IdentifierExtractor,
    parallel: bool,
}

impl ExtractionPipeline {
    /// Build a pipeline from configuration.
    ///
    /// Fails with [`StmxError::Config`] when a footer pattern does not compile.
    pub fn new(config: &StmxConfig) -> Result<Self> {
        let footer = RegexSetBuilder::new(&config.filter.footer_patterns)
            .case_insensitive(true)
            .build()
            .map_err(|e| StmxError::Config(format!("invalid footer pattern: {}", e)))?;

        Ok(Self {
            resolver: ColumnResolver::new(config.columns.clone()),
            footer,
            extractor: IdentifierExtractor::from_config(&config.extraction),
            parallel: config.parallel,
        })
    }

    /// Run the pipeline. The input table is never modified.
    pub fn run(&self, table: &RawTable) -> Result<PipelineOutput> {
        let start = Instant::now();

        let headers: Vec<String> = table.headers.iter().map(|h| normalize_header(h)).collect();
        let columns = self.resolver.resolve(&headers)?;

        let data_rows: Vec<&RawRow> = table
            .rows
            .iter()
            .filter(|row| !self.is_footer(row))
            .collect();
        let footer_rows = table.len() - data_rows.len();
        if footer_rows > 0 {
            debug!("Dropped {} footer rows", footer_rows);
        }

        let credited: Vec<(&RawRow, Decimal)> = data_rows
            .into_iter()
            .filter_map(|row| {
                let amount = row.get(columns.credit_amount).and_then(normalize_amount);
                if !is_positive_credit(amount) {
                    return None;
                }
                amount.map(|a| (row, a))
            })
            .collect();
        debug!("{} rows with positive credit amount", credited.len());

        let records: Vec<OutputRecord> = if self.parallel {
            credited
                .par_iter()
                .map(|(row, amount)| self.build_record(row, *amount, columns))
                .collect()
        } else {
            credited
                .iter()
                .map(|(row, amount)| self.build_record(row, *amount, columns))
                .collect()
        };

        let undated = records.iter().filter(|r| r.date.is_none()).count();
        if undated > 0 {
            warn!("{} rows kept with an unparseable date", undated);
        }

        let summary = SummaryCounters::from_records(table.len(), footer_rows, &records);
        info!(
            "Processed {} rows: {} credited, {} without identifiers in {:?}",
            summary.total_rows,
            summary.credit_positive,
            summary.no_identifiers,
            start.elapsed()
        );

        Ok(PipelineOutput {
            records,
            summary,
            headers,
            columns,
        })
    }

    fn is_footer(&self, row: &RawRow) -> bool {
        self.footer.is_match(&row.joined_text())
    }

    fn build_record(&self, row: &RawRow, amount: Decimal, columns: ResolvedColumns) -> OutputRecord {
        let narrative = row.get(columns.narrative).unwrap_or_default();
        let date = row.get(columns.date).and_then(normalize_date);
        let ids = self.extractor.extract(narrative);
        OutputRecord::new(date, narrative.to_string(), amount, ids)
    }
}
