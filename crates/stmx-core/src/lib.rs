//! Core library for bank statement narrative extraction.
//!
//! This crate provides:
//! - Identifier extraction from Ukrainian/Russian payment narratives
//!   (VD, VP, IPN/RNOKPP, case identifier, debtor name)
//! - IPN control-digit validation
//! - Amount and date normalization
//! - Column resolution and the row-filtering extraction pipeline

pub mod auth;
pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod table;

pub use auth::{CredentialStore, StaticCredentials};
pub use error::{IngestError, MissingColumnsError, Result, StmxError};
pub use extract::{IdentifierExtractor, NarrativeExtractor};
pub use models::config::StmxConfig;
pub use models::record::{ExtractionResult, OutputRecord, RawRow, RawTable, SummaryCounters};
pub use pipeline::{ExtractionPipeline, PipelineOutput};
pub use table::{ColumnResolver, ResolvedColumns};
