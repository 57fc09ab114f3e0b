//! Data models for statement rows, extraction output and configuration.

pub mod config;
pub mod record;
