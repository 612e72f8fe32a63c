//! `mboxreport` — offline statistics and reports for MBOX email archives.
//!
//! This crate provides the core library for streaming an mbox archive,
//! extracting per-message facts, reducing them into an aggregate
//! statistical report, and rendering the result as JSON, Markdown, CSV,
//! or a text summary.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod stats;
