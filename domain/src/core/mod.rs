//! Core domain concepts shared across all subdomains.
//!
//! - [`error::AnalysisError`] — the single error taxonomy for the analysis flow

pub mod error;
