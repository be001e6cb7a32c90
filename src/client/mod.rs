//! HTTP client for the statistics endpoint.
//!
//! This module provides the [`StatsClient`] used by the extractor.

mod stats;

pub use stats::StatsClient;
