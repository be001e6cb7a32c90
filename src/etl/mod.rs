//! Core ETL (Extract, Transform, Load, Export) abstractions
//!
//! This module provides the trait definitions for each stage and the
//! [`Pipeline`] that drives them in order.

mod export;
mod extract;
mod load;
mod pipeline;
mod transform;

pub use export::Exporter;
pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::{Pipeline, PipelineReport, State};
pub use transform::Transformer;
