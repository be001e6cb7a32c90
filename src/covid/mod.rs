//! Country statistics domain
//!
//! Raw records come from the statistics API as untyped JSON objects and are
//! normalized into fixed-shape [`StatRow`]s before loading.

mod extractor;
mod record;
mod transformer;

pub use extractor::ApiExtractor;
pub use record::{RawRecord, StatRow, StatTable};
pub use transformer::StatRowTransformer;

/// Endpoint used when no URL is configured
pub const DEFAULT_API_URL: &str = "https://disease.sh/v3/covid-19/countries";
