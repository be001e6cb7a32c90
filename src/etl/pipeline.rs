//! Pipeline orchestration for ETL operations

use super::{Exporter, Extractor, Loader, Transformer};
use crate::error::EtlError;

/// How far a run got
///
/// Each state is reachable only from the one before it. A state is entered
/// once its stage has been invoked, whether or not the stage succeeded;
/// failures are kept separately in [`PipelineReport::failures`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum State {
    #[default]
    Started,
    Extracted,
    Transformed,
    Loaded,
    Exported,
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Started => write!(f, "started"),
            Self::Extracted => write!(f, "extracted"),
            Self::Transformed => write!(f, "transformed"),
            Self::Loaded => write!(f, "loaded"),
            Self::Exported => write!(f, "exported"),
        }
    }
}

/// Per-stage outcome of one pipeline run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Last state entered
    pub state: State,
    /// Records returned by the extractor
    pub extracted: usize,
    /// Rows produced by the transformer
    pub transformed: usize,
    /// Rows committed by the loader, if it succeeded
    pub loaded: Option<usize>,
    /// Rows written by the exporter, if it succeeded
    pub exported: Option<usize>,
    /// Failures in the order they happened
    pub failures: Vec<EtlError>,
}

impl PipelineReport {
    /// Every stage ran and none failed
    pub fn is_complete(&self) -> bool {
        self.state == State::Exported && self.failures.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    fn fail(&mut self, state: State, report: &eyre::Report) {
        self.failures.push(EtlError::from_stage(state, report));
    }
}

/// ETL pipeline that drives Extract, Transform, Load and Export in order
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `T`: Transformer type (must transform from E::Item)
/// - `L`: Loader type (must load T::Output)
/// - `X`: Exporter type
///
/// Stages never abort the process. Each failure is logged and recorded in
/// the returned [`PipelineReport`]:
/// - extraction failure stops the run
/// - a failed or empty transformation stops the run
/// - once a non-empty table exists, load and export both always run
///
/// [`Exporter::finish`] is called on every exit path.
///
/// # Example
/// ```no_run
/// use covid_etl::etl::Pipeline;
/// # use covid_etl::etl::{Exporter, Extractor, Loader, Transformer};
/// # use eyre::Result;
/// # struct MyExtractor;
/// # impl Extractor for MyExtractor {
/// #     type Item = i32;
/// #     async fn extract(&self) -> Result<Vec<Self::Item>> { Ok(vec![]) }
/// # }
/// # struct MyTransformer;
/// # impl Transformer for MyTransformer {
/// #     type Input = i32;
/// #     type Output = i32;
/// #     fn transform(&self, input: Self::Input) -> Result<Self::Output> { Ok(input) }
/// # }
/// # struct MyLoader;
/// # impl Loader for MyLoader {
/// #     type Item = i32;
/// #     async fn load(&self, items: Vec<Self::Item>) -> Result<usize> { Ok(items.len()) }
/// # }
/// # struct MyExporter;
/// # impl Exporter for MyExporter {
/// #     async fn export(&self) -> Result<usize> { Ok(0) }
/// # }
///
/// # async fn example() {
/// let pipeline = Pipeline::new(MyExtractor, MyTransformer, MyLoader, MyExporter);
///
/// let report = pipeline.run().await;
/// println!("Reached {} with {} failures", report.state, report.failures.len());
/// # }
/// ```
pub struct Pipeline<E, T, L, X> {
    extractor: E,
    transformer: T,
    loader: L,
    exporter: X,
}

impl<E, T, L, X> Pipeline<E, T, L, X>
where
    E: Extractor,
    T: Transformer<Input = E::Item>,
    L: Loader<Item = T::Output>,
    X: Exporter,
{
    /// Create a new pipeline
    pub fn new(extractor: E, transformer: T, loader: L, exporter: X) -> Self {
        Self {
            extractor,
            transformer,
            loader,
            exporter,
        }
    }

    /// Run the complete pipeline
    ///
    /// Steps:
    /// 1. Extract records from source
    /// 2. Transform the whole batch
    /// 3. Load rows to destination
    /// 4. Export the destination
    pub async fn run(&self) -> PipelineReport {
        let mut report = PipelineReport::default();
        log::info!("Starting ETL pipeline");

        // Extract
        log::debug!("Extracting from source...");
        let items = match self.extractor.extract().await {
            Ok(items) => items,
            Err(e) => {
                log::error!("Extraction failed: {:#}", e);
                report.fail(State::Extracted, &e);
                log::error!("No data to process");
                return self.finish(report).await;
            }
        };
        report.state = State::Extracted;
        report.extracted = items.len();
        log::info!("Extracted {} records", items.len());

        // Transform
        log::debug!("Transforming records...");
        let table = match self.transformer.transform_many(items) {
            Ok(table) => table,
            Err(e) => {
                log::error!("Error transforming data: {:#}", e);
                report.fail(State::Transformed, &e);
                Vec::new()
            }
        };
        report.state = State::Transformed;
        report.transformed = table.len();
        if table.is_empty() {
            log::warn!("No data after transformation");
            return self.finish(report).await;
        }
        log::info!("Transformed {} records", table.len());

        // Load
        log::debug!("Loading to destination...");
        match self.loader.load(table).await {
            Ok(count) => {
                log::info!("Loaded {} rows", count);
                report.loaded = Some(count);
            }
            Err(e) => {
                log::error!("Error loading data: {:#}", e);
                report.fail(State::Loaded, &e);
            }
        }
        report.state = State::Loaded;

        // Export
        log::debug!("Exporting destination...");
        match self.exporter.export().await {
            Ok(count) => {
                log::info!("Exported {} rows", count);
                report.exported = Some(count);
            }
            Err(e) => {
                log::error!("Failed to export summary: {:#}", e);
                report.fail(State::Exported, &e);
            }
        }
        report.state = State::Exported;

        let report = self.finish(report).await;
        log::info!("ETL and export completed");
        report
    }

    async fn finish(&self, report: PipelineReport) -> PipelineReport {
        if let Err(e) = self.exporter.finish().await {
            log::warn!("Failed to release pipeline resources: {:#}", e);
        }
        report
    }
}
