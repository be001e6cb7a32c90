//! Stage error taxonomy
//!
//! Stages propagate [`eyre::Report`]s; the pipeline classifies each failure
//! by the stage that produced it so the run report can say what went wrong
//! and where.

use crate::etl::State;

/// A failure recorded against one pipeline stage
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EtlError {
    /// Request or HTTP failure while extracting
    #[error("network error: {0}")]
    Network(String),
    /// Malformed or missing record fields
    #[error("transform error: {0}")]
    Transform(String),
    /// Connection, DDL or DML failure while loading
    #[error("database error: {0}")]
    Database(String),
    /// Query or file I/O failure while writing the CSV export
    #[error("export error: {0}")]
    Export(String),
}

impl EtlError {
    /// Classify a report by the stage that raised it
    ///
    /// The full cause chain is kept in the message.
    pub fn from_stage(state: State, report: &eyre::Report) -> Self {
        let message = format!("{:#}", report);
        match state {
            State::Started | State::Extracted => Self::Network(message),
            State::Transformed => Self::Transform(message),
            State::Loaded => Self::Database(message),
            State::Exported => Self::Export(message),
        }
    }

    /// The stage this failure belongs to
    pub fn state(&self) -> State {
        match self {
            Self::Network(_) => State::Extracted,
            Self::Transform(_) => State::Transformed,
            Self::Database(_) => State::Loaded,
            Self::Export(_) => State::Exported,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::{WrapErr, eyre};

    #[test]
    fn test_classifies_by_stage() {
        let report = eyre!("connection refused");
        assert!(matches!(
            EtlError::from_stage(State::Extracted, &report),
            EtlError::Network(_)
        ));
        assert!(matches!(
            EtlError::from_stage(State::Loaded, &report),
            EtlError::Database(_)
        ));
        assert_eq!(
            EtlError::from_stage(State::Exported, &report).state(),
            State::Exported
        );
    }

    #[test]
    fn test_keeps_cause_chain() {
        let report = Err::<(), _>(eyre!("relation does not exist"))
            .wrap_err("Failed to query covid_stats")
            .unwrap_err();
        let error = EtlError::from_stage(State::Exported, &report);
        let text = error.to_string();
        assert!(text.starts_with("export error: Failed to query covid_stats"));
        assert!(text.contains("relation does not exist"));
    }
}
