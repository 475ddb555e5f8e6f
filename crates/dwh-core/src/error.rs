//! Errors raised while loading a table.
//!
//! These never escape a layer load: the orchestrator turns the first one
//! into a [`LoadFailure`] on the layer report.

use dwh_ingest::IngestError;
use dwh_model::{LoadFailure, LoadStage, TableRef};
use dwh_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DwhError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DwhError {
    /// Stable numeric code: 1xxx for ingest, 2xxx for store errors.
    pub fn code(&self) -> u32 {
        match self {
            Self::Ingest(err) => err.code(),
            Self::Store(err) => err.code(),
        }
    }
}

/// A [`DwhError`] tagged with the load stage it interrupted.
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct StageError {
    pub stage: LoadStage,
    #[source]
    pub source: DwhError,
}

impl StageError {
    pub fn into_failure(self, table: TableRef) -> LoadFailure {
        LoadFailure {
            table: Some(table),
            message: self.source.to_string(),
            code: self.source.code(),
            state: self.stage,
        }
    }
}

/// Tag a fallible step with its [`LoadStage`].
pub trait AtStage<T> {
    fn at(self, stage: LoadStage) -> std::result::Result<T, StageError>;
}

impl<T, E: Into<DwhError>> AtStage<T> for std::result::Result<T, E> {
    fn at(self, stage: LoadStage) -> std::result::Result<T, StageError> {
        self.map_err(|err| StageError {
            stage,
            source: err.into(),
        })
    }
}

pub type Result<T> = std::result::Result<T, StageError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use dwh_model::TableId;

    #[test]
    fn failure_carries_code_and_stage() {
        let result: std::result::Result<(), IngestError> = Err(IngestError::FileNotFound {
            path: PathBuf::from("source_crm/prd_info.csv"),
        });
        let failure = result
            .at(LoadStage::Read)
            .unwrap_err()
            .into_failure(TableRef::bronze(TableId::CrmPrdInfo));
        assert_eq!(failure.code, 1001);
        assert_eq!(failure.state, LoadStage::Read);
        assert_eq!(failure.message, "CSV file not found: source_crm/prd_info.csv");
    }

    #[test]
    fn store_codes_pass_through() {
        let err: DwhError = StoreError::TableMissing {
            table: TableRef::bronze(TableId::ErpLocA101),
        }
        .into();
        assert_eq!(err.code(), 2005);
        assert_eq!(err.to_string(), "table bronze.erp_loc_a101 has not been loaded");
    }
}
