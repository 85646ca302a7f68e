//! Project submission and valuation generation.
//!
//! `submit` and `generate` are separate steps: a project has to be created
//! before the valuation engine can export it. A failed step is not rolled
//! back and is never retried automatically.

use serde::Serialize;
use thiserror::Error;

use crate::api::{ApiError, ValuationApi, ValuationArtifact};
use crate::storage::{LocalStore, StorageError, LAST_PROJECT_KEY};
use crate::{ProjectRecord, ValidationError, WizardState};

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("could not save project locally: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A project the backend accepted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedProject {
    pub project_id: String,
    pub record: ProjectRecord,
}

pub struct SubmissionAdapter<'s, S: LocalStore> {
    api: ValuationApi,
    store: &'s S,
}

impl<'s, S: LocalStore> SubmissionAdapter<'s, S> {
    pub fn new(api: ValuationApi, store: &'s S) -> Self {
        Self { api, store }
    }

    /// Validate, snapshot locally, then create the project remotely.
    ///
    /// An invalid wizard fails before anything is written or sent. The
    /// local snapshot is kept even when the create call fails.
    pub async fn submit(&self, state: &WizardState) -> Result<SubmittedProject, SubmissionError> {
        let record = ProjectRecord::from_wizard(state)?;
        self.store.save(LAST_PROJECT_KEY, &record)?;

        let created = self.api.create_project(&record).await?;
        tracing::info!(
            project_id = %created.project_id,
            ticker = record.ticker(),
            "project created"
        );

        Ok(SubmittedProject {
            project_id: created.project_id,
            record,
        })
    }

    /// Ask the valuation engine for the spreadsheet of a created project.
    pub async fn generate(&self, project_id: &str) -> Result<ValuationArtifact, SubmissionError> {
        let artifact = self.api.export_valuation(project_id).await?;
        tracing::info!(
            project_id,
            filename = %artifact.filename,
            size = artifact.size,
            "valuation exported"
        );
        Ok(artifact)
    }

    /// Most recent locally saved snapshot.
    pub fn last_project(&self) -> Result<Option<ProjectRecord>, SubmissionError> {
        Ok(self.store.load(LAST_PROJECT_KEY)?)
    }
}
