use crate::artifacts::{ArtifactStore, BatchScope};
use crate::pipeline::ValidationPipeline;
use crate::schema::{ErrorResult, ValidationOutcome, ValidationRequest};
use log::{info, warn};

/// Runs the pipeline over a batch of requests. A failing document becomes an
/// [`ErrorResult`] and never stops the rest of the batch.
pub struct BatchValidator {
    pipeline: ValidationPipeline,
}

impl BatchValidator {
    pub fn new(pipeline: ValidationPipeline) -> Self {
        Self { pipeline }
    }

    /// Validates every request in order. The store is cleared once all requests are
    /// processed, including the uploaded documents themselves.
    pub fn validate_batch(
        &self,
        store: &mut dyn ArtifactStore,
        requests: &[ValidationRequest],
    ) -> Vec<ValidationOutcome> {
        let mut scope = BatchScope::new(store);
        let mut results = Vec::new();

        info!("Validating batch of {} documents", requests.len());
        for request in requests {
            let id = &request.document_identifier;
            match self
                .pipeline
                .validate_one(scope.store(), id, request.submitted_net_income)
            {
                Ok(records) => results.extend(records.into_iter().map(ValidationOutcome::from)),
                Err(e) => {
                    warn!("Failed to validate {}: {}", id, e);
                    results.push(ValidationOutcome::from(ErrorResult {
                        document_identifier: id.clone(),
                        error_message: e.to_string(),
                    }));
                }
            }
        }

        results
    }
}
