use serde::Serialize;

use crate::entities::RouteResult;
use crate::error::{invalid_state_error, Error};

/// Lifecycle of the route request for one address book. Only one
/// submission may be in flight at a time.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Submission {
    #[default]
    Idle,
    Submitting,
    Succeeded { result: RouteResult },
    Failed { error: Error },
}

impl Submission {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Submission::Submitting)
    }

    #[tracing::instrument]
    pub fn begin(&mut self) -> Result<(), Error> {
        if self.is_submitting() {
            return Err(invalid_state_error());
        }

        *self = Submission::Submitting;
        Ok(())
    }

    pub fn complete(&mut self, outcome: &Result<RouteResult, Error>) {
        *self = match outcome {
            Ok(result) => Submission::Succeeded {
                result: result.clone(),
            },
            Err(error) => Submission::Failed {
                error: error.clone(),
            },
        };
    }

    /// Abandoned submissions go straight back to `Idle`.
    pub fn abandon(&mut self) {
        if self.is_submitting() {
            *self = Submission::Idle;
        }
    }

    pub fn clear(&mut self) -> Result<(), Error> {
        if self.is_submitting() {
            return Err(invalid_state_error());
        }

        *self = Submission::Idle;
        Ok(())
    }
}
