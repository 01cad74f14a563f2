use super::{directions::compute_route, Engine};

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{
    api::RouteAPI,
    entities::{AddressEntry, RouteResult, Submission},
    error::Error,
};

fn lock(submission: &Mutex<Submission>) -> MutexGuard<'_, Submission> {
    submission.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks a submission in flight; dropping it before `finish` puts the
/// lifecycle back to `Idle`.
struct SubmissionGuard<'a> {
    submission: &'a Mutex<Submission>,
    finished: bool,
}

impl<'a> SubmissionGuard<'a> {
    fn begin(submission: &'a Mutex<Submission>) -> Result<Self, Error> {
        lock(submission).begin()?;

        Ok(Self {
            submission,
            finished: false,
        })
    }

    fn finish(mut self, outcome: &Result<RouteResult, Error>) {
        lock(self.submission).complete(outcome);
        self.finished = true;
    }
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!("route submission abandoned");
            lock(self.submission).abandon();
        }
    }
}

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip_all)]
    async fn compute_route(&self, entries: Vec<AddressEntry>) -> Result<RouteResult, Error> {
        let outcome = compute_route(self.directions.as_ref(), &entries).await;

        if let Err(err) = &outcome {
            tracing::error!(code = err.code, "route computation failed: {}", err);
        }

        outcome
    }

    #[tracing::instrument(skip(self))]
    async fn submit_route(&self) -> Result<RouteResult, Error> {
        let entries = self.book.lock().await.entries().to_vec();

        let guard = SubmissionGuard::begin(&self.submission)?;
        let outcome = compute_route(self.directions.as_ref(), &entries).await;
        guard.finish(&outcome);

        if let Err(err) = &outcome {
            tracing::error!(code = err.code, "route submission failed: {}", err);
        }

        outcome
    }

    async fn find_submission(&self) -> Submission {
        lock(&self.submission).clone()
    }

    #[tracing::instrument(skip(self))]
    async fn clear_submission(&self) -> Result<Submission, Error> {
        let mut submission = lock(&self.submission);
        submission.clear()?;

        Ok(submission.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::engine::directions::tests::{round_trip_response, FakeProvider};
    use crate::entities::Role;
    use crate::error::invalid_state_error;
    use crate::external::google_maps::{DirectionsProvider, DirectionsResponse};
    use crate::entities::RouteRequest;
    use crate::store::MemoryStore;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Provider that holds every request until released.
    struct GatedProvider {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl DirectionsProvider for GatedProvider {
        async fn directions(&self, _: &RouteRequest) -> Result<DirectionsResponse, Error> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(round_trip_response())
        }
    }

    fn engine(provider: crate::external::google_maps::DynDirectionsProvider) -> Engine {
        Engine::with_parts(Config::default(), Box::new(MemoryStore::new()), provider).unwrap()
    }

    async fn three_stop_book(engine: &Engine) {
        let mut book = engine.book.lock().await;
        let ids: Vec<String> = book.entries().iter().map(|e| e.id.clone()).collect();
        for id in &ids[3..] {
            book.delete(id).unwrap();
        }
        book.set_role("1", Role::Home).unwrap();
    }

    #[tokio::test]
    async fn submit_route_records_success() {
        let engine = engine(Arc::new(FakeProvider::new(Ok(round_trip_response()))));
        three_stop_book(&engine).await;

        let result = engine.submit_route().await.unwrap();

        assert_eq!(
            engine.find_submission().await,
            Submission::Succeeded { result }
        );
    }

    #[tokio::test]
    async fn submit_route_records_validation_failure() {
        let engine = engine(Arc::new(FakeProvider::new(Ok(round_trip_response()))));

        let err = engine.submit_route().await.unwrap_err();

        assert_eq!(engine.find_submission().await, Submission::Failed { error: err });
        assert_eq!(engine.clear_submission().await.unwrap(), Submission::Idle);
    }

    #[tokio::test]
    async fn double_submit_is_rejected_while_in_flight() {
        let provider = Arc::new(GatedProvider {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let engine = Arc::new(engine(provider.clone()));
        three_stop_book(&engine).await;

        let first = tokio::spawn({
            let engine = engine.clone();
            async move { engine.submit_route().await }
        });
        provider.entered.notified().await;

        assert_eq!(engine.submit_route().await, Err(invalid_state_error()));
        assert_eq!(engine.clear_submission().await, Err(invalid_state_error()));
        assert_eq!(engine.find_submission().await, Submission::Submitting);

        provider.release.notify_one();
        let result = first.await.unwrap().unwrap();
        assert_eq!(result.legs.len(), 3);
        assert!(matches!(
            engine.find_submission().await,
            Submission::Succeeded { .. }
        ));
    }

    #[tokio::test]
    async fn abandoned_submission_returns_to_idle() {
        let provider = Arc::new(GatedProvider {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let engine = engine(provider);
        three_stop_book(&engine).await;

        let outcome = tokio::time::timeout(Duration::from_millis(20), engine.submit_route()).await;

        assert!(outcome.is_err());
        assert_eq!(engine.find_submission().await, Submission::Idle);
    }

    #[tokio::test]
    async fn stateless_route_leaves_lifecycle_alone() {
        let engine = engine(Arc::new(FakeProvider::new(Ok(round_trip_response()))));

        let entries = crate::engine::directions::tests::home_entries();
        engine.compute_route(entries).await.unwrap();

        assert_eq!(engine.find_submission().await, Submission::Idle);
    }
}
