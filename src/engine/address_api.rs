use super::Engine;

use async_trait::async_trait;

use crate::{
    api::AddressAPI,
    entities::{normalize_text, AddressEntry, Role},
    error::{invalid_input_error, Error},
};

#[async_trait]
impl AddressAPI for Engine {
    async fn list_addresses(&self) -> Vec<AddressEntry> {
        self.book.lock().await.entries().to_vec()
    }

    #[tracing::instrument(skip(self))]
    async fn add_address(&self, text: String) -> Result<AddressEntry, Error> {
        let entry = self
            .book
            .lock()
            .await
            .add(&text)?
            .ok_or_else(invalid_input_error)?;

        tracing::info!(id = %entry.id, "address added");

        Ok(entry)
    }

    #[tracing::instrument(skip(self))]
    async fn edit_address(&self, id: String, text: String) -> Result<Vec<AddressEntry>, Error> {
        if normalize_text(&text).is_none() {
            return Err(invalid_input_error());
        }

        let mut book = self.book.lock().await;
        if !book.edit(&id, &text)? {
            tracing::debug!("no address with id {}", id);
        }

        Ok(book.entries().to_vec())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_address(&self, id: String) -> Result<Vec<AddressEntry>, Error> {
        let mut book = self.book.lock().await;
        book.delete(&id)?;

        Ok(book.entries().to_vec())
    }

    #[tracing::instrument(skip(self))]
    async fn set_role(&self, id: String, role: Role) -> Result<Vec<AddressEntry>, Error> {
        let mut book = self.book.lock().await;
        book.set_role(&id, role)?;

        Ok(book.entries().to_vec())
    }

    #[tracing::instrument(skip(self))]
    async fn toggle_selected(&self, id: String) -> Result<Vec<AddressEntry>, Error> {
        let mut book = self.book.lock().await;
        book.toggle_selected(&id)?;

        Ok(book.entries().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::engine::directions::tests::{round_trip_response, FakeProvider};
    use crate::store::MemoryStore;
    use std::sync::Arc;
    use tokio_test::block_on;

    fn engine() -> Engine {
        Engine::with_parts(
            Config::default(),
            Box::new(MemoryStore::new()),
            Arc::new(FakeProvider::new(Ok(round_trip_response()))),
        )
        .unwrap()
    }

    #[test]
    fn invalid_text_is_reported_over_the_api() {
        let engine = engine();

        assert_eq!(
            block_on(engine.add_address("   ".into())),
            Err(invalid_input_error())
        );
        assert_eq!(
            block_on(engine.edit_address("1".into(), "x".repeat(201))),
            Err(invalid_input_error())
        );
        assert_eq!(block_on(engine.list_addresses()).len(), 10);
    }

    #[test]
    fn role_changes_return_updated_entries() {
        let engine = engine();

        block_on(engine.set_role("1".into(), Role::Start)).unwrap();
        let entries = block_on(engine.set_role("2".into(), Role::Start)).unwrap();

        let starts: Vec<_> = entries.iter().filter(|e| e.is_start).map(|e| &e.id).collect();
        assert_eq!(starts, vec!["2"]);
    }

    #[test]
    fn unknown_ids_leave_entries_unchanged() {
        let engine = engine();
        let before = block_on(engine.list_addresses());

        assert_eq!(block_on(engine.delete_address("nope".into())).unwrap(), before);
        assert_eq!(block_on(engine.toggle_selected("nope".into())).unwrap(), before);
        assert_eq!(
            block_on(engine.edit_address("nope".into(), "A St".into())).unwrap(),
            before
        );
    }
}
