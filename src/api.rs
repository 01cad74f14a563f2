use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{AddressEntry, Role, RouteResult, Submission};
use crate::error::Error;

#[async_trait]
pub trait RouteAPI {
    /// Stateless route computation over the given entries.
    async fn compute_route(&self, entries: Vec<AddressEntry>) -> Result<RouteResult, Error>;
    /// Route computation over the stored address book, one at a time.
    async fn submit_route(&self) -> Result<RouteResult, Error>;
    async fn find_submission(&self) -> Submission;
    async fn clear_submission(&self) -> Result<Submission, Error>;
}

#[async_trait]
pub trait AddressAPI {
    async fn list_addresses(&self) -> Vec<AddressEntry>;
    async fn add_address(&self, text: String) -> Result<AddressEntry, Error>;
    async fn edit_address(&self, id: String, text: String) -> Result<Vec<AddressEntry>, Error>;
    async fn delete_address(&self, id: String) -> Result<Vec<AddressEntry>, Error>;
    async fn set_role(&self, id: String, role: Role) -> Result<Vec<AddressEntry>, Error>;
    async fn toggle_selected(&self, id: String) -> Result<Vec<AddressEntry>, Error>;
}

pub trait LinkAPI {
    fn search_link(&self, address: &str) -> Result<String, Error>;
    fn directions_link(&self, start: &str, end: &str) -> Result<String, Error>;
}

pub trait API: RouteAPI + AddressAPI + LinkAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
