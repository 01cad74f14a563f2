mod address_api;
mod directions;
mod link_api;
mod route_api;

use std::sync::{Arc, Mutex};

use crate::{
    api::API,
    config::Config,
    entities::{AddressBook, Submission},
    error::Error,
    external::google_maps::{DynDirectionsProvider, GoogleMaps},
    store::{DynStore, FileStore, MemoryStore},
};

pub use directions::{compute_route, summarize};

pub struct Engine {
    book: tokio::sync::Mutex<AddressBook>,
    submission: Mutex<Submission>,
    directions: DynDirectionsProvider,
    config: Config,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(config: Config) -> Result<Self, Error> {
        let store: DynStore = match &config.data_dir {
            Some(dir) => {
                tracing::info!("storing addresses under {}", dir.display());
                Box::new(FileStore::new(dir)?)
            }
            None => {
                tracing::warn!("DATA_DIR not set, addresses are kept in memory");
                Box::new(MemoryStore::new())
            }
        };

        let directions = Arc::new(GoogleMaps::new(
            config.api_base.clone(),
            config.api_key.clone(),
        ));

        Self::with_parts(config, store, directions)
    }

    pub fn with_parts(
        config: Config,
        store: DynStore,
        directions: DynDirectionsProvider,
    ) -> Result<Self, Error> {
        Ok(Self {
            book: tokio::sync::Mutex::new(AddressBook::open(store)?),
            submission: Mutex::new(Submission::Idle),
            directions,
            config,
        })
    }
}

impl API for Engine {}
