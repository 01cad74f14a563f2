use super::Engine;

use crate::{
    api::LinkAPI,
    error::{invalid_input_error, Error},
    external::maps_links,
};

impl LinkAPI for Engine {
    fn search_link(&self, address: &str) -> Result<String, Error> {
        if address.trim().is_empty() {
            return Err(invalid_input_error());
        }

        maps_links::search_url(&self.config.search_url, address.trim())
    }

    fn directions_link(&self, start: &str, end: &str) -> Result<String, Error> {
        if start.trim().is_empty() || end.trim().is_empty() {
            return Err(invalid_input_error());
        }

        maps_links::directions_url(&self.config.directions_url, start.trim(), end.trim())
    }
}
