use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    entities::{RouteRequest, TextValue},
    error::{missing_api_key_error, unexpected_error, upstream_rejected_error, Error},
};

pub const DEFAULT_API_BASE: &str = "https://maps.googleapis.com";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub html_instructions: String,
    pub distance: TextValue,
    pub duration: TextValue,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Leg {
    pub distance: TextValue,
    pub duration: TextValue,
    #[serde(default)]
    pub start_address: String,
    #[serde(default)]
    pub end_address: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub legs: Vec<Leg>,
    #[serde(default)]
    pub waypoint_order: Vec<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[async_trait]
pub trait DirectionsProvider {
    async fn directions(&self, request: &RouteRequest) -> Result<DirectionsResponse, Error>;
}

pub type DynDirectionsProvider = std::sync::Arc<dyn DirectionsProvider + Send + Sync>;

#[derive(Clone)]
pub struct GoogleMaps {
    client: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for GoogleMaps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMaps")
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl GoogleMaps {
    pub fn new(api_base: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
            api_key,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/maps/api/directions/json",
            self.api_base.trim_end_matches('/')
        )
    }
}

/// Pipe-separated waypoint list, prefixed with `optimize:true` when the
/// provider should reorder the stops.
pub fn waypoints_param(request: &RouteRequest) -> Option<String> {
    if request.waypoints.is_empty() {
        return None;
    }

    let mut parts = Vec::with_capacity(request.waypoints.len() + 1);
    if request.optimize {
        parts.push("optimize:true");
    }
    parts.extend(request.waypoints.iter().map(String::as_str));

    Some(parts.join("|"))
}

#[async_trait]
impl DirectionsProvider for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn directions(&self, request: &RouteRequest) -> Result<DirectionsResponse, Error> {
        let key = self.api_key.clone().ok_or_else(missing_api_key_error)?;

        let mut builder = self
            .client
            .get(self.url())
            .query(&[("key", key)])
            .query(&[("origin", &request.origin)])
            .query(&[("destination", &request.destination)])
            .query(&[("mode", request.mode.as_str())]);

        if let Some(waypoints) = waypoints_param(request) {
            builder = builder.query(&[("waypoints", waypoints)]);
        }

        let res = builder.send().await?;

        let status_code = res.status().as_u16();

        if status_code >= 400 {
            let body = res.text().await.unwrap_or_default();
            tracing::warn!(status_code, "directions request rejected");
            return Err(upstream_rejected_error(rejection_details(status_code, &body)));
        }

        let body = res.text().await?;
        serde_json::from_str(&body).map_err(|err| unexpected_error(err.to_string()))
    }
}

fn rejection_details(status_code: u16, body: &str) -> String {
    serde_json::from_str::<DirectionsResponse>(body)
        .ok()
        .and_then(|data| data.error_message)
        .unwrap_or_else(|| format!("HTTP {}", status_code))
}
