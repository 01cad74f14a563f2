use axum::extract::{rejection::JsonRejection, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::DynAPI;
use crate::entities::{AddressEntry, RouteResult};
use crate::error::{invalid_input_error, Error};

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    #[serde(default)]
    addresses: Vec<AddressEntry>,
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    params: Result<Json<CreateParams>, JsonRejection>,
) -> Result<Json<RouteResult>, Error> {
    let Json(params) = params.map_err(|rejection| {
        tracing::warn!("malformed route request: {}", rejection);
        invalid_input_error()
    })?;

    let result = api.compute_route(params.addresses).await?;

    Ok(result.into())
}
