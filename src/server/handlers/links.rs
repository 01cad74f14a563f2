use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct SearchParams {
    address: String,
}

#[derive(Serialize, Deserialize)]
pub struct DirectionsParams {
    start: String,
    end: String,
}

#[derive(Serialize, Deserialize)]
pub struct Link {
    url: String,
}

pub async fn search(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Link>, Error> {
    let url = api.search_link(&params.address)?;

    Ok(Link { url }.into())
}

pub async fn directions(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<DirectionsParams>,
) -> Result<Json<Link>, Error> {
    let url = api.directions_link(&params.start, &params.end)?;

    Ok(Link { url }.into())
}
