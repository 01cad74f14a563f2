use axum::extract::{Extension, Json};

use crate::api::DynAPI;
use crate::entities::{RouteResult, Submission};
use crate::error::Error;

pub async fn create(Extension(api): Extension<DynAPI>) -> Result<Json<RouteResult>, Error> {
    let result = api.submit_route().await?;

    Ok(result.into())
}

pub async fn find(Extension(api): Extension<DynAPI>) -> Json<Submission> {
    api.find_submission().await.into()
}

pub async fn clear(Extension(api): Extension<DynAPI>) -> Result<Json<Submission>, Error> {
    let submission = api.clear_submission().await?;

    Ok(submission.into())
}
