use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::{AddressEntry, Role};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct TextParams {
    text: String,
}

#[derive(Serialize, Deserialize)]
pub struct RoleParams {
    role: Role,
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Json<Vec<AddressEntry>> {
    api.list_addresses().await.into()
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<TextParams>,
) -> Result<Json<AddressEntry>, Error> {
    let entry = api.add_address(params.text).await?;

    Ok(entry.into())
}

pub async fn edit(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
    Json(params): Json<TextParams>,
) -> Result<Json<Vec<AddressEntry>>, Error> {
    let entries = api.edit_address(id, params.text).await?;

    Ok(entries.into())
}

pub async fn delete(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AddressEntry>>, Error> {
    let entries = api.delete_address(id).await?;

    Ok(entries.into())
}

pub async fn set_role(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
    Json(params): Json<RoleParams>,
) -> Result<Json<Vec<AddressEntry>>, Error> {
    let entries = api.set_role(id, params.role).await?;

    Ok(entries.into())
}

pub async fn toggle_selected(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AddressEntry>>, Error> {
    let entries = api.toggle_selected(id).await?;

    Ok(entries.into())
}
