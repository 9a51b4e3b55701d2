// Bookmark API handlers
//
// Each handler validates its input before any store access, invokes one
// store operation, and maps store errors onto the statuses of the API
// contract. Clients only ever see the messages below; raw store errors
// go to the error log.

use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::response::{error_response, json_response, no_content};
use super::types::{CategoryPayload, LinkPayload};
use crate::config::AppState;
use crate::logger;
use crate::store::StoreError;

const CATEGORY_NAME_REQUIRED: &str = "Category name is required.";
const LINK_FIELDS_REQUIRED: &str = "Name, URL and category are required.";
const CATEGORY_EXISTS: &str = "Category already exists.";
const CATEGORY_MISSING: &str = "Selected category does not exist.";
const LINK_NOT_FOUND: &str = "Link not found.";
const CATEGORY_NOT_FOUND: &str = "Category not found.";
const LAST_CATEGORY: &str = "At least one category is required.";
const CATEGORY_IN_USE: &str = "Move or delete links first.";
const INTERNAL_ERROR: &str = "Internal server error.";

/// GET /api/categories
pub fn list_categories(state: &Arc<AppState>) -> Response<Full<Bytes>> {
    match state.store.list_categories() {
        Ok(categories) => json_response(StatusCode::OK, &categories),
        Err(e) => internal_error(&e),
    }
}

/// GET /api/links
pub fn list_links(state: &Arc<AppState>) -> Response<Full<Bytes>> {
    match state.store.list_links() {
        Ok(links) => json_response(StatusCode::OK, &links),
        Err(e) => internal_error(&e),
    }
}

/// POST /api/categories
pub async fn create_category<B>(req: Request<B>, state: &Arc<AppState>) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let payload: CategoryPayload = match decode_payload(req, CATEGORY_NAME_REQUIRED).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let name = payload.name.trim();
    if name.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, CATEGORY_NAME_REQUIRED);
    }

    match state.store.create_category(name) {
        Ok(category) => json_response(StatusCode::CREATED, &category),
        Err(StoreError::DuplicateName) => error_response(StatusCode::BAD_REQUEST, CATEGORY_EXISTS),
        Err(e) => internal_error(&e),
    }
}

/// POST /api/links
pub async fn create_link<B>(req: Request<B>, state: &Arc<AppState>) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let payload: LinkPayload = match decode_payload(req, LINK_FIELDS_REQUIRED).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let (name, url, category_id) = match validate_link_payload(&payload) {
        Ok(fields) => fields,
        Err(resp) => return resp,
    };

    match state.store.create_link(&name, &url, category_id) {
        Ok(link) => json_response(StatusCode::CREATED, &link),
        Err(StoreError::CategoryNotFound) => {
            error_response(StatusCode::BAD_REQUEST, CATEGORY_MISSING)
        }
        Err(e) => internal_error(&e),
    }
}

/// PUT /api/links/{id}
pub async fn update_link<B>(
    req: Request<B>,
    state: &Arc<AppState>,
    id: Option<i64>,
) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let payload: LinkPayload = match decode_payload(req, LINK_FIELDS_REQUIRED).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let (name, url, category_id) = match validate_link_payload(&payload) {
        Ok(fields) => fields,
        Err(resp) => return resp,
    };
    // A non-numeric path id names no row
    let Some(id) = id else {
        return error_response(StatusCode::NOT_FOUND, LINK_NOT_FOUND);
    };

    match state.store.update_link(id, &name, &url, category_id) {
        Ok(link) => json_response(StatusCode::OK, &link),
        Err(StoreError::LinkNotFound) => error_response(StatusCode::NOT_FOUND, LINK_NOT_FOUND),
        Err(StoreError::CategoryNotFound) => {
            error_response(StatusCode::BAD_REQUEST, CATEGORY_MISSING)
        }
        Err(e) => internal_error(&e),
    }
}

/// DELETE /api/links/{id}
pub fn delete_link(state: &Arc<AppState>, id: Option<i64>) -> Response<Full<Bytes>> {
    let Some(id) = id else {
        return error_response(StatusCode::NOT_FOUND, LINK_NOT_FOUND);
    };

    match state.store.delete_link(id) {
        Ok(()) => no_content(),
        Err(StoreError::LinkNotFound) => error_response(StatusCode::NOT_FOUND, LINK_NOT_FOUND),
        Err(e) => internal_error(&e),
    }
}

/// DELETE /api/categories/{id}
pub fn delete_category(state: &Arc<AppState>, id: Option<i64>) -> Response<Full<Bytes>> {
    let Some(id) = id else {
        return error_response(StatusCode::NOT_FOUND, CATEGORY_NOT_FOUND);
    };

    match state.store.delete_category(id) {
        Ok(()) => no_content(),
        Err(StoreError::LastCategory) => error_response(StatusCode::BAD_REQUEST, LAST_CATEGORY),
        Err(StoreError::CategoryInUse) => error_response(StatusCode::BAD_REQUEST, CATEGORY_IN_USE),
        Err(StoreError::CategoryNotFound) => {
            error_response(StatusCode::NOT_FOUND, CATEGORY_NOT_FOUND)
        }
        Err(e) => internal_error(&e),
    }
}

/// Read the request body and decode it into the endpoint's payload type.
///
/// Absent or wrong-typed fields fail the decode and are answered with
/// the endpoint's required-fields message.
async fn decode_payload<B, T>(
    req: Request<B>,
    required_message: &str,
) -> Result<T, Response<Full<Bytes>>>
where
    B: Body,
    B::Error: std::fmt::Display,
    T: DeserializeOwned,
{
    let bytes = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_error(&format!("Failed to read request body: {e}"));
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "Failed to read request body.",
            ));
        }
    };
    serde_json::from_slice(&bytes)
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, required_message))
}

/// Trim and validate link fields. A zero category id counts as missing,
/// matching the falsy-field validation of the API contract; other absent
/// ids flow to the store and come back as `CategoryNotFound`.
fn validate_link_payload(
    payload: &LinkPayload,
) -> Result<(String, String, i64), Response<Full<Bytes>>> {
    let name = payload.name.trim();
    let url = payload.url.trim();
    if name.is_empty() || url.is_empty() || payload.category_id == 0 {
        return Err(error_response(StatusCode::BAD_REQUEST, LINK_FIELDS_REQUIRED));
    }
    Ok((name.to_string(), url.to_string(), payload.category_id))
}

fn internal_error(err: &StoreError) -> Response<Full<Bytes>> {
    logger::log_error(&format!("Store operation failed: {err}"));
    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
}
