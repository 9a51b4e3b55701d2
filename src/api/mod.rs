// API module entry
// REST endpoints for categories and links

mod handlers;
mod response;
mod routes;
mod types;

pub use routes::ApiRoute;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use std::sync::Arc;

use crate::config::AppState;
use crate::http;

/// API route handler
///
/// Dispatches to handler functions based on the typed route table.
/// Unmatched method/path combinations under `/api/` get a bare 404.
pub async fn handle_api<B>(req: Request<B>, state: Arc<AppState>) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match ApiRoute::match_request(&method, &path) {
        Some(ApiRoute::ListCategories) => handlers::list_categories(&state),
        Some(ApiRoute::CreateCategory) => handlers::create_category(req, &state).await,
        Some(ApiRoute::ListLinks) => handlers::list_links(&state),
        Some(ApiRoute::CreateLink) => handlers::create_link(req, &state).await,
        Some(ApiRoute::UpdateLink(id)) => handlers::update_link(req, &state, id).await,
        Some(ApiRoute::DeleteLink(id)) => handlers::delete_link(&state, id),
        Some(ApiRoute::DeleteCategory(id)) => handlers::delete_category(&state, id),
        None => http::build_404_response(),
    }
}
