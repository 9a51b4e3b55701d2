//! Static asset serving module
//!
//! The dashboard front-end is three fixed files served out of the asset
//! directory; every other static path is a 404.

use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Map a request path onto an asset file name
fn asset_file(path: &str) -> Option<&'static str> {
    match path {
        "/" => Some("index.html"),
        "/styles.css" => Some("styles.css"),
        "/app.js" => Some("app.js"),
        _ => None,
    }
}

/// Serve one of the fixed front-end assets with `ETag` support
pub async fn serve_asset(
    asset_dir: &str,
    path: &str,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let Some(file) = asset_file(path) else {
        return http::build_404_response();
    };

    let file_path = Path::new(asset_dir).join(file);
    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_warning(&format!(
                "Missing static asset '{}': {e}",
                file_path.display()
            ));
            return http::build_404_response();
        }
    };

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    let etag = cache::generate_etag(&content);
    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    http::response::build_asset_response(content, content_type, &etag, is_head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_path_mapping() {
        assert_eq!(asset_file("/"), Some("index.html"));
        assert_eq!(asset_file("/styles.css"), Some("styles.css"));
        assert_eq!(asset_file("/app.js"), Some("app.js"));
        assert_eq!(asset_file("/index.html"), None);
        assert_eq!(asset_file("/../etc/passwd"), None);
    }
}
