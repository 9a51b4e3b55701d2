//! API route table
//!
//! Parses (method, path) into a typed route. Dynamic `{id}` segments are
//! parsed once; a segment that is not an integer can never name a row,
//! so the variant carries `None` and the handler answers not-found.

use hyper::Method;

/// Typed API routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRoute {
    ListCategories,
    CreateCategory,
    DeleteCategory(Option<i64>),
    ListLinks,
    CreateLink,
    UpdateLink(Option<i64>),
    DeleteLink(Option<i64>),
}

impl ApiRoute {
    /// Match a request against the route table
    pub fn match_request(method: &Method, path: &str) -> Option<Self> {
        match (method, path) {
            (&Method::GET, "/api/categories") => Some(Self::ListCategories),
            (&Method::POST, "/api/categories") => Some(Self::CreateCategory),
            (&Method::GET, "/api/links") => Some(Self::ListLinks),
            (&Method::POST, "/api/links") => Some(Self::CreateLink),
            _ => {
                if let Some(rest) = path.strip_prefix("/api/links/") {
                    return match *method {
                        Method::PUT => Some(Self::UpdateLink(parse_id(rest))),
                        Method::DELETE => Some(Self::DeleteLink(parse_id(rest))),
                        _ => None,
                    };
                }
                if let Some(rest) = path.strip_prefix("/api/categories/") {
                    return match *method {
                        Method::DELETE => Some(Self::DeleteCategory(parse_id(rest))),
                        _ => None,
                    };
                }
                None
            }
        }
    }
}

fn parse_id(segment: &str) -> Option<i64> {
    segment.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_routes() {
        assert_eq!(
            ApiRoute::match_request(&Method::GET, "/api/categories"),
            Some(ApiRoute::ListCategories)
        );
        assert_eq!(
            ApiRoute::match_request(&Method::POST, "/api/categories"),
            Some(ApiRoute::CreateCategory)
        );
        assert_eq!(
            ApiRoute::match_request(&Method::GET, "/api/links"),
            Some(ApiRoute::ListLinks)
        );
        assert_eq!(
            ApiRoute::match_request(&Method::POST, "/api/links"),
            Some(ApiRoute::CreateLink)
        );
    }

    #[test]
    fn test_id_routes() {
        assert_eq!(
            ApiRoute::match_request(&Method::PUT, "/api/links/17"),
            Some(ApiRoute::UpdateLink(Some(17)))
        );
        assert_eq!(
            ApiRoute::match_request(&Method::DELETE, "/api/links/17"),
            Some(ApiRoute::DeleteLink(Some(17)))
        );
        assert_eq!(
            ApiRoute::match_request(&Method::DELETE, "/api/categories/3"),
            Some(ApiRoute::DeleteCategory(Some(3)))
        );
    }

    #[test]
    fn test_non_numeric_ids_carry_none() {
        assert_eq!(
            ApiRoute::match_request(&Method::PUT, "/api/links/abc"),
            Some(ApiRoute::UpdateLink(None))
        );
        assert_eq!(
            ApiRoute::match_request(&Method::DELETE, "/api/categories/"),
            Some(ApiRoute::DeleteCategory(None))
        );
    }

    #[test]
    fn test_unmatched_combinations() {
        assert_eq!(ApiRoute::match_request(&Method::GET, "/api/nope"), None);
        assert_eq!(ApiRoute::match_request(&Method::PUT, "/api/categories/3"), None);
        assert_eq!(ApiRoute::match_request(&Method::POST, "/api/links/17"), None);
        assert_eq!(ApiRoute::match_request(&Method::DELETE, "/api/links"), None);
    }
}
