// Store entity types
// Field order matches the JSON wire format of the API responses

use serde::Serialize;

/// A named grouping for links. Names are unique; at least one category
/// always exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A named URL belonging to exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub category_id: i64,
}

/// A link joined with its owning category's name, as returned by the
/// listing query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkWithCategory {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub category_id: i64,
    pub category_name: String,
}
