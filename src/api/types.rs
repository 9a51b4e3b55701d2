// API request payload schemas
//
// Decoding fails closed: an absent or wrong-typed field is a decode
// error that the handlers answer with a validation message, never a
// silently defaulted value.

use serde::Deserialize;

/// Body of POST /api/categories
#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
}

/// Body of POST /api/links and PUT /api/links/{id}
#[derive(Debug, Deserialize)]
pub struct LinkPayload {
    pub name: String,
    pub url: String,
    pub category_id: i64,
}
