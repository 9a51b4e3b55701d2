//! HTTP building blocks shared by the static and API handlers

pub mod cache;
pub mod mime;
pub mod response;

pub use response::{build_304_response, build_404_response, build_413_response};
