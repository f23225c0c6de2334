//! Minimal REST client for the live plot backend.

pub(crate) mod http_client;
pub(crate) mod http_request;
pub(crate) mod http_response;

pub use http_response::response_common::TelemetryError;
