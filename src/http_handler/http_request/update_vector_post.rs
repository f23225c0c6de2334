use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};
use super::update_vector::UpdateVectorResponse;

/// Request type for the /update_vector endpoint.
///
/// The plot app expects a bare JSON array `[[x, y, z], [v0, v1, ...]]`.
#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub(crate) struct UpdateVectorRequest(
    /// The current sun vector estimate.
    pub(crate) [f64; 3],
    /// Normalized sensor values in registration order.
    pub(crate) Vec<f64>,
);

impl JSONBodyHTTPRequestType for UpdateVectorRequest {
    /// The type of the json body.
    type Body = UpdateVectorRequest;
    /// Returns the serializable object.
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for UpdateVectorRequest {
    /// Type of the expected response.
    type Response = UpdateVectorResponse;
    /// `str` object representing the specific endpoint.
    fn endpoint(&self) -> &'static str { "/update_vector" }
    /// The corresponding HTTP Request Method.
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}
