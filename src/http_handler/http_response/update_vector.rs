use super::response_common::StatusOnlyHTTPResponseType;

/// Response type for the /update_vector endpoint. Only the status code is evaluated.
#[derive(Debug)]
pub(crate) struct UpdateVectorResponse;

impl StatusOnlyHTTPResponseType for UpdateVectorResponse {}
