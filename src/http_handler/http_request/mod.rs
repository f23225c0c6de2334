use super::http_response::update_vector;

pub(crate) mod request_common;
pub(crate) mod update_vector_post;
