pub(crate) mod response_common;
pub(crate) mod update_vector;
