use strum_macros::Display;

pub(crate) trait HTTPResponseType {
    type ParsedResponseType;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, TelemetryError>;

    async fn unwrap_return_code(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, TelemetryError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else if status.is_server_error() {
            Err(TelemetryError::InternalServer)
        } else if status.is_client_error() {
            Err(TelemetryError::BadRequest(status.as_u16()))
        } else {
            Err(TelemetryError::Unknown)
        }
    }
}

/// Marker for endpoints whose response body carries no information.
pub(crate) trait StatusOnlyHTTPResponseType {}

impl<T> HTTPResponseType for T
where T: StatusOnlyHTTPResponseType
{
    type ParsedResponseType = ();

    async fn read_response(response: reqwest::Response) -> Result<(), TelemetryError> {
        Self::unwrap_return_code(response).await.map(|_| ())
    }
}

/// Transport failures of the telemetry link. Always non-fatal.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    InternalServer,
    BadRequest(u16),
    NoConnection,
    Timeout,
    InvalidHeader,
    Unknown,
}

impl std::error::Error for TelemetryError {}

impl From<reqwest::Error> for TelemetryError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            TelemetryError::Timeout
        } else if value.is_connect() {
            TelemetryError::NoConnection
        } else if let Some(status) = value.status() {
            if status.is_server_error() {
                TelemetryError::InternalServer
            } else {
                TelemetryError::BadRequest(status.as_u16())
            }
        } else {
            TelemetryError::Unknown
        }
    }
}
