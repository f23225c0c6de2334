use super::super::{
    http_client::HTTPClient,
    http_response::response_common::{HTTPResponseType, TelemetryError},
};

/// HTTP verbs used by the telemetry endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HTTPRequestMethod {
    Post,
}

pub(crate) trait HTTPRequestType {
    type Response: HTTPResponseType;
    fn endpoint(&self) -> &'static str;
    fn request_method(&self) -> HTTPRequestMethod;

    fn get_request_base(&self, client: &HTTPClient) -> reqwest::RequestBuilder {
        let url = format!("{}{}", client.url(), self.endpoint());
        match self.request_method() {
            HTTPRequestMethod::Post => client.client().post(url),
        }
    }
}

pub(crate) trait JSONBodyHTTPRequestType: HTTPRequestType {
    type Body: serde::Serialize;
    fn body(&self) -> &Self::Body;

    async fn send_request(
        &self,
        client: &HTTPClient,
    ) -> Result<<Self::Response as HTTPResponseType>::ParsedResponseType, TelemetryError> {
        let response = self.get_request_base(client).json(self.body()).send().await?;
        Self::Response::read_response(response).await
    }
}
