use crate::estimation::SunVector;
use crate::http_handler::{
    TelemetryError,
    http_client::HTTPClient,
    http_request::{request_common::JSONBodyHTTPRequestType, update_vector_post::UpdateVectorRequest},
};
use crate::sensing::SensorDescription;
use async_trait::async_trait;

/// Per sensor part of a telemetry frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorTelemetry {
    pub color: Option<String>,
    pub mount_vector: [i8; 3],
    pub value: f64,
}

/// Data pushed to the remote plot after every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryFrame {
    pub estimate: [f64; 3],
    pub sensors: Vec<SensorTelemetry>,
}

impl TelemetryFrame {
    pub fn new(estimate: &SunVector, sensors: &[SensorDescription]) -> Self {
        Self {
            estimate: estimate.to_array(),
            sensors: sensors.iter().map(SensorTelemetry::from).collect(),
        }
    }

    /// Final frame sent on termination: zero estimate and zero for every sensor.
    pub fn shutdown(sensors: &[SensorDescription]) -> Self {
        Self {
            estimate: [0.0; 3],
            sensors: sensors
                .iter()
                .map(|s| SensorTelemetry { value: 0.0, ..SensorTelemetry::from(s) })
                .collect(),
        }
    }

    #[allow(clippy::float_cmp)]
    pub fn is_shutdown(&self) -> bool {
        self.estimate.iter().chain(self.sensors.iter().map(|s| &s.value)).all(|v| *v == 0.0)
    }

    pub fn values(&self) -> Vec<f64> { self.sensors.iter().map(|s| s.value).collect() }
}

impl From<&SensorDescription> for SensorTelemetry {
    fn from(desc: &SensorDescription) -> Self {
        Self { color: desc.color.clone(), mount_vector: desc.vector.components(), value: desc.value }
    }
}

/// Destination of telemetry frames. Publishing is best effort, failures never stop acquisition.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    async fn publish(&self, frame: &TelemetryFrame) -> Result<(), TelemetryError>;
}

/// Pushes frames to the `/update_vector` endpoint of the plot app.
#[derive(Debug)]
pub struct HttpTelemetrySink {
    client: HTTPClient,
}

impl HttpTelemetrySink {
    pub fn new(client: HTTPClient) -> Self { Self { client } }

    pub fn url(&self) -> &str { self.client.url() }
}

#[async_trait]
impl TelemetrySink for HttpTelemetrySink {
    async fn publish(&self, frame: &TelemetryFrame) -> Result<(), TelemetryError> {
        UpdateVectorRequest(frame.estimate, frame.values()).send_request(&self.client).await
    }
}
