use crate::acquisition::{AcquisitionLoop, HttpTelemetrySink, LoopSettings, TelemetrySink};
use crate::config::{AdcsConfig, ConfigurationError};
use crate::http_handler::http_client::HTTPClient;
use crate::sensing::{AdcScale, ChannelReader, IioChannelReader, Photoresistor, Sensor, SensorRegistry};
use std::sync::Arc;

/// Struct bundling the shared components of the application: the loaded configuration,
/// the sensor registry, the ADC reader and the telemetry sink.
#[derive(Clone)]
pub struct Keychain {
    /// The configuration loaded at startup.
    config: Arc<AdcsConfig>,
    /// Uniqueness registry shared by all photodiodes.
    registry: Arc<SensorRegistry>,
    /// Source of raw conversion codes.
    reader: Arc<dyn ChannelReader>,
    /// Destination of telemetry frames.
    sink: Arc<dyn TelemetrySink>,
}

impl Keychain {
    /// Creates the production keychain: IIO sysfs reader and HTTP telemetry.
    ///
    /// # Errors
    /// Fails on an invalid allowed channel list or if the HTTP client can not be built.
    pub fn new(config: AdcsConfig) -> Result<Self, ConfigurationError> {
        let reader: Arc<dyn ChannelReader> =
            Arc::new(IioChannelReader::new(&config.iio_path_template));
        let telemetry = &config.telemetry;
        let client = HTTPClient::new(
            &telemetry.base_url,
            (telemetry.auth_header.0.as_str(), telemetry.auth_header.1.as_str()),
            telemetry.timeout,
        )
        .map_err(|e| ConfigurationError::TelemetryClient(e.to_string()))?;
        let sink: Arc<dyn TelemetrySink> = Arc::new(HttpTelemetrySink::new(client));
        Self::with_parts(config, reader, sink)
    }

    /// Creates a keychain around an arbitrary reader and sink.
    pub fn with_parts(
        config: AdcsConfig,
        reader: Arc<dyn ChannelReader>,
        sink: Arc<dyn TelemetrySink>,
    ) -> Result<Self, ConfigurationError> {
        let registry =
            Arc::new(SensorRegistry::from_labels(&config.allowed_channels, config.unique_colors)?);
        Ok(Self { config: Arc::new(config), registry, reader, sink })
    }

    /// Provides a reference to the configuration.
    pub fn config(&self) -> &AdcsConfig { &self.config }

    /// Provides a cloned reference to the sensor registry.
    pub fn registry(&self) -> Arc<SensorRegistry> { Arc::clone(&self.registry) }

    /// Constructs one photodiode per configured sensor. Stops at the first rejected entry,
    /// sensors built before it are released again.
    pub fn sensors(&self) -> Result<Vec<Box<dyn Sensor>>, ConfigurationError> {
        let scale = AdcScale {
            full_scale_code: self.config.full_scale_code,
            reference_voltage: self.config.reference_voltage,
        };
        self.config
            .sensors
            .iter()
            .map(|spec| {
                Photoresistor::from_spec(
                    spec,
                    scale,
                    Arc::clone(&self.registry),
                    Arc::clone(&self.reader),
                )
                .map(|p| Box::new(p) as Box<dyn Sensor>)
            })
            .collect()
    }

    /// Builds the acquisition loop over all configured sensors.
    pub fn acquisition_loop(&self) -> Result<AcquisitionLoop, ConfigurationError> {
        let settings = LoopSettings {
            interval: self.config.read_interval,
            print_result: self.config.print_result,
            publish_telemetry: self.config.telemetry.enabled,
        };
        Ok(AcquisitionLoop::new(self.sensors()?, settings, Arc::clone(&self.sink)))
    }
}
