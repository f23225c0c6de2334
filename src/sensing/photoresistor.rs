use super::{Axis, Channel, ChannelReader, SensorReadError, SensorRegistry};
use crate::config::{ConfigurationError, SensorSpec};
use crate::event;
use async_trait::async_trait;
use std::sync::Arc;

/// ADC conversion parameters shared by all photodiodes of a harness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdcScale {
    /// Highest code the converter can produce.
    pub full_scale_code: u16,
    /// Voltage corresponding to `full_scale_code`.
    pub reference_voltage: f64,
}

impl Default for AdcScale {
    fn default() -> Self { Self { full_scale_code: 4095, reference_voltage: 1.8 } }
}

/// Identity and latest normalized reading of a sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorDescription {
    pub channel: Channel,
    pub vector: Axis,
    pub color: Option<String>,
    pub value: f64,
}

impl SensorDescription {
    /// Console label in the harness notation, e.g. `AIN2_orange`.
    pub fn label(&self) -> String {
        match &self.color {
            Some(color) => format!("{}_{color}", self.channel),
            None => self.channel.to_string(),
        }
    }
}

/// A light sensor that can be sampled once per tick.
#[async_trait]
pub trait Sensor: Send + Sync {
    /// Samples the sensor and returns the normalized reading.
    /// On failure the previous reading stays in place.
    async fn read(&mut self) -> Result<f64, SensorReadError>;
    fn describe(&self) -> SensorDescription;
}

/// A single photodiode mounted along one body axis.
///
/// Holds its registration in the `SensorRegistry` for its whole lifetime and releases it on drop.
pub struct Photoresistor {
    channel: Channel,
    vector: Axis,
    color: Option<String>,
    raw_code: u16,
    scale: AdcScale,
    registry: Arc<SensorRegistry>,
    reader: Arc<dyn ChannelReader>,
    released: bool,
}

impl Photoresistor {
    /// Registers the photodiode. Fails if the registry rejects channel, vector or color.
    pub fn new(
        channel: Channel,
        color: Option<&str>,
        vector: Axis,
        scale: AdcScale,
        registry: Arc<SensorRegistry>,
        reader: Arc<dyn ChannelReader>,
    ) -> Result<Self, ConfigurationError> {
        if scale.full_scale_code == 0 {
            return Err(ConfigurationError::InvalidFullScale);
        }
        registry.validate(channel, vector, color)?;
        Ok(Self {
            channel,
            vector,
            color: color.map(str::to_string),
            raw_code: 0,
            scale,
            registry,
            reader,
            released: false,
        })
    }

    /// Builds a photodiode from a harness description entry.
    pub fn from_spec(
        spec: &SensorSpec,
        scale: AdcScale,
        registry: Arc<SensorRegistry>,
        reader: Arc<dyn ChannelReader>,
    ) -> Result<Self, ConfigurationError> {
        let channel = Channel::parse(&spec.channel)?;
        let vector = Axis::try_from(spec.vector)?;
        Self::new(channel, spec.color.as_deref(), vector, scale, registry, reader)
    }

    pub fn channel(&self) -> Channel { self.channel }
    pub fn vector(&self) -> Axis { self.vector }
    pub fn color(&self) -> Option<&str> { self.color.as_deref() }
    pub fn raw_code(&self) -> u16 { self.raw_code }

    /// Fetches a fresh code from the reader. The stored code is only replaced on success,
    /// codes outside the converter range are clamped.
    pub async fn read_raw(&mut self) -> Result<u16, SensorReadError> {
        let code = self.reader.read(self.channel).await?;
        self.store_raw(code);
        Ok(self.raw_code)
    }

    /// Stores a code, clamped into `[0, full_scale_code]`.
    pub(crate) fn store_raw(&mut self, code: i64) {
        let full_scale = i64::from(self.scale.full_scale_code);
        let clamped = code.clamp(0, full_scale);
        if clamped != code {
            event!("{} delivered {code}, clamped to {clamped}.", self.channel);
        }
        self.raw_code = u16::try_from(clamped).unwrap_or(self.scale.full_scale_code);
    }

    /// Raw code relative to full scale, always within `[0, 1]`.
    pub fn normalized_value(&self) -> f64 {
        (f64::from(self.raw_code) / f64::from(self.scale.full_scale_code)).clamp(0.0, 1.0)
    }

    pub fn voltage(&self) -> f64 { self.normalized_value() * self.scale.reference_voltage }

    /// Gives channel, vector and color back to the registry. Only the first call has an effect.
    pub fn release(&mut self) {
        if !self.released {
            self.registry.unregister(self.channel, self.vector, self.color.as_deref());
            self.released = true;
        }
    }
}

#[async_trait]
impl Sensor for Photoresistor {
    async fn read(&mut self) -> Result<f64, SensorReadError> {
        self.read_raw().await?;
        Ok(self.normalized_value())
    }

    fn describe(&self) -> SensorDescription {
        SensorDescription {
            channel: self.channel,
            vector: self.vector,
            color: self.color.clone(),
            value: self.normalized_value(),
        }
    }
}

impl Drop for Photoresistor {
    fn drop(&mut self) { self.release(); }
}

impl std::fmt::Debug for Photoresistor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Photoresistor")
            .field("channel", &self.channel)
            .field("vector", &self.vector)
            .field("color", &self.color)
            .field("raw_code", &self.raw_code)
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}
