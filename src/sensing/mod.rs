//! Photodiode identities, the uniqueness registry and raw ADC access.

mod axis;
mod channel;
mod channel_reader;
mod photoresistor;
mod registry;

#[cfg(test)]
pub(crate) mod mock;
#[cfg(test)]
mod tests;

pub use axis::Axis;
pub use channel::Channel;
pub use channel_reader::{ChannelReader, IioChannelReader, SensorReadError};
pub use photoresistor::{AdcScale, Photoresistor, Sensor, SensorDescription};
pub use registry::{RegistrySnapshot, SensorRegistry};
