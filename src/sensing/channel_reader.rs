use super::Channel;
use async_trait::async_trait;
use std::{fmt, io::ErrorKind};

/// Failure of a single ADC conversion read. Never fatal, the affected sensor keeps its stale value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorReadError {
    NotFound { channel: Channel, path: String },
    Malformed { channel: Channel, content: String },
    IOError { channel: Channel, reason: String },
}

impl SensorReadError {
    pub fn channel(&self) -> Channel {
        match self {
            Self::NotFound { channel, .. }
            | Self::Malformed { channel, .. }
            | Self::IOError { channel, .. } => *channel,
        }
    }
}

impl fmt::Display for SensorReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { channel, path } => {
                write!(f, "ADC value file not found for channel {channel} at {path}")
            }
            Self::Malformed { channel, content } => {
                write!(f, "Invalid value {content:?} read from ADC for channel {channel}")
            }
            Self::IOError { channel, reason } => {
                write!(f, "Unexpected error while reading channel {channel}: {reason}")
            }
        }
    }
}

impl std::error::Error for SensorReadError {}

/// Access to the latest raw conversion code of one analog channel.
#[async_trait]
pub trait ChannelReader: Send + Sync {
    async fn read(&self, channel: Channel) -> Result<i64, SensorReadError>;
}

/// Reads raw codes from the Linux IIO sysfs interface (`in_voltage<n>_raw`).
#[derive(Debug, Clone)]
pub struct IioChannelReader {
    path_template: String,
}

impl IioChannelReader {
    pub fn new(path_template: &str) -> Self { Self { path_template: path_template.to_string() } }

    pub fn path_for(&self, channel: Channel) -> String {
        self.path_template.replace("{channel}", &channel.index().to_string())
    }

    pub(crate) fn parse_code(channel: Channel, content: &str) -> Result<i64, SensorReadError> {
        content.trim().parse::<i64>().map_err(|_| SensorReadError::Malformed {
            channel,
            content: content.trim().to_string(),
        })
    }
}

#[async_trait]
impl ChannelReader for IioChannelReader {
    async fn read(&self, channel: Channel) -> Result<i64, SensorReadError> {
        let path = self.path_for(channel);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Self::parse_code(channel, &content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(SensorReadError::NotFound { channel, path })
            }
            Err(e) => Err(SensorReadError::IOError { channel, reason: e.to_string() }),
        }
    }
}
