use crate::acquisition::{AcquisitionLoop, AlreadyStartedError};
use async_trait::async_trait;
use std::fmt;
use tokio_util::sync::CancellationToken;

/// Failure reported by a subsystem when it returns. Contained by the `Supervisor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubsystemError {
    AlreadyStarted(AlreadyStartedError),
    Faulted(String),
}

impl fmt::Display for SubsystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyStarted(e) => write!(f, "{e}"),
            Self::Faulted(reason) => write!(f, "subsystem faulted: {reason}"),
        }
    }
}

impl std::error::Error for SubsystemError {}

impl From<AlreadyStartedError> for SubsystemError {
    fn from(value: AlreadyStartedError) -> Self { Self::AlreadyStarted(value) }
}

/// A long running part of the ADCS, executed as its own task until `c_tok` is cancelled.
#[async_trait]
pub trait Subsystem: Send {
    fn name(&self) -> &'static str;
    async fn run(self: Box<Self>, c_tok: CancellationToken) -> Result<(), SubsystemError>;
}

/// Sun vector determination backed by the photodiode acquisition loop.
#[derive(Debug)]
pub struct SunSensorSubsystem {
    acq: AcquisitionLoop,
}

impl SunSensorSubsystem {
    pub fn new(acq: AcquisitionLoop) -> Self { Self { acq } }
}

#[async_trait]
impl Subsystem for SunSensorSubsystem {
    fn name(&self) -> &'static str { "sun_sensor" }

    async fn run(mut self: Box<Self>, c_tok: CancellationToken) -> Result<(), SubsystemError> {
        self.acq.run(c_tok).await?;
        Ok(())
    }
}
