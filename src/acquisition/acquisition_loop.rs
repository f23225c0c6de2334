use super::loop_state::{LoopHandle, LoopState};
use super::telemetry::{TelemetryFrame, TelemetrySink};
use crate::estimation::{DegenerateReadingError, EstimationStrategy, ReadingSnapshot, SunVector};
use crate::sensing::{Sensor, SensorDescription};
use crate::{event, info, log, report, warn};
use futures::future::join_all;
use itertools::Itertools;
use std::{fmt, sync::Arc, time::Duration};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Timing and output switches of the acquisition loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSettings {
    /// Time between two ticks. Zero runs exactly one tick.
    pub interval: Duration,
    pub print_result: bool,
    pub publish_telemetry: bool,
}

/// Returned by `AcquisitionLoop::run` if the loop already left `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyStartedError(pub LoopState);

impl fmt::Display for AlreadyStartedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "acquisition loop can not be started in state {}", self.0)
    }
}

impl std::error::Error for AlreadyStartedError {}

/// Periodic read, estimate, report and publish cycle over a fixed set of sensors.
///
/// The loop owns its sensors, so reads of the same channel never overlap. It terminates
/// when either the token passed to [`AcquisitionLoop::run`] or its own stop token
/// (see [`LoopHandle::stop`]) is cancelled, and always finishes with a single zeroed
/// shutdown frame.
pub struct AcquisitionLoop {
    sensors: Vec<Box<dyn Sensor>>,
    settings: LoopSettings,
    sink: Arc<dyn TelemetrySink>,
    state_tx: watch::Sender<LoopState>,
    stop_tok: CancellationToken,
    last_estimate: Option<SunVector>,
}

impl AcquisitionLoop {
    pub fn new(
        sensors: Vec<Box<dyn Sensor>>,
        settings: LoopSettings,
        sink: Arc<dyn TelemetrySink>,
    ) -> Self {
        let (state_tx, _) = watch::channel(LoopState::Idle);
        Self {
            sensors,
            settings,
            sink,
            state_tx,
            stop_tok: CancellationToken::new(),
            last_estimate: None,
        }
    }

    pub fn handle(&self) -> LoopHandle {
        LoopHandle::new(self.state_tx.subscribe(), self.stop_tok.clone())
    }

    pub fn state(&self) -> LoopState { *self.state_tx.borrow() }

    pub fn settings(&self) -> LoopSettings { self.settings }

    /// Most recent successful system-of-record estimate.
    pub fn last_estimate(&self) -> Option<SunVector> { self.last_estimate }

    pub fn describe(&self) -> Vec<SensorDescription> {
        self.sensors.iter().map(|s| s.describe()).collect()
    }

    /// Runs ticks until cancelled, then performs the shutdown sequence.
    ///
    /// # Errors
    /// Fails without doing anything if the loop is not `Idle`.
    pub async fn run(&mut self, c_tok: CancellationToken) -> Result<(), AlreadyStartedError> {
        let state = self.state();
        if state != LoopState::Idle {
            return Err(AlreadyStartedError(state));
        }
        self.state_tx.send_replace(LoopState::Running);
        info!(
            "Acquisition started with {} sensors, interval {}ms.",
            self.sensors.len(),
            self.settings.interval.as_millis()
        );
        let stop_tok = self.stop_tok.clone();
        loop {
            if c_tok.is_cancelled() || stop_tok.is_cancelled() {
                log!("Acquisition cancelled.");
                break;
            }
            self.tick().await;
            if self.settings.interval.is_zero() {
                break;
            }
            tokio::select! {
                () = c_tok.cancelled() => {},
                () = stop_tok.cancelled() => {},
                () = tokio::time::sleep(self.settings.interval) => {},
            }
        }
        self.shutdown().await;
        Ok(())
    }

    /// Reads all sensors and estimates with the system-of-record strategy.
    pub async fn tick_once(&mut self) -> Result<SunVector, DegenerateReadingError> {
        self.sample(EstimationStrategy::SYSTEM_OF_RECORD).await
    }

    /// Reads all sensors and estimates with `strategy`.
    pub async fn sample(
        &mut self,
        strategy: EstimationStrategy,
    ) -> Result<SunVector, DegenerateReadingError> {
        self.read_all().await;
        strategy.estimate(&ReadingSnapshot::from_descriptions(&self.describe()))
    }

    /// Reads every sensor concurrently. Failed sensors keep their previous value.
    async fn read_all(&mut self) {
        let results = join_all(self.sensors.iter_mut().map(|s| s.read())).await;
        for e in results.into_iter().filter_map(Result::err) {
            warn!("{e}. Keeping previous value.");
        }
    }

    async fn tick(&mut self) {
        self.read_all().await;
        let descriptions = self.describe();
        if self.settings.print_result {
            for desc in &descriptions {
                report!("{}: {:.4}", desc.label(), desc.value);
            }
        }
        let snapshot = ReadingSnapshot::from_descriptions(&descriptions);
        match EstimationStrategy::SYSTEM_OF_RECORD.estimate(&snapshot) {
            Ok(estimate) => {
                self.last_estimate = Some(estimate);
                if self.settings.print_result {
                    report!("light_vec: {estimate}");
                }
                if self.settings.publish_telemetry {
                    self.publish(&TelemetryFrame::new(&estimate, &descriptions)).await;
                }
            }
            Err(e) => warn!("No sun vector this tick ({e}), skipping publish."),
        }
    }

    async fn publish(&self, frame: &TelemetryFrame) {
        match self.sink.publish(frame).await {
            Ok(()) => event!(
                "Published {:?} with values [{}].",
                frame.estimate,
                frame.values().iter().format(", ")
            ),
            Err(e) => warn!("Telemetry publish failed: {e:?}"),
        }
    }

    async fn shutdown(&mut self) {
        self.state_tx.send_replace(LoopState::Stopping);
        self.publish(&TelemetryFrame::shutdown(&self.describe())).await;
        self.state_tx.send_replace(LoopState::Stopped);
        info!("Acquisition stopped.");
    }
}

impl fmt::Debug for AcquisitionLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcquisitionLoop")
            .field("sensors", &self.describe())
            .field("settings", &self.settings)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
