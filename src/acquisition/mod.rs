//! The sun sensor acquisition loop, its telemetry output and the heading calibration run.

mod acquisition_loop;
mod calibration_run;
mod loop_state;
mod telemetry;


pub use acquisition_loop::{AcquisitionLoop, AlreadyStartedError, LoopSettings};
pub use calibration_run::{measure_heading, run_calibration};
pub use loop_state::LoopState;
pub use telemetry::{HttpTelemetrySink, TelemetryFrame, TelemetrySink};
