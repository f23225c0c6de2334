//! Attitude determination and control: subsystem registration and supervision.

mod signal;
mod subsystem;
mod supervisor;


pub use signal::SubsystemExit;
pub use subsystem::{SunSensorSubsystem, Subsystem, SubsystemError};
pub use supervisor::Supervisor;

/// Name of the attitude control slot. Actuation is not available yet.
pub const CONTROL_SUBSYSTEM: &str = "control";
