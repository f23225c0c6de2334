#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod acquisition;
mod adcs;
mod config;
mod estimation;
mod http_handler;
mod keychain;
mod logger;
mod sensing;

use crate::acquisition::{AcquisitionLoop, run_calibration};
use crate::adcs::{CONTROL_SUBSYSTEM, SunSensorSubsystem, Supervisor};
use crate::config::{AdcsConfig, CalibrationConfig};
use crate::keychain::Keychain;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let config = AdcsConfig::from_env().unwrap_or_else(|e| fatal!("Invalid configuration: {e}"));
    let calibration = config.calibration.clone();
    let keychain = Keychain::new(config).unwrap_or_else(|e| fatal!("Startup failed: {e}"));
    let acq = keychain.acquisition_loop().unwrap_or_else(|e| fatal!("Sensor setup failed: {e}"));

    if let Some(calib) = calibration {
        calibrate(acq, &calib).await;
        return;
    }

    let mut supervisor = Supervisor::new();
    supervisor.register(Box::new(SunSensorSubsystem::new(acq)));
    supervisor.register_placeholder(CONTROL_SUBSYSTEM);
    for report in supervisor.run().await {
        log!("Subsystem {} exited with {:?}.", report.name, report.exit);
    }
    info!("ADCS shut down.");
}

async fn calibrate(mut acq: AcquisitionLoop, calib: &CalibrationConfig) {
    let c_tok = CancellationToken::new();
    let signal_tok = c_tok.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_tok.cancel();
        }
    });
    let stdin = BufReader::new(tokio::io::stdin());
    match run_calibration(&mut acq, calib, stdin, &c_tok).await {
        Ok(table) => {
            for rec in table.records() {
                report!("{:>3} deg: error {:.2} deg", rec.angle_deg, rec.error_deg.unwrap_or(f64::NAN));
            }
        }
        Err(e) => error!("Calibration incomplete: {e}"),
    }
}
