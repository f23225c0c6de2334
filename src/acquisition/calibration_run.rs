use super::AcquisitionLoop;
use crate::config::CalibrationConfig;
use crate::estimation::{
    EstimationStrategy, Vec3D,
    calibration::{CalibrationError, CalibrationTable, average_direction},
};
use crate::{error, info, warn};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;

/// Takes `count` calibration samples `delay` apart and returns their unit-length mean.
/// A single failed sample discards the whole heading.
pub async fn measure_heading(
    acq: &mut AcquisitionLoop,
    count: usize,
    delay: Duration,
) -> Option<Vec3D<f64>> {
    let mut samples = Vec::with_capacity(count);
    for i in 0..count {
        match acq.sample(EstimationStrategy::CALIBRATION_ALTERNATE).await {
            Ok(sample) => samples.push(sample),
            Err(e) => warn!("Calibration sample {} failed: {e}", i + 1),
        }
        if i + 1 < count {
            tokio::time::sleep(delay).await;
        }
    }
    if samples.len() < count {
        warn!("Expected {count} samples but got {}.", samples.len());
        return None;
    }
    average_direction(&samples)
}

/// Walks through all reference headings, waiting for a line on `input` before each one.
///
/// The table is exported even if headings are missing, in which case the error column stays
/// empty and `MissingMeasurement` is returned.
pub async fn run_calibration<R>(
    acq: &mut AcquisitionLoop,
    config: &CalibrationConfig,
    input: R,
    c_tok: &CancellationToken,
) -> Result<CalibrationTable, CalibrationError>
where
    R: AsyncBufRead + Unpin,
{
    let mut table = CalibrationTable::with_step(config.step_deg);
    let mut lines = input.lines();
    let pending: Vec<(usize, u32)> = table.pending().collect();
    info!("Calibrating {} headings in {} deg steps.", pending.len(), config.step_deg);

    for (idx, angle_deg) in pending {
        info!("Ready to measure {angle_deg} deg. Press Enter when the device is in position.");
        let line = tokio::select! {
            () = c_tok.cancelled() => break,
            line = lines.next_line() => line,
        };
        match line {
            Ok(Some(_)) => {}
            Ok(None) => {
                warn!("Input closed, aborting calibration at {angle_deg} deg.");
                break;
            }
            Err(e) => {
                error!("Can not read operator input: {e}");
                break;
            }
        }
        let measured =
            measure_heading(acq, config.samples_per_heading, config.sample_delay).await;
        table.record(idx, measured);
    }

    let result = table.compute_errors();
    if let Err(e) = &result {
        error!("{e}");
    }
    table.export(&config.output)?;
    result.map(|()| table)
}
