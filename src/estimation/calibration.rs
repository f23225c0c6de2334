//! Heading calibration table.
//!
//! The sensor block is rotated about the body z axis in fixed steps. For every heading the
//! expected in-plane unit vector is compared to the averaged measurement and the angular
//! error is recorded. Results are exported as CSV.

use super::{SunVector, Vec3D};
use crate::info;
use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub enum CalibrationError {
    /// At least one heading has no measurement yet.
    MissingMeasurement { angle_deg: u32 },
    Export(csv::Error),
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMeasurement { angle_deg } => {
                write!(f, "missing measured vector components at {angle_deg} deg")
            }
            Self::Export(e) => write!(f, "export failed: {e}"),
        }
    }
}

impl std::error::Error for CalibrationError {}

impl From<csv::Error> for CalibrationError {
    fn from(value: csv::Error) -> Self { Self::Export(value) }
}

/// One row of the calibration table.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HeadingRecord {
    pub angle_deg: u32,
    pub x_expected: f64,
    pub y_expected: f64,
    pub x_measured: Option<f64>,
    pub y_measured: Option<f64>,
    pub error_deg: Option<f64>,
}

impl HeadingRecord {
    pub fn is_measured(&self) -> bool { self.x_measured.is_some() && self.y_measured.is_some() }

    pub fn expected(&self) -> Vec3D<f64> { Vec3D::new(self.x_expected, self.y_expected, 0.0) }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationTable {
    records: Vec<HeadingRecord>,
}

impl CalibrationTable {
    /// Reference headings `0, step, 2*step, ... < 360` with their expected unit vectors.
    pub fn with_step(step_deg: u32) -> Self {
        let step = step_deg.max(1) as usize;
        let records = (0..360)
            .step_by(step)
            .map(|angle_deg: u32| {
                let rad = f64::from(angle_deg).to_radians();
                HeadingRecord {
                    angle_deg,
                    x_expected: rad.cos(),
                    y_expected: rad.sin(),
                    x_measured: None,
                    y_measured: None,
                    error_deg: None,
                }
            })
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[HeadingRecord] { &self.records }

    /// Headings still waiting for a measurement.
    pub fn pending(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.is_measured())
            .map(|(i, r)| (i, r.angle_deg))
    }

    /// Stores the in-plane components of a measurement. `None` marks a failed heading.
    pub fn record(&mut self, idx: usize, measured: Option<Vec3D<f64>>) {
        if let Some(rec) = self.records.get_mut(idx) {
            rec.x_measured = measured.map(|m| m.x());
            rec.y_measured = measured.map(|m| m.y());
            rec.error_deg = None;
        }
    }

    /// Fills in the angular error column for every heading.
    pub fn compute_errors(&mut self) -> Result<(), CalibrationError> {
        if let Some(missing) = self.records.iter().find(|r| !r.is_measured()) {
            return Err(CalibrationError::MissingMeasurement { angle_deg: missing.angle_deg });
        }
        for rec in &mut self.records {
            let measured = Vec3D::new(
                rec.x_measured.unwrap_or_default(),
                rec.y_measured.unwrap_or_default(),
                0.0,
            );
            rec.error_deg = angular_error_deg(rec.expected(), measured);
        }
        Ok(())
    }

    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<(), CalibrationError> {
        let mut wtr = csv::Writer::from_writer(writer);
        for rec in &self.records {
            wtr.serialize(rec)?;
        }
        wtr.flush().map_err(|e| CalibrationError::Export(e.into()))?;
        Ok(())
    }

    pub fn export(&self, path: &Path) -> Result<(), CalibrationError> {
        let file = std::fs::File::create(path).map_err(|e| CalibrationError::Export(e.into()))?;
        self.write_csv(file)?;
        info!("Exported calibration results to {}", path.display());
        Ok(())
    }
}

/// Angle between expected and measured direction in degrees.
pub fn angular_error_deg(expected: Vec3D<f64>, measured: Vec3D<f64>) -> Option<f64> {
    expected.angle_to(measured).map(f64::to_degrees)
}

/// Mean of several estimates, rescaled to unit length. `None` for no samples or if they cancel out.
pub fn average_direction(samples: &[SunVector]) -> Option<Vec3D<f64>> {
    if samples.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = samples.len() as f64;
    let sum = samples.iter().fold(Vec3D::zero(), |acc, s| acc + s.vector());
    (sum / count).try_normalize()
}
