use super::Vec3D;
use crate::sensing::{Axis, SensorDescription};
use std::fmt;
use strum_macros::{Display, EnumIter};

/// Normalized readings of one tick, tagged by the direction the sensor faces.
/// Directions without a sensor read as dark.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReadingSnapshot {
    values: [Option<f64>; Axis::COUNT],
}

impl ReadingSnapshot {
    pub fn new() -> Self { Self::default() }

    /// Stores a reading, clamped into `[0, 1]`. Non-finite readings are stored as dark.
    pub fn insert(&mut self, axis: Axis, value: f64) {
        let value = if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 };
        self.values[axis.slot()] = Some(value);
    }

    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        self.insert(axis, value);
        self
    }

    /// Reading of the sensor facing `axis`, `0.0` if there is none.
    pub fn get(&self, axis: Axis) -> f64 { self.values[axis.slot()].unwrap_or(0.0) }

    pub fn has_sensor(&self, axis: Axis) -> bool { self.values[axis.slot()].is_some() }

    /// `true` if every reading is exactly zero.
    #[allow(clippy::float_cmp)]
    pub fn is_dark(&self) -> bool { self.values.iter().flatten().all(|v| *v == 0.0) }

    pub fn from_descriptions<'a>(descriptions: impl IntoIterator<Item = &'a SensorDescription>) -> Self {
        descriptions.into_iter().map(|d| (d.vector, d.value)).collect()
    }
}

impl FromIterator<(Axis, f64)> for ReadingSnapshot {
    fn from_iter<I: IntoIterator<Item = (Axis, f64)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (axis, value) in iter {
            snapshot.insert(axis, value);
        }
        snapshot
    }
}

/// Reasons a snapshot does not determine a light direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DegenerateReadingError {
    /// Every sensor reports zero.
    AllDark,
    /// Opposing sensors cancel out on all axes.
    Balanced,
    /// The mount directions of the generalized geometry do not span three dimensions.
    SingularGeometry,
}

impl std::error::Error for DegenerateReadingError {}

/// A finite unit vector in the body frame pointing toward the light source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunVector(Vec3D<f64>);

impl SunVector {
    /// Normalizes `raw`, failing instead of producing NaN or a zero vector.
    pub fn from_unnormalized(raw: Vec3D<f64>) -> Result<Self, DegenerateReadingError> {
        raw.try_normalize().map(Self).ok_or(DegenerateReadingError::Balanced)
    }

    pub fn vector(&self) -> Vec3D<f64> { self.0 }

    pub fn to_array(self) -> [f64; 3] { self.0.to_array() }
}

impl fmt::Display for SunVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:.4}", self.0) }
}

/// Available estimators. They can disagree on the same snapshot,
/// the live loop only ever uses `SYSTEM_OF_RECORD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum EstimationStrategy {
    /// Opposing-pair difference, normalized.
    #[strum(to_string = "differential-normalize")]
    DifferentialNormalize,
    /// Brightest side per axis with its sign, normalized. Calibration alternate.
    #[strum(to_string = "max-intensity-sign-select")]
    MaxIntensitySignSelect,
}

impl EstimationStrategy {
    pub const SYSTEM_OF_RECORD: Self = Self::DifferentialNormalize;
    pub const CALIBRATION_ALTERNATE: Self = Self::MaxIntensitySignSelect;

    pub fn estimate(self, snapshot: &ReadingSnapshot) -> Result<SunVector, DegenerateReadingError> {
        match self {
            Self::DifferentialNormalize => differential_normalize(snapshot),
            Self::MaxIntensitySignSelect => max_intensity_sign_select(snapshot),
        }
    }
}

/// Per axis `value(+axis) - value(-axis)`, normalized to unit length.
pub fn differential_normalize(snapshot: &ReadingSnapshot) -> Result<SunVector, DegenerateReadingError> {
    if snapshot.is_dark() {
        return Err(DegenerateReadingError::AllDark);
    }
    let diff = axis_components(|pos, neg| snapshot.get(pos) - snapshot.get(neg));
    SunVector::from_unnormalized(diff)
}

/// Per axis the brighter of both sides, signed toward it. Ties favor the positive side.
pub fn max_intensity_sign_select(
    snapshot: &ReadingSnapshot,
) -> Result<SunVector, DegenerateReadingError> {
    if snapshot.is_dark() {
        return Err(DegenerateReadingError::AllDark);
    }
    let signed = axis_components(|pos, neg| {
        let (p, n) = (snapshot.get(pos), snapshot.get(neg));
        if p >= n { p } else { -n }
    });
    SunVector::from_unnormalized(signed)
}

fn axis_components<F>(component: F) -> Vec3D<f64>
where F: Fn(Axis, Axis) -> f64 {
    let [x, y, z] = [0, 1, 2].map(|dim| {
        let (pos, neg) = Axis::pair(dim);
        component(pos, neg)
    });
    Vec3D::new(x, y, z)
}
