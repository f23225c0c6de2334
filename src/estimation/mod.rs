//! Sun vector estimation from photodiode snapshots.
//!
//! All estimators are pure functions of a single snapshot. `EstimationStrategy::SYSTEM_OF_RECORD`
//! drives the live loop, the max-intensity variant is only used for calibration runs.

pub mod calibration;
mod generalized;
mod matrix;
mod sun_vector;
mod vec3d;

#[cfg(test)]
mod tests;

pub use generalized::GeneralizedEstimator;
pub use matrix::Matrix;
pub use sun_vector::{
    DegenerateReadingError, EstimationStrategy, ReadingSnapshot, SunVector, differential_normalize,
    max_intensity_sign_select,
};
pub use vec3d::Vec3D;
