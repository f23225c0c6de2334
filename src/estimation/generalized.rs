use super::{DegenerateReadingError, Matrix, SunVector, Vec3D};

const SINGULAR_TOL: f64 = 1e-9;

/// Least squares sun vector for arbitrary mount geometries.
///
/// With `T` holding one unit mount direction per row and `v` the matching readings,
/// the estimate is `pinv(T) * v = (TᵀT)⁻¹ Tᵀ v`, normalized. The geometry is fixed
/// at construction so the normal matrix is only inverted once.
#[derive(Debug, Clone)]
pub struct GeneralizedEstimator {
    mounts: Vec<Vec3D<f64>>,
    normal_inverse: Matrix<f64, 3, 3>,
}

impl GeneralizedEstimator {
    /// # Errors
    /// `SingularGeometry` if the mount directions do not span all three body axes
    /// or a mount direction has zero length.
    pub fn new(mounts: &[Vec3D<f64>]) -> Result<Self, DegenerateReadingError> {
        let mounts = mounts
            .iter()
            .map(|m| m.try_normalize().ok_or(DegenerateReadingError::SingularGeometry))
            .collect::<Result<Vec<_>, _>>()?;
        let normal = mounts.iter().fold(Matrix::zero(), |acc, m| acc + Matrix::outer(*m, *m));
        let normal_inverse =
            normal.try_inverse(SINGULAR_TOL).ok_or(DegenerateReadingError::SingularGeometry)?;
        Ok(Self { mounts, normal_inverse })
    }

    pub fn mounts(&self) -> &[Vec3D<f64>] { &self.mounts }

    /// Solves for the light direction. `readings[i]` belongs to `mounts()[i]`,
    /// missing trailing readings count as dark.
    #[allow(clippy::float_cmp)]
    pub fn estimate(&self, readings: &[f64]) -> Result<SunVector, DegenerateReadingError> {
        if readings.iter().all(|v| *v == 0.0) {
            return Err(DegenerateReadingError::AllDark);
        }
        let projected = self
            .mounts
            .iter()
            .zip(readings.iter().copied().chain(std::iter::repeat(0.0)))
            .fold(Vec3D::zero(), |acc, (m, v)| acc + *m * v.clamp(0.0, 1.0));
        SunVector::from_unnormalized(self.normal_inverse.mul_vec(projected))
    }
}
