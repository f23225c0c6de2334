use super::Vec3D;
use num::traits::{Float, One, Zero};
use std::cmp::Ordering;
use std::ops::{Add, Mul};

/// Small dense row-major matrix.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix<T, const M: usize, const N: usize> {
    pub(crate) data: [[T; N]; M],
}

impl<T, const M: usize, const N: usize> Matrix<T, M, N>
where T: Copy
{
    pub fn new(data: [[T; N]; M]) -> Self { Matrix { data } }

    pub fn get(&self, row: usize, col: usize) -> T { self.data[row][col] }
}

impl<T, const M: usize, const N: usize> Matrix<T, M, N>
where T: Copy + Zero
{
    pub fn zero() -> Self {
        Self {
            data: [[T::zero(); N]; M],
        }
    }
}

impl<T, const N: usize> Matrix<T, N, N>
where T: Copy + Zero + One
{
    pub fn identity() -> Self {
        let mut result = Self::zero();
        for i in 0..N {
            result.data[i][i] = T::one();
        }
        result
    }
}

impl<T> Matrix<T, 3, 3>
where T: Copy + Zero + Mul<Output = T>
{
    /// Outer product `a * bᵀ`.
    pub fn outer(a: Vec3D<T>, b: Vec3D<T>) -> Self {
        let mut result = Self::zero();
        for i in 0..3 {
            for j in 0..3 {
                result.data[i][j] = a.get(i) * b.get(j);
            }
        }
        result
    }
}

impl<T> Matrix<T, 3, 3>
where T: Float
{
    pub fn mul_vec(&self, v: Vec3D<T>) -> Vec3D<T> {
        let row = |i: usize| self.data[i][0] * v.x() + self.data[i][1] * v.y() + self.data[i][2] * v.z();
        Vec3D::new(row(0), row(1), row(2))
    }
}

impl<T, const M: usize, const N: usize> Add for Matrix<T, M, N>
where T: Copy + Add<Output = T>
{
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        for i in 0..M {
            for j in 0..N {
                self.data[i][j] = self.data[i][j] + rhs.data[i][j];
            }
        }
        self
    }
}

impl<T, const M: usize, const N: usize, const P: usize> Mul<Matrix<T, N, P>> for Matrix<T, M, N>
where T: Copy + Zero + Add<Output = T> + Mul<Output = T>
{
    type Output = Matrix<T, M, P>;

    fn mul(self, rhs: Matrix<T, N, P>) -> Self::Output {
        let mut result = Matrix::<T, M, P>::zero();

        for i in 0..M {
            for j in 0..P {
                let mut sum = T::zero();
                for k in 0..N {
                    sum = sum + self.data[i][k] * rhs.data[k][j];
                }
                result.data[i][j] = sum;
            }
        }

        result
    }
}

impl<T, const N: usize> Matrix<T, N, N>
where T: Float
{
    /// Gauss-Jordan inversion with partial pivoting.
    ///
    /// # Arguments
    /// * `tol` - Pivots with an absolute value at or below this are treated as zero.
    ///
    /// # Returns
    /// `None` if the matrix is singular.
    pub fn try_inverse(&self, tol: T) -> Option<Self> {
        let mut left = *self;
        let mut right = Matrix::<T, N, N>::identity();

        for i in 0..N {
            let pivot_row = (i..N).max_by(|a, b| {
                let (pa, pb) = (left.data[*a][i].abs(), left.data[*b][i].abs());
                pa.partial_cmp(&pb).unwrap_or(Ordering::Equal)
            })?;
            let candidate = left.data[pivot_row][i];
            if candidate.is_nan() || candidate.abs() <= tol {
                return None;
            }
            left.data.swap(i, pivot_row);
            right.data.swap(i, pivot_row);

            let pivot = left.data[i][i];
            for j in 0..N {
                left.data[i][j] = left.data[i][j] / pivot;
                right.data[i][j] = right.data[i][j] / pivot;
            }

            for k in 0..N {
                if k != i {
                    let factor = left.data[k][i];
                    for j in 0..N {
                        left.data[k][j] = left.data[k][j] - factor * left.data[i][j];
                        right.data[k][j] = right.data[k][j] - factor * right.data[i][j];
                    }
                }
            }
        }

        Some(right)
    }
}
