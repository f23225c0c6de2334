use num::traits::{Float, Num, NumCast};
use std::fmt::{Display, Formatter};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A 3D vector in the spacecraft body frame, generic over any numeric type.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub struct Vec3D<T> {
    /// The x-component of the vector.
    x: T,
    /// The y-component of the vector.
    y: T,
    /// The z-component of the vector.
    z: T,
}

impl<T: Copy> Vec3D<T> {
    /// Creates a new vector with the given components.
    pub const fn new(x: T, y: T, z: T) -> Self { Self { x, y, z } }

    pub const fn x(&self) -> T { self.x }
    pub const fn y(&self) -> T { self.y }
    pub const fn z(&self) -> T { self.z }

    /// Component along body dimension `dim` (0 = x, 1 = y, 2 = z).
    pub fn get(&self, dim: usize) -> T {
        match dim {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    pub const fn to_array(self) -> [T; 3] { [self.x, self.y, self.z] }
}

impl<T: Num + Copy> Vec3D<T> {
    /// Creates a zero vector.
    pub fn zero() -> Self { Self::new(T::zero(), T::zero(), T::zero()) }

    /// Computes the dot product of the current vector with another vector.
    pub fn dot(self, other: Vec3D<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero() && self.z.is_zero()
    }
}

impl<T: Float> Vec3D<T> {
    /// Computes the euclidean norm of the vector.
    pub fn abs(&self) -> T { (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt() }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Scales the vector to unit length.
    ///
    /// # Returns
    /// `None` if the magnitude is zero or any component is not finite.
    pub fn try_normalize(self) -> Option<Self> {
        let magnitude = self.abs();
        if magnitude.is_zero() || !magnitude.is_finite() {
            return None;
        }
        let normalized = Self::new(self.x / magnitude, self.y / magnitude, self.z / magnitude);
        normalized.is_finite().then_some(normalized)
    }

    /// Angle between two vectors in radians, `None` if either is zero.
    pub fn angle_to(self, other: Self) -> Option<T> {
        let denom = self.abs() * other.abs();
        if denom.is_zero() {
            return None;
        }
        let cos = (self.dot(other) / denom).max(-T::one()).min(T::one());
        Some(cos.acos())
    }

    pub fn cast<D: NumCast + Copy>(self) -> Option<Vec3D<D>> {
        Some(Vec3D::new(D::from(self.x)?, D::from(self.y)?, D::from(self.z)?))
    }
}

impl<T: Num + Copy> Add for Vec3D<T> {
    type Output = Vec3D<T>;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Num + Copy> Sub for Vec3D<T> {
    type Output = Vec3D<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Num + Copy + Neg<Output = T>> Neg for Vec3D<T> {
    type Output = Vec3D<T>;

    fn neg(self) -> Self::Output { Self::new(-self.x, -self.y, -self.z) }
}

impl<T: Num + Copy> Mul<T> for Vec3D<T> {
    type Output = Vec3D<T>;

    /// Implements the `*` operator for a `Vec3D` and a scalar.
    fn mul(self, rhs: T) -> Self::Output { Self::new(self.x * rhs, self.y * rhs, self.z * rhs) }
}

impl<T: Num + Copy> Div<T> for Vec3D<T> {
    type Output = Vec3D<T>;

    /// Implements the `/` operator for a `Vec3D` and a scalar.
    fn div(self, rhs: T) -> Self::Output { Self::new(self.x / rhs, self.y / rhs, self.z / rhs) }
}

impl<T: Copy> From<(T, T, T)> for Vec3D<T> {
    fn from(tuple: (T, T, T)) -> Self { Self::new(tuple.0, tuple.1, tuple.2) }
}

impl<T: Copy> From<[T; 3]> for Vec3D<T> {
    fn from(arr: [T; 3]) -> Self { Self::new(arr[0], arr[1], arr[2]) }
}

impl<T: Display> Display for Vec3D<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(prec) = f.precision() {
            write!(f, "[{:.prec$}, {:.prec$}, {:.prec$}]", self.x, self.y, self.z)
        } else {
            write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
        }
    }
}
