use crate::config::ConfigurationError;
use crate::estimation::Vec3D;
use strum_macros::{Display, EnumIter};

/// One of the six canonical body axis directions a photodiode can face.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, EnumIter, Display)]
pub enum Axis {
    #[strum(to_string = "+X")]
    PosX,
    #[strum(to_string = "-X")]
    NegX,
    #[strum(to_string = "+Y")]
    PosY,
    #[strum(to_string = "-Y")]
    NegY,
    #[strum(to_string = "+Z")]
    PosZ,
    #[strum(to_string = "-Z")]
    NegZ,
}

impl Axis {
    pub const COUNT: usize = 6;

    /// Position of this direction in snapshot storage.
    pub const fn slot(self) -> usize { self as usize }

    /// Index of the body axis (0 = x, 1 = y, 2 = z).
    pub const fn dimension(self) -> usize { self.slot() / 2 }

    pub const fn is_positive(self) -> bool { self.slot() % 2 == 0 }

    pub const fn opposite(self) -> Self {
        match self {
            Axis::PosX => Axis::NegX,
            Axis::NegX => Axis::PosX,
            Axis::PosY => Axis::NegY,
            Axis::NegY => Axis::PosY,
            Axis::PosZ => Axis::NegZ,
            Axis::NegZ => Axis::PosZ,
        }
    }

    /// The positive and negative direction along body dimension `dim`.
    pub const fn pair(dim: usize) -> (Self, Self) {
        match dim {
            0 => (Axis::PosX, Axis::NegX),
            1 => (Axis::PosY, Axis::NegY),
            _ => (Axis::PosZ, Axis::NegZ),
        }
    }

    pub const fn components(self) -> [i8; 3] {
        let sign = if self.is_positive() { 1 } else { -1 };
        let mut comp = [0; 3];
        comp[self.dimension()] = sign;
        comp
    }

    pub fn unit_vector(self) -> Vec3D<f64> {
        let [x, y, z] = self.components();
        Vec3D::new(f64::from(x), f64::from(y), f64::from(z))
    }
}

impl TryFrom<[i8; 3]> for Axis {
    type Error = ConfigurationError;

    fn try_from(value: [i8; 3]) -> Result<Self, Self::Error> {
        match value {
            [1, 0, 0] => Ok(Axis::PosX),
            [-1, 0, 0] => Ok(Axis::NegX),
            [0, 1, 0] => Ok(Axis::PosY),
            [0, -1, 0] => Ok(Axis::NegY),
            [0, 0, 1] => Ok(Axis::PosZ),
            [0, 0, -1] => Ok(Axis::NegZ),
            _ => Err(ConfigurationError::InvalidMountVector(value)),
        }
    }
}
