use core::ops::Mul;

use crate::math::Vec2;

/// Column-major 2x2 matrix. Only rotations are built here.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Mat22 {
    pub col1: Vec2,
    pub col2: Vec2,
}

impl Mat22 {
    #[inline]
    pub const fn new(col1: Vec2, col2: Vec2) -> Self {
        Self { col1, col2 }
    }

    #[inline]
    pub fn from_angle(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self::new(Vec2::new(c, s), Vec2::new(-s, c))
    }
}

impl Mul<Vec2> for Mat22 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: Vec2) -> Vec2 {
        self.col1 * rhs.x + self.col2 * rhs.y
    }
}
