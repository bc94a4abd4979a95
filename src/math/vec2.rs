use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// Returned by [`Vec2::try_unit`] when the vector has no direction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ZeroMagnitude;

impl fmt::Display for ZeroMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot normalize a zero-length vector")
    }
}

impl std::error::Error for ZeroMagnitude {}

/// Plain 2D value type. Every operation returns a new vector.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// `self / self.length()`. A zero vector yields NaN components.
    #[inline]
    pub fn unit(self) -> Self {
        self / self.length()
    }

    /// Checked [`unit`](Self::unit).
    #[inline]
    pub fn try_unit(self) -> Result<Self, ZeroMagnitude> {
        let unit = self.unit();
        if unit.is_finite() {
            Ok(unit)
        } else {
            Err(ZeroMagnitude)
        }
    }

    /// Counter-clockwise perpendicular, `(-y, x)`.
    #[inline]
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    #[inline]
    pub fn comp_mul(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self * rhs.x, self * rhs.y)
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}
