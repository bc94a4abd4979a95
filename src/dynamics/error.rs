use core::fmt;

use crate::dynamics::BodyHandle;
use crate::math::Vec2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum WorldError {
    /// Fewer than three sides.
    InvalidShape { sides: u32 },
    /// Mass must be finite and strictly positive.
    InvalidMass(f32),
    /// Half-extent components must be finite and strictly positive.
    InvalidExtent(Vec2),
    UnknownBody(BodyHandle),
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::InvalidShape { sides } => {
                write!(f, "a polygon needs at least 3 sides, got {sides}")
            }
            WorldError::InvalidMass(mass) => write!(f, "mass must be positive, got {mass}"),
            WorldError::InvalidExtent(h) => {
                write!(f, "half-extent must be positive, got ({}, {})", h.x, h.y)
            }
            WorldError::UnknownBody(h) => {
                write!(f, "no body with handle {} (generation {})", h.index, h.generation)
            }
        }
    }
}

impl std::error::Error for WorldError {}
