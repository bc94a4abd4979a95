//! Convex polygon bodies bouncing around a bounded 2D arena.
//!
//! Bodies fall under gravity and reflect off the arena walls. Overlapping pairs are found with the
//! separating axis test and exchange an elastic impulse once per contact episode.

pub mod collision;
pub mod dynamics;
pub mod math;

pub use collision::{ContactState, MtvSelection, PairKey, SatResult};
pub use dynamics::{Body, BodyDef, BodyHandle, World, WorldConfig, WorldError};
pub use math::Vec2;
