pub mod body;
pub mod error;
pub mod shape;
pub mod world;

pub use body::{Body, BodyDef};
pub use error::WorldError;
pub use shape::Polygon;
pub use world::{BodyHandle, World, WorldConfig, bodies_two_mut, exchange_impulse};
