pub mod mat22;
pub mod utils;
pub mod vec2;

pub use mat22::Mat22;
pub use utils::{DEG_TO_RAD, clamp, random_range};
pub use vec2::{Vec2, ZeroMagnitude};
