use rand::Rng;

pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;

/// Clamp that tolerates `lo > hi` (returns `lo`), unlike `f32::clamp` which panics.
#[inline]
pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    if x < lo {
        return lo;
    }
    if x > hi {
        return hi;
    }
    x
}

/// Random number in [lo, hi)
#[inline]
pub fn random_range(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return lo;
    }
    rng.gen_range(lo..hi)
}
