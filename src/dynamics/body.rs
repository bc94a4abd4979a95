use rand::Rng;

use crate::dynamics::shape::Polygon;
use crate::dynamics::{WorldConfig, WorldError};
use crate::math::{Vec2, clamp, random_range};

#[derive(Copy, Clone, Debug)]
pub struct BodyDef {
    pub sides: u32,
    pub half_extent: Vec2,
    pub mass: f32,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Opaque to the simulation; carried for the renderer.
    pub color: u32,
}

impl Default for BodyDef {
    fn default() -> Self {
        Self {
            sides: 4,
            half_extent: Vec2::new(40.0, 40.0),
            mass: 100.0,
            position: Vec2::new(0.0, 0.0),
            velocity: Vec2::new(0.0, 0.0),
            color: 0xFF0000,
        }
    }
}

impl BodyDef {
    /// A body dropped in near the top of the default arena with a random mass and sideways throw.
    pub fn random(rng: &mut impl Rng, sides: u32) -> Self {
        Self {
            sides,
            half_extent: Vec2::new(40.0, 40.0),
            mass: random_range(rng, 50.0, 1000.0).floor(),
            position: Vec2::new(random_range(rng, 70.0, 500.0).floor(), 20.0),
            velocity: Vec2::new(random_range(rng, -300.0, 300.0).floor(), 0.0),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), WorldError> {
        if self.sides < 3 {
            return Err(WorldError::InvalidShape { sides: self.sides });
        }
        let h = self.half_extent;
        if !(h.is_finite() && h.x > 0.0 && h.y > 0.0) {
            return Err(WorldError::InvalidExtent(h));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(WorldError::InvalidMass(self.mass));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Body {
    pub(crate) shape: Polygon,
    /// Local-frame silhouette at the current cosmetic rotation.
    pub(crate) vertices: Vec<Vec2>,

    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,

    pub(crate) mass: f32,
    pub(crate) inv_mass: f32,
    pub(crate) fixed: bool,

    /// Presentation only; never feeds back into the dynamics.
    pub(crate) rotation: f32,
    pub(crate) angular_rate: f32,

    pub(crate) color: u32,
}

impl Body {
    /// `def` must already have passed [`BodyDef::validate`].
    pub(crate) fn from_def(def: BodyDef, angular_rate: f32) -> Self {
        debug_assert!(def.validate().is_ok());

        let shape = Polygon::regular(def.sides, def.half_extent);
        let vertices = shape.vertices_at(0.0);

        Self {
            shape,
            vertices,
            position: def.position,
            velocity: def.velocity,
            mass: def.mass,
            inv_mass: 1.0 / def.mass,
            fixed: false,
            rotation: 0.0,
            angular_rate,
            color: def.color,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Zero for fixed bodies, which collisions treat as immovable.
    #[inline]
    pub fn effective_inv_mass(&self) -> f32 {
        if self.fixed { 0.0 } else { self.inv_mass }
    }

    /// Velocity as collisions see it: a fixed body is at rest.
    #[inline]
    pub fn effective_velocity(&self) -> Vec2 {
        if self.fixed { Vec2::ZERO } else { self.velocity }
    }

    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        self.shape.half_extent()
    }

    #[inline]
    pub fn sides(&self) -> u32 {
        self.shape.sides()
    }

    #[inline]
    pub fn color(&self) -> u32 {
        self.color
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn world_vertices(&self) -> Vec<Vec2> {
        self.vertices.iter().map(|&v| v + self.position).collect()
    }

    /// One integrator step: refresh the silhouette, spin it, then (unless fixed) apply gravity,
    /// move, and keep the body inside the arena.
    pub(crate) fn integrate(&mut self, dt: f32, config: &WorldConfig) {
        self.vertices = self.shape.vertices_at(self.rotation);
        self.rotation += self.angular_rate * dt;

        if self.fixed {
            return;
        }

        let force = Vec2::new(0.0, self.mass * config.gravity);
        let acceleration = force * self.inv_mass;

        self.velocity = if config.scale_gravity_by_dt {
            self.velocity + acceleration * dt
        } else {
            self.velocity + acceleration
        };
        self.position = self.position + self.velocity * dt;

        if !self.position.is_finite() {
            log::warn!(
                "non-finite body position {:?} (velocity {:?}), resetting to origin",
                self.position,
                self.velocity
            );
            self.position = Vec2::ZERO;
            if !self.velocity.is_finite() {
                self.velocity = Vec2::ZERO;
            }
        }

        self.reflect_off_walls(config.arena);
        self.clamp_to_arena(config.arena);
    }

    /// Keeps the centre at least one half-extent away from every wall.
    pub(crate) fn clamp_to_arena(&mut self, arena: Vec2) {
        let h = self.half_extent();
        self.position = Vec2::new(
            clamp(self.position.x, h.x, arena.x - h.x),
            clamp(self.position.y, h.y, arena.y - h.y),
        );
    }

    fn reflect_off_walls(&mut self, arena: Vec2) {
        let h = self.half_extent();
        let (p, mut v) = (self.position, self.velocity);

        if (p.y >= arena.y - h.y && v.y > 0.0) || (p.y <= h.y && v.y < 0.0) {
            v = Vec2::new(v.x, -v.y);
        }
        if (p.x >= arena.x - h.x && v.x > 0.0) || (p.x <= h.x && v.x < 0.0) {
            v = Vec2::new(-v.x, v.y);
        }

        self.velocity = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn body_at(position: Vec2, velocity: Vec2) -> Body {
        Body::from_def(
            BodyDef {
                position,
                velocity,
                mass: 2.0,
                ..Default::default()
            },
            0.0,
        )
    }

    #[test]
    fn from_def_computes_inverse_mass() {
        let b = body_at(Vec2::new(100.0, 100.0), Vec2::ZERO);
        assert_relative_eq!(b.inv_mass, 0.5);
        assert_relative_eq!(b.effective_inv_mass(), 0.5);
        assert_eq!(b.vertices().len(), 4);
        assert!(!b.is_fixed());
    }

    #[test]
    fn fixed_body_has_zero_effective_inverse_mass() {
        let mut b = body_at(Vec2::new(100.0, 100.0), Vec2::ZERO);
        b.fixed = true;
        assert_relative_eq!(b.effective_inv_mass(), 0.0);
    }

    #[test]
    fn fixed_body_is_at_rest_for_collisions() {
        let mut b = body_at(Vec2::new(100.0, 100.0), Vec2::new(300.0, 0.0));
        assert_eq!(b.effective_velocity(), Vec2::new(300.0, 0.0));

        b.fixed = true;
        assert_eq!(b.effective_velocity(), Vec2::ZERO);
        assert_eq!(b.velocity(), Vec2::new(300.0, 0.0));
    }

    #[test]
    fn clamp_to_arena_pulls_body_back_inside() {
        let arena = Vec2::new(650.0, 550.0);
        let mut b = body_at(Vec2::new(-20.0, 527.5), Vec2::ZERO);
        b.clamp_to_arena(arena);
        assert_relative_eq!(b.position().x, 40.0);
        assert_relative_eq!(b.position().y, 510.0);
    }

    #[test]
    fn validate_rejects_bad_defs() {
        let two_sides = BodyDef {
            sides: 2,
            ..Default::default()
        };
        assert_eq!(two_sides.validate(), Err(WorldError::InvalidShape { sides: 2 }));

        let massless = BodyDef {
            mass: 0.0,
            ..Default::default()
        };
        assert_eq!(massless.validate(), Err(WorldError::InvalidMass(0.0)));

        let nan_mass = BodyDef {
            mass: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(nan_mass.validate(), Err(WorldError::InvalidMass(_))));

        let flat = BodyDef {
            half_extent: Vec2::new(10.0, 0.0),
            ..Default::default()
        };
        assert!(matches!(flat.validate(), Err(WorldError::InvalidExtent(_))));

        assert!(BodyDef::default().validate().is_ok());
    }

    #[test]
    fn random_def_stays_in_spawn_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let def = BodyDef::random(&mut rng, 5);
            assert!(def.validate().is_ok());
            assert!(def.mass >= 50.0 && def.mass < 1000.0);
            assert!(def.position.x >= 70.0 && def.position.x < 500.0);
            assert_relative_eq!(def.position.y, 20.0);
            assert!(def.velocity.x >= -300.0 && def.velocity.x < 300.0);
            assert_relative_eq!(def.velocity.y, 0.0);
        }
    }

    #[test]
    fn world_vertices_are_offset_by_position() {
        let b = body_at(Vec2::new(100.0, 50.0), Vec2::ZERO);
        for (local, world) in b.vertices().iter().zip(b.world_vertices()) {
            assert_eq!(*local + Vec2::new(100.0, 50.0), world);
        }
    }

    #[test]
    fn integrate_rotation_is_cosmetic() {
        let config = WorldConfig {
            gravity: 0.0,
            ..Default::default()
        };
        let mut b = Body::from_def(
            BodyDef {
                position: Vec2::new(300.0, 300.0),
                velocity: Vec2::new(10.0, 0.0),
                ..Default::default()
            },
            1.0,
        );
        b.integrate(0.5, &config);

        assert_relative_eq!(b.rotation(), 0.5);
        assert_relative_eq!(b.velocity().x, 10.0);
        assert_relative_eq!(b.velocity().y, 0.0);
        assert_relative_eq!(b.position().x, 305.0);
    }

    #[test]
    fn integrate_unscaled_gravity_ignores_dt() {
        let config = WorldConfig {
            scale_gravity_by_dt: false,
            ..Default::default()
        };
        let mut b = body_at(Vec2::new(300.0, 200.0), Vec2::ZERO);
        b.integrate(0.1, &config);
        assert_relative_eq!(b.velocity().y, config.gravity);
    }

    #[test]
    fn integrate_resets_non_finite_position() {
        let config = WorldConfig::default();
        let mut b = body_at(Vec2::new(f32::NAN, 100.0), Vec2::ZERO);
        b.integrate(0.1, &config);

        // Reset to origin, then clamped into the arena.
        let h = b.half_extent();
        assert_relative_eq!(b.position().x, h.x);
        assert_relative_eq!(b.position().y, h.y);
        assert!(b.velocity().is_finite());
    }

    #[test]
    fn reflect_flips_only_the_wall_axis() {
        let arena = Vec2::new(650.0, 550.0);
        let mut b = body_at(Vec2::new(300.0, 510.0), Vec2::new(3.0, 5.0));
        b.reflect_off_walls(arena);
        assert_relative_eq!(b.velocity().x, 3.0);
        assert_relative_eq!(b.velocity().y, -5.0);

        // Moving away from the wall is left alone.
        let mut b = body_at(Vec2::new(300.0, 510.0), Vec2::new(3.0, -5.0));
        b.reflect_off_walls(arena);
        assert_relative_eq!(b.velocity().y, -5.0);

        let mut b = body_at(Vec2::new(40.0, 300.0), Vec2::new(-3.0, 5.0));
        b.reflect_off_walls(arena);
        assert_relative_eq!(b.velocity().x, 3.0);
        assert_relative_eq!(b.velocity().y, 5.0);
    }
}
