use crate::collision::{ContactState, ContactTable, MtvSelection, PairKey, SatParams, sat_test};
use crate::dynamics::{Body, BodyDef, WorldError};
use crate::math::{Vec2, ZeroMagnitude};

/// Index into the world's body list, tagged with the world generation it was issued in.
/// [`World::clear`] bumps the generation, so older handles stop resolving.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct BodyHandle {
    pub index: usize,
    pub generation: u32,
}

impl BodyHandle {
    #[inline]
    pub const fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WorldConfig {
    /// Downward acceleration. Screen coordinates: +y points down.
    pub gravity: f32,
    pub restitution: f32,
    /// Length of every SAT translation candidate.
    pub push_distance: f32,
    /// Arena size; the top-left corner is the origin.
    pub arena: Vec2,
    /// Cosmetic spin given to new bodies, in radians per second.
    pub angular_rate: f32,
    pub mtv_selection: MtvSelection,
    /// Skip the impulse when the pair has no relative velocity instead of writing NaN velocities.
    pub skip_zero_relative_velocity: bool,
    /// Push newly colliding pairs apart along the MTV.
    pub position_correction: bool,
    /// `v += a * dt` when set, otherwise `v += a` once per tick.
    pub scale_gravity_by_dt: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: 4.0,
            restitution: 1.0,
            push_distance: 35.0,
            arena: Vec2::new(650.0, 550.0),
            angular_rate: core::f32::consts::PI,
            mtv_selection: MtvSelection::Smallest,
            skip_zero_relative_velocity: true,
            position_correction: false,
            scale_gravity_by_dt: true,
        }
    }
}

impl WorldConfig {
    fn sat_params(&self) -> SatParams {
        SatParams {
            push_distance: self.push_distance,
            selection: self.mtv_selection,
        }
    }
}

#[derive(Default)]
pub struct World {
    pub config: WorldConfig,
    bodies: Vec<Body>,
    contacts: ContactTable,
    generation: u32,
}

impl World {
    #[inline]
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            bodies: Vec::new(),
            contacts: ContactTable::new(),
            generation: 0,
        }
    }

    #[inline]
    fn handle(&self, index: usize) -> BodyHandle {
        BodyHandle::new(index, self.generation)
    }

    fn slot(&self, h: BodyHandle) -> Result<usize, WorldError> {
        if h.generation == self.generation && h.index < self.bodies.len() {
            Ok(h.index)
        } else {
            Err(WorldError::UnknownBody(h))
        }
    }

    pub fn create_body(&mut self, def: BodyDef) -> Result<BodyHandle, WorldError> {
        def.validate()?;

        let id = self.bodies.len();
        self.bodies.push(Body::from_def(def, self.config.angular_rate));
        log::debug!(
            "spawned body {id}: {} sides, mass {}, at {:?}",
            def.sides,
            def.mass,
            def.position
        );
        Ok(self.handle(id))
    }

    pub fn body(&self, h: BodyHandle) -> Option<&Body> {
        self.slot(h).ok().map(|i| &self.bodies[i])
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (self.handle(i), b))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// A fixed body skips gravity and the walls, and is immovable in collisions. Its stored
    /// velocity is kept for when it is released, but collisions see it as at rest.
    pub fn set_fixed(&mut self, h: BodyHandle, fixed: bool) -> Result<(), WorldError> {
        let i = self.slot(h)?;
        let body = &mut self.bodies[i];
        if body.fixed != fixed {
            log::debug!("body {i} fixed = {fixed}");
        }
        body.fixed = fixed;
        Ok(())
    }

    /// Moves a body without touching its velocity. Meant for holding fixed bodies in place.
    pub fn anchor(&mut self, h: BodyHandle, position: Vec2) -> Result<(), WorldError> {
        let i = self.slot(h)?;
        self.bodies[i].position = position;
        Ok(())
    }

    pub fn contact_state(&self, a: BodyHandle, b: BodyHandle) -> ContactState {
        self.contacts.state(PairKey::new(a, b))
    }

    /// Drops every body and contact. Handles issued before the call no longer resolve.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.contacts.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Advances one fixed tick: integrate every body, then resolve pairwise collisions.
    pub fn step(&mut self, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            log::debug!("ignoring step with dt = {dt}");
            return;
        }

        self.integrate(dt);
        self.resolve_collisions();
    }

    pub fn integrate(&mut self, dt: f32) {
        let config = &self.config;
        for b in self.bodies.iter_mut() {
            b.integrate(dt, config);
        }
    }

    /// Checks each unordered pair once. A pair receives at most one impulse per contact episode;
    /// the episode ends the first time the pair is seen apart.
    pub fn resolve_collisions(&mut self) {
        let params = self.config.sat_params();

        let mut verts: Vec<Vec<Vec2>> = self.bodies.iter().map(Body::world_vertices).collect();

        let n = self.bodies.len();
        for i in 0..n {
            let bi = self.handle(i);
            for j in i + 1..n {
                let bj = self.handle(j);
                let key = PairKey::new(bi, bj);

                if self.bodies[i].fixed && self.bodies[j].fixed {
                    self.contacts.mark_separated(key);
                    continue;
                }

                let result = sat_test(&verts[i], &verts[j], &params);

                if !result.colliding {
                    self.contacts.mark_separated(key);
                    continue;
                }

                if !self.contacts.mark_resolved(key) {
                    continue;
                }
                log::debug!("contact episode started between {i} and {j}");

                let (a, b) = bodies_two_mut(&mut self.bodies, bi, bj);

                if self.config.position_correction {
                    separate(a, b, result.mtv, self.config.arena);
                    verts[i] = a.world_vertices();
                    verts[j] = b.world_vertices();
                }

                match exchange_impulse(a, b, &self.config) {
                    Ok(impulse) => log::trace!("pair ({i}, {j}) impulse {impulse:?}"),
                    Err(ZeroMagnitude) => {
                        log::warn!("pair ({i}, {j}) has no relative velocity, impulse skipped")
                    }
                }
            }
        }
    }
}

/// Elastic impulse along the relative velocity direction. Returns the impulse applied.
pub fn exchange_impulse(
    a: &mut Body,
    b: &mut Body,
    config: &WorldConfig,
) -> Result<Vec2, ZeroMagnitude> {
    let relative = a.effective_velocity() - b.effective_velocity();
    let dir = if config.skip_zero_relative_velocity {
        relative.try_unit()?
    } else {
        relative.unit()
    };

    let inv_a = a.effective_inv_mass();
    let inv_b = b.effective_inv_mass();

    let impulse = dir * (relative.dot(dir) * (1.0 + config.restitution) / (inv_a + inv_b));

    a.velocity = a.velocity - impulse * inv_a;
    b.velocity = b.velocity + impulse * inv_b;

    Ok(impulse)
}

/// Splits `mtv` between the pair by inverse mass, pushing `a` away from `b`. Free bodies are
/// clamped back into the arena afterwards.
fn separate(a: &mut Body, b: &mut Body, mtv: Vec2, arena: Vec2) {
    let inv_a = a.effective_inv_mass();
    let inv_b = b.effective_inv_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum == 0.0 || mtv == Vec2::ZERO {
        return;
    }

    let push = if (a.position - b.position).dot(mtv) < 0.0 {
        -mtv
    } else {
        mtv
    };

    a.position = a.position + push * (inv_a / inv_sum);
    b.position = b.position - push * (inv_b / inv_sum);

    for body in [a, b] {
        if !body.fixed {
            body.clamp_to_arena(arena);
        }
    }
}

pub fn bodies_two_mut(bodies: &mut [Body], a: BodyHandle, b: BodyHandle) -> (&mut Body, &mut Body) {
    assert!(a.index != b.index, "bodies_two_mut called with identical handles");

    let (i, j) = if a.index <= b.index { (a.index, b.index) } else { (b.index, a.index) };
    let (left, right) = bodies.split_at_mut(j);
    let bi = &mut left[i];
    let bj = &mut right[0];

    if a.index < b.index { (bi, bj) } else { (bj, bi) }
}
