use crate::math::Vec2;

/// Relative slack on squared lengths under which two candidates are treated as equally short.
pub const MTV_TIE_TOLERANCE: f32 = 1e-4;

/// Which translation candidate `sat_test` reports as the MTV.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum MtvSelection {
    /// Shortest candidate. Lengths within `MTV_TIE_TOLERANCE` of the shortest count as ties, and
    /// ties keep the earliest axis.
    #[default]
    Smallest,
    /// Candidate from the first axis tested (edges of `a` come first).
    FirstAxis,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SatParams {
    /// Length every translation candidate is scaled to.
    pub push_distance: f32,
    pub selection: MtvSelection,
}

impl Default for SatParams {
    fn default() -> Self {
        Self {
            push_distance: 35.0,
            selection: MtvSelection::Smallest,
        }
    }
}

/// Outcome of a separating axis test.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SatResult {
    pub colliding: bool,
    /// Points along the chosen edge normal (not oriented between the bodies). Zero when separated.
    pub mtv: Vec2,
}

impl SatResult {
    #[inline]
    pub const fn separated() -> Self {
        Self {
            colliding: false,
            mtv: Vec2::ZERO,
        }
    }
}

/// Closed projection interval on an axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Touching intervals count as overlapping.
    #[inline]
    pub fn overlaps(self, other: Interval) -> bool {
        !(self.max < other.min || other.max < self.min)
    }
}

/// Unnormalized normal of each edge `i -> (i + 1) % n`.
pub fn edge_normals(vertices: &[Vec2]) -> impl Iterator<Item = Vec2> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| (vertices[(i + 1) % n] - vertices[i]).perp())
}

pub fn project(axis: Vec2, vertices: &[Vec2]) -> Interval {
    vertices.iter().fold(
        Interval {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
        },
        |acc, &v| {
            let p = axis.dot(v);
            Interval {
                min: acc.min.min(p),
                max: acc.max.max(p),
            }
        },
    )
}

/// Tests two convex polygons, given as world-space vertex loops, for overlap.
///
/// Every edge normal of both polygons is a candidate separating axis; the first axis whose
/// projections are disjoint ends the test. When none is found, each axis contributes a translation
/// candidate: the axis scaled by `|max_b - min_a|`, normalized, then stretched to
/// `params.push_distance`. This is a cheap approximation, not the exact penetration depth.
/// Candidates that cannot be normalized (zero-length edge, zero overlap) are dropped; if all of them
/// are, the MTV is zero.
pub fn sat_test(a: &[Vec2], b: &[Vec2], params: &SatParams) -> SatResult {
    if a.is_empty() || b.is_empty() {
        return SatResult::separated();
    }

    let mut candidates = Vec::with_capacity(a.len() + b.len());

    for axis in edge_normals(a).chain(edge_normals(b)) {
        let pa = project(axis, a);
        let pb = project(axis, b);
        if !pa.overlaps(pb) {
            return SatResult::separated();
        }

        let overlap = (pb.max - pa.min).abs();
        match (axis * overlap).try_unit() {
            Ok(dir) => candidates.push(dir * params.push_distance),
            Err(e) => log::trace!("dropping translation candidate on axis {axis:?}: {e}"),
        }
    }

    let mtv = match params.selection {
        MtvSelection::FirstAxis => candidates.first().copied(),
        MtvSelection::Smallest => {
            let shortest = candidates
                .iter()
                .map(|c| c.length_squared())
                .fold(f32::INFINITY, f32::min);
            candidates
                .iter()
                .copied()
                .find(|c| c.length_squared() <= shortest * (1.0 + MTV_TIE_TOLERANCE))
        }
    };

    SatResult {
        colliding: true,
        mtv: mtv.unwrap_or(Vec2::ZERO),
    }
}
