use crate::math::{DEG_TO_RAD, Mat22, Vec2};

/// Regular N-gon inscribed in an ellipse of the given half-extent.
///
/// Vertices are kept on the unit circle and only stretched onto the half-extent when asked for,
/// so spinning a non-square shape keeps it inside its bounding box.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    sides: u32,
    half_extent: Vec2,
    unit: Vec<Vec2>,
}

impl Polygon {
    /// `sides` and `half_extent` are not validated here; see `BodyDef::validate`.
    pub fn regular(sides: u32, half_extent: Vec2) -> Self {
        let step = 360.0 / sides as f32;
        let start = 90.0 - step / 2.0;

        let unit = (0..sides)
            .map(|k| {
                let a = (start + step * k as f32) * DEG_TO_RAD;
                Vec2::new(a.cos(), a.sin())
            })
            .collect();

        Self {
            sides,
            half_extent,
            unit,
        }
    }

    #[inline]
    pub fn sides(&self) -> u32 {
        self.sides
    }

    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        self.half_extent
    }

    /// Local-frame vertices, counter-clockwise, spun by `rotation` radians.
    pub fn vertices_at(&self, rotation: f32) -> Vec<Vec2> {
        let r = Mat22::from_angle(rotation);
        self.unit
            .iter()
            .map(|&u| (r * u).comp_mul(self.half_extent))
            .collect()
    }
}
