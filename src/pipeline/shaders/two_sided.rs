use crate::core::polygon::Polygon;
use crate::pipeline::shaders::{PolygonShader, ShadeOutcome};
use crate::scene::environment::Environment;

/// Picks one of two polygon shaders per polygon depending on its facing.
#[derive(Debug, Clone)]
pub struct TwoSidedShader {
    pub front: Box<PolygonShader>,
    pub back: Box<PolygonShader>,
}

impl TwoSidedShader {
    pub fn new(front: PolygonShader, back: PolygonShader) -> Self {
        Self {
            front: Box::new(front),
            back: Box::new(back),
        }
    }

    /// Front-facing iff the first screen vertex lies on the non-negative side
    /// of the face normal `(v1 - v0) x (v[n-1] - v0)`.
    pub fn is_front_facing(polygon: &Polygon) -> bool {
        let n = polygon.vertex_count();
        let v0 = polygon.vertex(0).screen().xyz();
        let e1 = polygon.vertex(1).screen().xyz() - v0;
        let e2 = polygon.vertex(n - 1).screen().xyz() - v0;
        v0.dot(&e1.cross(&e2)) >= 0.0
    }

    /// Delegates to the chosen side. The reported flags stay false whatever
    /// that side decided; the polygon metadata is the side's own.
    pub fn shade_polygon(
        &self,
        polygon: &mut Polygon,
        environment: &Environment,
        vertex_colors: bool,
    ) -> ShadeOutcome {
        let side = if Self::is_front_facing(polygon) {
            &self.front
        } else {
            &self.back
        };
        side.shade_polygon(polygon, environment, vertex_colors);
        ShadeOutcome {
            interpolate_color: self.interpolate_color(),
            needs_sorting: self.needs_sorting(),
        }
    }

    /// Facing changes per polygon, so no single interpolation policy holds.
    pub fn interpolate_color(&self) -> bool {
        false
    }

    // Two-sided materials are treated as opaque, even with translucent sides.
    pub fn needs_sorting(&self) -> bool {
        false
    }
}
