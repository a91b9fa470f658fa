use crate::core::polygon::Polygon;
use crate::pipeline::shaders::{PolygonShader, ShadeOutcome};
use crate::pipeline::stats::ShadingStats;
use crate::scene::environment::Environment;
use crate::scene::scene_object::SceneObject;
use log::debug;
use nalgebra::Vector3;
use rayon::prelude::*;
use std::time::Instant;

/// What one shaded object looks like to the rasterizer.
#[derive(Debug, Clone)]
pub struct ObjectSummary {
    pub name: String,
    pub polygons: usize,
    pub sorted: usize,
    pub interpolated: usize,
    pub mean_color: Vector3<f64>,
}

/// One frame's shading pass over a fixed environment.
///
/// Polygons are disjoint and shaders and environment are only read, so
/// polygons are shaded in parallel.
pub struct ShadingPass<'a> {
    pub environment: &'a Environment,
    stats: Option<&'a ShadingStats>,
}

impl<'a> ShadingPass<'a> {
    pub fn new(environment: &'a Environment) -> Self {
        Self {
            environment,
            stats: None,
        }
    }

    pub fn with_stats(mut self, stats: &'a ShadingStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn shade_polygon(
        &self,
        shader: &PolygonShader,
        polygon: &mut Polygon,
        vertex_colors: bool,
    ) -> ShadeOutcome {
        let outcome = shader.shade_polygon(polygon, self.environment, vertex_colors);
        if let Some(stats) = self.stats {
            stats.record_polygon(polygon.vertex_count(), outcome.needs_sorting);
        }
        outcome
    }

    pub fn shade_polygons(
        &self,
        shader: &PolygonShader,
        polygons: &mut [Polygon],
        vertex_colors: bool,
    ) -> Vec<ShadeOutcome> {
        let start = Instant::now();
        let outcomes = polygons
            .par_iter_mut()
            .map(|polygon| self.shade_polygon(shader, polygon, vertex_colors))
            .collect();
        if let Some(stats) = self.stats {
            stats.record_elapsed(start.elapsed());
        }
        outcomes
    }

    pub fn shade_object(&self, object: &mut SceneObject) -> ObjectSummary {
        let outcomes = self.shade_polygons(&object.shader, &mut object.polygons, object.vertex_colors);

        let sorted = outcomes.iter().filter(|o| o.needs_sorting).count();
        let interpolated = outcomes.iter().filter(|o| o.interpolate_color).count();
        let vertex_count: usize = object.polygons.iter().map(Polygon::vertex_count).sum();
        let color_sum = object
            .polygons
            .iter()
            .flat_map(|p| p.vertices().iter())
            .fold(Vector3::zeros(), |acc, v| acc + v.color());
        let mean_color = if vertex_count > 0 {
            color_sum / vertex_count as f64
        } else {
            Vector3::zeros()
        };

        debug!(
            "Shaded '{}': {} polygons ({} sorted, {} interpolated)",
            object.name,
            object.polygons.len(),
            sorted,
            interpolated
        );

        ObjectSummary {
            name: object.name.clone(),
            polygons: object.polygons.len(),
            sorted,
            interpolated,
            mean_color,
        }
    }

    pub fn shade_objects(&self, objects: &mut [SceneObject]) -> Vec<ObjectSummary> {
        objects.iter_mut().map(|o| self.shade_object(o)).collect()
    }
}
