use crate::error::Result;
use crate::io::config::Config;
use crate::pipeline::renderer::{ObjectSummary, ShadingPass};
use crate::pipeline::stats::{ShadingStats, StatsSnapshot};
use crate::scene::loader::init_shading_context;
use log::{debug, info, warn};
use std::time::Instant;

/// Result of a headless shading run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub objects: Vec<ObjectSummary>,
    pub stats: StatsSnapshot,
}

/// Loads the scene described by `config`, shades every object once and
/// logs a per-object summary.
pub fn run_cli(config: &Config) -> Result<RunReport> {
    info!("Starting headless shading...");
    let start_time = Instant::now();

    let mut context = init_shading_context(config)?;
    info!(
        "Loaded {} objects ({} polygons) in {:.2?}",
        context.objects.len(),
        context.polygon_count(),
        start_time.elapsed()
    );
    if context.hints.lighting_enabled && context.environment.light_count() == 0 {
        warn!("Lighting is enabled but the scene has no lights; lit surfaces will be black.");
    }

    let stats = ShadingStats::new();
    let environment = &context.environment;
    let scene_objects = &mut context.objects;
    let mut shade = || ShadingPass::new(environment).with_stats(&stats).shade_objects(scene_objects);

    let objects = match config.render.threads {
        Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => {
                debug!("Shading on {} worker threads", threads);
                pool.install(shade)
            }
            Err(e) => {
                warn!("Could not build a {}-thread pool ({}); using the global pool.", threads, e);
                shade()
            }
        },
        None => shade(),
    };

    for summary in &objects {
        info!(
            "  {}: {} polygons, {} need sorting, mean color ({:.3}, {:.3}, {:.3})",
            summary.name,
            summary.polygons,
            summary.sorted,
            summary.mean_color.x,
            summary.mean_color.y,
            summary.mean_color.z
        );
    }

    let snapshot = stats.snapshot();
    info!(
        "Shaded {} polygons / {} vertices in {:.4}s ({:.0} polygons/s)",
        snapshot.polygons,
        snapshot.vertices,
        snapshot.seconds,
        snapshot.polygons_per_second()
    );
    info!("Done in {:.2?}", start_time.elapsed());

    Ok(RunReport {
        objects,
        stats: snapshot,
    })
}
