use crate::error::Result;
use crate::io::config::Config;
use clap::Parser;
use log::info;

/// Headless shading of a TOML-described scene.
#[derive(Parser, Debug, Default)]
#[command(name = "softshade")]
#[command(about = "Shades the polygons of a TOML-described scene and reports statistics")]
pub struct Cli {
    /// Scene configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Force constant (unlit) shading
    #[arg(long)]
    pub no_lighting: bool,

    /// Shade with mesh vertex colors where available
    #[arg(long)]
    pub vertex_colors: bool,

    /// Worker threads for the shading pass
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,
}

impl Cli {
    /// Loads the configuration (or the built-in default) and applies flag overrides.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading configuration: {}", path);
                Config::load(path)?
            }
            None => {
                info!("No configuration given, using defaults");
                Config::default()
            }
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut Config) {
        if self.no_lighting {
            config.render.lighting = false;
        }
        if self.vertex_colors {
            config.render.vertex_colors = true;
        }
        if self.threads.is_some() {
            config.render.threads = self.threads;
        }
    }
}
