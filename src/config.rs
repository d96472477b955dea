use crate::engine::choreo::{Choreographer, EntityConfig, Orientation, Settle};
use crate::engine::curve::Curve;
use crate::engine::math::Vec2;
use crate::engine::spring::{Spring, SpringParams};
use crate::engine::zone::ZoneTable;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub demo: DemoConfig,

    #[serde(default = "default_track")]
    pub track: TrackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Seconds the simulated scroll takes to ramp from 0 to 1.
    pub ramp_secs: f32,
    pub fps_cap: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            ramp_secs: 6.0,
            fps_cap: 60,
        }
    }
}

/// Static authoring of one animated track: geometry, smoothing, zones
/// and the entities that move along it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackConfig {
    /// SVG path data (`M`/`L`/`H`/`V`/`Q`/`C`/`Z`) for the course.
    pub path: String,

    /// Fraction of raw progress consumed before the track activates.
    #[serde(default)]
    pub window_start: f32,

    #[serde(default)]
    pub spring: SpringParams,

    /// Ordered (upper bound, label) pairs; empty means no zone readout.
    #[serde(default)]
    pub zones: Vec<ZoneEntry>,

    pub entities: Vec<EntityEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneEntry {
    pub bound: f32,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityEntry {
    pub name: String,

    #[serde(default)]
    pub arc_offset: f32,

    /// Degrees of spin per unit progress. When set the entity spins
    /// instead of facing along the curve.
    #[serde(default)]
    pub spin: Option<f32>,

    /// Arc-length lookahead for the tangent heading.
    #[serde(default = "default_lookahead")]
    pub lookahead: f32,

    #[serde(default)]
    pub settle: Option<SettleEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettleEntry {
    pub threshold: f32,
    pub x: f32,
    pub y: f32,
}

fn default_track() -> TrackConfig {
    crate::tracks::mission::track()
}

fn default_lookahead() -> f32 {
    1.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            demo: DemoConfig::default(),
            track: default_track(),
        }
    }
}

impl TrackConfig {
    /// Validates the static configuration and builds the runtime
    /// choreographer. Geometry and zone-table mistakes surface here,
    /// once, instead of per tick.
    pub fn build(&self) -> Result<Choreographer> {
        let curve = Curve::parse(&self.path).context("parsing track path")?;

        let entities = self
            .entities
            .iter()
            .map(|entry| {
                let orientation = match entry.spin {
                    Some(rate) => Orientation::Spin { rate },
                    None => Orientation::Heading {
                        lookahead: entry.lookahead,
                    },
                };
                EntityConfig {
                    name: entry.name.clone(),
                    arc_offset: entry.arc_offset,
                    orientation,
                    settle: entry.settle.as_ref().map(|s| Settle {
                        threshold: s.threshold,
                        point: Vec2::new(s.x, s.y),
                    }),
                }
            })
            .collect();

        let mut choreo = Choreographer::new(curve, Spring::new(self.spring), entities)
            .with_window(self.window_start);

        if !self.zones.is_empty() {
            let table = ZoneTable::new(
                self.zones
                    .iter()
                    .map(|z| (z.bound, z.label.clone()))
                    .collect(),
            )
            .context("invalid zone table")?;
            choreo = choreo.with_zones(table);
        }

        Ok(choreo)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        let config_path = config_dir.join("trackbot").join("config.toml");

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("parsing config from {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        let config_dir = config_dir.join("trackbot");
        std::fs::create_dir_all(&config_dir)?;

        let config_path = config_dir.join("config.toml");
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, contents)?;

        Ok(())
    }
}
