//! Run configuration, loadable from a RON file
//!
//! Everything here is tuning, not semantics: the defaults reproduce the
//! classic tank (4x4x4, a few cod, one shark, periodic food drops).

use std::path::Path;

use anyhow::Context;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use vivarium_creature::SteeringParams;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Tank edge lengths
    pub tank_dimensions: Vec3,
    pub cod_count: usize,
    pub shark_count: usize,
    /// Uniform model scales; species are authored large and shrunk to fit
    pub cod_scale: f32,
    pub shark_scale: f32,
    pub food_scale: f32,
    /// Drop one food pellet every this many ticks; 0 disables drops
    pub food_interval: u64,
    pub steering: SteeringParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            tank_dimensions: Vec3::new(4.0, 4.0, 4.0),
            cod_count: 3,
            shark_count: 1,
            cod_scale: 0.25,
            shark_scale: 0.4,
            food_scale: 0.1,
            food_interval: 50,
            steering: SteeringParams::default(),
        }
    }
}

impl SimConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let config = ron::from_str(&contents)
            .with_context(|| format!("parsing config from {}", path.display()))?;
        Ok(config)
    }

    pub fn to_ron_pretty(&self) -> anyhow::Result<String> {
        let ron = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        Ok(ron)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_ron_round_trip() {
        let config = SimConfig {
            cod_count: 7,
            food_interval: 0,
            ..SimConfig::default()
        };
        let ron = config.to_ron_pretty().unwrap();
        let parsed: SimConfig = ron::from_str(&ron).unwrap();
        assert_eq!(parsed.cod_count, 7);
        assert_eq!(parsed.food_interval, 0);
        assert_eq!(parsed.tank_dimensions, config.tank_dimensions);
    }
}
