use std::path::Path;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Errors from loading or validating a [`WorldConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{field} range is empty: min {min} > max {max}")]
    EmptyRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
    #[error("radius.min must be positive")]
    NonPositiveRadius,
    #[error("boundary {width}x{height} cannot hold a body of diameter {max_diameter}")]
    BoundaryTooSmall {
        width: f64,
        height: f64,
        max_diameter: f64,
    },
}

/// The rectangle bodies are confined to. The near edges sit at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub width: f64,
    pub height: f64,
}

impl Boundary {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether a bounding box of `diameter` fits inside the boundary at all.
    pub fn fits(&self, diameter: f64) -> bool {
        self.width >= diameter && self.height >= diameter
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Self::new(1200.0, 650.0)
    }
}

/// Inclusive integer range sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: u32,
    pub max: u32,
}

impl IntRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Draw a value in `[min, max]`. The range must be non-empty.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.random_range(self.min..=self.max)
    }

    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::EmptyRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Simulation parameters. Replaces process-wide constants so tests can vary
/// the boundary and ranges freely.
///
/// Missing fields fall back to the defaults, so a YAML file may specify only
/// what it changes:
///
/// ```yaml
/// boundary: { width: 800.0, height: 600.0 }
/// body_count: { min: 30, max: 30 }
/// seed: 42
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub boundary: Boundary,
    /// Number of bodies, picked once per run.
    pub body_count: IntRange,
    /// Body radius in boundary units. Mass equals radius.
    pub radius: IntRange,
    /// Per-axis speed in boundary units per tick.
    pub speed: IntRange,
    /// Fixed RNG seed. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            boundary: Boundary::default(),
            body_count: IntRange::new(20, 50),
            radius: IntRange::new(5, 20),
            speed: IntRange::new(1, 4),
            seed: None,
        }
    }
}

impl WorldConfig {
    /// Check that every range is non-empty and the boundary can hold the
    /// largest body.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.body_count.check("body_count")?;
        self.radius.check("radius")?;
        self.speed.check("speed")?;
        if self.radius.min == 0 {
            return Err(ConfigError::NonPositiveRadius);
        }
        let max_diameter = 2.0 * f64::from(self.radius.max);
        if !self.boundary.fits(max_diameter) {
            return Err(ConfigError::BoundaryTooSmall {
                width: self.boundary.width,
                height: self.boundary.height,
                max_diameter,
            });
        }
        Ok(())
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&data)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Build the run's RNG. Returns the seed actually used so a run drawn
    /// from entropy can still be reproduced.
    pub fn seeded_rng(&self) -> (u64, SmallRng) {
        let seed = self.seed.unwrap_or_else(rand::random);
        (seed, SmallRng::seed_from_u64(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_classic_box() {
        let config = WorldConfig::default();
        assert_eq!(config.boundary, Boundary::new(1200.0, 650.0));
        assert_eq!(config.body_count, IntRange::new(20, 50));
        assert_eq!(config.radius, IntRange::new(5, 20));
        assert_eq!(config.speed, IntRange::new(1, 4));
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_range_rejected() {
        let config = WorldConfig {
            speed: IntRange::new(5, 2),
            ..WorldConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EmptyRange {
                field: "speed",
                min: 5,
                max: 2
            }
        ));
    }

    #[test]
    fn zero_radius_rejected() {
        let config = WorldConfig {
            radius: IntRange::new(0, 10),
            ..WorldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveRadius)
        ));
    }

    #[test]
    fn boundary_smaller_than_body_rejected() {
        let config = WorldConfig {
            boundary: Boundary::new(30.0, 650.0),
            ..WorldConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::BoundaryTooSmall { .. }));
        assert!(err.to_string().contains("diameter 40"));
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let config = WorldConfig::from_yaml_str("seed: 9\nspeed: { min: 2, max: 2 }\n").unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.speed, IntRange::new(2, 2));
        assert_eq!(config.boundary, Boundary::default());
    }

    #[test]
    fn invalid_yaml_is_reported() {
        let err = WorldConfig::from_yaml_str("boundary: not-a-rectangle").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn load_from_file_roundtrip() {
        let config = WorldConfig {
            boundary: Boundary::new(800.0, 600.0),
            body_count: IntRange::new(10, 10),
            seed: Some(3),
            ..WorldConfig::default()
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_yaml().unwrap().as_bytes()).unwrap();

        let loaded = WorldConfig::load(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = WorldConfig::load(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn fixed_seed_gives_same_stream() {
        let config = WorldConfig {
            seed: Some(11),
            ..WorldConfig::default()
        };
        let (s1, mut r1) = config.seeded_rng();
        let (s2, mut r2) = config.seeded_rng();
        assert_eq!(s1, 11);
        assert_eq!(s1, s2);
        assert_eq!(r1.random::<u64>(), r2.random::<u64>());
    }

    #[test]
    fn range_sample_stays_inside() {
        let range = IntRange::new(1, 4);
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..200 {
            assert!(range.contains(range.sample(&mut rng)));
        }
    }
}
