use crate::physics::forces::ForceModel;
use crate::physics::math::Scalar;
use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `ORRERY__PHYSICS__BODY_COUNT=200`
const ENVIRONMENT_PREFIX: &str = "ORRERY";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravitational_constant: Scalar,
    pub body_count: usize,
    pub width: Scalar,
    pub height: Scalar,
    /// Fixed integration step in seconds
    pub timestep: Scalar,
    pub softening_factor: Scalar,
    pub mass_power_law_scaling: Scalar,
    pub min_mass: Scalar,
    pub max_mass: Scalar,
    /// Registry name or alias, see `orrery --list-integrators`
    pub integrator: String,
    pub initial_seed: Option<u64>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let force_model = ForceModel::default();
        Self {
            gravitational_constant: 1.0,
            body_count: 50,
            width: 800.0,
            height: 600.0,
            timestep: 1.0 / 60.0,
            softening_factor: force_model.softening_factor,
            mass_power_law_scaling: force_model.mass_power_law_scaling,
            min_mass: force_model.min_mass,
            max_mass: force_model.max_mass,
            integrator: "velocityVerlet".to_string(),
            initial_seed: None,
        }
    }
}

impl From<&PhysicsConfig> for ForceModel {
    fn from(config: &PhysicsConfig) -> Self {
        Self {
            softening_factor: config.softening_factor,
            mass_power_law_scaling: config.mass_power_law_scaling,
            min_mass: config.min_mass,
            max_mass: config.max_mass,
        }
    }
}

/// Failure to read, parse, or write a configuration file
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    Layered(::config::ConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "I/O error: {err}"),
            ConfigError::Parse(err) => write!(f, "Invalid TOML: {err}"),
            ConfigError::Serialize(err) => write!(f, "Could not serialize configuration: {err}"),
            ConfigError::Layered(err) => write!(f, "Could not assemble configuration: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err)
    }
}

impl From<::config::ConfigError> for ConfigError {
    fn from(err: ::config::ConfigError) -> Self {
        ConfigError::Layered(err)
    }
}

impl SimulationConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from a file, falling back to defaults if the file doesn't exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(_)) => {
                info!("Config file {} not found. Using defaults.", path.display());
                Self::default()
            }
            Err(e) => {
                warn!(
                    "Failed to parse config file {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Location of the per-user configuration file, if the platform has one
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "Orrery").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Defaults, overlaid by the file at `path` (if present), overlaid by
    /// `ORRERY__SECTION__KEY` environment variables
    pub fn load_layered(path: &Path) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(
                ::config::File::new(&path.to_string_lossy(), ::config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                ::config::Environment::with_prefix(ENVIRONMENT_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Load the per-user configuration, falling back to defaults on any failure
    pub fn load_from_user_config() -> Self {
        let Some(path) = Self::user_config_path() else {
            warn!("Could not determine the user configuration directory. Using defaults.");
            return Self::default();
        };

        match Self::load_layered(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load user configuration from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to the per-user configuration file, creating its directory
    pub fn save_to_user_config(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::user_config_path().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no user configuration directory",
            )
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.save(&path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("orrery-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_defaults_match_force_model() {
        let config = PhysicsConfig::default();
        let model = ForceModel::from(&config);

        assert_eq!(model, ForceModel::default());
        assert_eq!(config.integrator, "velocityVerlet");
        assert!((config.timestep - 1.0 / 60.0).abs() < 1e-15);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: SimulationConfig = toml::from_str(
            r#"
            [physics]
            body_count = 12
            integrator = "rk4"
            "#,
        )
        .unwrap();

        assert_eq!(config.physics.body_count, 12);
        assert_eq!(config.physics.integrator, "rk4");
        assert_eq!(config.physics.width, 800.0);
        assert_eq!(config.physics.softening_factor, 5.0);
    }

    #[test]
    fn test_save_and_load() {
        let path = scratch_path("save.toml");
        let mut config = SimulationConfig::default();
        config.physics.gravitational_constant = 42.0;
        config.physics.initial_seed = Some(9);

        config.save(&path).unwrap();
        let loaded = SimulationConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = SimulationConfig::load_or_default(scratch_path("missing.toml"));

        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_load_or_default_broken_file() {
        let path = scratch_path("broken.toml");
        std::fs::write(&path, "physics = [not toml").unwrap();

        let config = SimulationConfig::load_or_default(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let path = scratch_path("invalid.toml");
        std::fs::write(&path, "[physics]\nbody_count = \"many\"\n").unwrap();

        let result = SimulationConfig::load(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_layered_reads_file() {
        let path = scratch_path("layered.toml");
        std::fs::write(&path, "[physics]\nwidth = 1024.0\nheight = 768.0\n").unwrap();

        let config = SimulationConfig::load_layered(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.physics.width, 1024.0);
        assert_eq!(config.physics.height, 768.0);
        assert_eq!(config.physics.body_count, 50);
    }

    #[test]
    fn test_load_layered_without_file() {
        let config = SimulationConfig::load_layered(&scratch_path("absent.toml")).unwrap();

        assert_eq!(config.physics.min_mass, 2.0);
    }
}
