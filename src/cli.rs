//! Command line interface for Orrery

use clap::Parser;
use std::fmt;

use crate::config::SimulationConfig;
use crate::physics::engine::GravityEngine;
use crate::physics::errors::SimulationError;
use crate::physics::integrators::registry::{IntegratorRegistry, RegistryError};

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded
    ConfigLoad(String),
    /// Invalid integrator name provided
    InvalidIntegrator(RegistryError),
    /// The merged configuration cannot build a simulation
    InvalidConfig(SimulationError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(msg) => write!(f, "Failed to load configuration: {msg}"),
            CliError::InvalidIntegrator(err) => write!(f, "Invalid integrator: {err}"),
            CliError::InvalidConfig(err) => write!(f, "Invalid configuration: {err}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Orrery - headless 2D N-body gravity simulation
#[derive(Parser, Debug, Default)]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"),
    about,
    long_about = None
)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Number of bodies to simulate (overrides config file)
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub bodies: Option<usize>,

    /// Gravitational constant (overrides config file)
    #[arg(short = 'g', long, value_name = "VALUE")]
    pub gravity: Option<f64>,

    /// Integrator name or alias (e.g., velocityVerlet, rk4, euler)
    #[arg(short = 'i', long, value_name = "NAME")]
    pub integrator: Option<String>,

    /// Random seed for body generation
    #[arg(short = 's', long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Exit after this many simulation steps
    #[arg(long, value_name = "COUNT")]
    pub steps: Option<u64>,

    /// Step as fast as possible instead of once per timestep
    #[arg(long)]
    pub unthrottled: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// List available integrators and exit
    #[arg(long)]
    pub list_integrators: bool,
}

/// Handles the --list-integrators flag by printing available integrators
pub fn handle_list_integrators() {
    let registry = IntegratorRegistry::new();
    println!("Available integrators:");
    for name in registry.list_available() {
        println!("  - {name}");
    }

    let aliases = registry.list_aliases();
    if !aliases.is_empty() {
        println!("\nAliases:");
        for (alias, target) in aliases {
            println!("  - {alias} -> {target}");
        }
    }
}

/// Loads configuration from file or defaults, then applies command-line overrides
///
/// An explicit `--config` file must exist and parse. Without one the per-user
/// configuration is used, falling back to defaults. The merged result is
/// validated, so an unknown integrator from any source is rejected here.
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let mut config = if let Some(config_path) = &args.config {
        println!("Loading configuration from: {config_path}");
        SimulationConfig::load(config_path)
            .map_err(|err| CliError::ConfigLoad(format!("{config_path}: {err}")))?
    } else {
        SimulationConfig::load_from_user_config()
    };

    if let Some(body_count) = args.bodies {
        println!("Overriding body count to: {body_count}");
        config.physics.body_count = body_count;
    }

    if let Some(gravity) = args.gravity {
        println!("Overriding gravitational constant to: {gravity}");
        config.physics.gravitational_constant = gravity;
    }

    if let Some(integrator) = &args.integrator {
        IntegratorRegistry::new()
            .create(integrator)
            .map_err(CliError::InvalidIntegrator)?;

        println!("Using integrator: {integrator}");
        config.physics.integrator = integrator.clone();
    }

    if let Some(seed) = args.seed {
        println!("Using random seed: {seed}");
        config.physics.initial_seed = Some(seed);
    }

    GravityEngine::validate_config(&config.physics).map_err(CliError::InvalidConfig)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arguments() {
        let args = Args::try_parse_from([
            "orrery", "-n", "200", "-g", "2.5", "-i", "rk4", "-s", "7", "--steps", "100",
            "--unthrottled",
        ])
        .unwrap();

        assert_eq!(args.bodies, Some(200));
        assert_eq!(args.gravity, Some(2.5));
        assert_eq!(args.integrator.as_deref(), Some("rk4"));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.steps, Some(100));
        assert!(args.unthrottled);
        assert!(!args.verbose);
    }

    #[test]
    fn test_overrides_applied() {
        let path = std::env::temp_dir().join(format!("orrery-{}-cli.toml", std::process::id()));
        SimulationConfig::default().save(&path).unwrap();

        let args = Args {
            config: Some(path.to_string_lossy().into_owned()),
            bodies: Some(3),
            gravity: Some(9.0),
            integrator: Some("runge_kutta".to_string()),
            seed: Some(99),
            ..Args::default()
        };
        let config = load_and_apply_config(&args);
        std::fs::remove_file(&path).ok();
        let config = config.unwrap();

        assert_eq!(config.physics.body_count, 3);
        assert_eq!(config.physics.gravitational_constant, 9.0);
        assert_eq!(config.physics.integrator, "runge_kutta");
        assert_eq!(config.physics.initial_seed, Some(99));
    }

    #[test]
    fn test_invalid_integrator_rejected() {
        let path = std::env::temp_dir().join(format!("orrery-{}-cli-bad.toml", std::process::id()));
        SimulationConfig::default().save(&path).unwrap();

        let args = Args {
            config: Some(path.to_string_lossy().into_owned()),
            integrator: Some("leapfrog".to_string()),
            ..Args::default()
        };
        let result = load_and_apply_config(&args);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(CliError::InvalidIntegrator(_))));
    }

    #[test]
    fn test_unknown_integrator_in_config_file_rejected() {
        let path =
            std::env::temp_dir().join(format!("orrery-{}-cli-rk5.toml", std::process::id()));
        std::fs::write(&path, "[physics]\nintegrator = \"rk5\"\nbody_count = 3\n").unwrap();

        let args = Args {
            config: Some(path.to_string_lossy().into_owned()),
            ..Args::default()
        };
        let result = load_and_apply_config(&args);
        std::fs::remove_file(&path).ok();

        assert!(matches!(
            result,
            Err(CliError::InvalidConfig(SimulationError::Registry(_)))
        ));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let path =
            std::env::temp_dir().join(format!("orrery-{}-cli-nan.toml", std::process::id()));
        SimulationConfig::default().save(&path).unwrap();

        let args = Args {
            config: Some(path.to_string_lossy().into_owned()),
            gravity: Some(f64::NAN),
            ..Args::default()
        };
        let result = load_and_apply_config(&args);
        std::fs::remove_file(&path).ok();

        assert!(matches!(
            result,
            Err(CliError::InvalidConfig(SimulationError::Domain(_)))
        ));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = Args {
            config: Some("/nonexistent/orrery/config.toml".to_string()),
            ..Args::default()
        };

        assert!(matches!(
            load_and_apply_config(&args),
            Err(CliError::ConfigLoad(_))
        ));
    }
}
