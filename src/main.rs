use bevy::app::ScheduleRunnerPlugin;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use clap::Parser;
use orrery::cli::{Args, handle_list_integrators, load_and_apply_config};
use orrery::prelude::*;
use std::time::Duration;

/// Steps between diagnostics log lines
const REPORT_INTERVAL: u64 = 60;

/// Exit once the engine has taken this many steps
#[derive(Resource, Deref, Clone, Copy, Debug)]
struct StepBudget(Option<u64>);

fn main() -> AppExit {
    let args = Args::parse();

    if args.list_integrators {
        handle_list_integrators();
        return AppExit::Success;
    }

    let config = match load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return AppExit::error();
        }
    };

    let timestep = config.physics.timestep;
    let wait = if args.unthrottled || !timestep.is_finite() || timestep <= 0.0 {
        Duration::ZERO
    } else {
        Duration::from_secs_f64(timestep)
    };

    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(wait)),
        LogPlugin {
            level: if args.verbose {
                Level::DEBUG
            } else {
                Level::INFO
            },
            ..default()
        },
        StatesPlugin,
        SimulationPlugin::with_config(config),
    ));
    app.insert_resource(StepBudget(args.steps));
    app.add_systems(Update, report_progress.after(SimulationSet::Advance));

    app.run()
}

fn report_progress(
    engine: Option<Res<GravityEngine>>,
    budget: Res<StepBudget>,
    mut exit: EventWriter<AppExit>,
) {
    // Absent when the plugin refused an invalid configuration
    let Some(engine) = engine else {
        return;
    };
    if !engine.is_changed() {
        return;
    }

    let steps = engine.step_count();
    if steps > 0 && steps % REPORT_INTERVAL == 0 {
        let snapshot = engine.state();
        info!(
            "t = {:.2}s, {} bodies, kinetic energy {:.3e}, momentum ({:.3e}, {:.3e})",
            engine.elapsed_time(),
            snapshot.bodies.len(),
            snapshot.kinetic_energy(),
            snapshot.momentum().x,
            snapshot.momentum().y
        );
    }

    if let Some(limit) = **budget {
        if steps >= limit {
            info!("Reached {} steps, exiting", steps);
            exit.write(AppExit::Success);
        }
    }
}
