//! Flow Steer headless runner
//!
//! Runs the fixed-step simulation without a window and prints a JSON summary.
//!
//! Usage: flow-steer [CONFIG.json] [--ticks N] [--mode wander|arrive|follow] [--seed N]

use std::process::ExitCode;

use glam::Vec2;
use serde::Serialize;

use flow_steer::consts::SIM_HZ;
use flow_steer::sim::{SimState, TickInput, TrailEmitter, tick};
use flow_steer::{BehaviorMode, SimConfig, SimResult};

const DEFAULT_TICKS: u64 = 10 * SIM_HZ as u64;

#[derive(Debug, Default)]
struct Args {
    config: Option<String>,
    ticks: Option<u64>,
    mode: Option<BehaviorMode>,
    seed: Option<u64>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--ticks" => {
                let value = iter.next().ok_or("--ticks needs a value")?;
                args.ticks = Some(value.parse().map_err(|_| format!("bad tick count: {value}"))?);
            }
            "--mode" => {
                let value = iter.next().ok_or("--mode needs a value")?;
                args.mode =
                    Some(BehaviorMode::from_name(&value).ok_or(format!("unknown mode: {value}"))?);
            }
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                args.seed = Some(value.parse().map_err(|_| format!("bad seed: {value}"))?);
            }
            other if other.starts_with("--") => return Err(format!("unknown flag: {other}")),
            path => args.config = Some(path.to_string()),
        }
    }
    Ok(args)
}

/// Final report printed to stdout
#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    mode: BehaviorMode,
    ticks: u64,
    agents: usize,
    field_mutations: u64,
    trail_particles: usize,
    mean_speed: f32,
    mean_heading: Vec2,
}

fn run(args: Args) -> SimResult<RunSummary> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let ticks = args.ticks.unwrap_or(DEFAULT_TICKS);

    let mut state = SimState::new(&config)?;
    let mut trails = TrailEmitter::new();
    let mut trail_particles = 0;

    // Headless: arrive steers to the world center in place of a pointer
    if config.mode == BehaviorMode::Arrive {
        log::warn!("No pointer in headless mode; arrive targets the world center");
    }
    let input = TickInput {
        target: Some(state.world.size() / 2.0),
        ..Default::default()
    };

    for _ in 0..ticks {
        tick(&mut state, &input);
        trail_particles += trails.update(&state.agents).len();

        if state.time_ticks % SIM_HZ as u64 == 0 {
            log::info!(
                "t={}s mean speed {:.2}, field mutations {}",
                state.time_ticks / SIM_HZ as u64,
                state.mean_speed(),
                state.field.mutations()
            );
        }
    }

    Ok(RunSummary {
        seed: config.seed,
        mode: config.mode,
        ticks: state.time_ticks,
        agents: state.agents.len(),
        field_mutations: state.field.mutations(),
        trail_particles,
        mean_speed: state.mean_speed(),
        mean_heading: state.mean_heading(),
    })
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Flow Steer (headless) starting...");

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("usage: flow-steer [CONFIG.json] [--ticks N] [--mode wander|arrive|follow] [--seed N]");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to encode summary: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
