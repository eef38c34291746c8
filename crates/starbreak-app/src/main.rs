use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use starbreak_app::game_loop::{spawn_game_loop, LoopConfig, LoopExit};
use starbreak_app::logging;
use starbreak_core::commands::EncounterCommand;
use starbreak_core::config::EncounterConfig;
use starbreak_core::constants::TICK_RATE;
use starbreak_core::enums::BossStatus;
use starbreak_core::state::EncounterSnapshot;

#[derive(Parser, Debug)]
#[command(name = "starbreak")]
#[command(about = "Headless runner for the STARBREAK boss encounter")]
struct Cli {
    /// Encounter configuration (TOML). Built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Simulated seconds to run before giving up.
    #[arg(long, default_value_t = 180)]
    seconds: u64,
    /// Pace ticks with wall-clock sleeps instead of running flat out.
    #[arg(long)]
    realtime: bool,
    /// Leave the ship idle instead of flying the autopilot.
    #[arg(long)]
    no_autopilot: bool,
    /// Write every snapshot to stdout as a JSON line.
    #[arg(long)]
    snapshots: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init();

    let encounter = match &cli.config {
        Some(path) => EncounterConfig::load(path)
            .with_context(|| format!("loading encounter config {}", path.display()))?,
        None => EncounterConfig::default(),
    };

    let config = LoopConfig {
        seed: cli.seed,
        encounter,
        realtime: cli.realtime,
        max_ticks: Some(cli.seconds.saturating_mul(TICK_RATE as u64)),
        autopilot: !cli.no_autopilot,
        stop_when_finished: true,
    };

    let emit = cli.snapshots;
    let (state, handle) = spawn_game_loop(config, move |snapshot| {
        if emit {
            write_snapshot_line(snapshot);
        }
    })
    .context("starting game loop thread")?;

    tracing::info!(seed = cli.seed, seconds = cli.seconds, "encounter starting");
    if !state.send(EncounterCommand::StartEncounter) {
        return Err(anyhow!("game loop exited before the encounter started"));
    }

    let exit = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;
    let snapshot = state
        .latest()
        .ok_or_else(|| anyhow!("game loop produced no snapshot"))?;

    print_summary(exit, &snapshot);
    Ok(())
}

fn write_snapshot_line(snapshot: &EncounterSnapshot) {
    match serde_json::to_string(snapshot) {
        Ok(line) => {
            let mut out = std::io::stdout().lock();
            if let Err(e) = writeln!(out, "{line}") {
                tracing::warn!(error = %e, "failed to write snapshot");
            }
        }
        Err(e) => tracing::warn!(error = %e, "failed to serialize snapshot"),
    }
}

fn print_summary(exit: LoopExit, snapshot: &EncounterSnapshot) {
    let (phase, defeated) = match &snapshot.boss {
        Some(boss) => (
            format!("{}/{}", boss.phase + 1, boss.phase_count),
            boss.status == BossStatus::Defeated,
        ),
        None => ("-".to_string(), false),
    };

    eprintln!("exit:              {exit:?}");
    eprintln!("status:            {:?}", snapshot.status);
    eprintln!("elapsed:           {:.2}s", snapshot.time.elapsed_secs);
    eprintln!("phase reached:     {phase}");
    eprintln!("hostile fired:     {}", snapshot.projectiles.hostile_fired);
    eprintln!("player hits taken: {}", snapshot.player.hits_taken);
    eprintln!("boss defeated:     {defeated}");
    eprintln!("fragments:         {}", snapshot.progression.fragments);
}
