use anyhow::Result;
use clap::Parser;
use pitboss::engine::engine::Engine;
use pitboss::session::session::Session;
use std::path::PathBuf;
use std::time::Duration;

/// Match configuration, supplied once at startup and immutable for the run.
#[derive(Debug, Parser)]
#[command(name = "pitboss", about = "heads-up no-limit hold'em match referee")]
struct Config {
    /// display name of the first participant
    #[arg(long, default_value = "A")]
    name_a: String,
    /// directory holding the first participant's commands.json
    #[arg(long, default_value = "player_a")]
    path_a: PathBuf,
    /// port assigned to the first participant
    #[arg(long, default_value_t = 50100)]
    port_a: u16,
    /// display name of the second participant
    #[arg(long, default_value = "B")]
    name_b: String,
    /// directory holding the second participant's commands.json
    #[arg(long, default_value = "player_b")]
    path_b: PathBuf,
    /// port assigned to the second participant
    #[arg(long, default_value_t = 50101)]
    port_b: u16,
    /// number of hands to referee
    #[arg(long, default_value_t = 1000)]
    hands: usize,
    /// per-participant time budget for the whole match, in seconds
    #[arg(long, default_value_t = 30.0)]
    clock: f64,
    /// transcript artifact path
    #[arg(long, default_value = "gamelog.txt")]
    gamelog: PathBuf,
}

fn main() -> Result<()> {
    let config = Config::parse();
    pitboss::log();
    log::info!("{} vs {}, {} hands", config.name_a, config.name_b, config.hands);
    let clock = Duration::from_secs_f64(config.clock);
    let a = Session::new(&config.name_a, &config.path_a, config.port_a, clock);
    let b = Session::new(&config.name_b, &config.path_b, config.port_b, clock);
    let transcript = Engine::new(a, b).run(config.hands);
    transcript.save(&config.gamelog)?;
    log::info!("wrote {}", config.gamelog.display());
    Ok(())
}
