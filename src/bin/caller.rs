//! Example participant: calls when facing a bet, checks otherwise.

use anyhow::Result;
use clap::Parser;
use pitboss::players::bot::Bot;
use pitboss::players::bot::GameState;
use pitboss::players::runner::Runner;
use pitboss::players::table::Table;
use pitboss::round::action::Action;

#[derive(Debug, Parser)]
#[command(name = "caller", about = "call-or-check participant")]
struct Config {
    /// host running the referee
    #[arg(long, default_value = "localhost")]
    host: String,
    /// port assigned by the referee
    port: u16,
}

struct Caller;

impl Bot for Caller {
    fn act(&mut self, _game: &GameState, table: &Table) -> Action {
        if table.to_call() > 0 {
            Action::Call
        } else {
            Action::Check
        }
    }
}

fn main() -> Result<()> {
    let config = Config::parse();
    Runner::connect(Caller, &config.host, config.port)?.run()
}
