//! pitboss referees a fixed-length heads-up no-limit hold'em match between
//! two autonomous programs. Each participant runs as a separate process,
//! reached over a line-oriented TCP protocol; the referee enforces betting
//! legality, tracks chip stacks and per-participant time budgets, and writes
//! the authoritative transcript. Participants are never trusted to
//! self-regulate.

pub mod cards;
pub mod engine;
pub mod players;
pub mod protocol;
pub mod round;
pub mod session;

/// Stack sizes, bet targets, and bankroll deltas.
pub type Chips = i32;
/// Seat index at the table.
pub type Position = usize;

/// Number of seats at the table.
pub const N: usize = 2;
/// Chips each seat starts every hand with.
pub const STACK: Chips = 400;
/// Big blind amount.
pub const B_BLIND: Chips = 2;
/// Small blind amount.
pub const S_BLIND: Chips = 1;

/// Wall-clock bound on a participant's build command.
pub const BUILD_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(120);
/// Wall-clock bound on waiting for a participant to connect.
pub const CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);
/// Wall-clock bound on waiting for a participant process to exit.
pub const QUIT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

/// Random instance generation for tests.
pub trait Arbitrary {
    fn random() -> Self;
}

/// Initialize dual logging: Info to the terminal, Debug to a timestamped
/// file under `logs/`.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves forward")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/match-{}.log", stamp)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
