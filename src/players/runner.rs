use super::bot::Bot;
use super::bot::GameState;
use super::table::Table;
use crate::Position;
use crate::protocol::clause::Clause;
use crate::round::action::Action;
use anyhow::Context;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Write;
use std::net::TcpStream;

/// The participant side of the wire: connect to the referee's port, replay
/// each clause packet into the local view, and answer every packet with one
/// action line (a Check acknowledges a settled hand).
pub struct Runner<B: Bot> {
    bot: B,
    reader: BufReader<TcpStream>,
    writer: TcpStream,
    game: GameState,
    table: Option<Table>,
    seat: Position,
}

impl<B: Bot> Runner<B> {
    pub fn connect(bot: B, host: &str, port: u16) -> anyhow::Result<Self> {
        let stream = TcpStream::connect((host, port))
            .with_context(|| format!("connect to {}:{}", host, port))?;
        stream.set_nodelay(true).context("nodelay")?;
        Ok(Self {
            bot,
            reader: BufReader::new(stream.try_clone().context("clone stream")?),
            writer: stream,
            game: GameState::default(),
            table: None,
            seat: 0,
        })
    }

    /// speak the protocol until the referee says quit or goes away
    pub fn run(mut self) -> anyhow::Result<()> {
        self.game.hand = 1;
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line).context("read packet")? == 0 {
                return Ok(());
            }
            for token in line.split_whitespace() {
                match Clause::try_from(token) {
                    Ok(Clause::Quit) => return Ok(()),
                    Ok(clause) => self.ingest(clause),
                    Err(e) => log::warn!("undecodable clause {:?}: {}", token, e),
                }
            }
            let action = match self.table.as_ref() {
                Some(table) => self.bot.act(&self.game, table),
                None => Action::Check,
            };
            self.send(action).context("send action")?;
        }
    }

    fn ingest(&mut self, clause: Clause) {
        match clause {
            Clause::Clock(t) => self.game.clock = t,
            Clause::Seat(p) => self.seat = p,
            // the engine resends the whole hand history in every packet, so
            // the replay restarts here; the callback fires once per hand
            Clause::Dealt(hole) => {
                let table = Table::deal(self.seat, hole);
                if self.table.is_none() {
                    self.bot.dealt(&self.game, &table);
                }
                self.table = Some(table);
            }
            Clause::Move(_) | Clause::Board(_) => {
                if let Some(table) = self.table.as_mut() {
                    table.apply(&clause);
                }
            }
            Clause::Shown(_) => {}
            Clause::Delta(delta) => {
                self.game.bankroll += delta;
                self.bot.awarded(&self.game, delta);
                self.game.hand += 1;
                self.table = None;
            }
            Clause::Quit => {}
        }
    }

    fn send(&mut self, action: Action) -> std::io::Result<()> {
        self.writer
            .write_all(format!("{}\n", Clause::Move(action)).as_bytes())?;
        self.writer.flush()
    }
}
