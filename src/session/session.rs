use super::budget::Budget;
use super::manifest::Manifest;
use crate::BUILD_TIMEOUT;
use crate::CONNECT_TIMEOUT;
use crate::Chips;
use crate::QUIT_TIMEOUT;
use crate::protocol::clause::Clause;
use crate::round::action::Action;
use anyhow::Context;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Write;
use std::net::TcpListener;
use std::net::TcpStream;
use std::path::Path;
use std::path::PathBuf;
use std::process::Child;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::time::Duration;
use std::time::Instant;

/// Both halves of one accepted participant connection.
#[derive(Debug)]
pub struct Wire {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl TryFrom<TcpStream> for Wire {
    type Error = std::io::Error;
    fn try_from(stream: TcpStream) -> std::io::Result<Self> {
        stream.set_nodelay(true)?;
        Ok(Self {
            reader: BufReader::new(stream.try_clone()?),
            writer: stream,
        })
    }
}

/// One participant: its process, its connection, its clock.
///
/// Created once per match and torn down once at match end. Every failure
/// mode is absorbed here: a session that cannot be built, started, reached,
/// or trusted keeps answering queries with the default legal action so the
/// match always completes.
#[derive(Debug)]
pub struct Session {
    name: String,
    dir: PathBuf,
    port: u16,
    budget: Budget,
    manifest: Option<Manifest>,
    child: Option<Child>,
    wire: Option<Wire>,
    sink: Option<std::fs::File>,
}

impl Session {
    pub fn new(name: &str, dir: &Path, port: u16, clock: Duration) -> Self {
        Self {
            name: name.to_string(),
            dir: dir.to_path_buf(),
            port,
            budget: Budget::new(clock),
            manifest: None,
            child: None,
            wire: None,
            sink: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// permanently defaulted for the rest of the match
    pub fn degraded(&self) -> bool {
        self.budget.lapsed()
    }

    /// load commands.json and run its build step under a bounded timeout.
    /// Any failure is logged and leaves the participant unqueryable.
    pub fn build(&mut self) {
        match Manifest::load(&self.dir) {
            Ok(manifest) => self.manifest = Some(manifest),
            Err(e) => {
                log::warn!("{}: no usable manifest: {:#}", self.name, e);
                return;
            }
        }
        let build = self.manifest.as_ref().map(|m| m.build.clone()).unwrap_or_default();
        if build.is_empty() {
            return;
        }
        if let Err(e) = self.compile(&build) {
            log::warn!("{} build failed: {:#}", self.name, e);
            self.manifest = None;
        }
    }

    /// launch the play-time process and accept its one connection. Failure
    /// to start or connect leaves the session connectionless, never fatal.
    pub fn run(&mut self) {
        let Some(run) = self.manifest.as_ref().map(|m| m.run.clone()) else {
            return;
        };
        if run.is_empty() {
            log::warn!("{}: manifest has no run command", self.name);
            return;
        }
        match self.launch(&run) {
            Ok(()) => log::info!("{} connected", self.name),
            Err(e) => log::warn!("{} failed to come up: {:#}", self.name, e),
        }
    }

    /// the single blocking exchange with the participant. Sends the round
    /// context prefixed with the remaining clock, charges wall-clock time
    /// against the budget, and validates the reply; every failure mode
    /// resolves to the default legal action (Check if legal, else Fold).
    pub fn query(
        &mut self,
        context: &[Clause],
        legal: &[Action],
        bounds: Option<(Chips, Chips)>,
    ) -> Action {
        let fallback = Self::fallback(legal);
        let Some(remaining) = self.budget.remaining() else {
            return fallback;
        };
        if self.wire.is_none() {
            return fallback;
        }
        let clock = Clause::Clock(remaining.as_secs_f64());
        let line = format!("{} {}\n", clock, Clause::line(context));
        let start = Instant::now();
        let reply = self.exchange(&line, remaining);
        self.budget.charge(start.elapsed());
        match reply {
            Ok(reply) => {
                if self.budget.lapsed() {
                    log::warn!("{} ran out of time", self.name);
                    return fallback;
                }
                self.vet(reply.trim(), legal, bounds).unwrap_or(fallback)
            }
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                ) =>
            {
                log::warn!("{} ran out of time", self.name);
                self.budget.lapse();
                fallback
            }
            Err(e) => {
                log::warn!("{} disconnected: {}", self.name, e);
                self.budget.lapse();
                self.wire = None;
                fallback
            }
        }
    }

    /// send the terminate clause, wait boundedly, kill on timeout
    pub fn stop(&mut self) {
        if let Some(wire) = self.wire.as_mut() {
            let _ = wire.writer.write_all(b"Q\n");
            let _ = wire.writer.flush();
        }
        self.wire = None;
        if let Some(mut child) = self.child.take() {
            if wait_bounded(&mut child, QUIT_TIMEOUT).is_none() {
                log::warn!("timed out waiting for {} to quit", self.name);
                let _ = child.kill();
                let _ = child.wait();
            }
        }
    }

    fn compile(&mut self, command: &[String]) -> anyhow::Result<()> {
        let mut child = Command::new(&command[0])
            .args(&command[1..])
            .current_dir(&self.dir)
            .stdout(self.sink()?)
            .stderr(self.sink()?)
            .spawn()
            .context("spawn build command")?;
        match wait_bounded(&mut child, BUILD_TIMEOUT) {
            Some(status) if status.success() => Ok(()),
            Some(status) => anyhow::bail!("exit {}", status),
            None => {
                let _ = child.kill();
                let _ = child.wait();
                anyhow::bail!("timed out after {:?}", BUILD_TIMEOUT)
            }
        }
    }

    fn launch(&mut self, command: &[String]) -> anyhow::Result<()> {
        let listener = TcpListener::bind(("0.0.0.0", self.port))
            .with_context(|| format!("bind port {}", self.port))?;
        listener.set_nonblocking(true).context("nonblocking listener")?;
        let child = Command::new(&command[0])
            .args(&command[1..])
            .arg(self.port.to_string())
            .current_dir(&self.dir)
            .stdout(self.sink()?)
            .stderr(self.sink()?)
            .spawn()
            .context("spawn run command")?;
        self.child = Some(child);
        let deadline = Instant::now() + CONNECT_TIMEOUT;
        loop {
            match listener.accept() {
                Ok((stream, _)) => {
                    stream.set_nonblocking(false).context("blocking stream")?;
                    self.wire = Some(Wire::try_from(stream).context("adopt connection")?);
                    return Ok(());
                }
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    if Instant::now() >= deadline {
                        anyhow::bail!("timed out waiting to connect");
                    }
                    std::thread::sleep(Duration::from_millis(10));
                }
                Err(e) => return Err(e).context("accept"),
            }
        }
    }

    /// the participant's console log artifact, shared by build and run
    fn sink(&mut self) -> anyhow::Result<Stdio> {
        if self.sink.is_none() {
            self.sink = Some(
                std::fs::File::create(format!("{}.txt", self.name))
                    .context("create console log")?,
            );
        }
        let file = self.sink.as_ref().expect("just created");
        Ok(file.try_clone().context("clone console log")?.into())
    }

    /// write the context and read one line, bounded by the remaining budget
    fn exchange(&mut self, line: &str, remaining: Duration) -> std::io::Result<String> {
        let wire = self.wire.as_mut().expect("caller checked");
        wire.reader.get_ref().set_read_timeout(Some(remaining))?;
        wire.writer.write_all(line.as_bytes())?;
        wire.writer.flush()?;
        let mut reply = String::new();
        match wire.reader.read_line(&mut reply)? {
            0 => Err(std::io::ErrorKind::UnexpectedEof.into()),
            _ => Ok(reply),
        }
    }

    /// decode and validate a reply against the legal set and raise bounds
    fn vet(&self, reply: &str, legal: &[Action], bounds: Option<(Chips, Chips)>) -> Option<Action> {
        let action = match Clause::try_from(reply) {
            Ok(Clause::Move(action)) => action,
            Ok(_) | Err(_) => {
                log::warn!("{} response misformatted: {:?}", self.name, reply);
                return None;
            }
        };
        if !action.within(legal) {
            log::warn!("{} attempted illegal {}", self.name, action);
            return None;
        }
        if let Action::Raise(to) = action {
            match bounds {
                Some((min, max)) if min <= to && to <= max => {}
                _ => {
                    log::warn!("{} attempted illegal {}", self.name, action);
                    return None;
                }
            }
        }
        Some(action)
    }

    fn fallback(legal: &[Action]) -> Action {
        if Action::Check.within(legal) {
            Action::Check
        } else {
            Action::Fold
        }
    }
}

/// poll for process exit until the timeout elapses
fn wait_bounded(child: &mut Child, timeout: Duration) -> Option<ExitStatus> {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Some(status),
            Ok(None) if Instant::now() < deadline => {
                std::thread::sleep(Duration::from_millis(25))
            }
            _ => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// a session wired to an in-test peer socket, no process involved
    fn rigged(clock: Duration) -> (Session, TcpStream) {
        let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let addr = listener.local_addr().unwrap();
        let peer = TcpStream::connect(addr).unwrap();
        let (stream, _) = listener.accept().unwrap();
        let mut session = Session::new("rigged", Path::new("."), addr.port(), clock);
        session.wire = Some(Wire::try_from(stream).unwrap());
        (session, peer)
    }

    fn respond(peer: TcpStream, delay: Duration, reply: &str) -> std::thread::JoinHandle<()> {
        let reply = reply.to_string();
        std::thread::spawn(move || {
            let mut peer = peer;
            std::thread::sleep(delay);
            let _ = peer.write_all(reply.as_bytes());
            let _ = peer.flush();
        })
    }

    fn context() -> Vec<Clause> {
        vec![Clause::Seat(0)]
    }

    #[test]
    fn connectionless_session_defaults_without_io() {
        let mut session = Session::new("ghost", Path::new("."), 1, Duration::from_secs(30));
        assert_eq!(
            session.query(&context(), &[Action::Check, Action::Raise(4)], None),
            Action::Check
        );
        assert_eq!(
            session.query(&context(), &[Action::Fold, Action::Call], None),
            Action::Fold
        );
        assert!(!session.degraded());
    }

    #[test]
    fn legal_reply_is_returned() {
        let (mut session, peer) = rigged(Duration::from_secs(5));
        let bot = respond(peer, Duration::ZERO, "C\n");
        let action = session.query(&context(), &[Action::Fold, Action::Call], None);
        bot.join().unwrap();
        assert_eq!(action, Action::Call);
        assert!(!session.degraded());
    }

    #[test]
    fn raise_inside_bounds_is_returned() {
        let (mut session, peer) = rigged(Duration::from_secs(5));
        let bot = respond(peer, Duration::ZERO, "R8\n");
        let legal = [Action::Fold, Action::Call, Action::Raise(6)];
        let action = session.query(&context(), &legal, Some((6, 20)));
        bot.join().unwrap();
        assert_eq!(action, Action::Raise(8));
    }

    #[test]
    fn overdue_reply_lapses_the_budget_for_good() {
        let (mut session, peer) = rigged(Duration::from_millis(50));
        let bot = respond(peer, Duration::from_millis(250), "C\n");
        let action = session.query(&context(), &[Action::Fold, Action::Call], None);
        assert_eq!(action, Action::Fold);
        assert!(session.degraded());
        // every later query skips I/O entirely and answers instantly
        let start = Instant::now();
        let action = session.query(&context(), &[Action::Check, Action::Raise(4)], None);
        assert_eq!(action, Action::Check);
        assert!(start.elapsed() < Duration::from_millis(50));
        bot.join().unwrap();
    }

    #[test]
    fn illegal_reply_defaults_without_degrading() {
        let (mut session, peer) = rigged(Duration::from_secs(5));
        let bot = respond(peer, Duration::ZERO, "K\n");
        let action = session.query(&context(), &[Action::Fold, Action::Call], None);
        bot.join().unwrap();
        assert_eq!(action, Action::Fold);
        assert!(!session.degraded());
    }

    #[test]
    fn out_of_bounds_raise_defaults_without_degrading() {
        let (mut session, peer) = rigged(Duration::from_secs(5));
        let bot = respond(peer, Duration::ZERO, "R399\n");
        let legal = [Action::Fold, Action::Call, Action::Raise(6)];
        let action = session.query(&context(), &legal, Some((6, 20)));
        bot.join().unwrap();
        assert_eq!(action, Action::Fold);
        assert!(!session.degraded());
    }

    #[test]
    fn unknown_byte_defaults_without_degrading() {
        let (mut session, peer) = rigged(Duration::from_secs(5));
        let bot = respond(peer, Duration::ZERO, "X\n");
        let action = session.query(&context(), &[Action::Fold, Action::Call], None);
        bot.join().unwrap();
        assert_eq!(action, Action::Fold);
        assert!(!session.degraded());
    }

    #[test]
    fn disconnect_degrades_permanently() {
        let (mut session, peer) = rigged(Duration::from_secs(5));
        drop(peer);
        let action = session.query(&context(), &[Action::Fold, Action::Call], None);
        assert_eq!(action, Action::Fold);
        assert!(session.degraded());
    }
}
