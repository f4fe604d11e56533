//! Running an external UCI engine to analyse a single position.

use std::{
    io::{BufRead, BufReader, Write},
    path::PathBuf,
    process::{Child, ChildStdin, Command, Stdio},
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

use kibitz_core::board::Board;
use log::{debug, warn};

use crate::{Analysis, AnalysisCollector, AnalysisError, UCIMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// `setoption` name/value pairs sent before the search.
    pub options: Vec<(String, String)>,
    pub depth: u32,
    /// Upper bound on the whole exchange, from spawning to `bestmove`.
    pub timeout: Duration,
}

impl EngineConfig {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("stockfish"),
            args: Vec::new(),
            options: Vec::new(),
            depth: 15,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Starts the engine, asks it to search `board` to the configured depth and
/// returns its evaluation. The engine is always shut down before returning.
pub fn analyze(config: &EngineConfig, board: &Board) -> Result<Analysis, AnalysisError> {
    let mut engine = EngineProcess::spawn(config)?;

    engine.send(&UCIMessage::UCI);
    engine.wait_for(|m| matches!(m, UCIMessage::UCIOk))?;

    for (name, value) in &config.options {
        engine.send(&UCIMessage::SetOption {
            name: name.clone(),
            value: value.clone(),
        });
    }

    engine.send(&UCIMessage::IsReady);
    engine.wait_for(|m| matches!(m, UCIMessage::ReadyOk))?;

    engine.send(&UCIMessage::Position { fen: board.fen() });
    engine.send(&UCIMessage::Go {
        depth: config.depth,
    });

    let mut collector = AnalysisCollector::new(board.to_move());
    while !collector.feed(engine.recv()?) {}

    collector.finish()
}

struct EngineProcess {
    child: Child,
    stdin: Option<ChildStdin>,
    messages: Receiver<UCIMessage>,
    deadline: Instant,
    timeout: Duration,
}

impl EngineProcess {
    fn spawn(config: &EngineConfig) -> Result<Self, AnalysisError> {
        let spawn_error = |source: std::io::Error| AnalysisError::Spawn {
            program: config.program.clone(),
            source,
        };

        let mut child = Command::new(&config.program)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(spawn_error)?;

        debug!("Started engine {:?} (pid {})", config.program, child.id());

        let stdin = child.stdin.take();
        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(AnalysisError::EngineExited);
        };

        let (tx, rx) = mpsc::channel();

        // Ends when the engine closes stdout or the receiver is dropped.
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else {
                    break;
                };
                debug!("engine > {line}");

                match line.parse::<UCIMessage>() {
                    Ok(message) => {
                        if tx.send(message).is_err() {
                            break;
                        }
                    }
                    Err(_) => debug!("Ignoring unparseable engine output {line:?}"),
                }
            }
        });

        Ok(Self {
            child,
            stdin,
            messages: rx,
            deadline: Instant::now() + config.timeout,
            timeout: config.timeout,
        })
    }

    /// Writes a message to the engine. A failed write is only logged: an
    /// engine that has gone away is noticed when reading from it.
    fn send(&mut self, message: &UCIMessage) {
        let Some(stdin) = self.stdin.as_mut() else {
            return;
        };

        debug!("engine < {message}");
        if let Err(e) = writeln!(stdin, "{message}").and_then(|_| stdin.flush()) {
            warn!("Could not write to engine: {e}");
        }
    }

    fn recv(&self) -> Result<UCIMessage, AnalysisError> {
        let remaining = self.deadline.saturating_duration_since(Instant::now());

        match self.messages.recv_timeout(remaining) {
            Ok(message) => Ok(message),
            Err(RecvTimeoutError::Timeout) => Err(AnalysisError::Timeout(self.timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(AnalysisError::EngineExited),
        }
    }

    fn wait_for(&self, mut pred: impl FnMut(&UCIMessage) -> bool) -> Result<(), AnalysisError> {
        loop {
            if pred(&self.recv()?) {
                return Ok(());
            }
        }
    }
}

impl Drop for EngineProcess {
    fn drop(&mut self) {
        self.send(&UCIMessage::Quit);
        self.stdin = None;

        let _ = self.child.kill();
        match self.child.wait() {
            Ok(status) => debug!("Engine exited with {status}"),
            Err(e) => warn!("Could not wait for engine: {e}"),
        }
    }
}
