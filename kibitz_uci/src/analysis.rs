//! Turning the messages of an analysing engine into an evaluation.

use std::{fmt::Display, path::PathBuf, time::Duration};

use kibitz_core::board::{Board, Color, Move, UCIMove};
use log::debug;
use thiserror::Error;

use crate::{UCIInfoScore, UCIMessage};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Could not start engine {program:?}: {source}")]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },
    #[error("Engine did not finish within {0:?}")]
    Timeout(Duration),
    #[error("Engine exited before finishing its analysis")]
    EngineExited,
    #[error("Engine finished without reporting a score")]
    NoEvaluation,
}

/// An engine evaluation from White's point of view: positive values favour
/// White.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    Centipawns(i32),
    /// Moves until mate. Positive if White mates. `Mate(0)` means the side to
    /// move has already been mated.
    Mate(i32),
}

impl Score {
    /// Reads a UCI score, which is relative to `to_move`. Returns `None` for
    /// a missing score or one that cannot be negated.
    pub fn from_uci(score: &UCIInfoScore, to_move: Color) -> Option<Self> {
        let whites_view = |value: i32| {
            if to_move.is_white() {
                Some(value)
            } else {
                value.checked_neg()
            }
        };

        match (score.mate, score.cp) {
            (Some(mate), _) => whites_view(mate).map(Score::Mate),
            (None, Some(cp)) => whites_view(cp).map(Score::Centipawns),
            (None, None) => None,
        }
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let favoured = |value: i32| if value > 0 { Color::White } else { Color::Black };

        match *self {
            Score::Centipawns(0) => write!(f, "0.0 pawns (equal)"),
            Score::Centipawns(cp) => write!(
                f,
                "{:.1} pawns ({} advantage)",
                f64::from(cp) / 100.0,
                favoured(cp).name()
            ),
            Score::Mate(0) => write!(f, "Checkmate"),
            Score::Mate(moves) => {
                write!(f, "Mate in {} ({})", moves.unsigned_abs(), favoured(moves).name())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub depth: Option<u32>,
    pub score: Score,
    /// First move of the principal variation, or the engine's `bestmove`.
    pub best_move: Option<UCIMove>,
}

impl Analysis {
    /// The best move as a legal move of `board`, which should be the analysed
    /// position.
    pub fn best_move_on(&self, board: &Board) -> Option<Move> {
        let best_move = self.best_move?;
        board.get_move(best_move.from, best_move.to, best_move.promotion)
    }
}

/// Accumulates the messages an engine sends after `go`.
///
/// The evaluation comes from the last `info` line that carries a score,
/// ignoring secondary lines of a multi-pv search.
#[derive(Debug, Clone)]
pub struct AnalysisCollector {
    to_move: Color,
    depth: Option<u32>,
    score: Option<Score>,
    pv_move: Option<UCIMove>,
    best_move: Option<UCIMove>,
    finished: bool,
}

impl AnalysisCollector {
    /// A collector for the analysis of a position with `to_move` to play.
    pub fn new(to_move: Color) -> Self {
        Self {
            to_move,
            depth: None,
            score: None,
            pv_move: None,
            best_move: None,
            finished: false,
        }
    }

    /// Feeds one message. Returns true once the engine has sent `bestmove`.
    pub fn feed(&mut self, message: UCIMessage) -> bool {
        match message {
            UCIMessage::Info(info) if info.multi_pv.map_or(true, |n| n == 1) => {
                let Some(score) = info
                    .score
                    .as_ref()
                    .and_then(|score| Score::from_uci(score, self.to_move))
                else {
                    return self.finished;
                };

                self.depth = info.depth.or(self.depth);
                self.score = Some(score);
                self.pv_move = info.pv.first().copied();
            }
            UCIMessage::BestMove { best_move, .. } => {
                debug!("Engine finished with bestmove {best_move:?}");
                self.best_move = best_move;
                self.finished = true;
            }
            _ => {}
        }

        self.finished
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn finish(self) -> Result<Analysis, AnalysisError> {
        let score = self.score.ok_or(AnalysisError::NoEvaluation)?;

        Ok(Analysis {
            depth: self.depth,
            score,
            best_move: self.pv_move.or(self.best_move),
        })
    }
}
