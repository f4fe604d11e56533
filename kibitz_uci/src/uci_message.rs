use std::{fmt::Display, str::FromStr};

use kibitz_core::board::UCIMove;
use thiserror::Error;

use crate::{parsing::uci_message, uci_info::UCIInfo};

/// The subset of UCI needed to drive an analysing engine. Messages to the
/// engine can only be printed; messages from it can also be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UCIMessage {
    /// `uci`
    UCI,

    /// `isready`
    IsReady,

    /// `setoption name <id> value <x>`
    SetOption { name: String, value: String },

    /// `position fen <fen>`. Positions are always sent as a FEN without moves.
    Position { fen: String },

    /// `go depth <depth>`
    Go { depth: u32 },

    /// `quit`
    Quit,

    /// `id [name <name>] [author <author>]`
    Id {
        name: Option<String>,
        author: Option<String>,
    },

    /// `uciok`
    UCIOk,

    /// `readyok`
    ReadyOk,

    /// `bestmove <best_move> [ponder <ponder_move>]`. An engine with no legal
    /// move to play sends `bestmove (none)`.
    BestMove {
        best_move: Option<UCIMove>,
        ponder: Option<UCIMove>,
    },

    /// `info ...`
    Info(UCIInfo),
}

impl Display for UCIMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UCIMessage::UCI => write!(f, "uci"),

            UCIMessage::IsReady => write!(f, "isready"),

            UCIMessage::SetOption { name, value } => {
                write!(f, "setoption name {name} value {value}")
            }

            UCIMessage::Position { fen } => write!(f, "position fen {fen}"),

            UCIMessage::Go { depth } => write!(f, "go depth {depth}"),

            UCIMessage::Quit => write!(f, "quit"),

            UCIMessage::Id { name, author } => {
                write!(f, "id")?;
                if let Some(name) = name {
                    write!(f, " name {name}")?;
                }
                if let Some(author) = author {
                    write!(f, " author {author}")?;
                }
                Ok(())
            }

            UCIMessage::UCIOk => write!(f, "uciok"),

            UCIMessage::ReadyOk => write!(f, "readyok"),

            UCIMessage::BestMove { best_move, ponder } => {
                match best_move {
                    Some(best_move) => write!(f, "bestmove {best_move}")?,
                    None => write!(f, "bestmove (none)")?,
                }
                if let Some(ponder) = ponder {
                    write!(f, " ponder {ponder}")?;
                }
                Ok(())
            }

            UCIMessage::Info(info) => write!(f, "info {info}"),
        }
    }
}

impl FromStr for UCIMessage {
    type Err = ParseUCIMessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uci_message(s.trim())
            .map(|(_, message)| message)
            .map_err(|_| ParseUCIMessageError)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Error parsing UCI message")]
pub struct ParseUCIMessageError;
