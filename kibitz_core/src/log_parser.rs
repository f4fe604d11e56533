//! Extraction of a legal move sequence from free-form game log text.

use std::fmt::Display;

use log::{debug, warn};

use crate::{
    board::{Board, Move},
    decode::{decode, looks_like_move, DecodeError},
};

/// A token that could not be turned into a move, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number within the whole input, header included.
    pub line: usize,
    pub token: String,
    pub error: DecodeError,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

/// The result of parsing a log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLog {
    /// The position the moves start from.
    pub start: Board,
    /// Every successfully decoded move, in order. Each move is legal in the
    /// position reached by playing all the previous ones from `start`.
    pub moves: Vec<Move>,
    /// `start` with all of `moves` played.
    pub final_board: Board,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default)]
pub struct LogParser {
    start: Board,
}

impl LogParser {
    /// A parser for logs of games starting from the standard position.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(start: Board) -> Self {
        Self { start }
    }

    /// Parses `text`. Never fails: tokens that cannot be decoded are skipped
    /// and reported in [`ParsedLog::diagnostics`].
    pub fn parse(&self, text: &str) -> ParsedLog {
        let mut board = self.start.clone();
        let mut moves = Vec::new();
        let mut diagnostics = Vec::new();

        for (line_index, line) in body_lines(text) {
            let line_number = line_index + 1;
            if is_tag_pair(line) {
                debug!("Skipping tag pair on line {line_number}: {line}");
                continue;
            }
            if is_separator(line) {
                debug!("Skipping separator on line {line_number}");
                continue;
            }

            for token in line.split_whitespace() {
                if is_move_number(token) || is_game_result(token) {
                    continue;
                }

                match decode(token, &board) {
                    Ok(the_move) => {
                        debug!("Decoded {token:?} as {the_move}");
                        board.push_move_unchecked(the_move);
                        moves.push(the_move);
                    }
                    Err(error) => {
                        warn!("Skipping token on line {line_number}: {error}");
                        diagnostics.push(Diagnostic {
                            line: line_number,
                            token: token.to_string(),
                            error,
                        });
                    }
                }
            }
        }

        ParsedLog {
            start: self.start.clone(),
            moves,
            final_board: board,
            diagnostics,
        }
    }
}

/// The lines of `text` after the header, with their 0-based index in the
/// whole text.
///
/// The header is everything up to and including the first line made only of
/// `=` characters, provided nothing before that line reads as a move or a
/// move number. Otherwise there is no header.
fn body_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let separator = text.lines().position(is_separator);

    let header_end = match separator {
        Some(index) if !text.lines().take(index).any(has_move_tokens) => index + 1,
        Some(index) => {
            debug!("Line {} is not a header separator: moves come before it", index + 1);
            0
        }
        None => 0,
    };

    text.lines().enumerate().skip(header_end)
}

/// A line made only of `=` characters.
fn is_separator(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.bytes().all(|b| b == b'=')
}

fn has_move_tokens(line: &str) -> bool {
    !is_tag_pair(line)
        && line
            .split_whitespace()
            .any(|token| is_move_number(token) || looks_like_move(token))
}

/// A move number such as `12.` or `12...`.
fn is_move_number(token: &str) -> bool {
    let digits = token.bytes().take_while(u8::is_ascii_digit).count();
    let rest = &token[digits..];
    digits > 0 && !rest.is_empty() && rest.bytes().all(|b| b == b'.')
}

fn is_game_result(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "½-½" | "*")
}

/// A PGN tag pair line such as `[Event "Casual game"]`.
fn is_tag_pair(line: &str) -> bool {
    let line = line.trim();
    line.starts_with('[') && line.ends_with(']') && line.contains('"')
}
