//! A loaded game: its moves, the live position and what is highlighted on
//! the board.

use std::fmt::Write;

use log::debug;

use crate::{
    board::{Board, BoardState, DrawReason, Move, Square},
    log_parser::{Diagnostic, LogParser},
    navigator::Navigator,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveHistoryItem {
    pub move_repr: Move,
    pub san: String,
}

/// One line of the move list: a move number with white's and black's moves.
/// The first row of a game starting with black to move has no white move, and
/// the last row may have no black move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveHistoryRow<'a> {
    pub fullmoves: u32,
    pub white_move: Option<&'a str>,
    pub black_move: Option<&'a str>,
}

/// Summary of a [`Session::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub move_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone)]
pub struct Session {
    parser: LogParser,
    navigator: Navigator,
    move_history: Vec<MoveHistoryItem>,
    diagnostics: Vec<Diagnostic>,
    highlighted_squares: Vec<Square>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Board::starting_position())
    }
}

impl Session {
    /// An empty session whose logs are replayed from `start`.
    pub fn new(start: Board) -> Self {
        Self {
            navigator: Navigator::new(start.clone(), Vec::new()),
            parser: LogParser::with_start(start),
            move_history: Vec::new(),
            diagnostics: Vec::new(),
            highlighted_squares: Vec::new(),
        }
    }

    /// Parses `text` and replaces the loaded game with it. The cursor is at
    /// the start position afterwards.
    pub fn load(&mut self, text: &str) -> LoadReport {
        let parsed = self.parser.parse(text);

        let mut board = parsed.start.clone();
        let move_history = parsed
            .moves
            .iter()
            .map(|&move_repr| {
                let san = board
                    .get_san(move_repr)
                    .map_or_else(|| "?".to_string(), |san| san.to_string());
                board.push_move_unchecked(move_repr);
                MoveHistoryItem { move_repr, san }
            })
            .collect();

        debug!(
            "Loaded {} moves with {} diagnostics",
            parsed.moves.len(),
            parsed.diagnostics.len()
        );

        let report = LoadReport {
            move_count: parsed.moves.len(),
            diagnostics: parsed.diagnostics.clone(),
        };

        self.navigator = Navigator::new(parsed.start, parsed.moves);
        self.move_history = move_history;
        self.diagnostics = parsed.diagnostics;
        self.highlighted_squares.clear();

        report
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn board(&self) -> &Board {
        self.navigator.board()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn move_history(&self) -> &[MoveHistoryItem] {
        &self.move_history
    }

    pub fn step_forward(&mut self) -> bool {
        self.highlighted_squares.clear();
        self.navigator.step_forward()
    }

    pub fn step_back(&mut self) -> bool {
        self.highlighted_squares.clear();
        self.navigator.step_back()
    }

    pub fn to_start(&mut self) {
        self.highlighted_squares.clear();
        self.navigator.to_start();
    }

    pub fn to_end(&mut self) {
        self.highlighted_squares.clear();
        self.navigator.to_end();
    }

    pub fn seek(&mut self, applied: usize) {
        self.highlighted_squares.clear();
        self.navigator.seek(applied);
    }

    /// The squares of the last played move, for highlighting.
    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.navigator
            .current_move()
            .map(|m| (m.from_square(), m.to_square()))
    }

    pub fn highlighted_squares(&self) -> &[Square] {
        &self.highlighted_squares
    }

    /// Highlights the squares of `the_move` until the next navigation.
    pub fn highlight_move(&mut self, the_move: Move) {
        self.highlighted_squares = vec![the_move.from_square(), the_move.to_square()];
    }

    pub fn rows(&self) -> Vec<MoveHistoryRow> {
        let start = self.navigator.start();
        let mut rows = Vec::new();
        let mut move_iter = self.move_history.iter().map(|i| i.san.as_str());
        let mut fullmoves = start.fullmoves();

        if start.to_move().is_black() {
            if let Some(black_move) = move_iter.next() {
                rows.push(MoveHistoryRow {
                    fullmoves,
                    white_move: None,
                    black_move: Some(black_move),
                });
            }

            fullmoves += 1;
        }

        while let Some(white_move) = move_iter.next() {
            rows.push(MoveHistoryRow {
                fullmoves,
                white_move: Some(white_move),
                black_move: move_iter.next(),
            });
            fullmoves += 1;
        }

        rows
    }

    /// The move list as plain text, one numbered row per line with the two
    /// moves separated by a tab: `1. e4\te5`.
    pub fn move_list_text(&self) -> String {
        let mut text = String::new();

        for row in self.rows() {
            let _ = match (row.white_move, row.black_move) {
                (Some(white), Some(black)) => writeln!(text, "{}. {white}\t{black}", row.fullmoves),
                (Some(white), None) => writeln!(text, "{}. {white}", row.fullmoves),
                (None, Some(black)) => writeln!(text, "{}... {black}", row.fullmoves),
                (None, None) => Ok(()),
            };
        }

        text
    }

    /// E.g. `Move 3/10` or `Move 4/4 - Checkmate!`.
    pub fn status_line(&self) -> String {
        let mut status = format!(
            "Move {}/{}",
            self.navigator.applied(),
            self.navigator.len()
        );

        match self.board().state() {
            BoardState::Win(_) => status.push_str(" - Checkmate!"),
            BoardState::InPlay { checkers } if checkers > 0 => status.push_str(" - Check"),
            BoardState::InPlay { .. } => {}
            BoardState::Draw(DrawReason::Stalemate) => status.push_str(" - Stalemate"),
            BoardState::Draw(reason) => {
                if self.board().is_check() {
                    status.push_str(" - Check");
                }
                let _ = write!(status, " - {reason}");
            }
        }

        status
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn load_resets_cursor_and_reports() {
        let mut session = Session::default();
        let report = session.load("1. e4 e5 2. Nf3 ??? 3. Bb5");

        assert_eq!(report.move_count, 4);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(session.diagnostics(), report.diagnostics.as_slice());
        assert_eq!(session.navigator().cursor(), None);

        session.to_end();
        assert_eq!(session.navigator().applied(), 4);

        session.load("1. d4");
        assert_eq!(session.navigator().cursor(), None);
        assert_eq!(session.navigator().len(), 1);
        assert!(session.diagnostics().is_empty());
    }

    #[test]
    fn move_list_rows_and_text() {
        let mut session = Session::default();
        session.load("1. e2e4 e7e5 2. g1f3 b8c6 3. f1b5");

        assert_eq!(
            session.rows(),
            vec![
                MoveHistoryRow {
                    fullmoves: 1,
                    white_move: Some("e4"),
                    black_move: Some("e5"),
                },
                MoveHistoryRow {
                    fullmoves: 2,
                    white_move: Some("Nf3"),
                    black_move: Some("Nc6"),
                },
                MoveHistoryRow {
                    fullmoves: 3,
                    white_move: Some("Bb5"),
                    black_move: None,
                },
            ]
        );
        assert_eq!(session.move_list_text(), "1. e4\te5\n2. Nf3\tNc6\n3. Bb5\n");
    }

    #[test]
    fn rows_starting_with_black() {
        let start = Board::try_parse_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 30").unwrap();
        let mut session = Session::new(start);
        session.load("Kd7 e4 Kd6");

        assert_eq!(session.move_list_text(), "30... Kd7\n31. e4\tKd6\n");
    }

    #[test]
    fn status_line_reports_check_and_mate() {
        let mut session = Session::default();
        session.load("1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6 4. Qxf7#");

        assert_eq!(session.status_line(), "Move 0/7");

        session.to_end();
        assert_eq!(session.status_line(), "Move 7/7 - Checkmate!");
        assert_eq!(session.last_move(), Some((Square::H5, Square::F7)));

        session.load("1. e4 f5 2. Qh5+ g6");
        session.seek(3);
        assert_eq!(session.status_line(), "Move 3/4 - Check");
    }

    #[test]
    fn status_line_reports_stalemate() {
        let start = Board::try_parse_fen("7k/8/5Q2/6K1/8/8/8/8 w - - 0 1").unwrap();
        let mut session = Session::new(start);
        session.load("Qf7");
        session.to_end();

        assert_eq!(session.status_line(), "Move 1/1 - Stalemate");
    }

    #[test]
    fn perpetual_check_keeps_check_marks() {
        let start = Board::try_parse_fen("6k1/6p1/7p/8/8/8/8/K3Q3 w - - 0 1").unwrap();
        let mut session = Session::new(start);
        session.load("Qe8+ Kh7 Qh5 Kg8 Qe8+ Kh7 Qh5 Kg8 Qe8+");
        session.to_end();

        assert!(session.move_list_text().ends_with("5. Qe8+\n"));
        assert_eq!(
            session.status_line(),
            "Move 9/9 - Check - Draw by threefold repetition"
        );
    }

    #[test]
    fn navigation_clears_highlight() {
        let mut session = Session::default();
        session.load("1. e4 e5");

        let best = session.board().get_move(Square::E2, Square::E4, None).unwrap();
        session.highlight_move(best);
        assert_eq!(session.highlighted_squares(), &[Square::E2, Square::E4]);

        session.step_forward();
        assert!(session.highlighted_squares().is_empty());
        assert_eq!(session.last_move(), Some((Square::E2, Square::E4)));
    }
}
