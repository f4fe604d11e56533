//! Replaying a move list forwards and backwards on a live board.

use log::{trace, warn};

use crate::board::{Board, Move};

/// A cursor over a fixed list of moves, together with the board showing the
/// position at the cursor.
///
/// The live board always equals the start position with the first
/// [`applied`](Navigator::applied) moves played. Transitions that would move
/// the cursor out of range do nothing.
#[derive(Debug, Clone)]
pub struct Navigator {
    start: Board,
    moves: Vec<Move>,
    board: Board,
    applied: usize,
}

impl Navigator {
    /// Creates a navigator at the start position. Every move must be legal
    /// after the ones before it; a move that is not stops forward navigation.
    pub fn new(start: Board, moves: Vec<Move>) -> Self {
        Self {
            board: start.clone(),
            start,
            moves,
            applied: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn start(&self) -> &Board {
        &self.start
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Number of moves currently played on the live board.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Index of the last played move, or `None` at the start position.
    pub fn cursor(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    /// The last played move.
    pub fn current_move(&self) -> Option<Move> {
        self.cursor().map(|index| self.moves[index])
    }

    pub fn is_at_start(&self) -> bool {
        self.applied == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.applied >= self.moves.len()
    }

    /// Plays the next move. Returns false if there is none.
    pub fn step_forward(&mut self) -> bool {
        let Some(&next) = self.moves.get(self.applied) else {
            return false;
        };

        if !self.board.push_move_repr(next) {
            warn!("Move {next} is not legal in {}", self.board.fen());
            return false;
        }

        self.applied += 1;
        trace!("Stepped forward to {}/{}", self.applied, self.moves.len());
        true
    }

    /// Takes back the last played move. Returns false at the start position.
    pub fn step_back(&mut self) -> bool {
        if self.applied == 0 || self.board.pop_move().is_err() {
            return false;
        }

        self.applied -= 1;
        trace!("Stepped back to {}/{}", self.applied, self.moves.len());
        true
    }

    pub fn to_start(&mut self) {
        while self.step_back() {}
    }

    pub fn to_end(&mut self) {
        while self.step_forward() {}
    }

    /// Moves to the position with `applied` moves played, clamped to the
    /// length of the move list.
    pub fn seek(&mut self, applied: usize) {
        let applied = applied.min(self.moves.len());

        while self.applied < applied && self.step_forward() {}
        while self.applied > applied && self.step_back() {}
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::log_parser::LogParser;
    use pretty_assertions::assert_eq;

    fn navigator(text: &str) -> (Navigator, Board) {
        let parsed = LogParser::new().parse(text);
        (
            Navigator::new(parsed.start, parsed.moves),
            parsed.final_board,
        )
    }

    #[test]
    fn stepping_to_the_end_reaches_final_board() {
        let (mut nav, final_board) = navigator("1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 4. O-O");
        assert_eq!(nav.cursor(), None);

        for _ in 0..nav.len() {
            assert!(nav.step_forward());
        }

        assert_eq!(nav.cursor(), Some(nav.len() - 1));
        assert_eq!(nav.board(), &final_board);
        assert!(nav.is_at_end());
        assert!(!nav.step_forward());
        assert_eq!(nav.board(), &final_board);
    }

    #[test]
    fn forward_then_back_is_a_no_op() {
        let (mut nav, _) = navigator("1. d4 d5 2. c4 dxc4 3. e3 b5 4. a4 c6 5. axb5 cxb5");

        for applied in 0..nav.len() {
            nav.seek(applied);
            let board = nav.board().clone();
            let cursor = nav.cursor();

            assert!(nav.step_forward());
            assert!(nav.step_back());

            assert_eq!(nav.board(), &board);
            assert_eq!(nav.cursor(), cursor);
        }
    }

    #[test]
    fn out_of_range_transitions_do_nothing() {
        let (mut nav, _) = navigator("1. e4");
        let start = nav.board().clone();

        assert!(!nav.step_back());
        nav.to_start();
        assert_eq!(nav.board(), &start);
        assert_eq!(nav.cursor(), None);

        let (mut empty, _) = navigator("");
        assert!(!empty.step_forward());
        empty.to_end();
        assert_eq!(empty.cursor(), None);
        assert!(empty.is_at_start() && empty.is_at_end());
    }

    #[test]
    fn start_end_and_seek() {
        let (mut nav, final_board) = navigator("1. f3 e5 2. g4 Qh4#");

        nav.to_end();
        assert_eq!(nav.applied(), 4);
        assert_eq!(nav.board(), &final_board);
        assert!(nav.board().is_checkmate());
        assert!(nav.board().legal_moves().is_empty());

        nav.seek(2);
        assert_eq!(nav.cursor(), Some(1));
        assert_eq!(nav.current_move().map(|m| m.to_string()), Some("e7e5".to_string()));

        nav.seek(100);
        assert_eq!(nav.applied(), 4);

        nav.to_start();
        assert_eq!(nav.board(), nav.start());
        assert_eq!(nav.current_move(), None);
    }

    #[test]
    fn illegal_move_stops_forward_navigation() {
        let start = Board::starting_position();
        let bogus = crate::decode::decode("e4", &start).unwrap();
        let mut nav = Navigator::new(start, vec![bogus, bogus]);

        assert!(nav.step_forward());
        assert!(!nav.step_forward());
        assert_eq!(nav.applied(), 1);
    }
}
