//! The board, its moves and everything needed to play them legally.

mod board_repr;
mod castling;
mod fen;
mod move_repr;
mod piece;
mod san;
mod square;
mod uci_move;
mod zobrist;

use std::fmt::Display;

use thiserror::Error;

use crate::move_gen::{attacks::king_in_check, MoveGenResult, MoveGenerator, MoveVec};

pub use board_repr::BoardRepr;
pub use castling::Castling;
pub use fen::ParseFenError;
pub use move_repr::{Move, MoveBuilder, MoveKind};
pub use piece::{Color, Piece, PieceType};
pub use san::SAN;
pub use square::{ParseSquareError, Square};
pub use uci_move::{ParseUCIMoveError, UCIMove};
pub use zobrist::ZobristHash;

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
    ThreeFoldRepetition,
}

impl Display for DrawReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DrawReason::Stalemate => "Stalemate",
            DrawReason::FiftyMoveRule => "Draw by fifty-move rule",
            DrawReason::InsufficientMaterial => "Draw by insufficient material",
            DrawReason::ThreeFoldRepetition => "Draw by threefold repetition",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardState {
    /// The game is ongoing. `checkers` is the number of pieces giving check to
    /// the side to move.
    InPlay { checkers: u32 },
    /// The given color has delivered checkmate.
    Win(Color),
    Draw(DrawReason),
}

/// Returned by [`Board::pop_move`] when no move has been played on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No move to undo")]
pub struct NoMoveToUndo;

/// The state a move destroys, kept so the move can be undone exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct HistoryEntry {
    the_move: Move,
    castling: Castling,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmoves: u32,
    zobrist_hash: ZobristHash,
}

/// A chess position together with the moves that led to it from where the
/// board was created.
///
/// Moves are applied with the `push_move*` family and undone with
/// [`Board::pop_move`]; undoing restores every field exactly, including the
/// castling rights, en passant square and move counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    board: BoardRepr,
    to_move: Color,
    castling: Castling,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmoves: u32,
    zobrist_hash: ZobristHash,
    history: Vec<HistoryEntry>,
}

impl Board {
    pub fn new(
        board: BoardRepr,
        to_move: Color,
        castling: Castling,
        en_passant: Option<Square>,
        halfmove_clock: u32,
        fullmoves: u32,
    ) -> Self {
        let zobrist_hash = ZobristHash::of_position(&board, to_move, castling, en_passant);

        Self {
            board,
            to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmoves,
            zobrist_hash,
            history: Vec::new(),
        }
    }

    pub fn starting_position() -> Self {
        Self::try_parse_fen(STARTING_POSITION_FEN).expect("starting position FEN is valid")
    }

    pub fn try_parse_fen(fen: &str) -> Result<Self, ParseFenError> {
        fen::try_parse_fen(fen)
    }

    /// Returns the position in Forsyth-Edwards Notation.
    pub fn fen(&self) -> String {
        fen::board_to_fen(self)
    }

    pub fn repr(&self) -> &BoardRepr {
        &self.board
    }

    pub fn get_piece(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn castling(&self) -> Castling {
        self.castling
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmoves(&self) -> u32 {
        self.fullmoves
    }

    pub fn zobrist_hash(&self) -> ZobristHash {
        self.zobrist_hash
    }

    /// The moves played on this board since it was created, oldest first.
    pub fn moves(&self) -> impl DoubleEndedIterator<Item = Move> + ExactSizeIterator + '_ {
        self.history.iter().map(|entry| entry.the_move)
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|entry| entry.the_move)
    }

    fn legal_moves_and_meta(&self) -> (MoveVec, MoveGenResult) {
        let mut moves = MoveVec::new();
        let result = MoveGenerator::new(
            &self.board,
            self.to_move,
            self.en_passant,
            self.castling,
            &mut moves,
        )
        .legal_moves();

        (moves, result)
    }

    pub fn legal_moves(&self) -> MoveVec {
        self.legal_moves_and_meta().0
    }

    /// Finds the legal move going from `from` to `to`, if any. `promotion`
    /// must be given exactly when the move is a promotion.
    pub fn get_move(&self, from: Square, to: Square, promotion: Option<PieceType>) -> Option<Move> {
        self.legal_moves().into_iter().find(|m| {
            m.from_square() == from && m.to_square() == to && m.promotion() == promotion
        })
    }

    /// Plays the legal move going from `from` to `to`. Returns the move that
    /// was played, or `None` (leaving the board untouched) if there is no such
    /// legal move.
    pub fn push_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Option<Move> {
        let the_move = self.get_move(from, to, promotion)?;
        self.push_move_unchecked(the_move);
        Some(the_move)
    }

    /// Plays `the_move` if it is legal in the current position. Returns
    /// whether the move was played.
    pub fn push_move_repr(&mut self, the_move: Move) -> bool {
        if self.legal_moves().contains(&the_move) {
            self.push_move_unchecked(the_move);
            true
        } else {
            false
        }
    }

    /// Plays `the_move` without checking that it is legal.
    ///
    /// Playing a move that was not generated for this exact position leaves
    /// the board in an unspecified (but memory-safe) state.
    pub fn push_move_unchecked(&mut self, the_move: Move) {
        self.history.push(HistoryEntry {
            the_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmoves: self.fullmoves,
            zobrist_hash: self.zobrist_hash,
        });

        self.board.make_move_unchecked(the_move);

        self.castling -= Castling::lost_by_touching(the_move.from_square())
            | Castling::lost_by_touching(the_move.to_square());

        self.en_passant = the_move
            .is_double_pawn_push()
            .then(|| the_move.en_passant_target());

        if the_move.is_reversible() {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        } else {
            self.halfmove_clock = 0;
        }

        if self.to_move.is_black() {
            self.fullmoves = self.fullmoves.saturating_add(1);
        }
        self.to_move = self.to_move.flip();

        self.zobrist_hash =
            ZobristHash::of_position(&self.board, self.to_move, self.castling, self.en_passant);
    }

    /// Undoes the last move played on this board.
    pub fn pop_move(&mut self) -> Result<Move, NoMoveToUndo> {
        let entry = self.history.pop().ok_or(NoMoveToUndo)?;

        self.board.unmake_move_unchecked(entry.the_move);
        self.castling = entry.castling;
        self.en_passant = entry.en_passant;
        self.halfmove_clock = entry.halfmove_clock;
        self.fullmoves = entry.fullmoves;
        self.zobrist_hash = entry.zobrist_hash;
        self.to_move = self.to_move.flip();

        Ok(entry.the_move)
    }

    pub fn is_check(&self) -> bool {
        king_in_check(&self.board, self.to_move)
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.legal_moves().is_empty()
    }

    pub fn state(&self) -> BoardState {
        let (legal_moves, result) = self.legal_moves_and_meta();

        if legal_moves.is_empty() {
            if result.checker_count > 0 {
                BoardState::Win(self.to_move.flip())
            } else {
                BoardState::Draw(DrawReason::Stalemate)
            }
        } else if self.halfmove_clock >= 100 {
            BoardState::Draw(DrawReason::FiftyMoveRule)
        } else if self.has_insufficient_material() {
            BoardState::Draw(DrawReason::InsufficientMaterial)
        } else if self.is_threefold_repetition() {
            BoardState::Draw(DrawReason::ThreeFoldRepetition)
        } else {
            BoardState::InPlay {
                checkers: result.checker_count,
            }
        }
    }

    /// Neither side can possibly checkmate: bare kings, a single minor piece,
    /// or only bishops that all stand on squares of one color.
    fn has_insufficient_material(&self) -> bool {
        let mut minors = self
            .board
            .pieces()
            .filter(|(piece, _)| piece.piece_type() != PieceType::King);

        let Some((first, first_square)) = minors.next() else {
            return true;
        };

        match first.piece_type() {
            PieceType::Knight => minors.next().is_none(),
            PieceType::Bishop => minors.all(|(piece, square)| {
                piece.piece_type() == PieceType::Bishop
                    && square.is_light() == first_square.is_light()
            }),
            _ => false,
        }
    }

    fn is_threefold_repetition(&self) -> bool {
        // Only positions since the last irreversible move can repeat.
        let repetitions = self
            .history
            .iter()
            .rev()
            .take(self.halfmove_clock as usize)
            .filter(|entry| entry.zobrist_hash == self.zobrist_hash)
            .count();

        repetitions >= 2
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}
