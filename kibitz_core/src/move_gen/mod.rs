//! Legal move generation.

use arrayvec::ArrayVec;

use crate::board::{BoardRepr, Castling, Color, Move, PieceType, Square};

use self::attacks::{
    attackers_of, is_attacked, king_in_check, ray, BISHOP_DIRECTIONS, KING_OFFSETS,
    KNIGHT_OFFSETS, ROOK_DIRECTIONS,
};

pub mod attacks;

/// Maximum number of moves that could occur in a legal position, used for
/// stack-allocating a vector to hold moves.
///
/// The actual number appears to be 218 in this position:
///
/// R6R/3Q4/1Q4Q1/4Q3/2Q4Q/Q4Q2/pp1Q4/kBNN1KB1 w - - 0 1
///
/// But 256 is a nice number and a good buffer in case there could be more.
pub const MAX_MOVES: usize = 256;

pub type MoveVec = ArrayVec<Move, MAX_MOVES>;

#[derive(Debug, Clone, Default)]
pub struct MoveGenResult {
    pub checker_count: u32,
}

/// Generates the legal moves of one position.
///
/// Moves are first generated pseudo-legally (following how each piece moves,
/// ignoring whether the mover's king is left in check), then every candidate
/// is made on a scratch copy of the board and kept only if the king is safe
/// afterwards. This handles pins, discovered checks through en passant and
/// king moves into attacked squares uniformly.
pub struct MoveGenerator<'board, 'moves> {
    board: &'board BoardRepr,
    to_move: Color,
    en_passant: Option<Square>,
    castling: Castling,
    out_moves: &'moves mut MoveVec,
}

impl<'board, 'moves> MoveGenerator<'board, 'moves> {
    pub fn new(
        board: &'board BoardRepr,
        to_move: Color,
        en_passant: Option<Square>,
        castling: Castling,
        out_moves: &'moves mut MoveVec,
    ) -> Self {
        Self {
            board,
            to_move,
            en_passant,
            castling,
            out_moves,
        }
    }

    pub fn legal_moves(&mut self) -> MoveGenResult {
        let checker_count = self
            .board
            .king_square(self.to_move)
            .map_or(0, |king| {
                attackers_of(self.board, king, self.to_move.flip()).len() as u32
            });

        let mut pseudo_legal = MoveVec::new();
        self.pseudo_legal_moves(&mut pseudo_legal);
        if checker_count == 0 {
            self.castling_moves(&mut pseudo_legal);
        }

        let mut scratch = self.board.clone();
        for m in pseudo_legal {
            scratch.make_move_unchecked(m);
            let legal = !king_in_check(&scratch, self.to_move);
            scratch.unmake_move_unchecked(m);

            if legal {
                self.out_moves.push(m);
            }
        }

        MoveGenResult { checker_count }
    }

    fn pseudo_legal_moves(&self, out: &mut MoveVec) {
        for (piece, from) in self.board.pieces_colored(self.to_move) {
            match piece.piece_type() {
                PieceType::Pawn => self.pawn_moves(from, out),
                PieceType::Knight => self.step_moves(from, &KNIGHT_OFFSETS, out),
                PieceType::King => self.step_moves(from, &KING_OFFSETS, out),
                PieceType::Bishop => self.slider_moves(from, &BISHOP_DIRECTIONS, out),
                PieceType::Rook => self.slider_moves(from, &ROOK_DIRECTIONS, out),
                PieceType::Queen => {
                    self.slider_moves(from, &BISHOP_DIRECTIONS, out);
                    self.slider_moves(from, &ROOK_DIRECTIONS, out);
                }
            }
        }
    }

    /// Adds a move to `to` unless it is occupied by a friendly piece. Returns
    /// true if `to` was empty (i.e. a slider may continue past it).
    fn push_regular(&self, from: Square, to: Square, out: &mut MoveVec) -> bool {
        let Some(piece) = self.board.piece_at(from) else {
            return false;
        };

        match self.board.piece_at(to) {
            None => {
                out.push(Move::builder(from, to, piece).build());
                true
            }
            Some(target) if target.color() != self.to_move => {
                out.push(Move::builder(from, to, piece).captures(target).build());
                false
            }
            Some(_) => false,
        }
    }

    fn step_moves(&self, from: Square, offsets: &[(i8, i8)], out: &mut MoveVec) {
        for &(rank_delta, file_delta) in offsets {
            if let Some(to) = from.offset(rank_delta, file_delta) {
                self.push_regular(from, to, out);
            }
        }
    }

    fn slider_moves(&self, from: Square, directions: &[(i8, i8)], out: &mut MoveVec) {
        for &direction in directions {
            for to in ray(from, direction) {
                if !self.push_regular(from, to, out) {
                    break;
                }
            }
        }
    }

    fn pawn_moves(&self, from: Square, out: &mut MoveVec) {
        let color = self.to_move;
        let pawn = PieceType::Pawn.with_color(color);
        let direction = color.pawn_direction();

        let push_pawn_move = |out: &mut MoveVec, to: Square, captured| {
            let builder = Move::builder(from, to, pawn).maybe_captures(captured);
            if to.rank() == color.promotion_rank() {
                for promotion in PieceType::PROMOTIONS {
                    out.push(builder.promotes_to(promotion).build());
                }
            } else {
                out.push(builder.build());
            }
        };

        // Single and double pushes
        if let Some(to) = from.offset(direction, 0) {
            if self.board.is_empty_at(to) {
                push_pawn_move(out, to, None);

                if from.rank() == color.pawn_rank() {
                    if let Some(double) = to.offset(direction, 0) {
                        if self.board.is_empty_at(double) {
                            out.push(
                                Move::builder(from, double, pawn)
                                    .is_double_pawn_push()
                                    .build(),
                            );
                        }
                    }
                }
            }
        }

        // Captures, including en passant
        for file_delta in [-1, 1] {
            let Some(to) = from.offset(direction, file_delta) else {
                continue;
            };

            if let Some(target) = self.board.piece_with_color_at(color.flip(), to) {
                push_pawn_move(out, to, Some(target));
            } else if self.en_passant == Some(to) {
                let captured_square = Square::new_unchecked(from.rank(), to.file());
                let captured = PieceType::Pawn.with_color(color.flip());
                if self.board.piece_at(captured_square) == Some(captured) {
                    out.push(
                        Move::builder(from, to, pawn)
                            .captures(captured)
                            .is_en_passant()
                            .build(),
                    );
                }
            }
        }
    }

    fn castling_moves(&self, out: &mut MoveVec) {
        let color = self.to_move;
        let rank = color.back_rank();
        let king = PieceType::King.with_color(color);
        let rook = PieceType::Rook.with_color(color);
        let king_from = Square::new_unchecked(rank, 4);

        if self.board.piece_at(king_from) != Some(king) {
            return;
        }

        let sides = [
            (Castling::KINGSIDE, 7, 6, &[5, 6][..]),
            (Castling::QUEENSIDE, 0, 2, &[1, 2, 3][..]),
        ];

        for (side, rook_file, king_to_file, between_files) in sides {
            if !self
                .castling
                .contains(side & Castling::for_color(color))
            {
                continue;
            }

            let rook_from = Square::new_unchecked(rank, rook_file);
            if self.board.piece_at(rook_from) != Some(rook) {
                continue;
            }

            let path_clear = between_files
                .iter()
                .all(|&file| self.board.is_empty_at(Square::new_unchecked(rank, file)));
            if !path_clear {
                continue;
            }

            // The king may not pass through an attacked square. The landing
            // square is checked by the legality filter.
            let passed_over = Square::new_unchecked(rank, (4 + king_to_file) / 2);
            if is_attacked(self.board, passed_over, color.flip()) {
                continue;
            }

            let king_to = Square::new_unchecked(rank, king_to_file);
            out.push(Move::builder(king_from, king_to, king).is_castle().build());
        }
    }
}
