use std::fmt::{Display, Write};

use super::{Board, BoardState, Move, PieceType, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disambiguator {
    File(u8),
    Rank(u8),
    Square(Square),
}

impl Display for Disambiguator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Disambiguator::File(file) => f.write_char((file + b'a') as char),
            Disambiguator::Rank(rank) => f.write_char((rank + b'1') as char),
            Disambiguator::Square(square) => write!(f, "{square}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RegularSANRepr {
    piece_type: PieceType,
    disambiguator: Option<Disambiguator>,
    is_capture: bool,
    to_square: Square,
    promotion: Option<PieceType>,
}

impl Display for RegularSANRepr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.piece_type != PieceType::Pawn {
            f.write_char(self.piece_type.as_uppercase_char())?;
        }

        if let Some(disambiguator) = self.disambiguator {
            write!(f, "{disambiguator}")?;
        }

        if self.is_capture {
            f.write_char('x')?;
        }

        write!(f, "{}", self.to_square)?;

        if let Some(promotion) = self.promotion {
            f.write_char('=')?;
            f.write_char(promotion.as_uppercase_char())?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SANRepr {
    Regular(RegularSANRepr),
    Castle { is_long: bool },
}

impl Display for SANRepr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SANRepr::Regular(r) => write!(f, "{r}"),
            SANRepr::Castle { is_long: false } => write!(f, "O-O"),
            SANRepr::Castle { is_long: true } => write!(f, "O-O-O"),
        }
    }
}

/// A move rendered in Standard Algebraic Notation, e.g. `Nbd2`, `exd5`,
/// `e8=Q+` or `O-O-O#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SAN {
    repr: SANRepr,
    is_check: bool,
    is_checkmate: bool,
}

impl SAN {
    pub fn is_check(&self) -> bool {
        self.is_check
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_checkmate
    }
}

impl Display for SAN {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.repr)?;

        if self.is_checkmate {
            f.write_char('#')?;
        } else if self.is_check {
            f.write_char('+')?;
        }

        Ok(())
    }
}

impl Board {
    /// Renders `the_move` in SAN relative to the current position. Returns
    /// `None` if the move is not legal here.
    pub fn get_san(&self, the_move: Move) -> Option<SAN> {
        let legal_moves = self.legal_moves();
        if !legal_moves.contains(&the_move) {
            return None;
        }

        let repr = if the_move.is_castle() {
            SANRepr::Castle {
                is_long: the_move.is_long_castle(),
            }
        } else {
            SANRepr::Regular(RegularSANRepr {
                piece_type: the_move.piece().piece_type(),
                disambiguator: get_san_disambiguator(the_move, &legal_moves),
                is_capture: the_move.is_capture(),
                to_square: the_move.to_square(),
                promotion: the_move.promotion(),
            })
        };

        let mut board = self.clone();
        board.push_move_unchecked(the_move);

        // A check that also draws (perpetual check, fifty moves) keeps its `+`.
        let is_check = board.is_check();
        let is_checkmate = matches!(board.state(), BoardState::Win(_));

        Some(SAN {
            repr,
            is_check,
            is_checkmate,
        })
    }
}

fn get_san_disambiguator(the_move: Move, legal_moves: &[Move]) -> Option<Disambiguator> {
    let from = the_move.from_square();

    // Pawn captures always name the file the pawn came from.
    if the_move.is_move_of(PieceType::Pawn) {
        return the_move
            .is_capture()
            .then_some(Disambiguator::File(from.file()));
    }

    let mut ambiguous_piece_exists = false;
    let mut same_rank = false;
    let mut same_file = false;

    for m in legal_moves {
        if m.piece() == the_move.piece()
            && m.from_square() != from
            && m.to_square() == the_move.to_square()
        {
            ambiguous_piece_exists = true;

            same_rank |= m.from_square().rank() == from.rank();
            same_file |= m.from_square().file() == from.file();
        }
    }

    if !ambiguous_piece_exists {
        None
    } else if !same_file {
        Some(Disambiguator::File(from.file()))
    } else if !same_rank {
        Some(Disambiguator::Rank(from.rank()))
    } else {
        Some(Disambiguator::Square(from))
    }
}
