//! Decoding of a single move token against a position.
//!
//! Two grammars are understood:
//!
//! * coordinate form, as used by UCI: `e2e4`, `e7e8q`;
//! * Standard Algebraic Notation: `Nf3`, `exd5`, `O-O`, `e8=Q+`.
//!
//! A token with the coordinate shape is always decoded as a coordinate move.
//! No algebraic move has that shape, so this never hides a valid algebraic
//! reading.

use thiserror::Error;

use crate::board::{Board, Move, PieceType, Square, UCIMove};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Unrecognized move {0:?}")]
    UnrecognizedToken(String),
    #[error("Move {0:?} is not legal in this position")]
    IllegalForPosition(String),
    #[error("Move {token:?} is ambiguous ({candidates} legal moves match)")]
    AmbiguousMove { token: String, candidates: usize },
}

/// Decodes `token` into a legal move of `board`.
pub fn decode(token: &str, board: &Board) -> Result<Move, DecodeError> {
    let cleaned = clean_token(token);
    if cleaned.is_empty() {
        return Err(DecodeError::UnrecognizedToken(token.to_string()));
    }

    if UCIMove::has_coordinate_shape(cleaned) {
        return decode_coordinate(token, cleaned, board);
    }

    let pattern = AlgebraicPattern::parse(cleaned)
        .ok_or_else(|| DecodeError::UnrecognizedToken(token.to_string()))?;

    let mut candidates = board
        .legal_moves()
        .into_iter()
        .filter(|&m| pattern.matches(m));

    match (candidates.next(), candidates.count()) {
        (None, _) => Err(DecodeError::IllegalForPosition(token.to_string())),
        (Some(the_move), 0) => Ok(the_move),
        (Some(_), others) => Err(DecodeError::AmbiguousMove {
            token: token.to_string(),
            candidates: others + 1,
        }),
    }
}

/// Whether `token` has the form of a move in either grammar, regardless of
/// any position.
pub fn looks_like_move(token: &str) -> bool {
    let cleaned = clean_token(token);
    !cleaned.is_empty()
        && (UCIMove::has_coordinate_shape(cleaned) || AlgebraicPattern::parse(cleaned).is_some())
}

fn decode_coordinate(token: &str, cleaned: &str, board: &Board) -> Result<Move, DecodeError> {
    let uci: UCIMove = cleaned
        .parse()
        .map_err(|_| DecodeError::UnrecognizedToken(token.to_string()))?;

    let own_piece = board
        .get_piece(uci.from)
        .is_some_and(|piece| piece.color() == board.to_move());
    if !own_piece {
        return Err(DecodeError::IllegalForPosition(token.to_string()));
    }

    board
        .get_move(uci.from, uci.to, uci.promotion)
        .ok_or_else(|| DecodeError::IllegalForPosition(token.to_string()))
}

/// Removes everything around a move that carries no information: enclosing
/// punctuation, annotation glyphs, check marks and a glued-on move number
/// (`12...Nf6`).
fn clean_token(token: &str) -> &str {
    let token = token.trim_matches(|c: char| "()[],;".contains(c));
    let token = token.trim_end_matches(['!', '?']);
    let token = token.trim_end_matches(['+', '#']);

    let digits = token.bytes().take_while(u8::is_ascii_digit).count();
    let dots = token[digits..].bytes().take_while(|&b| b == b'.').count();
    if digits > 0 && dots > 0 && digits + dots < token.len() {
        &token[digits + dots..]
    } else {
        token
    }
}

/// What an algebraic token says about the move it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlgebraicPattern {
    Castle {
        is_long: bool,
    },
    Regular {
        piece_type: PieceType,
        from_file: Option<u8>,
        from_rank: Option<u8>,
        to: Square,
        promotion: Option<PieceType>,
    },
}

impl AlgebraicPattern {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "O-O" | "0-0" => return Some(Self::Castle { is_long: false }),
            "O-O-O" | "0-0-0" => return Some(Self::Castle { is_long: true }),
            _ => {}
        }

        if !s.is_ascii() {
            return None;
        }

        let (piece_type, rest) = match s.as_bytes().first()? {
            b'N' | b'B' | b'R' | b'Q' | b'K' => {
                (PieceType::try_from_char(s.chars().next()?)?, &s[1..])
            }
            _ => (PieceType::Pawn, s),
        };

        // Promotion suffix: `=Q` or a bare `Q` after the destination rank.
        let (rest, promotion) = match rest.as_bytes() {
            [.., b'=', p] => (&rest[..rest.len() - 2], Some(*p)),
            [.., b'1'..=b'8', p @ (b'N' | b'B' | b'R' | b'Q')] => {
                (&rest[..rest.len() - 1], Some(*p))
            }
            _ => (rest, None),
        };
        let promotion = match promotion {
            Some(p) => {
                let promotion = PieceType::try_from_char(p as char)
                    .filter(|p_type| p_type.is_promotion_target())?;
                if piece_type != PieceType::Pawn {
                    return None;
                }
                Some(promotion)
            }
            None => None,
        };

        if rest.len() < 2 {
            return None;
        }
        let (prefix, destination) = rest.split_at(rest.len() - 2);
        let to: Square = destination.parse().ok()?;

        let prefix = prefix.strip_suffix('x').unwrap_or(prefix);
        let (from_file, from_rank) = match prefix.as_bytes() {
            [] => (None, None),
            [f @ b'a'..=b'h'] => (Some(f - b'a'), None),
            [r @ b'1'..=b'8'] => (None, Some(r - b'1')),
            [f @ b'a'..=b'h', r @ b'1'..=b'8'] => (Some(f - b'a'), Some(r - b'1')),
            _ => return None,
        };

        Some(Self::Regular {
            piece_type,
            from_file,
            from_rank,
            to,
            promotion,
        })
    }

    fn matches(self, the_move: Move) -> bool {
        match self {
            Self::Castle { is_long } => the_move.is_castle() && the_move.is_long_castle() == is_long,
            Self::Regular {
                piece_type,
                from_file,
                from_rank,
                to,
                promotion,
            } => {
                let from = the_move.from_square();
                !the_move.is_castle()
                    && the_move.is_move_of(piece_type)
                    && the_move.to_square() == to
                    && the_move.promotion() == promotion
                    && from_file.map_or(true, |file| from.file() == file)
                    && from_rank.map_or(true, |rank| from.rank() == rank)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::{MoveKind, Piece};
    use pretty_assertions::assert_eq;

    fn board(fen: &str) -> Board {
        Board::try_parse_fen(fen).unwrap()
    }

    #[test]
    fn coordinate_double_push() {
        let the_move = decode("e2e4", &Board::starting_position()).unwrap();

        assert_eq!(the_move.from_square(), Square::E2);
        assert_eq!(the_move.to_square(), Square::E4);
        assert_eq!(the_move.kind(), MoveKind::DoublePawnPush);
    }

    #[test]
    fn algebraic_knight_move() {
        let the_move = decode("Nf3", &Board::starting_position()).unwrap();

        assert_eq!(the_move.from_square(), Square::G1);
        assert_eq!(the_move.to_square(), Square::F3);
        assert_eq!(the_move.piece(), Piece::WHITE_KNIGHT);
    }

    #[test]
    fn coordinate_requires_own_piece_and_legality() {
        let start = Board::starting_position();

        assert_eq!(
            decode("e7e5", &start),
            Err(DecodeError::IllegalForPosition("e7e5".to_string()))
        );
        assert_eq!(
            decode("e3e4", &start),
            Err(DecodeError::IllegalForPosition("e3e4".to_string()))
        );
        assert_eq!(
            decode("e2e5", &start),
            Err(DecodeError::IllegalForPosition("e2e5".to_string()))
        );
    }

    #[test]
    fn coordinate_promotion() {
        let position = board("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1");

        assert_eq!(
            decode("b7b8n", &position).unwrap().promotion(),
            Some(PieceType::Knight)
        );
        assert_eq!(
            decode("b7b8", &position),
            Err(DecodeError::IllegalForPosition("b7b8".to_string()))
        );
    }

    #[test]
    fn ambiguous_knight_move() {
        let position = board("rnbqkb1r/ppp1pppp/5n2/3p4/3P4/5N2/PPP1PPPP/RNBQKB1R w KQkq - 2 3");

        assert_eq!(
            decode("Nd2", &position),
            Err(DecodeError::AmbiguousMove {
                token: "Nd2".to_string(),
                candidates: 2
            })
        );
        assert_eq!(
            decode("Nbd2", &position).unwrap().from_square(),
            Square::B1
        );
        assert_eq!(
            decode("Nfd2", &position).unwrap().from_square(),
            Square::F3
        );
    }

    #[test]
    fn rank_and_square_disambiguators() {
        let position = board("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1");
        assert_eq!(decode("R1a3", &position).unwrap().from_square(), Square::A1);
        assert_eq!(decode("R5a3", &position).unwrap().from_square(), Square::A5);

        let position = board("4k3/8/8/8/8/Q7/8/Q1Q1K3 w - - 0 1");
        assert_eq!(decode("Qa1b2", &position).unwrap().from_square(), Square::A1);
        assert!(matches!(
            decode("Qab2", &position),
            Err(DecodeError::AmbiguousMove { candidates: 2, .. })
        ));
    }

    #[test]
    fn captures_and_checks() {
        let position = board("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
        let capture = decode("exd5", &position).unwrap();
        assert_eq!(capture.captured_piece(), Some(Piece::BLACK_PAWN));

        // The capture marker is optional, as are check marks and glyphs.
        assert_eq!(decode("ed5", &position), Ok(capture));
        assert_eq!(decode("exd5+!?", &position), Ok(capture));
        assert_eq!(decode("(exd5)", &position), Ok(capture));
    }

    #[test]
    fn castling() {
        let position = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");

        let short = decode("O-O", &position).unwrap();
        assert!(short.is_castle() && !short.is_long_castle());
        let long = decode("0-0-0", &position).unwrap();
        assert!(long.is_long_castle());

        let position = board("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1");
        assert_eq!(
            decode("O-O", &position),
            Err(DecodeError::IllegalForPosition("O-O".to_string()))
        );
    }

    #[test]
    fn algebraic_promotion() {
        let position = board("3k4/1P6/8/8/8/8/8/4K3 w - - 0 1");

        for token in ["b8=Q", "b8Q", "b8=Q+"] {
            assert_eq!(
                decode(token, &position).unwrap().promotion(),
                Some(PieceType::Queen),
                "{token}"
            );
        }
        assert_eq!(
            decode("b8", &position),
            Err(DecodeError::IllegalForPosition("b8".to_string()))
        );
        assert_eq!(
            decode("Nb8=Q", &position),
            Err(DecodeError::UnrecognizedToken("Nb8=Q".to_string()))
        );
    }

    #[test]
    fn glued_move_numbers() {
        let start = Board::starting_position();
        assert_eq!(decode("1.e4", &start).unwrap().to_square(), Square::E4);

        let mut position = start.clone();
        position.push_move_unchecked(decode("e4", &start).unwrap());
        assert_eq!(
            decode("1...Nf6", &position).unwrap().to_square(),
            Square::F6
        );
    }

    #[test]
    fn unrecognized_tokens() {
        let start = Board::starting_position();

        for token in ["xyz", "", "Zf3", "N", "e9", "Nf3f4f5", "é4"] {
            assert_eq!(
                decode(token, &start),
                Err(DecodeError::UnrecognizedToken(token.to_string())),
                "{token}"
            );
        }
    }

    #[test]
    fn move_shapes_without_a_position() {
        for token in ["e4", "Nbd2", "e7e8q", "O-O-O", "exd8=Q+", "12...Nf6"] {
            assert!(looks_like_move(token), "{token}");
        }
        for token in ["Chess", "Move", "Log", "=====", "2024-01-01", ""] {
            assert!(!looks_like_move(token), "{token}");
        }
    }
}
