//! Attack detection on a [`BoardRepr`].

use arrayvec::ArrayVec;

use crate::board::{BoardRepr, Color, PieceType, Square};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Walks from `from` (exclusive) in direction `(rank_delta, file_delta)` until
/// the edge of the board, yielding every square passed over.
pub fn ray(from: Square, (rank_delta, file_delta): (i8, i8)) -> impl Iterator<Item = Square> {
    std::iter::successors(from.offset(rank_delta, file_delta), move |square| {
        square.offset(rank_delta, file_delta)
    })
}

/// The first occupied square along a ray, if any.
fn first_blocker(board: &BoardRepr, from: Square, direction: (i8, i8)) -> Option<Square> {
    ray(from, direction).find(|&square| !board.is_empty_at(square))
}

/// Returns all squares holding a piece of color `by` that attacks `square`.
///
/// A king adjacent to `square` counts as an attacker.
pub fn attackers_of(board: &BoardRepr, square: Square, by: Color) -> ArrayVec<Square, 16> {
    let mut attackers = ArrayVec::new();

    let mut push_if = |candidate: Option<Square>, piece_types: &[PieceType]| {
        if let Some(candidate) = candidate {
            if let Some(piece) = board.piece_with_color_at(by, candidate) {
                if piece_types.contains(&piece.piece_type()) && !attackers.is_full() {
                    attackers.push(candidate);
                }
            }
        }
    };

    // A pawn of color `by` attacks diagonally forward, so look one rank
    // backwards from its point of view.
    let pawn_rank = -by.pawn_direction();
    push_if(square.offset(pawn_rank, -1), &[PieceType::Pawn]);
    push_if(square.offset(pawn_rank, 1), &[PieceType::Pawn]);

    for (rank_delta, file_delta) in KNIGHT_OFFSETS {
        push_if(square.offset(rank_delta, file_delta), &[PieceType::Knight]);
    }

    for (rank_delta, file_delta) in KING_OFFSETS {
        push_if(square.offset(rank_delta, file_delta), &[PieceType::King]);
    }

    for direction in BISHOP_DIRECTIONS {
        push_if(
            first_blocker(board, square, direction),
            &[PieceType::Bishop, PieceType::Queen],
        );
    }

    for direction in ROOK_DIRECTIONS {
        push_if(
            first_blocker(board, square, direction),
            &[PieceType::Rook, PieceType::Queen],
        );
    }

    attackers
}

/// Returns true if any piece of color `by` attacks `square`.
pub fn is_attacked(board: &BoardRepr, square: Square, by: Color) -> bool {
    !attackers_of(board, square, by).is_empty()
}

/// Returns true if the king of `color` is attacked. A board without that
/// king is never in check.
pub fn king_in_check(board: &BoardRepr, color: Color) -> bool {
    board
        .king_square(color)
        .is_some_and(|king| is_attacked(board, king, color.flip()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::Board;
    use pretty_assertions::assert_eq;

    fn repr(fen: &str) -> BoardRepr {
        Board::try_parse_fen(fen).unwrap().repr().clone()
    }

    #[test]
    fn ray_stops_at_edge() {
        assert_eq!(
            ray(Square::F6, (1, 1)).collect::<Vec<_>>(),
            vec![Square::G7, Square::H8]
        );
        assert_eq!(ray(Square::A1, (-1, 0)).count(), 0);
    }

    #[test]
    fn pawn_attacks_depend_on_color() {
        let board = repr("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");

        assert!(is_attacked(&board, Square::D5, Color::White));
        assert!(is_attacked(&board, Square::E4, Color::Black));
        assert!(!is_attacked(&board, Square::E5, Color::White));
        assert!(is_attacked(&board, Square::F5, Color::White));
    }

    #[test]
    fn sliders_are_blocked() {
        let board = repr("4k3/8/8/8/1b6/2P5/8/R3K3 w - - 0 1");

        // The bishop on b4 is blocked by the c3 pawn before reaching e1.
        assert!(!is_attacked(&board, Square::E1, Color::Black));
        assert!(is_attacked(&board, Square::C3, Color::Black));
        assert!(is_attacked(&board, Square::A8, Color::White));
        assert!(!king_in_check(&board, Color::White));
    }

    #[test]
    fn counts_double_check() {
        let board = repr("4k3/8/8/8/8/5n2/8/r3K3 w - - 0 1");

        let mut attackers = attackers_of(&board, Square::E1, Color::Black).to_vec();
        attackers.sort();
        assert_eq!(attackers, vec![Square::A1, Square::F3]);
        assert!(king_in_check(&board, Color::White));
    }
}
