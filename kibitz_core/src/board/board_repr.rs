use std::ops::Index;

use super::{Color, Move, MoveKind, Piece, PieceType, Square};

/// Represents just the pieces on the board, as one optional [`Piece`] per
/// [`Square`].
///
/// The squares can be read by indexing:
/// ```
/// # use kibitz_core::board::{BoardRepr, Piece, Square};
/// fn foo(board_repr: &BoardRepr) {
///     println!("On e1: {:?}", board_repr[Square::E1]);
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardRepr {
    squares: [Option<Piece>; 64],
}

impl Default for BoardRepr {
    fn default() -> Self {
        Self {
            squares: [None; 64],
        }
    }
}

impl BoardRepr {
    /// Creates a new [`BoardRepr`] from the provided board state.
    ///
    /// The provided board state should be a slice of [`Option<Piece>`]s,
    /// ordered by increasing file and then rank (i.e. index 0 is a1, index 1 is
    /// b1... index 7 is h1, index 8 is a2, etc.).
    ///
    /// Pieces past index 63 are ignored, and if a shorter slice is passed the
    /// missing squares are assumed to be empty.
    pub fn new(board: &[Option<Piece>]) -> Self {
        let mut repr = Self::default();
        for (square, &piece) in repr.squares.iter_mut().zip(board) {
            *square = piece;
        }
        repr
    }

    /// Returns the piece, if any, on the provided square.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Returns the piece with the specified color, if any, on the provided
    /// square.
    pub fn piece_with_color_at(&self, color: Color, square: Square) -> Option<Piece> {
        self.piece_at(square).filter(|piece| piece.color() == color)
    }

    pub fn is_empty_at(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Returns an iterator over all pieces and the squares they stand on, in
    /// ascending order of squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        Square::all().filter_map(|square| self.piece_at(square).map(|piece| (piece, square)))
    }

    /// Returns an iterator over the pieces of the given [`Color`].
    pub fn pieces_colored(&self, color: Color) -> impl Iterator<Item = (Piece, Square)> + '_ {
        self.pieces().filter(move |(piece, _)| piece.color() == color)
    }

    /// Returns a tuple (white count, black count) of the provided piece type.
    pub fn piece_count(&self, piece_type: PieceType) -> (u32, u32) {
        let count = |color| {
            self.pieces_colored(color)
                .filter(|(piece, _)| piece.piece_type() == piece_type)
                .count() as u32
        };
        (count(Color::White), count(Color::Black))
    }

    /// Finds the king of the given color.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = PieceType::King.with_color(color);
        self.pieces()
            .find(|&(piece, _)| piece == king)
            .map(|(_, square)| square)
    }

    fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index()] = piece;
    }

    /// Make the provided [`Move`] on the board.
    ///
    /// No checks are performed to ensure the move is valid.
    pub fn make_move_unchecked(&mut self, the_move: Move) {
        let from = the_move.from_square();
        let to = the_move.to_square();
        let piece = the_move.piece();

        self.set(from, None);

        match the_move.kind() {
            MoveKind::Normal | MoveKind::DoublePawnPush => self.set(to, Some(piece)),
            MoveKind::Promotion(promotion) => {
                self.set(to, Some(promotion.with_color(piece.color())))
            }
            MoveKind::EnPassant => {
                self.set(to, Some(piece));
                self.set(the_move.en_passant_square(), None);
            }
            MoveKind::Castle => {
                let (rook_from, rook_to) = the_move.castling_rook_squares();
                let rook = self.piece_at(rook_from);
                self.set(rook_from, None);
                self.set(rook_to, rook);
                self.set(to, Some(piece));
            }
        }
    }

    /// Reverses [`Self::make_move_unchecked`].
    ///
    /// The board must be in the state immediately after `the_move` was made
    /// (i.e. moves must be unmade in the reverse order they were made).
    pub fn unmake_move_unchecked(&mut self, the_move: Move) {
        let from = the_move.from_square();
        let to = the_move.to_square();
        let piece = the_move.piece();

        self.set(from, Some(piece));

        match the_move.kind() {
            MoveKind::Normal | MoveKind::DoublePawnPush | MoveKind::Promotion(_) => {
                self.set(to, the_move.captured_piece())
            }
            MoveKind::EnPassant => {
                self.set(to, None);
                self.set(the_move.en_passant_square(), the_move.captured_piece());
            }
            MoveKind::Castle => {
                let (rook_from, rook_to) = the_move.castling_rook_squares();
                let rook = self.piece_at(rook_to);
                self.set(rook_to, None);
                self.set(rook_from, rook);
                self.set(to, None);
            }
        }
    }
}

impl Index<Square> for BoardRepr {
    type Output = Option<Piece>;

    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index.index()]
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn simple_parse_board(spec: &str) -> Vec<Option<Piece>> {
        let mut board = vec![None; 64];

        let mut square_iter = (0..8)
            .rev()
            .flat_map(|rank| (0..8).map(move |file| Square::new(rank, file).unwrap()));

        for c in spec.chars() {
            if c.is_whitespace() {
                continue;
            } else if c == '.' {
                square_iter.next();
            } else if let (Some(square), Some(piece)) =
                (square_iter.next(), Piece::try_from_fen_char(c))
            {
                board[square.index()] = Some(piece);
            } else {
                panic!()
            }
        }

        board
    }

    fn starting_position() -> BoardRepr {
        BoardRepr::new(&simple_parse_board(
            "
                rnbqkbnr
                pppppppp
                ........
                ........
                ........
                ........
                PPPPPPPP
                RNBQKBNR
        ",
        ))
    }

    #[test]
    fn board_repr_new_list_too_short() {
        let board = BoardRepr::new(&[
            Some(Piece::WHITE_ROOK),
            Some(Piece::BLACK_KING),
            None,
            Some(Piece::BLACK_BISHOP),
        ]);

        assert_eq!(
            board.pieces().collect::<Vec<_>>(),
            vec![
                (Piece::WHITE_ROOK, Square::A1),
                (Piece::BLACK_KING, Square::B1),
                (Piece::BLACK_BISHOP, Square::D1),
            ]
        )
    }

    #[test]
    fn board_repr_piece_at() {
        let board = starting_position();

        assert_eq!(board.piece_at(Square::D1), Some(Piece::WHITE_QUEEN));
        assert_eq!(board.piece_at(Square::H1), Some(Piece::WHITE_ROOK));
        assert_eq!(board.piece_at(Square::B8), Some(Piece::BLACK_KNIGHT));
        assert_eq!(board[Square::H7], Some(Piece::BLACK_PAWN));
        assert_eq!(board.piece_at(Square::E4), None);

        assert_eq!(
            board.piece_with_color_at(Color::Black, Square::D1),
            None
        );
        assert_eq!(
            board.piece_with_color_at(Color::Black, Square::H7),
            Some(Piece::BLACK_PAWN)
        );
    }

    #[test]
    fn board_repr_counts_and_kings() {
        let board = starting_position();

        assert_eq!(board.piece_count(PieceType::Pawn), (8, 8));
        assert_eq!(board.piece_count(PieceType::Queen), (1, 1));
        assert_eq!(board.king_square(Color::White), Some(Square::E1));
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
    }

    #[test]
    fn board_repr_make_unmake_castle() {
        let mut board = BoardRepr::new(&simple_parse_board(
            "
                r...k..r
                ........
                ........
                ........
                ........
                ........
                ........
                R...K..R
        ",
        ));
        let original = board.clone();

        let castle = Move::builder(Square::E8, Square::C8, Piece::BLACK_KING)
            .is_castle()
            .build();
        board.make_move_unchecked(castle);

        assert_eq!(board.piece_at(Square::C8), Some(Piece::BLACK_KING));
        assert_eq!(board.piece_at(Square::D8), Some(Piece::BLACK_ROOK));
        assert_eq!(board.piece_at(Square::A8), None);
        assert_eq!(board.piece_at(Square::E8), None);

        board.unmake_move_unchecked(castle);
        assert_eq!(board, original);
    }

    #[test]
    fn board_repr_make_unmake_en_passant_and_promotion() {
        let mut board = BoardRepr::new(&simple_parse_board(
            "
                ....k...
                .P......
                ........
                ...pP...
                ........
                ........
                ........
                ....K...
        ",
        ));
        let original = board.clone();

        let en_passant = Move::builder(Square::E5, Square::D6, Piece::WHITE_PAWN)
            .captures(Piece::BLACK_PAWN)
            .is_en_passant()
            .build();
        let promotion = Move::builder(Square::B7, Square::B8, Piece::WHITE_PAWN)
            .promotes_to(PieceType::Knight)
            .build();

        board.make_move_unchecked(en_passant);
        board.make_move_unchecked(promotion);

        assert_eq!(board.piece_at(Square::D6), Some(Piece::WHITE_PAWN));
        assert_eq!(board.piece_at(Square::D5), None);
        assert_eq!(board.piece_at(Square::B8), Some(Piece::WHITE_KNIGHT));

        board.unmake_move_unchecked(promotion);
        board.unmake_move_unchecked(en_passant);
        assert_eq!(board, original);
    }
}
