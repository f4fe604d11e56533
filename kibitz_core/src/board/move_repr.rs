use std::fmt::{Debug, Display, Write};

use super::{Piece, PieceType, Square};

/// The special-case classification of a [`Move`].
///
/// Every variant needs different handling when the move is made or unmade on
/// a board, so code that mutates the board matches on this exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MoveKind {
    /// A regular move or capture.
    #[default]
    Normal,
    /// The initial double step of a pawn. Makes en passant available to the
    /// opponent on the next turn.
    DoublePawnPush,
    /// A castle. The move's squares are the king's; the direction is given by
    /// which way the king moves.
    Castle,
    /// An en passant capture. The captured pawn is not on the destination
    /// square, see [`Move::en_passant_square`].
    EnPassant,
    /// A pawn reaching the last rank and becoming the given piece type.
    Promotion(PieceType),
}

/// A fully resolved chess move.
///
/// Moves are produced by move generation for a specific board, and so carry
/// everything that board knew about them: the moving piece, the captured
/// piece and the [`MoveKind`]. This makes a move self-contained enough to be
/// both made and unmade, but it also means a [`Move`] is only meaningful for
/// the position it was generated in.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    captured_piece: Option<Piece>,
    kind: MoveKind,
}

impl Move {
    /// Constructs a new [`Move`].
    ///
    /// Note that this method will not check to see if the move performed is
    /// actually legal.
    pub const fn new(
        from: Square,
        to: Square,
        piece: Piece,
        captured_piece: Option<Piece>,
        kind: MoveKind,
    ) -> Self {
        Self {
            from,
            to,
            piece,
            captured_piece,
            kind,
        }
    }

    /// Returns the source square of the moved piece.
    pub const fn from_square(self) -> Square {
        self.from
    }

    /// Returns the destination square of the moved piece.
    pub const fn to_square(self) -> Square {
        self.to
    }

    /// Returns the piece that was moved.
    pub const fn piece(self) -> Piece {
        self.piece
    }

    /// Returns if the piece that was moved was of the given type.
    pub fn is_move_of(self, piece_type: PieceType) -> bool {
        self.piece.piece_type() == piece_type
    }

    /// Returns the piece that was captured, if any.
    ///
    /// This piece will be on [`to_square`][Self::to_square] unless this move is
    /// an en passant capture.
    pub const fn captured_piece(self) -> Option<Piece> {
        self.captured_piece
    }

    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// If this was a pawn move that reached the final rank, returns the
    /// promotion target for this pawn.
    pub const fn promotion(self) -> Option<PieceType> {
        match self.kind {
            MoveKind::Promotion(piece_type) => Some(piece_type),
            _ => None,
        }
    }

    /// Returns true if this move is a capture.
    pub const fn is_capture(self) -> bool {
        self.captured_piece.is_some()
    }

    /// Returns true if this move was an initial double-step move of a pawn.
    pub const fn is_double_pawn_push(self) -> bool {
        matches!(self.kind, MoveKind::DoublePawnPush)
    }

    /// Returns true if this move was a castling move.
    pub const fn is_castle(self) -> bool {
        matches!(self.kind, MoveKind::Castle)
    }

    /// Returns true if this move was an en passant capture.
    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    /// The square of the pawn removed by an en passant capture: same rank as
    /// the start square, same file as the end square.
    ///
    /// Defined for every move, but only meaningful for en passant captures.
    pub const fn en_passant_square(self) -> Square {
        Square::new_unchecked(self.from.rank(), self.to.file())
    }

    /// The square a double pawn push passes over, i.e. the en passant target
    /// it creates.
    ///
    /// Defined for every move, but only meaningful for double pawn pushes.
    pub const fn en_passant_target(self) -> Square {
        Square::new_unchecked((self.from.rank() + self.to.rank()) / 2, self.from.file())
    }

    /// If this move is a castling move, returns the source and destination
    /// squares of rook involved in the castle. (The `from_square` and
    /// `to_square` of this move are for the king.)
    ///
    /// Defined for every move, but only meaningful for castles.
    pub const fn castling_rook_squares(self) -> (Square, Square) {
        let (from, to) = (self.from, self.to);

        let rook_from =
            Square::new_unchecked(from.rank(), if from.file() < to.file() { 7 } else { 0 });
        let rook_to = Square::new_unchecked(from.rank(), (from.file() + to.file()) / 2);

        (rook_from, rook_to)
    }

    /// Returns true for a castle towards the a-file.
    pub const fn is_long_castle(self) -> bool {
        self.is_castle() && self.to.file() < self.from.file()
    }

    /// Returns true if this move is not a pawn move nor a capture, i.e. it
    /// does not reset the halfmove clock.
    pub fn is_reversible(self) -> bool {
        !self.is_move_of(PieceType::Pawn) && !self.is_capture()
    }

    /// Convenience alias for [`MoveBuilder::new`].
    pub const fn builder(from: Square, to: Square, piece: Piece) -> MoveBuilder {
        MoveBuilder::new(from, to, piece)
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Move")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("piece", &self.piece)
            .field("captured_piece", &self.captured_piece)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Displays the move in coordinate form, e.g. `e2e4` or `e7e8q`.
impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion() {
            f.write_char(promotion.as_lowercase_char())?;
        }
        Ok(())
    }
}

/// Builder struct for convenient construction of a [`Move`].
///
/// Most moves are quiet, non-special moves, so this lets the captured piece
/// and the [`MoveKind`] be filled in only when they matter before calling
/// [`MoveBuilder::build`] to finalise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveBuilder {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured_piece: Option<Piece>,
    pub kind: MoveKind,
}

impl MoveBuilder {
    /// Create a new [`MoveBuilder`].
    ///
    /// Every move requires a source and destination square, as well as the
    /// piece being moved, so these are required in this constructor.
    pub const fn new(from: Square, to: Square, piece: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            captured_piece: None,
            kind: MoveKind::Normal,
        }
    }

    /// Sets the captured piece of this move.
    pub const fn captures(self, captured_piece: Piece) -> Self {
        Self {
            captured_piece: Some(captured_piece),
            ..self
        }
    }

    /// Sets the captured piece of this move if there is one.
    pub const fn maybe_captures(self, captured_piece: Option<Piece>) -> Self {
        Self {
            captured_piece,
            ..self
        }
    }

    /// Sets the kind to [`MoveKind::Promotion`].
    pub const fn promotes_to(self, promotion: PieceType) -> Self {
        Self {
            kind: MoveKind::Promotion(promotion),
            ..self
        }
    }

    /// Sets the kind to [`MoveKind::DoublePawnPush`].
    pub const fn is_double_pawn_push(self) -> Self {
        Self {
            kind: MoveKind::DoublePawnPush,
            ..self
        }
    }

    /// Sets the kind to [`MoveKind::Castle`].
    pub const fn is_castle(self) -> Self {
        Self {
            kind: MoveKind::Castle,
            ..self
        }
    }

    /// Sets the kind to [`MoveKind::EnPassant`].
    pub const fn is_en_passant(self) -> Self {
        Self {
            kind: MoveKind::EnPassant,
            ..self
        }
    }

    /// Finalises and builds the [`Move`].
    pub const fn build(self) -> Move {
        Move::new(
            self.from,
            self.to,
            self.piece,
            self.captured_piece,
            self.kind,
        )
    }
}
