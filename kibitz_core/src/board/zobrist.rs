use std::{
    fmt::Debug,
    ops::{BitXor, BitXorAssign},
    sync::OnceLock,
};

use rand::{RngCore, SeedableRng};

use super::{BoardRepr, Castling, Color, Piece, Square};

/// Hash of a position, used to detect repeated positions.
///
/// Two positions with the same pieces, side to move, castling rights and en
/// passant file hash equal. Move counters are not part of the hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ZobristHash(pub u64);

impl ZobristHash {
    pub fn piece(piece: Piece, square: Square) -> Self {
        let instance = ZobristTable::get_instance();
        Self(instance.pieces[piece.index() * 64 + square.index()])
    }

    pub fn color(color: Color) -> Self {
        let instance = ZobristTable::get_instance();
        match color {
            Color::White => Self(0),
            Color::Black => Self(instance.black),
        }
    }

    pub fn castling(castling: Castling) -> Self {
        let instance = ZobristTable::get_instance();
        Self(instance.castling[castling.bits() as usize])
    }

    pub fn en_passant(en_passant: Option<Square>) -> Self {
        let instance = ZobristTable::get_instance();
        match en_passant {
            Some(square) => Self(instance.en_passant[square.file() as usize]),
            None => Self(0),
        }
    }

    /// Computes the hash of a whole position from scratch.
    pub fn of_position(
        board: &BoardRepr,
        to_move: Color,
        castling: Castling,
        en_passant: Option<Square>,
    ) -> Self {
        board.pieces().fold(
            Self::color(to_move) ^ Self::castling(castling) ^ Self::en_passant(en_passant),
            |hash, (piece, square)| hash ^ Self::piece(piece, square),
        )
    }
}

impl BitXor for ZobristHash {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for ZobristHash {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

impl Debug for ZobristHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ZobristHash")
            .field(&format_args!("{:#016X}", self.0))
            .finish()
    }
}

struct ZobristTable {
    pieces: [u64; 12 * 64],
    black: u64,
    castling: [u64; 16],
    en_passant: [u64; 8],
}

impl ZobristTable {
    fn new() -> Self {
        let mut rng = rand_chacha::ChaCha12Rng::from_seed([
            0x4b, 0x69, 0x62, 0x69, 0x74, 0x7a, 0x21, 0x0a, 0x3f, 0xb2, 0x3b, 0xba, 0x78, 0xe2,
            0x21, 0x18, 0xf0, 0xc3, 0xbd, 0xb3, 0x59, 0xac, 0x84, 0x13, 0x17, 0x58, 0x01, 0x54,
            0x54, 0x72, 0xd2, 0xc3,
        ]);

        let mut pieces = [0; 12 * 64];
        pieces.fill_with(|| rng.next_u64());

        let black = rng.next_u64();

        let mut castling = [0; 16];
        castling.fill_with(|| rng.next_u64());

        let mut en_passant = [0; 8];
        en_passant.fill_with(|| rng.next_u64());

        Self {
            pieces,
            black,
            castling,
            en_passant,
        }
    }

    fn get_instance() -> &'static Self {
        static INSTANCE: OnceLock<ZobristTable> = OnceLock::new();

        INSTANCE.get_or_init(Self::new)
    }
}
