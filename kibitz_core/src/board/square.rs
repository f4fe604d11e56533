use std::{
    fmt::{Debug, Display, Write},
    str::FromStr,
};

use thiserror::Error;

/// A square on the board, stored as `8 * rank + file` (so a1 is 0, h1 is 7,
/// a2 is 8 and h8 is 63).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

macro_rules! square_consts {
    ($($name:ident = ($rank:expr, $file:expr)),* $(,)?) => {
        $(pub const $name: Self = Self::new_unchecked($rank, $file);)*
    };
}

impl Square {
    square_consts! {
        A1 = (0, 0), B1 = (0, 1), C1 = (0, 2), D1 = (0, 3), E1 = (0, 4), F1 = (0, 5), G1 = (0, 6), H1 = (0, 7),
        A2 = (1, 0), B2 = (1, 1), C2 = (1, 2), D2 = (1, 3), E2 = (1, 4), F2 = (1, 5), G2 = (1, 6), H2 = (1, 7),
        A3 = (2, 0), B3 = (2, 1), C3 = (2, 2), D3 = (2, 3), E3 = (2, 4), F3 = (2, 5), G3 = (2, 6), H3 = (2, 7),
        A4 = (3, 0), B4 = (3, 1), C4 = (3, 2), D4 = (3, 3), E4 = (3, 4), F4 = (3, 5), G4 = (3, 6), H4 = (3, 7),
        A5 = (4, 0), B5 = (4, 1), C5 = (4, 2), D5 = (4, 3), E5 = (4, 4), F5 = (4, 5), G5 = (4, 6), H5 = (4, 7),
        A6 = (5, 0), B6 = (5, 1), C6 = (5, 2), D6 = (5, 3), E6 = (5, 4), F6 = (5, 5), G6 = (5, 6), H6 = (5, 7),
        A7 = (6, 0), B7 = (6, 1), C7 = (6, 2), D7 = (6, 3), E7 = (6, 4), F7 = (6, 5), G7 = (6, 6), H7 = (6, 7),
        A8 = (7, 0), B8 = (7, 1), C8 = (7, 2), D8 = (7, 3), E8 = (7, 4), F8 = (7, 5), G8 = (7, 6), H8 = (7, 7),
    }

    pub const fn new(rank: u8, file: u8) -> Option<Self> {
        if rank >= 8 || file >= 8 {
            None
        } else {
            Some(Self(8 * rank + file))
        }
    }

    pub const fn new_unchecked(rank: u8, file: u8) -> Self {
        Self((8 * (rank % 8) + file % 8) % 64)
    }

    /// Iterates over all 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Self)
    }

    pub const fn index(self) -> usize {
        self.0 as _
    }

    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Returns the square `rank_delta` ranks and `file_delta` files away, or
    /// [`None`] if that would fall off the board.
    pub const fn offset(self, rank_delta: i8, file_delta: i8) -> Option<Self> {
        let rank = self.rank() as i8 + rank_delta;
        let file = self.file() as i8 + file_delta;
        if rank < 0 || rank >= 8 || file < 0 || file >= 8 {
            None
        } else {
            Some(Self::new_unchecked(rank as u8, file as u8))
        }
    }

    pub const fn is_light(self) -> bool {
        (self.rank() + self.file()) % 2 == 1
    }

    pub fn file_char(self) -> char {
        (self.file() + b'a') as char
    }

    pub fn rank_char(self) -> char {
        (self.rank() + b'1') as char
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char(self.file_char())?;
        f.write_char(self.rank_char())
    }
}

impl Debug for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Square({self})")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid square {0:?}")]
pub struct ParseSquareError(pub String);

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSquareError(s.to_string());

        let mut char_iter = s.chars();
        let file = char_iter.next().ok_or_else(err)?;
        let rank = char_iter.next().ok_or_else(err)?;
        if char_iter.next().is_some() {
            return Err(err());
        }

        match (file, rank) {
            ('a'..='h', '1'..='8') => Ok(Square::new_unchecked(
                rank as u8 - b'1',
                file as u8 - b'a',
            )),
            _ => Err(err()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn square_layout() {
        assert_eq!(Square::A1.index(), 0);
        assert_eq!(Square::H1.index(), 7);
        assert_eq!(Square::A2.index(), 8);
        assert_eq!(Square::H8.index(), 63);
        assert_eq!(Square::E4.rank(), 3);
        assert_eq!(Square::E4.file(), 4);
    }

    #[test]
    fn square_offset() {
        assert_eq!(Square::E2.offset(2, 0), Some(Square::E4));
        assert_eq!(Square::G1.offset(2, -1), Some(Square::F3));
        assert_eq!(Square::A1.offset(-1, 0), None);
        assert_eq!(Square::H4.offset(0, 1), None);
        assert_eq!(Square::H8.offset(1, 1), None);
    }

    #[test]
    fn square_parse_and_display() {
        for square in Square::all() {
            assert_eq!(square.to_string().parse::<Square>(), Ok(square));
        }

        assert!("".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("i1".parse::<Square>().is_err());
        assert!("e44".parse::<Square>().is_err());
        assert!("E4".parse::<Square>().is_err());
    }

    #[test]
    fn square_colors() {
        assert!(!Square::A1.is_light());
        assert!(Square::H1.is_light());
        assert!(Square::D1.is_light());
        assert!(!Square::E1.is_light());
    }
}
