use std::{
    fmt::{Display, Write},
    str::FromStr,
};

use thiserror::Error;

use super::{Move, PieceType, Square};

/// A move in coordinate notation, as exchanged with UCI engines: the from
/// and to squares plus an optional lowercase promotion piece (`e2e4`,
/// `e1g1`, `e7e8q`).
///
/// This carries no information about the position, so it may describe a
/// move that is illegal or impossible.
///
/// ```
/// # use kibitz_core::board::{UCIMove, Square, PieceType};
/// assert_eq!(
///     "e7e8q".parse(),
///     Ok(UCIMove {
///         from: Square::E7,
///         to: Square::E8,
///         promotion: Some(PieceType::Queen),
///     })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UCIMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl Display for UCIMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.from.fmt(f)?;
        self.to.fmt(f)?;
        if let Some(promotion) = self.promotion {
            f.write_char(promotion.as_lowercase_char())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseUCIMoveError {
    #[error("Expected 4 or 5 characters")]
    IncorrectLength,
    #[error("Invalid square {0:?}")]
    InvalidSquare(String),
    #[error("Invalid promotion target {0:?}")]
    InvalidPromoTarget(char),
}

impl UCIMove {
    /// Returns true if `s` looks like a move in this format: two lowercase
    /// squares followed by an optional lowercase promotion letter. Says
    /// nothing about whether the squares describe a sensible move.
    pub fn has_coordinate_shape(s: &str) -> bool {
        let bytes = s.as_bytes();
        let is_file = |b: u8| (b'a'..=b'h').contains(&b);
        let is_rank = |b: u8| (b'1'..=b'8').contains(&b);

        match bytes {
            [f1, r1, f2, r2, rest @ ..] if rest.len() <= 1 => {
                is_file(*f1)
                    && is_rank(*r1)
                    && is_file(*f2)
                    && is_rank(*r2)
                    && rest.iter().all(|b| b"qrbn".contains(b))
            }
            _ => false,
        }
    }
}

impl FromStr for UCIMove {
    type Err = ParseUCIMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars = s.chars().collect::<Vec<_>>();
        if chars.len() != 4 && chars.len() != 5 {
            return Err(ParseUCIMoveError::IncorrectLength);
        }

        let from_str = String::from_iter(&chars[0..2]);
        let from = from_str
            .parse()
            .map_err(|_| ParseUCIMoveError::InvalidSquare(from_str))?;

        let to_str = String::from_iter(&chars[2..4]);
        let to = to_str
            .parse()
            .map_err(|_| ParseUCIMoveError::InvalidSquare(to_str))?;

        let promotion = match chars.get(4) {
            Some(&c) => Some(
                PieceType::try_from_char(c)
                    .filter(|piece_type| c.is_ascii_lowercase() && piece_type.is_promotion_target())
                    .ok_or(ParseUCIMoveError::InvalidPromoTarget(c))?,
            ),
            None => None,
        };

        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}

impl From<Move> for UCIMove {
    fn from(value: Move) -> Self {
        Self {
            from: value.from_square(),
            to: value.to_square(),
            promotion: value.promotion(),
        }
    }
}
