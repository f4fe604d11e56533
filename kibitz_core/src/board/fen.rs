use thiserror::Error;

use super::{Board, BoardRepr, Castling, Color, Piece, PieceType, Square};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFenError {
    #[error("Expected 6 space-separated fields, found {0}")]
    WrongFieldCount(usize),
    #[error("Expected 8 ranks in piece placement, found {0}")]
    WrongRankCount(usize),
    #[error("Invalid piece placement on rank {0}")]
    InvalidRank(u8),
    #[error("Invalid piece character {0:?}")]
    InvalidPiece(char),
    #[error("Each side must have exactly one king")]
    InvalidKingCount,
    #[error("Invalid side to move {0:?}")]
    InvalidSideToMove(String),
    #[error("Invalid castling rights {0:?}")]
    InvalidCastling(String),
    #[error("Invalid en passant square {0:?}")]
    InvalidEnPassant(String),
    #[error("Invalid move counter {0:?}")]
    InvalidCounter(String),
}

pub fn board_to_fen(board: &Board) -> String {
    let mut result = String::new();

    for rank in (0..8).rev() {
        let mut empty_squares = 0;
        for file in 0..8 {
            let square = Square::new_unchecked(rank, file);
            match board.board.piece_at(square) {
                None => empty_squares += 1,
                Some(piece) => {
                    if empty_squares > 0 {
                        result.push((empty_squares + b'0') as _);
                    }
                    result.push(piece.as_fen_char());
                    empty_squares = 0;
                }
            }
        }
        if empty_squares > 0 {
            result.push((empty_squares + b'0') as _);
        }
        if rank > 0 {
            result.push('/');
        }
    }

    result.push(' ');
    result.push(if board.to_move.is_white() { 'w' } else { 'b' });
    result.push(' ');
    result.push_str(&board.castling.as_fen_str());
    result.push(' ');
    match board.en_passant {
        Some(square) => result.push_str(&square.to_string()),
        None => result.push('-'),
    };

    result.push(' ');
    result.push_str(&board.halfmove_clock.to_string());
    result.push(' ');
    result.push_str(&board.fullmoves.to_string());

    result
}

fn parse_placement(placement: &str) -> Result<[Option<Piece>; 64], ParseFenError> {
    let ranks: Vec<_> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(ParseFenError::WrongRankCount(ranks.len()));
    }

    let mut board = [None; 64];
    for (rank_index, rank_pieces) in ranks.into_iter().enumerate() {
        let rank = 7 - rank_index as u8;
        let mut file = 0;
        for c in rank_pieces.chars() {
            if file >= 8 {
                return Err(ParseFenError::InvalidRank(rank + 1));
            }

            if let Some(digit) = c.to_digit(10) {
                if !(1..=8).contains(&digit) {
                    return Err(ParseFenError::InvalidRank(rank + 1));
                }
                file += digit as u8;
            } else {
                let piece = Piece::try_from_fen_char(c).ok_or(ParseFenError::InvalidPiece(c))?;
                board[Square::new_unchecked(rank, file).index()] = Some(piece);
                file += 1;
            }
        }

        if file != 8 {
            return Err(ParseFenError::InvalidRank(rank + 1));
        }
    }

    Ok(board)
}

pub fn try_parse_fen(fen: &str) -> Result<Board, ParseFenError> {
    let fields: Vec<_> = fen.split_ascii_whitespace().collect();
    let &[placement, to_move, castling, en_passant, halfmove_clock, fullmoves] = &fields[..]
    else {
        return Err(ParseFenError::WrongFieldCount(fields.len()));
    };

    let board = BoardRepr::new(&parse_placement(placement)?);
    let king_count = board.piece_count(PieceType::King);
    if king_count != (1, 1) {
        return Err(ParseFenError::InvalidKingCount);
    }

    let to_move = match to_move {
        "w" => Color::White,
        "b" => Color::Black,
        _ => return Err(ParseFenError::InvalidSideToMove(to_move.to_string())),
    };

    let castling = Castling::try_from_fen_str(castling)
        .ok_or_else(|| ParseFenError::InvalidCastling(castling.to_string()))?;

    let en_passant = match en_passant {
        "-" => None,
        square => Some(
            square
                .parse()
                .map_err(|_| ParseFenError::InvalidEnPassant(square.to_string()))?,
        ),
    };

    let halfmove_clock = halfmove_clock
        .parse()
        .map_err(|_| ParseFenError::InvalidCounter(halfmove_clock.to_string()))?;
    let fullmoves = fullmoves
        .parse()
        .map_err(|_| ParseFenError::InvalidCounter(fullmoves.to_string()))?;

    Ok(Board::new(
        board,
        to_move,
        castling,
        en_passant,
        halfmove_clock,
        fullmoves,
    ))
}
