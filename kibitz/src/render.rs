//! Plain-text rendering of the board.

use std::fmt::Write;

use kibitz_core::board::{Board, Square};

/// Draws `board` with white at the bottom. Squares of the last move are
/// bracketed `[ ]` and highlighted squares are marked `< >`. Pieces are FEN
/// letters unless `unicode` is set.
pub fn render_board(
    board: &Board,
    last_move: Option<(Square, Square)>,
    highlighted: &[Square],
    unicode: bool,
) -> String {
    let mut out = String::new();
    let border = "  +------------------------+";

    let _ = writeln!(out, "{border}");
    for rank in (0..8).rev() {
        let _ = write!(out, "{} |", rank + 1);

        for file in 0..8 {
            let square = Square::new_unchecked(rank, file);
            let piece = board
                .get_piece(square)
                .map_or('.', |piece| {
                    if unicode {
                        piece.as_unicode_char()
                    } else {
                        piece.as_fen_char()
                    }
                });

            let (open, close) = if highlighted.contains(&square) {
                ('<', '>')
            } else if last_move.is_some_and(|(from, to)| square == from || square == to) {
                ('[', ']')
            } else {
                (' ', ' ')
            };

            let _ = write!(out, "{open}{piece}{close}");
        }

        let _ = writeln!(out, "|");
    }
    let _ = writeln!(out, "{border}");
    let _ = writeln!(out, "    a  b  c  d  e  f  g  h");

    out
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_starting_position() {
        let rendered = render_board(&Board::starting_position(), None, &[], false);
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines.len(), 11);
        assert_eq!(lines[1], "8 | r  n  b  q  k  b  n  r |");
        assert_eq!(lines[5], "4 | .  .  .  .  .  .  .  . |");
        assert_eq!(lines[8], "1 | R  N  B  Q  K  B  N  R |");
        assert_eq!(lines[10], "    a  b  c  d  e  f  g  h");
    }

    #[test]
    fn marks_last_move_and_highlights() {
        let mut board = Board::starting_position();
        board.push_move(Square::E2, Square::E4, None).unwrap();

        let rendered = render_board(
            &board,
            Some((Square::E2, Square::E4)),
            &[Square::G8, Square::F6],
            false,
        );
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines[1], "8 | r  n  b  q  k  b <n> r |");
        assert_eq!(lines[3], "6 | .  .  .  .  . <.> .  . |");
        assert_eq!(lines[5], "4 | .  .  .  . [P] .  .  . |");
        assert_eq!(lines[7], "2 | P  P  P  P [.] P  P  P |");
    }

    #[test]
    fn unicode_pieces() {
        let rendered = render_board(&Board::starting_position(), None, &[], true);
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines[1], "8 | ♜  ♞  ♝  ♛  ♚  ♝  ♞  ♜ |");
        assert_eq!(lines[7], "2 | ♙  ♙  ♙  ♙  ♙  ♙  ♙  ♙ |");
    }
}
