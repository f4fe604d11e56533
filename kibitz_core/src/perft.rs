//! Move path enumeration, used to check move generation against known node
//! counts.

use crate::board::Board;

pub fn perft(board: &mut Board, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for m in moves {
        board.push_move_unchecked(m);
        nodes += perft(board, depth - 1);
        // Every move pushed above is popped here, so the history is never
        // empty at this point.
        let _ = board.pop_move();
    }

    nodes
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::STARTING_POSITION_FEN;
    use pretty_assertions::assert_eq;

    fn perft_fen(fen: &str, depth: usize) -> u64 {
        let mut board = Board::try_parse_fen(fen).unwrap();
        let original = board.clone();
        let nodes = perft(&mut board, depth);
        assert_eq!(board, original);
        nodes
    }

    #[test]
    fn perft_starting_position() {
        assert_eq!(perft_fen(STARTING_POSITION_FEN, 1), 20);
        assert_eq!(perft_fen(STARTING_POSITION_FEN, 2), 400);
        assert_eq!(perft_fen(STARTING_POSITION_FEN, 3), 8902);
    }

    #[test]
    fn perft_kiwipete() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        assert_eq!(perft_fen(fen, 1), 48);
        assert_eq!(perft_fen(fen, 2), 2039);
    }

    #[test]
    fn perft_position_3() {
        let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
        assert_eq!(perft_fen(fen, 1), 14);
        assert_eq!(perft_fen(fen, 2), 191);
        assert_eq!(perft_fen(fen, 3), 2812);
    }

    #[test]
    fn perft_position_4() {
        let fen = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
        assert_eq!(perft_fen(fen, 1), 6);
        assert_eq!(perft_fen(fen, 2), 264);
    }

    #[test]
    fn perft_position_5() {
        let fen = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
        assert_eq!(perft_fen(fen, 1), 44);
        assert_eq!(perft_fen(fen, 2), 1486);
    }
}
