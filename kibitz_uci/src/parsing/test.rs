use std::time::Duration;

use kibitz_core::board::{PieceType, Square, UCIMove};

use crate::{UCIInfo, UCIInfoScore, UCIMessage};

use pretty_assertions::assert_eq;

fn mv(s: &str) -> UCIMove {
    s.parse().unwrap()
}

#[test]
fn parse_empty_should_fail() {
    "".parse::<UCIMessage>()
        .expect_err("should not parse empty string");
    "\n".parse::<UCIMessage>()
        .expect_err("should not parse new line");
}

#[test]
fn parse_uciok_accepts_whitespace_and_newlines() {
    let msg: UCIMessage = "uciok".parse().unwrap();
    assert_eq!(msg, UCIMessage::UCIOk);

    let msg: UCIMessage = "\tuciok\n".parse().unwrap();
    assert_eq!(msg, UCIMessage::UCIOk);

    let msg: UCIMessage = "    uciok\r\n".parse().unwrap();
    assert_eq!(msg, UCIMessage::UCIOk);
}

#[test]
fn parse_ignores_unknown_preceding_tokens() {
    let msg: UCIMessage = "joho readyok".parse().unwrap();
    assert_eq!(msg, UCIMessage::ReadyOk);

    "joho".parse::<UCIMessage>()
        .expect_err("should not parse unknown command");
}

#[test]
fn commands_to_the_engine_are_not_parsed() {
    for line in ["uci", "isready", "go depth 15", "position startpos", "quit"] {
        line.parse::<UCIMessage>()
            .expect_err("engine input should not parse");
    }
}

#[test]
fn parse_id() {
    let msg: UCIMessage = "id name Stockfish 16.1".parse().unwrap();
    assert_eq!(
        msg,
        UCIMessage::Id {
            name: Some("Stockfish 16.1".to_string()),
            author: None,
        }
    );
}

#[test]
fn parse_best_move() {
    let msg: UCIMessage = "bestmove e2e4 ponder e7e5".parse().unwrap();
    assert_eq!(
        msg,
        UCIMessage::BestMove {
            best_move: Some(mv("e2e4")),
            ponder: Some(mv("e7e5")),
        }
    );

    let msg: UCIMessage = "bestmove a7a8q".parse().unwrap();
    assert_eq!(
        msg,
        UCIMessage::BestMove {
            best_move: Some(UCIMove {
                from: Square::A7,
                to: Square::A8,
                promotion: Some(PieceType::Queen),
            }),
            ponder: None,
        }
    );
}

#[test]
fn parse_best_move_none() {
    let msg: UCIMessage = "bestmove (none)".parse().unwrap();
    assert_eq!(
        msg,
        UCIMessage::BestMove {
            best_move: None,
            ponder: None,
        }
    );
    assert_eq!(msg.to_string(), "bestmove (none)");
}

#[test]
fn parse_info_line() {
    let msg: UCIMessage =
        "info depth 12 seldepth 18 multipv 1 score cp 34 nodes 123456 nps 987000 hashfull 12 tbhits 0 time 125 pv e2e4 e7e5 g1f3"
            .parse()
            .unwrap();

    assert_eq!(
        msg,
        UCIMessage::Info(UCIInfo {
            depth: Some(12),
            sel_depth: Some(18),
            time: Some(Duration::from_millis(125)),
            nodes: Some(123456),
            pv: vec![mv("e2e4"), mv("e7e5"), mv("g1f3")],
            multi_pv: Some(1),
            score: Some(UCIInfoScore {
                cp: Some(34),
                ..Default::default()
            }),
            hashfull: Some(12),
            nps: Some(987000),
            tb_hits: Some(0),
            ..Default::default()
        })
    );
}

#[test]
fn parse_info_mate_and_bounds() {
    let msg: UCIMessage = "info depth 20 score mate -3 upperbound".parse().unwrap();

    assert_eq!(
        msg,
        UCIMessage::Info(UCIInfo {
            depth: Some(20),
            score: Some(UCIInfoScore {
                mate: Some(-3),
                upper_bound: true,
                ..Default::default()
            }),
            ..Default::default()
        })
    );
}

#[test]
fn parse_info_skips_unknown_fields() {
    let msg: UCIMessage = "info depth 5 cpuload 400 wdl 500 300 200 currmove d2d4 currmovenumber 3"
        .parse()
        .unwrap();

    assert_eq!(
        msg,
        UCIMessage::Info(UCIInfo {
            depth: Some(5),
            curr_move: Some(mv("d2d4")),
            curr_move_number: Some(3),
            ..Default::default()
        })
    );
}

#[test]
fn parse_info_string_takes_rest_of_line() {
    let msg: UCIMessage = "info string NNUE evaluation using nn.nnue enabled".parse().unwrap();

    assert_eq!(
        msg,
        UCIMessage::Info(UCIInfo {
            string: Some("NNUE evaluation using nn.nnue enabled".to_string()),
            ..Default::default()
        })
    );
}

#[test]
fn display_matches_parse() {
    for line in [
        "uciok",
        "readyok",
        "id name Fake Engine 2",
        "bestmove g1f3 ponder b8c6",
        "info depth 3 score cp -20 pv d2d4",
    ] {
        let msg: UCIMessage = line.parse().unwrap();
        assert_eq!(msg.to_string(), line);
    }
}

#[test]
fn display_commands_to_the_engine() {
    let fen = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2";

    assert_eq!(UCIMessage::UCI.to_string(), "uci");
    assert_eq!(UCIMessage::IsReady.to_string(), "isready");
    assert_eq!(
        UCIMessage::SetOption {
            name: "Skill Level".to_string(),
            value: "20".to_string(),
        }
        .to_string(),
        "setoption name Skill Level value 20"
    );
    assert_eq!(
        UCIMessage::Position {
            fen: fen.to_string()
        }
        .to_string(),
        format!("position fen {fen}")
    );
    assert_eq!(UCIMessage::Go { depth: 15 }.to_string(), "go depth 15");
    assert_eq!(UCIMessage::Quit.to_string(), "quit");
}
