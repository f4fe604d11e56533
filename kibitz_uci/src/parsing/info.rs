use std::time::Duration;

use kibitz_core::board::UCIMove;
use nom::{
    branch::alt,
    combinator::{rest, success},
    multi::{fold_many0, many0},
    sequence::{pair, preceded},
    IResult, Parser,
};

use super::utils::{token, token_i32, token_millis, token_tag, token_u32, token_u64, token_uci_move};
use crate::{UCIInfo, UCIInfoScore};

/// One `keyword value` pair of an info line.
enum InfoField {
    Depth(u32),
    SelDepth(u32),
    Time(Option<Duration>),
    Nodes(u64),
    Pv(Vec<UCIMove>),
    MultiPv(u32),
    Score(UCIInfoScore),
    CurrMove(UCIMove),
    CurrMoveNumber(u32),
    Hashfull(u32),
    Nps(u64),
    TbHits(u64),
    String(String),
    Unknown,
}

fn info_score(input: &str) -> IResult<&str, UCIInfoScore> {
    pair(
        alt((
            preceded(token_tag("cp"), token_i32).map(|cp| (Some(cp), None)),
            preceded(token_tag("mate"), token_i32).map(|mate| (None, Some(mate))),
        )),
        alt((
            token_tag("lowerbound").map(|_| (true, false)),
            token_tag("upperbound").map(|_| (false, true)),
            success((false, false)),
        )),
    )
    .map(|((cp, mate), (lower_bound, upper_bound))| UCIInfoScore {
        cp,
        mate,
        lower_bound,
        upper_bound,
    })
    .parse(input)
}

fn info_field(input: &str) -> IResult<&str, InfoField> {
    alt((
        preceded(token_tag("depth"), token_u32).map(InfoField::Depth),
        preceded(token_tag("seldepth"), token_u32).map(InfoField::SelDepth),
        preceded(token_tag("time"), token_millis).map(InfoField::Time),
        preceded(token_tag("nodes"), token_u64).map(InfoField::Nodes),
        preceded(token_tag("pv"), many0(token_uci_move)).map(InfoField::Pv),
        preceded(token_tag("multipv"), token_u32).map(InfoField::MultiPv),
        preceded(token_tag("score"), info_score).map(InfoField::Score),
        preceded(token_tag("currmove"), token_uci_move).map(InfoField::CurrMove),
        preceded(token_tag("currmovenumber"), token_u32).map(InfoField::CurrMoveNumber),
        preceded(token_tag("hashfull"), token_u32).map(InfoField::Hashfull),
        preceded(token_tag("nps"), token_u64).map(InfoField::Nps),
        preceded(token_tag("tbhits"), token_u64).map(InfoField::TbHits),
        preceded(token_tag("string"), rest.map(str::trim))
            .map(|s: &str| InfoField::String(s.to_string())),
        // Fields we don't track (sbhits, cpuload, refutation, currline) and
        // their arguments are skipped one token at a time.
        token.map(|_| InfoField::Unknown),
    ))(input)
}

pub fn info_body(input: &str) -> IResult<&str, UCIInfo> {
    fold_many0(info_field, UCIInfo::default, |mut info, field| {
        match field {
            InfoField::Depth(depth) => info.depth = Some(depth),
            InfoField::SelDepth(sel_depth) => info.sel_depth = Some(sel_depth),
            InfoField::Time(time) => info.time = time,
            InfoField::Nodes(nodes) => info.nodes = Some(nodes),
            InfoField::Pv(pv) => info.pv = pv,
            InfoField::MultiPv(multi_pv) => info.multi_pv = Some(multi_pv),
            InfoField::Score(score) => info.score = Some(score),
            InfoField::CurrMove(curr_move) => info.curr_move = Some(curr_move),
            InfoField::CurrMoveNumber(n) => info.curr_move_number = Some(n),
            InfoField::Hashfull(hashfull) => info.hashfull = Some(hashfull),
            InfoField::Nps(nps) => info.nps = Some(nps),
            InfoField::TbHits(tb_hits) => info.tb_hits = Some(tb_hits),
            InfoField::String(string) => info.string = Some(string),
            InfoField::Unknown => {}
        }
        info
    })(input)
}
