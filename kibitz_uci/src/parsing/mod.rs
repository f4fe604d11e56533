mod info;
pub mod utils;

#[cfg(test)]
mod test;

use info::info_body;
use nom::{
    branch::alt,
    combinator::{opt, rest, success},
    multi::many_till,
    sequence::{preceded, tuple},
    IResult, Parser,
};
use utils::{token, token_tag, token_uci_move};

use crate::UCIMessage;

fn id_body(input: &str) -> IResult<&str, UCIMessage> {
    alt((
        preceded(token_tag("name"), rest.map(str::trim)).map(|name| UCIMessage::Id {
            name: Some(name.to_string()),
            author: None,
        }),
        preceded(token_tag("author"), rest.map(str::trim)).map(|author| UCIMessage::Id {
            name: None,
            author: Some(author.to_string()),
        }),
    ))(input)
}

fn best_move_body(input: &str) -> IResult<&str, UCIMessage> {
    tuple((
        alt((
            token_tag("(none)").map(|_| None),
            token_uci_move.map(Some),
        )),
        opt(preceded(token_tag("ponder"), token_uci_move)),
    ))
    .map(|(best_move, ponder)| UCIMessage::BestMove { best_move, ponder })
    .parse(input)
}

pub fn uci_message(input: &str) -> IResult<&str, UCIMessage> {
    // Only what an engine sends is parsed; commands to the engine are only
    // ever printed.
    let command_parser = alt((
        preceded(token_tag("id"), id_body),
        preceded(token_tag("uciok"), success(UCIMessage::UCIOk)),
        preceded(token_tag("readyok"), success(UCIMessage::ReadyOk)),
        preceded(token_tag("bestmove"), best_move_body),
        preceded(token_tag("info"), info_body.map(UCIMessage::Info)),
    ));

    // Unknown leading tokens are skipped until a known command is found.
    let (input, (_, message)) = many_till(token, command_parser).parse(input)?;

    Ok((input, message))
}
