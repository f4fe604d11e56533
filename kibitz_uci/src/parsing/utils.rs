//! Token-level nom parsers. UCI is whitespace separated, so every parser here
//! consumes one whole token plus the whitespace around it.

use std::{str::FromStr, time::Duration};

use kibitz_core::board::UCIMove;
use nom::{
    branch::alt,
    bytes::complete::take_till1,
    character::complete::{i32, i64, space0, space1, u32, u64},
    combinator::{eof, fail},
    error::{context, Error, ErrorKind, ParseError},
    error_position, IResult, Parser,
};

pub fn token(input: &str) -> IResult<&str, &str> {
    let (input, _) = space0(input)?;
    let (input, result) = take_till1(char::is_whitespace)(input)?;
    let (input, _) = alt((space1, eof))(input)?;

    Ok((input, result))
}

/// Matches exactly the token `tag`.
pub fn token_tag(tag: &str) -> impl Fn(&str) -> IResult<&str, &str> + '_ {
    move |input: &str| {
        let (rest, t) = token(input)?;
        if t == tag {
            Ok((rest, t))
        } else {
            Err(nom::Err::Error(error_position!(input, ErrorKind::Tag)))
        }
    }
}

/// Runs `parser` on the next token, which it must consume entirely.
pub fn tokenize<'a, O>(
    mut parser: impl Parser<&'a str, O, Error<&'a str>>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    move |input: &str| {
        let (input, t) = token(input)?;
        let (leftover, parsed) = parser.parse(t)?;

        if leftover.is_empty() {
            Ok((input, parsed))
        } else {
            Err(nom::Err::Error(Error::from_error_kind(input, ErrorKind::Eof)))
        }
    }
}

pub fn token_uci_move(input: &str) -> IResult<&str, UCIMove> {
    let (remaining, t) = token(input)?;
    match UCIMove::from_str(t) {
        Ok(m) => Ok((remaining, m)),
        Err(_) => context("expected valid uci move", fail)(input),
    }
}

pub fn token_i32(input: &str) -> IResult<&str, i32> {
    tokenize(i32)(input)
}

pub fn token_u32(input: &str) -> IResult<&str, u32> {
    tokenize(u32)(input)
}

pub fn token_u64(input: &str) -> IResult<&str, u64> {
    tokenize(u64)(input)
}

/// A duration in milliseconds. Some engines report negative times, which are
/// read as absent.
pub fn token_millis(input: &str) -> IResult<&str, Option<Duration>> {
    let (input, millis) = tokenize(i64)(input)?;
    Ok((input, u64::try_from(millis).ok().map(Duration::from_millis)))
}
