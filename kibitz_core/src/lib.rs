pub mod board;
pub mod decode;
pub mod log_parser;
pub mod move_gen;
pub mod navigator;
pub mod perft;
pub mod session;

#[cfg(test)]
mod test_utils;
