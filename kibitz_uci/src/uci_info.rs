use std::{fmt::Display, time::Duration};

use kibitz_core::board::UCIMove;

use crate::format_utils::SpaceSepFormatter;

/// The `score` of an `info` line. Scores are from the point of view of the
/// side to move in the analysed position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UCIInfoScore {
    pub cp: Option<i32>,
    pub mate: Option<i32>,
    pub lower_bound: bool,
    pub upper_bound: bool,
}

impl Display for UCIInfoScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut formatter = SpaceSepFormatter::new(f);

        formatter.push_option("cp", self.cp)?;
        formatter.push_option("mate", self.mate)?;

        if self.lower_bound {
            formatter.push_str("lowerbound")?;
        }

        if self.upper_bound {
            formatter.push_str("upperbound")?;
        }

        Ok(())
    }
}

/// The body of an `info` line. Every field is optional; fields the engine
/// did not send are left empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UCIInfo {
    pub depth: Option<u32>,
    pub sel_depth: Option<u32>,
    pub time: Option<Duration>,
    pub nodes: Option<u64>,
    pub pv: Vec<UCIMove>,
    pub multi_pv: Option<u32>,
    pub score: Option<UCIInfoScore>,
    pub curr_move: Option<UCIMove>,
    pub curr_move_number: Option<u32>,
    pub hashfull: Option<u32>,
    pub nps: Option<u64>,
    pub tb_hits: Option<u64>,
    pub string: Option<String>,
}

impl Display for UCIInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut formatter = SpaceSepFormatter::new(f);

        formatter.push_option("depth", self.depth)?;
        formatter.push_option("seldepth", self.sel_depth)?;
        formatter.push_option("multipv", self.multi_pv)?;
        formatter.push_option("score", self.score.as_ref())?;
        formatter.push_option("nodes", self.nodes)?;
        formatter.push_option("nps", self.nps)?;
        formatter.push_option("hashfull", self.hashfull)?;
        formatter.push_option("tbhits", self.tb_hits)?;
        formatter.push_option("time", self.time.map(|d| d.as_millis()))?;
        formatter.push_option("currmove", self.curr_move)?;
        formatter.push_option("currmovenumber", self.curr_move_number)?;
        formatter.push_list("pv", &self.pv)?;
        // `string` swallows the rest of the line, so it must come last.
        formatter.push_option("string", self.string.as_ref())?;

        Ok(())
    }
}
