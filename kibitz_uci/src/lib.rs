mod analysis;
mod engine;
mod format_utils;
mod parsing;
mod uci_info;
mod uci_message;

pub use analysis::{Analysis, AnalysisCollector, AnalysisError, Score};
pub use engine::{analyze, EngineConfig};
pub use uci_info::{UCIInfo, UCIInfoScore};
pub use uci_message::{ParseUCIMessageError, UCIMessage};
