mod render;

use std::{
    fs,
    io::{self, stdin, stdout, BufRead, Write},
    path::PathBuf,
    time::Duration,
};

use clap::Parser;
use kibitz_core::{board::Board, session::Session};
use kibitz_uci::{analyze, EngineConfig};
use log::{info, warn};
use render::render_board;

/// Chess move log replayer.
///
/// Reads a game log, reports any moves that could not be understood, and
/// lets you step through the game on a text board. Positions can be handed
/// to a UCI engine for analysis.
#[derive(Parser, Debug)]
struct Args {
    /// Path to the move log.
    log: PathBuf,

    /// Position the game starts from.
    ///
    /// Expects either the string "startpos" or a valid position in
    /// Forsyth-Edwards Notation (FEN).
    #[arg(long, default_value = "startpos", value_parser = parse_position)]
    fen: Board,

    /// UCI engine used by the `a` command.
    #[arg(long)]
    engine: Option<PathBuf>,

    /// Extra argument passed to the engine. May be repeated.
    #[arg(long = "engine-arg", allow_hyphen_values = true)]
    engine_args: Vec<String>,

    /// Depth the engine searches to.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..), default_value_t = 15)]
    depth: u32,

    /// Seconds to wait for the engine before giving up.
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Fail instead of skipping moves that cannot be read.
    #[arg(long)]
    strict: bool,

    /// Draw pieces with Unicode chess symbols instead of letters.
    #[arg(long)]
    unicode: bool,
}

/// What the interactive loop needs besides the session.
#[derive(Debug, Default)]
struct Settings {
    engine: Option<EngineConfig>,
    unicode: bool,
}

impl Args {
    fn engine_config(&self) -> Option<EngineConfig> {
        let program = self.engine.clone()?;

        Some(EngineConfig {
            args: self.engine_args.clone(),
            depth: self.depth,
            timeout: Duration::from_secs(self.timeout),
            ..EngineConfig::new(program)
        })
    }
}

fn parse_position(s: &str) -> Result<Board, String> {
    if s == "startpos" {
        Ok(Board::starting_position())
    } else {
        Board::try_parse_fen(s).map_err(|e| {
            format!("Expected `startpos` or a valid FEN string. FEN parsing error: {e}")
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Forward,
    Back,
    Start,
    End,
    Seek(usize),
    Analyze,
    Fen,
    List,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Self, String> {
        let mut tokens = line.split_whitespace();
        let command = tokens.next().unwrap_or_default();

        let parsed = match command {
            "n" | ">" => Command::Forward,
            "p" | "<" => Command::Back,
            "s" | "<<" => Command::Start,
            "e" | ">>" => Command::End,
            "g" => {
                let n = tokens
                    .next()
                    .ok_or_else(|| "Usage: g <number of moves>".to_string())?;
                let n = n
                    .parse()
                    .map_err(|_| format!("Expected a move count, got {n:?}"))?;
                Command::Seek(n)
            }
            "a" => Command::Analyze,
            "f" => Command::Fen,
            "l" => Command::List,
            "h" | "?" => Command::Help,
            "q" => Command::Quit,
            other => return Err(format!("Unknown command {other:?} (h for help)")),
        };

        Ok(parsed)
    }
}

const HELP: &str = "\
n, >   next move
p, <   previous move
s, <<  start of game
e, >>  end of game
g <n>  go to the position after n moves
a      analyse the current position
f      print the current FEN
l      print the move list
q      quit";

fn print_position(session: &Session, settings: &Settings, out: &mut impl Write) -> io::Result<()> {
    write!(
        out,
        "{}",
        render_board(
            session.board(),
            session.last_move(),
            session.highlighted_squares(),
            settings.unicode,
        )
    )?;
    writeln!(out, "{}", session.status_line())
}

fn print_analysis(
    session: &mut Session,
    settings: &Settings,
    out: &mut impl Write,
) -> io::Result<()> {
    let Some(config) = &settings.engine else {
        return writeln!(out, "Analysis unavailable: no engine configured (use --engine)");
    };

    let analysis = match analyze(config, session.board()) {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!("Analysis failed: {e}");
            return writeln!(out, "Analysis unavailable: {e}");
        }
    };

    writeln!(out, "Evaluation: {}", analysis.score)?;
    if let Some(depth) = analysis.depth {
        writeln!(out, "Depth: {depth}")?;
    }

    let best_move = analysis.best_move_on(session.board());
    match best_move.and_then(|m| session.board().get_san(m).map(|san| (m, san))) {
        Some((m, san)) => {
            writeln!(out, "Best move: {san}")?;
            session.highlight_move(m);
            print_position(session, settings, out)
        }
        None => {
            if let Some(reported) = analysis.best_move {
                warn!("Engine suggested {reported}, which is not legal here");
            }
            Ok(())
        }
    }
}

/// Runs the interactive loop until `q` or the end of `input`.
fn run(
    session: &mut Session,
    settings: &Settings,
    input: impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    print_position(session, settings, out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };

        match command {
            Command::Forward => {
                if !session.step_forward() {
                    writeln!(out, "Already at the end of the game")?;
                }
            }
            Command::Back => {
                if !session.step_back() {
                    writeln!(out, "Already at the start of the game")?;
                }
            }
            Command::Start => session.to_start(),
            Command::End => session.to_end(),
            Command::Seek(n) => session.seek(n),
            Command::Analyze => {
                print_analysis(session, settings, out)?;
                continue;
            }
            Command::Fen => {
                writeln!(out, "{}", session.board().fen())?;
                continue;
            }
            Command::List => {
                write!(out, "{}", session.move_list_text())?;
                continue;
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Quit => break,
        }

        print_position(session, settings, out)?;
    }

    out.flush()
}

fn main() -> Result<(), String> {
    env_logger::init();

    let args = Args::parse();

    let text = fs::read_to_string(&args.log)
        .map_err(|e| format!("Could not read {}: {e}", args.log.display()))?;

    let mut session = Session::new(args.fen.clone());
    let report = session.load(&text);
    info!("Loaded {} moves from {}", report.move_count, args.log.display());

    for diagnostic in &report.diagnostics {
        eprintln!("warning: {diagnostic}");
    }

    if args.strict && !report.diagnostics.is_empty() {
        return Err(format!(
            "{} token(s) in {} could not be read as moves",
            report.diagnostics.len(),
            args.log.display()
        ));
    }

    println!("{} moves loaded", report.move_count);
    print!("{}", session.move_list_text());

    let settings = Settings {
        engine: args.engine_config(),
        unicode: args.unicode,
    };
    run(&mut session, &settings, stdin().lock(), &mut stdout().lock())
        .map_err(|e| format!("I/O error: {e}"))
}
