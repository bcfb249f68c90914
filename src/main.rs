//! # sudoku-csp
//!
//! `sudoku-csp` is a configurable command-line Sudoku solver built on a
//! constraint-satisfaction engine. Puzzles are read from files, plain text
//! or the built-in examples and solved with forward checking, AC-3,
//! MRV/LCV ordering and conflict-directed backjumping; every technique can
//! be switched off independently to compare search behaviour.
//!
//! ## Usage
//!
//! ```sh
//! sudoku-csp [GLOBAL_OPTIONS] [SUBCOMMAND]
//! ```
//!
//! ### Global Argument
//!
//! -   `path`: if provided as the *only* argument (without a subcommand),
//!     it's treated as a puzzle file to solve, or a directory to solve
//!     recursively.
//!
//! ### Subcommands
//!
//! 1.  **`file`**: solve one puzzle file (nine lines of nine digits, or the
//!     81-character string form; `0` or `.` marks a blank).
//!     ```sh
//!     sudoku-csp file --path <path_to_puzzle>
//!     ```
//! 2.  **`text`**: solve a puzzle given inline as an 81-character string.
//!     ```sh
//!     sudoku-csp text --input "53..7....6..195...."
//!     ```
//! 3.  **`example`**: solve one of the built-in puzzles.
//!     ```sh
//!     sudoku-csp example easy
//!     sudoku-csp example hard
//!     ```
//! 4.  **`dir`**: solve every `.sudoku` file under a directory.
//! 5.  **`completions`**: generate shell completion scripts.
//!
//! ### Common Options
//!
//! -   `-d, --debug`: print the parsed board and configuration.
//! -   `-v, --verify`: check the solution against the Sudoku rules
//!     (default: `true`).
//! -   `-s, --stats`: print the statistics table (default: `true`).
//! -   `-p, --print-solution`: print the solved board (default: `true`).
//! -   `--no-forward-checking`, `--no-ac3`, `--no-backjumping`: disable a
//!     technique.
//! -   `--variable-selection <mrv|row-major>`, `--value-ordering
//!     <lcv|ascending>`: pick the branching heuristics.

#![allow(clippy::cast_precision_loss)]

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sudoku_csp::csp::engine::Engine;
use sudoku_csp::csp::error::PuzzleResult;
use sudoku_csp::csp::solver::{Outcome, SearchConfig, SearchStats, Solver};
use sudoku_csp::csp::value_ordering::ValueOrderingType;
use sudoku_csp::csp::variable_selection::VariableSelectionType;
use sudoku_csp::puzzle::{Board, EASY, HARD};
use tikv_jemalloc_ctl::{epoch, stats};

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku-csp", version, about = "A configurable CSP Sudoku solver")]
struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as a puzzle file to solve, or a directory to solve
    /// recursively.
    #[arg(global = true)]
    path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `example`).
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a puzzle file.
    File {
        /// Path to the puzzle file: nine lines of nine digits, or the
        /// 81-character string form.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a puzzle provided as plain text.
    Text {
        /// The puzzle as an 81-character string, `0` or `.` for blanks.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve one of the built-in example puzzles.
    Example {
        /// Which example to solve.
        #[arg(value_enum)]
        name: ExampleName,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.sudoku` file under a directory.
    Dir {
        /// The directory to walk.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// The built-in example puzzles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExampleName {
    /// A classic easy puzzle, solvable almost entirely by propagation.
    Easy,
    /// Inkala's 2012 puzzle, heavy on search.
    Hard,
}

impl ExampleName {
    const fn board(self) -> Board {
        match self {
            Self::Easy => Board::new(EASY),
            Self::Hard => Board::new(HARD),
        }
    }
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
struct CommonOptions {
    /// Enable debug output: the parsed board and the active configuration.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Enable verification of the found solution against the Sudoku rules.
    #[arg(short, long, default_value_t = true)]
    verify: bool,

    /// Enable printing of performance and search statistics after solving.
    #[arg(short, long, default_value_t = true)]
    stats: bool,

    /// Enable printing of the solved board.
    #[arg(short, long, default_value_t = true)]
    print_solution: bool,

    /// Disable forward checking after each assignment.
    #[arg(long, default_value_t = false)]
    no_forward_checking: bool,

    /// Disable AC-3 arc consistency (both the initial pass and the
    /// per-assignment runs).
    #[arg(long, default_value_t = false)]
    no_ac3: bool,

    /// Disable conflict-directed backjumping; backtracking becomes
    /// chronological.
    #[arg(long, default_value_t = false)]
    no_backjumping: bool,

    /// Which cell to branch on next.
    #[arg(long, default_value_t = VariableSelectionType::Mrv)]
    variable_selection: VariableSelectionType,

    /// The order in which a cell's candidate values are tried.
    #[arg(long, default_value_t = ValueOrderingType::Lcv)]
    value_ordering: ValueOrderingType,
}

impl CommonOptions {
    const fn to_config(&self) -> SearchConfig {
        SearchConfig {
            forward_checking: !self.no_forward_checking,
            ac3: !self.no_ac3,
            backjumping: !self.no_backjumping,
            variable_selection: self.variable_selection,
            value_ordering: self.value_ordering,
        }
    }

    fn describe_techniques(&self) -> String {
        let mut parts = Vec::new();
        if !self.no_forward_checking {
            parts.push("forward-checking");
        }
        if !self.no_ac3 {
            parts.push("ac3");
        }
        if !self.no_backjumping {
            parts.push("backjumping");
        }
        if parts.is_empty() {
            parts.push("none");
        }
        format!(
            "{} [{}/{}]",
            parts.join("+"),
            self.variable_selection,
            self.value_ordering
        )
    }
}

/// Main entry point: parses command-line arguments and dispatches to the
/// appropriate command handler.
fn main() {
    let cli = Cli::parse();

    // A bare path without a subcommand solves that file or directory.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            let result = if path.is_dir() {
                solve_dir(&path, &cli.common)
            } else {
                solve_file(&path, &cli.common)
            };
            exit_on_error(result);
            return;
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => exit_on_error(solve_file(&path, &common)),
        Some(Commands::Text { input, common }) => {
            let result = input
                .parse::<Board>()
                .map(|board| solve_and_report(&board, &common, None, Duration::ZERO));
            exit_on_error(result);
        }
        Some(Commands::Example { name, common }) => {
            solve_and_report(&name.board(), &common, None, Duration::ZERO);
        }
        Some(Commands::Dir { path, common }) => exit_on_error(solve_dir(&path, &common)),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
        None => {
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    }
}

fn exit_on_error<V>(result: PuzzleResult<V>) {
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Parses and solves one puzzle file.
fn solve_file(path: &Path, common: &CommonOptions) -> PuzzleResult<()> {
    let time = Instant::now();
    let board = Board::from_file(path)?;
    let parse_time = time.elapsed();

    solve_and_report(&board, common, Some(path), parse_time);
    Ok(())
}

/// Solves every `.sudoku` file under a directory, in path order.
fn solve_dir(path: &Path, common: &CommonOptions) -> PuzzleResult<()> {
    if !path.is_dir() {
        eprintln!("Provided path is not a directory: {}", path.display());
        std::process::exit(1);
    }

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "sudoku") {
            eprintln!("Skipping non-puzzle file: {}", file_path.display());
            continue;
        }

        solve_file(file_path, common)?;
    }

    Ok(())
}

/// Solves one board and reports verification, statistics and the solution
/// according to the common options.
fn solve_and_report(board: &Board, common: &CommonOptions, label: Option<&Path>, parse_time: Duration) {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    if common.debug {
        println!("Parsed board:\n{board}");
        println!("Givens: {}", board.given_count());
        println!("Techniques: {}", common.describe_techniques());
    }

    let config = common.to_config();

    epoch::advance().unwrap();
    let time = Instant::now();

    let (outcome, search_stats) = match Engine::new(board.givens(), &config) {
        Ok(mut engine) => {
            let outcome = engine.solve();
            (outcome, engine.stats())
        }
        Err(e) => {
            // a PuzzleError here means the givens themselves break a
            // constraint, which is invalid input rather than unsolvable
            eprintln!("Invalid puzzle: {e}");
            std::process::exit(1);
        }
    };

    let elapsed = time.elapsed();

    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    let solution = match &outcome {
        Outcome::Solved(givens) => Some(Board::new(*givens)),
        Outcome::Unsolvable => None,
    };

    if common.verify {
        verify_solution(solution.as_ref());
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            board,
            common,
            &search_stats,
            allocated_mib,
            resident_mib,
        );
    }

    if let Some(solved) = solution {
        if common.print_solution {
            println!("Solution:\n{solved}");
        }
        println!("\nSOLVED ({:.4} s)", elapsed.as_secs_f64());
    } else {
        println!("\nUNSOLVABLE ({:.4} s)", elapsed.as_secs_f64());
    }
}

/// Verifies a found solution against the Sudoku rules.
///
/// # Panics
/// If the solution fails verification.
fn verify_solution(solution: Option<&Board>) {
    if let Some(board) = solution {
        let ok = board.is_valid_solution();
        println!("Verified: {ok:?}");
        assert!(ok, "Solution failed verification!");
    } else {
        println!("No solution to verify");
    }
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate
/// (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    board: &Board,
    common: &CommonOptions,
    s: &SearchStats,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let givens = board.given_count();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Givens", givens);
    stat_line("Blanks", 81 - givens);
    stat_line("Techniques", common.describe_techniques());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Assignments", s.assignments, elapsed_secs);
    stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line_with_rate("Backjumps", s.backjumps, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("Solve time (s)", format!("{elapsed_secs:.4}"));
    println!("=====================================================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_enable_everything() {
        let config = CommonOptions::default().to_config();
        assert_eq!(config, SearchConfig::default());
    }

    #[test]
    fn test_no_flags_disable_techniques() {
        let common = CommonOptions {
            no_forward_checking: true,
            no_ac3: true,
            no_backjumping: true,
            ..CommonOptions::default()
        };
        let config = common.to_config();
        assert!(!config.forward_checking);
        assert!(!config.ac3);
        assert!(!config.backjumping);
    }

    #[test]
    fn test_technique_description() {
        let common = CommonOptions::default();
        assert_eq!(
            common.describe_techniques(),
            "forward-checking+ac3+backjumping [mrv/lcv]"
        );

        let none = CommonOptions {
            no_forward_checking: true,
            no_ac3: true,
            no_backjumping: true,
            variable_selection: VariableSelectionType::RowMajor,
            value_ordering: ValueOrderingType::Ascending,
            ..CommonOptions::default()
        };
        assert_eq!(none.describe_techniques(), "none [row-major/ascending]");
    }

    #[test]
    fn test_example_boards_are_well_formed() {
        assert_eq!(ExampleName::Easy.board().given_count(), 30);
        assert_eq!(ExampleName::Hard.board().given_count(), 21);
    }
}
