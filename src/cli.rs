//! Command line surface for PopcornTUI
//!
//! With no subcommand the binary opens the TUI. `search` and `info` run a
//! single lookup against the same OMDb services and print JSON, wrapped in
//! an [`Envelope`] when `--json` is set or stdout is piped.
//!
//! ```bash
//! popcorntui search "inception" --json
//! popcorntui info tt1375666
//! ```

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fmt;
use std::io::IsTerminal;
use std::path::PathBuf;
use thiserror::Error;

/// Process outcome of a subcommand, stable for scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    /// Output could not be produced
    Error,
    InvalidArgs,
    /// Transport failure or unusable OMDb reply
    NetworkError,
    NotFound,
}

impl ExitCode {
    pub fn code(self) -> u8 {
        match self {
            ExitCode::Success => 0,
            ExitCode::Error => 1,
            ExitCode::InvalidArgs => 2,
            ExitCode::NetworkError => 3,
            ExitCode::NotFound => 4,
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.code())
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "popcorntui",
    version,
    about = "Terminal movie search, rating and watch list",
    long_about = "Search OMDb as you type, open a movie's details, rate it \
                  and keep a running watched list with averages.\n\n\
                  Run without a subcommand for the interactive TUI.",
    after_help = "EXAMPLES:\n\
                  popcorntui                        Open the TUI\n\
                  popcorntui search \"inception\"     Titles matching a query\n\
                  popcorntui info tt1375666 --json  One movie as JSON"
)]
pub struct Cli {
    /// Wrap output in a JSON envelope (implied when stdout is not a TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Only print results and errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Read settings from this file instead of the default location
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn is_tui(&self) -> bool {
        self.command.is_none()
    }

    pub fn format(&self) -> Format {
        if self.json || !std::io::stdout().is_terminal() {
            Format::Json
        } else {
            Format::Plain
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search titles (at least 3 characters)
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Full details for one IMDb id
    #[command(visible_alias = "i")]
    Info(InfoCmd),
}

#[derive(Args, Debug)]
pub struct SearchCmd {
    pub query: String,

    /// Keep at most this many hits
    #[arg(long, short = 'l', default_value_t = 10)]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct InfoCmd {
    /// e.g. tt1375666
    pub imdb_id: String,
}

// =============================================================================
// Output
// =============================================================================

/// JSON shape for `--json`: either `data` or `error` plus a non-zero code
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_success")]
    pub exit_code: u8,
}

fn is_success(code: &u8) -> bool {
    *code == ExitCode::Success.code()
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Envelope {
            data: Some(data),
            error: None,
            exit_code: ExitCode::Success.code(),
        }
    }

    pub fn failure(message: impl Into<String>, code: ExitCode) -> Self {
        Envelope {
            data: None,
            error: Some(message.into()),
            exit_code: code.code(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Pretty JSON of the bare value
    Plain,
    /// Pretty JSON inside an [`Envelope`]
    Json,
}

/// Where subcommand results, errors and progress lines go
pub struct Output {
    pub format: Format,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Output {
            format: cli.format(),
            quiet: cli.quiet,
        }
    }

    /// Write `data` to stdout
    pub fn print<T: Serialize>(&self, data: T) -> serde_json::Result<()> {
        let text = match self.format {
            Format::Json => serde_json::to_string_pretty(&Envelope::ok(data))?,
            Format::Plain => serde_json::to_string_pretty(&data)?,
        };
        println!("{}", text);
        Ok(())
    }

    /// Report a failure on stderr and hand back its exit code
    pub fn error(&self, message: impl fmt::Display, code: ExitCode) -> ExitCode {
        match self.format {
            Format::Json => {
                let envelope = Envelope::<()>::failure(message.to_string(), code);
                if let Ok(text) = serde_json::to_string_pretty(&envelope) {
                    eprintln!("{}", text);
                }
            }
            Format::Plain if !self.quiet => eprintln!("Error: {}", message),
            Format::Plain => {}
        }
        code
    }

    /// Progress line for humans; silent with `--quiet` or JSON output
    pub fn info(&self, message: impl fmt::Display) {
        if self.format == Format::Plain && !self.quiet {
            eprintln!("{}", message);
        }
    }
}

// =============================================================================
// IMDb ids
// =============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0:?} is not an IMDb id (expected tt followed by 7 or more digits)")]
pub struct InvalidImdbId(pub String);

/// Check that `id` looks like `tt0083658` before it goes over the wire
pub fn parse_imdb_id(id: &str) -> Result<&str, InvalidImdbId> {
    match id.strip_prefix("tt") {
        Some(digits) if digits.len() >= 7 && digits.bytes().all(|b| b.is_ascii_digit()) => Ok(id),
        _ => Err(InvalidImdbId(id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_limit_short_flag() {
        let cli = Cli::parse_from(["popcorntui", "search", "inception", "-l", "3"]);
        assert!(!cli.is_tui());
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.query, "inception");
                assert_eq!(cmd.limit, 3);
            }
            other => panic!("parsed {:?}", other),
        }
    }

    #[test]
    fn test_info_alias_and_global_flags() {
        let cli = Cli::parse_from([
            "popcorntui",
            "--json",
            "--quiet",
            "--config",
            "/tmp/popcorn.toml",
            "i",
            "tt1375666",
        ]);
        assert_eq!(cli.format(), Format::Json);
        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/popcorn.toml")));
        match cli.command {
            Some(Command::Info(cmd)) => assert_eq!(cmd.imdb_id, "tt1375666"),
            other => panic!("parsed {:?}", other),
        }
    }

    #[test]
    fn test_parse_imdb_id() {
        assert_eq!(parse_imdb_id("tt1375666"), Ok("tt1375666"));
        assert!(parse_imdb_id("tt12345678").is_ok());
        assert!(parse_imdb_id("tt123456").is_err());
        assert!(parse_imdb_id("nm1234567").is_err());
        assert!(parse_imdb_id("1234567").is_err());
        assert!(parse_imdb_id("tt12345é7").is_err());

        let err = parse_imdb_id("nope").unwrap_err();
        assert_eq!(err.to_string(), "\"nope\" is not an IMDb id (expected tt followed by 7 or more digits)");
    }

    #[test]
    fn test_envelope_skips_empty_fields() {
        let failure = Envelope::<()>::failure("Movie not found", ExitCode::NotFound);
        assert_eq!(
            serde_json::to_string(&failure).unwrap(),
            r#"{"error":"Movie not found","exit_code":4}"#
        );
        assert_eq!(serde_json::to_string(&Envelope::ok(1)).unwrap(), r#"{"data":1}"#);
    }

    #[test]
    fn test_exit_code_values() {
        let codes = [
            ExitCode::Success,
            ExitCode::Error,
            ExitCode::InvalidArgs,
            ExitCode::NetworkError,
            ExitCode::NotFound,
        ];
        let values: Vec<u8> = codes.iter().map(|c| c.code()).collect();
        assert_eq!(values, [0, 1, 2, 3, 4]);
    }
}
