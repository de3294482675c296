//! CLI argument definitions for the REDCap converter.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use redcap_cli::logging::{LogConfig, LogFormat};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "redcap-convert",
    version,
    about = "Convert a raw study export into a REDCap import file",
    long_about = "Convert a raw study export into a REDCap import file.\n\n\
                  Every column is checked against the REDCap data dictionary. A clean run\n\
                  writes an import-ready CSV; any error writes a highlighted copy of the\n\
                  original data instead, together with an error log."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include raw cell values in log output (they are redacted otherwise).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

impl Cli {
    /// Logging setup implied by the global flags.
    ///
    /// `--log-level` beats `-v`/`-q`, and either one disables `RUST_LOG`.
    pub fn log_config(&self) -> LogConfig {
        let level_filter = match self.log_level {
            Some(LogLevelArg::Error) => LevelFilter::ERROR,
            Some(LogLevelArg::Warn) => LevelFilter::WARN,
            Some(LogLevelArg::Info) => LevelFilter::INFO,
            Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
            Some(LogLevelArg::Trace) => LevelFilter::TRACE,
            None => self.verbosity.tracing_level_filter(),
        };
        let with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        LogConfig {
            level_filter,
            use_env_filter: !(self.verbosity.is_present() || self.log_level.is_some()),
            with_ansi,
            format: match self.log_format {
                LogFormatArg::Pretty => LogFormat::Pretty,
                LogFormatArg::Compact => LogFormat::Compact,
                LogFormatArg::Json => LogFormat::Json,
            },
            log_file: self.log_file.clone(),
            log_data: self.log_data,
            ..LogConfig::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a data file against a data dictionary.
    Convert(ConvertArgs),

    /// List the fields of a data dictionary.
    Fields(FieldsArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Raw data file (CSV or workbook).
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// REDCap data dictionary (CSV or workbook).
    #[arg(long = "dictionary", short = 'd', value_name = "DICT")]
    pub dictionary: PathBuf,

    /// Worksheet to read from a workbook data file.
    #[arg(long = "sheet", value_name = "SHEET")]
    pub sheet: Option<String>,

    /// Worksheet to read from a workbook dictionary.
    #[arg(long = "dictionary-sheet", value_name = "SHEET")]
    pub dictionary_sheet: Option<String>,

    /// Output directory for generated files (default: <DATA dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Match data headers on dictionary variable names or field labels.
    #[arg(long = "match-on", value_enum, default_value = "variable")]
    pub match_on: MatchOnArg,

    /// Read ambiguous dates such as 03/04/2021 as day first.
    #[arg(long = "day-first")]
    pub day_first: bool,

    /// Check and report without writing any output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// REDCap data dictionary (CSV or workbook).
    #[arg(value_name = "DICT")]
    pub dictionary: PathBuf,

    /// Worksheet to read from a workbook dictionary.
    #[arg(long = "sheet", value_name = "SHEET")]
    pub sheet: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MatchOnArg {
    Variable,
    Label,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("redcap-convert").chain(args.iter().copied()))
            .expect("parse")
    }

    #[test]
    fn defaults_defer_to_rust_log() {
        let config = parse(&["fields", "dict.csv"]).log_config();
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert!(!config.log_data);
    }

    #[test]
    fn explicit_level_beats_quiet_flag() {
        let config = parse(&["--log-level", "debug", "-q", "fields", "dict.csv"]).log_config();
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn data_logging_and_format_are_passed_through() {
        let cli = parse(&["--log-data", "--log-format", "json", "--color", "never", "fields", "d.csv"]);
        let config = cli.log_config();
        assert!(config.log_data);
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.with_ansi);
    }
}
