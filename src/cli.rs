use std::io::BufRead;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use crate::translator::mathscinet::DEFAULT_ENDPOINT;

const EPILOG: &str = "\
Returns 0 on success, 1 on partial failure, 2 on total failure.
Valid BibTeX is written to stdout, error messages to stderr.
If no arguments are given, ids are read from stdin, one per line.";

/// Get the BibTeX for each MathSciNet id.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, after_help = EPILOG)]
pub struct Cli {
    /// MathSciNet identifier, such as MR1996800
    #[arg(value_name = "mathscinet_id")]
    pub ids: Vec<String>,

    /// Include @comment fields with error details
    #[arg(short, long)]
    pub comments: bool,

    /// Display fewer error messages
    #[arg(short, long)]
    pub quiet: bool,

    /// Display more error messages
    #[arg(short, long)]
    pub verbose: bool,

    /// Restore keys whose leading zero MathSciNet dropped (MR546620 -> MR0546620)
    #[arg(long)]
    pub fix_keys: bool,

    /// Record connection failures against the identifier instead of aborting the batch
    #[arg(long)]
    pub keep_going: bool,

    /// Log level: error, warn, info, debug, trace (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    #[arg(long, env = "MR2BIB_ENDPOINT", default_value = DEFAULT_ENDPOINT, hide = true)]
    pub endpoint: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// How the report is rendered, after flag interactions are settled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub comments: bool,
    pub quiet: bool,
    pub verbose: bool,
}

impl Cli {
    pub fn options(&self) -> Options {
        Options {
            comments: self.comments,
            // @comment entries already carry the errors; avoid saying it twice unless verbose.
            quiet: self.quiet || (self.comments && !self.verbose),
            verbose: self.verbose,
        }
    }

    /// Identifiers given on the command line, or else one per line of `input`.
    pub fn identifiers(&self, input: impl BufRead) -> anyhow::Result<Vec<String>> {
        if !self.ids.is_empty() {
            return Ok(self.ids.clone());
        }
        input
            .lines()
            .map(|line| {
                line.map(|l| l.trim().to_string())
                    .context("failed to read identifiers from stdin")
            })
            .collect()
    }
}
