use std::{io, process::ExitCode};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Cli, LogLevel},
    report::Report,
    resolver::{OnFatal, Resolver},
    translator::{key::KeyCorrection, mathscinet::MathSciNet},
};

mod cli;
mod error;
mod identifier;
mod reference;
mod report;
mod resolver;
mod translator;

fn main() -> ExitCode {
    let args = Cli::parse();
    init_logging(args.log_level);

    match run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            tracing::debug!(error = ?err, "fatal error");
            eprintln!("{err}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(level: LogLevel) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

/// Resolves every identifier and writes the report. Any error returned here is fatal; the
/// results gathered so far are dropped.
fn run(args: &Cli) -> anyhow::Result<u8> {
    let ids = args.identifiers(io::stdin().lock())?;
    let options = args.options();

    let correction = if args.fix_keys {
        KeyCorrection::Restore
    } else {
        KeyCorrection::Keep
    };
    let translator = MathSciNet::new(&args.endpoint)?.with_key_correction(correction);

    let mut resolver = Resolver::new(translator).on_fatal(if args.keep_going {
        OnFatal::Record
    } else {
        OnFatal::Abort
    });
    if !options.quiet {
        resolver = resolver.with_progress();
    }

    let outcomes = resolver.resolve(&ids)?;
    tracing::debug!(
        count = outcomes.len(),
        failed = outcomes.iter().filter(|o| o.is_error()).count(),
        "resolved identifiers"
    );

    let mut report = Report::build(&outcomes, &options);
    report.print_output(&mut io::stdout().lock(), &mut io::stdout(), options.verbose)?;
    report.print_messages(&mut io::stderr())?;
    Ok(report.code)
}
