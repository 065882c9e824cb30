use std::io::{self, Write};

use owo_colors::{OwoColorize, Stream};

use crate::{cli::Options, reference::Outcome};

pub const LINE_SEPARATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

pub const NO_MATCHES: &str = "No successful matches";
pub const ENCODING_FALLBACK: &str = "Could not use system encoding; using utf-8";

/// Output and diagnostics for a finished run.
#[derive(Debug, Default)]
pub struct Report {
    /// BibTeX entries and comments, bound for stdout.
    pub output: Vec<String>,
    /// Human-readable diagnostics, bound for stderr.
    pub messages: Vec<String>,
    pub error_count: usize,
    pub code: u8,
}

impl Report {
    /// Formats `outcomes` and tallies errors into an exit code.
    pub fn build(outcomes: &[Outcome], options: &Options) -> Self {
        let mut report = Report::default();

        for outcome in outcomes {
            match outcome {
                Outcome::Failed(info) => {
                    tracing::debug!(
                        id = %info.id,
                        bare_id = %info.bare_id,
                        updated = info.updated,
                        message = %info.message,
                        "reporting error"
                    );
                    report.error_count += 1;
                    if options.comments {
                        report.output.push(info.bibtex());
                    }
                    if !options.quiet {
                        report.messages.push(
                            info.if_supports_color(Stream::Stderr, |t| t.red())
                                .to_string(),
                        );
                    }
                }
                Outcome::Found(reference) => report.output.push(reference.bibtex().to_string()),
            }
        }

        report.code = report.tally(outcomes.len());
        report
    }

    fn tally(&mut self, total: usize) -> u8 {
        if self.error_count == total {
            self.messages.push(NO_MATCHES.to_string());
            2
        } else if self.error_count > 0 {
            self.messages.push(format!(
                "{} of {} matched succesfully",
                total - self.error_count,
                total
            ));
            1
        } else {
            0
        }
    }

    /// Writes the output buffer to `out`.
    ///
    /// Should `out` refuse the text as invalid data, the raw UTF-8 bytes go to `fallback`
    /// instead and, when `verbose`, a note is added to the messages.
    pub fn print_output(
        &mut self,
        out: &mut impl Write,
        fallback: &mut impl Write,
        verbose: bool,
    ) -> io::Result<()> {
        if self.output.is_empty() {
            return Ok(());
        }

        let mut text = self.output.join(LINE_SEPARATOR);
        text.push_str(LINE_SEPARATOR);

        match out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                fallback.write_all(text.as_bytes())?;
                fallback.flush()?;
                if verbose {
                    self.messages.push(ENCODING_FALLBACK.to_string());
                }
                Ok(())
            }
            other => other,
        }
    }

    /// Writes the messages to `err`, followed by a blank line. Nothing is written when there
    /// are no messages.
    pub fn print_messages(&mut self, err: &mut impl Write) -> io::Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        self.messages.push(String::new());
        err.write_all(self.messages.join(LINE_SEPARATOR).as_bytes())?;
        err.flush()
    }
}
