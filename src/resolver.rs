use std::collections::HashMap;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::{
    error::FetchError,
    identifier::MrNumber,
    reference::{ErrorInfo, Outcome, Reference},
    translator::Translator,
};

pub const INVALID_MESSAGE: &str = "Invalid identifier";
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// What to do when a lookup fails for reasons unrelated to the identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnFatal {
    /// Stop and discard everything resolved so far.
    #[default]
    Abort,
    /// Record the failure against the identifier and carry on with the rest.
    Record,
}

/// Maps identifiers to [`Outcome`]s using a [`Translator`].
pub struct Resolver<T> {
    translator: T,
    on_fatal: OnFatal,
    progress: ProgressBar,
}

impl<T: Translator> Resolver<T> {
    pub fn new(translator: T) -> Self {
        Resolver {
            translator,
            on_fatal: OnFatal::default(),
            progress: ProgressBar::hidden(),
        }
    }

    pub fn on_fatal(mut self, on_fatal: OnFatal) -> Self {
        self.on_fatal = on_fatal;
        self
    }

    /// Report progress on stderr. Nothing is drawn when stderr is not a terminal.
    pub fn with_progress(mut self) -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{pos}/{len}] {msg}") {
            bar.set_style(style);
        }
        self.progress = bar;
        self
    }

    /// Fetches citations for every identifier in `ids` into a map indexed by identifier.
    ///
    /// Invalid identifiers are recorded without touching the network. Fails on the first
    /// fatal error unless the resolver was built with [`OnFatal::Record`].
    pub fn resolve_map(&self, ids: &[String]) -> Result<HashMap<String, Outcome>, FetchError> {
        let mut map = HashMap::with_capacity(ids.len());
        let mut valid = Vec::with_capacity(ids.len());

        for id in ids {
            match MrNumber::parse(id) {
                Some(mr) => valid.push(mr),
                None => {
                    debug!(id = %id, "skipping invalid identifier");
                    map.insert(id.clone(), Outcome::Failed(ErrorInfo::new(INVALID_MESSAGE, id)));
                }
            }
        }

        self.progress.set_length(valid.len() as u64);
        for mr in valid {
            self.progress.set_message(mr.to_string());
            let outcome = self.lookup(mr);
            self.progress.inc(1);
            match outcome {
                Ok(outcome) => {
                    map.insert(mr.to_string(), outcome);
                }
                Err(err) => {
                    self.progress.finish_and_clear();
                    return Err(err);
                }
            }
        }
        self.progress.finish_and_clear();

        Ok(map)
    }

    /// Returns one outcome per element of `ids`, in the same order.
    pub fn resolve(&self, ids: &[String]) -> Result<Vec<Outcome>, FetchError> {
        let map = self.resolve_map(ids)?;
        Ok(ids
            .iter()
            .map(|id| {
                map.get(id)
                    .cloned()
                    .unwrap_or_else(|| Outcome::Failed(ErrorInfo::new(NOT_FOUND_MESSAGE, id)))
            })
            .collect())
    }

    fn lookup(&self, mr: MrNumber<'_>) -> Result<Outcome, FetchError> {
        match self.translator.fetch(mr) {
            Ok(entry) => Ok(Outcome::Found(Reference::new(entry))),
            Err(err) if !err.is_fatal() => {
                debug!(id = %mr, error = %err, "no publication found");
                Ok(Outcome::Failed(ErrorInfo::new(NOT_FOUND_MESSAGE, mr.as_str())))
            }
            Err(err) if self.on_fatal == OnFatal::Record => {
                info!(id = %mr, error = %err, "lookup failed, continuing");
                Ok(Outcome::Failed(ErrorInfo::new(err.to_string(), mr.as_str())))
            }
            Err(err) => Err(err),
        }
    }
}
