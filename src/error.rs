/// Failures of a single MathSciNet lookup.
///
/// Only [`FetchError::NotFound`] is attributable to the identifier itself; everything else
/// means the connection to MathSciNet is unusable and the batch cannot continue.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("No such publication: {0}")]
    NotFound(String),

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Received HTTP status code {0}")]
    Status(u16),

    #[error("HTTP Connection Error: {0}")]
    Transport(#[from] ureq::Error),

    #[error("invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),
}

impl FetchError {
    pub fn is_fatal(&self) -> bool {
        !matches!(self, FetchError::NotFound(_))
    }
}
