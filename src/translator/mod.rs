use crate::{error::FetchError, identifier::MrNumber};

pub mod key;
pub mod mathscinet;
pub mod user_agent;

/// Turns a validated identifier into raw BibTeX.
pub trait Translator {
    fn fetch(&self, id: MrNumber<'_>) -> Result<String, FetchError>;
}

impl<T: Translator + ?Sized> Translator for &T {
    fn fetch(&self, id: MrNumber<'_>) -> Result<String, FetchError> {
        (**self).fetch(id)
    }
}
