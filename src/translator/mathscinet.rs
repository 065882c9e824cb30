use tracing::debug;
use url::Url;

use crate::{
    error::FetchError,
    identifier::MrNumber,
    translator::{
        Translator,
        key::{KeyCorrection, correct_key},
        user_agent,
    },
};

/// Search endpoint of the MathSciNet publications database.
pub const DEFAULT_ENDPOINT: &str =
    "https://mathscinet.ams.org/mathscinet/2006/mathscinet/search/publications.html";

/// Query parameters selecting a BibTeX rendering of an MR-number search. The identifier
/// itself goes into `s1`.
const QUERY: &[(&str, &str)] = &[("fn", "130"), ("fmt", "bibtex"), ("pg1", "MR")];

const NOT_FOUND_MARKER: &str = "No publications results for";
const BLOCK_OPEN: &str = "<pre>";
const BLOCK_CLOSE: &str = "</pre>";

/// Fetches records from MathSciNet, one blocking request per identifier.
pub struct MathSciNet {
    agent: ureq::Agent,
    endpoint: Url,
    correction: KeyCorrection,
}

impl MathSciNet {
    pub fn new(endpoint: &str) -> Result<Self, FetchError> {
        let endpoint = Url::parse(endpoint)?;
        // Status codes are inspected by hand: 401 and the other failures mean different things.
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build();
        Ok(MathSciNet {
            agent: ureq::Agent::new_with_config(config),
            endpoint,
            correction: KeyCorrection::default(),
        })
    }

    pub fn with_key_correction(mut self, correction: KeyCorrection) -> Self {
        self.correction = correction;
        self
    }

    fn query_url(&self, id: MrNumber<'_>) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in QUERY {
                pairs.append_pair(name, value);
            }
            pairs.append_pair("s1", id.as_str());
        }
        url
    }
}

impl Translator for MathSciNet {
    fn fetch(&self, id: MrNumber<'_>) -> Result<String, FetchError> {
        let url = self.query_url(id);
        debug!(%url, "requesting MathSciNet record");

        let response = self
            .agent
            .get(url.as_str())
            .header("User-Agent", user_agent::random_chrome())
            .call()?;

        match response.status().as_u16() {
            200 => {}
            401 => return Err(FetchError::Unauthenticated),
            code => return Err(FetchError::Status(code)),
        }

        let body = response.into_body().read_to_string()?;
        let code = extract_bibtex(&body, id)?;
        debug!(id = %id, bytes = code.len(), "extracted BibTeX block");
        Ok(correct_key(id, code, self.correction))
    }
}

/// Reconstructs the BibTeX code block embedded in a MathSciNet results page.
///
/// Every line strictly between a `<pre>` line and a `</pre>` line is kept, each prefixed with
/// a newline. A page without a well-formed block yields an empty string.
pub fn extract_bibtex(body: &str, id: MrNumber<'_>) -> Result<String, FetchError> {
    let mut in_block = false;
    let mut code = String::new();

    for line in body.split('\n') {
        if line.contains(NOT_FOUND_MARKER) {
            return Err(FetchError::NotFound(id.to_string()));
        }

        if line.trim() == BLOCK_CLOSE {
            in_block = false;
        }

        if in_block {
            code.push('\n');
            code.push_str(line);
        }

        if line.trim() == BLOCK_OPEN {
            in_block = true;
        }
    }

    Ok(code)
}
