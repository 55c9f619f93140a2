use miette::Diagnostic;
use thiserror::Error;
use url::Url;

use crate::cli::Cli;

// Error messages for the base URL rules, shared with the CLI help text
const BASE_URL_ENDS_WITH: &str =
    "The base URL can't end with a /, each step path supplies its own leading one";

/// Run-wide settings, built once from the CLI and passed by reference to
/// every call site. Nothing mutates it after startup.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub base_url: String,
    pub verbose: bool,
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("{BASE_URL_ENDS_WITH}")]
    #[diagnostic(help("drop the trailing slash, e.g. http://localhost:5000/api"))]
    TrailingSlash,

    #[error("failed to parse base URL `{url}`")]
    Unparsable {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl RunConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        if cli.base_url.ends_with('/') {
            return Err(ConfigError::TrailingSlash);
        }

        Url::parse(&cli.base_url).map_err(|source| ConfigError::Unparsable {
            url: cli.base_url.clone(),
            source,
        })?;

        Ok(Self {
            base_url: cli.base_url.clone(),
            verbose: cli.verbose,
        })
    }

    /// Joins a step path onto the base address. Identifiers embedded in the
    /// path are interpolated verbatim, no extra encoding.
    pub fn url_for(&self, path: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}{}", self.base_url, path))
    }
}
