use std::str::FromStr;

use derive_more::{Debug, Display};
use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OriginError {
    #[error("not a valid URL: {0}")]
    Parse(#[from] url::ParseError),
    #[error("unsupported scheme {0:?}, expected http or https")]
    Scheme(String),
    #[error("URL has no host")]
    MissingHost,
    #[error("a base URL cannot carry a query string or fragment")]
    HasQueryOrFragment,
}

/// The base URL a deployed service is reached at, without a trailing slash.
#[derive(Clone, Display, Debug, PartialEq, Eq)]
#[display("{_0}")]
#[debug("{_0}")]
pub struct Origin(String);

impl Origin {
    /// Join an absolute path (starting with `/`) onto this origin.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        debug_assert!(path.starts_with('/'));
        format!("{}{path}", self.0)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Origin {
    type Err = OriginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let url = Url::parse(s.trim())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(OriginError::Scheme(url.scheme().to_string()));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(OriginError::MissingHost);
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(OriginError::HasQueryOrFragment);
        }

        Ok(Self(url.as_str().trim_end_matches('/').to_string()))
    }
}
