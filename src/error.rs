use thiserror::Error;

/// Why a smoke run failed. The first failure ends the run.
#[derive(Debug, Error)]
pub enum SmokeError {
    /// The landing page was served but did not contain the expected text.
    #[error("expected the page at {url} to contain {expected:?}, but it was not found in the {len}-byte document")]
    Render {
        url: String,
        expected: &'static str,
        len: usize,
    },

    #[error("expected {url} to respond with status {expected}, got {actual}")]
    Status {
        url: String,
        expected: u16,
        actual: u16,
        body: String,
    },

    /// The response body did not have the shape the check relies on.
    #[error("unexpected response body from {url}: `{field}` {reason}")]
    Shape {
        url: String,
        field: &'static str,
        reason: String,
    },

    #[error("request to {url} could not be completed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl SmokeError {
    /// The name this failure is reported under.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            SmokeError::Render { .. } => "RenderAssertionError",
            SmokeError::Status { .. } => "StatusAssertionError",
            SmokeError::Shape { .. } => "ShapeAssertionError",
            SmokeError::Network { .. } => "NetworkError",
        }
    }

    pub(crate) fn network(url: &str) -> impl FnOnce(reqwest::Error) -> Self + '_ {
        move |source| SmokeError::Network {
            url: url.to_string(),
            source,
        }
    }
}
