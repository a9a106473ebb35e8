use thiserror::Error;

/// Transport-level failures from the HTTP seam.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Request(String),
}

/// Failures while fetching recipes from TheMealDB.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Http(#[from] HttpError),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Response contained no recipes")]
    EmptyResult,
}

/// Failures while remixing through the chat-completion API.
///
/// `Api` displays as `OpenAI API error: <status>`; that line is shown to
/// users verbatim when the service answers with a non-success status.
#[derive(Error, Debug)]
pub enum RemixError {
    #[error("Request failed: {0}")]
    Http(#[from] HttpError),

    #[error("OpenAI API error: {0}")]
    Api(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_includes_status() {
        assert_eq!(RemixError::Api(500).to_string(), "OpenAI API error: 500");
        assert_eq!(RemixError::Api(429).to_string(), "OpenAI API error: 429");
    }
}
