use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the provider and the backend client.
/// The webhook layer maps every one of these to a 500; malformed inbound
/// JSON never gets this far because the extractor rejects it with a 400.
#[derive(Debug, Error)]
pub enum Error {
    /// A change was submitted without any target to point the record at.
    #[error("no targets specified for {0}")]
    Validation(String),

    /// An update referenced a name the backend does not hold.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The backend answered with a non-success status.
    #[error("unexpected status code {status}: {body}")]
    Backend { status: u16, body: String },

    /// The request never completed, or the response body did not decode.
    #[error("failed to execute request: {0}")]
    Transport(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_carries_status_and_body() {
        let err = Error::Backend {
            status: 403,
            body: "forbidden".to_string(),
        };
        assert_eq!(err.to_string(), "unexpected status code 403: forbidden");
    }

    #[test]
    fn not_found_names_the_record() {
        let err = Error::NotFound("a.example.com".to_string());
        assert_eq!(err.to_string(), "record not found: a.example.com");
    }
}
