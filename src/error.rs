//! Error types for Chargify API calls.
//!
//! Every failure a call can produce is classified into one [`Error`] variant.
//! Only [`Error::Transport`] is considered transient and eligible for retry;
//! everything else is surfaced to the caller immediately.

use http::StatusCode;

/// Generic message used when the API reports an empty `errors` array.
pub(crate) const UNABLE_TO_PROCESS: &str = "Unable to process request.";

/// Generic message used for bodies that are not valid JSON outside debug mode.
pub(crate) const UNPARSEABLE: &str = "Unable to parse response.";

/// The main error type for Chargify API calls.
///
/// # Examples
///
/// ```no_run
/// use chargify_api::{Client, Error, RequestOptions};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder()
///     .subdomain("acme")
///     .api_key("secret")
///     .build()?;
///
/// match client.get::<serde_json::Value>("/customers/42", RequestOptions::tagged("customer")).await {
///     Ok(customer) => println!("Customer: {customer}"),
///     Err(Error::NotFound) => eprintln!("no such customer"),
///     Err(Error::ApiValidation(messages)) => eprintln!("rejected: {messages:?}"),
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An identifier or argument was rejected before any request was made.
    ///
    /// This is a programming error on the caller's side and is never retried.
    #[error("Bad parameter: {0}")]
    BadParameter(String),

    /// The server answered 404.
    #[error("Not found.")]
    NotFound,

    /// The server answered 403. Chargify uses this for operations the site
    /// does not support.
    #[error("Not supported.")]
    Forbidden,

    /// The response body could not be decoded as JSON.
    ///
    /// Outside debug mode the message is a stable generic string; in debug
    /// mode it carries the decoder error and the offending body.
    #[error("{message}")]
    Unparseable {
        /// Human-readable description.
        message: String,
        /// The raw response body.
        raw_response: String,
        /// The HTTP status code.
        status: StatusCode,
    },

    /// The server answered with no usable body.
    #[error("No body received (status {status}).")]
    NoBody {
        /// The HTTP status code.
        status: StatusCode,
    },

    /// The API rejected the request and listed its reasons.
    #[error("{}", .0.join("\n"))]
    ApiValidation(Vec<String>),

    /// A failure below the application layer: connection, DNS, timeout, or a
    /// server-side 5xx. This is the only retryable variant.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportCause),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An invalid URL was built or provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Failed to serialize the request body.
    #[error("Failed to serialize request: {0}")]
    Serialization(String),

    /// The unwrapped result did not match the type the caller asked for.
    #[error("Failed to deserialize result: {serde_error}")]
    DeserializationFailed {
        /// The unwrapped JSON, rendered as text.
        raw_response: String,
        /// The serde error message.
        serde_error: String,
    },
}

/// Why a request failed at the transport level.
#[derive(thiserror::Error, Debug)]
pub enum TransportCause {
    /// Connection refused, DNS failure, TLS failure and the like.
    #[error("network error: {0}")]
    Network(reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a 5xx status.
    #[error("server error {status}: {raw_response}")]
    Server {
        /// The HTTP status code.
        status: StatusCode,
        /// The raw response body.
        raw_response: String,
    },
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Transport(TransportCause::Timeout)
        } else {
            Error::Transport(TransportCause::Network(err))
        }
    }
}

impl Error {
    /// Returns `true` if this error is transient and the request may be retried.
    ///
    /// # Examples
    ///
    /// ```
    /// use chargify_api::{Error, TransportCause};
    /// use http::StatusCode;
    ///
    /// let err = Error::Transport(TransportCause::Server {
    ///     status: StatusCode::BAD_GATEWAY,
    ///     raw_response: String::new(),
    /// });
    /// assert!(err.is_retryable());
    ///
    /// assert!(!Error::NotFound.is_retryable());
    /// assert!(!Error::ApiValidation(vec!["bad email".into()]).is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Returns the HTTP status code if the error carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::NotFound => Some(StatusCode::NOT_FOUND),
            Error::Forbidden => Some(StatusCode::FORBIDDEN),
            Error::Unparseable { status, .. } => Some(*status),
            Error::NoBody { status } => Some(*status),
            Error::Transport(TransportCause::Server { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if the error carries one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::Unparseable { raw_response, .. } => Some(raw_response),
            Error::Transport(TransportCause::Server { raw_response, .. }) => Some(raw_response),
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Returns the messages reported by the API for validation failures.
    pub fn messages(&self) -> Option<&[String]> {
        match self {
            Error::ApiValidation(messages) => Some(messages),
            _ => None,
        }
    }
}

/// A specialized `Result` type for Chargify API calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_join_with_newlines() {
        let err = Error::ApiValidation(vec!["bad email".into(), "bad zip".into()]);
        assert_eq!(err.to_string(), "bad email\nbad zip");
        assert_eq!(err.messages().map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_only_transport_is_retryable() {
        assert!(Error::Transport(TransportCause::Timeout).is_retryable());
        assert!(!Error::Forbidden.is_retryable());
        assert!(!Error::NoBody {
            status: StatusCode::OK
        }
        .is_retryable());
        assert!(!Error::BadParameter("x".into()).is_retryable());
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(Error::NotFound.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(Error::Forbidden.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(Error::ApiValidation(vec![]).status(), None);
    }
}
