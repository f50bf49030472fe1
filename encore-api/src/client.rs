use std::time::Duration;

#[derive(Debug)]
/// An error that can occur when interacting with the client.
pub enum ClientError {
    /// An error that occurred when making a request.
    ReqwestError(reqwest::Error),
    /// An error that occurred when serializing a request or deserializing a response.
    DeserializationError(serde_json::Error),
    /// The backend answered with a non-success status.
    StatusError {
        /// The HTTP status code.
        status: u16,
        /// The `error` field of the response body, if there was one.
        message: Option<String>,
    },
}
impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::ReqwestError(e) => write!(f, "Reqwest error: {e}"),
            ClientError::DeserializationError(e) => write!(f, "Deserialization error: {e}"),
            ClientError::StatusError { status, message } => {
                write!(f, "Backend returned status {status}")?;
                if let Some(message) = message {
                    write!(f, ": {message}")?;
                }
                Ok(())
            }
        }
    }
}
impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::ReqwestError(e) => Some(e),
            ClientError::DeserializationError(e) => Some(e),
            ClientError::StatusError { .. } => None,
        }
    }
}
impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::ReqwestError(e)
    }
}
impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::DeserializationError(e)
    }
}
/// A result type for the client.
pub type ClientResult<T> = Result<T, ClientError>;

/// A client for the recommendation backend.
pub struct Client {
    pub(crate) base_url: String,
    pub(crate) client: reqwest::Client,
}
impl Client {
    /// Create a new client that uses the platform's default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            client: reqwest::Client::new(),
        }
    }

    /// Create a new client whose requests fail after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url.into()),
            client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    /// The base URL requests are made against, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn normalize_base_url(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        assert_eq!(
            Client::new("http://localhost:5001/").base_url(),
            "http://localhost:5001"
        );
        assert_eq!(
            Client::new("http://localhost:5001//").base_url(),
            "http://localhost:5001"
        );
        assert_eq!(
            Client::new("http://localhost:5001").base_url(),
            "http://localhost:5001"
        );
    }

    #[test]
    fn status_error_display_includes_message() {
        let err = ClientError::StatusError {
            status: 400,
            message: Some("Members are required".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Backend returned status 400: Members are required"
        );

        let err = ClientError::StatusError {
            status: 502,
            message: None,
        };
        assert_eq!(err.to_string(), "Backend returned status 502");
    }
}
