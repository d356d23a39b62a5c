use std::fmt;

/// Errors that can arise when calling a chat completion API.
#[derive(Debug)]
pub enum OpenAIError {
    /// Transport errors (connection, TLS, decoding the body).
    Http(reqwest::Error),
    /// The request did not finish within the configured timeout.
    Timeout,
    /// The response body is not the expected JSON.
    Json(serde_json::Error),
    /// The service answered with a non-success status.
    Api {
        /// HTTP status code.
        status: u16,
        /// Upstream error message, or the raw body when it has none.
        message: String,
    },
    /// The response carried no assistant content.
    EmptyResponse,
    /// The credential environment variable is unset or empty.
    MissingApiKey {
        /// Name of the environment variable that was read.
        var: &'static str,
    },
}

impl fmt::Display for OpenAIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => write!(f, "HTTP error: {err}"),
            Self::Timeout => f.write_str("request timed out"),
            Self::Json(err) => write!(f, "JSON error: {err}"),
            Self::Api { status, message } => write!(f, "API error ({status}): {message}"),
            Self::EmptyResponse => f.write_str("response contained no message content"),
            Self::MissingApiKey { var } => write!(f, "set {var} in your environment"),
        }
    }
}

impl std::error::Error for OpenAIError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OpenAIError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(value)
        }
    }
}

impl From<serde_json::Error> for OpenAIError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = OpenAIError::Api {
            status: 401,
            message: "Invalid API Key".into(),
        };
        assert_eq!(err.to_string(), "API error (401): Invalid API Key");
        assert_eq!(
            OpenAIError::MissingApiKey {
                var: "GROQ_API_KEY"
            }
            .to_string(),
            "set GROQ_API_KEY in your environment"
        );
    }
}
