//! Error types for delivery channels.

/// All errors that can occur while delivering a submission.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// Missing or invalid channel configuration (relay credentials,
    /// template identifiers, backend URL).
    #[error("channel config error: {0}")]
    Config(String),

    /// The provider or endpoint returned an HTTP error.
    #[error("channel API error {status_code}: {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Error message from the provider or endpoint.
        message: String,
    },

    /// Request timed out.
    #[error("channel request timed out")]
    Timeout,

    /// Network or HTTP client error.
    #[error("channel network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("channel json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChannelError {
    /// Split timeouts from other transport failures.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err)
        }
    }

    /// Text that is safe to surface in the UI for this error.
    ///
    /// The raw provider error never reaches the presentation layer; it is
    /// logged at the channel seam instead.
    #[must_use]
    pub fn user_safe_message(&self) -> &'static str {
        match self {
            Self::Config(_) => "Email service configuration error. Please contact support.",
            Self::Timeout | Self::Network(_) => {
                "Network error. Please check your connection and try again."
            }
            Self::Api { .. } | Self::Json(_) => "Something went wrong. Please try again.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_point_at_support() {
        let err = ChannelError::Config("missing service_id".to_owned());
        assert_eq!(
            err.user_safe_message(),
            "Email service configuration error. Please contact support."
        );
    }

    #[test]
    fn timeout_reads_as_network_trouble() {
        assert_eq!(
            ChannelError::Timeout.user_safe_message(),
            "Network error. Please check your connection and try again."
        );
    }

    #[test]
    fn api_errors_stay_generic() {
        let err = ChannelError::Api {
            status_code: 422,
            message: "template rejected: bad params".to_owned(),
        };
        let msg = err.user_safe_message();
        assert_eq!(msg, "Something went wrong. Please try again.");
        assert!(!msg.contains("template"));
    }
}
