/// Errors a form session surfaces to the user.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The schema service returned no schema. Carries the service message.
    #[error("Form unavailable: {0}")]
    SchemaUnavailable(String),

    /// The submission service returned no response id. Carries the service message.
    #[error("Submission rejected: {0}")]
    SubmissionRejected(String),

    /// Transport or service failure (network, decoding, ...).
    #[error("Service error: {0}")]
    Service(#[from] anyhow::Error),
}

impl FormError {
    /// Create a service error from any error type.
    pub fn service(err: impl Into<anyhow::Error>) -> Self {
        Self::Service(err.into())
    }

    /// The message shown to the user for this error.
    ///
    /// Service-supplied messages are shown verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Self::SchemaUnavailable(message) | Self::SubmissionRejected(message) => {
                message.clone()
            }
            Self::Service(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_messages_are_shown_verbatim() {
        let err = FormError::SubmissionRejected("validation failed".to_string());
        assert_eq!(err.user_message(), "validation failed");
        assert_eq!(err.to_string(), "Submission rejected: validation failed");
    }

    #[test]
    fn wraps_transport_errors() {
        let err = FormError::service(anyhow::anyhow!("connection reset"));
        assert!(matches!(err, FormError::Service(_)));
        assert_eq!(err.user_message(), "connection reset");
    }
}
