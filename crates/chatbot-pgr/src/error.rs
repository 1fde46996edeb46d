//! Error types for complaint tracking.

use chatbot_core::error::ChatbotError;

/// Errors from a complaint tracking turn.
///
/// Every variant is fatal for the turn: no partial message is produced.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("invalid track request: {0}")]
    InvalidRequest(String),
    #[error("PGR search failed with status {status}: {body}")]
    ExternalService { status: u16, body: String },
    #[error("malformed PGR search response: {0}")]
    MalformedResponse(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<ChatbotError> for TrackError {
    fn from(err: ChatbotError) -> Self {
        TrackError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_error_display() {
        let err = TrackError::InvalidRequest("tenantId must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "invalid track request: tenantId must not be empty"
        );

        let err = TrackError::ExternalService {
            status: 500,
            body: "{\"Errors\":[]}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "PGR search failed with status 500: {\"Errors\":[]}"
        );

        let err = TrackError::MalformedResponse("missing field `status`".to_string());
        assert_eq!(
            err.to_string(),
            "malformed PGR search response: missing field `status`"
        );
    }

    #[test]
    fn test_track_error_from_chatbot_error() {
        let err: TrackError = ChatbotError::Config("bad host".to_string()).into();
        assert!(matches!(err, TrackError::Config(_)));
        assert!(err.to_string().contains("bad host"));
    }

    #[test]
    fn test_external_service_keeps_status_and_body() {
        let err = TrackError::ExternalService {
            status: 401,
            body: "unauthorized".to_string(),
        };
        match err {
            TrackError::ExternalService { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "unauthorized");
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
