//! Client Error Types

use thiserror::Error;

/// Client result type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client error
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("RPC error ({code:?}): {message}")]
    Rpc {
        code: tonic::Code,
        message: String,
    },

    #[error("Deadline of {0:?} exceeded")]
    DeadlineExceeded(std::time::Duration),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("Bearer token is not a valid header value")]
    InvalidToken,
}

impl From<tonic::Status> for ClientError {
    fn from(status: tonic::Status) -> Self {
        ClientError::Rpc {
            code: status.code(),
            message: status.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_to_rpc_error() {
        let status = tonic::Status::unauthenticated("token rejected");
        let err = ClientError::from(status);

        match err {
            ClientError::Rpc { code, message } => {
                assert_eq!(code, tonic::Code::Unauthenticated);
                assert_eq!(message, "token rejected");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_error_display_carries_cause() {
        let err = ClientError::Connection("refused".to_string());
        assert!(err.to_string().contains("refused"));
    }
}
