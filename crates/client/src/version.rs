//! Version service port and its gRPC adapter

use std::time::Duration;

use async_trait::async_trait;
use tonic::metadata::AsciiMetadataValue;
use tonic::transport::Channel;
use tonic::Request;
use tracing::debug;

use opsprobe_proto::version::version_service_client::VersionServiceClient;
use opsprobe_proto::version::{VersionMessage, VersionQuery};

use crate::error::{ClientError, Result};
use crate::options::{ConnectOptions, MAX_MESSAGE_SIZE};
use crate::transport::open_channel;

/// Port over the remote version lookup
///
/// A single operation, so tests can substitute the transport with a stub
/// returning a fixed reply or a fixed error.
#[async_trait]
pub trait VersionProvider: Send + Sync {
    /// Fetch the server's build information
    async fn version(&self) -> Result<VersionMessage>;
}

/// gRPC adapter for [`VersionProvider`]
///
/// Holds an established channel plus the per-call credentials and deadline.
/// Each call is unary and synchronous from the caller's point of view.
#[derive(Debug)]
pub struct GrpcVersionClient {
    channel: Channel,
    bearer: Option<AsciiMetadataValue>,
    timeout: Duration,
}

impl GrpcVersionClient {
    /// Open the channel and prepare call credentials.
    ///
    /// An empty token is treated the same as no token at all.
    ///
    /// # Errors
    /// - `ClientError::InvalidEndpoint` / `ClientError::Connection` if the
    ///   channel cannot be established
    /// - `ClientError::InvalidToken` if the token cannot be carried in an
    ///   `authorization` metadata entry
    pub async fn connect(options: &ConnectOptions) -> Result<Self> {
        let bearer = options
            .token
            .as_deref()
            .filter(|token| !token.is_empty())
            .map(|token| {
                format!("Bearer {}", token)
                    .parse::<AsciiMetadataValue>()
                    .map_err(|_| ClientError::InvalidToken)
            })
            .transpose()?;

        let channel = open_channel(options).await?;

        Ok(Self {
            channel,
            bearer,
            timeout: options.timeout,
        })
    }
}

#[async_trait]
impl VersionProvider for GrpcVersionClient {
    async fn version(&self) -> Result<VersionMessage> {
        let mut client = VersionServiceClient::new(self.channel.clone())
            .max_decoding_message_size(MAX_MESSAGE_SIZE)
            .max_encoding_message_size(MAX_MESSAGE_SIZE);

        // Deadline travels with the call (grpc-timeout) and is enforced
        // locally as well, so a silent server cannot stall the process.
        let mut request = Request::new(VersionQuery {});
        request.set_timeout(self.timeout);
        if let Some(bearer) = &self.bearer {
            request.metadata_mut().insert("authorization", bearer.clone());
        }

        debug!(timeout = ?self.timeout, "calling version.VersionService/Version");
        let response = tokio::time::timeout(self.timeout, client.version(request))
            .await
            .map_err(|_| ClientError::DeadlineExceeded(self.timeout))?
            .map_err(ClientError::from)?;

        Ok(response.into_inner())
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;

    /// Returns a fixed reply without touching the network
    pub struct StaticVersionProvider {
        reply: VersionMessage,
    }

    impl StaticVersionProvider {
        pub fn new(reply: VersionMessage) -> Self {
            Self { reply }
        }
    }

    #[async_trait]
    impl VersionProvider for StaticVersionProvider {
        async fn version(&self) -> Result<VersionMessage> {
            Ok(self.reply.clone())
        }
    }

    /// Always fails with the given status code
    pub struct FailingVersionProvider {
        code: tonic::Code,
        message: String,
    }

    impl FailingVersionProvider {
        pub fn new(code: tonic::Code, message: impl Into<String>) -> Self {
            Self {
                code,
                message: message.into(),
            }
        }
    }

    #[async_trait]
    impl VersionProvider for FailingVersionProvider {
        async fn version(&self) -> Result<VersionMessage> {
            Err(ClientError::Rpc {
                code: self.code,
                message: self.message.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::{FailingVersionProvider, StaticVersionProvider};
    use super::*;

    fn sample_reply() -> VersionMessage {
        VersionMessage {
            version: "v1.4.2+a1b2c3d".to_string(),
            build_date: "2026-05-11T08:30:00Z".to_string(),
            git_commit: "a1b2c3d4e5f6".to_string(),
            git_tag: "v1.4.2".to_string(),
            git_tree_state: "clean".to_string(),
            toolchain_version: "rustc 1.78.0".to_string(),
            compiler: "rustc".to_string(),
            platform: "linux/amd64".to_string(),
            ..VersionMessage::default()
        }
    }

    #[tokio::test]
    async fn test_static_provider_returns_reply() {
        let provider: Box<dyn VersionProvider> =
            Box::new(StaticVersionProvider::new(sample_reply()));

        let reply = provider.version().await.unwrap();
        assert_eq!(reply.version, "v1.4.2+a1b2c3d");
        assert_eq!(reply.platform, "linux/amd64");
    }

    #[tokio::test]
    async fn test_failing_provider_surfaces_status() {
        let provider = FailingVersionProvider::new(tonic::Code::Unavailable, "backend down");

        let err = provider.version().await.unwrap_err();
        match err {
            ClientError::Rpc { code, message } => {
                assert_eq!(code, tonic::Code::Unavailable);
                assert_eq!(message, "backend down");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
