//! Connection options
//!
//! Constructed once per invocation from command-line input and immutable
//! afterwards.

use std::time::Duration;

/// Default server address (host:port)
pub const DEFAULT_SERVER: &str = "localhost:443";

/// Default per-call timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum gRPC message size, both directions. Matches the limit the
/// control plane itself is configured with.
pub const MAX_MESSAGE_SIZE: usize = 200 * 1024 * 1024;

/// How the version service is dialed
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Server address (host:port)
    pub server: String,

    /// Bearer token attached to the call, if any
    pub token: Option<String>,

    /// Accept any server certificate (ignored when `plaintext` is set)
    pub insecure_skip_verify: bool,

    /// Dial without transport encryption
    pub plaintext: bool,

    /// Per-call deadline, measured from the moment the call is issued
    pub timeout: Duration,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            token: None,
            insecure_skip_verify: true,
            plaintext: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_flag_defaults() {
        let options = ConnectOptions::default();

        assert_eq!(options.server, "localhost:443");
        assert!(options.token.is_none());
        assert!(options.insecure_skip_verify);
        assert!(!options.plaintext);
        assert_eq!(options.timeout, Duration::from_secs(10));
    }
}
