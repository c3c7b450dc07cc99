//! opsprobe client library
//!
//! Dials the control plane's gRPC version service and renders the reply.
//! One channel, one unary call, no retries: failures are surfaced to the
//! caller as [`ClientError`] values.
//!
//! # Example
//!
//! ```no_run
//! use opsprobe_client::{ConnectOptions, GrpcVersionClient, VersionProvider};
//!
//! # async fn example() -> opsprobe_client::Result<()> {
//! let options = ConnectOptions {
//!     server: "localhost:443".to_string(),
//!     ..ConnectOptions::default()
//! };
//!
//! let client = GrpcVersionClient::connect(&options).await?;
//! let reply = client.version().await?;
//! println!("{}", opsprobe_client::report::render(&reply, false));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod options;
pub mod report;
pub mod transport;
pub mod version;

pub use error::{ClientError, Result};
pub use options::ConnectOptions;
pub use version::{GrpcVersionClient, VersionProvider};
