//! Wire contract for the control-plane version service.
//!
//! The `version.VersionService/Version` contract pre-exists on the server
//! side; this crate only holds the client's generated copy of it, plus the
//! server stubs the integration tests run against.

/// Generated protobuf/tonic stubs for the `version` package.
pub mod version {
    include!(concat!(env!("OUT_DIR"), "/version.rs"));
}

pub use version::{VersionMessage, VersionQuery};
