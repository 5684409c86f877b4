//! Peer connection handles and peer process environments.
//!
//! - [`TlsMaterial`] - TLS trust root for a peer, resolved by the caller
//! - [`PeerHandle`] - `grpc://` or `grpcs://` handle, convertible to a tonic endpoint
//! - [`build_peer_environment`] - `CORE_*` variables for launching a peer

pub mod env;
pub mod handle;
pub mod tls;

pub use env::{build_peer_environment, PeerEnvironment, PeerMsp, PeerTlsFiles};
pub use handle::{create_peer_handle, format_peer_name, PeerDescriptor, PeerError, PeerHandle};
pub use tls::TlsMaterial;
