//! `quake-loader` - host side of the earthquake feed client
//!
//! Executes the requests built by `quake-core` over real sockets, checks
//! connectivity first, and keeps at most one fetch in flight. Also carries
//! the configuration and logging setup shared with the `quake` binary.

#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod logging;
pub mod render;
pub mod transport;

pub use config::Config;
pub use connectivity::{AlwaysOnline, Connectivity, HostProbe, NetworkPath};
pub use error::{Error, Result};
pub use fetch::FeedPipeline;
pub use loader::FeedLoader;
pub use logging::{init_logging, Verbosity};
pub use transport::{Transport, UreqTransport};
