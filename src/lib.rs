//! # TinyKV - A Minimal In-Memory Key-Value Server
//!
//! TinyKV speaks a small subset of the Redis Serialization Protocol (RESP)
//! over TCP: `PING`, `ECHO`, `GET` and `SET` with optional `PX`/`EX` expiry.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                             TinyKV                               │
//! │                                                                  │
//! │  ┌────────────┐    ┌────────────┐    ┌────────────┐              │
//! │  │ TCP Server │───>│ Connection │───>│  Command   │              │
//! │  │ (Listener) │    │  Handler   │    │  Handler   │              │
//! │  └────────────┘    └─────┬──────┘    └─────┬──────┘              │
//! │                          │                 │                     │
//! │                          ▼                 ▼                     │
//! │                   ┌────────────┐    ┌─────────────────────────┐  │
//! │                   │   RESP     │    │          Store          │  │
//! │                   │  Decoder   │    │  Mutex<HashMap>, shared │  │
//! │                   └────────────┘    │  by every connection    │  │
//! │                                     └─────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use tinykv::Server;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let server = Server::bind("0.0.0.0:6379").await?;
//!     server.run().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`protocol`]: RESP decoder and reply types
//! - [`storage`]: the shared store with lazy per-key expiry
//! - [`commands`]: command dispatch
//! - [`connection`]: per-client read/execute/reply loop
//! - [`server`]: accept loop
//! - [`config`]: command-line flags
//!
//! ## Expiry
//!
//! Keys set with `PX`/`EX` carry an absolute deadline and are removed the
//! first time they are read after it passes. Nothing sweeps them in the
//! background, so an expired key that is never read again keeps its memory.

pub mod commands;
pub mod config;
pub mod connection;
pub mod protocol;
pub mod server;
pub mod storage;

pub use commands::CommandHandler;
pub use connection::{handle_connection, ConnectionStats};
pub use protocol::{decode, RespValue};
pub use server::Server;
pub use storage::{ExpiryUnit, Store};

/// The default port (same as Redis)
pub const DEFAULT_PORT: u16 = 6379;

/// The default host: all interfaces
pub const DEFAULT_HOST: &str = "0.0.0.0";

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
