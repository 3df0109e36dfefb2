//! Connection Handler Module
//!
//! This module manages individual client connections.
//! Each client connection is handled by its own tokio task, and every task
//! shares the server's single store through its `CommandHandler`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     TCP Listener                            │
//! │                    (server.rs)                              │
//! └──────────────────────┬──────────────────────────────────────┘
//!                        │ accept() + spawn task
//!                        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 ConnectionHandler                           │
//! │                                                             │
//! │  ┌────────────┐   ┌────────────┐   ┌────────────┐           │
//! │  │ Read bytes │──>│ Split +    │──>│ Execute    │──> reply  │
//! │  └────────────┘   │ decode     │   └────────────┘           │
//! │                   └────────────┘                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod handler;

pub use handler::{handle_connection, ConnectionError, ConnectionHandler, ConnectionStats};
