//! Command Handler Module
//!
//! This module implements the command processing layer.
//! It receives decoded command tokens, executes them against the store,
//! and returns the reply to write back.
//!
//! ## Architecture
//!
//! ```text
//! Client Request
//!       │
//!       ▼
//! ┌─────────────────┐
//! │  RESP Decoder   │  (protocol module)
//! └────────┬────────┘
//!          │ Vec<String>
//!          ▼
//! ┌─────────────────┐
//! │ CommandHandler  │  (this module)
//! └────────┬────────┘
//!          │ GET / SET
//!          ▼
//! ┌─────────────────┐
//! │     Store       │  (storage module)
//! └─────────────────┘
//! ```

pub mod handler;

pub use handler::{Command, CommandError, CommandHandler};
