//! RESP Protocol Implementation
//!
//! The subset of the Redis Serialization Protocol this server speaks.
//!
//! ## Modules
//!
//! - `decoder`: turns request bytes into command tokens
//! - `types`: defines `RespValue` and reply serialization
//!
//! ## Example
//!
//! ```
//! use tinykv::protocol::{decode, RespValue};
//!
//! let tokens = decode(b"*2\r\n$3\r\nGET\r\n$4\r\nname\r\n");
//! assert_eq!(tokens, vec!["GET", "name"]);
//!
//! let reply = RespValue::bulk_string("jane");
//! assert_eq!(reply.serialize(), b"$4\r\njane\r\n");
//! ```

pub mod decoder;
pub mod types;

pub use decoder::{decode, is_partial_frame, next_frame};
pub use types::RespValue;
