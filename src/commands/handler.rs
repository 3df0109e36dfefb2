//! Command Handler Module
//!
//! Lifts decoded tokens into a [`Command`], runs it against the shared
//! [`Store`] and produces the reply.
//!
//! ## Supported Commands
//!
//! - `PING` - Replies `PONG`, arguments ignored
//! - `ECHO message` - Replies with `message` as a bulk string
//! - `GET key` - Value as a bulk string, or null if absent/expired
//! - `SET key value [PX milliseconds | EX seconds]` - Overwrite a key
//!
//! `SET` is forgiving about its TTL: an unknown option word, a non-numeric or
//! negative amount, or any argument count other than exactly two extras all
//! store the value without expiry and still reply `OK`.

use crate::protocol::RespValue;
use crate::storage::{ExpiryUnit, Store};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// A decoded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ping,
    Echo(String),
    Get(String),
    Set {
        key: String,
        value: String,
        expiry: Option<(ExpiryUnit, u64)>,
    },
    Unknown(String),
}

/// Requests that name a known command but cannot be run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("ERR empty command")]
    Empty,

    #[error("ERR wrong number of arguments for '{0}' command")]
    WrongArity(&'static str),
}

impl Command {
    pub fn name(&self) -> &str {
        match self {
            Command::Ping => "PING",
            Command::Echo(_) => "ECHO",
            Command::Get(_) => "GET",
            Command::Set { .. } => "SET",
            Command::Unknown(name) => name.as_str(),
        }
    }
}

impl TryFrom<Vec<String>> for Command {
    type Error = CommandError;

    fn try_from(tokens: Vec<String>) -> Result<Self, Self::Error> {
        let mut tokens = tokens.into_iter();
        let name = tokens.next().ok_or(CommandError::Empty)?;

        let command = match name.to_ascii_uppercase().as_str() {
            "PING" => Command::Ping,
            "ECHO" => Command::Echo(tokens.next().ok_or(CommandError::WrongArity("ECHO"))?),
            "GET" => Command::Get(tokens.next().ok_or(CommandError::WrongArity("GET"))?),
            "SET" => {
                let (key, value) = match (tokens.next(), tokens.next()) {
                    (Some(key), Some(value)) => (key, value),
                    _ => return Err(CommandError::WrongArity("SET")),
                };

                let options: Vec<String> = tokens.collect();
                let expiry = match options.as_slice() {
                    [option, amount] => {
                        ExpiryUnit::from_option(option).zip(amount.parse::<u64>().ok())
                    }
                    _ => None,
                };

                Command::Set { key, value, expiry }
            }
            _ => Command::Unknown(name),
        };

        Ok(command)
    }
}

/// Executes commands against the store all connections share.
#[derive(Debug, Clone)]
pub struct CommandHandler {
    store: Arc<Store>,
}

impl CommandHandler {
    /// Creates a new command handler over the given store.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Executes a decoded command and returns the reply.
    ///
    /// An empty token list means the input was not a command frame: nothing
    /// is executed and `None` is returned, so the caller writes nothing.
    pub fn execute(&self, tokens: Vec<String>) -> Option<RespValue> {
        if tokens.is_empty() {
            return None;
        }

        let reply = match Command::try_from(tokens) {
            Ok(command) => {
                debug!(command = command.name(), "Executing command");
                self.dispatch(command)
            }
            Err(e) => RespValue::error(e.to_string()),
        };

        Some(reply)
    }

    fn dispatch(&self, command: Command) -> RespValue {
        match command {
            Command::Ping => RespValue::pong(),
            Command::Echo(message) => RespValue::bulk_string(message),
            Command::Get(key) => match self.store.get(&key) {
                Some(value) => RespValue::bulk_string(value),
                None => RespValue::null(),
            },
            Command::Set { key, value, expiry } => {
                match expiry {
                    Some((unit, amount)) => {
                        debug!(unit = unit.as_str(), amount, "SET with expiry");
                        self.store.set_with_expiry(key, value, unit, amount)
                    }
                    None => self.store.set(key, value),
                }
                RespValue::ok()
            }
            Command::Unknown(_) => RespValue::error("ERR unknown command"),
        }
    }
}
