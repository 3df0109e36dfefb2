//! Server configuration from command-line flags.
//!
//! ```text
//! -h, --host <HOST>    Host to bind to (default: 0.0.0.0)
//! -p, --port <PORT>    Port to listen on (default: 6379)
//! -v, --version        Print version information
//!     --help           Print this help message
//! ```

use crate::{DEFAULT_HOST, DEFAULT_PORT};
use thiserror::Error;

/// Where the server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Returns the bind address as a string
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Serve(Config),
    PrintHelp,
    PrintVersion,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("invalid port number: {0}")]
    InvalidPort(String),

    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

/// Parses flags, excluding the program name.
pub fn parse_args<I>(args: I) -> Result<Action, ConfigError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut config = Config::default();
    let mut args = args.into_iter().map(Into::<String>::into);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--host" | "-h" => {
                config.host = args
                    .next()
                    .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
            }
            "--port" | "-p" => {
                let value = args
                    .next()
                    .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                config.port = value
                    .parse()
                    .map_err(|_| ConfigError::InvalidPort(value.clone()))?;
            }
            "--help" => return Ok(Action::PrintHelp),
            "--version" | "-v" => return Ok(Action::PrintVersion),
            _ => return Err(ConfigError::UnknownArgument(arg.clone())),
        }
    }

    Ok(Action::Serve(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let action = parse_args(Vec::<String>::new()).unwrap();
        assert_eq!(action, Action::Serve(Config::default()));
        assert_eq!(Config::default().bind_address(), "0.0.0.0:6379");
    }

    #[test]
    fn test_host_and_port() {
        let action = parse_args(["--host", "127.0.0.1", "-p", "6380"]).unwrap();
        assert_eq!(
            action,
            Action::Serve(Config {
                host: "127.0.0.1".to_string(),
                port: 6380,
            })
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse_args(["--help"]), Ok(Action::PrintHelp));
        assert_eq!(parse_args(["-p", "1", "-v"]), Ok(Action::PrintVersion));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_args(["--port"]),
            Err(ConfigError::MissingValue("--port".to_string()))
        );
        assert_eq!(
            parse_args(["--port", "70000"]),
            Err(ConfigError::InvalidPort("70000".to_string()))
        );
        assert_eq!(
            parse_args(["--verbose"]),
            Err(ConfigError::UnknownArgument("--verbose".to_string()))
        );
    }
}
