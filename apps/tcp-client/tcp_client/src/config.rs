use bytes::Bytes;

use crate::{ClientError, BUFFER_SIZE, SENTINEL};

/// Where to connect, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
}

impl ClientConfig {
    /// Validate the raw `host` and `port` arguments.
    ///
    /// The port must be a base-10 integer in `1..=65535`. The host is not
    /// checked here; it is validated by resolving it.
    pub fn new(host: impl Into<String>, port: &str) -> Result<ClientConfig, ClientError> {
        let port = parse_port(port)?;
        Ok(ClientConfig {
            host: host.into(),
            port,
        })
    }
}

fn parse_port(raw: &str) -> Result<u16, ClientError> {
    match raw.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ClientError::InvalidPort(raw.to_string())),
    }
}

/// Limits of one interactive session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Capacity of each buffer, including the NUL terminator.
    pub buffer_size: usize,
    /// Token that ends the session once sent.
    pub sentinel: Bytes,
}

impl SessionConfig {
    /// Longest token that still fits in the buffer with its terminator.
    pub fn max_token_length(&self) -> usize {
        self.buffer_size.saturating_sub(1)
    }

    /// The sentinel as text, for operator messages.
    pub fn sentinel_display(&self) -> String {
        String::from_utf8_lossy(&self.sentinel).into_owned()
    }
}

impl Default for SessionConfig {
    fn default() -> SessionConfig {
        SessionConfig {
            buffer_size: BUFFER_SIZE,
            sentinel: Bytes::from_static(SENTINEL.as_bytes()),
        }
    }
}
