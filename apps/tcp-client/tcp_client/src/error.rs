use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors that stop the client before the session loop starts.
///
/// Errors raised inside the loop never surface here; they end the loop and
/// are reported through [`SessionEnd`](crate::SessionEnd).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The command line did not have the expected shape.
    #[error("{0}")]
    Usage(String),

    /// The port argument is not an integer in `1..=65535`.
    #[error("invalid port number '{0}'")]
    InvalidPort(String),

    /// Name resolution failed outright.
    #[error("failed to resolve host '{host}': {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },

    /// Name resolution succeeded but produced no address.
    #[error("host '{0}' did not resolve to any address")]
    NoAddress(String),

    /// The stream socket could not be created.
    #[error("Failed to create socket: {0}")]
    Socket(#[source] io::Error),

    /// The connect call failed.
    #[error("Failed to connect to server: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}

impl ClientError {
    /// Whether the operator should see the usage line for this error.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            ClientError::Usage(_)
                | ClientError::InvalidPort(_)
                | ClientError::Resolve { .. }
                | ClientError::NoAddress(_)
        )
    }

    /// Process exit status: 1 for usage errors, 127 for transport setup.
    pub fn exit_code(&self) -> u8 {
        if self.is_usage() {
            1
        } else {
            127
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_exit_with_one() {
        let errors = [
            ClientError::Usage("expected two arguments".into()),
            ClientError::InvalidPort("abc".into()),
            ClientError::NoAddress("nowhere".into()),
            ClientError::Resolve {
                host: "nowhere".into(),
                source: io::Error::new(io::ErrorKind::Other, "lookup failed"),
            },
        ];

        for err in errors {
            assert!(err.is_usage(), "{err:?}");
            assert_eq!(err.exit_code(), 1);
        }
    }

    #[test]
    fn transport_errors_exit_with_127() {
        let socket = ClientError::Socket(io::Error::from(io::ErrorKind::PermissionDenied));
        let connect = ClientError::Connect {
            addr: "127.0.0.1:9".parse().unwrap(),
            source: io::Error::from(io::ErrorKind::ConnectionRefused),
        };

        assert_eq!(socket.exit_code(), 127);
        assert_eq!(connect.exit_code(), 127);
        assert!(connect.to_string().starts_with("Failed to connect to server: "));
    }
}
