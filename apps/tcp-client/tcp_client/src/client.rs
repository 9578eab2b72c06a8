//! Name resolution and connection setup.

use std::net::SocketAddr;

use tokio::net::{lookup_host, TcpSocket, TcpStream};
use tracing::debug;

use crate::ClientError;

/// Resolve `host` and return the first address, carrying `port`.
///
/// This runs before any socket exists, so a failure here never leaves a
/// resource behind.
pub async fn resolve(host: &str, port: u16) -> Result<SocketAddr, ClientError> {
    let mut addrs = lookup_host((host, port))
        .await
        .map_err(|source| ClientError::Resolve {
            host: host.to_string(),
            source,
        })?;

    let addr = addrs
        .next()
        .ok_or_else(|| ClientError::NoAddress(host.to_string()))?;

    debug!(%host, %addr, "resolved host");
    Ok(addr)
}

/// Open one stream connection to `addr`.
///
/// Socket creation and the connect call fail separately, so the caller can
/// tell the operator which step broke.
pub async fn connect(addr: SocketAddr) -> Result<TcpStream, ClientError> {
    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()
    } else {
        TcpSocket::new_v6()
    }
    .map_err(ClientError::Socket)?;

    let stream = socket
        .connect(addr)
        .await
        .map_err(|source| ClientError::Connect { addr, source })?;

    debug!(%addr, local = ?stream.local_addr().ok(), "connected");
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn resolves_ip_literal() {
        let addr = resolve("127.0.0.1", 9000).await.unwrap();
        assert_eq!(addr, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
    }

    #[tokio::test]
    async fn unresolvable_host_is_a_usage_error() {
        let err = resolve("no-such-host.invalid", 9000).await.unwrap_err();
        assert!(err.is_usage(), "{err:?}");
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn connects_to_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (stream, accepted) = tokio::join!(connect(addr), listener.accept());
        let stream = stream.unwrap();
        let (_, peer) = accepted.unwrap();

        assert_eq!(stream.peer_addr().unwrap(), addr);
        assert_eq!(stream.local_addr().unwrap(), peer);
    }

    #[tokio::test]
    async fn refused_connection_exits_with_127() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = connect(addr).await.unwrap_err();
        assert!(matches!(err, ClientError::Connect { addr: a, .. } if a == addr));
        assert_eq!(err.exit_code(), 127);
    }
}
