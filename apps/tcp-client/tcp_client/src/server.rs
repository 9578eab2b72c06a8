//! An echo server for the NUL-terminated wire format.
//!
//! Every frame received on a connection is written straight back with its
//! terminator. Each connection gets its own task; this is the only concurrent
//! code in the crate.

use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, warn};

use crate::{NulCodec, NulCodecError, BUFFER_SIZE};

/// Accept connections forever and echo each one on its own task.
///
/// Returns only if accepting fails.
pub async fn run(listener: TcpListener) -> std::io::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!(%peer, "accepted connection");

        tokio::spawn(async move {
            match echo(socket).await {
                Ok(frames) => info!(%peer, frames, "connection closed"),
                Err(e) => warn!(%peer, error = %e, "connection failed"),
            }
        });
    }
}

/// Echo frames on one connection until the peer closes it.
///
/// Returns the number of frames echoed.
pub async fn echo(mut socket: TcpStream) -> Result<u64, NulCodecError> {
    let codec = NulCodec::new_with_max_length(BUFFER_SIZE - 1);
    let (r, w) = socket.split();
    let mut frames = FramedRead::new(r, codec);
    let mut sink = FramedWrite::new(w, codec);

    let mut count = 0;
    while let Some(frame) = frames.next().await {
        let frame = frame?;
        debug!(bytes = frame.len(), "echoing frame");
        sink.send(frame).await?;
        count += 1;
    }

    Ok(count)
}
