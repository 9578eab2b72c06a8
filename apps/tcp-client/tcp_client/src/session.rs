//! The interactive request/response loop.
//!
//! One token goes out, then exactly one read comes back, and nothing is
//! pipelined. The loop ends when the sentinel has been sent, when operator
//! input runs out, or on the first send or receive error. On every one of
//! those paths the connection is closed exactly once by [`run`].

use std::io::{self, Write};

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::Encoder;
use tracing::{debug, info};

use crate::{Console, NulCodec, SessionConfig, Token};

/// Why the session loop stopped.
#[derive(Debug)]
pub enum SessionEnd {
    /// The sentinel was sent.
    Disconnected,
    /// Operator input reached end of file or could not be read.
    InputClosed,
    /// Writing a token to the server failed.
    SendFailed(io::Error),
    /// Reading a reply from the server failed.
    ReceiveFailed(io::Error),
}

impl SessionEnd {
    /// Whether the session ended without a transport error.
    pub fn is_clean(&self) -> bool {
        matches!(self, SessionEnd::Disconnected | SessionEnd::InputClosed)
    }
}

/// Drive the session over `stream` until it ends, then close the stream.
///
/// `input` yields operator tokens, normally a `FramedRead` of stdin with a
/// [`TokenCodec`](crate::TokenCodec). The transcript goes to `console`.
pub async fn run<S, I, W>(
    mut stream: S,
    mut input: I,
    console: &mut Console<W>,
    config: &SessionConfig,
) -> SessionEnd
where
    S: AsyncRead + AsyncWrite + Unpin,
    I: Stream<Item = io::Result<Token>> + Unpin,
    W: Write,
{
    let end = exchange(&mut stream, &mut input, console, config).await;
    close(stream).await;
    info!(?end, "session finished");
    end
}

async fn exchange<S, I, W>(
    stream: &mut S,
    input: &mut I,
    console: &mut Console<W>,
    config: &SessionConfig,
) -> SessionEnd
where
    S: AsyncRead + AsyncWrite + Unpin,
    I: Stream<Item = io::Result<Token>> + Unpin,
    W: Write,
{
    let mut codec = NulCodec::new_with_max_length(config.max_token_length());
    let mut outbound = BytesMut::with_capacity(config.buffer_size);
    let mut inbound = vec![0u8; config.buffer_size];

    loop {
        console.prompt();

        let token = match input.next().await {
            Some(Ok(Token::Word(word))) => word,
            Some(Ok(Token::Oversized)) => {
                console.warn(format_args!(
                    "Input exceeds {} bytes and was discarded.",
                    config.max_token_length()
                ));
                continue;
            }
            Some(Err(e)) => {
                console.error(format_args!("Failed to read from standard input: {e}"));
                return SessionEnd::InputClosed;
            }
            None => {
                debug!("operator input closed");
                return SessionEnd::InputClosed;
            }
        };

        outbound.clear();
        if let Err(e) = send(stream, &mut codec, &token, &mut outbound).await {
            console.error(format_args!(
                "An error occurred while sending message to the server: {e}\n\
                 The connection is going to close."
            ));
            return SessionEnd::SendFailed(e);
        }
        debug!(bytes = outbound.len(), "sent token");

        if token == config.sentinel {
            return SessionEnd::Disconnected;
        }

        match stream.read(&mut inbound).await {
            Ok(n) => {
                if n == 0 {
                    // The peer closed its side. Reported like any other
                    // reply; the next send or read decides what happens.
                    debug!("received zero bytes");
                }
                console.info(format_args!(
                    "Received a message from server: {}",
                    display_reply(&inbound[..n])
                ));
            }
            Err(e) => {
                console.error(format_args!(
                    "An error occurred while receiving message from the server: {e}\n\
                     The connection is going to close."
                ));
                return SessionEnd::ReceiveFailed(e);
            }
        }
    }
}

async fn send<S>(
    stream: &mut S,
    codec: &mut NulCodec,
    token: &Bytes,
    outbound: &mut BytesMut,
) -> io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    codec
        .encode(token.clone(), outbound)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    stream.write_all(&outbound[..]).await?;
    stream.flush().await
}

/// The reply as text, cut at its first NUL.
fn display_reply(reply: &[u8]) -> std::borrow::Cow<'_, str> {
    let end = reply.iter().position(|b| *b == 0).unwrap_or(reply.len());
    String::from_utf8_lossy(&reply[..end])
}

async fn close<S>(mut stream: S)
where
    S: AsyncWrite + Unpin,
{
    if let Err(e) = stream.shutdown().await {
        debug!(error = %e, "shutdown failed");
    }
}
