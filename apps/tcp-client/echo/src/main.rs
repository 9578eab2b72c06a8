//! An echo server for `tcp-client-cli`.
//!
//! Listens on the address given as the first argument (default
//! `127.0.0.1:9000`) and writes every NUL-terminated token it receives back
//! to the sender.
//!
//! Start it with:
//!
//!     tcp-client-echo 127.0.0.1:9000
//!
//! Then connect with `tcp-client-cli 127.0.0.1 9000`.

#![warn(rust_2018_idioms)]

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use tcp_client::{logging, server, DEFAULT_ECHO_ADDR};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ECHO_ADDR.to_string());

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %listener.local_addr()?, "listening");

    server::run(listener)
        .await
        .context("failed to accept connection")
}
