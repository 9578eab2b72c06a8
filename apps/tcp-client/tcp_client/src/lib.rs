//! A minimal interactive TCP client speaking NUL-terminated tokens.
//!
//! The client resolves a host, opens one TCP stream and then alternates
//! between reading a token typed by the operator, sending it with a trailing
//! `\0` and waiting for exactly one reply. Typing [`SENTINEL`] sends the token
//! and closes the connection without waiting for a reply.
//!
//! The library is split into the pieces the binaries need:
//!
//! * `config`: command-line values and session limits.
//! * `codec`: operator token splitting and the NUL-terminated wire format.
//! * `client`: name resolution and connection establishment.
//! * `session`: the request/response loop and teardown.
//! * `server`: an echo server for the same wire format.
//!
//! To try it, start the echo server in one terminal:
//!
//! ```text
//! tcp-client-echo 127.0.0.1:9000
//! ```
//!
//! And connect to it from another:
//!
//! ```text
//! tcp-client-cli 127.0.0.1 9000
//! ```

#![warn(rust_2018_idioms)]

pub mod client;
pub use client::{connect, resolve};

pub mod codec;
pub use codec::{NulCodec, NulCodecError, Token, TokenCodec};

pub mod config;
pub use config::{ClientConfig, SessionConfig};

pub mod console;
pub use console::Console;

mod error;
pub use error::ClientError;

pub mod logging;

pub mod server;

pub mod session;
pub use session::SessionEnd;

/// Capacity of the outbound and inbound buffers, terminator included.
pub const BUFFER_SIZE: usize = 1024;

/// Token that ends the session once it has been sent.
pub const SENTINEL: &str = "BYE";

/// Address the echo server listens on when none is given.
pub const DEFAULT_ECHO_ADDR: &str = "127.0.0.1:9000";
