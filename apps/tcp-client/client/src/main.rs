//! An interactive client that relays operator tokens to a TCP server.
//!
//! Each whitespace-delimited token typed on stdin is sent with a trailing
//! NUL byte, then the client waits for one reply and prints it. Typing `BYE`
//! sends the token and disconnects without waiting for a reply.
//!
//! To start a server in another terminal:
//!
//!     tcp-client-echo 127.0.0.1:9000
//!
//! And connect to it:
//!
//!     tcp-client-cli 127.0.0.1 9000
//!
//! Exit status is 1 for usage errors (including an unresolvable host), 127
//! when the socket cannot be created or connected, and 0 otherwise.

#![warn(rust_2018_idioms)]

use std::process::ExitCode;

use clap::Parser;
use tokio::io;
use tokio_util::codec::FramedRead;
use tracing::{debug, info};

use tcp_client::{logging, session, ClientConfig, ClientError, Console, SessionConfig, TokenCodec};

/// Exactly two positional arguments. clap's `--help` and `--version` are
/// turned off so that any other shape of command line is a usage error.
#[derive(Parser, Debug)]
#[command(name = "tcp-client-cli", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Host name or address of the server
    host: String,

    /// Port number of the server
    port: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init_logging();

    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "tcp-client-cli".to_string());
    let mut console = Console::stderr();

    let result = match Cli::try_parse() {
        Ok(cli) => run(cli, &mut console).await,
        Err(e) => Err(ClientError::Usage(e.to_string())),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.is_usage() {
                debug!(error = %err, "usage error");
                console.plain(format_args!("Usage: {program} Host PortNumber"));
            } else {
                console.error(&err);
            }
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: Cli, console: &mut Console<std::io::Stderr>) -> Result<(), ClientError> {
    let config = ClientConfig::new(cli.host, &cli.port)?;
    let addr = tcp_client::resolve(&config.host, config.port).await?;
    let stream = tcp_client::connect(addr).await?;

    let session_config = SessionConfig::default();
    console.info(format_args!(
        "Congratulations! Connection established with server.\nType '{}' to disconnect.",
        session_config.sentinel_display()
    ));

    let input = FramedRead::new(
        io::stdin(),
        TokenCodec::new_with_max_length(session_config.max_token_length()),
    );
    let end = session::run(stream, input, console, &session_config).await;

    // The process exits with 0 however the session ended.
    if !end.is_clean() {
        info!(?end, %addr, "session ended with a transport error");
    }
    Ok(())
}
