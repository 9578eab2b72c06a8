//! Codecs for both ends of the client.
//!
//! [`TokenCodec`] splits operator input into whitespace-delimited tokens and
//! [`NulCodec`] frames tokens on the wire with a trailing `\0`.

mod nul;
pub use nul::{NulCodec, NulCodecError};

mod token;
pub use token::{Token, TokenCodec};
