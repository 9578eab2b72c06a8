use std::io;

use bytes::{Buf, Bytes, BytesMut};
use tokio_util::codec::Decoder;

/// One unit of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A token that fits in the outbound buffer.
    Word(Bytes),
    /// A token longer than the limit. Its bytes were dropped.
    Oversized,
}

/// Splits operator input into whitespace-delimited tokens.
///
/// ASCII whitespace and NUL both end a token, and runs of delimiters are
/// skipped. A token longer than `max_length` is discarded up to its
/// delimiter and reported once as [`Token::Oversized`], so a single long
/// token never ends the stream.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    max_length: usize,
    // Set while dropping the rest of an oversized token.
    discarding: bool,
}

fn is_delimiter(byte: &u8) -> bool {
    *byte == 0 || byte.is_ascii_whitespace()
}

impl TokenCodec {
    pub fn new_with_max_length(max_length: usize) -> TokenCodec {
        TokenCodec {
            max_length,
            discarding: false,
        }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

impl Decoder for TokenCodec {
    type Item = Token;
    type Error = io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Token>, io::Error> {
        loop {
            if self.discarding {
                return match buf.iter().position(is_delimiter) {
                    Some(end) => {
                        buf.advance(end + 1);
                        self.discarding = false;
                        Ok(Some(Token::Oversized))
                    }
                    None => {
                        buf.clear();
                        Ok(None)
                    }
                };
            }

            match buf.iter().position(|b| !is_delimiter(b)) {
                Some(start) => buf.advance(start),
                None => {
                    buf.clear();
                    return Ok(None);
                }
            }

            match buf.iter().position(is_delimiter) {
                Some(end) if end <= self.max_length => {
                    let word = buf.split_to(end).freeze();
                    buf.advance(1);
                    return Ok(Some(Token::Word(word)));
                }
                Some(_) => self.discarding = true,
                None if buf.len() > self.max_length => {
                    buf.clear();
                    self.discarding = true;
                    return Ok(None);
                }
                None => return Ok(None),
            }
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Token>, io::Error> {
        if let Some(token) = self.decode(buf)? {
            return Ok(Some(token));
        }

        if self.discarding {
            self.discarding = false;
            buf.clear();
            return Ok(Some(Token::Oversized));
        }

        if buf.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Token::Word(buf.split().freeze())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Option<Token> {
        Some(Token::Word(Bytes::copy_from_slice(s.as_bytes())))
    }

    #[test]
    fn splits_on_whitespace() {
        let mut codec = TokenCodec::new_with_max_length(16);
        let mut buf = BytesMut::from("  hello \t world\nBYE\n");

        assert_eq!(codec.decode(&mut buf).unwrap(), word("hello"));
        assert_eq!(codec.decode(&mut buf).unwrap(), word("world"));
        assert_eq!(codec.decode(&mut buf).unwrap(), word("BYE"));
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert!(buf.is_empty());
    }

    #[test]
    fn waits_for_a_delimiter() {
        let mut codec = TokenCodec::new_with_max_length(16);
        let mut buf = BytesMut::from("hel");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        buf.extend_from_slice(b"lo\n");
        assert_eq!(codec.decode(&mut buf).unwrap(), word("hello"));
    }

    #[test]
    fn nul_ends_a_token() {
        let mut codec = TokenCodec::new_with_max_length(16);
        let mut buf = BytesMut::from(&b"a\0b\n"[..]);

        assert_eq!(codec.decode(&mut buf).unwrap(), word("a"));
        assert_eq!(codec.decode(&mut buf).unwrap(), word("b"));
    }

    #[test]
    fn token_at_the_limit_is_kept() {
        let mut codec = TokenCodec::new_with_max_length(4);
        let mut buf = BytesMut::from("abcd ");

        assert_eq!(codec.decode(&mut buf).unwrap(), word("abcd"));
    }

    #[test]
    fn oversized_token_is_discarded() {
        let mut codec = TokenCodec::new_with_max_length(4);
        let mut buf = BytesMut::from("abcdef next\n");

        assert_eq!(codec.decode(&mut buf).unwrap(), Some(Token::Oversized));
        assert_eq!(codec.decode(&mut buf).unwrap(), word("next"));
    }

    #[test]
    fn oversized_token_across_reads() {
        let mut codec = TokenCodec::new_with_max_length(4);
        let mut buf = BytesMut::from("abcdefgh");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert!(buf.is_empty());

        buf.extend_from_slice(b"ijk ok\n");
        assert_eq!(codec.decode(&mut buf).unwrap(), Some(Token::Oversized));
        assert_eq!(codec.decode(&mut buf).unwrap(), word("ok"));
    }

    #[test]
    fn last_token_is_yielded_at_eof() {
        let mut codec = TokenCodec::new_with_max_length(16);
        let mut buf = BytesMut::from("one two");

        assert_eq!(codec.decode_eof(&mut buf).unwrap(), word("one"));
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), word("two"));
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
    }

    #[test]
    fn oversized_token_at_eof() {
        let mut codec = TokenCodec::new_with_max_length(2);
        let mut buf = BytesMut::from("abcdef");

        assert_eq!(codec.decode_eof(&mut buf).unwrap(), Some(Token::Oversized));
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
    }

    #[test]
    fn only_whitespace_yields_nothing() {
        let mut codec = TokenCodec::new_with_max_length(16);
        let mut buf = BytesMut::from(" \n\t ");

        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
        assert!(buf.is_empty());
    }
}
