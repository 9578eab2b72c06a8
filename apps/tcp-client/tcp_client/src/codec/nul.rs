use std::io;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder};

/// A codec for tokens terminated by a single `\0` byte.
///
/// This is the whole wire format: no length prefix and no negotiation.
/// `max_length` bounds the payload, so a frame takes at most
/// `max_length + 1` bytes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NulCodec {
    max_length: usize,
}

/// An error from [`NulCodec`].
#[derive(Debug, Error)]
pub enum NulCodecError {
    #[error("frame exceeds {max_length} bytes")]
    FrameTooLong { max_length: usize },

    #[error("frame payload contains a NUL byte")]
    EmbeddedNul,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl NulCodec {
    pub fn new_with_max_length(max_length: usize) -> NulCodec {
        NulCodec { max_length }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    fn check(&self, payload: &[u8]) -> Result<(), NulCodecError> {
        if payload.len() > self.max_length {
            return Err(NulCodecError::FrameTooLong {
                max_length: self.max_length,
            });
        }
        if payload.contains(&0) {
            return Err(NulCodecError::EmbeddedNul);
        }
        Ok(())
    }
}

impl Decoder for NulCodec {
    type Item = Bytes;
    type Error = NulCodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>, NulCodecError> {
        match src.iter().position(|b| *b == 0) {
            Some(end) if end <= self.max_length => {
                let frame = src.split_to(end).freeze();
                src.advance(1);
                Ok(Some(frame))
            }
            None if src.len() <= self.max_length => Ok(None),
            _ => Err(NulCodecError::FrameTooLong {
                max_length: self.max_length,
            }),
        }
    }
}

impl Encoder<Bytes> for NulCodec {
    type Error = NulCodecError;

    fn encode(&mut self, item: Bytes, dst: &mut BytesMut) -> Result<(), NulCodecError> {
        Encoder::<&[u8]>::encode(self, &item[..], dst)
    }
}

impl Encoder<&[u8]> for NulCodec {
    type Error = NulCodecError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), NulCodecError> {
        self.check(item)?;
        dst.reserve(item.len() + 1);
        dst.put_slice(item);
        dst.put_u8(0);
        Ok(())
    }
}
