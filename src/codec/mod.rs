// btree-persist/src/codec/mod.rs

//! Item codecs: how a single tree item is written to and read from a stream.
//!
//! The tree format frames nothing around an item, so every codec must be
//! self-delimiting: `decode_item` has to consume exactly the bytes
//! `encode_item` produced.

pub mod bincode_codec;
pub mod bytes;
pub mod primitive;

use std::io::{Read, Write};

pub use bincode_codec::BincodeCodec;
pub use bytes::BytesCodec;
pub use primitive::BigEndianCodec;

/// Encodes and decodes one item of type `T`.
///
/// `decode_item` receives a scratch buffer by value and hands it back, possibly
/// grown or replaced, so the next decode can reuse the allocation. The buffer's
/// contents carry no meaning between calls.
pub trait ItemCodec<T> {
    type Error: std::error::Error + Send + Sync + 'static;

    fn encode_item<W: Write>(&self, writer: &mut W, item: &T) -> Result<(), Self::Error>;

    fn decode_item<R: Read>(&self, reader: &mut R, scratch: Vec<u8>) -> Result<(T, Vec<u8>), Self::Error>;
}

/// Adapts a pair of closures into an [`ItemCodec`].
///
/// ```
/// use std::io::{self, Read, Write};
/// use btree_persist::codec::{FnCodec, ItemCodec};
///
/// let codec = FnCodec::new(
///     |w: &mut dyn Write, item: &u16| w.write_all(&item.to_be_bytes()),
///     |r: &mut dyn Read, buf: Vec<u8>| -> io::Result<(u16, Vec<u8>)> {
///         let mut raw = [0u8; 2];
///         r.read_exact(&mut raw)?;
///         Ok((u16::from_be_bytes(raw), buf))
///     },
/// );
/// let mut out = Vec::new();
/// codec.encode_item(&mut out, &0x0102).unwrap();
/// assert_eq!(out, [1, 2]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnCodec<E, D> {
    encode: E,
    decode: D,
}

impl<E, D> FnCodec<E, D> {
    pub fn new(encode: E, decode: D) -> Self {
        FnCodec { encode, decode }
    }
}

impl<T, Err, E, D> ItemCodec<T> for FnCodec<E, D>
where
    E: Fn(&mut dyn Write, &T) -> Result<(), Err>,
    D: Fn(&mut dyn Read, Vec<u8>) -> Result<(T, Vec<u8>), Err>,
    Err: std::error::Error + Send + Sync + 'static,
{
    type Error = Err;

    fn encode_item<W: Write>(&self, writer: &mut W, item: &T) -> Result<(), Err> {
        (self.encode)(writer as &mut dyn Write, item)
    }

    fn decode_item<R: Read>(&self, reader: &mut R, scratch: Vec<u8>) -> Result<(T, Vec<u8>), Err> {
        (self.decode)(reader as &mut dyn Read, scratch)
    }
}
