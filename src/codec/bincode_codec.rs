// btree-persist/src/codec/bincode_codec.rs

use byteorder::{BigEndian, WriteBytesExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{Read, Write};

use super::ItemCodec;
use super::bytes::read_frame;
use crate::error::CodecError;

/// Codec for any serde type: a `u32` big-endian length prefix followed by the
/// bincode encoding of the item.
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl<T> ItemCodec<T> for BincodeCodec
where
    T: Serialize + DeserializeOwned,
{
    type Error = CodecError;

    fn encode_item<W: Write>(&self, writer: &mut W, item: &T) -> Result<(), CodecError> {
        let size = bincode::serialized_size(item)?;
        let len = u32::try_from(size).map_err(|_| CodecError::LengthOverflow { len: size as usize })?;
        writer.write_u32::<BigEndian>(len)?;
        bincode::serialize_into(&mut *writer, item)?;
        Ok(())
    }

    fn decode_item<R: Read>(&self, reader: &mut R, scratch: Vec<u8>) -> Result<(T, Vec<u8>), CodecError> {
        let scratch = read_frame(reader, scratch)?;
        let item = bincode::deserialize(&scratch)?;
        Ok((item, scratch))
    }
}
