// btree-persist/src/codec/bytes.rs

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

use super::ItemCodec;
use crate::error::CodecError;

/// Length-prefixed codec for byte strings and UTF-8 strings.
///
/// Layout: `u32` big-endian payload length, then the payload. Decoding reads
/// the payload into the scratch buffer and copies the item out of it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesCodec;

/// Writes a `u32` length prefix followed by `payload`.
pub(crate) fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<(), CodecError> {
    let len = u32::try_from(payload.len()).map_err(|_| CodecError::LengthOverflow { len: payload.len() })?;
    writer.write_u32::<BigEndian>(len)?;
    writer.write_all(payload)?;
    Ok(())
}

/// Reads one length-prefixed frame into `scratch`, replacing its contents.
///
/// The buffer only grows as bytes actually arrive, so a bogus length on a
/// short stream cannot force a huge allocation.
pub(crate) fn read_frame<R: Read>(reader: &mut R, mut scratch: Vec<u8>) -> Result<Vec<u8>, CodecError> {
    let len = reader.read_u32::<BigEndian>()?;
    scratch.clear();
    let read = (&mut *reader).take(u64::from(len)).read_to_end(&mut scratch)?;
    if read as u64 != u64::from(len) {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("frame declares {len} bytes, stream ended after {read}"),
        )
        .into());
    }
    Ok(scratch)
}

impl ItemCodec<Vec<u8>> for BytesCodec {
    type Error = CodecError;

    fn encode_item<W: Write>(&self, writer: &mut W, item: &Vec<u8>) -> Result<(), CodecError> {
        write_frame(writer, item)
    }

    fn decode_item<R: Read>(&self, reader: &mut R, scratch: Vec<u8>) -> Result<(Vec<u8>, Vec<u8>), CodecError> {
        let scratch = read_frame(reader, scratch)?;
        Ok((scratch.clone(), scratch))
    }
}

impl ItemCodec<String> for BytesCodec {
    type Error = CodecError;

    fn encode_item<W: Write>(&self, writer: &mut W, item: &String) -> Result<(), CodecError> {
        write_frame(writer, item.as_bytes())
    }

    fn decode_item<R: Read>(&self, reader: &mut R, scratch: Vec<u8>) -> Result<(String, Vec<u8>), CodecError> {
        let scratch = read_frame(reader, scratch)?;
        let item = std::str::from_utf8(&scratch)?.to_owned();
        Ok((item, scratch))
    }
}
