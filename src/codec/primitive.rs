// btree-persist/src/codec/primitive.rs

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

use super::ItemCodec;

/// Fixed-width big-endian codec for the primitive integer types.
///
/// Never touches the scratch buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigEndianCodec;

macro_rules! impl_big_endian {
    ($ty:ty, $write:ident, $read:ident) => {
        impl ItemCodec<$ty> for BigEndianCodec {
            type Error = std::io::Error;

            fn encode_item<W: Write>(&self, writer: &mut W, item: &$ty) -> std::io::Result<()> {
                writer.$write::<BigEndian>(*item)
            }

            fn decode_item<R: Read>(&self, reader: &mut R, scratch: Vec<u8>) -> std::io::Result<($ty, Vec<u8>)> {
                Ok((reader.$read::<BigEndian>()?, scratch))
            }
        }
    };
    ($ty:ty, $write:ident, $read:ident, single_byte) => {
        impl ItemCodec<$ty> for BigEndianCodec {
            type Error = std::io::Error;

            fn encode_item<W: Write>(&self, writer: &mut W, item: &$ty) -> std::io::Result<()> {
                writer.$write(*item)
            }

            fn decode_item<R: Read>(&self, reader: &mut R, scratch: Vec<u8>) -> std::io::Result<($ty, Vec<u8>)> {
                Ok((reader.$read()?, scratch))
            }
        }
    };
}

impl_big_endian!(u8, write_u8, read_u8, single_byte);
impl_big_endian!(i8, write_i8, read_i8, single_byte);
impl_big_endian!(u16, write_u16, read_u16);
impl_big_endian!(i16, write_i16, read_i16);
impl_big_endian!(u32, write_u32, read_u32);
impl_big_endian!(i32, write_i32, read_i32);
impl_big_endian!(u64, write_u64, read_u64);
impl_big_endian!(i64, write_i64, read_i64);

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn u32_is_written_big_endian() {
        let mut out = Vec::new();
        BigEndianCodec.encode_item(&mut out, &0x0A0B_0C0Du32).unwrap();
        assert_eq!(out, [0x0A, 0x0B, 0x0C, 0x0D]);
    }

    #[test]
    fn negative_i64_reads_back() {
        let mut out = Vec::new();
        BigEndianCodec.encode_item(&mut out, &-5i64).unwrap();
        let (item, _): (i64, _) = BigEndianCodec.decode_item(&mut Cursor::new(out), Vec::new()).unwrap();
        assert_eq!(item, -5);
    }

    #[test]
    fn short_input_is_an_error() {
        let res: std::io::Result<(u64, Vec<u8>)> = BigEndianCodec.decode_item(&mut Cursor::new(vec![1, 2, 3]), Vec::new());
        assert!(res.is_err());
    }
}
