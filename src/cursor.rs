//! Bounded reader over a dissector's bytes
//!
//! Every dissector in this crate is "read a few octets, label them, advance". `Cursor` keeps the
//! offset and turns every out of bounds read into [`Error::TooShort`] instead of a panic.
//! Multi-octet integers are little-endian unless the method says otherwise; that is the byte
//! order of both HCI and HomePlug AV MMEs.

use core::convert::TryInto;

use crate::errors::Error;
use crate::types::{BdAddr, MACAddress};

/// A structure that knows how to read itself from a [`Cursor`].
pub(crate) trait Decode: Sized {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error>;
}

#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Number of bytes read so far.
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the next `len` bytes and advances past them.
    pub(crate) fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error> {
        if self.remaining() < len {
            return Err(Error::TooShort {
                required: len,
                available: self.remaining(),
                data: hex::encode(&self.bytes[self.offset..]),
            });
        }
        let out = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(out)
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let bytes = self.read_bytes(N)?;
        // length checked by `read_bytes`
        Ok(bytes.try_into().unwrap_or([0; N]))
    }

    /// Everything that has not been read yet. The cursor ends up empty.
    pub(crate) fn rest(&mut self) -> &'a [u8] {
        let out = &self.bytes[self.offset..];
        self.offset = self.bytes.len();
        out
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, Error> {
        Ok(self.read_array::<1>()?[0])
    }

    pub(crate) fn read_i8(&mut self) -> Result<i8, Error> {
        Ok(self.read_u8()? as i8)
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16, Error> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// A three octet little-endian value, such as a LAP or a class of device.
    pub(crate) fn read_u24(&mut self) -> Result<u32, Error> {
        let b: [u8; 3] = self.read_array()?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], 0]))
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32, Error> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub(crate) fn read_u64(&mut self) -> Result<u64, Error> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub(crate) fn read_u16_be(&mut self) -> Result<u16, Error> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub(crate) fn read_u32_be(&mut self) -> Result<u32, Error> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub(crate) fn read_bd_addr(&mut self) -> Result<BdAddr, Error> {
        Ok(BdAddr::from(self.read_array::<6>()?))
    }

    pub(crate) fn read_mac(&mut self) -> Result<MACAddress, Error> {
        Ok(MACAddress::from(self.read_array::<6>()?))
    }

    /// Reads `len` bytes and hands them to a new cursor, so that a length-prefixed structure
    /// cannot read past its own end.
    pub(crate) fn sub_cursor(&mut self, len: usize) -> Result<Cursor<'a>, Error> {
        Ok(Cursor::new(self.read_bytes(len)?))
    }

    pub(crate) fn read<T: Decode>(&mut self) -> Result<T, Error> {
        T::decode(self)
    }

    /// Reads `count` consecutive `T`s.
    pub(crate) fn read_list<T: Decode>(&mut self, count: usize) -> Result<Vec<T>, Error> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(T::decode(self)?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_and_advances() {
        let bytes = [0x03, 0x0c, 0x33, 0x8b, 0x9e, 0xaa];
        let mut c = Cursor::new(&bytes);
        assert_eq!(c.read_u16().unwrap(), 0x0c03);
        assert_eq!(c.read_u24().unwrap(), 0x9e8b33);
        assert_eq!(c.offset(), 5);
        assert_eq!(c.rest(), &[0xaa]);
        assert!(c.is_empty());
    }

    #[test]
    fn short_read_reports_what_is_left() {
        let bytes = [0x01, 0x02, 0x03];
        let mut c = Cursor::new(&bytes);
        let _ = c.read_u8().unwrap();
        let err = c.read_u32().unwrap_err();
        assert_eq!(
            err,
            Error::TooShort {
                required: 4,
                available: 2,
                data: "0203".to_string()
            }
        );
        // a failed read does not advance
        assert_eq!(c.remaining(), 2);
    }

    #[test]
    fn sub_cursor_is_bounded() {
        let bytes = [0x02, 0xaa, 0xbb, 0xcc];
        let mut c = Cursor::new(&bytes);
        let len = c.read_u8().unwrap() as usize;
        let mut sub = c.sub_cursor(len).unwrap();
        assert_eq!(sub.read_u16_be().unwrap(), 0xaabb);
        assert!(sub.read_u8().is_err());
        assert_eq!(c.read_u8().unwrap(), 0xcc);
    }
}
