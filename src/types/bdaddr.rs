//! Bluetooth Device Address
//!
//! HCI carries a BD_ADDR little-endian, so the bytes on the wire are the reverse of the way the
//! address is written. `BdAddr` keeps the wire bytes and reverses them for display.

use core::convert::TryFrom;
use core::fmt;

use serde::{Serialize, Serializer};

use crate::errors::Error as CrateError;

#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BdAddr([u8; 6]);

impl BdAddr {
    /// The address bytes as they appear on the wire (least significant octet first).
    pub const fn as_wire_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl From<[u8; 6]> for BdAddr {
    fn from(wire: [u8; 6]) -> Self {
        Self(wire)
    }
}

impl TryFrom<&'_ [u8]> for BdAddr {
    type Error = CrateError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        if slice.len() != 6 {
            return Err(CrateError::ParseError(format!(
                "BD_ADDR: {}",
                hex::encode(slice)
            )));
        }
        let mut addr = BdAddr::default();
        addr.0.copy_from_slice(slice);
        Ok(addr)
    }
}

impl fmt::Display for BdAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[5], self.0[4], self.0[3], self.0[2], self.0[1], self.0[0]
        )
    }
}

impl fmt::Debug for BdAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Serialize for BdAddr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(format!("{}", self).as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::TryInto;

    #[test]
    fn displayed_most_significant_first() {
        let addr: BdAddr = [0x66, 0x55, 0x44, 0x33, 0x22, 0x11][..].try_into().unwrap();
        assert_eq!(addr.to_string(), "11:22:33:44:55:66");
    }

    #[test]
    fn short_slice_fails() {
        let addr: Result<BdAddr, _> = [0x01, 0x02][..].try_into();
        assert!(addr.is_err());
    }
}
