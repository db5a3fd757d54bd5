//! Bluetooth HCI over the UART (H4) transport
//!
//! Each H4 frame starts with a packet indicator telling what follows (command, ACL data, SCO
//! data, event or ISO data). Captures with link type 201 carry a 4 octet big-endian direction
//! word in front of it.

use std::collections::HashMap;
use std::sync::RwLock;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::cursor::Cursor;
use crate::errors::Error;
use crate::types::{
    LayerCreatorFn, Named, ValueStrings, ENCAP_TYPE_BLUETOOTH_HCI_H4,
    ENCAP_TYPE_BLUETOOTH_HCI_H4_WITH_PHDR,
};
use crate::{Layer, Packet};

/// Declares parameter structures whose fields are read in order from a [`Cursor`].
///
/// `$c` names the cursor inside the read expressions.
macro_rules! hci_parameters {
    ($(
        $(#[$meta:meta])*
        $name:ident ($c:ident) {
            $($(#[$fmeta:meta])* $field:ident: $ty:ty = $read:expr),* $(,)?
        }
    )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, serde::Serialize)]
            pub struct $name {
                $($(#[$fmeta])* $field: $ty,)*
            }

            impl crate::cursor::Decode for $name {
                fn decode(
                    $c: &mut crate::cursor::Cursor<'_>,
                ) -> Result<Self, crate::errors::Error> {
                    Ok(Self { $($field: $read,)* })
                }
            }
        )*
    };
}

pub mod common;

pub mod hci_cmd;

pub mod vendor_android;

pub mod vendor_intel;

pub const HCI_H4_COMMAND: u8 = 0x01;
pub const HCI_H4_ACL_DATA: u8 = 0x02;
pub const HCI_H4_SCO_DATA: u8 = 0x03;
pub const HCI_H4_EVENT: u8 = 0x04;
pub const HCI_H4_ISO_DATA: u8 = 0x05;

static PACKET_TYPE_NAMES: ValueStrings<u8> = &[
    (HCI_H4_COMMAND, "HCI Command"),
    (HCI_H4_ACL_DATA, "ACL Data"),
    (HCI_H4_SCO_DATA, "SCO Data"),
    (HCI_H4_EVENT, "HCI Event"),
    (HCI_H4_ISO_DATA, "ISO Data"),
];

static DIRECTION_NAMES: ValueStrings<u32> = &[(0, "Sent"), (1, "Received")];

lazy_static! {
    static ref PACKET_TYPES_MAP: RwLock<HashMap<u8, LayerCreatorFn>> =
        RwLock::new(HashMap::new());
}

// Register our Encap Types with the Packet.
pub(crate) fn register_defaults() -> Result<(), Error> {
    lazy_static::initialize(&PACKET_TYPES_MAP);

    Packet::register_encap_type(ENCAP_TYPE_BLUETOOTH_HCI_H4, HciH4::creator)?;
    Packet::register_encap_type(ENCAP_TYPE_BLUETOOTH_HCI_H4_WITH_PHDR, HciH4::creator_with_phdr)
}

/// Register a dissector for an H4 packet indicator.
///
/// [`hci_cmd`] registers itself for [`HCI_H4_COMMAND`].
pub fn register_packet_type(packet_type: u8, creator: LayerCreatorFn) -> Result<(), Error> {
    lazy_static::initialize(&PACKET_TYPES_MAP);

    let mut map = PACKET_TYPES_MAP
        .write()
        .map_err(|_| Error::RegisterError("h4 packet type map lock poisoned".to_string()))?;
    if map.contains_key(&packet_type) {
        return Err(Error::RegisterError(format!(
            "h4 packet type: 0x{:02x}",
            packet_type
        )));
    }
    map.insert(packet_type, creator);

    Ok(())
}

#[derive(Debug, Default, Serialize)]
pub struct HciH4 {
    #[serde(skip)]
    has_phdr: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    direction: Option<Named<u32>>,
    packet_type: Named<u8>,
}

impl HciH4 {
    pub(crate) fn creator() -> Box<dyn Layer + Send> {
        Box::<HciH4>::default()
    }

    pub(crate) fn creator_with_phdr() -> Box<dyn Layer + Send> {
        Box::new(HciH4 {
            has_phdr: true,
            ..Default::default()
        })
    }
}

impl Layer for HciH4 {
    fn decode_bytes(
        &mut self,
        bytes: &[u8],
    ) -> Result<(Option<Box<dyn Layer + Send>>, usize), Error> {
        let mut cursor = Cursor::new(bytes);

        if self.has_phdr {
            self.direction = Some(Named::lookup(cursor.read_u32_be()?, DIRECTION_NAMES));
        }
        self.packet_type = Named::lookup(cursor.read_u8()?, PACKET_TYPE_NAMES);

        let map = PACKET_TYPES_MAP
            .read()
            .map_err(|_| Error::ParseError("h4 packet type map lock poisoned".to_string()))?;
        let next = map.get(&self.packet_type.value()).map(|creator| creator());

        Ok((next, cursor.offset()))
    }

    fn name(&self) -> &'static str {
        "Bluetooth HCI H4"
    }

    fn short_name(&self) -> &'static str {
        "hci_h4"
    }
}

#[cfg(test)]
mod tests {
    use crate::packet::Packet;
    use crate::types::{ENCAP_TYPE_BLUETOOTH_HCI_H4, ENCAP_TYPE_BLUETOOTH_HCI_H4_WITH_PHDR};

    #[test]
    fn direction_pseudo_header() {
        let _ = crate::register_defaults();

        let bytes = hex::decode("0000000001030c00").unwrap();
        let p = Packet::from_bytes(&bytes, ENCAP_TYPE_BLUETOOTH_HCI_H4_WITH_PHDR).unwrap();
        assert_eq!(p.layers().len(), 2);

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["hci_h4"]["direction"], "Sent (0x00000000)");
        assert_eq!(json["hci_h4"]["packet_type"], "HCI Command (0x01)");
    }

    #[test]
    fn plain_h4_has_no_direction() {
        let _ = crate::register_defaults();

        let p = Packet::from_bytes(&[0x01, 0x03, 0x0c, 0x00], ENCAP_TYPE_BLUETOOTH_HCI_H4).unwrap();
        let json = serde_json::to_value(&p).unwrap();
        assert!(json["hci_h4"].get("direction").is_none());
    }

    #[test]
    fn events_are_left_unprocessed() {
        let _ = crate::register_defaults();

        // Command Complete for Reset
        let bytes = hex::decode("040e0401030c00").unwrap();
        let p = Packet::from_bytes(&bytes, ENCAP_TYPE_BLUETOOTH_HCI_H4).unwrap();
        assert_eq!(p.layers().len(), 1);
        assert_eq!(p.unprocessed(), &bytes[1..]);
    }

    #[test]
    fn truncated_pseudo_header() {
        let _ = crate::register_defaults();

        let p = Packet::from_bytes(&[0x00, 0x00, 0x01], ENCAP_TYPE_BLUETOOTH_HCI_H4_WITH_PHDR);
        assert!(p.is_err());
    }
}
