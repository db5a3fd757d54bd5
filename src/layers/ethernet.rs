//! Ethernet Layer
//!
//! Only there to carry HomePlug AV management messages; every other EtherType is left
//! unprocessed.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use serde::Serialize;

use crate::cursor::Cursor;
use crate::errors::Error;
use crate::types::{EtherType, LayerCreatorFn, MACAddress, ENCAP_TYPE_ETH};
use crate::{Layer, Packet};

pub const ETH_HEADER_LENGTH: usize = 14_usize;

fn get_ethertypes_map() -> &'static RwLock<HashMap<EtherType, LayerCreatorFn>> {
    static ETHERTYPES_MAP: OnceLock<RwLock<HashMap<EtherType, LayerCreatorFn>>> = OnceLock::new();
    ETHERTYPES_MAP.get_or_init(|| RwLock::new(HashMap::new()))
}

// Register our Encap Types with the Packet.
pub(crate) fn register_defaults() -> Result<(), Error> {
    get_ethertypes_map();

    Packet::register_encap_type(ENCAP_TYPE_ETH, Ethernet::creator)
}

/// Register for a given EtherType
///
/// A Layer that would handle subsequent decoding for a given Ethertype, should register itself
/// by calling this function. For example [`crate::layers::homeplug_av`] calls
/// `register_ethertype` with the [`EtherType`] value of 0x88E1.
pub fn register_ethertype(eth_type: EtherType, layer: LayerCreatorFn) -> Result<(), Error> {
    let mut map = get_ethertypes_map()
        .write()
        .map_err(|_| Error::RegisterError("ethertype map lock poisoned".to_string()))?;
    if map.contains_key(&eth_type) {
        return Err(Error::RegisterError(format!("ether_type: 0x{:04x}", eth_type)));
    }
    map.insert(eth_type, layer);

    Ok(())
}

/// Structure representing the Ethernet Header of a Packet.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Ethernet {
    dst_mac: MACAddress,
    src_mac: MACAddress,
    #[serde(serialize_with = "crate::types::hex::serialize_lower_hex_u16")]
    ethertype: EtherType,
}

impl Ethernet {
    pub(crate) fn creator() -> Box<dyn Layer + Send> {
        Box::<Ethernet>::default()
    }
}

impl Layer for Ethernet {
    fn decode_bytes(
        &mut self,
        bytes: &[u8],
    ) -> Result<(Option<Box<dyn Layer + Send>>, usize), Error> {
        let mut cursor = Cursor::new(bytes);
        self.dst_mac = cursor.read_mac()?;
        self.src_mac = cursor.read_mac()?;
        self.ethertype = cursor.read_u16_be()?;

        let map = get_ethertypes_map()
            .read()
            .map_err(|_| Error::ParseError("ethertype map lock poisoned".to_string()))?;
        let next = map.get(&self.ethertype).map(|creator| creator());

        Ok((next, ETH_HEADER_LENGTH))
    }

    fn name(&self) -> &'static str {
        "Ethernet"
    }

    fn short_name(&self) -> &'static str {
        "eth"
    }
}

#[cfg(test)]
mod tests {
    use crate::packet::Packet;
    use crate::types::ENCAP_TYPE_ETH;

    #[test]
    fn unknown_ethertype_stops() {
        let _ = crate::register_defaults();

        // IPv4 is not dissected here.
        let bytes = hex::decode("ffffffffffff0013d70102030800450000").unwrap();
        let p = Packet::from_bytes(&bytes, ENCAP_TYPE_ETH).unwrap();
        assert_eq!(p.layers().len(), 1);
        assert_eq!(p.unprocessed(), &bytes[14..]);

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["eth"]["ethertype"], "0x0800");
        assert_eq!(json["eth"]["dst_mac"], "ff:ff:ff:ff:ff:ff");
    }

    #[test]
    fn truncated_header_fails() {
        let _ = crate::register_defaults();

        let p = Packet::from_bytes(&[0xff; 10], ENCAP_TYPE_ETH);
        assert!(p.is_err());
    }
}
