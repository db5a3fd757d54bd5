//! Packet Structure

use core::fmt::Debug;

use std::collections::HashMap;
use std::sync::RwLock;

use lazy_static::lazy_static;
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::errors::Error;
use crate::types::{EncapType, LayerCreatorFn};
use crate::Layer;

lazy_static! {
    static ref ENCAP_TYPES_MAP: RwLock<HashMap<EncapType, LayerCreatorFn>> =
        RwLock::new(HashMap::new());
}

// Make sure the encapsulation map exists before any layer registers with it.
pub(crate) fn register_defaults() -> Result<(), Error> {
    lazy_static::initialize(&ENCAP_TYPES_MAP);

    Ok(())
}

/// A dissected packet: the layers that could be decoded, outermost first, followed by whatever
/// no dissector claimed.
#[derive(Debug, Default)]
pub struct Packet {
    layers: Vec<Box<dyn Layer + Send>>,
    unprocessed: Vec<u8>,
}

impl Packet {
    /// Register a new encapsulation (libpcap link type).
    ///
    /// The creator function returns the dissector for the outermost layer of packets captured
    /// with that link type.
    pub fn register_encap_type(encap: EncapType, creator: LayerCreatorFn) -> Result<(), Error> {
        let mut map = ENCAP_TYPES_MAP
            .write()
            .map_err(|_| Error::RegisterError("encap map lock poisoned".to_string()))?;
        if map.contains_key(&encap) {
            return Err(Error::RegisterError(format!("encap: {}", encap)));
        }
        map.insert(encap, creator);

        Ok(())
    }

    /// Create a Packet from a u8 buffer.
    ///
    /// This is the main API function. An application would typically call
    /// [`register_defaults`][`crate::register_defaults`] once and then `Packet::from_bytes` for
    /// every captured buffer. The returned packet serializes into the protocol tree.
    pub fn from_bytes(bytes: &[u8], encap: EncapType) -> Result<Self, Error> {
        let mut p = Packet::default();

        let creator = {
            let map = ENCAP_TYPES_MAP
                .read()
                .map_err(|_| Error::ParseError("encap map lock poisoned".to_string()))?;
            map.get(&encap).copied()
        };

        let mut layer = match creator {
            Some(creator) => creator(),
            None => {
                #[cfg(feature = "logging")]
                log::debug!("no dissector registered for encap type {}", encap);

                p.unprocessed = bytes.into();
                return Ok(p);
            }
        };

        let mut start = 0;
        loop {
            let (next, consumed) = layer.decode_bytes(&bytes[start..])?;

            #[cfg(feature = "logging")]
            log::trace!("{}: decoded {} bytes", layer.short_name(), consumed);

            start += consumed;
            p.layers.push(layer);

            match next {
                Some(next) => layer = next,
                None => break,
            }
        }

        if start != bytes.len() {
            p.unprocessed = bytes[start..].into();
        }
        Ok(p)
    }

    /// The decoded layers, outermost first.
    pub fn layers(&self) -> &[Box<dyn Layer + Send>] {
        &self.layers
    }

    /// Bytes that no dissector consumed.
    pub fn unprocessed(&self) -> &[u8] {
        &self.unprocessed
    }
}

impl Serialize for Packet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Packet", self.layers.len() + 1)?;
        for layer in &self.layers {
            state.serialize_field(layer.short_name(), layer)?;
        }
        state.serialize_field("unprocessed", &hex::encode(&self.unprocessed))?;
        state.end()
    }
}
