//! hcimme: Dissectors for Bluetooth HCI commands and HomePlug AV vendor MMEs.
//!
//! A Basic unit is a [`Packet`], a struct representing a buffer captured (and dissected) from the
//! wire. A packet is a collection of [`Layer`]s, each produced by the dissector that understood
//! that part of the buffer:
//!
//! * Bluetooth HCI over H4 ([`layers::bluetooth`]): the packet indicator, the HCI command header
//!   and the parameters of each core command ([`layers::bluetooth::hci_cmd`]), with vendor
//!   specific commands handed to the [Android][`layers::bluetooth::vendor_android`] or
//!   [Intel][`layers::bluetooth::vendor_intel`] extension.
//! * Ethernet carrying HomePlug AV management messages ([`layers::homeplug_av`]), with the
//!   [VertexCom][`layers::homeplug_av::vertexcom`] vendor MMEs.
//!
//! ```rust
//! let _ = hcimme::register_defaults();
//!
//! // HCI Command: Disconnect, handle 0x0040, reason 0x13
//! let bytes = hex::decode("01060403400013").unwrap();
//! let packet = hcimme::Packet::from_bytes(&bytes, hcimme::ENCAP_TYPE_BLUETOOTH_HCI_H4).unwrap();
//!
//! println!("{}", serde_json::to_string_pretty(&packet).unwrap());
//! ```

pub mod config;

pub(crate) mod cursor;

pub mod errors;

pub mod layer;
pub use layer::Layer;

pub mod layers;

pub mod packet;
pub use packet::Packet;

pub mod types;
pub use types::{
    ENCAP_TYPE_BLUETOOTH_HCI_H4, ENCAP_TYPE_BLUETOOTH_HCI_H4_WITH_PHDR, ENCAP_TYPE_ETH,
};

#[doc(inline)]
pub use layers::register_defaults;

/// Dissects a hex encoded buffer and returns the protocol tree as JSON.
///
/// This is the function exposed by the `wasm` and `python-bindings` features.
pub fn dissect_hex_to_json(encap_type: u8, packet: &str) -> Result<String, errors::Error> {
    let _ = register_defaults();

    let bytes = hex::decode(packet.trim()).map_err(|e| errors::Error::ParseError(e.to_string()))?;
    let p = Packet::from_bytes(&bytes, encap_type)?;

    serde_json::to_string_pretty(&p).map_err(|e| errors::Error::ParseError(e.to_string()))
}

#[cfg(feature = "wasm")]
pub use wasm::dissect_packet;

#[cfg(feature = "wasm")]
mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::dissect_hex_to_json;

    #[wasm_bindgen]
    pub fn dissect_packet(encap_type: u8, packet: String) -> Result<String, String> {
        dissect_hex_to_json(encap_type, &packet).map_err(|e| e.to_string())
    }
}

#[cfg(feature = "python-bindings")]
mod python {
    use pyo3::prelude::*;

    use crate::dissect_hex_to_json;

    #[pyfunction]
    #[pyo3(name = "dissect_packet")]
    fn py_dissect_packet(encap_type: u8, packet: String) -> PyResult<String> {
        dissect_hex_to_json(encap_type, &packet)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    #[pymodule]
    fn hcimme(_py: Python, m: &PyModule) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(py_dissect_packet, m)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dissect_hex_to_json_rejects_bad_hex() {
        let res = dissect_hex_to_json(ENCAP_TYPE_BLUETOOTH_HCI_H4, "01zz");
        assert!(matches!(res, Err(errors::Error::ParseError(_))));
    }

    #[test]
    fn dissect_hex_to_json_reset() {
        let json = dissect_hex_to_json(ENCAP_TYPE_BLUETOOTH_HCI_H4, "01030c00").unwrap();
        assert!(json.contains("\"Reset\""), "{}", json);
    }
}
