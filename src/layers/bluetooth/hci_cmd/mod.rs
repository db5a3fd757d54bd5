//! HCI Command packets
//!
//! ```text
//! | opcode (2, LE) | parameter total length (1) | parameters |
//! ```
//!
//! Core commands (every OGF but 0x3F) are decoded here. Vendor specific commands are handed to
//! the vendor dissector registered with [`register_vendor`] and selected through
//! [`crate::config::Config::hci_vendor`].

use core::ops::RangeInclusive;

use std::sync::RwLock;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::config::{self, HciVendor};
use crate::cursor::Cursor;
use crate::errors::Error;
use crate::layers::bluetooth::{self, vendor_android, vendor_intel, HCI_H4_COMMAND};
use crate::types::hex::serialize_lower_hex_u16;
use crate::types::Named;
use crate::Layer;

pub mod opcodes;
pub mod parameters;

mod baseband;
mod informational;
pub(crate) mod le;
mod link_control;
mod link_policy;

use opcodes::{OGF_NAMES, OGF_VENDOR_SPECIFIC};
use parameters::{CommandParameters, RawParameters};

/// Creator function for a vendor command dissector. Gets the OCF and the parameter total length;
/// the bytes handed to the dissector start with the parameters.
pub type VendorCreatorFn = fn(ocf: u16, param_length: u8) -> Box<dyn Layer + Send>;

struct Vendor {
    company_id: u16,
    ocfs: RangeInclusive<u16>,
    creator: VendorCreatorFn,
}

lazy_static! {
    static ref VENDORS: RwLock<Vec<Vendor>> = RwLock::new(Vec::new());
}

// Register ourselves with the H4 framing.
pub(crate) fn register_defaults() -> Result<(), Error> {
    lazy_static::initialize(&VENDORS);

    bluetooth::register_packet_type(HCI_H4_COMMAND, HciCommand::creator)
}

/// Register a vendor command dissector.
///
/// `ocfs` are the OCFs the vendor defines. When the configuration leaves the vendor choice to
/// us, a vendor command goes to the first registered vendor whose range contains its OCF.
pub fn register_vendor(
    company_id: u16,
    ocfs: RangeInclusive<u16>,
    creator: VendorCreatorFn,
) -> Result<(), Error> {
    lazy_static::initialize(&VENDORS);

    let mut vendors = VENDORS
        .write()
        .map_err(|_| Error::RegisterError("hci vendor list lock poisoned".to_string()))?;
    if vendors.iter().any(|v| v.company_id == company_id) {
        return Err(Error::RegisterError(format!(
            "hci vendor company id: 0x{:04x}",
            company_id
        )));
    }
    vendors.push(Vendor {
        company_id,
        ocfs,
        creator,
    });

    Ok(())
}

fn vendor_for(ocf: u16) -> Result<Option<VendorCreatorFn>, Error> {
    let pinned = match config::get().hci_vendor {
        HciVendor::Auto => None,
        HciVendor::Android => Some(vendor_android::COMPANY_ID_GOOGLE),
        HciVendor::Intel => Some(vendor_intel::COMPANY_ID_INTEL),
        HciVendor::None => return Ok(None),
    };

    let vendors = VENDORS
        .read()
        .map_err(|_| Error::ParseError("hci vendor list lock poisoned".to_string()))?;
    let vendor = vendors.iter().find(|v| match pinned {
        Some(company_id) => v.company_id == company_id,
        None => v.ocfs.contains(&ocf),
    });

    #[cfg(feature = "logging")]
    match vendor {
        Some(v) => log::trace!("ocf 0x{:03x}: vendor 0x{:04x}", ocf, v.company_id),
        None => log::debug!("ocf 0x{:03x}: no vendor dissector", ocf),
    }

    Ok(vendor.map(|v| v.creator))
}

/// Returns the parameter bytes that no field accounted for.
///
/// They are an error when the configuration asks for strict parameter lengths.
pub(crate) fn finish_parameters(c: &mut Cursor<'_>, command: &str) -> Result<Vec<u8>, Error> {
    if c.is_empty() {
        return Ok(Vec::new());
    }

    if config::get().strict_parameter_length {
        return Err(Error::ParseError(format!(
            "{}: {} parameter bytes left over",
            command,
            c.remaining()
        )));
    }

    #[cfg(feature = "logging")]
    log::debug!("{}: {} parameter bytes left over", command, c.remaining());

    Ok(c.rest().to_vec())
}

#[derive(Debug, Default, Serialize)]
pub struct HciCommand {
    #[serde(serialize_with = "serialize_lower_hex_u16")]
    opcode: u16,
    ogf: Named<u8>,
    #[serde(serialize_with = "serialize_lower_hex_u16")]
    ocf: u16,
    command: &'static str,
    param_length: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<Box<dyn CommandParameters>>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "hex::serde::serialize"
    )]
    unparsed: Vec<u8>,
}

impl HciCommand {
    pub(crate) fn creator() -> Box<dyn Layer + Send> {
        Box::<HciCommand>::default()
    }

    pub fn opcode(&self) -> u16 {
        self.opcode
    }

    pub fn command(&self) -> &'static str {
        self.command
    }
}

impl Layer for HciCommand {
    fn decode_bytes(
        &mut self,
        bytes: &[u8],
    ) -> Result<(Option<Box<dyn Layer + Send>>, usize), Error> {
        let mut cursor = Cursor::new(bytes);

        self.opcode = cursor.read_u16()?;
        let ogf = opcodes::ogf(self.opcode);
        self.ogf = Named::lookup(ogf, OGF_NAMES);
        self.ocf = opcodes::ocf(self.opcode);
        self.param_length = cursor.read_u8()?;
        let header_length = cursor.offset();

        let mut params = cursor.sub_cursor(self.param_length as usize)?;

        if ogf == OGF_VENDOR_SPECIFIC {
            self.command = "Vendor Command";
            if let Some(creator) = vendor_for(self.ocf)? {
                return Ok((Some(creator(self.ocf, self.param_length)), header_length));
            }
            if !params.is_empty() {
                self.parameters = Some(Box::new(RawParameters(params.rest().to_vec())));
            }
            return Ok((None, cursor.offset()));
        }

        self.command = opcodes::command_name(self.opcode);
        self.parameters = parameters::decode(self.opcode, &mut params)?;
        self.unparsed = finish_parameters(&mut params, self.command)?;

        Ok((None, cursor.offset()))
    }

    fn name(&self) -> &'static str {
        "Bluetooth HCI Command"
    }

    fn short_name(&self) -> &'static str {
        "bthci_cmd"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dissect(h: &str) -> (HciCommand, Result<(Option<Box<dyn Layer + Send>>, usize), Error>) {
        let bytes = hex::decode(h).unwrap();
        let mut cmd = HciCommand::default();
        let res = cmd.decode_bytes(&bytes);
        (cmd, res)
    }

    #[test]
    fn reset_has_no_parameters() {
        let (cmd, res) = dissect("030c00");
        let (next, consumed) = res.unwrap();
        assert!(next.is_none());
        assert_eq!(consumed, 3);

        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["opcode"], "0x0c03");
        assert_eq!(json["ogf"], "Controller & Baseband Commands (0x03)");
        assert_eq!(json["ocf"], "0x0003");
        assert_eq!(json["command"], "Reset");
        assert!(json.get("parameters").is_none());
        assert!(json.get("unparsed").is_none());
    }

    #[test]
    fn disconnect() {
        let (cmd, res) = dissect("0604030b0013");
        assert_eq!(res.unwrap().1, 6);
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["command"], "Disconnect");
        assert_eq!(json["parameters"]["connection_handle"], "0x000b");
        assert_eq!(
            json["parameters"]["reason"],
            "Remote User Terminated Connection (0x13)"
        );
    }

    #[test]
    fn declared_length_missing() {
        let (_, res) = dissect("0604030b00");
        assert!(matches!(res, Err(Error::TooShort { .. })));
    }

    #[test]
    fn truncated_opcode() {
        let (_, res) = dissect("06");
        assert!(matches!(res, Err(Error::TooShort { .. })));
    }

    #[test]
    fn leftover_parameters_are_unparsed() {
        // Write Scan Enable with a stray byte
        let (cmd, res) = dissect("1a0c0203ff");
        assert_eq!(res.unwrap().1, 5);
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(
            json["parameters"]["scan_enable"],
            "Inquiry Scan enabled, Page Scan enabled (0x03)"
        );
        assert_eq!(json["unparsed"], "ff");
    }

    #[test]
    fn stray_bytes_after_known_parameterless_command() {
        let (cmd, res) = dissect("030c01ff");
        assert_eq!(res.unwrap().1, 4);
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["command"], "Reset");
        assert!(json.get("parameters").is_none());
        assert_eq!(json["unparsed"], "ff");
    }

    #[test]
    fn unknown_opcode_keeps_raw_parameters() {
        let (cmd, res) = dissect("ff0b020102");
        assert_eq!(res.unwrap().1, 5);
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["command"], "Unknown");
        assert_eq!(json["parameters"], "0102");
    }

    #[test]
    fn bytes_after_parameters_are_not_consumed() {
        let (_, res) = dissect("030c00aabb");
        assert_eq!(res.unwrap().1, 3);
    }
}
