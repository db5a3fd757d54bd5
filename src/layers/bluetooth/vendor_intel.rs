//! Intel vendor HCI commands
//!
//! Used by the Intel controllers for firmware download (Secure Send, Reset with a boot address)
//! and for controller configuration through DDC entries.

use serde::Serialize;

use crate::cursor::{Cursor, Decode};
use crate::errors::Error;
use crate::layers::bluetooth::common::{read_named, ENABLE};
use crate::layers::bluetooth::hci_cmd::parameters::{read, read_raw, Address, CommandParameters};
use crate::layers::bluetooth::hci_cmd::{self, finish_parameters};
use crate::types::hex::{serialize_lower_hex_u16, serialize_lower_hex_u32};
use crate::types::{Named, ValueStrings};
use crate::Layer;

/// Bluetooth SIG company identifier of Intel.
pub const COMPANY_ID_INTEL: u16 = 0x0002;

pub const OCF_FIRST: u16 = 0x000;
pub const OCF_LAST: u16 = 0x14f;

pub const WRITE_BD_ADDR: u16 = 0x001;
pub const RESET: u16 = 0x002;
pub const READ_VERSION: u16 = 0x005;
pub const SECURE_SEND: u16 = 0x009;
pub const READ_BOOT_PARAMS: u16 = 0x00d;
pub const MANUFACTURER_MODE: u16 = 0x011;
pub const SET_DIAGNOSTIC_MODE: u16 = 0x043;
pub const SET_EVENT_MASK: u16 = 0x052;
pub const DDC_CONFIG_WRITE: u16 = 0x08b;
pub const READ_DEBUG_FEATURES: u16 = 0x0a6;

static COMMAND_NAMES: ValueStrings<u16> = &[
    (WRITE_BD_ADDR, "Write BD_ADDR"),
    (RESET, "Reset"),
    (READ_VERSION, "Read Version"),
    (SECURE_SEND, "Secure Send"),
    (READ_BOOT_PARAMS, "Read Boot Params"),
    (MANUFACTURER_MODE, "Manufacturer Mode"),
    (SET_DIAGNOSTIC_MODE, "Set Diagnostic Mode"),
    (SET_EVENT_MASK, "Set Event Mask"),
    (DDC_CONFIG_WRITE, "DDC Config Write"),
    (READ_DEBUG_FEATURES, "Read Debug Features"),
];

static RESET_TYPES: ValueStrings<u8> = &[(0x00, "Soft Reset"), (0x01, "Hard Reset")];

static PATCH_ENABLE: ValueStrings<u8> = &[(0x00, "Do not enable patch"), (0x01, "Enable patch")];

static DDC_RELOAD: ValueStrings<u8> = &[
    (0x00, "Do not reload DDC"),
    (0x01, "Reload DDC from NVM"),
];

static BOOT_OPTIONS: ValueStrings<u8> = &[
    (0x00, "Current image"),
    (0x01, "Specified boot address"),
];

static VERSION_REQUESTS: ValueStrings<u8> = &[(0xff, "TLV format")];

static FRAGMENT_TYPES: ValueStrings<u8> = &[
    (0x00, "Init"),
    (0x01, "Data"),
    (0x02, "Sign"),
    (0x03, "Public Key"),
];

static MANUFACTURER_RESETS: ValueStrings<u8> = &[
    (0x00, "No reset"),
    (0x01, "Reset and deactivate patches"),
    (0x02, "Reset and activate patches"),
];

// Register ourselves as an HCI vendor
pub(crate) fn register_defaults() -> Result<(), Error> {
    hci_cmd::register_vendor(COMPANY_ID_INTEL, OCF_FIRST..=OCF_LAST, IntelCommand::creator)
}

hci_parameters! {
    Reset(c) {
        reset_type: Named<u8> = read_named(c, RESET_TYPES)?,
        patch_enable: Named<u8> = read_named(c, PATCH_ENABLE)?,
        ddc_reload: Named<u8> = read_named(c, DDC_RELOAD)?,
        boot_option: Named<u8> = read_named(c, BOOT_OPTIONS)?,
        #[serde(serialize_with = "serialize_lower_hex_u32")]
        boot_address: u32 = c.read_u32()?,
    }

    ManufacturerMode(c) {
        mode: Named<u8> = read_named(c, ENABLE)?,
        reset: Named<u8> = read_named(c, MANUFACTURER_RESETS)?,
    }

    SetEventMask(c) {
        #[serde(serialize_with = "crate::types::hex::serialize_lower_hex_u64")]
        event_mask: u64 = c.read_u64()?,
    }

    ReadDebugFeatures(c) {
        page_number: u8 = c.read_u8()?,
    }
}

/// Read Version optionally asks for the TLV formatted reply.
#[derive(Debug, Serialize)]
pub struct ReadVersion {
    #[serde(skip_serializing_if = "Option::is_none")]
    request: Option<Named<u8>>,
}

impl Decode for ReadVersion {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let request = if c.is_empty() {
            None
        } else {
            Some(read_named(c, VERSION_REQUESTS)?)
        };
        Ok(Self { request })
    }
}

#[derive(Debug, Serialize)]
pub struct SecureSend {
    fragment_type: Named<u8>,
    #[serde(serialize_with = "hex::serde::serialize")]
    data: Vec<u8>,
}

impl Decode for SecureSend {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self {
            fragment_type: read_named(c, FRAGMENT_TYPES)?,
            data: c.rest().to_vec(),
        })
    }
}

/// The first octet enables or disables diagnostics; the remaining octets select the event
/// sources and are controller specific.
#[derive(Debug, Serialize)]
pub struct SetDiagnosticMode {
    enable: Named<u8>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "hex::serde::serialize"
    )]
    sources: Vec<u8>,
}

impl Decode for SetDiagnosticMode {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let enable = c.read_u8()?;
        Ok(Self {
            enable: Named::new(enable, if enable == 0 { "Disabled" } else { "Enabled" }),
            sources: c.rest().to_vec(),
        })
    }
}

/// One DDC entry: `length, id, data[length - 2]`.
#[derive(Debug, Serialize)]
pub struct DdcEntry {
    length: u8,
    #[serde(serialize_with = "serialize_lower_hex_u16")]
    id: u16,
    #[serde(serialize_with = "hex::serde::serialize")]
    data: Vec<u8>,
}

impl Decode for DdcEntry {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let length = c.read_u8()?;
        if length < 2 {
            return Err(Error::ParseError(format!("DDC entry length {}", length)));
        }
        let id = c.read_u16()?;
        let data = c.read_bytes(length as usize - 2)?.to_vec();
        Ok(Self { length, id, data })
    }
}

#[derive(Debug, Serialize)]
pub struct DdcConfigWrite {
    entries: Vec<DdcEntry>,
}

impl Decode for DdcConfigWrite {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let mut entries = Vec::new();
        while !c.is_empty() {
            entries.push(c.read()?);
        }
        Ok(Self { entries })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct IntelCommand {
    #[serde(skip)]
    param_length: u8,
    #[serde(serialize_with = "serialize_lower_hex_u16")]
    ocf: u16,
    command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<Box<dyn CommandParameters>>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "hex::serde::serialize"
    )]
    unparsed: Vec<u8>,
}

impl IntelCommand {
    pub(crate) fn creator(ocf: u16, param_length: u8) -> Box<dyn Layer + Send> {
        Box::new(IntelCommand {
            ocf,
            param_length,
            ..Default::default()
        })
    }
}

fn decode_parameters(
    ocf: u16,
    c: &mut Cursor<'_>,
) -> Result<Option<Box<dyn CommandParameters>>, Error> {
    let params = match ocf {
        WRITE_BD_ADDR => read::<Address>(c)?,
        RESET => read::<Reset>(c)?,
        READ_VERSION => read::<ReadVersion>(c)?,
        SECURE_SEND => read::<SecureSend>(c)?,
        MANUFACTURER_MODE => read::<ManufacturerMode>(c)?,
        SET_DIAGNOSTIC_MODE => read::<SetDiagnosticMode>(c)?,
        SET_EVENT_MASK => read::<SetEventMask>(c)?,
        DDC_CONFIG_WRITE => read::<DdcConfigWrite>(c)?,
        READ_DEBUG_FEATURES => read::<ReadDebugFeatures>(c)?,
        READ_BOOT_PARAMS => return Ok(None),
        _ => return Ok(read_raw(c)),
    };

    Ok(Some(params))
}

impl Layer for IntelCommand {
    fn decode_bytes(
        &mut self,
        bytes: &[u8],
    ) -> Result<(Option<Box<dyn Layer + Send>>, usize), Error> {
        let mut cursor = Cursor::new(bytes);
        let mut params = cursor.sub_cursor(self.param_length as usize)?;

        self.command = Named::lookup(self.ocf, COMMAND_NAMES).name();
        self.parameters = decode_parameters(self.ocf, &mut params)?;
        self.unparsed = finish_parameters(&mut params, self.command)?;

        Ok((None, cursor.offset()))
    }

    fn name(&self) -> &'static str {
        "Bluetooth Intel HCI Command"
    }

    fn short_name(&self) -> &'static str {
        "bthci_cmd_intel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dissect(ocf: u16, h: &str) -> serde_json::Value {
        let bytes = hex::decode(h).unwrap();
        let mut layer = IntelCommand::creator(ocf, bytes.len() as u8);
        let (next, consumed) = layer.decode_bytes(&bytes).unwrap();
        assert!(next.is_none());
        assert_eq!(consumed, bytes.len());
        serde_json::to_value(&layer).unwrap()
    }

    #[test]
    fn reset_with_boot_address() {
        let json = dissect(RESET, concat!("00", "01", "00", "01", "00081000"));
        assert_eq!(json["command"], "Reset");
        let params = &json["parameters"];
        assert_eq!(params["reset_type"], "Soft Reset (0x00)");
        assert_eq!(params["boot_option"], "Specified boot address (0x01)");
        assert_eq!(params["boot_address"], "0x00100800");
    }

    #[test]
    fn read_version_optional_request() {
        let json = dissect(READ_VERSION, "");
        assert!(json["parameters"].get("request").is_none());

        let json = dissect(READ_VERSION, "ff");
        assert_eq!(json["parameters"]["request"], "TLV format (0xff)");
    }

    #[test]
    fn secure_send_fragment() {
        let json = dissect(SECURE_SEND, "01deadbeef");
        assert_eq!(json["parameters"]["fragment_type"], "Data (0x01)");
        assert_eq!(json["parameters"]["data"], "deadbeef");
    }

    #[test]
    fn read_boot_params_is_empty() {
        let json = dissect(READ_BOOT_PARAMS, "");
        assert_eq!(json["command"], "Read Boot Params");
        assert!(json.get("parameters").is_none());
    }

    #[test]
    fn ddc_entries() {
        let json = dissect(DDC_CONFIG_WRITE, concat!("03", "0401", "aa", "04", "2801", "0102"));
        let entries = &json["parameters"]["entries"];
        assert_eq!(entries.as_array().unwrap().len(), 2);
        assert_eq!(entries[0]["id"], "0x0104");
        assert_eq!(entries[0]["data"], "aa");
        assert_eq!(entries[1]["id"], "0x0128");
        assert_eq!(entries[1]["data"], "0102");
    }

    #[test]
    fn ddc_entry_too_short() {
        let mut layer = IntelCommand::creator(DDC_CONFIG_WRITE, 3);
        assert!(layer.decode_bytes(&[0x01, 0x04, 0x01]).is_err());
    }

    #[test]
    fn unknown_command_keeps_raw_parameters() {
        let json = dissect(0x0ff, "0102");
        assert_eq!(json["command"], "Unknown");
        assert_eq!(json["parameters"], "0102");
        assert!(json.get("unparsed").is_none());
    }

    #[test]
    fn write_bd_addr() {
        let json = dissect(WRITE_BD_ADDR, "665544332211");
        assert_eq!(json["parameters"]["bd_addr"], "11:22:33:44:55:66");
    }

    #[test]
    fn manufacturer_mode() {
        let json = dissect(MANUFACTURER_MODE, "0002");
        assert_eq!(json["parameters"]["mode"], "Disabled (0x00)");
        assert_eq!(json["parameters"]["reset"], "Reset and activate patches (0x02)");
    }
}
