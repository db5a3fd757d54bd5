//! Informational (OGF 0x04), Status (OGF 0x05) and Testing (OGF 0x06) commands
//!
//! Most of these take no parameters or a single connection handle.

use serde::Serialize;

use crate::cursor::{Cursor, Decode};
use crate::errors::Error;
use crate::layers::bluetooth::common::{
    read_handle, read_named, CodingFormat, DATA_PATH_DIRECTIONS, ENABLE,
};
use crate::types::hex::serialize_lower_hex_u16;
use crate::types::{Named, ValueStrings};

use super::opcodes::*;
use super::parameters::{read, CommandParameters, ConnectionHandle};

static LOGICAL_TRANSPORT_TYPES: ValueStrings<u8> = &[
    (0x00, "BR/EDR ACL"),
    (0x01, "BR/EDR SCO or eSCO"),
    (0x02, "LE CIS"),
    (0x03, "LE BIS"),
];

static WHICH_CLOCK: ValueStrings<u8> = &[(0x00, "Local Clock"), (0x01, "Piconet Clock")];

static LPO_ALLOWED: ValueStrings<u8> = &[
    (0x00, "Controller shall not sleep"),
    (0x01, "Controller may sleep"),
];

static LOOPBACK_MODES: ValueStrings<u8> = &[
    (0x00, "No Loopback mode enabled"),
    (0x01, "Enable Local Loopback"),
    (0x02, "Enable Remote Loopback"),
];

hci_parameters! {
    ReadLocalExtendedFeatures(c) {
        page_number: u8 = c.read_u8()?,
    }

    ReadLocalSupportedCodecCapabilities(c) {
        codec_id: CodingFormat = c.read()?,
        logical_transport_type: Named<u8> = read_named(c, LOGICAL_TRANSPORT_TYPES)?,
        direction: Named<u8> = read_named(c, DATA_PATH_DIRECTIONS)?,
    }

    ReadClock(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        which_clock: Named<u8> = read_named(c, WHICH_CLOCK)?,
    }

    ReadLocalAmpAssoc(c) {
        physical_link_handle: u8 = c.read_u8()?,
        length_so_far: u16 = c.read_u16()?,
        max_remote_amp_assoc_length: u16 = c.read_u16()?,
    }

    SetTriggeredClockCapture(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        enable: Named<u8> = read_named(c, ENABLE)?,
        which_clock: Named<u8> = read_named(c, WHICH_CLOCK)?,
        lpo_allowed: Named<u8> = read_named(c, LPO_ALLOWED)?,
        num_clock_captures_to_filter: u8 = c.read_u8()?,
    }

    WriteLoopbackMode(c) {
        loopback_mode: Named<u8> = read_named(c, LOOPBACK_MODES)?,
    }

    WriteSimplePairingDebugMode(c) {
        debug_mode: Named<u8> = read_named(c, ENABLE)?,
    }

    EnableAmpReceiverReports(c) {
        enable: Named<u8> = read_named(c, ENABLE)?,
        interval: u8 = c.read_u8()?,
    }

    WriteSecureConnectionsTestMode(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        dm1_acl_u_mode: Named<u8> = read_named(c, ENABLE)?,
        esco_loopback_mode: Named<u8> = read_named(c, ENABLE)?,
    }
}

#[derive(Debug, Serialize)]
pub struct ReadLocalSupportedControllerDelay {
    codec_id: CodingFormat,
    logical_transport_type: Named<u8>,
    direction: Named<u8>,
    codec_configuration_length: u8,
    #[serde(serialize_with = "hex::serde::serialize")]
    codec_configuration: Vec<u8>,
}

impl Decode for ReadLocalSupportedControllerDelay {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let codec_id = c.read()?;
        let logical_transport_type = read_named(c, LOGICAL_TRANSPORT_TYPES)?;
        let direction = read_named(c, DATA_PATH_DIRECTIONS)?;
        let codec_configuration_length = c.read_u8()?;
        let codec_configuration = c.read_bytes(codec_configuration_length as usize)?.to_vec();
        Ok(Self {
            codec_id,
            logical_transport_type,
            direction,
            codec_configuration_length,
            codec_configuration,
        })
    }
}

/// A fragment of the remote AMP ASSOC structure; the fragment runs to the end of the parameters.
#[derive(Debug, Serialize)]
pub struct WriteRemoteAmpAssoc {
    physical_link_handle: u8,
    length_so_far: u16,
    remaining_length: u16,
    #[serde(serialize_with = "hex::serde::serialize")]
    amp_assoc_fragment: Vec<u8>,
}

impl Decode for WriteRemoteAmpAssoc {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self {
            physical_link_handle: c.read_u8()?,
            length_so_far: c.read_u16()?,
            remaining_length: c.read_u16()?,
            amp_assoc_fragment: c.rest().to_vec(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct AmpTest {
    controller_type: u8,
    #[serde(serialize_with = "hex::serde::serialize")]
    test_parameters: Vec<u8>,
}

impl Decode for AmpTest {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self {
            controller_type: c.read_u8()?,
            test_parameters: c.rest().to_vec(),
        })
    }
}

pub(super) fn decode(
    opcode: u16,
    c: &mut Cursor<'_>,
) -> Result<Option<Box<dyn CommandParameters>>, Error> {
    let params = match opcode {
        READ_LOCAL_EXTENDED_FEATURES => read::<ReadLocalExtendedFeatures>(c)?,
        READ_LOCAL_SUPPORTED_CODEC_CAPABILITIES => {
            read::<ReadLocalSupportedCodecCapabilities>(c)?
        }
        READ_LOCAL_SUPPORTED_CONTROLLER_DELAY => read::<ReadLocalSupportedControllerDelay>(c)?,
        READ_FAILED_CONTACT_COUNTER
        | RESET_FAILED_CONTACT_COUNTER
        | READ_LINK_QUALITY
        | READ_RSSI
        | READ_AFH_CHANNEL_MAP
        | READ_ENCRYPTION_KEY_SIZE => read::<ConnectionHandle>(c)?,
        READ_CLOCK => read::<ReadClock>(c)?,
        READ_LOCAL_AMP_ASSOC => read::<ReadLocalAmpAssoc>(c)?,
        WRITE_REMOTE_AMP_ASSOC => read::<WriteRemoteAmpAssoc>(c)?,
        SET_TRIGGERED_CLOCK_CAPTURE => read::<SetTriggeredClockCapture>(c)?,
        WRITE_LOOPBACK_MODE => read::<WriteLoopbackMode>(c)?,
        WRITE_SIMPLE_PAIRING_DEBUG_MODE => read::<WriteSimplePairingDebugMode>(c)?,
        ENABLE_AMP_RECEIVER_REPORTS => read::<EnableAmpReceiverReports>(c)?,
        AMP_TEST => read::<AmpTest>(c)?,
        WRITE_SECURE_CONNECTIONS_TEST_MODE => read::<WriteSecureConnectionsTestMode>(c)?,
        _ => return Ok(None),
    };

    Ok(Some(params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_parameters() {
        let mut c = Cursor::new(&[]);
        assert!(decode(READ_LOCAL_VERSION_INFORMATION, &mut c).unwrap().is_none());
        assert!(decode(READ_BD_ADDR, &mut c).unwrap().is_none());
    }

    #[test]
    fn read_rssi_handle() {
        let bytes = hex::decode("4000").unwrap();
        let mut c = Cursor::new(&bytes);
        let params = decode(READ_RSSI, &mut c).unwrap().unwrap();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["connection_handle"], "0x0040");
    }

    #[test]
    fn controller_delay_with_configuration() {
        let bytes = hex::decode(concat!("0600000000", "02", "00", "03", "aabbcc")).unwrap();
        let mut c = Cursor::new(&bytes);
        let params = decode(READ_LOCAL_SUPPORTED_CONTROLLER_DELAY, &mut c)
            .unwrap()
            .unwrap();
        assert!(c.is_empty());
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["codec_id"]["coding_format"], "LC3 (0x06)");
        assert_eq!(json["logical_transport_type"], "LE CIS (0x02)");
        assert_eq!(json["direction"], "Input (Host to Controller) (0x00)");
        assert_eq!(json["codec_configuration"], "aabbcc");
    }

    #[test]
    fn write_remote_amp_assoc_fragment_to_end() {
        let bytes = hex::decode("0100000400deadbeef").unwrap();
        let mut c = Cursor::new(&bytes);
        let params = decode(WRITE_REMOTE_AMP_ASSOC, &mut c).unwrap().unwrap();
        assert!(c.is_empty());
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["remaining_length"], 4);
        assert_eq!(json["amp_assoc_fragment"], "deadbeef");
    }
}
