//! Structures and code tables shared by the HCI command dissectors
//!
//! Class of device, extended flow specifications, channel maps and the EIR / advertising data
//! AD structures show up in several commands, some of them in vendor commands as well.

use serde::Serialize;

use crate::config;
use crate::cursor::{Cursor, Decode};
use crate::errors::Error;
use crate::types::hex::{
    serialize_lower_hex_u16, serialize_lower_hex_u16_list, serialize_lower_hex_u24,
    serialize_lower_hex_u32_list,
};
use crate::types::{BdAddr, Bits, Named, ValueStrings};

/// Reads a connection handle, dropping the packet boundary and broadcast flags.
pub(crate) fn read_handle(c: &mut Cursor<'_>) -> Result<u16, Error> {
    Ok(c.read_u16()? & 0x0fff)
}

pub(crate) fn read_named(c: &mut Cursor<'_>, table: ValueStrings<u8>) -> Result<Named<u8>, Error> {
    Ok(Named::lookup(c.read_u8()?, table))
}

pub(crate) fn read_bits8(c: &mut Cursor<'_>, table: ValueStrings<u8>) -> Result<Bits<u8>, Error> {
    Ok(Bits::new(c.read_u8()?, table))
}

pub(crate) fn read_bits16(c: &mut Cursor<'_>, table: ValueStrings<u8>) -> Result<Bits<u16>, Error> {
    Ok(Bits::new(c.read_u16()?, table))
}

pub(crate) fn read_bits64(c: &mut Cursor<'_>, table: ValueStrings<u8>) -> Result<Bits<u64>, Error> {
    Ok(Bits::new(c.read_u64()?, table))
}

/// A NUL terminated UTF-8 string in a fixed size field.
pub(crate) fn read_fixed_string(c: &mut Cursor<'_>, len: usize) -> Result<String, Error> {
    let bytes = c.read_bytes(len)?;
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
}

/// Reads the rest of the cursor as a sequence of `T`.
pub(crate) fn read_to_end<T, F>(c: &mut Cursor<'_>, mut read: F) -> Result<Vec<T>, Error>
where
    F: FnMut(&mut Cursor<'_>) -> Result<T, Error>,
{
    let mut out = Vec::new();
    while !c.is_empty() {
        out.push(read(c)?);
    }
    Ok(out)
}

pub static ERROR_CODES: ValueStrings<u8> = &[
    (0x00, "Success"),
    (0x01, "Unknown HCI Command"),
    (0x02, "Unknown Connection Identifier"),
    (0x03, "Hardware Failure"),
    (0x04, "Page Timeout"),
    (0x05, "Authentication Failure"),
    (0x06, "PIN or Key Missing"),
    (0x07, "Memory Capacity Exceeded"),
    (0x08, "Connection Timeout"),
    (0x09, "Connection Limit Exceeded"),
    (0x0a, "Synchronous Connection Limit To A Device Exceeded"),
    (0x0b, "Connection Already Exists"),
    (0x0c, "Command Disallowed"),
    (0x0d, "Connection Rejected due to Limited Resources"),
    (0x0e, "Connection Rejected Due To Security Reasons"),
    (0x0f, "Connection Rejected due to Unacceptable BD_ADDR"),
    (0x10, "Connection Accept Timeout Exceeded"),
    (0x11, "Unsupported Feature or Parameter Value"),
    (0x12, "Invalid HCI Command Parameters"),
    (0x13, "Remote User Terminated Connection"),
    (0x14, "Remote Device Terminated Connection due to Low Resources"),
    (0x15, "Remote Device Terminated Connection due to Power Off"),
    (0x16, "Connection Terminated By Local Host"),
    (0x17, "Repeated Attempts"),
    (0x18, "Pairing Not Allowed"),
    (0x19, "Unknown LMP PDU"),
    (0x1a, "Unsupported Remote Feature"),
    (0x1b, "SCO Offset Rejected"),
    (0x1c, "SCO Interval Rejected"),
    (0x1d, "SCO Air Mode Rejected"),
    (0x1e, "Invalid LMP Parameters / Invalid LL Parameters"),
    (0x1f, "Unspecified Error"),
    (0x20, "Unsupported LMP Parameter Value / Unsupported LL Parameter Value"),
    (0x21, "Role Change Not Allowed"),
    (0x22, "LMP Response Timeout / LL Response Timeout"),
    (0x23, "LMP Error Transaction Collision / LL Procedure Collision"),
    (0x24, "LMP PDU Not Allowed"),
    (0x25, "Encryption Mode Not Acceptable"),
    (0x26, "Link Key cannot be Changed"),
    (0x27, "Requested QoS Not Supported"),
    (0x28, "Instant Passed"),
    (0x29, "Pairing With Unit Key Not Supported"),
    (0x2a, "Different Transaction Collision"),
    (0x2c, "QoS Unacceptable Parameter"),
    (0x2d, "QoS Rejected"),
    (0x2e, "Channel Classification Not Supported"),
    (0x2f, "Insufficient Security"),
    (0x30, "Parameter Out Of Mandatory Range"),
    (0x32, "Role Switch Pending"),
    (0x34, "Reserved Slot Violation"),
    (0x35, "Role Switch Failed"),
    (0x36, "Extended Inquiry Response Too Large"),
    (0x37, "Secure Simple Pairing Not Supported By Host"),
    (0x38, "Host Busy - Pairing"),
    (0x39, "Connection Rejected due to No Suitable Channel Found"),
    (0x3a, "Controller Busy"),
    (0x3b, "Unacceptable Connection Parameters"),
    (0x3c, "Advertising Timeout"),
    (0x3d, "Connection Terminated due to MIC Failure"),
    (0x3e, "Connection Failed to be Established / Synchronization Timeout"),
    (0x3f, "MAC Connection Failed"),
    (0x40, "Coarse Clock Adjustment Rejected but Will Try to Adjust Using Clock Dragging"),
    (0x41, "Type0 Submap Not Defined"),
    (0x42, "Unknown Advertising Identifier"),
    (0x43, "Limit Reached"),
    (0x44, "Operation Cancelled by Host"),
    (0x45, "Packet Too Long"),
];

pub static LE_ADDRESS_TYPES: ValueStrings<u8> = &[
    (0x00, "Public Device Address"),
    (0x01, "Random Device Address"),
    (0x02, "Public Identity Address"),
    (0x03, "Random (static) Identity Address"),
    (0xff, "Anonymous"),
];

pub static ROLES: ValueStrings<u8> = &[(0x00, "Central"), (0x01, "Peripheral")];

pub static ENABLE: ValueStrings<u8> = &[(0x00, "Disabled"), (0x01, "Enabled")];

/// Direction of a data path or codec, as used by the codec and data path commands.
pub static DATA_PATH_DIRECTIONS: ValueStrings<u8> = &[
    (0x00, "Input (Host to Controller)"),
    (0x01, "Output (Controller to Host)"),
];

pub static IO_CAPABILITIES: ValueStrings<u8> = &[
    (0x00, "DisplayOnly"),
    (0x01, "DisplayYesNo"),
    (0x02, "KeyboardOnly"),
    (0x03, "NoInputNoOutput"),
];

pub static OOB_DATA_PRESENT: ValueStrings<u8> = &[
    (0x00, "OOB authentication data not present"),
    (0x01, "P-192 OOB authentication data from remote device present"),
    (0x02, "P-256 OOB authentication data from remote device present"),
    (0x03, "P-192 and P-256 OOB authentication data from remote device present"),
];

pub static AUTHENTICATION_REQUIREMENTS: ValueStrings<u8> = &[
    (0x00, "MITM Protection Not Required - No Bonding"),
    (0x01, "MITM Protection Required - No Bonding"),
    (0x02, "MITM Protection Not Required - Dedicated Bonding"),
    (0x03, "MITM Protection Required - Dedicated Bonding"),
    (0x04, "MITM Protection Not Required - General Bonding"),
    (0x05, "MITM Protection Required - General Bonding"),
];

pub static PAGE_SCAN_REPETITION_MODES: ValueStrings<u8> = &[
    (0x00, "R0"),
    (0x01, "R1"),
    (0x02, "R2"),
];

pub static LINK_POLICY_BITS: ValueStrings<u8> = &[
    (0, "Enable Role Switch"),
    (1, "Enable Hold Mode"),
    (2, "Enable Sniff Mode"),
    (3, "Enable Park State"),
];

pub static ACL_PACKET_TYPE_BITS: ValueStrings<u8> = &[
    (1, "2-DH1 may not be used"),
    (2, "3-DH1 may not be used"),
    (3, "DM1"),
    (4, "DH1"),
    (8, "2-DH3 may not be used"),
    (9, "3-DH3 may not be used"),
    (10, "DM3"),
    (11, "DH3"),
    (12, "2-DH5 may not be used"),
    (13, "3-DH5 may not be used"),
    (14, "DM5"),
    (15, "DH5"),
];

pub static SYNC_PACKET_TYPE_BITS: ValueStrings<u8> = &[
    (0, "HV1"),
    (1, "HV2"),
    (2, "HV3"),
    (3, "EV3"),
    (4, "EV4"),
    (5, "EV5"),
    (6, "2-EV3 may not be used"),
    (7, "3-EV3 may not be used"),
    (8, "2-EV5 may not be used"),
    (9, "3-EV5 may not be used"),
];

pub static RETRANSMISSION_EFFORTS: ValueStrings<u8> = &[
    (0x00, "No retransmissions"),
    (0x01, "At least one retransmission, optimize for power consumption"),
    (0x02, "At least one retransmission, optimize for link quality"),
    (0xff, "Don't care"),
];

pub static SERVICE_TYPES: ValueStrings<u8> = &[
    (0x00, "No Traffic"),
    (0x01, "Best Effort"),
    (0x02, "Guaranteed"),
];

pub static PHYS: ValueStrings<u8> = &[(0x01, "LE 1M"), (0x02, "LE 2M"), (0x03, "LE Coded")];

pub static PHY_BITS: ValueStrings<u8> = &[(0, "LE 1M"), (1, "LE 2M"), (2, "LE Coded")];

/// Names of the AD structure types.
pub static AD_TYPES: ValueStrings<u8> = &[
    (0x01, "Flags"),
    (0x02, "Incomplete List of 16-bit Service Class UUIDs"),
    (0x03, "Complete List of 16-bit Service Class UUIDs"),
    (0x04, "Incomplete List of 32-bit Service Class UUIDs"),
    (0x05, "Complete List of 32-bit Service Class UUIDs"),
    (0x06, "Incomplete List of 128-bit Service Class UUIDs"),
    (0x07, "Complete List of 128-bit Service Class UUIDs"),
    (0x08, "Shortened Local Name"),
    (0x09, "Complete Local Name"),
    (0x0a, "Tx Power Level"),
    (0x0d, "Class of Device"),
    (0x0e, "Simple Pairing Hash C-192"),
    (0x0f, "Simple Pairing Randomizer R-192"),
    (0x10, "Device ID"),
    (0x11, "Security Manager Out of Band Flags"),
    (0x12, "Peripheral Connection Interval Range"),
    (0x14, "List of 16-bit Service Solicitation UUIDs"),
    (0x15, "List of 128-bit Service Solicitation UUIDs"),
    (0x16, "Service Data - 16-bit UUID"),
    (0x17, "Public Target Address"),
    (0x18, "Random Target Address"),
    (0x19, "Appearance"),
    (0x1a, "Advertising Interval"),
    (0x1b, "LE Bluetooth Device Address"),
    (0x1c, "LE Role"),
    (0x1d, "Simple Pairing Hash C-256"),
    (0x1e, "Simple Pairing Randomizer R-256"),
    (0x20, "Service Data - 32-bit UUID"),
    (0x21, "Service Data - 128-bit UUID"),
    (0x24, "URI"),
    (0x27, "LE Supported Features"),
    (0x30, "Broadcast Name"),
    (0xff, "Manufacturer Specific Data"),
];

static AD_FLAG_BITS: ValueStrings<u8> = &[
    (0, "LE Limited Discoverable Mode"),
    (1, "LE General Discoverable Mode"),
    (2, "BR/EDR Not Supported"),
    (3, "Simultaneous LE and BR/EDR to Same Device Capable (Controller)"),
    (4, "Previously Used"),
];

static LE_ROLES: ValueStrings<u8> = &[
    (0x00, "Only Peripheral Role supported"),
    (0x01, "Only Central Role supported"),
    (0x02, "Peripheral and Central Role supported, Peripheral Role preferred"),
    (0x03, "Peripheral and Central Role supported, Central Role preferred"),
];

static APPEARANCE_CATEGORIES: ValueStrings<u16> = &[
    (0x000, "Unknown"),
    (0x001, "Phone"),
    (0x002, "Computer"),
    (0x003, "Watch"),
    (0x004, "Clock"),
    (0x005, "Display"),
    (0x006, "Remote Control"),
    (0x007, "Eye-glasses"),
    (0x008, "Tag"),
    (0x009, "Keyring"),
    (0x00a, "Media Player"),
    (0x00b, "Barcode Scanner"),
    (0x00c, "Thermometer"),
    (0x00d, "Heart Rate Sensor"),
    (0x00e, "Blood Pressure"),
    (0x00f, "Human Interface Device"),
    (0x010, "Glucose Meter"),
    (0x011, "Running Walking Sensor"),
    (0x012, "Cycling"),
    (0x021, "Audio Sink"),
    (0x022, "Audio Source"),
    (0x031, "Pulse Oximeter"),
    (0x051, "Outdoor Sports Activity"),
];

/// A few well known Bluetooth SIG company identifiers.
pub static COMPANY_IDS: ValueStrings<u16> = &[
    (0x0000, "Ericsson Technology Licensing"),
    (0x0002, "Intel Corp."),
    (0x0006, "Microsoft"),
    (0x000a, "Qualcomm Technologies International, Ltd. (QTIL)"),
    (0x000f, "Broadcom Corporation"),
    (0x001d, "Qualcomm"),
    (0x004c, "Apple, Inc."),
    (0x0075, "Samsung Electronics Co. Ltd."),
    (0x00e0, "Google"),
    (0x0157, "Anhui Huami Information Technology Co., Ltd."),
    (0x038f, "Xiaomi Inc."),
];

static SERVICE_CLASS_BITS: ValueStrings<u8> = &[
    (13, "Limited Discoverable Mode"),
    (14, "LE audio"),
    (16, "Positioning"),
    (17, "Networking"),
    (18, "Rendering"),
    (19, "Capturing"),
    (20, "Object Transfer"),
    (21, "Audio"),
    (22, "Telephony"),
    (23, "Information"),
];

static MAJOR_DEVICE_CLASSES: ValueStrings<u8> = &[
    (0x00, "Miscellaneous"),
    (0x01, "Computer"),
    (0x02, "Phone"),
    (0x03, "LAN/Network Access Point"),
    (0x04, "Audio/Video"),
    (0x05, "Peripheral"),
    (0x06, "Imaging"),
    (0x07, "Wearable"),
    (0x08, "Toy"),
    (0x09, "Health"),
    (0x1f, "Uncategorized"),
];

static MINOR_COMPUTER_CLASSES: ValueStrings<u8> = &[
    (0x00, "Uncategorized"),
    (0x01, "Desktop Workstation"),
    (0x02, "Server-class Computer"),
    (0x03, "Laptop"),
    (0x04, "Handheld PC/PDA"),
    (0x05, "Palm-size PC/PDA"),
    (0x06, "Wearable Computer"),
    (0x07, "Tablet"),
];

static MINOR_PHONE_CLASSES: ValueStrings<u8> = &[
    (0x00, "Uncategorized"),
    (0x01, "Cellular"),
    (0x02, "Cordless"),
    (0x03, "Smartphone"),
    (0x04, "Wired Modem or Voice Gateway"),
    (0x05, "Common ISDN Access"),
];

static MINOR_AUDIO_VIDEO_CLASSES: ValueStrings<u8> = &[
    (0x00, "Uncategorized"),
    (0x01, "Wearable Headset Device"),
    (0x02, "Hands-free Device"),
    (0x04, "Microphone"),
    (0x05, "Loudspeaker"),
    (0x06, "Headphones"),
    (0x07, "Portable Audio"),
    (0x08, "Car audio"),
    (0x09, "Set-top box"),
    (0x0a, "HiFi Audio Device"),
    (0x0b, "VCR"),
    (0x0c, "Video Camera"),
    (0x0d, "Camcorder"),
    (0x0e, "Video Monitor"),
    (0x0f, "Video Display and Loudspeaker"),
    (0x10, "Video Conferencing"),
    (0x12, "Gaming/Toy"),
];

static NO_MINOR_CLASSES: ValueStrings<u8> = &[];

/// Class of Device, a 24 bit little-endian field.
#[derive(Debug, Clone, Serialize)]
pub struct ClassOfDevice {
    #[serde(serialize_with = "serialize_lower_hex_u24")]
    value: u32,
    major_service_classes: Vec<&'static str>,
    major_device_class: Named<u8>,
    minor_device_class: Named<u8>,
    format_type: u8,
}

impl ClassOfDevice {
    pub fn new(value: u32) -> Self {
        let major = ((value >> 8) & 0x1f) as u8;
        let minor = ((value >> 2) & 0x3f) as u8;
        let minor_table = match major {
            0x01 => MINOR_COMPUTER_CLASSES,
            0x02 => MINOR_PHONE_CLASSES,
            0x04 => MINOR_AUDIO_VIDEO_CLASSES,
            _ => NO_MINOR_CLASSES,
        };

        Self {
            value,
            major_service_classes: Bits::new(value, SERVICE_CLASS_BITS).set().to_vec(),
            major_device_class: Named::lookup(major, MAJOR_DEVICE_CLASSES),
            minor_device_class: Named::lookup(minor, minor_table),
            format_type: (value & 0x03) as u8,
        }
    }

    pub fn major_service_classes(&self) -> &[&'static str] {
        &self.major_service_classes
    }

    pub fn major_device_class(&self) -> Named<u8> {
        self.major_device_class
    }

    pub fn minor_device_class(&self) -> Named<u8> {
        self.minor_device_class
    }
}

impl Decode for ClassOfDevice {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self::new(cursor.read_u24()?))
    }
}

/// Extended Flow Specification, as used by AMP logical links.
#[derive(Debug, Clone, Serialize)]
pub struct ExtendedFlowSpec {
    identifier: u8,
    service_type: Named<u8>,
    maximum_sdu_size: u16,
    sdu_inter_arrival_time: u32,
    access_latency: u32,
    flush_timeout: u32,
}

impl Decode for ExtendedFlowSpec {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self {
            identifier: cursor.read_u8()?,
            service_type: read_named(cursor, SERVICE_TYPES)?,
            maximum_sdu_size: cursor.read_u16()?,
            sdu_inter_arrival_time: cursor.read_u32()?,
            access_latency: cursor.read_u32()?,
            flush_timeout: cursor.read_u32()?,
        })
    }
}

/// A channel map: one bit per channel, channel 0 in bit 0 of the first octet.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelMap {
    #[serde(serialize_with = "hex::serde::serialize")]
    map: Vec<u8>,
    used_channels: Vec<u8>,
}

impl ChannelMap {
    /// The 37 LE data channels in 5 octets.
    pub(crate) fn read_le(c: &mut Cursor<'_>) -> Result<Self, Error> {
        Self::read(c, 5, 37)
    }

    /// The 79 BR/EDR channels in 10 octets.
    pub(crate) fn read_bredr(c: &mut Cursor<'_>) -> Result<Self, Error> {
        Self::read(c, 10, 79)
    }

    fn read(c: &mut Cursor<'_>, octets: usize, channels: u8) -> Result<Self, Error> {
        let map = c.read_bytes(octets)?.to_vec();
        let used_channels = (0..channels)
            .filter(|ch| map[*ch as usize / 8] & (1 << (ch % 8)) != 0)
            .collect();
        Ok(Self { map, used_channels })
    }

    pub fn used_channels(&self) -> &[u8] {
        &self.used_channels
    }
}

/// The data of one AD structure.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AdData {
    Flags(Vec<&'static str>),
    Uuid16(#[serde(serialize_with = "serialize_lower_hex_u16_list")] Vec<u16>),
    Uuid32(#[serde(serialize_with = "serialize_lower_hex_u32_list")] Vec<u32>),
    Uuid128(Vec<String>),
    Text(String),
    TxPower(i8),
    ClassOfDevice(ClassOfDevice),
    ConnectionIntervalRange {
        min: u16,
        max: u16,
    },
    ServiceData16 {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        uuid: u16,
        #[serde(serialize_with = "hex::serde::serialize")]
        data: Vec<u8>,
    },
    Appearance {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        value: u16,
        category: Named<u16>,
    },
    AdvertisingInterval(u16),
    LeDeviceAddress {
        address: BdAddr,
        address_type: &'static str,
    },
    LeRole(Named<u8>),
    ManufacturerData {
        company_id: Named<u16>,
        #[serde(serialize_with = "hex::serde::serialize")]
        data: Vec<u8>,
    },
    Bytes(#[serde(serialize_with = "hex::serde::serialize")] Vec<u8>),
}

/// A 128 bit UUID, stored little-endian on the air, in its usual text form.
pub(crate) fn uuid128_string(le: &[u8; 16]) -> String {
    let mut be = *le;
    be.reverse();
    let h = hex::encode(be);
    format!(
        "{}-{}-{}-{}-{}",
        &h[0..8],
        &h[8..12],
        &h[12..16],
        &h[16..20],
        &h[20..32]
    )
}

impl AdData {
    fn decode(ad_type: u8, c: &mut Cursor<'_>) -> Result<Self, Error> {
        let data = match ad_type {
            0x01 => AdData::Flags(read_bits8(c, AD_FLAG_BITS)?.set().to_vec()),
            0x02 | 0x03 | 0x14 => AdData::Uuid16(read_to_end(c, |c| c.read_u16())?),
            0x04 | 0x05 => AdData::Uuid32(read_to_end(c, |c| c.read_u32())?),
            0x06 | 0x07 | 0x15 => AdData::Uuid128(read_to_end(c, |c| {
                Ok(uuid128_string(&c.read_array()?))
            })?),
            0x08 | 0x09 | 0x30 => AdData::Text(String::from_utf8_lossy(c.rest()).into_owned()),
            0x0a => AdData::TxPower(c.read_i8()?),
            0x0d => AdData::ClassOfDevice(c.read()?),
            0x12 => AdData::ConnectionIntervalRange {
                min: c.read_u16()?,
                max: c.read_u16()?,
            },
            0x16 => AdData::ServiceData16 {
                uuid: c.read_u16()?,
                data: c.rest().to_vec(),
            },
            0x19 => {
                let value = c.read_u16()?;
                AdData::Appearance {
                    value,
                    category: Named::lookup(value >> 6, APPEARANCE_CATEGORIES),
                }
            }
            0x1a => AdData::AdvertisingInterval(c.read_u16()?),
            0x1b => AdData::LeDeviceAddress {
                address: c.read_bd_addr()?,
                address_type: if c.read_u8()? & 0x01 == 0 {
                    "Public"
                } else {
                    "Random"
                },
            },
            0x1c => AdData::LeRole(read_named(c, LE_ROLES)?),
            0xff => AdData::ManufacturerData {
                company_id: Named::lookup(c.read_u16()?, COMPANY_IDS),
                data: c.rest().to_vec(),
            },
            _ => AdData::Bytes(c.rest().to_vec()),
        };

        Ok(data)
    }
}

/// An AD structure: `length, type, data[length - 1]`.
#[derive(Debug, Clone, Serialize)]
pub struct AdStructure {
    length: u8,
    ad_type: Named<u8>,
    data: AdData,
}

impl AdStructure {
    pub fn ad_type(&self) -> Named<u8> {
        self.ad_type
    }

    pub fn data(&self) -> &AdData {
        &self.data
    }
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

/// Extended inquiry response or advertising data.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AdvertisingData {
    Structures {
        structures: Vec<AdStructure>,
        /// Octets after the significant part.
        #[serde(skip_serializing_if = "is_zero")]
        padding: usize,
    },
    Raw(#[serde(serialize_with = "hex::serde::serialize")] Vec<u8>),
}

impl AdvertisingData {
    pub fn structures(&self) -> &[AdStructure] {
        match self {
            AdvertisingData::Structures { structures, .. } => structures,
            AdvertisingData::Raw(_) => &[],
        }
    }
}

/// Reads `len` octets of AD structures.
///
/// A zero length octet ends the significant part; whatever follows is padding. AD data that does
/// not match the layout of its type is kept as bytes.
pub(crate) fn read_advertising_data(
    c: &mut Cursor<'_>,
    len: usize,
) -> Result<AdvertisingData, Error> {
    let mut sub = c.sub_cursor(len)?;

    if !config::get().decode_ad_structures {
        return Ok(AdvertisingData::Raw(sub.rest().to_vec()));
    }

    let mut structures = Vec::new();
    let mut padding = 0;
    while !sub.is_empty() {
        let length = sub.read_u8()?;
        if length == 0 {
            padding = 1 + sub.rest().len();
            break;
        }
        let ad_type = sub.read_u8()?;
        let data = sub.read_bytes(length as usize - 1)?;

        let mut data_cursor = Cursor::new(data);
        let data = match AdData::decode(ad_type, &mut data_cursor) {
            Ok(decoded) if data_cursor.is_empty() => decoded,
            _ => {
                #[cfg(feature = "logging")]
                log::debug!("AD type 0x{:02x}: malformed data kept as bytes", ad_type);

                AdData::Bytes(data.to_vec())
            }
        };

        structures.push(AdStructure {
            length,
            ad_type: Named::lookup(ad_type, AD_TYPES),
            data,
        });
    }

    Ok(AdvertisingData::Structures {
        structures,
        padding,
    })
}

/// A link key or similar 128 bit value, shown as hex.
pub(crate) fn serialize_key<S>(key: &[u8; 16], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&hex::encode(key))
}

/// Coding format: codec ID, company ID and vendor defined codec ID.
#[derive(Debug, Clone, Serialize)]
pub struct CodingFormat {
    coding_format: Named<u8>,
    #[serde(serialize_with = "serialize_lower_hex_u16")]
    company_id: u16,
    #[serde(serialize_with = "serialize_lower_hex_u16")]
    vendor_codec_id: u16,
}

pub static CODING_FORMATS: ValueStrings<u8> = &[
    (0x00, "u-law log"),
    (0x01, "A-law log"),
    (0x02, "CVSD"),
    (0x03, "Transparent"),
    (0x04, "Linear PCM"),
    (0x05, "mSBC"),
    (0x06, "LC3"),
    (0x07, "G.729A"),
    (0xff, "Vendor Specific"),
];

impl Decode for CodingFormat {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self {
            coding_format: read_named(cursor, CODING_FORMATS)?,
            company_id: cursor.read_u16()?,
            vendor_codec_id: cursor.read_u16()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(h: &str) -> Vec<u8> {
        hex::decode(h).unwrap()
    }

    #[test]
    fn class_of_device_smartphone() {
        // Networking, Capturing, Object Transfer, Telephony; Phone / Smartphone
        let bytes = cursor("0c025a");
        let cod: ClassOfDevice = Cursor::new(&bytes).read().unwrap();
        assert_eq!(
            cod.major_service_classes(),
            &["Networking", "Capturing", "Object Transfer", "Telephony"]
        );
        assert_eq!(cod.major_device_class().name(), "Phone");
        assert_eq!(cod.minor_device_class().name(), "Smartphone");
    }

    #[test]
    fn le_channel_map_used_channels() {
        let bytes = cursor("0300000010");
        let map = ChannelMap::read_le(&mut Cursor::new(&bytes)).unwrap();
        assert_eq!(map.used_channels(), &[0, 1, 36]);
    }

    #[test]
    fn bredr_channel_map_ignores_reserved_bit() {
        let bytes = cursor("00000000000000000080");
        let map = ChannelMap::read_bredr(&mut Cursor::new(&bytes)).unwrap();
        assert!(map.used_channels().is_empty());
    }

    #[test]
    fn ad_structures_with_padding() {
        let bytes = cursor(concat!(
            "020106",   // flags
            "03030d18", // complete 16 bit UUIDs: Heart Rate
            "050968696369", // complete local name
        ));
        let mut padded = bytes.clone();
        padded.extend_from_slice(&[0, 0, 0]);

        let data = read_advertising_data(&mut Cursor::new(&padded), padded.len()).unwrap();
        let structures = data.structures();
        assert_eq!(structures.len(), 3);

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["padding"], 3);
        assert_eq!(json["structures"][0]["data"][0], "LE General Discoverable Mode");
        assert_eq!(json["structures"][1]["data"][0], "0x180d");
        assert_eq!(json["structures"][2]["data"], "hici");
    }

    #[test]
    fn ad_structures_with_typed_fields() {
        let bytes = cursor(concat!(
            "0319c100",           // appearance: sports watch
            "021c02",             // LE role
            "081b66554433221101", // LE device address, random
            "05160d18aabb",       // service data for 0x180d
            "05120600800c",       // connection interval 6 to 3200
            "040d0c025a",         // class of device
        ));
        let data = read_advertising_data(&mut Cursor::new(&bytes), bytes.len()).unwrap();
        assert_eq!(data.structures().len(), 6);

        let json = serde_json::to_value(&data).unwrap();
        let s = &json["structures"];
        assert_eq!(s[0]["ad_type"], "Appearance (0x19)");
        assert_eq!(s[0]["data"]["value"], "0x00c1");
        assert_eq!(s[0]["data"]["category"], "Watch (0x0003)");
        assert_eq!(
            s[1]["data"],
            "Peripheral and Central Role supported, Peripheral Role preferred (0x02)"
        );
        assert_eq!(s[2]["data"]["address"], "11:22:33:44:55:66");
        assert_eq!(s[2]["data"]["address_type"], "Random");
        assert_eq!(s[3]["data"]["uuid"], "0x180d");
        assert_eq!(s[3]["data"]["data"], "aabb");
        assert_eq!(s[4]["data"]["min"], 6);
        assert_eq!(s[4]["data"]["max"], 3200);
        assert_eq!(s[5]["data"]["value"], "0x5a020c");
        assert_eq!(s[5]["data"]["major_device_class"], "Phone (0x02)");
        assert_eq!(s[5]["data"]["minor_device_class"], "Smartphone (0x03)");
    }

    #[test]
    fn ad_structure_overrunning_its_field_fails() {
        let bytes = cursor("05ff4c00");
        let res = read_advertising_data(&mut Cursor::new(&bytes), bytes.len());
        assert!(matches!(res, Err(Error::TooShort { .. })));
    }

    #[test]
    fn malformed_ad_data_kept_as_bytes() {
        // three octets of 16 bit UUIDs
        let bytes = cursor("0403aabbcc");
        let data = read_advertising_data(&mut Cursor::new(&bytes), bytes.len()).unwrap();
        match data.structures()[0].data() {
            AdData::Bytes(b) => assert_eq!(b, &vec![0xaa, 0xbb, 0xcc]),
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn manufacturer_data_and_uuid128() {
        let bytes = cursor(concat!(
            "05ff4c000215",
            "1107fb349b5f80000080001000000f180000",
        ));
        let data = read_advertising_data(&mut Cursor::new(&bytes), bytes.len()).unwrap();
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(
            json["structures"][0]["data"]["company_id"],
            "Apple, Inc. (0x004c)"
        );
        assert_eq!(json["structures"][0]["data"]["data"], "0215");
        assert_eq!(
            json["structures"][1]["data"][0],
            "0000180f-0000-1000-8000-00805f9b34fb"
        );
    }
}
