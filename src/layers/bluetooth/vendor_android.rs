//! Android vendor HCI commands
//!
//! The Android Bluetooth stack defines its LE extensions (multi advertising, batch scan, the
//! advertising packet content filter, ...) as OGF 0x3F commands. Most of them start with a
//! sub-opcode that selects the layout of the rest of the parameters.

use serde::Serialize;

use crate::cursor::{Cursor, Decode};
use crate::errors::Error;
use crate::layers::bluetooth::common::{
    read_advertising_data, read_bits16, read_bits8, read_named, uuid128_string, AdvertisingData,
    AD_TYPES, ENABLE,
};
use crate::layers::bluetooth::hci_cmd::le::{
    ADVERTISING_CHANNEL_BITS, ADVERTISING_FILTER_POLICIES, ADVERTISING_TYPES, OWN_ADDRESS_TYPES,
    PEER_ADDRESS_TYPES, SCANNING_FILTER_POLICIES, SCAN_TYPES,
};
use crate::layers::bluetooth::hci_cmd::parameters::{read, read_raw, CommandParameters};
use crate::layers::bluetooth::hci_cmd::{self, finish_parameters};
use crate::types::hex::serialize_lower_hex_u16;
use crate::types::{BdAddr, Bits, Named, ValueStrings};
use crate::Layer;

/// Bluetooth SIG company identifier of Google.
pub const COMPANY_ID_GOOGLE: u16 = 0x00e0;

pub const OCF_FIRST: u16 = 0x150;
pub const OCF_LAST: u16 = 0x1ff;

pub const LE_GET_VENDOR_CAPABILITIES: u16 = 0x153;
pub const LE_MULTI_ADVERTISING: u16 = 0x154;
pub const LE_BATCH_SCAN: u16 = 0x156;
pub const LE_APCF: u16 = 0x157;
pub const LE_GET_CONTROLLER_ACTIVITY_ENERGY_INFO: u16 = 0x158;
pub const LE_EXTENDED_SCAN_PARAMS: u16 = 0x159;
pub const GET_CONTROLLER_DEBUG_INFO: u16 = 0x15a;
pub const A2DP_HARDWARE_OFFLOAD: u16 = 0x15d;
pub const BLUETOOTH_QUALITY_REPORT: u16 = 0x15e;
pub const DYNAMIC_AUDIO_BUFFER: u16 = 0x15f;

static COMMAND_NAMES: ValueStrings<u16> = &[
    (LE_GET_VENDOR_CAPABILITIES, "LE Get Vendor Capabilities"),
    (LE_MULTI_ADVERTISING, "LE Multi Advertising"),
    (LE_BATCH_SCAN, "LE Batch Scan"),
    (LE_APCF, "LE Advertising Packet Content Filter"),
    (LE_GET_CONTROLLER_ACTIVITY_ENERGY_INFO, "LE Get Controller Activity Energy Info"),
    (LE_EXTENDED_SCAN_PARAMS, "LE Extended Scan Params"),
    (GET_CONTROLLER_DEBUG_INFO, "Get Controller Debug Info"),
    (A2DP_HARDWARE_OFFLOAD, "A2DP Hardware Offload"),
    (BLUETOOTH_QUALITY_REPORT, "Bluetooth Quality Report"),
    (DYNAMIC_AUDIO_BUFFER, "Dynamic Audio Buffer"),
];

static MULTI_ADVERTISING_OPCODES: ValueStrings<u8> = &[
    (0x01, "Set Advertising Parameters"),
    (0x02, "Set Advertising Data"),
    (0x03, "Set Scan Response Data"),
    (0x04, "Set Random Address"),
    (0x05, "Set Advertising Enable"),
];

static BATCH_SCAN_OPCODES: ValueStrings<u8> = &[
    (0x01, "Enable Customer Specific Feature"),
    (0x02, "Set Storage Parameters"),
    (0x03, "Set Scan Parameters"),
    (0x04, "Read Results Parameters"),
];

static APCF_OPCODES: ValueStrings<u8> = &[
    (0x00, "Enable"),
    (0x01, "Set Filtering Parameters"),
    (0x02, "Broadcaster Address"),
    (0x03, "Service UUID"),
    (0x04, "Service Solicitation UUID"),
    (0x05, "Local Name"),
    (0x06, "Manufacturer Data"),
    (0x07, "Service Data"),
    (0x09, "AD Type"),
];

static A2DP_OFFLOAD_OPCODES: ValueStrings<u8> = &[
    (0x01, "Start A2DP Offload"),
    (0x02, "Stop A2DP Offload"),
];

static DYNAMIC_AUDIO_BUFFER_OPCODES: ValueStrings<u8> = &[
    (0x01, "Get Audio Buffer Time Capability"),
    (0x02, "Set Audio Buffer Time"),
];

static BATCH_SCAN_MODES: ValueStrings<u8> = &[
    (0x00, "Disable"),
    (0x01, "Truncated"),
    (0x02, "Full"),
    (0x03, "Truncated and Full"),
];

static BATCH_SCAN_DISCARD_RULES: ValueStrings<u8> = &[
    (0x00, "Discard oldest advertisement"),
    (0x01, "Discard advertisement with weakest RSSI"),
];

static APCF_ACTIONS: ValueStrings<u8> = &[(0x00, "Add"), (0x01, "Delete"), (0x02, "Clear")];

const APCF_ACTION_ADD: u8 = 0x00;

static APCF_FEATURE_BITS: ValueStrings<u8> = &[
    (0, "Broadcaster Address"),
    (1, "Service Data Change"),
    (2, "Service UUID"),
    (3, "Service Solicitation UUID"),
    (4, "Local Name"),
    (5, "Manufacturer Data"),
    (6, "Service Data"),
    (7, "Transport Discovery Data"),
    (8, "AD Type"),
];

static APCF_FILTER_LOGIC_TYPES: ValueStrings<u8> = &[(0x00, "OR"), (0x01, "AND")];

static APCF_DELIVERY_MODES: ValueStrings<u8> = &[
    (0x00, "Immediate"),
    (0x01, "On Found"),
    (0x02, "Batched"),
];

static APCF_ADDRESS_TYPES: ValueStrings<u8> = &[
    (0x00, "Public"),
    (0x01, "Random"),
    (0x02, "Not Applicable"),
];

static A2DP_CODEC_TYPES: ValueStrings<u32> = &[
    (0x0000_0001, "SBC"),
    (0x0000_0002, "AAC"),
    (0x0000_0004, "aptX"),
    (0x0000_0008, "aptX HD"),
    (0x0000_0010, "LDAC"),
];

const CODEC_SBC: u32 = 0x01;
const CODEC_AAC: u32 = 0x02;
const CODEC_LDAC: u32 = 0x10;

static A2DP_SAMPLING_FREQUENCIES: ValueStrings<u32> = &[
    (0x0000_0001, "44100 Hz"),
    (0x0000_0002, "48000 Hz"),
    (0x0000_0004, "88200 Hz"),
    (0x0000_0008, "96000 Hz"),
    (0x0000_0010, "176400 Hz"),
    (0x0000_0020, "192000 Hz"),
];

static A2DP_BITS_PER_SAMPLE: ValueStrings<u8> = &[
    (0x01, "16 bits"),
    (0x02, "24 bits"),
    (0x04, "32 bits"),
];

static A2DP_CHANNEL_MODES: ValueStrings<u8> = &[(0x01, "Mono"), (0x02, "Stereo")];

static SBC_SAMPLING_FREQUENCY_BITS: ValueStrings<u8> = &[
    (7, "16000 Hz"),
    (6, "32000 Hz"),
    (5, "44100 Hz"),
    (4, "48000 Hz"),
];

static SBC_CHANNEL_MODE_BITS: ValueStrings<u8> = &[
    (3, "Mono"),
    (2, "Dual Channel"),
    (1, "Stereo"),
    (0, "Joint Stereo"),
];

static SBC_BLOCK_LENGTH_BITS: ValueStrings<u8> = &[(7, "4"), (6, "8"), (5, "12"), (4, "16")];

static SBC_SUBBAND_BITS: ValueStrings<u8> = &[(3, "4"), (2, "8")];

static SBC_ALLOCATION_BITS: ValueStrings<u8> = &[(1, "SNR"), (0, "Loudness")];

static AAC_OBJECT_TYPE_BITS: ValueStrings<u8> = &[
    (7, "MPEG-2 AAC LC"),
    (6, "MPEG-4 AAC LC"),
    (5, "MPEG-4 AAC LTP"),
    (4, "MPEG-4 AAC Scalable"),
];

static AAC_SAMPLING_FREQUENCY_BITS: ValueStrings<u8> = &[
    (15, "8000 Hz"),
    (14, "11025 Hz"),
    (13, "12000 Hz"),
    (12, "16000 Hz"),
    (11, "22050 Hz"),
    (10, "24000 Hz"),
    (9, "32000 Hz"),
    (8, "44100 Hz"),
    (7, "48000 Hz"),
    (6, "64000 Hz"),
    (5, "88200 Hz"),
    (4, "96000 Hz"),
];

static AAC_CHANNEL_BITS: ValueStrings<u8> = &[(3, "1 channel"), (2, "2 channels")];

static LDAC_BITRATE_INDICES: ValueStrings<u8> = &[
    (0x00, "High"),
    (0x01, "Mid"),
    (0x02, "Low"),
    (0x7f, "Adaptive Bit Rate"),
];

static LDAC_CHANNEL_MODE_BITS: ValueStrings<u8> = &[
    (2, "Mono"),
    (1, "Dual Channel"),
    (0, "Stereo"),
];

static BQR_ACTIONS: ValueStrings<u8> = &[(0x00, "Add"), (0x01, "Delete"), (0x02, "Clear")];

static BQR_EVENT_BITS: ValueStrings<u8> = &[
    (0, "Monitor Mode"),
    (1, "Approaching LSTO"),
    (2, "A2DP Audio Choppy"),
    (3, "(e)SCO Voice Choppy"),
    (4, "Root Inflammation"),
    (5, "Energy Monitoring"),
    (6, "LE Audio Choppy"),
    (7, "Connect Fail"),
    (15, "Vendor Specific Quality"),
    (16, "LMP/LL Message Trace"),
    (17, "Bluetooth Multi-profile/Coex Scheduling Trace"),
    (18, "Enter Bluetooth Quality Report Debug Mode"),
];

/// Size of the codec information block of A2DP Hardware Offload Start.
const CODEC_INFORMATION_LENGTH: usize = 32;

/// Length of the multi advertising data fields.
const MULTI_ADVERTISING_DATA_LENGTH: usize = 31;

// Register ourselves as an HCI vendor
pub(crate) fn register_defaults() -> Result<(), Error> {
    hci_cmd::register_vendor(COMPANY_ID_GOOGLE, OCF_FIRST..=OCF_LAST, AndroidCommand::creator)
}

hci_parameters! {
    MultiAdvertisingParameters(c) {
        advertising_interval_min: u16 = c.read_u16()?,
        advertising_interval_max: u16 = c.read_u16()?,
        advertising_type: Named<u8> = read_named(c, ADVERTISING_TYPES)?,
        own_address_type: Named<u8> = read_named(c, OWN_ADDRESS_TYPES)?,
        own_address: BdAddr = c.read_bd_addr()?,
        peer_address_type: Named<u8> = read_named(c, PEER_ADDRESS_TYPES)?,
        peer_address: BdAddr = c.read_bd_addr()?,
        advertising_channel_map: Bits<u8> = read_bits8(c, ADVERTISING_CHANNEL_BITS)?,
        advertising_filter_policy: Named<u8> = read_named(c, ADVERTISING_FILTER_POLICIES)?,
        advertising_instance: u8 = c.read_u8()?,
        tx_power: i8 = c.read_i8()?,
    }

    MultiAdvertisingData(c) {
        data_length: u8 = c.read_u8()?,
        data: AdvertisingData = read_advertising_data(c, MULTI_ADVERTISING_DATA_LENGTH)?,
        advertising_instance: u8 = c.read_u8()?,
    }

    MultiAdvertisingRandomAddress(c) {
        random_address: BdAddr = c.read_bd_addr()?,
        advertising_instance: u8 = c.read_u8()?,
    }

    MultiAdvertisingEnable(c) {
        enable: Named<u8> = read_named(c, ENABLE)?,
        advertising_instance: u8 = c.read_u8()?,
    }

    Enable(c) {
        enable: Named<u8> = read_named(c, ENABLE)?,
    }

    BatchScanStorageParameters(c) {
        max_full_reports_percent: u8 = c.read_u8()?,
        max_truncated_reports_percent: u8 = c.read_u8()?,
        notify_threshold_percent: u8 = c.read_u8()?,
    }

    BatchScanParameters(c) {
        mode: Named<u8> = read_named(c, BATCH_SCAN_MODES)?,
        duty_cycle_scan_window: u32 = c.read_u32()?,
        duty_cycle_scan_interval: u32 = c.read_u32()?,
        own_address_type: Named<u8> = read_named(c, OWN_ADDRESS_TYPES)?,
        discard_rule: Named<u8> = read_named(c, BATCH_SCAN_DISCARD_RULES)?,
    }

    BatchScanReadResults(c) {
        mode: Named<u8> = read_named(c, BATCH_SCAN_MODES)?,
    }

    /// Scan interval and window in units of 0.625 ms.
    ExtendedScanParams(c) {
        scan_type: Named<u8> = read_named(c, SCAN_TYPES)?,
        scan_interval: u32 = c.read_u32()?,
        scan_window: u32 = c.read_u32()?,
        own_address_type: Named<u8> = read_named(c, OWN_ADDRESS_TYPES)?,
        scanning_filter_policy: Named<u8> = read_named(c, SCANNING_FILTER_POLICIES)?,
    }

    SetAudioBufferTime(c) {
        buffer_time_ms: u16 = c.read_u16()?,
    }

    ApcfFilteringParameters(c) {
        feature_selection: Bits<u16> = read_bits16(c, APCF_FEATURE_BITS)?,
        list_logic_type: Bits<u16> = read_bits16(c, APCF_FEATURE_BITS)?,
        filter_logic_type: Named<u8> = read_named(c, APCF_FILTER_LOGIC_TYPES)?,
        rssi_high_threshold: i8 = c.read_i8()?,
        delivery_mode: Named<u8> = read_named(c, APCF_DELIVERY_MODES)?,
        onfound_timeout: u16 = c.read_u16()?,
        onfound_timeout_count: u8 = c.read_u8()?,
        rssi_low_threshold: i8 = c.read_i8()?,
        onlost_timeout: u16 = c.read_u16()?,
        num_of_tracking_entries: u16 = c.read_u16()?,
    }

    ApcfBroadcasterAddress(c) {
        address: BdAddr = c.read_bd_addr()?,
        address_type: Named<u8> = read_named(c, APCF_ADDRESS_TYPES)?,
    }
}

/// A filter condition of the advertising packet content filter.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApcfCondition {
    Parameters(ApcfFilteringParameters),
    BroadcasterAddress(ApcfBroadcasterAddress),
    Uuid {
        uuid: String,
        uuid_mask: String,
    },
    LocalName {
        local_name: String,
    },
    Pattern {
        #[serde(serialize_with = "hex::serde::serialize")]
        data: Vec<u8>,
        #[serde(serialize_with = "hex::serde::serialize")]
        mask: Vec<u8>,
    },
    AdType {
        ad_type: Named<u8>,
        length: u8,
        #[serde(serialize_with = "hex::serde::serialize")]
        data: Vec<u8>,
        #[serde(serialize_with = "hex::serde::serialize")]
        mask: Vec<u8>,
    },
}

fn uuid_string(bytes: &[u8]) -> Result<String, Error> {
    let mut c = Cursor::new(bytes);
    match bytes.len() {
        2 => Ok(format!("0x{:04x}", c.read_u16()?)),
        4 => Ok(format!("0x{:08x}", c.read_u32()?)),
        16 => Ok(uuid128_string(&c.read_array()?)),
        n => Err(Error::ParseError(format!("APCF UUID of {} bytes", n))),
    }
}

/// Splits the rest of the parameters into a value and a mask of the same length.
fn read_value_and_mask<'a>(c: &mut Cursor<'a>) -> Result<(&'a [u8], &'a [u8]), Error> {
    let half = c.remaining() / 2;
    let value = c.read_bytes(half)?;
    let mask = c.read_bytes(half)?;
    Ok((value, mask))
}

/// One advertising packet content filter sub-command.
///
/// Every action names a filter index; only Add carries the filter condition.
#[derive(Debug, Serialize)]
pub struct ApcfCommand {
    action: Named<u8>,
    filter_index: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<ApcfCondition>,
}

impl ApcfCommand {
    fn read(c: &mut Cursor<'_>, sub_opcode: u8) -> Result<Self, Error> {
        let action = read_named(c, APCF_ACTIONS)?;
        let filter_index = c.read_u8()?;

        let condition = if action.value() != APCF_ACTION_ADD {
            None
        } else {
            let condition = match sub_opcode {
                0x01 => ApcfCondition::Parameters(c.read()?),
                0x02 => ApcfCondition::BroadcasterAddress(c.read()?),
                0x03 | 0x04 => {
                    let (uuid, mask) = read_value_and_mask(c)?;
                    ApcfCondition::Uuid {
                        uuid: uuid_string(uuid)?,
                        uuid_mask: uuid_string(mask)?,
                    }
                }
                0x05 => ApcfCondition::LocalName {
                    local_name: String::from_utf8_lossy(c.rest()).into_owned(),
                },
                0x06 | 0x07 => {
                    let (data, mask) = read_value_and_mask(c)?;
                    ApcfCondition::Pattern {
                        data: data.to_vec(),
                        mask: mask.to_vec(),
                    }
                }
                0x09 => {
                    let ad_type = read_named(c, AD_TYPES)?;
                    let length = c.read_u8()?;
                    ApcfCondition::AdType {
                        ad_type,
                        length,
                        data: c.read_bytes(length as usize)?.to_vec(),
                        mask: c.read_bytes(length as usize)?.to_vec(),
                    }
                }
                _ => return Err(Error::ParseError(format!("APCF sub-opcode 0x{:02x}", sub_opcode))),
            };
            Some(condition)
        };

        Ok(Self {
            action,
            filter_index,
            condition,
        })
    }
}

/// SBC codec information elements.
#[derive(Debug, Serialize)]
pub struct SbcInformation {
    sampling_frequency: Bits<u8>,
    channel_mode: Bits<u8>,
    block_length: Bits<u8>,
    subbands: Bits<u8>,
    allocation_method: Bits<u8>,
    min_bitpool: u8,
    max_bitpool: u8,
}

impl Decode for SbcInformation {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let frequency_and_mode = c.read_u8()?;
        let block_and_bands = c.read_u8()?;
        Ok(Self {
            sampling_frequency: Bits::new(frequency_and_mode & 0xf0, SBC_SAMPLING_FREQUENCY_BITS),
            channel_mode: Bits::new(frequency_and_mode & 0x0f, SBC_CHANNEL_MODE_BITS),
            block_length: Bits::new(block_and_bands & 0xf0, SBC_BLOCK_LENGTH_BITS),
            subbands: Bits::new(block_and_bands & 0x0c, SBC_SUBBAND_BITS),
            allocation_method: Bits::new(block_and_bands & 0x03, SBC_ALLOCATION_BITS),
            min_bitpool: c.read_u8()?,
            max_bitpool: c.read_u8()?,
        })
    }
}

/// AAC codec information elements.
///
/// ```text
/// | object type (1) | sampling frequency (12 bits), channels (2 bits), rfa | VBR (1 bit), bit rate (23 bits) |
/// ```
#[derive(Debug, Serialize)]
pub struct AacInformation {
    object_type: Bits<u8>,
    sampling_frequency: Bits<u16>,
    channels: Bits<u8>,
    variable_bit_rate: bool,
    bit_rate: u32,
}

impl Decode for AacInformation {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let object_type = read_bits8(c, AAC_OBJECT_TYPE_BITS)?;
        let frequency_and_channels = c.read_u16_be()?;
        let [hi, mid, lo] = c.read_array::<3>()?;
        let rate = u32::from_be_bytes([0, hi, mid, lo]);
        Ok(Self {
            object_type,
            sampling_frequency: Bits::new(
                frequency_and_channels & 0xfff0,
                AAC_SAMPLING_FREQUENCY_BITS,
            ),
            channels: Bits::new((frequency_and_channels & 0x000c) as u8, AAC_CHANNEL_BITS),
            variable_bit_rate: rate & 0x0080_0000 != 0,
            bit_rate: rate & 0x007f_ffff,
        })
    }
}

hci_parameters! {
    LdacInformation(c) {
        #[serde(serialize_with = "crate::types::hex::serialize_lower_hex_u32")]
        vendor_id: u32 = c.read_u32()?,
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        codec_id: u16 = c.read_u16()?,
        bitrate_index: Named<u8> = read_named(c, LDAC_BITRATE_INDICES)?,
        channel_mode: Bits<u8> = read_bits8(c, LDAC_CHANNEL_MODE_BITS)?,
    }
}

/// Codec information, decoded for the codecs whose layout is known.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CodecInformation {
    Sbc(SbcInformation),
    Aac(AacInformation),
    Ldac(LdacInformation),
    Raw(#[serde(serialize_with = "hex::serde::serialize")] Vec<u8>),
}

impl CodecInformation {
    /// Reads the fixed size block; the octets after the decoded elements are reserved.
    fn read(c: &mut Cursor<'_>, codec_type: u32) -> Result<Self, Error> {
        let mut block = c.sub_cursor(CODEC_INFORMATION_LENGTH)?;
        let info = match codec_type {
            CODEC_SBC => CodecInformation::Sbc(block.read()?),
            CODEC_AAC => CodecInformation::Aac(block.read()?),
            CODEC_LDAC => CodecInformation::Ldac(block.read()?),
            _ => CodecInformation::Raw(block.rest().to_vec()),
        };
        Ok(info)
    }
}

#[derive(Debug, Serialize)]
pub struct A2dpOffloadStart {
    codec_type: Named<u32>,
    max_latency: u16,
    scms_t_enable: Named<u8>,
    scms_t_header: u8,
    sampling_frequency: Named<u32>,
    bits_per_sample: Named<u8>,
    channel_mode: Named<u8>,
    encoded_audio_bitrate: u32,
    #[serde(serialize_with = "serialize_lower_hex_u16")]
    connection_handle: u16,
    #[serde(serialize_with = "serialize_lower_hex_u16")]
    l2cap_cid: u16,
    l2cap_mtu: u16,
    codec_information: CodecInformation,
}

impl Decode for A2dpOffloadStart {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let codec_type = Named::lookup(c.read_u32()?, A2DP_CODEC_TYPES);
        Ok(Self {
            codec_type,
            max_latency: c.read_u16()?,
            scms_t_enable: read_named(c, ENABLE)?,
            scms_t_header: c.read_u8()?,
            sampling_frequency: Named::lookup(c.read_u32()?, A2DP_SAMPLING_FREQUENCIES),
            bits_per_sample: read_named(c, A2DP_BITS_PER_SAMPLE)?,
            channel_mode: read_named(c, A2DP_CHANNEL_MODES)?,
            encoded_audio_bitrate: c.read_u32()?,
            connection_handle: c.read_u16()? & 0x0fff,
            l2cap_cid: c.read_u16()?,
            l2cap_mtu: c.read_u16()?,
            codec_information: CodecInformation::read(c, codec_type.value())?,
        })
    }
}

/// Bluetooth Quality Report configuration. The vendor fields are only present in newer
/// versions of the command.
#[derive(Debug, Serialize)]
pub struct QualityReport {
    action: Named<u8>,
    report_event_mask: Bits<u32>,
    minimum_report_interval_ms: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    vendor_quality_event_mask: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vendor_trace_event_mask: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report_interval_multiple: Option<u32>,
}

fn read_optional_u32(c: &mut Cursor<'_>) -> Result<Option<u32>, Error> {
    if c.is_empty() {
        Ok(None)
    } else {
        c.read_u32().map(Some)
    }
}

impl Decode for QualityReport {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self {
            action: read_named(c, BQR_ACTIONS)?,
            report_event_mask: Bits::new(c.read_u32()?, BQR_EVENT_BITS),
            minimum_report_interval_ms: c.read_u16()?,
            vendor_quality_event_mask: read_optional_u32(c)?,
            vendor_trace_event_mask: read_optional_u32(c)?,
            report_interval_multiple: read_optional_u32(c)?,
        })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct AndroidCommand {
    #[serde(skip)]
    param_length: u8,
    #[serde(serialize_with = "serialize_lower_hex_u16")]
    ocf: u16,
    command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sub_opcode: Option<Named<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<Box<dyn CommandParameters>>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "hex::serde::serialize"
    )]
    unparsed: Vec<u8>,
}

impl AndroidCommand {
    pub(crate) fn creator(ocf: u16, param_length: u8) -> Box<dyn Layer + Send> {
        Box::new(AndroidCommand {
            ocf,
            param_length,
            ..Default::default()
        })
    }

    fn read_sub_opcode(
        &mut self,
        c: &mut Cursor<'_>,
        table: ValueStrings<u8>,
    ) -> Result<u8, Error> {
        let sub_opcode = read_named(c, table)?;
        self.sub_opcode = Some(sub_opcode);
        Ok(sub_opcode.value())
    }

    fn decode_parameters(
        &mut self,
        c: &mut Cursor<'_>,
    ) -> Result<Option<Box<dyn CommandParameters>>, Error> {
        let params = match self.ocf {
            LE_GET_VENDOR_CAPABILITIES
            | LE_GET_CONTROLLER_ACTIVITY_ENERGY_INFO
            | GET_CONTROLLER_DEBUG_INFO => return Ok(None),
            LE_MULTI_ADVERTISING => match self.read_sub_opcode(c, MULTI_ADVERTISING_OPCODES)? {
                0x01 => read::<MultiAdvertisingParameters>(c)?,
                0x02 | 0x03 => read::<MultiAdvertisingData>(c)?,
                0x04 => read::<MultiAdvertisingRandomAddress>(c)?,
                0x05 => read::<MultiAdvertisingEnable>(c)?,
                _ => return Ok(read_raw(c)),
            },
            LE_BATCH_SCAN => match self.read_sub_opcode(c, BATCH_SCAN_OPCODES)? {
                0x01 => read::<Enable>(c)?,
                0x02 => read::<BatchScanStorageParameters>(c)?,
                0x03 => read::<BatchScanParameters>(c)?,
                0x04 => read::<BatchScanReadResults>(c)?,
                _ => return Ok(read_raw(c)),
            },
            LE_APCF => match self.read_sub_opcode(c, APCF_OPCODES)? {
                0x00 => read::<Enable>(c)?,
                sub @ (0x01..=0x07 | 0x09) => {
                    Box::new(ApcfCommand::read(c, sub)?) as Box<dyn CommandParameters>
                }
                _ => return Ok(read_raw(c)),
            },
            LE_EXTENDED_SCAN_PARAMS => read::<ExtendedScanParams>(c)?,
            A2DP_HARDWARE_OFFLOAD => match self.read_sub_opcode(c, A2DP_OFFLOAD_OPCODES)? {
                0x01 => read::<A2dpOffloadStart>(c)?,
                0x02 => return Ok(None),
                _ => return Ok(read_raw(c)),
            },
            BLUETOOTH_QUALITY_REPORT => read::<QualityReport>(c)?,
            DYNAMIC_AUDIO_BUFFER => match self.read_sub_opcode(c, DYNAMIC_AUDIO_BUFFER_OPCODES)? {
                0x01 => return Ok(None),
                0x02 => read::<SetAudioBufferTime>(c)?,
                _ => return Ok(read_raw(c)),
            },
            _ => return Ok(read_raw(c)),
        };

        Ok(Some(params))
    }
}

impl Layer for AndroidCommand {
    fn decode_bytes(
        &mut self,
        bytes: &[u8],
    ) -> Result<(Option<Box<dyn Layer + Send>>, usize), Error> {
        let mut cursor = Cursor::new(bytes);
        let mut params = cursor.sub_cursor(self.param_length as usize)?;

        self.command = Named::lookup(self.ocf, COMMAND_NAMES).name();
        self.parameters = self.decode_parameters(&mut params)?;
        self.unparsed = finish_parameters(&mut params, self.command)?;

        Ok((None, cursor.offset()))
    }

    fn name(&self) -> &'static str {
        "Bluetooth Android HCI Command"
    }

    fn short_name(&self) -> &'static str {
        "bthci_cmd_android"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dissect(ocf: u16, h: &str) -> serde_json::Value {
        let bytes = hex::decode(h).unwrap();
        let mut layer = AndroidCommand::creator(ocf, bytes.len() as u8);
        let (next, consumed) = layer.decode_bytes(&bytes).unwrap();
        assert!(next.is_none());
        assert_eq!(consumed, bytes.len());
        serde_json::to_value(&layer).unwrap()
    }

    #[test]
    fn get_vendor_capabilities() {
        let json = dissect(LE_GET_VENDOR_CAPABILITIES, "");
        assert_eq!(json["command"], "LE Get Vendor Capabilities");
        assert!(json.get("parameters").is_none());
    }

    #[test]
    fn multi_advertising_enable() {
        let json = dissect(LE_MULTI_ADVERTISING, "050101");
        assert_eq!(json["sub_opcode"], "Set Advertising Enable (0x05)");
        assert_eq!(json["parameters"]["enable"], "Enabled (0x01)");
        assert_eq!(json["parameters"]["advertising_instance"], 1);
    }

    #[test]
    fn multi_advertising_data() {
        let mut bytes = hex::decode(concat!("02", "03", "020106")).unwrap();
        bytes.resize(2 + MULTI_ADVERTISING_DATA_LENGTH, 0);
        bytes.push(0x02);
        let json = dissect(LE_MULTI_ADVERTISING, &hex::encode(&bytes));
        assert_eq!(json["sub_opcode"], "Set Advertising Data (0x02)");
        assert_eq!(
            json["parameters"]["data"]["structures"][0]["ad_type"],
            "Flags (0x01)"
        );
        assert_eq!(json["parameters"]["advertising_instance"], 2);
    }

    #[test]
    fn batch_scan_parameters() {
        let json = dissect(LE_BATCH_SCAN, concat!("03", "02", "a0000000", "00100000", "01", "01"));
        assert_eq!(json["parameters"]["mode"], "Full (0x02)");
        assert_eq!(json["parameters"]["duty_cycle_scan_interval"], 0x1000);
        assert_eq!(
            json["parameters"]["discard_rule"],
            "Discard advertisement with weakest RSSI (0x01)"
        );
    }

    #[test]
    fn apcf_add_filtering_parameters() {
        let json = dissect(
            LE_APCF,
            concat!(
                "01", "00", "01", // set filtering parameters, add, index 1
                "0400", "0000", "00", "a6", "01", "f401", "01", "9c", "e803", "0a00",
            ),
        );
        let params = &json["parameters"];
        assert_eq!(params["action"], "Add (0x00)");
        assert_eq!(params["filter_index"], 1);
        let condition = &params["condition"];
        assert_eq!(condition["feature_selection"]["set"][0], "Service UUID");
        assert_eq!(condition["rssi_high_threshold"], -90);
        assert_eq!(condition["delivery_mode"], "On Found (0x01)");
        assert_eq!(condition["num_of_tracking_entries"], 10);
    }

    #[test]
    fn apcf_service_uuid_and_mask() {
        let json = dissect(LE_APCF, concat!("03", "00", "02", "0d18", "ffff"));
        assert_eq!(json["parameters"]["condition"]["uuid"], "0x180d");
        assert_eq!(json["parameters"]["condition"]["uuid_mask"], "0xffff");
    }

    #[test]
    fn apcf_delete_and_clear_carry_only_index() {
        let json = dissect(LE_APCF, "060103");
        assert_eq!(json["sub_opcode"], "Manufacturer Data (0x06)");
        assert_eq!(json["parameters"]["action"], "Delete (0x01)");
        assert_eq!(json["parameters"]["filter_index"], 3);
        assert!(json["parameters"].get("condition").is_none());

        let json = dissect(LE_APCF, "050200");
        assert_eq!(json["parameters"]["action"], "Clear (0x02)");
    }

    #[test]
    fn a2dp_offload_start_sbc() {
        let mut bytes = hex::decode(concat!(
            "01",       // start
            "01000000", // SBC
            "fa00",     // max latency
            "00", "00", // SCMS-T
            "01000000", // 44.1 kHz
            "01",       // 16 bits
            "02",       // stereo
            "00000000",
            "0100", "4100", "7603",
            "21", "15", "02", "35",
        ))
        .unwrap();
        bytes.resize(bytes.len() + CODEC_INFORMATION_LENGTH - 4, 0);
        let json = dissect(A2DP_HARDWARE_OFFLOAD, &hex::encode(&bytes));
        let params = &json["parameters"];
        assert_eq!(params["codec_type"], "SBC (0x00000001)");
        assert_eq!(params["sampling_frequency"], "44100 Hz (0x00000001)");
        assert_eq!(params["l2cap_cid"], "0x0041");
        let sbc = &params["codec_information"];
        assert_eq!(sbc["sampling_frequency"]["set"][0], "44100 Hz");
        assert_eq!(sbc["channel_mode"]["set"][0], "Joint Stereo");
        assert_eq!(sbc["block_length"]["set"][0], "16");
        assert_eq!(sbc["max_bitpool"], 0x35);
    }

    #[test]
    fn aac_information() {
        let mut c = Cursor::new(&[0x80, 0x01, 0x84, 0x83, 0xe8, 0x00]);
        let aac: AacInformation = c.read().unwrap();
        let json = serde_json::to_value(&aac).unwrap();
        assert_eq!(json["object_type"]["set"][0], "MPEG-2 AAC LC");
        assert_eq!(json["sampling_frequency"]["set"][0], "44100 Hz");
        assert_eq!(json["sampling_frequency"]["set"][1], "48000 Hz");
        assert_eq!(json["channels"]["set"][0], "2 channels");
        assert_eq!(json["variable_bit_rate"], true);
        assert_eq!(json["bit_rate"], 0x03e800);
    }

    #[test]
    fn ldac_codec_information_block() {
        // Sony, LDAC, mid quality, mono and stereo, reserved up to 32 octets
        let mut block = hex::decode("2d010000aa000105").unwrap();
        block.resize(CODEC_INFORMATION_LENGTH, 0);
        let mut c = Cursor::new(&block);
        let info = CodecInformation::read(&mut c, CODEC_LDAC).unwrap();
        assert!(c.is_empty());
        assert!(matches!(info, CodecInformation::Ldac(_)));

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["vendor_id"], "0x0000012d");
        assert_eq!(json["codec_id"], "0x00aa");
        assert_eq!(json["bitrate_index"], "Mid (0x01)");
        assert_eq!(json["channel_mode"]["value"], "0x05");
        assert_eq!(json["channel_mode"]["set"], serde_json::json!(["Mono", "Stereo"]));
    }

    #[test]
    fn a2dp_offload_stop() {
        let json = dissect(A2DP_HARDWARE_OFFLOAD, "02");
        assert_eq!(json["sub_opcode"], "Stop A2DP Offload (0x02)");
        assert!(json.get("parameters").is_none());
    }

    #[test]
    fn quality_report_optional_fields() {
        let json = dissect(BLUETOOTH_QUALITY_REPORT, concat!("00", "07000000", "8813"));
        assert_eq!(json["parameters"]["minimum_report_interval_ms"], 5000);
        assert!(json["parameters"].get("vendor_quality_event_mask").is_none());

        let json = dissect(
            BLUETOOTH_QUALITY_REPORT,
            concat!("00", "07800000", "8813", "01000000", "02000000", "03000000"),
        );
        let params = &json["parameters"];
        assert_eq!(params["report_event_mask"]["set"][3], "Vendor Specific Quality");
        assert_eq!(params["report_interval_multiple"], 3);
    }

    #[test]
    fn dynamic_audio_buffer_set_time() {
        let json = dissect(DYNAMIC_AUDIO_BUFFER, "02c800");
        assert_eq!(json["parameters"]["buffer_time_ms"], 200);
    }

    #[test]
    fn unknown_command_keeps_raw_parameters() {
        let json = dissect(0x1ff, "0102");
        assert_eq!(json["command"], "Unknown");
        assert_eq!(json["parameters"], "0102");
        assert!(json.get("unparsed").is_none());
    }

    #[test]
    fn unknown_sub_opcode_keeps_raw_parameters() {
        let json = dissect(LE_MULTI_ADVERTISING, "09aabb");
        assert_eq!(json["sub_opcode"], "Unknown (0x09)");
        assert_eq!(json["parameters"], "aabb");
        assert!(json.get("unparsed").is_none());
    }

    #[test]
    fn truncated_parameters() {
        let mut layer = AndroidCommand::creator(LE_BATCH_SCAN, 4);
        assert!(layer.decode_bytes(&[0x02, 0x10]).is_err());
    }
}
