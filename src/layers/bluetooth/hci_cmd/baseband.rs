//! Controller & Baseband commands (OGF 0x03)

use serde::Serialize;

use crate::cursor::{Cursor, Decode};
use crate::errors::Error;
use crate::layers::bluetooth::common::{
    read_advertising_data, read_bits64, read_bits8, read_fixed_string, read_handle, read_named,
    serialize_key, AdvertisingData, ChannelMap, ClassOfDevice, DATA_PATH_DIRECTIONS, ENABLE,
};
use crate::types::hex::{serialize_lower_hex_u16, serialize_lower_hex_u24};
use crate::types::{BdAddr, Bits, Named, ValueStrings};

use super::opcodes::*;
use super::parameters::{read, CommandParameters, ConnectionHandle};

/// Length of the Extended Inquiry Response field.
pub const EIR_LENGTH: usize = 240;

/// Length of the local name field.
pub const LOCAL_NAME_LENGTH: usize = 248;

pub static EVENT_MASK_PAGE_1_BITS: ValueStrings<u8> = &[
    (0, "Inquiry Complete"),
    (1, "Inquiry Result"),
    (2, "Connection Complete"),
    (3, "Connection Request"),
    (4, "Disconnection Complete"),
    (5, "Authentication Complete"),
    (6, "Remote Name Request Complete"),
    (7, "Encryption Change"),
    (8, "Change Connection Link Key Complete"),
    (9, "Link Key Type Changed"),
    (10, "Read Remote Supported Features Complete"),
    (11, "Read Remote Version Information Complete"),
    (12, "QoS Setup Complete"),
    (15, "Hardware Error"),
    (16, "Flush Occurred"),
    (17, "Role Change"),
    (19, "Mode Change"),
    (20, "Return Link Keys"),
    (21, "PIN Code Request"),
    (22, "Link Key Request"),
    (23, "Link Key Notification"),
    (24, "Loopback Command"),
    (25, "Data Buffer Overflow"),
    (26, "Max Slots Change"),
    (27, "Read Clock Offset Complete"),
    (28, "Connection Packet Type Changed"),
    (29, "QoS Violation"),
    (31, "Page Scan Repetition Mode Change"),
    (32, "Flow Specification Complete"),
    (33, "Inquiry Result with RSSI"),
    (34, "Read Remote Extended Features Complete"),
    (43, "Synchronous Connection Complete"),
    (44, "Synchronous Connection Changed"),
    (45, "Sniff Subrating"),
    (46, "Extended Inquiry Result"),
    (47, "Encryption Key Refresh Complete"),
    (48, "IO Capability Request"),
    (49, "IO Capability Response"),
    (50, "User Confirmation Request"),
    (51, "User Passkey Request"),
    (52, "Remote OOB Data Request"),
    (53, "Simple Pairing Complete"),
    (55, "Link Supervision Timeout Changed"),
    (56, "Enhanced Flush Complete"),
    (58, "User Passkey Notification"),
    (59, "Keypress Notification"),
    (60, "Remote Host Supported Features Notification"),
    (61, "LE Meta"),
];

pub static EVENT_MASK_PAGE_2_BITS: ValueStrings<u8> = &[
    (0, "Physical Link Complete"),
    (1, "Channel Selected"),
    (2, "Disconnection Physical Link Complete"),
    (3, "Physical Link Loss Early Warning"),
    (4, "Physical Link Recovery"),
    (5, "Logical Link Complete"),
    (6, "Disconnection Logical Link Complete"),
    (7, "Flow Spec Modify Complete"),
    (8, "Number Of Completed Data Blocks"),
    (9, "AMP Start Test"),
    (10, "AMP Test End"),
    (11, "AMP Receiver Report"),
    (12, "Short Range Mode Change Complete"),
    (13, "AMP Status Change"),
    (14, "Triggered Clock Capture"),
    (15, "Synchronization Train Complete"),
    (16, "Synchronization Train Received"),
    (17, "Connectionless Peripheral Broadcast Receive"),
    (18, "Connectionless Peripheral Broadcast Timeout"),
    (19, "Truncated Page Complete"),
    (20, "Peripheral Page Response Timeout"),
    (21, "Connectionless Peripheral Broadcast Channel Map Change"),
    (22, "Inquiry Response Notification"),
    (23, "Authenticated Payload Timeout Expired"),
    (24, "SAM Status Change"),
];

static FILTER_TYPES: ValueStrings<u8> = &[
    (0x00, "Clear All Filters"),
    (0x01, "Inquiry Result"),
    (0x02, "Connection Setup"),
];

static INQUIRY_RESULT_CONDITIONS: ValueStrings<u8> = &[
    (0x00, "Return responses from all devices during the Inquiry process"),
    (0x01, "A device with a specific Class of Device responded to the Inquiry process"),
    (0x02, "A device with a specific BD_ADDR responded to the Inquiry process"),
];

static CONNECTION_SETUP_CONDITIONS: ValueStrings<u8> = &[
    (0x00, "Allow Connections from all devices"),
    (0x01, "Allow Connections from a device with a specific Class of Device"),
    (0x02, "Allow Connections from a device with a specific BD_ADDR"),
];

static AUTO_ACCEPT_FLAGS: ValueStrings<u8> = &[
    (0x01, "Do NOT Auto accept the connection"),
    (0x02, "Do Auto accept the connection with role switch disabled"),
    (0x03, "Do Auto accept the connection with role switch enabled"),
];

static PIN_TYPES: ValueStrings<u8> = &[(0x00, "Variable PIN"), (0x01, "Fixed PIN")];

static READ_ALL_FLAGS: ValueStrings<u8> = &[
    (0x00, "Return Link Key for specified BD_ADDR"),
    (0x01, "Return all stored Link Keys"),
];

static DELETE_ALL_FLAGS: ValueStrings<u8> = &[
    (0x00, "Delete only the Link Key for specified BD_ADDR"),
    (0x01, "Delete all stored Link Keys"),
];

static SCAN_ENABLE: ValueStrings<u8> = &[
    (0x00, "No Scans enabled"),
    (0x01, "Inquiry Scan enabled, Page Scan disabled"),
    (0x02, "Inquiry Scan disabled, Page Scan enabled"),
    (0x03, "Inquiry Scan enabled, Page Scan enabled"),
];

static AUTHENTICATION_ENABLE: ValueStrings<u8> = &[
    (0x00, "Authentication not required"),
    (0x01, "Authentication required for all connections"),
];

static HOLD_MODE_ACTIVITY_BITS: ValueStrings<u8> = &[
    (0, "Suspend Page Scan"),
    (1, "Suspend Inquiry Scan"),
    (2, "Suspend Periodic Inquiries"),
];

static TRANSMIT_POWER_TYPES: ValueStrings<u8> = &[
    (0x00, "Read Current Transmit Power Level"),
    (0x01, "Read Maximum Transmit Power Level"),
];

static FLOW_CONTROL_ENABLE: ValueStrings<u8> = &[
    (0x00, "Flow control off in direction from Controller to Host"),
    (0x01, "ACL flow control on, Synchronous flow control off"),
    (0x02, "ACL flow control off, Synchronous flow control on"),
    (0x03, "ACL flow control on, Synchronous flow control on"),
];

static SCAN_TYPES: ValueStrings<u8> = &[(0x00, "Standard Scan"), (0x01, "Interlaced Scan")];

static INQUIRY_MODES: ValueStrings<u8> = &[
    (0x00, "Standard Inquiry Result event format"),
    (0x01, "Inquiry Result format with RSSI"),
    (0x02, "Inquiry Result with RSSI format or Extended Inquiry Result format"),
];

static FEC_REQUIRED: ValueStrings<u8> = &[(0x00, "FEC is not required"), (0x01, "FEC is required")];

static FLUSH_PACKET_TYPES: ValueStrings<u8> = &[(0x00, "Automatically-Flushable Only")];

static KEYPRESS_NOTIFICATION_TYPES: ValueStrings<u8> = &[
    (0x00, "Passkey entry started"),
    (0x01, "Passkey digit entered"),
    (0x02, "Passkey digit erased"),
    (0x03, "Passkey cleared"),
    (0x04, "Passkey entry completed"),
];

static FLOW_CONTROL_MODES: ValueStrings<u8> = &[
    (0x00, "Packet based data flow control mode"),
    (0x01, "Data block based data flow control mode"),
];

static FRAGMENTS: ValueStrings<u8> = &[
    (0x00, "Continuation fragment"),
    (0x01, "Starting fragment"),
    (0x02, "Ending fragment"),
    (0x03, "No fragmentation"),
];

static VOICE_INPUT_CODINGS: ValueStrings<u8> = &[
    (0x00, "Linear"),
    (0x01, "u-law"),
    (0x02, "A-law"),
];

static VOICE_INPUT_DATA_FORMATS: ValueStrings<u8> = &[
    (0x00, "1's complement"),
    (0x01, "2's complement"),
    (0x02, "Sign-Magnitude"),
    (0x03, "Unsigned"),
];

static VOICE_AIR_CODINGS: ValueStrings<u8> = &[
    (0x00, "CVSD"),
    (0x01, "u-law"),
    (0x02, "A-law"),
    (0x03, "Transparent Data"),
];

/// A Lower Address Part of an inquiry access code.
#[derive(Debug, Serialize)]
pub struct Lap(#[serde(serialize_with = "serialize_lower_hex_u24")] u32);

impl Decode for Lap {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self(cursor.read_u24()?))
    }
}

/// Voice setting, with its bit fields decoded.
#[derive(Debug, Serialize)]
pub struct VoiceSetting {
    #[serde(serialize_with = "serialize_lower_hex_u16")]
    value: u16,
    input_coding: Named<u8>,
    input_data_format: Named<u8>,
    input_sample_size: &'static str,
    linear_pcm_bit_position: u8,
    air_coding_format: Named<u8>,
}

impl Decode for VoiceSetting {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let value = cursor.read_u16()?;
        Ok(Self {
            value,
            input_coding: Named::lookup(((value >> 8) & 0x03) as u8, VOICE_INPUT_CODINGS),
            input_data_format: Named::lookup(((value >> 6) & 0x03) as u8, VOICE_INPUT_DATA_FORMATS),
            input_sample_size: if value & 0x0020 == 0 { "8-bit" } else { "16-bit" },
            linear_pcm_bit_position: ((value >> 2) & 0x07) as u8,
            air_coding_format: Named::lookup((value & 0x03) as u8, VOICE_AIR_CODINGS),
        })
    }
}

hci_parameters! {
    SetEventMask(c) {
        event_mask: Bits<u64> = read_bits64(c, EVENT_MASK_PAGE_1_BITS)?,
    }

    SetEventMaskPage2(c) {
        event_mask_page_2: Bits<u64> = read_bits64(c, EVENT_MASK_PAGE_2_BITS)?,
    }

    WritePinType(c) {
        pin_type: Named<u8> = read_named(c, PIN_TYPES)?,
    }

    ReadStoredLinkKey(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
        read_all: Named<u8> = read_named(c, READ_ALL_FLAGS)?,
    }

    StoredLinkKey(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
        #[serde(serialize_with = "serialize_key")]
        link_key: [u8; 16] = c.read_array()?,
    }

    DeleteStoredLinkKey(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
        delete_all: Named<u8> = read_named(c, DELETE_ALL_FLAGS)?,
    }

    WriteLocalName(c) {
        local_name: String = read_fixed_string(c, LOCAL_NAME_LENGTH)?,
    }

    WriteConnectionAcceptTimeout(c) {
        connection_accept_timeout: u16 = c.read_u16()?,
    }

    WritePageTimeout(c) {
        page_timeout: u16 = c.read_u16()?,
    }

    WriteScanEnable(c) {
        scan_enable: Named<u8> = read_named(c, SCAN_ENABLE)?,
    }

    WriteScanActivity(c) {
        interval: u16 = c.read_u16()?,
        window: u16 = c.read_u16()?,
    }

    WriteAuthenticationEnable(c) {
        authentication_enable: Named<u8> = read_named(c, AUTHENTICATION_ENABLE)?,
    }

    WriteEncryptionMode(c) {
        encryption_mode: u8 = c.read_u8()?,
    }

    WriteClassOfDevice(c) {
        class_of_device: ClassOfDevice = c.read()?,
    }

    WriteVoiceSetting(c) {
        voice_setting: VoiceSetting = c.read()?,
    }

    WriteAutomaticFlushTimeout(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        flush_timeout: u16 = c.read_u16()?,
    }

    WriteNumBroadcastRetransmissions(c) {
        num_broadcast_retransmissions: u8 = c.read_u8()?,
    }

    WriteHoldModeActivity(c) {
        hold_mode_activity: Bits<u8> = read_bits8(c, HOLD_MODE_ACTIVITY_BITS)?,
    }

    ReadTransmitPowerLevel(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        power_type: Named<u8> = read_named(c, TRANSMIT_POWER_TYPES)?,
    }

    WriteSynchronousFlowControlEnable(c) {
        synchronous_flow_control_enable: Named<u8> = read_named(c, ENABLE)?,
    }

    SetControllerToHostFlowControl(c) {
        flow_control_enable: Named<u8> = read_named(c, FLOW_CONTROL_ENABLE)?,
    }

    HostBufferSize(c) {
        host_acl_data_packet_length: u16 = c.read_u16()?,
        host_synchronous_data_packet_length: u8 = c.read_u8()?,
        host_total_num_acl_data_packets: u16 = c.read_u16()?,
        host_total_num_synchronous_data_packets: u16 = c.read_u16()?,
    }

    CompletedPackets(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        host_num_completed_packets: u16 = c.read_u16()?,
    }

    WriteLinkSupervisionTimeout(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        link_supervision_timeout: u16 = c.read_u16()?,
    }

    WritePageScanPeriodMode(c) {
        page_scan_period_mode: u8 = c.read_u8()?,
    }

    SetAfhHostChannelClassification(c) {
        afh_host_channel_classification: ChannelMap = ChannelMap::read_bredr(c)?,
    }

    WriteScanType(c) {
        scan_type: Named<u8> = read_named(c, SCAN_TYPES)?,
    }

    WriteInquiryMode(c) {
        inquiry_mode: Named<u8> = read_named(c, INQUIRY_MODES)?,
    }

    WriteAfhChannelAssessmentMode(c) {
        afh_channel_assessment_mode: Named<u8> = read_named(c, ENABLE)?,
    }

    WriteExtendedInquiryResponse(c) {
        fec_required: Named<u8> = read_named(c, FEC_REQUIRED)?,
        extended_inquiry_response: AdvertisingData = read_advertising_data(c, EIR_LENGTH)?,
    }

    WriteSimplePairingMode(c) {
        simple_pairing_mode: Named<u8> = read_named(c, ENABLE)?,
    }

    WriteInquiryTransmitPowerLevel(c) {
        tx_power: i8 = c.read_i8()?,
    }

    WriteDefaultErroneousDataReporting(c) {
        erroneous_data_reporting: Named<u8> = read_named(c, ENABLE)?,
    }

    EnhancedFlush(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        packet_type: Named<u8> = read_named(c, FLUSH_PACKET_TYPES)?,
    }

    SendKeypressNotification(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
        notification_type: Named<u8> = read_named(c, KEYPRESS_NOTIFICATION_TYPES)?,
    }

    WriteLogicalLinkAcceptTimeout(c) {
        logical_link_accept_timeout: u16 = c.read_u16()?,
    }

    WriteLocationData(c) {
        location_domain_aware: u8 = c.read_u8()?,
        location_domain: String = read_fixed_string(c, 2)?,
        location_domain_options: u8 = c.read_u8()?,
        location_options: u8 = c.read_u8()?,
    }

    WriteFlowControlMode(c) {
        flow_control_mode: Named<u8> = read_named(c, FLOW_CONTROL_MODES)?,
    }

    LogicalLinkHandle(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        logical_link_handle: u16 = c.read_u16()?,
    }

    WriteBestEffortFlushTimeout(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        logical_link_handle: u16 = c.read_u16()?,
        best_effort_flush_timeout: u32 = c.read_u32()?,
    }

    ShortRangeMode(c) {
        physical_link_handle: u8 = c.read_u8()?,
        short_range_mode: Named<u8> = read_named(c, ENABLE)?,
    }

    WriteLeHostSupport(c) {
        le_supported_host: Named<u8> = read_named(c, ENABLE)?,
        unused: u8 = c.read_u8()?,
    }

    SetMwsChannelParameters(c) {
        mws_channel_enable: Named<u8> = read_named(c, ENABLE)?,
        mws_rx_center_frequency: u16 = c.read_u16()?,
        mws_tx_center_frequency: u16 = c.read_u16()?,
        mws_rx_channel_bandwidth: u16 = c.read_u16()?,
        mws_tx_channel_bandwidth: u16 = c.read_u16()?,
        mws_channel_type: u8 = c.read_u8()?,
    }

    SetMwsTransportLayer(c) {
        transport_layer: u8 = c.read_u8()?,
        to_mws_baud_rate: u32 = c.read_u32()?,
        from_mws_baud_rate: u32 = c.read_u32()?,
    }

    LtAddr(c) {
        lt_addr: u8 = c.read_u8()?,
    }

    WriteSynchronizationTrainParameters(c) {
        interval_min: u16 = c.read_u16()?,
        interval_max: u16 = c.read_u16()?,
        sync_train_timeout: u32 = c.read_u32()?,
        service_data: u8 = c.read_u8()?,
    }

    WriteSecureConnectionsHostSupport(c) {
        secure_connections_host_support: Named<u8> = read_named(c, ENABLE)?,
    }

    WriteAuthenticatedPayloadTimeout(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        authenticated_payload_timeout: u16 = c.read_u16()?,
    }

    WriteExtendedPageTimeout(c) {
        extended_page_timeout: u16 = c.read_u16()?,
    }

    WriteExtendedInquiryLength(c) {
        extended_inquiry_length: u16 = c.read_u16()?,
    }

    SetEcosystemBaseInterval(c) {
        interval: u16 = c.read_u16()?,
    }

    SetMinEncryptionKeySize(c) {
        min_encryption_key_size: u8 = c.read_u8()?,
    }
}

/// Set Event Filter: the layout after the filter type depends on the filter type and the
/// condition type.
#[derive(Debug, Serialize)]
pub struct SetEventFilter {
    filter_type: Named<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter_condition_type: Option<Named<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    class_of_device: Option<ClassOfDevice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    class_of_device_mask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bd_addr: Option<BdAddr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    auto_accept_flag: Option<Named<u8>>,
}

impl Decode for SetEventFilter {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let filter_type = read_named(c, FILTER_TYPES)?;
        let mut filter = Self {
            filter_type,
            filter_condition_type: None,
            class_of_device: None,
            class_of_device_mask: None,
            bd_addr: None,
            auto_accept_flag: None,
        };

        let conditions = match filter_type.value() {
            0x01 => INQUIRY_RESULT_CONDITIONS,
            0x02 => CONNECTION_SETUP_CONDITIONS,
            _ => return Ok(filter),
        };

        let condition = read_named(c, conditions)?;
        filter.filter_condition_type = Some(condition);
        match condition.value() {
            0x01 => {
                filter.class_of_device = Some(c.read()?);
                filter.class_of_device_mask = Some(format!("0x{:06x}", c.read_u24()?));
            }
            0x02 => filter.bd_addr = Some(c.read_bd_addr()?),
            _ => {}
        }

        if filter_type.value() == 0x02 {
            filter.auto_accept_flag = Some(read_named(c, AUTO_ACCEPT_FLAGS)?);
        }

        Ok(filter)
    }
}

#[derive(Debug, Serialize)]
pub struct WriteStoredLinkKey {
    num_keys_to_write: u8,
    keys: Vec<StoredLinkKey>,
}

impl Decode for WriteStoredLinkKey {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let num_keys_to_write = c.read_u8()?;
        let keys = c.read_list(num_keys_to_write as usize)?;
        Ok(Self {
            num_keys_to_write,
            keys,
        })
    }
}

/// Handles and counts are interleaved: handle 0, count 0, handle 1, count 1...
#[derive(Debug, Serialize)]
pub struct HostNumberOfCompletedPackets {
    number_of_handles: u8,
    handles: Vec<CompletedPackets>,
}

impl Decode for HostNumberOfCompletedPackets {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let number_of_handles = c.read_u8()?;
        let handles = c.read_list(number_of_handles as usize)?;
        Ok(Self {
            number_of_handles,
            handles,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct WriteCurrentIacLap {
    num_current_iac: u8,
    iac_laps: Vec<Lap>,
}

impl Decode for WriteCurrentIacLap {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let num_current_iac = c.read_u8()?;
        let iac_laps = c.read_list(num_current_iac as usize)?;
        Ok(Self {
            num_current_iac,
            iac_laps,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SetConnectionlessPeripheralBroadcastData {
    lt_addr: u8,
    fragment: Named<u8>,
    data_length: u8,
    #[serde(serialize_with = "hex::serde::serialize")]
    data: Vec<u8>,
}

impl Decode for SetConnectionlessPeripheralBroadcastData {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let lt_addr = c.read_u8()?;
        let fragment = read_named(c, FRAGMENTS)?;
        let data_length = c.read_u8()?;
        let data = c.read_bytes(data_length as usize)?.to_vec();
        Ok(Self {
            lt_addr,
            fragment,
            data_length,
            data,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigureDataPath {
    data_path_direction: Named<u8>,
    data_path_id: u8,
    vendor_specific_config_length: u8,
    #[serde(serialize_with = "hex::serde::serialize")]
    vendor_specific_config: Vec<u8>,
}

impl Decode for ConfigureDataPath {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let data_path_direction = read_named(c, DATA_PATH_DIRECTIONS)?;
        let data_path_id = c.read_u8()?;
        let vendor_specific_config_length = c.read_u8()?;
        let vendor_specific_config = c.read_bytes(vendor_specific_config_length as usize)?.to_vec();
        Ok(Self {
            data_path_direction,
            data_path_id,
            vendor_specific_config_length,
            vendor_specific_config,
        })
    }
}

pub(super) fn decode(
    opcode: u16,
    c: &mut Cursor<'_>,
) -> Result<Option<Box<dyn CommandParameters>>, Error> {
    let params = match opcode {
        SET_EVENT_MASK => read::<SetEventMask>(c)?,
        SET_EVENT_FILTER => read::<SetEventFilter>(c)?,
        FLUSH
        | READ_AUTOMATIC_FLUSH_TIMEOUT
        | READ_LINK_SUPERVISION_TIMEOUT
        | REFRESH_ENCRYPTION_KEY
        | READ_AUTHENTICATED_PAYLOAD_TIMEOUT => read::<ConnectionHandle>(c)?,
        WRITE_PIN_TYPE => read::<WritePinType>(c)?,
        READ_STORED_LINK_KEY => read::<ReadStoredLinkKey>(c)?,
        WRITE_STORED_LINK_KEY => read::<WriteStoredLinkKey>(c)?,
        DELETE_STORED_LINK_KEY => read::<DeleteStoredLinkKey>(c)?,
        WRITE_LOCAL_NAME => read::<WriteLocalName>(c)?,
        WRITE_CONNECTION_ACCEPT_TIMEOUT => read::<WriteConnectionAcceptTimeout>(c)?,
        WRITE_PAGE_TIMEOUT => read::<WritePageTimeout>(c)?,
        WRITE_SCAN_ENABLE => read::<WriteScanEnable>(c)?,
        WRITE_PAGE_SCAN_ACTIVITY | WRITE_INQUIRY_SCAN_ACTIVITY => read::<WriteScanActivity>(c)?,
        WRITE_AUTHENTICATION_ENABLE => read::<WriteAuthenticationEnable>(c)?,
        WRITE_ENCRYPTION_MODE => read::<WriteEncryptionMode>(c)?,
        WRITE_CLASS_OF_DEVICE => read::<WriteClassOfDevice>(c)?,
        WRITE_VOICE_SETTING => read::<WriteVoiceSetting>(c)?,
        WRITE_AUTOMATIC_FLUSH_TIMEOUT => read::<WriteAutomaticFlushTimeout>(c)?,
        WRITE_NUM_BROADCAST_RETRANSMISSIONS => read::<WriteNumBroadcastRetransmissions>(c)?,
        WRITE_HOLD_MODE_ACTIVITY => read::<WriteHoldModeActivity>(c)?,
        READ_TRANSMIT_POWER_LEVEL | READ_ENHANCED_TRANSMIT_POWER_LEVEL => {
            read::<ReadTransmitPowerLevel>(c)?
        }
        WRITE_SYNCHRONOUS_FLOW_CONTROL_ENABLE => read::<WriteSynchronousFlowControlEnable>(c)?,
        SET_CONTROLLER_TO_HOST_FLOW_CONTROL => read::<SetControllerToHostFlowControl>(c)?,
        HOST_BUFFER_SIZE => read::<HostBufferSize>(c)?,
        HOST_NUMBER_OF_COMPLETED_PACKETS => read::<HostNumberOfCompletedPackets>(c)?,
        WRITE_LINK_SUPERVISION_TIMEOUT => read::<WriteLinkSupervisionTimeout>(c)?,
        WRITE_CURRENT_IAC_LAP => read::<WriteCurrentIacLap>(c)?,
        WRITE_PAGE_SCAN_PERIOD_MODE => read::<WritePageScanPeriodMode>(c)?,
        SET_AFH_HOST_CHANNEL_CLASSIFICATION => read::<SetAfhHostChannelClassification>(c)?,
        WRITE_INQUIRY_SCAN_TYPE | WRITE_PAGE_SCAN_TYPE => read::<WriteScanType>(c)?,
        WRITE_INQUIRY_MODE => read::<WriteInquiryMode>(c)?,
        WRITE_AFH_CHANNEL_ASSESSMENT_MODE => read::<WriteAfhChannelAssessmentMode>(c)?,
        WRITE_EXTENDED_INQUIRY_RESPONSE => read::<WriteExtendedInquiryResponse>(c)?,
        WRITE_SIMPLE_PAIRING_MODE => read::<WriteSimplePairingMode>(c)?,
        WRITE_INQUIRY_TRANSMIT_POWER_LEVEL => read::<WriteInquiryTransmitPowerLevel>(c)?,
        WRITE_DEFAULT_ERRONEOUS_DATA_REPORTING => {
            read::<WriteDefaultErroneousDataReporting>(c)?
        }
        ENHANCED_FLUSH => read::<EnhancedFlush>(c)?,
        SEND_KEYPRESS_NOTIFICATION => read::<SendKeypressNotification>(c)?,
        WRITE_LOGICAL_LINK_ACCEPT_TIMEOUT => read::<WriteLogicalLinkAcceptTimeout>(c)?,
        SET_EVENT_MASK_PAGE_2 => read::<SetEventMaskPage2>(c)?,
        WRITE_LOCATION_DATA => read::<WriteLocationData>(c)?,
        WRITE_FLOW_CONTROL_MODE => read::<WriteFlowControlMode>(c)?,
        READ_BEST_EFFORT_FLUSH_TIMEOUT => read::<LogicalLinkHandle>(c)?,
        WRITE_BEST_EFFORT_FLUSH_TIMEOUT => read::<WriteBestEffortFlushTimeout>(c)?,
        SHORT_RANGE_MODE => read::<ShortRangeMode>(c)?,
        WRITE_LE_HOST_SUPPORT => read::<WriteLeHostSupport>(c)?,
        SET_MWS_CHANNEL_PARAMETERS => read::<SetMwsChannelParameters>(c)?,
        SET_MWS_TRANSPORT_LAYER => read::<SetMwsTransportLayer>(c)?,
        SET_RESERVED_LT_ADDR | DELETE_RESERVED_LT_ADDR => read::<LtAddr>(c)?,
        SET_CONNECTIONLESS_PERIPHERAL_BROADCAST_DATA => {
            read::<SetConnectionlessPeripheralBroadcastData>(c)?
        }
        WRITE_SYNCHRONIZATION_TRAIN_PARAMETERS => {
            read::<WriteSynchronizationTrainParameters>(c)?
        }
        WRITE_SECURE_CONNECTIONS_HOST_SUPPORT => read::<WriteSecureConnectionsHostSupport>(c)?,
        WRITE_AUTHENTICATED_PAYLOAD_TIMEOUT => read::<WriteAuthenticatedPayloadTimeout>(c)?,
        WRITE_EXTENDED_PAGE_TIMEOUT => read::<WriteExtendedPageTimeout>(c)?,
        WRITE_EXTENDED_INQUIRY_LENGTH => read::<WriteExtendedInquiryLength>(c)?,
        SET_ECOSYSTEM_BASE_INTERVAL => read::<SetEcosystemBaseInterval>(c)?,
        CONFIGURE_DATA_PATH => read::<ConfigureDataPath>(c)?,
        SET_MIN_ENCRYPTION_KEY_SIZE => read::<SetMinEncryptionKeySize>(c)?,
        _ => return Ok(None),
    };

    Ok(Some(params))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_json(opcode: u16, bytes: &[u8]) -> serde_json::Value {
        let mut c = Cursor::new(bytes);
        let params = decode(opcode, &mut c).unwrap().expect("known layout");
        assert!(c.is_empty(), "{} bytes left", c.remaining());
        serde_json::to_value(&params).unwrap()
    }

    #[test]
    fn set_event_mask_names() {
        let bytes = hex::decode("ffffffffffbf3d20").unwrap();
        let json = decode_json(SET_EVENT_MASK, &bytes);
        assert_eq!(json["event_mask"]["value"], "0x203dbfffffffffff");
        let events = json["event_mask"]["set"].as_array().unwrap();
        assert_eq!(events[0], "Inquiry Complete");
        assert_eq!(events.last().unwrap(), "LE Meta");
    }

    #[test]
    fn configure_data_path_output() {
        let bytes = hex::decode("0101020a0b").unwrap();
        let json = decode_json(CONFIGURE_DATA_PATH, &bytes);
        assert_eq!(json["data_path_direction"], "Output (Controller to Host) (0x01)");
        assert_eq!(json["data_path_id"], 1);
        assert_eq!(json["vendor_specific_config"], "0a0b");
    }

    #[test]
    fn set_event_filter_clear_all() {
        let json = decode_json(SET_EVENT_FILTER, &[0x00]);
        assert_eq!(json["filter_type"], "Clear All Filters (0x00)");
        assert!(json.get("filter_condition_type").is_none());
    }

    #[test]
    fn set_event_filter_inquiry_by_class() {
        let bytes = hex::decode("01010c025affff00").unwrap();
        let json = decode_json(SET_EVENT_FILTER, &bytes);
        assert_eq!(json["class_of_device"]["major_device_class"], "Phone (0x02)");
        assert_eq!(json["class_of_device_mask"], "0x00ffff");
        assert!(json.get("auto_accept_flag").is_none());
    }

    #[test]
    fn set_event_filter_connection_setup_by_address() {
        let bytes = hex::decode("0202665544332211 03".replace(' ', "")).unwrap();
        let json = decode_json(SET_EVENT_FILTER, &bytes);
        assert_eq!(json["bd_addr"], "11:22:33:44:55:66");
        assert_eq!(
            json["auto_accept_flag"],
            "Do Auto accept the connection with role switch enabled (0x03)"
        );
    }

    #[test]
    fn set_event_filter_connection_setup_all_devices() {
        let json = decode_json(SET_EVENT_FILTER, &[0x02, 0x00, 0x01]);
        assert_eq!(
            json["filter_condition_type"],
            "Allow Connections from all devices (0x00)"
        );
        assert_eq!(json["auto_accept_flag"], "Do NOT Auto accept the connection (0x01)");
    }

    #[test]
    fn write_local_name_nul_terminated() {
        let mut bytes = b"Pixel 7".to_vec();
        bytes.resize(LOCAL_NAME_LENGTH, 0);
        let json = decode_json(WRITE_LOCAL_NAME, &bytes);
        assert_eq!(json["local_name"], "Pixel 7");
    }

    #[test]
    fn write_extended_inquiry_response() {
        let mut bytes = hex::decode("000809506978656c2037020a04").unwrap();
        bytes.resize(1 + EIR_LENGTH, 0);
        let json = decode_json(WRITE_EXTENDED_INQUIRY_RESPONSE, &bytes);
        let eir = &json["extended_inquiry_response"];
        assert_eq!(eir["structures"][0]["data"], "Pixel 7");
        assert_eq!(eir["structures"][1]["ad_type"], "Tx Power Level (0x0a)");
        assert_eq!(eir["structures"][1]["data"], 4);
        assert_eq!(eir["padding"], EIR_LENGTH - 12);
    }

    #[test]
    fn write_stored_link_key_list() {
        let bytes = hex::decode(concat!(
            "02",
            "010000000000", "00112233445566778899aabbccddeeff",
            "020000000000", "ffeeddccbbaa99887766554433221100",
        ))
        .unwrap();
        let json = decode_json(WRITE_STORED_LINK_KEY, &bytes);
        assert_eq!(json["keys"][1]["bd_addr"], "00:00:00:00:00:02");
        assert_eq!(json["keys"][0]["link_key"], "00112233445566778899aabbccddeeff");
    }

    #[test]
    fn host_number_of_completed_packets_interleaved() {
        let bytes = hex::decode("0201000300020005").unwrap();
        let json = decode_json(HOST_NUMBER_OF_COMPLETED_PACKETS, &bytes);
        assert_eq!(json["handles"][0]["connection_handle"], "0x0001");
        assert_eq!(json["handles"][0]["host_num_completed_packets"], 3);
        assert_eq!(json["handles"][1]["host_num_completed_packets"], 5);
    }

    #[test]
    fn write_current_iac_lap_count_too_large() {
        let bytes = hex::decode("02338b9e").unwrap();
        let mut c = Cursor::new(&bytes);
        assert!(decode(WRITE_CURRENT_IAC_LAP, &mut c).is_err());
    }

    #[test]
    fn write_voice_setting_fields() {
        let json = decode_json(WRITE_VOICE_SETTING, &[0x60, 0x00]);
        let vs = &json["voice_setting"];
        assert_eq!(vs["input_data_format"], "2's complement (0x01)");
        assert_eq!(vs["input_sample_size"], "16-bit");
        assert_eq!(vs["air_coding_format"], "CVSD (0x00)");
    }

    #[test]
    fn afh_host_channel_classification() {
        let bytes = hex::decode("ffffffffffffffffff7f").unwrap();
        let json = decode_json(SET_AFH_HOST_CHANNEL_CLASSIFICATION, &bytes);
        let used = json["afh_host_channel_classification"]["used_channels"]
            .as_array()
            .unwrap();
        assert_eq!(used.len(), 79);
    }
}
