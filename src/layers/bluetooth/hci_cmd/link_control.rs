//! Link Control commands (OGF 0x01)

use crate::cursor::{Cursor, Decode};
use crate::errors::Error;
use crate::layers::bluetooth::common::{
    read_bits16, read_fixed_string, read_handle, read_named, serialize_key, ChannelMap,
    CodingFormat, ExtendedFlowSpec, ACL_PACKET_TYPE_BITS, AUTHENTICATION_REQUIREMENTS, ENABLE,
    ERROR_CODES, IO_CAPABILITIES, OOB_DATA_PRESENT, PAGE_SCAN_REPETITION_MODES,
    RETRANSMISSION_EFFORTS, SYNC_PACKET_TYPE_BITS,
};
use crate::types::hex::{serialize_lower_hex_u16, serialize_lower_hex_u24};
use crate::types::{BdAddr, Bits, Named, ValueStrings};

use super::opcodes::*;
use super::parameters::{
    read, Address, AddressAndReason, CommandParameters, ConnectionHandle, HandleAndReason,
};

static ALLOW_ROLE_SWITCH: ValueStrings<u8> = &[
    (0x00, "Local device will be Central, and will not accept a role switch"),
    (0x01, "Local device may be Central, or may become Peripheral after accepting a role switch"),
];

static ACCEPT_ROLES: ValueStrings<u8> = &[
    (0x00, "Become the Central for this connection"),
    (0x01, "Remain the Peripheral for this connection"),
];

static KEY_FLAGS: ValueStrings<u8> = &[
    (0x00, "Semi-permanent Link Keys"),
    (0x01, "Temporary Link Key"),
];

static AMP_KEY_TYPES: ValueStrings<u8> = &[
    (0x03, "Debug Combination Key"),
    (0x04, "Unauthenticated Combination Key"),
    (0x05, "Authenticated Combination Key"),
];

static PCM_DATA_FORMATS: ValueStrings<u8> = &[
    (0x00, "N/A"),
    (0x01, "1's complement"),
    (0x02, "2's complement"),
    (0x03, "Sign-magnitude"),
    (0x04, "Unsigned"),
];

static DATA_PATHS: ValueStrings<u8> = &[(0x00, "HCI"), (0xff, "Audio Test Mode")];

hci_parameters! {
    Inquiry(c) {
        #[serde(serialize_with = "serialize_lower_hex_u24")]
        lap: u32 = c.read_u24()?,
        inquiry_length: u8 = c.read_u8()?,
        num_responses: u8 = c.read_u8()?,
    }

    PeriodicInquiryMode(c) {
        max_period_length: u16 = c.read_u16()?,
        min_period_length: u16 = c.read_u16()?,
        #[serde(serialize_with = "serialize_lower_hex_u24")]
        lap: u32 = c.read_u24()?,
        inquiry_length: u8 = c.read_u8()?,
        num_responses: u8 = c.read_u8()?,
    }

    CreateConnection(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
        packet_type: Bits<u16> = read_bits16(c, ACL_PACKET_TYPE_BITS)?,
        page_scan_repetition_mode: Named<u8> = read_named(c, PAGE_SCAN_REPETITION_MODES)?,
        reserved: u8 = c.read_u8()?,
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        clock_offset: u16 = c.read_u16()?,
        allow_role_switch: Named<u8> = read_named(c, ALLOW_ROLE_SWITCH)?,
    }

    AddScoConnection(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        packet_type: Bits<u16> = read_bits16(c, SYNC_PACKET_TYPE_BITS)?,
    }

    AcceptConnectionRequest(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
        role: Named<u8> = read_named(c, ACCEPT_ROLES)?,
    }

    LinkKeyRequestReply(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
        #[serde(serialize_with = "serialize_key")]
        link_key: [u8; 16] = c.read_array()?,
    }

    PinCodeRequestReply(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
        pin_code_length: u8 = c.read_u8()?,
        pin_code: String = read_fixed_string(c, 16)?,
    }

    ChangeConnectionPacketType(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        packet_type: Bits<u16> = read_bits16(c, ACL_PACKET_TYPE_BITS)?,
    }

    SetConnectionEncryption(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        encryption_enable: Named<u8> = read_named(c, ENABLE)?,
    }

    LinkKeySelection(c) {
        key_flag: Named<u8> = read_named(c, KEY_FLAGS)?,
    }

    RemoteNameRequest(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
        page_scan_repetition_mode: Named<u8> = read_named(c, PAGE_SCAN_REPETITION_MODES)?,
        reserved: u8 = c.read_u8()?,
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        clock_offset: u16 = c.read_u16()?,
    }

    ReadRemoteExtendedFeatures(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        page_number: u8 = c.read_u8()?,
    }

    SetupSynchronousConnection(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        transmit_bandwidth: u32 = c.read_u32()?,
        receive_bandwidth: u32 = c.read_u32()?,
        max_latency: u16 = c.read_u16()?,
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        voice_setting: u16 = c.read_u16()?,
        retransmission_effort: Named<u8> = read_named(c, RETRANSMISSION_EFFORTS)?,
        packet_type: Bits<u16> = read_bits16(c, SYNC_PACKET_TYPE_BITS)?,
    }

    AcceptSynchronousConnectionRequest(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
        transmit_bandwidth: u32 = c.read_u32()?,
        receive_bandwidth: u32 = c.read_u32()?,
        max_latency: u16 = c.read_u16()?,
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        voice_setting: u16 = c.read_u16()?,
        retransmission_effort: Named<u8> = read_named(c, RETRANSMISSION_EFFORTS)?,
        packet_type: Bits<u16> = read_bits16(c, SYNC_PACKET_TYPE_BITS)?,
    }

    IoCapabilityRequestReply(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
        io_capability: Named<u8> = read_named(c, IO_CAPABILITIES)?,
        oob_data_present: Named<u8> = read_named(c, OOB_DATA_PRESENT)?,
        authentication_requirements: Named<u8> = read_named(c, AUTHENTICATION_REQUIREMENTS)?,
    }

    UserPasskeyRequestReply(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
        numeric_value: u32 = c.read_u32()?,
    }

    RemoteOobDataRequestReply(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
        #[serde(serialize_with = "serialize_key")]
        c_192: [u8; 16] = c.read_array()?,
        #[serde(serialize_with = "serialize_key")]
        r_192: [u8; 16] = c.read_array()?,
    }

    DisconnectPhysicalLink(c) {
        physical_link_handle: u8 = c.read_u8()?,
        reason: Named<u8> = read_named(c, ERROR_CODES)?,
    }

    LogicalLink(c) {
        physical_link_handle: u8 = c.read_u8()?,
        tx_flow_spec: ExtendedFlowSpec = c.read()?,
        rx_flow_spec: ExtendedFlowSpec = c.read()?,
    }

    DisconnectLogicalLink(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        logical_link_handle: u16 = c.read_u16()?,
    }

    LogicalLinkCancel(c) {
        physical_link_handle: u8 = c.read_u8()?,
        tx_flow_spec_id: u8 = c.read_u8()?,
    }

    FlowSpecModify(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        handle: u16 = read_handle(c)?,
        tx_flow_spec: ExtendedFlowSpec = c.read()?,
        rx_flow_spec: ExtendedFlowSpec = c.read()?,
    }

    /// Everything an enhanced synchronous connection setup or accept carries after the handle or
    /// address.
    EnhancedSynchronousParameters(c) {
        transmit_bandwidth: u32 = c.read_u32()?,
        receive_bandwidth: u32 = c.read_u32()?,
        transmit_coding_format: CodingFormat = c.read()?,
        receive_coding_format: CodingFormat = c.read()?,
        transmit_codec_frame_size: u16 = c.read_u16()?,
        receive_codec_frame_size: u16 = c.read_u16()?,
        input_bandwidth: u32 = c.read_u32()?,
        output_bandwidth: u32 = c.read_u32()?,
        input_coding_format: CodingFormat = c.read()?,
        output_coding_format: CodingFormat = c.read()?,
        input_coded_data_size: u16 = c.read_u16()?,
        output_coded_data_size: u16 = c.read_u16()?,
        input_pcm_data_format: Named<u8> = read_named(c, PCM_DATA_FORMATS)?,
        output_pcm_data_format: Named<u8> = read_named(c, PCM_DATA_FORMATS)?,
        input_pcm_sample_payload_msb_position: u8 = c.read_u8()?,
        output_pcm_sample_payload_msb_position: u8 = c.read_u8()?,
        input_data_path: Named<u8> = read_named(c, DATA_PATHS)?,
        output_data_path: Named<u8> = read_named(c, DATA_PATHS)?,
        input_transport_unit_size: u8 = c.read_u8()?,
        output_transport_unit_size: u8 = c.read_u8()?,
        max_latency: u16 = c.read_u16()?,
        packet_type: Bits<u16> = read_bits16(c, SYNC_PACKET_TYPE_BITS)?,
        retransmission_effort: Named<u8> = read_named(c, RETRANSMISSION_EFFORTS)?,
    }

    EnhancedSetupSynchronousConnection(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        #[serde(flatten)]
        parameters: EnhancedSynchronousParameters = c.read()?,
    }

    EnhancedAcceptSynchronousConnectionRequest(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
        #[serde(flatten)]
        parameters: EnhancedSynchronousParameters = c.read()?,
    }

    TruncatedPage(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
        page_scan_repetition_mode: Named<u8> = read_named(c, PAGE_SCAN_REPETITION_MODES)?,
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        clock_offset: u16 = c.read_u16()?,
    }

    SetConnectionlessPeripheralBroadcast(c) {
        enable: Named<u8> = read_named(c, ENABLE)?,
        lt_addr: u8 = c.read_u8()?,
        lpo_allowed: u8 = c.read_u8()?,
        packet_type: Bits<u16> = read_bits16(c, ACL_PACKET_TYPE_BITS)?,
        interval_min: u16 = c.read_u16()?,
        interval_max: u16 = c.read_u16()?,
        supervision_timeout: u16 = c.read_u16()?,
    }

    SetConnectionlessPeripheralBroadcastReceive(c) {
        enable: Named<u8> = read_named(c, ENABLE)?,
        bd_addr: BdAddr = c.read_bd_addr()?,
        lt_addr: u8 = c.read_u8()?,
        interval: u16 = c.read_u16()?,
        clock_offset: u32 = c.read_u32()?,
        next_broadcast_clock: u32 = c.read_u32()?,
        supervision_timeout: u16 = c.read_u16()?,
        remote_timing_accuracy: u8 = c.read_u8()?,
        skip: u8 = c.read_u8()?,
        packet_type: Bits<u16> = read_bits16(c, ACL_PACKET_TYPE_BITS)?,
        afh_channel_map: ChannelMap = ChannelMap::read_bredr(c)?,
    }

    ReceiveSynchronizationTrain(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
        sync_scan_timeout: u16 = c.read_u16()?,
        sync_scan_window: u16 = c.read_u16()?,
        sync_scan_interval: u16 = c.read_u16()?,
    }

    RemoteOobExtendedDataRequestReply(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
        #[serde(serialize_with = "serialize_key")]
        c_192: [u8; 16] = c.read_array()?,
        #[serde(serialize_with = "serialize_key")]
        r_192: [u8; 16] = c.read_array()?,
        #[serde(serialize_with = "serialize_key")]
        c_256: [u8; 16] = c.read_array()?,
        #[serde(serialize_with = "serialize_key")]
        r_256: [u8; 16] = c.read_array()?,
    }
}

/// Create / Accept Physical Link: the key is as long as its length field says.
#[derive(Debug, serde::Serialize)]
pub struct PhysicalLink {
    physical_link_handle: u8,
    dedicated_amp_key_length: u8,
    dedicated_amp_key_type: Named<u8>,
    #[serde(serialize_with = "hex::serde::serialize")]
    dedicated_amp_key: Vec<u8>,
}

impl Decode for PhysicalLink {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let physical_link_handle = c.read_u8()?;
        let dedicated_amp_key_length = c.read_u8()?;
        let dedicated_amp_key_type = read_named(c, AMP_KEY_TYPES)?;
        let dedicated_amp_key = c.read_bytes(dedicated_amp_key_length as usize)?.to_vec();
        Ok(Self {
            physical_link_handle,
            dedicated_amp_key_length,
            dedicated_amp_key_type,
            dedicated_amp_key,
        })
    }
}

pub(super) fn decode(
    opcode: u16,
    c: &mut Cursor<'_>,
) -> Result<Option<Box<dyn CommandParameters>>, Error> {
    let params = match opcode {
        INQUIRY => read::<Inquiry>(c)?,
        PERIODIC_INQUIRY_MODE => read::<PeriodicInquiryMode>(c)?,
        CREATE_CONNECTION => read::<CreateConnection>(c)?,
        DISCONNECT => read::<HandleAndReason>(c)?,
        ADD_SCO_CONNECTION => read::<AddScoConnection>(c)?,
        ACCEPT_CONNECTION_REQUEST => read::<AcceptConnectionRequest>(c)?,
        REJECT_CONNECTION_REQUEST
        | REJECT_SYNCHRONOUS_CONNECTION_REQUEST
        | IO_CAPABILITY_REQUEST_NEGATIVE_REPLY => read::<AddressAndReason>(c)?,
        LINK_KEY_REQUEST_REPLY => read::<LinkKeyRequestReply>(c)?,
        PIN_CODE_REQUEST_REPLY => read::<PinCodeRequestReply>(c)?,
        CHANGE_CONNECTION_PACKET_TYPE => read::<ChangeConnectionPacketType>(c)?,
        SET_CONNECTION_ENCRYPTION => read::<SetConnectionEncryption>(c)?,
        LINK_KEY_SELECTION => read::<LinkKeySelection>(c)?,
        REMOTE_NAME_REQUEST => read::<RemoteNameRequest>(c)?,
        READ_REMOTE_EXTENDED_FEATURES => read::<ReadRemoteExtendedFeatures>(c)?,
        AUTHENTICATION_REQUESTED
        | CHANGE_CONNECTION_LINK_KEY
        | READ_REMOTE_SUPPORTED_FEATURES
        | READ_REMOTE_VERSION_INFORMATION
        | READ_CLOCK_OFFSET
        | READ_LMP_HANDLE => read::<ConnectionHandle>(c)?,
        CREATE_CONNECTION_CANCEL
        | LINK_KEY_REQUEST_NEGATIVE_REPLY
        | PIN_CODE_REQUEST_NEGATIVE_REPLY
        | REMOTE_NAME_REQUEST_CANCEL
        | USER_CONFIRMATION_REQUEST_REPLY
        | USER_CONFIRMATION_REQUEST_NEGATIVE_REPLY
        | USER_PASSKEY_REQUEST_NEGATIVE_REPLY
        | REMOTE_OOB_DATA_REQUEST_NEGATIVE_REPLY
        | TRUNCATED_PAGE_CANCEL => read::<Address>(c)?,
        SETUP_SYNCHRONOUS_CONNECTION => read::<SetupSynchronousConnection>(c)?,
        ACCEPT_SYNCHRONOUS_CONNECTION_REQUEST => {
            read::<AcceptSynchronousConnectionRequest>(c)?
        }
        IO_CAPABILITY_REQUEST_REPLY => read::<IoCapabilityRequestReply>(c)?,
        USER_PASSKEY_REQUEST_REPLY => read::<UserPasskeyRequestReply>(c)?,
        REMOTE_OOB_DATA_REQUEST_REPLY => read::<RemoteOobDataRequestReply>(c)?,
        CREATE_PHYSICAL_LINK | ACCEPT_PHYSICAL_LINK => read::<PhysicalLink>(c)?,
        DISCONNECT_PHYSICAL_LINK => read::<DisconnectPhysicalLink>(c)?,
        CREATE_LOGICAL_LINK | ACCEPT_LOGICAL_LINK => read::<LogicalLink>(c)?,
        DISCONNECT_LOGICAL_LINK => read::<DisconnectLogicalLink>(c)?,
        LOGICAL_LINK_CANCEL => read::<LogicalLinkCancel>(c)?,
        FLOW_SPEC_MODIFY => read::<FlowSpecModify>(c)?,
        ENHANCED_SETUP_SYNCHRONOUS_CONNECTION => {
            read::<EnhancedSetupSynchronousConnection>(c)?
        }
        ENHANCED_ACCEPT_SYNCHRONOUS_CONNECTION_REQUEST => {
            read::<EnhancedAcceptSynchronousConnectionRequest>(c)?
        }
        TRUNCATED_PAGE => read::<TruncatedPage>(c)?,
        SET_CONNECTIONLESS_PERIPHERAL_BROADCAST => {
            read::<SetConnectionlessPeripheralBroadcast>(c)?
        }
        SET_CONNECTIONLESS_PERIPHERAL_BROADCAST_RECEIVE => {
            read::<SetConnectionlessPeripheralBroadcastReceive>(c)?
        }
        RECEIVE_SYNCHRONIZATION_TRAIN => read::<ReceiveSynchronizationTrain>(c)?,
        REMOTE_OOB_EXTENDED_DATA_REQUEST_REPLY => read::<RemoteOobExtendedDataRequestReply>(c)?,
        _ => return Ok(None),
    };

    Ok(Some(params))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_json(opcode: u16, h: &str) -> serde_json::Value {
        let bytes = hex::decode(h).unwrap();
        let mut c = Cursor::new(&bytes);
        let params = decode(opcode, &mut c).unwrap().expect("known layout");
        assert!(c.is_empty(), "{} bytes left", c.remaining());
        serde_json::to_value(&params).unwrap()
    }

    #[test]
    fn inquiry_giac() {
        let json = decode_json(INQUIRY, "338b9e0800");
        assert_eq!(json["lap"], "0x9e8b33");
        assert_eq!(json["inquiry_length"], 8);
    }

    #[test]
    fn create_connection() {
        let json = decode_json(CREATE_CONNECTION, "563412efcdab18cc0100008001");
        assert_eq!(json["bd_addr"], "ab:cd:ef:12:34:56");
        assert_eq!(json["packet_type"]["set"][0], "DM1");
        assert_eq!(json["packet_type"]["set"][1], "DH1");
        assert_eq!(json["page_scan_repetition_mode"], "R1 (0x01)");
        assert_eq!(json["clock_offset"], "0x8000");
    }

    #[test]
    fn disconnect_reason() {
        let json = decode_json(DISCONNECT, "400013");
        assert_eq!(json["connection_handle"], "0x0040");
        assert_eq!(json["reason"], "Remote User Terminated Connection (0x13)");
    }

    #[test]
    fn create_physical_link_key_length() {
        let json = decode_json(CREATE_PHYSICAL_LINK, "0103050a0b0c");
        assert_eq!(json["dedicated_amp_key_type"], "Authenticated Combination Key (0x05)");
        assert_eq!(json["dedicated_amp_key"], "0a0b0c");
    }

    #[test]
    fn create_logical_link_flow_specs() {
        let spec = "0101a002ffffffff00000000ffffffff";
        let json = decode_json(CREATE_LOGICAL_LINK, &format!("07{}{}", spec, spec));
        assert_eq!(json["physical_link_handle"], 7);
        assert_eq!(json["tx_flow_spec"]["service_type"], "Best Effort (0x01)");
        assert_eq!(json["rx_flow_spec"]["maximum_sdu_size"], 0x02a0);
    }

    #[test]
    fn enhanced_setup_synchronous_connection_flattened() {
        let h = concat!(
            "0100",                 // handle
            "401f0000", "401f0000", // bandwidths
            "0500000000", "0500000000",
            "3c00", "3c00",
            "00fa0000", "00fa0000",
            "0400000000", "0400000000",
            "1000", "1000",
            "02", "02", "00", "00", "01", "01", "00", "00",
            "0d00", "8803", "02",
        );
        let json = decode_json(ENHANCED_SETUP_SYNCHRONOUS_CONNECTION, h);
        assert_eq!(json["connection_handle"], "0x0001");
        assert_eq!(json["transmit_coding_format"]["coding_format"], "mSBC (0x05)");
        assert_eq!(json["input_pcm_data_format"], "2's complement (0x02)");
        assert_eq!(json["max_latency"], 13);
        assert_eq!(
            json["retransmission_effort"],
            "At least one retransmission, optimize for link quality (0x02)"
        );
    }

    #[test]
    fn truncated_parameters_fail() {
        let bytes = hex::decode("4000").unwrap();
        let mut c = Cursor::new(&bytes);
        assert!(matches!(
            decode(DISCONNECT, &mut c),
            Err(Error::TooShort { .. })
        ));
    }
}
