//! LE Controller commands (OGF 0x08)

use serde::Serialize;

use crate::cursor::{Cursor, Decode};
use crate::errors::Error;
use crate::layers::bluetooth::common::{
    read_advertising_data, read_bits16, read_bits64, read_bits8, read_handle, read_named,
    serialize_key, AdvertisingData, ChannelMap, CodingFormat, DATA_PATH_DIRECTIONS, ENABLE,
    ERROR_CODES, LE_ADDRESS_TYPES, PHYS, PHY_BITS,
};
use crate::types::hex::{serialize_lower_hex_u16, serialize_lower_hex_u64};
use crate::types::{BdAddr, Bits, Named, ValueStrings};

use super::opcodes::*;
use super::parameters::{
    read, AdvertisingHandle, CommandParameters, ConnectionHandle, HandleAndReason, LeAddress,
    SyncHandle,
};

/// Length of the legacy advertising and scan response data fields.
pub const LEGACY_ADVERTISING_DATA_LENGTH: usize = 31;

pub static LE_EVENT_MASK_BITS: ValueStrings<u8> = &[
    (0, "LE Connection Complete"),
    (1, "LE Advertising Report"),
    (2, "LE Connection Update Complete"),
    (3, "LE Read Remote Features Complete"),
    (4, "LE Long Term Key Request"),
    (5, "LE Remote Connection Parameter Request"),
    (6, "LE Data Length Change"),
    (7, "LE Read Local P-256 Public Key Complete"),
    (8, "LE Generate DHKey Complete"),
    (9, "LE Enhanced Connection Complete"),
    (10, "LE Directed Advertising Report"),
    (11, "LE PHY Update Complete"),
    (12, "LE Extended Advertising Report"),
    (13, "LE Periodic Advertising Sync Established"),
    (14, "LE Periodic Advertising Report"),
    (15, "LE Periodic Advertising Sync Lost"),
    (16, "LE Scan Timeout"),
    (17, "LE Advertising Set Terminated"),
    (18, "LE Scan Request Received"),
    (19, "LE Channel Selection Algorithm"),
    (20, "LE Connectionless IQ Report"),
    (21, "LE Connection IQ Report"),
    (22, "LE CTE Request Failed"),
    (23, "LE Periodic Advertising Sync Transfer Received"),
    (24, "LE CIS Established"),
    (25, "LE CIS Request"),
    (26, "LE Create BIG Complete"),
    (27, "LE Terminate BIG Complete"),
    (28, "LE BIG Sync Established"),
    (29, "LE BIG Sync Lost"),
    (30, "LE Request Peer SCA Complete"),
    (31, "LE Path Loss Threshold"),
    (32, "LE Transmit Power Reporting"),
    (33, "LE BIGInfo Advertising Report"),
    (34, "LE Subrate Change"),
];

pub(crate) static ADVERTISING_TYPES: ValueStrings<u8> = &[
    (0x00, "Connectable and scannable undirected advertising (ADV_IND)"),
    (0x01, "Connectable high duty cycle directed advertising (ADV_DIRECT_IND)"),
    (0x02, "Scannable undirected advertising (ADV_SCAN_IND)"),
    (0x03, "Non connectable undirected advertising (ADV_NONCONN_IND)"),
    (0x04, "Connectable low duty cycle directed advertising (ADV_DIRECT_IND)"),
];

pub(crate) static OWN_ADDRESS_TYPES: ValueStrings<u8> = &[
    (0x00, "Public Device Address"),
    (0x01, "Random Device Address"),
    (0x02, "Resolvable Private Address, Public Address fallback"),
    (0x03, "Resolvable Private Address, Random Address fallback"),
];

pub(crate) static PEER_ADDRESS_TYPES: ValueStrings<u8> = &[
    (0x00, "Public Device Address or Public Identity Address"),
    (0x01, "Random Device Address or Random (static) Identity Address"),
];

pub(crate) static ADVERTISING_CHANNEL_BITS: ValueStrings<u8> = &[
    (0, "Channel 37"),
    (1, "Channel 38"),
    (2, "Channel 39"),
];

pub(crate) static ADVERTISING_FILTER_POLICIES: ValueStrings<u8> = &[
    (0x00, "Process scan and connection requests from all devices"),
    (0x01, "Process connection requests from all devices, scan requests only from the Filter Accept List"),
    (0x02, "Process scan requests from all devices, connection requests only from the Filter Accept List"),
    (0x03, "Process scan and connection requests only from the Filter Accept List"),
];

pub(crate) static SCAN_TYPES: ValueStrings<u8> = &[(0x00, "Passive"), (0x01, "Active")];

pub(crate) static SCANNING_FILTER_POLICIES: ValueStrings<u8> = &[
    (0x00, "Accept all advertising packets"),
    (0x01, "Accept only advertising packets from the Filter Accept List"),
    (0x02, "Accept all advertising packets, directed ones only if the initiator address is resolvable"),
    (0x03, "Accept Filter Accept List advertising packets, directed ones only if the initiator address is resolvable"),
];

static INITIATOR_FILTER_POLICIES: ValueStrings<u8> = &[
    (0x00, "Use the peer address parameters"),
    (0x01, "Use the Filter Accept List"),
];

static FILTER_DUPLICATES: ValueStrings<u8> = &[
    (0x00, "Disabled"),
    (0x01, "Enabled"),
    (0x02, "Enabled, reset for each scan period"),
];

static TEST_PAYLOADS: ValueStrings<u8> = &[
    (0x00, "PRBS9 sequence '11111111100000111101...'"),
    (0x01, "Repeated '11110000'"),
    (0x02, "Repeated '10101010'"),
    (0x03, "PRBS15 sequence"),
    (0x04, "Repeated '11111111'"),
    (0x05, "Repeated '00000000'"),
    (0x06, "Repeated '00001111'"),
    (0x07, "Repeated '01010101'"),
];

static TEST_PHYS: ValueStrings<u8> = &[
    (0x01, "LE 1M"),
    (0x02, "LE 2M"),
    (0x03, "LE Coded S=8"),
    (0x04, "LE Coded S=2"),
];

static MODULATION_INDICES: ValueStrings<u8> = &[(0x00, "Standard"), (0x01, "Stable")];

static ALL_PHYS_BITS: ValueStrings<u8> = &[
    (0, "No preference among transmitter PHYs"),
    (1, "No preference among receiver PHYs"),
];

static PHY_OPTIONS: ValueStrings<u16> = &[
    (0x0000, "No preferred coding"),
    (0x0001, "S=2 coding preferred"),
    (0x0002, "S=8 coding preferred"),
];

static ADVERTISING_EVENT_PROPERTY_BITS: ValueStrings<u8> = &[
    (0, "Connectable"),
    (1, "Scannable"),
    (2, "Directed"),
    (3, "High Duty Cycle Directed Connectable"),
    (4, "Use legacy advertising PDUs"),
    (5, "Omit advertiser's address"),
    (6, "Include TxPower"),
];

static DATA_OPERATIONS: ValueStrings<u8> = &[
    (0x00, "Intermediate fragment"),
    (0x01, "First fragment"),
    (0x02, "Last fragment"),
    (0x03, "Complete data"),
    (0x04, "Unchanged data"),
];

/// The data operation carrying the whole data in one command.
const OPERATION_COMPLETE: u8 = 0x03;

static FRAGMENT_PREFERENCES: ValueStrings<u8> = &[
    (0x00, "The Controller may fragment all data"),
    (0x01, "The Controller should not fragment or should minimize fragmentation"),
];

static PERIODIC_ADVERTISING_PROPERTY_BITS: ValueStrings<u8> = &[(6, "Include TxPower")];

static PERIODIC_ADVERTISING_ENABLE_BITS: ValueStrings<u8> = &[
    (0, "Enable"),
    (1, "Include ADI"),
];

static CREATE_SYNC_OPTION_BITS: ValueStrings<u8> = &[
    (0, "Use the Periodic Advertiser List"),
    (1, "Reporting initially disabled"),
    (2, "Duplicate filtering initially enabled"),
];

static CTE_TYPE_BITS: ValueStrings<u8> = &[
    (0, "Do not sync to packets with an AoA CTE"),
    (1, "Do not sync to packets with an AoD CTE with 1 us slots"),
    (2, "Do not sync to packets with an AoD CTE with 2 us slots"),
    (3, "Do not sync to packets with a type 3 CTE"),
    (4, "Do not sync to packets without a CTE"),
];

static PRIVACY_MODES: ValueStrings<u8> = &[
    (0x00, "Network Privacy Mode"),
    (0x01, "Device Privacy Mode"),
];

static RECEIVE_ENABLE_BITS: ValueStrings<u8> = &[
    (0, "Reporting enabled"),
    (1, "Duplicate filtering enabled"),
];

static SYNC_TRANSFER_MODES: ValueStrings<u8> = &[
    (0x00, "No attempt to synchronize"),
    (0x01, "Synchronize, reports disabled"),
    (0x02, "Synchronize, reports enabled, duplicate filtering disabled"),
    (0x03, "Synchronize, reports enabled, duplicate filtering enabled"),
];

static DATA_PATH_DIRECTION_BITS: ValueStrings<u8> = &[
    (0, "Input (Host to Controller)"),
    (1, "Output (Controller to Host)"),
];

static CHANGE_REASON_BITS: ValueStrings<u8> = &[
    (0, "Change on advertising data changes"),
    (1, "Change on scan response data changes"),
];

/// PHYs that carry scanning parameters: LE 1M and LE Coded.
const SCANNING_PHYS_MASK: u8 = 0b101;

/// PHYs that carry initiating parameters.
const INITIATING_PHYS_MASK: u8 = 0b111;

hci_parameters! {
    LeSetEventMask(c) {
        le_event_mask: Bits<u64> = read_bits64(c, LE_EVENT_MASK_BITS)?,
    }

    LeSetRandomAddress(c) {
        random_address: BdAddr = c.read_bd_addr()?,
    }

    /// Intervals in units of 0.625 ms.
    LeSetAdvertisingParameters(c) {
        advertising_interval_min: u16 = c.read_u16()?,
        advertising_interval_max: u16 = c.read_u16()?,
        advertising_type: Named<u8> = read_named(c, ADVERTISING_TYPES)?,
        own_address_type: Named<u8> = read_named(c, OWN_ADDRESS_TYPES)?,
        peer_address_type: Named<u8> = read_named(c, PEER_ADDRESS_TYPES)?,
        peer_address: BdAddr = c.read_bd_addr()?,
        advertising_channel_map: Bits<u8> = read_bits8(c, ADVERTISING_CHANNEL_BITS)?,
        advertising_filter_policy: Named<u8> = read_named(c, ADVERTISING_FILTER_POLICIES)?,
    }

    /// The length octet covers the significant part; the field itself is always 31 octets.
    LeSetAdvertisingData(c) {
        data_length: u8 = c.read_u8()?,
        data: AdvertisingData = read_advertising_data(c, LEGACY_ADVERTISING_DATA_LENGTH)?,
    }

    Enable(c) {
        enable: Named<u8> = read_named(c, ENABLE)?,
    }

    LeSetScanParameters(c) {
        scan_type: Named<u8> = read_named(c, SCAN_TYPES)?,
        scan_interval: u16 = c.read_u16()?,
        scan_window: u16 = c.read_u16()?,
        own_address_type: Named<u8> = read_named(c, OWN_ADDRESS_TYPES)?,
        scanning_filter_policy: Named<u8> = read_named(c, SCANNING_FILTER_POLICIES)?,
    }

    LeSetScanEnable(c) {
        scan_enable: Named<u8> = read_named(c, ENABLE)?,
        filter_duplicates: Named<u8> = read_named(c, ENABLE)?,
    }

    LeCreateConnection(c) {
        scan_interval: u16 = c.read_u16()?,
        scan_window: u16 = c.read_u16()?,
        initiator_filter_policy: Named<u8> = read_named(c, INITIATOR_FILTER_POLICIES)?,
        peer_address_type: Named<u8> = read_named(c, LE_ADDRESS_TYPES)?,
        peer_address: BdAddr = c.read_bd_addr()?,
        own_address_type: Named<u8> = read_named(c, OWN_ADDRESS_TYPES)?,
        connection_interval_min: u16 = c.read_u16()?,
        connection_interval_max: u16 = c.read_u16()?,
        max_latency: u16 = c.read_u16()?,
        supervision_timeout: u16 = c.read_u16()?,
        min_ce_length: u16 = c.read_u16()?,
        max_ce_length: u16 = c.read_u16()?,
    }

    /// Also the layout of LE Remote Connection Parameter Request Reply.
    LeConnectionUpdate(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        connection_interval_min: u16 = c.read_u16()?,
        connection_interval_max: u16 = c.read_u16()?,
        max_latency: u16 = c.read_u16()?,
        supervision_timeout: u16 = c.read_u16()?,
        min_ce_length: u16 = c.read_u16()?,
        max_ce_length: u16 = c.read_u16()?,
    }

    LeSetHostChannelClassification(c) {
        channel_map: ChannelMap = ChannelMap::read_le(c)?,
    }

    LeEncrypt(c) {
        #[serde(serialize_with = "serialize_key")]
        key: [u8; 16] = c.read_array()?,
        #[serde(serialize_with = "serialize_key")]
        plaintext_data: [u8; 16] = c.read_array()?,
    }

    LeEnableEncryption(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        #[serde(serialize_with = "serialize_lower_hex_u64")]
        random_number: u64 = c.read_u64()?,
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        encrypted_diversifier: u16 = c.read_u16()?,
        #[serde(serialize_with = "serialize_key")]
        long_term_key: [u8; 16] = c.read_array()?,
    }

    LeLongTermKeyRequestReply(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        #[serde(serialize_with = "serialize_key")]
        long_term_key: [u8; 16] = c.read_array()?,
    }

    LeReceiverTest(c) {
        rx_channel: u8 = c.read_u8()?,
    }

    LeTransmitterTest(c) {
        tx_channel: u8 = c.read_u8()?,
        test_data_length: u8 = c.read_u8()?,
        packet_payload: Named<u8> = read_named(c, TEST_PAYLOADS)?,
    }

    LeSetDataLength(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        tx_octets: u16 = c.read_u16()?,
        tx_time: u16 = c.read_u16()?,
    }

    LeWriteSuggestedDefaultDataLength(c) {
        suggested_max_tx_octets: u16 = c.read_u16()?,
        suggested_max_tx_time: u16 = c.read_u16()?,
    }

    LeGenerateDhKey(c) {
        #[serde(serialize_with = "hex::serde::serialize")]
        remote_p256_public_key: Vec<u8> = c.read_bytes(64)?.to_vec(),
    }

    LeAddDeviceToResolvingList(c) {
        peer_identity_address_type: Named<u8> = read_named(c, LE_ADDRESS_TYPES)?,
        peer_identity_address: BdAddr = c.read_bd_addr()?,
        #[serde(serialize_with = "serialize_key")]
        peer_irk: [u8; 16] = c.read_array()?,
        #[serde(serialize_with = "serialize_key")]
        local_irk: [u8; 16] = c.read_array()?,
    }

    LeSetResolvablePrivateAddressTimeout(c) {
        rpa_timeout: u16 = c.read_u16()?,
    }

    LeSetDefaultPhy(c) {
        all_phys: Bits<u8> = read_bits8(c, ALL_PHYS_BITS)?,
        tx_phys: Bits<u8> = read_bits8(c, PHY_BITS)?,
        rx_phys: Bits<u8> = read_bits8(c, PHY_BITS)?,
    }

    LeSetPhy(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        all_phys: Bits<u8> = read_bits8(c, ALL_PHYS_BITS)?,
        tx_phys: Bits<u8> = read_bits8(c, PHY_BITS)?,
        rx_phys: Bits<u8> = read_bits8(c, PHY_BITS)?,
        phy_options: Named<u16> = Named::lookup(c.read_u16()?, PHY_OPTIONS),
    }

    LeEnhancedReceiverTest(c) {
        rx_channel: u8 = c.read_u8()?,
        phy: Named<u8> = read_named(c, PHYS)?,
        modulation_index: Named<u8> = read_named(c, MODULATION_INDICES)?,
    }

    LeEnhancedTransmitterTest(c) {
        tx_channel: u8 = c.read_u8()?,
        test_data_length: u8 = c.read_u8()?,
        packet_payload: Named<u8> = read_named(c, TEST_PAYLOADS)?,
        phy: Named<u8> = read_named(c, TEST_PHYS)?,
    }

    LeSetAdvertisingSetRandomAddress(c) {
        advertising_handle: u8 = c.read_u8()?,
        random_address: BdAddr = c.read_bd_addr()?,
    }

    /// Primary advertising intervals in units of 0.625 ms, TX power in dBm.
    LeSetExtendedAdvertisingParameters(c) {
        advertising_handle: u8 = c.read_u8()?,
        advertising_event_properties: Bits<u16> = read_bits16(c, ADVERTISING_EVENT_PROPERTY_BITS)?,
        primary_advertising_interval_min: u32 = c.read_u24()?,
        primary_advertising_interval_max: u32 = c.read_u24()?,
        primary_advertising_channel_map: Bits<u8> = read_bits8(c, ADVERTISING_CHANNEL_BITS)?,
        own_address_type: Named<u8> = read_named(c, OWN_ADDRESS_TYPES)?,
        peer_address_type: Named<u8> = read_named(c, PEER_ADDRESS_TYPES)?,
        peer_address: BdAddr = c.read_bd_addr()?,
        advertising_filter_policy: Named<u8> = read_named(c, ADVERTISING_FILTER_POLICIES)?,
        advertising_tx_power: i8 = c.read_i8()?,
        primary_advertising_phy: Named<u8> = read_named(c, PHYS)?,
        secondary_advertising_max_skip: u8 = c.read_u8()?,
        secondary_advertising_phy: Named<u8> = read_named(c, PHYS)?,
        advertising_sid: u8 = c.read_u8()?,
        scan_request_notification_enable: Named<u8> = read_named(c, ENABLE)?,
    }

    AdvertisingSet(c) {
        advertising_handle: u8 = c.read_u8()?,
        duration: u16 = c.read_u16()?,
        max_extended_advertising_events: u8 = c.read_u8()?,
    }

    LeSetPeriodicAdvertisingParameters(c) {
        advertising_handle: u8 = c.read_u8()?,
        periodic_advertising_interval_min: u16 = c.read_u16()?,
        periodic_advertising_interval_max: u16 = c.read_u16()?,
        periodic_advertising_properties: Bits<u16> = read_bits16(c, PERIODIC_ADVERTISING_PROPERTY_BITS)?,
    }

    LeSetPeriodicAdvertisingEnable(c) {
        enable: Bits<u8> = read_bits8(c, PERIODIC_ADVERTISING_ENABLE_BITS)?,
        advertising_handle: u8 = c.read_u8()?,
    }

    LeSetExtendedScanEnable(c) {
        enable: Named<u8> = read_named(c, ENABLE)?,
        filter_duplicates: Named<u8> = read_named(c, FILTER_DUPLICATES)?,
        duration: u16 = c.read_u16()?,
        period: u16 = c.read_u16()?,
    }

    LePeriodicAdvertisingCreateSync(c) {
        options: Bits<u8> = read_bits8(c, CREATE_SYNC_OPTION_BITS)?,
        advertising_sid: u8 = c.read_u8()?,
        advertiser_address_type: Named<u8> = read_named(c, PEER_ADDRESS_TYPES)?,
        advertiser_address: BdAddr = c.read_bd_addr()?,
        skip: u16 = c.read_u16()?,
        sync_timeout: u16 = c.read_u16()?,
        sync_cte_type: Bits<u8> = read_bits8(c, CTE_TYPE_BITS)?,
    }

    PeriodicAdvertiser(c) {
        advertiser_address_type: Named<u8> = read_named(c, PEER_ADDRESS_TYPES)?,
        advertiser_address: BdAddr = c.read_bd_addr()?,
        advertising_sid: u8 = c.read_u8()?,
    }

    /// Compensation values in units of 0.1 dB.
    LeWriteRfPathCompensation(c) {
        rf_tx_path_compensation_value: i16 = c.read_u16()? as i16,
        rf_rx_path_compensation_value: i16 = c.read_u16()? as i16,
    }

    LeSetPrivacyMode(c) {
        peer_identity_address_type: Named<u8> = read_named(c, LE_ADDRESS_TYPES)?,
        peer_identity_address: BdAddr = c.read_bd_addr()?,
        privacy_mode: Named<u8> = read_named(c, PRIVACY_MODES)?,
    }

    LeSetPeriodicAdvertisingReceiveEnable(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        sync_handle: u16 = c.read_u16()?,
        enable: Bits<u8> = read_bits8(c, RECEIVE_ENABLE_BITS)?,
    }

    LePeriodicAdvertisingSyncTransfer(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        service_data: u16 = c.read_u16()?,
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        sync_handle: u16 = c.read_u16()?,
    }

    LePeriodicAdvertisingSetInfoTransfer(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        service_data: u16 = c.read_u16()?,
        advertising_handle: u8 = c.read_u8()?,
    }

    LeSetPeriodicAdvertisingSyncTransferParameters(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        mode: Named<u8> = read_named(c, SYNC_TRANSFER_MODES)?,
        skip: u16 = c.read_u16()?,
        sync_timeout: u16 = c.read_u16()?,
        cte_type: Bits<u8> = read_bits8(c, CTE_TYPE_BITS)?,
    }

    LeSetDefaultPeriodicAdvertisingSyncTransferParameters(c) {
        mode: Named<u8> = read_named(c, SYNC_TRANSFER_MODES)?,
        skip: u16 = c.read_u16()?,
        sync_timeout: u16 = c.read_u16()?,
        cte_type: Bits<u8> = read_bits8(c, CTE_TYPE_BITS)?,
    }

    CisConnection(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        cis_connection_handle: u16 = read_handle(c)?,
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        acl_connection_handle: u16 = read_handle(c)?,
    }

    LeRemoveCig(c) {
        cig_id: u8 = c.read_u8()?,
    }

    LeTerminateBig(c) {
        big_handle: u8 = c.read_u8()?,
        reason: Named<u8> = read_named(c, ERROR_CODES)?,
    }

    LeBigTerminateSync(c) {
        big_handle: u8 = c.read_u8()?,
    }

    LeRemoveIsoDataPath(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        data_path_direction: Bits<u8> = read_bits8(c, DATA_PATH_DIRECTION_BITS)?,
    }

    LeSetHostFeature(c) {
        bit_number: u8 = c.read_u8()?,
        bit_value: Named<u8> = read_named(c, ENABLE)?,
    }

    LeReadTransmitPowerLevel(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        phy: Named<u8> = read_named(c, TEST_PHYS)?,
    }

    /// Thresholds and hysteresis in dB.
    LeSetPathLossReportingParameters(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        high_threshold: u8 = c.read_u8()?,
        high_hysteresis: u8 = c.read_u8()?,
        low_threshold: u8 = c.read_u8()?,
        low_hysteresis: u8 = c.read_u8()?,
        min_time_spent: u16 = c.read_u16()?,
    }

    LeSetPathLossReportingEnable(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        enable: Named<u8> = read_named(c, ENABLE)?,
    }

    LeSetTransmitPowerReportingEnable(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        local_enable: Named<u8> = read_named(c, ENABLE)?,
        remote_enable: Named<u8> = read_named(c, ENABLE)?,
    }

    LeSetDataRelatedAddressChanges(c) {
        advertising_handle: u8 = c.read_u8()?,
        change_reasons: Bits<u8> = read_bits8(c, CHANGE_REASON_BITS)?,
    }

    LeSetDefaultSubrate(c) {
        subrate_min: u16 = c.read_u16()?,
        subrate_max: u16 = c.read_u16()?,
        max_latency: u16 = c.read_u16()?,
        continuation_number: u16 = c.read_u16()?,
        supervision_timeout: u16 = c.read_u16()?,
    }

    LeSubrateRequest(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        subrate_min: u16 = c.read_u16()?,
        subrate_max: u16 = c.read_u16()?,
        max_latency: u16 = c.read_u16()?,
        continuation_number: u16 = c.read_u16()?,
        supervision_timeout: u16 = c.read_u16()?,
    }
}

/// Reads one `T` per PHY set in `phys` (and in `allowed`), lowest bit first.
fn read_per_phy<T, F>(
    c: &mut Cursor<'_>,
    phys: u8,
    allowed: u8,
    mut read: F,
) -> Result<Vec<T>, Error>
where
    F: FnMut(&mut Cursor<'_>, &'static str) -> Result<T, Error>,
{
    let mut out = Vec::new();
    for bit in 0..8u8 {
        if phys & allowed & (1 << bit) != 0 {
            out.push(read(c, Named::lookup(bit, PHY_BITS).name())?);
        }
    }
    Ok(out)
}

#[derive(Debug, Serialize)]
pub struct ScanningPhy {
    phy: &'static str,
    scan_type: Named<u8>,
    scan_interval: u16,
    scan_window: u16,
}

#[derive(Debug, Serialize)]
pub struct LeSetExtendedScanParameters {
    own_address_type: Named<u8>,
    scanning_filter_policy: Named<u8>,
    scanning_phys: Bits<u8>,
    phys: Vec<ScanningPhy>,
}

impl Decode for LeSetExtendedScanParameters {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let own_address_type = read_named(c, OWN_ADDRESS_TYPES)?;
        let scanning_filter_policy = read_named(c, SCANNING_FILTER_POLICIES)?;
        let scanning_phys = read_bits8(c, PHY_BITS)?;
        let phys = read_per_phy(c, scanning_phys.value(), SCANNING_PHYS_MASK, |c, phy| {
            Ok(ScanningPhy {
                phy,
                scan_type: read_named(c, SCAN_TYPES)?,
                scan_interval: c.read_u16()?,
                scan_window: c.read_u16()?,
            })
        })?;

        Ok(Self {
            own_address_type,
            scanning_filter_policy,
            scanning_phys,
            phys,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct InitiatingPhy {
    phy: &'static str,
    scan_interval: u16,
    scan_window: u16,
    connection_interval_min: u16,
    connection_interval_max: u16,
    max_latency: u16,
    supervision_timeout: u16,
    min_ce_length: u16,
    max_ce_length: u16,
}

#[derive(Debug, Serialize)]
pub struct LeExtendedCreateConnection {
    initiator_filter_policy: Named<u8>,
    own_address_type: Named<u8>,
    peer_address_type: Named<u8>,
    peer_address: BdAddr,
    initiating_phys: Bits<u8>,
    phys: Vec<InitiatingPhy>,
}

impl Decode for LeExtendedCreateConnection {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let initiator_filter_policy = read_named(c, INITIATOR_FILTER_POLICIES)?;
        let own_address_type = read_named(c, OWN_ADDRESS_TYPES)?;
        let peer_address_type = read_named(c, LE_ADDRESS_TYPES)?;
        let peer_address = c.read_bd_addr()?;
        let initiating_phys = read_bits8(c, PHY_BITS)?;
        let phys = read_per_phy(c, initiating_phys.value(), INITIATING_PHYS_MASK, |c, phy| {
            Ok(InitiatingPhy {
                phy,
                scan_interval: c.read_u16()?,
                scan_window: c.read_u16()?,
                connection_interval_min: c.read_u16()?,
                connection_interval_max: c.read_u16()?,
                max_latency: c.read_u16()?,
                supervision_timeout: c.read_u16()?,
                min_ce_length: c.read_u16()?,
                max_ce_length: c.read_u16()?,
            })
        })?;

        Ok(Self {
            initiator_filter_policy,
            own_address_type,
            peer_address_type,
            peer_address,
            initiating_phys,
            phys,
        })
    }
}

/// Extended advertising, scan response and periodic advertising data.
///
/// AD structures are only decoded when the command carries the complete data; a fragment may
/// split a structure.
#[derive(Debug, Serialize)]
pub struct LeSetExtendedData {
    advertising_handle: u8,
    operation: Named<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fragment_preference: Option<Named<u8>>,
    data_length: u8,
    data: AdvertisingData,
}

impl LeSetExtendedData {
    fn read(c: &mut Cursor<'_>, with_fragment_preference: bool) -> Result<Self, Error> {
        let advertising_handle = c.read_u8()?;
        let operation = read_named(c, DATA_OPERATIONS)?;
        let fragment_preference = if with_fragment_preference {
            Some(read_named(c, FRAGMENT_PREFERENCES)?)
        } else {
            None
        };
        let data_length = c.read_u8()?;
        let data = if operation.value() == OPERATION_COMPLETE {
            read_advertising_data(c, data_length as usize)?
        } else {
            AdvertisingData::Raw(c.read_bytes(data_length as usize)?.to_vec())
        };

        Ok(Self {
            advertising_handle,
            operation,
            fragment_preference,
            data_length,
            data,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct LeSetExtendedAdvertisingEnable {
    enable: Named<u8>,
    num_sets: u8,
    sets: Vec<AdvertisingSet>,
}

impl Decode for LeSetExtendedAdvertisingEnable {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let enable = read_named(c, ENABLE)?;
        let num_sets = c.read_u8()?;
        let sets = c.read_list(num_sets as usize)?;
        Ok(Self {
            enable,
            num_sets,
            sets,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct LeCreateCis {
    cis_count: u8,
    connections: Vec<CisConnection>,
}

impl Decode for LeCreateCis {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let cis_count = c.read_u8()?;
        let connections = c.read_list(cis_count as usize)?;
        Ok(Self {
            cis_count,
            connections,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct LeSetupIsoDataPath {
    #[serde(serialize_with = "serialize_lower_hex_u16")]
    connection_handle: u16,
    data_path_direction: Named<u8>,
    data_path_id: u8,
    codec_id: CodingFormat,
    controller_delay: u32,
    codec_configuration_length: u8,
    #[serde(serialize_with = "hex::serde::serialize")]
    codec_configuration: Vec<u8>,
}

impl Decode for LeSetupIsoDataPath {
    fn decode(c: &mut Cursor<'_>) -> Result<Self, Error> {
        let connection_handle = read_handle(c)?;
        let data_path_direction = read_named(c, DATA_PATH_DIRECTIONS)?;
        let data_path_id = c.read_u8()?;
        let codec_id = c.read()?;
        let controller_delay = c.read_u24()?;
        let codec_configuration_length = c.read_u8()?;
        let codec_configuration = c.read_bytes(codec_configuration_length as usize)?.to_vec();
        Ok(Self {
            connection_handle,
            data_path_direction,
            data_path_id,
            codec_id,
            controller_delay,
            codec_configuration_length,
            codec_configuration,
        })
    }
}

fn boxed(data: LeSetExtendedData) -> Box<dyn CommandParameters> {
    Box::new(data)
}

pub(super) fn decode(
    opcode: u16,
    c: &mut Cursor<'_>,
) -> Result<Option<Box<dyn CommandParameters>>, Error> {
    let params = match opcode {
        LE_SET_EVENT_MASK => read::<LeSetEventMask>(c)?,
        LE_SET_RANDOM_ADDRESS => read::<LeSetRandomAddress>(c)?,
        LE_SET_ADVERTISING_PARAMETERS => read::<LeSetAdvertisingParameters>(c)?,
        LE_SET_ADVERTISING_DATA | LE_SET_SCAN_RESPONSE_DATA => read::<LeSetAdvertisingData>(c)?,
        LE_SET_ADVERTISING_ENABLE | LE_SET_ADDRESS_RESOLUTION_ENABLE => read::<Enable>(c)?,
        LE_SET_SCAN_PARAMETERS => read::<LeSetScanParameters>(c)?,
        LE_SET_SCAN_ENABLE => read::<LeSetScanEnable>(c)?,
        LE_CREATE_CONNECTION => read::<LeCreateConnection>(c)?,
        LE_ADD_DEVICE_TO_FILTER_ACCEPT_LIST
        | LE_REMOVE_DEVICE_FROM_FILTER_ACCEPT_LIST
        | LE_REMOVE_DEVICE_FROM_RESOLVING_LIST
        | LE_READ_PEER_RESOLVABLE_ADDRESS
        | LE_READ_LOCAL_RESOLVABLE_ADDRESS => read::<LeAddress>(c)?,
        LE_CONNECTION_UPDATE | LE_REMOTE_CONNECTION_PARAMETER_REQUEST_REPLY => {
            read::<LeConnectionUpdate>(c)?
        }
        LE_SET_HOST_CHANNEL_CLASSIFICATION => read::<LeSetHostChannelClassification>(c)?,
        LE_READ_CHANNEL_MAP
        | LE_READ_REMOTE_FEATURES
        | LE_LONG_TERM_KEY_REQUEST_NEGATIVE_REPLY
        | LE_READ_PHY
        | LE_READ_ISO_TX_SYNC
        | LE_ACCEPT_CIS_REQUEST
        | LE_REQUEST_PEER_SCA
        | LE_READ_ISO_LINK_QUALITY => read::<ConnectionHandle>(c)?,
        LE_ENCRYPT => read::<LeEncrypt>(c)?,
        LE_ENABLE_ENCRYPTION => read::<LeEnableEncryption>(c)?,
        LE_LONG_TERM_KEY_REQUEST_REPLY => read::<LeLongTermKeyRequestReply>(c)?,
        LE_RECEIVER_TEST => read::<LeReceiverTest>(c)?,
        LE_TRANSMITTER_TEST => read::<LeTransmitterTest>(c)?,
        LE_REMOTE_CONNECTION_PARAMETER_REQUEST_NEGATIVE_REPLY | LE_REJECT_CIS_REQUEST => {
            read::<HandleAndReason>(c)?
        }
        LE_SET_DATA_LENGTH => read::<LeSetDataLength>(c)?,
        LE_WRITE_SUGGESTED_DEFAULT_DATA_LENGTH => read::<LeWriteSuggestedDefaultDataLength>(c)?,
        LE_GENERATE_DHKEY => read::<LeGenerateDhKey>(c)?,
        LE_ADD_DEVICE_TO_RESOLVING_LIST => read::<LeAddDeviceToResolvingList>(c)?,
        LE_SET_RESOLVABLE_PRIVATE_ADDRESS_TIMEOUT => {
            read::<LeSetResolvablePrivateAddressTimeout>(c)?
        }
        LE_SET_DEFAULT_PHY => read::<LeSetDefaultPhy>(c)?,
        LE_SET_PHY => read::<LeSetPhy>(c)?,
        LE_ENHANCED_RECEIVER_TEST => read::<LeEnhancedReceiverTest>(c)?,
        LE_ENHANCED_TRANSMITTER_TEST => read::<LeEnhancedTransmitterTest>(c)?,
        LE_SET_ADVERTISING_SET_RANDOM_ADDRESS => read::<LeSetAdvertisingSetRandomAddress>(c)?,
        LE_SET_EXTENDED_ADVERTISING_PARAMETERS => {
            read::<LeSetExtendedAdvertisingParameters>(c)?
        }
        LE_SET_EXTENDED_ADVERTISING_DATA | LE_SET_EXTENDED_SCAN_RESPONSE_DATA => {
            boxed(LeSetExtendedData::read(c, true)?)
        }
        LE_SET_EXTENDED_ADVERTISING_ENABLE => read::<LeSetExtendedAdvertisingEnable>(c)?,
        LE_REMOVE_ADVERTISING_SET => read::<AdvertisingHandle>(c)?,
        LE_SET_PERIODIC_ADVERTISING_PARAMETERS => {
            read::<LeSetPeriodicAdvertisingParameters>(c)?
        }
        LE_SET_PERIODIC_ADVERTISING_DATA => boxed(LeSetExtendedData::read(c, false)?),
        LE_SET_PERIODIC_ADVERTISING_ENABLE => read::<LeSetPeriodicAdvertisingEnable>(c)?,
        LE_SET_EXTENDED_SCAN_PARAMETERS => read::<LeSetExtendedScanParameters>(c)?,
        LE_SET_EXTENDED_SCAN_ENABLE => read::<LeSetExtendedScanEnable>(c)?,
        LE_EXTENDED_CREATE_CONNECTION => read::<LeExtendedCreateConnection>(c)?,
        LE_PERIODIC_ADVERTISING_CREATE_SYNC => read::<LePeriodicAdvertisingCreateSync>(c)?,
        LE_PERIODIC_ADVERTISING_TERMINATE_SYNC => read::<SyncHandle>(c)?,
        LE_ADD_DEVICE_TO_PERIODIC_ADVERTISER_LIST
        | LE_REMOVE_DEVICE_FROM_PERIODIC_ADVERTISER_LIST => read::<PeriodicAdvertiser>(c)?,
        LE_WRITE_RF_PATH_COMPENSATION => read::<LeWriteRfPathCompensation>(c)?,
        LE_SET_PRIVACY_MODE => read::<LeSetPrivacyMode>(c)?,
        LE_SET_PERIODIC_ADVERTISING_RECEIVE_ENABLE => {
            read::<LeSetPeriodicAdvertisingReceiveEnable>(c)?
        }
        LE_PERIODIC_ADVERTISING_SYNC_TRANSFER => read::<LePeriodicAdvertisingSyncTransfer>(c)?,
        LE_PERIODIC_ADVERTISING_SET_INFO_TRANSFER => {
            read::<LePeriodicAdvertisingSetInfoTransfer>(c)?
        }
        LE_SET_PERIODIC_ADVERTISING_SYNC_TRANSFER_PARAMETERS => {
            read::<LeSetPeriodicAdvertisingSyncTransferParameters>(c)?
        }
        LE_SET_DEFAULT_PERIODIC_ADVERTISING_SYNC_TRANSFER_PARAMETERS => {
            read::<LeSetDefaultPeriodicAdvertisingSyncTransferParameters>(c)?
        }
        LE_CREATE_CIS => read::<LeCreateCis>(c)?,
        LE_REMOVE_CIG => read::<LeRemoveCig>(c)?,
        LE_TERMINATE_BIG => read::<LeTerminateBig>(c)?,
        LE_BIG_TERMINATE_SYNC => read::<LeBigTerminateSync>(c)?,
        LE_SETUP_ISO_DATA_PATH => read::<LeSetupIsoDataPath>(c)?,
        LE_REMOVE_ISO_DATA_PATH => read::<LeRemoveIsoDataPath>(c)?,
        LE_SET_HOST_FEATURE => read::<LeSetHostFeature>(c)?,
        LE_ENHANCED_READ_TRANSMIT_POWER_LEVEL | LE_READ_REMOTE_TRANSMIT_POWER_LEVEL => {
            read::<LeReadTransmitPowerLevel>(c)?
        }
        LE_SET_PATH_LOSS_REPORTING_PARAMETERS => read::<LeSetPathLossReportingParameters>(c)?,
        LE_SET_PATH_LOSS_REPORTING_ENABLE => read::<LeSetPathLossReportingEnable>(c)?,
        LE_SET_TRANSMIT_POWER_REPORTING_ENABLE => read::<LeSetTransmitPowerReportingEnable>(c)?,
        LE_SET_DATA_RELATED_ADDRESS_CHANGES => read::<LeSetDataRelatedAddressChanges>(c)?,
        LE_SET_DEFAULT_SUBRATE => read::<LeSetDefaultSubrate>(c)?,
        LE_SUBRATE_REQUEST => read::<LeSubrateRequest>(c)?,
        _ => return Ok(None),
    };

    Ok(Some(params))
}
