//! HCI command opcodes
//!
//! An opcode is `(OGF << 10) | OCF`.

use crate::types::{Named, ValueStrings};

pub const OGF_LINK_CONTROL: u8 = 0x01;
pub const OGF_LINK_POLICY: u8 = 0x02;
pub const OGF_CONTROLLER_BASEBAND: u8 = 0x03;
pub const OGF_INFORMATIONAL: u8 = 0x04;
pub const OGF_STATUS: u8 = 0x05;
pub const OGF_TESTING: u8 = 0x06;
pub const OGF_LE_CONTROLLER: u8 = 0x08;
pub const OGF_VENDOR_SPECIFIC: u8 = 0x3f;

pub(crate) static OGF_NAMES: ValueStrings<u8> = &[
    (OGF_LINK_CONTROL, "Link Control Commands"),
    (OGF_LINK_POLICY, "Link Policy Commands"),
    (OGF_CONTROLLER_BASEBAND, "Controller & Baseband Commands"),
    (OGF_INFORMATIONAL, "Informational Parameters"),
    (OGF_STATUS, "Status Parameters"),
    (OGF_TESTING, "Testing Commands"),
    (OGF_LE_CONTROLLER, "LE Controller Commands"),
    (OGF_VENDOR_SPECIFIC, "Vendor-Specific Commands"),
];

pub const fn opcode(ogf: u8, ocf: u16) -> u16 {
    ((ogf as u16) << 10) | (ocf & 0x03ff)
}

pub const fn ogf(opcode: u16) -> u8 {
    (opcode >> 10) as u8
}

pub const fn ocf(opcode: u16) -> u16 {
    opcode & 0x03ff
}

macro_rules! hci_opcodes {
    ($($ogf:ident: { $($name:ident = $ocf:literal => $desc:literal,)* })*) => {
        $($(
            pub const $name: u16 = opcode($ogf, $ocf);
        )*)*

        static COMMAND_NAMES: ValueStrings<u16> = &[
            $($(($name, $desc),)*)*
        ];
    };
}

/// Name of the command `opcode`, or `Unknown`.
pub fn command_name(opcode: u16) -> &'static str {
    Named::lookup(opcode, COMMAND_NAMES).name()
}

/// Whether `opcode` is in the command table.
pub fn is_known(opcode: u16) -> bool {
    COMMAND_NAMES.iter().any(|(known, _)| *known == opcode)
}

hci_opcodes! {
    OGF_LINK_CONTROL: {
        INQUIRY = 0x001 => "Inquiry",
        INQUIRY_CANCEL = 0x002 => "Inquiry Cancel",
        PERIODIC_INQUIRY_MODE = 0x003 => "Periodic Inquiry Mode",
        EXIT_PERIODIC_INQUIRY_MODE = 0x004 => "Exit Periodic Inquiry Mode",
        CREATE_CONNECTION = 0x005 => "Create Connection",
        DISCONNECT = 0x006 => "Disconnect",
        ADD_SCO_CONNECTION = 0x007 => "Add SCO Connection",
        CREATE_CONNECTION_CANCEL = 0x008 => "Create Connection Cancel",
        ACCEPT_CONNECTION_REQUEST = 0x009 => "Accept Connection Request",
        REJECT_CONNECTION_REQUEST = 0x00a => "Reject Connection Request",
        LINK_KEY_REQUEST_REPLY = 0x00b => "Link Key Request Reply",
        LINK_KEY_REQUEST_NEGATIVE_REPLY = 0x00c => "Link Key Request Negative Reply",
        PIN_CODE_REQUEST_REPLY = 0x00d => "PIN Code Request Reply",
        PIN_CODE_REQUEST_NEGATIVE_REPLY = 0x00e => "PIN Code Request Negative Reply",
        CHANGE_CONNECTION_PACKET_TYPE = 0x00f => "Change Connection Packet Type",
        AUTHENTICATION_REQUESTED = 0x011 => "Authentication Requested",
        SET_CONNECTION_ENCRYPTION = 0x013 => "Set Connection Encryption",
        CHANGE_CONNECTION_LINK_KEY = 0x015 => "Change Connection Link Key",
        LINK_KEY_SELECTION = 0x017 => "Link Key Selection",
        REMOTE_NAME_REQUEST = 0x019 => "Remote Name Request",
        REMOTE_NAME_REQUEST_CANCEL = 0x01a => "Remote Name Request Cancel",
        READ_REMOTE_SUPPORTED_FEATURES = 0x01b => "Read Remote Supported Features",
        READ_REMOTE_EXTENDED_FEATURES = 0x01c => "Read Remote Extended Features",
        READ_REMOTE_VERSION_INFORMATION = 0x01d => "Read Remote Version Information",
        READ_CLOCK_OFFSET = 0x01f => "Read Clock Offset",
        READ_LMP_HANDLE = 0x020 => "Read LMP Handle",
        SETUP_SYNCHRONOUS_CONNECTION = 0x028 => "Setup Synchronous Connection",
        ACCEPT_SYNCHRONOUS_CONNECTION_REQUEST = 0x029 => "Accept Synchronous Connection Request",
        REJECT_SYNCHRONOUS_CONNECTION_REQUEST = 0x02a => "Reject Synchronous Connection Request",
        IO_CAPABILITY_REQUEST_REPLY = 0x02b => "IO Capability Request Reply",
        USER_CONFIRMATION_REQUEST_REPLY = 0x02c => "User Confirmation Request Reply",
        USER_CONFIRMATION_REQUEST_NEGATIVE_REPLY = 0x02d => "User Confirmation Request Negative Reply",
        USER_PASSKEY_REQUEST_REPLY = 0x02e => "User Passkey Request Reply",
        USER_PASSKEY_REQUEST_NEGATIVE_REPLY = 0x02f => "User Passkey Request Negative Reply",
        REMOTE_OOB_DATA_REQUEST_REPLY = 0x030 => "Remote OOB Data Request Reply",
        REMOTE_OOB_DATA_REQUEST_NEGATIVE_REPLY = 0x033 => "Remote OOB Data Request Negative Reply",
        IO_CAPABILITY_REQUEST_NEGATIVE_REPLY = 0x034 => "IO Capability Request Negative Reply",
        CREATE_PHYSICAL_LINK = 0x035 => "Create Physical Link",
        ACCEPT_PHYSICAL_LINK = 0x036 => "Accept Physical Link",
        DISCONNECT_PHYSICAL_LINK = 0x037 => "Disconnect Physical Link",
        CREATE_LOGICAL_LINK = 0x038 => "Create Logical Link",
        ACCEPT_LOGICAL_LINK = 0x039 => "Accept Logical Link",
        DISCONNECT_LOGICAL_LINK = 0x03a => "Disconnect Logical Link",
        LOGICAL_LINK_CANCEL = 0x03b => "Logical Link Cancel",
        FLOW_SPEC_MODIFY = 0x03c => "Flow Spec Modify",
        ENHANCED_SETUP_SYNCHRONOUS_CONNECTION = 0x03d => "Enhanced Setup Synchronous Connection",
        ENHANCED_ACCEPT_SYNCHRONOUS_CONNECTION_REQUEST = 0x03e => "Enhanced Accept Synchronous Connection Request",
        TRUNCATED_PAGE = 0x03f => "Truncated Page",
        TRUNCATED_PAGE_CANCEL = 0x040 => "Truncated Page Cancel",
        SET_CONNECTIONLESS_PERIPHERAL_BROADCAST = 0x041 => "Set Connectionless Peripheral Broadcast",
        SET_CONNECTIONLESS_PERIPHERAL_BROADCAST_RECEIVE = 0x042 => "Set Connectionless Peripheral Broadcast Receive",
        START_SYNCHRONIZATION_TRAIN = 0x043 => "Start Synchronization Train",
        RECEIVE_SYNCHRONIZATION_TRAIN = 0x044 => "Receive Synchronization Train",
        REMOTE_OOB_EXTENDED_DATA_REQUEST_REPLY = 0x045 => "Remote OOB Extended Data Request Reply",
    }

    OGF_LINK_POLICY: {
        HOLD_MODE = 0x001 => "Hold Mode",
        SNIFF_MODE = 0x003 => "Sniff Mode",
        EXIT_SNIFF_MODE = 0x004 => "Exit Sniff Mode",
        PARK_STATE = 0x005 => "Park State",
        EXIT_PARK_STATE = 0x006 => "Exit Park State",
        QOS_SETUP = 0x007 => "QoS Setup",
        ROLE_DISCOVERY = 0x009 => "Role Discovery",
        SWITCH_ROLE = 0x00b => "Switch Role",
        READ_LINK_POLICY_SETTINGS = 0x00c => "Read Link Policy Settings",
        WRITE_LINK_POLICY_SETTINGS = 0x00d => "Write Link Policy Settings",
        READ_DEFAULT_LINK_POLICY_SETTINGS = 0x00e => "Read Default Link Policy Settings",
        WRITE_DEFAULT_LINK_POLICY_SETTINGS = 0x00f => "Write Default Link Policy Settings",
        FLOW_SPECIFICATION = 0x010 => "Flow Specification",
        SNIFF_SUBRATING = 0x011 => "Sniff Subrating",
    }

    OGF_CONTROLLER_BASEBAND: {
        SET_EVENT_MASK = 0x001 => "Set Event Mask",
        RESET = 0x003 => "Reset",
        SET_EVENT_FILTER = 0x005 => "Set Event Filter",
        FLUSH = 0x008 => "Flush",
        READ_PIN_TYPE = 0x009 => "Read PIN Type",
        WRITE_PIN_TYPE = 0x00a => "Write PIN Type",
        CREATE_NEW_UNIT_KEY = 0x00b => "Create New Unit Key",
        READ_STORED_LINK_KEY = 0x00d => "Read Stored Link Key",
        WRITE_STORED_LINK_KEY = 0x011 => "Write Stored Link Key",
        DELETE_STORED_LINK_KEY = 0x012 => "Delete Stored Link Key",
        WRITE_LOCAL_NAME = 0x013 => "Write Local Name",
        READ_LOCAL_NAME = 0x014 => "Read Local Name",
        READ_CONNECTION_ACCEPT_TIMEOUT = 0x015 => "Read Connection Accept Timeout",
        WRITE_CONNECTION_ACCEPT_TIMEOUT = 0x016 => "Write Connection Accept Timeout",
        READ_PAGE_TIMEOUT = 0x017 => "Read Page Timeout",
        WRITE_PAGE_TIMEOUT = 0x018 => "Write Page Timeout",
        READ_SCAN_ENABLE = 0x019 => "Read Scan Enable",
        WRITE_SCAN_ENABLE = 0x01a => "Write Scan Enable",
        READ_PAGE_SCAN_ACTIVITY = 0x01b => "Read Page Scan Activity",
        WRITE_PAGE_SCAN_ACTIVITY = 0x01c => "Write Page Scan Activity",
        READ_INQUIRY_SCAN_ACTIVITY = 0x01d => "Read Inquiry Scan Activity",
        WRITE_INQUIRY_SCAN_ACTIVITY = 0x01e => "Write Inquiry Scan Activity",
        READ_AUTHENTICATION_ENABLE = 0x01f => "Read Authentication Enable",
        WRITE_AUTHENTICATION_ENABLE = 0x020 => "Write Authentication Enable",
        READ_ENCRYPTION_MODE = 0x021 => "Read Encryption Mode",
        WRITE_ENCRYPTION_MODE = 0x022 => "Write Encryption Mode",
        READ_CLASS_OF_DEVICE = 0x023 => "Read Class of Device",
        WRITE_CLASS_OF_DEVICE = 0x024 => "Write Class of Device",
        READ_VOICE_SETTING = 0x025 => "Read Voice Setting",
        WRITE_VOICE_SETTING = 0x026 => "Write Voice Setting",
        READ_AUTOMATIC_FLUSH_TIMEOUT = 0x027 => "Read Automatic Flush Timeout",
        WRITE_AUTOMATIC_FLUSH_TIMEOUT = 0x028 => "Write Automatic Flush Timeout",
        READ_NUM_BROADCAST_RETRANSMISSIONS = 0x029 => "Read Num Broadcast Retransmissions",
        WRITE_NUM_BROADCAST_RETRANSMISSIONS = 0x02a => "Write Num Broadcast Retransmissions",
        READ_HOLD_MODE_ACTIVITY = 0x02b => "Read Hold Mode Activity",
        WRITE_HOLD_MODE_ACTIVITY = 0x02c => "Write Hold Mode Activity",
        READ_TRANSMIT_POWER_LEVEL = 0x02d => "Read Transmit Power Level",
        READ_SYNCHRONOUS_FLOW_CONTROL_ENABLE = 0x02e => "Read Synchronous Flow Control Enable",
        WRITE_SYNCHRONOUS_FLOW_CONTROL_ENABLE = 0x02f => "Write Synchronous Flow Control Enable",
        SET_CONTROLLER_TO_HOST_FLOW_CONTROL = 0x031 => "Set Controller To Host Flow Control",
        HOST_BUFFER_SIZE = 0x033 => "Host Buffer Size",
        HOST_NUMBER_OF_COMPLETED_PACKETS = 0x035 => "Host Number Of Completed Packets",
        READ_LINK_SUPERVISION_TIMEOUT = 0x036 => "Read Link Supervision Timeout",
        WRITE_LINK_SUPERVISION_TIMEOUT = 0x037 => "Write Link Supervision Timeout",
        READ_NUMBER_OF_SUPPORTED_IAC = 0x038 => "Read Number Of Supported IAC",
        READ_CURRENT_IAC_LAP = 0x039 => "Read Current IAC LAP",
        WRITE_CURRENT_IAC_LAP = 0x03a => "Write Current IAC LAP",
        READ_PAGE_SCAN_PERIOD_MODE = 0x03b => "Read Page Scan Period Mode",
        WRITE_PAGE_SCAN_PERIOD_MODE = 0x03c => "Write Page Scan Period Mode",
        SET_AFH_HOST_CHANNEL_CLASSIFICATION = 0x03f => "Set AFH Host Channel Classification",
        READ_INQUIRY_SCAN_TYPE = 0x042 => "Read Inquiry Scan Type",
        WRITE_INQUIRY_SCAN_TYPE = 0x043 => "Write Inquiry Scan Type",
        READ_INQUIRY_MODE = 0x044 => "Read Inquiry Mode",
        WRITE_INQUIRY_MODE = 0x045 => "Write Inquiry Mode",
        READ_PAGE_SCAN_TYPE = 0x046 => "Read Page Scan Type",
        WRITE_PAGE_SCAN_TYPE = 0x047 => "Write Page Scan Type",
        READ_AFH_CHANNEL_ASSESSMENT_MODE = 0x048 => "Read AFH Channel Assessment Mode",
        WRITE_AFH_CHANNEL_ASSESSMENT_MODE = 0x049 => "Write AFH Channel Assessment Mode",
        READ_EXTENDED_INQUIRY_RESPONSE = 0x051 => "Read Extended Inquiry Response",
        WRITE_EXTENDED_INQUIRY_RESPONSE = 0x052 => "Write Extended Inquiry Response",
        REFRESH_ENCRYPTION_KEY = 0x053 => "Refresh Encryption Key",
        READ_SIMPLE_PAIRING_MODE = 0x055 => "Read Simple Pairing Mode",
        WRITE_SIMPLE_PAIRING_MODE = 0x056 => "Write Simple Pairing Mode",
        READ_LOCAL_OOB_DATA = 0x057 => "Read Local OOB Data",
        READ_INQUIRY_RESPONSE_TRANSMIT_POWER_LEVEL = 0x058 => "Read Inquiry Response Transmit Power Level",
        WRITE_INQUIRY_TRANSMIT_POWER_LEVEL = 0x059 => "Write Inquiry Transmit Power Level",
        READ_DEFAULT_ERRONEOUS_DATA_REPORTING = 0x05a => "Read Default Erroneous Data Reporting",
        WRITE_DEFAULT_ERRONEOUS_DATA_REPORTING = 0x05b => "Write Default Erroneous Data Reporting",
        ENHANCED_FLUSH = 0x05f => "Enhanced Flush",
        SEND_KEYPRESS_NOTIFICATION = 0x060 => "Send Keypress Notification",
        READ_LOGICAL_LINK_ACCEPT_TIMEOUT = 0x061 => "Read Logical Link Accept Timeout",
        WRITE_LOGICAL_LINK_ACCEPT_TIMEOUT = 0x062 => "Write Logical Link Accept Timeout",
        SET_EVENT_MASK_PAGE_2 = 0x063 => "Set Event Mask Page 2",
        READ_LOCATION_DATA = 0x064 => "Read Location Data",
        WRITE_LOCATION_DATA = 0x065 => "Write Location Data",
        READ_FLOW_CONTROL_MODE = 0x066 => "Read Flow Control Mode",
        WRITE_FLOW_CONTROL_MODE = 0x067 => "Write Flow Control Mode",
        READ_ENHANCED_TRANSMIT_POWER_LEVEL = 0x068 => "Read Enhanced Transmit Power Level",
        READ_BEST_EFFORT_FLUSH_TIMEOUT = 0x069 => "Read Best Effort Flush Timeout",
        WRITE_BEST_EFFORT_FLUSH_TIMEOUT = 0x06a => "Write Best Effort Flush Timeout",
        SHORT_RANGE_MODE = 0x06b => "Short Range Mode",
        READ_LE_HOST_SUPPORT = 0x06c => "Read LE Host Support",
        WRITE_LE_HOST_SUPPORT = 0x06d => "Write LE Host Support",
        SET_MWS_CHANNEL_PARAMETERS = 0x06e => "Set MWS Channel Parameters",
        SET_EXTERNAL_FRAME_CONFIGURATION = 0x06f => "Set External Frame Configuration",
        SET_MWS_SIGNALING = 0x070 => "Set MWS Signaling",
        SET_MWS_TRANSPORT_LAYER = 0x071 => "Set MWS Transport Layer",
        SET_MWS_SCAN_FREQUENCY_TABLE = 0x072 => "Set MWS Scan Frequency Table",
        SET_MWS_PATTERN_CONFIGURATION = 0x073 => "Set MWS PATTERN Configuration",
        SET_RESERVED_LT_ADDR = 0x074 => "Set Reserved LT_ADDR",
        DELETE_RESERVED_LT_ADDR = 0x075 => "Delete Reserved LT_ADDR",
        SET_CONNECTIONLESS_PERIPHERAL_BROADCAST_DATA = 0x076 => "Set Connectionless Peripheral Broadcast Data",
        READ_SYNCHRONIZATION_TRAIN_PARAMETERS = 0x077 => "Read Synchronization Train Parameters",
        WRITE_SYNCHRONIZATION_TRAIN_PARAMETERS = 0x078 => "Write Synchronization Train Parameters",
        READ_SECURE_CONNECTIONS_HOST_SUPPORT = 0x079 => "Read Secure Connections Host Support",
        WRITE_SECURE_CONNECTIONS_HOST_SUPPORT = 0x07a => "Write Secure Connections Host Support",
        READ_AUTHENTICATED_PAYLOAD_TIMEOUT = 0x07b => "Read Authenticated Payload Timeout",
        WRITE_AUTHENTICATED_PAYLOAD_TIMEOUT = 0x07c => "Write Authenticated Payload Timeout",
        READ_LOCAL_OOB_EXTENDED_DATA = 0x07d => "Read Local OOB Extended Data",
        READ_EXTENDED_PAGE_TIMEOUT = 0x07e => "Read Extended Page Timeout",
        WRITE_EXTENDED_PAGE_TIMEOUT = 0x07f => "Write Extended Page Timeout",
        READ_EXTENDED_INQUIRY_LENGTH = 0x080 => "Read Extended Inquiry Length",
        WRITE_EXTENDED_INQUIRY_LENGTH = 0x081 => "Write Extended Inquiry Length",
        SET_ECOSYSTEM_BASE_INTERVAL = 0x082 => "Set Ecosystem Base Interval",
        CONFIGURE_DATA_PATH = 0x083 => "Configure Data Path",
        SET_MIN_ENCRYPTION_KEY_SIZE = 0x084 => "Set Min Encryption Key Size",
    }

    OGF_INFORMATIONAL: {
        READ_LOCAL_VERSION_INFORMATION = 0x001 => "Read Local Version Information",
        READ_LOCAL_SUPPORTED_COMMANDS = 0x002 => "Read Local Supported Commands",
        READ_LOCAL_SUPPORTED_FEATURES = 0x003 => "Read Local Supported Features",
        READ_LOCAL_EXTENDED_FEATURES = 0x004 => "Read Local Extended Features",
        READ_BUFFER_SIZE = 0x005 => "Read Buffer Size",
        READ_BD_ADDR = 0x009 => "Read BD_ADDR",
        READ_DATA_BLOCK_SIZE = 0x00a => "Read Data Block Size",
        READ_LOCAL_SUPPORTED_CODECS = 0x00b => "Read Local Supported Codecs",
        READ_LOCAL_SIMPLE_PAIRING_OPTIONS = 0x00c => "Read Local Simple Pairing Options",
        READ_LOCAL_SUPPORTED_CODECS_V2 = 0x00d => "Read Local Supported Codecs V2",
        READ_LOCAL_SUPPORTED_CODEC_CAPABILITIES = 0x00e => "Read Local Supported Codec Capabilities",
        READ_LOCAL_SUPPORTED_CONTROLLER_DELAY = 0x00f => "Read Local Supported Controller Delay",
    }

    OGF_STATUS: {
        READ_FAILED_CONTACT_COUNTER = 0x001 => "Read Failed Contact Counter",
        RESET_FAILED_CONTACT_COUNTER = 0x002 => "Reset Failed Contact Counter",
        READ_LINK_QUALITY = 0x003 => "Read Link Quality",
        READ_RSSI = 0x005 => "Read RSSI",
        READ_AFH_CHANNEL_MAP = 0x006 => "Read AFH Channel Map",
        READ_CLOCK = 0x007 => "Read Clock",
        READ_ENCRYPTION_KEY_SIZE = 0x008 => "Read Encryption Key Size",
        READ_LOCAL_AMP_INFO = 0x009 => "Read Local AMP Info",
        READ_LOCAL_AMP_ASSOC = 0x00a => "Read Local AMP ASSOC",
        WRITE_REMOTE_AMP_ASSOC = 0x00b => "Write Remote AMP ASSOC",
        GET_MWS_TRANSPORT_LAYER_CONFIGURATION = 0x00c => "Get MWS Transport Layer Configuration",
        SET_TRIGGERED_CLOCK_CAPTURE = 0x00d => "Set Triggered Clock Capture",
    }

    OGF_TESTING: {
        READ_LOOPBACK_MODE = 0x001 => "Read Loopback Mode",
        WRITE_LOOPBACK_MODE = 0x002 => "Write Loopback Mode",
        ENABLE_DEVICE_UNDER_TEST_MODE = 0x003 => "Enable Device Under Test Mode",
        WRITE_SIMPLE_PAIRING_DEBUG_MODE = 0x004 => "Write Simple Pairing Debug Mode",
        ENABLE_AMP_RECEIVER_REPORTS = 0x007 => "Enable AMP Receiver Reports",
        AMP_TEST_END = 0x008 => "AMP Test End",
        AMP_TEST = 0x009 => "AMP Test",
        WRITE_SECURE_CONNECTIONS_TEST_MODE = 0x00a => "Write Secure Connections Test Mode",
    }

    OGF_LE_CONTROLLER: {
        LE_SET_EVENT_MASK = 0x001 => "LE Set Event Mask",
        LE_READ_BUFFER_SIZE = 0x002 => "LE Read Buffer Size",
        LE_READ_LOCAL_SUPPORTED_FEATURES = 0x003 => "LE Read Local Supported Features",
        LE_SET_RANDOM_ADDRESS = 0x005 => "LE Set Random Address",
        LE_SET_ADVERTISING_PARAMETERS = 0x006 => "LE Set Advertising Parameters",
        LE_READ_ADVERTISING_PHYSICAL_CHANNEL_TX_POWER = 0x007 => "LE Read Advertising Physical Channel Tx Power",
        LE_SET_ADVERTISING_DATA = 0x008 => "LE Set Advertising Data",
        LE_SET_SCAN_RESPONSE_DATA = 0x009 => "LE Set Scan Response Data",
        LE_SET_ADVERTISING_ENABLE = 0x00a => "LE Set Advertising Enable",
        LE_SET_SCAN_PARAMETERS = 0x00b => "LE Set Scan Parameters",
        LE_SET_SCAN_ENABLE = 0x00c => "LE Set Scan Enable",
        LE_CREATE_CONNECTION = 0x00d => "LE Create Connection",
        LE_CREATE_CONNECTION_CANCEL = 0x00e => "LE Create Connection Cancel",
        LE_READ_FILTER_ACCEPT_LIST_SIZE = 0x00f => "LE Read Filter Accept List Size",
        LE_CLEAR_FILTER_ACCEPT_LIST = 0x010 => "LE Clear Filter Accept List",
        LE_ADD_DEVICE_TO_FILTER_ACCEPT_LIST = 0x011 => "LE Add Device To Filter Accept List",
        LE_REMOVE_DEVICE_FROM_FILTER_ACCEPT_LIST = 0x012 => "LE Remove Device From Filter Accept List",
        LE_CONNECTION_UPDATE = 0x013 => "LE Connection Update",
        LE_SET_HOST_CHANNEL_CLASSIFICATION = 0x014 => "LE Set Host Channel Classification",
        LE_READ_CHANNEL_MAP = 0x015 => "LE Read Channel Map",
        LE_READ_REMOTE_FEATURES = 0x016 => "LE Read Remote Features",
        LE_ENCRYPT = 0x017 => "LE Encrypt",
        LE_RAND = 0x018 => "LE Rand",
        LE_ENABLE_ENCRYPTION = 0x019 => "LE Enable Encryption",
        LE_LONG_TERM_KEY_REQUEST_REPLY = 0x01a => "LE Long Term Key Request Reply",
        LE_LONG_TERM_KEY_REQUEST_NEGATIVE_REPLY = 0x01b => "LE Long Term Key Request Negative Reply",
        LE_READ_SUPPORTED_STATES = 0x01c => "LE Read Supported States",
        LE_RECEIVER_TEST = 0x01d => "LE Receiver Test",
        LE_TRANSMITTER_TEST = 0x01e => "LE Transmitter Test",
        LE_TEST_END = 0x01f => "LE Test End",
        LE_REMOTE_CONNECTION_PARAMETER_REQUEST_REPLY = 0x020 => "LE Remote Connection Parameter Request Reply",
        LE_REMOTE_CONNECTION_PARAMETER_REQUEST_NEGATIVE_REPLY = 0x021 => "LE Remote Connection Parameter Request Negative Reply",
        LE_SET_DATA_LENGTH = 0x022 => "LE Set Data Length",
        LE_READ_SUGGESTED_DEFAULT_DATA_LENGTH = 0x023 => "LE Read Suggested Default Data Length",
        LE_WRITE_SUGGESTED_DEFAULT_DATA_LENGTH = 0x024 => "LE Write Suggested Default Data Length",
        LE_READ_LOCAL_P256_PUBLIC_KEY = 0x025 => "LE Read Local P-256 Public Key",
        LE_GENERATE_DHKEY = 0x026 => "LE Generate DHKey",
        LE_ADD_DEVICE_TO_RESOLVING_LIST = 0x027 => "LE Add Device To Resolving List",
        LE_REMOVE_DEVICE_FROM_RESOLVING_LIST = 0x028 => "LE Remove Device From Resolving List",
        LE_CLEAR_RESOLVING_LIST = 0x029 => "LE Clear Resolving List",
        LE_READ_RESOLVING_LIST_SIZE = 0x02a => "LE Read Resolving List Size",
        LE_READ_PEER_RESOLVABLE_ADDRESS = 0x02b => "LE Read Peer Resolvable Address",
        LE_READ_LOCAL_RESOLVABLE_ADDRESS = 0x02c => "LE Read Local Resolvable Address",
        LE_SET_ADDRESS_RESOLUTION_ENABLE = 0x02d => "LE Set Address Resolution Enable",
        LE_SET_RESOLVABLE_PRIVATE_ADDRESS_TIMEOUT = 0x02e => "LE Set Resolvable Private Address Timeout",
        LE_READ_MAXIMUM_DATA_LENGTH = 0x02f => "LE Read Maximum Data Length",
        LE_READ_PHY = 0x030 => "LE Read PHY",
        LE_SET_DEFAULT_PHY = 0x031 => "LE Set Default PHY",
        LE_SET_PHY = 0x032 => "LE Set PHY",
        LE_ENHANCED_RECEIVER_TEST = 0x033 => "LE Enhanced Receiver Test",
        LE_ENHANCED_TRANSMITTER_TEST = 0x034 => "LE Enhanced Transmitter Test",
        LE_SET_ADVERTISING_SET_RANDOM_ADDRESS = 0x035 => "LE Set Advertising Set Random Address",
        LE_SET_EXTENDED_ADVERTISING_PARAMETERS = 0x036 => "LE Set Extended Advertising Parameters",
        LE_SET_EXTENDED_ADVERTISING_DATA = 0x037 => "LE Set Extended Advertising Data",
        LE_SET_EXTENDED_SCAN_RESPONSE_DATA = 0x038 => "LE Set Extended Scan Response Data",
        LE_SET_EXTENDED_ADVERTISING_ENABLE = 0x039 => "LE Set Extended Advertising Enable",
        LE_READ_MAXIMUM_ADVERTISING_DATA_LENGTH = 0x03a => "LE Read Maximum Advertising Data Length",
        LE_READ_NUMBER_OF_SUPPORTED_ADVERTISING_SETS = 0x03b => "LE Read Number of Supported Advertising Sets",
        LE_REMOVE_ADVERTISING_SET = 0x03c => "LE Remove Advertising Set",
        LE_CLEAR_ADVERTISING_SETS = 0x03d => "LE Clear Advertising Sets",
        LE_SET_PERIODIC_ADVERTISING_PARAMETERS = 0x03e => "LE Set Periodic Advertising Parameters",
        LE_SET_PERIODIC_ADVERTISING_DATA = 0x03f => "LE Set Periodic Advertising Data",
        LE_SET_PERIODIC_ADVERTISING_ENABLE = 0x040 => "LE Set Periodic Advertising Enable",
        LE_SET_EXTENDED_SCAN_PARAMETERS = 0x041 => "LE Set Extended Scan Parameters",
        LE_SET_EXTENDED_SCAN_ENABLE = 0x042 => "LE Set Extended Scan Enable",
        LE_EXTENDED_CREATE_CONNECTION = 0x043 => "LE Extended Create Connection",
        LE_PERIODIC_ADVERTISING_CREATE_SYNC = 0x044 => "LE Periodic Advertising Create Sync",
        LE_PERIODIC_ADVERTISING_CREATE_SYNC_CANCEL = 0x045 => "LE Periodic Advertising Create Sync Cancel",
        LE_PERIODIC_ADVERTISING_TERMINATE_SYNC = 0x046 => "LE Periodic Advertising Terminate Sync",
        LE_ADD_DEVICE_TO_PERIODIC_ADVERTISER_LIST = 0x047 => "LE Add Device To Periodic Advertiser List",
        LE_REMOVE_DEVICE_FROM_PERIODIC_ADVERTISER_LIST = 0x048 => "LE Remove Device From Periodic Advertiser List",
        LE_CLEAR_PERIODIC_ADVERTISER_LIST = 0x049 => "LE Clear Periodic Advertiser List",
        LE_READ_PERIODIC_ADVERTISER_LIST_SIZE = 0x04a => "LE Read Periodic Advertiser List Size",
        LE_READ_TRANSMIT_POWER = 0x04b => "LE Read Transmit Power",
        LE_READ_RF_PATH_COMPENSATION = 0x04c => "LE Read RF Path Compensation",
        LE_WRITE_RF_PATH_COMPENSATION = 0x04d => "LE Write RF Path Compensation",
        LE_SET_PRIVACY_MODE = 0x04e => "LE Set Privacy Mode",
        LE_SET_PERIODIC_ADVERTISING_RECEIVE_ENABLE = 0x059 => "LE Set Periodic Advertising Receive Enable",
        LE_PERIODIC_ADVERTISING_SYNC_TRANSFER = 0x05a => "LE Periodic Advertising Sync Transfer",
        LE_PERIODIC_ADVERTISING_SET_INFO_TRANSFER = 0x05b => "LE Periodic Advertising Set Info Transfer",
        LE_SET_PERIODIC_ADVERTISING_SYNC_TRANSFER_PARAMETERS = 0x05c => "LE Set Periodic Advertising Sync Transfer Parameters",
        LE_SET_DEFAULT_PERIODIC_ADVERTISING_SYNC_TRANSFER_PARAMETERS = 0x05d => "LE Set Default Periodic Advertising Sync Transfer Parameters",
        LE_READ_BUFFER_SIZE_V2 = 0x060 => "LE Read Buffer Size V2",
        LE_READ_ISO_TX_SYNC = 0x061 => "LE Read ISO TX Sync",
        LE_CREATE_CIS = 0x064 => "LE Create CIS",
        LE_REMOVE_CIG = 0x065 => "LE Remove CIG",
        LE_ACCEPT_CIS_REQUEST = 0x066 => "LE Accept CIS Request",
        LE_REJECT_CIS_REQUEST = 0x067 => "LE Reject CIS Request",
        LE_TERMINATE_BIG = 0x06a => "LE Terminate BIG",
        LE_BIG_TERMINATE_SYNC = 0x06c => "LE BIG Terminate Sync",
        LE_REQUEST_PEER_SCA = 0x06d => "LE Request Peer SCA",
        LE_SETUP_ISO_DATA_PATH = 0x06e => "LE Setup ISO Data Path",
        LE_REMOVE_ISO_DATA_PATH = 0x06f => "LE Remove ISO Data Path",
        LE_SET_HOST_FEATURE = 0x074 => "LE Set Host Feature",
        LE_READ_ISO_LINK_QUALITY = 0x075 => "LE Read ISO Link Quality",
        LE_ENHANCED_READ_TRANSMIT_POWER_LEVEL = 0x076 => "LE Enhanced Read Transmit Power Level",
        LE_READ_REMOTE_TRANSMIT_POWER_LEVEL = 0x077 => "LE Read Remote Transmit Power Level",
        LE_SET_PATH_LOSS_REPORTING_PARAMETERS = 0x078 => "LE Set Path Loss Reporting Parameters",
        LE_SET_PATH_LOSS_REPORTING_ENABLE = 0x079 => "LE Set Path Loss Reporting Enable",
        LE_SET_TRANSMIT_POWER_REPORTING_ENABLE = 0x07a => "LE Set Transmit Power Reporting Enable",
        LE_SET_DATA_RELATED_ADDRESS_CHANGES = 0x07c => "LE Set Data Related Address Changes",
        LE_SET_DEFAULT_SUBRATE = 0x07d => "LE Set Default Subrate",
        LE_SUBRATE_REQUEST = 0x07e => "LE Subrate Request",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_split() {
        assert_eq!(RESET, 0x0c03);
        assert_eq!(ogf(LE_SET_EXTENDED_SCAN_PARAMETERS), OGF_LE_CONTROLLER);
        assert_eq!(ocf(LE_SET_EXTENDED_SCAN_PARAMETERS), 0x041);
        assert_eq!(opcode(OGF_VENDOR_SPECIFIC, 0x154), 0xfd54);
    }

    #[test]
    fn names() {
        assert_eq!(command_name(0x0406), "Disconnect");
        assert_eq!(command_name(LE_SET_SCAN_ENABLE), "LE Set Scan Enable");
        assert_eq!(command_name(0x0c7f), "Write Extended Page Timeout");
        assert_eq!(command_name(0x0bff), "Unknown");
        assert!(is_known(RESET));
        assert!(!is_known(0x0bff));
    }
}
