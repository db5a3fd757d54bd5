//! Link Policy commands (OGF 0x02)

use crate::cursor::Cursor;
use crate::errors::Error;
use crate::layers::bluetooth::common::{
    read_bits16, read_handle, read_named, LINK_POLICY_BITS, ROLES, SERVICE_TYPES,
};
use crate::types::hex::serialize_lower_hex_u16;
use crate::types::{BdAddr, Bits, Named, ValueStrings};

use super::opcodes::*;
use super::parameters::{read, CommandParameters, ConnectionHandle};

static FLOW_DIRECTIONS: ValueStrings<u8> = &[
    (0x00, "Outgoing Flow"),
    (0x01, "Incoming Flow"),
];

hci_parameters! {
    HoldMode(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        hold_mode_max_interval: u16 = c.read_u16()?,
        hold_mode_min_interval: u16 = c.read_u16()?,
    }

    SniffMode(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        sniff_max_interval: u16 = c.read_u16()?,
        sniff_min_interval: u16 = c.read_u16()?,
        sniff_attempt: u16 = c.read_u16()?,
        sniff_timeout: u16 = c.read_u16()?,
    }

    ParkState(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        beacon_max_interval: u16 = c.read_u16()?,
        beacon_min_interval: u16 = c.read_u16()?,
    }

    /// Token rate and bandwidth in octets per second, latency and delay variation in
    /// microseconds.
    QosSetup(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        unused: u8 = c.read_u8()?,
        service_type: Named<u8> = read_named(c, SERVICE_TYPES)?,
        token_rate: u32 = c.read_u32()?,
        peak_bandwidth: u32 = c.read_u32()?,
        latency: u32 = c.read_u32()?,
        delay_variation: u32 = c.read_u32()?,
    }

    SwitchRole(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
        role: Named<u8> = read_named(c, ROLES)?,
    }

    WriteLinkPolicySettings(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        link_policy_settings: Bits<u16> = read_bits16(c, LINK_POLICY_BITS)?,
    }

    WriteDefaultLinkPolicySettings(c) {
        default_link_policy_settings: Bits<u16> = read_bits16(c, LINK_POLICY_BITS)?,
    }

    FlowSpecification(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        unused: u8 = c.read_u8()?,
        flow_direction: Named<u8> = read_named(c, FLOW_DIRECTIONS)?,
        service_type: Named<u8> = read_named(c, SERVICE_TYPES)?,
        token_rate: u32 = c.read_u32()?,
        token_bucket_size: u32 = c.read_u32()?,
        peak_bandwidth: u32 = c.read_u32()?,
        access_latency: u32 = c.read_u32()?,
    }

    SniffSubrating(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        max_latency: u16 = c.read_u16()?,
        min_remote_timeout: u16 = c.read_u16()?,
        min_local_timeout: u16 = c.read_u16()?,
    }
}

pub(super) fn decode(
    opcode: u16,
    c: &mut Cursor<'_>,
) -> Result<Option<Box<dyn CommandParameters>>, Error> {
    let params = match opcode {
        HOLD_MODE => read::<HoldMode>(c)?,
        SNIFF_MODE => read::<SniffMode>(c)?,
        PARK_STATE => read::<ParkState>(c)?,
        EXIT_SNIFF_MODE
        | EXIT_PARK_STATE
        | ROLE_DISCOVERY
        | READ_LINK_POLICY_SETTINGS => read::<ConnectionHandle>(c)?,
        QOS_SETUP => read::<QosSetup>(c)?,
        SWITCH_ROLE => read::<SwitchRole>(c)?,
        WRITE_LINK_POLICY_SETTINGS => read::<WriteLinkPolicySettings>(c)?,
        WRITE_DEFAULT_LINK_POLICY_SETTINGS => read::<WriteDefaultLinkPolicySettings>(c)?,
        FLOW_SPECIFICATION => read::<FlowSpecification>(c)?,
        SNIFF_SUBRATING => read::<SniffSubrating>(c)?,
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
        assert!(c.is_empty());
        serde_json::to_value(&params).unwrap()
    }

    #[test]
    fn sniff_mode() {
        let json = decode_json(SNIFF_MODE, "0b002000100004000100");
        assert_eq!(json["connection_handle"], "0x000b");
        assert_eq!(json["sniff_max_interval"], 0x0020);
        assert_eq!(json["sniff_attempt"], 4);
    }

    #[test]
    fn qos_setup_guaranteed() {
        let json = decode_json(
            QOS_SETUP,
            "01000002401f0000401f000010270000ffffffff",
        );
        assert_eq!(json["service_type"], "Guaranteed (0x02)");
        assert_eq!(json["token_rate"], 8000);
        assert_eq!(json["latency"], 10000);
        assert_eq!(json["delay_variation"], 0xffff_ffff_u32);
    }

    #[test]
    fn write_link_policy_settings_bits() {
        let json = decode_json(WRITE_LINK_POLICY_SETTINGS, "02000500");
        assert_eq!(json["link_policy_settings"]["value"], "0x0005");
        assert_eq!(
            json["link_policy_settings"]["set"],
            serde_json::json!(["Enable Role Switch", "Enable Sniff Mode"])
        );
    }

    #[test]
    fn flow_specification() {
        let json = decode_json(
            FLOW_SPECIFICATION,
            "0100000001401f0000e8030000401f0000ffffffff",
        );
        assert_eq!(json["flow_direction"], "Outgoing Flow (0x00)");
        assert_eq!(json["service_type"], "Best Effort (0x01)");
        assert_eq!(json["token_bucket_size"], 1000);
    }
}
