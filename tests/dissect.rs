//! Whole packets through `Packet::from_bytes`

use hcimme::{Packet, ENCAP_TYPE_BLUETOOTH_HCI_H4, ENCAP_TYPE_ETH};

fn dissect(encap: u8, h: &str) -> serde_json::Value {
    let _ = hcimme::register_defaults();

    let bytes = hex::decode(h).unwrap();
    let p = Packet::from_bytes(&bytes, encap).unwrap();
    serde_json::to_value(&p).unwrap()
}

#[test]
fn le_set_scan_enable() {
    let json = dissect(ENCAP_TYPE_BLUETOOTH_HCI_H4, "010c20020100");
    let cmd = &json["bthci_cmd"];
    assert_eq!(cmd["ogf"], "LE Controller Commands (0x08)");
    assert_eq!(cmd["command"], "LE Set Scan Enable");
    assert_eq!(cmd["param_length"], 2);
    assert_eq!(cmd["parameters"]["scan_enable"], "Enabled (0x01)");
}

#[test]
fn create_connection() {
    let json = dissect(
        ENCAP_TYPE_BLUETOOTH_HCI_H4,
        concat!("01", "0504", "0d", "665544332211", "18cc", "01", "00", "0000", "01"),
    );
    let params = &json["bthci_cmd"]["parameters"];
    assert_eq!(json["bthci_cmd"]["command"], "Create Connection");
    assert_eq!(params["bd_addr"], "11:22:33:44:55:66");
}

#[test]
fn android_vendor_command_in_auto_mode() {
    // LE Multi Advertising: enable instance 1
    let json = dissect(ENCAP_TYPE_BLUETOOTH_HCI_H4, "0154fd03050101");
    assert_eq!(json["bthci_cmd"]["command"], "Vendor Command");
    assert_eq!(json["bthci_cmd"]["ocf"], "0x0154");
    let vendor = &json["bthci_cmd_android"];
    assert_eq!(vendor["command"], "LE Multi Advertising");
    assert_eq!(vendor["parameters"]["advertising_instance"], 1);
}

#[test]
fn intel_vendor_command_in_auto_mode() {
    let json = dissect(ENCAP_TYPE_BLUETOOTH_HCI_H4, "0105fc01ff");
    let vendor = &json["bthci_cmd_intel"];
    assert_eq!(vendor["command"], "Read Version");
    assert_eq!(vendor["parameters"]["request"], "TLV format (0xff)");
}

#[test]
fn hci_event_left_unprocessed() {
    let _ = hcimme::register_defaults();

    let bytes = hex::decode("040e0401030c00").unwrap();
    let p = Packet::from_bytes(&bytes, ENCAP_TYPE_BLUETOOTH_HCI_H4).unwrap();
    assert_eq!(p.layers().len(), 1);
    assert_eq!(p.unprocessed().len(), 6);
}

#[test]
fn truncated_command_is_an_error() {
    let _ = hcimme::register_defaults();

    let bytes = hex::decode("010604034000").unwrap();
    assert!(Packet::from_bytes(&bytes, ENCAP_TYPE_BLUETOOTH_HCI_H4).is_err());
}

#[test]
fn vertexcom_get_version_request() {
    let json = dissect(
        ENCAP_TYPE_ETH,
        "0013d7aabbcc0013d701020388e10100a000000013d7",
    );
    assert_eq!(json["eth"]["ethertype"], "0x88e1");
    assert_eq!(json["homeplug_av"]["oui"], "00:13:d7");
    assert_eq!(json["homeplug_av_vertexcom"]["mme"], "Get Version");
}

#[test]
fn other_ethertypes_left_unprocessed() {
    let _ = hcimme::register_defaults();

    let bytes = hex::decode("ffffffffffff0013d70102030806000108000604000100").unwrap();
    let p = Packet::from_bytes(&bytes, ENCAP_TYPE_ETH).unwrap();
    assert_eq!(p.layers().len(), 1);
    assert_eq!(p.unprocessed().len(), bytes.len() - 14);
}
