//! Configuration is process wide; everything that changes it lives in one test.

use hcimme::config::{self, Config, HciVendor};
use hcimme::{Packet, ENCAP_TYPE_BLUETOOTH_HCI_H4};

fn dissect(h: &str) -> Result<serde_json::Value, hcimme::errors::Error> {
    let bytes = hex::decode(h).unwrap();
    let p = Packet::from_bytes(&bytes, ENCAP_TYPE_BLUETOOTH_HCI_H4)?;
    Ok(serde_json::to_value(&p).unwrap())
}

#[test]
fn configuration_changes_dissection() {
    let _ = hcimme::register_defaults();

    // Write Scan Enable with a stray octet
    let stray = "011a0c0203ff";
    let json = dissect(stray).unwrap();
    assert_eq!(json["bthci_cmd"]["unparsed"], "ff");

    config::set(Config::from_json_str(r#"{"strict_parameter_length": true}"#).unwrap()).unwrap();
    assert!(dissect(stray).is_err());

    // Reset takes no parameters, so the octet is left over
    assert!(dissect("01030c01ff").is_err());

    // Unknown core and vendor opcodes keep their parameters raw, strict or not
    let json = dissect("01ff0b020102").unwrap();
    assert_eq!(json["bthci_cmd"]["parameters"], "0102");
    let json = dissect("01fffd020102").unwrap();
    assert_eq!(json["bthci_cmd_android"]["parameters"], "0102");

    // Intel Read Version OCF pinned to Android: unknown command, parameters left unparsed
    config::set(Config::from_json_str(r#"{"hci_vendor": "android"}"#).unwrap()).unwrap();
    let json = dissect("0105fc01ff").unwrap();
    assert_eq!(json["bthci_cmd_android"]["command"], "Unknown");
    assert!(json.get("bthci_cmd_intel").is_none());

    config::set(Config {
        hci_vendor: HciVendor::None,
        ..Config::default()
    })
    .unwrap();
    let json = dissect("0105fc01ff").unwrap();
    assert_eq!(json["bthci_cmd"]["parameters"], "ff");
    assert!(json.get("bthci_cmd_intel").is_none());

    config::set(Config {
        decode_ad_structures: false,
        ..Config::default()
    })
    .unwrap();
    let json = dissect(concat!(
        "01", "0820", "20", "03", "020106",
        "00000000000000000000000000000000000000000000000000000000"
    ))
    .unwrap();
    assert_eq!(
        json["bthci_cmd"]["parameters"]["data"],
        "02010600000000000000000000000000000000000000000000000000000000"
    );

    assert!(Config::from_json_str(r#"{"hci_vendor": "broadcom"}"#).is_err());

    config::set(Config::default()).unwrap();
}
