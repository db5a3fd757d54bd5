//! Dumps an HCI command and a HomePlug AV vendor MME as JSON
//!

fn main() {
    let _ = hcimme::register_defaults();

    // LE Set Advertising Data: flags and a complete local name
    let hci = hex::decode(concat!(
        "01",
        "0820",
        "20",
        "0c",
        "020106",
        "080954686572616d6f",
        "00000000000000000000000000000000000000"
    ))
    .unwrap();
    let p = hcimme::Packet::from_bytes(&hci, hcimme::ENCAP_TYPE_BLUETOOTH_HCI_H4);
    println!("{}", serde_json::to_string_pretty(&p.unwrap()).unwrap());

    // VertexCom Get Version request
    let mme = hex::decode("0013d7aabbcc0013d701020388e10100a000000013d7").unwrap();
    let p = hcimme::Packet::from_bytes(&mme, hcimme::ENCAP_TYPE_ETH);
    println!("{}", serde_json::to_string_pretty(&p.unwrap()).unwrap());
}
