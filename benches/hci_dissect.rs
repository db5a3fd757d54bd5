use criterion::{criterion_group, criterion_main, Criterion};

use hcimme::register_defaults;
use hcimme::Packet;
use hcimme::{ENCAP_TYPE_BLUETOOTH_HCI_H4, ENCAP_TYPE_ETH};

pub fn le_set_advertising_data(c: &mut Criterion) {
    let _ = register_defaults();

    let bytes = hex::decode(concat!(
        "01", "0820", "20", "0c", "020106", "080954686572616d6f",
        "00000000000000000000000000000000000000"
    ))
    .unwrap();
    c.bench_function("HCI_LE_Set_Advertising_Data", |b| {
        b.iter(|| Packet::from_bytes(&bytes, ENCAP_TYPE_BLUETOOTH_HCI_H4))
    });
}

pub fn le_extended_create_connection(c: &mut Criterion) {
    let _ = register_defaults();

    let bytes = hex::decode(concat!(
        "01", "4320", "2a", "00", "00", "00", "665544332211", "05",
        "6000", "6000", "1800", "2800", "0000", "c800", "0000", "0000",
        "6000", "6000", "1800", "2800", "0000", "c800", "0000", "0000",
    ))
    .unwrap();
    c.bench_function("HCI_LE_Extended_Create_Connection", |b| {
        b.iter(|| Packet::from_bytes(&bytes, ENCAP_TYPE_BLUETOOTH_HCI_H4))
    });
}

pub fn vertexcom_get_version(c: &mut Criterion) {
    let _ = register_defaults();

    let bytes = hex::decode("0013d7aabbcc0013d701020388e10100a000000013d7").unwrap();
    c.bench_function("HomePlug_AV_VertexCom_Get_Version", |b| {
        b.iter(|| Packet::from_bytes(&bytes, ENCAP_TYPE_ETH))
    });
}

criterion_group!(
    dissect,
    le_set_advertising_data,
    le_extended_create_connection,
    vertexcom_get_version
);
criterion_main!(dissect);
