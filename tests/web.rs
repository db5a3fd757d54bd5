//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn dissect_hci_reset() {
    let encap_type = hcimme::ENCAP_TYPE_BLUETOOTH_HCI_H4;

    let result = hcimme::dissect_packet(encap_type, "01030c00".to_string());
    match result {
        Ok(json) => assert!(json.contains("\"Reset\""), "{}", json),
        Err(err) => panic!("Dissect packet failed: {}", err),
    }
}

#[wasm_bindgen_test]
fn dissect_bad_hex() {
    assert!(hcimme::dissect_packet(hcimme::ENCAP_TYPE_ETH, "zz".to_string()).is_err());
}
