use std::sync::Arc;

use serial_test::serial;

use pasori_id::prelude::*;
use pasori_id::transport::UsbHostEnv;

#[tokio::test]
#[serial]
#[ignore = "requires hardware (PaSoRi)"]
async fn enumerate_finds_a_supported_reader() {
    let host = UsbHostEnv::new();
    let devices = host.attached_devices().expect("usb service");
    assert!(
        !devices.is_empty(),
        "plug in an RC-S380 or RC-S300 before running hardware tests"
    );
}

#[tokio::test]
#[serial]
#[ignore = "requires hardware (PaSoRi) and a card on the reader"]
async fn read_id_returns_a_card_identifier() {
    let reader = Reader::new(Arc::new(UsbHostEnv::new()));
    let id = reader.read_id().await.expect("card read");
    match id {
        CardId::TypeA(uid) => assert!(!uid.to_hex().is_empty()),
        CardId::TypeF(idm) => assert_eq!(idm.to_hex().len(), 16),
    }
}
