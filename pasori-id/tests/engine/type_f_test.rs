use crate::common::fixtures;

use pasori_id::engine::type_f;
use pasori_id::protocol::direct::{Command, parse_packet};
use pasori_id::test_support::{direct_polling_reply, queue_direct_reply, queue_type_f_direct};
use pasori_id::transport::MockTransport;

#[tokio::test]
async fn polling_round_yields_idm() {
    let pipe = MockTransport::new();
    queue_type_f_direct(&pipe, fixtures::sample_idm_bytes());

    let idm = type_f::poll_direct(&pipe).await;
    assert_eq!(idm, Some(fixtures::sample_idm()));
    assert_eq!(pipe.sent().len(), 6);
}

#[tokio::test]
async fn polling_command_carries_wildcard_system_code() {
    let pipe = MockTransport::new();
    queue_type_f_direct(&pipe, fixtures::sample_idm_bytes());

    type_f::poll_direct(&pipe).await.unwrap();

    let sent = pipe.sent();
    let (code, params) = parse_packet(sent.last().unwrap()).unwrap();
    assert_eq!(code, Command::InCommRf.code());
    assert_eq!(
        params,
        vec![0x6e, 0x00, 0x06, 0x00, 0xff, 0xff, 0x01, 0x00]
    );
}

#[tokio::test]
async fn silent_field_reports_no_card() {
    let pipe = MockTransport::new();
    for _ in 0..5 {
        queue_direct_reply(&pipe, vec![0u8; 15]);
    }
    // The final InCommRF gets no answer
    assert_eq!(type_f::poll_direct(&pipe).await, None);
}

#[tokio::test]
async fn short_polling_reply_reports_no_card() {
    let pipe = MockTransport::new();
    for _ in 0..5 {
        queue_direct_reply(&pipe, vec![0u8; 15]);
    }
    let mut short = direct_polling_reply(fixtures::sample_idm_bytes());
    short.truncate(20);
    queue_direct_reply(&pipe, short);

    assert_eq!(type_f::poll_direct(&pipe).await, None);
}
