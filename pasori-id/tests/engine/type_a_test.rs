use crate::common::fixtures;

use pasori_id::engine::type_a;
use pasori_id::protocol::direct::parse_packet;
use pasori_id::test_support::{queue_direct_reply, queue_type_a_single, sdd_reply, select_reply};
use pasori_id::transport::MockTransport;

#[tokio::test]
async fn single_size_uid_needs_one_cascade_level() {
    let pipe = MockTransport::new();
    queue_type_a_single(&pipe, fixtures::single_sdd_id(), 0x00);

    let uid = type_a::read_uid(&pipe).await;
    assert_eq!(uid, Some(fixtures::single_uid()));

    // 9 anti-collision commands plus the 2-command SELECT; no level 2
    assert_eq!(pipe.sent().len(), 11);
}

#[tokio::test]
async fn double_size_uid_continues_to_level_two() {
    let pipe = MockTransport::new();
    // Level 1 answers with the cascade tag and the cascade bit set
    queue_type_a_single(&pipe, fixtures::double_sdd_id1(), 0x04);
    // Level 2: SDD batch then SELECT with the cascade bit clear
    queue_direct_reply(&pipe, vec![0u8; 15]);
    queue_direct_reply(&pipe, sdd_reply(fixtures::double_sdd_id2()));
    queue_direct_reply(&pipe, vec![0u8; 15]);
    queue_direct_reply(&pipe, select_reply(0x00));

    let uid = type_a::read_uid(&pipe).await;
    assert_eq!(uid, Some(fixtures::double_uid()));
    assert_eq!(pipe.sent().len(), 15);
}

#[tokio::test]
async fn third_cascade_level_is_unsupported() {
    let pipe = MockTransport::new();
    queue_type_a_single(&pipe, fixtures::double_sdd_id1(), 0x04);
    queue_direct_reply(&pipe, vec![0u8; 15]);
    queue_direct_reply(&pipe, sdd_reply(fixtures::double_sdd_id2()));
    queue_direct_reply(&pipe, vec![0u8; 15]);
    // Level 2 SELECT still reports a further cascade level
    queue_direct_reply(&pipe, select_reply(0x04));

    assert_eq!(type_a::read_uid(&pipe).await, None);
}

#[tokio::test]
async fn silent_field_reports_no_card() {
    let pipe = MockTransport::new();
    // The very first command gets no response: the batch aborts
    assert_eq!(type_a::read_uid(&pipe).await, None);
    assert_eq!(pipe.sent().len(), 1);
}

#[tokio::test]
async fn truncated_sdd_reply_reports_no_card() {
    let pipe = MockTransport::new();
    // Setup commands succeed but the final anti-collision reply is short
    for _ in 0..9 {
        queue_direct_reply(&pipe, vec![0u8; 15]);
    }
    assert_eq!(type_a::read_uid(&pipe).await, None);
}

#[tokio::test]
async fn sdd_reply_one_byte_below_minimum_reports_no_card() {
    let pipe = MockTransport::new();
    for _ in 0..8 {
        queue_direct_reply(&pipe, vec![0u8; 15]);
    }
    // 19 bytes: one below the 20-byte envelope the id bytes need
    queue_direct_reply(&pipe, vec![0u8; 19]);
    assert_eq!(type_a::read_uid(&pipe).await, None);
    // The SELECT batch was never issued
    assert_eq!(pipe.sent().len(), 9);
}

#[tokio::test]
async fn select_reply_one_byte_below_minimum_reports_no_card() {
    let pipe = MockTransport::new();
    for _ in 0..8 {
        queue_direct_reply(&pipe, vec![0u8; 15]);
    }
    queue_direct_reply(&pipe, sdd_reply(fixtures::single_sdd_id()));
    // SELECT answers, but with no room for the SAK byte at offset 15
    queue_direct_reply(&pipe, vec![0u8; 15]);
    queue_direct_reply(&pipe, vec![0u8; 15]);
    assert_eq!(type_a::read_uid(&pipe).await, None);
}

#[tokio::test]
async fn select_echoes_anticollision_bytes() {
    let pipe = MockTransport::new();
    let id = fixtures::single_sdd_id();
    queue_type_a_single(&pipe, id, 0x00);

    type_a::read_uid(&pipe).await.unwrap();

    // The last frame is the level-1 SELECT carrying the 5 SDD bytes
    let sent = pipe.sent();
    let (_, params) = parse_packet(sent.last().unwrap()).unwrap();
    let mut expected = vec![0x36, 0x01, 0x93, 0x70];
    expected.extend_from_slice(&id);
    assert_eq!(params, expected);
}
