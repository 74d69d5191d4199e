use std::sync::Arc;

use tokio::time::sleep;

use crate::common::fixtures;

use pasori_id::reader::Reader;
use pasori_id::test_support::{
    MockUsbHost, queue_direct_reply, queue_session_open, queue_type_a_single, queue_type_f_direct,
    s300_identity, s380_identity, session_polling_payload, session_reply,
};
use pasori_id::types::CardId;
use pasori_id::utils::ms;
use pasori_id::Error;
use pasori_id::Transport;

#[tokio::test(start_paused = true)]
async fn direct_reader_reads_type_a_card() {
    let host = Arc::new(MockUsbHost::with_device(s380_identity()));
    let pipe = host.pipe();
    queue_type_a_single(&pipe, fixtures::single_sdd_id(), 0x00);

    let reader = Reader::new(host.clone());
    let id = reader.read_id().await.unwrap();
    assert_eq!(id, CardId::TypeA(fixtures::single_uid()));

    // The session transport is released once the read finishes
    assert!(pipe.is_closed());
}

#[tokio::test(start_paused = true)]
async fn direct_reader_falls_back_to_type_f() {
    let host = Arc::new(MockUsbHost::with_device(s380_identity()));
    let pipe = host.pipe();
    // Type-A setup succeeds but the anti-collision reply stays short, so
    // the whole Type-A round consumes its batch and reports no card.
    for _ in 0..9 {
        queue_direct_reply(&pipe, vec![0u8; 15]);
    }
    queue_type_f_direct(&pipe, fixtures::sample_idm_bytes());

    let reader = Reader::new(host.clone());
    let id = reader.read_id().await.unwrap();
    assert_eq!(id, CardId::TypeF(fixtures::sample_idm()));
}

#[tokio::test(start_paused = true)]
async fn session_reader_reads_type_a_card() {
    let host = Arc::new(MockUsbHost::with_device(s300_identity()));
    let pipe = host.pipe();
    queue_session_open(&pipe, 1);
    pipe.push_reply(session_reply(5, &[0x90, 0x00])); // protocol switch
    pipe.push_reply(session_reply(6, &[0xde, 0xad, 0xbe, 0xef, 0x90, 0x00]));

    let reader = Reader::new(host.clone());
    let id = reader.read_id().await.unwrap();
    assert_eq!(id, CardId::TypeA(fixtures::single_uid()));
}

#[tokio::test(start_paused = true)]
async fn session_reader_reads_type_f_card() {
    let host = Arc::new(MockUsbHost::with_device(s300_identity()));
    let pipe = host.pipe();
    queue_session_open(&pipe, 1);
    // Type-A round: switch acknowledged, GetData answers with an error
    // status word, so the round reports no card.
    pipe.push_reply(session_reply(5, &[0x90, 0x00]));
    pipe.push_reply(session_reply(6, &[0x6a, 0x82]));
    // Type-F round succeeds
    pipe.push_reply(session_reply(7, &[0x90, 0x00]));
    pipe.push_reply(session_reply(
        8,
        &session_polling_payload(fixtures::sample_idm_bytes()),
    ));

    let reader = Reader::new(host.clone());
    let id = reader.read_id().await.unwrap();
    assert_eq!(id, CardId::TypeF(fixtures::sample_idm()));
}

#[tokio::test(start_paused = true)]
async fn new_read_force_closes_the_previous_session() {
    let host = Arc::new(MockUsbHost::with_device(s380_identity()));
    let pipe = host.pipe();
    let reader = Arc::new(Reader::new(host.clone()));

    // First read polls forever: nothing is queued, no card ever answers
    let first = {
        let reader = Arc::clone(&reader);
        tokio::spawn(async move { reader.read_id().await })
    };
    sleep(ms(120)).await;
    assert!(!pipe.is_closed());

    // The second read force-closes the first session's transport. The
    // mock host then hands the same closed pipe back, so the second
    // session fails on its first poll too.
    let second = reader.read_id().await;
    assert!(matches!(second, Err(Error::TransportClosed)));

    let first = first.await.unwrap();
    assert!(matches!(first, Err(Error::TransportClosed)));
    assert!(pipe.close_calls() >= 2);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_read_future_closes_the_transport() {
    let host = Arc::new(MockUsbHost::with_device(s380_identity()));
    let pipe = host.pipe();
    let reader = Reader::new(host.clone());

    {
        let fut = reader.read_id();
        tokio::pin!(fut);
        tokio::select! {
            _ = &mut fut => panic!("no card was queued, the poll loop cannot finish"),
            _ = sleep(ms(200)) => {}
        }
    }

    assert!(pipe.is_closed());
    assert!(pipe.close_calls() >= 1);
}

#[tokio::test(start_paused = true)]
async fn cancel_without_active_session_is_a_no_op() {
    let host = Arc::new(MockUsbHost::with_device(s380_identity()));
    let pipe = host.pipe();
    let reader = Reader::new(host.clone());

    reader.cancel();
    assert_eq!(pipe.close_calls(), 0);
}
