use pasori_id::protocol::session::command::communicate_thru_ex;
use pasori_id::protocol::session::exchange::send_payload;
use pasori_id::protocol::session::{
    Command, SequenceCounter, accepts_reply, build_request, parse_request,
};
use pasori_id::test_support::session_reply;
use pasori_id::transport::MockTransport;

#[test]
fn get_data_request_matches_wire_capture() {
    let frame = build_request(Command::GetData.payload(), 0x2a);
    assert_eq!(frame, hex::decode("6b04000000002a000000ffca0000").unwrap());
}

#[test]
fn stale_sequence_is_not_accepted() {
    let request = build_request(Command::GetData.payload(), 7);
    let stale = session_reply(6, &[0x90, 0x00]);
    assert!(!accepts_reply(&request, &stale));
    let fresh = session_reply(7, &[0x90, 0x00]);
    assert!(accepts_reply(&request, &fresh));
}

#[tokio::test(start_paused = true)]
async fn tunnelled_polling_request_round_trips() {
    let pipe = MockTransport::new();
    let sequence = SequenceCounter::new();
    pipe.push_reply(session_reply(1, &[0x90, 0x00]));

    let apdu = communicate_thru_ex(&[0x06, 0x00, 0xff, 0xff, 0x01, 0x00], 50_000);
    send_payload(&pipe, &sequence, &apdu).await.unwrap();

    let sent = pipe.sent();
    let (slot, seq, payload) = parse_request(&sent[0]).unwrap();
    assert_eq!(slot, 0x00);
    assert_eq!(seq, 1);
    assert_eq!(payload, apdu);
}
