use pasori_id::protocol::direct::{
    ACK_FRAME, Command, build_packet, exec_command, parity, parse_packet,
};
use pasori_id::transport::MockTransport;
use pasori_id::Error;

#[test]
fn switch_rf_frame_matches_wire_capture() {
    let frame = build_packet(Command::SwitchRf, &[0x00]);
    assert_eq!(frame, hex::decode("0000ffffff0300fdd606002400").unwrap());
}

#[test]
fn packet_roundtrip_all_commands() {
    for command in [
        Command::InSetRf,
        Command::InSetProtocol,
        Command::InCommRf,
        Command::SwitchRf,
        Command::SetCommandType,
    ] {
        let params = vec![0x01, 0x02, 0x03];
        let frame = build_packet(command, &params);
        let (code, parsed) = parse_packet(&frame).unwrap();
        assert_eq!(code, command.code());
        assert_eq!(parsed, params);
    }
}

#[test]
fn corrupt_parity_is_rejected() {
    let mut frame = build_packet(Command::SwitchRf, &[0x00]);
    let parity_index = frame.len() - 2;
    frame[parity_index] ^= 0xff;
    assert!(matches!(
        parse_packet(&frame),
        Err(Error::ChecksumMismatch { .. })
    ));
}

#[test]
fn parity_balances_payload_sum() {
    let payload = [0xd6, 0x06, 0x00];
    let sum: u8 = payload
        .iter()
        .fold(0u8, |acc, b| acc.wrapping_add(*b))
        .wrapping_add(parity(&payload));
    assert_eq!(sum, 0);
}

#[tokio::test]
async fn exec_command_emits_a_parseable_frame() {
    let pipe = MockTransport::new();
    pipe.push_reply(ACK_FRAME.to_vec());
    pipe.push_reply(vec![0xd7, 0x07, 0x00]);

    exec_command(&pipe, Command::SwitchRf, &[0x00]).await.unwrap();

    let sent = pipe.sent();
    let (code, params) = parse_packet(&sent[0]).unwrap();
    assert_eq!(code, Command::SwitchRf.code());
    assert_eq!(params, vec![0x00]);
}
