#![cfg(test)]
use std::time::{Duration, Instant};

use profilenet_common::Deadline;
use profilenet_core::{IoOutcome, recv, send};

use crate::utils::connected_pair;

const DEADLINE: Deadline = Deadline::from_millis(1_000);

#[test]
fn send_sixteen_bytes() {
    let (mut client, mut server) = connected_pair();
    let request: [u8; 16] = *b"profile:request!";

    let outcome = send(&mut client, &request, DEADLINE);
    assert!(matches!(outcome, IoOutcome::Transferred(16)), "{outcome:?}");

    let mut buf = [0u8; 16];
    let outcome = recv(&mut server, &mut buf, DEADLINE);
    assert!(matches!(outcome, IoOutcome::Transferred(16)), "{outcome:?}");
    assert_eq!(buf, request);

    client.close();
    server.close();
}

#[test]
fn request_response_round() {
    let (mut client, mut server) = connected_pair();

    assert_eq!(send(&mut client, b"ping", DEADLINE).bytes(), 4);

    let mut buf = [0u8; 64];
    let n = recv(&mut server, &mut buf, DEADLINE).bytes();
    assert_eq!(&buf[..n], b"ping");

    assert_eq!(send(&mut server, b"pong", DEADLINE).bytes(), 4);
    let n = recv(&mut client, &mut buf, DEADLINE).bytes();
    assert_eq!(&buf[..n], b"pong");
}

#[test]
fn recv_with_nothing_pending_would_block() {
    let (mut client, _server) = connected_pair();
    let mut buf = [0u8; 16];

    let started = Instant::now();
    let outcome = recv(&mut client, &mut buf, Deadline::from_millis(100));

    assert!(outcome.is_would_block(), "{outcome:?}");
    assert_eq!(outcome.bytes(), 0);
    assert!(started.elapsed() < Duration::from_millis(600));
}

/// Peer shut down its side: 0 bytes, and that is not the same as a timeout.
#[test]
fn recv_after_orderly_shutdown() {
    let (mut client, server) = connected_pair();
    server.shutdown_write().unwrap();

    let mut buf = [0u8; 16];
    let outcome = recv(&mut client, &mut buf, DEADLINE);

    assert!(matches!(outcome, IoOutcome::Transferred(0)), "{outcome:?}");
    assert!(!outcome.is_would_block());
    assert!(!outcome.is_failed());
}

#[test]
fn polling_loop_collects_late_data() {
    let (mut client, mut server) = connected_pair();
    let mut buf = [0u8; 16];
    let mut polls = 0;

    assert!(recv(&mut client, &mut buf, Deadline::ZERO).is_would_block());
    assert_eq!(send(&mut server, b"late", DEADLINE).bytes(), 4);

    let n = loop {
        polls += 1;
        match recv(&mut client, &mut buf, Deadline::from_millis(20)) {
            IoOutcome::Transferred(n) => break n,
            IoOutcome::WouldBlock if polls < 50 => continue,
            other => panic!("unexpected outcome after {polls} polls: {other:?}"),
        }
    };
    assert_eq!(&buf[..n], b"late");
}
