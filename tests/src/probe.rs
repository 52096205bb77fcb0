#![cfg(test)]
use std::thread;
use std::time::{Duration, Instant};

use profilenet_common::{Deadline, Endpoint, NetError};
use profilenet_core::{check_connectable, connect, connect_str, is_connectable, is_connectable_str};

use crate::utils::{closed_endpoint, local_listener, saturated_listener};

const PROBE_TIMEOUT: Deadline = Deadline::from_millis(200);
const MARGIN: Duration = Duration::from_millis(50);
const STALL_TIMEOUT: Deadline = Deadline::from_millis(200);

/// Nothing listening: the probe says no and returns within the timeout plus a margin.
#[test]
fn probe_without_listener_is_false_and_bounded() {
    let endpoint: Endpoint = closed_endpoint();
    let text: String = endpoint.to_string();

    let started = Instant::now();
    let reachable = is_connectable_str(&text, PROBE_TIMEOUT);
    let elapsed = started.elapsed();

    assert!(!reachable, "{text} should not be reachable");
    assert!(
        elapsed <= PROBE_TIMEOUT.as_duration() + MARGIN,
        "probe took {elapsed:?}"
    );
}

/// The handshake never completes: the wait ends at the timeout, not before and not much after.
#[test]
fn stalled_handshake_times_out_within_margin() {
    let (_listener, _fillers, endpoint) = saturated_listener();

    let started = Instant::now();
    let result = check_connectable(endpoint, STALL_TIMEOUT);
    let elapsed = started.elapsed();

    match result {
        Err(NetError::ConnectTimeout { endpoint: stalled, deadline }) => {
            assert_eq!(stalled, endpoint);
            assert_eq!(deadline, STALL_TIMEOUT);
        }
        other => panic!("expected a timeout, got {other:?}"),
    }
    assert!(
        elapsed >= STALL_TIMEOUT.as_duration() - Duration::from_millis(5),
        "gave up early after {elapsed:?}"
    );
    assert!(
        elapsed <= STALL_TIMEOUT.as_duration() + MARGIN,
        "overran the timeout: {elapsed:?}"
    );
    assert!(!is_connectable(endpoint, STALL_TIMEOUT));
}

#[test]
fn probe_with_listener_is_true() {
    let (_listener, endpoint) = local_listener();
    let started = Instant::now();

    assert!(is_connectable_str(&endpoint.to_string(), PROBE_TIMEOUT));
    assert!(started.elapsed() < PROBE_TIMEOUT.as_duration());
}

#[test]
fn probe_leaves_no_connection_behind() {
    let (listener, endpoint) = local_listener();
    assert!(is_connectable(endpoint, PROBE_TIMEOUT));

    // The probe's socket is gone, so the accepted stream sees end-of-stream.
    let (mut accepted, _) = listener.accept().unwrap();
    accepted
        .set_read_timeout(Some(Duration::from_secs(1)))
        .unwrap();
    let mut buf = [0u8; 1];
    let n = std::io::Read::read(&mut accepted, &mut buf).unwrap();
    assert_eq!(n, 0);
}

#[test]
fn zero_timeout_probe_is_immediate() {
    let (_listener, open) = local_listener();
    let closed = closed_endpoint();

    for endpoint in [open, closed] {
        let started = Instant::now();
        let _ = check_connectable(endpoint, Deadline::ZERO);
        assert!(started.elapsed() < MARGIN, "{endpoint} waited");
    }
}

#[test]
fn probes_on_separate_threads_do_not_interfere() {
    let (_listener, open) = local_listener();
    let closed = closed_endpoint();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let endpoint = if i % 2 == 0 { open } else { closed };
            thread::spawn(move || (i, is_connectable(endpoint, PROBE_TIMEOUT)))
        })
        .collect();

    for handle in handles {
        let (i, reachable) = handle.join().unwrap();
        assert_eq!(reachable, i % 2 == 0);
    }
}

/// Connecting with nobody listening fails without producing a handle.
#[test]
fn connect_without_listener_fails() {
    let endpoint = closed_endpoint();

    match connect(endpoint) {
        Err(NetError::Connect { endpoint: failed, source }) => {
            assert_eq!(failed, endpoint);
            assert_eq!(source.kind(), std::io::ErrorKind::ConnectionRefused);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(handle) => panic!("connected to {}", handle.endpoint()),
    }
}

#[test]
fn malformed_addresses_never_connect() {
    for input in ["127.0.0.1", "127.0.0.1:port", "300.0.0.1:80", "127.0.0.1:70000", ""] {
        assert!(!is_connectable_str(input, Deadline::ZERO), "{input}");
        assert!(
            matches!(connect_str(input), Err(NetError::AddressParse(_))),
            "{input}"
        );
    }
}
