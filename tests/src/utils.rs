use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, TcpListener};

use profilenet_common::Endpoint;
use profilenet_core::{ConnectionHandle, connect};
use socket2::{Domain, Protocol, SockAddr, Socket, Type};

const BACKLOG_FILLERS: usize = 8;

/// A listener on an ephemeral loopback port.
pub fn local_listener() -> (TcpListener, Endpoint) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
    let endpoint = match listener.local_addr().expect("listener address") {
        SocketAddr::V4(addr) => Endpoint::from(addr),
        SocketAddr::V6(addr) => panic!("loopback listener bound to {addr}"),
    };
    (listener, endpoint)
}

/// A loopback port nobody listens on.
pub fn closed_endpoint() -> Endpoint {
    let (listener, endpoint) = local_listener();
    drop(listener);
    endpoint
}

/// Client and server ends of one loopback connection.
pub fn connected_pair() -> (ConnectionHandle, ConnectionHandle) {
    let (listener, endpoint) = local_listener();
    let client = connect(endpoint).expect("connect to loopback listener");
    let (server, _) = listener.accept().expect("accept loopback client");
    let server = ConnectionHandle::from_stream(server).expect("wrap accepted stream");
    (client, server)
}

/// A listener whose accept queue is full, so further handshakes never complete.
///
/// Keep all three values alive for as long as the queue has to stay full.
pub fn saturated_listener() -> (Socket, Vec<Socket>, Endpoint) {
    let listener = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))
        .expect("create listener socket");
    let any_port = SockAddr::from(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 0));
    listener.bind(&any_port).expect("bind loopback listener");
    listener.listen(0).expect("listen with empty backlog");

    let endpoint = match listener
        .local_addr()
        .expect("listener address")
        .as_socket()
    {
        Some(SocketAddr::V4(addr)) => Endpoint::from(addr),
        other => panic!("loopback listener bound to {other:?}"),
    };

    let target = SockAddr::from(endpoint.socket_addr());
    let fillers: Vec<Socket> = (0..BACKLOG_FILLERS)
        .map(|_| {
            let filler = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))
                .expect("create filler socket");
            filler.set_nonblocking(true).expect("non-blocking filler");
            // In progress or refused, either way it occupies a slot or nothing.
            let _ = filler.connect(&target);
            filler
        })
        .collect();

    (listener, fillers, endpoint)
}
