use std::error::Error as StdError;
use std::io::{Read as _, Write as _};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use tiny_http1::{
    tiny_http1_spec::BodyFramingError, Error, ErrorKind, Method, PlainConnection, State,
    StatusCode, TransportConfig,
};

const TEST_HEADER: &[u8] = b"GET  HTTP/1.1\r\n\
Content-Length: 1270\r\n\
Vary: Accept-Encoding\r\n\
Content-Type: text/html\r\n\
Connection: close\r\n\
Accept-Ranges: bytes\r\n\r\nBODY";

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Runs `peer` on the accepted side of a loopback connection.
fn with_peer<F>(peer: F) -> Result<(u16, thread::JoinHandle<()>), Box<dyn StdError>>
where
    F: FnOnce(TcpStream) + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        peer(stream);
    });

    Ok((port, handle))
}

fn read_until(stream: &mut TcpStream, needle: &[u8]) -> Vec<u8> {
    let mut received = Vec::new();
    let mut buf = [0u8; 256];
    while !received.windows(needle.len()).any(|w| w == needle) {
        let n = stream.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        received.extend_from_slice(&buf[..n]);
    }
    received
}

#[test]
fn receive_message_with_content_length() -> Result<(), Box<dyn StdError>> {
    init_logger();

    let (port, peer) = with_peer(|mut stream| {
        stream.write_all(TEST_HEADER).unwrap();

        let mut remaining = 1270 - 4;
        for size in [1, 300, 511, 17, 600].iter().cycle() {
            if remaining == 0 {
                break;
            }
            let n = (*size).min(remaining);
            stream.write_all(&vec![b'x'; n]).unwrap();
            stream.flush().unwrap();
            remaining -= n;
            thread::sleep(Duration::from_millis(5));
        }
    })?;

    let mut connection = PlainConnection::new();
    connection.connect("127.0.0.1", port)?;
    assert_eq!(connection.state(), State::Connected);

    let message = connection.receive_message()?;
    peer.join().unwrap();

    assert_eq!(message.header("Content-Length"), Some("1270"));
    assert_eq!(message.header("Accept-Ranges"), Some("bytes"));
    assert_eq!(message.body().len(), 1270);
    assert!(message.body().starts_with(b"BODYx"));

    connection.close()?;
    assert_eq!(connection.state(), State::Closed);
    assert!(matches!(connection.send(b"x"), Err(Error::NotConnected)));

    Ok(())
}

#[test]
fn receive_message_small_chunks() -> Result<(), Box<dyn StdError>> {
    init_logger();

    let (port, peer) = with_peer(|mut stream| {
        stream
            .write_all(b"POST /x HTTP/1.1\r\nContent-Length: 10\r\n\r\n")
            .unwrap();
        thread::sleep(Duration::from_millis(20));
        stream.write_all(b"0123456789").unwrap();
    })?;

    let mut config = TransportConfig::new();
    config.set_chunk_size(64);

    let mut connection = PlainConnection::with_config(config);
    connection.connect("127.0.0.1", port)?;

    let message = connection.receive_message()?;
    peer.join().unwrap();

    assert_eq!(message.method(), Some(&Method::POST));
    assert_eq!(message.target(), Some("/x"));
    assert_eq!(message.body(), b"0123456789");

    Ok(())
}

#[test]
fn receive_message_peer_closes_early() -> Result<(), Box<dyn StdError>> {
    let (port, peer) = with_peer(|mut stream| {
        stream
            .write_all(b"GET / HTTP/1.1\r\nContent-Length: 100\r\n\r\nabc")
            .unwrap();
    })?;

    let mut connection = PlainConnection::new();
    connection.connect("127.0.0.1", port)?;

    let message = connection.receive_message()?;
    peer.join().unwrap();

    assert_eq!(message.body(), b"abc");

    Ok(())
}

#[test]
fn receive_message_without_content_length() -> Result<(), Box<dyn StdError>> {
    let (port, peer) = with_peer(|mut stream| {
        stream
            .write_all(b"GET / HTTP/1.1\r\nHost: foo.com\r\n\r\n")
            .unwrap();
    })?;

    let mut connection = PlainConnection::new();
    connection.connect("127.0.0.1", port)?;

    let err = connection.receive_message().err().unwrap();
    peer.join().unwrap();

    assert!(matches!(
        err,
        Error::Framing(BodyFramingError::MissingContentLength)
    ));
    assert_eq!(err.kind(), ErrorKind::Framing);

    Ok(())
}

#[test]
fn receive_message_nothing_sent() -> Result<(), Box<dyn StdError>> {
    let (port, peer) = with_peer(drop)?;

    let mut connection = PlainConnection::new();
    connection.connect("127.0.0.1", port)?;
    peer.join().unwrap();

    let err = connection.receive_message().err().unwrap();
    assert!(matches!(err, Error::ClosedBeforeHead));

    Ok(())
}

#[test]
fn receive_message_without_terminator() -> Result<(), Box<dyn StdError>> {
    let (port, peer) = with_peer(|mut stream| {
        stream.write_all(b"garbage without a head").unwrap();
    })?;

    let mut connection = PlainConnection::new();
    connection.connect("127.0.0.1", port)?;

    let err = connection.receive_message().err().unwrap();
    peer.join().unwrap();

    assert_eq!(err.kind(), ErrorKind::Parse);

    Ok(())
}

#[test]
fn send_and_receive_raw() -> Result<(), Box<dyn StdError>> {
    let (port, peer) = with_peer(|mut stream| {
        let received = read_until(&mut stream, b"ping");
        assert_eq!(received, b"ping");
        stream.write_all(b"pong").unwrap();
    })?;

    let mut connection = PlainConnection::new();
    connection.connect("127.0.0.1", port)?;

    connection.send(b"ping")?;
    let received = connection.receive()?;
    peer.join().unwrap();

    assert_eq!(received, b"pong");

    Ok(())
}

#[test]
fn send_message_and_receive_get() -> Result<(), Box<dyn StdError>> {
    init_logger();

    let (port, peer) = with_peer(|mut stream| {
        let request = read_until(&mut stream, b"\r\n\r\n");
        let request = String::from_utf8(request).unwrap();

        assert!(request.starts_with("GET /index.html HTTP/1.1\r\n"));
        assert!(request.contains("Host: 127.0.0.1\r\n"));
        assert!(request.contains("Connection: close\r\n"));
        assert!(request.ends_with("\r\n\r\n"));

        stream
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nhello")
            .unwrap();
    })?;

    let mut connection = PlainConnection::new();
    connection.connect("127.0.0.1", port)?;

    let response = connection.send_message_and_receive("/index.html", "")?;
    peer.join().unwrap();

    assert_eq!(response.status(), Some(StatusCode::OK));
    assert_eq!(response.header("Content-Type"), Some("text/plain"));
    assert_eq!(response.body(), b"hello");

    Ok(())
}

#[test]
fn send_message_and_receive_post() -> Result<(), Box<dyn StdError>> {
    let (port, peer) = with_peer(|mut stream| {
        let request = read_until(&mut stream, b"a=1\r\n");
        let request = String::from_utf8(request).unwrap();

        assert!(request.starts_with("POST /form HTTP/1.1\r\n"));
        assert!(request.contains("Content-Length: 3\r\n"));

        stream.write_all(b"HTTP/1.1 201OK\r\n\r\n").unwrap();
    })?;

    let mut connection = PlainConnection::new();
    connection.connect("127.0.0.1", port)?;

    let response = connection.send_message_and_receive("/form", "a=1")?;
    peer.join().unwrap();

    assert_eq!(response.status(), Some(StatusCode::CREATED));
    assert!(response.body().is_empty());

    Ok(())
}

#[test]
fn connect_refused() -> Result<(), Box<dyn StdError>> {
    let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();

    let mut connection = PlainConnection::new();
    let err = connection.connect("127.0.0.1", port).err().unwrap();

    assert_eq!(err.kind(), ErrorKind::Socket);
    assert_eq!(connection.state(), State::Unconnected);

    Ok(())
}
