use std::error::Error;

use tiny_http1_spec::{http::StatusCode, HeadParseError, Message};

#[test]
fn simple() -> Result<(), Box<dyn Error>> {
    let m = Message::parse_response(
        b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 5\r\n\r\nhello",
    )?;

    assert!(m.is_response());
    assert_eq!(m.status(), Some(StatusCode::OK));
    assert_eq!(m.headers().len(), 2);
    assert_eq!(m.header("Content-Type"), Some("text/html"));
    assert_eq!(m.content_length()?, 5);
    assert_eq!(m.body(), b"hello");

    Ok(())
}

#[test]
fn reason_phrase_without_space() -> Result<(), Box<dyn Error>> {
    let m = Message::parse_response(b"HTTP/1.1 404OK\r\n\r\n")?;

    assert_eq!(m.status(), Some(StatusCode::NOT_FOUND));

    Ok(())
}

#[test]
fn request_line_is_not_a_response() {
    assert!(matches!(
        Message::parse_response(b"GET / HTTP/1.1\r\n\r\n"),
        Err(HeadParseError::InvalidStartLine(_))
    ));
}

#[test]
fn invalid_status_code() {
    assert_eq!(
        Message::parse_response(b"HTTP/1.1 abc OK\r\n\r\n"),
        Err(HeadParseError::InvalidStatusCode("abc".to_owned()))
    );
}

#[test]
fn no_header_terminator() {
    assert_eq!(
        Message::parse_response(b"HTTP/1.1 200 OK\r\n"),
        Err(HeadParseError::NoHeaderTerminator)
    );
}
