//! Minimal HTTP/1.1 message model.
//!
//! Parsing and rendering work on complete byte slices, no I/O happens here.

pub mod body_framing;
pub mod body_parser;
pub mod content_length_body_parser;
pub mod head_parser;
pub mod head_renderer;
pub mod message;
pub mod request_head_parser;
pub mod response_head_parser;

pub use http;

pub use body_framing::BodyFramingError;
pub use head_parser::HeadParseError;
pub use message::{Headers, Message, StartLine};

//
//
//
pub const SP: u8 = b' ';
pub const HTTP_VERSION_11: &[u8] = b"HTTP/1.1";
pub const COLON: u8 = b':';
pub const CR: u8 = b'\r';
pub const LF: u8 = b'\n';
pub const CRLF: &[u8] = b"\r\n";
pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

pub const STATUS_TEXT: &[u8] = b"OK";
pub const USER_AGENT: &str = "tiny-http1";
