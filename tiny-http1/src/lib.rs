//! Blocking HTTP/1.1 client and server.
//!
//! A [`Connection`] sends and receives [`Message`]s over a [`Transport`],
//! either plain TCP or TLS. A [`Server`] accepts plain connections and hands
//! each to a caller supplied handler.

pub mod config;
pub mod connection;
pub mod error;
pub mod plain;
pub mod secure;
pub mod server;
pub mod tls;
pub mod transport;

pub use config::TransportConfig;
pub use connection::{Connection, PlainConnection, SecureConnection, State};
pub use error::{Error, ErrorKind, Result};
pub use plain::PlainTransport;
pub use secure::SecureTransport;
pub use server::{Server, StopHandle};
pub use transport::Transport;

//
//
//
pub use http::{Method, StatusCode};
pub use tiny_http1_spec;
pub use tiny_http1_spec::Message;
