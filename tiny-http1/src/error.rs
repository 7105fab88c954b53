use std::io;

use tiny_http1_spec::{BodyFramingError, HeadParseError};

pub type Result<T, E = Error> = std::result::Result<T, E>;

//
//
//
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("could not resolve {address}: {source}")]
    Resolution {
        address: String,
        #[source]
        source: io::Error,
    },
    #[error("{address} did not resolve to any address")]
    NoAddress { address: String },
    #[error("socket {op} failed: {source}")]
    Socket {
        op: SocketOp,
        #[source]
        source: io::Error,
    },
    #[error("TLS handshake failed: {0}")]
    TlsHandshake(#[source] io::Error),
    #[error("TLS handshake did not finish after {attempts} attempts")]
    HandshakeAttemptsExhausted { attempts: u32 },
    #[error("invalid TLS server name {0:?}")]
    InvalidServerName(String),
    #[error("TLS I/O failed: {0}")]
    TlsIo(#[source] io::Error),
    #[error(transparent)]
    Parse(#[from] HeadParseError),
    #[error(transparent)]
    Framing(#[from] BodyFramingError),
    #[error("peer closed the connection before sending a header")]
    ClosedBeforeHead,
    #[error("not connected")]
    NotConnected,
    #[error("server is already running")]
    AlreadyRunning,
    #[error("request handler failed")]
    HandlerFailed,
}

/// The socket call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketOp {
    Connect,
    Bind,
    Accept,
    Read,
    Write,
}

impl std::fmt::Display for SocketOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Connect => "connect",
            Self::Bind => "bind",
            Self::Accept => "accept",
            Self::Read => "read",
            Self::Write => "write",
        };
        f.write_str(s)
    }
}

/// Coarse classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Resolution,
    Socket,
    TlsHandshake,
    TlsIo,
    Parse,
    Framing,
    State,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Resolution { .. } | Self::NoAddress { .. } => ErrorKind::Resolution,
            Self::Socket { .. } => ErrorKind::Socket,
            Self::TlsHandshake(_)
            | Self::HandshakeAttemptsExhausted { .. }
            | Self::InvalidServerName(_) => ErrorKind::TlsHandshake,
            Self::TlsIo(_) => ErrorKind::TlsIo,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Framing(_) | Self::ClosedBeforeHead => ErrorKind::Framing,
            Self::NotConnected | Self::AlreadyRunning | Self::HandlerFailed => ErrorKind::State,
        }
    }

    pub(crate) fn socket(op: SocketOp) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Socket { op, source }
    }
}
