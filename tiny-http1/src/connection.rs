use std::net::TcpStream;

use http::Method;
use tiny_http1_spec::{
    body_parser::{BodyParseOutput, BodyParser as _},
    content_length_body_parser::ContentLengthBodyParser,
    Message,
};

use crate::{
    config::TransportConfig,
    error::{Error, Result},
    plain::PlainTransport,
    secure::SecureTransport,
    transport::Transport,
};

//
//
//
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Unconnected,
    Connected,
    Closed,
}

/// Message level send and receive over one [`Transport`].
pub struct Connection<T>
where
    T: Transport,
{
    transport: T,
    address: String,
    port: u16,
    state: State,
}

pub type PlainConnection = Connection<PlainTransport>;
pub type SecureConnection = Connection<SecureTransport>;

impl<T> Default for Connection<T>
where
    T: Transport,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Connection<T>
where
    T: Transport,
{
    pub fn new() -> Self {
        Self::with_config(TransportConfig::default())
    }
    pub fn with_config(config: TransportConfig) -> Self {
        Self::with_transport(T::with_config(config))
    }
    /// Wraps a transport that has not been connected yet.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            address: String::new(),
            port: 0,
            state: State::Unconnected,
        }
    }

    pub fn get_ref(&self) -> &T {
        &self.transport
    }
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn state(&self) -> State {
        self.state
    }
    pub fn is_connected(&self) -> bool {
        self.state == State::Connected
    }
    pub fn address(&self) -> &str {
        &self.address
    }
    pub fn port(&self) -> u16 {
        self.port
    }

    //
    pub fn connect(&mut self, address: &str, port: u16) -> Result<()> {
        self.address = address.to_owned();
        self.port = port;

        match self.transport.connect(address, port) {
            Ok(()) => {
                self.state = State::Connected;
                Ok(())
            }
            Err(err) => {
                self.state = State::Unconnected;
                Err(err)
            }
        }
    }

    /// Connects to the transport's default port, 80 or 443.
    pub fn connect_default(&mut self, address: &str) -> Result<()> {
        self.connect(address, T::DEFAULT_PORT)
    }

    pub fn close(&mut self) -> Result<()> {
        if self.state == State::Connected {
            self.state = State::Closed;
            self.transport.close()?;
        }
        Ok(())
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(Error::NotConnected)
        }
    }

    //
    pub fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_connected()?;
        self.transport.send(bytes)
    }

    /// Reads until the peer closes the connection.
    pub fn receive(&mut self) -> Result<Vec<u8>> {
        self.ensure_connected()?;
        self.transport.receive()
    }

    pub fn send_message(&mut self, message: &Message) -> Result<()> {
        self.send(&message.to_bytes())
    }

    /// Reads one message whose body length is given by `Content-Length`.
    ///
    /// The head must arrive within the first read. Body chunks are appended
    /// whole, so the body can end up longer than announced.
    pub fn receive_message(&mut self) -> Result<Message> {
        self.ensure_connected()?;

        let mut buf = vec![0u8; self.transport.config().get_chunk_size()];

        let n = self.transport.read_chunk(&mut buf)?;
        if n == 0 {
            return Err(Error::ClosedBeforeHead);
        }

        let mut message = Message::parse(&buf[..n])?;
        let mut body_parser = ContentLengthBodyParser::for_message(&message)?;

        while !body_parser.is_completed() {
            let n = self.transport.read_chunk(&mut buf)?;
            if n == 0 {
                log::debug!(
                    "peer closed with {} body bytes outstanding",
                    body_parser.get_remaining()
                );
                break;
            }

            match body_parser.parse(&buf[..n], message.body_mut()) {
                BodyParseOutput::Completed(_) => break,
                BodyParseOutput::Partial(_) => continue,
            }
        }

        log::debug!(
            "received message for {:?} with {} body bytes",
            message.target().unwrap_or_default(),
            message.body().len()
        );

        Ok(message)
    }

    /// Sends a request for `url` to the connected host and reads the response
    /// until the peer closes.
    ///
    /// A non-empty `body` is sent with POST, otherwise the request is a GET.
    pub fn send_message_and_receive(&mut self, url: &str, body: impl AsRef<[u8]>) -> Result<Message> {
        let body = body.as_ref();
        let method = if body.is_empty() {
            Method::GET
        } else {
            Method::POST
        };

        let mut request = Message::request(self.address.to_owned(), url, method);
        request.append_body(body);
        self.send_message(&request)?;

        let response = self.receive()?;
        Ok(Message::parse_response(&response)?)
    }
}

impl PlainConnection {
    /// Wraps a stream returned by `accept`. The connection starts out
    /// connected.
    pub fn from_stream(stream: TcpStream, config: TransportConfig) -> Self {
        let (address, port) = match stream.peer_addr() {
            Ok(addr) => (addr.ip().to_string(), addr.port()),
            Err(_) => (String::new(), 0),
        };

        Self {
            transport: PlainTransport::from_stream(stream, config),
            address,
            port,
            state: State::Connected,
        }
    }
}
