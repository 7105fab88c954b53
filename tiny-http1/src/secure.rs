use std::io::{self, ErrorKind as IoErrorKind, Read as _, Write as _};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use rustls::{pki_types::ServerName, ClientConfig, ClientConnection, StreamOwned};

use crate::{
    config::TransportConfig,
    error::{Error, Result},
    tls,
    transport::{connect_tcp, shutdown_write, Transport},
};

pub type TlsStream = StreamOwned<ClientConnection, TcpStream>;

//
//
//
/// TLS over TCP. Verified against the Mozilla root certificates unless a
/// client configuration is supplied.
#[derive(Default)]
pub struct SecureTransport {
    stream: Option<TlsStream>,
    config: TransportConfig,
    client_config: Option<Arc<ClientConfig>>,
}

impl SecureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client_config(config: TransportConfig, client_config: Arc<ClientConfig>) -> Self {
        Self {
            stream: None,
            config,
            client_config: Some(client_config),
        }
    }

    fn client_config(&self) -> Arc<ClientConfig> {
        match &self.client_config {
            Some(client_config) => Arc::clone(client_config),
            None => tls::client_config(),
        }
    }

    pub fn get_ref(&self) -> Option<&TlsStream> {
        self.stream.as_ref()
    }

    fn stream_mut(&mut self) -> Result<&mut TlsStream> {
        self.stream.as_mut().ok_or(Error::NotConnected)
    }

    /// Drives the handshake to completion. Each step waits at most one retry
    /// interval on the socket, a step that runs out counts as one attempt.
    fn handshake(&self, conn: &mut ClientConnection, sock: &mut TcpStream) -> Result<()> {
        let step_timeout = self
            .config
            .get_handshake_retry_interval()
            .max(MIN_STEP_TIMEOUT);
        set_timeouts(sock, Some(step_timeout))?;

        let mut attempts = 0_u32;

        while conn.is_handshaking() {
            match conn.complete_io(sock) {
                Ok(_) => {}
                Err(err) if is_would_block(&err) => {
                    attempts += 1;
                    if let Some(max) = self.config.get_handshake_max_attempts() {
                        if attempts >= max {
                            log::warn!("TLS handshake still blocked after {attempts} attempts");
                            return Err(Error::HandshakeAttemptsExhausted { attempts });
                        }
                    }

                    log::trace!("TLS handshake would block, attempt {attempts}");
                }
                Err(err) => return Err(Error::TlsHandshake(err)),
            }
        }

        set_timeouts(sock, None)
    }
}

// Zero is rejected by `set_read_timeout`.
const MIN_STEP_TIMEOUT: Duration = Duration::from_millis(1);

fn set_timeouts(sock: &TcpStream, timeout: Option<Duration>) -> Result<()> {
    sock.set_read_timeout(timeout)
        .and_then(|()| sock.set_write_timeout(timeout))
        .map_err(Error::TlsHandshake)
}

fn is_would_block(err: &io::Error) -> bool {
    matches!(err.kind(), IoErrorKind::WouldBlock | IoErrorKind::TimedOut)
}

fn is_end_of_stream(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        IoErrorKind::ConnectionReset | IoErrorKind::ConnectionAborted | IoErrorKind::UnexpectedEof
    )
}

impl Transport for SecureTransport {
    const DEFAULT_PORT: u16 = 443;

    fn with_config(config: TransportConfig) -> Self {
        Self {
            stream: None,
            config,
            client_config: None,
        }
    }
    fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn connect(&mut self, address: &str, port: u16) -> Result<()> {
        self.close()?;

        let server_name = ServerName::try_from(address.to_owned())
            .map_err(|_| Error::InvalidServerName(address.to_owned()))?;

        let mut sock = connect_tcp(address, port)?;

        // On failure the session is dropped here, before the socket.
        let mut conn = ClientConnection::new(self.client_config(), server_name)
            .map_err(|err| Error::TlsHandshake(io::Error::new(IoErrorKind::Other, err)))?;
        self.handshake(&mut conn, &mut sock)?;

        log::debug!(
            "TLS session with {address}:{port} established, {:?}",
            conn.protocol_version()
        );

        self.stream = Some(StreamOwned::new(conn, sock));
        Ok(())
    }
    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        let stream = self.stream_mut()?;

        let n = stream.write(bytes).map_err(Error::TlsIo)?;
        if n < bytes.len() {
            log::warn!("short write, sent {n} of {} bytes", bytes.len());
        }
        stream.flush().map_err(Error::TlsIo)
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize> {
        let stream = self.stream_mut()?;

        loop {
            match stream.read(buf) {
                Ok(n) => {
                    log::trace!("read {n} bytes");
                    return Ok(n);
                }
                Err(err)
                    if matches!(
                        err.kind(),
                        IoErrorKind::WouldBlock | IoErrorKind::Interrupted
                    ) =>
                {
                    continue
                }
                Err(err) if is_end_of_stream(&err) => {
                    log::debug!("TLS peer went away: {err}");
                    return Ok(0);
                }
                Err(err) => return Err(Error::TlsIo(err)),
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            stream.conn.send_close_notify();
            while stream.conn.wants_write() {
                if let Err(err) = stream.conn.write_tls(&mut stream.sock) {
                    log::debug!("could not send close_notify: {err}");
                    break;
                }
            }
            shutdown_write(&stream.sock);
            log::debug!("closed TLS connection");
        }
        Ok(())
    }
}

impl Drop for SecureTransport {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
