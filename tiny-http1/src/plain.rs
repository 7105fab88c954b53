use std::io::{ErrorKind as IoErrorKind, Read as _, Write as _};
use std::net::TcpStream;

use crate::{
    config::TransportConfig,
    error::{Error, Result, SocketOp},
    transport::{connect_tcp, shutdown_write, Transport},
};

//
//
//
#[derive(Debug, Default)]
pub struct PlainTransport {
    stream: Option<TcpStream>,
    config: TransportConfig,
}

impl PlainTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already connected stream, as handed out by `accept`.
    pub fn from_stream(stream: TcpStream, config: TransportConfig) -> Self {
        Self {
            stream: Some(stream),
            config,
        }
    }

    pub fn get_ref(&self) -> Option<&TcpStream> {
        self.stream.as_ref()
    }

    fn stream_mut(&mut self) -> Result<&mut TcpStream> {
        self.stream.as_mut().ok_or(Error::NotConnected)
    }
}

impl Transport for PlainTransport {
    const DEFAULT_PORT: u16 = 80;

    fn with_config(config: TransportConfig) -> Self {
        Self {
            stream: None,
            config,
        }
    }
    fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn connect(&mut self, address: &str, port: u16) -> Result<()> {
        self.close()?;

        self.stream = Some(connect_tcp(address, port)?);
        Ok(())
    }
    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        let stream = self.stream_mut()?;

        let n = stream
            .write(bytes)
            .map_err(Error::socket(SocketOp::Write))?;
        if n < bytes.len() {
            log::warn!("short write, sent {n} of {} bytes", bytes.len());
        }
        Ok(())
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize> {
        let stream = self.stream_mut()?;

        loop {
            match stream.read(buf) {
                Ok(n) => {
                    log::trace!("read {n} bytes");
                    return Ok(n);
                }
                Err(err) if err.kind() == IoErrorKind::Interrupted => continue,
                Err(err) => return Err(Error::socket(SocketOp::Read)(err)),
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        if let Some(stream) = self.stream.take() {
            shutdown_write(&stream);
            log::debug!("closed plain connection");
        }
        Ok(())
    }
}

impl Drop for PlainTransport {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
