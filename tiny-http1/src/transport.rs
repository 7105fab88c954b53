use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs as _};

use crate::{
    config::TransportConfig,
    error::{Error, Result, SocketOp},
};

//
//
//
/// A blocking byte stream to a single peer.
pub trait Transport {
    const DEFAULT_PORT: u16;

    fn with_config(config: TransportConfig) -> Self
    where
        Self: Sized;
    fn config(&self) -> &TransportConfig;

    fn connect(&mut self, address: &str, port: u16) -> Result<()>;
    fn is_connected(&self) -> bool;

    /// Hands all of `bytes` to a single write call.
    fn send(&mut self, bytes: &[u8]) -> Result<()>;

    /// One read into `buf`. `Ok(0)` means the peer has finished sending.
    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize>;

    fn close(&mut self) -> Result<()>;

    /// Reads until the peer has finished sending.
    fn receive(&mut self) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; self.config().get_chunk_size()];
        let mut received = Vec::new();

        loop {
            let n = self.read_chunk(&mut buf)?;
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
        }

        log::trace!("received {} bytes until end of stream", received.len());
        Ok(received)
    }
}

//
//
//
/// First address `address:port` resolves to.
pub(crate) fn resolve(address: &str, port: u16) -> Result<SocketAddr> {
    let mut addrs = (address, port)
        .to_socket_addrs()
        .map_err(|source| Error::Resolution {
            address: format!("{address}:{port}"),
            source,
        })?;

    addrs.next().ok_or_else(|| Error::NoAddress {
        address: format!("{address}:{port}"),
    })
}

pub(crate) fn connect_tcp(address: &str, port: u16) -> Result<TcpStream> {
    let addr = resolve(address, port)?;
    log::debug!("connecting to {address}:{port} via {addr}");

    TcpStream::connect(addr).map_err(Error::socket(SocketOp::Connect))
}

/// Stops sending on `stream`. The socket itself closes when dropped.
pub(crate) fn shutdown_write(stream: &TcpStream) {
    if let Err(err) = stream.shutdown(Shutdown::Write) {
        log::debug!("shutdown failed: {err}");
    }
}
