use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, TcpStream};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};

use crate::{
    config::TransportConfig,
    connection::PlainConnection,
    error::{Error, Result, SocketOp},
    transport::resolve,
};

//
//
//
#[derive(Debug, Default)]
struct Shared {
    running: AtomicBool,
    stop_requested: AtomicBool,
    local_addr: Mutex<Option<SocketAddr>>,
}

impl Shared {
    fn local_addr(&self) -> MutexGuard<'_, Option<SocketAddr>> {
        self.local_addr
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn stop(&self) {
        if !self.running.load(Ordering::SeqCst) {
            return;
        }
        log::info!("stopping server");
        self.stop_requested.store(true, Ordering::SeqCst);

        // Unblock a pending accept, the loop then sees the request.
        let addr = *self.local_addr();
        if let Some(addr) = addr {
            if let Err(err) = TcpStream::connect(wake_addr(addr)) {
                log::debug!("could not wake accept loop: {err}");
            }
        }
    }
}

fn wake_addr(mut addr: SocketAddr) -> SocketAddr {
    if addr.ip().is_unspecified() {
        let loopback = match addr.ip() {
            IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::LOCALHOST),
        };
        addr.set_ip(loopback);
    }
    addr
}

/// Stops a running [`Server`] from another thread.
#[derive(Debug, Clone)]
pub struct StopHandle {
    shared: Arc<Shared>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.shared.stop()
    }
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }
}

//
//
//
/// Accepts connections one at a time and passes each to a handler.
#[derive(Debug)]
pub struct Server {
    address: String,
    port: u16,
    config: TransportConfig,
    shared: Arc<Shared>,
}

impl Server {
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self::with_config(address, port, TransportConfig::default())
    }
    /// `config` applies to every accepted connection.
    pub fn with_config(address: impl Into<String>, port: u16, config: TransportConfig) -> Self {
        Self {
            address: address.into(),
            port,
            config,
            shared: Default::default(),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            shared: Arc::clone(&self.shared),
        }
    }
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }
    /// Bound address while running.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        *self.shared.local_addr()
    }

    /// Binds and runs the accept loop on the calling thread until stopped.
    ///
    /// A handler returning `false` ends the loop with
    /// [`Error::HandlerFailed`].
    pub fn start<F>(&self, mut handler: F) -> Result<()>
    where
        F: FnMut(PlainConnection) -> bool,
    {
        if self
            .shared
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::AlreadyRunning);
        }
        // A stop aimed at the previous run may land after its cleanup.
        self.shared.stop_requested.store(false, Ordering::SeqCst);

        let result = self.serve(&mut handler);

        *self.shared.local_addr() = None;
        self.shared.stop_requested.store(false, Ordering::SeqCst);
        self.shared.running.store(false, Ordering::SeqCst);

        result
    }

    pub fn stop(&self) {
        self.shared.stop()
    }

    fn serve<F>(&self, handler: &mut F) -> Result<()>
    where
        F: FnMut(PlainConnection) -> bool,
    {
        let addr = resolve(&self.address, self.port)?;
        let listener = TcpListener::bind(addr).map_err(Error::socket(SocketOp::Bind))?;
        let local_addr = listener
            .local_addr()
            .map_err(Error::socket(SocketOp::Bind))?;
        *self.shared.local_addr() = Some(local_addr);

        log::info!("listening on {local_addr}");

        while !self.stop_requested() {
            let accepted = listener.accept();
            if self.stop_requested() {
                break;
            }

            let (stream, peer_addr) = accepted.map_err(Error::socket(SocketOp::Accept))?;
            log::debug!("accepted connection from {peer_addr}");

            let connection = PlainConnection::from_stream(stream, self.config.clone());
            if !handler(connection) {
                log::warn!("request handler failed for {peer_addr}, shutting down");
                return Err(Error::HandlerFailed);
            }
        }

        log::info!("server on {local_addr} stopped");
        Ok(())
    }

    fn stop_requested(&self) -> bool {
        self.shared.stop_requested.load(Ordering::SeqCst)
    }
}
