//! UDP listener loop
//!
//! One receive loop per socket; every datagram is handled on its own task so
//! a slow client never delays the next receive. With `workers > 1` several
//! sockets share the port through SO_REUSEPORT and the kernel spreads
//! datagrams across them.

use super::server::DnsServerHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use stub_dns_domain::{DomainError, TransportConfig};
use tokio::net::UdpSocket;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

const RECV_BUFFER_LEN: usize = 4096;
const RECV_ERROR_BACKOFF: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Starting,
    Listening,
    Draining,
    Stopped,
}

/// Bound sockets, ready to serve.
pub struct UdpListener {
    sockets: Vec<Arc<UdpSocket>>,
    local_addr: SocketAddr,
    state: watch::Sender<ServerState>,
}

impl UdpListener {
    /// Binds every worker socket. Any failure here is a `BindError`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn bind(config: &TransportConfig) -> Result<Self, DomainError> {
        let (state, _) = watch::channel(ServerState::Starting);

        let first = create_udp_socket(config, config.listen_addr())?;
        // Port 0 resolves on the first bind; later workers join that port.
        let local_addr = first
            .local_addr()
            .map_err(|e| DomainError::bind(config.listen_addr(), e))?;

        let mut sockets = vec![Arc::new(first)];
        for _ in 1..config.workers() {
            sockets.push(Arc::new(create_udp_socket(config, local_addr)?));
        }

        info!(
            bind_address = %local_addr,
            protocol = %config.protocol(),
            workers = sockets.len(),
            reuse_address = config.reuse_address(),
            "DNS listener bound"
        );
        state.send_replace(ServerState::Listening);

        Ok(Self {
            sockets,
            local_addr,
            state,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn state(&self) -> watch::Receiver<ServerState> {
        self.state.subscribe()
    }

    /// Serves until `shutdown` is cancelled, then waits for in-flight
    /// handlers before releasing the sockets.
    pub async fn serve(
        self,
        handler: Arc<DnsServerHandler>,
        shutdown: CancellationToken,
    ) -> Result<(), DomainError> {
        let tracker = TaskTracker::new();
        let mut workers = JoinSet::new();

        for (worker_id, socket) in self.sockets.into_iter().enumerate() {
            workers.spawn(run_udp_worker(
                socket,
                handler.clone(),
                tracker.clone(),
                shutdown.clone(),
                worker_id,
            ));
        }

        info!(bind_address = %self.local_addr, "DNS server ready");

        while let Some(result) = workers.join_next().await {
            if let Err(e) = result {
                error!(error = %e, "UDP worker terminated abnormally");
            }
        }

        self.state.send_replace(ServerState::Draining);
        info!(in_flight = tracker.len(), "Draining in-flight queries");

        tracker.close();
        tracker.wait().await;

        self.state.send_replace(ServerState::Stopped);
        let stats = handler.stats().snapshot();
        info!(
            received = stats.received,
            answered = stats.answered,
            simulated_failures = stats.simulated_failures,
            malformed = stats.malformed,
            encode_errors = stats.encode_errors,
            send_errors = stats.send_errors,
            "DNS server stopped"
        );

        Ok(())
    }
}

/// Binds according to `config` and serves until `shutdown` is cancelled.
pub async fn serve(
    config: &TransportConfig,
    handler: Arc<DnsServerHandler>,
    shutdown: CancellationToken,
) -> Result<(), DomainError> {
    UdpListener::bind(config)?.serve(handler, shutdown).await
}

async fn run_udp_worker(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    tracker: TaskTracker,
    shutdown: CancellationToken,
    worker_id: usize,
) {
    let mut recv_buf = [0u8; RECV_BUFFER_LEN];

    loop {
        let (len, client) = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            result = socket.recv_from(&mut recv_buf) => match result {
                Ok(received) => received,
                Err(e) if is_transient(&e) => continue,
                Err(e) => {
                    error!(worker = worker_id, error = %e, "UDP recv error");
                    tokio::time::sleep(RECV_ERROR_BACKOFF).await;
                    continue;
                }
            },
        };

        let datagram = recv_buf[..len].to_vec();
        let handler = handler.clone();
        let socket = socket.clone();
        tracker.spawn(async move {
            let Some(response) = handler.handle_datagram(&datagram, client) else {
                return;
            };
            if let Err(e) = socket.send_to(&response, client).await {
                handler.stats().record_send_error();
                debug!(client = %client, error = %e, "Failed to send response");
            }
        });
    }

    debug!(worker = worker_id, "UDP worker stopped receiving");
}

// ICMP port-unreachable from an earlier send surfaces as ConnectionReset on
// some platforms; it says nothing about this socket.
fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::Interrupted | io::ErrorKind::ConnectionReset | io::ErrorKind::WouldBlock
    )
}

fn create_udp_socket(
    config: &TransportConfig,
    socket_addr: SocketAddr,
) -> Result<UdpSocket, DomainError> {
    let bind_err = |e: io::Error| DomainError::bind(socket_addr, e);

    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP)).map_err(bind_err)?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false).map_err(bind_err)?;
    }
    if config.reuse_address() {
        enable_address_reuse(&socket).map_err(bind_err)?;
    }
    if let Err(e) = socket.set_recv_buffer_size(config.recv_buffer_size()) {
        warn!(error = %e, size = config.recv_buffer_size(), "Could not set receive buffer size");
    }
    socket.bind(&socket_addr.into()).map_err(bind_err)?;
    socket.set_nonblocking(true).map_err(bind_err)?;

    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket).map_err(bind_err)
}

#[cfg(unix)]
fn enable_address_reuse(socket: &Socket) -> io::Result<()> {
    socket.set_reuse_address(true)?;
    socket.set_reuse_port(true)
}

// Windows has no SO_REUSEPORT; SO_REUSEADDR already lets sockets share a port.
#[cfg(windows)]
fn enable_address_reuse(socket: &Socket) -> io::Result<()> {
    socket.set_reuse_address(true)
}

#[cfg(not(any(unix, windows)))]
fn enable_address_reuse(_socket: &Socket) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "address reuse is not supported on this platform",
    ))
}
