use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use stub_dns_application::ports::QueryResolver;
use stub_dns_application::use_cases::ResolveQueryUseCase;
use stub_dns_domain::{
    DomainError, PolicyAction, PolicyRule, Query, RecordType, Reply, Ruleset, TransportConfig,
};
use stub_dns_infrastructure::dns::codec;
use stub_dns_infrastructure::dns::{DnsServerHandler, ServerState, ServerStats, UdpListener};
use tokio::net::UdpSocket;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub const REPLY_TIMEOUT: Duration = Duration::from_secs(2);

/// `example.com.` fails, `foo.test.` answers 10.10.10.10, everything else 192.0.2.53.
pub fn demo_ruleset() -> Ruleset {
    Ruleset::new(
        vec![
            PolicyRule::new("example.com.", PolicyAction::SimulateFailure),
            PolicyRule::new(
                "foo.test.",
                PolicyAction::static_a(Ipv4Addr::new(10, 10, 10, 10)),
            ),
        ],
        PolicyAction::static_a(Ipv4Addr::new(192, 0, 2, 53)),
    )
}

pub fn demo_handler() -> DnsServerHandler {
    DnsServerHandler::new(Arc::new(ResolveQueryUseCase::new(Arc::new(demo_ruleset()))))
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub stats: ServerStats,
    pub state: watch::Receiver<ServerState>,
    shutdown: CancellationToken,
    handle: Option<JoinHandle<Result<(), DomainError>>>,
}

impl TestServer {
    pub async fn start(ruleset: Ruleset) -> Self {
        Self::start_with(ruleset, TransportConfig::udp(loopback())).await
    }

    pub async fn start_with(ruleset: Ruleset, config: TransportConfig) -> Self {
        Self::start_with_resolver(Arc::new(ResolveQueryUseCase::new(Arc::new(ruleset))), config)
            .await
    }

    pub async fn start_with_resolver(
        resolver: Arc<dyn QueryResolver>,
        config: TransportConfig,
    ) -> Self {
        let stats = ServerStats::new();
        let handler = DnsServerHandler::new(resolver).with_stats(stats.clone());

        let listener = UdpListener::bind(&config).expect("bind test listener");
        let addr = listener.local_addr();
        let state = listener.state();
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(listener.serve(Arc::new(handler), shutdown.clone()));

        Self {
            addr,
            stats,
            state,
            shutdown,
            handle: Some(handle),
        }
    }

    /// Cancels the listener without waiting for it.
    pub fn cancel(&self) {
        self.shutdown.cancel();
    }

    /// True once `serve` has returned.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |handle| handle.is_finished())
    }

    /// Cancels the listener and waits for it to drain.
    pub async fn stop(mut self) -> Result<(), DomainError> {
        self.shutdown.cancel();
        match self.handle.take() {
            Some(handle) => handle.await.expect("listener task panicked"),
            None => Ok(()),
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

pub fn loopback() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 0))
}

pub async fn client_socket() -> UdpSocket {
    UdpSocket::bind(loopback()).await.unwrap()
}

/// Sends raw bytes and waits for one datagram back.
pub async fn exchange(client: &UdpSocket, server: SocketAddr, bytes: &[u8]) -> Option<Vec<u8>> {
    client.send_to(bytes, server).await.unwrap();
    let mut buf = vec![0u8; 4096];
    match tokio::time::timeout(REPLY_TIMEOUT, client.recv_from(&mut buf)).await {
        Ok(Ok((len, _))) => {
            buf.truncate(len);
            Some(buf)
        }
        _ => None,
    }
}

/// Encodes an A query, sends it from a fresh socket and decodes the reply.
pub async fn query(server: SocketAddr, id: u16, name: &str) -> Reply {
    let client = client_socket().await;
    let bytes = codec::encode_query(&Query::new(id, name, RecordType::A)).unwrap();
    let response = exchange(&client, server, &bytes)
        .await
        .unwrap_or_else(|| panic!("no reply for {} (id {})", name, id));
    codec::decode_reply(&response).unwrap()
}
