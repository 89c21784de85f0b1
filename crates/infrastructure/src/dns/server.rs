use super::codec::{self, OPCODE_QUERY};
use super::metrics::ServerStats;
use std::net::SocketAddr;
use std::sync::Arc;
use stub_dns_application::ports::QueryResolver;
use stub_dns_domain::{Reply, ResponseCode};
use tracing::{debug, error};

/// Turns one received datagram into the bytes to send back, if any.
///
/// Every failure is confined to the datagram at hand: malformed input and
/// unencodable replies are counted, logged, and produce no response.
pub struct DnsServerHandler {
    resolver: Arc<dyn QueryResolver>,
    stats: ServerStats,
}

impl DnsServerHandler {
    pub fn new(resolver: Arc<dyn QueryResolver>) -> Self {
        Self {
            resolver,
            stats: ServerStats::new(),
        }
    }

    pub fn with_stats(mut self, stats: ServerStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn stats(&self) -> &ServerStats {
        &self.stats
    }

    pub fn handle_datagram(&self, datagram: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        self.stats.record_received();

        let query = match codec::decode(datagram) {
            Ok(query) => query,
            Err(e) => {
                self.stats.record_malformed();
                debug!(
                    client = %client,
                    bytes = datagram.len(),
                    error = %e,
                    "Dropping malformed datagram"
                );
                return None;
            }
        };

        debug!(
            id = query.id,
            name = %query.name,
            record_type = %query.record_type,
            client = %client,
            "DNS query received"
        );

        let reply = if query.opcode != OPCODE_QUERY {
            debug!(opcode = query.opcode, "Unsupported opcode");
            Reply::error(&query, ResponseCode::NotImp)
        } else {
            self.resolver.resolve(&query)
        };

        match codec::encode(&reply) {
            Ok(bytes) => {
                self.stats.record_reply(reply.response_code());
                debug!(
                    id = reply.id(),
                    rcode = %reply.response_code(),
                    answers = reply.answers().len(),
                    "Sending response"
                );
                Some(bytes)
            }
            Err(e) => {
                self.stats.record_encode_error();
                error!(
                    id = reply.id(),
                    name = %query.name,
                    error = %e,
                    "Failed to encode response"
                );
                None
            }
        }
    }
}
