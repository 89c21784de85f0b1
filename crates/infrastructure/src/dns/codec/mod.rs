//! DNS message codec (RFC 1035 §4.1)
//!
//! Pure functions between wire bytes and the domain types. Only the parts of
//! a message this responder needs are modelled: the 12-byte header, the first
//! question, and the answer section. Authority and additional sections are
//! never written, and are ignored when reading.
//!
//! ```text
//!                                 1  1  1  1  1  1
//!   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                      ID                       |
//! |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
//! |                    QDCOUNT                    |
//! |                    ANCOUNT                    |
//! |                    NSCOUNT                    |
//! |                    ARCOUNT                    |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! ```

mod decode;
mod encode;
mod header;
mod name;

pub use decode::{decode, decode_reply};
pub use encode::{encode, encode_query};
pub use header::{Header, HEADER_LEN, OPCODE_QUERY};

/// Largest name on the wire, length octets and root label included.
pub const MAX_NAME_LEN: usize = 255;

/// Largest single label.
pub const MAX_LABEL_LEN: usize = 63;

/// Classic DNS-over-UDP message limit without EDNS(0).
pub const MAX_UDP_MESSAGE_SIZE: usize = 512;
