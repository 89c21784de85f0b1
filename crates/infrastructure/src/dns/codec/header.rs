use stub_dns_domain::{DomainError, ResponseCode};

pub const HEADER_LEN: usize = 12;

/// Standard query opcode.
pub const OPCODE_QUERY: u8 = 0;

const FLAG_QR: u16 = 0x8000;
const FLAG_AA: u16 = 0x0400;
const FLAG_TC: u16 = 0x0200;
const FLAG_RD: u16 = 0x0100;
const FLAG_RA: u16 = 0x0080;
const OPCODE_SHIFT: u16 = 11;
const OPCODE_MASK: u16 = 0x7800;
const RCODE_MASK: u16 = 0x000F;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub flags: u16,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    pub fn parse(buf: &[u8]) -> Result<Self, DomainError> {
        if buf.len() < HEADER_LEN {
            return Err(DomainError::malformed(format!(
                "{} bytes is shorter than the {}-byte header",
                buf.len(),
                HEADER_LEN
            )));
        }

        let word = |i: usize| u16::from_be_bytes([buf[i], buf[i + 1]]);
        Ok(Self {
            id: word(0),
            flags: word(2),
            qdcount: word(4),
            ancount: word(6),
            nscount: word(8),
            arcount: word(10),
        })
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.id.to_be_bytes());
        out.extend_from_slice(&self.flags.to_be_bytes());
        out.extend_from_slice(&self.qdcount.to_be_bytes());
        out.extend_from_slice(&self.ancount.to_be_bytes());
        out.extend_from_slice(&self.nscount.to_be_bytes());
        out.extend_from_slice(&self.arcount.to_be_bytes());
    }

    /// Flags for an outgoing query.
    pub fn query_flags(opcode: u8, recursion_desired: bool) -> u16 {
        let mut flags = ((opcode as u16) << OPCODE_SHIFT) & OPCODE_MASK;
        if recursion_desired {
            flags |= FLAG_RD;
        }
        flags
    }

    /// Flags for a reply: QR and AA set, opcode and RD echoed, RA clear.
    pub fn response_flags(opcode: u8, recursion_desired: bool, rcode: ResponseCode) -> u16 {
        Self::query_flags(opcode, recursion_desired)
            | FLAG_QR
            | FLAG_AA
            | (rcode.to_u8() as u16 & RCODE_MASK)
    }

    pub fn is_response(&self) -> bool {
        self.flags & FLAG_QR != 0
    }

    pub fn opcode(&self) -> u8 {
        ((self.flags & OPCODE_MASK) >> OPCODE_SHIFT) as u8
    }

    pub fn authoritative(&self) -> bool {
        self.flags & FLAG_AA != 0
    }

    pub fn truncated(&self) -> bool {
        self.flags & FLAG_TC != 0
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & FLAG_RD != 0
    }

    pub fn recursion_available(&self) -> bool {
        self.flags & FLAG_RA != 0
    }

    pub fn response_code(&self) -> ResponseCode {
        ResponseCode::from_u8((self.flags & RCODE_MASK) as u8)
    }
}
