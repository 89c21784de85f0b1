/// Hand-rolled query bytes, independent of the codec under test.
pub fn build_a_query(id: u16, domain: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&id.to_be_bytes()); // ID
    buf.extend_from_slice(&[0x01, 0x00]); // flags: RD set
    buf.extend_from_slice(&[0x00, 0x01]); // QDCOUNT = 1
    buf.extend_from_slice(&[0x00, 0x00]); // ANCOUNT = 0
    buf.extend_from_slice(&[0x00, 0x00]); // NSCOUNT = 0
    buf.extend_from_slice(&[0x00, 0x00]); // ARCOUNT = 0
    for label in domain.trim_end_matches('.').split('.') {
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0x00); // root label
    buf.extend_from_slice(&[0x00, 0x01]); // QTYPE = A
    buf.extend_from_slice(&[0x00, 0x01]); // QCLASS = IN
    buf
}

/// A header claiming one question whose first label runs past the buffer.
pub fn build_overrunning_label_query() -> Vec<u8> {
    vec![
        0x66, 0x66, // ID
        0x01, 0x00, // flags
        0x00, 0x01, // QDCOUNT = 1
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // AN/NS/AR = 0
        0x3F, b'a', b'b', b'c', // label claims 63 bytes, carries 3
    ]
}

pub fn response_id(buf: &[u8]) -> u16 {
    u16::from_be_bytes([buf[0], buf[1]])
}

pub fn response_rcode(buf: &[u8]) -> u8 {
    buf[3] & 0x0F
}

pub fn response_ancount(buf: &[u8]) -> u16 {
    u16::from_be_bytes([buf[6], buf[7]])
}
