use super::header::{Header, HEADER_LEN};
use super::name::read_name;
use stub_dns_domain::{DomainError, Query, RecordClass, RecordType, Reply, ReplyRecord};

/// Decodes the first question of a query message.
///
/// Additional questions, answers, authority and additional records are
/// ignored. Responses (QR=1) are rejected so a responder never answers
/// another server's reply.
pub fn decode(buf: &[u8]) -> Result<Query, DomainError> {
    let header = Header::parse(buf)?;

    if header.is_response() {
        return Err(DomainError::malformed("message is a response, not a query"));
    }

    let (query, _) = read_question(buf, &header)?;
    Ok(query)
}

/// Decodes a response message: header, first question and answer records.
pub fn decode_reply(buf: &[u8]) -> Result<Reply, DomainError> {
    let header = Header::parse(buf)?;

    if !header.is_response() {
        return Err(DomainError::malformed("message is a query, not a response"));
    }

    let (question, mut pos) = read_question(buf, &header)?;

    for _ in 1..header.qdcount {
        let (_, after_name) = read_name(buf, pos)?;
        pos = after_name + 4;
        if pos > buf.len() {
            return Err(DomainError::malformed("question section truncated"));
        }
    }

    let mut answers = Vec::with_capacity(header.ancount as usize);
    for _ in 0..header.ancount {
        let (record, next) = read_record(buf, pos)?;
        answers.push(record);
        pos = next;
    }

    Ok(Reply::from_parts(question, header.response_code(), answers))
}

fn read_question(buf: &[u8], header: &Header) -> Result<(Query, usize), DomainError> {
    if header.qdcount == 0 {
        return Err(DomainError::malformed("question count is zero"));
    }

    let (name, pos) = read_name(buf, HEADER_LEN)?;
    let fixed = buf
        .get(pos..pos + 4)
        .ok_or_else(|| DomainError::malformed("question type/class truncated"))?;

    let query = Query {
        id: header.id,
        name: name.into(),
        record_type: RecordType::from_u16(u16::from_be_bytes([fixed[0], fixed[1]])),
        record_class: RecordClass::from_u16(u16::from_be_bytes([fixed[2], fixed[3]])),
        opcode: header.opcode(),
        recursion_desired: header.recursion_desired(),
    };

    Ok((query, pos + 4))
}

fn read_record(buf: &[u8], start: usize) -> Result<(ReplyRecord, usize), DomainError> {
    let (name, pos) = read_name(buf, start)?;
    let fixed = buf
        .get(pos..pos + 10)
        .ok_or_else(|| DomainError::malformed(format!("record at offset {} truncated", start)))?;

    let record_type = RecordType::from_u16(u16::from_be_bytes([fixed[0], fixed[1]]));
    let record_class = RecordClass::from_u16(u16::from_be_bytes([fixed[2], fixed[3]]));
    let ttl = u32::from_be_bytes([fixed[4], fixed[5], fixed[6], fixed[7]]);
    let rdlen = u16::from_be_bytes([fixed[8], fixed[9]]) as usize;

    let data_start = pos + 10;
    let data = buf.get(data_start..data_start + rdlen).ok_or_else(|| {
        DomainError::malformed(format!(
            "rdata length {} at offset {} overruns buffer",
            rdlen, pos
        ))
    })?;

    Ok((
        ReplyRecord::new(name, record_type, record_class, ttl, data.to_vec()),
        data_start + rdlen,
    ))
}

