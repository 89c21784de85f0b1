use super::header::{Header, HEADER_LEN};
use super::name::{write_name, write_pointer};
use super::MAX_UDP_MESSAGE_SIZE;
use stub_dns_domain::{DomainError, Query, Reply, ReplyRecord};

/// Serializes a reply: header, echoed question, answer records.
///
/// Answer names equal to the question name are compressed to a pointer at the
/// question. Fails only when a record's payload disagrees with its type or a
/// name cannot be represented on the wire.
pub fn encode(reply: &Reply) -> Result<Vec<u8>, DomainError> {
    let question = reply.question();
    let answers = reply.answers();

    for record in answers {
        check_rdata(record)?;
    }
    let ancount = u16::try_from(answers.len())
        .map_err(|_| DomainError::encoding(format!("{} answers do not fit", answers.len())))?;

    let mut out = Vec::with_capacity(MAX_UDP_MESSAGE_SIZE);
    Header {
        id: reply.id(),
        flags: Header::response_flags(
            question.opcode,
            question.recursion_desired,
            reply.response_code(),
        ),
        qdcount: 1,
        ancount,
        nscount: 0,
        arcount: 0,
    }
    .write(&mut out);

    write_question(question, &mut out)?;

    for record in answers {
        if record.name == question.name {
            write_pointer(HEADER_LEN as u16, &mut out);
        } else {
            write_name(&record.name, &mut out)?;
        }
        out.extend_from_slice(&record.record_type.to_u16().to_be_bytes());
        out.extend_from_slice(&record.record_class.to_u16().to_be_bytes());
        out.extend_from_slice(&record.ttl.to_be_bytes());
        out.extend_from_slice(&(record.data.len() as u16).to_be_bytes());
        out.extend_from_slice(&record.data);
    }

    Ok(out)
}

/// Serializes a single-question query message.
pub fn encode_query(query: &Query) -> Result<Vec<u8>, DomainError> {
    let mut out = Vec::with_capacity(MAX_UDP_MESSAGE_SIZE);
    Header {
        id: query.id,
        flags: Header::query_flags(query.opcode, query.recursion_desired),
        qdcount: 1,
        ..Header::default()
    }
    .write(&mut out);

    write_question(query, &mut out)?;
    Ok(out)
}

fn write_question(query: &Query, out: &mut Vec<u8>) -> Result<(), DomainError> {
    write_name(&query.name, out)?;
    out.extend_from_slice(&query.record_type.to_u16().to_be_bytes());
    out.extend_from_slice(&query.record_class.to_u16().to_be_bytes());
    Ok(())
}

fn check_rdata(record: &ReplyRecord) -> Result<(), DomainError> {
    if let Some(expected) = record.record_type.fixed_rdata_len() {
        if record.data.len() != expected {
            return Err(DomainError::encoding(format!(
                "{} record for {} carries {} bytes of data, expected {}",
                record.record_type,
                record.name,
                record.data.len(),
                expected
            )));
        }
    }
    if record.data.len() > u16::MAX as usize {
        return Err(DomainError::encoding(format!(
            "record data for {} is {} bytes",
            record.name,
            record.data.len()
        )));
    }
    Ok(())
}
