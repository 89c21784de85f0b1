use super::{MAX_LABEL_LEN, MAX_NAME_LEN};
use stub_dns_domain::DomainError;

const POINTER_TAG: u8 = 0xC0;

/// Reads a possibly-compressed name starting at `start`.
///
/// Returns the dotted name (always ending in `.`, root is `"."`) and the
/// offset just past the name in the original byte stream. Pointers must
/// point strictly backwards, which rules out loops.
pub(crate) fn read_name(buf: &[u8], start: usize) -> Result<(String, usize), DomainError> {
    let mut name = String::new();
    let mut pos = start;
    let mut resume_at = None;
    let mut wire_len = 0usize;

    loop {
        let len_byte = *buf.get(pos).ok_or_else(|| {
            DomainError::malformed(format!("name starting at offset {} runs past end", start))
        })?;

        match len_byte & POINTER_TAG {
            0x00 => {
                let len = len_byte as usize;
                if len == 0 {
                    if name.is_empty() {
                        name.push('.');
                    }
                    return Ok((name, resume_at.unwrap_or(pos + 1)));
                }

                let label_start = pos + 1;
                let label_end = label_start + len;
                if label_end > buf.len() {
                    return Err(DomainError::malformed(format!(
                        "label length {} at offset {} overruns {}-byte buffer",
                        len,
                        pos,
                        buf.len()
                    )));
                }

                wire_len += 1 + len;
                if wire_len + 1 > MAX_NAME_LEN {
                    return Err(DomainError::malformed(format!(
                        "name exceeds {} octets",
                        MAX_NAME_LEN
                    )));
                }

                let label = std::str::from_utf8(&buf[label_start..label_end]).map_err(|_| {
                    DomainError::malformed(format!("label at offset {} is not UTF-8", pos))
                })?;
                if label.contains('.') {
                    return Err(DomainError::malformed(format!(
                        "label at offset {} contains a '.'",
                        pos
                    )));
                }

                name.push_str(label);
                name.push('.');
                pos = label_end;
            }
            POINTER_TAG => {
                let low = *buf.get(pos + 1).ok_or_else(|| {
                    DomainError::malformed(format!("truncated pointer at offset {}", pos))
                })?;
                let target = (((len_byte & !POINTER_TAG) as usize) << 8) | low as usize;
                if target >= pos {
                    return Err(DomainError::malformed(format!(
                        "pointer at offset {} does not point backwards ({})",
                        pos, target
                    )));
                }
                if resume_at.is_none() {
                    resume_at = Some(pos + 2);
                }
                pos = target;
            }
            _ => {
                return Err(DomainError::malformed(format!(
                    "reserved label type 0x{:02x} at offset {}",
                    len_byte & POINTER_TAG,
                    pos
                )));
            }
        }
    }
}

/// Writes `name` as uncompressed length-prefixed labels plus the root label.
///
/// A missing trailing dot is tolerated; the name is written fully qualified.
pub(crate) fn write_name(name: &str, out: &mut Vec<u8>) -> Result<(), DomainError> {
    let relative = name.strip_suffix('.').unwrap_or(name);
    if relative.is_empty() {
        out.push(0);
        return Ok(());
    }

    let mut wire_len = 1;
    for label in relative.split('.') {
        if label.is_empty() {
            return Err(DomainError::encoding(format!(
                "empty label in name '{}'",
                name
            )));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::encoding(format!(
                "label '{}' is longer than {} octets",
                label, MAX_LABEL_LEN
            )));
        }
        wire_len += 1 + label.len();
        if wire_len > MAX_NAME_LEN {
            return Err(DomainError::encoding(format!(
                "name '{}' exceeds {} octets",
                name, MAX_NAME_LEN
            )));
        }

        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    Ok(())
}

/// Writes a pointer to an earlier name at `offset`.
pub(crate) fn write_pointer(offset: u16, out: &mut Vec<u8>) {
    out.extend_from_slice(&((offset & 0x3FFF) | 0xC000).to_be_bytes());
}
