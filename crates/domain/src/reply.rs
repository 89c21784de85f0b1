use super::{Query, ReplyRecord};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    Unknown(u8),
}

impl ResponseCode {
    pub fn to_u8(&self) -> u8 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormErr => 1,
            ResponseCode::ServFail => 2,
            ResponseCode::NXDomain => 3,
            ResponseCode::NotImp => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Unknown(code) => *code & 0x0F,
        }
    }

    /// Maps the 4-bit RCODE header field.
    pub fn from_u8(code: u8) -> Self {
        match code & 0x0F {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormErr,
            2 => ResponseCode::ServFail,
            3 => ResponseCode::NXDomain,
            4 => ResponseCode::NotImp,
            5 => ResponseCode::Refused,
            other => ResponseCode::Unknown(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseCode::Unknown(code) => write!(f, "RCODE{}", code),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// A response to exactly one [`Query`].
///
/// Built once and never modified: the id and echoed question always come from
/// the query it answers, and error replies never carry answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    question: Query,
    response_code: ResponseCode,
    answers: Vec<ReplyRecord>,
}

impl Reply {
    /// A NOERROR reply carrying `answers` (possibly empty, i.e. NODATA).
    pub fn answer(query: &Query, answers: Vec<ReplyRecord>) -> Self {
        Self {
            question: query.clone(),
            response_code: ResponseCode::NoError,
            answers,
        }
    }

    /// An answerless reply with the given error code.
    pub fn error(query: &Query, response_code: ResponseCode) -> Self {
        Self {
            question: query.clone(),
            response_code,
            answers: Vec::new(),
        }
    }

    /// Reassembles a reply read off the wire, where the peer decides the contents.
    pub fn from_parts(
        question: Query,
        response_code: ResponseCode,
        answers: Vec<ReplyRecord>,
    ) -> Self {
        Self {
            question,
            response_code,
            answers,
        }
    }

    pub fn id(&self) -> u16 {
        self.question.id
    }

    pub fn question(&self) -> &Query {
        &self.question
    }

    pub fn response_code(&self) -> ResponseCode {
        self.response_code
    }

    pub fn answers(&self) -> &[ReplyRecord] {
        &self.answers
    }
}
