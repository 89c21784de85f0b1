use super::{RecordClass, RecordType};
use std::sync::Arc;

/// The first question of a received query message, plus the header bits a
/// responder echoes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub id: u16,

    /// Fully-qualified name with its trailing root dot, e.g. `"foo.test."`.
    pub name: Arc<str>,

    pub record_type: RecordType,

    pub record_class: RecordClass,

    pub opcode: u8,

    pub recursion_desired: bool,
}

impl Query {
    pub fn new(id: u16, name: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            id,
            name: name.into(),
            record_type,
            record_class: RecordClass::IN,
            opcode: 0,
            recursion_desired: true,
        }
    }

    pub fn with_class(mut self, record_class: RecordClass) -> Self {
        self.record_class = record_class;
        self
    }

    pub fn with_opcode(mut self, opcode: u8) -> Self {
        self.opcode = opcode & 0x0F;
        self
    }

    pub fn with_recursion_desired(mut self, recursion_desired: bool) -> Self {
        self.recursion_desired = recursion_desired;
        self
    }
}
