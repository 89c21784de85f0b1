//! Stub DNS Infrastructure Layer
pub mod dns;
