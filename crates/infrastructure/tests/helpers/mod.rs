#![allow(dead_code)]
mod test_server;
mod wire;

#[allow(unused_imports)]
pub use test_server::*;
#[allow(unused_imports)]
pub use wire::*;
