//! Core logic: configuration, remote invocation, and result routing.

pub mod config;
pub mod dispatch;
pub mod srvtab;
pub mod transport;
