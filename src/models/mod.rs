//! Data structures shared between the resolver and the dispatcher.

pub mod client_config;
pub mod invocation;
