//! Seam between the dispatcher and whatever carries the command to the server.

use crate::models::invocation::{CommandVector, InvocationResult};
use anyhow::Result;

/// Synchronous remote command execution.
///
/// `Err` means the call could not be made at all; failures reported by the
/// server or the protocol layer belong in [`InvocationResult::error`].
pub trait Transport {
    fn invoke(
        &self,
        server: &str,
        port: u16,
        principal: Option<&str>,
        command: &CommandVector,
    ) -> Result<InvocationResult>;
}
