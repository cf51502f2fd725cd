//! Transport backed by the `remctl` client program.
//!
//! Authentication, connection setup, and the wire protocol all stay inside
//! `remctl`; this module only maps its process output onto an
//! [`InvocationResult`].

use crate::core::transport::Transport;
use crate::models::invocation::{CommandVector, InvocationResult};
use anyhow::{Context, Result};
use std::process::{Command, Output};
use zeroize::Zeroizing;

/// Prefix `remctl` puts on its own diagnostics, as opposed to remote stderr.
const CLIENT_PREFIX: &[u8] = b"remctl: ";

/// Status reported when `remctl` dies without an exit code.
const SIGNALED_STATUS: i32 = 255;

#[derive(Debug, Clone)]
pub struct RemctlClient {
    program: String,
}

impl RemctlClient {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(
        &self,
        server: &str,
        port: u16,
        principal: Option<&str>,
        command: &CommandVector,
    ) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-p").arg(port.to_string());
        if let Some(principal) = principal {
            cmd.arg("-s").arg(principal);
        }
        cmd.arg("--").arg(server).args(command.iter());
        cmd
    }
}

impl Transport for RemctlClient {
    fn invoke(
        &self,
        server: &str,
        port: u16,
        principal: Option<&str>,
        command: &CommandVector,
    ) -> Result<InvocationResult> {
        let output = self
            .command(server, port, principal, command)
            .output()
            .with_context(|| format!("run {}", self.program))?;
        Ok(classify(output))
    }
}

/// Separate `remctl`'s own failures from output of the remote command.
fn classify(output: Output) -> InvocationResult {
    let Output {
        status,
        stdout,
        stderr,
    } = output;
    let stdout = Zeroizing::new(stdout);
    let stderr = Zeroizing::new(stderr);

    let code = match status.code() {
        Some(code) => code,
        None => {
            return InvocationResult {
                error: Some("remctl terminated by signal".into()),
                stdout,
                stderr: Zeroizing::new(Vec::new()),
                status: SIGNALED_STATUS,
            };
        }
    };

    if code != 0 && stdout.is_empty() && stderr.starts_with(CLIENT_PREFIX) {
        let message = String::from_utf8_lossy(&stderr[CLIENT_PREFIX.len()..])
            .trim()
            .to_string();
        return InvocationResult {
            error: Some(message),
            stdout,
            stderr: Zeroizing::new(Vec::new()),
            status: code,
        };
    }

    InvocationResult {
        error: None,
        stdout,
        stderr,
        status: code,
    }
}
