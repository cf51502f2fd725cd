//! Run one remote command and route its result to the right destination.

use crate::constants;
use crate::core::srvtab::SrvtabWriter;
use crate::core::transport::Transport;
use crate::models::invocation::{InvocationRequest, InvocationResult};
use crate::util::fs as wallet_fs;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Where the result of an invocation ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routing {
    /// The transport reported an error message.
    RemoteError,
    /// The remote command wrote to its standard error.
    RemoteStderr,
    /// The payload was written to the `-f` file (and a srvtab, if requested).
    File,
    /// The payload was written to standard output.
    Stdout,
}

pub struct Dispatcher<'a> {
    transport: &'a dyn Transport,
    srvtab: &'a dyn SrvtabWriter,
}

impl<'a> Dispatcher<'a> {
    pub fn new(transport: &'a dyn Transport, srvtab: &'a dyn SrvtabWriter) -> Self {
        Self { transport, srvtab }
    }

    /// Invoke the request and route the result to `out`/`err` or the output file.
    ///
    /// Returns the remote exit status, which becomes the process exit status.
    /// `Err` is reserved for local failures: the call could not be made, or
    /// the output file or srvtab could not be written.
    pub fn dispatch(
        &self,
        req: &InvocationRequest,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<i32> {
        let (status, _) = self.dispatch_routed(req, out, err)?;
        Ok(status)
    }

    pub fn dispatch_routed(
        &self,
        req: &InvocationRequest,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<(i32, Routing)> {
        let command = req.command_vector();
        tracing::debug!(
            server = %req.server,
            port = req.port,
            command_type = %req.command_type,
            args = command.len(),
            "invoking remote command"
        );

        let result = self
            .transport
            .invoke(&req.server, req.port, req.principal.as_deref(), &command)
            .context("cannot run remote command")?;
        drop(command);

        let routing = self.route(req, &result, out, err)?;
        tracing::debug!(status = result.status, ?routing, "remote command finished");
        Ok((result.status, routing))
    }

    fn route(
        &self,
        req: &InvocationRequest,
        result: &InvocationResult,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<Routing> {
        if let Some(message) = result.error_message() {
            let line = format!("{}: {}\n", constants::PROGRAM_NAME, message);
            console_write(err, "standard error", &[line.as_bytes()]);
            return Ok(Routing::RemoteError);
        }

        if !result.stderr.is_empty() {
            let prefix = format!("{}: ", constants::PROGRAM_NAME);
            console_write(err, "standard error", &[prefix.as_bytes(), result.stderr.as_slice()]);
            return Ok(Routing::RemoteStderr);
        }

        if let Some(file) = req.get_output_file() {
            wallet_fs::write_private_file(file, &result.stdout)?;
            tracing::debug!(file = %file.display(), bytes = result.stdout.len(), "wrote output file");
            if let Some(srvtab) = &req.srvtab_file {
                self.write_srvtab(srvtab, req.object_name(), file)?;
            }
            return Ok(Routing::File);
        }

        console_write(out, "standard output", &[result.stdout.as_slice()]);
        Ok(Routing::Stdout)
    }

    fn write_srvtab(&self, srvtab: &Path, principal: &str, keytab: &Path) -> Result<()> {
        tracing::debug!(srvtab = %srvtab.display(), "writing srvtab");
        self.srvtab
            .write_srvtab(srvtab, principal, keytab)
            .with_context(|| format!("cannot write srvtab {}", srvtab.display()))
    }
}

/// Console output is best effort. Failures are logged and the remote status
/// stays the process outcome.
fn console_write(stream: &mut dyn Write, name: &str, chunks: &[&[u8]]) {
    let written = chunks
        .iter()
        .try_for_each(|chunk| stream.write_all(chunk))
        .and_then(|()| stream.flush());
    if let Err(e) = written {
        tracing::warn!(stream = name, error = %e, "console write failed");
    }
}
