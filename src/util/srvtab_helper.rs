use crate::core::srvtab::SrvtabWriter;
use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

/// Delegates srvtab generation to an external conversion program.
#[derive(Debug, Clone)]
pub struct HelperSrvtabWriter {
    program: String,
}

impl HelperSrvtabWriter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SrvtabWriter for HelperSrvtabWriter {
    fn write_srvtab(&self, srvtab: &Path, principal: &str, keytab: &Path) -> Result<()> {
        let output = Command::new(&self.program)
            .arg(srvtab)
            .arg(principal)
            .arg(keytab)
            .output()
            .with_context(|| format!("run {}", self.program))?;
        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("{} failed: {}", self.program, stderr.trim_end());
    }
}
