//! Seam for producing a Kerberos v4 srvtab from a fetched keytab.

use anyhow::Result;
use std::path::Path;

pub trait SrvtabWriter {
    /// Write `srvtab` using the key for `principal` found in `keytab`.
    fn write_srvtab(&self, srvtab: &Path, principal: &str, keytab: &Path) -> Result<()>;
}
