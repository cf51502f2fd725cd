use crate::constants;
use anyhow::{bail, Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// Create or truncate `path` with owner-only permissions and write `data` to it.
pub fn write_private_file(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = open_private(path).with_context(|| format!("open of {} failed", path.display()))?;
    write_payload(path, &mut file, data)?;
    close_file(path, file)
}

/// Write all of `data`, reporting a zero-length write as truncation.
pub fn write_payload(path: &Path, writer: &mut impl Write, data: &[u8]) -> Result<()> {
    match writer.write_all(data) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::WriteZero => {
            bail!("write to {} truncated", path.display())
        }
        Err(e) => Err(e).with_context(|| format!("write to {} failed", path.display())),
    }
}

/// Regular files are synced so a failed writeback surfaces before close;
/// devices and pipes (`/dev/null`, `/dev/stdout`) reject fsync and are just closed.
fn close_file(path: &Path, file: File) -> Result<()> {
    let is_regular = file.metadata().map(|m| m.is_file()).unwrap_or(false);
    if is_regular {
        file.sync_all()
            .with_context(|| format!("close of {} failed (file probably truncated)", path.display()))?;
    }
    drop(file);
    Ok(())
}

fn open_private(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(constants::OUTPUT_FILE_MODE);
    options.open(path)
}
