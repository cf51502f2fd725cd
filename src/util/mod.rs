//! Utility modules for files, logging, and the external helper programs.

pub mod fs;
pub mod logging;
pub mod remctl;
pub mod srvtab_helper;
