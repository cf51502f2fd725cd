//! Client for the wallet credential service.
//!
//! Builds a single remctl command from a fixed-shape command line, runs it,
//! and routes the result to standard output, standard error, or a file.
//!
//! ## Modules
//! - `cli` — Flag parsing and validation
//! - `core` — Configuration, transport seams, and result dispatch
//! - `models` — Data structures
//! - `util` — Files, logging, and external helper programs

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod util;
