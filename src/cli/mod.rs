//! Command-line parsing and the top-level run loop.

use crate::constants;
use crate::core::config;
use crate::core::dispatch::Dispatcher;
use crate::models::client_config::ClientSection;
use crate::util::{remctl::RemctlClient, srvtab_helper::HelperSrvtabWriter};
use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

pub mod resolve;

use resolve::{Action, ResolveError};

/// Raw flags, before cross-flag validation.
///
/// Help and version are plain flags so that usage text and exit codes stay
/// under our control rather than clap's.
#[derive(Parser, Debug)]
#[command(
    name = "wallet",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub struct Cli {
    /// Command prefix to use
    #[arg(short = 'c', value_name = "command", allow_hyphen_values = true)]
    pub command_type: Option<String>,

    /// For the get command, output file
    #[arg(short = 'f', value_name = "output", allow_hyphen_values = true)]
    pub output: Option<PathBuf>,

    /// Kerberos principal of the server
    #[arg(short = 'k', value_name = "principal", allow_hyphen_values = true)]
    pub principal: Option<String>,

    #[arg(short = 'h', action = ArgAction::SetTrue)]
    pub help: bool,

    /// Port of server, validated later so the bad value can be reported
    #[arg(short = 'p', value_name = "port", allow_hyphen_values = true)]
    pub port: Option<String>,

    /// For the get keytab command, srvtab output file
    #[arg(short = 'S', value_name = "srvtab", allow_hyphen_values = true)]
    pub srvtab: Option<PathBuf>,

    #[arg(short = 's', value_name = "server", allow_hyphen_values = true)]
    pub server: Option<String>,

    #[arg(short = 'v', action = ArgAction::SetTrue)]
    pub version: bool,

    /// `<command> <type> <name> [<arg> ...]`
    #[arg(value_name = "ARG")]
    pub words: Vec<String>,
}

impl Cli {
    /// Resolve, invoke, and route. Returns the process exit status.
    pub fn run(self, out: &mut dyn Write, err: &mut dyn Write) -> Result<u8> {
        // Help and version must work even with a broken configuration file.
        let config = if self.help || self.version {
            ClientSection::default()
        } else {
            config::load(&config::config_path())?.client
        };

        let request = match resolve::resolve(self, &config) {
            Ok(Action::Invoke(request)) => request,
            Ok(action) => return show(&action, out),
            Err(reason) => return Ok(report_usage_error(&reason, err)),
        };

        let transport = RemctlClient::new(
            config
                .remctl_program
                .as_deref()
                .unwrap_or(constants::DEFAULT_REMCTL_PROGRAM),
        );
        let srvtab = HelperSrvtabWriter::new(
            config
                .srvtab_program
                .as_deref()
                .unwrap_or(constants::DEFAULT_SRVTAB_PROGRAM),
        );

        let status = Dispatcher::new(&transport, &srvtab).dispatch(&request, out, err)?;
        Ok(exit_status(status))
    }
}

/// Entry point for the binary: parse `args`, run, and report fatal errors.
pub fn main<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let stdout = io::stdout();
    let stderr = io::stderr();
    ExitCode::from(run_args(args, &mut stdout.lock(), &mut stderr.lock()))
}

fn run_args<I, T>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let result = match Cli::try_parse_from(args.iter().cloned()) {
        Ok(cli) => cli.run(out, err),
        Err(parse_err) => match early_action(args.get(1..).unwrap_or_default()) {
            Some(action) => show(&action, out),
            None if parse_err.kind() == ErrorKind::InvalidUtf8 => {
                Ok(report_usage_error(&ResolveError::InvalidUtf8, err))
            }
            None => Ok(report_usage_error(&ResolveError::Usage, err)),
        },
    };
    match result {
        Ok(status) => status,
        Err(fatal) => {
            let _ = writeln!(err, "{}: {:#}", constants::PROGRAM_NAME, fatal);
            1
        }
    }
}

/// Find a `-h` or `-v` that getopt would reach before any bad option.
///
/// Used only when clap rejects the command line, so that a help or version
/// request still wins over a later unknown flag or missing option value.
fn early_action(args: &[OsString]) -> Option<Action> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let arg = arg.to_string_lossy();
        if arg == "--" {
            return None;
        }
        let flags = match arg.strip_prefix('-') {
            Some(flags) if !flags.is_empty() => flags,
            _ => continue,
        };
        for (i, flag) in flags.char_indices() {
            match flag {
                'h' => return Some(Action::Help),
                'v' => return Some(Action::Version),
                'c' | 'f' | 'k' | 'p' | 'S' | 's' => {
                    // Value is the rest of this token, or the next argument.
                    if i + flag.len_utf8() == flags.len() {
                        iter.next();
                    }
                    break;
                }
                _ => return None,
            }
        }
    }
    None
}

/// Print help or version text to standard output.
fn show(action: &Action, out: &mut dyn Write) -> Result<u8> {
    let written = match action {
        Action::Help => out.write_all(constants::USAGE.as_bytes()),
        Action::Version => writeln!(out, "{}", constants::PACKAGE_STRING),
        Action::Invoke(_) => Ok(()),
    };
    written.context("write to standard output")?;
    out.flush().context("flush standard output")?;
    Ok(0)
}

fn report_usage_error(reason: &ResolveError, err: &mut dyn Write) -> u8 {
    let _ = match reason {
        ResolveError::Usage => err.write_all(constants::USAGE.as_bytes()),
        other => writeln!(err, "{}: {}", constants::PROGRAM_NAME, other),
    };
    let _ = err.flush();
    1
}

/// Map a remote status onto a process exit status the way the OS would: low 8 bits.
pub fn exit_status(status: i32) -> u8 {
    (status & 0xff) as u8
}
