//! Turn parsed flags into a validated [`InvocationRequest`].

use crate::cli::Cli;
use crate::constants;
use crate::models::client_config::ClientSection;
use crate::models::invocation::InvocationRequest;
use thiserror::Error;

/// What the command line asks the program to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Help,
    Version,
    Invoke(InvocationRequest),
}

/// Command-line problems detected before anything is sent to the server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Unknown flag, missing option value, or too few positional words.
    #[error("invalid usage")]
    Usage,

    #[error("arguments must be valid UTF-8")]
    InvalidUtf8,

    #[error("invalid port number {0}")]
    InvalidPort(String),

    #[error("-f only supported for get")]
    OutputRequiresGet,

    #[error("-S only supported for get keytab")]
    SrvtabRequiresGetKeytab,

    #[error("-S option requires -f also be used")]
    SrvtabRequiresOutput,
}

/// Validate `cli` and fill unset values from `config`, then from built-in defaults.
pub fn resolve(cli: Cli, config: &ClientSection) -> Result<Action, ResolveError> {
    if cli.help {
        return Ok(Action::Help);
    }
    if cli.version {
        return Ok(Action::Version);
    }

    let port = match cli.port.as_deref() {
        Some(raw) => parse_port(raw)?,
        None => config.port.unwrap_or(constants::DEFAULT_PORT),
    };

    if cli.words.len() < constants::MIN_WORDS {
        return Err(ResolveError::Usage);
    }

    let verb = cli.words[0].as_str();
    if cli.output.is_some() && verb != "get" {
        return Err(ResolveError::OutputRequiresGet);
    }
    if cli.srvtab.is_some() {
        if verb != "get" || cli.words[1] != "keytab" {
            return Err(ResolveError::SrvtabRequiresGetKeytab);
        }
        if cli.output.is_none() {
            return Err(ResolveError::SrvtabRequiresOutput);
        }
    }

    Ok(Action::Invoke(InvocationRequest {
        command_type: cli
            .command_type
            .or_else(|| config.command_type.clone())
            .unwrap_or_else(|| constants::DEFAULT_COMMAND_TYPE.to_string()),
        words: cli.words,
        server: cli
            .server
            .or_else(|| config.server.clone())
            .unwrap_or_else(|| constants::DEFAULT_SERVER.to_string()),
        port,
        principal: cli.principal.or_else(|| config.principal.clone()),
        output_file: cli.output,
        srvtab_file: cli.srvtab,
    }))
}

/// Parse a base-10 port in `1..=65535`, rejecting signs, blanks, and trailing junk.
pub fn parse_port(raw: &str) -> Result<u16, ResolveError> {
    let invalid = || ResolveError::InvalidPort(raw.to_string());
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match raw.parse::<u16>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(port) => Ok(port),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("wallet").chain(args.iter().copied())).unwrap()
    }

    fn resolve_args(args: &[&str]) -> Result<Action, ResolveError> {
        resolve(cli(args), &ClientSection::default())
    }

    fn invoke(args: &[&str]) -> InvocationRequest {
        match resolve_args(args).unwrap() {
            Action::Invoke(req) => req,
            other => panic!("expected invoke, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let req = invoke(&["get", "keytab", "host/example.com"]);
        assert_eq!(req.command_type, "wallet");
        assert_eq!(req.server, constants::DEFAULT_SERVER);
        assert_eq!(req.port, 4444);
        assert_eq!(req.principal, None);
        assert_eq!(req.words, vec!["get", "keytab", "host/example.com"]);
        assert_eq!(req.output_file, None);
    }

    #[test]
    fn test_all_overrides() {
        let req = invoke(&[
            "-c", "admin", "-k", "service/wallet", "-s", "vault.example.com", "-p", "4373",
            "-f", "/tmp/out", "-S", "/tmp/legacy", "get", "keytab", "host/example.com",
        ]);
        assert_eq!(req.command_type, "admin");
        assert_eq!(req.principal.as_deref(), Some("service/wallet"));
        assert_eq!(req.server, "vault.example.com");
        assert_eq!(req.port, 4373);
        assert_eq!(req.output_file, Some(PathBuf::from("/tmp/out")));
        assert_eq!(req.srvtab_file, Some(PathBuf::from("/tmp/legacy")));
    }

    #[test]
    fn test_config_fills_unset_values() {
        let config = ClientSection {
            server: Some("config.example.com".into()),
            port: Some(4373),
            principal: Some("service/config".into()),
            command_type: Some("keys".into()),
            ..Default::default()
        };
        let action = resolve(cli(&["-s", "flag.example.com", "show", "file", "x"]), &config).unwrap();
        let Action::Invoke(req) = action else {
            panic!("expected invoke");
        };
        assert_eq!(req.server, "flag.example.com");
        assert_eq!(req.port, 4373);
        assert_eq!(req.principal.as_deref(), Some("service/config"));
        assert_eq!(req.command_type, "keys");
    }

    #[test]
    fn test_help_and_version_win() {
        assert_eq!(resolve_args(&["-h"]).unwrap(), Action::Help);
        assert_eq!(resolve_args(&["-v"]).unwrap(), Action::Version);
        assert_eq!(resolve_args(&["-f", "/tmp/x", "-h", "show"]).unwrap(), Action::Help);
        assert_eq!(resolve_args(&["-p", "0", "-v"]).unwrap(), Action::Version);
    }

    #[test]
    fn test_too_few_words() {
        for args in [
            &[][..],
            &["get"][..],
            &["get", "keytab"][..],
            &["-s", "x", "-f", "/tmp/out", "get", "keytab"][..],
        ] {
            assert_eq!(resolve_args(args), Err(ResolveError::Usage), "{:?}", args);
        }
    }

    #[test]
    fn test_acl_shape_accepted() {
        let req = invoke(&["acl", "add", "ADMIN", "krb5", "user@EXAMPLE.COM"]);
        assert_eq!(req.words.len(), 5);
    }

    #[test]
    fn test_bad_ports() {
        for port in ["0", "65536", "99999999999", "-1", "+80", "80x", "4 4", "", "0x50", "abc"] {
            assert_eq!(
                resolve_args(&["-p", port, "get", "file", "x"]),
                Err(ResolveError::InvalidPort(port.to_string())),
                "{:?}",
                port
            );
        }
    }

    #[test]
    fn test_good_ports() {
        assert_eq!(parse_port("1"), Ok(1));
        assert_eq!(parse_port("65535"), Ok(65535));
        assert_eq!(parse_port("004444"), Ok(4444));
    }

    #[test]
    fn test_invalid_port_message() {
        assert_eq!(
            ResolveError::InvalidPort("80x".into()).to_string(),
            "invalid port number 80x"
        );
    }

    #[test]
    fn test_output_requires_get() {
        for verb in ["show", "store", "acl", "GET", "getx"] {
            assert_eq!(
                resolve_args(&["-f", "/tmp/out", verb, "file", "x"]),
                Err(ResolveError::OutputRequiresGet)
            );
        }
        assert!(resolve_args(&["-f", "/tmp/out", "get", "file", "x"]).is_ok());
    }

    #[test]
    fn test_srvtab_requires_get_keytab() {
        assert_eq!(
            resolve_args(&["-f", "/tmp/out", "-S", "/tmp/s", "get", "file", "x"]),
            Err(ResolveError::SrvtabRequiresGetKeytab)
        );
        assert_eq!(
            resolve_args(&["-S", "/tmp/s", "show", "keytab", "x"]),
            Err(ResolveError::SrvtabRequiresGetKeytab)
        );
    }

    #[test]
    fn test_srvtab_requires_output() {
        assert_eq!(
            resolve_args(&["-S", "/tmp/s", "get", "keytab", "host/example.com"]),
            Err(ResolveError::SrvtabRequiresOutput)
        );
    }

    #[test]
    fn test_options_after_words() {
        let req = invoke(&["get", "keytab", "host/example.com", "-f", "/tmp/out"]);
        assert_eq!(req.output_file, Some(PathBuf::from("/tmp/out")));
        assert_eq!(req.words, vec!["get", "keytab", "host/example.com"]);
    }

    #[test]
    fn test_double_dash_ends_options() {
        let req = invoke(&["--", "store", "file", "x", "-v"]);
        assert_eq!(req.words, vec!["store", "file", "x", "-v"]);
    }

    #[test]
    fn test_last_option_wins() {
        let req = invoke(&["-s", "one", "-s", "two", "show", "file", "x"]);
        assert_eq!(req.server, "two");
    }
}
