//! Request, command vector, and result of a single remote invocation.

use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// A validated request, produced by the resolver and consumed by the dispatcher.
///
/// Invariants established by [`crate::cli::resolve`]: `words` holds at least
/// three entries, an output file implies `words[0] == "get"`, and a srvtab
/// file implies both an output file and `words[1] == "keytab"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    pub command_type: String,
    pub words: Vec<String>,
    pub server: String,
    pub port: u16,
    pub principal: Option<String>,
    pub output_file: Option<PathBuf>,
    pub srvtab_file: Option<PathBuf>,
}

impl InvocationRequest {
    /// First positional word, e.g. `get` or `acl`.
    pub fn verb(&self) -> &str {
        self.words.first().map(String::as_str).unwrap_or("")
    }

    /// Third positional word (command vector slot 3).
    ///
    /// For `get keytab <name>` this is the principal whose keytab was
    /// fetched, which is what the srvtab writer expects.
    pub fn object_name(&self) -> &str {
        self.words.get(2).map(String::as_str).unwrap_or("")
    }

    /// Output file, only when the command is a `get`.
    pub fn get_output_file(&self) -> Option<&Path> {
        if self.verb() == "get" {
            self.output_file.as_deref()
        } else {
            None
        }
    }

    pub fn command_vector(&self) -> CommandVector {
        CommandVector::new(&self.command_type, &self.words)
    }
}

/// The ordered argument list sent to the server: command type, then words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandVector(Vec<String>);

impl CommandVector {
    pub fn new(command_type: &str, words: &[String]) -> Self {
        let mut args = Vec::with_capacity(words.len() + 1);
        args.push(command_type.to_string());
        args.extend(words.iter().cloned());
        Self(args)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

/// Outcome of a remote invocation as reported by the transport.
///
/// Payload buffers are wiped on drop; `get keytab` output is key material.
#[derive(Debug, Clone, Default)]
pub struct InvocationResult {
    /// Transport or protocol failure reported instead of command output.
    pub error: Option<String>,
    pub stdout: Zeroizing<Vec<u8>>,
    pub stderr: Zeroizing<Vec<u8>>,
    pub status: i32,
}

impl InvocationResult {
    pub fn success(stdout: Vec<u8>) -> Self {
        Self {
            stdout: Zeroizing::new(stdout),
            ..Self::default()
        }
    }

    pub fn failed(error: impl Into<String>, status: i32) -> Self {
        Self {
            error: Some(error.into()),
            status,
            ..Self::default()
        }
    }

    /// Error message, treating an empty string as no error.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(words: &[&str]) -> InvocationRequest {
        InvocationRequest {
            command_type: "wallet".into(),
            words: words.iter().map(|w| w.to_string()).collect(),
            server: "wallet.example.com".into(),
            port: 4444,
            principal: None,
            output_file: Some(PathBuf::from("/tmp/out")),
            srvtab_file: None,
        }
    }

    #[test]
    fn test_command_vector_prepends_type() {
        let req = request(&["get", "keytab", "host/example.com"]);
        let cmd = req.command_vector();
        assert_eq!(cmd.len(), 4);
        assert_eq!(
            cmd.as_slice(),
            &["wallet", "get", "keytab", "host/example.com"]
        );
    }

    #[test]
    fn test_command_vector_keeps_order_and_empty_words() {
        let words = vec!["acl".to_string(), "".to_string(), "z".to_string(), "a".to_string()];
        let cmd = CommandVector::new("admin", &words);
        assert_eq!(cmd.as_slice(), &["admin", "acl", "", "z", "a"]);
    }

    #[test]
    fn test_object_name_is_third_word() {
        let req = request(&["get", "keytab", "host/example.com", "extra"]);
        assert_eq!(req.object_name(), "host/example.com");
    }

    #[test]
    fn test_get_output_file_only_for_get() {
        let req = request(&["get", "file", "secret"]);
        assert_eq!(req.get_output_file(), Some(Path::new("/tmp/out")));
        let req = request(&["show", "file", "secret"]);
        assert_eq!(req.get_output_file(), None);
    }

    #[test]
    fn test_empty_error_is_no_error() {
        let mut result = InvocationResult::failed("", 1);
        assert_eq!(result.error_message(), None);
        result.error = Some("unknown object".into());
        assert_eq!(result.error_message(), Some("unknown object"));
    }
}
