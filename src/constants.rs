//! Centralized constants for defaults, permissions, and program identity.

/// Program name used as the prefix of every diagnostic.
pub const PROGRAM_NAME: &str = "wallet";

/// Version string printed by `-v`.
pub const PACKAGE_STRING: &str = concat!("wallet ", env!("CARGO_PKG_VERSION"));

/// Default command prefix sent as the first element of the command vector.
pub const DEFAULT_COMMAND_TYPE: &str = "wallet";

/// Default wallet server hostname.
pub const DEFAULT_SERVER: &str = "wallet.stanford.edu";

/// Default remctl port of the wallet server.
pub const DEFAULT_PORT: u16 = 4444;

/// Default location of the client configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/wallet/wallet.toml";

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV: &str = "WALLET_CONFIG";

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "WALLET_LOG";

/// Default remctl client program.
pub const DEFAULT_REMCTL_PROGRAM: &str = "remctl";

/// Default helper that converts a keytab into a srvtab.
pub const DEFAULT_SRVTAB_PROGRAM: &str = "wallet-srvtab";

/// Permission mode for files written with `-f`.
pub const OUTPUT_FILE_MODE: u32 = 0o600;

/// Minimum number of positional words: `<command> <type> <name>`.
pub const MIN_WORDS: usize = 3;

/// Usage message printed by `-h` and on usage errors.
pub const USAGE: &str = "\
Usage: wallet [options] <command> <type> <name> [<arg> ...]
       wallet [options] acl <command> <id> [<arg> ...]

Options:
    -c <command>    Command prefix to use (default: wallet)
    -f <output>     For the get command, output file (default: stdout)
    -k <principal>  Kerberos principal of the server
    -h              Display this help
    -p <port>       Port of server (default: 4444)
    -S <srvtab>     For the get keytab command, srvtab output file
    -s <server>     Server hostname (default: wallet.stanford.edu)
    -v              Display the version of wallet
";
