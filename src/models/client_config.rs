//! Client configuration file model.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub client: ClientSection,
}

/// Defaults for the command line and the external helper programs.
///
/// Every field is optional; command-line flags win over these values and
/// compiled-in constants fill whatever is left.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientSection {
    #[serde(default)]
    pub server: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    /// Kerberos principal of the server.
    #[serde(default)]
    pub principal: Option<String>,

    #[serde(default)]
    pub command_type: Option<String>,

    /// remctl client binary used to reach the server.
    #[serde(default)]
    pub remctl_program: Option<String>,

    /// Helper converting a fetched keytab into a srvtab.
    #[serde(default)]
    pub srvtab_program: Option<String>,
}
