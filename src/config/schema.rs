//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files, and
//! every field has a default so minimal configs stay minimal.

use serde::{Deserialize, Serialize};

use crate::evm::signer::PRIVATE_KEY_ENV_VAR;
use crate::types::Network;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ManagerConfig {
    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Where the transaction signer finds its key.
    pub signer: SignerConfig,

    /// One entry per network to manage.
    pub chains: Vec<ChainConfig>,
}

impl ManagerConfig {
    /// Enabled chains, in file order.
    pub fn enabled_chains(&self) -> impl Iterator<Item = &ChainConfig> {
        self.chains.iter().filter(|c| c.enabled)
    }

    pub fn chain(&self, network: Network) -> Option<&ChainConfig> {
        self.chains.iter().find(|c| c.network == network)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Signer configuration. The key itself never appears in the file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Environment variable holding the hex private key.
    pub private_key_env: String,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            private_key_env: PRIVATE_KEY_ENV_VAR.to_string(),
        }
    }
}

/// One managed network.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    pub network: Network,

    /// Node endpoint (http, https, ws or wss).
    pub rpc_url: String,

    /// Upper bound on `start`, applied on top of the caller's context.
    pub connect_timeout_secs: u64,

    /// Per-RPC timeout.
    pub request_timeout_secs: u64,

    pub enabled: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            network: Network::Ethereum,
            rpc_url: "http://localhost:8545".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            enabled: true,
        }
    }
}
