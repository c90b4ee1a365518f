//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, known log levels)
//! - Check endpoints parse with a supported scheme
//! - Detect duplicate networks
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: `&ManagerConfig → Result<(), Vec<ValidationError>>`

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::ManagerConfig;
use crate::evm::client::validate_rpc_url;
use crate::types::Network;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no enabled chains configured")]
    NoEnabledChains,

    #[error("network {0} configured more than once")]
    DuplicateNetwork(Network),

    #[error("{network}: {reason}")]
    InvalidRpcUrl { network: Network, reason: String },

    #[error("{network}: {field} must be greater than zero")]
    ZeroTimeout {
        network: Network,
        field: &'static str,
    },

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),

    #[error("signer.private_key_env must not be empty")]
    EmptyPrivateKeyEnv,
}

pub fn validate_config(config: &ManagerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.enabled_chains().next().is_none() {
        errors.push(ValidationError::NoEnabledChains);
    }

    let mut seen = HashSet::new();
    for chain in &config.chains {
        if !seen.insert(chain.network) {
            errors.push(ValidationError::DuplicateNetwork(chain.network));
        }
        if let Err(e) = validate_rpc_url(&chain.rpc_url) {
            errors.push(ValidationError::InvalidRpcUrl {
                network: chain.network,
                reason: e.to_string(),
            });
        }
        if chain.connect_timeout_secs == 0 {
            errors.push(ValidationError::ZeroTimeout {
                network: chain.network,
                field: "connect_timeout_secs",
            });
        }
        if chain.request_timeout_secs == 0 {
            errors.push(ValidationError::ZeroTimeout {
                network: chain.network,
                field: "request_timeout_secs",
            });
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.signer.private_key_env.trim().is_empty() {
        errors.push(ValidationError::EmptyPrivateKeyEnv);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
