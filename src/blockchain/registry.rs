//! One manager per configured network.
//!
//! # Data Flow
//! ```text
//! ManagerConfig.chains (enabled only)
//!     → family Evm     → EvmManager(factory(chain), signer)
//!     → other families → UnsupportedManager
//!     → HashMap<Network, Arc<dyn BlockchainManager>>
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::blockchain::error::{BlockchainError, BlockchainResult};
use crate::blockchain::manager::BlockchainManager;
use crate::blockchain::node::NodeClientFactory;
use crate::blockchain::signer::TransactionSigner;
use crate::blockchain::unsupported::UnsupportedManager;
use crate::config::schema::{ChainConfig, ManagerConfig};
use crate::evm::client::AlloyNodeFactory;
use crate::evm::manager::EvmManager;
use crate::lifecycle::context::Context;
use crate::types::{ChainFamily, Network};

#[derive(Debug, Default)]
pub struct ManagerRegistry {
    managers: HashMap<Network, Arc<dyn BlockchainManager>>,
    connect_timeouts: HashMap<Network, Duration>,
}

impl ManagerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build managers for every enabled chain, dialing through alloy.
    pub fn from_config(
        config: &ManagerConfig,
        signer: Option<Arc<dyn TransactionSigner>>,
    ) -> Self {
        Self::from_config_with(config, signer, |chain| {
            let timeout = Duration::from_secs(chain.request_timeout_secs);
            Arc::new(AlloyNodeFactory::new(timeout)) as Arc<dyn NodeClientFactory>
        })
    }

    /// Like `from_config`, with the node factory chosen per chain.
    pub fn from_config_with<F>(
        config: &ManagerConfig,
        signer: Option<Arc<dyn TransactionSigner>>,
        factory_for: F,
    ) -> Self
    where
        F: Fn(&ChainConfig) -> Arc<dyn NodeClientFactory>,
    {
        let mut registry = Self::new();
        for chain in config.enabled_chains() {
            let manager: Arc<dyn BlockchainManager> = match chain.network.family() {
                ChainFamily::Evm => {
                    let mut manager =
                        EvmManager::new(chain.network, &chain.rpc_url, factory_for(chain));
                    if let Some(signer) = &signer {
                        manager = manager.with_signer(Arc::clone(signer));
                    }
                    Arc::new(manager)
                }
                ChainFamily::Bitcoin | ChainFamily::Cosmos | ChainFamily::Solana => {
                    Arc::new(UnsupportedManager::new(chain.network, &chain.rpc_url))
                }
            };
            registry.connect_timeouts.insert(
                chain.network,
                Duration::from_secs(chain.connect_timeout_secs),
            );
            registry.insert(manager);
        }
        registry
    }

    /// Register a manager, replacing any previous one for its network.
    pub fn insert(&mut self, manager: Arc<dyn BlockchainManager>) {
        self.managers.insert(manager.network(), manager);
    }

    pub fn get(&self, network: Network) -> Option<Arc<dyn BlockchainManager>> {
        self.managers.get(&network).cloned()
    }

    pub fn networks(&self) -> Vec<Network> {
        let mut networks: Vec<_> = self.managers.keys().copied().collect();
        networks.sort();
        networks
    }

    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }

    /// Start every manager, each bounded by its chain's connect timeout.
    ///
    /// Stops at the first failure; managers already started stay started.
    pub async fn start_all(&self, ctx: &Context) -> BlockchainResult<()> {
        for network in self.networks() {
            let Some(manager) = self.managers.get(&network) else {
                continue;
            };
            let start_ctx = match self.connect_timeouts.get(&network) {
                Some(limit) => ctx.with_timeout(*limit),
                None => ctx.with_cancel(),
            };
            manager.start(&start_ctx).await?;
        }
        Ok(())
    }

    /// Stop every started manager. Returns the first error, after trying all.
    pub async fn stop_all(&self, ctx: &Context) -> BlockchainResult<()> {
        let mut first_error: Option<BlockchainError> = None;
        for network in self.networks() {
            let Some(manager) = self.managers.get(&network) else {
                continue;
            };
            if let Err(e) = manager.stop(ctx).await {
                tracing::warn!(network = %network, error = %e, "Failed to stop manager");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
