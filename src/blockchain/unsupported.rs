//! Lifecycle-only manager for chain families without a node integration.
//!
//! Bitcoin, Cosmos and Solana managers start and stop like any other, so a
//! registry can hold them uniformly, but advertise no data capabilities.

use std::sync::Arc;

use async_trait::async_trait;

use crate::blockchain::error::BlockchainResult;
use crate::blockchain::manager::{BlockchainManager, Lifecycle};
use crate::lifecycle::context::Context;
use crate::lifecycle::state::ManagerState;
use crate::types::{ChainFamily, Network};

#[derive(Debug)]
pub struct UnsupportedManager {
    network: Network,
    rpc_url: String,
    state: ManagerState<()>,
}

impl UnsupportedManager {
    pub fn new(network: Network, rpc_url: impl Into<String>) -> Self {
        Self {
            network,
            rpc_url: rpc_url.into(),
            state: ManagerState::new(),
        }
    }

    pub fn family(&self) -> ChainFamily {
        self.network.family()
    }
}

#[async_trait]
impl Lifecycle for UnsupportedManager {
    async fn start(&self, _ctx: &Context) -> BlockchainResult<()> {
        let guard = self.state.begin_start()?;
        guard.complete(Arc::new(()));
        tracing::info!(
            network = %self.network,
            rpc_url = %self.rpc_url,
            "Manager started without node integration"
        );
        Ok(())
    }

    async fn stop(&self, _ctx: &Context) -> BlockchainResult<()> {
        self.state.begin_stop()?;
        tracing::info!(network = %self.network, "Manager stopped");
        Ok(())
    }
}

impl BlockchainManager for UnsupportedManager {
    fn network(&self) -> Network {
        self.network
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::error::ErrorKind;
    use crate::blockchain::manager::Capability;
    use crate::types::Token;

    #[tokio::test]
    async fn test_lifecycle_rules() {
        let manager = UnsupportedManager::new(Network::Bitcoin, "http://localhost:8332");
        let ctx = Context::background();

        assert_eq!(manager.stop(&ctx).await.unwrap_err().kind(), ErrorKind::ClientNotStarted);
        manager.start(&ctx).await.unwrap();
        assert_eq!(manager.start(&ctx).await.unwrap_err().kind(), ErrorKind::AlreadyStarted);
        manager.stop(&ctx).await.unwrap();
        manager.start(&ctx).await.unwrap();
    }

    #[tokio::test]
    async fn test_data_capabilities_not_implemented() {
        let manager: Arc<dyn BlockchainManager> =
            Arc::new(UnsupportedManager::new(Network::Solana, "http://localhost:8899"));
        let ctx = Context::background();
        manager.start(&ctx).await.unwrap();

        for capability in [
            Capability::Balance,
            Capability::ReadCall,
            Capability::SendTransaction,
            Capability::TransactionDetails,
        ] {
            assert!(!manager.supports(capability));
        }

        let err = manager
            .get_transaction_details(&ctx, "0xabc")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
        assert_eq!(err.to_string(), "transaction details is not implemented for solana");

        let sol = Token::native("Solana", "SOL", 9);
        let dummy = crate::types::Address::from_evm(
            alloy::primitives::Address::ZERO,
            Network::Ethereum,
        )
        .unwrap();
        let err = manager.get_balance(&ctx, &dummy, &sol).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
    }
}
