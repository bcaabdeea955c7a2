//! The toolkit through which contracts are resolved, deployed, and confirmed

use std::{future::Future, path::PathBuf, time::Duration};

use alloy::{
    network::{Ethereum, ReceiptResponse, TransactionBuilder},
    primitives::TxHash,
    providers::{DynProvider, Provider},
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use tracing::{debug, info};

use crate::{
    artifacts::load_contract_factory,
    constants::RECEIPT_POLL_INTERVAL_MS,
    errors::ScriptError,
    types::{ContractFactory, DeployedContract, PendingDeployment},
};

/// The operations the deployer needs from a blockchain toolkit
///
/// Each operation corresponds to exactly one suspension point of a deployment.
pub trait DeployToolkit {
    /// Resolve the deployment factory of the named contract
    fn contract_factory(
        &self,
        contract_name: &str,
    ) -> impl Future<Output = Result<ContractFactory, ScriptError>> + Send;

    /// Submit a deployment transaction for the given factory, without constructor arguments
    fn deploy(
        &self,
        factory: &ContractFactory,
    ) -> impl Future<Output = Result<PendingDeployment, ScriptError>> + Send;

    /// Wait for a submitted deployment to be confirmed
    fn deployed(
        &self,
        pending: PendingDeployment,
    ) -> impl Future<Output = Result<DeployedContract, ScriptError>> + Send;
}

/// A toolkit backed by an `alloy` provider and a directory of compiled artifacts
#[derive(Clone)]
pub struct AlloyToolkit {
    /// The signing provider used to submit transactions
    provider: DynProvider<Ethereum>,
    /// The directory containing the compiled contract artifacts
    artifacts_dir: PathBuf,
    /// The number of confirmations to wait for
    confirmations: u64,
}

impl AlloyToolkit {
    /// Create a new toolkit
    pub fn new(provider: DynProvider<Ethereum>, artifacts_dir: PathBuf, confirmations: u64) -> Self {
        Self {
            provider,
            artifacts_dir,
            confirmations,
        }
    }
}

impl DeployToolkit for AlloyToolkit {
    async fn contract_factory(&self, contract_name: &str) -> Result<ContractFactory, ScriptError> {
        load_contract_factory(&self.artifacts_dir, contract_name).await
    }

    async fn deploy(&self, factory: &ContractFactory) -> Result<PendingDeployment, ScriptError> {
        let num_args = factory.num_constructor_args();
        if num_args != 0 {
            return Err(ScriptError::ContractDeployment(format!(
                "`{}` constructor expects {} arguments, none are supplied",
                factory.name, num_args
            )));
        }

        let tx = TransactionRequest::default().with_deploy_code(factory.bytecode.clone());
        let pending_tx = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        let tx_hash = *pending_tx.tx_hash();
        info!("Submitted {} deployment in tx {:#x}", factory.name, tx_hash);

        Ok(PendingDeployment {
            contract_name: factory.name.clone(),
            tx_hash,
        })
    }

    async fn deployed(&self, pending: PendingDeployment) -> Result<DeployedContract, ScriptError> {
        let PendingDeployment {
            contract_name,
            tx_hash,
        } = pending;

        let receipt = self.wait_for_receipt(tx_hash).await?;
        self.wait_for_confirmations(&receipt).await?;

        deployment_from_receipt(contract_name, &receipt)
    }
}

impl AlloyToolkit {
    /// Poll for the receipt of the given transaction until it is mined
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TransactionReceipt, ScriptError> {
        debug!("Waiting for receipt of tx {:#x}", tx_hash);
        loop {
            let receipt = self
                .provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|e| ScriptError::DeploymentConfirmation(e.to_string()))?;

            match receipt {
                Some(receipt) => return Ok(receipt),
                None => tokio::time::sleep(Duration::from_millis(RECEIPT_POLL_INTERVAL_MS)).await,
            }
        }
    }

    /// Wait until the block containing the receipt has the configured number
    /// of confirmations, counting the block itself as the first
    async fn wait_for_confirmations(&self, receipt: &TransactionReceipt) -> Result<(), ScriptError> {
        if self.confirmations <= 1 {
            return Ok(());
        }

        let mined_at = receipt.block_number.ok_or_else(|| {
            ScriptError::DeploymentConfirmation(format!(
                "receipt of tx {:#x} has no block number",
                receipt.transaction_hash
            ))
        })?;
        let target = mined_at + self.confirmations - 1;

        debug!("Waiting for block {} to confirm tx {:#x}", target, receipt.transaction_hash);
        loop {
            let block_number = self
                .provider
                .get_block_number()
                .await
                .map_err(|e| ScriptError::DeploymentConfirmation(e.to_string()))?;

            if block_number >= target {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(RECEIPT_POLL_INTERVAL_MS)).await;
        }
    }
}

/// Interpret the receipt of a mined deployment transaction
fn deployment_from_receipt(
    contract_name: String,
    receipt: &TransactionReceipt,
) -> Result<DeployedContract, ScriptError> {
    let tx_hash = receipt.transaction_hash;

    if !receipt.status() {
        return Err(ScriptError::TransactionReverted(format!(
            "{contract_name} deployment tx {tx_hash:#x}"
        )));
    }

    let address = receipt.contract_address().ok_or_else(|| {
        ScriptError::DeploymentConfirmation(format!(
            "receipt of tx {tx_hash:#x} has no contract address"
        ))
    })?;

    Ok(DeployedContract {
        contract_name,
        address,
        tx_hash,
    })
}
