use alloy::{
    network::{Ethereum, ReceiptResponse},
    primitives::TxHash,
    providers::PendingTransactionBuilder,
    rpc::types::TransactionReceipt,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TxError {
    #[error("{label} transaction {hash} reverted")]
    Reverted { label: &'static str, hash: TxHash },
    #[error("deployment transaction {0} created no contract")]
    NoContractAddress(TxHash),
}

/// Waits until `pending` is included and fails if it reverted.
pub async fn confirm(
    pending: PendingTransactionBuilder<Ethereum>,
    label: &'static str,
) -> eyre::Result<TransactionReceipt> {
    let hash = *pending.tx_hash();
    tracing::debug!(%hash, label, "waiting for receipt");

    let receipt = pending.get_receipt().await?;
    if !ReceiptResponse::status(&receipt) {
        return Err(TxError::Reverted { label, hash }.into());
    }

    tracing::info!(
        %hash,
        label,
        block = receipt.block_number,
        gas_used = receipt.gas_used,
        "transaction confirmed"
    );
    Ok(receipt)
}
