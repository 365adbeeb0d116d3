use alloy::{
    primitives::{utils::format_units, Address, TxHash, U256},
    providers::Provider,
};

use crate::{
    bindings::{SendReceive, IERC20},
    calls::MultiSend,
    tx::confirm,
};

/// Drives a deployed `SendReceive` contract and the token it moves.
pub struct Interactor<P> {
    provider: P,
    contract: Address,
    token: Address,
}

/// Largest decimals `format_units` can display.
pub const MAX_DECIMALS: u8 = 77;

/// Inputs of one approve + `multiSend` run.
#[derive(Debug, Clone)]
pub struct Transfer {
    pub send: MultiSend,
    /// Allowance granted to the contract. Usually `send.amount`.
    pub approve_amount: U256,
    /// Native value attached to `multiSend` to prepay relaying gas.
    pub gas_payment: U256,
    /// Token decimals, display only.
    pub decimals: u8,
}

impl Transfer {
    pub fn new(send: MultiSend) -> Self {
        Self {
            approve_amount: send.amount,
            send,
            gas_payment: U256::ZERO,
            decimals: 6,
        }
    }
}

impl<P: Provider> Interactor<P> {
    pub fn new(provider: P, contract: Address, token: Address) -> Self {
        Self {
            provider,
            contract,
            token,
        }
    }

    pub async fn balance(&self, owner: Address) -> eyre::Result<U256> {
        let token = IERC20::new(self.token, &self.provider);
        Ok(token.balanceOf(owner).call().await?)
    }

    pub async fn gateway(&self) -> eyre::Result<Address> {
        let contract = SendReceive::new(self.contract, &self.provider);
        Ok(contract.gateway().call().await?)
    }

    /// Approves the contract to spend `amount` of the token and waits for it.
    pub async fn approve(&self, amount: U256) -> eyre::Result<TxHash> {
        let token = IERC20::new(self.token, &self.provider);
        let pending = token.approve(self.contract, amount).send().await?;
        let receipt = confirm(pending, "approve").await?;
        Ok(receipt.transaction_hash)
    }

    pub async fn multi_send(&self, send: MultiSend, gas_payment: U256) -> eyre::Result<TxHash> {
        let SendReceive::multiSendCall {
            destinationChain: destination_chain,
            destinationAddress: destination_address,
            receivers,
            symbol,
            amount,
        } = send.into();

        let contract = SendReceive::new(self.contract, &self.provider);
        let tx = contract
            .multiSend(destination_chain, destination_address, receivers, symbol, amount)
            .value(gas_payment)
            .into_transaction_request();

        let pending = self.provider.send_transaction(tx).await?;
        let receipt = confirm(pending, "multiSend").await?;
        Ok(receipt.transaction_hash)
    }

    /// Shows balance and gateway, then approves and sends. Every step waits
    /// for the previous one; the first failure stops the run.
    pub async fn run(&self, owner: Address, transfer: Transfer) -> eyre::Result<TxHash> {
        let Transfer {
            send,
            approve_amount,
            gas_payment,
            decimals,
        } = transfer;

        let balance = self.balance(owner).await?;
        println!(
            "wallet has {} {}",
            format_units(balance, decimals)?,
            send.symbol
        );

        let gateway = self.gateway().await?;
        println!("gateway is {gateway}");

        if approve_amount < send.amount {
            tracing::warn!(
                %approve_amount,
                amount = %send.amount,
                "allowance is lower than the amount sent"
            );
        }
        let approve_hash = self.approve(approve_amount).await?;
        tracing::info!(hash = %approve_hash, spender = %self.contract, "approved");

        tracing::info!(
            destination_chain = %send.destination_chain,
            destination_address = %send.destination_address,
            receivers = send.receivers.len(),
            "sending"
        );
        self.multi_send(send, gas_payment).await
    }
}
