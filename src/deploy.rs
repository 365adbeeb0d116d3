use alloy::{
    network::TransactionBuilder,
    primitives::Address,
    providers::Provider,
    rpc::types::TransactionRequest,
};

use crate::{
    artifact::Artifact,
    tx::{confirm, TxError},
};

pub struct Deployer<P> {
    provider: P,
}

impl<P: Provider> Deployer<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Sends one creation transaction and returns the new contract's address.
    pub async fn deploy(
        &self,
        artifact: &Artifact,
        gateway: Address,
        gas_service: Address,
    ) -> eyre::Result<Address> {
        tracing::info!(
            contract = artifact.contract_name.as_deref().unwrap_or("SendReceive"),
            %gateway,
            %gas_service,
            "deploying"
        );

        if !artifact.abi.is_empty() && !artifact.has_function("multiSend") {
            tracing::warn!("artifact ABI has no multiSend, is this the right contract?");
        }

        let tx = TransactionRequest::default()
            .with_deploy_code(artifact.deploy_code(gateway, gas_service));
        let pending = self.provider.send_transaction(tx).await?;
        let receipt = confirm(pending, "deploy").await?;

        receipt
            .contract_address
            .ok_or_else(|| TxError::NoContractAddress(receipt.transaction_hash).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use alloy::transports::TransportError;

    const UNREACHABLE: &str = r#"
        [[chains]]
        name = "offline"
        url = "http://127.0.0.1:1"
        private_key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
        gateway = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
    "#;

    #[tokio::test]
    async fn unreachable_endpoint_is_a_network_error() {
        let config: Config = UNREACHABLE.parse().unwrap();
        let chain = config.chain(None).unwrap();
        let provider = chain.connect(chain.signer().unwrap()).unwrap();
        let artifact = Artifact::from_json(r#"{ "abi": [], "bytecode": "0x00" }"#).unwrap();

        let result = Deployer::new(provider)
            .deploy(&artifact, chain.gateway, chain.gas_service())
            .await;

        let err = result.unwrap_err();
        assert!(err.downcast_ref::<TransportError>().is_some(), "{err:?}");
    }
}
