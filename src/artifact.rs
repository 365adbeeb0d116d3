//! Compiled contract artifacts.
//!
//! Accepts the Hardhat layout, where `bytecode` is a hex string, and the
//! Foundry layout, where it is an object with an `object` field.

use std::path::Path;

use alloy::{
    json_abi::{Constructor, ContractObject, JsonAbi},
    primitives::{Address, Bytes},
    sol_types::SolConstructor,
};
use eyre::WrapErr;

use crate::bindings::SendReceive;

#[derive(Debug, Clone)]
pub struct Artifact {
    pub contract_name: Option<String>,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

impl Artifact {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read artifact {}", path.display()))?;
        Self::from_json(&json).wrap_err_with(|| format!("invalid artifact {}", path.display()))
    }

    pub fn from_json(json: &str) -> eyre::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        // Hardhat names the contract; Foundry output does not.
        let contract_name = value
            .get("contractName")
            .and_then(|name| name.as_str())
            .map(str::to_string);

        let ContractObject { abi, bytecode, .. } = serde_json::from_str(json)?;
        let bytecode = bytecode.unwrap_or_default();
        if bytecode.is_empty() {
            eyre::bail!("artifact has no deployment bytecode");
        }

        let artifact = Self {
            contract_name,
            abi: abi.unwrap_or_default(),
            bytecode,
        };

        if let Some(constructor) = artifact.constructor() {
            if constructor.inputs.len() != 2 {
                eyre::bail!(
                    "constructor takes {} arguments, expected (gateway, gas service)",
                    constructor.inputs.len()
                );
            }
        }

        Ok(artifact)
    }

    pub fn constructor(&self) -> Option<&Constructor> {
        self.abi.constructor()
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.abi.function(name).is_some()
    }

    /// Creation code followed by the encoded `(gateway, gas_service)` arguments.
    pub fn deploy_code(&self, gateway: Address, gas_service: Address) -> Bytes {
        let args = SendReceive::constructorCall {
            gateway_: gateway,
            gasService_: gas_service,
        }
        .abi_encode();

        let mut code = self.bytecode.to_vec();
        code.extend_from_slice(&args);
        code.into()
    }
}
