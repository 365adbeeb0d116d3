use std::str::FromStr;

use alloy::primitives::{Address, U256};
use thiserror::Error;

use crate::bindings::SendReceive;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("missing required parameter `{0}`")]
    Missing(&'static str),
    #[error("parameter `{name}` is not a valid address: `{value}`")]
    InvalidAddress { name: &'static str, value: String },
    #[error("parameter `{name}` is not a valid amount: `{value}`")]
    InvalidAmount { name: &'static str, value: String },
    #[error("at least one receiver is required")]
    EmptyReceivers,
}

fn required<'a>(name: &'static str, value: &'a str) -> Result<&'a str, ParamError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ParamError::Missing(name));
    }
    Ok(value)
}

/// Parses a required address. Empty input is an error, never the zero address.
pub fn parse_address(name: &'static str, value: &str) -> Result<Address, ParamError> {
    let value = required(name, value)?;
    Address::from_str(value).map_err(|_| ParamError::InvalidAddress {
        name,
        value: value.to_string(),
    })
}

/// Parses a decimal or `0x`-prefixed hex amount.
pub fn parse_amount(name: &'static str, value: &str) -> Result<U256, ParamError> {
    let value = required(name, value)?;
    U256::from_str(value).map_err(|_| ParamError::InvalidAmount {
        name,
        value: value.to_string(),
    })
}

/// Arguments of a `multiSend` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSend {
    pub destination_chain: String,
    pub destination_address: String,
    pub receivers: Vec<Address>,
    pub symbol: String,
    pub amount: U256,
}

impl MultiSend {
    pub fn new(
        destination_chain: &str,
        destination_address: &str,
        receivers: &[String],
        symbol: &str,
        amount: U256,
    ) -> Result<Self, ParamError> {
        if receivers.is_empty() {
            return Err(ParamError::EmptyReceivers);
        }
        let receivers = receivers
            .iter()
            .map(|r| parse_address("receiver", r))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            destination_chain: required("destination chain", destination_chain)?.to_string(),
            // Kept as a string: the destination may not be an EVM chain.
            destination_address: required("destination address", destination_address)?
                .to_string(),
            receivers,
            symbol: required("symbol", symbol)?.to_string(),
            amount,
        })
    }
}

impl From<MultiSend> for SendReceive::multiSendCall {
    fn from(send: MultiSend) -> Self {
        SendReceive::multiSendCall {
            destinationChain: send.destination_chain,
            destinationAddress: send.destination_address,
            receivers: send.receivers,
            symbol: send.symbol,
            amount: send.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{primitives::address, sol_types::SolCall};

    fn receivers() -> Vec<String> {
        vec!["0x70997970C51812dc3A010C7d01b50e0d17dc79C8".to_string()]
    }

    #[test]
    fn empty_address_is_missing_not_zero() {
        assert_eq!(
            parse_address("contract", ""),
            Err(ParamError::Missing("contract"))
        );
        assert_eq!(
            parse_address("contract", "   "),
            Err(ParamError::Missing("contract"))
        );
        assert_eq!(
            ParamError::Missing("contract").to_string(),
            "missing required parameter `contract`"
        );
    }

    #[test]
    fn malformed_address() {
        let err = parse_address("token", "0x1234").unwrap_err();
        assert!(matches!(err, ParamError::InvalidAddress { name: "token", .. }));
    }

    #[test]
    fn address_is_trimmed() {
        assert_eq!(
            parse_address("token", " 0x70997970C51812dc3A010C7d01b50e0d17dc79C8 ").unwrap(),
            address!("70997970C51812dc3A010C7d01b50e0d17dc79C8")
        );
    }

    #[test]
    fn amounts() {
        assert_eq!(parse_amount("amount", "1000000").unwrap(), U256::from(1_000_000));
        assert_eq!(parse_amount("amount", "0x10").unwrap(), U256::from(16));
        assert_eq!(parse_amount("amount", ""), Err(ParamError::Missing("amount")));
        assert!(matches!(
            parse_amount("amount", "-5"),
            Err(ParamError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn multi_send_requires_every_field() {
        let amount = U256::from(1_000_000);
        assert_eq!(
            MultiSend::new("", "0xdest", &receivers(), "aUSDC", amount),
            Err(ParamError::Missing("destination chain"))
        );
        assert_eq!(
            MultiSend::new("Avalanche", "", &receivers(), "aUSDC", amount),
            Err(ParamError::Missing("destination address"))
        );
        assert_eq!(
            MultiSend::new("Avalanche", "0xdest", &receivers(), "", amount),
            Err(ParamError::Missing("symbol"))
        );
        assert_eq!(
            MultiSend::new("Avalanche", "0xdest", &[], "aUSDC", amount),
            Err(ParamError::EmptyReceivers)
        );
        assert_eq!(
            MultiSend::new("Avalanche", "0xdest", &[String::new()], "aUSDC", amount),
            Err(ParamError::Missing("receiver"))
        );
    }

    #[test]
    fn multi_send_encodes_as_call() {
        let send = MultiSend::new(
            "Avalanche",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
            &receivers(),
            "aUSDC",
            U256::from(1_000_000),
        )
        .unwrap();
        let call: SendReceive::multiSendCall = send.clone().into();
        assert_eq!(call.receivers, send.receivers);

        let encoded = call.abi_encode();
        assert_eq!(&encoded[..4], SendReceive::multiSendCall::SELECTOR.as_slice());
        let decoded = SendReceive::multiSendCall::abi_decode(&encoded).unwrap();
        assert_eq!(decoded.destinationChain, "Avalanche");
        assert_eq!(decoded.symbol, "aUSDC");
        assert_eq!(decoded.amount, U256::from(1_000_000));
    }
}
