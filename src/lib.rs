//! Deploys the `SendReceive` contract and drives its token approval and
//! cross-chain `multiSend` against one configured chain.

pub mod artifact;
pub mod bindings;
pub mod calls;
pub mod config;
pub mod deploy;
pub mod interact;
pub mod tx;
