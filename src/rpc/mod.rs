//! EVM JSON-RPC transport
//!
//! This module is the only producer of [`BlockHeader`] values. It speaks
//! plain JSON-RPC 2.0 over HTTP POST and exposes the three primitives the
//! polling engine consumes: latest header, batched header range, and the
//! read-only validator-set contract call.

pub mod client;
pub mod types;

pub use client::RpcClient;
pub use types::BlockHeader;
