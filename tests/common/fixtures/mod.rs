//! Reusable test utilities: mock JSON-RPC endpoints serving an
//! in-memory chain.

// Not every test binary uses every fixture helper
#![allow(dead_code)]

pub mod mock_rpc;

pub use mock_rpc::{ChainSpec, MockRpcEndpoint};
