//! Shared fixtures for `wasapi-core` unit tests.

pub const TXID_A: &str = "8c5ef6e5d8bd3287fd1c46a6e0a9e5ecb5b0e3c4ea1a1b9bca8f8f7b9a1c2d3e";
pub const TXID_B: &str = "f1e2d3c4b5a69788990a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60";
pub const ADDRESS: &str = "tb1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh";
