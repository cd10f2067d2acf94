//! Shared fixtures for exercising the bridge without a live node.

pub mod fixtures;
mod listener;
mod mock_core;

pub use listener::RecordingListener;
pub use mock_core::{Gate, MockCore};

/// Mnemonic every fixture wallet is derived from.
pub const TEST_MNEMONIC: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

/// BIP39 seed of [`TEST_MNEMONIC`] with an empty passphrase.
pub const TEST_SEED_HEX: &str = concat!(
    "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1",
    "9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4",
);
