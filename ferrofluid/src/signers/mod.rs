pub mod privy;
pub mod signer;

pub use privy::{PrivyError, PrivySigner};
pub use signer::{AlloySigner, HyperliquidSignature, HyperliquidSigner, SignerError};
