pub mod constants;
pub mod errors;
pub mod providers;
pub mod signers;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use constants::Network;
pub use errors::HyperliquidError;
pub use providers::{
    ExchangeProvider, InfoProvider, ManagedExchangeProvider, ManagedWsProvider,
    RawWsProvider, WsConfig, WsProvider,
};
