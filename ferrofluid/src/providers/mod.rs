pub mod agent;
pub mod batcher;
pub mod exchange;
pub mod info;
pub mod nonce;
pub mod order_tracker;
pub mod websocket;

// Raw providers (backwards compatibility)
// Common types
pub use batcher::OrderHandle;
pub use exchange::OrderBuilder;
pub use exchange::RawExchangeProvider as ExchangeProvider;
// Explicit raw exports
pub use exchange::RawExchangeProvider;
// Managed providers
pub use exchange::{ManagedExchangeConfig, ManagedExchangeProvider};
pub use info::InfoProvider;
pub use info::RateLimiter;
pub use websocket::RawWsProvider as WsProvider;
pub use websocket::RawWsProvider;
pub use websocket::SubscriptionId;
pub use websocket::{ManagedWsProvider, WsConfig};
