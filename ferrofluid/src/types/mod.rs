pub mod actions;
pub mod eip712;
pub mod info_types;
pub mod requests;
pub mod responses;
pub mod symbol;
pub mod symbols;
pub mod ws;

// Re-export commonly used types
pub use actions::*;
pub use eip712::{encode_value, EncodeEip712, HyperliquidAction};
pub use info_types::*;
pub use requests::*;
pub use responses::*;
pub use symbol::Symbol;
// Re-export symbols prelude for convenience
pub use symbols::prelude;
