pub mod agent_address;
pub mod billing;
pub mod deployment;
pub mod position;
pub mod signal;
pub mod venue;

pub use agent_address::UserAgentAddress;
pub use billing::{BillingEvent, BillingKind};
pub use deployment::{Deployment, DeploymentStatus};
pub use position::{ExitReason, Position, PositionStatus, TrailingParams};
pub use signal::{RiskModel, Side, SizeModel, Signal};
pub use venue::{QtySemantics, TokenRegistryEntry, VenueKind, VenueMarket};

/// Suffix marker appended to `token_symbol` on manually-triggered signals
/// so they bypass the upstream bucket-deduplication window. Stripped
/// wherever the coordinator consults venue/token registries or stores
/// the resulting Position.
pub const MANUAL_TAG_PREFIX: &str = "_MANUAL_";

/// Strip a trailing `_MANUAL_<epoch-ms>` tag from a token symbol, if present.
pub fn strip_manual_tag(token_symbol: &str) -> &str {
    match token_symbol.find(MANUAL_TAG_PREFIX) {
        Some(idx) => &token_symbol[..idx],
        None => token_symbol,
    }
}

/// Build a manual-signal token symbol by appending the tag.
pub fn tag_manual(token_symbol: &str, epoch_ms: u64) -> String {
    format!("{token_symbol}{MANUAL_TAG_PREFIX}{epoch_ms}")
}
