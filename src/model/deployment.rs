use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::venue::VenueKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeploymentStatus {
    Active,
    Paused,
    Terminated,
}

impl DeploymentStatus {
    /// Legal transitions: ACTIVE <-> PAUSED <-> TERMINATED.
    pub fn can_transition_to(self, next: DeploymentStatus) -> bool {
        use DeploymentStatus::*;
        match (self, next) {
            (Active, Paused) | (Paused, Active) => true,
            (Active, Terminated) | (Paused, Terminated) => true,
            (a, b) if a == b => true,
            _ => false,
        }
    }
}

/// A user's subscription to an agent's trade signals on a given set of
/// venues. Owned by the user; `status` transitions ACTIVE<->PAUSED<->TERMINATED
///.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    pub id: String,
    pub agent_id: String,
    /// Lowercased for case-insensitive address comparisons.
    pub user_wallet: String,
    /// Vault address for vault-mediated venues, or the user's own EOA for
    /// delegated venues.
    pub safe_wallet: String,
    pub status: DeploymentStatus,
    pub sub_active: bool,
    pub module_enabled: bool,
    /// Empty means "single venue from the agent's default venue".
    pub enabled_venues: Vec<VenueKind>,
    pub profit_receiver_address: String,
    pub created_at: i64,
}

impl Deployment {
    pub fn is_eligible(&self) -> bool {
        self.status == DeploymentStatus::Active && self.sub_active && self.module_enabled
    }

    pub fn lowercased_wallet(wallet: &str) -> String {
        wallet.to_lowercase()
    }
}
