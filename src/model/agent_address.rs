use serde::{Deserialize, Serialize};

use super::venue::VenueKind;

/// A per-(user, delegated-venue) agent address the platform holds the key
/// for. Created once on first delegated-venue deployment. Globally unique
/// across users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAgentAddress {
    pub user_wallet: String,
    pub venue: VenueKind,
    pub agent_address: String,
    pub created_at: i64,
}
