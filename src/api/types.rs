use serde::{Deserialize, Serialize};

use crate::venues::module_service::NonceDiagnostic;

// ── Request types ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ExecuteTradeRequest {
    pub signal_id: String,
    #[serde(default)]
    pub deployment_id: Option<String>,
}

#[derive(Deserialize)]
pub struct ClosePositionRequest {
    pub position_id: String,
}

#[derive(Deserialize)]
pub struct SyncVenueMarketsRequest {
    /// One of SPOT/PERP_A/PERP_B/PERP_C/ALL.
    pub venue: String,
}

// ── Response types ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SyncVenueMarketsResponse {
    pub synced: Vec<VenueSyncCount>,
}

#[derive(Serialize)]
pub struct VenueSyncCount {
    pub venue: String,
    pub markets_synced: u32,
}

#[derive(Serialize)]
pub struct TestNonceResponse {
    pub module_address: String,
    pub address: String,
    pub network_nonce: u64,
    pub cached_nonce: u64,
    pub refreshed_nonce: u64,
}

impl TestNonceResponse {
    pub fn from_diagnostic(module_address: alloy::primitives::Address, diag: NonceDiagnostic) -> Self {
        TestNonceResponse {
            module_address: format!("{module_address:#x}"),
            address: format!("{:#x}", diag.address),
            network_nonce: diag.network_nonce,
            cached_nonce: diag.cached_nonce,
            refreshed_nonce: diag.refreshed_nonce,
        }
    }
}
