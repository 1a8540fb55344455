use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingKind {
    ProfitShare,
    Fee,
}

/// Append-only record of value collected by the platform on a deployment's
/// behalf. Never mutated once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingEvent {
    pub id: String,
    pub deployment_id: String,
    pub kind: BillingKind,
    pub amount: f64,
    pub asset: String,
    pub occurred_at: i64,
}
