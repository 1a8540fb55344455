use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::venue::VenueKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Long,
    Short,
}

/// How the position size is derived at execution time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SizeModel {
    /// Trade exactly `value` units of the collateral asset.
    FixedUsdc { value: f64 },
    /// Trade `value` percent of the deployment's available balance.
    BalancePercentage { value: f64 },
}

/// Cooperative risk parameters applied by the Position Monitor, never by
/// any venue's native order facilities.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RiskModel {
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub trailing_percent: f64,
    pub leverage: f64,
}

impl Default for RiskModel {
    fn default() -> Self {
        RiskModel {
            stop_loss: None,
            take_profit: None,
            trailing_percent: 1.0,
            leverage: 1.0,
        }
    }
}

/// A trade signal emitted by the (out-of-scope) classifier, or synthesized
/// by auto-discovery / manual chat commands. Immutable except that `venue`
/// may be rewritten exactly once, by the router.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub id: String,
    pub agent_id: String,
    pub venue: VenueKind,
    /// As stored: may carry a `_MANUAL_<epoch_ms>` tag. Use
    /// `crate::model::strip_manual_tag` before touching registries.
    pub token_symbol: String,
    pub side: Side,
    pub size_model: SizeModel,
    pub risk_model: RiskModel,
    pub source_ref: Vec<String>,
    pub created_at: i64,
}

impl Signal {
    pub fn is_manual(&self) -> bool {
        self.token_symbol.contains(super::MANUAL_TAG_PREFIX)
    }

    pub fn stripped_token(&self) -> &str {
        super::strip_manual_tag(&self.token_symbol)
    }

    pub fn is_auto_discovered(&self) -> bool {
        self.source_ref.iter().any(|r| r == "AUTO_DISCOVERED")
    }
}
