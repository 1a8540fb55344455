//! JSON Schema generation for the admin surface's `/admin/schema`
//! diagnostic, so an operator can inspect the exact wire shape of the
//! data model without reading source. Grounded on the base crate's
//! `schema.rs` (`schema_for!` + pretty-printed `serde_json`), generalized
//! from a single `Workflow` root to the handful of types the admin API
//! actually exchanges.

use schemars::schema_for;
use serde_json::{Value, json};

use crate::model::{Deployment, Position, Signal, VenueMarket};

/// One JSON document combining the schema of every type the admin API
/// accepts or returns, keyed by name.
pub fn get_schema_json() -> String {
    let combined = json!({
        "signal": schema_for!(Signal),
        "position": schema_for!(Position),
        "deployment": schema_for!(Deployment),
        "venue_market": schema_for!(VenueMarket),
    });
    serde_json::to_string_pretty(&combined).expect("schema serializes")
}

/// Same document as a parsed value, for handlers that want to embed it
/// directly in a JSON response instead of round-tripping through a string.
pub fn get_schema_value() -> Value {
    serde_json::from_str(&get_schema_json()).expect("schema json is well-formed")
}
