//! Admin-surface handlers: manual trade execution/close, on-demand venue
//! market sync, and nonce diagnostics. Every route here sits behind
//! `AdminAuth`; there's no per-user scoping to enforce beyond that.

use axum::Json;
use axum::extract::State;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::api::types::{
    ClosePositionRequest, ExecuteTradeRequest, SyncVenueMarketsRequest, SyncVenueMarketsResponse,
    TestNonceResponse, VenueSyncCount,
};
use crate::executor::ExecutionResult;
use crate::model::VenueKind;

pub async fn execute_trade(
    State(state): State<AppState>,
    Json(req): Json<ExecuteTradeRequest>,
) -> Result<Json<ExecutionResult>, ApiError> {
    let result = state.executor.execute(&req.signal_id, req.deployment_id.as_deref()).await;
    into_response(result)
}

pub async fn close_position(
    State(state): State<AppState>,
    Json(req): Json<ClosePositionRequest>,
) -> Result<Json<ExecutionResult>, ApiError> {
    let result = state.executor.close_position(&req.position_id).await;
    into_response(result)
}

/// `success` results (including idempotent "already done" ones) pass
/// through as 200. A structured `reason` is the caller's fault (bad
/// signal, venue rejection, balance/size check) and maps to 400; a bare
/// `error` with no recognized reason is ours and maps to 500.
fn into_response(result: ExecutionResult) -> Result<Json<ExecutionResult>, ApiError> {
    if result.success {
        return Ok(Json(result));
    }
    if let Some(reason) = &result.reason {
        return Err(ApiError::BadRequest(reason.clone()));
    }
    Err(ApiError::Internal(result.error.unwrap_or_else(|| "execution failed".to_string())))
}

/// `ALL` fans out to every venue; a specific code syncs just that one.
/// Venues with no market-discovery API (PERP-A, PERP-C today) report
/// `markets_synced: 0` via the trait's default, not an error.
pub async fn sync_venue_markets(
    State(state): State<AppState>,
    Json(req): Json<SyncVenueMarketsRequest>,
) -> Result<Json<SyncVenueMarketsResponse>, ApiError> {
    let targets: Vec<VenueKind> = if req.venue.eq_ignore_ascii_case("ALL") {
        vec![VenueKind::Spot, VenueKind::PerpA, VenueKind::PerpB, VenueKind::PerpC]
    } else {
        let venue = VenueKind::parse(&req.venue)
            .ok_or_else(|| ApiError::BadRequest(format!("unknown venue '{}'", req.venue)))?;
        vec![venue]
    };

    let mut synced = Vec::with_capacity(targets.len());
    for venue in targets {
        let Some(adapter) = state.executor.adapter_for_admin(venue) else { continue };
        let count = adapter.sync_markets(&state.repo).await.map_err(|e| ApiError::Internal(e.to_string()))?;
        synced.push(VenueSyncCount { venue: venue.as_str().to_string(), markets_synced: count });
    }

    Ok(Json(SyncVenueMarketsResponse { synced }))
}

/// Reports the executor's network/cached/force-refreshed nonce for every
/// vault-mediated `ModuleService` the process holds.
pub async fn test_nonce(State(state): State<AppState>) -> Result<Json<Vec<TestNonceResponse>>, ApiError> {
    let mut diagnostics = Vec::with_capacity(state.module_services.len());
    for module in &state.module_services {
        let diag = module.nonce_diagnostic().await.map_err(|e| ApiError::Internal(e.to_string()))?;
        diagnostics.push(TestNonceResponse::from_diagnostic(module.module_address, diag));
    }
    Ok(Json(diagnostics))
}

pub async fn get_schema() -> Json<serde_json::Value> {
    Json(crate::schema::get_schema_value())
}
