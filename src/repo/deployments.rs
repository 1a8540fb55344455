use anyhow::{Context, Result};
use rusqlite::params;

use crate::model::deployment::DeploymentStatus;
use crate::model::{Deployment, VenueKind};

use super::Repo;

impl Repo {
    pub async fn insert_deployment(&self, d: &Deployment) -> Result<()> {
        let conn = self.lock().await;
        conn.execute(
            "INSERT INTO deployments (id, agent_id, user_wallet, safe_wallet, status, sub_active, module_enabled, enabled_venues, profit_receiver_address, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                d.id,
                d.agent_id,
                d.user_wallet,
                d.safe_wallet,
                status_str(d.status),
                d.sub_active,
                d.module_enabled,
                serde_json::to_string(&d.enabled_venues)?,
                d.profit_receiver_address,
                d.created_at,
            ],
        )
        .context("inserting deployment")?;
        Ok(())
    }

    pub async fn get_deployment(&self, id: &str) -> Result<Option<Deployment>> {
        let conn = self.lock().await;
        let result = conn.query_row(
            "SELECT id, agent_id, user_wallet, safe_wallet, status, sub_active, module_enabled, enabled_venues, profit_receiver_address, created_at
             FROM deployments WHERE id = ?1",
            params![id],
            row_to_deployment,
        );
        match result {
            Ok(d) => Ok(Some(d)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e).context("loading deployment"),
        }
    }

    /// Auto mode: pick the newest ACTIVE, eligible deployment for this
    /// agent.
    pub async fn newest_active_deployment_for_agent(&self, agent_id: &str) -> Result<Option<Deployment>> {
        let conn = self.lock().await;
        let result = conn.query_row(
            "SELECT id, agent_id, user_wallet, safe_wallet, status, sub_active, module_enabled, enabled_venues, profit_receiver_address, created_at
             FROM deployments WHERE agent_id = ?1 AND status = 'ACTIVE' AND sub_active = 1 AND module_enabled = 1
             ORDER BY created_at DESC LIMIT 1",
            params![agent_id],
            row_to_deployment,
        );
        match result {
            Ok(d) => Ok(Some(d)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e).context("loading newest active deployment"),
        }
    }

    pub async fn list_deployments(&self) -> Result<Vec<Deployment>> {
        let conn = self.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, agent_id, user_wallet, safe_wallet, status, sub_active, module_enabled, enabled_venues, profit_receiver_address, created_at
             FROM deployments",
        )?;
        let rows = stmt
            .query_map([], row_to_deployment)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("listing deployments")?;
        Ok(rows)
    }

    pub async fn set_deployment_status(&self, id: &str, status: DeploymentStatus) -> Result<()> {
        let conn = self.lock().await;
        conn.execute(
            "UPDATE deployments SET status = ?1 WHERE id = ?2",
            params![status_str(status), id],
        )
        .context("updating deployment status")?;
        Ok(())
    }
}

fn status_str(s: DeploymentStatus) -> &'static str {
    match s {
        DeploymentStatus::Active => "ACTIVE",
        DeploymentStatus::Paused => "PAUSED",
        DeploymentStatus::Terminated => "TERMINATED",
    }
}

fn row_to_deployment(row: &rusqlite::Row) -> rusqlite::Result<Deployment> {
    let status_str: String = row.get(4)?;
    let enabled_venues_json: String = row.get(7)?;
    Ok(Deployment {
        id: row.get(0)?,
        agent_id: row.get(1)?,
        user_wallet: row.get(2)?,
        safe_wallet: row.get(3)?,
        status: match status_str.as_str() {
            "ACTIVE" => DeploymentStatus::Active,
            "PAUSED" => DeploymentStatus::Paused,
            _ => DeploymentStatus::Terminated,
        },
        sub_active: row.get(5)?,
        module_enabled: row.get(6)?,
        enabled_venues: serde_json::from_str::<Vec<VenueKind>>(&enabled_venues_json).unwrap_or_default(),
        profit_receiver_address: row.get(8)?,
        created_at: row.get(9)?,
    })
}
