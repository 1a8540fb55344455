use anyhow::{Context, Result};
use rusqlite::params;

use crate::model::billing::BillingKind;
use crate::model::BillingEvent;

use super::Repo;

impl Repo {
    pub async fn insert_billing_event(&self, e: &BillingEvent) -> Result<()> {
        let conn = self.lock().await;
        conn.execute(
            "INSERT INTO billing_events (id, deployment_id, kind, amount, asset, occurred_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                e.id,
                e.deployment_id,
                kind_str(e.kind),
                e.amount,
                e.asset,
                e.occurred_at,
            ],
        )
        .context("inserting billing event")?;
        Ok(())
    }

    pub async fn list_billing_for_deployment(&self, deployment_id: &str) -> Result<Vec<BillingEvent>> {
        let conn = self.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, deployment_id, kind, amount, asset, occurred_at FROM billing_events WHERE deployment_id = ?1 ORDER BY occurred_at",
        )?;
        let rows = stmt
            .query_map(params![deployment_id], |row| {
                let kind_str: String = row.get(2)?;
                Ok(BillingEvent {
                    id: row.get(0)?,
                    deployment_id: row.get(1)?,
                    kind: if kind_str == "PROFIT_SHARE" { BillingKind::ProfitShare } else { BillingKind::Fee },
                    amount: row.get(3)?,
                    asset: row.get(4)?,
                    occurred_at: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("listing billing events")?;
        Ok(rows)
    }
}

fn kind_str(k: BillingKind) -> &'static str {
    match k {
        BillingKind::ProfitShare => "PROFIT_SHARE",
        BillingKind::Fee => "FEE",
    }
}
