use anyhow::{Context, Result};
use rusqlite::params;
use thiserror::Error;

use crate::model::{UserAgentAddress, VenueKind};

use super::Repo;

#[derive(Debug, Error)]
pub enum AgentAddressError {
    #[error("address already assigned to another user")]
    AddressTaken,
}

impl Repo {
    /// Create the (user, venue) -> agent address mapping: one address per
    /// (user, venue), and no address shared across users. Both halves are
    /// enforced by schema constraints (PRIMARY KEY and a UNIQUE index on
    /// `agent_address`), so the uniqueness holds even under concurrent
    /// generation, not just at the application layer.
    pub async fn create_agent_address(
        &self,
        user_wallet: &str,
        venue: VenueKind,
        agent_address: &str,
        created_at: i64,
    ) -> Result<Result<(), AgentAddressError>> {
        let conn = self.lock().await;
        let user_wallet = user_wallet.to_lowercase();
        let result = conn.execute(
            "INSERT INTO user_agent_addresses (user_wallet, venue, agent_address, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![user_wallet, venue.as_str(), agent_address, created_at],
        );
        match result {
            Ok(_) => Ok(Ok(())),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Ok(Err(AgentAddressError::AddressTaken))
            }
            Err(e) => Err(e).context("creating agent address"),
        }
    }

    pub async fn get_agent_address(&self, user_wallet: &str, venue: VenueKind) -> Result<Option<UserAgentAddress>> {
        let conn = self.lock().await;
        let user_wallet = user_wallet.to_lowercase();
        let result = conn.query_row(
            "SELECT user_wallet, venue, agent_address, created_at FROM user_agent_addresses WHERE user_wallet = ?1 AND venue = ?2",
            params![user_wallet, venue.as_str()],
            |row| {
                let venue_str: String = row.get(1)?;
                Ok(UserAgentAddress {
                    user_wallet: row.get(0)?,
                    venue: VenueKind::parse(&venue_str).unwrap_or(VenueKind::Multi),
                    agent_address: row.get(2)?,
                    created_at: row.get(3)?,
                })
            },
        );
        match result {
            Ok(a) => Ok(Some(a)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e).context("loading agent address"),
        }
    }
}
