use anyhow::{Context, Result};
use rusqlite::params;

use crate::model::{TokenRegistryEntry, VenueKind, VenueMarket};

use super::Repo;

impl Repo {
    pub async fn upsert_venue_market(&self, m: &VenueMarket) -> Result<()> {
        let conn = self.lock().await;
        conn.execute(
            "INSERT INTO venue_markets (venue, token_symbol, market_ref, is_active, min_position, max_leverage)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(venue, token_symbol) DO UPDATE SET
                market_ref = excluded.market_ref,
                is_active = excluded.is_active,
                min_position = excluded.min_position,
                max_leverage = excluded.max_leverage",
            params![
                m.venue.as_str(),
                m.token_symbol,
                m.market_ref,
                m.is_active,
                m.min_position,
                m.max_leverage,
            ],
        )
        .context("upserting venue market")?;
        Ok(())
    }

    /// Pre-trade "venue availability" check.
    pub async fn is_market_active(&self, venue: VenueKind, token_symbol: &str) -> Result<bool> {
        let conn = self.lock().await;
        let active: Option<bool> = conn
            .query_row(
                "SELECT is_active FROM venue_markets WHERE venue = ?1 AND token_symbol = ?2",
                params![venue.as_str(), token_symbol],
                |row| row.get(0),
            )
            .ok();
        Ok(active.unwrap_or(false))
    }

    pub async fn list_markets_for_venue(&self, venue: VenueKind) -> Result<Vec<VenueMarket>> {
        let conn = self.lock().await;
        let mut stmt = conn.prepare(
            "SELECT venue, token_symbol, market_ref, is_active, min_position, max_leverage
             FROM venue_markets WHERE venue = ?1",
        )?;
        let rows = stmt
            .query_map(params![venue.as_str()], |row| {
                let venue_str: String = row.get(0)?;
                Ok(VenueMarket {
                    venue: VenueKind::parse(&venue_str).unwrap_or(VenueKind::Multi),
                    token_symbol: row.get(1)?,
                    market_ref: row.get(2)?,
                    is_active: row.get(3)?,
                    min_position: row.get(4)?,
                    max_leverage: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("listing venue markets")?;
        Ok(rows)
    }

    pub async fn upsert_token_registry_entry(&self, e: &TokenRegistryEntry) -> Result<()> {
        let conn = self.lock().await;
        conn.execute(
            "INSERT INTO token_registry (chain, token_symbol, address, decimals) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(chain, token_symbol) DO UPDATE SET address = excluded.address, decimals = excluded.decimals",
            params![e.chain, e.token_symbol, e.address, e.decimals],
        )
        .context("upserting token registry entry")?;
        Ok(())
    }

    /// Pre-trade "token registry" check for spot venues.
    pub async fn get_token_registry_entry(&self, chain: &str, token_symbol: &str) -> Result<Option<TokenRegistryEntry>> {
        let conn = self.lock().await;
        let result = conn.query_row(
            "SELECT chain, token_symbol, address, decimals FROM token_registry WHERE chain = ?1 AND token_symbol = ?2",
            params![chain, token_symbol],
            |row| {
                Ok(TokenRegistryEntry {
                    chain: row.get(0)?,
                    token_symbol: row.get(1)?,
                    address: row.get(2)?,
                    decimals: row.get(3)?,
                })
            },
        );
        match result {
            Ok(e) => Ok(Some(e)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e).context("loading token registry entry"),
        }
    }
}
