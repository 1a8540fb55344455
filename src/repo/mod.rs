//! Durable-map facade over the relational store.
//!
//! Backed by `rusqlite` the way the base crate's `api/db.rs` backs its
//! web-app tables: a single connection behind an async mutex, WAL mode,
//! foreign keys on, migrations run once at startup. Every uniqueness
//! constraint the data model requires is enforced at the schema level so
//! collision handling in the executor is a real race, not a best-effort
//! check.

mod agents;
mod billing;
mod deployments;
mod markets;
mod positions;
mod signals;

use std::sync::Arc;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tokio::sync::Mutex;

pub use agents::AgentAddressError;
pub use positions::PositionUpsertOutcome;

/// Shared, lock-guarded handle to the sqlite connection. Async-mutex
/// (not `std::sync::Mutex`) because every caller holds it across
/// `.await` points only incidentally — the critical sections here are
/// pure synchronous rusqlite calls, but the handle is shared with async
/// HTTP handlers so it must be `Send`-safe to hold across awaits.
#[derive(Clone)]
pub struct Repo {
    conn: Arc<Mutex<Connection>>,
}

impl Repo {
    pub fn open(path: &std::path::Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("creating repo directory")?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("opening sqlite store at {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON;")?;
        migrate(&conn)?;
        Ok(Repo {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("opening in-memory sqlite store")?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrate(&conn)?;
        Ok(Repo {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub(crate) async fn lock(&self) -> tokio::sync::MutexGuard<'_, Connection> {
        self.conn.lock().await
    }
}

fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS signals (
            id            TEXT PRIMARY KEY,
            agent_id      TEXT NOT NULL,
            venue         TEXT NOT NULL,
            token_symbol  TEXT NOT NULL,
            side          TEXT NOT NULL,
            size_model    TEXT NOT NULL,
            risk_model    TEXT NOT NULL,
            source_ref    TEXT NOT NULL,
            created_at    INTEGER NOT NULL,
            updated_at    INTEGER DEFAULT (unixepoch())
        );

        CREATE TABLE IF NOT EXISTS deployments (
            id                       TEXT PRIMARY KEY,
            agent_id                 TEXT NOT NULL,
            user_wallet              TEXT NOT NULL,
            safe_wallet              TEXT NOT NULL,
            status                   TEXT NOT NULL,
            sub_active               INTEGER NOT NULL,
            module_enabled           INTEGER NOT NULL,
            enabled_venues           TEXT NOT NULL,
            profit_receiver_address  TEXT NOT NULL,
            created_at               INTEGER NOT NULL,
            updated_at               INTEGER DEFAULT (unixepoch())
        );

        CREATE TABLE IF NOT EXISTS user_agent_addresses (
            user_wallet     TEXT NOT NULL,
            venue           TEXT NOT NULL,
            agent_address   TEXT NOT NULL UNIQUE,
            created_at      INTEGER NOT NULL,
            updated_at      INTEGER DEFAULT (unixepoch()),
            PRIMARY KEY (user_wallet, venue)
        );

        CREATE TABLE IF NOT EXISTS positions (
            id                  TEXT PRIMARY KEY,
            deployment_id       TEXT NOT NULL,
            signal_id           TEXT NOT NULL,
            venue               TEXT NOT NULL,
            token_symbol        TEXT NOT NULL,
            side                TEXT NOT NULL,
            entry_price         REAL NOT NULL,
            qty                 REAL NOT NULL,
            entry_tx_ref        TEXT NOT NULL,
            opened_at           INTEGER NOT NULL,
            status              TEXT NOT NULL,
            closed_at           INTEGER,
            exit_price          REAL,
            exit_tx_ref         TEXT,
            pnl                 REAL,
            exit_reason         TEXT,
            trailing_enabled    INTEGER NOT NULL,
            trailing_percent    REAL NOT NULL,
            highest_price       REAL,
            lowest_price        REAL,
            venue_trade_id      TEXT,
            venue_trade_index   INTEGER,
            created_at          INTEGER NOT NULL DEFAULT (unixepoch()),
            updated_at          INTEGER DEFAULT (unixepoch()),
            UNIQUE (deployment_id, signal_id)
        );

        CREATE TABLE IF NOT EXISTS venue_markets (
            venue          TEXT NOT NULL,
            token_symbol   TEXT NOT NULL,
            market_ref     TEXT NOT NULL,
            is_active      INTEGER NOT NULL,
            min_position   REAL NOT NULL,
            max_leverage   REAL NOT NULL,
            created_at     INTEGER NOT NULL DEFAULT (unixepoch()),
            updated_at     INTEGER DEFAULT (unixepoch()),
            PRIMARY KEY (venue, token_symbol)
        );

        CREATE TABLE IF NOT EXISTS token_registry (
            chain          TEXT NOT NULL,
            token_symbol   TEXT NOT NULL,
            address        TEXT NOT NULL,
            decimals       INTEGER NOT NULL,
            created_at     INTEGER NOT NULL DEFAULT (unixepoch()),
            updated_at     INTEGER DEFAULT (unixepoch()),
            PRIMARY KEY (chain, token_symbol)
        );

        CREATE TABLE IF NOT EXISTS billing_events (
            id              TEXT PRIMARY KEY,
            deployment_id   TEXT NOT NULL,
            kind            TEXT NOT NULL,
            amount          REAL NOT NULL,
            asset           TEXT NOT NULL,
            occurred_at     INTEGER NOT NULL,
            updated_at      INTEGER DEFAULT (unixepoch())
        );
        ",
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn opens_in_memory_and_migrates() {
        let repo = Repo::open_in_memory().unwrap();
        let conn = repo.lock().await;
        let count: i64 = conn
            .query_row(
                "SELECT count(*) FROM sqlite_master WHERE type='table' AND name='positions'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
