//! Nonce Serializer.
//!
//! Per signing address: a FIFO acquire-lock, a cached next-nonce, and a
//! re-sync policy triggered by any error message matching the "stale
//! nonce" family. Grounded on the base crate's `Arc<Mutex<Connection>>`
//! sharing idiom (`api/db.rs`'s `Db` type) — here the guarded value is a
//! small nonce cache instead of a sqlite handle, and the outer map uses a
//! `std::sync::Mutex` because lookups are uncontended and never held
//! across an `.await`.

use std::collections::HashMap;
use std::sync::Mutex;

use alloy::primitives::Address;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex as AsyncMutex;

/// Abstracts "read the latest on-chain nonce for an address" so the
/// serializer is testable without a live RPC endpoint.
#[async_trait]
pub trait NonceSource: Send + Sync {
    async fn latest_nonce(&self, address: Address) -> Result<u64>;
}

struct AddressSlot {
    lock: AsyncMutex<u64>,
}

/// Per-address FIFO lock + cached nonce + error-driven re-sync.
pub struct NonceSerializer<S: NonceSource> {
    source: S,
    slots: Mutex<HashMap<Address, std::sync::Arc<AddressSlot>>>,
}

/// The error-message family that triggers a forced re-sync.
pub fn looks_like_nonce_error(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("nonce too high")
        || lower.contains("nonce too low")
        || lower.contains("invalid nonce")
        || lower.contains("replacement transaction underpriced")
        || lower.contains("nonce")
}

impl<S: NonceSource> NonceSerializer<S> {
    pub fn new(source: S) -> Self {
        NonceSerializer {
            source,
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn slot_for(&self, address: Address) -> std::sync::Arc<AddressSlot> {
        let mut slots = self.slots.lock().unwrap();
        slots
            .entry(address)
            .or_insert_with(|| {
                std::sync::Arc::new(AddressSlot {
                    lock: AsyncMutex::new(0),
                })
            })
            .clone()
    }

    /// Force-drop the cached nonce for an address, for the admin
    /// diagnostic endpoint and for operator-triggered recovery.
    pub async fn force_refresh(&self, address: Address) -> Result<u64> {
        let slot = self.slot_for(address);
        let mut cached = slot.lock.lock().await;
        let fresh = self.source.latest_nonce(address).await?;
        *cached = fresh;
        Ok(fresh)
    }

    pub async fn cached_nonce(&self, address: Address) -> u64 {
        let slot = self.slot_for(address);
        *slot.lock.lock().await
    }

    /// Read the network's nonce directly, bypassing the cache. For the
    /// admin diagnostic endpoint, which reports network/cached/refreshed
    /// side by side without mutating the cache itself.
    pub async fn network_nonce(&self, address: Address) -> Result<u64> {
        self.source.latest_nonce(address).await
    }

    /// Acquire the per-address lock, call `f(nonce)`, and release on
    /// either outcome. On an error matching the nonce-stale family, the
    /// cache is dropped and the call is retried exactly once with a
    /// freshly-read nonce.
    pub async fn with_nonce<F, Fut, T>(&self, address: Address, mut f: F) -> Result<T>
    where
        F: FnMut(u64) -> Fut,
        Fut: std::future::Future<Output = Result<T, String>>,
    {
        let slot = self.slot_for(address);
        let mut cached = slot.lock.lock().await;

        if *cached == 0 {
            *cached = self.source.latest_nonce(address).await?;
        }

        match f(*cached).await {
            Ok(value) => {
                *cached += 1;
                Ok(value)
            }
            Err(message) if looks_like_nonce_error(&message) => {
                let fresh = self.source.latest_nonce(address).await?;
                *cached = fresh;
                match f(*cached).await {
                    Ok(value) => {
                        *cached += 1;
                        Ok(value)
                    }
                    Err(message) => Err(anyhow::anyhow!("nonce retry failed: {message}")),
                }
            }
            Err(message) => Err(anyhow::anyhow!(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct FixedSource {
        value: AtomicU64,
    }

    #[async_trait]
    impl NonceSource for FixedSource {
        async fn latest_nonce(&self, _address: Address) -> Result<u64> {
            Ok(self.value.load(Ordering::SeqCst))
        }
    }

    #[tokio::test]
    async fn happy_path_increments_cache() {
        let serializer = NonceSerializer::new(FixedSource { value: AtomicU64::new(5) });
        let addr = Address::ZERO;

        let n1 = serializer.with_nonce(addr, |n| async move { Ok::<u64, String>(n) }).await.unwrap();
        let n2 = serializer.with_nonce(addr, |n| async move { Ok::<u64, String>(n) }).await.unwrap();
        assert_eq!(n1, 5);
        assert_eq!(n2, 6);
    }

    #[tokio::test]
    async fn nonce_too_low_triggers_single_resync_retry() {
        let serializer = NonceSerializer::new(FixedSource { value: AtomicU64::new(42) });
        let addr = Address::ZERO;
        let attempts = std::sync::Arc::new(AtomicU64::new(0));

        let attempts_clone = attempts.clone();
        let result = serializer
            .with_nonce(addr, move |n| {
                let attempts = attempts_clone.clone();
                async move {
                    let count = attempts.fetch_add(1, Ordering::SeqCst);
                    if count == 0 {
                        Err("nonce too low".to_string())
                    } else {
                        Ok(n)
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(result, 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn non_nonce_error_is_not_retried() {
        let serializer = NonceSerializer::new(FixedSource { value: AtomicU64::new(1) });
        let addr = Address::ZERO;
        let attempts = std::sync::Arc::new(AtomicU64::new(0));

        let attempts_clone = attempts.clone();
        let result = serializer
            .with_nonce(addr, move |_n| {
                let attempts = attempts_clone.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err::<u64, String>("insufficient funds".to_string())
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
