//! Wallet session management for the wallet core
//! 
//! `WalletManager` owns the state store of the active wallet and keeps it
//! fresh from a `SnapshotSource`.

pub mod store;
pub mod summary;

pub use store::WalletStateStore;
pub use summary::{TokenSummary, WalletSummary};

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, RwLockReadGuard};
use tokio::task::JoinHandle;
use crate::domain::entities::{Token, WalletIdentity, WalletState};
use crate::domain::repositories::SnapshotSource;
use crate::shared::error::WalletError;
use crate::shared::types::Amount;

/// Counts one refresh as in flight until it is finished or dropped.
///
/// A refresh future cancelled mid-fetch (timeout, aborted polling task) still
/// gives its slot back, and clears the loading flag if nothing else is running.
struct InFlight<'a> {
    manager: &'a WalletManager,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn start(manager: &'a WalletManager) -> Self {
        manager.in_flight.fetch_add(1, Ordering::SeqCst);
        Self { manager, finished: false }
    }

    /// Release the slot; call with the store write lock held.
    /// Returns true if other refreshes are still running.
    fn finish(mut self) -> bool {
        self.finished = true;
        self.manager.in_flight.fetch_sub(1, Ordering::SeqCst) > 1
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let still_running = self.manager.in_flight.fetch_sub(1, Ordering::SeqCst) > 1;
        log::debug!("Refresh cancelled before completion");
        if !still_running {
            // Lock holders other than refresh are short-lived readers;
            // the next write recomputes the flag if this misses.
            if let Ok(mut store) = self.manager.store.try_write() {
                store.set_loading(false);
            }
        }
    }
}

/// Session owner for a single active wallet
pub struct WalletManager {
    source: Arc<dyn SnapshotSource>,
    store: Arc<RwLock<WalletStateStore>>,
    active: Arc<RwLock<Option<WalletIdentity>>>,
    // Bumped on every switch/logout so late snapshots for an old session are dropped
    generation: AtomicU64,
    in_flight: AtomicUsize,
}

impl WalletManager {
    pub fn new(source: Arc<dyn SnapshotSource>) -> Self {
        Self {
            source,
            store: Arc::new(RwLock::new(WalletStateStore::new())),
            active: Arc::new(RwLock::new(None)),
            generation: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Make `identity` the active wallet, starting from an empty state
    pub async fn switch_wallet(&self, identity: WalletIdentity) {
        let mut active = self.active.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.store.write().await.clear();
        log::info!(
            "Switched to wallet {} ({})",
            identity.wallet_id,
            identity.label().unwrap_or("unnamed")
        );
        *active = Some(identity);
    }

    /// Forget the active wallet and its state
    pub async fn logout(&self) {
        let mut active = self.active.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.store.write().await.clear();
        if let Some(identity) = active.take() {
            log::info!("Logged out of wallet {}", identity.wallet_id);
        }
    }

    pub async fn active_wallet(&self) -> Option<WalletIdentity> {
        self.active.read().await.clone()
    }

    /// Fetch a fresh snapshot for the active wallet and replace the state with it.
    ///
    /// The fetch runs without holding the store lock. When several refreshes
    /// overlap, the last one to complete wins.
    pub async fn refresh(&self) -> Result<(), WalletError> {
        let (wallet_id, generation) = {
            let active = self.active.read().await;
            let identity = active
                .as_ref()
                .ok_or_else(|| WalletError::wallet_not_found("No active wallet"))?;
            (identity.wallet_id.clone(), self.generation.load(Ordering::SeqCst))
        };

        let in_flight = InFlight::start(self);
        self.store.write().await.set_loading(true);

        let fetched = self.source.fetch_snapshot(&wallet_id).await;

        let mut store = self.store.write().await;
        // Counted under the lock so a refresh starting now still sees its loading flag
        let still_running = in_flight.finish();

        if self.generation.load(Ordering::SeqCst) != generation {
            log::debug!("Discarding snapshot for {}: wallet changed during refresh", wallet_id);
            store.set_loading(still_running);
            return Ok(());
        }

        match fetched.and_then(|snapshot| snapshot.into_state()) {
            Ok(mut state) => {
                state.loading = state.loading || still_running;
                store.replace_state(state)?;
                log::info!(
                    "Wallet {} refreshed: total_balance={}, tokens={}",
                    wallet_id,
                    store.get_total_balance(),
                    store.token_count()
                );
                Ok(())
            }
            Err(e) => {
                store.set_loading(still_running);
                log::warn!("Wallet refresh failed for {}: {}", wallet_id, e);
                Err(e)
            }
        }
    }

    /// Read guard for synchronous queries against the store
    pub async fn read(&self) -> RwLockReadGuard<'_, WalletStateStore> {
        self.store.read().await
    }

    /// Active wallet and its state, read as one consistent pair
    pub async fn session(&self) -> (Option<WalletIdentity>, WalletState) {
        let active = self.active.read().await;
        let store = self.store.read().await;
        (active.clone(), store.state().clone())
    }

    pub async fn state(&self) -> WalletState {
        self.store.read().await.state().clone()
    }

    pub async fn total_balance(&self) -> Amount {
        self.store.read().await.get_total_balance()
    }

    pub async fn has_token(&self, token_id: &str) -> bool {
        self.store.read().await.has_token(token_id)
    }

    pub async fn get_token(&self, token_id: &str) -> Option<Token> {
        self.store.read().await.get_token(token_id).cloned()
    }

    pub async fn is_loading(&self) -> bool {
        self.store.read().await.is_loading()
    }

    /// Poll the source at a fixed interval until the task is aborted
    pub fn spawn_refresh_loop(manager: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match manager.refresh().await {
                    Ok(()) => {}
                    Err(WalletError::WalletNotFound(_)) => {
                        log::debug!("No active wallet, skipping refresh");
                    }
                    // Already logged by refresh
                    Err(_) => {}
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::WalletSnapshot;
    use crate::domain::repositories::MockSnapshotSource;
    use tokio::sync::Notify;

    fn snapshot(total_balance: Amount, tokens: Vec<Token>) -> WalletSnapshot {
        WalletSnapshot {
            total_balance,
            tokens,
            loading: None,
        }
    }

    /// Source that blocks until released, to observe in-flight behaviour
    struct GatedSource {
        started: Notify,
        release: Notify,
        snapshot: WalletSnapshot,
    }

    #[async_trait::async_trait]
    impl SnapshotSource for GatedSource {
        async fn fetch_snapshot(&self, _wallet_id: &str) -> Result<WalletSnapshot, WalletError> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(self.snapshot.clone())
        }
    }

    /// Source whose n-th fetch waits for the n-th gate
    struct QueuedSource {
        calls: AtomicUsize,
        started: Notify,
        gates: Vec<Notify>,
        snapshots: Vec<WalletSnapshot>,
    }

    impl QueuedSource {
        fn new(snapshots: Vec<WalletSnapshot>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                started: Notify::new(),
                gates: snapshots.iter().map(|_| Notify::new()).collect(),
                snapshots,
            }
        }
    }

    #[async_trait::async_trait]
    impl SnapshotSource for QueuedSource {
        async fn fetch_snapshot(&self, _wallet_id: &str) -> Result<WalletSnapshot, WalletError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.started.notify_one();
            self.gates[call].notified().await;
            Ok(self.snapshots[call].clone())
        }
    }

    /// Source that never answers its first fetch
    struct StallFirstSource {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl SnapshotSource for StallFirstSource {
        async fn fetch_snapshot(&self, _wallet_id: &str) -> Result<WalletSnapshot, WalletError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                std::future::pending::<()>().await;
            }
            Ok(snapshot(25, vec![]))
        }
    }

    #[tokio::test]
    async fn test_refresh_without_wallet() {
        let mut source = MockSnapshotSource::new();
        source.expect_fetch_snapshot().never();
        let manager = WalletManager::new(Arc::new(source));

        let err = manager.refresh().await.unwrap_err();
        assert!(matches!(err, WalletError::WalletNotFound(_)));
    }

    #[tokio::test]
    async fn test_refresh_populates_store() {
        let mut source = MockSnapshotSource::new();
        source
            .expect_fetch_snapshot()
            .withf(|wallet_id: &str| wallet_id == "w1")
            .times(1)
            .returning(|_| Ok(snapshot(500000, vec![Token::new("t1", 5)])));
        let manager = WalletManager::new(Arc::new(source));
        manager.switch_wallet(WalletIdentity::new("w1", "Main")).await;

        tokio_test::assert_ok!(manager.refresh().await);

        assert_eq!(manager.total_balance().await, 500000);
        assert!(manager.has_token("t1").await);
        assert!(manager.get_token("t2").await.is_none());
        assert!(!manager.is_loading().await);
        assert!(manager.read().await.last_updated().is_some());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_prior_state() {
        let mut source = MockSnapshotSource::new();
        let mut seq = mockall::Sequence::new();
        source
            .expect_fetch_snapshot()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(snapshot(100, vec![Token::new("t1", 5)])));
        source
            .expect_fetch_snapshot()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(WalletError::network("indexer unavailable")));
        source
            .expect_fetch_snapshot()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(snapshot(999, vec![Token::new("t1", 1), Token::new("t1", 2)])));
        let manager = WalletManager::new(Arc::new(source));
        manager.switch_wallet(WalletIdentity::new("w1", "Main")).await;

        manager.refresh().await.unwrap();
        let before = manager.state().await;

        let err = manager.refresh().await.unwrap_err();
        assert!(matches!(err, WalletError::Network(_)));
        assert_eq!(manager.state().await, before);

        let err = manager.refresh().await.unwrap_err();
        assert!(err.is_invalid_state());
        assert_eq!(manager.state().await, before);
        assert!(!manager.is_loading().await);
    }

    #[tokio::test]
    async fn test_switch_and_logout_clear_state() {
        let mut source = MockSnapshotSource::new();
        source
            .expect_fetch_snapshot()
            .returning(|_| Ok(snapshot(42, vec![Token::new("t1", 1)])));
        let manager = WalletManager::new(Arc::new(source));

        manager.switch_wallet(WalletIdentity::new("w1", "First")).await;
        manager.refresh().await.unwrap();
        assert_eq!(manager.total_balance().await, 42);

        manager.switch_wallet(WalletIdentity::new("w2", "Second")).await;
        assert_eq!(manager.state().await, WalletState::empty());
        assert_eq!(manager.active_wallet().await.map(|w| w.wallet_id), Some("w2".to_string()));

        manager.refresh().await.unwrap();
        manager.logout().await;
        assert_eq!(manager.state().await, WalletState::empty());
        assert!(manager.active_wallet().await.is_none());
    }

    #[tokio::test]
    async fn test_loading_while_in_flight() {
        let source = Arc::new(GatedSource {
            started: Notify::new(),
            release: Notify::new(),
            snapshot: snapshot(10, vec![]),
        });
        let manager = Arc::new(WalletManager::new(source.clone()));
        manager.switch_wallet(WalletIdentity::new("w1", "Main")).await;

        let task = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.refresh().await })
        };
        source.started.notified().await;
        assert!(manager.is_loading().await);
        assert_eq!(manager.total_balance().await, 0);

        source.release.notify_one();
        task.await.unwrap().unwrap();
        assert!(!manager.is_loading().await);
        assert_eq!(manager.total_balance().await, 10);
    }

    #[tokio::test]
    async fn test_stale_snapshot_discarded_after_switch() {
        let source = Arc::new(GatedSource {
            started: Notify::new(),
            release: Notify::new(),
            snapshot: snapshot(777, vec![Token::new("old", 1)]),
        });
        let manager = Arc::new(WalletManager::new(source.clone()));
        manager.switch_wallet(WalletIdentity::new("w1", "Old")).await;

        let task = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.refresh().await })
        };
        source.started.notified().await;
        manager.switch_wallet(WalletIdentity::new("w2", "New")).await;
        source.release.notify_one();

        task.await.unwrap().unwrap();
        assert_eq!(manager.total_balance().await, 0);
        assert!(!manager.has_token("old").await);
        assert!(!manager.is_loading().await);
    }

    #[tokio::test]
    async fn test_refresh_loop_polls_source() {
        let mut source = MockSnapshotSource::new();
        source
            .expect_fetch_snapshot()
            .returning(|_| Ok(snapshot(5, vec![])));
        let manager = Arc::new(WalletManager::new(Arc::new(source)));
        manager.switch_wallet(WalletIdentity::new("w1", "Main")).await;

        let handle = WalletManager::spawn_refresh_loop(manager.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();

        assert_eq!(manager.total_balance().await, 5);
    }

    #[tokio::test]
    async fn test_overlapping_refreshes_last_completed_wins() {
        let source = Arc::new(QueuedSource::new(vec![
            snapshot(111, vec![Token::new("first", 1)]),
            snapshot(222, vec![Token::new("second", 2)]),
        ]));
        let manager = Arc::new(WalletManager::new(source.clone()));
        manager.switch_wallet(WalletIdentity::new("w1", "Main")).await;

        let first = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.refresh().await })
        };
        source.started.notified().await;
        let second = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.refresh().await })
        };
        source.started.notified().await;

        // Second fetch completes first; the first is still in flight
        source.gates[1].notify_one();
        second.await.unwrap().unwrap();
        assert_eq!(manager.total_balance().await, 222);
        assert!(manager.has_token("second").await);
        assert!(manager.is_loading().await);

        source.gates[0].notify_one();
        first.await.unwrap().unwrap();
        assert_eq!(manager.total_balance().await, 111);
        assert!(manager.has_token("first").await);
        assert!(!manager.has_token("second").await);
        assert!(!manager.is_loading().await);
    }

    #[tokio::test]
    async fn test_cancelled_refresh_does_not_leave_loading_set() {
        let source = Arc::new(StallFirstSource { calls: AtomicUsize::new(0) });
        let manager = WalletManager::new(source);
        manager.switch_wallet(WalletIdentity::new("w1", "Main")).await;

        let timed_out = tokio::time::timeout(Duration::from_millis(20), manager.refresh()).await;
        assert!(timed_out.is_err());
        assert!(!manager.is_loading().await);

        manager.refresh().await.unwrap();
        assert_eq!(manager.total_balance().await, 25);
        assert!(!manager.is_loading().await);
    }

    #[tokio::test]
    async fn test_aborted_polling_does_not_leave_loading_set() {
        let source = Arc::new(StallFirstSource { calls: AtomicUsize::new(0) });
        let manager = Arc::new(WalletManager::new(source));
        manager.switch_wallet(WalletIdentity::new("w1", "Main")).await;

        let handle = WalletManager::spawn_refresh_loop(manager.clone(), Duration::from_secs(3600));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(manager.is_loading().await);
        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());

        assert!(!manager.is_loading().await);
        manager.refresh().await.unwrap();
        assert!(!manager.is_loading().await);
    }

    #[tokio::test]
    async fn test_session_pairs_identity_with_state() {
        let mut source = MockSnapshotSource::new();
        source
            .expect_fetch_snapshot()
            .returning(|wallet_id| {
                let balance = if wallet_id == "w1" { 10 } else { 20 };
                Ok(snapshot(balance, vec![]))
            });
        let manager = WalletManager::new(Arc::new(source));

        assert_eq!(manager.session().await, (None, WalletState::empty()));

        manager.switch_wallet(WalletIdentity::new("w1", "First")).await;
        manager.refresh().await.unwrap();
        manager.switch_wallet(WalletIdentity::new("w2", "Second")).await;

        let (identity, state) = manager.session().await;
        assert_eq!(identity.map(|i| i.wallet_id), Some("w2".to_string()));
        assert_eq!(state, WalletState::empty());

        manager.refresh().await.unwrap();
        let (identity, state) = manager.session().await;
        assert_eq!(identity.map(|i| i.wallet_id), Some("w2".to_string()));
        assert_eq!(state.total_balance, 20);
    }
}
