//! In-process write serialization per game.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<i64, Arc<Mutex<()>>>;

/// One async mutex per game id, created on first use and dropped once the
/// last holder or waiter is gone.
#[derive(Debug, Clone, Default)]
pub struct GameLocks {
    locks: Arc<LockMap>,
}

/// Exclusive write access to one game. Dropping it releases the lock and
/// removes the map entry when nobody else is waiting.
#[derive(Debug)]
pub struct GameLockGuard {
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<LockMap>,
    game_id: i64,
}

impl Drop for GameLockGuard {
    fn drop(&mut self) {
        // the guard holds a clone of the Arc; release it before counting
        drop(self.guard.take());
        self.locks
            .remove_if(&self.game_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl GameLocks {
    /// Wait for exclusive write access to `game_id`.
    pub async fn acquire(&self, game_id: i64) -> GameLockGuard {
        // release the shard lock before awaiting
        let lock = self
            .locks
            .entry(game_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone();
        // built before the wait so a cancelled waiter still cleans up
        let mut held = GameLockGuard {
            guard: None,
            locks: Arc::clone(&self.locks),
            game_id,
        };
        held.guard = Some(lock.lock_owned().await);
        held
    }

    /// Games with a live holder or waiter.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
