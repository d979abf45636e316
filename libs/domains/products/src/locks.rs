use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Per-serial-number async locks.
///
/// Entries are created on demand and removed once nobody holds or waits on them.
#[derive(Debug, Default)]
pub(crate) struct SerialLocks {
    table: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

/// Holds the locks for a set of serial numbers until dropped.
pub(crate) struct SerialGuard<'a> {
    locks: &'a SerialLocks,
    keys: Vec<String>,
    guards: Vec<OwnedMutexGuard<()>>,
}

impl SerialLocks {
    fn table(&self) -> MutexGuard<'_, HashMap<String, Arc<AsyncMutex<()>>>> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock every serial in `serials`. Keys are taken in sorted order, so two
    /// callers locking overlapping sets cannot deadlock.
    pub(crate) async fn acquire(&self, serials: &[&str]) -> SerialGuard<'_> {
        let mut keys: Vec<String> = serials.iter().map(|s| s.to_string()).collect();
        keys.sort();
        keys.dedup();

        // Built before the first await so a cancelled acquire still prunes on drop.
        let mut guard = SerialGuard {
            locks: self,
            guards: Vec::with_capacity(keys.len()),
            keys,
        };

        for key in &guard.keys {
            let lock = self.table().entry(key.clone()).or_default().clone();
            guard.guards.push(lock.lock_owned().await);
        }

        guard
    }

    fn release(&self, keys: &[String]) {
        let mut table = self.table();
        for key in keys {
            // Only the table's own reference left: nobody holds or awaits it.
            if table.get(key).is_some_and(|lock| Arc::strong_count(lock) == 1) {
                table.remove(key);
            }
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.table().len()
    }
}

impl Drop for SerialGuard<'_> {
    fn drop(&mut self) {
        self.guards.clear();
        self.locks.release(&self.keys);
    }
}
