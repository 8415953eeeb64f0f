//! Page scroll lock shared by every open sheet.
//!
//! Each open sheet holds a guard; the page stays locked until the last guard
//! is dropped, so two stacked sheets can close in any order.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        ScrollLock::default()
    }

    pub fn acquire(&self, owner: &str) -> ScrollLockGuard {
        let previous = self.holders.fetch_add(1, Ordering::SeqCst);
        if previous == 0 {
            debug!("Page scroll locked by {}", owner);
        }
        ScrollLockGuard {
            holders: Arc::clone(&self.holders),
            owner: owner.to_string(),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders() > 0
    }

    pub fn holders(&self) -> usize {
        self.holders.load(Ordering::SeqCst)
    }
}

/// Releases its hold on drop, including when the owning sheet is torn down mid-gesture
#[derive(Debug)]
pub struct ScrollLockGuard {
    holders: Arc<AtomicUsize>,
    owner: String,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        let previous = self.holders.fetch_sub(1, Ordering::SeqCst);
        if previous == 1 {
            debug!("Page scroll unlocked by {}", self.owner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_held_until_last_guard() {
        let lock = ScrollLock::new();
        assert!(!lock.is_locked());

        let first = lock.acquire("topup");
        let second = lock.acquire("checkout");
        assert_eq!(lock.holders(), 2);

        drop(first);
        assert!(lock.is_locked());
        drop(second);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_clones_share_count() {
        let lock = ScrollLock::new();
        let handle = lock.clone();
        let _guard = handle.acquire("qr");
        assert!(lock.is_locked());
    }
}
