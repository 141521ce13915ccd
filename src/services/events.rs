//! In-process notifications for host code.
//!
//! Two channels exist: `vote`, fired once per accepted vote, and `debug`,
//! fired for each traced step while debug mode is on. Delivery is
//! synchronous, in registration order.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, RwLock,
};

use tracing::debug;

type VoteListener = Arc<dyn Fn(&str, &str) + Send + Sync>;
type DebugListener = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct EventBus {
    debug_enabled: bool,
    next_id: AtomicU64,
    vote_listeners: RwLock<Vec<(SubscriptionId, VoteListener)>>,
    debug_listeners: RwLock<Vec<(SubscriptionId, DebugListener)>>,
}

impl EventBus {
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            next_id: AtomicU64::new(0),
            vote_listeners: RwLock::new(Vec::new()),
            debug_listeners: RwLock::new(Vec::new()),
        }
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug_enabled
    }

    pub fn on_vote<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        let id = self.next_id();
        write(&self.vote_listeners).push((id, Arc::new(listener)));
        id
    }

    pub fn on_debug<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let id = self.next_id();
        write(&self.debug_listeners).push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener from whichever channel holds it.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut votes = write(&self.vote_listeners);
        let before = votes.len();
        votes.retain(|(listener_id, _)| *listener_id != id);
        if votes.len() != before {
            return true;
        }
        drop(votes);

        let mut debugs = write(&self.debug_listeners);
        let before = debugs.len();
        debugs.retain(|(listener_id, _)| *listener_id != id);
        debugs.len() != before
    }

    pub fn emit_vote(&self, bot: &str, user: &str) {
        // Snapshot first so a listener may subscribe or unsubscribe.
        let listeners: Vec<VoteListener> = read(&self.vote_listeners)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(bot, user);
        }
    }

    /// Traces `message`; subscribers only see it when debug mode is on.
    pub fn debug(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        debug!("{message}");

        if !self.debug_enabled {
            return;
        }

        let listeners: Vec<DebugListener> = read(&self.debug_listeners)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(message);
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

// A panicking listener must not take the bus down with it.
fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
