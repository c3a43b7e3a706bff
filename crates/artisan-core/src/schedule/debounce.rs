//! Keyed debounce scheduler.
//!
//! `schedule(key, delay, action)` cancels whatever is pending under `key` and
//! arms a fresh timer; the action runs once after `delay` of quiescence.
//! Keys are independent: rescheduling one never touches another.
//!
//! Each arming gets a sequence number that is handed to the action. When the
//! action only *notifies* an owner task (rather than doing the work itself),
//! the owner calls [`DebounceScheduler::claim`] with that number; a
//! notification that was already in flight when the key was rescheduled
//! fails the claim and is dropped.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use tokio::task::JoinHandle;

struct ArmedTimer {
    seq: u64,
    handle: JoinHandle<()>,
}

/// Debounce timers keyed by `K`. Must be used inside a tokio runtime.
pub struct DebounceScheduler<K> {
    timers: HashMap<K, ArmedTimer>,
    next_seq: u64,
}

impl<K> DebounceScheduler<K>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self {
            timers: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Arm `key`, replacing any pending timer. Returns the arming's sequence number.
    pub fn schedule<F, Fut>(&mut self, key: K, delay: Duration, action: F) -> u64
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel(&key);

        self.next_seq += 1;
        let seq = self.next_seq;
        let fut = action(seq);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fut.await;
        });

        tracing::trace!(?key, seq, delay_ms = delay.as_millis() as u64, "debounce armed");
        self.timers.insert(key, ArmedTimer { seq, handle });
        seq
    }

    /// Drop the pending timer for `key` without firing it.
    ///
    /// Returns whether a timer was pending.
    pub fn cancel(&mut self, key: &K) -> bool {
        match self.timers.remove(key) {
            Some(timer) => {
                timer.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Accept a fire notification for `key` if `seq` is the current arming.
    ///
    /// A successful claim disarms the key, so each arming is claimed at most once.
    pub fn claim(&mut self, key: &K, seq: u64) -> bool {
        match self.timers.get(key) {
            Some(timer) if timer.seq == seq => {
                self.timers.remove(key);
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.timers
            .get(key)
            .is_some_and(|timer| !timer.handle.is_finished())
    }

    pub fn cancel_all(&mut self) {
        for (_, timer) in self.timers.drain() {
            timer.handle.abort();
        }
    }
}

impl<K> Default for DebounceScheduler<K>
where
    K: Eq + Hash + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for DebounceScheduler<K> {
    fn drop(&mut self) {
        for (_, timer) in self.timers.drain() {
            timer.handle.abort();
        }
    }
}
