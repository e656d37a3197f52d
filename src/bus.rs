//! Latest-value broadcast slot.
//!
//! [`LatestSlot`] is the minimal publish point the bridge needs: a
//! single-producer, multi-consumer cell that holds at most the most recent
//! published value. Publishing replaces the held value and wakes every
//! subscriber; there is no queue and no history. A subscriber that attaches
//! after a publish observes the current value immediately but never the
//! ones before it.
//!
//! This is the right primitive for a live view where only the newest state
//! matters. It is NOT reliable delivery — consumers that need gap
//! detection across missed publishes use the `message_id` carried by every
//! message.
//!
//! Built on `tokio::sync::watch`: watch retains the last value, so late
//! subscribers still see it, and its replace+notify is atomic without a
//! lock of our own.

// Rust guideline compliant 2026-02

use tokio::sync::watch;

/// A single-slot broadcast channel holding the latest published value.
#[derive(Debug)]
pub struct LatestSlot<T> {
    tx: watch::Sender<Option<T>>,
}

impl<T: Clone> LatestSlot<T> {
    /// An empty slot. Subscribers attached now wait for the first publish.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Replace the held value and notify all current subscribers.
    ///
    /// Non-blocking; publishing with no subscribers is fine, the value is
    /// simply held for whoever attaches next.
    pub fn publish(&self, value: T) {
        let _ = self.tx.send_replace(Some(value));
    }

    /// Clone of the currently held value, if any.
    pub fn latest(&self) -> Option<T> {
        self.tx.borrow().clone()
    }

    /// Attach a subscriber.
    ///
    /// If a value is already held, the subscriber's first
    /// [`recv`](Subscription::recv) resolves immediately with it; after
    /// that, each `recv` resolves once per subsequent publish, always with
    /// the newest value.
    pub fn subscribe(&self) -> Subscription<T> {
        let mut rx = self.tx.subscribe();
        if rx.borrow().is_some() {
            rx.mark_changed();
        }
        Subscription { rx }
    }

    /// Number of currently attached subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A subscriber handle for one [`LatestSlot`].
#[derive(Debug)]
pub struct Subscription<T> {
    rx: watch::Receiver<Option<T>>,
}

impl<T: Clone> Subscription<T> {
    /// Wait for a value this subscriber has not observed yet.
    ///
    /// Intermediate values published while the subscriber was busy are
    /// conflated — only the newest is returned. Returns `None` once the
    /// slot itself is dropped.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        self.rx.borrow_and_update().clone()
    }

    /// Clone of the slot's current value without waiting or consuming
    /// the change notification.
    pub fn peek(&self) -> Option<T> {
        self.rx.borrow().clone()
    }
}
