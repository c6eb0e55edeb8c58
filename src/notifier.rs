// Notification worker.
// Drains the queue on a dedicated task, persists delivered items to the cache,
// and spaces out desktop popups so they never overlap.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use notify_rust::{Notification, Timeout};
use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::config::Profile;
use crate::error::{Result, WishwatchError};
use crate::steam::WishlistItem;
use crate::store::SharedCache;

/// Names queued but not yet delivered. Lets the poller skip items that are
/// still sitting in the channel.
pub type PendingSet = Arc<Mutex<HashSet<String>>>;

/// Destination for rendered notifications. Production talks to the OS desktop
/// notification facility; tests substitute a recording sink.
pub trait NotificationSink {
    fn send(&self, summary: &str, body: &str, timeout: Duration) -> Result<()>;
}

/// Sink backed by the OS desktop notification service.
pub struct DesktopSink;

impl NotificationSink for DesktopSink {
    fn send(&self, summary: &str, body: &str, timeout: Duration) -> Result<()> {
        Notification::new()
            .summary(summary)
            .body(body)
            .timeout(Timeout::Milliseconds(timeout.as_millis() as u32))
            .show()
            .map_err(|e| WishwatchError::Other(e.to_string()))?;
        Ok(())
    }
}

/// Single background consumer of the notification queue.
pub struct Notifier<S> {
    sink: S,
    profile: Profile,
    cache: SharedCache,
    pending: PendingSet,
    queue: UnboundedReceiver<WishlistItem>,
}

impl<S: NotificationSink> Notifier<S> {
    pub fn new(
        sink: S,
        profile: Profile,
        cache: SharedCache,
        pending: PendingSet,
        queue: UnboundedReceiver<WishlistItem>,
    ) -> Self {
        Self {
            sink,
            profile,
            cache,
            pending,
            queue,
        }
    }

    /// Consume queued items until every sender is dropped. Sleeps the spacing
    /// interval after each item so consecutive popups never pile up.
    pub async fn run(mut self) {
        while let Some(item) = self.queue.recv().await {
            self.deliver(item).await;
            tokio::time::sleep(self.profile.notification_spacing).await;
        }
        tracing::debug!("notification queue closed, worker exiting");
    }

    /// Cache the item, clear its in-flight mark, and show the popup.
    /// The item counts as delivered even when the popup fails.
    async fn deliver(&self, item: WishlistItem) {
        if let Err(e) = self.cache.lock().await.add(item.clone()) {
            tracing::error!(name = %item.name, error = %e, "failed to persist cache");
        }
        self.pending.lock().await.remove(&item.name);

        tracing::info!(name = %item.name, "showing notification");
        if let Err(e) = self.sink.send(
            &item.name,
            &item.describe_offers(),
            self.profile.notification_timeout,
        ) {
            tracing::warn!(name = %item.name, error = %e, "notification dispatch failed");
        }
    }
}
